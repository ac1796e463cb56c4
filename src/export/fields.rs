//! Writing classified scalars and references into element trees

use super::ExportError;
use crate::config::SsrfConfig;
use crate::format::{FormatCode, FormatRegistry};
use crate::reference::{RefTarget, Reference};
use crate::scalar::{Classification, Classified, Scalar, ScalarMeta};
use crate::xml::{XmlNode, tags};

pub(crate) struct FieldWriter<'a> {
    registry: &'a FormatRegistry,
    config: &'a SsrfConfig,
    context: String,
}

impl<'a> FieldWriter<'a> {
    pub(crate) fn new(registry: &'a FormatRegistry, config: &'a SsrfConfig) -> Self {
        Self {
            registry,
            config,
            context: String::new(),
        }
    }

    pub(crate) fn enter(&mut self, context: impl Into<String>) {
        self.context = context.into();
    }

    pub(crate) fn context(&self) -> &str {
        &self.context
    }

    fn path(&self, element: &str) -> String {
        if self.context.is_empty() {
            element.to_string()
        } else {
            format!("{}/{}", self.context, element)
        }
    }

    /// Marking to write: the element's own, else the configured default
    pub(crate) fn marking(
        &self,
        classification: Option<Classification>,
        path: &str,
    ) -> Result<Option<Classification>, ExportError> {
        match classification.or(self.config.default_classification) {
            Some(cls) => Ok(Some(cls)),
            None if self.config.require_classification => {
                Err(ExportError::MissingClassification(path.to_string()))
            }
            None => Ok(None),
        }
    }

    /// Element for an entity or sub-structure, `cls` set when known
    pub(crate) fn element(
        &self,
        name: &str,
        classification: Option<Classification>,
    ) -> Result<XmlNode, ExportError> {
        let path = if self.context.is_empty() {
            name
        } else {
            self.context.as_str()
        };
        let mut node = XmlNode::new(name);
        if let Some(cls) = self.marking(classification, path)? {
            node.set_attr(tags::CLS, cls.code());
        }
        Ok(node)
    }

    /// Append `value` as an `element` child; unset scalars are skipped
    pub(crate) fn scalar<T: Scalar>(
        &self,
        parent: &mut XmlNode,
        element: &str,
        code: &FormatCode,
        value: &Classified<T>,
    ) -> Result<(), ExportError> {
        let path = self.path(element);
        value
            .validate(code, self.registry)
            .map_err(|source| ExportError::FormatError {
                path: path.clone(),
                source,
            })?;
        let rendered = value
            .render(code, self.registry)
            .map_err(|source| ExportError::FormatError {
                path: path.clone(),
                source,
            })?;
        let Some(text) = rendered else {
            return Ok(());
        };

        let mut node = XmlNode::new(element).with_text(text);
        if let Some(cls) = self.marking(value.classification(), &path)? {
            node.set_attr(tags::CLS, cls.code());
        }
        write_meta(&mut node, &value.meta);
        parent.push(node);
        Ok(())
    }

    /// Append the raw Serial of a reference; references without one are skipped
    pub(crate) fn reference<T: RefTarget>(
        &self,
        parent: &mut XmlNode,
        element: &str,
        reference: &Reference<T>,
    ) -> Result<(), ExportError> {
        self.scalar(parent, element, &FormatCode::Serial, reference.raw_scalar())
    }

    pub(crate) fn references<T: RefTarget>(
        &self,
        parent: &mut XmlNode,
        element: &str,
        references: &[Reference<T>],
    ) -> Result<(), ExportError> {
        for reference in references {
            self.reference(parent, element, reference)?;
        }
        Ok(())
    }
}

fn join(indices: &[u32]) -> String {
    indices
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_meta(node: &mut XmlNode, meta: &ScalarMeta) {
    if !meta.remarks.is_empty() {
        node.set_attr(tags::REMARKS, join(&meta.remarks));
    }
    if !meta.ext_references.is_empty() {
        node.set_attr(tags::EXT_REFERENCES, join(&meta.ext_references));
    }
    let optional = [
        (tags::LEGACY_RELEASABILITY, &meta.legacy_releasability),
        (tags::QUALITY_FLAG, &meta.quality_flag),
        (tags::RECOMMENDED_VALUE, &meta.recommended_value),
        (tags::AVAILABILITY, &meta.availability),
    ];
    for (key, value) in optional {
        if let Some(value) = value {
            node.set_attr(key, value.as_str());
        }
    }
}
