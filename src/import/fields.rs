//! Reading classified scalars and references out of element trees

use tracing::{debug, warn};

use super::ImportError;
use crate::config::SsrfConfig;
use crate::format::{FormatCode, FormatRegistry};
use crate::reference::{RefTarget, Reference, Serial};
use crate::scalar::{Classification, Classified, Scalar, ScalarMeta};
use crate::xml::{XmlNode, tags};

/// Field reader for one import. Collects errors unless the config is strict.
pub(crate) struct FieldReader<'a> {
    registry: &'a FormatRegistry,
    config: &'a SsrfConfig,
    context: String,
    pub(crate) errors: Vec<ImportError>,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(registry: &'a FormatRegistry, config: &'a SsrfConfig) -> Self {
        Self {
            registry,
            config,
            context: String::new(),
            errors: Vec::new(),
        }
    }

    /// Set the path prefix used in diagnostics, e.g. `Contact[C1]`
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

    /// Record a non-fatal error, or fail in strict mode
    pub(crate) fn report(&mut self, error: ImportError) -> Result<(), ImportError> {
        if self.config.strict {
            return Err(error);
        }
        warn!("{}", error);
        self.errors.push(error);
        Ok(())
    }

    /// `cls` attribute of an element
    pub(crate) fn marking(
        &mut self,
        node: &XmlNode,
        path: &str,
    ) -> Result<Option<Classification>, ImportError> {
        match node.attr(tags::CLS) {
            Some(raw) => match raw.parse::<Classification>() {
                Ok(cls) => Ok(Some(cls)),
                Err(_) => {
                    self.report(ImportError::InvalidAttribute {
                        path: path.to_string(),
                        attribute: tags::CLS,
                        value: raw.to_string(),
                    })?;
                    Ok(None)
                }
            },
            None if self.config.require_classification => {
                self.report(ImportError::MissingClassification(path.to_string()))?;
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn indices(
        &mut self,
        node: &XmlNode,
        attribute: &'static str,
        path: &str,
    ) -> Result<Vec<u32>, ImportError> {
        let Some(raw) = node.attr(attribute) else {
            return Ok(Vec::new());
        };
        match raw
            .split_whitespace()
            .map(str::parse::<u32>)
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(indices) => Ok(indices),
            Err(_) => {
                self.report(ImportError::InvalidAttribute {
                    path: path.to_string(),
                    attribute,
                    value: raw.to_string(),
                })?;
                Ok(Vec::new())
            }
        }
    }

    fn meta(&mut self, node: &XmlNode, path: &str) -> Result<ScalarMeta, ImportError> {
        let text = |key: &str| node.attr(key).map(str::to_string);
        Ok(ScalarMeta {
            remarks: self.indices(node, tags::REMARKS, path)?,
            ext_references: self.indices(node, tags::EXT_REFERENCES, path)?,
            legacy_releasability: text(tags::LEGACY_RELEASABILITY),
            quality_flag: text(tags::QUALITY_FLAG),
            recommended_value: text(tags::RECOMMENDED_VALUE),
            availability: text(tags::AVAILABILITY),
        })
    }

    /// Scalar held by the first `element` child of `parent`; unset when absent
    pub(crate) fn scalar<T: Scalar>(
        &mut self,
        parent: &XmlNode,
        element: &str,
        code: &FormatCode,
    ) -> Result<Classified<T>, ImportError> {
        match parent.child(element) {
            Some(node) => self.scalar_node(node, code),
            None => Ok(Classified::empty()),
        }
    }

    /// Scalar held by `node`. A value the adapter rejects is reported and
    /// left unset; its marking and metadata are kept.
    pub(crate) fn scalar_node<T: Scalar>(
        &mut self,
        node: &XmlNode,
        code: &FormatCode,
    ) -> Result<Classified<T>, ImportError> {
        let path = self.path(&node.name);
        let classification = self.marking(node, &path)?;
        let meta = self.meta(node, &path)?;

        let mut scalar = match Classified::<T>::parse(code, node.text(), self.registry) {
            Ok(scalar) => scalar,
            Err(source) => {
                self.report(ImportError::FormatError {
                    path: path.clone(),
                    source,
                })?;
                Classified::empty()
            }
        }
        .with_meta(meta);
        scalar.set_classification(classification);
        debug!("Read {} ({})", path, code);
        Ok(scalar)
    }

    /// Single reference; unset when the element is absent
    pub(crate) fn reference<T: RefTarget>(
        &mut self,
        parent: &XmlNode,
        element: &str,
    ) -> Result<Reference<T>, ImportError> {
        let raw = self.scalar::<Serial>(parent, element, &FormatCode::Serial)?;
        Ok(Reference::from_scalar(raw))
    }

    /// Every `element` child of `parent` as a reference
    pub(crate) fn references<T: RefTarget>(
        &mut self,
        parent: &XmlNode,
        element: &str,
    ) -> Result<Vec<Reference<T>>, ImportError> {
        let mut references = Vec::new();
        for node in parent.children_named(element) {
            let raw = self.scalar_node::<Serial>(node, &FormatCode::Serial)?;
            references.push(Reference::from_scalar(raw));
        }
        Ok(references)
    }
}
