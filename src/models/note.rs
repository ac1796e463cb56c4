//! Free-text note attachable to any entity

use super::common::Common;
use super::entity::{Entity, EntityKind};
use crate::format::{FormatCode, FormatRegistry, FormatResult};
use crate::reference::{FieldMut, FieldRef, Linked, Serial};
use crate::scalar::Classified;

pub const SUBJECT: FormatCode = FormatCode::Text(50);
pub const TEXT: FormatCode = FormatCode::Text(4000);

#[derive(Debug, Clone, Default)]
pub struct Note {
    pub common: Common,
    pub subject: Classified<String>,
    pub text: Classified<String>,
}

impl Note {
    pub fn new(serial: Serial) -> Self {
        Self {
            common: Common::new(serial),
            ..Default::default()
        }
    }

    pub fn with_subject(mut self, subject: &str) -> FormatResult<Self> {
        self.subject =
            Classified::validated(&SUBJECT, subject.to_string(), FormatRegistry::global())?;
        Ok(self)
    }

    pub fn with_text(mut self, text: &str) -> FormatResult<Self> {
        self.set_text(text)?;
        Ok(self)
    }

    /// Replace the text, keeping its marking
    pub fn set_text(&mut self, text: &str) -> FormatResult<()> {
        let classification = self.text.classification();
        let mut value = Classified::validated(&TEXT, text.to_string(), FormatRegistry::global())?;
        value.set_classification(classification);
        self.text = value;
        Ok(())
    }
}

impl Linked for Note {
    fn references(&self) -> Vec<FieldRef<'_>> {
        self.common.references().collect()
    }

    fn references_mut(&mut self) -> Vec<FieldMut<'_>> {
        self.common.references_mut().collect()
    }
}

impl Entity for Note {
    fn kind(&self) -> EntityKind {
        EntityKind::Note
    }

    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }
}
