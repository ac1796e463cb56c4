//! Fields shared by every top-level entity

use chrono::{DateTime, Utc};

use super::entity::Shared;
use super::note::Note;
use crate::format::{FormatCode, FormatRegistry, FormatResult};
use crate::reference::{FieldMut, FieldRef, Reference, Serial, list_refs, list_refs_mut};
use crate::scalar::{Classification, Classified};

pub const SERIAL: FormatCode = FormatCode::Serial;
pub const ENTRY_DATE_TIME: FormatCode = FormatCode::DateTime;
pub const LAST_CHANGE_DATE_TIME: FormatCode = FormatCode::DateTime;

/// Identity and bookkeeping block of a top-level entity
#[derive(Debug, Clone, Default)]
pub struct Common {
    pub serial: Classified<Serial>,
    /// Marking of the entity element itself
    pub classification: Option<Classification>,
    pub entry_date_time: Classified<DateTime<Utc>>,
    pub last_change_date_time: Classified<DateTime<Utc>>,
    pub note_refs: Vec<Reference<Shared<Note>>>,
}

impl Common {
    pub fn new(serial: Serial) -> Self {
        Self {
            serial: Classified::new(serial),
            ..Default::default()
        }
    }

    /// Parse and set the serial from wire text
    pub fn with_serial_text(mut self, raw: &str) -> FormatResult<Self> {
        self.serial = Classified::parse(&SERIAL, raw, FormatRegistry::global())?;
        Ok(self)
    }

    pub fn with_classification(mut self, classification: Classification) -> Self {
        self.classification = Some(classification);
        self
    }

    pub fn with_entry_date_time(mut self, at: DateTime<Utc>) -> FormatResult<Self> {
        self.entry_date_time =
            Classified::validated(&ENTRY_DATE_TIME, at, FormatRegistry::global())?;
        Ok(self)
    }

    pub fn with_last_change_date_time(mut self, at: DateTime<Utc>) -> FormatResult<Self> {
        self.last_change_date_time =
            Classified::validated(&LAST_CHANGE_DATE_TIME, at, FormatRegistry::global())?;
        Ok(self)
    }

    /// Attach a note directly; its Serial is derived on build
    pub fn add_note(&mut self, note: Shared<Note>) {
        self.note_refs.push(Reference::linked(note));
    }

    pub fn notes(&self) -> impl Iterator<Item = &Shared<Note>> {
        self.note_refs.iter().filter_map(Reference::target)
    }

    pub(crate) fn references(&self) -> impl Iterator<Item = FieldRef<'_>> {
        list_refs("NoteRef", &self.note_refs)
    }

    pub(crate) fn references_mut(&mut self) -> impl Iterator<Item = FieldMut<'_>> {
        list_refs_mut("NoteRef", &mut self.note_refs)
    }
}
