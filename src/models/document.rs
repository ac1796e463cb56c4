//! Document container: owns every top-level entity of one SSRF document

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::rc::Rc;

use serde::Serialize;
use tracing::warn;

use super::entity::{Addressable, EntityHandle, EntityKind, Shared, shared};
use super::{Assignment, Contact, Location, Note, Organisation, Role};
use crate::reference::{EntitySource, Serial, SerialLookup};
use crate::scalar::Classification;

/// Root of a document
#[derive(Debug, Default)]
pub struct Document {
    /// Marking of the document as a whole
    pub classification: Option<Classification>,
    pub notes: Vec<Shared<Note>>,
    pub contacts: Vec<Shared<Contact>>,
    pub organisations: Vec<Shared<Organisation>>,
    pub roles: Vec<Shared<Role>>,
    pub locations: Vec<Shared<Location>>,
    pub assignments: Vec<Shared<Assignment>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an entity and return the shared handle other entities link to
    pub fn add<E: Addressable>(&mut self, entity: E) -> Shared<E> {
        let entity = shared(entity);
        E::collection_mut(self).push(Rc::clone(&entity));
        entity
    }

    /// Store an already shared entity
    pub fn insert<E: Addressable>(&mut self, entity: Shared<E>) {
        E::collection_mut(self).push(entity);
    }

    pub fn entities<E: Addressable>(&self) -> &[Shared<E>] {
        E::collection(self)
    }

    /// First entity of kind `E` carrying `serial`
    pub fn find<E: Addressable>(&self, serial: &Serial) -> Option<Shared<E>> {
        E::collection(self)
            .iter()
            .find(|entity| entity.borrow().serial() == Some(serial))
            .cloned()
    }

    /// Remove every entity of kind `E` carrying `serial`.
    ///
    /// References to it stay linked until the next build and resolution.
    pub fn remove<E: Addressable>(&mut self, serial: &Serial) -> usize {
        let collection = E::collection_mut(self);
        let before = collection.len();
        collection.retain(|entity| entity.borrow().serial() != Some(serial));
        before - collection.len()
    }

    /// All entities as handles, in kind order then insertion order
    pub fn handles(&self) -> Vec<EntityHandle> {
        let mut handles = Vec::with_capacity(self.len());
        handles.extend(self.notes.iter().cloned().map(EntityHandle::Note));
        handles.extend(self.contacts.iter().cloned().map(EntityHandle::Contact));
        handles.extend(self.organisations.iter().cloned().map(EntityHandle::Organisation));
        handles.extend(self.roles.iter().cloned().map(EntityHandle::Role));
        handles.extend(self.locations.iter().cloned().map(EntityHandle::Location));
        handles.extend(self.assignments.iter().cloned().map(EntityHandle::Assignment));
        handles
    }

    pub fn len(&self) -> usize {
        self.notes.len()
            + self.contacts.len()
            + self.organisations.len()
            + self.roles.len()
            + self.locations.len()
            + self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entity count per kind
    pub fn counts(&self) -> Vec<(EntityKind, usize)> {
        vec![
            (EntityKind::Note, self.notes.len()),
            (EntityKind::Contact, self.contacts.len()),
            (EntityKind::Organisation, self.organisations.len()),
            (EntityKind::Role, self.roles.len()),
            (EntityKind::Location, self.locations.len()),
            (EntityKind::Assignment, self.assignments.len()),
        ]
    }

    pub fn index(&self) -> DocumentIndex {
        DocumentIndex::build(&self.handles())
    }
}

impl EntitySource for Document {
    type Index = DocumentIndex;

    fn handles(&self) -> Vec<EntityHandle> {
        Document::handles(self)
    }

    fn index(&self) -> DocumentIndex {
        Document::index(self)
    }
}

/// Two entities of one kind sharing a serial
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateSerial {
    pub kind: EntityKind,
    pub serial: Serial,
}

/// Serial lookup over a document, one hash map per kind.
///
/// When a serial repeats within a kind the first entity wins.
#[derive(Debug, Clone, Default)]
pub struct DocumentIndex {
    by_kind: HashMap<EntityKind, HashMap<Serial, EntityHandle>>,
    duplicates: Vec<DuplicateSerial>,
    unidentified: usize,
}

impl DocumentIndex {
    pub fn build(handles: &[EntityHandle]) -> Self {
        let mut index = DocumentIndex::default();
        for handle in handles {
            let Some(serial) = handle.serial() else {
                index.unidentified += 1;
                continue;
            };
            let kind = handle.kind();
            match index.by_kind.entry(kind).or_default().entry(serial) {
                Entry::Occupied(entry) => {
                    warn!("Duplicate {} serial '{}', keeping the first", kind, entry.key());
                    index.duplicates.push(DuplicateSerial {
                        kind,
                        serial: entry.key().clone(),
                    });
                }
                Entry::Vacant(entry) => {
                    entry.insert(handle.clone());
                }
            }
        }
        index
    }

    pub fn get(&self, kind: EntityKind, serial: &Serial) -> Option<&EntityHandle> {
        self.by_kind.get(&kind).and_then(|map| map.get(serial))
    }

    pub fn contains(&self, kind: EntityKind, serial: &Serial) -> bool {
        self.get(kind, serial).is_some()
    }

    /// Kinds holding `serial`, in `EntityKind` order
    pub fn kinds_of(&self, serial: &Serial) -> Vec<EntityKind> {
        EntityKind::ALL
            .into_iter()
            .filter(|kind| self.contains(*kind, serial))
            .collect()
    }

    /// Serials indexed for one kind
    pub fn serials(&self, kind: EntityKind) -> impl Iterator<Item = &Serial> {
        self.by_kind.get(&kind).into_iter().flat_map(|map| map.keys())
    }

    pub fn duplicates(&self) -> &[DuplicateSerial] {
        &self.duplicates
    }

    /// Entities skipped because they carry no serial
    pub fn unidentified(&self) -> usize {
        self.unidentified
    }

    pub fn len(&self) -> usize {
        self.by_kind.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SerialLookup for DocumentIndex {
    fn find_by_serial(&self, kind: EntityKind, serial: &Serial) -> Option<EntityHandle> {
        self.get(kind, serial).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn serial(s: &str) -> Serial {
        Serial::parse(s).unwrap()
    }

    #[test]
    fn test_add_returns_stored_handle() {
        let mut doc = Document::new();
        let note = doc.add(Note::new(serial("N1")));
        assert_eq!(doc.len(), 1);
        assert!(Rc::ptr_eq(&note, &doc.notes[0]));
        let found = doc.find::<Note>(&serial("N1")).unwrap();
        assert!(Rc::ptr_eq(&note, &found));
        assert!(doc.find::<Contact>(&serial("N1")).is_none());
    }

    #[test]
    fn test_index_is_per_kind() {
        let mut doc = Document::new();
        doc.add(Note::new(serial("X1")));
        doc.add(Role::new(serial("X1")));
        let index = doc.index();
        assert_eq!(index.len(), 2);
        assert_eq!(
            index.kinds_of(&serial("X1")),
            vec![EntityKind::Note, EntityKind::Role]
        );
        assert!(index.duplicates().is_empty());
    }

    #[test]
    fn test_index_keeps_first_duplicate() {
        let mut doc = Document::new();
        let first = doc.add(Location::new(serial("L1")));
        doc.add(Location::new(serial("L1")));
        doc.add(Location::default());

        let index = doc.index();
        assert_eq!(index.len(), 1);
        assert_eq!(index.unidentified(), 1);
        assert_eq!(
            index.duplicates(),
            &[DuplicateSerial {
                kind: EntityKind::Location,
                serial: serial("L1")
            }]
        );
        let hit = index.find_by_serial(EntityKind::Location, &serial("L1")).unwrap();
        assert!(hit.ptr_eq(&EntityHandle::Location(first)));
    }

    #[test]
    fn test_remove_by_serial() {
        let mut doc = Document::new();
        doc.add(Contact::new(serial("C1")));
        doc.add(Contact::new(serial("C2")));
        assert_eq!(doc.remove::<Contact>(&serial("C1")), 1);
        assert_eq!(doc.entities::<Contact>().len(), 1);
        assert_eq!(doc.remove::<Contact>(&serial("C1")), 0);
    }
}
