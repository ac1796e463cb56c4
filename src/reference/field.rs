//! Reference fields: a wire Serial paired with a transient in-memory target

use std::fmt;
use std::rc::Rc;

use super::serial::Serial;
use crate::models::{Addressable, EntityHandle, EntityKind, Shared};
use crate::scalar::{Classification, Classified};

/// Lookup of entities by Serial, one kind at a time
pub trait SerialLookup {
    fn find_by_serial(&self, kind: EntityKind, serial: &Serial) -> Option<EntityHandle>;
}

/// Types a reference can point at.
///
/// `target_kinds` lists the legal kinds in lookup priority order: the first
/// kind holding the Serial wins.
pub trait RefTarget: Clone + fmt::Debug {
    fn target_kinds() -> &'static [EntityKind];

    fn from_handle(handle: EntityHandle) -> Option<Self>;

    fn handle(&self) -> EntityHandle;

    fn lookup(index: &dyn SerialLookup, serial: &Serial) -> Option<Self> {
        Self::target_kinds().iter().find_map(|kind| {
            index
                .find_by_serial(*kind, serial)
                .and_then(Self::from_handle)
        })
    }
}

impl<E: Addressable> RefTarget for Shared<E> {
    fn target_kinds() -> &'static [EntityKind] {
        E::KIND.as_slice()
    }

    fn from_handle(handle: EntityHandle) -> Option<Self> {
        E::from_handle(handle)
    }

    fn handle(&self) -> EntityHandle {
        E::into_handle(Rc::clone(self))
    }
}

/// Outcome of resolving one reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// No Serial to resolve
    Absent,
    Resolved,
    /// Serial present, no legal target holds it
    Dangling,
}

/// Serial of the current target, as seen by the build pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSerial {
    NoTarget,
    Serial(Serial),
    /// Target has no serial, or is mutably borrowed
    Unaddressable,
}

/// A link from one entity to another.
///
/// `raw` is what the wire format carries; `resolved` is the direct handle set
/// by the resolution pass or by application code, and is never serialized.
///
/// # Example
///
/// ```rust
/// use ssrf_model::models::{Note, Shared};
/// use ssrf_model::reference::{Reference, Serial};
///
/// let reference: Reference<Shared<Note>> = Reference::to(Serial::parse("N1").unwrap());
/// assert!(reference.raw().is_some());
/// assert!(!reference.is_resolved());
/// ```
#[derive(Clone)]
pub struct Reference<T> {
    raw: Classified<Serial>,
    resolved: Option<T>,
}

impl<T> Default for Reference<T> {
    fn default() -> Self {
        Self {
            raw: Classified::empty(),
            resolved: None,
        }
    }
}

impl<T: RefTarget> Reference<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unresolved reference naming `serial`
    pub fn to(serial: Serial) -> Self {
        Self {
            raw: Classified::new(serial),
            resolved: None,
        }
    }

    /// Reference holding a direct target; `raw` is filled in by the build pass
    pub fn linked(target: T) -> Self {
        Self {
            raw: Classified::empty(),
            resolved: Some(target),
        }
    }

    /// Unresolved reference from a parsed wire scalar
    pub fn from_scalar(raw: Classified<Serial>) -> Self {
        Self {
            raw,
            resolved: None,
        }
    }

    pub fn raw(&self) -> Option<&Serial> {
        self.raw.value()
    }

    pub fn raw_scalar(&self) -> &Classified<Serial> {
        &self.raw
    }

    /// Replace the Serial, keeping the marking and metadata of the element
    pub fn set_raw(&mut self, serial: Option<Serial>) {
        let classification = self.raw.classification();
        let meta = std::mem::take(&mut self.raw.meta);
        let mut raw = match serial {
            Some(serial) => Classified::new(serial),
            None => Classified::empty(),
        }
        .with_meta(meta);
        raw.set_classification(classification);
        self.raw = raw;
    }

    pub fn set_classification(&mut self, classification: Option<Classification>) {
        self.raw.set_classification(classification);
    }

    pub fn target(&self) -> Option<&T> {
        self.resolved.as_ref()
    }

    /// Point at `target` directly, bypassing `raw`
    pub fn set_target(&mut self, target: T) {
        self.resolved = Some(target);
    }

    /// Drop the target. `raw` is left for the build pass or `clear`.
    pub fn unlink(&mut self) {
        self.resolved = None;
    }

    /// Remove both the target and the Serial
    pub fn clear(&mut self) {
        self.resolved = None;
        self.set_raw(None);
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }

    /// Serial present but no target
    pub fn is_dangling(&self) -> bool {
        self.raw.is_set() && self.resolved.is_none()
    }

    /// Look `raw` up among the legal target kinds. Without a Serial the
    /// reference is left untouched.
    pub fn resolve(&mut self, index: &dyn SerialLookup) -> Resolution {
        let Some(serial) = self.raw.value() else {
            return Resolution::Absent;
        };
        self.resolved = T::lookup(index, serial);
        if self.resolved.is_some() {
            Resolution::Resolved
        } else {
            Resolution::Dangling
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Reference<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Targets may link back to the owner; print the serial only.
        f.debug_struct("Reference")
            .field("raw", &self.raw.value())
            .field("resolved", &self.resolved.is_some())
            .finish()
    }
}

/// Object-safe view of a reference field, used by the resolver
pub trait ReferenceField {
    fn raw(&self) -> Option<&Serial>;

    fn is_resolved(&self) -> bool;

    fn target_kinds(&self) -> &'static [EntityKind];

    fn target_handle(&self) -> Option<EntityHandle>;

    fn target_serial(&self) -> TargetSerial;

    fn resolve_in(&mut self, index: &dyn SerialLookup) -> Resolution;

    fn assign_raw(&mut self, serial: Serial);
}

impl<T: RefTarget> ReferenceField for Reference<T> {
    fn raw(&self) -> Option<&Serial> {
        Reference::raw(self)
    }

    fn is_resolved(&self) -> bool {
        Reference::is_resolved(self)
    }

    fn target_kinds(&self) -> &'static [EntityKind] {
        T::target_kinds()
    }

    fn target_handle(&self) -> Option<EntityHandle> {
        self.resolved.as_ref().map(RefTarget::handle)
    }

    fn target_serial(&self) -> TargetSerial {
        match &self.resolved {
            None => TargetSerial::NoTarget,
            Some(target) => match target.handle().serial() {
                Some(serial) => TargetSerial::Serial(serial),
                None => TargetSerial::Unaddressable,
            },
        }
    }

    fn resolve_in(&mut self, index: &dyn SerialLookup) -> Resolution {
        self.resolve(index)
    }

    fn assign_raw(&mut self, serial: Serial) {
        if self.raw() != Some(&serial) {
            self.set_raw(Some(serial));
        }
    }
}

/// A named reference field of an entity
pub struct FieldRef<'a> {
    pub name: &'static str,
    pub field: &'a dyn ReferenceField,
}

pub struct FieldMut<'a> {
    pub name: &'static str,
    pub field: &'a mut dyn ReferenceField,
}

/// Entities and sub-structures declaring reference fields.
///
/// Both methods must list the same fields in the same order.
pub trait Linked {
    fn references(&self) -> Vec<FieldRef<'_>>;

    fn references_mut(&mut self) -> Vec<FieldMut<'_>>;
}

/// Collect the fields of a reference list under one name
pub fn list_refs<'a, T: RefTarget>(
    name: &'static str,
    list: &'a [Reference<T>],
) -> impl Iterator<Item = FieldRef<'a>> {
    list.iter().map(move |field| FieldRef { name, field })
}

pub fn list_refs_mut<'a, T: RefTarget>(
    name: &'static str,
    list: &'a mut [Reference<T>],
) -> impl Iterator<Item = FieldMut<'a>> {
    list.iter_mut().map(move |field| FieldMut { name, field })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Document, Note, shared};

    fn serial(s: &str) -> Serial {
        Serial::parse(s).unwrap()
    }

    #[test]
    fn test_set_raw_keeps_marking_and_meta() {
        let mut reference: Reference<Shared<Note>> = Reference::to(serial("N1"));
        reference.set_classification(Some(Classification::Confidential));
        reference.set_raw(Some(serial("N2")));
        assert_eq!(reference.raw(), Some(&serial("N2")));
        assert_eq!(
            reference.raw_scalar().classification(),
            Some(Classification::Confidential)
        );

        reference.clear();
        assert!(reference.raw().is_none());
        assert_eq!(
            reference.raw_scalar().classification(),
            Some(Classification::Confidential)
        );
    }

    #[test]
    fn test_resolve_without_serial_keeps_target() {
        let doc = Document::new();
        let note = shared(Note::new(serial("N1")));
        let mut reference = Reference::linked(Rc::clone(&note));
        assert_eq!(reference.resolve(&doc.index()), Resolution::Absent);
        assert!(Rc::ptr_eq(reference.target().unwrap(), &note));
    }

    #[test]
    fn test_resolve_dangling_drops_stale_target() {
        let mut doc = Document::new();
        let note = doc.add(Note::new(serial("N1")));
        let mut reference = Reference::to(serial("N9"));
        reference.set_target(note);
        assert_eq!(reference.resolve(&doc.index()), Resolution::Dangling);
        assert!(reference.is_dangling());
        assert_eq!(reference.target_serial(), TargetSerial::NoTarget);
    }

    #[test]
    fn test_target_serial_follows_target() {
        let note = shared(Note::new(serial("N1")));
        let reference = Reference::linked(Rc::clone(&note));
        assert_eq!(reference.target_serial(), TargetSerial::Serial(serial("N1")));

        let _guard = note.borrow_mut();
        assert_eq!(reference.target_serial(), TargetSerial::Unaddressable);
    }
}
