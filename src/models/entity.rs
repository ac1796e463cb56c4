//! Entity kinds, shared handles and the traits every catalog entity implements

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::common::Common;
use super::document::Document;
use super::{Assignment, Contact, Location, Note, Organisation, Role};
use crate::reference::{Linked, Serial};

/// Shared, mutable entity instance. Every reference to an entity points at the
/// same allocation, so identity is pointer identity.
pub type Shared<T> = Rc<RefCell<T>>;

/// Wrap an entity for storage in a document
pub fn shared<T>(entity: T) -> Shared<T> {
    Rc::new(RefCell::new(entity))
}

/// Addressable top-level entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Note,
    Contact,
    Organisation,
    Role,
    Location,
    Assignment,
}

impl EntityKind {
    /// All kinds in document order
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Note,
        EntityKind::Contact,
        EntityKind::Organisation,
        EntityKind::Role,
        EntityKind::Location,
        EntityKind::Assignment,
    ];

    /// Element name of the kind in the wire format
    pub fn element_name(&self) -> &'static str {
        match self {
            EntityKind::Note => "Note",
            EntityKind::Contact => "Contact",
            EntityKind::Organisation => "Organisation",
            EntityKind::Role => "Role",
            EntityKind::Location => "Location",
            EntityKind::Assignment => "Assignment",
        }
    }

    pub fn from_element_name(name: &str) -> Option<Self> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.element_name() == name)
    }

    /// The kind as a one-element slice
    pub fn as_slice(self) -> &'static [EntityKind] {
        match self {
            EntityKind::Note => &[EntityKind::Note],
            EntityKind::Contact => &[EntityKind::Contact],
            EntityKind::Organisation => &[EntityKind::Organisation],
            EntityKind::Role => &[EntityKind::Role],
            EntityKind::Location => &[EntityKind::Location],
            EntityKind::Assignment => &[EntityKind::Assignment],
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_name())
    }
}

/// Behaviour shared by every top-level entity, object safe
pub trait Entity: Linked + fmt::Debug {
    fn kind(&self) -> EntityKind;

    fn common(&self) -> &Common;

    fn common_mut(&mut self) -> &mut Common;

    fn serial(&self) -> Option<&Serial> {
        self.common().serial.value()
    }
}

/// Concrete entity types that can be stored in a document and referenced
pub trait Addressable: Entity + Sized + 'static {
    const KIND: EntityKind;

    fn into_handle(entity: Shared<Self>) -> EntityHandle;

    fn from_handle(handle: EntityHandle) -> Option<Shared<Self>>;

    fn collection(document: &Document) -> &Vec<Shared<Self>>;

    fn collection_mut(document: &mut Document) -> &mut Vec<Shared<Self>>;
}

/// Polymorphic handle over any addressable entity
#[derive(Debug, Clone)]
pub enum EntityHandle {
    Note(Shared<Note>),
    Contact(Shared<Contact>),
    Organisation(Shared<Organisation>),
    Role(Shared<Role>),
    Location(Shared<Location>),
    Assignment(Shared<Assignment>),
}

impl EntityHandle {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityHandle::Note(_) => EntityKind::Note,
            EntityHandle::Contact(_) => EntityKind::Contact,
            EntityHandle::Organisation(_) => EntityKind::Organisation,
            EntityHandle::Role(_) => EntityKind::Role,
            EntityHandle::Location(_) => EntityKind::Location,
            EntityHandle::Assignment(_) => EntityKind::Assignment,
        }
    }

    /// Borrow the entity immutably. Panics if it is mutably borrowed.
    pub fn with<R>(&self, f: impl FnOnce(&dyn Entity) -> R) -> R {
        match self {
            EntityHandle::Note(e) => f(&*e.borrow()),
            EntityHandle::Contact(e) => f(&*e.borrow()),
            EntityHandle::Organisation(e) => f(&*e.borrow()),
            EntityHandle::Role(e) => f(&*e.borrow()),
            EntityHandle::Location(e) => f(&*e.borrow()),
            EntityHandle::Assignment(e) => f(&*e.borrow()),
        }
    }

    /// Borrow the entity immutably, `None` if it is mutably borrowed
    pub fn try_with<R>(&self, f: impl FnOnce(&dyn Entity) -> R) -> Option<R> {
        match self {
            EntityHandle::Note(e) => e.try_borrow().ok().map(|e| f(&*e)),
            EntityHandle::Contact(e) => e.try_borrow().ok().map(|e| f(&*e)),
            EntityHandle::Organisation(e) => e.try_borrow().ok().map(|e| f(&*e)),
            EntityHandle::Role(e) => e.try_borrow().ok().map(|e| f(&*e)),
            EntityHandle::Location(e) => e.try_borrow().ok().map(|e| f(&*e)),
            EntityHandle::Assignment(e) => e.try_borrow().ok().map(|e| f(&*e)),
        }
    }

    /// Borrow the entity mutably. Panics if it is already borrowed.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut dyn Entity) -> R) -> R {
        match self {
            EntityHandle::Note(e) => f(&mut *e.borrow_mut()),
            EntityHandle::Contact(e) => f(&mut *e.borrow_mut()),
            EntityHandle::Organisation(e) => f(&mut *e.borrow_mut()),
            EntityHandle::Role(e) => f(&mut *e.borrow_mut()),
            EntityHandle::Location(e) => f(&mut *e.borrow_mut()),
            EntityHandle::Assignment(e) => f(&mut *e.borrow_mut()),
        }
    }

    /// Current serial of the entity; `None` when unset or mutably borrowed
    pub fn serial(&self) -> Option<Serial> {
        self.try_with(|e| e.serial().cloned()).flatten()
    }

    /// Same physical entity
    pub fn ptr_eq(&self, other: &EntityHandle) -> bool {
        match (self, other) {
            (EntityHandle::Note(a), EntityHandle::Note(b)) => Rc::ptr_eq(a, b),
            (EntityHandle::Contact(a), EntityHandle::Contact(b)) => Rc::ptr_eq(a, b),
            (EntityHandle::Organisation(a), EntityHandle::Organisation(b)) => Rc::ptr_eq(a, b),
            (EntityHandle::Role(a), EntityHandle::Role(b)) => Rc::ptr_eq(a, b),
            (EntityHandle::Location(a), EntityHandle::Location(b)) => Rc::ptr_eq(a, b),
            (EntityHandle::Assignment(a), EntityHandle::Assignment(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Implements `Addressable` for an entity stored in the named document collection
macro_rules! addressable {
    ($entity:ident, $collection:ident) => {
        impl Addressable for $entity {
            const KIND: EntityKind = EntityKind::$entity;

            fn into_handle(entity: Shared<Self>) -> EntityHandle {
                EntityHandle::$entity(entity)
            }

            fn from_handle(handle: EntityHandle) -> Option<Shared<Self>> {
                match handle {
                    EntityHandle::$entity(entity) => Some(entity),
                    _ => None,
                }
            }

            fn collection(document: &Document) -> &Vec<Shared<Self>> {
                &document.$collection
            }

            fn collection_mut(document: &mut Document) -> &mut Vec<Shared<Self>> {
                &mut document.$collection
            }
        }
    };
}

addressable!(Note, notes);
addressable!(Contact, contacts);
addressable!(Organisation, organisations);
addressable!(Role, roles);
addressable!(Location, locations);
addressable!(Assignment, assignments);
