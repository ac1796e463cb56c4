//! Point-of-contact references: a Contact, an Organisation or a Role

use std::rc::Rc;

use super::entity::{EntityHandle, EntityKind, Shared};
use super::{Contact, Organisation, Role};
use crate::reference::RefTarget;

/// Target of a point-of-contact reference.
///
/// Lookup tries Contacts, then Organisations, then Roles; the first kind
/// holding the Serial wins.
#[derive(Debug, Clone)]
pub enum PocTarget {
    Contact(Shared<Contact>),
    Organisation(Shared<Organisation>),
    Role(Shared<Role>),
}

impl PocTarget {
    pub const KINDS: [EntityKind; 3] = [
        EntityKind::Contact,
        EntityKind::Organisation,
        EntityKind::Role,
    ];

    pub fn kind(&self) -> EntityKind {
        match self {
            PocTarget::Contact(_) => EntityKind::Contact,
            PocTarget::Organisation(_) => EntityKind::Organisation,
            PocTarget::Role(_) => EntityKind::Role,
        }
    }

    pub fn as_contact(&self) -> Option<&Shared<Contact>> {
        match self {
            PocTarget::Contact(contact) => Some(contact),
            _ => None,
        }
    }

    pub fn as_organisation(&self) -> Option<&Shared<Organisation>> {
        match self {
            PocTarget::Organisation(organisation) => Some(organisation),
            _ => None,
        }
    }

    pub fn as_role(&self) -> Option<&Shared<Role>> {
        match self {
            PocTarget::Role(role) => Some(role),
            _ => None,
        }
    }
}

impl RefTarget for PocTarget {
    fn target_kinds() -> &'static [EntityKind] {
        &Self::KINDS
    }

    fn from_handle(handle: EntityHandle) -> Option<Self> {
        match handle {
            EntityHandle::Contact(contact) => Some(PocTarget::Contact(contact)),
            EntityHandle::Organisation(organisation) => Some(PocTarget::Organisation(organisation)),
            EntityHandle::Role(role) => Some(PocTarget::Role(role)),
            _ => None,
        }
    }

    fn handle(&self) -> EntityHandle {
        match self {
            PocTarget::Contact(contact) => EntityHandle::Contact(Rc::clone(contact)),
            PocTarget::Organisation(organisation) => {
                EntityHandle::Organisation(Rc::clone(organisation))
            }
            PocTarget::Role(role) => EntityHandle::Role(Rc::clone(role)),
        }
    }
}

impl From<Shared<Contact>> for PocTarget {
    fn from(contact: Shared<Contact>) -> Self {
        PocTarget::Contact(contact)
    }
}

impl From<Shared<Organisation>> for PocTarget {
    fn from(organisation: Shared<Organisation>) -> Self {
        PocTarget::Organisation(organisation)
    }
}

impl From<Shared<Role>> for PocTarget {
    fn from(role: Shared<Role>) -> Self {
        PocTarget::Role(role)
    }
}
