//! Contacts, organisations and roles

use super::common::Common;
use super::entity::{Entity, EntityKind, Shared};
use super::poc::PocTarget;
use crate::format::{FormatRegistry, FormatResult};
use crate::reference::{FieldMut, FieldRef, Linked, Reference, Serial, list_refs, list_refs_mut};
use crate::scalar::Classified;

pub mod codes {
    use crate::format::{CodeListId, FormatCode};

    pub const NAME: FormatCode = FormatCode::Text(50);
    pub const PHONE: FormatCode = FormatCode::Text(20);
    pub const EMAIL: FormatCode = FormatCode::Text(64);
    pub const ORGANISATION_NAME: FormatCode = FormatCode::Text(100);
    pub const ABBREVIATION: FormatCode = FormatCode::Text(20);
    pub const COUNTRY: FormatCode = FormatCode::List(CodeListId::Country);
}

/// A person reachable about an assignment
#[derive(Debug, Clone, Default)]
pub struct Contact {
    pub common: Common,
    pub name: Classified<String>,
    pub phone: Classified<String>,
    pub email: Classified<String>,
    pub organisation_ref: Reference<Shared<Organisation>>,
}

impl Contact {
    pub fn new(serial: Serial) -> Self {
        Self {
            common: Common::new(serial),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: &str) -> FormatResult<Self> {
        self.name =
            Classified::validated(&codes::NAME, name.to_string(), FormatRegistry::global())?;
        Ok(self)
    }

    pub fn with_phone(mut self, phone: &str) -> FormatResult<Self> {
        self.phone =
            Classified::validated(&codes::PHONE, phone.to_string(), FormatRegistry::global())?;
        Ok(self)
    }

    pub fn with_email(mut self, email: &str) -> FormatResult<Self> {
        self.email =
            Classified::validated(&codes::EMAIL, email.to_string(), FormatRegistry::global())?;
        Ok(self)
    }

    pub fn with_organisation(mut self, organisation: Shared<Organisation>) -> Self {
        self.organisation_ref = Reference::linked(organisation);
        self
    }
}

impl Linked for Contact {
    fn references(&self) -> Vec<FieldRef<'_>> {
        let mut refs: Vec<FieldRef<'_>> = self.common.references().collect();
        refs.push(FieldRef {
            name: "OrganisationRef",
            field: &self.organisation_ref,
        });
        refs
    }

    fn references_mut(&mut self) -> Vec<FieldMut<'_>> {
        let mut refs: Vec<FieldMut<'_>> = self.common.references_mut().collect();
        refs.push(FieldMut {
            name: "OrganisationRef",
            field: &mut self.organisation_ref,
        });
        refs
    }
}

impl Entity for Contact {
    fn kind(&self) -> EntityKind {
        EntityKind::Contact
    }

    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }
}

/// An administration, agency or unit; may sit under a parent organisation
#[derive(Debug, Clone, Default)]
pub struct Organisation {
    pub common: Common,
    pub name: Classified<String>,
    pub abbreviated_name: Classified<String>,
    pub country: Classified<String>,
    pub parent_ref: Reference<Shared<Organisation>>,
    pub poc_refs: Vec<Reference<PocTarget>>,
}

impl Organisation {
    pub fn new(serial: Serial) -> Self {
        Self {
            common: Common::new(serial),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: &str) -> FormatResult<Self> {
        self.name = Classified::validated(
            &codes::ORGANISATION_NAME,
            name.to_string(),
            FormatRegistry::global(),
        )?;
        Ok(self)
    }

    pub fn with_abbreviated_name(mut self, abbreviation: &str) -> FormatResult<Self> {
        self.abbreviated_name = Classified::validated(
            &codes::ABBREVIATION,
            abbreviation.to_string(),
            FormatRegistry::global(),
        )?;
        Ok(self)
    }

    /// Country code from the `CAO` list
    pub fn with_country(mut self, country: &str) -> FormatResult<Self> {
        self.country = Classified::validated(
            &codes::COUNTRY,
            country.to_string(),
            FormatRegistry::global(),
        )?;
        Ok(self)
    }

    pub fn with_parent(mut self, parent: Shared<Organisation>) -> Self {
        self.parent_ref = Reference::linked(parent);
        self
    }

    pub fn add_poc(&mut self, poc: impl Into<PocTarget>) {
        self.poc_refs.push(Reference::linked(poc.into()));
    }
}

impl Linked for Organisation {
    fn references(&self) -> Vec<FieldRef<'_>> {
        let mut refs: Vec<FieldRef<'_>> = self.common.references().collect();
        refs.push(FieldRef {
            name: "ParentRef",
            field: &self.parent_ref,
        });
        refs.extend(list_refs("POCRef", &self.poc_refs));
        refs
    }

    fn references_mut(&mut self) -> Vec<FieldMut<'_>> {
        let mut refs: Vec<FieldMut<'_>> = self.common.references_mut().collect();
        refs.push(FieldMut {
            name: "ParentRef",
            field: &mut self.parent_ref,
        });
        refs.extend(list_refs_mut("POCRef", &mut self.poc_refs));
        refs
    }
}

impl Entity for Organisation {
    fn kind(&self) -> EntityKind {
        EntityKind::Organisation
    }

    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }
}

/// A function within an organisation, e.g. a duty frequency manager
#[derive(Debug, Clone, Default)]
pub struct Role {
    pub common: Common,
    pub name: Classified<String>,
    pub organisation_ref: Reference<Shared<Organisation>>,
}

impl Role {
    pub fn new(serial: Serial) -> Self {
        Self {
            common: Common::new(serial),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: &str) -> FormatResult<Self> {
        self.name =
            Classified::validated(&codes::NAME, name.to_string(), FormatRegistry::global())?;
        Ok(self)
    }

    pub fn with_organisation(mut self, organisation: Shared<Organisation>) -> Self {
        self.organisation_ref = Reference::linked(organisation);
        self
    }
}

impl Linked for Role {
    fn references(&self) -> Vec<FieldRef<'_>> {
        let mut refs: Vec<FieldRef<'_>> = self.common.references().collect();
        refs.push(FieldRef {
            name: "OrganisationRef",
            field: &self.organisation_ref,
        });
        refs
    }

    fn references_mut(&mut self) -> Vec<FieldMut<'_>> {
        let mut refs: Vec<FieldMut<'_>> = self.common.references_mut().collect();
        refs.push(FieldMut {
            name: "OrganisationRef",
            field: &mut self.organisation_ref,
        });
        refs
    }
}

impl Entity for Role {
    fn kind(&self) -> EntityKind {
        EntityKind::Role
    }

    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }
}
