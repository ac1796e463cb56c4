//! Frequency assignments with their transmitters and receivers

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::common::Common;
use super::entity::{Entity, EntityKind, Shared};
use super::location::Location;
use super::poc::PocTarget;
use crate::format::{FormatError, FormatRegistry, FormatResult};
use crate::reference::{FieldMut, FieldRef, Linked, Reference, Serial};
use crate::scalar::Classified;

pub mod codes {
    use crate::format::{CodeListId, FormatCode, Quantity};

    pub const TITLE: FormatCode = FormatCode::Text(100);
    pub const STATUS: FormatCode = FormatCode::List(CodeListId::Status);
    pub const FREQUENCY: FormatCode = FormatCode::Quantity(Quantity::Frequency);
    pub const POWER: FormatCode = FormatCode::Quantity(Quantity::Power);
    pub const AZIMUTH: FormatCode = FormatCode::Quantity(Quantity::Azimuth);
    pub const POLARISATION: FormatCode = FormatCode::List(CodeListId::Polarisation);
    pub const PERIOD: FormatCode = FormatCode::DateTime;
}

/// Emitting equipment of an assignment
#[derive(Debug, Clone, Default)]
pub struct Transmitter {
    /// Output power in dBW
    pub power: Classified<Decimal>,
    pub azimuth: Classified<Decimal>,
    pub polarisation: Classified<String>,
    pub location_ref: Reference<Shared<Location>>,
}

impl Transmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_power(mut self, dbw: Decimal) -> FormatResult<Self> {
        self.power = Classified::validated(&codes::POWER, dbw, FormatRegistry::global())?;
        Ok(self)
    }

    pub fn with_azimuth(mut self, degrees: Decimal) -> FormatResult<Self> {
        self.azimuth = Classified::validated(&codes::AZIMUTH, degrees, FormatRegistry::global())?;
        Ok(self)
    }

    pub fn with_polarisation(mut self, code: &str) -> FormatResult<Self> {
        self.polarisation = Classified::validated(
            &codes::POLARISATION,
            code.to_string(),
            FormatRegistry::global(),
        )?;
        Ok(self)
    }

    pub fn with_location(mut self, location: Shared<Location>) -> Self {
        self.location_ref = Reference::linked(location);
        self
    }
}

/// Receiving equipment of an assignment
#[derive(Debug, Clone, Default)]
pub struct Receiver {
    /// Sensitivity in dBW
    pub sensitivity: Classified<Decimal>,
    pub location_ref: Reference<Shared<Location>>,
}

impl Receiver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sensitivity(mut self, dbw: Decimal) -> FormatResult<Self> {
        self.sensitivity = Classified::validated(&codes::POWER, dbw, FormatRegistry::global())?;
        Ok(self)
    }

    pub fn with_location(mut self, location: Shared<Location>) -> Self {
        self.location_ref = Reference::linked(location);
        self
    }
}

/// A frequency band granted to a point of contact for a period
#[derive(Debug, Clone, Default)]
pub struct Assignment {
    pub common: Common,
    pub title: Classified<String>,
    pub status: Classified<String>,
    /// Lower edge in MHz
    pub frequency_min: Classified<Decimal>,
    /// Upper edge in MHz
    pub frequency_max: Classified<Decimal>,
    pub period_start: Classified<DateTime<Utc>>,
    pub period_end: Classified<DateTime<Utc>>,
    pub poc_ref: Reference<PocTarget>,
    pub transmitters: Vec<Transmitter>,
    pub receivers: Vec<Receiver>,
}

impl Assignment {
    pub fn new(serial: Serial) -> Self {
        Self {
            common: Common::new(serial),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: &str) -> FormatResult<Self> {
        self.title =
            Classified::validated(&codes::TITLE, title.to_string(), FormatRegistry::global())?;
        Ok(self)
    }

    pub fn with_status(mut self, status: &str) -> FormatResult<Self> {
        self.status =
            Classified::validated(&codes::STATUS, status.to_string(), FormatRegistry::global())?;
        Ok(self)
    }

    /// Band edges in MHz; the lower edge may not exceed the upper one
    pub fn with_band(mut self, min: Decimal, max: Decimal) -> FormatResult<Self> {
        let registry = FormatRegistry::global();
        let lower = Classified::validated(&codes::FREQUENCY, min, registry)?;
        let upper = Classified::validated(&codes::FREQUENCY, max, registry)?;
        if min > max {
            return Err(FormatError::OutOfRange {
                raw: min.to_string(),
                constraint: format!("FREQ <= {}", max),
            });
        }
        self.frequency_min = lower;
        self.frequency_max = upper;
        Ok(self)
    }

    pub fn with_period(
        mut self,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> FormatResult<Self> {
        let registry = FormatRegistry::global();
        let start = Classified::validated(&codes::PERIOD, start, registry)?;
        let end = match end {
            Some(end) => Classified::validated(&codes::PERIOD, end, registry)?,
            None => Classified::empty(),
        };
        self.period_start = start;
        self.period_end = end;
        Ok(self)
    }

    pub fn with_poc(mut self, poc: impl Into<PocTarget>) -> Self {
        self.poc_ref = Reference::linked(poc.into());
        self
    }

    pub fn with_transmitter(mut self, transmitter: Transmitter) -> Self {
        self.transmitters.push(transmitter);
        self
    }

    pub fn with_receiver(mut self, receiver: Receiver) -> Self {
        self.receivers.push(receiver);
        self
    }
}

impl Linked for Assignment {
    fn references(&self) -> Vec<FieldRef<'_>> {
        let mut refs: Vec<FieldRef<'_>> = self.common.references().collect();
        refs.push(FieldRef {
            name: "POCRef",
            field: &self.poc_ref,
        });
        refs.extend(self.transmitters.iter().map(|tx| FieldRef {
            name: "Transmitter.LocationRef",
            field: &tx.location_ref,
        }));
        refs.extend(self.receivers.iter().map(|rx| FieldRef {
            name: "Receiver.LocationRef",
            field: &rx.location_ref,
        }));
        refs
    }

    fn references_mut(&mut self) -> Vec<FieldMut<'_>> {
        let mut refs: Vec<FieldMut<'_>> = self.common.references_mut().collect();
        refs.push(FieldMut {
            name: "POCRef",
            field: &mut self.poc_ref,
        });
        refs.extend(self.transmitters.iter_mut().map(|tx| FieldMut {
            name: "Transmitter.LocationRef",
            field: &mut tx.location_ref,
        }));
        refs.extend(self.receivers.iter_mut().map(|rx| FieldMut {
            name: "Receiver.LocationRef",
            field: &mut rx.location_ref,
        }));
        refs
    }
}

impl Entity for Assignment {
    fn kind(&self) -> EntityKind {
        EntityKind::Assignment
    }

    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }
}
