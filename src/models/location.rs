//! Geographic sites of transmitters and receivers

use rust_decimal::Decimal;

use super::common::Common;
use super::entity::{Entity, EntityKind};
use crate::format::{FormatCode, FormatRegistry, FormatResult, Quantity};
use crate::reference::{FieldMut, FieldRef, Linked, Serial};
use crate::scalar::Classified;

pub const NAME: FormatCode = FormatCode::Text(100);
pub const LATITUDE: FormatCode = FormatCode::Quantity(Quantity::Latitude);
pub const LONGITUDE: FormatCode = FormatCode::Quantity(Quantity::Longitude);
pub const ALTITUDE: FormatCode = FormatCode::Quantity(Quantity::Altitude);

#[derive(Debug, Clone, Default)]
pub struct Location {
    pub common: Common,
    pub name: Classified<String>,
    pub latitude: Classified<Decimal>,
    pub longitude: Classified<Decimal>,
    pub altitude: Classified<Decimal>,
}

impl Location {
    pub fn new(serial: Serial) -> Self {
        Self {
            common: Common::new(serial),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: &str) -> FormatResult<Self> {
        self.name = Classified::validated(&NAME, name.to_string(), FormatRegistry::global())?;
        Ok(self)
    }

    /// Decimal degrees, north and east positive
    pub fn with_position(mut self, latitude: Decimal, longitude: Decimal) -> FormatResult<Self> {
        let registry = FormatRegistry::global();
        self.latitude = Classified::validated(&LATITUDE, latitude, registry)?;
        self.longitude = Classified::validated(&LONGITUDE, longitude, registry)?;
        Ok(self)
    }

    /// Metres above mean sea level
    pub fn with_altitude(mut self, altitude: Decimal) -> FormatResult<Self> {
        self.altitude = Classified::validated(&ALTITUDE, altitude, FormatRegistry::global())?;
        Ok(self)
    }
}

impl Linked for Location {
    fn references(&self) -> Vec<FieldRef<'_>> {
        self.common.references().collect()
    }

    fn references_mut(&mut self) -> Vec<FieldMut<'_>> {
        self.common.references_mut().collect()
    }
}

impl Entity for Location {
    fn kind(&self) -> EntityKind {
        EntityKind::Location
    }

    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }
}
