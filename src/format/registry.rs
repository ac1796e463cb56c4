//! Format adapter registry
//!
//! Maps every [`FormatCode`] to the adapter that validates and renders its
//! values. The standard registry is built once and shared process-wide;
//! callers that need extra codes build their own and pass it explicitly.

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use super::code::{FormatCode, Quantity, Unit};
use super::codelist::{CodeListFormat, CodeListId};
use super::error::{FormatError, FormatResult};
use super::numeric::{DecimalFormat, IntegerFormat};
use super::temporal::{DateFormat, DateTimeFormat};
use super::text::{SerialFormat, TextFormat};
use crate::scalar::Scalar;

static STANDARD: Lazy<FormatRegistry> = Lazy::new(FormatRegistry::standard);

/// Structural codes used by the entity catalog, registered up front so the
/// registry can list them
const CATALOG_CODES: &[FormatCode] = &[
    FormatCode::Text(20),
    FormatCode::Text(50),
    FormatCode::Text(64),
    FormatCode::Text(100),
    FormatCode::Text(4000),
    FormatCode::Unsigned(2),
    FormatCode::Date,
    FormatCode::DateTime,
    FormatCode::Serial,
];

/// One adapter of the set, tagged by the value type it produces
#[derive(Debug, Clone, PartialEq)]
pub enum Format {
    Integer(IntegerFormat),
    Decimal(DecimalFormat),
    Text(TextFormat),
    Code(CodeListFormat),
    Date(DateFormat),
    DateTime(DateTimeFormat),
    Serial(SerialFormat),
}

impl Format {
    /// Adapter implied by a structural code; `None` for named codes and for
    /// widths the notation does not allow
    pub fn derive(code: &FormatCode) -> Option<Format> {
        if !code.is_well_formed() {
            return None;
        }
        let format = match *code {
            FormatCode::Text(len) => Format::Text(TextFormat::new(len)),
            FormatCode::Unsigned(digits) => Format::Integer(IntegerFormat::unsigned(digits)),
            FormatCode::Signed(digits) => Format::Integer(IntegerFormat::signed(digits)),
            FormatCode::UnsignedDecimal(i, f) => Format::Decimal(DecimalFormat::unsigned(i, f)),
            FormatCode::SignedDecimal(i, f) => Format::Decimal(DecimalFormat::signed(i, f)),
            FormatCode::Date => Format::Date(DateFormat),
            FormatCode::DateTime => Format::DateTime(DateTimeFormat),
            FormatCode::Serial => Format::Serial(SerialFormat),
            FormatCode::List(_) | FormatCode::Quantity(_) => return None,
        };
        Some(format)
    }

    /// Name of the value type the adapter produces
    pub fn value_kind(&self) -> &'static str {
        match self {
            Format::Integer(_) => "integer",
            Format::Decimal(_) => "decimal",
            Format::Text(_) | Format::Code(_) => "text",
            Format::Date(_) => "date",
            Format::DateTime(_) => "date-time",
            Format::Serial(_) => "serial",
        }
    }

    pub fn unit(&self) -> Option<Unit> {
        match self {
            Format::Integer(f) => f.unit,
            Format::Decimal(f) => f.unit,
            _ => None,
        }
    }

    /// Check raw text without keeping the typed value
    pub fn validate(&self, raw: &str) -> FormatResult<()> {
        self.canonicalize(raw).map(|_| ())
    }

    /// Parse raw text and render it back in canonical form
    pub fn canonicalize(&self, raw: &str) -> FormatResult<String> {
        Ok(match self {
            Format::Integer(f) => f.render(&f.parse(raw)?),
            Format::Decimal(f) => f.render(&f.parse(raw)?),
            Format::Text(f) => f.render(&f.parse(raw)?),
            Format::Code(f) => f.render(&f.parse(raw)?),
            Format::Date(f) => f.render(&f.parse(raw)?),
            Format::DateTime(f) => f.render(&f.parse(raw)?),
            Format::Serial(f) => f.render(&f.parse(raw)?),
        })
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Integer(inner) => inner.fmt(f),
            Format::Decimal(inner) => inner.fmt(f),
            Format::Text(inner) => inner.fmt(f),
            Format::Code(inner) => inner.fmt(f),
            Format::Date(inner) => inner.fmt(f),
            Format::DateTime(inner) => inner.fmt(f),
            Format::Serial(inner) => inner.fmt(f),
        }
    }
}

fn quantity_format(quantity: Quantity) -> Format {
    let decimal = match quantity {
        Quantity::Frequency => DecimalFormat::unsigned(16, 9).with_unit(Unit::MHz),
        Quantity::Power => DecimalFormat::signed(4, 3).with_unit(Unit::DBW),
        Quantity::Gain => DecimalFormat::signed(3, 2)
            .with_range(Decimal::from(-100), Decimal::from(100))
            .with_unit(Unit::DBi),
        Quantity::Latitude => DecimalFormat::signed(2, 6)
            .with_range(Decimal::from(-90), Decimal::from(90))
            .with_unit(Unit::Degrees),
        Quantity::Longitude => DecimalFormat::signed(3, 6)
            .with_range(Decimal::from(-180), Decimal::from(180))
            .with_unit(Unit::Degrees),
        Quantity::Altitude => DecimalFormat::signed(5, 1)
            .with_range(Decimal::from(-1000), Decimal::from(40000))
            .with_unit(Unit::Metres),
        Quantity::Azimuth => DecimalFormat::unsigned(3, 2)
            .with_range(Decimal::ZERO, Decimal::new(35999, 2))
            .with_unit(Unit::Degrees),
        Quantity::Elevation => DecimalFormat::signed(2, 2)
            .with_range(Decimal::from(-90), Decimal::from(90))
            .with_unit(Unit::Degrees),
        Quantity::PulseDuration => DecimalFormat::unsigned(6, 3).with_unit(Unit::Microseconds),
    };
    Format::Decimal(decimal)
}

/// Registry of format adapters keyed by format code
#[derive(Debug, Clone, Default)]
pub struct FormatRegistry {
    adapters: BTreeMap<FormatCode, Format>,
}

impl FormatRegistry {
    /// Create an empty registry (structural codes still resolve)
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every named quantity, code list and catalog code
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for quantity in Quantity::ALL {
            registry.register(FormatCode::Quantity(quantity), quantity_format(quantity));
        }
        for list in CodeListId::ALL {
            registry.register(FormatCode::List(list), Format::Code(CodeListFormat::new(list)));
        }
        for code in CATALOG_CODES {
            if let Some(format) = Format::derive(code) {
                registry.register(*code, format);
            }
        }
        registry
    }

    /// Process-wide standard registry, built on first use
    pub fn global() -> &'static FormatRegistry {
        &STANDARD
    }

    /// Register or replace the adapter for a code
    pub fn register(&mut self, code: FormatCode, format: Format) -> Option<Format> {
        self.adapters.insert(code, format)
    }

    /// Adapter for a code: registered first, derived from the notation otherwise
    pub fn lookup(&self, code: &FormatCode) -> FormatResult<Cow<'_, Format>> {
        if let Some(format) = self.adapters.get(code) {
            return Ok(Cow::Borrowed(format));
        }
        if !code.is_well_formed() {
            return Err(FormatError::InvalidCode(code.to_string()));
        }
        Format::derive(code)
            .map(Cow::Owned)
            .ok_or_else(|| FormatError::UnknownFormat(code.to_string()))
    }

    /// Registered codes in notation order
    pub fn entries(&self) -> impl Iterator<Item = (&FormatCode, &Format)> {
        self.adapters.iter()
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    /// Parse raw text into a typed value through the adapter for `code`
    pub fn parse<T: Scalar>(&self, code: &FormatCode, raw: &str) -> FormatResult<T> {
        let format = self.lookup(code)?;
        T::parse_with(&format, raw)
    }

    /// Render a typed value through the adapter for `code`
    pub fn render<T: Scalar>(&self, code: &FormatCode, value: &T) -> FormatResult<String> {
        let format = self.lookup(code)?;
        value.render_with(&format)
    }

    /// Validate a language-native value against the adapter for `code`
    pub fn check<T: Scalar>(&self, code: &FormatCode, value: &T) -> FormatResult<()> {
        let format = self.lookup(code)?;
        value.check_with(&format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registers_named_codes() {
        let registry = FormatRegistry::standard();
        for quantity in Quantity::ALL {
            assert!(registry.lookup(&FormatCode::Quantity(quantity)).is_ok());
        }
        for list in CodeListId::ALL {
            assert!(registry.lookup(&FormatCode::List(list)).is_ok());
        }
    }

    #[test]
    fn test_empty_registry_derives_structural_codes() {
        let registry = FormatRegistry::new();
        assert!(registry.is_empty());
        assert!(matches!(
            registry.lookup(&FormatCode::Unsigned(3)),
            Ok(Cow::Owned(Format::Integer(_)))
        ));
        assert!(matches!(
            registry.lookup(&FormatCode::Quantity(Quantity::Frequency)),
            Err(FormatError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_out_of_bounds_code_is_rejected() {
        let registry = FormatRegistry::new();
        assert!(Format::derive(&FormatCode::Unsigned(19)).is_none());
        assert!(matches!(
            registry.parse::<i64>(&FormatCode::Unsigned(19), "5"),
            Err(FormatError::InvalidCode(_))
        ));
        assert!(matches!(
            registry.parse::<Decimal>(&FormatCode::SignedDecimal(20, 9), "5"),
            Err(FormatError::InvalidCode(_))
        ));
        assert!(matches!(
            registry.render::<String>(&FormatCode::Text(0), &"x".to_string()),
            Err(FormatError::InvalidCode(_))
        ));
    }

    #[test]
    fn test_register_overrides_derived_adapter() {
        let mut registry = FormatRegistry::new();
        let narrow = IntegerFormat::unsigned(3).with_range(1, 100);
        registry.register(FormatCode::Unsigned(3), Format::Integer(narrow));

        assert_eq!(registry.parse::<i64>(&FormatCode::Unsigned(3), "100").unwrap(), 100);
        assert!(matches!(
            registry.parse::<i64>(&FormatCode::Unsigned(3), "101"),
            Err(FormatError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_typed_parse_and_render() {
        let registry = FormatRegistry::global();
        let azimuth = FormatCode::Quantity(Quantity::Azimuth);
        let value: Decimal = registry.parse(&azimuth, "90.5").unwrap();
        assert_eq!(registry.render(&azimuth, &value).unwrap(), "90.50");
    }

    #[test]
    fn test_kind_mismatch_is_reported() {
        let registry = FormatRegistry::global();
        let result = registry.parse::<i64>(&FormatCode::Text(10), "12");
        assert!(matches!(result, Err(FormatError::KindMismatch { .. })));
    }

    #[test]
    fn test_canonicalize() {
        let registry = FormatRegistry::global();
        let power = registry
            .lookup(&FormatCode::Quantity(Quantity::Power))
            .unwrap();
        assert_eq!(power.canonicalize("-3.5").unwrap(), "-3.500");
        assert_eq!(power.unit(), Some(Unit::DBW));
    }
}
