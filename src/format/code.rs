//! Format codes and their textual notation
//!
//! A [`FormatCode`] names one constraint class of the standard. Structural
//! codes (`S50`, `UN3`, `SN(4,2)`, `D`, `DT`, `SERIAL`) describe their own
//! adapter; named quantities (`FREQ`, `PWR`, ...) and code lists (`L:STA`)
//! are looked up in a [`FormatRegistry`](super::FormatRegistry).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::codelist::CodeListId;
use super::error::FormatError;

/// Largest integer digit width an `UN<n>`/`SN<n>` code may declare (fits `i64`)
pub const MAX_INTEGER_DIGITS: u8 = 18;

/// Largest total digit count of a decimal code (fits `rust_decimal::Decimal`)
pub const MAX_DECIMAL_DIGITS: u8 = 28;

/// Physical unit attached to a quantity format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Unit {
    MHz,
    #[serde(rename = "dBW")]
    DBW,
    #[serde(rename = "dBi")]
    DBi,
    Degrees,
    Metres,
    Microseconds,
}

impl Unit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::MHz => "MHz",
            Unit::DBW => "dBW",
            Unit::DBi => "dBi",
            Unit::Degrees => "deg",
            Unit::Metres => "m",
            Unit::Microseconds => "us",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Named physical quantities of the standard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quantity {
    /// Frequency in MHz, UN(16,9)
    Frequency,
    /// Power in dBW, SN(4,3)
    Power,
    /// Antenna gain in dBi, SN(3,2)
    Gain,
    /// Latitude in decimal degrees, SN(2,6) within [-90, 90]
    Latitude,
    /// Longitude in decimal degrees, SN(3,6) within [-180, 180]
    Longitude,
    /// Altitude in metres, SN(5,1)
    Altitude,
    /// Azimuth in degrees, UN(3,2) within [0, 359.99]
    Azimuth,
    /// Elevation angle in degrees, SN(2,2) within [-90, 90]
    Elevation,
    /// Pulse duration in microseconds, UN(6,3)
    PulseDuration,
}

impl Quantity {
    pub const ALL: [Quantity; 9] = [
        Quantity::Frequency,
        Quantity::Power,
        Quantity::Gain,
        Quantity::Latitude,
        Quantity::Longitude,
        Quantity::Altitude,
        Quantity::Azimuth,
        Quantity::Elevation,
        Quantity::PulseDuration,
    ];

    pub fn notation(&self) -> &'static str {
        match self {
            Quantity::Frequency => "FREQ",
            Quantity::Power => "PWR",
            Quantity::Gain => "GAIN",
            Quantity::Latitude => "LAT",
            Quantity::Longitude => "LON",
            Quantity::Altitude => "ALT",
            Quantity::Azimuth => "AZ",
            Quantity::Elevation => "ELEV",
            Quantity::PulseDuration => "PULSE",
        }
    }

    fn from_notation(s: &str) -> Option<Self> {
        Quantity::ALL.into_iter().find(|q| q.notation() == s)
    }
}

/// One named constraint class of the standard.
///
/// # Example
///
/// ```rust
/// use ssrf_model::format::FormatCode;
///
/// let code: FormatCode = "SN(4,2)".parse().unwrap();
/// assert_eq!(code, FormatCode::SignedDecimal(4, 2));
/// assert_eq!(code.to_string(), "SN(4,2)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FormatCode {
    /// `S<n>`: string of at most n characters
    Text(u16),
    /// `UN<n>`: unsigned integer of at most n digits
    Unsigned(u8),
    /// `SN<n>`: signed integer of at most n digits
    Signed(u8),
    /// `UN(<i>,<f>)`: unsigned decimal
    UnsignedDecimal(u8, u8),
    /// `SN(<i>,<f>)`: signed decimal
    SignedDecimal(u8, u8),
    /// `D`: calendar date
    Date,
    /// `DT`: timestamp
    DateTime,
    /// `SERIAL`: entity identifier
    Serial,
    /// `L:<list>`: member of a closed code list
    List(CodeListId),
    /// Named physical quantity
    Quantity(Quantity),
}

impl FormatCode {
    /// Whether the adapter for this code is derived from the notation alone
    pub fn is_structural(&self) -> bool {
        !matches!(self, FormatCode::List(_) | FormatCode::Quantity(_))
    }

    /// Whether the declared widths are ones the notation parser would accept
    pub fn is_well_formed(&self) -> bool {
        match *self {
            FormatCode::Text(len) => len > 0,
            FormatCode::Unsigned(digits) | FormatCode::Signed(digits) => {
                (1..=MAX_INTEGER_DIGITS).contains(&digits)
            }
            FormatCode::UnsignedDecimal(int_digits, frac_digits)
            | FormatCode::SignedDecimal(int_digits, frac_digits) => {
                int_digits > 0
                    && frac_digits > 0
                    && int_digits as u16 + frac_digits as u16 <= MAX_DECIMAL_DIGITS as u16
            }
            _ => true,
        }
    }
}

impl fmt::Display for FormatCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatCode::Text(n) => write!(f, "S{}", n),
            FormatCode::Unsigned(n) => write!(f, "UN{}", n),
            FormatCode::Signed(n) => write!(f, "SN{}", n),
            FormatCode::UnsignedDecimal(i, d) => write!(f, "UN({},{})", i, d),
            FormatCode::SignedDecimal(i, d) => write!(f, "SN({},{})", i, d),
            FormatCode::Date => write!(f, "D"),
            FormatCode::DateTime => write!(f, "DT"),
            FormatCode::Serial => write!(f, "SERIAL"),
            FormatCode::List(list) => write!(f, "L:{}", list.notation()),
            FormatCode::Quantity(q) => write!(f, "{}", q.notation()),
        }
    }
}

impl FromStr for FormatCode {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || FormatError::InvalidCode(s.to_string());

        match s {
            "D" => return Ok(FormatCode::Date),
            "DT" => return Ok(FormatCode::DateTime),
            "SERIAL" => return Ok(FormatCode::Serial),
            _ => {}
        }

        if let Some(list) = s.strip_prefix("L:") {
            return CodeListId::from_notation(list)
                .map(FormatCode::List)
                .ok_or_else(invalid);
        }

        if let Some(q) = Quantity::from_notation(s) {
            return Ok(FormatCode::Quantity(q));
        }

        for (prefix, signed) in [("UN", false), ("SN", true)] {
            let Some(rest) = s.strip_prefix(prefix) else {
                continue;
            };
            if let Some(inner) = rest.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
                let (int_part, frac_part) = inner.split_once(',').ok_or_else(invalid)?;
                let int_digits: u8 = int_part.trim().parse().map_err(|_| invalid())?;
                let frac_digits: u8 = frac_part.trim().parse().map_err(|_| invalid())?;
                let code = if signed {
                    FormatCode::SignedDecimal(int_digits, frac_digits)
                } else {
                    FormatCode::UnsignedDecimal(int_digits, frac_digits)
                };
                return Some(code).filter(FormatCode::is_well_formed).ok_or_else(invalid);
            }
            let digits: u8 = rest.parse().map_err(|_| invalid())?;
            let code = if signed {
                FormatCode::Signed(digits)
            } else {
                FormatCode::Unsigned(digits)
            };
            return Some(code).filter(FormatCode::is_well_formed).ok_or_else(invalid);
        }

        if let Some(rest) = s.strip_prefix('S') {
            let len: u16 = rest.parse().map_err(|_| invalid())?;
            return Some(FormatCode::Text(len))
                .filter(FormatCode::is_well_formed)
                .ok_or_else(invalid);
        }

        Err(invalid())
    }
}

impl TryFrom<String> for FormatCode {
    type Error = FormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FormatCode> for String {
    fn from(code: FormatCode) -> Self {
        code.to_string()
    }
}
