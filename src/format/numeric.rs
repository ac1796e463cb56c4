//! Bounded integer and decimal adapters
//!
//! Both adapters check digit width first and the closed interval second, so a
//! value that is too wide reports `TooManyDigits` even when it is also out of
//! range. Nothing is clamped or rounded on the way in.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

use super::code::Unit;
use super::error::{FormatError, FormatResult};

static INTEGER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?[0-9]+$").unwrap());

static DECIMAL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([+-]?)([0-9]+)(?:\.([0-9]+))?$").unwrap());

/// Count significant integer digits (leading zeros are not significant)
fn integer_width(digits: &str) -> usize {
    digits.trim_start_matches('0').len()
}

/// Count significant fractional digits (trailing zeros are not significant)
fn fraction_width(digits: &str) -> usize {
    digits.trim_end_matches('0').len()
}

/// Largest magnitude expressible with `digits` integer digits, saturating at
/// `i64::MAX`
fn integer_ceiling(digits: u8) -> i64 {
    10_i64
        .checked_pow(digits as u32)
        .map_or(i64::MAX, |power| power - 1)
}

/// Largest magnitude expressible with `int_digits`.`frac_digits` digits
fn decimal_ceiling(int_digits: u8, frac_digits: u8) -> Decimal {
    let text = format!(
        "{}.{}",
        "9".repeat(int_digits as usize),
        "9".repeat(frac_digits as usize)
    );
    Decimal::from_str(&text).unwrap_or(Decimal::MAX)
}

fn unit_suffix(unit: Option<Unit>) -> String {
    unit.map(|u| format!(" {}", u)).unwrap_or_default()
}

/// `UN<n>` / `SN<n>` adapter producing `i64` values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerFormat {
    pub digits: u8,
    pub signed: bool,
    pub min: i64,
    pub max: i64,
    pub unit: Option<Unit>,
}

impl IntegerFormat {
    /// Unsigned integer of at most `digits` digits, range `[0, 10^digits - 1]`
    pub fn unsigned(digits: u8) -> Self {
        Self {
            digits,
            signed: false,
            min: 0,
            max: integer_ceiling(digits),
            unit: None,
        }
    }

    /// Signed integer of at most `digits` digits, symmetric range
    pub fn signed(digits: u8) -> Self {
        let ceiling = integer_ceiling(digits);
        Self {
            digits,
            signed: true,
            min: -ceiling,
            max: ceiling,
            unit: None,
        }
    }

    /// Narrow the closed interval
    pub fn with_range(mut self, min: i64, max: i64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn parse(&self, raw: &str) -> FormatResult<i64> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(FormatError::Empty {
                constraint: self.to_string(),
            });
        }
        if !INTEGER_REGEX.is_match(text) {
            return Err(FormatError::PatternMismatch {
                raw: raw.to_string(),
                constraint: self.to_string(),
            });
        }

        let magnitude = text.trim_start_matches(['+', '-']);
        if integer_width(magnitude) > self.digits as usize {
            return Err(FormatError::TooManyDigits {
                raw: raw.to_string(),
                constraint: self.to_string(),
            });
        }

        // Widths beyond i64 fail here rather than in the range check
        let value = i64::from_str(text.trim_start_matches('+')).map_err(|_| {
            FormatError::PatternMismatch {
                raw: raw.to_string(),
                constraint: self.to_string(),
            }
        })?;
        self.check_range(value, raw)?;
        Ok(value)
    }

    /// Validate a language-native value against width and range
    pub fn check(&self, value: i64) -> FormatResult<()> {
        let raw = value.to_string();
        if value.unsigned_abs().to_string().len() > self.digits as usize {
            return Err(FormatError::TooManyDigits {
                raw,
                constraint: self.to_string(),
            });
        }
        self.check_range(value, &raw)
    }

    fn check_range(&self, value: i64, raw: &str) -> FormatResult<()> {
        if value < self.min || value > self.max {
            return Err(FormatError::OutOfRange {
                raw: raw.to_string(),
                constraint: self.to_string(),
            });
        }
        Ok(())
    }

    pub fn render(&self, value: &i64) -> String {
        value.to_string()
    }
}

impl fmt::Display for IntegerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.signed { "SN" } else { "UN" };
        write!(
            f,
            "{}{} [{}, {}]{}",
            prefix,
            self.digits,
            self.min,
            self.max,
            unit_suffix(self.unit)
        )
    }
}

/// `UN(i,f)` / `SN(i,f)` adapter producing exact `Decimal` values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalFormat {
    pub int_digits: u8,
    pub frac_digits: u8,
    pub signed: bool,
    pub min: Decimal,
    pub max: Decimal,
    pub unit: Option<Unit>,
}

impl DecimalFormat {
    pub fn unsigned(int_digits: u8, frac_digits: u8) -> Self {
        Self {
            int_digits,
            frac_digits,
            signed: false,
            min: Decimal::ZERO,
            max: decimal_ceiling(int_digits, frac_digits),
            unit: None,
        }
    }

    pub fn signed(int_digits: u8, frac_digits: u8) -> Self {
        let ceiling = decimal_ceiling(int_digits, frac_digits);
        Self {
            int_digits,
            frac_digits,
            signed: true,
            min: -ceiling,
            max: ceiling,
            unit: None,
        }
    }

    /// Narrow the closed interval
    pub fn with_range(mut self, min: Decimal, max: Decimal) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn parse(&self, raw: &str) -> FormatResult<Decimal> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(FormatError::Empty {
                constraint: self.to_string(),
            });
        }
        let captures = DECIMAL_REGEX
            .captures(text)
            .ok_or_else(|| FormatError::PatternMismatch {
                raw: raw.to_string(),
                constraint: self.to_string(),
            })?;

        let int_part = captures.get(2).map(|m| m.as_str()).unwrap_or("");
        let frac_part = captures.get(3).map(|m| m.as_str()).unwrap_or("");
        if integer_width(int_part) > self.int_digits as usize
            || fraction_width(frac_part) > self.frac_digits as usize
        {
            return Err(FormatError::TooManyDigits {
                raw: raw.to_string(),
                constraint: self.to_string(),
            });
        }

        let mut value = Decimal::from_str(text.trim_start_matches('+')).map_err(|_| {
            FormatError::PatternMismatch {
                raw: raw.to_string(),
                constraint: self.to_string(),
            }
        })?;
        if value.is_zero() {
            value.set_sign_positive(true);
        }
        self.check_range(&value, raw)?;
        Ok(value)
    }

    /// Validate a language-native value against width and range
    pub fn check(&self, value: &Decimal) -> FormatResult<()> {
        let raw = value.to_string();
        let normalized = value.normalize();
        let int_text = normalized.abs().trunc().to_string();
        if normalized.scale() > self.frac_digits as u32
            || integer_width(&int_text) > self.int_digits as usize
        {
            return Err(FormatError::TooManyDigits {
                raw,
                constraint: self.to_string(),
            });
        }
        self.check_range(value, &raw)
    }

    fn check_range(&self, value: &Decimal, raw: &str) -> FormatResult<()> {
        if *value < self.min || *value > self.max {
            return Err(FormatError::OutOfRange {
                raw: raw.to_string(),
                constraint: self.to_string(),
            });
        }
        Ok(())
    }

    /// Canonical form: exactly `frac_digits` fractional digits, no negative zero
    pub fn render(&self, value: &Decimal) -> String {
        let mut value = *value;
        value.rescale(self.frac_digits as u32);
        if value.is_zero() {
            value.set_sign_positive(true);
        }
        value.to_string()
    }
}

impl fmt::Display for DecimalFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.signed { "SN" } else { "UN" };
        write!(
            f,
            "{}({},{}) [{}, {}]{}",
            prefix,
            self.int_digits,
            self.frac_digits,
            self.min,
            self.max,
            unit_suffix(self.unit)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str_exact(s).unwrap()
    }

    #[test]
    fn test_single_digit_unsigned() {
        let format = IntegerFormat::unsigned(1);
        assert_eq!(format.parse("9").unwrap(), 9);
        assert!(matches!(
            format.parse("10"),
            Err(FormatError::TooManyDigits { .. })
        ));
        assert!(matches!(
            format.parse("-1"),
            Err(FormatError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_integer_leading_zeros_not_counted() {
        let format = IntegerFormat::unsigned(3);
        assert_eq!(format.parse("007").unwrap(), 7);
        assert_eq!(format.parse("0999").unwrap(), 999);
        assert_eq!(format.render(&7), "7");
    }

    #[test]
    fn test_integer_pattern() {
        let format = IntegerFormat::signed(4);
        assert_eq!(format.parse("+12").unwrap(), 12);
        assert_eq!(format.parse(" -9999 ").unwrap(), -9999);
        assert!(matches!(
            format.parse("12a"),
            Err(FormatError::PatternMismatch { .. })
        ));
        assert!(matches!(format.parse("  "), Err(FormatError::Empty { .. })));
    }

    #[test]
    fn test_integer_check_native_value() {
        let format = IntegerFormat::unsigned(2).with_range(1, 50);
        assert!(format.check(50).is_ok());
        assert!(matches!(format.check(51), Err(FormatError::OutOfRange { .. })));
        assert!(matches!(format.check(0), Err(FormatError::OutOfRange { .. })));
        assert!(matches!(
            format.check(100),
            Err(FormatError::TooManyDigits { .. })
        ));
    }

    #[test]
    fn test_decimal_bounds_are_inclusive() {
        let format = DecimalFormat::unsigned(3, 2).with_range(dec("0"), dec("359.99"));
        assert_eq!(format.parse("0").unwrap(), dec("0"));
        assert_eq!(format.parse("359.99").unwrap(), dec("359.99"));
        assert!(matches!(
            format.parse("360"),
            Err(FormatError::OutOfRange { .. })
        ));
        assert!(matches!(
            format.parse("-0.01"),
            Err(FormatError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_decimal_precision() {
        let format = DecimalFormat::signed(4, 2);
        assert_eq!(format.parse("1.25").unwrap(), dec("1.25"));
        assert_eq!(format.parse("1.250").unwrap(), dec("1.25"));
        assert!(matches!(
            format.parse("1.255"),
            Err(FormatError::TooManyDigits { .. })
        ));
        assert!(matches!(
            format.parse("12345"),
            Err(FormatError::TooManyDigits { .. })
        ));
        assert!(matches!(
            format.parse("1e5"),
            Err(FormatError::PatternMismatch { .. })
        ));
    }

    #[test]
    fn test_decimal_render_is_canonical() {
        let format = DecimalFormat::signed(4, 2);
        assert_eq!(format.render(&dec("1.5")), "1.50");
        assert_eq!(format.render(&dec("-7")), "-7.00");
        assert_eq!(format.render(&format.parse("-0.00").unwrap()), "0.00");
        assert_eq!(format.render(&format.parse("0012.30").unwrap()), "12.30");
    }

    #[test]
    fn test_decimal_check_native_value() {
        let format = DecimalFormat::signed(2, 6).with_range(dec("-90"), dec("90"));
        assert!(format.check(&dec("51.477928")).is_ok());
        assert!(matches!(
            format.check(&dec("51.4779281")),
            Err(FormatError::TooManyDigits { .. })
        ));
        assert!(matches!(
            format.check(&dec("-90.000001")),
            Err(FormatError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_wide_integer_format_saturates() {
        let format = IntegerFormat::unsigned(19);
        assert_eq!(format.max, i64::MAX);
        assert_eq!(format.parse("5").unwrap(), 5);
        assert_eq!(IntegerFormat::signed(18).max, 999_999_999_999_999_999);
    }

    #[test]
    fn test_display_lists_range_and_unit() {
        let format = DecimalFormat::unsigned(3, 2)
            .with_range(dec("0"), dec("359.99"))
            .with_unit(Unit::Degrees);
        assert_eq!(format.to_string(), "UN(3,2) [0, 359.99] deg");
    }
}
