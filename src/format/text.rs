//! Length-bounded text and serial identifier adapters

use std::fmt;

use super::error::{FormatError, FormatResult};
use crate::reference::Serial;

/// `S<n>` adapter: non-empty string of at most `max_len` characters.
///
/// Leading and trailing whitespace is rejected: document text is trimmed on
/// import, so such a value would not survive a save and load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFormat {
    pub max_len: u16,
}

impl TextFormat {
    pub fn new(max_len: u16) -> Self {
        Self { max_len }
    }

    pub fn parse(&self, raw: &str) -> FormatResult<String> {
        self.check(raw)?;
        Ok(raw.to_string())
    }

    pub fn check(&self, value: &str) -> FormatResult<()> {
        if value.trim().is_empty() {
            return Err(FormatError::Empty {
                constraint: self.to_string(),
            });
        }
        if value.trim() != value {
            return Err(FormatError::PatternMismatch {
                raw: value.to_string(),
                constraint: self.to_string(),
            });
        }
        let actual = value.chars().count();
        if actual > self.max_len as usize {
            return Err(FormatError::TooLong {
                raw: value.to_string(),
                constraint: self.to_string(),
                actual,
            });
        }
        Ok(())
    }

    pub fn render(&self, value: &str) -> String {
        value.to_string()
    }
}

impl fmt::Display for TextFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.max_len)
    }
}

/// `SERIAL` adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SerialFormat;

impl SerialFormat {
    pub fn parse(&self, raw: &str) -> FormatResult<Serial> {
        Serial::parse(raw)
    }

    pub fn check(&self, value: &Serial) -> FormatResult<()> {
        Serial::parse(value.as_str()).map(|_| ())
    }

    pub fn render(&self, value: &Serial) -> String {
        value.to_string()
    }
}

impl fmt::Display for SerialFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SERIAL {}", Serial::PATTERN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_length_is_counted_in_characters() {
        let format = TextFormat::new(4);
        assert_eq!(format.parse("Zoë!").unwrap(), "Zoë!");
        assert!(matches!(
            format.parse("Zoë!!"),
            Err(FormatError::TooLong { actual: 5, .. })
        ));
    }

    #[test]
    fn test_text_rejects_blank() {
        let format = TextFormat::new(10);
        assert!(matches!(format.parse(""), Err(FormatError::Empty { .. })));
        assert!(matches!(format.parse("   "), Err(FormatError::Empty { .. })));
    }

    #[test]
    fn test_text_rejects_surrounding_whitespace() {
        let format = TextFormat::new(20);
        assert_eq!(format.parse("two  words").unwrap(), "two  words");
        assert!(matches!(
            format.parse("  indented"),
            Err(FormatError::PatternMismatch { .. })
        ));
        assert!(matches!(
            format.check("trailing\n"),
            Err(FormatError::PatternMismatch { .. })
        ));
    }

    #[test]
    fn test_serial_adapter_delegates_to_pattern() {
        let format = SerialFormat;
        let serial = format.parse("USA:NOTE:1").unwrap();
        assert_eq!(format.render(&serial), "USA:NOTE:1");
        assert!(matches!(
            format.parse("bad serial!"),
            Err(FormatError::PatternMismatch { .. })
        ));
    }
}
