//! Serial identifiers of addressable entities

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::format::FormatError;

static SERIAL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(Serial::PATTERN).unwrap());

/// Symbolic key of one top-level entity within a document.
///
/// Up to three colon-separated segments, e.g. `USA:NOTE:1` or `N1`.
/// Equality, ordering and hashing are those of the canonical string.
///
/// # Example
///
/// ```rust
/// use ssrf_model::reference::Serial;
///
/// let serial = Serial::parse(" USA:LOC:12 ").unwrap();
/// assert_eq!(serial.as_str(), "USA:LOC:12");
/// assert!(Serial::parse("not a serial").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Serial(String);

impl Serial {
    /// Pattern every serial must match
    pub const PATTERN: &'static str = r"^[A-Za-z0-9]{1,10}(:[A-Za-z0-9._-]{1,10}){0,2}$";

    pub fn parse(raw: &str) -> Result<Self, FormatError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(FormatError::Empty {
                constraint: format!("SERIAL {}", Self::PATTERN),
            });
        }
        if !SERIAL_REGEX.is_match(text) {
            return Err(FormatError::PatternMismatch {
                raw: raw.to_string(),
                constraint: format!("SERIAL {}", Self::PATTERN),
            });
        }
        Ok(Self(text.to_string()))
    }

    /// Canonical form, used as the index key
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Serial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Serial {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Serial {
    type Error = FormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Serial> for String {
    fn from(serial: Serial) -> Self {
        serial.0
    }
}

impl AsRef<str> for Serial {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_accepts_segmented_serials() {
        for ok in ["N1", "USA:NOTE:1", "GBR:ASG:2024-07.a", "X:Y"] {
            assert!(Serial::parse(ok).is_ok(), "expected '{}' to parse", ok);
        }
    }

    #[test]
    fn test_rejects_malformed_serials() {
        for bad in ["A:B:C:D", ":X", "USA::1", "has space", "ABCDEFGHIJK", "A:B:"] {
            assert!(
                matches!(Serial::parse(bad), Err(FormatError::PatternMismatch { .. })),
                "expected '{}' to be rejected",
                bad
            );
        }
        assert!(matches!(Serial::parse("  "), Err(FormatError::Empty { .. })));
    }

    #[test]
    fn test_ordering_follows_canonical_string() {
        let set: BTreeSet<Serial> = ["B2", "A10", "A2"]
            .iter()
            .map(|s| Serial::parse(s).unwrap())
            .collect();
        let ordered: Vec<&str> = set.iter().map(Serial::as_str).collect();
        assert_eq!(ordered, vec!["A10", "A2", "B2"]);
    }

    #[test]
    fn test_serde_uses_canonical_string() {
        let serial = Serial::parse("USA:NOTE:1").unwrap();
        let json = serde_json::to_string(&serial).unwrap();
        assert_eq!(json, "\"USA:NOTE:1\"");
        assert!(serde_json::from_str::<Serial>("\"bad serial\"").is_err());
    }
}
