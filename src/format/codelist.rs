//! Closed code lists and the code-list adapter

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::{FormatError, FormatResult};

/// Identifier of a code list of the standard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CodeListId {
    /// Country, alliance or organisation codes (CAO)
    Country,
    /// Record status (STA)
    Status,
    /// Polarisation (POL)
    Polarisation,
    /// Station class (SCL)
    StationClass,
}

impl CodeListId {
    pub const ALL: [CodeListId; 4] = [
        CodeListId::Country,
        CodeListId::Status,
        CodeListId::Polarisation,
        CodeListId::StationClass,
    ];

    pub fn notation(&self) -> &'static str {
        match self {
            CodeListId::Country => "CAO",
            CodeListId::Status => "STA",
            CodeListId::Polarisation => "POL",
            CodeListId::StationClass => "SCL",
        }
    }

    pub(crate) fn from_notation(s: &str) -> Option<Self> {
        CodeListId::ALL.into_iter().find(|l| l.notation() == s)
    }

    /// Legal tokens of the list
    pub fn codes(&self) -> &'static [&'static str] {
        match self {
            CodeListId::Country => COUNTRY_CODES,
            CodeListId::Status => STATUS_CODES,
            CodeListId::Polarisation => POLARISATION_CODES,
            CodeListId::StationClass => STATION_CLASS_CODES,
        }
    }
}

const COUNTRY_CODES: &[&str] = &[
    "AUS", "BEL", "CAN", "DEU", "DNK", "ESP", "FRA", "GBR", "ITA", "NLD", "NOR", "NZL", "POL",
    "USA", "NATO",
];

const STATUS_CODES: &[&str] = &["Approved", "Pending", "Proposed", "Rejected", "Expired"];

const POLARISATION_CODES: &[&str] = &["H", "V", "L", "R", "S", "X"];

const STATION_CLASS_CODES: &[&str] = &["FB", "FX", "ML", "MO", "MS", "RG", "TA"];

/// Adapter accepting exactly the tokens of one code list (case-sensitive)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeListFormat {
    pub list: CodeListId,
}

impl CodeListFormat {
    pub fn new(list: CodeListId) -> Self {
        Self { list }
    }

    pub fn parse(&self, raw: &str) -> FormatResult<String> {
        let token = raw.trim();
        self.check(token)?;
        Ok(token.to_string())
    }

    pub fn check(&self, value: &str) -> FormatResult<()> {
        if value.is_empty() {
            return Err(FormatError::Empty {
                constraint: self.to_string(),
            });
        }
        if !self.list.codes().contains(&value) {
            return Err(FormatError::UnknownCode {
                raw: value.to_string(),
                constraint: self.to_string(),
            });
        }
        Ok(())
    }

    pub fn render(&self, value: &str) -> String {
        value.to_string()
    }
}

impl fmt::Display for CodeListFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L:{} {{{}}}", self.list.notation(), self.list.codes().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_is_closed() {
        let format = CodeListFormat::new(CodeListId::Status);
        assert_eq!(format.parse("Approved").unwrap(), "Approved");
        assert!(matches!(
            format.parse("approved"),
            Err(FormatError::UnknownCode { .. })
        ));
        assert!(matches!(format.parse(""), Err(FormatError::Empty { .. })));
    }

    #[test]
    fn test_unknown_code_carries_constraint() {
        let format = CodeListFormat::new(CodeListId::Polarisation);
        let err = format.parse("Q").unwrap_err();
        assert_eq!(err.raw(), Some("Q"));
        assert!(err.to_string().contains("L:POL"));
    }
}
