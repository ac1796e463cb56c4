//! Security classification markings

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Security marking carried by every scalar and entity of a document.
///
/// Ordered by sensitivity, so `Classification::max` picks the stricter marking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Classification {
    #[serde(rename = "U")]
    Unclassified,
    #[serde(rename = "R")]
    Restricted,
    #[serde(rename = "C")]
    Confidential,
    #[serde(rename = "S")]
    Secret,
    #[serde(rename = "T")]
    TopSecret,
}

impl Classification {
    /// Wire token (`cls` attribute value)
    pub fn code(&self) -> &'static str {
        match self {
            Classification::Unclassified => "U",
            Classification::Restricted => "R",
            Classification::Confidential => "C",
            Classification::Secret => "S",
            Classification::TopSecret => "T",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Classification {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "U" => Ok(Classification::Unclassified),
            "R" => Ok(Classification::Restricted),
            "C" => Ok(Classification::Confidential),
            "S" => Ok(Classification::Secret),
            "T" => Ok(Classification::TopSecret),
            other => Err(format!("Unknown classification: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_codes() {
        for cls in [
            Classification::Unclassified,
            Classification::Restricted,
            Classification::Confidential,
            Classification::Secret,
            Classification::TopSecret,
        ] {
            assert_eq!(cls.code().parse::<Classification>().unwrap(), cls);
        }
        assert!("X".parse::<Classification>().is_err());
    }

    #[test]
    fn test_ordering_by_sensitivity() {
        assert!(Classification::Secret > Classification::Confidential);
        assert_eq!(
            Classification::Restricted.max(Classification::Unclassified),
            Classification::Restricted
        );
    }
}
