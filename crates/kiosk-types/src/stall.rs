use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Identifier of an exhibition stall.
///
/// A stall number is the key for registrations and for the generation quota.
/// It is stored trimmed and is never empty. Comparison is exact: `"a1"` and
/// `"A1"` are different stalls.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StallNo(String);

impl StallNo {
    /// Parse a stall number, trimming surrounding whitespace.
    pub fn parse(raw: &str) -> Result<Self, TypeError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TypeError::EmptyField("stall number"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StallNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StallNo({})", self.0)
    }
}

impl fmt::Display for StallNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for StallNo {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<StallNo> for String {
    fn from(stall: StallNo) -> Self {
        stall.0
    }
}

impl AsRef<str> for StallNo {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims() {
        let s = StallNo::parse("  A1 ").unwrap();
        assert_eq!(s.as_str(), "A1");
        assert_eq!(s.to_string(), "A1");
    }

    #[test]
    fn parse_rejects_blank() {
        assert_eq!(
            StallNo::parse("   "),
            Err(TypeError::EmptyField("stall number"))
        );
        assert!(StallNo::parse("").is_err());
    }

    #[test]
    fn case_sensitive() {
        assert_ne!(StallNo::parse("a1").unwrap(), StallNo::parse("A1").unwrap());
    }

    #[test]
    fn serde_goes_through_parse() {
        let s: StallNo = serde_json::from_str("\" B7 \"").unwrap();
        assert_eq!(s.as_str(), "B7");
        assert!(serde_json::from_str::<StallNo>("\"  \"").is_err());
        assert_eq!(serde_json::to_string(&s).unwrap(), "\"B7\"");
    }
}
