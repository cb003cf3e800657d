//! Pile identity.
//!
//! A pile is identified by `(kind, index)`, unique within a session. The
//! persisted key is the string `"<kind><index>"`, e.g. `tableau3`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Pile type. Determines placement and joining behaviour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PileKind {
    /// Main playing field, built down by alternate colour.
    Tableau,
    /// Built up in suit from Ace.
    Foundation,
    /// Stock and dealt cards. Waste cards never join into runs.
    Waste,
}

impl PileKind {
    /// All pile kinds, in layout order.
    pub const ALL: [PileKind; 3] = [PileKind::Tableau, PileKind::Foundation, PileKind::Waste];

    /// Lowercase name used in pile id strings.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PileKind::Tableau => "tableau",
            PileKind::Foundation => "foundation",
            PileKind::Waste => "waste",
        }
    }
}

/// Unique pile identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PileId {
    pub kind: PileKind,
    pub index: usize,
}

impl PileId {
    /// Create a new pile ID.
    #[must_use]
    pub const fn new(kind: PileKind, index: usize) -> Self {
        Self { kind, index }
    }

    #[must_use]
    pub const fn tableau(index: usize) -> Self {
        Self::new(PileKind::Tableau, index)
    }

    #[must_use]
    pub const fn foundation(index: usize) -> Self {
        Self::new(PileKind::Foundation, index)
    }

    #[must_use]
    pub const fn waste(index: usize) -> Self {
        Self::new(PileKind::Waste, index)
    }
}

impl std::fmt::Display for PileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.kind.name(), self.index)
    }
}

/// Error parsing a pile id string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsePileIdError(pub String);

impl std::fmt::Display for ParsePileIdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid pile id '{}'", self.0)
    }
}

impl std::error::Error for ParsePileIdError {}

impl FromStr for PileId {
    type Err = ParsePileIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePileIdError(s.to_string());
        let kind = PileKind::ALL
            .into_iter()
            .find(|k| s.starts_with(k.name()))
            .ok_or_else(err)?;
        let digits = &s[kind.name().len()..];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }
        let index = digits.parse().map_err(|_| err())?;
        Ok(Self::new(kind, index))
    }
}

impl TryFrom<String> for PileId {
    type Error = ParsePileIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<PileId> for String {
    fn from(id: PileId) -> Self {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(PileId::tableau(0).to_string(), "tableau0");
        assert_eq!(PileId::foundation(3).to_string(), "foundation3");
        assert_eq!(PileId::waste(12).to_string(), "waste12");
    }

    #[test]
    fn test_parse() {
        assert_eq!("tableau6".parse(), Ok(PileId::tableau(6)));
        assert_eq!("waste1".parse(), Ok(PileId::waste(1)));
        assert!("tableau".parse::<PileId>().is_err());
        assert!("tableau-1".parse::<PileId>().is_err());
        assert!("stock0".parse::<PileId>().is_err());
    }

    #[test]
    fn test_serialization() {
        let id = PileId::foundation(2);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""foundation2""#);

        let back: PileId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<PileId>(r#""bogus9""#).is_err());
    }
}
