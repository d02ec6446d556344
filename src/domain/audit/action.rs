// src/domain/audit/action.rs
use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const MAX_TAG_LEN: usize = 64;

/// Classifies an audit record.
///
/// The set is open: tags written by newer per-brand flows round-trip through
/// [`ActionTag::Other`] so the store never has to know every tag up front.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionTag {
    Pause,
    Unpause,
    /// Moved from the US list to the Australian/international list.
    InternationalMove,
    Unsubscribe,
    SubscriptionUpdate,
    UnsubscribeAll,
    Other(String),
}

impl ActionTag {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pause => "PAUSE",
            Self::Unpause => "UNPAUSE",
            Self::InternationalMove => "BBAU",
            Self::Unsubscribe => "UNSUBSCRIBE",
            Self::SubscriptionUpdate => "SUBSCRIPTION_UPDATE",
            Self::UnsubscribeAll => "UNSUBSCRIBE_ALL",
            Self::Other(tag) => tag,
        }
    }

    /// Parse a tag supplied by a caller. The tag must be 1-64 characters of
    /// `A-Z`, `0-9` or `_`; unknown but well-formed tags are accepted.
    pub fn parse(value: &str) -> DomainResult<Self> {
        let value = value.trim();
        if value.is_empty() || value.len() > MAX_TAG_LEN {
            return Err(DomainError::Validation(format!(
                "action tag must be between 1 and {MAX_TAG_LEN} characters"
            )));
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
        {
            return Err(DomainError::Validation(format!(
                "invalid action tag: {value}"
            )));
        }
        Ok(Self::from_stored(value))
    }

    /// Rebuild a tag read back from storage. Never fails.
    pub fn from_stored(value: &str) -> Self {
        match value {
            "PAUSE" => Self::Pause,
            "UNPAUSE" => Self::Unpause,
            "BBAU" => Self::InternationalMove,
            "UNSUBSCRIBE" => Self::Unsubscribe,
            "SUBSCRIPTION_UPDATE" => Self::SubscriptionUpdate,
            "UNSUBSCRIBE_ALL" => Self::UnsubscribeAll,
            other => Self::Other(other.to_string()),
        }
    }

    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Tags always shown on the admin summary, with a zero count when absent.
    pub const fn summary_defaults() -> [Self; 3] {
        [Self::Pause, Self::InternationalMove, Self::Unsubscribe]
    }
}

impl fmt::Display for ActionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ActionTag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ActionTag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
