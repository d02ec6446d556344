// src/domain/customer.rs
use crate::domain::audit::ActionTag;
use crate::domain::errors::{DomainError, DomainResult};
use std::{fmt, str::FromStr};

/// Identifies a customer on the tracking platform: usually an email address,
/// or an opaque customer id for the legacy pause link.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomerIdentifier(String);

impl CustomerIdentifier {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation(
                "customer identifier cannot be empty".into(),
            ));
        }
        // Dot segments would be collapsed out of the `/customers/{id}` path.
        if trimmed == "." || trimmed == ".." {
            return Err(DomainError::Validation(format!(
                "customer identifier cannot be {trimmed:?}"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomerIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CustomerIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Action requested through the customer-facing link (`?action=`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomerAction {
    Pause,
    Unpause,
    International,
    Unsubscribe,
}

impl CustomerAction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pause => "pause",
            Self::Unpause => "unpause",
            Self::International => "international",
            Self::Unsubscribe => "unsubscribe",
        }
    }

    pub const fn audit_tag(self) -> ActionTag {
        match self {
            Self::Pause => ActionTag::Pause,
            Self::Unpause => ActionTag::Unpause,
            Self::International => ActionTag::InternationalMove,
            Self::Unsubscribe => ActionTag::Unsubscribe,
        }
    }
}

impl FromStr for CustomerAction {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "pause" => Ok(Self::Pause),
            "unpause" => Ok(Self::Unpause),
            "international" => Ok(Self::International),
            "unsubscribe" => Ok(Self::Unsubscribe),
            other => Err(DomainError::Validation(format!(
                "unknown action requested: {other}"
            ))),
        }
    }
}

impl fmt::Display for CustomerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
