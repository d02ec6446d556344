// src/domain/preferences.rs
use crate::domain::errors::{DomainError, DomainResult};
use std::{collections::BTreeMap, fmt, str::FromStr};

pub const PAUSED_ATTRIBUTE: &str = "paused";
pub const UNSUBSCRIBED_ATTRIBUTE: &str = "unsubscribed";

/// Per-brand subscription attributes cleared by "unsubscribe from everything".
pub const KNOWN_BRANDS: [&str; 8] = [
    "sub_bbau", "sub_bbus", "sub_csau", "sub_csus", "sub_ffau", "sub_ffus", "sub_sbau",
    "sub_ppau",
];

/// Object type of the regional list objects on the tracking platform.
pub const LIST_OBJECT_TYPE_ID: &str = "1";
/// US list every customer starts on.
pub const US_LIST: &str = "BBUS";
/// Australian/international list.
pub const INTERNATIONAL_LIST: &str = "BBAU";

const MAX_BRAND_KEY_LEN: usize = 64;

/// Name of a per-brand subscription attribute, e.g. `sub_bbau`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BrandKey(String);

impl BrandKey {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.is_empty() || value.len() > MAX_BRAND_KEY_LEN {
            return Err(DomainError::Validation(format!(
                "subscription key must be between 1 and {MAX_BRAND_KEY_LEN} characters"
            )));
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        {
            return Err(DomainError::Validation(format!(
                "invalid subscription key: {value}"
            )));
        }
        if value == UNSUBSCRIBED_ATTRIBUTE || value == PAUSED_ATTRIBUTE {
            return Err(DomainError::Validation(format!(
                "{value} cannot be set as a subscription"
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BrandKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Requested state of one brand subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionChoice {
    Subscribed,
    Unsubscribed,
    /// Remove the attribute from the customer profile.
    Cleared,
}

impl SubscriptionChoice {
    pub const fn attribute_value(self) -> Option<bool> {
        match self {
            Self::Subscribed => Some(true),
            Self::Unsubscribed => Some(false),
            Self::Cleared => None,
        }
    }
}

impl FromStr for SubscriptionChoice {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "true" => Ok(Self::Subscribed),
            "false" => Ok(Self::Unsubscribed),
            "none" => Ok(Self::Cleared),
            other => Err(DomainError::Validation(format!(
                "subscription value must be \"true\", \"false\" or \"none\", got {other:?}"
            ))),
        }
    }
}

/// Attribute writes for one customer. `None` removes the attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributePatch(BTreeMap<String, Option<bool>>);

impl AttributePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, attribute: impl Into<String>, value: bool) -> Self {
        self.0.insert(attribute.into(), Some(value));
        self
    }

    pub fn remove(mut self, attribute: impl Into<String>) -> Self {
        self.0.insert(attribute.into(), None);
        self
    }

    pub fn get(&self, attribute: &str) -> Option<Option<bool>> {
        self.0.get(attribute).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<bool>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Patch for a bulk subscription update. Any active subscription also
    /// clears the permanent unsubscribe flag.
    pub fn for_subscriptions(choices: &BTreeMap<BrandKey, SubscriptionChoice>) -> Self {
        let mut patch = choices
            .iter()
            .fold(Self::new(), |patch, (brand, choice)| match choice.attribute_value() {
                Some(value) => patch.set(brand.as_str(), value),
                None => patch.remove(brand.as_str()),
            });
        if choices
            .values()
            .any(|choice| *choice == SubscriptionChoice::Subscribed)
        {
            patch = patch.set(UNSUBSCRIBED_ATTRIBUTE, false);
        }
        patch
    }

    /// Patch that unsubscribes permanently and drops every known brand.
    pub fn unsubscribe_all() -> Self {
        KNOWN_BRANDS
            .iter()
            .fold(Self::new().set(UNSUBSCRIBED_ATTRIBUTE, true), |patch, brand| {
                patch.remove(*brand)
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipAction {
    Add,
    Delete,
}

impl RelationshipAction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add_relationships",
            Self::Delete => "delete_relationships",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipChange {
    pub action: RelationshipAction,
    pub object_type_id: String,
    pub object_id: String,
}

impl RelationshipChange {
    pub fn list(action: RelationshipAction, list: &str) -> Self {
        Self {
            action,
            object_type_id: LIST_OBJECT_TYPE_ID.to_string(),
            object_id: list.to_string(),
        }
    }
}

/// A single write against a customer profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerUpdate {
    Attributes(AttributePatch),
    Relationships(RelationshipChange),
}
