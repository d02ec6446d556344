use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Result shown to the customer after a preference change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ActionOutcome {
    pub success: bool,
    pub message: String,
}

impl ActionOutcome {
    pub fn succeeded(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// Nothing was requested, e.g. an email link without an action.
    pub fn idle() -> Self {
        Self {
            success: false,
            message: String::new(),
        }
    }
}
