// src/application/ports/time.rs
use chrono::{DateTime, Utc};

/// Source of the instant stamped on new audit records and export filenames.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
