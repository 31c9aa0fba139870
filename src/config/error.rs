//! Configuration error type.

use std::borrow::Cow;

/// Placeholder recorded instead of secret material.
pub const REDACTED: &str = "[REDACTED]";

/// A setting that could not be read, coerced or validated.
///
/// Loading is fail-fast: the first offending field aborts the load and no
/// partially-built settings value is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid configuration for `{field}` (value {raw_value:?}): {reason}")]
pub struct ConfigError {
    /// Dotted path of the offending field, e.g. `database.pool_size`.
    pub field: String,

    /// Raw value as supplied, or [`REDACTED`] for secrets.
    pub raw_value: String,

    /// Why the value was rejected.
    pub reason: Cow<'static, str>,
}

impl ConfigError {
    /// Create an error for `field` carrying the raw value that was rejected.
    pub fn invalid(
        field: impl Into<String>,
        raw_value: impl Into<String>,
        reason: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            field: field.into(),
            raw_value: raw_value.into(),
            reason: reason.into(),
        }
    }

    /// Create an error for a secret field without echoing its value.
    pub fn redacted(field: impl Into<String>, reason: impl Into<Cow<'static, str>>) -> Self {
        Self::invalid(field, REDACTED, reason)
    }
}
