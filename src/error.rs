//! Error types for configuration loading.
//!
//! Engine computations never fail: unresolvable references fall back to
//! safe defaults. The only fallible surface is building or loading the
//! static tables, which is represented by the `ConfigError` enum.

use crate::rarity::Rarity;
use thiserror::Error;

/// Errors that can occur while building or loading engine configuration.
///
/// # Examples
///
/// ```rust
/// use realmstat::ConfigError;
///
/// let err = ConfigError::EmptyTierTable;
/// assert_eq!(err.to_string(), "Tier table has no tiers");
/// ```
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The tier table contains no tiers at all.
    #[error("Tier table has no tiers")]
    EmptyTierTable,

    /// A per-tier sequence does not line up with the tier table.
    ///
    /// `what` names the sequence (e.g. "multipliers").
    #[error("Tier {what} has {actual} entries, expected {expected}")]
    TierLengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A rarity's percentage range is negative or inverted.
    #[error("Invalid percent range for {rarity}: [{min}, {max}]")]
    InvalidPercentRange { rarity: Rarity, min: f64, max: f64 },

    /// A tuning parameter that must be strictly positive is not.
    #[error("Balance parameter {name} must be positive, got {value}")]
    NonPositiveParameter { name: &'static str, value: f64 },

    /// The JSON document could not be parsed.
    #[error("Malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
}
