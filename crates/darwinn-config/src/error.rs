//! Error types for chip descriptor construction

use thiserror::Error;

use crate::field::Field;

/// Result type alias for descriptor operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Label used in diagnostics when the builder was never given a variant name.
pub const UNNAMED_VARIANT: &str = "<unnamed>";

/// Errors that can occur while constructing a [`ChipStructures`](crate::ChipStructures)
///
/// There is exactly one kind: a constant set that violates a descriptor
/// invariant. It is fatal to driver bring-up for the affected chip variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A field is missing or violates an invariant
    #[error("Invalid configuration for chip variant {variant}: {field}: {reason}")]
    InvalidConfiguration {
        /// Chip variant label supplied to the builder
        variant: String,
        /// Offending field
        field: Field,
        /// What is wrong with it
        reason: String,
    },
}

impl ConfigError {
    /// Create an invalid configuration error
    pub fn invalid(variant: impl Into<String>, field: Field, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            variant: variant.into(),
            field,
            reason: reason.into(),
        }
    }

    /// Field the diagnostic refers to
    #[must_use]
    pub const fn field(&self) -> Field {
        match self {
            Self::InvalidConfiguration { field, .. } => *field,
        }
    }

    /// Chip variant the diagnostic refers to
    #[must_use]
    pub fn variant(&self) -> &str {
        match self {
            Self::InvalidConfiguration { variant, .. } => variant,
        }
    }

    /// Human-readable reason
    #[must_use]
    pub fn reason(&self) -> &str {
        match self {
            Self::InvalidConfiguration { reason, .. } => reason,
        }
    }
}
