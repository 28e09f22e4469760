//! Error taxonomy shared by the query and instance layers.
//!
//! Two kinds exist and nothing else: malformed caller input
//! ([`CloudError::InvalidArgument`]) and a capability the bound backend does
//! not have ([`CloudError::OperationNotAvailable`]). Backend adapters wrap
//! these in their own error types rather than inventing parallel variants.

use thiserror::Error;

use crate::instance::AttributeKey;

/// Errors raised by the provider-neutral layer.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum CloudError {
    /// The caller supplied malformed input. Treat as a defect to fix.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),
    /// The bound backend lacks the requested capability. Treat as a
    /// feature-detection result; retrying will not help.
    #[error("operation '{operation}' is not available on the {backend} backend")]
    OperationNotAvailable {
        /// Name of the rejected operation.
        operation: &'static str,
        /// Backend that rejected it.
        backend: &'static str,
    },
}

impl CloudError {
    /// Builds a capability error for `operation` on `backend`.
    #[must_use]
    pub const fn not_available(operation: &'static str, backend: &'static str) -> Self {
        Self::OperationNotAvailable { operation, backend }
    }

    /// Returns `true` for capability gaps, so callers can degrade
    /// gracefully without matching on the variant.
    #[must_use]
    pub const fn is_not_available(&self) -> bool {
        matches!(self, Self::OperationNotAvailable { .. })
    }
}

/// Detail for [`CloudError::InvalidArgument`].
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum InvalidArgument {
    /// An instance was constructed from an empty attribute map.
    #[error("you must pass a non-empty map of instance attributes")]
    EmptyAttributes,
    /// A required attribute was absent.
    #[error("the param \"{0}\" is a required param for an instance")]
    MissingAttribute(AttributeKey),
    /// A required attribute was present but blank.
    #[error("the param \"{0}\" must not be empty")]
    EmptyAttribute(AttributeKey),
    /// The key is not part of the closed attribute set.
    #[error("unknown instance attribute \"{0}\"")]
    UnknownAttribute(String),
    /// The status value is not one of the known instance states.
    #[error("unknown instance status \"{0}\"")]
    InvalidStatus(String),
    /// A document identifier did not have the shape the backend requires.
    #[error("invalid document key: {0}")]
    InvalidDocumentKey(String),
}
