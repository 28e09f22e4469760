//! Error types for the Scaleway lifecycle adapter.

use crate::config::ConfigError;
use crate::error::CloudError;
use scaleway_rs::ScalewayError;
use thiserror::Error;

/// Errors raised by [`ScalewayLifecycle`](super::ScalewayLifecycle).
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ScalewayLifecycleError {
    /// Raised when the configuration is incomplete.
    #[error("configuration error: {0}")]
    Config(String),
    /// Raised when the adapter cannot start its private runtime.
    #[error("runtime error: {0}")]
    Runtime(String),
    /// Wrapper for provider level failures.
    #[error("provider error: {message}")]
    Provider {
        /// Message returned by the provider SDK or HTTP layer.
        message: String,
    },
    /// Raised when a new server is neither running nor allowed to power on.
    #[error("server {server_id} cannot be powered on from state {state}")]
    PowerOnNotAllowed {
        /// Server that was created.
        server_id: String,
        /// State reported by the provider.
        state: String,
    },
    /// Invalid input or a capability Scaleway does not offer.
    #[error(transparent)]
    Cloud(#[from] CloudError),
}

impl From<ScalewayError> for ScalewayLifecycleError {
    fn from(value: ScalewayError) -> Self {
        Self::Provider {
            message: value.to_string(),
        }
    }
}

impl From<reqwest::Error> for ScalewayLifecycleError {
    fn from(value: reqwest::Error) -> Self {
        Self::Provider {
            message: value.to_string(),
        }
    }
}

impl From<ConfigError> for ScalewayLifecycleError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value.to_string())
    }
}
