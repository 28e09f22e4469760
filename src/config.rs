//! Settings consumed by [`ScalewayLifecycle::from_config`].
//!
//! The adapter factory takes a [`ScalewayConfig`] and either returns a ready
//! adapter or fails with a [`ConfigError`] naming the setting to supply.
//!
//! [`ScalewayLifecycle::from_config`]: crate::ScalewayLifecycle::from_config

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

/// Credentials and deploy defaults for the Scaleway lifecycle adapter.
/// Values come from `SCW_*` variables or a `cloudmux.toml` file.
#[derive(Clone, Debug, Deserialize, OrthoConfig, PartialEq, Eq)]
#[ortho_config(prefix = "SCW")]
pub struct ScalewayConfig {
    /// API secret key sent as `X-Auth-Token`.
    pub secret_key: String,
    /// Project that owns servers created by `deploy`.
    pub default_project_id: String,
    /// Zone an adapter binds to when the caller names none.
    #[ortho_config(default = "fr-par-1".to_owned())]
    pub default_zone: String,
    /// Commercial type used by `deploy` when no size option is given.
    #[ortho_config(default = "DEV1-S".to_owned())]
    pub default_instance_type: String,
}

/// Where a required setting can be supplied.
struct FieldMetadata {
    description: &'static str,
    env_var: &'static str,
    toml_key: &'static str,
}

impl FieldMetadata {
    const fn new(description: &'static str, env_var: &'static str, toml_key: &'static str) -> Self {
        Self {
            description,
            env_var,
            toml_key,
        }
    }
}

const FIELDS: [FieldMetadata; 4] = [
    FieldMetadata::new("Scaleway API secret key", "SCW_SECRET_KEY", "secret_key"),
    FieldMetadata::new(
        "Scaleway project ID",
        "SCW_DEFAULT_PROJECT_ID",
        "default_project_id",
    ),
    FieldMetadata::new("availability zone", "SCW_DEFAULT_ZONE", "default_zone"),
    FieldMetadata::new(
        "instance type",
        "SCW_DEFAULT_INSTANCE_TYPE",
        "default_instance_type",
    ),
];

impl ScalewayConfig {
    fn require_field(value: &str, metadata: &FieldMetadata) -> Result<(), ConfigError> {
        if value.trim().is_empty() {
            return Err(ConfigError::MissingField(format!(
                "missing {}: set {} or add {} to [scaleway] in cloudmux.toml",
                metadata.description, metadata.env_var, metadata.toml_key
            )));
        }
        Ok(())
    }

    /// Loads settings from `cloudmux.toml`, `SCW_*` variables and the
    /// process arguments, later sources winning.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the loader fails to merge sources.
    pub fn load_from_sources() -> Result<Self, ConfigError> {
        Self::load().map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Loads settings from files and the environment only, for library
    /// callers that own their command line.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the merge fails.
    pub fn load_without_cli_args() -> Result<Self, ConfigError> {
        Self::load_from_iter([std::ffi::OsString::from("cloudmux")])
            .map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Checks the settings an adapter needs before any API call is made.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] for the first empty field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let values = [
            &self.secret_key,
            &self.default_project_id,
            &self.default_zone,
            &self.default_instance_type,
        ];
        for (value, metadata) in values.into_iter().zip(FIELDS.iter()) {
            Self::require_field(value, metadata)?;
        }
        Ok(())
    }
}

/// Reasons the adapter factory refuses a configuration.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    /// A required setting is blank.
    #[error("missing configuration field: {0}")]
    MissingField(String),
    /// The sources could not be merged.
    #[error("configuration parsing failed: {0}")]
    Parse(String),
}

impl From<ortho_config::OrthoError> for ConfigError {
    fn from(value: ortho_config::OrthoError) -> Self {
        Self::Parse(value.to_string())
    }
}
