//! Lifecycle adapter contract and its argument types.

use std::collections::BTreeMap;
use std::fmt;

use super::InstanceAttributes;
use crate::error::CloudError;

/// Backend-specific driver for one remote instance.
///
/// Results are adapter-defined and handed back to callers untouched by
/// [`Instance`](super::Instance). Capability gaps surface as
/// [`CloudError::OperationNotAvailable`] converted into [`Self::Error`].
pub trait LifecycleAdapter {
    /// Short backend name used in capability errors and logs.
    const NAME: &'static str;

    /// Provider client handle exposed through [`LifecycleAdapter::client`].
    type Client;
    /// Error type returned by every call.
    type Error: std::error::Error + From<CloudError>;
    /// Result of start, stop, reboot and destroy.
    type Outcome;
    /// Result of a monitor call (a time series, a scalar, ...).
    type Metrics;
    /// Result of a deploy call.
    type Deployment;

    /// Powers the instance on.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] when the provider rejects the call.
    fn start_instance(&self) -> Result<Self::Outcome, Self::Error>;

    /// Powers the instance off.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] when the provider rejects the call.
    fn stop_instance(&self) -> Result<Self::Outcome, Self::Error>;

    /// Restarts the instance.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] when the provider rejects the call.
    fn reboot_instance(&self) -> Result<Self::Outcome, Self::Error>;

    /// Permanently removes the instance.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] when the provider rejects the call.
    fn destroy_instance(&self) -> Result<Self::Outcome, Self::Error>;

    /// Reads `metric` for the instance over the window in `options`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] when the metric is unavailable.
    fn monitor_instance(
        &self,
        metric: &str,
        options: &MonitorOptions,
    ) -> Result<Self::Metrics, Self::Error>;

    /// Deploys `image_id` using backend-interpreted `options`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] when the deployment fails.
    fn deploy_instance(
        &self,
        image_id: &str,
        options: &DeployOptions,
    ) -> Result<Self::Deployment, Self::Error>;

    /// Fetches the current attribute record from the provider.
    ///
    /// # Errors
    ///
    /// Defaults to [`CloudError::OperationNotAvailable`].
    fn describe_instance(&self) -> Result<InstanceAttributes, Self::Error> {
        Err(CloudError::not_available("describe", Self::NAME).into())
    }

    /// Underlying provider client.
    fn client(&self) -> &Self::Client;
}

/// Well-known metric names accepted by most backends.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Metric {
    /// CPU utilisation.
    CpuUsage,
    /// Inbound network traffic.
    NetworkIn,
    /// Outbound network traffic.
    NetworkOut,
    /// Disk write throughput.
    DiskWrite,
    /// Disk read throughput.
    DiskRead,
}

impl Metric {
    /// Wire name of the metric.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CpuUsage => "CpuUsage",
            Self::NetworkIn => "NetworkIn",
            Self::NetworkOut => "NetworkOut",
            Self::DiskWrite => "DiskWrite",
            Self::DiskRead => "DiskRead",
        }
    }
}

impl AsRef<str> for Metric {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options passed to [`LifecycleAdapter::monitor_instance`]. The empty
/// record leaves the sampling window to the backend.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MonitorOptions {
    values: BTreeMap<String, String>,
}

impl MonitorOptions {
    /// Key holding the start of the sampling window.
    pub const START_TIME: &'static str = "StartTime";
    /// Key holding the end of the sampling window.
    pub const END_TIME: &'static str = "EndTime";

    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets both ends of the sampling window.
    #[must_use]
    pub fn window(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self::new()
            .with(Self::START_TIME, start)
            .with(Self::END_TIME, end)
    }

    /// Sets `key` to `value`, returning the updated record.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Value for `key`, if set.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Start of the sampling window, if set.
    #[must_use]
    pub fn start_time(&self) -> Option<&str> {
        self.get(Self::START_TIME)
    }

    /// End of the sampling window, if set.
    #[must_use]
    pub fn end_time(&self) -> Option<&str> {
        self.get(Self::END_TIME)
    }

    /// Returns `true` when no option is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// SSH credential keys understood inside [`DeployOptions`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SshCredential {
    /// Login user.
    Username,
    /// Login password.
    Password,
    /// Path to or contents of the private key.
    PrivateKey,
    /// Path to or contents of the public key.
    PublicKey,
    /// Passphrase unlocking the private key.
    Passphrase,
}

impl SshCredential {
    /// Option key for the credential.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Password => "password",
            Self::PrivateKey => "privateKey",
            Self::PublicKey => "publicKey",
            Self::Passphrase => "passphrase",
        }
    }
}

/// Ordered, string-valued options passed to
/// [`LifecycleAdapter::deploy_instance`]. Keys are backend-interpreted.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DeployOptions {
    values: BTreeMap<String, String>,
}

impl DeployOptions {
    /// Key naming the instance size or commercial type.
    pub const SIZE: &'static str = "size";
    /// Key naming the deployed instance.
    pub const NAME: &'static str = "name";

    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, returning the updated record.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets an SSH credential.
    #[must_use]
    pub fn with_ssh(self, credential: SshCredential, value: impl Into<String>) -> Self {
        self.with(credential.as_str(), value)
    }

    /// Sets `key` to `value` in place, returning any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(key.into(), value.into())
    }

    /// Value for `key`, if set.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// SSH credential, if set.
    #[must_use]
    pub fn ssh(&self, credential: SshCredential) -> Option<&str> {
        self.get(credential.as_str())
    }

    /// Returns `true` when no option is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over options in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DeployOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}
