//! Closed attribute record describing one compute instance.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CloudError, InvalidArgument};

/// Keys recognised by [`InstanceAttributes`].
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AttributeKey {
    /// Provider identifier. Always present.
    Id,
    /// Image the instance booted from.
    ImageId,
    /// Human readable name.
    Name,
    /// Last reported [`InstanceStatus`].
    Status,
    /// Public DNS name or address.
    PublicDns,
    /// CPU description or count.
    Cpu,
    /// Memory size.
    Ram,
    /// Disk size.
    StorageSize,
    /// Availability zone.
    Zone,
    /// Launch timestamp as reported by the provider.
    LaunchTime,
}

impl AttributeKey {
    /// Every key, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Id,
        Self::ImageId,
        Self::Name,
        Self::Status,
        Self::PublicDns,
        Self::Cpu,
        Self::Ram,
        Self::StorageSize,
        Self::Zone,
        Self::LaunchTime,
    ];

    /// Wire name of the key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::ImageId => "imageId",
            Self::Name => "name",
            Self::Status => "status",
            Self::PublicDns => "publicDns",
            Self::Cpu => "cpu",
            Self::Ram => "ram",
            Self::StorageSize => "storageSize",
            Self::Zone => "zone",
            Self::LaunchTime => "launchTime",
        }
    }
}

impl AsRef<str> for AttributeKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttributeKey {
    type Err = CloudError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == value)
            .ok_or_else(|| InvalidArgument::UnknownAttribute(value.to_owned()).into())
    }
}

/// Instance states a provider may report. No transition rules are
/// enforced; the value is whatever the adapter last returned.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstanceStatus {
    /// Powered on.
    Running,
    /// Powered off.
    Stopped,
    /// Powering off.
    ShuttingDown,
    /// Restarting.
    Rebooting,
    /// Gone or being removed.
    Terminated,
}

impl InstanceStatus {
    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Stopped => "stopped",
            Self::ShuttingDown => "shutting-down",
            Self::Rebooting => "rebooting",
            Self::Terminated => "terminated",
        }
    }
}

impl fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstanceStatus {
    type Err = CloudError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "running" => Ok(Self::Running),
            "stopped" => Ok(Self::Stopped),
            "shutting-down" => Ok(Self::ShuttingDown),
            "rebooting" => Ok(Self::Rebooting),
            "terminated" => Ok(Self::Terminated),
            other => Err(InvalidArgument::InvalidStatus(other.to_owned()).into()),
        }
    }
}

/// Validated attribute record. The `id` key is always present and
/// non-empty, every key belongs to [`AttributeKey`] and any status value
/// parses as an [`InstanceStatus`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct InstanceAttributes {
    values: BTreeMap<AttributeKey, String>,
}

impl InstanceAttributes {
    /// Validates raw key/value pairs into a record.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::InvalidArgument`] when the input is empty, when
    /// the `id` key is missing or blank, when a key is not recognised, or
    /// when the status value is not a known state.
    pub fn new<I, K, V>(pairs: I) -> Result<Self, CloudError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let raw: Vec<(K, String)> = pairs
            .into_iter()
            .map(|(key, value)| (key, value.into()))
            .collect();
        if raw.is_empty() {
            return Err(InvalidArgument::EmptyAttributes.into());
        }

        // A repeated key overwrites earlier pairs, so the last `id` is the one
        // that ends up stored.
        let id = AttributeKey::Id.as_str();
        let Some((_, id_value)) = raw.iter().rev().find(|(key, _)| key.as_ref() == id) else {
            return Err(InvalidArgument::MissingAttribute(AttributeKey::Id).into());
        };
        if id_value.trim().is_empty() {
            return Err(InvalidArgument::EmptyAttribute(AttributeKey::Id).into());
        }

        let mut values = BTreeMap::new();
        for (key, value) in raw {
            let key = key.as_ref().parse::<AttributeKey>()?;
            if key == AttributeKey::Status {
                value.parse::<InstanceStatus>()?;
            }
            values.insert(key, value);
        }
        Ok(Self { values })
    }

    /// Value stored for `key`, if any.
    #[must_use]
    pub fn get(&self, key: AttributeKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    /// Provider identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        self.get(AttributeKey::Id).unwrap_or_default()
    }

    /// Parsed status, if reported.
    #[must_use]
    pub fn status(&self) -> Option<InstanceStatus> {
        self.get(AttributeKey::Status)
            .and_then(|status| status.parse().ok())
    }

    /// Iterates over the stored pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (AttributeKey, &str)> {
        self.values.iter().map(|(key, value)| (*key, value.as_str()))
    }
}
