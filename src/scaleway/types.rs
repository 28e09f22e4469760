//! Scaleway server records and their mapping onto the neutral model.

use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use super::ScalewayLifecycleError;
use crate::error::CloudError;
use crate::instance::{AttributeKey, DeployOptions, InstanceAttributes, InstanceStatus};

/// Tag applied to deployed servers and prefix of generated names.
pub(crate) const INSTANCE_TAG: &str = "cloudmux";

/// Server action sent to the Scaleway action endpoint. Returned as the
/// outcome of start, stop, reboot and destroy.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PowerAction {
    /// Boot the server.
    PowerOn,
    /// Shut the server down, keeping its volumes.
    PowerOff,
    /// Restart the server.
    Reboot,
    /// Delete the server and its local volumes.
    Terminate,
}

impl PowerAction {
    /// Action name as the Scaleway API expects it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PowerOn => "poweron",
            Self::PowerOff => "poweroff",
            Self::Reboot => "reboot",
            Self::Terminate => "terminate",
        }
    }
}

/// Name and commercial type of a server about to be created.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ServerSpec {
    pub(crate) name: String,
    pub(crate) commercial_type: String,
}

impl ServerSpec {
    /// Reads the `name` and `size` deploy options, falling back to a
    /// generated name and `default_type`.
    pub(crate) fn from_options(options: &DeployOptions, default_type: &str) -> Self {
        Self {
            name: options.get(DeployOptions::NAME).map_or_else(
                || format!("{INSTANCE_TAG}-{}", Uuid::new_v4().simple()),
                str::to_owned,
            ),
            commercial_type: options
                .get(DeployOptions::SIZE)
                .unwrap_or(default_type)
                .to_owned(),
        }
    }
}

/// Decides whether a freshly created server still needs a `poweron`.
/// Scaleway creates servers stopped.
pub(crate) fn power_on_required(
    server_id: &str,
    state: &str,
    allowed_actions: &[String],
) -> Result<bool, ScalewayLifecycleError> {
    if state == "running" {
        return Ok(false);
    }
    if allowed_actions
        .iter()
        .any(|action| action == PowerAction::PowerOn.as_str())
    {
        return Ok(true);
    }
    Err(ScalewayLifecycleError::PowerOnNotAllowed {
        server_id: server_id.to_owned(),
        state: state.to_owned(),
    })
}

/// Record reported for a server the API no longer knows.
pub(crate) fn terminated_attributes(
    server_id: &str,
    zone: &str,
) -> Result<InstanceAttributes, CloudError> {
    InstanceAttributes::new([
        (AttributeKey::Id, server_id),
        (AttributeKey::Zone, zone),
        (AttributeKey::Status, InstanceStatus::Terminated.as_str()),
    ])
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub(crate) struct ServerEnvelope {
    pub(crate) server: ServerRecord,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub(crate) struct ServerRecord {
    pub(crate) id: String,
    #[serde(default)]
    pub(crate) name: Option<String>,
    pub(crate) state: String,
    #[serde(default)]
    pub(crate) image: Option<ImageRef>,
    #[serde(default)]
    pub(crate) public_ip: Option<PublicIp>,
    #[serde(default)]
    pub(crate) creation_date: Option<String>,
    #[serde(default)]
    pub(crate) zone: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub(crate) struct ImageRef {
    pub(crate) id: String,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub(crate) struct PublicIp {
    pub(crate) address: String,
}

/// Maps a Scaleway server state onto the closed status set. Transitional
/// states with no counterpart yield `None`.
pub(crate) fn map_state(state: &str) -> Option<InstanceStatus> {
    match state {
        "running" => Some(InstanceStatus::Running),
        "stopped" | "stopped in place" => Some(InstanceStatus::Stopped),
        "stopping" => Some(InstanceStatus::ShuttingDown),
        other => {
            warn!(state = other, "unmapped Scaleway server state");
            None
        }
    }
}

impl ServerRecord {
    pub(crate) fn into_attributes(self) -> Result<InstanceAttributes, CloudError> {
        let status = map_state(&self.state).map(|status| status.as_str().to_owned());
        let pairs = [
            (AttributeKey::Id, Some(self.id)),
            (AttributeKey::Name, self.name),
            (AttributeKey::ImageId, self.image.map(|image| image.id)),
            (AttributeKey::Status, status),
            (AttributeKey::PublicDns, self.public_ip.map(|ip| ip.address)),
            (AttributeKey::Zone, self.zone),
            (AttributeKey::LaunchTime, self.creation_date),
        ];
        InstanceAttributes::new(
            pairs
                .into_iter()
                .filter_map(|(key, value)| value.map(|value| (key, value))),
        )
    }
}
