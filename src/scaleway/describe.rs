//! Server lookup over the Instances HTTP API.
//!
//! The SDK's list call drops fields the attribute record needs (image,
//! creation date), so the server is fetched directly.

use std::time::Duration;

use reqwest::StatusCode;

use super::types::{ServerEnvelope, terminated_attributes};
use super::{ScalewayLifecycle, ScalewayLifecycleError};
use crate::instance::InstanceAttributes;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
const SCALEWAY_INSTANCE_API_BASE: &str = "https://api.scaleway.com/instance/v1";

/// Builds the client owned by one adapter. Pooled connections belong to the
/// runtime that opened them, so clients are never shared across adapters.
pub(super) fn http_client() -> Result<reqwest::Client, ScalewayLifecycleError> {
    Ok(reqwest::Client::builder().timeout(HTTP_TIMEOUT).build()?)
}

fn server_url(zone: &str, server_id: &str) -> String {
    format!("{SCALEWAY_INSTANCE_API_BASE}/zones/{zone}/servers/{server_id}")
}

impl ScalewayLifecycle {
    pub(super) async fn fetch_server(
        &self,
        server_id: &str,
    ) -> Result<InstanceAttributes, ScalewayLifecycleError> {
        let response = self
            .http
            .get(server_url(&self.zone, server_id))
            .header("X-Auth-Token", &self.config.secret_key)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(terminated_attributes(server_id, &self.zone)?);
        }

        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(ScalewayLifecycleError::Provider {
                message: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        let envelope: ServerEnvelope =
            serde_json::from_slice(&body).map_err(|err| ScalewayLifecycleError::Provider {
                message: err.to_string(),
            })?;
        Ok(envelope.server.into_attributes()?)
    }
}
