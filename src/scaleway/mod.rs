//! Scaleway implementation of the instance lifecycle contract.
//!
//! A [`ScalewayLifecycle`] drives exactly one server, identified by zone and
//! id. The SDK is asynchronous; each call blocks on a private
//! current-thread runtime, so the adapter must not be used from inside
//! another tokio runtime.

mod describe;
mod error;
mod types;

use scaleway_rs::{ScalewayApi, ScalewayCreateInstanceBuilder};
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

use crate::config::ScalewayConfig;
use crate::error::{CloudError, InvalidArgument};
use crate::instance::{
    AttributeKey, DeployOptions, InstanceAttributes, LifecycleAdapter, MonitorOptions,
};

pub use error::ScalewayLifecycleError;
pub use types::PowerAction;

use types::{INSTANCE_TAG, ServerSpec};

/// Lifecycle adapter bound to one Scaleway server.
pub struct ScalewayLifecycle {
    api: ScalewayApi,
    http: reqwest::Client,
    config: ScalewayConfig,
    zone: String,
    server_id: String,
    runtime: Runtime,
}

impl ScalewayLifecycle {
    /// Builds an adapter for `server_id` from configuration. The server is
    /// looked up in `zone`, or the configured default zone when `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ScalewayLifecycleError::Config`] when the configuration is
    /// incomplete, [`CloudError::InvalidArgument`] when `server_id` is blank,
    /// [`ScalewayLifecycleError::Runtime`] when the runtime cannot start and
    /// [`ScalewayLifecycleError::Provider`] when the HTTP client cannot be
    /// built.
    pub fn from_config(
        config: ScalewayConfig,
        zone: Option<&str>,
        server_id: &str,
    ) -> Result<Self, ScalewayLifecycleError> {
        config.validate()?;
        if server_id.trim().is_empty() {
            return Err(CloudError::from(InvalidArgument::EmptyAttribute(AttributeKey::Id)).into());
        }
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| ScalewayLifecycleError::Runtime(err.to_string()))?;
        let http = describe::http_client()?;

        Ok(Self {
            api: ScalewayApi::new(&config.secret_key),
            http,
            zone: zone.unwrap_or(config.default_zone.as_str()).to_owned(),
            server_id: server_id.trim().to_owned(),
            config,
            runtime,
        })
    }

    /// Zone the bound server lives in.
    #[must_use]
    pub fn zone(&self) -> &str {
        &self.zone
    }

    /// Identifier of the bound server.
    #[must_use]
    pub fn server_id(&self) -> &str {
        &self.server_id
    }

    fn perform(&self, action: PowerAction) -> Result<PowerAction, ScalewayLifecycleError> {
        debug!(
            server = %self.server_id,
            zone = %self.zone,
            action = action.as_str(),
            "performing Scaleway server action"
        );
        self.runtime.block_on(self.api.perform_instance_action_async(
            &self.zone,
            &self.server_id,
            action.as_str(),
        ))?;
        Ok(action)
    }

    async fn create_server(
        &self,
        image_id: &str,
        options: &DeployOptions,
    ) -> Result<InstanceAttributes, ScalewayLifecycleError> {
        let spec = ServerSpec::from_options(options, &self.config.default_instance_type);

        let server = ScalewayCreateInstanceBuilder::new(
            self.api.clone(),
            &self.zone,
            &spec.name,
            &spec.commercial_type,
        )
        .image(image_id)
        .project(&self.config.default_project_id)
        .routed_ip_enabled(true)
        .tags(vec![String::from(INSTANCE_TAG)])
        .run_async()
        .await?;

        if types::power_on_required(&server.id, &server.state, &server.allowed_actions)? {
            debug!(server = %server.id, state = %server.state, "powering on new server");
            self.api
                .perform_instance_action_async(
                    &self.zone,
                    &server.id,
                    PowerAction::PowerOn.as_str(),
                )
                .await?;
        }
        self.fetch_server(&server.id).await
    }
}

impl LifecycleAdapter for ScalewayLifecycle {
    const NAME: &'static str = "scaleway";

    type Client = ScalewayApi;
    type Error = ScalewayLifecycleError;
    type Outcome = PowerAction;
    type Metrics = ();
    type Deployment = InstanceAttributes;

    fn start_instance(&self) -> Result<PowerAction, Self::Error> {
        self.perform(PowerAction::PowerOn)
    }

    fn stop_instance(&self) -> Result<PowerAction, Self::Error> {
        self.perform(PowerAction::PowerOff)
    }

    fn reboot_instance(&self) -> Result<PowerAction, Self::Error> {
        self.perform(PowerAction::Reboot)
    }

    fn destroy_instance(&self) -> Result<PowerAction, Self::Error> {
        self.perform(PowerAction::Terminate)
    }

    fn monitor_instance(&self, metric: &str, _options: &MonitorOptions) -> Result<(), Self::Error> {
        debug!(metric, "Scaleway exposes no per-instance metrics endpoint");
        Err(CloudError::not_available("monitor", Self::NAME).into())
    }

    fn deploy_instance(
        &self,
        image_id: &str,
        options: &DeployOptions,
    ) -> Result<InstanceAttributes, Self::Error> {
        debug!(image_id, zone = %self.zone, "deploying Scaleway server");
        self.runtime.block_on(self.create_server(image_id, options))
    }

    fn describe_instance(&self) -> Result<InstanceAttributes, Self::Error> {
        self.runtime.block_on(self.fetch_server(&self.server_id))
    }

    fn client(&self) -> &ScalewayApi {
        &self.api
    }
}

#[cfg(test)]
mod tests;
