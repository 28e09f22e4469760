//! Provider-neutral compute instance bound to a lifecycle adapter.
//!
//! An [`Instance`] pairs a validated [`InstanceAttributes`] record with a
//! shared [`LifecycleAdapter`]. Lifecycle calls are forwarded one-for-one and
//! their results returned unchanged; the only local rule is that nothing is
//! forwarded once `destroy` has succeeded.

mod adapter;
mod attributes;

use std::sync::Arc;

use tracing::debug;

use crate::error::CloudError;

pub use adapter::{DeployOptions, LifecycleAdapter, Metric, MonitorOptions, SshCredential};
pub use attributes::{AttributeKey, InstanceAttributes, InstanceStatus};

/// One provisioned compute resource.
#[derive(Debug)]
pub struct Instance<A: LifecycleAdapter> {
    adapter: Arc<A>,
    attributes: InstanceAttributes,
    destroyed: bool,
}

impl<A: LifecycleAdapter> Instance<A> {
    /// Binds raw attributes to `adapter`.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::InvalidArgument`] when the attributes are empty,
    /// lack an `id`, or contain an unknown key or status.
    pub fn new<I, K, V>(adapter: Arc<A>, attributes: I) -> Result<Self, CloudError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Ok(Self::from_attributes(
            adapter,
            InstanceAttributes::new(attributes)?,
        ))
    }

    /// Binds an already validated record to `adapter`.
    #[must_use]
    pub const fn from_attributes(adapter: Arc<A>, attributes: InstanceAttributes) -> Self {
        Self {
            adapter,
            attributes,
            destroyed: false,
        }
    }

    /// Value stored for the attribute named `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::InvalidArgument`] when `key` is not a known
    /// attribute name.
    pub fn get_attribute(&self, key: &str) -> Result<Option<&str>, CloudError> {
        let key = key.parse::<AttributeKey>()?;
        Ok(self.attribute(key))
    }

    /// Value stored for `key`.
    #[must_use]
    pub fn attribute(&self, key: AttributeKey) -> Option<&str> {
        self.attributes.get(key)
    }

    /// Whole attribute record.
    #[must_use]
    pub const fn attributes(&self) -> &InstanceAttributes {
        &self.attributes
    }

    /// Provider identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        self.attributes.id()
    }

    /// Image identifier.
    #[must_use]
    pub fn image_id(&self) -> Option<&str> {
        self.attribute(AttributeKey::ImageId)
    }

    /// Instance name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.attribute(AttributeKey::Name)
    }

    /// Last status reported by the adapter.
    #[must_use]
    pub fn status(&self) -> Option<InstanceStatus> {
        self.attributes.status()
    }

    /// Public DNS name or address.
    #[must_use]
    pub fn public_dns(&self) -> Option<&str> {
        self.attribute(AttributeKey::PublicDns)
    }

    /// CPU description.
    #[must_use]
    pub fn cpu(&self) -> Option<&str> {
        self.attribute(AttributeKey::Cpu)
    }

    /// Memory size.
    #[must_use]
    pub fn ram_size(&self) -> Option<&str> {
        self.attribute(AttributeKey::Ram)
    }

    /// Disk size.
    #[must_use]
    pub fn storage_size(&self) -> Option<&str> {
        self.attribute(AttributeKey::StorageSize)
    }

    /// Availability zone.
    #[must_use]
    pub fn zone(&self) -> Option<&str> {
        self.attribute(AttributeKey::Zone)
    }

    /// Launch time.
    #[must_use]
    pub fn launch_time(&self) -> Option<&str> {
        self.attribute(AttributeKey::LaunchTime)
    }

    /// Returns `true` once [`Instance::destroy`] has succeeded.
    #[must_use]
    pub const fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Shared adapter handle.
    #[must_use]
    pub const fn adapter(&self) -> &Arc<A> {
        &self.adapter
    }

    /// Provider client for operations outside the lifecycle contract.
    #[must_use]
    pub fn client(&self) -> &A::Client {
        self.adapter.client()
    }

    fn ensure_live(&self, operation: &'static str) -> Result<(), A::Error> {
        if self.destroyed {
            return Err(CloudError::not_available(operation, A::NAME).into());
        }
        debug!(instance = self.id(), backend = A::NAME, operation, "delegating");
        Ok(())
    }

    /// Powers the instance on.
    ///
    /// # Errors
    ///
    /// Returns the adapter's error unchanged, or a capability error after
    /// a successful destroy.
    pub fn start(&self) -> Result<A::Outcome, A::Error> {
        self.ensure_live("start")?;
        self.adapter.start_instance()
    }

    /// Powers the instance off.
    ///
    /// # Errors
    ///
    /// Returns the adapter's error unchanged, or a capability error after
    /// a successful destroy.
    pub fn stop(&self) -> Result<A::Outcome, A::Error> {
        self.ensure_live("stop")?;
        self.adapter.stop_instance()
    }

    /// Restarts the instance.
    ///
    /// # Errors
    ///
    /// Returns the adapter's error unchanged, or a capability error after
    /// a successful destroy.
    pub fn reboot(&self) -> Result<A::Outcome, A::Error> {
        self.ensure_live("reboot")?;
        self.adapter.reboot_instance()
    }

    /// Removes the instance. Later lifecycle calls are rejected once this
    /// succeeds.
    ///
    /// # Errors
    ///
    /// Returns the adapter's error unchanged, or a capability error when
    /// already destroyed.
    pub fn destroy(&mut self) -> Result<A::Outcome, A::Error> {
        self.ensure_live("destroy")?;
        let outcome = self.adapter.destroy_instance()?;
        self.destroyed = true;
        Ok(outcome)
    }

    /// Reads `metric` over the backend's default window, passing the name
    /// through unchanged.
    ///
    /// # Errors
    ///
    /// Returns the adapter's error unchanged, or a capability error after
    /// a successful destroy.
    pub fn monitor(&self, metric: impl AsRef<str>) -> Result<A::Metrics, A::Error> {
        self.monitor_with(metric, &MonitorOptions::new())
    }

    /// Reads `metric` with explicit `options`, such as a
    /// [`MonitorOptions::window`].
    ///
    /// # Errors
    ///
    /// Returns the adapter's error unchanged, or a capability error after
    /// a successful destroy.
    pub fn monitor_with(
        &self,
        metric: impl AsRef<str>,
        options: &MonitorOptions,
    ) -> Result<A::Metrics, A::Error> {
        self.ensure_live("monitor")?;
        self.adapter.monitor_instance(metric.as_ref(), options)
    }

    /// Deploys `image_id` with `options`.
    ///
    /// # Errors
    ///
    /// Returns the adapter's error unchanged, or a capability error after
    /// a successful destroy.
    pub fn deploy(&self, image_id: &str, options: &DeployOptions) -> Result<A::Deployment, A::Error> {
        self.ensure_live("deploy")?;
        self.adapter.deploy_instance(image_id, options)
    }

    /// Replaces the attribute record with the adapter's current view.
    ///
    /// # Errors
    ///
    /// Returns the adapter's error unchanged; the record is left as it was.
    pub fn refresh(&mut self) -> Result<&InstanceAttributes, A::Error> {
        self.ensure_live("refresh")?;
        self.attributes = self.adapter.describe_instance()?;
        Ok(&self.attributes)
    }
}
