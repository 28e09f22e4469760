//! Recording lifecycle adapter shared by integration tests.
//!
//! Include with:
//!
//! ```rust
//! #[path = "common/mock_adapter.rs"]
//! mod mock_adapter;
//! ```

use std::cell::RefCell;

use cloudmux::{CloudError, DeployOptions, InstanceAttributes, LifecycleAdapter, MonitorOptions};

/// One recorded adapter call with its arguments.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Call {
    Start,
    Stop,
    Reboot,
    Destroy,
    Monitor(String, MonitorOptions),
    Deploy(String, DeployOptions),
    Describe,
}

/// Adapter that records every call and answers with the call's name.
#[derive(Debug, Default)]
pub struct MockAdapter {
    calls: RefCell<Vec<Call>>,
    describe_with: Option<InstanceAttributes>,
    fail_destroy: bool,
}

impl MockAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `describe_instance` with `attributes`.
    pub fn describing(attributes: InstanceAttributes) -> Self {
        Self {
            describe_with: Some(attributes),
            ..Self::default()
        }
    }

    /// Makes `destroy_instance` fail.
    pub fn failing_destroy() -> Self {
        Self {
            fail_destroy: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

/// Client handle exposed through `client()`.
#[derive(Debug, Eq, PartialEq)]
pub struct MockClient;

static CLIENT: MockClient = MockClient;

impl LifecycleAdapter for MockAdapter {
    const NAME: &'static str = "mock";

    type Client = MockClient;
    type Error = CloudError;
    type Outcome = String;
    type Metrics = String;
    type Deployment = String;

    fn start_instance(&self) -> Result<String, CloudError> {
        self.record(Call::Start);
        Ok(String::from("MockAdapter::startInstance"))
    }

    fn stop_instance(&self) -> Result<String, CloudError> {
        self.record(Call::Stop);
        Ok(String::from("MockAdapter::stopInstance"))
    }

    fn reboot_instance(&self) -> Result<String, CloudError> {
        self.record(Call::Reboot);
        Ok(String::from("MockAdapter::rebootInstance"))
    }

    fn destroy_instance(&self) -> Result<String, CloudError> {
        self.record(Call::Destroy);
        if self.fail_destroy {
            return Err(CloudError::not_available("destroy", Self::NAME));
        }
        Ok(String::from("MockAdapter::destroyInstance"))
    }

    fn monitor_instance(
        &self,
        metric: &str,
        options: &MonitorOptions,
    ) -> Result<String, CloudError> {
        self.record(Call::Monitor(metric.to_owned(), options.clone()));
        Ok(String::from("MockAdapter::monitorInstance"))
    }

    fn deploy_instance(
        &self,
        image_id: &str,
        options: &DeployOptions,
    ) -> Result<String, CloudError> {
        self.record(Call::Deploy(image_id.to_owned(), options.clone()));
        Ok(String::from("MockAdapter::deployInstance"))
    }

    fn describe_instance(&self) -> Result<InstanceAttributes, CloudError> {
        self.record(Call::Describe);
        self.describe_with
            .clone()
            .ok_or_else(|| CloudError::not_available("describe", Self::NAME))
    }

    fn client(&self) -> &MockClient {
        &CLIENT
    }
}

/// Adapter relying on the default `describe_instance`.
#[derive(Debug, Default)]
pub struct MinimalAdapter;

impl LifecycleAdapter for MinimalAdapter {
    const NAME: &'static str = "minimal";

    type Client = ();
    type Error = CloudError;
    type Outcome = ();
    type Metrics = ();
    type Deployment = ();

    fn start_instance(&self) -> Result<(), CloudError> {
        Ok(())
    }

    fn stop_instance(&self) -> Result<(), CloudError> {
        Ok(())
    }

    fn reboot_instance(&self) -> Result<(), CloudError> {
        Ok(())
    }

    fn destroy_instance(&self) -> Result<(), CloudError> {
        Ok(())
    }

    fn monitor_instance(&self, _metric: &str, _options: &MonitorOptions) -> Result<(), CloudError> {
        Ok(())
    }

    fn deploy_instance(&self, _image_id: &str, _options: &DeployOptions) -> Result<(), CloudError> {
        Ok(())
    }

    fn client(&self) -> &() {
        &()
    }
}
