//! Unit tests for the Scaleway lifecycle adapter that need no network.

use rstest::{fixture, rstest};

use super::{ScalewayLifecycle, ScalewayLifecycleError};
use crate::ScalewayConfig;
use crate::error::{CloudError, InvalidArgument};
use crate::instance::{AttributeKey, Instance, LifecycleAdapter, Metric, MonitorOptions};

#[fixture]
fn config() -> ScalewayConfig {
    ScalewayConfig {
        secret_key: String::from("dummy"),
        default_project_id: String::from("proj"),
        default_zone: String::from("fr-par-1"),
        default_instance_type: String::from("DEV1-S"),
    }
}

#[rstest]
fn uses_default_zone_when_none_given(config: ScalewayConfig) {
    let adapter =
        ScalewayLifecycle::from_config(config, None, " srv-1 ").expect("valid configuration");
    assert_eq!(adapter.zone(), "fr-par-1");
    assert_eq!(adapter.server_id(), "srv-1");
}

#[rstest]
fn explicit_zone_overrides_default(config: ScalewayConfig) {
    let adapter = ScalewayLifecycle::from_config(config, Some("nl-ams-1"), "srv-1")
        .expect("valid configuration");
    assert_eq!(adapter.zone(), "nl-ams-1");
}

#[rstest]
fn rejects_incomplete_configuration(config: ScalewayConfig) {
    let incomplete = ScalewayConfig {
        secret_key: String::new(),
        ..config
    };
    let Err(ScalewayLifecycleError::Config(message)) =
        ScalewayLifecycle::from_config(incomplete, None, "srv-1")
    else {
        panic!("expected configuration error");
    };
    assert!(message.contains("SCW_SECRET_KEY"), "unexpected: {message}");
}

#[rstest]
fn rejects_blank_server_id(config: ScalewayConfig) {
    let Err(err) = ScalewayLifecycle::from_config(config, None, "  ") else {
        panic!("expected blank id to be rejected");
    };
    assert_eq!(
        err,
        ScalewayLifecycleError::Cloud(CloudError::InvalidArgument(
            InvalidArgument::EmptyAttribute(AttributeKey::Id)
        ))
    );
}

#[rstest]
fn monitor_is_not_available(config: ScalewayConfig) {
    let adapter = ScalewayLifecycle::from_config(config, None, "srv-1").expect("valid config");
    let err = adapter
        .monitor_instance(Metric::CpuUsage.as_str(), &MonitorOptions::new())
        .expect_err("Scaleway has no metrics endpoint");
    assert_eq!(
        err,
        ScalewayLifecycleError::Cloud(CloudError::not_available("monitor", "scaleway"))
    );
}

#[rstest]
fn instance_surfaces_capability_gap_unchanged(config: ScalewayConfig) {
    let adapter = ScalewayLifecycle::from_config(config, None, "srv-1").expect("valid config");
    let instance = Instance::new(std::sync::Arc::new(adapter), [("id", "srv-1")])
        .expect("valid attributes");
    let Err(ScalewayLifecycleError::Cloud(err)) = instance.monitor(Metric::NetworkIn) else {
        panic!("expected capability error");
    };
    assert!(err.is_not_available());
}
