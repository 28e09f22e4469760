//! Settings checks performed before a Scaleway adapter is built.

#[path = "common/test_constants.rs"]
mod test_constants;

use cloudmux::{ConfigError, ScalewayConfig};
use rstest::*;

use test_constants::DEFAULT_INSTANCE_TYPE;

#[fixture]
fn valid_config() -> ScalewayConfig {
    ScalewayConfig {
        secret_key: String::from("SCWSECRETKEYEXAMPLE"),
        default_project_id: String::from("11111111-2222-3333-4444-555555555555"),
        default_zone: String::from("fr-par-1"),
        default_instance_type: String::from(DEFAULT_INSTANCE_TYPE),
    }
}

#[rstest]
fn complete_settings_are_accepted(valid_config: ScalewayConfig) {
    assert_eq!(valid_config.validate(), Ok(()));
}

#[rstest]
fn blank_secret_names_variable_file_and_key(valid_config: ScalewayConfig) {
    let cfg = ScalewayConfig {
        secret_key: String::new(),
        ..valid_config
    };

    let error = cfg.validate().expect_err("secret is required");
    let ConfigError::MissingField(ref message) = error else {
        panic!("expected MissingField error");
    };
    assert!(
        message.contains("SCW_SECRET_KEY"),
        "error should mention env var: {message}"
    );
    assert!(
        message.contains("cloudmux.toml"),
        "error should mention config file: {message}"
    );
    assert!(
        message.contains("secret_key"),
        "error should mention TOML key: {message}"
    );
}

#[rstest]
#[case::project(
    |cfg: &mut ScalewayConfig| cfg.default_project_id.clear(),
    "SCW_DEFAULT_PROJECT_ID",
    "default_project_id"
)]
#[case::zone(
    |cfg: &mut ScalewayConfig| cfg.default_zone.clear(),
    "SCW_DEFAULT_ZONE",
    "default_zone"
)]
#[case::instance_type(
    |cfg: &mut ScalewayConfig| cfg.default_instance_type = String::from("   "),
    "SCW_DEFAULT_INSTANCE_TYPE",
    "default_instance_type"
)]
fn each_blank_setting_names_its_sources(
    valid_config: ScalewayConfig,
    #[case] mutate: fn(&mut ScalewayConfig),
    #[case] env_var: &str,
    #[case] toml_key: &str,
) {
    let mut cfg = valid_config;
    mutate(&mut cfg);
    let message = cfg.validate().expect_err("validation should fail").to_string();
    assert!(
        message.contains(env_var),
        "error should mention env var {env_var}: {message}"
    );
    assert!(
        message.contains(toml_key),
        "error should mention TOML key {toml_key}: {message}"
    );
}
