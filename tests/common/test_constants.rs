//! Values shared by the integration test crates.
//!
//! Pulled in with `#[path = "common/test_constants.rs"]` so that `common/`
//! does not become a test binary of its own.

/// Scaleway commercial type used when a deploy names no size.
pub const DEFAULT_INSTANCE_TYPE: &str = "DEV1-S";
