//! Provider-neutral adapters for document queries and compute instances.
//!
//! The crate offers two contracts. [`QueryAdapter`] builds a backend-native
//! query one call at a time and hands it to the provider client through
//! [`QueryAdapter::assemble`]. [`Instance`] binds a validated attribute
//! record to a [`LifecycleAdapter`] and forwards lifecycle calls to it.
//! Backends that lack a capability say so with
//! [`CloudError::OperationNotAvailable`] rather than degrading silently.

pub mod config;
pub mod error;
pub mod instance;
pub mod query;
pub mod scaleway;

pub use config::{ConfigError, ScalewayConfig};
pub use error::{CloudError, InvalidArgument};
pub use instance::{
    AttributeKey, DeployOptions, Instance, InstanceAttributes, InstanceStatus, LifecycleAdapter,
    Metric, MonitorOptions, SshCredential,
};
pub use query::{
    Connective, Direction, NativeTableQuery, QueryAdapter, SelectExpression, SelectQuery,
    TableEntityQuery, TableFilter, TableQuery, Value,
};
pub use scaleway::{PowerAction, ScalewayLifecycle, ScalewayLifecycleError};
