//! Schema cache, refresh scheduling and the [`SchemaManager`] façade.
//!
//! - [`store`]: [`SchemaStore`], the current snapshot with atomic replace
//!   and staleness.
//! - [`scheduler`]: [`UpdateScheduler`], the single pending refresh timer.
//! - [`fetch`]: assembles a snapshot from a
//!   [`SchemaSource`](tf2schema_core::SchemaSource).
//! - [`manager`]: [`SchemaManager`], the initialize/ready/event lifecycle.
//! - [`config`]: environment configuration.

pub mod config;
pub mod fetch;
pub mod manager;
pub mod scheduler;
pub mod store;

pub use config::{ConfigError, ManagerConfig, RefreshInterval};
pub use manager::SchemaManager;
pub use scheduler::{SchedulerState, UpdateScheduler};
pub use store::{RejectReason, ReplaceOrigin, ReplaceOutcome, SchemaStore};

/// Version stamped on every snapshot this crate fetches.
pub const SCHEMA_VERSION: &str = env!("CARGO_PKG_VERSION");
