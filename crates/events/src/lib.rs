//! Schema lifecycle notifications.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`SchemaEvent`]: the notifications a schema manager emits.

pub mod bus;

pub use bus::{EventBus, SchemaEvent};
