//! Steam Web API implementation of the schema fetch collaborator.
//!
//! [`SteamSchemaSource`] reads the schema overview and paged item
//! definitions from the `IEconItems_440` interface and the skin table from
//! the English protobuf definition token file.

pub mod api;
pub mod config;
pub mod paintkits;

pub use api::{SteamApiError, SteamSchemaSource};
pub use config::SteamConfig;
