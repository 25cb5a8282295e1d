//! Core data model and pure logic for the TF2 item schema.
//!
//! - [`schema`]: the fetched catalogue snapshot ([`RawSchema`]).
//! - [`lookup`]: [`LookupIndex`], O(1) queries over a snapshot.
//! - [`naming`]: display name composition for concrete items.
//! - [`source`]: the [`SchemaSource`] fetch collaborator trait.
//! - [`version`]: snapshot compatibility checks.

pub mod error;
pub mod item;
pub mod lookup;
pub mod naming;
pub mod schema;
pub mod source;
pub mod types;
pub mod version;

pub use error::SchemaError;
pub use item::ItemInstance;
pub use lookup::{BiMap, LookupIndex};
pub use naming::compose_name;
pub use schema::{ItemDefinition, ParticleEffect, RawSchema, SchemaData};
pub use source::{ItemsPage, SchemaOverview, SchemaSource};
