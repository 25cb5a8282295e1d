//! The fetch collaborator consumed by the schema manager.
//!
//! Transport, authentication and response parsing live behind
//! [`SchemaSource`]; the manager only pages through items and merges the
//! three parts into a [`RawSchema`](crate::RawSchema).

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::schema::{ItemDefinition, ParticleEffect};

/// Quality and particle tables from the schema overview.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaOverview {
    #[serde(default)]
    pub qualities: BTreeMap<String, u32>,
    #[serde(rename = "qualityNames", default)]
    pub quality_names: BTreeMap<String, String>,
    #[serde(rename = "attribute_controlled_attached_particles", default)]
    pub particles: Vec<ParticleEffect>,
}

/// One page of item definitions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemsPage {
    #[serde(default)]
    pub items: Vec<ItemDefinition>,
    /// Cursor of the following page; absent on the last page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<u32>,
}

/// Supplies the raw parts of a schema snapshot.
///
/// Implementations own their credentials and must report a missing one as
/// [`SchemaError::Configuration`].
#[async_trait]
pub trait SchemaSource: Send + Sync {
    /// Fetch qualities and particle effects.
    async fn fetch_overview(&self) -> Result<SchemaOverview, SchemaError>;

    /// Fetch the page of item definitions starting at `cursor` (0 for the
    /// first page).
    async fn fetch_items_page(&self, cursor: u32) -> Result<ItemsPage, SchemaError>;

    /// Fetch the skin id to name table.
    async fn fetch_paintkits(&self) -> Result<BTreeMap<u32, String>, SchemaError>;
}
