//! The fetched item catalogue.
//!
//! A [`RawSchema`] is one immutable snapshot: the catalogue itself
//! ([`SchemaData`]), the crate version that produced it, and the moment it was
//! fetched. Snapshots are replaced whole, never edited in place.
//!
//! The serialized shape is the persistence contract:
//!
//! ```json
//! { "version": "0.1.0", "fetchedAt": 1700000000000, "raw": { "items": [...] } }
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Defindex, Timestamp};

/// A complete catalogue snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSchema {
    /// Version of the crate that produced the snapshot. Snapshots without a
    /// version are only accepted when they come straight from a fetch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// When the catalogue was fetched, persisted as epoch milliseconds.
    #[serde(rename = "fetchedAt", with = "chrono::serde::ts_milliseconds")]
    pub fetched_at: Timestamp,

    /// The catalogue itself.
    pub raw: SchemaData,
}

impl RawSchema {
    /// Wrap freshly fetched catalogue data, stamped with the current time.
    pub fn new(raw: SchemaData, version: Option<String>) -> Self {
        Self::with_fetched_at(raw, version, Utc::now())
    }

    /// Wrap catalogue data with an explicit fetch time.
    ///
    /// The timestamp is truncated to millisecond precision so that a snapshot
    /// survives a serialize/deserialize cycle unchanged.
    pub fn with_fetched_at(raw: SchemaData, version: Option<String>, fetched_at: Timestamp) -> Self {
        let fetched_at =
            DateTime::from_timestamp_millis(fetched_at.timestamp_millis()).unwrap_or(fetched_at);
        Self {
            version,
            fetched_at,
            raw,
        }
    }
}

/// The catalogue tables, named after the upstream Web API fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaData {
    /// Item definitions in upstream order.
    #[serde(default)]
    pub items: Vec<ItemDefinition>,

    /// Quality key (e.g. `"rarity4"`) to numeric id.
    #[serde(default)]
    pub qualities: BTreeMap<String, u32>,

    /// Quality key to display name (e.g. `"rarity4"` -> `"Unusual"`).
    #[serde(rename = "qualityNames", default)]
    pub quality_names: BTreeMap<String, String>,

    /// Unusual particle effects.
    #[serde(rename = "attribute_controlled_attached_particles", default)]
    pub particles: Vec<ParticleEffect>,

    /// War paint / skin id to display name.
    #[serde(default)]
    pub paintkits: BTreeMap<u32, String>,

    /// Optional raw `items_game` payload, carried through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items_game: Option<serde_json::Value>,
}

/// A single item definition.
///
/// Only the fields the name composer reads are typed; everything else the
/// upstream API returns is kept in [`extra`](Self::extra) so snapshots are
/// lossless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub defindex: Defindex,

    /// Internal identifier, e.g. `"concealedkiller_sniperrifle_nightowl"`.
    #[serde(default)]
    pub name: String,

    /// Display name, e.g. `"Sniper Rifle"`.
    #[serde(default)]
    pub item_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_class: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_type_name: Option<String>,

    /// Loadout slot (`primary`, `secondary`, `melee`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_slot: Option<String>,

    /// Quality the definition is restricted to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_quality: Option<u32>,

    /// Whether the display name takes a leading "The".
    #[serde(default)]
    pub proper_name: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// An unusual particle effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticleEffect {
    pub id: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
}
