//! Read-only query surface over a schema snapshot.
//!
//! A [`LookupIndex`] is built once per [`RawSchema`] and answers every lookup
//! in O(1). A miss is a normal outcome and is reported as `None`.

use std::collections::HashMap;
use std::sync::Arc;

use crate::schema::{ItemDefinition, RawSchema};
use crate::types::Defindex;

// ---------------------------------------------------------------------------
// BiMap
// ---------------------------------------------------------------------------

/// Bidirectional id <-> name mapping.
///
/// When either side sees a duplicate, the first entry inserted wins, matching
/// a front-to-back scan of the source table.
#[derive(Debug, Clone, Default)]
pub struct BiMap {
    by_id: HashMap<u32, String>,
    by_name: HashMap<String, u32>,
}

impl BiMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pair, keeping any existing entry for either key.
    pub fn insert(&mut self, id: u32, name: impl Into<String>) {
        let name = name.into();
        self.by_name.entry(name.clone()).or_insert(id);
        self.by_id.entry(id).or_insert(name);
    }

    pub fn name(&self, id: u32) -> Option<&str> {
        self.by_id.get(&id).map(String::as_str)
    }

    pub fn id(&self, name: &str) -> Option<u32> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(u32, S)> for BiMap {
    fn from_iter<I: IntoIterator<Item = (u32, S)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (id, name) in iter {
            map.insert(id, name);
        }
        map
    }
}

// ---------------------------------------------------------------------------
// LookupIndex
// ---------------------------------------------------------------------------

/// Lookup tables derived from a single [`RawSchema`].
///
/// Holds the snapshot it was built from, so an index stays valid even after
/// the store has moved on to a newer snapshot.
#[derive(Debug)]
pub struct LookupIndex {
    schema: Arc<RawSchema>,
    by_defindex: HashMap<Defindex, usize>,
    by_item_name: HashMap<String, usize>,
    qualities: BiMap,
    effects: BiMap,
    skins: BiMap,
}

impl LookupIndex {
    /// Build every lookup table for `schema`.
    pub fn build(schema: Arc<RawSchema>) -> Self {
        let raw = &schema.raw;

        let mut by_defindex = HashMap::with_capacity(raw.items.len());
        let mut by_item_name = HashMap::with_capacity(raw.items.len());
        for (pos, item) in raw.items.iter().enumerate() {
            by_defindex.entry(item.defindex).or_insert(pos);
            by_item_name.entry(item.item_name.clone()).or_insert(pos);
        }

        // Quality ids and display names are joined through the quality key.
        let qualities = raw
            .qualities
            .iter()
            .filter_map(|(key, &id)| raw.quality_names.get(key).map(|name| (id, name.as_str())))
            .collect();

        let effects = raw
            .particles
            .iter()
            .map(|effect| (effect.id, effect.name.as_str()))
            .collect();

        let skins = raw
            .paintkits
            .iter()
            .map(|(&id, name)| (id, name.as_str()))
            .collect();

        Self {
            by_defindex,
            by_item_name,
            qualities,
            effects,
            skins,
            schema,
        }
    }

    /// The snapshot this index was built from.
    pub fn schema(&self) -> &Arc<RawSchema> {
        &self.schema
    }

    pub fn item_by_defindex(&self, defindex: Defindex) -> Option<&ItemDefinition> {
        self.by_defindex
            .get(&defindex)
            .map(|&pos| &self.schema.raw.items[pos])
    }

    /// Find a definition by its display name (`item_name`).
    pub fn item_by_name(&self, name: &str) -> Option<&ItemDefinition> {
        self.by_item_name
            .get(name)
            .map(|&pos| &self.schema.raw.items[pos])
    }

    pub fn quality_name(&self, id: u32) -> Option<&str> {
        self.qualities.name(id)
    }

    pub fn quality_id(&self, name: &str) -> Option<u32> {
        self.qualities.id(name)
    }

    pub fn effect_name(&self, id: u32) -> Option<&str> {
        self.effects.name(id)
    }

    pub fn effect_id(&self, name: &str) -> Option<u32> {
        self.effects.id(name)
    }

    pub fn skin_name(&self, id: u32) -> Option<&str> {
        self.skins.name(id)
    }

    pub fn skin_id(&self, name: &str) -> Option<u32> {
        self.skins.id(name)
    }

    /// All skins in ascending id order.
    pub fn skins(&self) -> impl Iterator<Item = (u32, &str)> {
        self.schema
            .raw
            .paintkits
            .iter()
            .map(|(&id, name)| (id, name.as_str()))
    }
}
