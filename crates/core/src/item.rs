use serde::{Deserialize, Serialize};

use crate::types::Defindex;

/// A concrete item whose display name should be composed.
///
/// Only `defindex` and `quality` are required; every other attribute is
/// optional and only contributes to the name when set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemInstance {
    pub defindex: Defindex,
    pub quality: u32,
    /// Elevated quality, e.g. Strange on an Unusual.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality2: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tradable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub craftable: Option<bool>,
    /// Killstreak tier, 1 to 3.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub killstreak: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub australium: Option<bool>,
    /// Particle effect id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub festive: Option<bool>,
    /// Skin id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paintkit: Option<u32>,
    /// Wear tier, 1 (Factory New) to 5 (Battle Scarred).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wear: Option<u8>,
    /// Defindex of the item a kit or strangifier applies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Defindex>,
    /// Defindex of the item a fabricator produces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Defindex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_quality: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crateseries: Option<u32>,
}

impl ItemInstance {
    /// An item with only the required attributes set.
    pub fn new(defindex: Defindex, quality: u32) -> Self {
        Self {
            defindex,
            quality,
            ..Default::default()
        }
    }
}
