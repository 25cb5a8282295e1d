//! Item display name composition.
//!
//! Reconstructs the name the game client shows for an item, e.g.
//! `"Non-Craftable Strange Professional Killstreak Australium Rocket Launcher"`
//! or `"Burning Flames Team Captain"`. Tokens are assembled in a fixed order;
//! most append a word plus a trailing space, the output quality of a
//! fabricator is prepended, and wear and crate series are suffixed after the
//! base item name.

use crate::item::ItemInstance;
use crate::lookup::LookupIndex;
use crate::schema::ItemDefinition;

// ---------------------------------------------------------------------------
// Quality ids
// ---------------------------------------------------------------------------

pub const QUALITY_UNUSUAL: u32 = 5;
pub const QUALITY_UNIQUE: u32 = 6;
pub const QUALITY_DECORATED: u32 = 15;

const KILLSTREAK_TIERS: [&str; 3] = [
    "Killstreak",
    "Specialized Killstreak",
    "Professional Killstreak",
];

const WEAR_NAMES: [&str; 5] = [
    "Factory New",
    "Minimal Wear",
    "Field-Tested",
    "Well-Worn",
    "Battle Scarred",
];

/// Slots whose decorated definitions carry a skin in their internal name.
const SKINNED_SLOTS: [&str; 3] = ["primary", "secondary", "melee"];

/// Killstreak tier label for tiers 1 to 3.
pub fn killstreak_name(tier: u8) -> Option<&'static str> {
    tier.checked_sub(1)
        .and_then(|i| KILLSTREAK_TIERS.get(usize::from(i)).copied())
}

/// Wear label for tiers 1 (Factory New) to 5 (Battle Scarred).
pub fn wear_name(wear: u8) -> Option<&'static str> {
    wear.checked_sub(1)
        .and_then(|i| WEAR_NAMES.get(usize::from(i)).copied())
}

/// Compose the display name of `item`.
///
/// Returns `None` when the item's defindex is not in the schema. Misses on
/// any other lookup only drop the corresponding token. When `proper_name` is
/// set, definitions flagged as proper names get a leading `"The "` if no
/// other token precedes the item name.
///
/// ```
/// # use std::collections::BTreeMap;
/// # use std::sync::Arc;
/// # use tf2schema_core::{compose_name, ItemInstance, LookupIndex, RawSchema, SchemaData};
/// let items = serde_json::from_value(serde_json::json!([
///     { "defindex": 5021, "name": "Decoder Ring", "item_name": "Mann Co. Supply Crate Key" }
/// ])).unwrap();
/// let raw = SchemaData {
///     items,
///     qualities: BTreeMap::from([("Unique".into(), 6)]),
///     quality_names: BTreeMap::from([("Unique".into(), "Unique".into())]),
///     ..Default::default()
/// };
/// let index = LookupIndex::build(Arc::new(RawSchema::new(raw, None)));
///
/// let key = ItemInstance::new(5021, 6);
/// assert_eq!(compose_name(&index, &key, true).as_deref(), Some("Mann Co. Supply Crate Key"));
/// ```
pub fn compose_name(index: &LookupIndex, item: &ItemInstance, proper_name: bool) -> Option<String> {
    let definition = index.item_by_defindex(item.defindex)?;

    let mut name = String::new();

    if item.tradable == Some(false) {
        name.push_str("Non-Tradable ");
    }

    if item.craftable == Some(false) {
        name.push_str("Non-Craftable ");
    }

    if let Some(elevated) = item.quality2 {
        push_token(&mut name, index.quality_name(elevated));
    }

    if shows_quality(item, definition) {
        push_token(&mut name, index.quality_name(item.quality));
    }

    if item.festive == Some(true) {
        name.push_str("Festivized ");
    }

    if let Some(effect) = item.effect {
        push_token(&mut name, index.effect_name(effect));
    }

    if let Some(tier) = item.killstreak.and_then(killstreak_name) {
        push_token(&mut name, Some(tier));
    }

    if let Some(target) = item.target {
        push_token(&mut name, related_item_name(index, target, "target"));
    }

    if let Some(output_quality) = item.output_quality.filter(|&q| q != QUALITY_UNIQUE) {
        if let Some(quality) = index.quality_name(output_quality) {
            name.insert(0, ' ');
            name.insert_str(0, quality);
        }
    }

    if let Some(output) = item.output {
        push_token(&mut name, related_item_name(index, output, "output"));
    }

    if item.australium == Some(true) {
        name.push_str("Australium ");
    }

    match item.paintkit {
        Some(paintkit) => push_token(&mut name, index.skin_name(paintkit)),
        None => push_token(&mut name, decorated_skin(index, definition)),
    }

    if name.is_empty() && proper_name && definition.proper_name {
        name.push_str("The ");
    }

    name.push_str(&definition.item_name);

    if let Some(wear) = item.wear.and_then(wear_name) {
        name.push_str(" (");
        name.push_str(wear);
        name.push(')');
    }

    if let Some(series) = item.crateseries {
        name.push_str(" #");
        name.push_str(&series.to_string());
    }

    Some(name)
}

/// Whether the base quality is spelled out.
///
/// Unique and Decorated are implied, and so is Unusual when an effect names
/// it. Definitions that only exist as Unusual always show the quality.
fn shows_quality(item: &ItemInstance, definition: &ItemDefinition) -> bool {
    if definition.item_quality == Some(QUALITY_UNUSUAL) {
        return true;
    }

    match item.quality {
        QUALITY_UNIQUE | QUALITY_DECORATED => false,
        QUALITY_UNUSUAL => item.effect.is_none(),
        _ => true,
    }
}

/// Skin implied by a decorated weapon's internal name.
///
/// The third `_` segment of e.g. `concealedkiller_sniperrifle_nightowl` is
/// matched against skin names with spaces removed and lower-cased.
fn decorated_skin<'a>(index: &'a LookupIndex, definition: &ItemDefinition) -> Option<&'a str> {
    if definition.item_quality != Some(QUALITY_DECORATED) {
        return None;
    }

    let slot = definition.item_slot.as_deref()?;
    if !SKINNED_SLOTS.contains(&slot) {
        return None;
    }

    let search = definition.name.split('_').nth(2)?;

    let found = index
        .skins()
        .find(|(_, skin)| skin.replace(' ', "").to_lowercase() == search)
        .map(|(_, skin)| skin);

    if found.is_none() {
        tracing::debug!(
            defindex = definition.defindex,
            search,
            "No skin matches decorated item name"
        );
    }

    found
}

fn related_item_name<'a>(index: &'a LookupIndex, defindex: u32, role: &str) -> Option<&'a str> {
    let found = index
        .item_by_defindex(defindex)
        .map(|item| item.item_name.as_str());

    if found.is_none() {
        tracing::warn!(defindex, role, "Referenced item is not in the schema");
    }

    found
}

/// Append `token` followed by a space, or nothing for a lookup miss.
fn push_token(name: &mut String, token: Option<&str>) {
    if let Some(token) = token {
        name.push_str(token);
        name.push(' ');
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use super::*;
    use crate::schema::{ParticleEffect, RawSchema, SchemaData};

    const TEAM_CAPTAIN: u32 = 378;
    const RESTRICTED_CAPTAIN: u32 = 1378;

    fn definitions() -> Vec<ItemDefinition> {
        serde_json::from_value(serde_json::json!([
            { "defindex": 5021, "name": "Decoder Ring", "item_name": "Mann Co. Supply Crate Key", "proper_name": false },
            { "defindex": TEAM_CAPTAIN, "name": "Team Captain", "item_name": "Team Captain", "item_quality": 6 },
            { "defindex": RESTRICTED_CAPTAIN, "name": "Team Captain Unusual", "item_name": "Team Captain", "item_quality": 5 },
            { "defindex": 205, "name": "TF_WEAPON_ROCKETLAUNCHER", "item_name": "Rocket Launcher", "item_slot": "primary" },
            { "defindex": 45, "name": "TF_WEAPON_SCATTERGUN", "item_name": "Force-A-Nature", "item_slot": "primary", "proper_name": true },
            { "defindex": 15013, "name": "concealedkiller_sniperrifle_nightowl", "item_name": "Sniper Rifle", "item_slot": "primary", "item_quality": 15 },
            { "defindex": 15014, "name": "concealedkiller_sniperrifle_unknown", "item_name": "Sniper Rifle", "item_slot": "primary", "item_quality": 15 },
            { "defindex": 15015, "name": "concealedkiller_pda_nightowl", "item_name": "Construction PDA", "item_slot": "pda", "item_quality": 15 },
            { "defindex": 5022, "name": "Supply Crate 1", "item_name": "Mann Co. Supply Crate" },
            { "defindex": 6522, "name": "Strangifier", "item_name": "Strangifier" },
            { "defindex": 20002, "name": "Fabricator", "item_name": "Fabricator" },
            { "defindex": 6526, "name": "Professional Killstreak Kit", "item_name": "Kit" },
            { "defindex": 200, "name": "TF_WEAPON_SCATTERGUN", "item_name": "Scattergun", "item_slot": "primary" }
        ]))
        .expect("definitions fixture")
    }

    fn index() -> LookupIndex {
        let qualities = [
            ("Normal", 0, "Normal"),
            ("rarity1", 1, "Genuine"),
            ("rarity4", 5, "Unusual"),
            ("Unique", 6, "Unique"),
            ("strange", 11, "Strange"),
            ("collectors", 14, "Collector's"),
            ("paintkitweapon", 15, "Decorated Weapon"),
        ];

        let raw = SchemaData {
            items: definitions(),
            qualities: qualities
                .iter()
                .map(|(key, id, _)| (key.to_string(), *id))
                .collect(),
            quality_names: qualities
                .iter()
                .map(|(key, _, name)| (key.to_string(), name.to_string()))
                .collect(),
            particles: vec![ParticleEffect {
                id: 13,
                name: "Burning Flames".into(),
                system: None,
            }],
            paintkits: BTreeMap::from([
                (102, "Night Owl".to_string()),
                (200, "Night Owl Mk.II".to_string()),
                (350, "Pumpkin Patch".to_string()),
            ]),
            items_game: None,
        };

        LookupIndex::build(Arc::new(RawSchema::new(raw, None)))
    }

    fn name(item: &ItemInstance) -> Option<String> {
        compose_name(&index(), item, true)
    }

    #[test]
    fn unknown_defindex_is_not_found() {
        assert_eq!(name(&ItemInstance::new(999_999, 6)), None);
    }

    #[test]
    fn plain_unique_key() {
        assert_eq!(
            name(&ItemInstance::new(5021, 6)).as_deref(),
            Some("Mann Co. Supply Crate Key")
        );
    }

    #[test]
    fn unusual_with_effect_hides_quality() {
        let item = ItemInstance {
            effect: Some(13),
            ..ItemInstance::new(TEAM_CAPTAIN, 5)
        };
        assert_eq!(name(&item).as_deref(), Some("Burning Flames Team Captain"));
    }

    #[test]
    fn unusual_only_definition_always_shows_quality() {
        let item = ItemInstance {
            effect: Some(13),
            ..ItemInstance::new(RESTRICTED_CAPTAIN, 5)
        };
        assert_eq!(
            name(&item).as_deref(),
            Some("Unusual Burning Flames Team Captain")
        );

        // Even when the instance claims Unique quality.
        let unique = ItemInstance::new(RESTRICTED_CAPTAIN, 6);
        assert_eq!(name(&unique).as_deref(), Some("Unique Team Captain"));
    }

    #[test]
    fn unusual_without_effect_shows_quality() {
        assert_eq!(
            name(&ItemInstance::new(TEAM_CAPTAIN, 5)).as_deref(),
            Some("Unusual Team Captain")
        );
    }

    #[test]
    fn trade_and_craft_flags_lead() {
        let item = ItemInstance {
            tradable: Some(false),
            craftable: Some(false),
            ..ItemInstance::new(5021, 6)
        };
        assert_eq!(
            name(&item).as_deref(),
            Some("Non-Tradable Non-Craftable Mann Co. Supply Crate Key")
        );

        let tradable = ItemInstance {
            tradable: Some(true),
            craftable: Some(true),
            ..ItemInstance::new(5021, 6)
        };
        assert_eq!(name(&tradable).as_deref(), Some("Mann Co. Supply Crate Key"));
    }

    #[test]
    fn full_weapon_modifiers_in_order() {
        let item = ItemInstance {
            craftable: Some(false),
            quality2: Some(11),
            festive: Some(true),
            killstreak: Some(3),
            australium: Some(true),
            ..ItemInstance::new(205, 6)
        };
        assert_eq!(
            name(&item).as_deref(),
            Some("Non-Craftable Strange Festivized Professional Killstreak Australium Rocket Launcher")
        );
    }

    #[test]
    fn elevated_unusual_with_effect() {
        let item = ItemInstance {
            quality2: Some(11),
            effect: Some(13),
            ..ItemInstance::new(TEAM_CAPTAIN, 5)
        };
        assert_eq!(
            name(&item).as_deref(),
            Some("Strange Burning Flames Team Captain")
        );
    }

    #[test]
    fn non_unique_quality_is_shown() {
        assert_eq!(
            name(&ItemInstance::new(205, 14)).as_deref(),
            Some("Collector's Rocket Launcher")
        );
        assert_eq!(
            name(&ItemInstance::new(205, 0)).as_deref(),
            Some("Normal Rocket Launcher")
        );
    }

    #[test]
    fn killstreak_tiers() {
        let tiers = [
            (1, "Killstreak Rocket Launcher"),
            (2, "Specialized Killstreak Rocket Launcher"),
            (3, "Professional Killstreak Rocket Launcher"),
            (0, "Rocket Launcher"),
            (4, "Rocket Launcher"),
        ];
        for (tier, expected) in tiers {
            let item = ItemInstance {
                killstreak: Some(tier),
                ..ItemInstance::new(205, 6)
            };
            assert_eq!(name(&item).as_deref(), Some(expected), "tier {tier}");
        }
    }

    #[test]
    fn wear_suffix() {
        let item = ItemInstance {
            wear: Some(3),
            ..ItemInstance::new(205, 6)
        };
        assert_eq!(
            name(&item).as_deref(),
            Some("Rocket Launcher (Field-Tested)")
        );

        let factory_new = ItemInstance {
            wear: Some(1),
            ..ItemInstance::new(205, 6)
        };
        assert_eq!(
            name(&factory_new).as_deref(),
            Some("Rocket Launcher (Factory New)")
        );

        let battle_scarred = ItemInstance {
            wear: Some(5),
            ..ItemInstance::new(205, 6)
        };
        assert_eq!(
            name(&battle_scarred).as_deref(),
            Some("Rocket Launcher (Battle Scarred)")
        );

        let zero = ItemInstance {
            wear: Some(0),
            ..ItemInstance::new(205, 6)
        };
        assert_eq!(name(&zero).as_deref(), Some("Rocket Launcher"));
        assert_eq!(
            name(&ItemInstance::new(205, 6)).as_deref(),
            Some("Rocket Launcher")
        );
    }

    #[test]
    fn crate_series_suffix() {
        let item = ItemInstance {
            crateseries: Some(30),
            ..ItemInstance::new(5022, 6)
        };
        assert_eq!(name(&item).as_deref(), Some("Mann Co. Supply Crate #30"));
    }

    #[test]
    fn proper_name_prefix() {
        let item = ItemInstance::new(45, 6);
        assert_eq!(name(&item).as_deref(), Some("The Force-A-Nature"));
        assert_eq!(
            compose_name(&index(), &item, false).as_deref(),
            Some("Force-A-Nature")
        );

        // Any leading token suppresses "The".
        let strange = ItemInstance::new(45, 11);
        assert_eq!(name(&strange).as_deref(), Some("Strange Force-A-Nature"));
    }

    #[test]
    fn strangifier_names_its_target() {
        let item = ItemInstance {
            target: Some(205),
            ..ItemInstance::new(6522, 6)
        };
        assert_eq!(
            name(&item).as_deref(),
            Some("Rocket Launcher Strangifier")
        );
    }

    #[test]
    fn fabricator_prepends_output_quality() {
        let item = ItemInstance {
            killstreak: Some(3),
            target: Some(200),
            output: Some(6526),
            output_quality: Some(11),
            ..ItemInstance::new(20002, 6)
        };
        assert_eq!(
            name(&item).as_deref(),
            Some("Strange Professional Killstreak Scattergun Kit Fabricator")
        );

        let unique_output = ItemInstance {
            output_quality: Some(6),
            ..item
        };
        assert_eq!(
            name(&unique_output).as_deref(),
            Some("Professional Killstreak Scattergun Kit Fabricator")
        );
    }

    #[test]
    fn output_quality_prepend_counts_as_leading_token() {
        let item = ItemInstance {
            output_quality: Some(11),
            ..ItemInstance::new(45, 6)
        };
        assert_eq!(name(&item).as_deref(), Some("Strange Force-A-Nature"));
    }

    #[test]
    fn explicit_paintkit() {
        let item = ItemInstance {
            paintkit: Some(350),
            wear: Some(2),
            ..ItemInstance::new(205, 15)
        };
        assert_eq!(
            name(&item).as_deref(),
            Some("Pumpkin Patch Rocket Launcher (Minimal Wear)")
        );
    }

    #[test]
    fn decorated_definition_finds_skin_from_internal_name() {
        let item = ItemInstance {
            wear: Some(1),
            ..ItemInstance::new(15013, 15)
        };
        assert_eq!(
            name(&item).as_deref(),
            Some("Night Owl Sniper Rifle (Factory New)")
        );
    }

    #[test]
    fn decorated_skin_search_prefers_lowest_skin_id() {
        let raw = SchemaData {
            items: definitions(),
            paintkits: BTreeMap::from([
                (410, "Night Owl".to_string()),
                (95, "NIGHT OWL".to_string()),
                (102, "Night  Owl".to_string()),
            ]),
            ..Default::default()
        };
        let index = LookupIndex::build(Arc::new(RawSchema::new(raw, None)));

        assert_eq!(
            compose_name(&index, &ItemInstance::new(15013, 15), true).as_deref(),
            Some("NIGHT OWL Sniper Rifle")
        );
    }

    #[test]
    fn decorated_skin_search_misses_quietly() {
        assert_eq!(
            name(&ItemInstance::new(15014, 15)).as_deref(),
            Some("Sniper Rifle")
        );
        // Non-weapon slots are not searched.
        assert_eq!(
            name(&ItemInstance::new(15015, 15)).as_deref(),
            Some("Construction PDA")
        );
    }

    #[test]
    fn auxiliary_misses_drop_tokens() {
        let item = ItemInstance {
            quality2: Some(77),
            effect: Some(4040),
            paintkit: Some(9999),
            target: Some(1),
            ..ItemInstance::new(5021, 6)
        };
        assert_eq!(name(&item).as_deref(), Some("Mann Co. Supply Crate Key"));
    }

    #[test]
    fn composition_is_repeatable() {
        let index = index();
        let item = ItemInstance {
            effect: Some(13),
            quality2: Some(11),
            killstreak: Some(2),
            wear: Some(4),
            ..ItemInstance::new(TEAM_CAPTAIN, 5)
        };
        let first = compose_name(&index, &item, true);
        let second = compose_name(&index, &item, true);
        assert_eq!(first, second);
        assert_eq!(
            first.as_deref(),
            Some("Strange Burning Flames Specialized Killstreak Team Captain (Well-Worn)")
        );
    }

    #[test]
    fn tier_labels() {
        assert_eq!(killstreak_name(2), Some("Specialized Killstreak"));
        assert_eq!(killstreak_name(0), None);
        assert_eq!(wear_name(5), Some("Battle Scarred"));
        assert_eq!(wear_name(6), None);
    }
}
