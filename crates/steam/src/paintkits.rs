//! Paintkit names from the protobuf definition token file.
//!
//! The file is a VDF document whose `Tokens` block maps keys such as
//! `"9_102_field { field_number: 2 }"` to display names. Type `9` entries
//! are paintkits; the middle segment is the paintkit id. Unused ids carry
//! placeholder names of the form `"<id>: ..."` and are skipped.
//!
//! Only those token lines are read; nothing else in the document is parsed.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

/// `"9_<id>_<field> ..."  "<name>"` token lines.
static PAINTKIT_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*"9_(\d+)_[^_\s"]+ [^"]*"\s+"([^"]*)""#).expect("valid regex")
});

/// Extract the paintkit id to name table from the token file.
pub fn parse_paintkits(body: &str) -> BTreeMap<u32, String> {
    let mut paintkits = BTreeMap::new();

    for caps in PAINTKIT_TOKEN.captures_iter(body) {
        let Ok(id) = caps[1].parse::<u32>() else {
            continue;
        };
        let name = &caps[2];

        if name.starts_with(&format!("{id}:")) {
            continue;
        }

        paintkits.entry(id).or_insert_with(|| name.to_string());
    }

    paintkits
}
