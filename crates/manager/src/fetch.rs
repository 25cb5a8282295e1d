//! Snapshot assembly from a [`SchemaSource`].

use std::collections::HashSet;

use tf2schema_core::{ItemDefinition, RawSchema, SchemaData, SchemaError, SchemaSource};

/// Fetch overview, items and paintkits concurrently and merge them into a
/// snapshot stamped with `version`.
///
/// The first failing part aborts the whole fetch.
pub async fn fetch_schema(source: &dyn SchemaSource, version: &str) -> Result<RawSchema, SchemaError> {
    let (overview, items, paintkits) = tokio::try_join!(
        source.fetch_overview(),
        fetch_all_items(source),
        source.fetch_paintkits(),
    )?;

    tracing::info!(
        items = items.len(),
        qualities = overview.qualities.len(),
        effects = overview.particles.len(),
        paintkits = paintkits.len(),
        "Schema fetched"
    );

    Ok(RawSchema::new(
        SchemaData {
            items,
            qualities: overview.qualities,
            quality_names: overview.quality_names,
            particles: overview.particles,
            paintkits,
            items_game: None,
        },
        Some(version.to_string()),
    ))
}

/// Page through every item definition, starting at cursor 0.
///
/// Fails with [`SchemaError::RepeatedCursor`] if the source hands out a
/// cursor it has already served.
pub async fn fetch_all_items(source: &dyn SchemaSource) -> Result<Vec<ItemDefinition>, SchemaError> {
    let mut items = Vec::new();
    let mut seen = HashSet::new();
    let mut cursor = 0;

    loop {
        if !seen.insert(cursor) {
            return Err(SchemaError::RepeatedCursor(cursor));
        }

        let page = source.fetch_items_page(cursor).await?;
        tracing::debug!(cursor, count = page.items.len(), next = ?page.next, "Fetched items page");
        items.extend(page.items);

        match page.next {
            Some(next) => cursor = next,
            None => return Ok(items),
        }
    }
}
