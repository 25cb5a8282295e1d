//! On-disk schema snapshot.
//!
//! The file holds the JSON form of a [`RawSchema`]. Writes go to a sibling
//! temp file first and are renamed into place so a crash mid-write never
//! leaves a truncated cache behind.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tf2schema_core::RawSchema;

/// Read a snapshot, returning `None` when the file does not exist.
pub async fn load(path: &Path) -> anyhow::Result<Option<RawSchema>> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e).with_context(|| format!("reading {}", path.display()));
        }
    };

    let schema = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(Some(schema))
}

/// Write a snapshot, replacing any previous file.
pub async fn save(path: &Path, schema: &RawSchema) -> anyhow::Result<()> {
    let json = serde_json::to_vec(schema).context("serializing schema")?;

    let tmp = temp_path(path);
    tokio::fs::write(&tmp, &json)
        .await
        .with_context(|| format!("writing {}", tmp.display()))?;
    tokio::fs::rename(&tmp, path)
        .await
        .with_context(|| format!("renaming {} to {}", tmp.display(), path.display()))?;

    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
