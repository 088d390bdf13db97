use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{self, Error as SerdeError};

use crate::models::event::CountdownEvent;

/// Serializable container for persisting events between runs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoredEvents {
    pub next_id: u64,
    pub events: Vec<CountdownEvent>,
}

pub fn load_snapshot(path: &Path) -> Result<StoredEvents> {
    if !path.exists() {
        return Ok(StoredEvents::default());
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read events from {}", path.display()))?;
    let snapshot = serde_json::from_str(&data).map_err(|err| map_deser_error(err, path))?;
    Ok(snapshot)
}

/// Write the snapshot with replace-on-write semantics: the data lands in a
/// temp file first, then renames over the target. Rename is atomic on POSIX
/// when source and target share a filesystem, so a reader never observes a
/// partially written snapshot.
pub fn save_snapshot(path: &Path, snapshot: &StoredEvents) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create dir {}", parent.display()))?;
    }

    let data = serde_json::to_string_pretty(snapshot)?;
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, data)
        .with_context(|| format!("failed to write events to {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path)
        .with_context(|| format!("failed to replace {}", path.display()))?;
    Ok(())
}

fn map_deser_error(err: SerdeError, path: &Path) -> anyhow::Error {
    anyhow::Error::new(err).context(format!(
        "failed to deserialize events from {}",
        path.display()
    ))
}
