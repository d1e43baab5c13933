//! CLI command implementations.

pub mod export;
pub mod init;
pub mod show;
pub mod submit;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use podium_core::MemoryStore;

pub(crate) fn load_store(path: &Path) -> Result<MemoryStore> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading table snapshot {}", path.display()))?;
    let store = serde_json::from_str(&content)
        .with_context(|| format!("parsing table snapshot {}", path.display()))?;
    Ok(store)
}

pub(crate) fn save_store(path: &Path, store: &MemoryStore) -> Result<()> {
    let content = serde_json::to_string_pretty(store)?;
    fs::write(path, content)
        .with_context(|| format!("writing table snapshot {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use podium_core::{RankedStore, Value};

    #[test]
    fn test_snapshot_survives_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.json");

        let mut store = MemoryStore::new(4);
        store.write("score", 0, Value::UInt(8080)).unwrap();
        save_store(&path, &store).unwrap();

        let restored = load_store(&path).unwrap();
        assert_eq!(restored.capacity(), 4);
        assert_eq!(restored.read("score", 0), Some(Value::UInt(8080)));
    }

    #[test]
    fn test_missing_snapshot_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_store(&dir.path().join("nope.json")).is_err());
    }
}
