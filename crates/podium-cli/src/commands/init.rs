use std::path::Path;

use anyhow::Result;
use podium_core::MemoryStore;
use tracing::info;

pub fn run(table: &Path, capacity: u32) -> Result<()> {
    let store = MemoryStore::new(capacity);
    super::save_store(table, &store)?;
    info!("Created a {}-entry table at {}", capacity, table.display());
    Ok(())
}
