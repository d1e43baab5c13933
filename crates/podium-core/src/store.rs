use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::value::Value;

/// A capacity-bounded table of raw field values, keyed by field and rank.
///
/// Backends own their storage and serialize their own access; record
/// operations assume they hold the table exclusively for the duration of a
/// call. Rank 0 is the best entry.
pub trait RankedStore {
    /// Fixed number of ranks the table holds.
    fn capacity(&self) -> u32;

    /// Raw value at `rank`, or `None` for a slot that was never written.
    fn read(&self, key: &str, rank: u32) -> Option<Value>;

    /// Store a raw value at `rank`. Writing beyond capacity violates the
    /// contract.
    fn write(&mut self, key: &str, rank: u32, value: Value) -> Result<()>;
}

/// In-memory ranked store.
///
/// Serves as the test backend and as a snapshot format: the whole table
/// serializes to JSON and reloads bit-identically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryStore {
    capacity: u32,
    cells: HashMap<String, Vec<Option<Value>>>,
}

impl MemoryStore {
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            cells: HashMap::new(),
        }
    }
}

impl RankedStore for MemoryStore {
    fn capacity(&self) -> u32 {
        self.capacity
    }

    fn read(&self, key: &str, rank: u32) -> Option<Value> {
        self.cells
            .get(key)
            .and_then(|column| column.get(rank as usize))
            .and_then(|cell| cell.clone())
    }

    fn write(&mut self, key: &str, rank: u32, value: Value) -> Result<()> {
        if rank >= self.capacity {
            return Err(Error::RankOutOfRange {
                rank,
                capacity: self.capacity,
            });
        }
        let column = self
            .cells
            .entry(key.to_string())
            .or_insert_with(|| vec![None; self.capacity as usize]);
        column[rank as usize] = Some(value);
        Ok(())
    }
}
