use std::sync::Arc;

use crate::error::{Error, Result};
use crate::schema::Schema;
use crate::store::RankedStore;
use crate::value::Value;

/// One row of field values conforming to a shared schema.
///
/// Every slot starts at its item default; the value sequence stays
/// index-aligned with the schema for the record's whole life.
#[derive(Debug, Clone)]
pub struct Record {
    schema: Arc<Schema>,
    values: Vec<Value>,
}

impl Record {
    pub fn new(schema: Arc<Schema>) -> Self {
        let values = schema
            .slots()
            .iter()
            .map(|slot| slot.item().default_value().clone())
            .collect();
        Self { schema, values }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Values in schema order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Replace a field's value. The name must exist and the value's kind
    /// must match the slot; on failure nothing is mutated.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        let i = self
            .schema
            .index_of(name)
            .ok_or_else(|| Error::UnknownField(name.to_string()))?;
        let expected = self.values[i].kind();
        if value.kind() != expected {
            return Err(Error::FieldTypeMismatch {
                field: name.to_string(),
                expected,
                actual: value.kind(),
            });
        }
        self.values[i] = value;
        Ok(())
    }

    /// Read-only view of a field's current value.
    pub fn get(&self, name: &str) -> Result<&Value> {
        let i = self
            .schema
            .index_of(name)
            .ok_or_else(|| Error::UnknownField(name.to_string()))?;
        Ok(&self.values[i])
    }

    /// Replace every stored field with the table contents at `rank`,
    /// passed through each slot's read transform. Memory-only fields are
    /// left untouched.
    pub fn load_from_rank(&mut self, store: &dyn RankedStore, rank: u32) {
        for (i, slot) in self.schema.slots().iter().enumerate() {
            if !slot.is_stored() {
                continue;
            }
            self.values[i] = slot.read(store, rank);
        }
    }

    /// Insert this record at `rank`, pushing lower-ranked entries down one
    /// slot each. The entry previously at the last rank is dropped; ranks
    /// above `rank` are untouched. Inserting at the last rank shifts
    /// nothing. `rank` beyond capacity violates the contract.
    pub fn store_at_rank(&self, store: &mut dyn RankedStore, rank: u32) -> Result<()> {
        let capacity = store.capacity();
        if rank >= capacity {
            return Err(Error::RankOutOfRange { rank, capacity });
        }
        for (i, slot) in self.schema.slots().iter().enumerate() {
            if !slot.is_stored() {
                continue;
            }
            // shift raw values down, last entry falls off the table
            for j in (rank + 1..capacity).rev() {
                let moved = store
                    .read(slot.name(), j - 1)
                    .unwrap_or_else(|| slot.item().default_value().clone());
                slot.write(store, j, moved)?;
            }
            slot.write(store, rank, self.values[i].clone())?;
        }
        Ok(())
    }
}
