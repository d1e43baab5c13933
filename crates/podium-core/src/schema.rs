use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::item::Item;
use crate::store::RankedStore;
use crate::value::Value;

/// Rank-aware reinterpretation of a raw stored value, applied on read.
///
/// The identity is implied when absent; a slot can install one to derive
/// its display value from the position instead of the stored payload.
pub type ReadTransform = fn(u32, &Value) -> Value;

/// One field of a schema: an [`Item`] bound to its storage key, with a
/// flag saying whether the field is persisted in the ranked store at all.
#[derive(Debug, Clone)]
pub struct ItemSlot {
    name: String,
    item: Item,
    stored: bool,
    transform: Option<ReadTransform>,
}

impl ItemSlot {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn item(&self) -> &Item {
        &self.item
    }

    /// Whether the field is written to and read from the ranked store.
    /// Memory-only fields exist solely in the record.
    pub fn is_stored(&self) -> bool {
        self.stored
    }

    /// Read this field at `rank`, passing the raw value through the slot's
    /// transform. A slot the store has never seen yields the item default.
    pub fn read(&self, store: &dyn RankedStore, rank: u32) -> Value {
        let raw = store
            .read(&self.name, rank)
            .unwrap_or_else(|| self.item.default_value().clone());
        match self.transform {
            Some(transform) => transform(rank, &raw),
            None => raw,
        }
    }

    /// Write a raw value for this field at `rank`.
    pub fn write(&self, store: &mut dyn RankedStore, rank: u32, value: Value) -> Result<()> {
        store.write(&self.name, rank, value)
    }
}

/// The ordered, shared set of field descriptors every record of a given
/// kind conforms to.
///
/// Field names are unique and the order is fixed once the schema is built.
/// Records reference the schema through an `Arc` and never copy it; name
/// lookup goes through a precomputed index map.
#[derive(Debug, Default)]
pub struct Schema {
    slots: Vec<ItemSlot>,
    index: HashMap<String, usize>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field. Fails on a duplicate name.
    pub fn push(&mut self, name: impl Into<String>, item: Item, stored: bool) -> Result<()> {
        self.push_slot(name.into(), item, stored, None)
    }

    /// Append a field whose reads go through `transform`.
    pub fn push_with_transform(
        &mut self,
        name: impl Into<String>,
        item: Item,
        stored: bool,
        transform: ReadTransform,
    ) -> Result<()> {
        self.push_slot(name.into(), item, stored, Some(transform))
    }

    fn push_slot(
        &mut self,
        name: String,
        item: Item,
        stored: bool,
        transform: Option<ReadTransform>,
    ) -> Result<()> {
        if self.index.contains_key(&name) {
            return Err(Error::DuplicateField(name));
        }
        self.index.insert(name.clone(), self.slots.len());
        self.slots.push(ItemSlot {
            name,
            item,
            stored,
            transform,
        });
        Ok(())
    }

    /// Freeze the schema for sharing across records.
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn get(&self, name: &str) -> Option<&ItemSlot> {
        self.index_of(name).map(|i| &self.slots[i])
    }

    pub fn slots(&self) -> &[ItemSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Align;
    use crate::store::MemoryStore;
    use crate::value::ValueKind;

    #[test]
    fn test_duplicate_name_rejected() {
        let mut schema = Schema::new();
        schema.push("score", Item::score(), true).unwrap();
        assert!(schema.push("score", Item::best_score(), true).is_err());
        assert_eq!(schema.len(), 1);
    }

    #[test]
    fn test_order_and_index_agree() {
        let mut schema = Schema::new();
        schema.push("name", Item::new("", "Name", Align::Left), true).unwrap();
        schema.push("score", Item::score(), true).unwrap();

        assert_eq!(schema.index_of("name"), Some(0));
        assert_eq!(schema.index_of("score"), Some(1));
        assert_eq!(schema.index_of("lamp"), None);
        assert_eq!(schema.slots()[1].name(), "score");
        assert_eq!(schema.get("score").unwrap().item().kind(), ValueKind::UInt);
    }

    #[test]
    fn test_slot_read_falls_back_to_default() {
        let mut schema = Schema::new();
        schema.push("score", Item::score(), true).unwrap();
        let store = MemoryStore::new(4);
        let slot = schema.get("score").unwrap();
        assert_eq!(slot.read(&store, 0), Value::UInt(0));
    }

    #[test]
    fn test_slot_read_applies_transform() {
        let mut schema = Schema::new();
        schema
            .push_with_transform(
                "rank",
                Item::new(0u32, "Rank", Align::Right),
                false,
                |rank, _| Value::UInt(rank + 1),
            )
            .unwrap();
        let store = MemoryStore::new(4);
        let slot = schema.get("rank").unwrap();
        assert_eq!(slot.read(&store, 2), Value::UInt(3));
    }
}
