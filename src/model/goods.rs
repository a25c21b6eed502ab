//! Sheet/band goods registry.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One sheet/band catalog item synchronized from the export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoodsSync {
    /// Export-side material id.
    pub model_id: u32,
    /// Display name.
    pub model_name: String,
    /// Resolved catalog model id, filled by the consuming system.
    pub gid: u32,
}

impl GoodsSync {
    /// Create an entry with an unresolved catalog id.
    pub fn new(model_id: u32, model_name: impl Into<String>) -> Self {
        Self {
            model_id,
            model_name: model_name.into(),
            gid: 0,
        }
    }
}

/// Registry of sheet/band goods keyed by export material id.
///
/// Lookups return an explicit `Option` so callers decide between
/// warn-and-skip and propagation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoodsRegistry {
    entries: BTreeMap<u32, GoodsSync>,
}

impl GoodsRegistry {
    /// Register an entry under its material id.
    pub fn insert(&mut self, entry: GoodsSync) {
        self.entries.insert(entry.model_id, entry);
    }

    /// Look up an entry by material id.
    pub fn get(&self, material_id: u32) -> Option<&GoodsSync> {
        self.entries.get(&material_id)
    }

    /// Whether a material id is registered.
    pub fn contains(&self, material_id: u32) -> bool {
        self.entries.contains_key(&material_id)
    }

    /// Number of registered goods.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in material-id order.
    pub fn iter(&self) -> impl Iterator<Item = &GoodsSync> {
        self.entries.values()
    }
}
