//! Part definition and the keyed part catalog.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::cnc::CncAction;
use super::drill::DrillCollection;
use super::glue::GlueUp;
use super::notch::NotchSegment;

/// One physical piece of the decoded catalog.
///
/// Created when the product tree is walked; mutated by the program decoders;
/// lives for exactly one import pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Part {
    /// Position id, the unique catalog key.
    pub pos: u32,
    /// Model/catalog index.
    pub code: String,
    /// Free-text comment.
    pub name: String,
    /// Nominal length.
    pub length: f64,
    /// Nominal width.
    pub width: f64,
    /// Repeat count.
    pub count: u32,
    /// Edge-band material id, first length edge (0 = unbanded).
    pub edge_l1: u32,
    /// Edge-band material id, second length edge.
    pub edge_l2: u32,
    /// Edge-band material id, first width edge.
    pub edge_w1: u32,
    /// Edge-band material id, second width edge.
    pub edge_w2: u32,
    /// Material/goods id, 0 until resolved by a cut/sheet assignment.
    pub gid: u32,
    /// Set when at least one valid notch segment was decoded.
    pub is_notch: bool,
    /// Set when at least one drill bucket produced a hole.
    pub is_drill: bool,
    /// Set when the part participates in a glue-up.
    pub is_glue: bool,
    /// Set when any recognized path action was encountered.
    pub is_cnc: bool,
    /// Drilled holes.
    pub drills: DrillCollection,
    /// Ordered CNC toolpath.
    pub actions: Vec<CncAction>,
    /// Decoded groove segments.
    pub notches: Vec<NotchSegment>,
    /// Glue-up descriptor, when declared.
    pub glue_up: Option<GlueUp>,
}

impl Part {
    /// Create a bare part with no geometry.
    pub fn new(pos: u32, code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            pos,
            code: code.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Catalog of parts keyed by position id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartCatalog {
    parts: BTreeMap<u32, Part>,
}

impl PartCatalog {
    /// Insert a part under its position id.
    pub fn insert(&mut self, part: Part) {
        self.parts.insert(part.pos, part);
    }

    /// Look up a part.
    pub fn get(&self, pos: u32) -> Option<&Part> {
        self.parts.get(&pos)
    }

    /// Look up a part mutably.
    pub fn get_mut(&mut self, pos: u32) -> Option<&mut Part> {
        self.parts.get_mut(&pos)
    }

    /// Number of parts.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Iterate parts in position-id order.
    pub fn iter(&self) -> impl Iterator<Item = &Part> {
        self.parts.values()
    }
}
