//! Drill hole definitions and the per-part drill collection.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::DIAMETER_KEY_SCALE;

/// Physical face of a part.
///
/// The export's own face numbering changed between format revisions, so the
/// catalog pins one canonical mapping and converts on decode. The numeric
/// codes below are part of the output contract:
///
/// | face | code |
/// |---|---|
/// | Front | 0 |
/// | EdgeW2 | 1 |
/// | EdgeL1 | 2 |
/// | EdgeW1 | 3 |
/// | EdgeL2 | 4 |
/// | Rear | 5 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Face {
    /// Front face of the panel (z = 0 plane, machining side 1).
    Front,
    /// Width edge at x = length span.
    EdgeW2,
    /// Length edge at y = 0.
    EdgeL1,
    /// Width edge at x = 0.
    EdgeW1,
    /// Length edge at y = width span.
    EdgeL2,
    /// Rear face of the panel (machining side 2).
    Rear,
}

impl Face {
    /// Canonical numeric code for this face.
    pub fn code(self) -> u8 {
        match self {
            Face::Front => 0,
            Face::EdgeW2 => 1,
            Face::EdgeL1 => 2,
            Face::EdgeW1 => 3,
            Face::EdgeL2 => 4,
            Face::Rear => 5,
        }
    }

    /// Corner tags a hole on this face anchors to.
    ///
    /// Corner 1 is the x0/y0 origin, numbered counter-clockwise. Edge faces
    /// anchor to the two corners bounding the edge; through faces to their
    /// reference corner.
    pub fn corner_tags(self) -> &'static [u8] {
        match self {
            Face::Front => &[1],
            Face::Rear => &[2],
            Face::EdgeL1 => &[1, 2],
            Face::EdgeW2 => &[2, 3],
            Face::EdgeL2 => &[3, 4],
            Face::EdgeW1 => &[4, 1],
        }
    }
}

/// A single drilled hole in part-local coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillPoint {
    /// Face the hole is drilled into.
    pub face: Face,
    /// Physical corner(s) the hole is referenced from (1-4).
    pub corners: Vec<u8>,
    /// Local X coordinate.
    pub x: f64,
    /// Local Y coordinate.
    pub y: f64,
    /// Local Z coordinate.
    pub z: f64,
    /// Drilling depth.
    pub depth: f64,
    /// Tool diameter.
    pub diameter: f64,
    /// Repeat pattern type (reserved for patterned-hole export).
    pub repeat_type: i32,
    /// Repeat X step (reserved).
    pub rep_dx: f64,
    /// Repeat Y step (reserved).
    pub rep_dy: f64,
    /// Repeat count (reserved).
    pub rep_count: i32,
    /// Drilling direction X component (reserved).
    pub direction_x: f64,
    /// Drilling direction Y component (reserved).
    pub direction_y: f64,
    /// Drilling direction Z component (reserved).
    pub direction_z: f64,
}

impl DrillPoint {
    /// Create a new drill point with corner tags taken from the face table.
    ///
    /// The reserved repeat/direction fields are concrete zeros, never left
    /// undefined.
    pub fn new(face: Face, x: f64, y: f64, z: f64, depth: f64, diameter: f64) -> Self {
        Self {
            face,
            corners: face.corner_tags().to_vec(),
            x,
            y,
            z,
            depth,
            diameter,
            repeat_type: 0,
            rep_dx: 0.0,
            rep_dy: 0.0,
            rep_count: 0,
            direction_x: 0.0,
            direction_y: 0.0,
            direction_z: 0.0,
        }
    }
}

/// Drill holes owned by one part, with a per-diameter histogram.
///
/// Invariant: `total_count == sum of histogram values == items.len()`.
/// Fields are private so the invariant can only be maintained through
/// [`DrillCollection::add`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrillCollection {
    total_count: u32,
    /// Histogram keyed by diameter in tenths of a millimetre.
    count_by_diameter: BTreeMap<u32, u32>,
    items: Vec<DrillPoint>,
}

impl DrillCollection {
    fn diameter_key(diameter: f64) -> u32 {
        (diameter * DIAMETER_KEY_SCALE).round().max(0.0) as u32
    }

    /// Add a hole, updating count and histogram together.
    pub fn add(&mut self, point: DrillPoint) {
        self.total_count += 1;
        *self
            .count_by_diameter
            .entry(Self::diameter_key(point.diameter))
            .or_insert(0) += 1;
        self.items.push(point);
    }

    /// Total number of holes.
    pub fn total_count(&self) -> u32 {
        self.total_count
    }

    /// Number of holes drilled with the given tool diameter.
    pub fn count_for_diameter(&self, diameter: f64) -> u32 {
        self.count_by_diameter
            .get(&Self::diameter_key(diameter))
            .copied()
            .unwrap_or(0)
    }

    /// Histogram entries as (diameter, count), in diameter order.
    pub fn histogram(&self) -> impl Iterator<Item = (f64, u32)> + '_ {
        self.count_by_diameter
            .iter()
            .map(|(key, count)| (*key as f64 / DIAMETER_KEY_SCALE, *count))
    }

    /// Ordered list of holes.
    pub fn items(&self) -> &[DrillPoint] {
        &self.items
    }

    /// Whether no holes have been recorded.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
