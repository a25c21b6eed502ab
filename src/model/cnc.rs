//! CNC toolpath actions decoded from a machining program.

use serde::{Deserialize, Serialize};

/// One toolpath action.
///
/// A part's action list preserves program order; the sequence is the
/// toolpath, so reordering it changes the machining result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CncAction {
    /// Tool-down start of a path.
    StartPoint {
        x: f64,
        y: f64,
        /// Path-center offset carried into following actions.
        center: f64,
        /// Working depth carried into following actions.
        depth: f64,
        /// Entry transition type code.
        type_in: i32,
        /// Exit transition type code.
        type_out: i32,
    },
    /// Straight line to a point.
    Line { x: f64, y: f64, center: f64, depth: f64 },
    /// Arc to a point with an explicit radius.
    Arc {
        x: f64,
        y: f64,
        radius: f64,
        /// Counter-clockwise when true.
        ccw: bool,
        center: f64,
        depth: f64,
    },
    /// Arc to a point via an explicit arc center.
    EndPointArc {
        x: f64,
        y: f64,
        /// Arc center X coordinate.
        cx: f64,
        /// Arc center Y coordinate.
        cy: f64,
        /// Counter-clockwise when true.
        ccw: bool,
        center: f64,
        depth: f64,
    },
}

impl CncAction {
    /// End point of this action.
    pub fn end_point(&self) -> (f64, f64) {
        match *self {
            CncAction::StartPoint { x, y, .. }
            | CncAction::Line { x, y, .. }
            | CncAction::Arc { x, y, .. }
            | CncAction::EndPointArc { x, y, .. } => (x, y),
        }
    }

    /// Working depth this action runs at.
    pub fn depth(&self) -> f64 {
        match *self {
            CncAction::StartPoint { depth, .. }
            | CncAction::Line { depth, .. }
            | CncAction::Arc { depth, .. }
            | CncAction::EndPointArc { depth, .. } => depth,
        }
    }

    /// Whether this action is an arc segment.
    pub fn is_arc(&self) -> bool {
        matches!(self, CncAction::Arc { .. } | CncAction::EndPointArc { .. })
    }
}
