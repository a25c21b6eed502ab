//! Linear notch/groove segments.

use serde::{Deserialize, Serialize};

/// One straight groove milled into a part.
///
/// The export encodes the tool's centerline position; `indent` is already
/// corrected to the groove's near edge (centerline minus half the width).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotchSegment {
    /// Groove depth.
    pub depth: f64,
    /// Perpendicular offset of the groove's near edge from the reference edge.
    pub indent: f64,
    /// Groove width (tool diameter).
    pub width: f64,
    /// True when the groove is cut into the near/front face of its side.
    pub face: bool,
    /// True when the groove runs along the length axis, false along width.
    pub by_length: bool,
}

impl NotchSegment {
    /// Build a segment from the rounded constant coordinate of the groove,
    /// applying the centerline-to-edge correction.
    pub fn from_centerline(
        depth: f64,
        centerline: f64,
        width: f64,
        face: bool,
        by_length: bool,
    ) -> Self {
        Self {
            depth,
            indent: centerline - width / 2.0,
            width,
            face,
            by_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centerline_correction_is_exact() {
        let segment = NotchSegment::from_centerline(8.0, 15.0, 8.0, true, true);
        assert_eq!(segment.indent, 11.0);
        let segment = NotchSegment::from_centerline(8.0, 132.0, 8.0, false, false);
        assert_eq!(segment.indent, 128.0);
    }
}
