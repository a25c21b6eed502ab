//! Notch/groove decoder.
//!
//! Groove records carry two endpoints. The orientation comes from a
//! coincident-coordinate test on the rounded endpoints: equal x means the
//! groove runs along the width axis, equal y along the length axis. Anything
//! else is non-linear for this model and is skipped with a warning.

use tracing::warn;

use super::env::ProgramEnv;
use super::record::Record;
use super::Side;
use crate::config::float_cmp::approx_eq;
use crate::model::{NotchSegment, Part};

/// Decode all groove records of one program into the part's notch list.
pub fn decode_notches(
    records: &[Record<'_>],
    env: &ProgramEnv,
    part: &mut Part,
    side: Side,
    warnings: &mut Vec<String>,
) {
    for record in records.iter().filter(|r| r.keyword == "gr") {
        let endpoints = ["x1", "y1", "x2", "y2"]
            .map(|key| record.attr(key).and_then(|raw| env.resolve(raw)));
        let [Some(x1), Some(y1), Some(x2), Some(y2)] = endpoints else {
            push_warning(
                warnings,
                format!(
                    "part {}: groove record has unresolvable endpoints, record dropped",
                    part.pos
                ),
            );
            continue;
        };

        let Some(depth) = record.attr("dp").and_then(|raw| env.resolve(raw)) else {
            push_warning(
                warnings,
                format!("part {}: groove record has unresolvable depth, record dropped", part.pos),
            );
            continue;
        };

        let tool_name = record.attr("name").unwrap_or("");
        let width = match env.tool_diameter(tool_name) {
            Some(diameter) => diameter,
            None => {
                push_warning(
                    warnings,
                    format!(
                        "part {}: groove tool '{}' not declared, width set to 0",
                        part.pos, tool_name
                    ),
                );
                0.0
            }
        };

        // Integer-unit rounding before the coincidence test; the export's
        // endpoint coordinates wobble below that resolution.
        let (rx1, ry1) = (x1.round(), y1.round());
        let (rx2, ry2) = (x2.round(), y2.round());

        let face = side == Side::Front;

        let segment = if approx_eq(rx1, rx2) {
            // Runs along the local y axis: oriented by width.
            NotchSegment::from_centerline(depth, rx1, width, face, false)
        } else if approx_eq(ry1, ry2) {
            // Runs along the local x axis: oriented by length.
            NotchSegment::from_centerline(depth, ry1, width, face, true)
        } else {
            push_warning(
                warnings,
                format!(
                    "part {}: groove ({}, {})-({}, {}) is not axis-parallel, record dropped",
                    part.pos, x1, y1, x2, y2
                ),
            );
            continue;
        };

        part.notches.push(segment);
        part.is_notch = true;
    }
}

fn push_warning(warnings: &mut Vec<String>, message: String) {
    warn!("{}", message);
    warnings.push(message);
}
