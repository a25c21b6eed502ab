//! Drill face decoder.
//!
//! Drill records are grouped into face buckets. Each bucket record carries
//! exactly the two free coordinates of its face; the third coordinate is
//! fixed by the face rule (0 or the part's span in that axis).

use tracing::warn;

use super::env::ProgramEnv;
use super::record::Record;
use super::Side;
use crate::model::{DrillPoint, Face, Part};

/// Decode all drill bucket records of one program into the part's holes.
pub fn decode_drills(
    records: &[Record<'_>],
    env: &ProgramEnv,
    part: &mut Part,
    side: Side,
    warnings: &mut Vec<String>,
) {
    let span_x = env.dx.unwrap_or(part.length);
    let span_y = env.dy.unwrap_or(part.width);

    for record in records {
        let face = match record.keyword {
            // The face bucket is front or rear depending on which side the
            // operation machines.
            "bf" => match side {
                Side::Front => Face::Front,
                Side::Rear => Face::Rear,
            },
            "bl" => Face::EdgeW1,
            "br" => Face::EdgeW2,
            "bt" => Face::EdgeL1,
            "bb" => Face::EdgeL2,
            _ => continue,
        };

        let coords = match face {
            Face::Front | Face::Rear => resolve_pair(record, env, "x", "y")
                .map(|(x, y)| (x, y, 0.0)),
            Face::EdgeW1 => resolve_pair(record, env, "y", "z").map(|(y, z)| (0.0, y, z)),
            Face::EdgeW2 => resolve_pair(record, env, "y", "z").map(|(y, z)| (span_x, y, z)),
            Face::EdgeL1 => resolve_pair(record, env, "x", "z").map(|(x, z)| (x, 0.0, z)),
            Face::EdgeL2 => resolve_pair(record, env, "x", "z").map(|(x, z)| (x, span_y, z)),
        };

        let Some((x, y, z)) = coords else {
            push_warning(
                warnings,
                format!(
                    "part {}: drill record '{}' has unresolvable coordinates, record dropped",
                    part.pos, record.keyword
                ),
            );
            continue;
        };

        let Some(depth) = record.attr("dp").and_then(|raw| env.resolve(raw)) else {
            push_warning(
                warnings,
                format!(
                    "part {}: drill record '{}' has unresolvable depth, record dropped",
                    part.pos, record.keyword
                ),
            );
            continue;
        };

        let tool_name = record.attr("name").unwrap_or("");
        let diameter = match env.tool_diameter(tool_name) {
            Some(diameter) => diameter,
            None => {
                push_warning(
                    warnings,
                    format!(
                        "part {}: drill tool '{}' not declared, diameter set to 0",
                        part.pos, tool_name
                    ),
                );
                0.0
            }
        };

        part.drills.add(DrillPoint::new(face, x, y, z, depth, diameter));
        part.is_drill = true;
    }
}

/// Resolve the two free coordinates of a bucket record.
fn resolve_pair(
    record: &Record<'_>,
    env: &ProgramEnv,
    first: &str,
    second: &str,
) -> Option<(f64, f64)> {
    let a = record.attr(first).and_then(|raw| env.resolve(raw))?;
    let b = record.attr(second).and_then(|raw| env.resolve(raw))?;
    Some((a, b))
}

fn push_warning(warnings: &mut Vec<String>, message: String) {
    warn!("{}", message);
    warnings.push(message);
}
