//! Path action decoder.
//!
//! Walks a program's action records in order and appends toolpath actions to
//! the part. Path center and depth are running state: a record that omits
//! `c` or `dp` reuses the most recent values seen, scoped to one program.

use tracing::warn;

use super::env::ProgramEnv;
use super::record::Record;
use crate::model::{CncAction, Part};

/// Decode all path actions of one program into the part's toolpath.
pub fn decode_actions(
    records: &[Record<'_>],
    env: &ProgramEnv,
    part: &mut Part,
    warnings: &mut Vec<String>,
) {
    let mut state = PathState::default();

    for record in records {
        match record.keyword {
            "ms" => {
                part.is_cnc = true;
                if let Some(action) = decode_start(record, env, &mut state, part.pos, warnings) {
                    part.actions.push(action);
                }
            }
            "ml" => {
                part.is_cnc = true;
                if let Some(action) = decode_line(record, env, &mut state, part.pos, warnings) {
                    part.actions.push(action);
                }
            }
            "ma" => {
                part.is_cnc = true;
                if let Some(action) = decode_arc(record, env, &mut state, part.pos, warnings) {
                    part.actions.push(action);
                }
            }
            "mac" => {
                part.is_cnc = true;
                if let Some(action) = decode_center_arc(record, env, &mut state, part.pos, warnings)
                {
                    part.actions.push(action);
                }
            }
            "mf" | "ma3p" => {
                // Recognized but unsupported: still marks the part as CNC.
                part.is_cnc = true;
                push_warning(
                    warnings,
                    format!(
                        "part {}: unsupported path action '{}' skipped",
                        part.pos, record.keyword
                    ),
                );
            }
            _ => {}
        }
    }
}

/// Running path state carried across actions.
#[derive(Debug, Default)]
struct PathState {
    center: f64,
    depth: f64,
}

impl PathState {
    /// Take over any restated `c`/`dp` values before a record is decoded.
    fn update_from(&mut self, record: &Record<'_>, env: &ProgramEnv) {
        if let Some(center) = record.attr("c").and_then(|raw| env.resolve(raw)) {
            self.center = center;
        }
        if let Some(depth) = record.attr("dp").and_then(|raw| env.resolve(raw)) {
            self.depth = depth;
        }
    }
}

fn decode_start(
    record: &Record<'_>,
    env: &ProgramEnv,
    state: &mut PathState,
    pos: u32,
    warnings: &mut Vec<String>,
) -> Option<CncAction> {
    state.update_from(record, env);
    let x = required(record, env, "x", "ms", pos, warnings)?;
    let y = required(record, env, "y", "ms", pos, warnings)?;
    let type_in = optional_code(record, env, "in");
    let type_out = optional_code(record, env, "out");

    Some(CncAction::StartPoint {
        x,
        y,
        center: state.center,
        depth: state.depth,
        type_in,
        type_out,
    })
}

fn decode_line(
    record: &Record<'_>,
    env: &ProgramEnv,
    state: &mut PathState,
    pos: u32,
    warnings: &mut Vec<String>,
) -> Option<CncAction> {
    state.update_from(record, env);
    let x = required(record, env, "x", "ml", pos, warnings)?;
    let y = required(record, env, "y", "ml", pos, warnings)?;

    Some(CncAction::Line {
        x,
        y,
        center: state.center,
        depth: state.depth,
    })
}

fn decode_arc(
    record: &Record<'_>,
    env: &ProgramEnv,
    state: &mut PathState,
    pos: u32,
    warnings: &mut Vec<String>,
) -> Option<CncAction> {
    state.update_from(record, env);
    let x = required(record, env, "x", "ma", pos, warnings)?;
    let y = required(record, env, "y", "ma", pos, warnings)?;
    let radius = required(record, env, "r", "ma", pos, warnings)?;
    let ccw = direction_flag(record, env);

    Some(CncAction::Arc {
        x,
        y,
        radius,
        ccw,
        center: state.center,
        depth: state.depth,
    })
}

fn decode_center_arc(
    record: &Record<'_>,
    env: &ProgramEnv,
    state: &mut PathState,
    pos: u32,
    warnings: &mut Vec<String>,
) -> Option<CncAction> {
    state.update_from(record, env);
    let x = required(record, env, "x", "mac", pos, warnings)?;
    let y = required(record, env, "y", "mac", pos, warnings)?;
    let cx = required(record, env, "cx", "mac", pos, warnings)?;
    let cy = required(record, env, "cy", "mac", pos, warnings)?;
    let ccw = direction_flag(record, env);

    Some(CncAction::EndPointArc {
        x,
        y,
        cx,
        cy,
        ccw,
        center: state.center,
        depth: state.depth,
    })
}

/// Resolve a required numeric field; a missing or unresolvable operand drops
/// the whole record with a warning, never yielding a NaN.
fn required(
    record: &Record<'_>,
    env: &ProgramEnv,
    key: &str,
    keyword: &str,
    pos: u32,
    warnings: &mut Vec<String>,
) -> Option<f64> {
    let Some(raw) = record.attr(key) else {
        push_warning(
            warnings,
            format!("part {}: '{}' action missing '{}', record dropped", pos, keyword, key),
        );
        return None;
    };
    let Some(value) = env.resolve(raw) else {
        push_warning(
            warnings,
            format!(
                "part {}: '{}' action has unresolvable {}='{}', record dropped",
                pos, keyword, key, raw
            ),
        );
        return None;
    };
    Some(value)
}

fn optional_code(record: &Record<'_>, env: &ProgramEnv, key: &str) -> i32 {
    record
        .attr(key)
        .and_then(|raw| env.resolve(raw))
        .map(|value| value as i32)
        .unwrap_or(0)
}

fn direction_flag(record: &Record<'_>, env: &ProgramEnv) -> bool {
    record
        .attr("dir")
        .and_then(|raw| env.resolve(raw))
        .map(|value| value != 0.0)
        .unwrap_or(false)
}

fn push_warning(warnings: &mut Vec<String>, message: String) {
    warn!("{}", message);
    warnings.push(message);
}
