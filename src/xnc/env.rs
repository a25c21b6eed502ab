//! Per-program decode environment: variables, tools and machining extents.

use std::collections::HashMap;
use tracing::warn;

use super::expr;
use super::record::Record;

/// Decode environment scoped to one program.
///
/// Built by two scans of the record stream: variables first, then tool
/// declarations and the `program` extents (whose values resolve through the
/// variable table like any other operand).
#[derive(Debug, Default)]
pub struct ProgramEnv {
    vars: HashMap<String, f64>,
    tools: HashMap<String, f64>,
    /// Machining-frame X extent from the `program` record.
    pub dx: Option<f64>,
    /// Machining-frame Y extent.
    pub dy: Option<f64>,
    /// Machining-frame Z extent (panel thickness).
    pub dz: Option<f64>,
}

impl ProgramEnv {
    /// Scan `var`, `tool` and `program` records into an environment.
    ///
    /// A variable whose expression cannot be evaluated is omitted with a
    /// warning; references to it later fall back to literal parsing.
    pub fn build(records: &[Record<'_>], warnings: &mut Vec<String>) -> Self {
        let mut env = Self::default();

        for record in records.iter().filter(|r| r.keyword == "var") {
            let Some(name) = record.attr("name") else {
                continue;
            };
            let Some(raw_expr) = record.attr("expr") else {
                continue;
            };
            match expr::eval(raw_expr) {
                Some(value) => {
                    env.vars.insert(name.to_string(), value);
                }
                None => {
                    let message =
                        format!("variable '{}' has unevaluable expression '{}'", name, raw_expr);
                    warn!("{}", message);
                    warnings.push(message);
                }
            }
        }

        for record in records {
            match record.keyword {
                "tool" => {
                    if let (Some(name), Some(raw_d)) = (record.attr("name"), record.attr("d")) {
                        if let Some(diameter) = env.resolve(raw_d) {
                            env.tools.insert(name.to_string(), diameter);
                        }
                    }
                }
                "program" => {
                    env.dx = record.attr("dx").and_then(|raw| env.resolve(raw));
                    env.dy = record.attr("dy").and_then(|raw| env.resolve(raw));
                    env.dz = record.attr("dz").and_then(|raw| env.resolve(raw));
                }
                _ => {}
            }
        }

        env
    }

    /// Resolve a raw attribute value: variable lookup first, then literal
    /// parse. Every positional field of the mini-language goes through here,
    /// so decoders never need to know which form was used.
    pub fn resolve(&self, raw: &str) -> Option<f64> {
        let trimmed = raw.trim();
        if let Some(value) = self.vars.get(trimmed) {
            return Some(*value);
        }
        trimmed.parse().ok().filter(|value: &f64| value.is_finite())
    }

    /// Diameter of a declared tool.
    pub fn tool_diameter(&self, name: &str) -> Option<f64> {
        self.tools.get(name).copied()
    }
}
