//! Decoder for the embedded XNC machining mini-language.
//!
//! A program is attached to a machining operation as a single attribute
//! string. Three independent decoders (path actions, face-bucketed drills,
//! grooves) walk the same record stream, all resolving their numeric fields
//! through one shared per-program environment of variables and tools.

mod actions;
mod drills;
mod env;
mod expr;
mod notches;
mod record;

pub use env::ProgramEnv;
pub use record::{split_records, Record};

use serde::{Deserialize, Serialize};

use crate::model::Part;

/// Which physical side of the part an operation machines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Side {
    /// Front face (export side indicator 1).
    #[default]
    Front,
    /// Rear face (export side indicator 2).
    Rear,
}

impl Side {
    /// Parse the export's side indicator; anything but 2 machines the front.
    pub fn from_indicator(raw: &str) -> Self {
        if raw.trim() == "2" {
            Side::Rear
        } else {
            Side::Front
        }
    }
}

/// Decode one program into the part's geometry collections.
///
/// Never fails: malformed or unsupported records are reported through
/// `warnings` and decoding continues with the next record.
pub fn decode_program(program: &str, side: Side, part: &mut Part, warnings: &mut Vec<String>) {
    let records = split_records(program);
    let env = ProgramEnv::build(&records, warnings);

    actions::decode_actions(&records, &env, part, warnings);
    drills::decode_drills(&records, &env, part, side, warnings);
    notches::decode_notches(&records, &env, part, side, warnings);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Face, Part};

    #[test]
    fn side_indicator_parsing() {
        assert_eq!(Side::from_indicator("1"), Side::Front);
        assert_eq!(Side::from_indicator("2"), Side::Rear);
        assert_eq!(Side::from_indicator(""), Side::Front);
    }

    #[test]
    fn one_program_feeds_all_three_decoders() {
        let program = concat!(
            r#"<program dx="800" dy="600" dz="18"/>"#,
            r#"<tool name="t8" d="8"/><var name="gl" expr="18 / 2"/>"#,
            r#"<ms x="0" y="0" c="0" dp="gl"/><ml x="800" y="0"/>"#,
            r#"<bf x="100" y="50" dp="12" name="t8"/>"#,
            r#"<gr x1="0" y1="15" x2="800" y2="15" dp="8" name="t8"/>"#,
        );
        let mut part = Part::new(7, "", "");
        let mut warnings = Vec::new();
        decode_program(program, Side::Front, &mut part, &mut warnings);

        assert!(warnings.is_empty());
        assert!(part.is_cnc && part.is_drill && part.is_notch);
        assert_eq!(part.actions.len(), 2);
        assert_eq!(part.actions[0].depth(), 9.0);
        assert_eq!(part.drills.total_count(), 1);
        assert_eq!(part.drills.items()[0].face, Face::Front);
        assert_eq!(part.notches.len(), 1);
    }
}
