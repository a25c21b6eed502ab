//! Glue-up (blank lamination) metadata.

use serde::{Deserialize, Serialize};

/// How a part participates in a glue-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GlueType {
    /// The blank is its own pair; two repeats yield one output piece.
    #[serde(rename = "self")]
    SelfPair,
    /// A dependent piece with no independent output.
    #[serde(rename = "secondary")]
    Secondary,
    /// Framed by companion parts.
    #[serde(rename = "perim")]
    Perimeter,
}

impl GlueType {
    /// Parse the export's type token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "self" => Some(GlueType::SelfPair),
            "secondary" => Some(GlueType::Secondary),
            "perim" => Some(GlueType::Perimeter),
            _ => None,
        }
    }

    /// Output-piece count for a part with the given repeat count.
    pub fn out_count(self, repeat_count: u32) -> u32 {
        match self {
            GlueType::SelfPair => repeat_count / 2,
            GlueType::Secondary => 0,
            GlueType::Perimeter => repeat_count,
        }
    }
}

/// Glue-up descriptor for one part.
///
/// The part's own edge-band ids are zeroed when a glue-up is declared; the
/// resolved ids live here as absolute edge references of the pre-glue-up
/// blank instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlueUp {
    /// Glue-up participation type.
    pub glue_type: GlueType,
    /// Number of output pieces this part contributes.
    pub out_count: u32,
    /// Absolute L1 edge material id of the blank.
    pub abs_l1: u32,
    /// Absolute L2 edge material id of the blank.
    pub abs_l2: u32,
    /// Absolute W1 edge material id of the blank.
    pub abs_w1: u32,
    /// Absolute W2 edge material id of the blank.
    pub abs_w2: u32,
    /// Companion part ids (perimeter type only).
    pub companions: Vec<u32>,
}
