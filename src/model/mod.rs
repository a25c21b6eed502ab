//! Data model for the decoded part catalog.

mod cnc;
mod drill;
mod glue;
mod goods;
mod notch;
mod part;

pub use cnc::CncAction;
pub use drill::{DrillCollection, DrillPoint, Face};
pub use glue::{GlueType, GlueUp};
pub use goods::{GoodsRegistry, GoodsSync};
pub use notch::NotchSegment;
pub use part::{Part, PartCatalog};
