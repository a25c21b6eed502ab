//! xnc-import - Import panel-cutting project exports into a part catalog.
//!
//! This library decodes the XML export of a panel-cutting/optimization tool
//! into a normalized catalog of manufactured parts enriched with machining
//! geometry: drilled holes, notches/grooves, CNC toolpaths and
//! edge-band/glue-up metadata. The heart of it is the decoder for the "XNC"
//! mini-language embedded in machining operations.
//!
//! # Example
//!
//! ```no_run
//! use xnc_import::import_project_file;
//! use std::path::Path;
//!
//! let report = import_project_file(Path::new("order.project")).unwrap();
//! for part in report.parts.iter() {
//!     println!("{}: {} holes", part.pos, part.drills.total_count());
//! }
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod xnc;

// Re-exports for convenience
pub use error::{ImportError, Result};
pub use model::{
    CncAction, DrillCollection, DrillPoint, Face, GlueType, GlueUp, GoodsRegistry, GoodsSync,
    NotchSegment, Part, PartCatalog,
};
pub use parser::{import_document, parse_document, ImportReport};
pub use xnc::Side;

use std::path::Path;

/// Import a project export from a string.
///
/// Fatal errors are malformed markup or a wrong root element; everything
/// recoverable ends up in the report's warning list instead.
pub fn import_project_str(text: &str) -> Result<ImportReport> {
    let doc = parse_document(text)?;
    Ok(import_document(&doc))
}

/// Import a project export from a file.
pub fn import_project_file(path: &Path) -> Result<ImportReport> {
    if !path.exists() {
        return Err(ImportError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Err(ImportError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    import_project_str(&content)
}
