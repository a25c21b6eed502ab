//! Export document parsing and the import pipeline.

mod document;
mod project;

pub use document::{
    parse_document, GoodKind, GoodNode, OperationKind, OperationNode, PartNode, ProjectDoc,
};
pub use project::{import_document, ImportReport};
