//! Typed view of the parsed export document.
//!
//! The only roxmltree-aware code in the crate: one pass over the element
//! tree producing plain nodes the pipeline can walk without caring about
//! markup. Anything unrecognized is carried as `Other` and ignored later.

use roxmltree::{Document, Node};
use tracing::warn;

use crate::error::{ImportError, Result};
use crate::xnc::Side;

/// Whole export document: goods catalog plus the operation list.
#[derive(Debug, Default)]
pub struct ProjectDoc {
    pub goods: Vec<GoodNode>,
    pub operations: Vec<OperationNode>,
}

/// Kind of a `good` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoodKind {
    Sheet,
    Band,
    Product,
    Other,
}

impl GoodKind {
    fn from_type_id(type_id: &str) -> Self {
        match type_id {
            "sheet" => GoodKind::Sheet,
            "band" => GoodKind::Band,
            "product" => GoodKind::Product,
            _ => GoodKind::Other,
        }
    }
}

/// One `good` entry.
#[derive(Debug)]
pub struct GoodNode {
    pub kind: GoodKind,
    pub id: u32,
    pub name: String,
    /// Part list, populated for product goods.
    pub parts: Vec<PartNode>,
}

/// One `part` entry of a product good.
#[derive(Debug)]
pub struct PartNode {
    /// Position id, the catalog key.
    pub pos: u32,
    /// Free-text comment.
    pub name: String,
    /// Model/catalog index.
    pub code: String,
    /// Nominal length (`dl`).
    pub length: f64,
    /// Nominal width (`dw`).
    pub width: f64,
    /// Repeat count.
    pub count: u32,
    /// Edge-band operation ids parsed from `elt`/`elb`/`ell`/`elr`.
    pub edge_l1: Option<u32>,
    pub edge_l2: Option<u32>,
    pub edge_w1: Option<u32>,
    pub edge_w2: Option<u32>,
    /// Declared glue-up participation.
    pub is_glue_up: bool,
    /// Glue-up type token (`self`/`secondary`/`perim`).
    pub glue_type: Option<String>,
    /// Glue-up group id shared by companion parts.
    pub glue_group: Option<u32>,
}

/// Kind of an `operation` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// Edge-band application (`EL`).
    EdgeLine,
    /// Cut/sheet material assignment (`CS`).
    CutSheet,
    /// Embedded machining program (`XNC`).
    Xnc,
    Other,
}

impl OperationKind {
    fn from_type_id(type_id: &str) -> Self {
        match type_id {
            "EL" => OperationKind::EdgeLine,
            "CS" => OperationKind::CutSheet,
            "XNC" => OperationKind::Xnc,
            _ => OperationKind::Other,
        }
    }
}

/// One `operation` entry.
#[derive(Debug)]
pub struct OperationNode {
    pub kind: OperationKind,
    pub id: u32,
    /// Referenced material id, from the `material` child.
    pub material_id: Option<u32>,
    /// Referenced part position ids, from `part` children.
    pub part_ids: Vec<u32>,
    /// Machined side (XNC operations).
    pub side: Side,
    /// Embedded program text (XNC operations).
    pub program: String,
}

/// Parse the export text into a typed document.
///
/// This is the fatal tier: malformed markup or a wrong root element fails
/// the whole import. Individual nodes missing their id are skipped.
pub fn parse_document(text: &str) -> Result<ProjectDoc> {
    let doc = Document::parse(text)?;
    let root = doc.root_element();

    if root.tag_name().name() != "project" {
        return Err(ImportError::UnexpectedRoot {
            found: root.tag_name().name().to_string(),
        });
    }

    let mut project = ProjectDoc::default();

    for child in root.children().filter(|n| n.is_element()) {
        match child.tag_name().name() {
            "good" => {
                if let Some(good) = parse_good(&child) {
                    project.goods.push(good);
                }
            }
            "operation" => {
                if let Some(operation) = parse_operation(&child) {
                    project.operations.push(operation);
                }
            }
            _ => {}
        }
    }

    Ok(project)
}

fn parse_good(node: &Node) -> Option<GoodNode> {
    let Some(id) = attr_u32(node, "id") else {
        warn!("good entry without a numeric id skipped");
        return None;
    };

    let kind = GoodKind::from_type_id(node.attribute("typeId").unwrap_or(""));
    let parts = node
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "part")
        .filter_map(|n| parse_part(&n))
        .collect();

    Some(GoodNode {
        kind,
        id,
        name: node.attribute("name").unwrap_or("").to_string(),
        parts,
    })
}

fn parse_part(node: &Node) -> Option<PartNode> {
    let Some(pos) = attr_u32(node, "id") else {
        warn!("part entry without a numeric id skipped");
        return None;
    };

    Some(PartNode {
        pos,
        name: node.attribute("name").unwrap_or("").to_string(),
        code: node.attribute("code").unwrap_or("").to_string(),
        length: attr_f64(node, "dl").unwrap_or(0.0),
        width: attr_f64(node, "dw").unwrap_or(0.0),
        count: attr_u32(node, "count").unwrap_or(1),
        edge_l1: edge_operation_id(node, "elt"),
        edge_l2: edge_operation_id(node, "elb"),
        edge_w1: edge_operation_id(node, "ell"),
        edge_w2: edge_operation_id(node, "elr"),
        is_glue_up: node.attribute("isGlueUp") == Some("true"),
        glue_type: node.attribute("glueUpType").map(str::to_string),
        glue_group: attr_u32(node, "glueupId"),
    })
}

fn parse_operation(node: &Node) -> Option<OperationNode> {
    let Some(id) = attr_u32(node, "id") else {
        warn!("operation entry without a numeric id skipped");
        return None;
    };

    let mut material_id = None;
    let mut part_ids = Vec::new();

    for child in node.children().filter(|n| n.is_element()) {
        match child.tag_name().name() {
            "material" => material_id = attr_u32(&child, "id"),
            "part" => {
                if let Some(part_id) = attr_u32(&child, "id") {
                    part_ids.push(part_id);
                }
            }
            _ => {}
        }
    }

    Some(OperationNode {
        kind: OperationKind::from_type_id(node.attribute("typeId").unwrap_or("")),
        id,
        material_id,
        part_ids,
        side: Side::from_indicator(node.attribute("side").unwrap_or("")),
        program: node.attribute("program").unwrap_or("").to_string(),
    })
}

/// Operation id from an edge reference of the form `"...#<operationId>"`.
fn edge_operation_id(node: &Node, attr: &str) -> Option<u32> {
    let value = node.attribute(attr)?;
    value.rsplit('#').next()?.trim().parse().ok()
}

fn attr_u32(node: &Node, name: &str) -> Option<u32> {
    node.attribute(name)?.trim().parse().ok()
}

fn attr_f64(node: &Node, name: &str) -> Option<f64> {
    node.attribute(name)?.trim().parse().ok()
}
