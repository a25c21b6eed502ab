//! Import pipeline: document tree to decoded part catalog.
//!
//! Pass order is a hard dependency chain: the goods registry and edge-band
//! index are built before the part list (which resolves edge and goods ids),
//! and both exist before any machining program is decoded (the decoders look
//! parts up by position id and must find them).

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

use super::document::{GoodKind, OperationKind, OperationNode, PartNode, ProjectDoc};
use crate::model::{GlueType, GlueUp, GoodsRegistry, GoodsSync, Part, PartCatalog};
use crate::xnc;

/// Result of one import pass: the part catalog, the goods registry and every
/// non-fatal warning in emission order.
#[derive(Debug, Default, Serialize)]
pub struct ImportReport {
    pub parts: PartCatalog,
    pub goods: GoodsRegistry,
    pub warnings: Vec<String>,
}

impl ImportReport {
    /// Look up a part by position id.
    pub fn part(&self, pos: u32) -> Option<&Part> {
        self.parts.get(pos)
    }

    /// Look up a goods entry by material id.
    pub fn good(&self, material_id: u32) -> Option<&GoodsSync> {
        self.goods.get(material_id)
    }
}

/// Decode a typed document into the part catalog.
pub fn import_document(doc: &ProjectDoc) -> ImportReport {
    let mut report = ImportReport::default();

    build_goods_registry(doc, &mut report);
    let edge_index = build_edge_index(doc, &mut report.warnings);
    build_parts(doc, &edge_index, &mut report);
    assign_materials(doc, &mut report);
    decode_programs(doc, &mut report);

    debug!(
        parts = report.parts.len(),
        goods = report.goods.len(),
        warnings = report.warnings.len(),
        "import finished"
    );
    report
}

/// Pass 1: sheet/band goods into the registry.
fn build_goods_registry(doc: &ProjectDoc, report: &mut ImportReport) {
    for good in &doc.goods {
        if matches!(good.kind, GoodKind::Sheet | GoodKind::Band) {
            report.goods.insert(GoodsSync::new(good.id, good.name.clone()));
        }
    }
    debug!(goods = report.goods.len(), "goods registry built");
}

/// Pass 2: edge-band operations indexed operation-id to material-id.
fn build_edge_index(doc: &ProjectDoc, warnings: &mut Vec<String>) -> HashMap<u32, u32> {
    let mut index = HashMap::new();
    for operation in &doc.operations {
        if operation.kind != OperationKind::EdgeLine {
            continue;
        }
        match operation.material_id {
            Some(material_id) => {
                index.insert(operation.id, material_id);
            }
            None => push_warning(
                warnings,
                format!("edge operation {} has no material reference", operation.id),
            ),
        }
    }
    index
}

/// Pass 3: parts from product goods, with edge-band and glue-up resolution.
fn build_parts(doc: &ProjectDoc, edge_index: &HashMap<u32, u32>, report: &mut ImportReport) {
    // Glue-up groups, gathered while parts are created, patched afterwards.
    let mut group_members: HashMap<u32, Vec<u32>> = HashMap::new();
    let mut perimeter_parts: Vec<(u32, u32)> = Vec::new();

    for good in &doc.goods {
        if good.kind != GoodKind::Product {
            continue;
        }
        for node in &good.parts {
            let part = build_part(
                node,
                edge_index,
                &mut group_members,
                &mut perimeter_parts,
                &mut report.warnings,
            );
            report.parts.insert(part);
        }
    }

    for (pos, group) in perimeter_parts {
        let companions: Vec<u32> = group_members
            .get(&group)
            .map(|members| members.iter().copied().filter(|&p| p != pos).collect())
            .unwrap_or_default();
        if let Some(glue) = report
            .parts
            .get_mut(pos)
            .and_then(|part| part.glue_up.as_mut())
        {
            glue.companions = companions;
        }
    }
}

fn build_part(
    node: &PartNode,
    edge_index: &HashMap<u32, u32>,
    group_members: &mut HashMap<u32, Vec<u32>>,
    perimeter_parts: &mut Vec<(u32, u32)>,
    warnings: &mut Vec<String>,
) -> Part {
    let mut part = Part::new(node.pos, node.code.clone(), node.name.clone());
    part.length = node.length;
    part.width = node.width;
    part.count = node.count;
    part.edge_l1 = resolve_edge(node.pos, node.edge_l1, edge_index, warnings);
    part.edge_l2 = resolve_edge(node.pos, node.edge_l2, edge_index, warnings);
    part.edge_w1 = resolve_edge(node.pos, node.edge_w1, edge_index, warnings);
    part.edge_w2 = resolve_edge(node.pos, node.edge_w2, edge_index, warnings);

    if !node.is_glue_up {
        return part;
    }

    let Some(glue_type) = node.glue_type.as_deref().and_then(GlueType::from_token) else {
        push_warning(
            warnings,
            format!(
                "part {}: unknown glue-up type '{}', glue-up ignored",
                node.pos,
                node.glue_type.as_deref().unwrap_or("")
            ),
        );
        return part;
    };

    if let Some(group) = node.glue_group {
        group_members.entry(group).or_default().push(node.pos);
        if glue_type == GlueType::Perimeter {
            perimeter_parts.push((node.pos, group));
        }
    }

    // The resolved edge ids describe the pre-glue-up blank; the logical part
    // itself is unbanded.
    part.glue_up = Some(GlueUp {
        glue_type,
        out_count: glue_type.out_count(part.count),
        abs_l1: part.edge_l1,
        abs_l2: part.edge_l2,
        abs_w1: part.edge_w1,
        abs_w2: part.edge_w2,
        companions: Vec::new(),
    });
    part.edge_l1 = 0;
    part.edge_l2 = 0;
    part.edge_w1 = 0;
    part.edge_w2 = 0;
    part.is_glue = true;

    part
}

fn resolve_edge(
    pos: u32,
    operation_id: Option<u32>,
    edge_index: &HashMap<u32, u32>,
    warnings: &mut Vec<String>,
) -> u32 {
    let Some(operation_id) = operation_id else {
        return 0;
    };
    match edge_index.get(&operation_id) {
        Some(material_id) => *material_id,
        None => {
            push_warning(
                warnings,
                format!("part {}: edge operation {} not found, edge left unbanded", pos, operation_id),
            );
            0
        }
    }
}

/// Pass 4: cut/sheet operations assign each listed part its goods id.
fn assign_materials(doc: &ProjectDoc, report: &mut ImportReport) {
    for operation in &doc.operations {
        if operation.kind != OperationKind::CutSheet {
            continue;
        }
        // An empty part list is a normal no-op, not a warning.
        if operation.part_ids.is_empty() {
            continue;
        }
        let Some(material_id) = operation.material_id else {
            push_warning(
                &mut report.warnings,
                format!("cut operation {} has no material reference", operation.id),
            );
            continue;
        };
        if !report.goods.contains(material_id) {
            push_warning(
                &mut report.warnings,
                format!(
                    "cut operation {} references unknown material {}",
                    operation.id, material_id
                ),
            );
            continue;
        }
        for &pos in &operation.part_ids {
            match report.parts.get_mut(pos) {
                Some(part) => part.gid = material_id,
                None => push_warning(
                    &mut report.warnings,
                    format!("cut operation {} references unknown part {}", operation.id, pos),
                ),
            }
        }
    }
}

/// Pass 5: decode every machining program into its part's geometry.
fn decode_programs(doc: &ProjectDoc, report: &mut ImportReport) {
    for operation in &doc.operations {
        if operation.kind != OperationKind::Xnc {
            continue;
        }
        decode_operation(operation, report);
    }
}

fn decode_operation(operation: &OperationNode, report: &mut ImportReport) {
    for &pos in &operation.part_ids {
        let Some(part) = report.parts.get_mut(pos) else {
            push_warning(
                &mut report.warnings,
                format!(
                    "machining operation {} references unknown part {}",
                    operation.id, pos
                ),
            );
            continue;
        };
        xnc::decode_program(&operation.program, operation.side, part, &mut report.warnings);
    }
}

fn push_warning(warnings: &mut Vec<String>, message: String) {
    warn!("{}", message);
    warnings.push(message);
}

#[cfg(test)]
mod tests {
    use super::super::document::parse_document;
    use super::*;

    fn import(text: &str) -> ImportReport {
        import_document(&parse_document(text).unwrap())
    }

    #[test]
    fn registry_and_edges_resolve_before_parts() {
        let text = r#"
            <project>
              <good typeId="sheet" id="3" name="Chipboard"/>
              <good typeId="band" id="7" name="ABS 2mm"/>
              <good typeId="product" id="10" name="Cabinet">
                <part id="1" code="A-1" dl="700" dw="450" count="2" elt="band#21"/>
              </good>
              <operation typeId="EL" id="21"><material id="7"/></operation>
              <operation typeId="CS" id="22"><material id="3"/><part id="1"/></operation>
            </project>"#;
        let report = import(text);

        assert!(report.warnings.is_empty());
        assert_eq!(report.goods.len(), 2);
        let part = report.part(1).unwrap();
        assert_eq!(part.edge_l1, 7);
        assert_eq!(part.edge_l2, 0);
        assert_eq!(part.gid, 3);
    }

    #[test]
    fn missing_edge_operation_warns_and_leaves_unbanded() {
        let text = r#"
            <project>
              <good typeId="product" id="10">
                <part id="1" dl="100" dw="100" count="1" elt="band#99"/>
              </good>
            </project>"#;
        let report = import(text);

        assert_eq!(report.part(1).unwrap().edge_l1, 0);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("edge operation 99"));
    }

    #[test]
    fn empty_cut_operation_is_a_no_op() {
        let text = r#"
            <project>
              <good typeId="sheet" id="3"/>
              <good typeId="product" id="10">
                <part id="1" dl="100" dw="100" count="1"/>
              </good>
              <operation typeId="CS" id="20"><material id="3"/></operation>
            </project>"#;
        let report = import(text);

        assert!(report.warnings.is_empty());
        assert_eq!(report.part(1).unwrap().gid, 0);
    }

    #[test]
    fn glue_up_moves_edges_to_the_descriptor() {
        let text = r#"
            <project>
              <good typeId="band" id="7" name="Oak band"/>
              <good typeId="product" id="10">
                <part id="5" dl="600" dw="300" count="1" elt="band#21"
                      isGlueUp="true" glueUpType="perim" glueupId="2"/>
                <part id="6" dl="600" dw="80" count="2"
                      isGlueUp="true" glueUpType="secondary" glueupId="2"/>
              </good>
              <operation typeId="EL" id="21"><material id="7"/></operation>
            </project>"#;
        let report = import(text);

        let part = report.part(5).unwrap();
        assert!(part.is_glue);
        assert_eq!(part.edge_l1, 0);
        let glue = part.glue_up.as_ref().unwrap();
        assert_eq!(glue.glue_type, GlueType::Perimeter);
        assert_eq!(glue.abs_l1, 7);
        assert_eq!(glue.out_count, 1);
        assert_eq!(glue.companions, vec![6]);

        let secondary = report.part(6).unwrap().glue_up.as_ref().unwrap();
        assert_eq!(secondary.glue_type, GlueType::Secondary);
        assert_eq!(secondary.out_count, 0);
    }

    #[test]
    fn program_decoding_needs_an_existing_part() {
        let text = r#"
            <project>
              <good typeId="product" id="10">
                <part id="1" dl="100" dw="100" count="1"/>
              </good>
              <operation typeId="XNC" id="30" side="1" program="&lt;mf/&gt;">
                <part id="9"/>
              </operation>
            </project>"#;
        let report = import(text);

        assert!(!report.part(1).unwrap().is_cnc);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("unknown part 9"));
    }
}
