//! Integration tests over fixture project exports.
//!
//! These exercise the full import pipeline: document walk, registry and
//! edge-band resolution, and all three program decoders, asserting the
//! catalog-level properties downstream consumers rely on.

use pretty_assertions::assert_eq;
use std::path::Path;
use xnc_import::{import_project_file, Face, GlueType, ImportReport, Part};

/// Fixture directory for integration tests
const FIXTURE_DIR: &str = "tests/fixtures";

fn import_fixture(name: &str) -> ImportReport {
    let path = Path::new(FIXTURE_DIR).join(name);
    import_project_file(&path).unwrap_or_else(|e| panic!("failed to import {}: {}", name, e))
}

/// Every numeric field of every drill point must be a concrete number.
fn assert_no_nan_drills(part: &Part) {
    for item in part.drills.items() {
        for (field, value) in [
            ("x", item.x),
            ("y", item.y),
            ("z", item.z),
            ("depth", item.depth),
            ("diameter", item.diameter),
            ("rep_dx", item.rep_dx),
            ("rep_dy", item.rep_dy),
            ("direction_x", item.direction_x),
            ("direction_y", item.direction_y),
            ("direction_z", item.direction_z),
        ] {
            assert!(
                value.is_finite(),
                "part {}: drill field '{}' is not finite",
                part.pos,
                field
            );
        }
    }
}

/// Flags must agree with the geometry collections, and the drill histogram
/// must stay consistent with the item list.
fn assert_catalog_invariants(report: &ImportReport) {
    for part in report.parts.iter() {
        assert_eq!(
            part.is_drill,
            part.drills.total_count() > 0,
            "part {}: isDrill flag out of sync",
            part.pos
        );
        assert_eq!(
            part.is_notch,
            !part.notches.is_empty(),
            "part {}: isNotch flag out of sync",
            part.pos
        );
        assert_eq!(part.drills.total_count() as usize, part.drills.items().len());
        let histogram_sum: u32 = part.drills.histogram().map(|(_, count)| count).sum();
        assert_eq!(part.drills.total_count(), histogram_sum);
        assert_no_nan_drills(part);
    }
}

// ==================== Catalog shape ====================

#[test]
fn test01_catalog_and_goods_sizes() {
    let report = import_fixture("test01.project");

    assert_eq!(report.parts.len(), 80);
    assert_eq!(report.goods.len(), 7);
    assert_catalog_invariants(&report);
}

#[test]
fn test02_catalog_and_goods_sizes() {
    let report = import_fixture("test02.project");

    assert_eq!(report.parts.len(), 4);
    assert_eq!(report.goods.len(), 3);
    assert_catalog_invariants(&report);
}

#[test]
fn single_part_document_imports() {
    let report = import_fixture("test03.project");
    assert_eq!(report.parts.len(), 1);
    assert_eq!(report.part(1).unwrap().gid, 2);
}

#[test]
fn single_item_import() {
    let report = import_fixture("test05.project");
    assert_eq!(report.parts.len(), 1);
}

#[test]
fn empty_cut_operation_is_harmless() {
    let report = import_fixture("test06.project");

    assert_eq!(report.parts.len(), 60);
    assert!(report.warnings.is_empty(), "warnings: {:?}", report.warnings);
    // The second, non-empty cut operation still resolves every part.
    assert!(report.parts.iter().all(|part| part.gid == 3));
}

#[test]
fn every_part_resolves_a_goods_id() {
    let report = import_fixture("test07.project");

    assert_eq!(report.parts.len(), 3);
    for part in report.parts.iter() {
        assert!(part.gid > 0, "part {} has unresolved gid", part.pos);
    }
    assert_eq!(report.part(3).unwrap().gid, 22);
}

// ==================== CNC toolpaths ====================

#[test]
fn cnc_parts_have_toolpaths() {
    for fixture in ["test01.project", "test02.project"] {
        let report = import_fixture(fixture);
        for part in report.parts.iter() {
            if part.is_cnc {
                assert!(
                    !part.actions.is_empty(),
                    "{}: part {} flagged CNC without actions",
                    fixture,
                    part.pos
                );
            }
        }
    }
}

#[test]
fn unsupported_rounding_action_warns_but_keeps_the_part() {
    let report = import_fixture("test02.project");

    let door = report.part(3).unwrap();
    assert!(door.is_cnc);
    // ms + ml + mac + ml decode; the trailing mf does not.
    assert_eq!(door.actions.len(), 4);
    assert!(report.warnings.iter().any(|w| w.contains("'mf'")));
}

// ==================== Drills ====================

#[test]
fn drilled_parts_have_holes() {
    for fixture in ["test01.project", "test02.project", "test04.project"] {
        let report = import_fixture(fixture);
        for part in report.parts.iter() {
            if part.is_drill {
                assert!(
                    part.drills.total_count() > 0,
                    "{}: part {} flagged drilled without holes",
                    fixture,
                    part.pos
                );
            }
        }
    }
}

#[test]
fn edge_drills_sit_on_face_planes() {
    let report = import_fixture("test01.project");
    let part = report.part(10).unwrap();

    assert_eq!(part.drills.total_count(), 5);
    let items = part.drills.items();
    // Variable-resolved depth on the front-face holes.
    assert_eq!(items[0].depth, 12.0);
    // Left edge at x=0, right edge at the program's dx extent.
    let left = items.iter().find(|p| p.face == Face::EdgeW1).unwrap();
    assert_eq!(left.x, 0.0);
    let right = items.iter().find(|p| p.face == Face::EdgeW2).unwrap();
    assert_eq!(right.x, 450.0);
}

#[test]
fn drill_side_selected_by_operation() {
    let report = import_fixture("test04.project");
    let part = report.part(2).unwrap();

    assert!(part.is_drill);
    assert_eq!(part.drills.total_count(), 7);
    assert_eq!(part.drills.count_for_diameter(8.0), 3);
    // The rear-side operation contributes the last holes.
    let seventh = &part.drills.items()[6];
    assert_eq!(seventh.face, Face::Rear);
    assert_eq!(seventh.face.code(), 5);
}

// ==================== Notches ====================

#[test]
fn notch_orientation_follows_the_constant_coordinate() {
    let report = import_fixture("test01.project");
    let part = report.part(4).unwrap();

    assert!(part.is_notch);
    assert_eq!(part.notches.len(), 2);
    for segment in &part.notches {
        assert!(segment.by_length);
    }
}

#[test]
fn notch_indent_is_corrected_to_the_near_edge() {
    let report = import_fixture("test01.project");
    let part = report.part(4).unwrap();

    // Tool centerlines 15 and 132 with an 8mm tool.
    assert_eq!(part.notches[0].indent, 11.0);
    assert_eq!(part.notches[1].indent, 128.0);
}

#[test]
fn notch_face_differentiates_part_sides() {
    let report = import_fixture("test04.project");
    let part = report.part(2).unwrap();

    assert!(part.is_notch);
    assert_eq!(part.notches.len(), 2);
    assert!(part.notches[0].face);
    assert!(!part.notches[1].face);
}

// ==================== Glue-ups ====================

#[test]
fn glue_up_descriptors() {
    let report = import_fixture("test04.project");

    let blank = report.part(1).unwrap();
    assert!(blank.is_glue);
    let glue = blank.glue_up.as_ref().unwrap();
    assert_eq!(glue.glue_type, GlueType::SelfPair);
    assert_eq!(glue.out_count, 1);

    let core = report.part(4).unwrap();
    assert!(core.is_glue);
    let glue = core.glue_up.as_ref().unwrap();
    assert_eq!(glue.glue_type, GlueType::Secondary);
    assert_eq!(glue.out_count, 0);

    let frame = report.part(5).unwrap();
    assert!(frame.is_glue);
    let glue = frame.glue_up.as_ref().unwrap();
    assert_eq!(glue.glue_type, GlueType::Perimeter);
    assert_eq!(glue.out_count, 1);
    assert_eq!(glue.abs_l1, 7);
    assert!(!glue.companions.is_empty());
    // The logical part itself is unbanded once the blank owns the edges.
    assert_eq!(frame.edge_l1, 0);
}

// ==================== Data quality ====================

#[test]
fn no_drill_field_is_nan_on_any_fixture() {
    for fixture in [
        "test01.project",
        "test02.project",
        "test03.project",
        "test04.project",
    ] {
        let report = import_fixture(fixture);
        for part in report.parts.iter() {
            assert_no_nan_drills(part);
        }
    }
}

#[test]
fn import_is_deterministic() {
    let first = import_fixture("test01.project");
    let second = import_fixture("test01.project");

    let first_json = serde_json::to_string(&first).unwrap();
    let second_json = serde_json::to_string(&second).unwrap();
    assert_eq!(first_json, second_json);
}
