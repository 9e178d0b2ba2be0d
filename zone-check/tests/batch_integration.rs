//! Tests d'intégration du lot sur les fixtures de zone-boundary
//!
//! Exécution:
//! ```bash
//! cargo test -p zone-check --test batch_integration
//! ```

use std::path::PathBuf;

use zone_boundary::ZoneRules;
use zone_check::input::read_zones;
use zone_check::{check_file, export_row, run_batch, BatchStatus};

fn fixtures(kind: &str) -> Vec<PathBuf> {
    let pattern = format!(
        "{}/../zone-boundary/tests/fixtures/{}/*.geojson",
        env!("CARGO_MANIFEST_DIR"),
        kind
    );
    let mut files: Vec<PathBuf> = glob::glob(&pattern)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .collect();
    files.sort();
    files
}

#[test]
fn test_batch_over_fixtures() {
    let mut files = fixtures("valid");
    files.extend(fixtures("invalid"));
    assert_eq!(files.len(), 7, "fixtures not found");

    let report = run_batch(&files, &ZoneRules::default());
    println!("{}", report.summary());

    assert_eq!(report.files_processed, 7);
    assert_eq!(report.zones_checked, 7);
    assert_eq!(report.zones_valid, 3);
    assert_eq!(report.zones_invalid, 4);
    assert_eq!(report.status, BatchStatus::PartialSuccess);
    assert!(report.failures.is_empty());
    assert!(report.duplicates.is_empty());

    let bowtie = report
        .zones
        .iter()
        .find(|z| z.zone_id == "bowtie")
        .unwrap();
    assert!(bowtie.result.errors[0].contains("self-intersecting"));
}

#[test]
fn test_batch_only_valid_fixtures() {
    let report = run_batch(&fixtures("valid"), &ZoneRules::default());
    assert_eq!(report.status, BatchStatus::Success);
    assert_eq!(report.zones_valid, 3);

    let lakeside = report
        .zones
        .iter()
        .find(|z| z.zone_id == "lakeside_with_hole")
        .unwrap();
    assert_eq!(lakeside.result.warnings.len(), 1);
    assert!(lakeside.result.warnings[0].contains("holes"));
}

#[test]
fn test_feature_id_is_kept() {
    let path = fixtures("valid")
        .into_iter()
        .find(|p| p.ends_with("struga_center.geojson"))
        .unwrap();

    let outcomes = check_file(&path, &ZoneRules::default()).unwrap();
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].zone_id, "struga-center");
    assert!(outcomes[0].result.is_valid);
}

#[test]
fn test_export_skips_invalid_fixtures() {
    let rules = ZoneRules::default();
    let mut rows = Vec::new();

    for kind in ["valid", "invalid"] {
        for path in fixtures(kind) {
            for zone in read_zones(&path).unwrap() {
                if let Some(row) = export_row(&zone, &rules, 4326).unwrap() {
                    rows.push(row);
                }
            }
        }
    }

    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.contains("SRID=4326;POLYGON((")));
}
