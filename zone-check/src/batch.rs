//! Validation d'un lot de fichiers en parallèle

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use rayon::prelude::*;
use tracing::{debug, warn};
use zone_boundary::{loader, validate_polygon, ValidationResult, ZoneMetrics, ZoneRules};

use crate::fingerprint::boundary_fingerprint;
use crate::input::{read_zones, ZoneCandidate};
use crate::report::{BatchReport, ZoneOutcome};
use crate::wkt::to_ewkt;

/// Valide une zone candidate et calcule ses métriques
pub fn check_zone(candidate: &ZoneCandidate, rules: &ZoneRules) -> ZoneOutcome {
    let source = candidate.source.display().to_string();

    match loader::load(&candidate.geometry) {
        Ok(polygon) => {
            let result = validate_polygon(&polygon, rules);
            let metrics = ZoneMetrics::compute(&polygon).ok();
            ZoneOutcome {
                source,
                zone_id: candidate.zone_id.clone(),
                result,
                metrics,
                fingerprint: Some(boundary_fingerprint(&polygon)),
            }
        }
        Err(e) => {
            debug!(zone_id = %candidate.zone_id, error = %e, "Unreadable zone geometry");
            ZoneOutcome {
                source,
                zone_id: candidate.zone_id.clone(),
                result: ValidationResult::rejected(format!("Invalid geometry: {}", e)),
                metrics: None,
                fingerprint: None,
            }
        }
    }
}

/// Valide toutes les zones d'un fichier
pub fn check_file(path: &Path, rules: &ZoneRules) -> Result<Vec<ZoneOutcome>> {
    let zones = read_zones(path)?;
    debug!(path = %path.display(), zones = zones.len(), "File loaded");
    Ok(zones.iter().map(|z| check_zone(z, rules)).collect())
}

/// Valide un lot de fichiers (un fichier par tâche rayon)
pub fn run_batch(files: &[PathBuf], rules: &ZoneRules) -> BatchReport {
    let start = Instant::now();

    let outcomes: Vec<(PathBuf, Result<Vec<ZoneOutcome>>)> = files
        .par_iter()
        .map(|path| (path.clone(), check_file(path, rules)))
        .collect();

    let mut report = BatchReport::default();
    for (path, outcome) in outcomes {
        match outcome {
            Ok(zones) => {
                report.record_file();
                for zone in zones {
                    report.record_zone(zone);
                }
            }
            Err(e) => {
                warn!("Failed to read {}: {:#}", path.display(), e);
                report.record_failure(&path.display().to_string(), &format!("{:#}", e));
            }
        }
    }

    report.set_duration(start.elapsed());
    report.finalize();
    report
}

/// Ligne d'export `zone_id|area_km2|fingerprint|EWKT` pour une zone valide
///
/// Retourne `Ok(None)` si la zone est illisible ou invalide.
pub fn export_row(candidate: &ZoneCandidate, rules: &ZoneRules, srid: u32) -> Result<Option<String>> {
    let Ok(polygon) = loader::load(&candidate.geometry) else {
        return Ok(None);
    };

    if !validate_polygon(&polygon, rules).is_valid {
        return Ok(None);
    }

    let area = zone_boundary::metrics::area_km2(&polygon)?;
    let ewkt = to_ewkt(&polygon, srid)?;

    Ok(Some(format!(
        "{}|{:.6}|{}|{}",
        candidate.zone_id.replace('|', "_"),
        area,
        boundary_fingerprint(&polygon),
        ewkt
    )))
}
