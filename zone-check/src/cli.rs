//! Définition et implémentation des commandes CLI
//!
//! - `validate` : verdict par zone, rapport console ou JSON
//! - `metrics` : surface / périmètre / compacité, zones invalides comprises
//! - `export` : lignes EWKT des zones valides uniquement

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use tracing::{info, warn};
use zone_boundary::{loader, ZoneMetrics};
use zone_check::input::{collect_files, read_zones};
use zone_check::{config, export_row, run_batch};

#[derive(Subcommand)]
pub enum Commands {
    /// Validate zone boundaries from GeoJSON files
    Validate {
        /// Path to a GeoJSON file or a directory
        #[arg(short, long)]
        path: PathBuf,

        /// Rules preset name (struga/strict) or path to a JSON rules file
        #[arg(long, default_value = "struga")]
        rules: String,

        /// Save the full report as JSON
        #[arg(long)]
        report: Option<PathBuf>,

        /// Print the report as JSON on stdout instead of the console summary
        #[arg(long)]
        json: bool,
    },

    /// Print area, perimeter and compactness of every zone (invalid ones included)
    Metrics {
        /// Path to a GeoJSON file or a directory
        #[arg(short, long)]
        path: PathBuf,
    },

    /// Export valid zones as `zone_id|area_km2|fingerprint|EWKT` rows
    Export {
        /// Path to a GeoJSON file or a directory
        #[arg(short, long)]
        path: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// SRID written in the EWKT prefix (coordinates are not reprojected)
        #[arg(long, default_value_t = 4326)]
        srid: u32,

        /// Rules preset name (struga/strict) or path to a JSON rules file
        #[arg(long, default_value = "struga")]
        rules: String,
    },
}

/// Exécute la commande validate, retourne vrai si toutes les zones sont valides
pub fn cmd_validate(path: &Path, rules_source: &str, report_path: Option<&Path>, json: bool) -> Result<bool> {
    let rules = config::resolve(rules_source)?;
    let files = collect_inputs(path)?;

    info!(files = files.len(), rules = rules_source, "Starting validation");

    let report = run_batch(&files, &rules);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.display();
    }

    if let Some(report_path) = report_path {
        report
            .save_to_file(report_path)
            .with_context(|| format!("Cannot write report to {}", report_path.display()))?;
        info!(path = %report_path.display(), "Report saved");
    }

    info!("{}", report.summary());

    Ok(report.zones_invalid == 0 && report.failures.is_empty())
}

/// Exécute la commande metrics
pub fn cmd_metrics(path: &Path) -> Result<()> {
    let files = collect_inputs(path)?;

    println!(
        "{:<32} {:>12} {:>12} {:>12} {:>8}",
        "zone", "area_km2", "perimeter_km", "compactness", "vertices"
    );

    for file in &files {
        let zones = match read_zones(file) {
            Ok(zones) => zones,
            Err(e) => {
                warn!("Skipping {}: {:#}", file.display(), e);
                continue;
            }
        };

        for zone in zones {
            let metrics = loader::load(&zone.geometry)
                .ok()
                .and_then(|polygon| ZoneMetrics::compute(&polygon).ok());
            println!("{}", metrics_row(&zone.zone_id, metrics.as_ref()));
        }
    }

    Ok(())
}

/// Ligne du tableau `metrics`, `n/a` si la zone est illisible
fn metrics_row(zone_id: &str, metrics: Option<&ZoneMetrics>) -> String {
    match metrics {
        Some(m) => format!(
            "{:<32} {:>12.4} {:>12.3} {:>12} {:>8}",
            zone_id,
            m.area_km2,
            m.perimeter_km,
            m.compactness
                .map(|c| format!("{:.3}", c))
                .unwrap_or_else(|| "n/a".to_string()),
            m.vertex_count
        ),
        None => format!(
            "{:<32} {:>12} {:>12} {:>12} {:>8}",
            zone_id, "n/a", "n/a", "n/a", "n/a"
        ),
    }
}

/// Exécute la commande export
pub fn cmd_export(path: &Path, output: &Path, srid: u32, rules_source: &str) -> Result<()> {
    let rules = config::resolve(rules_source)?;
    let files = collect_inputs(path)?;

    let file = File::create(output)
        .with_context(|| format!("Failed to create file: {}", output.display()))?;
    let mut writer = BufWriter::new(file);

    let mut exported = 0usize;
    let mut skipped = 0usize;

    for file in &files {
        let zones = match read_zones(file) {
            Ok(zones) => zones,
            Err(e) => {
                warn!("Skipping {}: {:#}", file.display(), e);
                continue;
            }
        };

        for zone in &zones {
            match export_row(zone, &rules, srid)? {
                Some(row) => {
                    writeln!(writer, "{}", row)?;
                    exported += 1;
                }
                None => {
                    warn!(zone_id = %zone.zone_id, "Zone is invalid, not exported");
                    skipped += 1;
                }
            }
        }
    }

    writer.flush()?;

    println!(
        "Export complete: {} zones written to {}, {} invalid zones skipped",
        exported,
        output.display(),
        skipped
    );

    Ok(())
}

fn collect_inputs(path: &Path) -> Result<Vec<PathBuf>> {
    let files = collect_files(path)?;
    if files.is_empty() {
        anyhow::bail!("No GeoJSON files (.geojson/.json) found in {}", path.display());
    }
    Ok(files)
}
