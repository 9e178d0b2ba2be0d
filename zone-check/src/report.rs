//! Rapport de validation d'un lot de limites de zone
//!
//! Collecte le verdict de chaque zone, les fichiers illisibles et les limites
//! dupliquées, puis affiche ou sauvegarde le résultat.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;
use zone_boundary::{ValidationResult, ZoneMetrics};

/// Statut global du lot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BatchStatus {
    /// Toutes les zones sont valides
    Success,
    /// Certaines zones sont invalides ou certains fichiers illisibles
    PartialSuccess,
    /// Aucune zone valide
    Failed,
}

/// Verdict d'une zone
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneOutcome {
    /// Fichier source
    pub source: String,
    /// Identifiant de la zone
    pub zone_id: String,
    /// Verdict du validateur
    #[serde(flatten)]
    pub result: ValidationResult,
    /// Métriques (absentes si la géométrie est illisible)
    pub metrics: Option<ZoneMetrics>,
    /// Empreinte de la limite (absente si la géométrie est illisible)
    pub fingerprint: Option<String>,
}

/// Fichier qui n'a pas pu être lu
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub source: String,
    pub message: String,
}

/// Rapport complet du lot
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub status: BatchStatus,
    pub duration_secs: f64,

    pub files_processed: usize,
    pub zones_checked: usize,
    pub zones_valid: usize,
    pub zones_invalid: usize,
    pub zones_with_warnings: usize,

    pub zones: Vec<ZoneOutcome>,
    pub failures: Vec<FileFailure>,

    /// Groupes de zones partageant la même limite
    pub duplicates: Vec<Vec<String>>,
}

impl Default for BatchReport {
    fn default() -> Self {
        Self {
            status: BatchStatus::Success,
            duration_secs: 0.0,
            files_processed: 0,
            zones_checked: 0,
            zones_valid: 0,
            zones_invalid: 0,
            zones_with_warnings: 0,
            zones: Vec::new(),
            failures: Vec::new(),
            duplicates: Vec::new(),
        }
    }
}

impl BatchReport {
    /// Enregistre le verdict d'une zone
    pub fn record_zone(&mut self, outcome: ZoneOutcome) {
        self.zones_checked += 1;
        if outcome.result.is_valid {
            self.zones_valid += 1;
        } else {
            self.zones_invalid += 1;
        }
        if outcome.result.has_warnings() {
            self.zones_with_warnings += 1;
        }
        self.zones.push(outcome);
    }

    /// Enregistre un fichier traité
    pub fn record_file(&mut self) {
        self.files_processed += 1;
    }

    /// Enregistre un fichier illisible
    pub fn record_failure(&mut self, source: &str, message: &str) {
        self.files_processed += 1;
        self.failures.push(FileFailure {
            source: source.to_string(),
            message: message.to_string(),
        });
    }

    /// Définit la durée du traitement
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_secs = duration.as_secs_f64();
    }

    /// Détermine le statut final et les doublons
    pub fn finalize(&mut self) {
        self.zones.sort_by(|a, b| {
            a.source
                .cmp(&b.source)
                .then_with(|| a.zone_id.cmp(&b.zone_id))
        });

        let mut by_fingerprint: HashMap<&str, Vec<String>> = HashMap::new();
        for zone in &self.zones {
            if let Some(ref fingerprint) = zone.fingerprint {
                by_fingerprint
                    .entry(fingerprint.as_str())
                    .or_default()
                    .push(zone.zone_id.clone());
            }
        }
        let mut duplicates: Vec<Vec<String>> = by_fingerprint
            .into_values()
            .filter(|ids| ids.len() > 1)
            .collect();
        duplicates.sort();
        self.duplicates = duplicates;

        let has_problems = self.zones_invalid > 0 || !self.failures.is_empty();

        self.status = if self.zones_valid == 0 && has_problems {
            BatchStatus::Failed
        } else if has_problems {
            BatchStatus::PartialSuccess
        } else {
            BatchStatus::Success
        };
    }

    /// Affiche le rapport sur la console
    pub fn display(&self) {
        println!("\n{}", "=".repeat(60));
        println!("ZONE BOUNDARY REPORT");
        println!("{}", "=".repeat(60));

        println!("\nStatus: {:?}", self.status);
        println!("Duration: {:.2}s", self.duration_secs);

        println!("\n--- SUMMARY ---");
        println!(
            "Files: {} processed, {} unreadable",
            self.files_processed,
            self.failures.len()
        );
        println!(
            "Zones: {} checked, {} valid, {} invalid, {} with warnings",
            self.zones_checked, self.zones_valid, self.zones_invalid, self.zones_with_warnings
        );

        println!("\n--- ZONES ---");
        for zone in &self.zones {
            let verdict = if zone.result.is_valid { "OK  " } else { "FAIL" };
            let area = zone
                .metrics
                .map(|m| format!("{:.4} km²", m.area_km2))
                .unwrap_or_else(|| "n/a".to_string());
            println!("  [{}] {} ({})", verdict, zone.zone_id, area);
            for e in &zone.result.errors {
                println!("      error: {}", e);
            }
            for w in &zone.result.warnings {
                println!("      warning: {}", w);
            }
        }

        if !self.duplicates.is_empty() {
            println!("\n--- DUPLICATE BOUNDARIES ({}) ---", self.duplicates.len());
            for group in &self.duplicates {
                println!("  {}", group.join(", "));
            }
        }

        if !self.failures.is_empty() {
            println!("\n--- UNREADABLE FILES ({}) ---", self.failures.len());
            for f in self.failures.iter().take(20) {
                println!("  [{}] {}", f.source, f.message);
            }
            if self.failures.len() > 20 {
                println!("  ... and {} more", self.failures.len() - 20);
            }
        }

        println!("\n{}", "=".repeat(60));
    }

    /// Sauvegarde le rapport en JSON
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Affichage compact pour le résumé
    pub fn summary(&self) -> String {
        format!(
            "{} zones: {} valid, {} invalid, {} with warnings, {} unreadable files",
            self.zones_checked,
            self.zones_valid,
            self.zones_invalid,
            self.zones_with_warnings,
            self.failures.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(id: &str, errors: &[&str], warnings: &[&str], fingerprint: Option<&str>) -> ZoneOutcome {
        ZoneOutcome {
            source: "zones.geojson".to_string(),
            zone_id: id.to_string(),
            result: ValidationResult::new(
                errors.iter().map(|s| s.to_string()).collect(),
                warnings.iter().map(|s| s.to_string()).collect(),
            ),
            metrics: None,
            fingerprint: fingerprint.map(str::to_string),
        }
    }

    #[test]
    fn test_batch_report_default() {
        let report = BatchReport::default();
        assert_eq!(report.status, BatchStatus::Success);
        assert_eq!(report.zones_checked, 0);
    }

    #[test]
    fn test_record_zone() {
        let mut report = BatchReport::default();
        report.record_zone(outcome("a", &[], &[], None));
        report.record_zone(outcome("b", &[], &["small"], None));
        report.record_zone(outcome("c", &["too small"], &[], None));

        assert_eq!(report.zones_checked, 3);
        assert_eq!(report.zones_valid, 2);
        assert_eq!(report.zones_invalid, 1);
        assert_eq!(report.zones_with_warnings, 1);
    }

    #[test]
    fn test_finalize_success() {
        let mut report = BatchReport::default();
        report.record_zone(outcome("a", &[], &["small"], None));
        report.finalize();
        assert_eq!(report.status, BatchStatus::Success);
    }

    #[test]
    fn test_finalize_partial_success() {
        let mut report = BatchReport::default();
        report.record_zone(outcome("a", &[], &[], None));
        report.record_failure("broken.geojson", "Invalid JSON");
        report.finalize();
        assert_eq!(report.status, BatchStatus::PartialSuccess);
    }

    #[test]
    fn test_finalize_failed() {
        let mut report = BatchReport::default();
        report.record_zone(outcome("a", &["outside"], &[], None));
        report.finalize();
        assert_eq!(report.status, BatchStatus::Failed);
    }

    #[test]
    fn test_duplicates() {
        let mut report = BatchReport::default();
        report.record_zone(outcome("b", &[], &[], Some("abc")));
        report.record_zone(outcome("a", &[], &[], Some("abc")));
        report.record_zone(outcome("c", &[], &[], Some("def")));
        report.record_zone(outcome("d", &["bad"], &[], None));
        report.finalize();

        assert_eq!(report.duplicates, vec![vec!["a".to_string(), "b".to_string()]]);
    }

    #[test]
    fn test_json_shape() {
        let mut report = BatchReport::default();
        report.record_zone(outcome("a", &[], &["small"], None));
        report.finalize();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "Success");
        assert_eq!(json["zones"][0]["zoneId"], "a");
        assert_eq!(json["zones"][0]["isValid"], true);
        assert_eq!(json["zones"][0]["warnings"][0], "small");
    }

    #[test]
    fn test_summary() {
        let mut report = BatchReport::default();
        report.record_zone(outcome("a", &[], &[], None));
        report.record_zone(outcome("b", &["x"], &[], None));
        let summary = report.summary();
        assert!(summary.contains("2 zones"));
        assert!(summary.contains("1 invalid"));
    }
}
