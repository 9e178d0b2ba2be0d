//! # zone-check
//!
//! Validation par lot des limites de zones de collecte (fichiers GeoJSON).
//!
//! ## Features
//!
//! - Validation parallèle de fichiers ou de répertoires entiers
//! - Règles par preset (`struga`, `strict`), fichier JSON ou variables `ZONE_*`
//! - Rapport console ou JSON, détection des limites dupliquées
//! - Export EWKT des zones valides pour une colonne geometry
//!
//! ## Usage CLI
//!
//! ```bash
//! # Valider un répertoire de zones
//! zone-check validate --path ./zones/ --report report.json
//!
//! # Surface / périmètre, zones invalides comprises
//! zone-check metrics --path ./zones/north.geojson
//!
//! # Lignes prêtes à charger pour les zones valides
//! zone-check export --path ./zones/ --output zones.txt --srid 4326
//! ```

pub mod batch;
pub mod config;
pub mod fingerprint;
pub mod input;
pub mod report;
pub mod wkt;

pub use batch::{check_file, check_zone, export_row, run_batch};
pub use report::{BatchReport, BatchStatus, ZoneOutcome};
