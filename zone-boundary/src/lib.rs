//! # zone-boundary
//!
//! Validation des limites de zones de collecte des déchets dessinées à la main.
//!
//! ## Features
//!
//! - Chargement de polygones GeoJSON (structurés ou sérialisés)
//! - Batterie ordonnée de contrôles : auto-intersection, surfaces minimale et
//!   maximale, nombre de sommets, compacité, confinement dans la zone
//!   d'exploitation, trous
//! - Surface (km²) et périmètre (km) calculables même sur une zone invalide
//! - Seuils configurables via [`ZoneRules`] (défaut : commune de Struga)
//!
//! ## Usage
//!
//! ```rust
//! use serde_json::json;
//! use zone_boundary::{compute_area, validate, ZoneRules};
//!
//! let zone = json!({
//!     "type": "Polygon",
//!     "coordinates": [[[20.67, 41.17], [20.68, 41.17], [20.68, 41.18], [20.67, 41.18], [20.67, 41.17]]]
//! });
//!
//! let result = validate(&zone, &ZoneRules::default());
//! assert!(result.is_valid);
//! assert!(compute_area(&zone).unwrap() > 0.5);
//! ```

pub mod checks;
pub mod error;
pub mod loader;
pub mod metrics;
pub mod rules;
pub mod types;

pub use error::{GeometryError, RulesError};
pub use metrics::ZoneMetrics;
pub use rules::{RegionBounds, ZoneRules};
pub use types::{ValidationResult, ZonePolygon};

use serde_json::Value;
use tracing::debug;

/// Valide une limite de zone (GeoJSON structuré ou sérialisé)
///
/// Ne panique pas et ne retourne jamais d'erreur : une géométrie illisible
/// produit une unique erreur `Invalid geometry: ...` sans exécuter les contrôles.
pub fn validate(geometry: &Value, rules: &ZoneRules) -> ValidationResult {
    match loader::load(geometry) {
        Ok(polygon) => validate_polygon(&polygon, rules),
        Err(e) => rejected(e),
    }
}

/// Valide une limite de zone fournie sous forme de texte JSON
pub fn validate_str(geometry: &str, rules: &ZoneRules) -> ValidationResult {
    match loader::load_str(geometry) {
        Ok(polygon) => validate_polygon(&polygon, rules),
        Err(e) => rejected(e),
    }
}

/// Valide un polygone déjà chargé
pub fn validate_polygon(polygon: &ZonePolygon, rules: &ZoneRules) -> ValidationResult {
    let result = checks::run_checks(polygon, rules);
    debug!(
        valid = result.is_valid,
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "Zone boundary validated"
    );
    result
}

fn rejected(error: GeometryError) -> ValidationResult {
    debug!(error = %error, "Zone boundary could not be loaded");
    ValidationResult::rejected(format!("Invalid geometry: {}", error))
}

/// Surface de la zone en km², `None` si la géométrie est illisible
pub fn compute_area(geometry: &Value) -> Option<f64> {
    let polygon = loader::load(geometry).ok()?;
    metrics::area_km2(&polygon).ok()
}

/// Périmètre de la zone en km, `None` si la géométrie est illisible
pub fn compute_perimeter(geometry: &Value) -> Option<f64> {
    let polygon = loader::load(geometry).ok()?;
    metrics::perimeter_km(&polygon).ok()
}
