//! Batterie ordonnée des contrôles de validité
//!
//! Chaque contrôle ajoute au plus une erreur ou un avertissement. L'ordre
//! n'influe que sur l'ordre des messages. Une valeur non finie (surface ou
//! périmètre) interrompt la batterie et devient une erreur unique
//! `Validation error: ...`.

pub mod kinks;

use std::cell::OnceCell;

use geo::Intersects;
use tracing::{debug, warn};

use crate::error::GeometryError;
use crate::metrics;
use crate::rules::ZoneRules;
use crate::types::{ValidationResult, ZonePolygon};

/// Sévérité d'un contrôle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Bloque l'enregistrement
    Error,
    /// Informatif
    Warning,
}

/// Contrôles de validité
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    SelfIntersection,
    MinArea,
    SmallArea,
    MaxArea,
    MinVertices,
    Compactness,
    Containment,
    Holes,
}

/// Ordre d'exécution des contrôles
pub const BATTERY: [Check; 8] = [
    Check::SelfIntersection,
    Check::MinArea,
    Check::SmallArea,
    Check::MaxArea,
    Check::MinVertices,
    Check::Compactness,
    Check::Containment,
    Check::Holes,
];

impl Check {
    pub fn severity(self) -> Severity {
        match self {
            Check::SmallArea | Check::Compactness | Check::Holes => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Check::SelfIntersection => "self_intersection",
            Check::MinArea => "min_area",
            Check::SmallArea => "small_area",
            Check::MaxArea => "max_area",
            Check::MinVertices => "min_vertices",
            Check::Compactness => "compactness",
            Check::Containment => "containment",
            Check::Holes => "holes",
        }
    }

    /// Exécute le contrôle, `Ok(Some(message))` s'il se déclenche
    fn run(self, ctx: &Context<'_>) -> Result<Option<String>, GeometryError> {
        let rules = ctx.rules;

        let message = match self {
            Check::SelfIntersection => {
                let kinks = kinks::find_kinks(ctx.polygon.exterior());
                (!kinks.is_empty()).then(|| {
                    debug!(kinks = kinks.len(), "Self-intersections found");
                    "Boundary has self-intersecting lines. Please redraw without crossing lines."
                        .to_string()
                })
            }
            Check::MinArea => {
                let area = ctx.area()?;
                (area < rules.min_area_km2).then(|| {
                    format!(
                        "Zone area is too small ({:.4} km²). Minimum area is {} km².",
                        area, rules.min_area_km2
                    )
                })
            }
            Check::SmallArea => {
                let area = ctx.area()?;
                (area >= rules.min_area_km2 && area < rules.warn_area_km2).then(|| {
                    format!(
                        "Zone area is small ({:.4} km²). Consider expanding the boundary.",
                        area
                    )
                })
            }
            Check::MaxArea => {
                let area = ctx.area()?;
                (area > rules.max_area_km2).then(|| {
                    format!(
                        "Zone area is too large ({:.2} km²). Maximum area is {} km².",
                        area, rules.max_area_km2
                    )
                })
            }
            Check::MinVertices => (ctx.polygon.vertex_count() < rules.min_vertices).then(|| {
                format!(
                    "Polygon must have at least {} vertices",
                    rules.min_vertices.saturating_sub(1)
                )
            }),
            Check::Compactness => {
                let perimeter = ctx.perimeter()?;
                if perimeter <= 0.0 {
                    // Compacité non définie (tous les points confondus)
                    debug!("Zero-length perimeter, compactness skipped");
                    return Ok(None);
                }
                let value = metrics::compactness(ctx.area()?, perimeter)?;
                (value < rules.min_compactness).then(|| {
                    "Zone shape is highly elongated. Consider a more compact boundary for easier management."
                        .to_string()
                })
            }
            Check::Containment => {
                let region = rules.operating_region_bounds.to_rect();
                (!ctx.polygon.to_polygon().intersects(&region)).then(|| {
                    format!(
                        "Zone boundary is outside {} limits",
                        rules.operating_region_name
                    )
                })
            }
            Check::Holes => (!ctx.polygon.holes().is_empty()).then(|| {
                "Zone boundary contains holes. Ensure this is intentional.".to_string()
            }),
        };

        Ok(message)
    }
}

/// Données partagées entre contrôles (métriques calculées une seule fois)
struct Context<'a> {
    polygon: &'a ZonePolygon,
    rules: &'a ZoneRules,
    area: OnceCell<f64>,
    perimeter: OnceCell<f64>,
}

impl<'a> Context<'a> {
    fn new(polygon: &'a ZonePolygon, rules: &'a ZoneRules) -> Self {
        Self {
            polygon,
            rules,
            area: OnceCell::new(),
            perimeter: OnceCell::new(),
        }
    }

    fn area(&self) -> Result<f64, GeometryError> {
        cached(&self.area, || metrics::area_km2(self.polygon))
    }

    fn perimeter(&self) -> Result<f64, GeometryError> {
        cached(&self.perimeter, || metrics::perimeter_km(self.polygon))
    }
}

fn cached(
    cell: &OnceCell<f64>,
    compute: impl FnOnce() -> Result<f64, GeometryError>,
) -> Result<f64, GeometryError> {
    if let Some(value) = cell.get() {
        return Ok(*value);
    }
    let value = compute()?;
    Ok(*cell.get_or_init(|| value))
}

/// Exécute la batterie complète sur un polygone chargé
pub fn run_checks(polygon: &ZonePolygon, rules: &ZoneRules) -> ValidationResult {
    let ctx = Context::new(polygon, rules);
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for check in BATTERY {
        match check.run(&ctx) {
            Ok(None) => {}
            Ok(Some(message)) => {
                debug!(check = check.name(), message = %message, "Check fired");
                match check.severity() {
                    Severity::Error => errors.push(message),
                    Severity::Warning => warnings.push(message),
                }
            }
            Err(e) => {
                warn!(check = check.name(), error = %e, "Validation aborted");
                errors.push(format!("Validation error: {}", e));
                break;
            }
        }
    }

    ValidationResult::new(errors, warnings)
}
