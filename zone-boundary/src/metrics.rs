//! Calcul de la surface et du périmètre des zones
//!
//! - Surface : aire sphérique (Chamberlain–Duquette, rayon équatorial WGS84) de
//!   l'anneau extérieur uniquement, les trous ne sont pas soustraits.
//! - Périmètre : longueur haversine de l'anneau extérieur fermé.

use std::f64::consts::PI;

use geo::{ChamberlainDuquetteArea, HaversineLength};
use serde::Serialize;

use crate::error::GeometryError;
use crate::types::ZonePolygon;

const M2_PER_KM2: f64 = 1_000_000.0;
const M_PER_KM: f64 = 1_000.0;

/// Surface de l'anneau extérieur en km², indépendante du sens de parcours
pub fn area_km2(polygon: &ZonePolygon) -> Result<f64, GeometryError> {
    let area = polygon.outer_polygon().chamberlain_duquette_unsigned_area() / M2_PER_KM2;
    finite(area, "area")
}

/// Longueur de l'anneau extérieur fermé en km
pub fn perimeter_km(polygon: &ZonePolygon) -> Result<f64, GeometryError> {
    let perimeter = polygon.closed_exterior().haversine_length() / M_PER_KM;
    finite(perimeter, "perimeter")
}

/// Indice de compacité `4π·A / P²` (1 pour un disque)
///
/// Non défini pour un périmètre nul.
pub fn compactness(area_km2: f64, perimeter_km: f64) -> Result<f64, GeometryError> {
    if perimeter_km <= 0.0 {
        return Err(GeometryError::computation(
            "compactness is undefined for a zero-length perimeter",
        ));
    }
    finite(4.0 * PI * area_km2 / (perimeter_km * perimeter_km), "compactness")
}

fn finite(value: f64, what: &str) -> Result<f64, GeometryError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GeometryError::computation(format!(
            "{} computation produced a non-finite value",
            what
        )))
    }
}

/// Métriques d'une zone, pour l'affichage et les rapports
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneMetrics {
    pub area_km2: f64,
    pub perimeter_km: f64,

    /// Absente si le périmètre est nul
    pub compactness: Option<f64>,

    /// Points de l'anneau extérieur, point de fermeture inclus
    pub vertex_count: usize,

    pub hole_count: usize,
}

impl ZoneMetrics {
    /// Calcule les métriques, y compris pour une zone invalide
    pub fn compute(polygon: &ZonePolygon) -> Result<Self, GeometryError> {
        let area_km2 = area_km2(polygon)?;
        let perimeter_km = perimeter_km(polygon)?;

        Ok(Self {
            area_km2,
            perimeter_km,
            compactness: compactness(area_km2, perimeter_km).ok(),
            vertex_count: polygon.vertex_count(),
            hole_count: polygon.holes().len(),
        })
    }
}
