//! Types d'erreurs pour le crate zone-boundary

use thiserror::Error;

/// Erreurs pouvant survenir lors du chargement ou du calcul d'une géométrie
#[derive(Debug, Error)]
pub enum GeometryError {
    /// Géométrie nulle, sans `coordinates` ou avec un anneau extérieur vide
    #[error("no coordinates found")]
    NoCoordinates,

    /// Texte sérialisé illisible
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// GeoJSON structurellement invalide (rejeté par le crate geojson)
    #[error("invalid GeoJSON: {0}")]
    GeoJson(#[from] geojson::Error),

    /// Type GeoJSON autre que Polygon / Feature
    #[error("unsupported geometry type: {0}")]
    UnsupportedType(String),

    /// Position invalide (moins de 2 nombres, ou valeur non finie)
    #[error("invalid position {index} in ring {ring}")]
    InvalidPosition { ring: usize, index: usize },

    /// Échec de calcul sur une géométrie dégénérée
    #[error("{0}")]
    Computation(String),
}

impl GeometryError {
    /// Crée une erreur de calcul
    pub fn computation(reason: impl Into<String>) -> Self {
        Self::Computation(reason.into())
    }
}

/// Erreurs de cohérence de la configuration des règles
#[derive(Debug, Error, PartialEq)]
pub enum RulesError {
    /// Seuil négatif ou non fini
    #[error("{name} must be a finite, non-negative number (got {value})")]
    InvalidThreshold { name: &'static str, value: f64 },

    /// Seuils dans le mauvais ordre
    #[error("{lower} ({lower_value}) must not exceed {upper} ({upper_value})")]
    Inverted {
        lower: &'static str,
        lower_value: f64,
        upper: &'static str,
        upper_value: f64,
    },

    /// Compacité hors de [0, 1]
    #[error("minCompactness must be within [0, 1] (got {0})")]
    Compactness(f64),

    /// Nombre minimal de sommets nul
    #[error("minVertices must be at least 1")]
    MinVertices,

    /// Emprise de la zone d'exploitation invalide
    #[error("invalid operating region bounds {0:?}: expected [minLng, minLat, maxLng, maxLat] in WGS84")]
    RegionBounds([f64; 4]),
}
