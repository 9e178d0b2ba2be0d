//! Types de données pour le crate zone-boundary

use geo::{Coord, LineString, Polygon};
use serde::{Deserialize, Serialize};

/// Polygone de zone tel que dessiné par l'utilisateur
///
/// Les anneaux sont conservés tels quels (pas de fermeture automatique) afin
/// que le contrôle du nombre de sommets porte sur les points réellement saisis.
/// Le premier anneau est l'extérieur, les suivants sont des trous.
#[derive(Debug, Clone, PartialEq)]
pub struct ZonePolygon {
    rings: Vec<LineString<f64>>,
}

impl ZonePolygon {
    /// Construit un polygone depuis ses anneaux (extérieur en premier)
    ///
    /// Retourne `None` si aucun anneau n'est fourni ou si l'extérieur est vide.
    pub fn new(rings: Vec<LineString<f64>>) -> Option<Self> {
        match rings.first() {
            Some(exterior) if !exterior.0.is_empty() => Some(Self { rings }),
            _ => None,
        }
    }

    /// Anneau extérieur
    pub fn exterior(&self) -> &LineString<f64> {
        &self.rings[0]
    }

    /// Anneaux intérieurs (trous)
    pub fn holes(&self) -> &[LineString<f64>] {
        &self.rings[1..]
    }

    /// Tous les anneaux, extérieur en premier
    pub fn rings(&self) -> &[LineString<f64>] {
        &self.rings
    }

    /// Nombre de points de l'anneau extérieur, point de fermeture inclus
    pub fn vertex_count(&self) -> usize {
        self.exterior().0.len()
    }

    /// Vrai si l'anneau extérieur est fermé (premier point == dernier point)
    pub fn is_closed(&self) -> bool {
        self.exterior().is_closed()
    }

    /// Copie fermée de l'anneau extérieur
    pub fn closed_exterior(&self) -> LineString<f64> {
        let mut ring = self.exterior().clone();
        ring.close();
        ring
    }

    /// Polygone `geo` limité à l'anneau extérieur
    pub fn outer_polygon(&self) -> Polygon<f64> {
        Polygon::new(self.exterior().clone(), vec![])
    }

    /// Polygone `geo` complet (trous inclus), anneaux fermés
    pub fn to_polygon(&self) -> Polygon<f64> {
        Polygon::new(self.exterior().clone(), self.holes().to_vec())
    }

    /// Sommets de l'anneau extérieur, sans le point de fermeture
    pub fn distinct_vertices(&self) -> &[Coord<f64>] {
        let coords = &self.exterior().0;
        if coords.len() > 1 && self.is_closed() {
            &coords[..coords.len() - 1]
        } else {
            coords
        }
    }
}

/// Verdict de validation d'une limite de zone
///
/// Les `errors` bloquent l'enregistrement, les `warnings` sont informatifs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Vrai si et seulement si `errors` est vide
    pub is_valid: bool,

    /// Violations bloquantes, dans l'ordre des contrôles
    pub errors: Vec<String>,

    /// Avertissements, dans l'ordre des contrôles
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Construit le verdict depuis les listes d'erreurs et d'avertissements
    pub fn new(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Verdict en échec avec une seule erreur
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(vec![message.into()], Vec::new())
    }

    /// Vrai si au moins un avertissement a été émis
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
