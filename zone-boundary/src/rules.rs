//! Seuils de validation des limites de zone
//!
//! Les valeurs par défaut correspondent à la commune de Struga. Chaque champ
//! peut être surchargé indépendamment (JSON en camelCase, champs absents =
//! valeur par défaut).

use geo::{coord, Rect};
use serde::{Deserialize, Serialize};

use crate::error::RulesError;

/// Emprise rectangulaire de la zone d'exploitation (WGS84, degrés)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct RegionBounds {
    pub min_lng: f64,
    pub min_lat: f64,
    pub max_lng: f64,
    pub max_lat: f64,
}

impl RegionBounds {
    pub const fn new(min_lng: f64, min_lat: f64, max_lng: f64, max_lat: f64) -> Self {
        Self {
            min_lng,
            min_lat,
            max_lng,
            max_lat,
        }
    }

    /// Rectangle `geo` équivalent
    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.min_lng, y: self.min_lat },
            coord! { x: self.max_lng, y: self.max_lat },
        )
    }

    fn is_consistent(&self) -> bool {
        let values = <[f64; 4]>::from(*self);
        values.iter().all(|v| v.is_finite())
            && self.min_lng < self.max_lng
            && self.min_lat < self.max_lat
            && (-180.0..=180.0).contains(&self.min_lng)
            && (-180.0..=180.0).contains(&self.max_lng)
            && (-90.0..=90.0).contains(&self.min_lat)
            && (-90.0..=90.0).contains(&self.max_lat)
    }
}

impl From<[f64; 4]> for RegionBounds {
    fn from([min_lng, min_lat, max_lng, max_lat]: [f64; 4]) -> Self {
        Self::new(min_lng, min_lat, max_lng, max_lat)
    }
}

impl From<RegionBounds> for [f64; 4] {
    fn from(bounds: RegionBounds) -> Self {
        [bounds.min_lng, bounds.min_lat, bounds.max_lng, bounds.max_lat]
    }
}

impl std::str::FromStr for RegionBounds {
    type Err = String;

    /// Format `minLng,minLat,maxLng,maxLat`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| format!("Invalid bounds '{}': {}", s, e))?;

        match values.as_slice() {
            [min_lng, min_lat, max_lng, max_lat] => {
                Ok(Self::new(*min_lng, *min_lat, *max_lng, *max_lat))
            }
            _ => Err(format!(
                "Invalid bounds '{}': expected minLng,minLat,maxLng,maxLat",
                s
            )),
        }
    }
}

/// Configuration des contrôles de validité
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ZoneRules {
    /// Surface minimale (erreur en dessous), km²
    pub min_area_km2: f64,

    /// Surface en dessous de laquelle un avertissement est émis, km²
    pub warn_area_km2: f64,

    /// Surface maximale (erreur au-dessus), km²
    pub max_area_km2: f64,

    /// Nombre minimal de points de l'anneau extérieur, point de fermeture inclus
    pub min_vertices: usize,

    /// Compacité minimale `4π·A / P²` (avertissement en dessous)
    pub min_compactness: f64,

    /// Emprise de la zone d'exploitation
    pub operating_region_bounds: RegionBounds,

    /// Nom affiché dans le message de confinement
    pub operating_region_name: String,
}

impl Default for ZoneRules {
    fn default() -> Self {
        Self {
            min_area_km2: 0.01,
            warn_area_km2: 0.05,
            max_area_km2: 100.0,
            min_vertices: 4,
            min_compactness: 0.1,
            operating_region_bounds: RegionBounds::new(20.6, 41.15, 20.75, 41.21),
            operating_region_name: "Struga Municipality".to_string(),
        }
    }
}

impl ZoneRules {
    /// Vérifie la cohérence des seuils
    pub fn check(&self) -> Result<(), RulesError> {
        for (name, value) in [
            ("minAreaKm2", self.min_area_km2),
            ("warnAreaKm2", self.warn_area_km2),
            ("maxAreaKm2", self.max_area_km2),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(RulesError::InvalidThreshold { name, value });
            }
        }

        if self.min_area_km2 > self.warn_area_km2 {
            return Err(RulesError::Inverted {
                lower: "minAreaKm2",
                lower_value: self.min_area_km2,
                upper: "warnAreaKm2",
                upper_value: self.warn_area_km2,
            });
        }

        if self.warn_area_km2 > self.max_area_km2 {
            return Err(RulesError::Inverted {
                lower: "warnAreaKm2",
                lower_value: self.warn_area_km2,
                upper: "maxAreaKm2",
                upper_value: self.max_area_km2,
            });
        }

        if !(0.0..=1.0).contains(&self.min_compactness) {
            return Err(RulesError::Compactness(self.min_compactness));
        }

        if self.min_vertices == 0 {
            return Err(RulesError::MinVertices);
        }

        if !self.operating_region_bounds.is_consistent() {
            return Err(RulesError::RegionBounds(
                self.operating_region_bounds.into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_consistent() {
        let rules = ZoneRules::default();
        assert!(rules.check().is_ok());
        assert_eq!(rules.min_vertices, 4);
        assert_eq!(
            <[f64; 4]>::from(rules.operating_region_bounds),
            [20.6, 41.15, 20.75, 41.21]
        );
    }

    #[test]
    fn test_partial_override_from_json() {
        let rules: ZoneRules = serde_json::from_str(
            r#"{"maxAreaKm2": 250.0, "operatingRegionBounds": [20.0, 41.0, 21.0, 42.0]}"#,
        )
        .unwrap();

        assert_eq!(rules.max_area_km2, 250.0);
        assert_eq!(rules.min_area_km2, 0.01);
        assert_eq!(rules.operating_region_bounds.max_lat, 42.0);
        assert_eq!(rules.operating_region_name, "Struga Municipality");
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let json = serde_json::to_value(ZoneRules::default()).unwrap();
        assert_eq!(json["minCompactness"], 0.1);
        assert_eq!(json["operatingRegionBounds"][2], 20.75);
    }

    #[test]
    fn test_inverted_thresholds() {
        let rules = ZoneRules {
            min_area_km2: 1.0,
            warn_area_km2: 0.5,
            ..Default::default()
        };
        assert!(matches!(rules.check(), Err(RulesError::Inverted { .. })));

        let rules = ZoneRules {
            max_area_km2: 0.02,
            ..Default::default()
        };
        assert!(matches!(rules.check(), Err(RulesError::Inverted { .. })));
    }

    #[test]
    fn test_invalid_values() {
        let rules = ZoneRules {
            min_area_km2: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            rules.check(),
            Err(RulesError::InvalidThreshold { name: "minAreaKm2", .. })
        ));

        let rules = ZoneRules {
            min_compactness: 1.5,
            ..Default::default()
        };
        assert_eq!(rules.check(), Err(RulesError::Compactness(1.5)));

        let rules = ZoneRules {
            min_vertices: 0,
            ..Default::default()
        };
        assert_eq!(rules.check(), Err(RulesError::MinVertices));

        let rules = ZoneRules {
            operating_region_bounds: RegionBounds::new(20.75, 41.15, 20.6, 41.21),
            ..Default::default()
        };
        assert!(matches!(rules.check(), Err(RulesError::RegionBounds(_))));
    }

    #[test]
    fn test_bounds_from_str() {
        let bounds: RegionBounds = "20.6, 41.15, 20.75, 41.21".parse().unwrap();
        assert_eq!(bounds, ZoneRules::default().operating_region_bounds);
        assert!("1,2,3".parse::<RegionBounds>().is_err());
        assert!("a,b,c,d".parse::<RegionBounds>().is_err());
    }
}
