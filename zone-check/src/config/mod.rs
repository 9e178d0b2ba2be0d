//! Configuration des règles de validation
//!
//! Ordre de résolution : preset embarqué ou fichier JSON, puis surcharges par
//! variables d'environnement, puis contrôle de cohérence.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};
use zone_boundary::{RegionBounds, ZoneRules};

/// Presets embarqués
pub const PRESETS: [&str; 2] = ["struga", "strict"];

/// Charge des règles depuis un fichier JSON (champs absents = défaut)
pub fn load(path: &Path) -> Result<ZoneRules> {
    let content = std::fs::read_to_string(path)
        .context(format!("Failed to read rules file: {}", path.display()))?;

    serde_json::from_str(&content).context("Failed to parse rules JSON")
}

/// Charge des règles depuis un preset embarqué
pub fn from_preset(preset: &str) -> Result<ZoneRules> {
    match preset {
        "struga" => load_embedded(include_str!("presets/struga.json")),
        "strict" => load_embedded(include_str!("presets/strict.json")),
        _ => anyhow::bail!("Unknown preset: {}. Use: {}", preset, PRESETS.join(", ")),
    }
}

fn load_embedded(json: &str) -> Result<ZoneRules> {
    serde_json::from_str(json).context("Failed to parse embedded rules")
}

/// Résout les règles : preset ou fichier, surcharges d'environnement, contrôle
pub fn resolve(source: &str) -> Result<ZoneRules> {
    let mut rules = if PRESETS.contains(&source) {
        from_preset(source)?
    } else {
        load(Path::new(source))?
    };

    apply_overrides(&mut rules, |key| std::env::var(key).ok());
    rules
        .check()
        .context(format!("Inconsistent validation rules ({})", source))?;

    debug!(rules = ?rules, "Validation rules resolved");
    Ok(rules)
}

/// Applique les surcharges `ZONE_*` fournies par `lookup`
///
/// Les valeurs illisibles sont ignorées avec un avertissement.
pub fn apply_overrides(rules: &mut ZoneRules, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = parsed(&lookup, "ZONE_MIN_AREA_KM2") {
        rules.min_area_km2 = v;
    }
    if let Some(v) = parsed(&lookup, "ZONE_WARN_AREA_KM2") {
        rules.warn_area_km2 = v;
    }
    if let Some(v) = parsed(&lookup, "ZONE_MAX_AREA_KM2") {
        rules.max_area_km2 = v;
    }
    if let Some(v) = parsed(&lookup, "ZONE_MIN_VERTICES") {
        rules.min_vertices = v;
    }
    if let Some(v) = parsed(&lookup, "ZONE_MIN_COMPACTNESS") {
        rules.min_compactness = v;
    }
    if let Some(v) = parsed::<RegionBounds>(&lookup, "ZONE_REGION_BOUNDS") {
        rules.operating_region_bounds = v;
    }
    if let Some(name) = lookup("ZONE_REGION_NAME").filter(|s| !s.trim().is_empty()) {
        rules.operating_region_name = name.trim().to_string();
    }
}

fn parsed<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key = key, value = %raw, error = %e, "Ignoring invalid override");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_struga_preset_matches_defaults() {
        assert_eq!(from_preset("struga").unwrap(), ZoneRules::default());
    }

    #[test]
    fn test_strict_preset_is_consistent() {
        let rules = from_preset("strict").unwrap();
        assert!(rules.check().is_ok());
        assert_eq!(rules.min_vertices, 5);
    }

    #[test]
    fn test_unknown_preset() {
        let err = from_preset("ohrid").unwrap_err();
        assert!(err.to_string().contains("Unknown preset"));
    }

    #[test]
    fn test_overrides() {
        let mut rules = ZoneRules::default();
        apply_overrides(
            &mut rules,
            env(&[
                ("ZONE_MAX_AREA_KM2", "250"),
                ("ZONE_MIN_VERTICES", " 5 "),
                ("ZONE_REGION_BOUNDS", "20.0,41.0,21.0,42.0"),
                ("ZONE_REGION_NAME", "Ohrid Municipality"),
            ]),
        );

        assert_eq!(rules.max_area_km2, 250.0);
        assert_eq!(rules.min_vertices, 5);
        assert_eq!(rules.operating_region_bounds.min_lng, 20.0);
        assert_eq!(rules.operating_region_name, "Ohrid Municipality");
        assert_eq!(rules.min_area_km2, 0.01);
    }

    #[test]
    fn test_invalid_override_ignored() {
        let mut rules = ZoneRules::default();
        apply_overrides(
            &mut rules,
            env(&[("ZONE_MIN_AREA_KM2", "tiny"), ("ZONE_REGION_BOUNDS", "1,2")]),
        );
        assert_eq!(rules, ZoneRules::default());
    }

    #[test]
    fn test_load_file() {
        let path = std::env::temp_dir().join("zone_check_rules_test.json");
        std::fs::write(&path, r#"{"minCompactness": 0.3}"#).unwrap();

        let rules = load(&path).unwrap();
        assert_eq!(rules.min_compactness, 0.3);
        assert_eq!(rules.max_area_km2, 100.0);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_missing_file() {
        let err = load(Path::new("/nonexistent/rules.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read rules file"));
    }
}
