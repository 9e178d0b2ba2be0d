//! Lecture des fichiers GeoJSON contenant des limites de zone
//!
//! Un fichier peut contenir une géométrie seule, une `Feature` ou une
//! `FeatureCollection`. La géométrie est transmise telle quelle au validateur.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::debug;

/// Une limite de zone candidate extraite d'un fichier
#[derive(Debug, Clone)]
pub struct ZoneCandidate {
    /// Fichier source
    pub source: PathBuf,

    /// Identifiant : `id` de la feature, sinon `properties.name`, sinon `<fichier>#<index>`
    pub zone_id: String,

    /// Géométrie brute (peut être invalide, le validateur tranche)
    pub geometry: Value,
}

/// Collecte récursivement les fichiers `.geojson` / `.json`
pub fn collect_files(path: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if path.is_file() {
        if is_geojson(path) {
            files.push(path.to_path_buf());
        }
        return Ok(files);
    }

    let entries = std::fs::read_dir(path)
        .with_context(|| format!("Cannot read directory {}", path.display()))?;

    for entry in entries {
        let entry = entry?;
        let entry_path = entry.path();
        let file_type = entry.file_type()?;

        if file_type.is_symlink() && entry_path.is_dir() {
            // Pas de suivi des liens vers des répertoires (cycles possibles)
            debug!(path = %entry_path.display(), "Skipping symlinked directory");
        } else if file_type.is_dir() {
            files.extend(collect_files(&entry_path)?);
        } else if is_geojson(&entry_path) {
            files.push(entry_path);
        }
    }

    files.sort();
    Ok(files)
}

fn is_geojson(path: &Path) -> bool {
    path.extension()
        .map_or(false, |ext| ext == "geojson" || ext == "json")
}

/// Lit toutes les zones candidates d'un fichier
pub fn read_zones(path: &Path) -> Result<Vec<ZoneCandidate>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot open {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;

    Ok(split_zones(path, value))
}

/// Découpe une valeur GeoJSON en zones candidates
pub fn split_zones(source: &Path, value: Value) -> Vec<ZoneCandidate> {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "zone".to_string());

    match value.get("type").and_then(Value::as_str) {
        Some("FeatureCollection") => {
            let features = value
                .get("features")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();

            features
                .into_iter()
                .enumerate()
                .map(|(index, feature)| ZoneCandidate {
                    source: source.to_path_buf(),
                    zone_id: feature_id(&feature)
                        .unwrap_or_else(|| format!("{}#{}", stem, index)),
                    geometry: feature,
                })
                .collect()
        }
        _ => vec![ZoneCandidate {
            source: source.to_path_buf(),
            zone_id: feature_id(&value).unwrap_or(stem),
            geometry: value,
        }],
    }
}

fn feature_id(feature: &Value) -> Option<String> {
    let id = match feature.get("id") {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };

    id.or_else(|| {
        feature
            .get("properties")
            .and_then(|p| p.get("name"))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}
