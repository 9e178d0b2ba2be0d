//! Chargement des géométries GeoJSON en `ZonePolygon`
//!
//! Formes acceptées :
//! - `{"type": "Polygon", "coordinates": [[[lng, lat], ...], ...]}`
//! - un objet avec `coordinates` sans `type` (traité comme un Polygon)
//! - une `Feature` dont la géométrie est un Polygon
//! - la forme sérialisée (texte JSON) de l'une des formes ci-dessus

use geo::{Coord, LineString};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::GeometryError;
use crate::types::ZonePolygon;

/// Charge un polygone depuis une valeur JSON
///
/// Une valeur `String` est considérée comme la forme sérialisée et désérialisée
/// une seule fois.
pub fn load(value: &Value) -> Result<ZonePolygon, GeometryError> {
    match value {
        Value::String(text) => load_str(text),
        Value::Object(object) => load_object(object),
        _ => Err(GeometryError::NoCoordinates),
    }
}

/// Charge un polygone depuis sa forme sérialisée
pub fn load_str(text: &str) -> Result<ZonePolygon, GeometryError> {
    match serde_json::from_str::<Value>(text)? {
        Value::Object(object) => load_object(&object),
        _ => Err(GeometryError::NoCoordinates),
    }
}

fn load_object(object: &Map<String, Value>) -> Result<ZonePolygon, GeometryError> {
    let kind = object.get("type").and_then(Value::as_str);

    if kind == Some("Feature") {
        return match object.get("geometry") {
            Some(Value::Object(geometry)) => load_object(geometry),
            _ => Err(GeometryError::NoCoordinates),
        };
    }

    let coordinates = match object.get("coordinates") {
        None | Some(Value::Null) => return Err(GeometryError::NoCoordinates),
        Some(coordinates) => coordinates,
    };

    match kind {
        Some("Polygon") => {
            let geometry = geojson::Geometry::from_json_object(object.clone())?;
            ZonePolygon::try_from(&geometry)
        }
        None => {
            let rings: geojson::PolygonType = serde_json::from_value(coordinates.clone())?;
            from_positions(&rings)
        }
        Some(other) => Err(GeometryError::UnsupportedType(other.to_string())),
    }
}

impl TryFrom<&geojson::Geometry> for ZonePolygon {
    type Error = GeometryError;

    fn try_from(geometry: &geojson::Geometry) -> Result<Self, Self::Error> {
        match &geometry.value {
            geojson::Value::Polygon(rings) => from_positions(rings),
            other => Err(GeometryError::UnsupportedType(type_name(other).to_string())),
        }
    }
}

fn type_name(value: &geojson::Value) -> &'static str {
    match value {
        geojson::Value::Point(_) => "Point",
        geojson::Value::MultiPoint(_) => "MultiPoint",
        geojson::Value::LineString(_) => "LineString",
        geojson::Value::MultiLineString(_) => "MultiLineString",
        geojson::Value::Polygon(_) => "Polygon",
        geojson::Value::MultiPolygon(_) => "MultiPolygon",
        geojson::Value::GeometryCollection(_) => "GeometryCollection",
    }
}

/// Construit un polygone depuis des anneaux de positions GeoJSON
///
/// Les ordonnées supplémentaires (altitude) sont ignorées.
pub fn from_positions(rings: &geojson::PolygonType) -> Result<ZonePolygon, GeometryError> {
    let mut parsed = Vec::with_capacity(rings.len());

    for (ring_index, ring) in rings.iter().enumerate() {
        let coords = ring
            .iter()
            .enumerate()
            .map(|(index, position)| to_coord(position, ring_index, index))
            .collect::<Result<Vec<Coord<f64>>, _>>()?;
        parsed.push(LineString::new(coords));
    }

    let polygon = ZonePolygon::new(parsed).ok_or(GeometryError::NoCoordinates)?;

    if !polygon.is_closed() {
        debug!(
            points = polygon.vertex_count(),
            "Outer ring is not closed, metrics will use a closed copy"
        );
    }

    Ok(polygon)
}

fn to_coord(position: &[f64], ring: usize, index: usize) -> Result<Coord<f64>, GeometryError> {
    match position {
        [x, y, ..] if x.is_finite() && y.is_finite() => Ok(Coord { x: *x, y: *y }),
        _ => Err(GeometryError::InvalidPosition { ring, index }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn square() -> Value {
        json!({
            "type": "Polygon",
            "coordinates": [[[20.67, 41.17], [20.68, 41.17], [20.68, 41.18], [20.67, 41.18], [20.67, 41.17]]]
        })
    }

    #[test]
    fn test_load_structured_polygon() {
        let polygon = load(&square()).unwrap();
        assert_eq!(polygon.vertex_count(), 5);
        assert!(polygon.is_closed());
        assert!(polygon.holes().is_empty());
    }

    #[test]
    fn test_load_serialized_polygon() {
        let text = square().to_string();
        assert_eq!(load_str(&text).unwrap(), load(&square()).unwrap());
        assert_eq!(load(&Value::String(text)).unwrap(), load(&square()).unwrap());
    }

    #[test]
    fn test_load_feature() {
        let feature = json!({ "type": "Feature", "properties": {}, "geometry": square() });
        assert_eq!(load(&feature).unwrap().vertex_count(), 5);
    }

    #[test]
    fn test_load_untyped_coordinates() {
        let value = json!({ "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0, 250.0], [0.0, 0.0]]] });
        let polygon = load(&value).unwrap();
        assert_eq!(polygon.vertex_count(), 4);
    }

    #[test]
    fn test_missing_coordinates() {
        assert!(matches!(load(&Value::Null), Err(GeometryError::NoCoordinates)));
        assert!(matches!(
            load(&json!({ "type": "Polygon" })),
            Err(GeometryError::NoCoordinates)
        ));
        assert!(matches!(
            load(&json!({ "type": "Polygon", "coordinates": [] })),
            Err(GeometryError::NoCoordinates)
        ));
        assert!(matches!(
            load(&json!({ "type": "Polygon", "coordinates": [[]] })),
            Err(GeometryError::NoCoordinates)
        ));
        assert!(matches!(
            load(&json!({ "type": "Feature", "geometry": null })),
            Err(GeometryError::NoCoordinates)
        ));
        assert_eq!(
            GeometryError::NoCoordinates.to_string(),
            "no coordinates found"
        );
    }

    #[test]
    fn test_unsupported_type() {
        let value = json!({ "type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]] });
        assert!(matches!(
            load(&value),
            Err(GeometryError::UnsupportedType(t)) if t == "LineString"
        ));
    }

    #[test]
    fn test_invalid_text() {
        assert!(matches!(load_str("not json"), Err(GeometryError::Json(_))));
        assert!(matches!(load_str("42"), Err(GeometryError::NoCoordinates)));
    }

    #[test]
    fn test_short_position() {
        let value = json!({ "coordinates": [[[0.0, 0.0], [1.0], [1.0, 1.0], [0.0, 0.0]]] });
        assert!(matches!(
            load(&value),
            Err(GeometryError::InvalidPosition { ring: 0, index: 1 })
        ));
    }

    #[test]
    fn test_from_geojson_geometry() {
        let geometry = geojson::Geometry::new(geojson::Value::Polygon(vec![vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
            vec![0.0, 0.0],
        ]]));
        assert_eq!(ZonePolygon::try_from(&geometry).unwrap().vertex_count(), 4);

        let point = geojson::Geometry::new(geojson::Value::Point(vec![0.0, 0.0]));
        assert!(ZonePolygon::try_from(&point).is_err());
    }
}
