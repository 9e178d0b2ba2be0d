//! Encodage EWKT des limites de zone pour une colonne geometry PostGIS

use anyhow::{Context, Result};
use geo::Geometry;
use geozero::wkt::WktWriter;
use geozero::GeozeroGeometry;
use zone_boundary::ZonePolygon;

/// Encode le polygone (anneaux fermés, trous inclus) en `SRID=<srid>;POLYGON(...)`
pub fn to_ewkt(polygon: &ZonePolygon, srid: u32) -> Result<String> {
    let geometry = Geometry::Polygon(polygon.to_polygon());

    let mut wkt_buf: Vec<u8> = Vec::new();
    {
        let mut writer = WktWriter::new(&mut wkt_buf);
        geometry
            .process_geom(&mut writer)
            .context("Failed to encode geometry to WKT")?;
    }

    let wkt = String::from_utf8(wkt_buf).context("WKT output is not UTF-8")?;
    Ok(format!("SRID={};{}", srid, wkt))
}
