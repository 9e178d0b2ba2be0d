//! Empreinte stable d'une limite de zone
//!
//! L'empreinte est indépendante du sommet de départ et du sens de parcours des
//! anneaux : deux dessins de la même limite donnent le même hash.

use blake3::Hasher;
use geo::{Area, Coord, LineString, Polygon};
use zone_boundary::ZonePolygon;

/// Arrondi des coordonnées avant hash (7 décimales ≈ 1 cm en WGS84)
const PRECISION: f64 = 1e7;

/// Calcule l'empreinte blake3 (hex) d'une limite de zone
pub fn boundary_fingerprint(polygon: &ZonePolygon) -> String {
    let mut hasher = Hasher::new();

    hasher.update(b"EXT");
    hash_ring_normalized(&mut hasher, polygon.exterior());

    // Trous hashés indépendamment de leur ordre de saisie
    let mut holes: Vec<[u8; 32]> = polygon
        .holes()
        .iter()
        .map(|hole| {
            let mut ring_hasher = Hasher::new();
            hash_ring_normalized(&mut ring_hasher, hole);
            *ring_hasher.finalize().as_bytes()
        })
        .collect();
    holes.sort_unstable();
    for digest in &holes {
        hasher.update(b"INT");
        hasher.update(digest);
    }

    hex::encode(hasher.finalize().as_bytes())
}

/// Hash un anneau orienté dans le sens trigonométrique, en partant du
/// sommet lexicographiquement le plus petit (min x, puis min y)
fn hash_ring_normalized(hasher: &mut Hasher, ring: &LineString<f64>) {
    let mut coords: Vec<Coord<f64>> = ring.0.iter().map(|c| rounded(*c)).collect();
    if coords.len() > 1 && coords.first() == coords.last() {
        coords.pop();
    }
    if coords.is_empty() {
        return;
    }

    let closed = Polygon::new(LineString::new(coords.clone()), vec![]);
    if closed.signed_area() < 0.0 {
        coords.reverse();
    }

    let start = coords
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)))
        .map(|(i, _)| i)
        .unwrap_or(0);

    for coord in coords[start..].iter().chain(coords[..start].iter()) {
        hasher.update(&coord.x.to_le_bytes());
        hasher.update(&coord.y.to_le_bytes());
    }
}

fn rounded(c: Coord<f64>) -> Coord<f64> {
    Coord {
        // `+ 0.0` ramène -0.0 à 0.0
        x: (c.x * PRECISION).round() / PRECISION + 0.0,
        y: (c.y * PRECISION).round() / PRECISION + 0.0,
    }
}
