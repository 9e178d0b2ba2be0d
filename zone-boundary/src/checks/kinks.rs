//! Détection des auto-intersections de l'anneau extérieur

use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::{Coord, Line, LineString};

/// Retourne les points où l'anneau se recoupe
///
/// L'anneau est fermé si besoin et les sommets consécutifs identiques sont
/// fusionnés. Deux arêtes non adjacentes ne doivent pas se toucher ; deux
/// arêtes adjacentes ne doivent partager que leur sommet commun.
pub fn find_kinks(ring: &LineString<f64>) -> Vec<Coord<f64>> {
    let edges = ring_edges(ring);
    let n = edges.len();
    let mut kinks = Vec::new();

    if n < 3 {
        return kinks;
    }

    for i in 0..n {
        for j in (i + 1)..n {
            let adjacent = j == i + 1 || (i == 0 && j == n - 1);

            match line_intersection(edges[i], edges[j]) {
                None => {}
                Some(LineIntersection::SinglePoint { intersection, .. }) => {
                    if !adjacent {
                        kinks.push(intersection);
                    }
                }
                Some(LineIntersection::Collinear { intersection }) => {
                    // Deux arêtes adjacentes colinéaires se chevauchent (retour en arrière)
                    if !adjacent || intersection.start != intersection.end {
                        kinks.push(intersection.start);
                    }
                }
            }
        }
    }

    kinks
}

fn ring_edges(ring: &LineString<f64>) -> Vec<Line<f64>> {
    let mut coords: Vec<Coord<f64>> = Vec::with_capacity(ring.0.len() + 1);
    for &coord in &ring.0 {
        if coords.last() != Some(&coord) {
            coords.push(coord);
        }
    }

    if coords.len() > 1 && coords.first() != coords.last() {
        coords.push(coords[0]);
    }

    coords
        .windows(2)
        .map(|pair| Line::new(pair[0], pair[1]))
        .collect()
}
