//! Proximity "triangulation": each point joined to its nearest neighbours.
//!
//! This is a k-nearest-neighbour graph, not a Delaunay triangulation; the
//! result reads as a triangulated mesh at a fraction of the cost.

use glam::Vec3;
use rand::Rng;
use scene_core::{LineStyle, Polyline};
use std::collections::HashSet;

use crate::algorithm::Generator;
use crate::network::random_point;
use crate::params::{CountField, NumberField, ParamMap, ParamReader};
use crate::shapes::cross;

/// Neighbours each point connects to.
pub const NEAREST_NEIGHBORS: usize = 3;
/// Ceiling on emitted edges.
pub const MAX_EDGES: usize = 600;

pub const POINTS: CountField = CountField::new("points", 30, 0, 200);
pub const SIZE: NumberField = NumberField::new("size", 10.0, 1.0, 20.0);
pub const DEPTH: NumberField = NumberField::new("depth", 0.0, 0.0, 10.0);

#[derive(Debug, Clone, PartialEq)]
pub struct TriangulationParams {
    pub points: usize,
    /// Side length of the square domain.
    pub size: f32,
    /// Half-extent along z.
    pub depth: f32,
    pub show_points: bool,
    pub center: Vec3,
    pub style: LineStyle,
}

impl Default for TriangulationParams {
    fn default() -> Self {
        Self::from_params(&ParamMap::new())
    }
}

impl TriangulationParams {
    pub fn from_params(raw: &ParamMap) -> Self {
        let r = ParamReader::new(raw);
        Self {
            points: r.count(&POINTS),
            size: r.number(&SIZE),
            depth: r.number(&DEPTH),
            show_points: r.flag("show_points", false),
            center: r.vec3("center", Vec3::ZERO),
            style: r.style(0.5, 1.0),
        }
    }
}

/// Unordered edges of the k-nearest-neighbour graph over `points`, in discovery order.
pub fn nearest_neighbor_edges(points: &[Vec3], k: usize, max_edges: usize) -> Vec<(usize, usize)> {
    let mut seen = HashSet::new();
    let mut edges = Vec::new();
    for (i, p) in points.iter().enumerate() {
        let mut others: Vec<(usize, f32)> = points
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(j, q)| (j, p.distance_squared(*q)))
            .collect();
        others.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

        for (j, _) in others.into_iter().take(k) {
            if edges.len() >= max_edges {
                return edges;
            }
            if seen.insert((i.min(j), i.max(j))) {
                edges.push((i, j));
            }
        }
    }
    edges
}

impl Generator for TriangulationParams {
    fn generate<R: Rng>(&self, rng: &mut R) -> Vec<Polyline> {
        let count = POINTS.clamp(self.points);
        let half = SIZE.clamp(self.size) * 0.5;
        let depth = DEPTH.clamp(self.depth);

        let points: Vec<Vec3> = (0..count)
            .map(|_| self.center + random_point(rng, half, depth))
            .collect();

        let mut lines: Vec<Polyline> = nearest_neighbor_edges(&points, NEAREST_NEIGHBORS, MAX_EDGES)
            .into_iter()
            .map(|(a, b)| Polyline::segment(points[a], points[b], self.style))
            .collect();

        if self.show_points {
            for p in &points {
                lines.extend(cross(*p, 0.08, self.style));
            }
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use serde_json::json;

    #[test]
    fn edges_connect_nearest_points_without_duplicates() {
        let points = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
        ];
        let edges = nearest_neighbor_edges(&points, 3, 100);
        let unique: HashSet<_> = edges.iter().map(|&(a, b)| (a.min(b), a.max(b))).collect();
        assert_eq!(unique.len(), edges.len());
        // Every pair among four points with k = 3 is connected exactly once.
        assert_eq!(edges.len(), 6);
    }

    #[test]
    fn edge_count_is_bounded() {
        let raw = json!({ "points": 200 });
        let tri = TriangulationParams::from_params(raw.as_object().unwrap());
        let lines = tri.generate(&mut StdRng::seed_from_u64(8));
        assert!(lines.len() <= MAX_EDGES);
        assert!(lines.len() >= 200 * NEAREST_NEIGHBORS / 2);
    }

    #[test]
    fn degenerate_point_counts() {
        for n in [0, 1] {
            let raw = json!({ "points": n });
            let tri = TriangulationParams::from_params(raw.as_object().unwrap());
            assert!(tri.generate(&mut StdRng::seed_from_u64(1)).is_empty());
        }
        let raw = json!({ "points": 2 });
        let tri = TriangulationParams::from_params(raw.as_object().unwrap());
        assert_eq!(tri.generate(&mut StdRng::seed_from_u64(1)).len(), 1);
    }
}
