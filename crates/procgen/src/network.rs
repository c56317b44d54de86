//! Random networks: uniformly placed nodes joined by independent random edges.

use glam::Vec3;
use rand::Rng;
use scene_core::{LineStyle, Polyline};

use crate::algorithm::Generator;
use crate::params::{CountField, NumberField, ParamMap, ParamReader};
use crate::shapes::square;

pub const NODES: CountField = CountField::new("nodes", 20, 0, 200);
pub const CONNECTION_PROBABILITY: NumberField =
    NumberField::new("connection_probability", 0.15, 0.0, 1.0);
pub const BOUNDS: NumberField = NumberField::new("bounds", 5.0, 0.5, 20.0);
pub const DEPTH: NumberField = NumberField::new("depth", 1.0, 0.0, 10.0);
pub const MAX_EDGES: CountField = CountField::new("max_edges", 600, 0, 2000);
pub const NODE_SIZE: NumberField = NumberField::new("node_size", 0.15, 0.02, 1.0);

#[derive(Debug, Clone, PartialEq)]
pub struct RandomNetworkParams {
    pub nodes: usize,
    /// Probability that any unordered pair of nodes is connected.
    pub connection_probability: f32,
    /// Half-extent of the node region in x and y.
    pub bounds: f32,
    /// Half-extent of the node region in z.
    pub depth: f32,
    pub max_edges: usize,
    pub show_nodes: bool,
    pub node_size: f32,
    pub style: LineStyle,
}

impl Default for RandomNetworkParams {
    fn default() -> Self {
        Self::from_params(&ParamMap::new())
    }
}

impl RandomNetworkParams {
    pub fn from_params(raw: &ParamMap) -> Self {
        let r = ParamReader::new(raw);
        Self {
            nodes: r.count(&NODES),
            connection_probability: r.number(&CONNECTION_PROBABILITY),
            bounds: r.number(&BOUNDS),
            depth: r.number(&DEPTH),
            max_edges: r.count(&MAX_EDGES),
            show_nodes: r.flag("show_nodes", true),
            node_size: r.number(&NODE_SIZE),
            style: r.style(0.5, 1.0),
        }
    }
}

/// Uniform point in the box `[-half, half]² × [-depth, depth]`.
pub(crate) fn random_point<R: Rng>(rng: &mut R, half: f32, depth: f32) -> Vec3 {
    let z = if depth > 0.0 {
        rng.gen_range(-depth..=depth)
    } else {
        0.0
    };
    Vec3::new(rng.gen_range(-half..=half), rng.gen_range(-half..=half), z)
}

impl Generator for RandomNetworkParams {
    fn generate<R: Rng>(&self, rng: &mut R) -> Vec<Polyline> {
        let count = NODES.clamp(self.nodes);
        if count == 0 {
            return Vec::new();
        }
        let p = CONNECTION_PROBABILITY.clamp(self.connection_probability) as f64;
        let half = BOUNDS.clamp(self.bounds);
        let depth = DEPTH.clamp(self.depth);
        let max_edges = MAX_EDGES.clamp(self.max_edges);

        let nodes: Vec<Vec3> = (0..count).map(|_| random_point(rng, half, depth)).collect();

        let mut lines = Vec::new();
        'pairs: for i in 0..count {
            for j in (i + 1)..count {
                if lines.len() >= max_edges {
                    log::debug!("Random network capped at {} edges", max_edges);
                    break 'pairs;
                }
                if rng.gen_bool(p) {
                    lines.push(Polyline::segment(nodes[i], nodes[j], self.style));
                }
            }
        }

        if self.show_nodes {
            let size = NODE_SIZE.clamp(self.node_size);
            let marker_style = self.style.with_opacity((self.style.opacity + 0.3).min(1.0));
            lines.extend(nodes.iter().map(|n| square(*n, size, marker_style)));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use serde_json::json;

    fn params(value: serde_json::Value) -> RandomNetworkParams {
        RandomNetworkParams::from_params(value.as_object().unwrap())
    }

    #[test]
    fn zero_nodes_is_empty() {
        let net = params(json!({ "nodes": 0 }));
        assert!(net.generate(&mut StdRng::seed_from_u64(1)).is_empty());
    }

    #[test]
    fn full_probability_connects_every_pair() {
        let net = params(json!({ "nodes": 6, "connection_probability": 1, "show_nodes": false }));
        let lines = net.generate(&mut StdRng::seed_from_u64(1));
        assert_eq!(lines.len(), 15);
    }

    #[test]
    fn zero_probability_only_draws_nodes() {
        let net = params(json!({ "nodes": 6, "connection_probability": 0 }));
        let lines = net.generate(&mut StdRng::seed_from_u64(1));
        assert_eq!(lines.len(), 6);
        assert!(lines.iter().all(|l| l.points.len() == 5));
    }

    #[test]
    fn edges_are_capped() {
        let net = params(json!({
            "nodes": 200,
            "connection_probability": 1,
            "max_edges": 100,
            "show_nodes": false
        }));
        let lines = net.generate(&mut StdRng::seed_from_u64(1));
        assert_eq!(lines.len(), 100);
    }

    #[test]
    fn nodes_stay_in_bounds() {
        let net = params(json!({ "nodes": 40, "connection_probability": 0.5, "bounds": 2, "depth": 0.5 }));
        for line in net.generate(&mut StdRng::seed_from_u64(9)) {
            for p in &line.points {
                // Node markers extend node_size past the node itself.
                assert!(p.x.abs() <= 2.0 + 0.15 + 1e-5);
                assert!(p.y.abs() <= 2.0 + 0.15 + 1e-5);
                assert!(p.z.abs() <= 0.5 + 1e-5);
            }
        }
    }
}
