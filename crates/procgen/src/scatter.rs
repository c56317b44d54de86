//! Scatter plots: point clouds under a chosen distribution, one marker per point.

use glam::Vec3;
use rand::Rng;
use scene_core::{LineStyle, Polyline};
use std::str::FromStr;

use crate::algorithm::Generator;
use crate::params::{CountField, NumberField, ParamMap, ParamReader};
use crate::shapes::{push_marker, MarkerShape};

pub const COUNT: CountField = CountField::new("count", 50, 1, 500);
pub const SPREAD: NumberField = NumberField::new("spread", 4.0, 0.5, 20.0);
pub const DEPTH: NumberField = NumberField::new("depth", 0.0, 0.0, 10.0);
pub const CLUSTERS: CountField = CountField::new("clusters", 3, 1, 10);
pub const MARKER_SIZE: NumberField = NumberField::new("marker_size", 0.1, 0.02, 1.0);

/// How scattered points are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Distribution {
    #[default]
    Uniform,
    /// One-sided skew: dense near `-spread`, thinning out toward `+spread`.
    Exponential,
    /// Points grouped around a few random centers.
    Clustered,
}

impl FromStr for Distribution {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uniform" | "random" => Ok(Distribution::Uniform),
            "exponential" | "skewed" => Ok(Distribution::Exponential),
            "clustered" | "cluster" | "gaussian" => Ok(Distribution::Clustered),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterParams {
    pub count: usize,
    pub distribution: Distribution,
    /// Half-extent of the xy region.
    pub spread: f32,
    /// Half-extent along z.
    pub depth: f32,
    pub clusters: usize,
    pub marker: MarkerShape,
    pub marker_size: f32,
    pub center: Vec3,
    pub style: LineStyle,
}

impl Default for ScatterParams {
    fn default() -> Self {
        Self::from_params(&ParamMap::new())
    }
}

impl ScatterParams {
    pub fn from_params(raw: &ParamMap) -> Self {
        let r = ParamReader::new(raw);
        Self {
            count: r.count(&COUNT),
            distribution: r.choice("distribution", Distribution::Uniform),
            spread: r.number(&SPREAD),
            depth: r.number(&DEPTH),
            clusters: r.count(&CLUSTERS),
            marker: r.choice("marker", MarkerShape::Cross),
            marker_size: r.number(&MARKER_SIZE),
            center: r.vec3("center", Vec3::ZERO),
            style: r.style(0.6, 1.0),
        }
    }

    fn sample_points<R: Rng>(&self, rng: &mut R) -> Vec<Vec3> {
        let count = COUNT.clamp(self.count);
        let spread = SPREAD.clamp(self.spread);
        let depth = DEPTH.clamp(self.depth);
        let z = |rng: &mut R| {
            if depth > 0.0 {
                rng.gen_range(-depth..=depth)
            } else {
                0.0
            }
        };

        match self.distribution {
            Distribution::Uniform => (0..count)
                .map(|_| {
                    Vec3::new(
                        rng.gen_range(-spread..=spread),
                        rng.gen_range(-spread..=spread),
                        z(rng),
                    )
                })
                .collect(),
            Distribution::Exponential => (0..count)
                .map(|_| {
                    // Inverse-CDF exponential sample, mean spread/3, folded into the domain.
                    let u: f32 = rng.gen_range(0.0..1.0);
                    let t = (-(1.0 - u).ln() * spread / 3.0).min(2.0 * spread);
                    Vec3::new(-spread + t, rng.gen_range(-spread..=spread), z(rng))
                })
                .collect(),
            Distribution::Clustered => {
                let clusters = CLUSTERS.clamp(self.clusters);
                let reach = spread * 0.7;
                let centers: Vec<Vec3> = (0..clusters)
                    .map(|_| Vec3::new(rng.gen_range(-reach..=reach), rng.gen_range(-reach..=reach), 0.0))
                    .collect();
                let sigma = spread * 0.15;
                (0..count)
                    .map(|i| {
                        let c = centers[i % clusters];
                        // Sum of uniforms: cheap bell-shaped offset with bounded support.
                        let dx: f32 = (0..3).map(|_| rng.gen_range(-1.0f32..=1.0)).sum();
                        let dy: f32 = (0..3).map(|_| rng.gen_range(-1.0f32..=1.0)).sum();
                        let p = c + Vec3::new(dx * sigma, dy * sigma, z(rng));
                        Vec3::new(p.x.clamp(-spread, spread), p.y.clamp(-spread, spread), p.z)
                    })
                    .collect()
            }
        }
    }
}

impl Generator for ScatterParams {
    fn generate<R: Rng>(&self, rng: &mut R) -> Vec<Polyline> {
        let size = MARKER_SIZE.clamp(self.marker_size);
        let points = self.sample_points(rng);
        let mut lines = Vec::with_capacity(points.len() * self.marker.polylines_per_marker());
        for p in points {
            push_marker(&mut lines, self.marker, self.center + p, size, self.style);
        }
        lines
    }
}
