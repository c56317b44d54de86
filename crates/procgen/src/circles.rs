//! Concentric circles approximated by regular polygons.

use glam::Vec3;
use rand::Rng;
use scene_core::{LineStyle, Polyline};

use crate::algorithm::Generator;
use crate::params::{CountField, NumberField, ParamMap, ParamReader};
use crate::shapes::ring;

pub const COUNT: CountField = CountField::new("count", 8, 1, 50);
pub const MIN_RADIUS: NumberField = NumberField::new("min_radius", 0.5, 0.1, 20.0);
pub const MAX_RADIUS: NumberField = NumberField::new("max_radius", 6.0, 0.1, 30.0);

const MIN_SEGMENTS: usize = 16;
const MAX_SEGMENTS: usize = 256;

/// Segment count for a circle of `radius`: larger circles get more segments.
pub fn segments_for_radius(radius: f32) -> usize {
    ((MIN_SEGMENTS as f32 + radius * 8.0) as usize).clamp(MIN_SEGMENTS, MAX_SEGMENTS)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConcentricCirclesParams {
    pub count: usize,
    pub min_radius: f32,
    pub max_radius: f32,
    pub center: Vec3,
    pub style: LineStyle,
}

impl Default for ConcentricCirclesParams {
    fn default() -> Self {
        Self::from_params(&ParamMap::new())
    }
}

impl ConcentricCirclesParams {
    pub fn from_params(raw: &ParamMap) -> Self {
        let r = ParamReader::new(raw);
        Self {
            count: r.count(&COUNT),
            min_radius: r.number(&MIN_RADIUS),
            max_radius: r.number(&MAX_RADIUS),
            center: r.vec3("center", Vec3::ZERO),
            style: r.style(0.7, 1.5),
        }
    }

    /// Radius of circle `i`, linearly interpolated from min to max.
    fn radius(&self, i: usize, count: usize) -> f32 {
        let a = MIN_RADIUS.clamp(self.min_radius);
        let b = MAX_RADIUS.clamp(self.max_radius);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        if count <= 1 {
            return lo;
        }
        lo + (hi - lo) * i as f32 / (count - 1) as f32
    }
}

impl Generator for ConcentricCirclesParams {
    fn generate<R: Rng>(&self, _rng: &mut R) -> Vec<Polyline> {
        let count = COUNT.clamp(self.count);
        (0..count)
            .map(|i| {
                let radius = self.radius(i, count);
                ring(self.center, radius, segments_for_radius(radius), self.style)
            })
            .collect()
    }
}
