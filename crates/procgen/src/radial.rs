//! Radial lines fanning out from a center.

use glam::Vec3;
use rand::Rng;
use scene_core::{LineStyle, Polyline};
use std::f32::consts::TAU;

use crate::algorithm::Generator;
use crate::params::{CountField, NumberField, ParamMap, ParamReader};

pub const COUNT: CountField = CountField::new("count", 24, 1, 360);
pub const LENGTH: NumberField = NumberField::new("length", 6.0, 0.1, 30.0);
pub const INNER_RADIUS: NumberField = NumberField::new("inner_radius", 0.0, 0.0, 10.0);
pub const VARIATION: NumberField = NumberField::new("variation", 0.0, 0.0, 1.0);

#[derive(Debug, Clone, PartialEq)]
pub struct RadialLinesParams {
    pub count: usize,
    pub length: f32,
    pub inner_radius: f32,
    /// Relative length perturbation in [0, 1].
    pub variation: f32,
    pub center: Vec3,
    pub style: LineStyle,
}

impl Default for RadialLinesParams {
    fn default() -> Self {
        Self::from_params(&ParamMap::new())
    }
}

impl RadialLinesParams {
    pub fn from_params(raw: &ParamMap) -> Self {
        let r = ParamReader::new(raw);
        Self {
            count: r.count(&COUNT),
            length: r.number(&LENGTH),
            inner_radius: r.number(&INNER_RADIUS),
            variation: r.number(&VARIATION),
            center: r.vec3("center", Vec3::ZERO),
            style: r.style(0.5, 1.0),
        }
    }
}

impl Generator for RadialLinesParams {
    fn generate<R: Rng>(&self, rng: &mut R) -> Vec<Polyline> {
        let count = COUNT.clamp(self.count);
        let length = LENGTH.clamp(self.length);
        let inner = INNER_RADIUS.clamp(self.inner_radius);
        let variation = VARIATION.clamp(self.variation);

        (0..count)
            .map(|i| {
                let angle = i as f32 / count as f32 * TAU;
                let dir = Vec3::new(angle.cos(), angle.sin(), 0.0);
                let mut len = length;
                if variation > 0.0 {
                    len *= 1.0 + variation * rng.gen_range(-1.0f32..=1.0);
                }
                let len = len.max(inner + 0.01);
                Polyline::segment(self.center + dir * inner, self.center + dir * len, self.style)
            })
            .collect()
    }
}
