//! Archimedean and logarithmic spirals.
//!
//! Both are sampled at a fixed angular step and stop at whichever comes first:
//! the requested number of turns, the maximum radius, or the point ceiling.
//! The radius bound matters for logarithmic spirals, whose growth is exponential.

use glam::Vec3;
use rand::Rng;
use scene_core::{LineStyle, Polyline, MIN_POINTS};
use std::f32::consts::TAU;

use crate::algorithm::Generator;
use crate::params::{CountField, NumberField, ParamMap, ParamReader};

/// Angle advanced between consecutive samples, in radians.
pub const ANGLE_STEP: f32 = 0.1;
/// Hard ceiling on points per spiral arm.
pub const MAX_POINTS: usize = 2000;

pub const TURNS: NumberField = NumberField::new("turns", 3.0, 0.5, 20.0);
pub const GROWTH: NumberField = NumberField::new("growth", 0.3, 0.01, 2.0);
pub const START_RADIUS: NumberField = NumberField::new("start_radius", 0.0, 0.0, 10.0);
pub const ARMS: CountField = CountField::new("arms", 1, 1, 12);
pub const MAX_RADIUS: NumberField = NumberField::new("max_radius", 10.0, 0.5, 30.0);
pub const RISE: NumberField = NumberField::new("rise", 0.0, -2.0, 2.0);

pub const LOG_A: NumberField = NumberField::new("a", 0.1, 0.01, 5.0);
pub const LOG_B: NumberField = NumberField::new("b", 0.2, 0.01, 2.0);
pub const LOG_TURNS: NumberField = NumberField::new("turns", 4.0, 0.5, 20.0);

/// Shared sampling of one arm: `radius(theta)` is evaluated until a bound is hit.
fn trace_arm(
    center: Vec3,
    arm_offset: f32,
    turns: f32,
    max_radius: f32,
    rise: f32,
    radius: impl Fn(f32) -> f32,
) -> Vec<Vec3> {
    let max_theta = turns * TAU;
    let mut points = Vec::new();
    for i in 0..MAX_POINTS {
        let theta = i as f32 * ANGLE_STEP;
        if theta > max_theta {
            break;
        }
        let r = radius(theta);
        if !r.is_finite() || r > max_radius {
            break;
        }
        let angle = theta + arm_offset;
        points.push(center + Vec3::new(angle.cos() * r, angle.sin() * r, theta * rise));
    }
    points
}

/// Archimedean spiral: radius grows linearly with angle.
#[derive(Debug, Clone, PartialEq)]
pub struct SpiralParams {
    pub turns: f32,
    /// Radius gained per radian.
    pub growth: f32,
    pub start_radius: f32,
    pub arms: usize,
    pub max_radius: f32,
    /// Height gained per radian.
    pub rise: f32,
    pub center: Vec3,
    pub style: LineStyle,
}

impl Default for SpiralParams {
    fn default() -> Self {
        Self::from_params(&ParamMap::new())
    }
}

impl SpiralParams {
    pub fn from_params(raw: &ParamMap) -> Self {
        let r = ParamReader::new(raw);
        Self {
            turns: r.number(&TURNS),
            growth: r.number(&GROWTH),
            start_radius: r.number(&START_RADIUS),
            arms: r.count(&ARMS),
            max_radius: r.number(&MAX_RADIUS),
            rise: r.number(&RISE),
            center: r.vec3("center", Vec3::ZERO),
            style: r.style(0.7, 1.5),
        }
    }
}

impl Generator for SpiralParams {
    fn generate<R: Rng>(&self, _rng: &mut R) -> Vec<Polyline> {
        let turns = TURNS.clamp(self.turns);
        let growth = GROWTH.clamp(self.growth);
        let start = START_RADIUS.clamp(self.start_radius);
        let arms = ARMS.clamp(self.arms);
        let max_radius = MAX_RADIUS.clamp(self.max_radius);
        let rise = RISE.clamp(self.rise);

        (0..arms)
            .map(|arm| {
                let offset = arm as f32 / arms as f32 * TAU;
                trace_arm(self.center, offset, turns, max_radius, rise, |theta| start + growth * theta)
            })
            .filter(|points| points.len() >= MIN_POINTS)
            .map(|points| Polyline::new(points, self.style))
            .collect()
    }
}

/// Logarithmic spiral: `r = a·e^(b·θ)`.
#[derive(Debug, Clone, PartialEq)]
pub struct LogarithmicSpiralParams {
    pub a: f32,
    pub b: f32,
    pub turns: f32,
    pub arms: usize,
    pub max_radius: f32,
    pub rise: f32,
    pub center: Vec3,
    pub style: LineStyle,
}

impl Default for LogarithmicSpiralParams {
    fn default() -> Self {
        Self::from_params(&ParamMap::new())
    }
}

impl LogarithmicSpiralParams {
    pub fn from_params(raw: &ParamMap) -> Self {
        let r = ParamReader::new(raw);
        Self {
            a: r.number(&LOG_A),
            b: r.number(&LOG_B),
            turns: r.number(&LOG_TURNS),
            arms: r.count(&ARMS),
            max_radius: r.number(&MAX_RADIUS),
            rise: r.number(&RISE),
            center: r.vec3("center", Vec3::ZERO),
            style: r.style(0.7, 1.5),
        }
    }
}

impl Generator for LogarithmicSpiralParams {
    fn generate<R: Rng>(&self, _rng: &mut R) -> Vec<Polyline> {
        let a = LOG_A.clamp(self.a);
        let b = LOG_B.clamp(self.b);
        let turns = LOG_TURNS.clamp(self.turns);
        let arms = ARMS.clamp(self.arms);
        let max_radius = MAX_RADIUS.clamp(self.max_radius);
        let rise = RISE.clamp(self.rise);

        (0..arms)
            .map(|arm| {
                let offset = arm as f32 / arms as f32 * TAU;
                trace_arm(self.center, offset, turns, max_radius, rise, |theta| a * (b * theta).exp())
            })
            .filter(|points| points.len() >= MIN_POINTS)
            .map(|points| Polyline::new(points, self.style))
            .collect()
    }
}
