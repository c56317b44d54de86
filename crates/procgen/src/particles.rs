//! Particle system: emitters spawn particles integrated with explicit Euler steps.

use glam::Vec3;
use rand::Rng;
use scene_core::{LineStyle, Polyline};
use std::f32::consts::{PI, TAU};

use crate::algorithm::Generator;
use crate::params::{CountField, NumberField, ParamMap, ParamReader};

pub const EMITTERS: CountField = CountField::new("emitters", 3, 1, 10);
pub const PARTICLES: CountField = CountField::new("particles", 20, 1, 100);
pub const STEPS: CountField = CountField::new("steps", 50, 2, 200);
pub const DT: NumberField = NumberField::new("dt", 0.05, 0.001, 0.2);
pub const GRAVITY: NumberField = NumberField::new("gravity", 9.8, -20.0, 20.0);
pub const FRICTION: NumberField = NumberField::new("friction", 0.02, 0.0, 0.5);
pub const SPEED: NumberField = NumberField::new("speed", 4.0, 0.1, 20.0);
pub const SPREAD: NumberField = NumberField::new("spread", 4.0, 0.0, 10.0);

/// One simulated particle.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
}

impl Particle {
    /// Advance one explicit Euler step: gravity pulls down y, friction damps speed.
    pub fn step(&mut self, dt: f32, gravity: f32, friction: f32) {
        self.velocity.y -= gravity * dt;
        self.velocity *= 1.0 - friction;
        self.position += self.velocity * dt;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParticleSystemParams {
    pub emitters: usize,
    /// Particles spawned per emitter.
    pub particles: usize,
    pub steps: usize,
    pub dt: f32,
    pub gravity: f32,
    /// Fraction of velocity lost per step.
    pub friction: f32,
    pub speed: f32,
    /// Radius of the region emitters are placed in.
    pub spread: f32,
    pub center: Vec3,
    pub style: LineStyle,
}

impl Default for ParticleSystemParams {
    fn default() -> Self {
        Self::from_params(&ParamMap::new())
    }
}

impl ParticleSystemParams {
    pub fn from_params(raw: &ParamMap) -> Self {
        let r = ParamReader::new(raw);
        Self {
            emitters: r.count(&EMITTERS),
            particles: r.count(&PARTICLES),
            steps: r.count(&STEPS),
            dt: r.number(&DT),
            gravity: r.number(&GRAVITY),
            friction: r.number(&FRICTION),
            speed: r.number(&SPEED),
            spread: r.number(&SPREAD),
            center: r.vec3("center", Vec3::ZERO),
            style: r.style(0.5, 1.0),
        }
    }
}

impl Generator for ParticleSystemParams {
    fn generate<R: Rng>(&self, rng: &mut R) -> Vec<Polyline> {
        let emitters = EMITTERS.clamp(self.emitters);
        let per_emitter = PARTICLES.clamp(self.particles);
        let steps = STEPS.clamp(self.steps);
        let dt = DT.clamp(self.dt);
        let gravity = GRAVITY.clamp(self.gravity);
        let friction = FRICTION.clamp(self.friction);
        let speed = SPEED.clamp(self.speed);
        let spread = SPREAD.clamp(self.spread);

        let mut lines = Vec::with_capacity(emitters * per_emitter);
        for _ in 0..emitters {
            let origin = self.center
                + if spread > 0.0 {
                    Vec3::new(rng.gen_range(-spread..=spread), rng.gen_range(-spread..=spread) * 0.5, 0.0)
                } else {
                    Vec3::ZERO
                };

            for _ in 0..per_emitter {
                // Launch into the upper hemisphere.
                let azimuth = rng.gen_range(0.0..TAU);
                let elevation = rng.gen_range(0.1..PI * 0.5);
                let dir = Vec3::new(
                    elevation.cos() * azimuth.cos(),
                    elevation.sin(),
                    elevation.cos() * azimuth.sin(),
                );
                let mut particle = Particle {
                    position: origin,
                    velocity: dir * speed * rng.gen_range(0.5..=1.0),
                };

                let mut points = Vec::with_capacity(steps + 1);
                points.push(particle.position);
                for _ in 0..steps {
                    particle.step(dt, gravity, friction);
                    points.push(particle.position);
                }
                lines.push(Polyline::new(points, self.style));
            }
        }
        lines
    }
}
