//! Orbital systems: conic-section orbits traced around one or more central bodies.
//!
//! Each orbit is the focal-form ellipse r(θ) = r₀(1 − e²) / (1 + e·cos θ),
//! rotated by an argument of periapsis and tilted by an inclination.

use glam::Vec3;
use rand::Rng;
use scene_core::{LineStyle, Polyline};
use std::f32::consts::TAU;

use crate::algorithm::Generator;
use crate::params::{CountField, NumberField, ParamMap, ParamReader};
use crate::shapes::cross;

/// Golden angle in radians; spreads periapses evenly without repeating.
const GOLDEN_ANGLE: f32 = 2.399_963;

pub const BODIES: CountField = CountField::new("bodies", 1, 1, 5);
pub const ORBITS: CountField = CountField::new("orbits", 8, 1, 60);
pub const ECCENTRICITY: NumberField = NumberField::new("eccentricity", 0.3, 0.0, 0.9);
pub const MIN_ORBIT: NumberField = NumberField::new("min_orbit", 1.5, 0.2, 10.0);
pub const ORBIT_SPACING: NumberField = NumberField::new("orbit_spacing", 0.8, 0.1, 5.0);
pub const STEPS: CountField = CountField::new("steps", 128, 16, 720);
pub const BODY_SPACING: NumberField = NumberField::new("body_spacing", 8.0, 0.0, 20.0);
pub const INCLINATION: NumberField = NumberField::new("inclination", 0.2, 0.0, 1.5);
pub const BODY_SIZE: NumberField = NumberField::new("body_size", 0.3, 0.05, 2.0);

/// One orbit's shape and orientation.
#[derive(Debug, Clone, Copy)]
pub struct Orbit {
    /// Semi-latus scale r₀.
    pub radius: f32,
    /// 0 = circle, approaching 1 = very elongated.
    pub eccentricity: f32,
    /// Angle of periapsis within the orbital plane.
    pub argument_of_periapsis: f32,
    /// Tilt out of the reference plane, around X.
    pub inclination: f32,
}

impl Orbit {
    /// Distance from the focus at true anomaly `theta`.
    pub fn radius_at(&self, theta: f32) -> f32 {
        let e = self.eccentricity;
        self.radius * (1.0 - e * e) / (1.0 + e * theta.cos())
    }

    /// Position relative to the focus at true anomaly `theta`.
    pub fn position(&self, theta: f32) -> Vec3 {
        let r = self.radius_at(theta);
        let (x_orb, y_orb) = (r * theta.cos(), r * theta.sin());
        // Rotate by argument of periapsis
        let omega = self.argument_of_periapsis;
        let x = x_orb * omega.cos() - y_orb * omega.sin();
        let y = x_orb * omega.sin() + y_orb * omega.cos();
        // Apply inclination (tilt around X)
        let inc = self.inclination;
        Vec3::new(x, y * inc.cos(), y * inc.sin())
    }

    /// Closed polyline sampled at `steps` evenly spaced anomalies.
    pub fn trace(&self, focus: Vec3, steps: usize) -> Vec<Vec3> {
        (0..=steps)
            .map(|i| {
                let theta = if i == steps { 0.0 } else { i as f32 / steps as f32 * TAU };
                focus + self.position(theta)
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitalSystemParams {
    /// Number of central bodies.
    pub bodies: usize,
    /// Number of orbiting objects, shared round-robin between bodies.
    pub orbits: usize,
    pub eccentricity: f32,
    pub min_orbit: f32,
    pub orbit_spacing: f32,
    pub steps: usize,
    pub body_spacing: f32,
    pub inclination: f32,
    pub body_size: f32,
    pub center: Vec3,
    pub style: LineStyle,
}

impl Default for OrbitalSystemParams {
    fn default() -> Self {
        Self::from_params(&ParamMap::new())
    }
}

impl OrbitalSystemParams {
    pub fn from_params(raw: &ParamMap) -> Self {
        let r = ParamReader::new(raw);
        Self {
            bodies: r.count(&BODIES),
            orbits: r.count(&ORBITS),
            eccentricity: r.number(&ECCENTRICITY),
            min_orbit: r.number(&MIN_ORBIT),
            orbit_spacing: r.number(&ORBIT_SPACING),
            steps: r.count(&STEPS),
            body_spacing: r.number(&BODY_SPACING),
            inclination: r.number(&INCLINATION),
            body_size: r.number(&BODY_SIZE),
            center: r.vec3("center", Vec3::ZERO),
            style: r.style(0.6, 1.0),
        }
    }

    /// Central body positions, evenly spaced along x around the center.
    pub fn body_positions(&self) -> Vec<Vec3> {
        let count = BODIES.clamp(self.bodies);
        let spacing = BODY_SPACING.clamp(self.body_spacing);
        (0..count)
            .map(|i| self.center + Vec3::X * ((i as f32 - (count - 1) as f32 * 0.5) * spacing))
            .collect()
    }
}

impl Generator for OrbitalSystemParams {
    fn generate<R: Rng>(&self, _rng: &mut R) -> Vec<Polyline> {
        let orbits = ORBITS.clamp(self.orbits);
        let e = ECCENTRICITY.clamp(self.eccentricity);
        let min_orbit = MIN_ORBIT.clamp(self.min_orbit);
        let spacing = ORBIT_SPACING.clamp(self.orbit_spacing);
        let steps = STEPS.clamp(self.steps);
        let inclination = INCLINATION.clamp(self.inclination);

        let bodies = self.body_positions();
        let mut lines = Vec::with_capacity(orbits + bodies.len() * 2);
        for i in 0..orbits {
            let body = i % bodies.len();
            let ring = i / bodies.len();
            let orbit = Orbit {
                radius: min_orbit + ring as f32 * spacing,
                eccentricity: e,
                argument_of_periapsis: i as f32 * GOLDEN_ANGLE,
                inclination: if i % 2 == 0 { inclination } else { -inclination },
            };
            lines.push(Polyline::new(orbit.trace(bodies[body], steps), self.style));
        }

        let size = BODY_SIZE.clamp(self.body_size);
        let body_style = self.style.with_opacity(1.0);
        for b in bodies {
            lines.extend(cross(b, size, body_style));
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
    fn orbit_periapsis_and_apoapsis() {
        let orbit = Orbit {
            radius: 2.0,
            eccentricity: 0.5,
            argument_of_periapsis: 0.0,
            inclination: 0.0,
        };
        // r(0) = r0(1-e²)/(1+e) = r0(1-e); r(π) = r0(1+e)
        assert!((orbit.radius_at(0.0) - 1.0).abs() < 1e-5);
        assert!((orbit.radius_at(std::f32::consts::PI) - 3.0).abs() < 1e-5);
        assert!((orbit.position(0.0) - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn orbits_round_robin_between_bodies() {
        let raw = json!({ "bodies": 2, "orbits": 5, "steps": 32, "eccentricity": 0, "inclination": 0 });
        let system = OrbitalSystemParams::from_params(raw.as_object().unwrap());
        let bodies = system.body_positions();
        let lines = system.generate(&mut StdRng::seed_from_u64(0));
        // 5 orbits + 2 crosses of 2 strokes each.
        assert_eq!(lines.len(), 5 + 4);

        for (i, line) in lines[..5].iter().enumerate() {
            assert_eq!(line.points.len(), 33);
            assert!(line.is_closed(1e-4));
            let focus = bodies[i % 2];
            let expected = 1.5 + (i / 2) as f32 * 0.8;
            for p in &line.points {
                assert!(((*p - focus).length() - expected).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn high_eccentricity_stays_finite() {
        let raw = json!({ "eccentricity": 5, "orbits": 60, "steps": 720 });
        let system = OrbitalSystemParams::from_params(raw.as_object().unwrap());
        assert_eq!(system.eccentricity, 0.9);
        let lines = system.generate(&mut StdRng::seed_from_u64(0));
        assert!(lines.iter().all(|l| l.points.iter().all(|p| p.is_finite())));
    }
}
