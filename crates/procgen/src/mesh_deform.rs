//! Warped wireframe: a regular control grid displaced by sinusoidal deformation.

use glam::Vec3;
use rand::Rng;
use scene_core::{LineStyle, Polyline};

use crate::algorithm::Generator;
use crate::params::{CountField, NumberField, ParamMap, ParamReader};

pub const RESOLUTION: CountField = CountField::new("resolution", 12, 2, 50);
pub const SIZE: NumberField = NumberField::new("size", 8.0, 1.0, 20.0);
pub const FREQUENCY: NumberField = NumberField::new("frequency", 1.0, 0.1, 5.0);
pub const STRENGTH: NumberField = NumberField::new("strength", 0.5, 0.0, 3.0);

#[derive(Debug, Clone, PartialEq)]
pub struct MeshDeformationParams {
    /// Control points per side.
    pub resolution: usize,
    pub size: f32,
    pub frequency: f32,
    pub strength: f32,
    pub center: Vec3,
    pub style: LineStyle,
}

impl Default for MeshDeformationParams {
    fn default() -> Self {
        Self::from_params(&ParamMap::new())
    }
}

impl MeshDeformationParams {
    pub fn from_params(raw: &ParamMap) -> Self {
        let r = ParamReader::new(raw);
        Self {
            resolution: r.count(&RESOLUTION),
            size: r.number(&SIZE),
            frequency: r.number(&FREQUENCY),
            strength: r.number(&STRENGTH),
            center: r.vec3("center", Vec3::ZERO),
            style: r.style(0.6, 1.0),
        }
    }
}

/// Displace a rest-position control point. Deterministic in position and parameters.
pub fn deform(p: Vec3, frequency: f32, strength: f32) -> Vec3 {
    let (fx, fy) = (frequency * p.x, frequency * p.y);
    Vec3::new(
        p.x + 0.25 * strength * fy.sin(),
        p.y + 0.25 * strength * fx.sin(),
        p.z + strength * fx.sin() * fy.cos(),
    )
}

impl Generator for MeshDeformationParams {
    fn generate<R: Rng>(&self, _rng: &mut R) -> Vec<Polyline> {
        let res = RESOLUTION.clamp(self.resolution);
        let size = SIZE.clamp(self.size);
        let frequency = FREQUENCY.clamp(self.frequency);
        let strength = STRENGTH.clamp(self.strength);

        let half = size * 0.5;
        let step = size / (res - 1) as f32;
        let grid: Vec<Vec3> = (0..res * res)
            .map(|idx| {
                let rest = Vec3::new(-half + (idx % res) as f32 * step, -half + (idx / res) as f32 * step, 0.0);
                self.center + deform(rest, frequency, strength)
            })
            .collect();

        let rows = (0..res).map(|y| (0..res).map(|x| grid[y * res + x]).collect::<Vec<_>>());
        let cols = (0..res).map(|x| (0..res).map(|y| grid[y * res + x]).collect::<Vec<_>>());
        rows.chain(cols).map(|points| Polyline::new(points, self.style)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use serde_json::json;

    #[test]
    fn wireframe_has_rows_and_columns() {
        let raw = json!({ "resolution": 5 });
        let mesh = MeshDeformationParams::from_params(raw.as_object().unwrap());
        let lines = mesh.generate(&mut StdRng::seed_from_u64(0));
        assert_eq!(lines.len(), 10);
        assert!(lines.iter().all(|l| l.points.len() == 5));
    }

    #[test]
    fn zero_strength_is_flat_grid() {
        let raw = json!({ "resolution": 3, "size": 2, "strength": 0 });
        let mesh = MeshDeformationParams::from_params(raw.as_object().unwrap());
        let lines = mesh.generate(&mut StdRng::seed_from_u64(0));
        assert_eq!(lines[0].points, vec![Vec3::new(-1.0, -1.0, 0.0), Vec3::new(0.0, -1.0, 0.0), Vec3::new(1.0, -1.0, 0.0)]);
    }

    #[test]
    fn deformation_is_deterministic_and_bounded() {
        let p = Vec3::new(1.3, -0.7, 0.0);
        assert_eq!(deform(p, 2.0, 1.5), deform(p, 2.0, 1.5));
        let d = deform(p, 2.0, 1.5) - p;
        assert!(d.z.abs() <= 1.5 + 1e-6);
        assert!(d.x.abs() <= 0.375 + 1e-6);
    }

    #[test]
    fn shared_points_between_rows_and_columns() {
        let mesh = MeshDeformationParams::default();
        let lines = mesh.generate(&mut StdRng::seed_from_u64(0));
        let res = mesh.resolution;
        // Row 0 and column 0 meet at the first control point.
        assert_eq!(lines[0].points[0], lines[res].points[0]);
    }
}
