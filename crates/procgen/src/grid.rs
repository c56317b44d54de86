//! Axis-aligned grids with optional depth layers and per-point jitter.

use glam::Vec3;
use rand::Rng;
use scene_core::{LineStyle, Polyline};

use crate::algorithm::Generator;
use crate::params::{CountField, NumberField, ParamMap, ParamReader};

pub const SPACING: NumberField = NumberField::new("spacing", 1.0, 0.1, 5.0);
pub const SIZE: NumberField = NumberField::new("size", 10.0, 1.0, 20.0);
pub const Z_LAYERS: CountField = CountField::new("z_layers", 1, 1, 5);
pub const LAYER_SPACING: NumberField = NumberField::new("layer_spacing", 1.0, 0.1, 5.0);
pub const NOISE: NumberField = NumberField::new("noise", 0.0, 0.0, 1.0);

/// Configuration for grid generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GridParams {
    /// Distance between neighbouring lines.
    pub spacing: f32,
    /// Side length of the square domain.
    pub size: f32,
    /// Number of stacked layers along z.
    pub z_layers: usize,
    pub layer_spacing: f32,
    /// Max per-axis jitter applied to each sampled point.
    pub noise: f32,
    pub center: Vec3,
    pub style: LineStyle,
}

impl Default for GridParams {
    fn default() -> Self {
        Self::from_params(&ParamMap::new())
    }
}

impl GridParams {
    pub fn from_params(raw: &ParamMap) -> Self {
        let r = ParamReader::new(raw);
        Self {
            spacing: r.number(&SPACING),
            size: r.number(&SIZE),
            z_layers: r.count(&Z_LAYERS),
            layer_spacing: r.number(&LAYER_SPACING),
            noise: r.number(&NOISE),
            center: r.vec3("center", Vec3::ZERO),
            style: r.style(0.5, 1.0),
        }
    }
}

impl Generator for GridParams {
    fn generate<R: Rng>(&self, rng: &mut R) -> Vec<Polyline> {
        let spacing = SPACING.clamp(self.spacing);
        let size = SIZE.clamp(self.size);
        let layers = Z_LAYERS.clamp(self.z_layers);
        let layer_spacing = LAYER_SPACING.clamp(self.layer_spacing);
        let noise = NOISE.clamp(self.noise);

        let half = size * 0.5;
        // Epsilon keeps an exact multiple (size 4, spacing 1) from losing its last line.
        let steps = (size / spacing + 1e-4).floor() as usize;
        let coords: Vec<f32> = (0..=steps).map(|i| -half + i as f32 * spacing).collect();

        let mut jitter = |p: Vec3| -> Vec3 {
            if noise > 0.0 {
                p + Vec3::new(
                    rng.gen_range(-noise..=noise),
                    rng.gen_range(-noise..=noise),
                    rng.gen_range(-noise..=noise),
                )
            } else {
                p
            }
        };

        let mut lines = Vec::with_capacity(layers * coords.len() * 2);
        for layer in 0..layers {
            let z = (layer as f32 - (layers - 1) as f32 * 0.5) * layer_spacing;
            // Horizontal lines (constant y), then vertical lines (constant x).
            for &y in &coords {
                let points = coords
                    .iter()
                    .map(|&x| jitter(self.center + Vec3::new(x, y, z)))
                    .collect();
                lines.push(Polyline::new(points, self.style));
            }
            for &x in &coords {
                let points = coords
                    .iter()
                    .map(|&y| jitter(self.center + Vec3::new(x, y, z)))
                    .collect();
                lines.push(Polyline::new(points, self.style));
            }
        }
        lines
    }
}
