//! Harmonic series: one polyline per harmonic, amplitude decaying as 1/k.

use glam::Vec3;
use rand::Rng;
use scene_core::{LineStyle, Polyline};
use std::f32::consts::TAU;

use crate::algorithm::Generator;
use crate::params::{CountField, NumberField, ParamMap, ParamReader};

pub const HARMONICS: CountField = CountField::new("harmonics", 5, 1, 16);
pub const FREQUENCY: NumberField = NumberField::new("frequency", 1.0, 0.1, 10.0);
pub const AMPLITUDE: NumberField = NumberField::new("amplitude", 2.0, 0.1, 10.0);
pub const X_RANGE: NumberField = NumberField::new("x_range", 12.0, 1.0, 30.0);
pub const SAMPLES: CountField = CountField::new("samples", 200, 16, 512);
pub const PHASE: NumberField = NumberField::new("phase", 0.0, -TAU, TAU);
pub const Y_SPACING: NumberField = NumberField::new("y_spacing", 0.0, 0.0, 5.0);
pub const Z_SPACING: NumberField = NumberField::new("z_spacing", 0.2, 0.0, 5.0);

#[derive(Debug, Clone, PartialEq)]
pub struct HarmonicWaveParams {
    pub harmonics: usize,
    /// Fundamental frequency; harmonic k runs at `k * frequency`.
    pub frequency: f32,
    /// Amplitude of the fundamental; harmonic k has `amplitude / k`.
    pub amplitude: f32,
    pub x_range: f32,
    pub samples: usize,
    pub phase: f32,
    /// Vertical offset between consecutive harmonics.
    pub y_spacing: f32,
    /// Depth offset between consecutive harmonics.
    pub z_spacing: f32,
    pub center: Vec3,
    pub style: LineStyle,
}

impl Default for HarmonicWaveParams {
    fn default() -> Self {
        Self::from_params(&ParamMap::new())
    }
}

impl HarmonicWaveParams {
    pub fn from_params(raw: &ParamMap) -> Self {
        let r = ParamReader::new(raw);
        Self {
            harmonics: r.count(&HARMONICS),
            frequency: r.number(&FREQUENCY),
            amplitude: r.number(&AMPLITUDE),
            x_range: r.number(&X_RANGE),
            samples: r.count(&SAMPLES),
            phase: r.number(&PHASE),
            y_spacing: r.number(&Y_SPACING),
            z_spacing: r.number(&Z_SPACING),
            center: r.vec3("center", Vec3::ZERO),
            style: r.style(0.7, 1.5),
        }
    }
}

impl Generator for HarmonicWaveParams {
    fn generate<R: Rng>(&self, _rng: &mut R) -> Vec<Polyline> {
        let harmonics = HARMONICS.clamp(self.harmonics);
        let frequency = FREQUENCY.clamp(self.frequency);
        let amplitude = AMPLITUDE.clamp(self.amplitude);
        let x_range = X_RANGE.clamp(self.x_range);
        let samples = SAMPLES.clamp(self.samples);
        let phase = PHASE.clamp(self.phase);
        let y_spacing = Y_SPACING.clamp(self.y_spacing);
        let z_spacing = Z_SPACING.clamp(self.z_spacing);

        let half = x_range * 0.5;
        (1..=harmonics)
            .map(|k| {
                let kf = k as f32;
                let amp = amplitude / kf;
                let offset = Vec3::new(0.0, (kf - 1.0) * y_spacing, (kf - 1.0) * z_spacing);
                let points = (0..samples)
                    .map(|i| {
                        let x = -half + x_range * i as f32 / (samples - 1) as f32;
                        let y = amp * (frequency * kf * x + phase).sin();
                        self.center + offset + Vec3::new(x, y, 0.0)
                    })
                    .collect();
                // Higher harmonics fade slightly.
                let opacity = (self.style.opacity - 0.05 * (kf - 1.0)).max(0.2);
                Polyline::new(points, self.style.with_opacity(opacity))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use serde_json::json;

    #[test]
    fn one_polyline_per_harmonic_with_decaying_amplitude() {
        let raw = json!({ "harmonics": 4, "amplitude": 2, "frequency": 1, "z_spacing": 0 });
        let wave = HarmonicWaveParams::from_params(raw.as_object().unwrap());
        let lines = wave.generate(&mut StdRng::seed_from_u64(0));
        assert_eq!(lines.len(), 4);
        for (i, line) in lines.iter().enumerate() {
            let k = (i + 1) as f32;
            assert_eq!(line.points.len(), 200);
            let peak = line.points.iter().map(|p| p.y.abs()).fold(0.0f32, f32::max);
            assert!(peak <= 2.0 / k + 1e-4);
            assert!(peak > 2.0 / k * 0.9, "harmonic {} peak {}", k, peak);
        }
    }

    #[test]
    fn wave_spans_the_x_range() {
        let raw = json!({ "harmonics": 1, "x_range": 10 });
        let wave = HarmonicWaveParams::from_params(raw.as_object().unwrap());
        let lines = wave.generate(&mut StdRng::seed_from_u64(0));
        let first = lines[0].points[0];
        let last = *lines[0].points.last().unwrap();
        assert!((first.x + 5.0).abs() < 1e-5);
        assert!((last.x - 5.0).abs() < 1e-4);
    }
}
