//! Fixed composition returned when normal generation cannot produce a scene.

use procgen::shapes::{ring, square};
use scene_core::{Camera, LineStyle, Polyline, Vec3};
use std::f32::consts::TAU;

use crate::output::{SceneMetadata, SceneOutput};

pub const FALLBACK_TITLE: &str = "Fallback Composition";
pub const FALLBACK_DESCRIPTION: &str = "Concentric rings and spokes shown when the requested scene could not be generated";
pub const FALLBACK_NAME: &str = "fallback";

const RING_RADII: [f32; 4] = [1.5, 3.0, 4.5, 6.0];
const RING_SEGMENTS: usize = 48;
const SPOKES: usize = 12;
const SPOKE_LENGTH: f32 = 6.0;
const MARKERS: usize = 8;
const MARKER_RADIUS: f32 = 4.5;
const MARKER_SIZE: f32 = 0.3;

/// Rings, then spokes, then square markers.
pub fn fallback_lines() -> Vec<Polyline> {
    let mut lines = Vec::with_capacity(RING_RADII.len() + SPOKES + MARKERS);

    let ring_style = LineStyle::new(0.7, 1.5);
    for radius in RING_RADII {
        lines.push(ring(Vec3::ZERO, radius, RING_SEGMENTS, ring_style));
    }

    let spoke_style = LineStyle::new(0.4, 1.0);
    for i in 0..SPOKES {
        let angle = i as f32 / SPOKES as f32 * TAU;
        let tip = Vec3::new(angle.cos(), angle.sin(), 0.0) * SPOKE_LENGTH;
        lines.push(Polyline::segment(Vec3::ZERO, tip, spoke_style));
    }

    // Offset by half a step so markers sit between spokes.
    let marker_style = LineStyle::new(0.8, 1.0);
    for i in 0..MARKERS {
        let angle = (i as f32 + 0.5) / MARKERS as f32 * TAU;
        let center = Vec3::new(angle.cos(), angle.sin(), 0.0) * MARKER_RADIUS;
        lines.push(square(center, MARKER_SIZE, marker_style));
    }
    lines
}

/// Build the fallback scene. `warnings` collected so far are kept and the
/// reason is appended.
pub fn fallback_scene(reason: &str, seed: u64, mut warnings: Vec<String>) -> SceneOutput {
    log::warn!("Using fallback composition: {}", reason);
    warnings.push(format!("Fallback composition used: {}", reason));

    let lines = fallback_lines();
    SceneOutput {
        title: FALLBACK_TITLE.to_string(),
        description: FALLBACK_DESCRIPTION.to_string(),
        camera: Camera::default(),
        metadata: SceneMetadata {
            algorithms_used: vec![FALLBACK_NAME.to_string()],
            total_lines: lines.len(),
            warnings,
            seed,
            fallback: true,
            ..SceneMetadata::default()
        },
        lines,
    }
}
