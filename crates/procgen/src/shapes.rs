//! Small reusable shapes: rings and point markers.

use glam::Vec3;
use scene_core::{LineStyle, Polyline};
use std::f32::consts::TAU;
use std::str::FromStr;

/// Segments used for a circle marker.
const CIRCLE_MARKER_SEGMENTS: usize = 8;

/// Shape drawn at each marked point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerShape {
    #[default]
    Cross,
    Circle,
    Square,
}

impl FromStr for MarkerShape {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cross" | "plus" | "x" => Ok(MarkerShape::Cross),
            "circle" | "ring" | "dot" => Ok(MarkerShape::Circle),
            "square" | "box" => Ok(MarkerShape::Square),
            _ => Err(()),
        }
    }
}

impl MarkerShape {
    /// How many polylines one marker of this shape takes.
    pub fn polylines_per_marker(self) -> usize {
        match self {
            MarkerShape::Cross => 2,
            MarkerShape::Circle | MarkerShape::Square => 1,
        }
    }
}

/// Closed regular polygon in the XY plane approximating a circle.
/// The last point repeats the first.
pub fn ring(center: Vec3, radius: f32, segments: usize, style: LineStyle) -> Polyline {
    let segments = segments.max(3);
    let points = (0..=segments)
        .map(|i| {
            let angle = if i == segments {
                0.0
            } else {
                i as f32 / segments as f32 * TAU
            };
            center + Vec3::new(angle.cos() * radius, angle.sin() * radius, 0.0)
        })
        .collect();
    Polyline::new(points, style)
}

/// Two crossing strokes of half-length `size`.
pub fn cross(center: Vec3, size: f32, style: LineStyle) -> [Polyline; 2] {
    [
        Polyline::segment(center - Vec3::X * size, center + Vec3::X * size, style),
        Polyline::segment(center - Vec3::Y * size, center + Vec3::Y * size, style),
    ]
}

/// Closed axis-aligned square of half-extent `size`.
pub fn square(center: Vec3, size: f32, style: LineStyle) -> Polyline {
    let corners = [
        Vec3::new(-size, -size, 0.0),
        Vec3::new(size, -size, 0.0),
        Vec3::new(size, size, 0.0),
        Vec3::new(-size, size, 0.0),
        Vec3::new(-size, -size, 0.0),
    ];
    Polyline::new(corners.iter().map(|c| center + *c).collect(), style)
}

/// Append the marker for `center` to `out`.
pub fn push_marker(out: &mut Vec<Polyline>, shape: MarkerShape, center: Vec3, size: f32, style: LineStyle) {
    match shape {
        MarkerShape::Cross => out.extend(cross(center, size, style)),
        MarkerShape::Circle => out.push(ring(center, size, CIRCLE_MARKER_SEGMENTS, style)),
        MarkerShape::Square => out.push(square(center, size, style)),
    }
}
