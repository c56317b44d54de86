//! Sparse-scene enhancement: faint guide lines behind scenes with very few
//! lines, chosen by the scene's visual approach.

use scene_core::{LineStyle, Polyline, Vec3};
use std::str::FromStr;

use crate::budget::truncate;

/// Declared visual style of a scene. Only these three get guide lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualApproach {
    Geometric,
    Organic,
    Technical,
}

impl FromStr for VisualApproach {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "geometric" => Ok(VisualApproach::Geometric),
            "organic" => Ok(VisualApproach::Organic),
            "technical" => Ok(VisualApproach::Technical),
            _ => Err(()),
        }
    }
}

impl VisualApproach {
    pub fn name(self) -> &'static str {
        match self {
            VisualApproach::Geometric => "geometric",
            VisualApproach::Organic => "organic",
            VisualApproach::Technical => "technical",
        }
    }

    /// Scenes with fewer lines than this are enhanced.
    pub fn sparse_threshold(self) -> usize {
        match self {
            VisualApproach::Geometric => 30,
            VisualApproach::Organic => 40,
            VisualApproach::Technical => 80,
        }
    }

    pub fn guides(self) -> Vec<Polyline> {
        match self {
            VisualApproach::Geometric => guide_grid(2, 0.2),
            VisualApproach::Organic => organic_flows(),
            VisualApproach::Technical => guide_grid(4, 0.3),
        }
    }
}

/// Lines at integer coordinates in `-extent..=extent`: for each coordinate the
/// vertical line, then the horizontal one.
pub fn guide_grid(extent: i32, opacity: f32) -> Vec<Polyline> {
    let style = LineStyle::new(opacity, 1.0);
    let e = extent as f32;
    let mut lines = Vec::with_capacity(2 * (2 * extent.max(0) as usize + 1));
    for i in -extent..=extent {
        let c = i as f32;
        lines.push(Polyline::segment(Vec3::new(c, -e, 0.0), Vec3::new(c, e, 0.0), style));
        lines.push(Polyline::segment(Vec3::new(-e, c, 0.0), Vec3::new(e, c, 0.0), style));
    }
    lines
}

const FLOWS: usize = 3;
const FLOW_SAMPLES: usize = 20;

/// Three stacked sine curves over `x ∈ [-3, 3]`.
pub fn organic_flows() -> Vec<Polyline> {
    let style = LineStyle::new(0.4, 1.0);
    (0..FLOWS)
        .map(|flow| {
            let f = flow as f32;
            let points = (0..=FLOW_SAMPLES)
                .map(|i| {
                    let x = -3.0 + i as f32 * 0.3;
                    Vec3::new(x, (x + f).sin() * 0.5 + f * 0.8 - 1.0, 0.0)
                })
                .collect();
            Polyline::new(points, style)
        })
        .collect()
}

/// Guide lines to append to a scene of `current` lines, or `None` when the
/// scene has no enhanced approach, is dense enough, is empty, or is already at
/// the global cap.
pub fn sparse_scene_guides(
    current: usize,
    approach: Option<VisualApproach>,
    max_total_lines: usize,
) -> Option<Vec<Polyline>> {
    let approach = approach?;
    if current == 0 || current >= approach.sparse_threshold() {
        return None;
    }
    let guides = truncate(approach.guides(), max_total_lines.saturating_sub(current));
    (!guides.is_empty()).then_some(guides)
}
