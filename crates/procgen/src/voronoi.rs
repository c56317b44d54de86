//! Approximate Voronoi partition by rasterized nearest-seed labelling.
//!
//! The domain is sampled on a regular grid; each sample takes the label of its
//! nearest seed, and a boundary segment is emitted on the shared cell edge
//! wherever two adjacent samples disagree. This traces cell borders to within
//! one grid cell and is not an exact Voronoi construction.

use glam::{Vec2, Vec3};
use rand::Rng;
use scene_core::{LineStyle, Polyline};
use std::collections::HashSet;

use crate::algorithm::Generator;
use crate::params::{CountField, NumberField, ParamMap, ParamReader};
use crate::shapes::{cross, square};

/// Ceiling on emitted polylines, border and seed markers included.
pub const MAX_SEGMENTS: usize = 4000;

pub const SEEDS: CountField = CountField::new("seeds", 12, 2, 50);
pub const SIZE: NumberField = NumberField::new("size", 10.0, 1.0, 20.0);
pub const RESOLUTION: CountField = CountField::new("resolution", 60, 8, 160);

#[derive(Debug, Clone, PartialEq)]
pub struct VoronoiParams {
    pub seeds: usize,
    /// Side length of the square domain.
    pub size: f32,
    /// Samples per side of the labelling grid.
    pub resolution: usize,
    pub show_seeds: bool,
    pub border: bool,
    pub center: Vec3,
    pub style: LineStyle,
}

impl Default for VoronoiParams {
    fn default() -> Self {
        Self::from_params(&ParamMap::new())
    }
}

impl VoronoiParams {
    pub fn from_params(raw: &ParamMap) -> Self {
        let r = ParamReader::new(raw);
        Self {
            seeds: r.count(&SEEDS),
            size: r.number(&SIZE),
            resolution: r.count(&RESOLUTION),
            show_seeds: r.flag("show_seeds", false),
            border: r.flag("border", true),
            center: r.vec3("center", Vec3::ZERO),
            style: r.style(0.6, 1.0),
        }
    }
}

/// Index of the seed nearest to `p`.
fn nearest_seed(seeds: &[Vec2], p: Vec2) -> usize {
    seeds
        .iter()
        .enumerate()
        .map(|(i, s)| (i, s.distance_squared(p)))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Boundary segments allowed once the border square and seed marker
/// polylines are counted against [`MAX_SEGMENTS`].
pub fn boundary_budget(border: bool, marker_lines: usize) -> usize {
    MAX_SEGMENTS.saturating_sub(usize::from(border) + marker_lines)
}

impl Generator for VoronoiParams {
    fn generate<R: Rng>(&self, rng: &mut R) -> Vec<Polyline> {
        let seed_count = SEEDS.clamp(self.seeds);
        let size = SIZE.clamp(self.size);
        let res = RESOLUTION.clamp(self.resolution);
        let half = size * 0.5;
        let cell = size / res as f32;

        let seeds: Vec<Vec2> = (0..seed_count)
            .map(|_| Vec2::new(rng.gen_range(-half..=half), rng.gen_range(-half..=half)))
            .collect();

        let labels: Vec<usize> = (0..res * res)
            .map(|idx| {
                let (x, y) = (idx % res, idx / res);
                let p = Vec2::new(-half + (x as f32 + 0.5) * cell, -half + (y as f32 + 0.5) * cell);
                nearest_seed(&seeds, p)
            })
            .collect();

        let at = |x: f32, y: f32| self.center + Vec3::new(x, y, 0.0);
        let mut lines = Vec::new();
        if self.border {
            lines.push(square(self.center, half, self.style));
        }

        let markers = if self.show_seeds { 2 * seeds.len() } else { 0 };
        let boundary_cap = boundary_budget(self.border, markers);

        // Each boundary is keyed by its unordered pair of sample indices.
        let mut seen: HashSet<(usize, usize)> = HashSet::new();
        let neighbors: [(i64, i64); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
        'cells: for y in 0..res {
            for x in 0..res {
                let idx = y * res + x;
                for (dx, dy) in neighbors {
                    let nx = x as i64 + dx;
                    let ny = y as i64 + dy;
                    if nx < 0 || ny < 0 || nx >= res as i64 || ny >= res as i64 {
                        continue;
                    }
                    let nidx = ny as usize * res + nx as usize;
                    if labels[idx] == labels[nidx] || !seen.insert((idx.min(nidx), idx.max(nidx))) {
                        continue;
                    }
                    if seen.len() > boundary_cap {
                        log::debug!("Voronoi output capped at {} lines", MAX_SEGMENTS);
                        break 'cells;
                    }

                    // Shared edge between the two samples.
                    let (lx, ly) = (x.min(nx as usize), y.min(ny as usize));
                    let x0 = -half + lx as f32 * cell;
                    let y0 = -half + ly as f32 * cell;
                    let segment = if dx != 0 {
                        Polyline::segment(at(x0 + cell, y0), at(x0 + cell, y0 + cell), self.style)
                    } else {
                        Polyline::segment(at(x0, y0 + cell), at(x0 + cell, y0 + cell), self.style)
                    };
                    lines.push(segment);
                }
            }
        }

        if self.show_seeds {
            let marker_style = self.style.with_opacity((self.style.opacity + 0.3).min(1.0));
            for s in &seeds {
                lines.extend(cross(at(s.x, s.y), cell.max(0.08), marker_style));
            }
        }
        lines
    }
}
