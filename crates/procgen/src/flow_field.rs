//! Flow-field advection.
//!
//! A synthetic vector field is precomputed on a grid from Perlin noise and
//! sampled with bilinear interpolation; particles follow it for a fixed number
//! of steps and reflect off the domain edges.

use glam::{IVec2, Vec2, Vec3};
use noise::{NoiseFn, Perlin};
use rand::Rng;
use scene_core::{LineStyle, Polyline};
use std::f32::consts::TAU;

use crate::algorithm::Generator;
use crate::params::{CountField, NumberField, ParamMap, ParamReader};

/// Fixed noise seed so the field depends only on position and complexity.
const FIELD_SEED: u32 = 0x5EED_F10;
/// Grid cell size in world units.
const CELL_SIZE: f32 = 0.25;
/// Base noise frequency, scaled by complexity.
const BASE_FREQUENCY: f64 = 0.2;

pub const PARTICLES: CountField = CountField::new("particles", 60, 1, 300);
pub const STEPS: CountField = CountField::new("steps", 80, 2, 300);
pub const STEP_SIZE: NumberField = NumberField::new("step_size", 0.1, 0.01, 1.0);
pub const COMPLEXITY: NumberField = NumberField::new("complexity", 1.0, 0.1, 5.0);
pub const BOUNDS: NumberField = NumberField::new("bounds", 6.0, 1.0, 20.0);

/// A grid of unit direction vectors.
#[derive(Debug)]
pub struct VectorField {
    /// Width of the grid.
    pub width: usize,
    /// Height of the grid.
    pub height: usize,
    /// Cell size in world units.
    pub cell_size: f32,
    /// Origin of the grid in world space.
    pub origin: Vec2,
    /// Flow directions (normalized), row-major.
    directions: Vec<Vec2>,
}

impl VectorField {
    /// Build a field whose direction at each cell center is `angle(position)`.
    pub fn from_angle_fn(
        width: usize,
        height: usize,
        cell_size: f32,
        origin: Vec2,
        angle: impl Fn(Vec2) -> f32,
    ) -> Self {
        let mut field = Self {
            width,
            height,
            cell_size,
            origin,
            directions: vec![Vec2::ZERO; width * height],
        };
        for y in 0..height {
            for x in 0..width {
                let a = angle(field.grid_to_world(IVec2::new(x as i32, y as i32)));
                field.directions[y * width + x] = Vec2::new(a.cos(), a.sin());
            }
        }
        field
    }

    /// Noise-driven field covering `[-half, half]²`.
    pub fn noise(half: f32, complexity: f32) -> Self {
        let cells = ((2.0 * half / CELL_SIZE).ceil() as usize).max(1) + 1;
        let perlin = Perlin::new(FIELD_SEED);
        Self::from_angle_fn(cells, cells, CELL_SIZE, Vec2::splat(-half), |p| {
            field_angle(&perlin, p, complexity)
        })
    }

    /// Convert world position to grid coordinates.
    pub fn world_to_grid(&self, world_pos: Vec2) -> IVec2 {
        let local = world_pos - self.origin;
        IVec2::new(
            (local.x / self.cell_size).floor() as i32,
            (local.y / self.cell_size).floor() as i32,
        )
    }

    /// Convert grid coordinates to world position (center of cell).
    pub fn grid_to_world(&self, grid_pos: IVec2) -> Vec2 {
        self.origin + (grid_pos.as_vec2() + Vec2::splat(0.5)) * self.cell_size
    }

    /// Direction of the cell containing `world_pos`; zero outside the grid.
    pub fn sample(&self, world_pos: Vec2) -> Vec2 {
        let g = self.world_to_grid(world_pos);
        self.sample_grid(g.x, g.y)
    }

    /// Bilinear interpolation of the four surrounding cell centers.
    pub fn sample_smooth(&self, world_pos: Vec2) -> Vec2 {
        let local = world_pos - self.origin;
        let gx = local.x / self.cell_size - 0.5;
        let gy = local.y / self.cell_size - 0.5;

        let x0 = gx.floor() as i32;
        let y0 = gy.floor() as i32;
        let fx = gx - gx.floor();
        let fy = gy - gy.floor();

        let d00 = self.sample_grid(x0, y0);
        let d10 = self.sample_grid(x0 + 1, y0);
        let d01 = self.sample_grid(x0, y0 + 1);
        let d11 = self.sample_grid(x0 + 1, y0 + 1);
        let d0 = d00 * (1.0 - fx) + d10 * fx;
        let d1 = d01 * (1.0 - fx) + d11 * fx;
        (d0 * (1.0 - fy) + d1 * fy).normalize_or_zero()
    }

    fn sample_grid(&self, x: i32, y: i32) -> Vec2 {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return Vec2::ZERO;
        }
        self.directions[y as usize * self.width + x as usize]
    }
}

/// Flow angle at `p`. Deterministic in position and complexity.
pub fn field_angle(perlin: &Perlin, p: Vec2, complexity: f32) -> f32 {
    let f = BASE_FREQUENCY * complexity as f64;
    perlin.get([p.x as f64 * f, p.y as f64 * f]) as f32 * TAU
}

/// Trace one particle from `start` through `field`, reflecting at `±half`.
pub fn advect(field: &VectorField, start: Vec2, steps: usize, step_size: f32, half: f32) -> Vec<Vec2> {
    let mut pos = start;
    let mut vel = field.sample_smooth(pos);
    let mut path = Vec::with_capacity(steps + 1);
    path.push(pos);
    for _ in 0..steps {
        let flow = field.sample_smooth(pos);
        // Carry momentum so reflections are not immediately undone by the field.
        vel = (vel + flow).try_normalize().unwrap_or(flow);
        pos += vel * step_size;

        if pos.x.abs() > half {
            pos.x = (pos.x.signum() * 2.0 * half - pos.x).clamp(-half, half);
            vel.x = -vel.x;
        }
        if pos.y.abs() > half {
            pos.y = (pos.y.signum() * 2.0 * half - pos.y).clamp(-half, half);
            vel.y = -vel.y;
        }
        path.push(pos);
    }
    path
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlowFieldParams {
    pub particles: usize,
    pub steps: usize,
    pub step_size: f32,
    /// Higher values fold the field into tighter swirls.
    pub complexity: f32,
    /// Half-extent of the square domain.
    pub bounds: f32,
    pub arrows: bool,
    pub center: Vec3,
    pub style: LineStyle,
}

impl Default for FlowFieldParams {
    fn default() -> Self {
        Self::from_params(&ParamMap::new())
    }
}

impl FlowFieldParams {
    pub fn from_params(raw: &ParamMap) -> Self {
        let r = ParamReader::new(raw);
        Self {
            particles: r.count(&PARTICLES),
            steps: r.count(&STEPS),
            step_size: r.number(&STEP_SIZE),
            complexity: r.number(&COMPLEXITY),
            bounds: r.number(&BOUNDS),
            arrows: r.flag("arrows", false),
            center: r.vec3("center", Vec3::ZERO),
            style: r.style(0.6, 1.0),
        }
    }
}

impl Generator for FlowFieldParams {
    fn generate<R: Rng>(&self, rng: &mut R) -> Vec<Polyline> {
        let particles = PARTICLES.clamp(self.particles);
        let steps = STEPS.clamp(self.steps);
        let step_size = STEP_SIZE.clamp(self.step_size);
        let complexity = COMPLEXITY.clamp(self.complexity);
        let half = BOUNDS.clamp(self.bounds);

        let field = VectorField::noise(half, complexity);
        (0..particles)
            .map(|_| {
                let start = Vec2::new(rng.gen_range(-half..=half), rng.gen_range(-half..=half));
                let points = advect(&field, start, steps, step_size, half)
                    .into_iter()
                    .map(|p| self.center + p.extend(0.0))
                    .collect();
                let line = Polyline::new(points, self.style);
                if self.arrows {
                    line.with_arrow()
                } else {
                    line
                }
            })
            .collect()
    }
}
