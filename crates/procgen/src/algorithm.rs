//! Algorithm registry.
//!
//! [`AlgorithmKind`] names every generator the engine knows about; sanitizing a
//! raw parameter map against a kind yields an [`Algorithm`], which carries the
//! bounded params struct and implements [`Generator`].

use rand::Rng;
use scene_core::Polyline;
use std::fmt;
use std::str::FromStr;

use crate::circles::ConcentricCirclesParams;
use crate::flow_field::FlowFieldParams;
use crate::grid::GridParams;
use crate::mesh_deform::MeshDeformationParams;
use crate::network::RandomNetworkParams;
use crate::orbital::OrbitalSystemParams;
use crate::params::ParamMap;
use crate::particles::ParticleSystemParams;
use crate::radial::RadialLinesParams;
use crate::scatter::ScatterParams;
use crate::spiral::{LogarithmicSpiralParams, SpiralParams};
use crate::triangulation::TriangulationParams;
use crate::voronoi::VoronoiParams;
use crate::wave::HarmonicWaveParams;

/// Shared generator capability.
///
/// Implementations must terminate for every parameter value they can hold and
/// only ever draw randomness from `rng`.
pub trait Generator {
    fn generate<R: Rng>(&self, rng: &mut R) -> Vec<Polyline>;
}

/// Every registered algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmKind {
    Grid,
    ConcentricCircles,
    RadialLines,
    RandomNetwork,
    Spiral,
    LogarithmicSpiral,
    HarmonicWave,
    Scatter,
    Voronoi,
    Triangulation,
    MeshDeformation,
    ParticleSystem,
    OrbitalSystem,
    FlowField,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 14] = [
        AlgorithmKind::Grid,
        AlgorithmKind::ConcentricCircles,
        AlgorithmKind::RadialLines,
        AlgorithmKind::RandomNetwork,
        AlgorithmKind::Spiral,
        AlgorithmKind::LogarithmicSpiral,
        AlgorithmKind::HarmonicWave,
        AlgorithmKind::Scatter,
        AlgorithmKind::Voronoi,
        AlgorithmKind::Triangulation,
        AlgorithmKind::MeshDeformation,
        AlgorithmKind::ParticleSystem,
        AlgorithmKind::OrbitalSystem,
        AlgorithmKind::FlowField,
    ];

    /// Canonical snake_case name.
    pub fn name(self) -> &'static str {
        match self {
            AlgorithmKind::Grid => "grid",
            AlgorithmKind::ConcentricCircles => "concentric_circles",
            AlgorithmKind::RadialLines => "radial_lines",
            AlgorithmKind::RandomNetwork => "random_network",
            AlgorithmKind::Spiral => "spiral",
            AlgorithmKind::LogarithmicSpiral => "logarithmic_spiral",
            AlgorithmKind::HarmonicWave => "harmonic_wave",
            AlgorithmKind::Scatter => "scatter",
            AlgorithmKind::Voronoi => "voronoi",
            AlgorithmKind::Triangulation => "triangulation",
            AlgorithmKind::MeshDeformation => "mesh_deformation",
            AlgorithmKind::ParticleSystem => "particle_system",
            AlgorithmKind::OrbitalSystem => "orbital_system",
            AlgorithmKind::FlowField => "flow_field",
        }
    }

    /// Alternative tags accepted for this kind.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            AlgorithmKind::Grid => &[],
            AlgorithmKind::ConcentricCircles => &["circles", "rings"],
            AlgorithmKind::RadialLines => &["radial", "rays"],
            AlgorithmKind::RandomNetwork => &["network", "graph"],
            AlgorithmKind::Spiral => &["archimedean_spiral"],
            AlgorithmKind::LogarithmicSpiral => &["log_spiral"],
            AlgorithmKind::HarmonicWave => &["wave", "harmonics"],
            AlgorithmKind::Scatter => &["scatter_plot", "points"],
            AlgorithmKind::Voronoi => &["voronoi_partition", "cells"],
            AlgorithmKind::Triangulation => &["delaunay", "proximity_graph"],
            AlgorithmKind::MeshDeformation => &["mesh", "deformed_mesh"],
            AlgorithmKind::ParticleSystem => &["particles", "particle_simulation"],
            AlgorithmKind::OrbitalSystem => &["orbits", "orbital"],
            AlgorithmKind::FlowField => &["flow", "vector_field"],
        }
    }

    /// Resolve a loosely written tag (`"Flow-Field"`, `"log spiral"`, ...).
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag: String = tag
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == tag || kind.aliases().contains(&tag.as_str()))
    }

    /// Coerce and clamp `raw` into this kind's params. Never fails.
    pub fn sanitize(self, raw: &ParamMap) -> Algorithm {
        match self {
            AlgorithmKind::Grid => Algorithm::Grid(GridParams::from_params(raw)),
            AlgorithmKind::ConcentricCircles => {
                Algorithm::ConcentricCircles(ConcentricCirclesParams::from_params(raw))
            }
            AlgorithmKind::RadialLines => Algorithm::RadialLines(RadialLinesParams::from_params(raw)),
            AlgorithmKind::RandomNetwork => Algorithm::RandomNetwork(RandomNetworkParams::from_params(raw)),
            AlgorithmKind::Spiral => Algorithm::Spiral(SpiralParams::from_params(raw)),
            AlgorithmKind::LogarithmicSpiral => {
                Algorithm::LogarithmicSpiral(LogarithmicSpiralParams::from_params(raw))
            }
            AlgorithmKind::HarmonicWave => Algorithm::HarmonicWave(HarmonicWaveParams::from_params(raw)),
            AlgorithmKind::Scatter => Algorithm::Scatter(ScatterParams::from_params(raw)),
            AlgorithmKind::Voronoi => Algorithm::Voronoi(VoronoiParams::from_params(raw)),
            AlgorithmKind::Triangulation => Algorithm::Triangulation(TriangulationParams::from_params(raw)),
            AlgorithmKind::MeshDeformation => {
                Algorithm::MeshDeformation(MeshDeformationParams::from_params(raw))
            }
            AlgorithmKind::ParticleSystem => Algorithm::ParticleSystem(ParticleSystemParams::from_params(raw)),
            AlgorithmKind::OrbitalSystem => Algorithm::OrbitalSystem(OrbitalSystemParams::from_params(raw)),
            AlgorithmKind::FlowField => Algorithm::FlowField(FlowFieldParams::from_params(raw)),
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A type tag that names no registered algorithm.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown algorithm '{0}'")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for AlgorithmKind {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}

/// A sanitized, ready-to-run invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Algorithm {
    Grid(GridParams),
    ConcentricCircles(ConcentricCirclesParams),
    RadialLines(RadialLinesParams),
    RandomNetwork(RandomNetworkParams),
    Spiral(SpiralParams),
    LogarithmicSpiral(LogarithmicSpiralParams),
    HarmonicWave(HarmonicWaveParams),
    Scatter(ScatterParams),
    Voronoi(VoronoiParams),
    Triangulation(TriangulationParams),
    MeshDeformation(MeshDeformationParams),
    ParticleSystem(ParticleSystemParams),
    OrbitalSystem(OrbitalSystemParams),
    FlowField(FlowFieldParams),
}

impl Algorithm {
    pub fn kind(&self) -> AlgorithmKind {
        match self {
            Algorithm::Grid(_) => AlgorithmKind::Grid,
            Algorithm::ConcentricCircles(_) => AlgorithmKind::ConcentricCircles,
            Algorithm::RadialLines(_) => AlgorithmKind::RadialLines,
            Algorithm::RandomNetwork(_) => AlgorithmKind::RandomNetwork,
            Algorithm::Spiral(_) => AlgorithmKind::Spiral,
            Algorithm::LogarithmicSpiral(_) => AlgorithmKind::LogarithmicSpiral,
            Algorithm::HarmonicWave(_) => AlgorithmKind::HarmonicWave,
            Algorithm::Scatter(_) => AlgorithmKind::Scatter,
            Algorithm::Voronoi(_) => AlgorithmKind::Voronoi,
            Algorithm::Triangulation(_) => AlgorithmKind::Triangulation,
            Algorithm::MeshDeformation(_) => AlgorithmKind::MeshDeformation,
            Algorithm::ParticleSystem(_) => AlgorithmKind::ParticleSystem,
            Algorithm::OrbitalSystem(_) => AlgorithmKind::OrbitalSystem,
            Algorithm::FlowField(_) => AlgorithmKind::FlowField,
        }
    }
}

impl Generator for Algorithm {
    fn generate<R: Rng>(&self, rng: &mut R) -> Vec<Polyline> {
        match self {
            Algorithm::Grid(p) => p.generate(rng),
            Algorithm::ConcentricCircles(p) => p.generate(rng),
            Algorithm::RadialLines(p) => p.generate(rng),
            Algorithm::RandomNetwork(p) => p.generate(rng),
            Algorithm::Spiral(p) => p.generate(rng),
            Algorithm::LogarithmicSpiral(p) => p.generate(rng),
            Algorithm::HarmonicWave(p) => p.generate(rng),
            Algorithm::Scatter(p) => p.generate(rng),
            Algorithm::Voronoi(p) => p.generate(rng),
            Algorithm::Triangulation(p) => p.generate(rng),
            Algorithm::MeshDeformation(p) => p.generate(rng),
            Algorithm::ParticleSystem(p) => p.generate(rng),
            Algorithm::OrbitalSystem(p) => p.generate(rng),
            Algorithm::FlowField(p) => p.generate(rng),
        }
    }
}
