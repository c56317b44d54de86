//! Procedural line-art generators.
//!
//! Each generator turns a sanitized, bounded params struct into a list of
//! [`scene_core::Polyline`]s. Raw JSON parameters go through
//! [`AlgorithmKind::sanitize`], which never fails.

pub mod algorithm;
pub mod circles;
pub mod flow_field;
pub mod grid;
pub mod mesh_deform;
pub mod network;
pub mod orbital;
pub mod params;
pub mod particles;
pub mod radial;
pub mod scatter;
pub mod shapes;
pub mod spiral;
pub mod triangulation;
pub mod voronoi;
pub mod wave;

pub use algorithm::{Algorithm, AlgorithmKind, Generator, UnknownAlgorithm};
pub use circles::ConcentricCirclesParams;
pub use flow_field::{FlowFieldParams, VectorField};
pub use grid::GridParams;
pub use mesh_deform::MeshDeformationParams;
pub use network::RandomNetworkParams;
pub use orbital::{Orbit, OrbitalSystemParams};
pub use params::{ParamMap, ParamReader};
pub use particles::{Particle, ParticleSystemParams};
pub use radial::RadialLinesParams;
pub use scatter::{Distribution, ScatterParams};
pub use shapes::MarkerShape;
pub use spiral::{LogarithmicSpiralParams, SpiralParams};
pub use triangulation::TriangulationParams;
pub use voronoi::VoronoiParams;
pub use wave::HarmonicWaveParams;
