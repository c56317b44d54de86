//! Core scene types shared by the line-art generators and the composer.
//!
//! This crate provides the foundational types used across the workspace:
//! - Polylines and their line style
//! - Geometry validation for generated polylines
//! - Camera validation
//! - Step timing

pub mod camera;
pub mod polyline;
pub mod time;
pub mod validate;

pub use camera::*;
pub use polyline::*;
pub use time::*;
pub use validate::*;

// Re-export commonly used types
pub use glam::{Vec2, Vec3};
