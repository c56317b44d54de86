//! Scene camera and its validation.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Largest absolute value allowed for any camera position component.
pub const POSITION_LIMIT: f32 = 50.0;
/// Largest absolute value allowed for any look-at component.
pub const LOOK_AT_LIMIT: f32 = 20.0;

/// Camera placement handed to the rendering client.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    #[serde(rename = "lookAt")]
    pub look_at: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 12.0),
            look_at: Vec3::ZERO,
        }
    }
}

/// Why a proposed camera was replaced with the default.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CameraIssue {
    #[error("camera must be an object")]
    NotAnObject,
    #[error("camera is missing `{0}`")]
    Missing(&'static str),
    #[error("camera `{field}` must have 3 components, found {found}")]
    Arity { field: &'static str, found: usize },
    #[error("camera `{0}` has a non-numeric or non-finite component")]
    NotFinite(&'static str),
    #[error("camera `{field}` component {value} is outside ±{limit}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        limit: f32,
    },
}

impl Camera {
    /// Create a camera at `position` looking at `look_at`.
    pub fn new(position: Vec3, look_at: Vec3) -> Self {
        Self { position, look_at }
    }

    /// Parse and range-check a camera object of the shape
    /// `{ "position": [x, y, z], "lookAt": [x, y, z] }`.
    pub fn from_value(value: &Value) -> Result<Self, CameraIssue> {
        let object = value.as_object().ok_or(CameraIssue::NotAnObject)?;
        let position = object
            .get("position")
            .ok_or(CameraIssue::Missing("position"))?;
        let look_at = object
            .get("lookAt")
            .or_else(|| object.get("look_at"))
            .or_else(|| object.get("target"))
            .ok_or(CameraIssue::Missing("lookAt"))?;

        Ok(Self {
            position: bounded_vec3(position, "position", POSITION_LIMIT)?,
            look_at: bounded_vec3(look_at, "lookAt", LOOK_AT_LIMIT)?,
        })
    }

    /// Validate an optional camera, substituting the default on any violation.
    /// The issue is returned alongside so the caller can report it.
    pub fn validate(raw: Option<&Value>) -> (Self, Option<CameraIssue>) {
        match raw {
            None | Some(Value::Null) => (Self::default(), None),
            Some(value) => match Self::from_value(value) {
                Ok(camera) => (camera, None),
                Err(issue) => {
                    log::warn!("Invalid camera ({}), using default", issue);
                    (Self::default(), Some(issue))
                }
            },
        }
    }
}

fn bounded_vec3(value: &Value, field: &'static str, limit: f32) -> Result<Vec3, CameraIssue> {
    let items = value.as_array().ok_or(CameraIssue::Arity { field, found: 0 })?;
    if items.len() != 3 {
        return Err(CameraIssue::Arity {
            field,
            found: items.len(),
        });
    }

    let mut out = [0.0f32; 3];
    for (slot, item) in out.iter_mut().zip(items) {
        let v = component(item).ok_or(CameraIssue::NotFinite(field))?;
        if v.abs() > limit {
            return Err(CameraIssue::OutOfRange {
                field,
                value: v,
                limit,
            });
        }
        *slot = v;
    }
    Ok(Vec3::from_array(out))
}

fn component(value: &Value) -> Option<f32> {
    let v = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    let v = v as f32;
    v.is_finite().then_some(v)
}
