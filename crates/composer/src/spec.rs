//! Scene spec parsing.
//!
//! The spec document comes from an untrusted upstream, so only the outer
//! structure is allowed to fail. Individual entries that cannot be used are
//! dropped and reported instead.

use procgen::{AlgorithmKind, ParamMap, UnknownAlgorithm};
use serde_json::Value;

use crate::enhance::VisualApproach;

pub const DEFAULT_TITLE: &str = "Generated Composition";
pub const DEFAULT_DESCRIPTION: &str = "Procedurally generated line composition";
pub const MAX_TITLE_CHARS: usize = 200;
pub const MAX_DESCRIPTION_CHARS: usize = 1000;

/// Structural failures that route a request to the fallback scene.
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    #[error("scene spec is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("scene spec must be a JSON object")]
    NotAnObject,
    #[error("scene spec has no `algorithms` list")]
    MissingAlgorithms,
    #[error("scene spec `algorithms` must be a list")]
    AlgorithmsNotAList,
}

/// One requested generator run.
#[derive(Debug, Clone, PartialEq)]
pub struct AlgorithmInvocation {
    pub kind: AlgorithmKind,
    pub params: ParamMap,
}

impl AlgorithmInvocation {
    pub fn new(kind: AlgorithmKind, params: ParamMap) -> Self {
        Self { kind, params }
    }

    /// Parse one entry of the `algorithms` list.
    ///
    /// `params` may be nested under `params` or written inline next to `type`.
    fn from_value(entry: &Value) -> Result<Self, String> {
        let object = entry
            .as_object()
            .ok_or_else(|| "algorithm entry is not an object".to_string())?;
        let tag = object
            .get("type")
            .or_else(|| object.get("algorithm"))
            .and_then(Value::as_str)
            .ok_or_else(|| "algorithm entry has no `type`".to_string())?;
        let kind: AlgorithmKind = tag.parse().map_err(|err: UnknownAlgorithm| err.to_string())?;

        let params = match object.get("params") {
            Some(Value::Object(params)) => params.clone(),
            Some(_) => ParamMap::new(),
            None => object
                .iter()
                .filter(|(key, _)| key.as_str() != "type" && key.as_str() != "algorithm")
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        };
        Ok(Self { kind, params })
    }
}

/// A parsed scene request.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSpec {
    pub title: String,
    pub description: String,
    pub algorithms: Vec<AlgorithmInvocation>,
    /// Raw camera object, checked later by the camera validator.
    pub camera: Option<Value>,
    /// Unrecognised or absent approaches are `None`.
    pub visual_approach: Option<VisualApproach>,
    /// Why entries of the `algorithms` list were dropped.
    pub dropped: Vec<String>,
}

impl Default for SceneSpec {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            algorithms: Vec::new(),
            camera: None,
            visual_approach: None,
            dropped: Vec::new(),
        }
    }
}

impl SceneSpec {
    pub fn new(algorithms: Vec<AlgorithmInvocation>) -> Self {
        Self {
            algorithms,
            ..Self::default()
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self, SpecError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self, SpecError> {
        let object = value.as_object().ok_or(SpecError::NotAnObject)?;
        let entries = match object.get("algorithms") {
            None | Some(Value::Null) => return Err(SpecError::MissingAlgorithms),
            Some(Value::Array(entries)) => entries,
            Some(_) => return Err(SpecError::AlgorithmsNotAList),
        };

        let mut algorithms = Vec::with_capacity(entries.len());
        let mut dropped = Vec::new();
        for (index, entry) in entries.iter().enumerate() {
            match AlgorithmInvocation::from_value(entry) {
                Ok(invocation) => algorithms.push(invocation),
                Err(reason) => {
                    log::warn!("Dropping algorithm #{}: {}", index, reason);
                    dropped.push(format!("Dropped algorithm #{}: {}", index, reason));
                }
            }
        }

        Ok(Self {
            title: text_field(object.get("title"), MAX_TITLE_CHARS, DEFAULT_TITLE),
            description: text_field(object.get("description"), MAX_DESCRIPTION_CHARS, DEFAULT_DESCRIPTION),
            algorithms,
            camera: object.get("camera").cloned(),
            visual_approach: object
                .get("visual_approach")
                .and_then(Value::as_str)
                .and_then(|s| s.parse().ok()),
            dropped,
        })
    }
}

fn text_field(value: Option<&Value>, max_chars: usize, default: &str) -> String {
    match value.and_then(Value::as_str).map(str::trim) {
        Some(text) if !text.is_empty() => text.chars().take(max_chars).collect(),
        _ => default.to_string(),
    }
}
