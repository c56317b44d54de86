//! The assembled scene document handed to the rendering client.

use scene_core::{Camera, Polyline};
use serde::{Deserialize, Serialize};

/// Per-invocation accounting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmReport {
    pub algorithm: String,
    /// Lines returned by the generator, before validation and caps.
    pub generated: usize,
    /// Lines that made it into the scene.
    pub emitted: usize,
    pub elapsed_ms: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneMetadata {
    pub algorithms_used: Vec<String>,
    pub total_lines: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_algorithms: Vec<String>,
    #[serde(default)]
    pub reports: Vec<AlgorithmReport>,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub fallback: bool,
    #[serde(default)]
    pub enhanced: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneOutput {
    pub title: String,
    pub description: String,
    pub lines: Vec<Polyline>,
    pub camera: Camera,
    pub metadata: SceneMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;
    use scene_core::{LineStyle, Vec3};

    #[test]
    fn serializes_wire_names() {
        let output = SceneOutput {
            title: "t".into(),
            description: "d".into(),
            lines: vec![Polyline::segment(Vec3::ZERO, Vec3::X, LineStyle::default())],
            camera: Camera::default(),
            metadata: SceneMetadata {
                algorithms_used: vec!["grid".into()],
                total_lines: 1,
                ..SceneMetadata::default()
            },
        };
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["lines"][0]["lineWidth"], 1.0);
        assert_eq!(value["lines"][0]["points"][1], serde_json::json!([1.0, 0.0, 0.0]));
        assert_eq!(value["camera"]["lookAt"], serde_json::json!([0.0, 0.0, 0.0]));
        assert_eq!(value["metadata"]["total_lines"], 1);
        assert!(value["metadata"].get("warnings").is_none());
        assert!(value["metadata"].get("skipped_algorithms").is_none());
    }
}
