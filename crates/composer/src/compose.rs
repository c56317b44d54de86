//! The orchestrator: runs a scene spec's invocations in order under the budget
//! and assembles the scene document.

use procgen::{Algorithm, Generator};
use rand::{rngs::StdRng, SeedableRng};
use scene_core::{is_slow, validate_lines, Camera, Polyline, Stopwatch};
use serde_json::Value;
use std::panic::{self, AssertUnwindSafe};

use crate::budget::{Budget, BudgetConfig, Gate};
use crate::enhance::{sparse_scene_guides, VisualApproach};
use crate::fallback::fallback_scene;
use crate::output::{AlgorithmReport, SceneMetadata, SceneOutput};
use crate::spec::{SceneSpec, SpecError};

/// Seed stride between consecutive invocations.
const SEED_STRIDE: u64 = 31337;

/// Seed for the invocation at `index`, independent of earlier invocations' output.
pub fn invocation_seed(seed: u64, index: usize) -> u64 {
    seed.wrapping_add((index as u64).wrapping_add(1).wrapping_mul(SEED_STRIDE))
}

/// Run `f`, turning a panic into an error message.
pub fn isolate<F: FnOnce() -> Vec<Polyline>>(f: F) -> Result<Vec<Polyline>, String> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string())
    })
}

fn run(algorithm: &Algorithm, seed: u64) -> Result<Vec<Polyline>, String> {
    isolate(|| algorithm.generate(&mut StdRng::seed_from_u64(seed)))
}

#[derive(Debug, Clone, Default)]
pub struct Composer {
    config: BudgetConfig,
    seed: Option<u64>,
}

impl Composer {
    pub fn new(config: BudgetConfig) -> Self {
        Self { config, seed: None }
    }

    /// Fix the request seed. Without one, every composition draws a fresh seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn config(&self) -> &BudgetConfig {
        &self.config
    }

    /// Compose from spec text. Never fails: bad input yields the fallback scene.
    pub fn compose_json_str(&self, text: &str) -> SceneOutput {
        self.compose_parsed(SceneSpec::from_json_str(text))
    }

    /// Compose from a parsed JSON document. Never fails.
    pub fn compose_json(&self, value: &Value) -> SceneOutput {
        self.compose_parsed(SceneSpec::from_value(value))
    }

    fn compose_parsed(&self, spec: Result<SceneSpec, SpecError>) -> SceneOutput {
        match spec {
            Ok(spec) => self.compose(spec),
            Err(err) => fallback_scene(&err.to_string(), self.resolve_seed(), Vec::new()),
        }
    }

    fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// Run every admitted invocation in order and assemble the scene.
    pub fn compose(&self, spec: SceneSpec) -> SceneOutput {
        let seed = self.resolve_seed();
        let mut warnings = spec.dropped;

        if spec.algorithms.is_empty() {
            return fallback_scene("scene spec contains no usable algorithms", seed, warnings);
        }

        let (camera, camera_issue) = Camera::validate(spec.camera.as_ref());
        if let Some(issue) = camera_issue {
            warnings.push(format!("Camera replaced with default: {}", issue));
        }

        let mut budget = Budget::new(self.config);
        let mut lines = Vec::new();
        let mut algorithms_used = Vec::new();
        let mut reports = Vec::new();
        let mut over_cap = Vec::new();
        let mut over_budget = Vec::new();

        for (index, invocation) in spec.algorithms.iter().enumerate() {
            let name = invocation.kind.name();
            match budget.begin() {
                Ok(()) => {}
                Err(Gate::InvocationCap) => {
                    over_cap.push(name.to_string());
                    continue;
                }
                Err(_) => {
                    over_budget.push(name.to_string());
                    continue;
                }
            }

            let stopwatch = Stopwatch::start();
            let algorithm = invocation.kind.sanitize(&invocation.params);
            let generated = match run(&algorithm, invocation_seed(seed, index)) {
                Ok(generated) => generated,
                Err(message) => {
                    log::warn!("Algorithm {} failed: {}", name, message);
                    warnings.push(format!("{} failed and was skipped: {}", name, message));
                    Vec::new()
                }
            };
            let generated_count = generated.len();
            let validated = validate_lines(generated);
            let admission = budget.admit(validated.lines);

            if admission.algorithm_capped {
                log::warn!("{} truncated to {} lines", name, self.config.max_lines_per_algorithm);
                warnings.push(format!(
                    "{} produced {} lines, truncated to {}",
                    name, admission.offered, self.config.max_lines_per_algorithm
                ));
            }
            if admission.globally_capped {
                log::warn!("Global line budget reached during {}", name);
                warnings.push(format!(
                    "Global limit of {} lines reached during {}",
                    self.config.max_total_lines, name
                ));
            }

            let elapsed = stopwatch.elapsed();
            if is_slow(elapsed, self.config.slow_threshold()) {
                log::warn!("{} took {:.0} ms", name, stopwatch.elapsed_ms());
                warnings.push(format!("{} was slow ({:.0} ms)", name, stopwatch.elapsed_ms()));
            }

            log::debug!(
                "{}: generated {}, dropped {}, emitted {}",
                name,
                generated_count,
                validated.dropped,
                admission.lines.len()
            );
            reports.push(AlgorithmReport {
                algorithm: name.to_string(),
                generated: generated_count,
                emitted: admission.lines.len(),
                elapsed_ms: elapsed.as_secs_f64() * 1000.0,
            });
            algorithms_used.push(name.to_string());
            lines.extend(admission.lines);
        }
        budget.finish();

        if !over_cap.is_empty() {
            log::warn!("Skipping {} algorithm(s) beyond the limit", over_cap.len());
            warnings.push(format!(
                "Only the first {} algorithms were processed; skipped: {}",
                self.config.max_algorithms,
                over_cap.join(", ")
            ));
        }
        if !over_budget.is_empty() {
            log::warn!("Skipping {} algorithm(s) after the line budget ran out", over_budget.len());
            warnings.push(format!("Line budget exhausted; skipped: {}", over_budget.join(", ")));
        }

        let mut lines = validate_lines(lines).lines;
        if lines.is_empty() {
            return fallback_scene("all algorithms produced zero usable lines", seed, warnings);
        }

        let mut enhanced = false;
        let approach = spec.visual_approach.filter(|_| self.config.enhance_sparse_scenes);
        if let Some(guides) = sparse_scene_guides(lines.len(), approach, self.config.max_total_lines) {
            let name = approach.map(VisualApproach::name).unwrap_or_default();
            log::info!("Sparse {} scene ({} lines), adding guide lines", name, lines.len());
            warnings.push(format!("Sparse {} scene ({} lines) enhanced with guide lines", name, lines.len()));
            lines.extend(guides);
            enhanced = true;
        }

        let mut skipped_algorithms = over_cap;
        skipped_algorithms.extend(over_budget);
        log::info!(
            "Composed '{}': {} lines from {} algorithm(s)",
            spec.title,
            lines.len(),
            algorithms_used.len()
        );

        SceneOutput {
            title: spec.title,
            description: spec.description,
            metadata: SceneMetadata {
                algorithms_used,
                total_lines: lines.len(),
                warnings,
                skipped_algorithms,
                reports,
                seed,
                fallback: false,
                enhanced,
            },
            lines,
            camera,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::{fallback_lines, FALLBACK_TITLE};
    use crate::spec::AlgorithmInvocation;
    use procgen::{AlgorithmKind, ParamMap};
    use scene_core::{is_well_formed, Vec3};
    use serde_json::json;

    fn params(v: Value) -> ParamMap {
        v.as_object().cloned().unwrap_or_default()
    }

    fn radial(count: usize) -> AlgorithmInvocation {
        AlgorithmInvocation::new(AlgorithmKind::RadialLines, params(json!({ "count": count })))
    }

    fn no_enhance(config: BudgetConfig) -> BudgetConfig {
        BudgetConfig {
            enhance_sparse_scenes: false,
            ..config
        }
    }

    #[test]
    fn invocation_cap_processes_first_in_order() {
        let kinds = [
            AlgorithmKind::Grid,
            AlgorithmKind::ConcentricCircles,
            AlgorithmKind::RadialLines,
            AlgorithmKind::Spiral,
            AlgorithmKind::HarmonicWave,
            AlgorithmKind::MeshDeformation,
            AlgorithmKind::Voronoi,
            AlgorithmKind::FlowField,
            AlgorithmKind::OrbitalSystem,
            AlgorithmKind::Scatter,
        ];
        let spec = SceneSpec::new(
            kinds
                .iter()
                .map(|&kind| AlgorithmInvocation::new(kind, ParamMap::new()))
                .collect(),
        );
        let scene = Composer::default().with_seed(1).compose(spec);

        let expected_used: Vec<&str> = kinds[..6].iter().map(|k| k.name()).collect();
        let expected_skipped: Vec<&str> = kinds[6..].iter().map(|k| k.name()).collect();
        assert_eq!(scene.metadata.algorithms_used, expected_used);
        assert_eq!(scene.metadata.skipped_algorithms, expected_skipped);
        assert_eq!(scene.metadata.reports.len(), 6);
        assert!(!scene.metadata.fallback);
        assert!(scene.metadata.warnings.iter().any(|w| w.contains("first 6")));
    }

    #[test]
    fn global_cap_truncates_and_skips_later() {
        let config = no_enhance(BudgetConfig {
            max_total_lines: 50,
            ..BudgetConfig::default()
        });
        let spec = SceneSpec::new(vec![radial(30), radial(30), radial(5)]);
        let scene = Composer::new(config).with_seed(2).compose(spec);

        assert_eq!(scene.lines.len(), 50);
        assert_eq!(scene.metadata.total_lines, 50);
        assert_eq!(scene.metadata.algorithms_used, vec!["radial_lines", "radial_lines"]);
        assert_eq!(scene.metadata.skipped_algorithms, vec!["radial_lines"]);
        assert_eq!(scene.metadata.reports[0].emitted, 30);
        assert_eq!(scene.metadata.reports[1].generated, 30);
        assert_eq!(scene.metadata.reports[1].emitted, 20);
    }

    #[test]
    fn per_algorithm_cap_is_a_prefix() {
        let config = no_enhance(BudgetConfig {
            max_lines_per_algorithm: 10,
            ..BudgetConfig::default()
        });
        let raw = params(json!({ "count": 24, "variation": 0.5 }));
        let spec = SceneSpec::new(vec![AlgorithmInvocation::new(AlgorithmKind::RadialLines, raw.clone())]);
        let scene = Composer::new(config).with_seed(7).compose(spec);

        let full = AlgorithmKind::RadialLines
            .sanitize(&raw)
            .generate(&mut StdRng::seed_from_u64(invocation_seed(7, 0)));
        assert_eq!(full.len(), 24);
        assert_eq!(scene.lines, full[..10].to_vec());
        assert!(scene.metadata.warnings.iter().any(|w| w.contains("truncated to 10")));
    }

    #[test]
    fn invalid_specs_fall_back() {
        let composer = Composer::default().with_seed(3);
        for doc in [json!([1, 2]), json!({}), json!({ "algorithms": "grid" }), json!({ "algorithms": [] })] {
            let scene = composer.compose_json(&doc);
            assert!(scene.metadata.fallback);
            assert_eq!(scene.title, FALLBACK_TITLE);
            assert_eq!(scene.lines, fallback_lines());
            assert_eq!(scene.metadata.algorithms_used, vec!["fallback"]);
        }
        assert!(composer.compose_json_str("not json").metadata.fallback);
    }

    #[test]
    fn zero_usable_lines_fall_back() {
        let spec = SceneSpec::new(vec![AlgorithmInvocation::new(
            AlgorithmKind::RandomNetwork,
            params(json!({ "nodes": 0 })),
        )]);
        let scene = Composer::default().with_seed(4).compose(spec);
        assert!(scene.metadata.fallback);
        assert_eq!(scene.lines.len(), fallback_lines().len());
    }

    #[test]
    fn sparse_scene_gets_guides() {
        let spec = SceneSpec {
            visual_approach: Some(VisualApproach::Geometric),
            ..SceneSpec::new(vec![radial(4)])
        };
        let scene = Composer::default().with_seed(5).compose(spec);
        assert!(scene.metadata.enhanced);
        assert_eq!(scene.lines.len(), 4 + 10);
        assert_eq!(scene.metadata.total_lines, 14);
        assert_eq!(scene.metadata.reports[0].emitted, 4);
    }

    #[test]
    fn guides_follow_the_visual_approach() {
        let doc = |approach: &str| {
            json!({
                "visual_approach": approach,
                "algorithms": [{ "type": "radial_lines", "count": 35 }]
            })
        };
        let composer = Composer::default().with_seed(5);

        // 35 lines: below the organic and technical thresholds, above the geometric one.
        let geometric = composer.compose_json(&doc("geometric"));
        assert!(!geometric.metadata.enhanced);
        assert_eq!(geometric.lines.len(), 35);

        let organic = composer.compose_json(&doc("organic"));
        assert!(organic.metadata.enhanced);
        assert_eq!(organic.lines.len(), 35 + 3);

        let technical = composer.compose_json(&doc("technical"));
        assert!(technical.metadata.enhanced);
        assert_eq!(technical.lines.len(), 35 + 18);

        let adaptive = composer.compose_json(&doc("adaptive"));
        assert!(!adaptive.metadata.enhanced);
        assert_eq!(adaptive.lines.len(), 35);

        let disabled = Composer::new(no_enhance(BudgetConfig::default()))
            .with_seed(5)
            .compose_json(&doc("technical"));
        assert!(!disabled.metadata.enhanced);
    }

    #[test]
    fn slow_runs_warn_without_truncating() {
        let config = BudgetConfig {
            slow_algorithm_ms: 0,
            ..BudgetConfig::default()
        };
        let spec = SceneSpec::new(vec![radial(24), radial(30)]);
        let scene = Composer::new(config).with_seed(9).compose(spec);
        let slow: Vec<&String> = scene.metadata.warnings.iter().filter(|w| w.contains("was slow")).collect();
        assert_eq!(slow.len(), 2);
        assert_eq!(scene.metadata.algorithms_used.len(), 2);
        assert_eq!(scene.lines.len(), 54);
        assert!(scene.metadata.skipped_algorithms.is_empty());
    }

    #[test]
    fn camera_is_validated() {
        let doc = json!({
            "algorithms": [{ "type": "grid" }],
            "camera": { "position": [0, 0, 500], "lookAt": [0, 0, 0] }
        });
        let scene = Composer::default().with_seed(6).compose_json(&doc);
        assert_eq!(scene.camera, Camera::default());
        assert!(scene.metadata.warnings.iter().any(|w| w.contains("Camera")));

        let doc = json!({
            "algorithms": [{ "type": "grid" }],
            "camera": { "position": [3, 4, 10], "lookAt": [0, 1, 0] }
        });
        let scene = Composer::default().with_seed(6).compose_json(&doc);
        assert_eq!(scene.camera.position, Vec3::new(3.0, 4.0, 10.0));
    }

    #[test]
    fn same_seed_same_scene() {
        let doc = json!({ "algorithms": [{ "type": "scatter" }, { "type": "network" }, { "type": "flow" }] });
        let a = Composer::default().with_seed(11).compose_json(&doc);
        let b = Composer::default().with_seed(11).compose_json(&doc);
        assert_eq!(a.lines, b.lines);
        assert_eq!(a.metadata.seed, 11);
    }

    #[test]
    fn unknown_algorithms_are_warnings() {
        let doc = json!({ "algorithms": [{ "type": "teapot" }, { "type": "grid" }] });
        let scene = Composer::default().with_seed(8).compose_json(&doc);
        assert!(!scene.metadata.fallback);
        assert_eq!(scene.metadata.algorithms_used, vec!["grid"]);
        assert!(scene.metadata.warnings.iter().any(|w| w.contains("teapot")));
    }

    #[test]
    fn output_is_always_well_formed() {
        let doc = json!({ "algorithms": [
            { "type": "spiral", "params": { "growth": 1e30, "turns": "many" } },
            { "type": "log_spiral", "params": { "b": 1e9 } },
            { "type": "particles", "params": { "dt": "NaN", "gravity": 1e40 } },
            { "type": "orbits", "params": { "eccentricity": 5 } },
        ]});
        let scene = Composer::default().with_seed(12).compose_json(&doc);
        assert!(!scene.lines.is_empty());
        assert!(scene.lines.iter().all(is_well_formed));
        assert!(scene.lines.len() <= BudgetConfig::default().max_total_lines);
    }

    #[test]
    fn panics_are_isolated() {
        let result = isolate(|| panic!("boom"));
        assert_eq!(result, Err("boom".to_string()));
        assert_eq!(isolate(Vec::new), Ok(Vec::new()));
    }

    #[test]
    fn invocation_seeds_differ() {
        assert_eq!(invocation_seed(0, 0), 31337);
        assert_eq!(invocation_seed(0, 1), 62674);
        assert_eq!(invocation_seed(u64::MAX, 0), 31336);
    }
}
