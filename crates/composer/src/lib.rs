//! Scene composition: parse a scene spec, run its generators under a line
//! budget and assemble the scene document. Composition never fails; bad input
//! or an empty result yields the fixed fallback scene.

pub mod budget;
pub mod compose;
pub mod enhance;
pub mod fallback;
pub mod output;
pub mod spec;

pub use budget::{Budget, BudgetConfig, Gate, Phase};
pub use compose::Composer;
pub use enhance::VisualApproach;
pub use fallback::fallback_scene;
pub use output::{AlgorithmReport, SceneMetadata, SceneOutput};
pub use spec::{AlgorithmInvocation, SceneSpec, SpecError};
