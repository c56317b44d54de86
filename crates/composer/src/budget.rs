//! Resource budgeting for one composition.
//!
//! Invocations are admitted first-come-first-served: earlier entries keep their
//! full (per-algorithm capped) output before later ones are truncated or skipped.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Output caps for one composition. Every field falls back to its default when
/// absent from a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetConfig {
    /// Per-algorithm cap.
    #[serde(default = "default_max_lines_per_algorithm")]
    pub max_lines_per_algorithm: usize,
    /// Global cap across all algorithms.
    #[serde(default = "default_max_total_lines")]
    pub max_total_lines: usize,
    /// Invocations beyond this count are never executed.
    #[serde(default = "default_max_algorithms")]
    pub max_algorithms: usize,
    #[serde(default = "default_slow_algorithm_ms")]
    pub slow_algorithm_ms: u64,
    /// Add guide lines to sparse scenes that declare a visual approach.
    #[serde(default = "default_true")]
    pub enhance_sparse_scenes: bool,
}

fn default_max_lines_per_algorithm() -> usize {
    500
}
fn default_max_total_lines() -> usize {
    2000
}
fn default_max_algorithms() -> usize {
    6
}
fn default_slow_algorithm_ms() -> u64 {
    1000
}
fn default_true() -> bool {
    true
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            max_lines_per_algorithm: default_max_lines_per_algorithm(),
            max_total_lines: default_max_total_lines(),
            max_algorithms: default_max_algorithms(),
            slow_algorithm_ms: default_slow_algorithm_ms(),
            enhance_sparse_scenes: default_true(),
        }
    }
}

impl BudgetConfig {
    pub fn slow_threshold(&self) -> Duration {
        Duration::from_millis(self.slow_algorithm_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Pending,
    Processing,
    Accumulated,
    Done,
}

/// Whether the next invocation may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Open,
    /// The invocation-count cap has been reached.
    InvocationCap,
    /// The global line budget is used up.
    Exhausted,
}

/// What the budget kept of one invocation's output.
#[derive(Debug, Clone, PartialEq)]
pub struct Admission<T> {
    pub lines: Vec<T>,
    /// Lines offered before any cap was applied.
    pub offered: usize,
    pub algorithm_capped: bool,
    pub globally_capped: bool,
}

/// Keep the first `cap` items, preserving order.
pub fn truncate<T>(items: Vec<T>, cap: usize) -> Vec<T> {
    items.into_iter().take(cap).collect()
}

/// Budget state machine: `Pending -> (Processing -> Accumulated)* -> Done`.
#[derive(Debug, Clone)]
pub struct Budget {
    config: BudgetConfig,
    phase: Phase,
    total: usize,
    processed: usize,
}

impl Budget {
    pub fn new(config: BudgetConfig) -> Self {
        Self {
            config,
            phase: Phase::Pending,
            total: 0,
            processed: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Lines accepted so far.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Invocations started so far.
    pub fn processed(&self) -> usize {
        self.processed
    }

    pub fn remaining(&self) -> usize {
        self.config.max_total_lines.saturating_sub(self.total)
    }

    pub fn gate(&self) -> Gate {
        if self.phase == Phase::Done || self.remaining() == 0 {
            Gate::Exhausted
        } else if self.processed >= self.config.max_algorithms {
            Gate::InvocationCap
        } else {
            Gate::Open
        }
    }

    /// Start the next invocation. Returns the gate that refused it, if any.
    pub fn begin(&mut self) -> Result<(), Gate> {
        match self.gate() {
            Gate::Open => {
                self.processed += 1;
                self.transition(Phase::Processing);
                Ok(())
            }
            closed => Err(closed),
        }
    }

    /// Apply the per-algorithm cap, then the global cap, to one invocation's
    /// validated output.
    pub fn admit<T>(&mut self, lines: Vec<T>) -> Admission<T> {
        let offered = lines.len();
        let per_algorithm = self.config.max_lines_per_algorithm;
        let algorithm_capped = offered > per_algorithm;
        let lines = truncate(lines, per_algorithm);

        let remaining = self.remaining();
        let globally_capped = lines.len() > remaining;
        let lines = truncate(lines, remaining);
        self.total += lines.len();

        if globally_capped || self.remaining() == 0 {
            self.transition(Phase::Done);
        } else {
            self.transition(Phase::Accumulated);
        }
        Admission {
            lines,
            offered,
            algorithm_capped,
            globally_capped,
        }
    }

    pub fn finish(&mut self) {
        if self.phase != Phase::Done {
            self.transition(Phase::Done);
        }
    }

    fn transition(&mut self, next: Phase) {
        log::trace!("Budget {:?} -> {:?} ({} lines)", self.phase, next, self.total);
        self.phase = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(per_algorithm: usize, total: usize, algorithms: usize) -> BudgetConfig {
        BudgetConfig {
            max_lines_per_algorithm: per_algorithm,
            max_total_lines: total,
            max_algorithms: algorithms,
            ..BudgetConfig::default()
        }
    }

    #[test]
    fn defaults() {
        let c = BudgetConfig::default();
        assert_eq!(c.max_lines_per_algorithm, 500);
        assert_eq!(c.max_total_lines, 2000);
        assert_eq!(c.max_algorithms, 6);
        assert_eq!(c.slow_threshold(), Duration::from_secs(1));
        assert!(c.enhance_sparse_scenes);
    }

    #[test]
    fn per_algorithm_cap_keeps_prefix() {
        let mut budget = Budget::new(config(3, 100, 6));
        budget.begin().unwrap();
        let admission = budget.admit((0..10).collect::<Vec<_>>());
        assert_eq!(admission.lines, vec![0, 1, 2]);
        assert_eq!(admission.offered, 10);
        assert!(admission.algorithm_capped);
        assert!(!admission.globally_capped);
        assert_eq!(budget.phase(), Phase::Accumulated);
    }

    #[test]
    fn global_cap_truncates_then_stops() {
        let mut budget = Budget::new(config(100, 15, 6));
        budget.begin().unwrap();
        assert_eq!(budget.admit(vec![0; 10]).lines.len(), 10);
        budget.begin().unwrap();
        let second = budget.admit(vec![1; 10]);
        assert_eq!(second.lines.len(), 5);
        assert!(second.globally_capped);
        assert_eq!(budget.phase(), Phase::Done);
        assert_eq!(budget.begin(), Err(Gate::Exhausted));
        assert_eq!(budget.total(), 15);
    }

    #[test]
    fn exact_fill_also_stops() {
        let mut budget = Budget::new(config(100, 10, 6));
        budget.begin().unwrap();
        let admission = budget.admit(vec![0; 10]);
        assert!(!admission.globally_capped);
        assert_eq!(budget.gate(), Gate::Exhausted);
    }

    #[test]
    fn invocation_cap_counts_empty_runs() {
        let mut budget = Budget::new(config(100, 100, 2));
        assert_eq!(budget.phase(), Phase::Pending);
        for _ in 0..2 {
            budget.begin().unwrap();
            budget.admit(Vec::<u8>::new());
        }
        assert_eq!(budget.begin(), Err(Gate::InvocationCap));
        assert_eq!(budget.processed(), 2);
        budget.finish();
        assert_eq!(budget.phase(), Phase::Done);
    }

    #[test]
    fn truncate_is_a_prefix() {
        assert_eq!(truncate(vec![1, 2, 3], 2), vec![1, 2]);
        assert_eq!(truncate(vec![1, 2, 3], 9), vec![1, 2, 3]);
        assert!(truncate(vec![1, 2, 3], 0).is_empty());
    }
}
