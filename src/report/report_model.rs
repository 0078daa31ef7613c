use serde::{Deserialize, Serialize};

use crate::scenario::scenario_model::ScenarioResult;

// ============================================================================
// Scenario suite report: aggregates ScenarioResult instances
// ============================================================================

/// Aggregated outcome of a batch of scenario runs against one form.
///
/// Built from a `Vec<ScenarioResult>` via `from_results()`. Consumed by the
/// console and JUnit reporters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSuiteReport {
    /// Suite name, usually the form identity
    pub suite_name: String,

    /// Number of scenarios run
    pub total: usize,

    /// Scenarios whose steps all ran and whose assertions all held
    pub passed: usize,

    /// Scenarios with a failed assertion or a step error
    pub failed: usize,

    /// Wall-clock time of the whole batch in milliseconds (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u128>,

    /// Per-scenario results, in run order
    pub results: Vec<ScenarioResult>,
}

impl ScenarioSuiteReport {
    /// Build a suite report, computing the pass and fail counts.
    pub fn from_results(suite_name: &str, results: Vec<ScenarioResult>) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        Self {
            suite_name: suite_name.to_string(),
            total,
            passed,
            failed: total - passed,
            duration_ms: None,
            results,
        }
    }

    pub fn with_duration(mut self, duration_ms: u128) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Whether every scenario in the suite passed.
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}
