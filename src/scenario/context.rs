use crate::scenario::scenario_model::AssertionResult;
use crate::validation::gate::SubmitOutcome;

/// Tracks the execution state and results of a running scenario.
#[derive(Debug, Clone, Default)]
pub struct ScenarioContext {
    /// Assertion results collected so far, in step order
    pub assertion_results: Vec<AssertionResult>,

    /// Outcome of the most recent submit step, if any
    pub last_outcome: Option<SubmitOutcome>,
}

impl ScenarioContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_assertions(&mut self, results: Vec<AssertionResult>) {
        self.assertion_results.extend(results);
    }

    pub fn all_passed(&self) -> bool {
        self.assertion_results.iter().all(|r| r.passed)
    }

    pub fn fail_count(&self) -> usize {
        self.assertion_results.iter().filter(|r| !r.passed).count()
    }
}
