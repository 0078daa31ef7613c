use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Scenario definition (YAML)
// ============================================================================

/// A scripted session against the order page, usually read from YAML.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    /// Human-readable name for this scenario
    pub name: String,

    /// Ordered interactions and checks
    pub steps: Vec<ScenarioStep>,
}

/// A single step in a scenario.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Type into a text-like field
    Fill { field: String, value: String },

    /// Choose an option of a select
    Select { field: String, value: String },

    /// Check a radio or checkbox
    Check { field: String },

    /// Uncheck a checkbox
    Uncheck { field: String },

    /// Submit the form
    Submit,

    /// Reload the page, keeping the store
    Reload,

    /// Run assertions against the current page
    Assert { assertions: Vec<AssertionSpec> },
}

/// A single assertion to evaluate against the page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssertionSpec {
    /// A dependent section is shown or hidden
    SectionVisible { section: String, expected: bool },

    /// The field is marked invalid, optionally with an exact message
    ErrorShown {
        field: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// The field carries no error
    NoError { field: String },

    /// Number of failures in the last submission attempt
    ErrorCount { expected: usize },

    /// A field's live value
    FieldValue { field: String, expected: String },

    /// A radio/checkbox's checked state
    FieldChecked { field: String, expected: bool },

    /// A field's current max length
    MaxLength {
        field: String,
        #[serde(default)]
        expected: Option<usize>,
    },

    /// Whether the last submission attempt went through
    Submitted { expected: bool },

    /// The persisted value under a field name; `null`/absent means no entry
    StoredValue {
        name: String,
        #[serde(default)]
        expected: Option<Value>,
    },
}

// ============================================================================
// Run results
// ============================================================================

/// Result of evaluating a single assertion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssertionResult {
    /// Which step this assertion belongs to (0-indexed)
    pub step_index: usize,

    /// The assertion that was evaluated
    pub spec: AssertionSpec,

    /// Whether the assertion held
    pub passed: bool,

    /// Actual value found (for debugging failed assertions)
    pub actual: Option<String>,

    /// Human-readable failure message
    pub message: Option<String>,
}

/// Result of running a complete scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Name of the scenario that was run
    pub scenario_name: String,

    /// Whether all steps ran and every assertion passed
    pub passed: bool,

    /// Number of steps executed, including the one that errored
    pub steps_run: usize,

    /// Every assertion evaluated during the run, in step order
    pub assertion_results: Vec<AssertionResult>,

    /// Error message if a step could not run (not an assertion failure)
    pub error: Option<String>,
}
