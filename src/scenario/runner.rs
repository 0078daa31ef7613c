use std::path::Path;

use serde_json::Value;

use crate::error::OrderFormError;
use crate::form::form_model::FormDocument;
use crate::page::order_page::OrderPage;
use crate::scenario::context::ScenarioContext;
use crate::scenario::scenario_model::{AssertionResult, AssertionSpec, Scenario, ScenarioResult, ScenarioStep};
use crate::storage::store::MemoryStore;
use crate::trace::logger::TraceLogger;
use crate::validation::gate::SubmissionGate;

/// Executes scenarios step-by-step against a fresh page over an
/// in-memory store.
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    pub gate: SubmissionGate,

    /// JSONL trace file shared by every scenario run
    pub trace_path: Option<String>,
}

impl ScenarioRunner {
    pub fn new(gate: SubmissionGate) -> Self {
        Self { gate, trace_path: None }
    }

    pub fn with_trace(mut self, path: impl Into<String>) -> Self {
        self.trace_path = Some(path.into());
        self
    }

    /// Run a complete scenario. Every scenario starts from the markup with
    /// an empty store.
    pub fn run(&self, scenario: &Scenario, markup: &FormDocument) -> ScenarioResult {
        let mut ctx = ScenarioContext::new();

        let tracer = match &self.trace_path {
            Some(path) => TraceLogger::new(path),
            None => TraceLogger::disabled(),
        };

        let mut page = match OrderPage::open(markup.clone(), MemoryStore::new(), self.gate, tracer) {
            Ok(page) => page,
            Err(e) => {
                return ScenarioResult {
                    scenario_name: scenario.name.clone(),
                    passed: false,
                    steps_run: 0,
                    assertion_results: ctx.assertion_results,
                    error: Some(format!("Failed to open page: {}", e)),
                };
            }
        };

        for (i, step) in scenario.steps.iter().enumerate() {
            page = match Self::execute_step(page, step, i, &mut ctx) {
                Ok(page) => page,
                Err(e) => {
                    return ScenarioResult {
                        scenario_name: scenario.name.clone(),
                        passed: false,
                        steps_run: i + 1,
                        assertion_results: ctx.assertion_results,
                        error: Some(format!("Step {} failed: {}", i, e)),
                    };
                }
            };
        }

        ScenarioResult {
            scenario_name: scenario.name.clone(),
            passed: ctx.all_passed(),
            steps_run: scenario.steps.len(),
            assertion_results: ctx.assertion_results,
            error: None,
        }
    }

    fn execute_step(
        mut page: OrderPage<MemoryStore>,
        step: &ScenarioStep,
        step_index: usize,
        ctx: &mut ScenarioContext,
    ) -> Result<OrderPage<MemoryStore>, OrderFormError> {
        match step {
            ScenarioStep::Fill { field, value } => page.fill(field, value)?,
            ScenarioStep::Select { field, value } => page.select(field, value)?,
            ScenarioStep::Check { field } => page.check(field)?,
            ScenarioStep::Uncheck { field } => page.uncheck(field)?,
            ScenarioStep::Submit => ctx.last_outcome = Some(page.submit()),
            ScenarioStep::Reload => {
                ctx.last_outcome = None;
                return page.reload();
            }
            ScenarioStep::Assert { assertions } => {
                let results = assertions
                    .iter()
                    .map(|spec| Self::evaluate_one(spec, step_index, &page, ctx))
                    .collect();
                ctx.record_assertions(results);
            }
        }
        Ok(page)
    }

    fn evaluate_one(
        spec: &AssertionSpec,
        step_index: usize,
        page: &OrderPage<MemoryStore>,
        ctx: &ScenarioContext,
    ) -> AssertionResult {
        let document = page.document();
        let result = |passed: bool, actual: Option<String>, message: String| AssertionResult {
            step_index,
            spec: spec.clone(),
            passed,
            actual,
            message: if passed { None } else { Some(message) },
        };

        match spec {
            AssertionSpec::SectionVisible { section, expected } => match page.is_section_visible(section) {
                Some(visible) => result(
                    visible == *expected,
                    Some(visible.to_string()),
                    format!("Section '{}' visible={}, expected {}", section, visible, expected),
                ),
                None => result(false, None, format!("No section '{}'", section)),
            },

            AssertionSpec::ErrorShown { field, message } => {
                let text = document.error_text(field).unwrap_or_default();
                let invalid = document.is_invalid(field);
                let message_ok = message.as_deref().map_or(!text.is_empty(), |m| m == text);
                result(
                    invalid && message_ok,
                    Some(text.to_string()),
                    match message {
                        Some(m) => format!("Expected error '{}' on '{}'", m, field),
                        None => format!("Expected an error on '{}'", field),
                    },
                )
            }

            AssertionSpec::NoError { field } => {
                let text = document.error_text(field).unwrap_or_default();
                let invalid = document.is_invalid(field);
                result(
                    !invalid && text.is_empty(),
                    Some(text.to_string()),
                    format!("Field '{}' still shows an error", field),
                )
            }

            AssertionSpec::ErrorCount { expected } => {
                let count = ctx.last_outcome.as_ref().map_or(0, |o| o.errors.len());
                result(
                    count == *expected,
                    Some(count.to_string()),
                    format!("{} errors, expected {}", count, expected),
                )
            }

            AssertionSpec::FieldValue { field, expected } => match document.field_by_id(field) {
                Some(f) => result(
                    f.value == *expected,
                    Some(f.value.clone()),
                    format!("Field '{}' is '{}', expected '{}'", field, f.value, expected),
                ),
                None => result(false, None, format!("No field '{}'", field)),
            },

            AssertionSpec::FieldChecked { field, expected } => match document.field_by_id(field) {
                Some(f) => result(
                    f.checked == *expected,
                    Some(f.checked.to_string()),
                    format!("Field '{}' checked={}, expected {}", field, f.checked, expected),
                ),
                None => result(false, None, format!("No field '{}'", field)),
            },

            AssertionSpec::MaxLength { field, expected } => match document.field_by_id(field) {
                Some(f) => result(
                    f.max_length == *expected,
                    Some(format!("{:?}", f.max_length)),
                    format!("Field '{}' max length {:?}, expected {:?}", field, f.max_length, expected),
                ),
                None => result(false, None, format!("No field '{}'", field)),
            },

            AssertionSpec::Submitted { expected } => {
                let submitted = ctx.last_outcome.as_ref().is_some_and(|o| o.submitted());
                result(
                    submitted == *expected,
                    Some(submitted.to_string()),
                    format!("submitted={}, expected {}", submitted, expected),
                )
            }

            AssertionSpec::StoredValue { name, expected } => {
                let record = page.stored_record();
                let actual = record.get(name).filter(|v| !v.is_null());
                let expected = expected.as_ref().filter(|v| !v.is_null());
                result(
                    actual == expected,
                    actual.map(Value::to_string),
                    format!("Stored '{}' is {:?}, expected {:?}", name, actual, expected),
                )
            }
        }
    }
}

/// Load scenarios from a single YAML file or a directory of YAML files.
pub fn load_scenarios(path: &str) -> Result<Vec<Scenario>, Box<dyn std::error::Error>> {
    let metadata = std::fs::metadata(path)?;
    if metadata.is_dir() {
        let mut scenarios = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let p = entry.path();
            if p.extension().is_some_and(|e| e == "yaml" || e == "yml") {
                scenarios.push(load_scenario_file(&p)?);
            }
        }
        // Sort by name for deterministic order
        scenarios.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(scenarios)
    } else {
        Ok(vec![load_scenario_file(Path::new(path))?])
    }
}

fn load_scenario_file(path: &Path) -> Result<Scenario, OrderFormError> {
    let content = std::fs::read_to_string(path).map_err(|source| OrderFormError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&content).map_err(|source| OrderFormError::YamlParse {
        context: path.display().to_string(),
        source,
    })
}
