use crate::form::form_model::{FieldKind, FormDocument};
use crate::report::report_model::ScenarioSuiteReport;
use crate::scenario::scenario_model::AssertionSpec;
use crate::storage::persistence::LoadStatus;
use crate::validation::gate::{Disposition, SubmitOutcome};

// ============================================================================
// Console reporters
// ============================================================================

/// Format a scenario suite for the terminal.
///
/// ```text
/// === Scenarios: order-form ===
///
/// ✓ PASS  pickup needs no address (4 steps, 3 assertions)
/// ✗ FAIL  amex length (6 steps, 2 assertions)
///     [FAIL] Step 5: ErrorShown (actual: "") - Expected an error on 'card-number'
///
/// === Results: 1 passed, 1 failed (2 total) ===
/// ```
pub fn format_console_report(report: &ScenarioSuiteReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== Scenarios: {} ===\n\n", report.suite_name));

    for result in &report.results {
        let marker = if result.passed {
            "\u{2713} PASS"
        } else {
            "\u{2717} FAIL"
        };

        out.push_str(&format!(
            "{}  {} ({} steps, {} assertions)\n",
            marker,
            result.scenario_name,
            result.steps_run,
            result.assertion_results.len()
        ));

        if let Some(ref error) = result.error {
            out.push_str(&format!("    [ERROR] {}\n", error));
        }

        for ar in result.assertion_results.iter().filter(|ar| !ar.passed) {
            let detail = ar.message.as_deref().unwrap_or("assertion failed");
            let actual = ar
                .actual
                .as_deref()
                .map(|a| format!(" (actual: {:?})", a))
                .unwrap_or_default();
            out.push_str(&format!(
                "    [FAIL] Step {}: {}{} - {}\n",
                ar.step_index,
                assertion_name(&ar.spec),
                actual,
                detail
            ));
        }
    }

    out.push_str(&format!(
        "\n=== Results: {} passed, {} failed ({} total)",
        report.passed, report.failed, report.total
    ));

    if let Some(ms) = report.duration_ms {
        out.push_str(&format!(" in {:.1}s", ms as f64 / 1000.0));
    }

    out.push_str(" ===\n");
    out
}

/// Format a single submission attempt, one line per failed field.
pub fn format_submit_outcome(form_id: &str, outcome: &SubmitOutcome) -> String {
    let mut out = String::new();

    let status = match outcome.disposition {
        Disposition::Blocked => "BLOCKED",
        Disposition::Submitted => "SUBMITTED",
        Disposition::ValidNotSubmitted => "VALID (not submitted)",
    };
    out.push_str(&format!("{}: {}\n", form_id, status));

    for error in &outcome.errors {
        out.push_str(&format!("  \u{2717} {:<18} {}\n", error.field, error.message));
    }

    if let Some(notice) = &outcome.notice {
        out.push_str(&format!("  {}\n", notice));
    }

    out
}

/// Format the live state of a form: restore status, sections, field values.
pub fn format_form_state(form_id: &str, document: &FormDocument, status: &LoadStatus) -> String {
    let mut out = String::new();

    let status = match status {
        LoadStatus::Restored(n) => format!("restored {} fields", n),
        LoadStatus::Missing => "nothing stored".to_string(),
        LoadStatus::Malformed(reason) => format!("stored data unreadable ({}), using defaults", reason),
    };
    out.push_str(&format!("{}: {}\n", form_id, status));

    for section in &document.sections {
        let shown = if section.visible { "shown" } else { "hidden" };
        out.push_str(&format!("  [{}] {}\n", shown, section.id));
    }

    for field in document.fields.iter().filter(|f| f.kind.is_tracked()) {
        let value = match field.kind {
            FieldKind::Checkbox | FieldKind::Radio => {
                let mark = if field.checked { "x" } else { " " };
                format!("[{}] {}", mark, field.value)
            }
            _ => format!("{:?}", field.value),
        };
        out.push_str(&format!("  {:<18} {}\n", field.id_or_name(), value));
    }

    out
}

fn assertion_name(spec: &AssertionSpec) -> &'static str {
    match spec {
        AssertionSpec::SectionVisible { .. } => "SectionVisible",
        AssertionSpec::ErrorShown { .. } => "ErrorShown",
        AssertionSpec::NoError { .. } => "NoError",
        AssertionSpec::ErrorCount { .. } => "ErrorCount",
        AssertionSpec::FieldValue { .. } => "FieldValue",
        AssertionSpec::FieldChecked { .. } => "FieldChecked",
        AssertionSpec::MaxLength { .. } => "MaxLength",
        AssertionSpec::Submitted { .. } => "Submitted",
        AssertionSpec::StoredValue { .. } => "StoredValue",
    }
}
