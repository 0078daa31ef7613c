use std::path::Path;

use crate::cli::config::Settings;
use crate::error::OrderFormError;
use crate::form::form_model::{FieldKind, FormDocument};
use crate::form::identity::FormIdentity;
use crate::page::order_page::OrderPage;
use crate::report::console::{format_console_report, format_form_state, format_submit_outcome};
use crate::report::junit::generate_junit_xml;
use crate::report::report_model::ScenarioSuiteReport;
use crate::scenario::runner::{load_scenarios, ScenarioRunner};
use crate::storage::persistence::FormPersistence;
use crate::storage::store::{FileStore, KeyValueStore};

// ============================================================================
// fill subcommand
// ============================================================================

pub fn cmd_fill(
    form_path: &str,
    sets: &[String],
    checks: &[String],
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut page = open_page(form_path, settings)?;
    apply_inputs(&mut page, sets, checks)?;

    if settings.verbose > 0 {
        eprintln!(
            "Saved {} change(s) for {} in {}",
            sets.len() + checks.len(),
            page.identity(),
            settings.store_dir
        );
    }
    Ok(())
}

// ============================================================================
// submit subcommand
// ============================================================================

/// Submit the form and return whether it passed validation.
pub fn cmd_submit(
    form_path: &str,
    sets: &[String],
    checks: &[String],
    format: &str,
    settings: &Settings,
) -> Result<bool, Box<dyn std::error::Error>> {
    let mut page = open_page(form_path, settings)?;
    apply_inputs(&mut page, sets, checks)?;

    let outcome = page.submit();

    let rendered = match format {
        "json" => serde_json::to_string_pretty(&outcome)? + "\n",
        _ => format_submit_outcome(page.identity().as_str(), &outcome),
    };
    print!("{}", rendered);

    Ok(outcome.is_valid())
}

// ============================================================================
// restore / clear subcommands
// ============================================================================

pub fn cmd_restore(form_path: &str, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let page = open_page(form_path, settings)?;
    print!(
        "{}",
        format_form_state(page.identity().as_str(), page.document(), page.load_status())
    );
    Ok(())
}

pub fn cmd_clear(form_path: &str, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let markup = FormDocument::from_path(Path::new(form_path))?;
    let identity = FormIdentity::of(&markup);
    let store = FileStore::open(&settings.store_dir)?;
    let mut persistence = FormPersistence::new(identity, store);
    persistence.clear()?;

    if settings.verbose > 0 {
        eprintln!("Cleared stored data for {}", persistence.identity());
    }
    Ok(())
}

// ============================================================================
// run subcommand
// ============================================================================

/// Run scenarios and return whether all passed.
pub fn cmd_run(
    form_path: &str,
    scenario_path: &str,
    format: &str,
    output: Option<&str>,
    settings: &Settings,
) -> Result<bool, Box<dyn std::error::Error>> {
    let markup = FormDocument::from_path(Path::new(form_path))?;
    let scenarios = load_scenarios(scenario_path)?;

    if scenarios.is_empty() {
        eprintln!("No scenarios found at: {}", scenario_path);
        return Ok(true);
    }

    if settings.verbose > 0 {
        eprintln!("Running {} scenarios...", scenarios.len());
    }

    let mut runner = ScenarioRunner::new(settings.gate);
    if let Some(path) = &settings.trace_path {
        runner = runner.with_trace(path.clone());
    }

    let start = std::time::Instant::now();
    let mut results = Vec::new();
    for scenario in &scenarios {
        if settings.verbose > 0 {
            eprintln!("  Running: {}", scenario.name);
        }
        results.push(runner.run(scenario, &markup));
    }

    let suite_name = FormIdentity::of(&markup).to_string();
    let report = ScenarioSuiteReport::from_results(&suite_name, results)
        .with_duration(start.elapsed().as_millis());

    let content = match format {
        "junit" => generate_junit_xml(&report),
        _ => format_console_report(&report),
    };

    match output {
        Some(path) => std::fs::write(path, &content)?,
        None => print!("{}", content),
    }

    Ok(report.all_passed())
}

// ============================================================================
// Helpers
// ============================================================================

fn open_page(form_path: &str, settings: &Settings) -> Result<OrderPage<FileStore>, OrderFormError> {
    let markup = FormDocument::from_path(Path::new(form_path))?;
    let store = FileStore::open(&settings.store_dir)?;
    OrderPage::open(markup, store, settings.gate, settings.tracer())
}

/// Checks go first so mode radios and the card type settle before values
/// are typed. A `--set` on a select picks the option, otherwise it types.
pub fn apply_inputs<S: KeyValueStore>(
    page: &mut OrderPage<S>,
    sets: &[String],
    checks: &[String],
) -> Result<(), OrderFormError> {
    for id in checks {
        page.check(id)?;
    }

    for assignment in sets {
        let (id, value) = parse_assignment(assignment)?;
        let kind = page
            .document()
            .field_by_id(id)
            .map(|f| f.kind)
            .ok_or_else(|| OrderFormError::UnknownField(id.to_string()))?;

        if kind == FieldKind::Select {
            page.select(id, value)?;
        } else {
            page.fill(id, value)?;
        }
    }

    Ok(())
}

/// Split `id=value`. The value may itself contain `=`.
pub fn parse_assignment(raw: &str) -> Result<(&str, &str), OrderFormError> {
    raw.split_once('=')
        .filter(|(id, _)| !id.is_empty())
        .ok_or_else(|| OrderFormError::InvalidInteraction {
            field: raw.to_string(),
            reason: "expected id=value".to_string(),
        })
}
