use crate::report::report_model::ScenarioSuiteReport;
use crate::scenario::scenario_model::ScenarioResult;

const CLASSNAME: &str = "order-form";

/// Render the suite as JUnit XML, one `<testcase>` per scenario.
pub fn generate_junit_xml(report: &ScenarioSuiteReport) -> String {
    let time_attr = report
        .duration_ms
        .map(|ms| format!(" time=\"{:.3}\"", ms as f64 / 1000.0))
        .unwrap_or_default();

    let cases: String = report.results.iter().map(testcase_xml).collect();

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<testsuite name=\"{name}\" tests=\"{tests}\" failures=\"{failures}\"{time}>\n{cases}</testsuite>\n",
        name = escape_xml(&report.suite_name),
        tests = report.total,
        failures = report.failed,
        time = time_attr,
        cases = cases,
    )
}

fn testcase_xml(result: &ScenarioResult) -> String {
    let name = escape_xml(&result.scenario_name);
    if result.passed {
        return format!("  <testcase name=\"{}\" classname=\"{}\" />\n", name, CLASSNAME);
    }

    let mut lines: Vec<String> = result
        .assertion_results
        .iter()
        .filter(|ar| !ar.passed)
        .map(|ar| {
            format!(
                "Step {}: {}",
                ar.step_index,
                ar.message.as_deref().unwrap_or("assertion failed")
            )
        })
        .collect();
    let failed = lines.len();

    let (kind, message) = match &result.error {
        Some(e) => {
            lines.push(format!("Error: {}", e));
            ("StepError", "step could not run".to_string())
        }
        None => ("AssertionFailure", format!("{} assertion(s) failed", failed)),
    };

    format!(
        "  <testcase name=\"{name}\" classname=\"{class}\">\n    <failure message=\"{message}\" type=\"{kind}\">{body}</failure>\n  </testcase>\n",
        name = name,
        class = CLASSNAME,
        message = escape_xml(&message),
        kind = kind,
        body = escape_xml(&lines.join("\n")),
    )
}

pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
