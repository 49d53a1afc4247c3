use crate::report::report_model::SuiteReport;
use crate::script::script_model::Check;

// ============================================================================
// Console reporter: formatted terminal output
// ============================================================================

/// Format a suite report for terminal output.
///
/// Produces output like:
/// ```text
/// === Suite: todo rows ===
///
/// ✓ PASS  fill every row (9 steps, 4 checks, 2 filled / 3 clicked)
/// ✗ FAIL  click delete (6 steps, 2 checks)
///     [FAIL] Step 5: BucketSize — expected 3, got 2
///
/// === Results: 1 passed, 1 failed (2 total) ===
/// ```
pub fn format_console_report(report: &SuiteReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== Suite: {} ===\n\n", report.suite_name));

    for result in &report.script_results {
        let marker = if result.passed {
            "\u{2713} PASS"
        } else {
            "\u{2717} FAIL"
        };

        out.push_str(&format!(
            "{}  {} ({} steps, {} checks",
            marker,
            result.script_name,
            result.steps_run,
            result.check_results.len()
        ));

        if !result.playbacks.is_empty() {
            let filled: usize = result.playbacks.iter().map(|p| p.inputs_filled).sum();
            let clicked: usize = result.playbacks.iter().map(|p| p.clicks).sum();
            out.push_str(&format!(", {} filled / {} clicked", filled, clicked));
        }
        out.push_str(")\n");

        if let Some(ref error) = result.error {
            out.push_str(&format!("    [ERROR] {}\n", error));
        }

        for cr in result.check_results.iter().filter(|cr| !cr.passed) {
            let detail = cr.message.as_deref().unwrap_or("check failed");
            out.push_str(&format!(
                "    [FAIL] Step {}: {} — {}\n",
                cr.step_index,
                check_name(&cr.check),
                detail
            ));
        }
    }

    out.push_str(&format!(
        "\n=== Results: {} passed, {} failed ({} total)",
        report.passed, report.failed, report.total
    ));

    if let Some(ms) = report.duration_ms {
        out.push_str(&format!(" in {}ms", ms));
    }

    out.push_str(" ===\n");

    out
}

fn check_name(check: &Check) -> &'static str {
    match check {
        Check::Stage { .. } => "Stage",
        Check::Step { .. } => "Step",
        Check::ActionKind { .. } => "ActionKind",
        Check::BucketSize { .. } => "BucketSize",
        Check::BucketContains { .. } => "BucketContains",
        Check::SelectedCount { .. } => "SelectedCount",
        Check::InputFieldVisible { .. } => "InputFieldVisible",
        Check::Highlight { .. } => "Highlight",
        Check::Value { .. } => "Value",
        Check::Activations { .. } => "Activations",
    }
}
