//! Rendering helpers (plain text and markdown) for run reports.

use mendcheck_types::{BindingOutcome, BindingReport, FailureSource, RunReport, RunStatus};

/// Terminal-friendly summary: one line per binding, then the counts.
pub fn render_report_text(report: &RunReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "mendcheck: {} ({})\n",
        status_label(report.status),
        report.error_kind
    ));

    for b in &report.bindings {
        out.push_str(&format!("  {:>2}. {}", b.position + 1, binding_label(b)));
        match &b.outcome {
            BindingOutcome::Failed { source, message } => {
                out.push_str(&format!(" -> failed ({}): {}\n", source_label(*source), message));
            }
            other => out.push_str(&format!(" -> {}\n", outcome_label(other))),
        }
    }

    out.push_str(&format!(
        "{} bindings: {} passed, {} resolved, {} failed\n",
        report.counts.bindings, report.counts.passed, report.counts.resolved, report.counts.failed
    ));
    out
}

pub fn render_report_md(report: &RunReport) -> String {
    let mut out = String::new();
    out.push_str("# mendcheck report\n\n");
    out.push_str(&format!("- Status: `{}`\n", status_label(report.status)));
    out.push_str(&format!("- Error kind: `{}`\n", report.error_kind));
    out.push_str(&format!(
        "- Bindings: {} (passed {}, resolved {}, failed {})\n\n",
        report.counts.bindings, report.counts.passed, report.counts.resolved, report.counts.failed
    ));

    out.push_str("## Bindings\n\n");
    if report.bindings.is_empty() {
        out.push_str("_No bindings registered._\n");
        return out;
    }

    for b in &report.bindings {
        out.push_str(&format!("### {}. `{}`\n\n", b.position + 1, b.rule));
        if let Some(repair) = &b.repair {
            out.push_str(&format!("- Repair: `{}`\n", repair));
        }
        out.push_str(&format!("- Outcome: `{}`\n", outcome_label(&b.outcome)));
        if let BindingOutcome::Failed { source, message } = &b.outcome {
            out.push_str(&format!("- Failed at: `{}`\n", source_label(*source)));
            out.push_str(&format!("\n> {}\n", message));
        }
        out.push('\n');
    }

    let messages = report.failure_messages();
    if !messages.is_empty() {
        out.push_str("## Failures\n\n");
        for m in messages {
            out.push_str(&format!("- {}\n", m));
        }
    }

    out
}

fn binding_label(b: &BindingReport) -> String {
    match &b.repair {
        Some(repair) => format!("{} [{}]", b.rule, repair),
        None => b.rule.clone(),
    }
}

fn status_label(s: RunStatus) -> &'static str {
    match s {
        RunStatus::Pass => "pass",
        RunStatus::Fail => "fail",
    }
}

fn outcome_label(o: &BindingOutcome) -> &'static str {
    match o {
        BindingOutcome::Passed => "passed",
        BindingOutcome::Resolved => "resolved",
        BindingOutcome::Failed { .. } => "failed",
    }
}

fn source_label(s: FailureSource) -> &'static str {
    match s {
        FailureSource::Rule => "rule",
        FailureSource::Repair => "repair",
        FailureSource::Recheck => "recheck",
    }
}
