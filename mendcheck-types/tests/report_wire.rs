use mendcheck_types::{
    BindingOutcome, BindingReport, ErrorKind, FailureSource, RunCounts, RunReport, RunStatus,
};
use pretty_assertions::assert_eq;

fn binding(position: usize, outcome: BindingOutcome) -> BindingReport {
    BindingReport {
        position,
        rule: format!("rule-{position}"),
        repair: None,
        outcome,
    }
}

#[test]
fn run_report_new_sets_schema_status_and_counts() {
    let report = RunReport::new(
        ErrorKind::default(),
        vec![
            binding(0, BindingOutcome::Passed),
            binding(1, BindingOutcome::Resolved),
            binding(
                2,
                BindingOutcome::Failed {
                    source: FailureSource::Recheck,
                    message: "still too long".to_string(),
                },
            ),
        ],
    );

    assert_eq!(report.schema, mendcheck_types::schema::MENDCHECK_REPORT_V1);
    assert_eq!(report.status, RunStatus::Fail);
    assert!(!report.is_success());
    assert_eq!(
        report.counts,
        RunCounts {
            bindings: 3,
            passed: 1,
            resolved: 1,
            failed: 1,
        }
    );
    assert_eq!(report.failure_messages(), vec!["still too long"]);
}

#[test]
fn empty_report_passes() {
    let report = RunReport::new(ErrorKind::custom("Ignored"), vec![]);
    assert!(report.is_success());
    assert_eq!(report.counts.bindings, 0);
    assert!(report.failure_messages().is_empty());
}

#[test]
fn failed_outcome_uses_snake_case_tags() {
    let report = RunReport::new(
        ErrorKind::default(),
        vec![binding(
            0,
            BindingOutcome::Failed {
                source: FailureSource::Repair,
                message: "cannot trim".to_string(),
            },
        )],
    );

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["status"], "fail");
    assert_eq!(json["error_kind"]["type"], "aggregate_validation_failure");
    assert_eq!(json["bindings"][0]["outcome"]["status"], "failed");
    assert_eq!(json["bindings"][0]["outcome"]["source"], "repair");
    assert!(json["bindings"][0].get("repair").is_none());

    let back: RunReport = serde_json::from_value(json).unwrap();
    assert_eq!(back, report);
}
