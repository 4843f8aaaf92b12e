use crate::kind::ErrorKind;
use serde::{Deserialize, Serialize};

/// Record of one pipeline run, one entry per binding in registration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub schema: String,
    pub status: RunStatus,

    /// Kind the aggregate error carries (or would carry) for this run.
    pub error_kind: ErrorKind,

    #[serde(default)]
    pub bindings: Vec<BindingReport>,

    pub counts: RunCounts,
}

impl RunReport {
    pub fn new(error_kind: ErrorKind, bindings: Vec<BindingReport>) -> Self {
        let counts = RunCounts::tally(&bindings);
        let status = if counts.failed == 0 {
            RunStatus::Pass
        } else {
            RunStatus::Fail
        };
        Self {
            schema: crate::schema::MENDCHECK_REPORT_V1.to_string(),
            status,
            error_kind,
            bindings,
            counts,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == RunStatus::Pass
    }

    /// Recorded failure messages in binding order.
    pub fn failure_messages(&self) -> Vec<&str> {
        self.bindings
            .iter()
            .filter_map(|b| match &b.outcome {
                BindingOutcome::Failed { message, .. } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Pass,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingReport {
    /// Zero-based registration position.
    pub position: usize,
    pub rule: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repair: Option<String>,

    pub outcome: BindingOutcome,
}

/// Terminal state of a binding after a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BindingOutcome {
    /// The first rule check passed; the repair (if any) was not touched.
    Passed,
    /// The rule failed, the repair succeeded and the re-check passed.
    Resolved,
    /// The binding contributes `message` to the aggregate failure.
    Failed {
        source: FailureSource,
        message: String,
    },
}

/// Which invocation produced a recorded failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureSource {
    /// First rule check, no repair attached.
    Rule,
    /// The attached repair itself failed.
    Repair,
    /// The re-check after a successful repair failed.
    Recheck,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunCounts {
    pub bindings: u64,
    pub passed: u64,
    pub resolved: u64,
    pub failed: u64,
}

impl RunCounts {
    pub fn tally(bindings: &[BindingReport]) -> Self {
        let mut counts = RunCounts {
            bindings: bindings.len() as u64,
            ..RunCounts::default()
        };
        for b in bindings {
            match b.outcome {
                BindingOutcome::Passed => counts.passed += 1,
                BindingOutcome::Resolved => counts.resolved += 1,
                BindingOutcome::Failed { .. } => counts.failed += 1,
            }
        }
        counts
    }
}
