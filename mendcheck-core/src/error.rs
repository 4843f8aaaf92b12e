//! Error types for mendcheck-core.
//!
//! This module separates:
//! - Caller errors raised while building a pipeline (exit code 1): absent subject,
//!   invalid rule description, repair with nothing to attach to
//! - The aggregate validation failure returned by a run (exit code 2)

use mendcheck_types::{ErrorKind, RunReport};
use thiserror::Error;

/// The top-level error type for building and running pipelines.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The factory was asked to build a pipeline without a subject.
    #[error("invalid subject: {message}")]
    InvalidSubject {
        /// Why the subject was rejected.
        message: String,
    },

    /// A rule (or repair) description could not be turned into a capability.
    #[error("invalid rule `{name}`: {reason}")]
    InvalidRule {
        /// Rule kind or name as supplied by the caller.
        name: String,
        /// What is wrong with it.
        reason: String,
    },

    /// `add_repair` was called before any `add_rule`.
    #[error("repair `{repair}` has no rule to attach to; call add_rule first")]
    RepairWithoutRule {
        /// Name of the orphaned repair.
        repair: String,
    },

    /// One or more bindings failed during a run.
    #[error(transparent)]
    Aggregate(#[from] AggregateFailure),
}

impl PipelineError {
    pub fn invalid_rule(name: impl Into<String>, reason: impl Into<String>) -> Self {
        PipelineError::InvalidRule {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if this is a recorded validation failure rather than a caller error.
    pub fn is_validation_failure(&self) -> bool {
        matches!(self, PipelineError::Aggregate(_))
    }

    /// Returns the recommended exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            PipelineError::Aggregate(_) => 2,
            _ => 1,
        }
    }
}

/// The single error a failed run returns.
///
/// Its display text is every recorded failure message, in binding order,
/// joined by `\n`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .messages.join("\n"))]
pub struct AggregateFailure {
    kind: ErrorKind,
    messages: Vec<String>,
}

impl AggregateFailure {
    /// `messages` must be non-empty; a run with no failures is a success.
    pub(crate) fn new(kind: ErrorKind, messages: Vec<String>) -> Self {
        debug_assert!(!messages.is_empty());
        Self { kind, messages }
    }

    /// Builds the aggregate for a report, or `None` when the run passed.
    pub fn from_report(report: &RunReport) -> Option<Self> {
        let messages: Vec<String> = report
            .failure_messages()
            .into_iter()
            .map(str::to_string)
            .collect();
        if messages.is_empty() {
            None
        } else {
            Some(Self::new(report.error_kind.clone(), messages))
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn message(&self) -> String {
        self.messages.join("\n")
    }
}

/// Result type alias using PipelineError.
pub type PipelineResult<T> = Result<T, PipelineError>;
