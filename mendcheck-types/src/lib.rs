//! Shared DTOs for the mendcheck workspace.
//!
//! # Design constraints
//! - Report types are serialized to disk by the CLI.
//! - Be conservative with breaking changes.
//! - Prefer adding optional fields over changing semantics.

pub mod kind;
pub mod report;

pub use kind::ErrorKind;
pub use report::{BindingOutcome, BindingReport, FailureSource, RunCounts, RunReport, RunStatus};

/// Schema identifiers.
pub mod schema {
    pub const MENDCHECK_REPORT_V1: &str = "mendcheck.report.v1";
}
