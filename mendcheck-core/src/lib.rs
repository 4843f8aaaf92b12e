//! Validate-repair-revalidate pipelines over a single subject.
//!
//! A [`Pipeline`] holds an ordered list of bindings, each one [`Rule`] with at
//! most one [`Repair`]. Running it evaluates every binding in order:
//!
//! 1. the rule checks the subject;
//! 2. if it fails and a repair is attached, the repair runs once and the rule is
//!    checked once more;
//! 3. whatever still fails is recorded, and evaluation moves on.
//!
//! A run with recorded failures returns a single [`AggregateFailure`] listing
//! every message in registration order.
//!
//! This crate performs no I/O and defines no concrete rules; see
//! `mendcheck-stock` for the stock catalog.

mod capability;
mod error;
mod factory;
mod pipeline;

pub use capability::{Named, Repair, RepairFailure, Rule, RuleFailure, named};
pub use error::{AggregateFailure, PipelineError, PipelineResult};
pub use factory::PipelineFactory;
pub use pipeline::Pipeline;

// Re-export the shared types so callers don't need mendcheck-types directly.
pub use mendcheck_types::{
    BindingOutcome, BindingReport, ErrorKind, FailureSource, RunCounts, RunReport, RunStatus,
};
