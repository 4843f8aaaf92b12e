//! The pipeline: ordered (rule, optional repair) bindings over one subject.
//!
//! Every binding is evaluated, in registration order, even when earlier
//! bindings failed. A failed rule check triggers the binding's repair once and
//! one re-check; whatever still fails is recorded and reported together.

use crate::capability::{Repair, Rule};
use crate::error::{AggregateFailure, PipelineError, PipelineResult};
use mendcheck_types::{BindingOutcome, BindingReport, ErrorKind, FailureSource, RunReport};
use tracing::{debug, info, warn};

struct Binding<'a, T: ?Sized> {
    rule: Box<dyn Rule<T> + 'a>,
    repair: Option<Box<dyn Repair<T> + 'a>>,
}

/// A validation pipeline bound to one mutably borrowed subject.
///
/// Built with chained calls and consumed by [`Pipeline::run`]:
///
/// ```
/// use mendcheck_core::{Pipeline, RepairFailure, RuleFailure};
///
/// let mut name = String::from("  ada  ");
/// Pipeline::new(&mut name)
///     .add_rule(|s: &String| {
///         if s.trim() == s.as_str() {
///             Ok(())
///         } else {
///             Err(RuleFailure::new("name has surrounding whitespace"))
///         }
///     })
///     .add_repair(|s: &mut String| -> Result<(), RepairFailure> {
///         *s = s.trim().to_string();
///         Ok(())
///     })?
///     .run()?;
/// assert_eq!(name, "ada");
/// # Ok::<(), mendcheck_core::PipelineError>(())
/// ```
pub struct Pipeline<'a, T: ?Sized> {
    subject: &'a mut T,
    bindings: Vec<Binding<'a, T>>,
    /// Index of the binding the next `add_repair` attaches to.
    cursor: Option<usize>,
    error_kind: Option<ErrorKind>,
}

impl<'a, T: ?Sized> Pipeline<'a, T> {
    pub fn new(subject: &'a mut T) -> Self {
        Self {
            subject,
            bindings: Vec::new(),
            cursor: None,
            error_kind: None,
        }
    }

    /// Append a rule as a new binding with no repair.
    pub fn add_rule(self, rule: impl Rule<T> + 'a) -> Self {
        self.add_boxed_rule(Box::new(rule))
    }

    pub fn add_boxed_rule(mut self, rule: Box<dyn Rule<T> + 'a>) -> Self {
        debug!(binding = self.bindings.len(), rule = %rule.name(), "add rule");
        self.bindings.push(Binding { rule, repair: None });
        self.cursor = Some(self.bindings.len() - 1);
        self
    }

    /// Attach a repair to the most recently added rule.
    ///
    /// A later call before the next `add_rule` replaces the earlier repair.
    pub fn add_repair(self, repair: impl Repair<T> + 'a) -> PipelineResult<Self> {
        self.add_boxed_repair(Box::new(repair))
    }

    pub fn add_boxed_repair(
        mut self,
        repair: Box<dyn Repair<T> + 'a>,
    ) -> PipelineResult<Self> {
        let Some(idx) = self.cursor else {
            return Err(PipelineError::RepairWithoutRule {
                repair: repair.name().into_owned(),
            });
        };

        let binding = &mut self.bindings[idx];
        if let Some(previous) = &binding.repair {
            debug!(
                binding = idx,
                previous = %previous.name(),
                repair = %repair.name(),
                "replacing repair"
            );
        } else {
            debug!(binding = idx, repair = %repair.name(), "add repair");
        }
        binding.repair = Some(repair);
        Ok(self)
    }

    /// Kind of the aggregate error when the run fails. Replaces any earlier value.
    pub fn with_error_type(mut self, kind: ErrorKind) -> Self {
        self.error_kind = Some(kind);
        self
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// The kind a failed run will carry.
    pub fn error_kind(&self) -> ErrorKind {
        self.error_kind.clone().unwrap_or_default()
    }

    /// Run every binding and report the terminal state of each.
    pub fn evaluate(self) -> RunReport {
        let error_kind = self.error_kind();
        let Pipeline {
            subject, bindings, ..
        } = self;

        let reports: Vec<BindingReport> = bindings
            .iter()
            .enumerate()
            .map(|(position, binding)| BindingReport {
                position,
                rule: binding.rule.name().into_owned(),
                repair: binding.repair.as_ref().map(|r| r.name().into_owned()),
                outcome: evaluate_binding(position, binding, &mut *subject),
            })
            .collect();

        let report = RunReport::new(error_kind, reports);
        info!(
            bindings = report.counts.bindings,
            passed = report.counts.passed,
            resolved = report.counts.resolved,
            failed = report.counts.failed,
            "pipeline run finished"
        );
        report
    }

    /// Run every binding; fail with one aggregate error if any binding failed.
    pub fn run(self) -> Result<(), AggregateFailure> {
        let report = self.evaluate();
        match AggregateFailure::from_report(&report) {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }

    /// Like [`Pipeline::run`], with the aggregate mapped into the caller's error type.
    pub fn run_with<E>(self, wrap: impl FnOnce(AggregateFailure) -> E) -> Result<(), E> {
        self.run().map_err(wrap)
    }
}

fn evaluate_binding<T: ?Sized>(
    position: usize,
    binding: &Binding<'_, T>,
    subject: &mut T,
) -> BindingOutcome {
    let rule = binding.rule.name();

    let first = match binding.rule.validate(subject) {
        Ok(()) => {
            debug!(binding = position, rule = %rule, "rule passed");
            return BindingOutcome::Passed;
        }
        Err(e) => e,
    };

    let Some(repair) = &binding.repair else {
        warn!(binding = position, rule = %rule, error = %first, "rule failed");
        return BindingOutcome::Failed {
            source: FailureSource::Rule,
            message: first.into_message(),
        };
    };

    debug!(
        binding = position,
        rule = %rule,
        repair = %repair.name(),
        error = %first,
        "rule failed; attempting repair"
    );

    if let Err(e) = repair.fix(subject) {
        warn!(binding = position, repair = %repair.name(), error = %e, "repair failed");
        return BindingOutcome::Failed {
            source: FailureSource::Repair,
            message: e.into_message(),
        };
    }

    match binding.rule.validate(subject) {
        Ok(()) => {
            debug!(binding = position, rule = %rule, "rule passed after repair");
            BindingOutcome::Resolved
        }
        Err(e) => {
            warn!(binding = position, rule = %rule, error = %e, "rule failed after repair");
            BindingOutcome::Failed {
                source: FailureSource::Recheck,
                message: e.into_message(),
            }
        }
    }
}
