//! The two capabilities a pipeline drives: [`Rule`] and [`Repair`].
//!
//! Any closure with the right shape is a capability, so one-off checks don't
//! need a named type. Wrap a closure in [`named`] to give it a readable name in
//! logs and reports.

use std::borrow::Cow;
use thiserror::Error;

/// Failure reported by a [`Rule`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RuleFailure {
    message: String,
}

impl RuleFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn into_message(self) -> String {
        self.message
    }
}

/// Failure reported by a [`Repair`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RepairFailure {
    message: String,
}

impl RepairFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn into_message(self) -> String {
        self.message
    }
}

/// Checks a subject. Returning `Err` marks the subject as violating the rule.
pub trait Rule<T: ?Sized> {
    fn validate(&self, subject: &T) -> Result<(), RuleFailure>;

    /// Name used in logs and run reports.
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(std::any::type_name::<Self>())
    }
}

/// Mutates a subject in place so that a failed [`Rule`] may pass on re-check.
pub trait Repair<T: ?Sized> {
    fn fix(&self, subject: &mut T) -> Result<(), RepairFailure>;

    /// Name used in logs and run reports.
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(std::any::type_name::<Self>())
    }
}

impl<T: ?Sized, F> Rule<T> for F
where
    F: Fn(&T) -> Result<(), RuleFailure>,
{
    fn validate(&self, subject: &T) -> Result<(), RuleFailure> {
        self(subject)
    }
}

impl<T: ?Sized, F> Repair<T> for F
where
    F: Fn(&mut T) -> Result<(), RepairFailure>,
{
    fn fix(&self, subject: &mut T) -> Result<(), RepairFailure> {
        self(subject)
    }
}

/// A capability with an explicit name.
#[derive(Debug, Clone)]
pub struct Named<C> {
    name: Cow<'static, str>,
    inner: C,
}

/// Attach a display name to a rule or repair (typically a closure).
pub fn named<C>(name: impl Into<Cow<'static, str>>, inner: C) -> Named<C> {
    Named {
        name: name.into(),
        inner,
    }
}

impl<T: ?Sized, C: Rule<T>> Rule<T> for Named<C> {
    fn validate(&self, subject: &T) -> Result<(), RuleFailure> {
        self.inner.validate(subject)
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }
}

impl<T: ?Sized, C: Repair<T>> Repair<T> for Named<C> {
    fn fix(&self, subject: &mut T) -> Result<(), RepairFailure> {
        self.inner.fix(subject)
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_rule_delegates_to_closure() {
        let rule = |v: &i32| {
            if *v > 0 {
                Ok(())
            } else {
                Err(RuleFailure::new("must be positive"))
            }
        };
        assert!(Rule::validate(&rule, &3).is_ok());
        assert_eq!(
            Rule::validate(&rule, &-1).unwrap_err().message(),
            "must be positive"
        );
    }

    #[test]
    fn closure_repair_mutates_subject() {
        let repair = |v: &mut i32| -> Result<(), RepairFailure> {
            *v = v.abs();
            Ok(())
        };
        let mut value = -4;
        Repair::fix(&repair, &mut value).unwrap();
        assert_eq!(value, 4);
    }

    #[test]
    fn named_overrides_type_name() {
        let rule = named("positive", |_: &i32| Ok::<(), RuleFailure>(()));
        assert_eq!(Rule::<i32>::name(&rule), "positive");
    }

    #[test]
    fn failure_display_is_the_bare_message() {
        assert_eq!(RuleFailure::new("bad").to_string(), "bad");
        assert_eq!(RepairFailure::new("worse").to_string(), "worse");
    }
}
