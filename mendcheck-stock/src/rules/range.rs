use super::fail;
use crate::attribute::lookup;
use mendcheck_core::{Rule, RuleFailure};
use serde::Serialize;
use std::borrow::Cow;

/// Numeric attribute lies within `min..=max`.
#[derive(Debug, Clone, PartialEq)]
pub struct Range {
    property: String,
    min: f64,
    max: f64,
    template: Option<String>,
}

impl Range {
    pub fn new(property: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            property: property.into(),
            min,
            max,
            template: None,
        }
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }
}

impl<T: Serialize + ?Sized> Rule<T> for Range {
    fn validate(&self, subject: &T) -> Result<(), RuleFailure> {
        let value = lookup(subject, &self.property).and_then(|v| v.as_f64());
        match value {
            Some(v) if v >= self.min && v <= self.max => Ok(()),
            _ => Err(fail(&self.template, || {
                format!(
                    "{} must be between {} and {}",
                    self.property, self.min, self.max
                )
            })),
        }
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Owned(format!("range({}, {}, {})", self.property, self.min, self.max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bounds_are_inclusive() {
        let rule = Range::new("age", 18.0, 65.0);
        assert!(rule.validate(&json!({ "age": 18 })).is_ok());
        assert!(rule.validate(&json!({ "age": 65 })).is_ok());
        assert!(rule.validate(&json!({ "age": 40.5 })).is_ok());
    }

    #[test]
    fn out_of_range_uses_default_message() {
        let err = Range::new("age", 18.0, 65.0)
            .validate(&json!({ "age": 70 }))
            .unwrap_err();
        assert_eq!(err.message(), "age must be between 18 and 65");
    }

    #[test]
    fn non_numeric_attribute_fails() {
        assert!(
            Range::new("age", 0.0, 1.0)
                .validate(&json!({ "age": "0" }))
                .is_err()
        );
    }
}
