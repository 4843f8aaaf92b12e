use super::fail;
use crate::attribute::lookup;
use mendcheck_core::{Rule, RuleFailure};
use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;

/// Attribute is an integer number (not a float, not a numeric string).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntType {
    property: String,
    template: Option<String>,
}

impl IntType {
    pub fn new(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            template: None,
        }
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }
}

impl<T: Serialize + ?Sized> Rule<T> for IntType {
    fn validate(&self, subject: &T) -> Result<(), RuleFailure> {
        match lookup(subject, &self.property) {
            Some(Value::Number(n)) if n.is_i64() || n.is_u64() => Ok(()),
            _ => Err(fail(&self.template, || {
                format!("{} is not integer.", self.property)
            })),
        }
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Owned(format!("int_type({})", self.property))
    }
}
