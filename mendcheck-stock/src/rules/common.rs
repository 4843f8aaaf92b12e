use super::fail;
use crate::attribute::{is_blank, lookup};
use mendcheck_core::{Rule, RuleFailure};
use serde::Serialize;
use std::borrow::Cow;

/// Attribute is present and not blank (null, whitespace, empty, `false` or zero).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotBlank {
    property: String,
    template: Option<String>,
}

impl NotBlank {
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

impl<T: Serialize + ?Sized> Rule<T> for NotBlank {
    fn validate(&self, subject: &T) -> Result<(), RuleFailure> {
        match lookup(subject, &self.property) {
            Some(value) if !is_blank(&value) => Ok(()),
            _ => Err(fail(&self.template, || {
                format!("{} cannot be empty", self.property)
            })),
        }
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Owned(format!("not_blank({})", self.property))
    }
}
