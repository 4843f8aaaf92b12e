use super::fail;
use crate::attribute::{length, lookup};
use mendcheck_core::{Rule, RuleFailure};
use serde::Serialize;
use std::borrow::Cow;

/// String (or array) attribute has at least `min` characters (items).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinLength {
    property: String,
    min: usize,
    template: Option<String>,
}

impl MinLength {
    pub fn new(property: impl Into<String>, min: usize) -> Self {
        Self {
            property: property.into(),
            min,
            template: None,
        }
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }
}

impl<T: Serialize + ?Sized> Rule<T> for MinLength {
    fn validate(&self, subject: &T) -> Result<(), RuleFailure> {
        match lookup(subject, &self.property).as_ref().and_then(length) {
            Some(len) if len >= self.min => Ok(()),
            _ => Err(fail(&self.template, || {
                format!("{} must have at least {} characters.", self.property, self.min)
            })),
        }
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Owned(format!("min_length({}, {})", self.property, self.min))
    }
}

/// String (or array) attribute has at most `max` characters (items).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaxLength {
    property: String,
    max: usize,
    template: Option<String>,
}

impl MaxLength {
    pub fn new(property: impl Into<String>, max: usize) -> Self {
        Self {
            property: property.into(),
            max,
            template: None,
        }
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }
}

impl<T: Serialize + ?Sized> Rule<T> for MaxLength {
    fn validate(&self, subject: &T) -> Result<(), RuleFailure> {
        match lookup(subject, &self.property).as_ref().and_then(length) {
            Some(len) if len <= self.max => Ok(()),
            _ => Err(fail(&self.template, || {
                format!("{} exceeds maximum length ({}).", self.property, self.max)
            })),
        }
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Owned(format!("max_length({}, {})", self.property, self.max))
    }
}
