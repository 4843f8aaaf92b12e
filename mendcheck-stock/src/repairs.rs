//! Stock repairs for JSON object subjects.

use crate::attribute::is_blank;
use mendcheck_core::{Repair, RepairFailure};
use serde_json::{Number, Value};
use std::borrow::Cow;

fn attribute_mut<'v>(
    subject: &'v mut Value,
    property: &str,
    action: &str,
) -> Result<&'v mut Value, RepairFailure> {
    subject
        .as_object_mut()
        .and_then(|map| map.get_mut(property))
        .ok_or_else(|| RepairFailure::new(format!("cannot {action} {property}: attribute missing")))
}

/// Trim surrounding whitespace from a string attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trim {
    property: String,
}

impl Trim {
    pub fn new(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
        }
    }
}

impl Repair<Value> for Trim {
    fn fix(&self, subject: &mut Value) -> Result<(), RepairFailure> {
        match attribute_mut(subject, &self.property, "trim")? {
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.len() != s.len() {
                    *s = trimmed.to_string();
                }
                Ok(())
            }
            _ => Err(RepairFailure::new(format!(
                "cannot trim {}: not a string",
                self.property
            ))),
        }
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Owned(format!("trim({})", self.property))
    }
}

/// Cut a string attribute down to `max` characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truncate {
    property: String,
    max: usize,
}

impl Truncate {
    pub fn new(property: impl Into<String>, max: usize) -> Self {
        Self {
            property: property.into(),
            max,
        }
    }
}

impl Repair<Value> for Truncate {
    fn fix(&self, subject: &mut Value) -> Result<(), RepairFailure> {
        match attribute_mut(subject, &self.property, "truncate")? {
            Value::String(s) => {
                if let Some((idx, _)) = s.char_indices().nth(self.max) {
                    s.truncate(idx);
                }
                Ok(())
            }
            _ => Err(RepairFailure::new(format!(
                "cannot truncate {}: not a string",
                self.property
            ))),
        }
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Owned(format!("truncate({}, {})", self.property, self.max))
    }
}

/// Clamp a numeric attribute into `min..=max`.
///
/// Integer attributes stay integers when both bounds are whole numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct Clamp {
    property: String,
    min: f64,
    max: f64,
}

impl Clamp {
    pub fn new(property: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            property: property.into(),
            min,
            max,
        }
    }

    fn clamped(&self, n: &Number) -> Option<Number> {
        let integral_bounds = self.min.fract() == 0.0 && self.max.fract() == 0.0;
        if let (Some(i), true) = (n.as_i64(), integral_bounds) {
            return Some(Number::from(i.max(self.min as i64).min(self.max as i64)));
        }
        n.as_f64()
            .and_then(|f| Number::from_f64(f.max(self.min).min(self.max)))
    }
}

impl Repair<Value> for Clamp {
    fn fix(&self, subject: &mut Value) -> Result<(), RepairFailure> {
        let not_a_number =
            || RepairFailure::new(format!("cannot clamp {}: not a number", self.property));
        match attribute_mut(subject, &self.property, "clamp")? {
            Value::Number(n) => {
                *n = self.clamped(n).ok_or_else(not_a_number)?;
                Ok(())
            }
            _ => Err(not_a_number()),
        }
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Owned(format!("clamp({}, {}, {})", self.property, self.min, self.max))
    }
}

/// Fill a missing or blank attribute with a default value.
#[derive(Debug, Clone, PartialEq)]
pub struct SetDefault {
    property: String,
    value: Value,
}

impl SetDefault {
    pub fn new(property: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

impl Repair<Value> for SetDefault {
    fn fix(&self, subject: &mut Value) -> Result<(), RepairFailure> {
        let map = subject.as_object_mut().ok_or_else(|| {
            RepairFailure::new(format!(
                "cannot set default for {}: subject is not an object",
                self.property
            ))
        })?;
        let current = map.entry(self.property.clone()).or_insert(Value::Null);
        if is_blank(current) {
            *current = self.value.clone();
        }
        Ok(())
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Owned(format!("set_default({})", self.property))
    }
}
