//! Data descriptions of stock rules and repairs.
//!
//! Specs deserialize from configuration (`kind`-tagged, snake_case) and are
//! checked when built, so a bad description fails before it reaches a pipeline.

use crate::repairs::{Clamp, SetDefault, Trim, Truncate};
use crate::rules::{IntType, MaxLength, MinLength, NotBlank, Range, StartAndEndDate, ValidDateTime};
use chrono::format::{Item, StrftimeItems};
use mendcheck_core::{PipelineError, Repair, Rule};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleSpec {
    NotBlank {
        property: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        template: Option<String>,
    },
    MinLength {
        property: String,
        min: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        template: Option<String>,
    },
    MaxLength {
        property: String,
        max: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        template: Option<String>,
    },
    Range {
        property: String,
        min: f64,
        max: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        template: Option<String>,
    },
    IntType {
        property: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        template: Option<String>,
    },
    ValidDateTime {
        property: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        template: Option<String>,
    },
    StartAndEndDate {
        start: String,
        end: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        template: Option<String>,
    },
}

impl RuleSpec {
    pub fn kind(&self) -> &'static str {
        match self {
            RuleSpec::NotBlank { .. } => "not_blank",
            RuleSpec::MinLength { .. } => "min_length",
            RuleSpec::MaxLength { .. } => "max_length",
            RuleSpec::Range { .. } => "range",
            RuleSpec::IntType { .. } => "int_type",
            RuleSpec::ValidDateTime { .. } => "valid_date_time",
            RuleSpec::StartAndEndDate { .. } => "start_and_end_date",
        }
    }

    /// Build the rule for any serializable subject.
    pub fn build<T>(&self) -> Result<Box<dyn Rule<T>>, PipelineError>
    where
        T: Serialize + ?Sized,
    {
        let kind = self.kind();
        let rule: Box<dyn Rule<T>> = match self {
            RuleSpec::NotBlank { property, template } => {
                require_property(kind, property)?;
                Box::new(with_template(NotBlank::new(property), template, NotBlank::with_template))
            }
            RuleSpec::MinLength {
                property,
                min,
                template,
            } => {
                require_property(kind, property)?;
                Box::new(with_template(
                    MinLength::new(property, *min),
                    template,
                    MinLength::with_template,
                ))
            }
            RuleSpec::MaxLength {
                property,
                max,
                template,
            } => {
                require_property(kind, property)?;
                Box::new(with_template(
                    MaxLength::new(property, *max),
                    template,
                    MaxLength::with_template,
                ))
            }
            RuleSpec::Range {
                property,
                min,
                max,
                template,
            } => {
                require_property(kind, property)?;
                require_bounds(kind, *min, *max)?;
                Box::new(with_template(
                    Range::new(property, *min, *max),
                    template,
                    Range::with_template,
                ))
            }
            RuleSpec::IntType { property, template } => {
                require_property(kind, property)?;
                Box::new(with_template(IntType::new(property), template, IntType::with_template))
            }
            RuleSpec::ValidDateTime {
                property,
                format,
                template,
            } => {
                require_property(kind, property)?;
                let mut rule = ValidDateTime::new(property);
                if let Some(format) = format {
                    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
                        return Err(PipelineError::invalid_rule(
                            kind,
                            format!("invalid date format `{format}`"),
                        ));
                    }
                    rule = rule.with_format(format);
                }
                Box::new(with_template(rule, template, ValidDateTime::with_template))
            }
            RuleSpec::StartAndEndDate {
                start,
                end,
                template,
            } => {
                require_property(kind, start)?;
                require_property(kind, end)?;
                if start == end {
                    return Err(PipelineError::invalid_rule(
                        kind,
                        format!("start and end both name `{start}`"),
                    ));
                }
                Box::new(with_template(
                    StartAndEndDate::new(start, end),
                    template,
                    StartAndEndDate::with_template,
                ))
            }
        };
        tracing::debug!(kind, rule = %rule.name(), "built stock rule");
        Ok(rule)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RepairSpec {
    Trim { property: String },
    Truncate { property: String, max: usize },
    Clamp { property: String, min: f64, max: f64 },
    SetDefault { property: String, value: Value },
}

impl RepairSpec {
    pub fn kind(&self) -> &'static str {
        match self {
            RepairSpec::Trim { .. } => "trim",
            RepairSpec::Truncate { .. } => "truncate",
            RepairSpec::Clamp { .. } => "clamp",
            RepairSpec::SetDefault { .. } => "set_default",
        }
    }

    /// Build the repair; stock repairs work on JSON object subjects.
    pub fn build(&self) -> Result<Box<dyn Repair<Value>>, PipelineError> {
        let kind = self.kind();
        let repair: Box<dyn Repair<Value>> = match self {
            RepairSpec::Trim { property } => {
                require_property(kind, property)?;
                Box::new(Trim::new(property))
            }
            RepairSpec::Truncate { property, max } => {
                require_property(kind, property)?;
                Box::new(Truncate::new(property, *max))
            }
            RepairSpec::Clamp { property, min, max } => {
                require_property(kind, property)?;
                require_bounds(kind, *min, *max)?;
                Box::new(Clamp::new(property, *min, *max))
            }
            RepairSpec::SetDefault { property, value } => {
                require_property(kind, property)?;
                Box::new(SetDefault::new(property, value.clone()))
            }
        };
        tracing::debug!(kind, repair = %repair.name(), "built stock repair");
        Ok(repair)
    }
}

fn with_template<R>(rule: R, template: &Option<String>, apply: fn(R, String) -> R) -> R {
    match template {
        Some(t) => apply(rule, t.clone()),
        None => rule,
    }
}

fn require_property(kind: &str, property: &str) -> Result<(), PipelineError> {
    if property.trim().is_empty() {
        return Err(PipelineError::invalid_rule(kind, "property name is empty"));
    }
    Ok(())
}

fn require_bounds(kind: &str, min: f64, max: f64) -> Result<(), PipelineError> {
    if !min.is_finite() || !max.is_finite() {
        return Err(PipelineError::invalid_rule(kind, "bounds must be finite"));
    }
    if min > max {
        return Err(PipelineError::invalid_rule(
            kind,
            format!("min {min} is greater than max {max}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn range_with_inverted_bounds_is_invalid() {
        let spec = RuleSpec::Range {
            property: "age".to_string(),
            min: 10.0,
            max: 1.0,
            template: None,
        };
        let err = spec.build::<Value>().err().expect("invalid");
        assert!(matches!(err, PipelineError::InvalidRule { ref name, .. } if name == "range"));
    }

    #[test]
    fn empty_property_is_invalid() {
        let spec = RuleSpec::NotBlank {
            property: " ".to_string(),
            template: None,
        };
        assert!(spec.build::<Value>().is_err());
    }

    #[test]
    fn bad_date_format_is_invalid() {
        let spec = RuleSpec::ValidDateTime {
            property: "at".to_string(),
            format: Some("%Q".to_string()),
            template: None,
        };
        assert!(spec.build::<Value>().is_err());
    }

    #[test]
    fn template_is_carried_into_rule() {
        let spec = RuleSpec::MaxLength {
            property: "name".to_string(),
            max: 2,
            template: Some("too long".to_string()),
        };
        let rule = spec.build::<Value>().unwrap();
        let err = rule.validate(&json!({ "name": "abc" })).unwrap_err();
        assert_eq!(err.message(), "too long");
    }

    #[test]
    fn clamp_with_nan_is_invalid() {
        let spec = RepairSpec::Clamp {
            property: "x".to_string(),
            min: f64::NAN,
            max: 1.0,
        };
        assert!(spec.build().is_err());
    }
}
