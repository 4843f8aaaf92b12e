use super::fail;
use crate::attribute::lookup;
use chrono::format::{ParseErrorKind, Parsed, StrftimeItems, parse};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use mendcheck_core::{Rule, RuleFailure};
use serde::Serialize;
use std::borrow::Cow;

pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats accepted when comparing dates, tried in order after RFC 3339.
const MOMENT_FORMATS: &[&str] = &[DEFAULT_DATETIME_FORMAT, "%Y-%m-%dT%H:%M:%S"];

/// String attribute parses with the given `chrono` format.
///
/// The format may describe a full date-time, a date only, or a time only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDateTime {
    property: String,
    format: String,
    template: Option<String>,
}

impl ValidDateTime {
    pub fn new(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            format: DEFAULT_DATETIME_FORMAT.to_string(),
            template: None,
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }
}

impl<T: Serialize + ?Sized> Rule<T> for ValidDateTime {
    fn validate(&self, subject: &T) -> Result<(), RuleFailure> {
        let valid = lookup(subject, &self.property)
            .as_ref()
            .and_then(|v| v.as_str())
            .is_some_and(|s| matches_format(s, &self.format));
        if valid {
            Ok(())
        } else {
            Err(fail(&self.template, || format!("{} invalid.", self.property)))
        }
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Owned(format!("valid_date_time({})", self.property))
    }
}

/// Accepts `s` when every field the format asks for is present and forms a
/// real date, time or date-time. An impossible date (e.g. Feb 30) is rejected
/// even when the time part is fine.
fn matches_format(s: &str, format: &str) -> bool {
    let mut parsed = Parsed::new();
    if parse(&mut parsed, s, StrftimeItems::new(format)).is_err() {
        return false;
    }
    match parsed.to_naive_datetime_with_offset(0) {
        Ok(_) => true,
        Err(e) if e.kind() == ParseErrorKind::NotEnough => match parsed.to_naive_date() {
            Ok(_) => true,
            Err(e) if e.kind() == ParseErrorKind::NotEnough => parsed.to_naive_time().is_ok(),
            Err(_) => false,
        },
        Err(_) => false,
    }
}

/// The `end` attribute is a later moment than the `start` attribute.
///
/// Both sides must carry an offset (RFC 3339) or neither does; a mixed pair
/// fails rather than being compared on different clocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartAndEndDate {
    start: String,
    end: String,
    template: Option<String>,
}

impl StartAndEndDate {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            template: None,
        }
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    fn moment<T: Serialize + ?Sized>(subject: &T, property: &str) -> Result<Moment, RuleFailure> {
        lookup(subject, property)
            .as_ref()
            .and_then(|v| v.as_str())
            .and_then(parse_moment)
            .ok_or_else(|| RuleFailure::new(format!("{property} is not a valid date")))
    }
}

impl<T: Serialize + ?Sized> Rule<T> for StartAndEndDate {
    fn validate(&self, subject: &T) -> Result<(), RuleFailure> {
        let later = match (
            Self::moment(subject, &self.start)?,
            Self::moment(subject, &self.end)?,
        ) {
            (Moment::Aware(start), Moment::Aware(end)) => end > start,
            (Moment::Local(start), Moment::Local(end)) => end > start,
            _ => {
                return Err(RuleFailure::new(format!(
                    "{} and {} must both have a UTC offset or both have none",
                    self.start, self.end
                )));
            }
        };
        if later {
            Ok(())
        } else {
            Err(fail(&self.template, || {
                "Start date greater than end date".to_string()
            }))
        }
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Owned(format!("start_and_end_date({}, {})", self.start, self.end))
    }
}

enum Moment {
    Aware(DateTime<FixedOffset>),
    Local(NaiveDateTime),
}

fn parse_moment(s: &str) -> Option<Moment> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(Moment::Aware(dt));
    }
    for fmt in MOMENT_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Moment::Local(dt));
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(Moment::Local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn valid_date_time_uses_default_format() {
        let rule = ValidDateTime::new("created");
        assert!(rule.validate(&json!({ "created": "2024-02-29 13:45:00" })).is_ok());
        assert_eq!(
            rule.validate(&json!({ "created": "2023-02-29 13:45:00" }))
                .unwrap_err()
                .message(),
            "created invalid."
        );
    }

    #[test]
    fn valid_date_time_honours_custom_format() {
        let rule = ValidDateTime::new("created").with_format("%d/%m/%Y %H:%M");
        assert!(rule.validate(&json!({ "created": "01/02/2024 10:00" })).is_ok());
    }

    #[test]
    fn end_must_follow_start() {
        let rule = StartAndEndDate::new("start", "end");
        assert!(
            rule.validate(&json!({ "start": "2024-01-01", "end": "2024-01-02 00:00:01" }))
                .is_ok()
        );
        assert_eq!(
            rule.validate(&json!({ "start": "2024-01-02", "end": "2024-01-01" }))
                .unwrap_err()
                .message(),
            "Start date greater than end date"
        );
    }

    #[test]
    fn valid_date_time_accepts_date_only_format() {
        let rule = ValidDateTime::new("born").with_format("%Y-%m-%d");
        assert!(rule.validate(&json!({ "born": "2024-01-15" })).is_ok());
        assert!(rule.validate(&json!({ "born": "2024-02-30" })).is_err());
        assert!(rule.validate(&json!({ "born": "2024-01-15 10:00:00" })).is_err());
    }

    #[test]
    fn valid_date_time_accepts_time_only_format() {
        let rule = ValidDateTime::new("opens").with_format("%H:%M");
        assert!(rule.validate(&json!({ "opens": "09:30" })).is_ok());
        assert!(rule.validate(&json!({ "opens": "25:00" })).is_err());
    }

    #[test]
    fn impossible_date_with_valid_time_is_rejected() {
        let rule = ValidDateTime::new("created");
        assert!(rule.validate(&json!({ "created": "2024-02-30 10:00:00" })).is_err());
    }

    #[test]
    fn equal_moments_fail() {
        let rule = StartAndEndDate::new("start", "end");
        assert!(
            rule.validate(&json!({ "start": "2024-01-01", "end": "2024-01-01 00:00:00" }))
                .is_err()
        );
    }

    #[test]
    fn offsets_are_compared_as_instants() {
        let rule = StartAndEndDate::new("start", "end");
        // 10:00+02:00 is 08:00Z, so an end at 09:00Z is later.
        assert!(
            rule.validate(&json!({
                "start": "2024-01-01T10:00:00+02:00",
                "end": "2024-01-01T09:00:00Z",
            }))
            .is_ok()
        );
    }

    #[test]
    fn mixed_offset_and_local_moments_fail() {
        let err = StartAndEndDate::new("start", "end")
            .validate(&json!({ "start": "2024-01-01T10:00:00+02:00", "end": "2024-01-02" }))
            .unwrap_err();
        assert_eq!(
            err.message(),
            "start and end must both have a UTC offset or both have none"
        );
    }

    #[test]
    fn unparsable_dates_name_the_attribute() {
        let err = StartAndEndDate::new("start", "end")
            .validate(&json!({ "start": "soon", "end": "2024-01-01" }))
            .unwrap_err();
        assert_eq!(err.message(), "start is not a valid date");
    }
}
