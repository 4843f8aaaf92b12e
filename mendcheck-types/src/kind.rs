use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Kind of the aggregate error returned by a failed pipeline run.
///
/// `AggregateValidationFailure` is used unless the caller overrides it.
/// `Custom` carries any caller-chosen identifier (e.g. `"ProfileInvalid"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "name", rename_all = "snake_case")]
pub enum ErrorKind {
    #[default]
    AggregateValidationFailure,
    Custom(Cow<'static, str>),
}

impl ErrorKind {
    pub fn custom(name: impl Into<Cow<'static, str>>) -> Self {
        ErrorKind::Custom(name.into())
    }

    pub fn is_default(&self) -> bool {
        matches!(self, ErrorKind::AggregateValidationFailure)
    }

    /// Identifier shown in reports and error output.
    pub fn name(&self) -> &str {
        match self {
            ErrorKind::AggregateValidationFailure => "AggregateValidationFailure",
            ErrorKind::Custom(name) => name,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::ErrorKind;

    #[test]
    fn default_kind_is_aggregate_validation_failure() {
        let kind = ErrorKind::default();
        assert!(kind.is_default());
        assert_eq!(kind.to_string(), "AggregateValidationFailure");
    }

    #[test]
    fn custom_kind_displays_its_name() {
        let kind = ErrorKind::custom("ProfileInvalid");
        assert!(!kind.is_default());
        assert_eq!(kind.name(), "ProfileInvalid");
    }

    #[test]
    fn custom_kind_serializes_with_tag() {
        let json = serde_json::to_value(ErrorKind::custom("X")).unwrap();
        assert_eq!(json["type"], "custom");
        assert_eq!(json["name"], "X");
    }
}
