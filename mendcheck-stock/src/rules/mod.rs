//! Stock rules. Each checks one attribute of a serialized subject and fails
//! with its template message (a default, or one supplied by the caller).

mod common;
mod datetime;
mod integer;
mod range;
mod string;

pub use common::NotBlank;
pub use datetime::{DEFAULT_DATETIME_FORMAT, StartAndEndDate, ValidDateTime};
pub use integer::IntType;
pub use range::Range;
pub use string::{MaxLength, MinLength};

use mendcheck_core::RuleFailure;

fn fail(template: &Option<String>, default: impl FnOnce() -> String) -> RuleFailure {
    RuleFailure::new(template.clone().unwrap_or_else(default))
}
