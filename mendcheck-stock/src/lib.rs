//! Stock rules and repairs for mendcheck pipelines.
//!
//! Rules check a named top-level attribute of any `Serialize` subject. Repairs
//! mutate `serde_json::Value` objects. Both can be built from configuration via
//! [`RuleSpec`] and [`RepairSpec`].

mod attribute;
mod catalog;
mod repairs;
mod rules;
mod spec;

pub use catalog::{CATALOG, Capability, CatalogEntry, catalog, lookup};
pub use repairs::{Clamp, SetDefault, Trim, Truncate};
pub use rules::{
    DEFAULT_DATETIME_FORMAT, IntType, MaxLength, MinLength, NotBlank, Range, StartAndEndDate,
    ValidDateTime,
};
pub use spec::{RepairSpec, RuleSpec};
