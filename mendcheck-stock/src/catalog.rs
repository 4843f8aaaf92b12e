//! Registry of stock rules and repairs, for listings and help output.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Rule,
    Repair,
}

/// Describes one stock entry.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    /// `kind` tag used in configuration.
    pub kind: &'static str,
    pub capability: Capability,
    /// Fields a config entry takes besides `kind`.
    pub fields: &'static [&'static str],
    pub description: &'static str,
}

pub static CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        kind: "not_blank",
        capability: Capability::Rule,
        fields: &["property", "template?"],
        description: "Attribute is present and not null, whitespace, empty, false or zero.",
    },
    CatalogEntry {
        kind: "min_length",
        capability: Capability::Rule,
        fields: &["property", "min", "template?"],
        description: "String attribute has at least `min` characters (arrays: items).",
    },
    CatalogEntry {
        kind: "max_length",
        capability: Capability::Rule,
        fields: &["property", "max", "template?"],
        description: "String attribute has at most `max` characters (arrays: items).",
    },
    CatalogEntry {
        kind: "range",
        capability: Capability::Rule,
        fields: &["property", "min", "max", "template?"],
        description: "Numeric attribute lies between `min` and `max`, inclusive.",
    },
    CatalogEntry {
        kind: "int_type",
        capability: Capability::Rule,
        fields: &["property", "template?"],
        description: "Attribute is an integer number.",
    },
    CatalogEntry {
        kind: "valid_date_time",
        capability: Capability::Rule,
        fields: &["property", "format?", "template?"],
        description: "String attribute parses with `format` (default `%Y-%m-%d %H:%M:%S`); date-only and time-only formats work.",
    },
    CatalogEntry {
        kind: "start_and_end_date",
        capability: Capability::Rule,
        fields: &["start", "end", "template?"],
        description: "The `end` attribute is a later moment than the `start` attribute.",
    },
    CatalogEntry {
        kind: "trim",
        capability: Capability::Repair,
        fields: &["property"],
        description: "Trim surrounding whitespace from a string attribute.",
    },
    CatalogEntry {
        kind: "truncate",
        capability: Capability::Repair,
        fields: &["property", "max"],
        description: "Cut a string attribute down to `max` characters.",
    },
    CatalogEntry {
        kind: "clamp",
        capability: Capability::Repair,
        fields: &["property", "min", "max"],
        description: "Clamp a numeric attribute into `min..=max`.",
    },
    CatalogEntry {
        kind: "set_default",
        capability: Capability::Repair,
        fields: &["property", "value"],
        description: "Fill a missing or blank attribute with `value`.",
    },
];

pub fn catalog() -> &'static [CatalogEntry] {
    CATALOG
}

pub fn lookup(kind: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|e| e.kind == kind)
}
