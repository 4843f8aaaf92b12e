//! Stock rules and repairs driven through a real pipeline.

use mendcheck_core::{ErrorKind, Pipeline};
use mendcheck_stock::{
    Capability, Clamp, IntType, MaxLength, MinLength, NotBlank, Range, RepairSpec, RuleSpec,
    StartAndEndDate, Trim, Truncate, ValidDateTime, catalog,
};
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, Serialize)]
struct Booking {
    guest: String,
    nights: i64,
    check_in: String,
    check_out: String,
}

#[test]
fn typed_subject_collects_every_violation() {
    let mut booking = Booking {
        guest: String::new(),
        nights: 40,
        check_in: "2024-03-10 14:00:00".to_string(),
        check_out: "2024-03-01 11:00:00".to_string(),
    };

    let err = Pipeline::new(&mut booking)
        .add_rule(NotBlank::new("guest"))
        .add_rule(Range::new("nights", 1.0, 30.0))
        .add_rule(ValidDateTime::new("check_in"))
        .add_rule(StartAndEndDate::new("check_in", "check_out"))
        .with_error_type(ErrorKind::custom("BookingInvalid"))
        .run()
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "guest cannot be empty\nnights must be between 1 and 30\nStart date greater than end date"
    );
    assert_eq!(err.kind().name(), "BookingInvalid");
}

#[test]
fn json_subject_is_repaired_in_place() {
    let mut subject = json!({
        "name": "  Grace Brewster Murray Hopper  ",
        "age": 130,
        "count": 3,
    });

    let report = Pipeline::new(&mut subject)
        .add_rule(MaxLength::new("name", 10))
        .add_repair(Truncate::new("name", 10))
        .unwrap()
        .add_rule(Range::new("age", 0.0, 120.0))
        .add_repair(Clamp::new("age", 0.0, 120.0))
        .unwrap()
        .add_rule(IntType::new("count"))
        .evaluate();

    assert!(report.is_success());
    assert_eq!(report.counts.resolved, 2);
    assert_eq!(subject["name"], json!("  Grace Br"));
    assert_eq!(subject["age"], json!(120));
}

#[test]
fn repair_that_cannot_help_reports_recheck_failure() {
    let mut subject = json!({ "name": " " });

    let err = Pipeline::new(&mut subject)
        .add_rule(MinLength::new("name", 2))
        .add_repair(Trim::new("name"))
        .unwrap()
        .run()
        .unwrap_err();

    assert_eq!(err.to_string(), "name must have at least 2 characters.");
    assert_eq!(subject, json!({ "name": "" }));
}

#[derive(Debug, Deserialize)]
struct Entry {
    #[serde(flatten)]
    rule: RuleSpec,
    repair: Option<RepairSpec>,
}

#[derive(Debug, Deserialize)]
struct RuleSet {
    rules: Vec<Entry>,
}

#[test]
fn specs_deserialize_from_toml_and_build() {
    let set: RuleSet = toml::from_str(
        r#"
[[rules]]
kind = "max_length"
property = "name"
max = 4
repair = { kind = "truncate", property = "name", max = 4 }

[[rules]]
kind = "range"
property = "age"
min = 0
max = 10
template = "age is off"
"#,
    )
    .unwrap();

    let mut subject = json!({ "name": "abcdef", "age": 11 });
    let mut pipeline = Pipeline::new(&mut subject);
    for entry in &set.rules {
        pipeline = pipeline.add_boxed_rule(entry.rule.build::<Value>().unwrap());
        if let Some(repair) = &entry.repair {
            pipeline = pipeline.add_boxed_repair(repair.build().unwrap()).unwrap();
        }
    }

    let err = pipeline.run().unwrap_err();
    assert_eq!(err.to_string(), "age is off");
    assert_eq!(subject["name"], json!("abcd"));
}

#[test]
fn every_catalog_entry_has_a_spec() {
    for entry in catalog() {
        let parsed = match entry.capability {
            Capability::Rule => {
                let raw = minimal_spec(entry.kind);
                serde_json::from_value::<RuleSpec>(raw).map(|s| s.kind())
            }
            Capability::Repair => {
                let raw = minimal_spec(entry.kind);
                serde_json::from_value::<RepairSpec>(raw).map(|s| s.kind())
            }
        };
        assert_eq!(parsed.unwrap(), entry.kind);
    }
}

fn minimal_spec(kind: &str) -> Value {
    json!({
        "kind": kind,
        "property": "p",
        "start": "a",
        "end": "b",
        "min": 0,
        "max": 1,
        "value": 0,
    })
}
