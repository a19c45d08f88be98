use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use vigil_validator::prelude::*;

// ============================================================================
// FIXTURES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Kinship {
    Child,
    Spouse,
}

impl ToValue for Kinship {
    fn to_value(&self) -> Value {
        let variant = match self {
            Self::Child => "CHILD",
            Self::Spouse => "SPOUSE",
        };
        Value::Enum(EnumValue::new("Kinship", variant))
    }
}

struct Address {
    street: String,
    city: Option<String>,
}

impl ToValue for Address {
    fn to_value(&self) -> Value {
        Value::Object(
            Object::new("Address")
                .with_field("street", &self.street)
                .with_field("city", &self.city),
        )
    }
}

struct Dependent {
    name: String,
    age: u8,
    kinship: Kinship,
}

impl ToValue for Dependent {
    fn to_value(&self) -> Value {
        Value::Object(
            Object::new("Dependent")
                .with_field("name", &self.name)
                .with_field("age", self.age)
                .with_field("kinship", self.kinship),
        )
    }
}

impl Validatable for Dependent {
    fn constraints(v: &mut ValidationContext<'_, Self>) {
        v.field("name", |d| &d.name).is_not_blank();
        v.field("age", |d| &d.age).is_less_than_or_equal_to(17);
        v.field("kinship", |d| &d.kinship).is_equal_to(Kinship::Child);
    }
}

struct Employee {
    id: i64,
    name: String,
    salary: i64,
    address: Option<Address>,
    dependents: Vec<Dependent>,
    phones: BTreeMap<String, String>,
}

fn employee() -> Employee {
    Employee {
        id: 1,
        name: "Ana".into(),
        salary: 5_000,
        address: Some(Address { street: "Rua A".into(), city: Some("Lisboa".into()) }),
        dependents: vec![Dependent { name: "Rui".into(), age: 9, kinship: Kinship::Child }],
        phones: BTreeMap::from([("home".to_owned(), "555-0101".to_owned())]),
    }
}

fn employee_rules(v: &mut ValidationContext<'_, Employee>) {
    v.field("id", |e| &e.id).is_positive();
    v.field("name", |e| &e.name).is_not_blank().has_size(1, 40);
    v.field("salary", |e| &e.salary).is_between(1, 9_876);
    v.field_opt("address", |e| e.address.as_ref()).is_not_null().validate_nested(|a| {
        a.field("street", |a| &a.street).is_not_blank();
        a.field_opt("city", |a| a.city.as_ref()).is_not_null();
    });
    v.field("dependents", |e| &e.dependents).validate_for_each(|d| {
        Dependent::constraints(d);
    });
    v.field("phones", |e| &e.phones).validate_for_each_entry_keyed(|entry| {
        entry.field("value", |e| e.value).starts_with("555");
    });
}

fn paths(violations: &ConstraintViolations) -> Vec<&str> {
    violations.iter().map(ConstraintViolation::property_path).collect()
}

// ============================================================================
// COLLECTION
// ============================================================================

#[test]
fn test_valid_employee_passes() {
    assert!(validate(&employee(), employee_rules).is_ok());
}

#[test]
fn test_every_failure_is_reported_in_source_order() {
    let mut e = employee();
    e.id = 0;
    e.name = " ".into();
    e.salary = 10_000;
    e.address.as_mut().unwrap().city = None;
    e.dependents.push(Dependent { name: String::new(), age: 30, kinship: Kinship::Spouse });
    e.phones.insert("work".into(), "+1 800".into());

    let violations = validate(&e, employee_rules).unwrap_err();

    assert_eq!(
        paths(&violations),
        vec![
            "id",
            "name",
            "salary",
            "address.city",
            "dependents[1].name",
            "dependents[1].age",
            "dependents[1].kinship",
            "phones[work].value",
        ]
    );
}

#[test]
fn test_violation_carries_value_and_constraint() {
    let mut e = employee();
    e.salary = 10_000;

    let violations = validate(&e, employee_rules).unwrap_err();
    let violation = violations.at("salary").next().unwrap();

    assert_eq!(violation.value(), Some(&Value::Integer(10_000)));
    assert_eq!(violation.constraint().name(), names::BETWEEN);
    assert_eq!(violation.constraint().message_key(), "vigil.constraints.Between.message");
}

#[test]
fn test_absent_nested_object_reports_only_not_null() {
    let mut e = employee();
    e.address = None;

    let violations = validate(&e, employee_rules).unwrap_err();

    assert_eq!(paths(&violations), vec!["address"]);
    assert_eq!(violations.get(0).unwrap().value(), None);
}

#[test]
fn test_empty_sequence_yields_nothing() {
    let mut e = employee();
    e.dependents.clear();
    assert!(validate(&e, employee_rules).is_ok());
}

#[test]
fn test_cascade_uses_validatable_rules() {
    struct Team {
        lead: Dependent,
    }

    let team = Team { lead: Dependent { name: "Zé".into(), age: 40, kinship: Kinship::Child } };
    let violations = validate(&team, |v| {
        v.field("lead", |t| &t.lead).cascade();
    })
    .unwrap_err();

    assert_eq!(paths(&violations), vec!["lead.age"]);
}

#[test]
fn test_nested_sequences_compose_paths() {
    struct Grid {
        rows: Vec<Vec<i32>>,
    }

    let grid = Grid { rows: vec![vec![1, 2], vec![3, -4]] };
    let violations = validate(&grid, |v| {
        v.field("rows", |g| &g.rows).validate_for_each(|row| {
            row.value().validate_for_each(|cell| {
                cell.value().is_positive();
            });
        });
    })
    .unwrap_err();

    assert_eq!(paths(&violations), vec!["rows[1][1]"]);
}

#[test]
fn test_for_each_indexed_passes_position() {
    let e = employee();
    let mut seen = Vec::new();
    let _ = validate(&e, |v| {
        v.field("dependents", |e| &e.dependents).validate_for_each_indexed(|i, d| {
            seen.push((i, d.object().name.clone()));
        });
    });
    assert_eq!(seen, vec![(0, "Rui".to_owned())]);
}

#[test]
fn test_positional_map_entries() {
    let e = employee();
    let violations = validate(&e, |v| {
        v.field("phones", |e| &e.phones).validate_for_each_entry(|entry| {
            entry.field("key", |e| e.key).is_equal_to_ignoring_case("WORK");
        });
    })
    .unwrap_err();

    assert_eq!(paths(&violations), vec!["phones[0].key"]);
}

// ============================================================================
// SET SEMANTICS
// ============================================================================

#[test]
fn test_identical_violations_collapse() {
    let e = employee();
    let violations = validate(&e, |v| {
        v.field("salary", |e| &e.salary).is_less_than(10).is_less_than(10);
        v.field("salary", |e| &e.salary).is_less_than(10);
    })
    .unwrap_err();

    assert_eq!(violations.len(), 1);
}

#[test]
fn test_same_constraint_different_params_are_distinct() {
    let e = employee();
    let violations = validate(&e, |v| {
        v.field("salary", |e| &e.salary).is_less_than(10).is_less_than(20);
    })
    .unwrap_err();

    assert_eq!(violations.len(), 2);
}

#[test]
fn test_display_lists_every_violation() {
    let mut e = employee();
    e.id = -1;
    e.salary = 0;

    let rendered = validate(&e, employee_rules).unwrap_err().to_string();

    assert!(rendered.starts_with("Validation failed with 2 constraint violation(s)"));
    assert!(rendered.contains("id"));
    assert!(rendered.contains("salary"));
}
