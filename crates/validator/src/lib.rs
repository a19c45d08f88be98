//! # vigil-validator
//!
//! A fail-slow validation DSL: every predicate in a pass is evaluated and
//! every failure is collected as a [`ConstraintViolation`](core::ConstraintViolation)
//! carrying its property path, the offending value and the violated
//! [`Constraint`](core::Constraint).
//!
//! ## Quick Start
//!
//! ```rust
//! use vigil_validator::prelude::*;
//!
//! struct Employee { name: String, salary: i64, dependents: Vec<Dependent> }
//! struct Dependent { name: String, age: u8 }
//!
//! let employee = Employee {
//!     name: "Ana".into(),
//!     salary: 10_000,
//!     dependents: vec![Dependent { name: String::new(), age: 30 }],
//! };
//!
//! let violations = validate(&employee, |v| {
//!     v.field("name", |e| &e.name).is_not_blank();
//!     v.field("salary", |e| &e.salary).is_between(1, 9_876);
//!     v.field("dependents", |e| &e.dependents).validate_for_each(|d| {
//!         d.field("name", |d| &d.name).is_not_blank();
//!         d.field("age", |d| &d.age).is_less_than_or_equal_to(17);
//!     });
//! })
//! .unwrap_err();
//!
//! let paths: Vec<_> = violations.iter().map(|v| v.property_path()).collect();
//! assert_eq!(paths, ["salary", "dependents[0].name", "dependents[0].age"]);
//! ```
//!
//! ## Built-in Predicates
//!
//! See [`validators`] for the catalog and [`validators::names`] for the
//! constraint names it reports.
//!
//! ## Asynchronous Validation
//!
//! [`validate_async`](core::validate_async) runs the same DSL with
//! [`AsyncPredicate`](core::AsyncPredicate)s awaited in place. A predicate
//! that errors aborts the pass with
//! [`ValidationError::Aborted`](core::ValidationError::Aborted).

// Violation sets are returned by value from every entry point.
#![allow(clippy::result_large_err)]

pub mod core;
pub mod prelude;
pub mod validators;
