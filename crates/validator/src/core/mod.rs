//! Core validation types
//!
//! - **Values**: [`Value`], [`ToValue`] snapshot validated data for reporting
//! - **Violations**: [`Constraint`], [`ConstraintViolation`], [`ConstraintViolations`]
//! - **DSL**: [`ValidationContext`], [`Property`], [`validate`], [`validate_async`]
//! - **Errors**: [`ValidationError`] for asynchronous passes
//!
//! Property paths are built by the helpers in [`path`].

mod constraint;
mod context;
mod error;
pub mod path;
mod predicate;
mod property;
mod value;
mod violation;

pub use constraint::{Constraint, MESSAGE_KEY_SUFFIX};
pub use context::{Validatable, ValidationContext, validate, validate_async};
pub use error::{BoxError, ValidationError};
pub use predicate::AsyncPredicate;
pub use property::{MapEntry, Property};
pub use value::{EnumValue, Object, ToValue, TypeName, Value};
pub use violation::{ConstraintViolation, ConstraintViolations};
