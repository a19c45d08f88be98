//! Validation context
//!
//! A [`ValidationContext`] wraps the object under validation and the set of
//! violations found so far. Properties are selected with [`field`] /
//! [`field_opt`] / [`value`] and checked with the predicate primitives on
//! [`Property`]. Nothing fails fast: every failed predicate appends a
//! violation and the pass continues.
//!
//! Nested objects and collection elements are validated in a fresh child
//! context whose paths are relative to the child object. When the child
//! block returns, its violations are merged into the parent with the
//! parent's property path prepended.
//!
//! # Examples
//!
//! ```rust
//! use vigil_validator::prelude::*;
//!
//! struct Address { city: Option<String> }
//! struct Employee { name: String, address: Address, salary: i64 }
//!
//! let employee = Employee {
//!     name: String::new(),
//!     address: Address { city: None },
//!     salary: 12_000,
//! };
//!
//! let result = validate(&employee, |v| {
//!     v.field("name", |e| &e.name).is_not_blank();
//!     v.field("address", |e| &e.address).validate_nested(|a| {
//!         a.field_opt("city", |a| a.city.as_deref()).is_not_null();
//!     });
//!     v.field("salary", |e| &e.salary).is_between(1, 9_876);
//! });
//!
//! let violations = result.unwrap_err();
//! let paths: Vec<_> = violations.iter().map(|v| v.property_path()).collect();
//! assert_eq!(paths, ["name", "address.city", "salary"]);
//! ```
//!
//! [`field`]: ValidationContext::field
//! [`field_opt`]: ValidationContext::field_opt
//! [`value`]: ValidationContext::value

use tracing::debug;

use super::error::ValidationError;
use super::property::Property;
use super::violation::ConstraintViolations;

// ============================================================================
// VALIDATION CONTEXT
// ============================================================================

/// The object under validation plus the violations accumulated so far.
#[derive(Debug)]
pub struct ValidationContext<'a, T: ?Sized> {
    object: &'a T,
    violations: ConstraintViolations,
}

impl<'a, T: ?Sized> ValidationContext<'a, T> {
    /// Creates a root context with an empty path prefix.
    #[must_use]
    pub fn new(object: &'a T) -> Self {
        Self {
            object,
            violations: ConstraintViolations::new(),
        }
    }

    /// The object this context validates.
    #[must_use]
    pub fn object(&self) -> &'a T {
        self.object
    }

    /// Selects a field of the object.
    pub fn field<P: ?Sized>(
        &mut self,
        name: &str,
        accessor: impl FnOnce(&'a T) -> &'a P,
    ) -> Property<'_, 'a, P> {
        let value = accessor(self.object);
        Property::new(name.to_owned(), Some(value), &mut self.violations)
    }

    /// Selects an optional field; `None` is the absent value.
    pub fn field_opt<P: ?Sized>(
        &mut self,
        name: &str,
        accessor: impl FnOnce(&'a T) -> Option<&'a P>,
    ) -> Property<'_, 'a, P> {
        let value = accessor(self.object);
        Property::new(name.to_owned(), value, &mut self.violations)
    }

    /// Selects the object itself. Violations recorded here carry the path of
    /// the context (empty at the root, `items[2]` inside an iterated element).
    pub fn value(&mut self) -> Property<'_, 'a, T> {
        Property::new(String::new(), Some(self.object), &mut self.violations)
    }

    /// Violations recorded so far, with paths relative to this context.
    #[must_use]
    pub fn violations(&self) -> &ConstraintViolations {
        &self.violations
    }

    #[must_use]
    pub fn into_violations(self) -> ConstraintViolations {
        self.violations
    }

    /// `Ok(())` if nothing failed, otherwise the aggregate failure.
    pub fn into_result(self) -> Result<(), ConstraintViolations> {
        self.violations.into_result(())
    }
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Runs `block` against `object` and returns every violation it recorded.
///
/// # Errors
///
/// Returns the complete [`ConstraintViolations`] set if any predicate failed.
pub fn validate<'o, T: ?Sized>(
    object: &'o T,
    block: impl FnOnce(&mut ValidationContext<'o, T>),
) -> Result<(), ConstraintViolations> {
    let mut context = ValidationContext::new(object);
    block(&mut context);
    finish(context.into_violations())
}

/// Asynchronous counterpart of [`validate`].
///
/// Predicates inside `block` are awaited one at a time in source order.
///
/// # Errors
///
/// [`ValidationError::Invalid`] with the complete violation set, or
/// [`ValidationError::Aborted`] as soon as a predicate fails to evaluate.
pub async fn validate_async<'o, T, F>(object: &'o T, block: F) -> Result<(), ValidationError>
where
    T: ?Sized,
    F: AsyncFnOnce(&mut ValidationContext<'o, T>) -> Result<(), ValidationError>,
{
    let mut context = ValidationContext::new(object);
    block(&mut context).await?;
    finish(context.into_violations()).map_err(ValidationError::Invalid)
}

fn finish(violations: ConstraintViolations) -> Result<(), ConstraintViolations> {
    debug!(violations = violations.len(), "validation pass completed");
    violations.into_result(())
}

// ============================================================================
// VALIDATABLE
// ============================================================================

/// Types that describe their own constraints.
///
/// # Examples
///
/// ```rust
/// use vigil_validator::prelude::*;
///
/// struct Dependent { name: String, age: u8 }
///
/// impl Validatable for Dependent {
///     fn constraints(v: &mut ValidationContext<'_, Self>) {
///         v.field("name", |d| &d.name).is_not_blank();
///         v.field("age", |d| &d.age).is_less_than_or_equal_to(17);
///     }
/// }
///
/// let child = Dependent { name: "Ana".into(), age: 21 };
/// assert_eq!(child.validate().unwrap_err().len(), 1);
/// ```
pub trait Validatable {
    /// Records this type's constraints against `context`.
    fn constraints(context: &mut ValidationContext<'_, Self>);

    /// Validates `self` against [`Validatable::constraints`].
    ///
    /// # Errors
    ///
    /// Returns every violation found.
    fn validate(&self) -> Result<(), ConstraintViolations> {
        validate(self, Self::constraints)
    }
}

// ============================================================================
// TESTS
// ============================================================================
