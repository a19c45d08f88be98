//! Prelude module for convenient imports.
//!
//! `use vigil_validator::prelude::*;` brings in the DSL entry points, the
//! violation types and the value model. Catalog predicates are inherent
//! methods on [`Property`] and need no import.

// ============================================================================
// DSL
// ============================================================================

pub use crate::core::{
    AsyncPredicate, MapEntry, Property, Validatable, ValidationContext, validate, validate_async,
};

// ============================================================================
// RESULTS
// ============================================================================

pub use crate::core::{BoxError, Constraint, ConstraintViolation, ConstraintViolations, ValidationError};

// ============================================================================
// VALUES
// ============================================================================

pub use crate::core::{EnumValue, Object, ToValue, TypeName, Value};

// ============================================================================
// CATALOG
// ============================================================================

pub use crate::validators::{Length, names};
