//! Built-in predicate catalog
//!
//! Each predicate is a chainable method on [`Property`](crate::core::Property)
//! that pairs a rule with a [`Constraint`](crate::core::Constraint) from the
//! table below. Absent values satisfy every predicate except
//! [`is_not_null`](crate::core::Property::is_not_null); pair a predicate with
//! `is_not_null()` to require presence.
//!
//! # Categories
//!
//! - **Nullable**: `is_null`, `is_not_null`
//! - **Equality**: `is_equal_to`, `is_not_equal_to`, `is_in`, `is_not_in`, `is_valid`
//! - **Ordering**: `is_less_than`, `is_greater_than`, `is_between`, ... and sign checks
//! - **Size**: `is_empty`, `is_not_empty`, `has_size`
//! - **Text**: `is_blank`, `is_not_blank`, `contains`, `starts_with`, `ends_with`,
//!   `is_equal_to_ignoring_case`, `matches`
//!
//! # Examples
//!
//! ```rust
//! use vigil_validator::prelude::*;
//!
//! struct Signup { username: String, age: u8, tags: Vec<String> }
//!
//! let signup = Signup { username: "  ".into(), age: 15, tags: vec![] };
//! let violations = validate(&signup, |v| {
//!     v.field("username", |s| &s.username).is_not_blank().has_size(3, 20);
//!     v.field("age", |s| &s.age).is_greater_than_or_equal_to(18);
//!     v.field("tags", |s| &s.tags).is_not_empty();
//! })
//! .unwrap_err();
//!
//! assert_eq!(violations.len(), 4);
//! ```

pub mod content;
pub mod equality;
pub mod nullable;
pub mod pattern;
pub mod range;
pub mod size;

pub use size::Length;

/// Fully qualified names of the built-in constraints.
///
/// Message keys are these names plus `.message`.
pub mod names {
    macro_rules! constraint_names {
        ($($(#[$meta:meta])* $ident:ident => $name:literal;)*) => {
            $(
                $(#[$meta])*
                pub const $ident: &str = concat!("vigil.constraints.", $name);
            )*

            /// Every built-in constraint name, in catalog order.
            pub const ALL: &[&str] = &[$($ident),*];
        };
    }

    constraint_names! {
        NULL => "Null";
        NOT_NULL => "NotNull";
        EQUALS => "Equals";
        NOT_EQUALS => "NotEquals";
        EQUALS_IGNORING_CASE => "EqualsIgnoringCase";
        IN => "In";
        NOT_IN => "NotIn";
        /// Custom predicate over the whole value.
        VALID => "Valid";
        LESS => "Less";
        LESS_OR_EQUAL => "LessOrEqual";
        GREATER => "Greater";
        GREATER_OR_EQUAL => "GreaterOrEqual";
        BETWEEN => "Between";
        NOT_BETWEEN => "NotBetween";
        ZERO => "Zero";
        NOT_ZERO => "NotZero";
        POSITIVE => "Positive";
        NEGATIVE => "Negative";
        EMPTY => "Empty";
        NOT_EMPTY => "NotEmpty";
        SIZE => "Size";
        BLANK => "Blank";
        NOT_BLANK => "NotBlank";
        CONTAINS => "Contains";
        STARTS_WITH => "StartsWith";
        ENDS_WITH => "EndsWith";
        MATCHES => "Matches";
    }
}

#[cfg(test)]
mod tests {
    use super::names;

    #[test]
    fn test_names_are_qualified_and_unique() {
        let mut seen = std::collections::HashSet::new();
        for name in names::ALL {
            assert!(name.starts_with("vigil.constraints."), "{name}");
            assert!(seen.insert(*name), "duplicate {name}");
        }
    }
}
