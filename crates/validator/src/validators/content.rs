//! Text content predicates

use crate::core::{Constraint, Property, ToValue};

use super::names;

impl<P: ?Sized + ToValue + AsRef<str>> Property<'_, '_, P> {
    /// Requires the text to be empty or whitespace only.
    pub fn is_blank(&mut self) -> &mut Self {
        self.validate(Constraint::new(names::BLANK), |v| {
            v.is_none_or(|v| v.as_ref().trim().is_empty())
        })
    }

    /// Requires at least one non-whitespace character.
    pub fn is_not_blank(&mut self) -> &mut Self {
        self.validate(Constraint::new(names::NOT_BLANK), |v| {
            v.is_none_or(|v| !v.as_ref().trim().is_empty())
        })
    }

    pub fn contains(&mut self, infix: &str) -> &mut Self {
        let constraint = Constraint::new(names::CONTAINS).with_param("value", infix);
        self.validate(constraint, |v| v.is_none_or(|v| v.as_ref().contains(infix)))
    }

    pub fn starts_with(&mut self, prefix: &str) -> &mut Self {
        let constraint = Constraint::new(names::STARTS_WITH).with_param("prefix", prefix);
        self.validate(constraint, |v| v.is_none_or(|v| v.as_ref().starts_with(prefix)))
    }

    pub fn ends_with(&mut self, suffix: &str) -> &mut Self {
        let constraint = Constraint::new(names::ENDS_WITH).with_param("suffix", suffix);
        self.validate(constraint, |v| v.is_none_or(|v| v.as_ref().ends_with(suffix)))
    }

    /// Unicode-aware case-insensitive comparison.
    pub fn is_equal_to_ignoring_case(&mut self, expected: &str) -> &mut Self {
        let constraint = Constraint::new(names::EQUALS_IGNORING_CASE).with_param("value", expected);
        let expected = expected.to_lowercase();
        self.validate(constraint, |v| {
            v.is_none_or(|v| v.as_ref().to_lowercase() == expected)
        })
    }
}
