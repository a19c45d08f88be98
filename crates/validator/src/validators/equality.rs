//! Equality, membership and custom predicates

use crate::core::{Constraint, Property, ToValue, Value};

use super::names;

impl<P: ToValue + PartialEq> Property<'_, '_, P> {
    /// Requires the value to equal `expected`.
    pub fn is_equal_to(&mut self, expected: P) -> &mut Self {
        let constraint = Constraint::new(names::EQUALS).with_param("value", &expected);
        self.validate(constraint, |v| v.is_none_or(|v| *v == expected))
    }

    /// Requires the value to differ from `unexpected`.
    pub fn is_not_equal_to(&mut self, unexpected: P) -> &mut Self {
        let constraint = Constraint::new(names::NOT_EQUALS).with_param("value", &unexpected);
        self.validate(constraint, |v| v.is_none_or(|v| *v != unexpected))
    }

    /// Requires the value to be one of `values`.
    pub fn is_in(&mut self, values: impl IntoIterator<Item = P>) -> &mut Self {
        let values: Vec<P> = values.into_iter().collect();
        let constraint = Constraint::new(names::IN).with_param("values", Value::list(&values));
        self.validate(constraint, |v| v.is_none_or(|v| values.contains(v)))
    }

    /// Requires the value to be none of `values`.
    pub fn is_not_in(&mut self, values: impl IntoIterator<Item = P>) -> &mut Self {
        let values: Vec<P> = values.into_iter().collect();
        let constraint = Constraint::new(names::NOT_IN).with_param("values", Value::list(&values));
        self.validate(constraint, |v| v.is_none_or(|v| !values.contains(v)))
    }
}

impl<P: ?Sized + ToValue> Property<'_, '_, P> {
    /// Requires `predicate` to hold for the value.
    pub fn is_valid(&mut self, predicate: impl FnOnce(&P) -> bool) -> &mut Self {
        self.validate(Constraint::new(names::VALID), |v| v.is_none_or(predicate))
    }
}
