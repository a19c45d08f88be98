//! Nullability predicates

use crate::core::{Constraint, Property, ToValue};

use super::names;

impl<P: ?Sized + ToValue> Property<'_, '_, P> {
    /// Requires the value to be absent.
    pub fn is_null(&mut self) -> &mut Self {
        self.validate(Constraint::new(names::NULL), |v| v.is_none())
    }

    /// Requires the value to be present.
    pub fn is_not_null(&mut self) -> &mut Self {
        self.validate(Constraint::new(names::NOT_NULL), |v| v.is_some())
    }
}
