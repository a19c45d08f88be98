//! Ordering and sign predicates
//!
//! Work for any `PartialOrd` value: numbers, decimals, dates, strings.
//! Sign checks compare against `P::default()`, which is zero for every
//! numeric type.

use crate::core::{Constraint, Property, ToValue};

use super::names;

impl<P: ToValue + PartialOrd> Property<'_, '_, P> {
    /// Requires `value < bound`.
    pub fn is_less_than(&mut self, bound: P) -> &mut Self {
        let constraint = Constraint::new(names::LESS).with_param("value", &bound);
        self.validate(constraint, |v| v.is_none_or(|v| *v < bound))
    }

    /// Requires `value <= bound`.
    pub fn is_less_than_or_equal_to(&mut self, bound: P) -> &mut Self {
        let constraint = Constraint::new(names::LESS_OR_EQUAL).with_param("value", &bound);
        self.validate(constraint, |v| v.is_none_or(|v| *v <= bound))
    }

    /// Requires `value > bound`.
    pub fn is_greater_than(&mut self, bound: P) -> &mut Self {
        let constraint = Constraint::new(names::GREATER).with_param("value", &bound);
        self.validate(constraint, |v| v.is_none_or(|v| *v > bound))
    }

    /// Requires `value >= bound`.
    pub fn is_greater_than_or_equal_to(&mut self, bound: P) -> &mut Self {
        let constraint = Constraint::new(names::GREATER_OR_EQUAL).with_param("value", &bound);
        self.validate(constraint, |v| v.is_none_or(|v| *v >= bound))
    }

    /// Requires `start <= value <= end`.
    pub fn is_between(&mut self, start: P, end: P) -> &mut Self {
        let constraint = Constraint::new(names::BETWEEN)
            .with_param("start", &start)
            .with_param("end", &end);
        self.validate(constraint, |v| v.is_none_or(|v| start <= *v && *v <= end))
    }

    /// Requires the value to fall outside `start..=end`.
    pub fn is_not_between(&mut self, start: P, end: P) -> &mut Self {
        let constraint = Constraint::new(names::NOT_BETWEEN)
            .with_param("start", &start)
            .with_param("end", &end);
        self.validate(constraint, |v| v.is_none_or(|v| *v < start || end < *v))
    }
}

impl<P: ToValue + PartialOrd + Default> Property<'_, '_, P> {
    pub fn is_zero(&mut self) -> &mut Self {
        self.validate(Constraint::new(names::ZERO), |v| v.is_none_or(|v| *v == P::default()))
    }

    pub fn is_not_zero(&mut self) -> &mut Self {
        self.validate(Constraint::new(names::NOT_ZERO), |v| v.is_none_or(|v| *v != P::default()))
    }

    pub fn is_positive(&mut self) -> &mut Self {
        self.validate(Constraint::new(names::POSITIVE), |v| v.is_none_or(|v| *v > P::default()))
    }

    pub fn is_negative(&mut self) -> &mut Self {
        self.validate(Constraint::new(names::NEGATIVE), |v| v.is_none_or(|v| *v < P::default()))
    }
}
