//! Size predicates for strings and collections

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use crate::core::{Constraint, Property, ToValue};

use super::names;

/// Anything with a measurable size.
///
/// Strings are measured in characters, not bytes.
pub trait Length {
    fn length(&self) -> usize;
}

impl Length for str {
    fn length(&self) -> usize {
        self.chars().count()
    }
}

impl Length for String {
    fn length(&self) -> usize {
        self.as_str().length()
    }
}

impl<T> Length for [T] {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T, const N: usize> Length for [T; N] {
    fn length(&self) -> usize {
        N
    }
}

macro_rules! collection_length {
    ($($ty:ident<$($param:ident),+>),* $(,)?) => {
        $(
            impl<$($param),+> Length for $ty<$($param),+> {
                fn length(&self) -> usize {
                    self.len()
                }
            }
        )*
    };
}

collection_length!(Vec<T>, VecDeque<T>, BTreeSet<T>, BTreeMap<K, V>);

impl<T, S> Length for HashSet<T, S> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<K, V, S> Length for HashMap<K, V, S> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<P: ?Sized + ToValue + Length> Property<'_, '_, P> {
    pub fn is_empty(&mut self) -> &mut Self {
        self.validate(Constraint::new(names::EMPTY), |v| v.is_none_or(|v| v.length() == 0))
    }

    pub fn is_not_empty(&mut self) -> &mut Self {
        self.validate(Constraint::new(names::NOT_EMPTY), |v| v.is_none_or(|v| v.length() > 0))
    }

    /// Requires `min <= size <= max`.
    pub fn has_size(&mut self, min: usize, max: usize) -> &mut Self {
        let constraint = Constraint::new(names::SIZE)
            .with_param("min", min)
            .with_param("max", max);
        self.validate(constraint, |v| v.is_none_or(|v| (min..=max).contains(&v.length())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    struct Order {
        code: String,
        lines: Vec<u32>,
        notes: Option<String>,
    }

    #[rstest]
    #[case("", 0)]
    #[case("abc", 3)]
    #[case("ação", 4)]
    fn test_string_length_counts_chars(#[case] text: &str, #[case] expected: usize) {
        assert_eq!(text.length(), expected);
    }

    #[test]
    fn test_size_params_and_failures() {
        let order = Order { code: "A".into(), lines: vec![], notes: None };
        let violations = validate(&order, |v| {
            v.field("code", |o| &o.code).has_size(2, 8);
            v.field("lines", |o| &o.lines).is_not_empty();
            v.field_opt("notes", |o| o.notes.as_ref()).is_not_empty().has_size(1, 2);
        })
        .unwrap_err();

        assert_eq!(violations.len(), 2);
        let size = violations.get(0).unwrap().constraint();
        assert_eq!(size.name(), names::SIZE);
        assert_eq!(size.param("min"), Some(&Value::Integer(2)));
        assert_eq!(size.param("max"), Some(&Value::Integer(8)));
        assert_eq!(violations.get(1).unwrap().property_path(), "lines");
    }

    #[test]
    fn test_empty_set() {
        let tags: BTreeSet<String> = BTreeSet::new();
        assert!(validate(&tags, |v| {
            v.value().is_empty();
        })
        .is_ok());
    }
}
