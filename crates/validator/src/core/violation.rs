//! Constraint violations and the aggregate violation set

use std::fmt;

use indexmap::IndexSet;
use serde::Serialize;

use super::constraint::Constraint;
use super::path;
use super::value::Value;

// ============================================================================
// CONSTRAINT VIOLATION
// ============================================================================

/// A failed constraint at a property path, with the offending value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintViolation {
    property_path: String,
    value: Option<Value>,
    constraint: Constraint,
}

impl ConstraintViolation {
    /// Creates a violation. A [`Value::Null`] value is stored as absent.
    pub fn new(property_path: impl Into<String>, value: Value, constraint: Constraint) -> Self {
        Self {
            property_path: property_path.into(),
            value: (!value.is_null()).then_some(value),
            constraint,
        }
    }

    #[must_use]
    pub fn property_path(&self) -> &str {
        &self.property_path
    }

    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    #[must_use]
    pub fn constraint(&self) -> &Constraint {
        &self.constraint
    }

    /// Returns this violation with its path rewritten under `parent`.
    #[must_use]
    pub fn rebased(self, parent: &str) -> Self {
        Self {
            property_path: path::rebase(parent, &self.property_path),
            ..self
        }
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.property_path, self.constraint.name())?;
        if let Some(value) = &self.value {
            write!(f, " (value: {value})")?;
        }
        Ok(())
    }
}

// ============================================================================
// VIOLATION SET
// ============================================================================

/// Insertion-ordered set of violations.
///
/// Identical `(path, value, constraint)` tuples collapse into one entry that
/// keeps the position of its first occurrence. Returned as the aggregate
/// failure of a validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintViolations {
    violations: IndexSet<ConstraintViolation>,
}

impl ConstraintViolations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a violation. Returns false if an identical one was already present.
    pub fn insert(&mut self, violation: ConstraintViolation) -> bool {
        self.violations.insert(violation)
    }

    /// Merges a child set, rewriting each path under `parent`.
    pub fn merge(&mut self, parent: &str, child: Self) {
        for violation in child.violations {
            self.violations.insert(violation.rebased(parent));
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn iter(&self) -> indexmap::set::Iter<'_, ConstraintViolation> {
        self.violations.iter()
    }

    /// Returns the violation at `index` in insertion order.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ConstraintViolation> {
        self.violations.get_index(index)
    }

    /// Returns all violations recorded at `property_path`.
    pub fn at<'s>(&'s self, property_path: &'s str) -> impl Iterator<Item = &'s ConstraintViolation> {
        self.violations
            .iter()
            .filter(move |v| v.property_path() == property_path)
    }

    /// `Ok(value)` when empty, otherwise `Err(self)`.
    #[must_use = "result must be used"]
    pub fn into_result<T>(self, ok_value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(ok_value) } else { Err(self) }
    }
}

impl Extend<ConstraintViolation> for ConstraintViolations {
    fn extend<I: IntoIterator<Item = ConstraintViolation>>(&mut self, iter: I) {
        self.violations.extend(iter);
    }
}

impl FromIterator<ConstraintViolation> for ConstraintViolations {
    fn from_iter<I: IntoIterator<Item = ConstraintViolation>>(iter: I) -> Self {
        Self {
            violations: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ConstraintViolations {
    type Item = ConstraintViolation;
    type IntoIter = indexmap::set::IntoIter<ConstraintViolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl<'s> IntoIterator for &'s ConstraintViolations {
    type Item = &'s ConstraintViolation;
    type IntoIter = indexmap::set::Iter<'s, ConstraintViolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

impl Serialize for ConstraintViolations {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.violations)
    }
}

impl fmt::Display for ConstraintViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Validation failed with {} constraint violation(s):",
            self.violations.len()
        )?;
        for (i, violation) in self.violations.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for ConstraintViolations {}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn not_null(path: &str) -> ConstraintViolation {
        ConstraintViolation::new(path, Value::Null, Constraint::new("vigil.constraints.NotNull"))
    }

    #[test]
    fn test_null_value_is_absent() {
        assert_eq!(not_null("name").value(), None);
    }

    #[test]
    fn test_duplicates_collapse_keeping_first_position() {
        let mut set = ConstraintViolations::new();
        assert!(set.insert(not_null("a")));
        assert!(set.insert(not_null("b")));
        assert!(!set.insert(not_null("a")));

        let paths: Vec<_> = set.iter().map(ConstraintViolation::property_path).collect();
        assert_eq!(paths, vec!["a", "b"]);
    }

    #[test]
    fn test_merge_rebases_paths() {
        let child: ConstraintViolations = [not_null("city"), not_null("")].into_iter().collect();
        let mut parent = ConstraintViolations::new();
        parent.merge("address", child);

        let paths: Vec<_> = parent.iter().map(ConstraintViolation::property_path).collect();
        assert_eq!(paths, vec!["address.city", "address"]);
    }

    #[test]
    fn test_display_lists_every_violation() {
        let set: ConstraintViolations = [not_null("a"), not_null("b")].into_iter().collect();
        let rendered = set.to_string();
        assert!(rendered.starts_with("Validation failed with 2 constraint violation(s):"));
        assert!(rendered.contains("1. [a] vigil.constraints.NotNull"));
        assert!(rendered.contains("2. [b] vigil.constraints.NotNull"));
    }

    #[test]
    fn test_into_result() {
        assert_eq!(ConstraintViolations::new().into_result(7), Ok(7));
        let set: ConstraintViolations = [not_null("a")].into_iter().collect();
        assert!(set.into_result(()).is_err());
    }
}
