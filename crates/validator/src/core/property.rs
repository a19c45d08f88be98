//! Property accessor and the validation primitives
//!
//! Everything a predicate catalog needs is here: [`Property::validate`] for a
//! single predicate, [`Property::validate_nested`] for a nested object,
//! [`Property::validate_for_each`] and friends for sequences and maps, and
//! the `*_async` counterparts. Catalog methods (`is_not_null`, `is_between`,
//! ...) are thin wrappers over these and never touch context internals.

use std::fmt;

use tracing::trace;

use super::constraint::Constraint;
use super::context::{ValidationContext, Validatable};
use super::error::ValidationError;
use super::path;
use super::predicate::AsyncPredicate;
use super::value::{ToValue, Value};
use super::violation::{ConstraintViolation, ConstraintViolations};

/// A selected property: its path, its (possibly absent) value and the
/// violation set it reports into.
///
/// All primitives return `&mut Self` so checks can be chained.
pub struct Property<'c, 'a, P: ?Sized> {
    path: String,
    value: Option<&'a P>,
    violations: &'c mut ConstraintViolations,
}

/// One entry of a map being iterated by
/// [`Property::validate_for_each_entry`].
#[derive(Debug)]
pub struct MapEntry<'a, K, V> {
    pub key: &'a K,
    pub value: &'a V,
}

impl<'c, 'a, P: ?Sized> Property<'c, 'a, P> {
    pub(crate) fn new(
        path: String,
        value: Option<&'a P>,
        violations: &'c mut ConstraintViolations,
    ) -> Self {
        Self {
            path,
            value,
            violations,
        }
    }

    /// Path of this property relative to its context.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The property value, `None` when absent.
    #[must_use]
    pub fn value(&self) -> Option<&'a P> {
        self.value
    }

    // ------------------------------------------------------------------------
    // Single predicate
    // ------------------------------------------------------------------------

    /// Evaluates `predicate` against the value and records `constraint` when
    /// it returns `false`.
    pub fn validate(
        &mut self,
        constraint: Constraint,
        predicate: impl FnOnce(Option<&'a P>) -> bool,
    ) -> &mut Self
    where
        P: ToValue,
    {
        if !predicate(self.value) {
            self.record(constraint);
        }
        self
    }

    /// Awaits `predicate` and records `constraint` when it resolves to `false`.
    ///
    /// # Errors
    ///
    /// [`ValidationError::Aborted`] if the predicate itself fails.
    pub async fn validate_async<Pr>(
        &mut self,
        constraint: Constraint,
        predicate: &Pr,
    ) -> Result<&mut Self, ValidationError>
    where
        P: ToValue + Sync,
        Pr: AsyncPredicate<P> + ?Sized,
    {
        let valid = predicate
            .test(self.value)
            .await
            .map_err(ValidationError::Aborted)?;
        if !valid {
            self.record(constraint);
        }
        Ok(self)
    }

    fn record(&mut self, constraint: Constraint)
    where
        P: ToValue,
    {
        let value = self.value.map_or(Value::Null, ToValue::to_value);
        self.violations
            .insert(ConstraintViolation::new(self.path.clone(), value, constraint));
    }

    fn merge(&mut self, parent: &str, child: ConstraintViolations) {
        if !child.is_empty() {
            trace!(path = parent, merged = child.len(), "merging child violations");
        }
        self.violations.merge(parent, child);
    }

    // ------------------------------------------------------------------------
    // Nested objects
    // ------------------------------------------------------------------------

    /// Validates the value in a child context. No-op when the value is absent.
    pub fn validate_nested(&mut self, block: impl FnOnce(&mut ValidationContext<'a, P>)) -> &mut Self {
        if let Some(value) = self.value {
            let mut child = ValidationContext::new(value);
            block(&mut child);
            let parent = self.path.clone();
            self.merge(&parent, child.into_violations());
        }
        self
    }

    /// Validates the value against its own [`Validatable::constraints`].
    pub fn cascade(&mut self) -> &mut Self
    where
        P: Validatable,
    {
        self.validate_nested(P::constraints)
    }

    /// Asynchronous counterpart of [`Property::validate_nested`].
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by `block`.
    pub async fn validate_nested_async<F>(&mut self, block: F) -> Result<&mut Self, ValidationError>
    where
        F: AsyncFnOnce(&mut ValidationContext<'a, P>) -> Result<(), ValidationError>,
    {
        if let Some(value) = self.value {
            let mut child = ValidationContext::new(value);
            block(&mut child).await?;
            let parent = self.path.clone();
            self.merge(&parent, child.into_violations());
        }
        Ok(self)
    }

    // ------------------------------------------------------------------------
    // Sequences
    // ------------------------------------------------------------------------

    /// Validates every element in its own child context, in iteration order.
    /// Element violations are reported under `path[i]`.
    pub fn validate_for_each<E>(
        &mut self,
        mut block: impl FnMut(&mut ValidationContext<'a, E>),
    ) -> &mut Self
    where
        &'a P: IntoIterator<Item = &'a E>,
        E: 'a,
    {
        self.validate_for_each_indexed(|_, element| block(element))
    }

    /// Like [`Property::validate_for_each`], also passing the element index.
    pub fn validate_for_each_indexed<E>(
        &mut self,
        mut block: impl FnMut(usize, &mut ValidationContext<'a, E>),
    ) -> &mut Self
    where
        &'a P: IntoIterator<Item = &'a E>,
        E: 'a,
    {
        if let Some(items) = self.value {
            for (index, item) in items.into_iter().enumerate() {
                let mut child = ValidationContext::new(item);
                block(index, &mut child);
                self.merge(&path::index(&self.path, index), child.into_violations());
            }
        }
        self
    }

    /// Asynchronous counterpart of [`Property::validate_for_each`].
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by `block`; later elements are not visited.
    pub async fn validate_for_each_async<E, F>(&mut self, mut block: F) -> Result<&mut Self, ValidationError>
    where
        &'a P: IntoIterator<Item = &'a E>,
        E: 'a,
        F: AsyncFnMut(&mut ValidationContext<'a, E>) -> Result<(), ValidationError>,
    {
        if let Some(items) = self.value {
            for (index, item) in items.into_iter().enumerate() {
                let mut child = ValidationContext::new(item);
                block(&mut child).await?;
                self.merge(&path::index(&self.path, index), child.into_violations());
            }
        }
        Ok(self)
    }

    /// Asynchronous counterpart of [`Property::validate_for_each_indexed`].
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by `block`; later elements are not visited.
    pub async fn validate_for_each_indexed_async<E, F>(
        &mut self,
        mut block: F,
    ) -> Result<&mut Self, ValidationError>
    where
        &'a P: IntoIterator<Item = &'a E>,
        E: 'a,
        F: AsyncFnMut(usize, &mut ValidationContext<'a, E>) -> Result<(), ValidationError>,
    {
        if let Some(items) = self.value {
            for (index, item) in items.into_iter().enumerate() {
                let mut child = ValidationContext::new(item);
                block(index, &mut child).await?;
                self.merge(&path::index(&self.path, index), child.into_violations());
            }
        }
        Ok(self)
    }

    // ------------------------------------------------------------------------
    // Maps
    // ------------------------------------------------------------------------

    /// Validates every map entry in its own child context. Entries are keyed
    /// by iteration position (`path[i].key`, `path[i].value`); use an ordered
    /// map for reproducible positions.
    pub fn validate_for_each_entry<K, V>(
        &mut self,
        mut block: impl FnMut(&mut ValidationContext<'_, MapEntry<'a, K, V>>),
    ) -> &mut Self
    where
        &'a P: IntoIterator<Item = (&'a K, &'a V)>,
        K: 'a,
        V: 'a,
    {
        if let Some(map) = self.value {
            for (index, (key, value)) in map.into_iter().enumerate() {
                let entry = MapEntry { key, value };
                let mut child = ValidationContext::new(&entry);
                block(&mut child);
                let violations = child.into_violations();
                self.merge(&path::index(&self.path, index), violations);
            }
        }
        self
    }

    /// Like [`Property::validate_for_each_entry`], but entries are keyed by
    /// the rendered map key (`path[alice].value`).
    pub fn validate_for_each_entry_keyed<K, V>(
        &mut self,
        mut block: impl FnMut(&mut ValidationContext<'_, MapEntry<'a, K, V>>),
    ) -> &mut Self
    where
        &'a P: IntoIterator<Item = (&'a K, &'a V)>,
        K: fmt::Display + 'a,
        V: 'a,
    {
        if let Some(map) = self.value {
            for (key, value) in map {
                let entry = MapEntry { key, value };
                let mut child = ValidationContext::new(&entry);
                block(&mut child);
                let violations = child.into_violations();
                self.merge(&path::key(&self.path, &key.to_string()), violations);
            }
        }
        self
    }
}

impl<P: ?Sized> fmt::Debug for Property<'_, '_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("path", &self.path)
            .field("present", &self.value.is_some())
            .finish_non_exhaustive()
    }
}
