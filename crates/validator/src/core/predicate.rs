//! Asynchronous predicates
//!
//! An [`AsyncPredicate`] is a rule whose answer needs I/O (a uniqueness check
//! against a store, a remote lookup). It is awaited in place by
//! [`Property::validate_async`](super::Property::validate_async); traversal
//! continues only after it resolves, so a pass stays a single sequential
//! task.

use async_trait::async_trait;

use super::error::BoxError;

/// A predicate that resolves asynchronously.
///
/// Returning `Err` aborts the entire validation pass; it is not recorded as
/// a violation.
///
/// # Examples
///
/// ```rust,ignore
/// use async_trait::async_trait;
/// use vigil_validator::core::{AsyncPredicate, BoxError};
///
/// struct UniqueEmail { store: Store }
///
/// #[async_trait]
/// impl AsyncPredicate<str> for UniqueEmail {
///     async fn test(&self, email: Option<&str>) -> Result<bool, BoxError> {
///         match email {
///             Some(email) => Ok(!self.store.email_exists(email).await?),
///             None => Ok(true),
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait AsyncPredicate<T: ?Sized + Sync>: Send + Sync {
    /// Tests the current value; `None` means the value is absent.
    async fn test(&self, value: Option<&T>) -> Result<bool, BoxError>;
}
