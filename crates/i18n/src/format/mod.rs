//! Locale-aware value formatting
//!
//! A [`Formatter`] renders one [`Value`] for one [`Locale`]. Formatters are
//! registered per [`TypeName`](vigil_validator::core::TypeName) in a
//! [`FormatterRegistry`], which picks the closest registered formatter by
//! walking the value's type ancestry.
//!
//! # Examples
//!
//! ```rust
//! use vigil_i18n::{FormatterRegistry, Locale};
//! use vigil_validator::core::Value;
//!
//! let registry = FormatterRegistry::new();
//! assert_eq!(registry.format(&Value::Integer(9876), &Locale::new("pt", "BR")), "9.876");
//! assert_eq!(registry.format(&Value::Integer(9876), &Locale::new("en", "US")), "9,876");
//! ```

mod builtin;
mod registry;

pub use builtin::{AnyFormatter, EnumFormatter, NumberFormatter, SequenceFormatter, TemporalFormatter};
pub use registry::FormatterRegistry;

use vigil_validator::core::Value;

use crate::locale::Locale;

/// Renders a value as display text.
///
/// Any `Fn(&Value, &FormatContext<'_>) -> String` closure is a formatter.
pub trait Formatter: Send + Sync {
    fn format(&self, value: &Value, cx: &FormatContext<'_>) -> String;
}

impl<F> Formatter for F
where
    F: Fn(&Value, &FormatContext<'_>) -> String + Send + Sync,
{
    fn format(&self, value: &Value, cx: &FormatContext<'_>) -> String {
        self(value, cx)
    }
}

/// What a formatter gets to work with besides the value itself.
#[derive(Debug, Clone, Copy)]
pub struct FormatContext<'r> {
    locale: &'r Locale,
    registry: &'r FormatterRegistry,
}

impl<'r> FormatContext<'r> {
    pub(crate) const fn new(locale: &'r Locale, registry: &'r FormatterRegistry) -> Self {
        Self { locale, registry }
    }

    #[must_use]
    pub fn locale(&self) -> &'r Locale {
        self.locale
    }

    /// Formats a nested value (a list element, an object field) with its own
    /// resolved formatter.
    #[must_use]
    pub fn format(&self, value: &Value) -> String {
        self.registry.format(value, self.locale)
    }
}
