//! # vigil-i18n
//!
//! Turns [`ConstraintViolation`](vigil_validator::core::ConstraintViolation)s
//! into localized messages.
//!
//! - [`Locale`]: language plus country, with lenient parsing
//! - [`FormatterRegistry`]: per-type, locale-aware value formatting resolved
//!   breadth-first over a [`TypeGraph`]
//! - [`BundleResolver`]: six-step message bundle lookup over pluggable
//!   [`BundleSource`]s
//! - [`interpolate`]: `{name}` placeholder substitution
//! - [`Localizer`]: the caller-owned pipeline tying these together
//!
//! ## Quick Start
//!
//! ```rust
//! use vigil_i18n::{Locale, Localizer, MapToMessage};
//! use vigil_validator::prelude::*;
//!
//! struct Employee { name: Option<String>, salary: i64 }
//!
//! let employee = Employee { name: None, salary: 10_000 };
//! let violations = validate(&employee, |v| {
//!     v.field_opt("name", |e| e.name.as_ref()).is_not_null();
//!     v.field("salary", |e| &e.salary).is_between(1, 9_876);
//! })
//! .unwrap_err();
//!
//! let localizer = Localizer::builder().default_locale(Locale::new("en", "US")).build();
//! let messages = violations.map_to_message(&localizer).unwrap();
//!
//! assert_eq!(messages[0].to_string(), "name: Must not be null");
//! assert_eq!(messages[1].to_string(), "salary: Must be between 1 and 9,876");
//! ```

pub mod bundle;
pub mod config;
pub mod error;
pub mod format;
pub mod interpolate;
pub mod locale;
pub mod localizer;
pub mod message;
pub mod types;

pub use bundle::{
    BundleResolver, BundleSource, DirectorySource, EmbeddedSource, MemorySource, MessageBundle, ResolutionStep,
};
pub use config::LocalizerConfig;
pub use error::{I18nError, I18nResult};
pub use format::{FormatContext, Formatter, FormatterRegistry};
pub use locale::Locale;
pub use localizer::{DEFAULT_BASE_NAME, Localizer, LocalizerBuilder, MapToMessage, ToMessage};
pub use message::ConstraintViolationMessage;
pub use types::{TypeDecl, TypeGraph};
