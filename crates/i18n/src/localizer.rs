//! The localization pipeline
//!
//! A [`Localizer`] bundles everything needed to turn violations into
//! messages: the formatter registry, the bundle resolver, the default
//! locale and the base names. It is a plain value owned by the caller;
//! changing it requires `&mut`, so it can be shared read-only across
//! threads while validations run.
//!
//! # Examples
//!
//! ```rust
//! use vigil_i18n::{Locale, Localizer};
//! use vigil_validator::prelude::*;
//!
//! struct Employee { salary: i64 }
//!
//! let localizer = Localizer::builder().default_locale(Locale::new("de", "DE")).build();
//! let violations = validate(&Employee { salary: 10_000 }, |v| {
//!     v.field("salary", |e| &e.salary).is_between(1, 9_876);
//! })
//! .unwrap_err();
//!
//! let messages = localizer.map_to_message(&violations, None, Some(&Locale::new("pt", "BR"))).unwrap();
//! assert_eq!(messages[0].message, "Deve estar entre 1 e 9.876");
//! ```

use std::path::PathBuf;

use vigil_validator::core::{ConstraintViolation, ConstraintViolations, TypeName, Value};

use crate::bundle::{BundleResolver, BundleSource, DirectorySource, EmbeddedSource, MessageBundle};
use crate::config::LocalizerConfig;
use crate::error::I18nResult;
use crate::format::{Formatter, FormatterRegistry};
use crate::interpolate::{self, MessageParams};
use crate::locale::Locale;
use crate::message::ConstraintViolationMessage;
use crate::types::TypeDecl;

/// Base name of the built-in message bundles.
pub const DEFAULT_BASE_NAME: &str = "vigil/messages";

// ============================================================================
// LOCALIZER
// ============================================================================

/// Formatting context for violation messages.
#[derive(Debug)]
pub struct Localizer {
    registry: FormatterRegistry,
    resolver: BundleResolver,
    default_locale: Locale,
    base_name: String,
    fallback_base_name: String,
}

impl Default for Localizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Localizer {
    /// Built-in formatters, embedded bundles and the root default locale.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    #[must_use]
    pub fn builder() -> LocalizerBuilder {
        LocalizerBuilder::new()
    }

    /// Builds a localizer from configuration.
    #[must_use]
    pub fn from_config(config: &LocalizerConfig) -> Self {
        let mut builder = Self::builder()
            .default_locale(config.default_locale.clone().unwrap_or_default())
            .base_name(&config.base_name)
            .fallback_base_name(&config.fallback_base_name);
        for dir in &config.bundle_dirs {
            builder = builder.bundle_dir(dir);
        }
        if !config.embedded_bundles {
            builder = builder.without_embedded();
        }
        builder.build()
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    #[must_use]
    pub fn registry(&self) -> &FormatterRegistry {
        &self.registry
    }

    /// Mutable access for registering or removing formatters.
    pub fn registry_mut(&mut self) -> &mut FormatterRegistry {
        &mut self.registry
    }

    #[must_use]
    pub fn resolver(&self) -> &BundleResolver {
        &self.resolver
    }

    #[must_use]
    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    pub fn set_default_locale(&mut self, locale: Locale) {
        self.default_locale = locale;
    }

    #[must_use]
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    #[must_use]
    pub fn fallback_base_name(&self) -> &str {
        &self.fallback_base_name
    }

    // ------------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------------

    /// Resolves a bundle. `None` arguments use the default base name and
    /// the default locale.
    pub fn bundle(&self, base_name: Option<&str>, locale: Option<&Locale>) -> I18nResult<MessageBundle> {
        self.resolver.resolve(
            base_name.unwrap_or(&self.base_name),
            locale.unwrap_or(&self.default_locale),
            &self.fallback_base_name,
            &self.default_locale,
        )
    }

    /// Formats a value, for the default locale when `locale` is `None`.
    #[must_use]
    pub fn format(&self, value: &Value, locale: Option<&Locale>) -> String {
        self.registry.format(value, locale.unwrap_or(&self.default_locale))
    }

    /// Renders the template stored under `key` in `bundle`.
    pub fn interpolate(&self, bundle: &MessageBundle, key: &str, params: &MessageParams) -> I18nResult<String> {
        interpolate::interpolate(bundle, key, params, &self.registry)
    }

    /// Localizes one violation.
    pub fn to_message(
        &self,
        violation: &ConstraintViolation,
        base_name: Option<&str>,
        locale: Option<&Locale>,
    ) -> I18nResult<ConstraintViolationMessage> {
        let bundle = self.bundle(base_name, locale)?;
        self.message_in(&bundle, violation)
    }

    /// Localizes every violation against one resolved bundle, preserving
    /// the order of the set.
    pub fn map_to_message<'v, I>(
        &self,
        violations: I,
        base_name: Option<&str>,
        locale: Option<&Locale>,
    ) -> I18nResult<Vec<ConstraintViolationMessage>>
    where
        I: IntoIterator<Item = &'v ConstraintViolation>,
    {
        let bundle = self.bundle(base_name, locale)?;
        violations
            .into_iter()
            .map(|violation| self.message_in(&bundle, violation))
            .collect()
    }

    fn message_in(
        &self,
        bundle: &MessageBundle,
        violation: &ConstraintViolation,
    ) -> I18nResult<ConstraintViolationMessage> {
        let params = interpolate::violation_params(violation);
        let message = self.interpolate(bundle, violation.constraint().message_key(), &params)?;
        Ok(ConstraintViolationMessage::new(violation, message))
    }
}

// ============================================================================
// EXTENSION TRAITS
// ============================================================================

/// `violation.to_message(&localizer)` sugar over [`Localizer::to_message`].
pub trait ToMessage {
    /// Localizes with the default base name and locale.
    fn to_message(&self, localizer: &Localizer) -> I18nResult<ConstraintViolationMessage> {
        self.to_message_in(localizer, None, None)
    }

    fn to_message_in(
        &self,
        localizer: &Localizer,
        base_name: Option<&str>,
        locale: Option<&Locale>,
    ) -> I18nResult<ConstraintViolationMessage>;
}

impl ToMessage for ConstraintViolation {
    fn to_message_in(
        &self,
        localizer: &Localizer,
        base_name: Option<&str>,
        locale: Option<&Locale>,
    ) -> I18nResult<ConstraintViolationMessage> {
        localizer.to_message(self, base_name, locale)
    }
}

/// `violations.map_to_message(&localizer)` sugar over
/// [`Localizer::map_to_message`].
pub trait MapToMessage {
    fn map_to_message(&self, localizer: &Localizer) -> I18nResult<Vec<ConstraintViolationMessage>> {
        self.map_to_message_in(localizer, None, None)
    }

    fn map_to_message_in(
        &self,
        localizer: &Localizer,
        base_name: Option<&str>,
        locale: Option<&Locale>,
    ) -> I18nResult<Vec<ConstraintViolationMessage>>;
}

impl MapToMessage for ConstraintViolations {
    fn map_to_message_in(
        &self,
        localizer: &Localizer,
        base_name: Option<&str>,
        locale: Option<&Locale>,
    ) -> I18nResult<Vec<ConstraintViolationMessage>> {
        localizer.map_to_message(self, base_name, locale)
    }
}

impl MapToMessage for [ConstraintViolation] {
    fn map_to_message_in(
        &self,
        localizer: &Localizer,
        base_name: Option<&str>,
        locale: Option<&Locale>,
    ) -> I18nResult<Vec<ConstraintViolationMessage>> {
        localizer.map_to_message(self, base_name, locale)
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builder for [`Localizer`].
///
/// Bundle sources are searched in the order they are added; the embedded
/// bundles come last unless [`without_embedded`](Self::without_embedded)
/// is called.
#[derive(Debug)]
pub struct LocalizerBuilder {
    registry: FormatterRegistry,
    sources: Vec<Box<dyn BundleSource>>,
    embedded: bool,
    default_locale: Locale,
    base_name: String,
    fallback_base_name: String,
}

impl Default for LocalizerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalizerBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: FormatterRegistry::new(),
            sources: Vec::new(),
            embedded: true,
            default_locale: Locale::root(),
            base_name: DEFAULT_BASE_NAME.to_owned(),
            fallback_base_name: DEFAULT_BASE_NAME.to_owned(),
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn default_locale(mut self, locale: impl Into<Locale>) -> Self {
        self.default_locale = locale.into();
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn base_name(mut self, base_name: impl Into<String>) -> Self {
        self.base_name = base_name.into();
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn fallback_base_name(mut self, base_name: impl Into<String>) -> Self {
        self.fallback_base_name = base_name.into();
        self
    }

    /// Adds a [`DirectorySource`] rooted at `dir`.
    #[must_use = "builder methods must be chained or built"]
    pub fn bundle_dir(self, dir: impl Into<PathBuf>) -> Self {
        self.source(DirectorySource::new(dir))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn source(mut self, source: impl BundleSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Drops the built-in `vigil/messages` bundles.
    #[must_use = "builder methods must be chained or built"]
    pub fn without_embedded(mut self) -> Self {
        self.embedded = false;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn declare(mut self, decl: TypeDecl) -> Self {
        self.registry.declare(decl);
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn formatter(mut self, type_name: impl Into<TypeName>, formatter: impl Formatter + 'static) -> Self {
        self.registry.set(type_name, formatter);
        self
    }

    #[must_use]
    pub fn build(self) -> Localizer {
        let mut resolver = BundleResolver::new();
        for source in self.sources {
            resolver.add_source(source);
        }
        if self.embedded {
            resolver.add_source(EmbeddedSource);
        }
        Localizer {
            registry: self.registry,
            resolver,
            default_locale: self.default_locale,
            base_name: self.base_name,
            fallback_base_name: self.fallback_base_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::{MemorySource, ResolutionStep};
    use crate::error::I18nError;
    use pretty_assertions::assert_eq;
    use vigil_validator::core::Constraint;

    fn violation(constraint: Constraint, value: Value) -> ConstraintViolation {
        ConstraintViolation::new("salary", value, constraint)
    }

    #[test]
    fn test_default_localizer_uses_root_bundle() {
        let localizer = Localizer::new();
        let bundle = localizer.bundle(None, None).unwrap();
        assert_eq!(bundle.base_name(), DEFAULT_BASE_NAME);
        assert_eq!(bundle.step(), ResolutionStep::DefaultLocale);
        assert!(bundle.locale().is_root());
    }

    #[test]
    fn test_custom_base_name_does_not_fall_back_per_key() {
        let localizer = Localizer::builder()
            .base_name("app/messages")
            .source(MemorySource::new().with_bundle("app/messages_pt_BR", [("app.Adult.message", "Deve ser adulto")]))
            .build();

        let adult = violation(Constraint::new("app.Adult"), Value::Integer(15));
        let message = adult.to_message_in(&localizer, None, Some(&Locale::new("pt", "BR"))).unwrap();
        assert_eq!(message.message, "Deve ser adulto");

        let between = violation(
            Constraint::new(vigil_validator::validators::names::BETWEEN)
                .with_param("start", 1)
                .with_param("end", 9_876),
            Value::Integer(0),
        );
        let error = between.to_message_in(&localizer, None, Some(&Locale::new("pt", "BR"))).unwrap_err();
        assert!(matches!(error, I18nError::MissingMessage { .. }));

        let message = between
            .to_message_in(&localizer, Some(DEFAULT_BASE_NAME), Some(&Locale::new("pt", "BR")))
            .unwrap();
        assert_eq!(message.message, "Deve estar entre 1 e 9.876");
    }

    #[test]
    fn test_custom_formatter_flows_into_messages() {
        let localizer = Localizer::builder()
            .formatter(TypeName::INTEGER, |value: &Value, _: &crate::FormatContext<'_>| format!("#{value}"))
            .build();
        let less = violation(
            Constraint::new(vigil_validator::validators::names::LESS).with_param("value", 10),
            Value::Integer(12),
        );
        assert_eq!(less.to_message(&localizer).unwrap().message, "Must be less than #10");
    }

    #[test]
    fn test_without_embedded_has_no_bundles() {
        let localizer = Localizer::builder().without_embedded().build();
        assert!(matches!(localizer.bundle(None, None), Err(I18nError::BundleNotFound { .. })));
    }

    #[test]
    fn test_format_defaults_to_default_locale() {
        let mut localizer = Localizer::builder().default_locale("pt_BR").build();
        assert_eq!(localizer.format(&Value::Integer(9876), None), "9.876");
        localizer.set_default_locale(Locale::new("en", "US"));
        assert_eq!(localizer.format(&Value::Integer(9876), None), "9,876");
    }
}
