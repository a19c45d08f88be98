//! Message bundles and their resolution

mod resolver;
mod source;

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

pub use resolver::BundleResolver;
pub use source::{BundleSource, DirectorySource, EmbeddedSource, MemorySource, Messages, parse_messages};

use crate::error::{I18nError, I18nResult};
use crate::locale::Locale;

/// Which resolution step produced a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ResolutionStep {
    /// Requested base name, requested language and country.
    ExactLocale,
    /// Requested base name, requested language.
    Language,
    /// Fallback base name, requested language and country.
    FallbackExactLocale,
    /// Fallback base name, requested language.
    FallbackLanguage,
    /// Requested base name, default locale.
    DefaultLocale,
    /// Fallback base name, default locale.
    FallbackDefaultLocale,
}

impl ResolutionStep {
    /// All steps in the order they are tried.
    pub const ALL: [Self; 6] = [
        Self::ExactLocale,
        Self::Language,
        Self::FallbackExactLocale,
        Self::FallbackLanguage,
        Self::DefaultLocale,
        Self::FallbackDefaultLocale,
    ];

    /// One-based position in the resolution order.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::ExactLocale => 1,
            Self::Language => 2,
            Self::FallbackExactLocale => 3,
            Self::FallbackLanguage => 4,
            Self::DefaultLocale => 5,
            Self::FallbackDefaultLocale => 6,
        }
    }

    /// Whether this step searches the fallback base name.
    #[must_use]
    pub const fn uses_fallback_base(self) -> bool {
        matches!(self, Self::FallbackExactLocale | Self::FallbackLanguage | Self::FallbackDefaultLocale)
    }
}

impl fmt::Display for ResolutionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {}", self.number())
    }
}

/// A resolved bundle: the templates of one `(base name, locale)` pair.
///
/// Lookups fall through the parent chain of the resolved file: a
/// `messages_pt_BR` bundle also sees keys from `messages_pt` and
/// `messages`, when those files exist.
#[derive(Debug, Clone)]
pub struct MessageBundle {
    base_name: String,
    locale: Locale,
    step: ResolutionStep,
    chain: Vec<Arc<Messages>>,
}

impl MessageBundle {
    pub(crate) fn new(
        base_name: impl Into<String>,
        locale: Locale,
        step: ResolutionStep,
        chain: Vec<Arc<Messages>>,
    ) -> Self {
        Self {
            base_name: base_name.into(),
            locale,
            step,
            chain,
        }
    }

    /// Base name of the file that was found; the fallback base name for
    /// steps 3, 4 and 6.
    #[must_use]
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Locale of the file that was found. Values interpolated into this
    /// bundle's messages are formatted for this locale.
    #[must_use]
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    #[must_use]
    pub fn step(&self) -> ResolutionStep {
        self.step
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.chain.iter().any(|messages| messages.contains_key(key))
    }

    /// The template stored under `key`.
    ///
    /// # Errors
    ///
    /// [`I18nError::MissingMessage`] if no file in the chain has `key`.
    pub fn get_message(&self, key: &str) -> I18nResult<&str> {
        self.chain
            .iter()
            .find_map(|messages| messages.get(key))
            .map(String::as_str)
            .ok_or_else(|| I18nError::MissingMessage {
                key: key.to_owned(),
                base_name: self.base_name.clone(),
                locale: self.locale.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn messages(entries: &[(&str, &str)]) -> Arc<Messages> {
        Arc::new(entries.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect())
    }

    #[test]
    fn test_lookup_falls_through_parents() {
        let bundle = MessageBundle::new(
            "app",
            Locale::new("pt", "BR"),
            ResolutionStep::ExactLocale,
            vec![messages(&[("greeting", "Oi")]), messages(&[("greeting", "Olá"), ("bye", "Tchau")])],
        );

        assert_eq!(bundle.get_message("greeting").unwrap(), "Oi");
        assert_eq!(bundle.get_message("bye").unwrap(), "Tchau");
        assert!(!bundle.contains("missing"));
    }

    #[test]
    fn test_missing_key_names_bundle_and_locale() {
        let bundle = MessageBundle::new("app", Locale::language_only("de"), ResolutionStep::Language, vec![]);
        let error = bundle.get_message("nope").unwrap_err();
        assert!(matches!(
            error,
            I18nError::MissingMessage { ref key, ref base_name, ref locale }
                if key == "nope" && base_name == "app" && *locale == Locale::language_only("de")
        ));
    }

    #[test]
    fn test_steps_are_numbered_in_order() {
        let numbers: Vec<u8> = ResolutionStep::ALL.iter().map(|s| s.number()).collect();
        assert_eq!(numbers, [1, 2, 3, 4, 5, 6]);
    }
}
