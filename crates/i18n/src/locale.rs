//! Locales and their formatting conventions
//!
//! A [`Locale`] is a language plus an optional country. Parsing is lenient:
//! `pt_BR`, `pt-BR`, `pt_BR.UTF-8` and `PT-br` all yield the same locale.
//! Components are never rejected at parse time; bundle resolution checks
//! [`Locale::has_valid_language`] / [`Locale::has_valid_country`] and skips
//! steps whose components are unusable.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// LOCALE
// ============================================================================

/// A language with an optional country.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Locale {
    language: String,
    country: String,
}

impl Locale {
    /// Creates a locale, normalizing case (`pt`, `BR`).
    pub fn new(language: impl AsRef<str>, country: impl AsRef<str>) -> Self {
        Self {
            language: language.as_ref().trim().to_ascii_lowercase(),
            country: country.as_ref().trim().to_ascii_uppercase(),
        }
    }

    /// A locale with a language and no country.
    pub fn language_only(language: impl AsRef<str>) -> Self {
        Self::new(language, "")
    }

    /// The root locale: no language, no country.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            language: String::new(),
            country: String::new(),
        }
    }

    /// Parses a tag such as `en`, `pt_BR`, `pt-BR` or `de_DE.UTF-8@euro`.
    ///
    /// `C`, `POSIX` and the empty string parse to [`Locale::root`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use vigil_i18n::Locale;
    ///
    /// assert_eq!(Locale::parse("pt-br"), Locale::new("pt", "BR"));
    /// assert_eq!(Locale::parse("de_DE.UTF-8"), Locale::new("de", "DE"));
    /// assert_eq!(Locale::parse("C.UTF-8"), Locale::root());
    /// ```
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        let tag = tag.trim();
        let tag = tag.split(['.', '@']).next().unwrap_or_default();
        if tag.is_empty() || tag.eq_ignore_ascii_case("c") || tag.eq_ignore_ascii_case("posix") {
            return Self::root();
        }
        let mut parts = tag.split(['_', '-']);
        let language = parts.next().unwrap_or_default();
        let country = parts.next().unwrap_or_default();
        Self::new(language, country)
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }

    /// This locale without its country.
    #[must_use]
    pub fn without_country(&self) -> Self {
        Self::language_only(&self.language)
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.language.is_empty() && self.country.is_empty()
    }

    /// Two or three ASCII letters.
    #[must_use]
    pub fn has_valid_language(&self) -> bool {
        (2..=3).contains(&self.language.len()) && self.language.bytes().all(|b| b.is_ascii_alphabetic())
    }

    /// Two ASCII letters or three digits.
    #[must_use]
    pub fn has_valid_country(&self) -> bool {
        match self.country.len() {
            2 => self.country.bytes().all(|b| b.is_ascii_alphabetic()),
            3 => self.country.bytes().all(|b| b.is_ascii_digit()),
            _ => false,
        }
    }

    /// The `language_COUNTRY` tag used in bundle names; empty for the root locale.
    #[must_use]
    pub fn tag(&self) -> String {
        match (self.language.is_empty(), self.country.is_empty()) {
            (true, true) => String::new(),
            (false, true) => self.language.clone(),
            _ => format!("{}_{}", self.language, self.country),
        }
    }

    pub(crate) fn conventions(&self) -> &'static Conventions {
        Conventions::for_locale(self)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("root")
        } else {
            f.write_str(&self.tag())
        }
    }
}

impl From<String> for Locale {
    fn from(tag: String) -> Self {
        Self::parse(&tag)
    }
}

impl From<&str> for Locale {
    fn from(tag: &str) -> Self {
        Self::parse(tag)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.tag()
    }
}

// ============================================================================
// CONVENTIONS
// ============================================================================

/// Number and date/time conventions of a locale.
///
/// Date and time patterns use `chrono` strftime syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Conventions {
    pub(crate) grouping: &'static str,
    pub(crate) decimal: &'static str,
    pub(crate) date: &'static str,
    pub(crate) time: &'static str,
}

const ROOT: Conventions = Conventions {
    grouping: ",",
    decimal: ".",
    date: "%Y-%m-%d",
    time: "%H:%M:%S",
};

const EN: Conventions = Conventions {
    grouping: ",",
    decimal: ".",
    date: "%-m/%-d/%Y",
    time: "%-I:%M:%S %p",
};

const EN_GB: Conventions = Conventions {
    date: "%d/%m/%Y",
    time: "%H:%M:%S",
    ..EN
};

const LATIN: Conventions = Conventions {
    grouping: ".",
    decimal: ",",
    date: "%d/%m/%Y",
    time: "%H:%M:%S",
};

const DE: Conventions = Conventions {
    date: "%d.%m.%Y",
    ..LATIN
};

const FR: Conventions = Conventions {
    grouping: "\u{202f}",
    ..LATIN
};

const RU: Conventions = Conventions {
    grouping: "\u{a0}",
    date: "%d.%m.%Y",
    ..LATIN
};

const CJK: Conventions = Conventions {
    date: "%Y/%m/%d",
    ..ROOT
};

impl Conventions {
    fn for_locale(locale: &Locale) -> &'static Self {
        match (locale.language(), locale.country()) {
            ("en", "US" | "") => &EN,
            ("en", _) => &EN_GB,
            ("pt" | "es" | "it" | "nl", _) => &LATIN,
            ("de", _) => &DE,
            ("fr", _) => &FR,
            ("ru" | "uk", _) => &RU,
            ("ja" | "zh" | "ko", _) => &CJK,
            _ => &ROOT,
        }
    }
}
