//! Localization errors
//!
//! These are infrastructure failures: they propagate immediately and are
//! never collected alongside constraint violations.

use std::path::PathBuf;

use thiserror::Error;

use crate::locale::Locale;

/// Errors raised while resolving bundles or rendering messages.
#[derive(Debug, Error)]
pub enum I18nError {
    /// A resolved bundle (and its parents) has no template for `key`.
    #[error("no message for key '{key}' in bundle '{base_name}' ({locale})")]
    MissingMessage {
        key: String,
        base_name: String,
        locale: Locale,
    },

    /// Neither the requested nor the fallback base name has a usable bundle,
    /// not even for the default locale.
    #[error("no bundle found for '{base_name}' (fallback '{fallback_base_name}') in {locale}")]
    BundleNotFound {
        base_name: String,
        fallback_base_name: String,
        locale: Locale,
    },

    /// A bundle file exists but is not a flat JSON object of strings.
    #[error("invalid bundle '{name}': {source}")]
    InvalidBundle {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// A localizer configuration document could not be parsed.
    #[error("invalid localizer configuration: {0}")]
    InvalidConfig(#[source] serde_json::Error),

    /// A bundle file or configuration file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result alias for localization operations.
pub type I18nResult<T> = Result<T, I18nError>;
