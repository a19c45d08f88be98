//! Localizer configuration
//!
//! Every field has a default, so an empty JSON object is a valid
//! configuration:
//!
//! ```json
//! {
//!   "default_locale": "pt_BR",
//!   "base_name": "app/messages",
//!   "fallback_base_name": "vigil/messages",
//!   "bundle_dirs": ["./i18n"],
//!   "embedded_bundles": true
//! }
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{I18nError, I18nResult};
use crate::locale::Locale;
use crate::localizer::DEFAULT_BASE_NAME;

/// Settings for building a [`Localizer`](crate::Localizer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalizerConfig {
    /// Locale used by steps 5 and 6 of bundle resolution and when no locale
    /// is requested. `None` means the root locale.
    pub default_locale: Option<Locale>,
    /// Base name tried first.
    pub base_name: String,
    /// Base name tried when `base_name` has no bundle for a locale.
    pub fallback_base_name: String,
    /// Directories searched for `<name>.json` bundle files, in order, before
    /// the embedded bundles.
    pub bundle_dirs: Vec<PathBuf>,
    /// Whether the built-in `vigil/messages` bundles are searched last.
    pub embedded_bundles: bool,
}

impl Default for LocalizerConfig {
    fn default() -> Self {
        Self {
            default_locale: None,
            base_name: DEFAULT_BASE_NAME.to_owned(),
            fallback_base_name: DEFAULT_BASE_NAME.to_owned(),
            bundle_dirs: Vec::new(),
            embedded_bundles: true,
        }
    }
}

impl LocalizerConfig {
    /// Parses a JSON configuration document.
    pub fn from_json(json: &str) -> I18nResult<Self> {
        serde_json::from_str(json).map_err(I18nError::InvalidConfig)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> I18nResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| I18nError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Create configuration from environment variables.
    ///
    /// - `VIGIL_LOCALE`, else `LC_ALL`, else `LANG`: default locale
    /// - `VIGIL_BASE_NAME`, `VIGIL_FALLBACK_BASE_NAME`: base names
    /// - `VIGIL_BUNDLE_DIRS`: platform path list of bundle directories
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Self {
        let text = |key: &str| {
            lookup(key)
                .and_then(|value| value.into_string().ok())
                .filter(|value| !value.trim().is_empty())
        };

        let defaults = Self::default();
        Self {
            default_locale: ["VIGIL_LOCALE", "LC_ALL", "LANG"]
                .into_iter()
                .find_map(text)
                .map(|tag| Locale::parse(&tag))
                .filter(|locale| !locale.is_root()),
            base_name: text("VIGIL_BASE_NAME").unwrap_or(defaults.base_name),
            fallback_base_name: text("VIGIL_FALLBACK_BASE_NAME").unwrap_or(defaults.fallback_base_name),
            bundle_dirs: lookup("VIGIL_BUNDLE_DIRS")
                .map(|dirs| {
                    std::env::split_paths(&dirs)
                        .filter(|p| !p.as_os_str().is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            embedded_bundles: defaults.embedded_bundles,
        }
    }
}
