//! Where bundles come from
//!
//! A bundle name is a base name plus an optional locale suffix:
//! `vigil/messages_pt_BR`, `vigil/messages_pt`, `vigil/messages`. A
//! [`BundleSource`] maps such a name to a flat key -> template table, or
//! reports that it does not have it.

use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::error::{I18nError, I18nResult};

/// Key -> template table of one bundle file.
pub type Messages = HashMap<String, String>;

/// A store of bundle files.
pub trait BundleSource: Send + Sync + fmt::Debug {
    /// Loads the bundle called `name`, or `Ok(None)` if this source does not
    /// have one.
    fn load(&self, name: &str) -> I18nResult<Option<Messages>>;
}

impl<S: BundleSource + ?Sized> BundleSource for Box<S> {
    fn load(&self, name: &str) -> I18nResult<Option<Messages>> {
        (**self).load(name)
    }
}

/// Parses a flat JSON object of strings.
pub fn parse_messages(name: &str, json: &str) -> I18nResult<Messages> {
    serde_json::from_str(json).map_err(|source| I18nError::InvalidBundle {
        name: name.to_owned(),
        source,
    })
}

// ============================================================================
// EMBEDDED
// ============================================================================

/// The `vigil/messages` bundles compiled into this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSource;

impl EmbeddedSource {
    const BUNDLES: &'static [(&'static str, &'static str)] = &[
        ("vigil/messages", include_str!("../../resources/vigil/messages.json")),
        ("vigil/messages_en", include_str!("../../resources/vigil/messages_en.json")),
        ("vigil/messages_pt_BR", include_str!("../../resources/vigil/messages_pt_BR.json")),
        ("vigil/messages_de", include_str!("../../resources/vigil/messages_de.json")),
    ];

    /// Names of the embedded bundles.
    pub fn names() -> impl Iterator<Item = &'static str> {
        Self::BUNDLES.iter().map(|(name, _)| *name)
    }
}

impl BundleSource for EmbeddedSource {
    fn load(&self, name: &str) -> I18nResult<Option<Messages>> {
        Self::BUNDLES
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(name, json)| parse_messages(name, json))
            .transpose()
    }
}

// ============================================================================
// DIRECTORY
// ============================================================================

/// Reads `<root>/<name>.json`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_of(&self, name: &str) -> PathBuf {
        let mut path = self.root.clone();
        path.extend(name.split('/'));
        path.as_mut_os_string().push(".json");
        path
    }
}

impl BundleSource for DirectorySource {
    fn load(&self, name: &str) -> I18nResult<Option<Messages>> {
        let path = self.path_of(name);
        match std::fs::read_to_string(&path) {
            Ok(json) => {
                trace!(path = %path.display(), "bundle file read");
                parse_messages(name, &json).map(Some)
            }
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(I18nError::Io { path, source }),
        }
    }
}

// ============================================================================
// MEMORY
// ============================================================================

/// Bundles registered programmatically.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    bundles: HashMap<String, Messages>,
}

impl MemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or extends) the bundle called `name`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_bundle<I, K, V>(mut self, name: impl Into<String>, messages: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.bundles
            .entry(name.into())
            .or_default()
            .extend(messages.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }
}

impl BundleSource for MemorySource {
    fn load(&self, name: &str) -> I18nResult<Option<Messages>> {
        Ok(self.bundles.get(name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vigil_validator::validators::names;

    #[test]
    fn test_embedded_bundles_cover_every_builtin_constraint() {
        for bundle in EmbeddedSource::names() {
            let messages = EmbeddedSource.load(bundle).unwrap().unwrap();
            for name in names::ALL {
                let key = format!("{name}.message");
                assert!(messages.contains_key(&key), "{bundle} lacks {key}");
            }
        }
    }

    #[test]
    fn test_embedded_unknown_name() {
        assert!(EmbeddedSource.load("vigil/messages_xx").unwrap().is_none());
    }

    #[test]
    fn test_directory_source_reads_nested_names() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("app")).unwrap();
        std::fs::write(dir.path().join("app/errors_pt.json"), r#"{"a.message": "olá"}"#).unwrap();

        let source = DirectorySource::new(dir.path());
        let messages = source.load("app/errors_pt").unwrap().unwrap();
        assert_eq!(messages["a.message"], "olá");
        assert!(source.load("app/errors").unwrap().is_none());
    }

    #[test]
    fn test_directory_source_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.json"), "[1, 2]").unwrap();

        let error = DirectorySource::new(dir.path()).load("broken").unwrap_err();
        assert!(matches!(error, I18nError::InvalidBundle { ref name, .. } if name == "broken"));
    }

    #[test]
    fn test_memory_source_merges_entries() {
        let source = MemorySource::new()
            .with_bundle("app", [("a", "1")])
            .with_bundle("app", [("b", "2")]);
        assert_eq!(source.load("app").unwrap().unwrap().len(), 2);
    }
}
