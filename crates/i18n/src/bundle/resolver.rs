//! Six-step bundle resolution
//!
//! For a requested `(base, locale)` with a fallback base name and a default
//! locale, the first step that finds a file wins:
//!
//! | step | base name | locale |
//! |------|-----------|--------|
//! | 1 | base | language + country |
//! | 2 | base | language |
//! | 3 | fallback | language + country |
//! | 4 | fallback | language |
//! | 5 | base | default locale |
//! | 6 | fallback | default locale |
//!
//! Steps whose locale components are invalid are skipped. Steps 5 and 6
//! try the default locale's exact file, then its language file, then the
//! suffix-less root file.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, trace};

use super::source::{BundleSource, EmbeddedSource, Messages};
use super::{MessageBundle, ResolutionStep};
use crate::error::{I18nError, I18nResult};
use crate::locale::Locale;

/// Finds message bundles across a list of [`BundleSource`]s.
///
/// Sources are searched in registration order. Loaded files are cached for
/// the lifetime of the resolver, including negative lookups.
#[derive(Debug, Default)]
pub struct BundleResolver {
    sources: Vec<Box<dyn BundleSource>>,
    cache: RwLock<HashMap<String, Option<Arc<Messages>>>>,
}

impl BundleResolver {
    /// A resolver with no sources.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A resolver over the embedded `vigil/messages` bundles only.
    #[must_use]
    pub fn with_embedded() -> Self {
        let mut resolver = Self::new();
        resolver.add_source(EmbeddedSource);
        resolver
    }

    /// Appends a source. Earlier sources shadow later ones.
    pub fn add_source(&mut self, source: impl BundleSource + 'static) -> &mut Self {
        self.sources.push(Box::new(source));
        self.cache.get_mut().clear();
        self
    }

    /// Forgets every cached file so the next lookups hit the sources again.
    pub fn clear_cache(&self) {
        self.cache.write().clear();
    }

    /// Resolves the bundle for `(base_name, locale)`.
    ///
    /// # Errors
    ///
    /// [`I18nError::BundleNotFound`] when not even step 6 finds a file, or
    /// the error of a source that failed to read or parse a file.
    pub fn resolve(
        &self,
        base_name: &str,
        locale: &Locale,
        fallback_base_name: &str,
        default_locale: &Locale,
    ) -> I18nResult<MessageBundle> {
        for step in ResolutionStep::ALL {
            let base = if step.uses_fallback_base() { fallback_base_name } else { base_name };
            let candidates = candidates(step, locale, default_locale);
            if candidates.is_empty() {
                trace!(%step, %locale, "resolution step skipped: invalid locale components");
                continue;
            }

            for candidate in candidates {
                if let Some(chain) = self.chain(base, &candidate)? {
                    debug!(base_name = base, locale = %candidate, %step, "message bundle resolved");
                    return Ok(MessageBundle::new(base, candidate, step, chain));
                }
                trace!(%step, name = %bundle_name(base, &candidate), "bundle candidate not found");
            }
        }

        Err(I18nError::BundleNotFound {
            base_name: base_name.to_owned(),
            fallback_base_name: fallback_base_name.to_owned(),
            locale: default_locale.clone(),
        })
    }

    /// The file for `(base, locale)` followed by its existing parents, or
    /// `None` if the file itself is missing.
    fn chain(&self, base: &str, locale: &Locale) -> I18nResult<Option<Vec<Arc<Messages>>>> {
        let Some(head) = self.load(&bundle_name(base, locale))? else {
            return Ok(None);
        };
        let mut chain = vec![head];
        for parent in parents(locale) {
            if let Some(messages) = self.load(&bundle_name(base, &parent))? {
                chain.push(messages);
            }
        }
        Ok(Some(chain))
    }

    fn load(&self, name: &str) -> I18nResult<Option<Arc<Messages>>> {
        if let Some(cached) = self.cache.read().get(name) {
            return Ok(cached.clone());
        }

        let mut found = None;
        for source in &self.sources {
            if let Some(messages) = source.load(name)? {
                found = Some(Arc::new(messages));
                break;
            }
        }
        self.cache.write().insert(name.to_owned(), found.clone());
        Ok(found)
    }
}

/// `base` for the root locale, otherwise `base_<tag>`.
fn bundle_name(base: &str, locale: &Locale) -> String {
    if locale.is_root() {
        base.to_owned()
    } else {
        format!("{base}_{}", locale.tag())
    }
}

fn candidates(step: ResolutionStep, locale: &Locale, default_locale: &Locale) -> Vec<Locale> {
    match step {
        ResolutionStep::ExactLocale | ResolutionStep::FallbackExactLocale => {
            exact(locale).into_iter().collect()
        }
        ResolutionStep::Language | ResolutionStep::FallbackLanguage => {
            language(locale).into_iter().collect()
        }
        ResolutionStep::DefaultLocale | ResolutionStep::FallbackDefaultLocale => exact(default_locale)
            .into_iter()
            .chain(language(default_locale))
            .chain([Locale::root()])
            .collect(),
    }
}

fn exact(locale: &Locale) -> Option<Locale> {
    (locale.has_valid_language() && locale.has_valid_country()).then(|| locale.clone())
}

fn language(locale: &Locale) -> Option<Locale> {
    locale.has_valid_language().then(|| locale.without_country())
}

fn parents(locale: &Locale) -> Vec<Locale> {
    if !locale.country().is_empty() {
        vec![locale.without_country(), Locale::root()]
    } else if !locale.language().is_empty() {
        vec![Locale::root()]
    } else {
        Vec::new()
    }
}
