use std::collections::{HashMap, HashSet};
use std::sync::{Arc, OnceLock, RwLock};

use gpui::SharedString;

mod generated {
    include!(concat!(env!("OUT_DIR"), "/arbe_i18n_generated.rs"));
}

#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub enum Locale {
    #[default]
    System,
    Tag(String),
}

impl From<String> for Locale {
    fn from(value: String) -> Self {
        if value.trim().eq_ignore_ascii_case("system") {
            return Self::System;
        }
        Self::Tag(value.trim().to_string())
    }
}

impl From<&str> for Locale {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

/// Message lookup over the catalogs compiled from `locales/*.toml`.
/// Missing keys render as the key itself.
#[derive(Clone)]
pub struct I18nManager {
    catalog: &'static I18nCatalog,
    locale: Arc<RwLock<Locale>>,
}

impl Default for I18nManager {
    fn default() -> Self {
        Self::new()
    }
}

impl I18nManager {
    pub fn new() -> Self {
        static CATALOG: OnceLock<I18nCatalog> = OnceLock::new();
        Self {
            catalog: CATALOG.get_or_init(I18nCatalog::load),
            locale: Arc::new(RwLock::new(Locale::System)),
        }
    }

    pub fn with_locale(self, locale: impl Into<Locale>) -> Self {
        self.set_locale(locale);
        self
    }

    pub fn locale(&self) -> Locale {
        match self.locale.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn set_locale(&self, locale: impl Into<Locale>) {
        let mut current = match self.locale.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *current = locale.into();
    }

    pub fn default_locale(&self) -> &'static str {
        self.catalog.default_locale
    }

    pub fn resolved_locale(&self) -> &'static str {
        self.catalog
            .resolve_locale(self.requested_locale().as_deref())
    }

    /// Persian is written right to left.
    pub fn is_rtl(&self) -> bool {
        matches!(
            self.resolved_locale().split('-').next(),
            Some("fa" | "ar" | "he" | "ur")
        )
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    pub fn t(&self, key: &str) -> SharedString {
        match self.lookup(key) {
            Some(value) => value.into(),
            None => key.to_string().into(),
        }
    }

    fn requested_locale(&self) -> Option<String> {
        match self.locale() {
            Locale::System => system_locale(),
            Locale::Tag(tag) => Some(tag),
        }
    }

    fn lookup(&self, key: &str) -> Option<&'static str> {
        let resolved = self.resolved_locale();
        self.catalog
            .lookup(resolved, key)
            .or_else(|| self.catalog.lookup(self.catalog.default_locale, key))
    }
}

#[cfg(feature = "i18n")]
fn system_locale() -> Option<String> {
    sys_locale::get_locale()
}

#[cfg(not(feature = "i18n"))]
fn system_locale() -> Option<String> {
    None
}

struct I18nCatalog {
    default_locale: &'static str,
    locales: HashMap<&'static str, HashMap<&'static str, &'static str>>,
    normalized_locale_lookup: HashMap<String, &'static str>,
    language_lookup: HashMap<String, &'static str>,
}

impl I18nCatalog {
    fn load() -> Self {
        let mut locales = HashMap::new();
        let mut normalized_locale_lookup = HashMap::new();
        let mut language_lookup = HashMap::new();
        let mut ambiguous_languages = HashSet::new();

        for (locale, entries) in generated::LOCALES.iter().copied() {
            let normalized = normalize_locale_tag(locale);
            normalized_locale_lookup.insert(normalized.clone(), locale);

            let language = primary_language(&normalized);
            match language_lookup.get(&language) {
                Some(existing) if *existing != locale => {
                    ambiguous_languages.insert(language);
                }
                Some(_) => {}
                None => {
                    language_lookup.insert(language, locale);
                }
            }

            locales.insert(locale, entries.iter().copied().collect::<HashMap<_, _>>());
        }

        for language in ambiguous_languages {
            language_lookup.remove(&language);
        }

        if !locales.contains_key(generated::DEFAULT_LOCALE) {
            log::warn!(
                "default locale {} has no catalog; messages will render as keys",
                generated::DEFAULT_LOCALE
            );
            locales.insert(generated::DEFAULT_LOCALE, HashMap::new());
            let normalized = normalize_locale_tag(generated::DEFAULT_LOCALE);
            language_lookup
                .entry(primary_language(&normalized))
                .or_insert(generated::DEFAULT_LOCALE);
            normalized_locale_lookup.insert(normalized, generated::DEFAULT_LOCALE);
        }

        Self {
            default_locale: generated::DEFAULT_LOCALE,
            locales,
            normalized_locale_lookup,
            language_lookup,
        }
    }

    fn resolve_locale(&self, requested: Option<&str>) -> &'static str {
        let Some(requested) = requested else {
            return self.default_locale;
        };

        let normalized = normalize_locale_tag(requested);
        if let Some(locale) = self.normalized_locale_lookup.get(&normalized) {
            return locale;
        }

        if let Some(locale) = self.language_lookup.get(&primary_language(&normalized)) {
            return locale;
        }

        self.default_locale
    }

    fn lookup(&self, locale: &'static str, key: &str) -> Option<&'static str> {
        self.locales
            .get(locale)
            .and_then(|entries| entries.get(key).copied())
    }
}

fn primary_language(normalized: &str) -> String {
    normalized.split('-').next().unwrap_or_default().to_string()
}

fn normalize_locale_tag(tag: &str) -> String {
    let trimmed = tag.trim();
    let without_encoding = trimmed.split('.').next().unwrap_or(trimmed);
    let without_variant = without_encoding
        .split('@')
        .next()
        .unwrap_or(without_encoding);
    without_variant
        .replace('_', "-")
        .split('-')
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}
