//! Language registry: Single source of truth for the site's locales.
//!
//! The registry is built once behind a `OnceLock` and never changes. It knows
//! English (the default locale) and Spanish.

use std::sync::OnceLock;

/// Configuration for a supported locale.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 language code, also the URL path prefix (e.g., "en", "es")
    pub code: &'static str,

    /// English name of the language (e.g., "English", "Spanish")
    pub name: &'static str,

    /// Native name of the language, shown in the language switcher
    pub native_name: &'static str,

    /// BCP 47 tag used when formatting dates (e.g., "en-US", "es-ES")
    pub date_locale: &'static str,

    /// Whether this is the locale served when none is requested (only one should be true)
    pub is_default: bool,

    /// Whether this language is enabled for use
    pub enabled: bool,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code. Codes are matched exactly;
    /// `"EN"` is not `"en"`.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// All enabled languages, in registry order.
    pub fn list_enabled(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().filter(|lang| lang.enabled).collect()
    }

    /// The default locale.
    ///
    /// # Panics
    /// Panics if the registry does not define exactly one default language
    /// (this indicates a configuration error).
    pub fn default_language(&self) -> &LanguageConfig {
        let defaults: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_default)
            .collect();

        match defaults.len() {
            0 => panic!("No default language found in registry"),
            1 => defaults[0],
            _ => panic!("Multiple default languages found in registry"),
        }
    }

    /// The locale to fall back to when content is missing for `code`.
    ///
    /// With two locales this is simply the other one. `None` when `code` is
    /// not a supported locale.
    pub fn alternate(&self, code: &str) -> Option<&LanguageConfig> {
        if !self.is_enabled(code) {
            return None;
        }

        let mut others = self
            .languages
            .iter()
            .filter(|lang| lang.enabled && lang.code != code);

        let first = others.next()?;
        if first.is_default {
            return Some(first);
        }
        Some(others.find(|lang| lang.is_default).unwrap_or(first))
    }

    /// Check if a language code is supported and enabled.
    pub fn is_enabled(&self, code: &str) -> bool {
        self.get_by_code(code)
            .map(|lang| lang.enabled)
            .unwrap_or(false)
    }
}

fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            date_locale: "en-US",
            is_default: true,
            enabled: true,
        },
        LanguageConfig {
            code: "es",
            name: "Spanish",
            native_name: "Español",
            date_locale: "es-ES",
            is_default: false,
            enabled: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_get_returns_singleton() {
        let registry1 = LanguageRegistry::get();
        let registry2 = LanguageRegistry::get();

        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_get_by_code_spanish() {
        let config = LanguageRegistry::get()
            .get_by_code("es")
            .expect("Spanish should be registered");

        assert_eq!(config.name, "Spanish");
        assert_eq!(config.native_name, "Español");
        assert_eq!(config.date_locale, "es-ES");
        assert!(!config.is_default);
        assert!(config.enabled);
    }

    #[test]
    fn test_get_by_code_is_exact() {
        let registry = LanguageRegistry::get();
        assert!(registry.get_by_code("fr").is_none());
        assert!(registry.get_by_code("EN").is_none());
        assert!(registry.get_by_code("").is_none());
    }

    #[test]
    fn test_list_enabled_contains_english_and_spanish() {
        let enabled = LanguageRegistry::get().list_enabled();

        assert_eq!(enabled.len(), 2);
        assert_eq!(enabled[0].code, "en");
        assert_eq!(enabled[1].code, "es");
    }

    #[test]
    fn test_default_language_is_english() {
        assert_eq!(LanguageRegistry::get().default_language().code, "en");
    }

    #[test]
    fn test_alternate_swaps_the_two_locales() {
        let registry = LanguageRegistry::get();

        assert_eq!(registry.alternate("en").map(|l| l.code), Some("es"));
        assert_eq!(registry.alternate("es").map(|l| l.code), Some("en"));
    }

    #[test]
    fn test_alternate_of_unknown_locale_is_none() {
        let registry = LanguageRegistry::get();
        assert!(registry.alternate("fr").is_none());
        assert!(registry.alternate("").is_none());
    }

    #[test]
    fn test_is_enabled() {
        let registry = LanguageRegistry::get();
        assert!(registry.is_enabled("en"));
        assert!(registry.is_enabled("es"));
        assert!(!registry.is_enabled("de"));
    }
}
