//! Language type: a locale validated against the registry.

use crate::i18n::{LanguageConfig, LanguageRegistry, LanguageStrings};
use anyhow::{bail, Result};
use serde::{Serialize, Serializer};
use std::fmt;

/// A validated locale.
///
/// Only supported, enabled languages can be constructed, so holders of a
/// `Language` never need to re-check the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// ISO 639-1 language code (e.g., "en", "es")
    code: &'static str,
}

impl Language {
    pub const ENGLISH: Language = Language { code: "en" };
    pub const SPANISH: Language = Language { code: "es" };

    /// Create a Language from a locale tag.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is known and enabled
    /// * `Err` otherwise
    pub fn from_code(code: &str) -> Result<Language> {
        let registry = LanguageRegistry::get();

        match registry.get_by_code(code) {
            Some(config) if config.enabled => Ok(Language { code: config.code }),
            Some(_) => bail!("Language '{}' is not enabled", code),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// Parse a locale tag, falling back to the default locale for anything
    /// unsupported or missing.
    pub fn from_code_or_default(code: Option<&str>) -> Language {
        code.and_then(|c| Language::from_code(c.trim()).ok())
            .unwrap_or_else(Language::default_language)
    }

    /// The locale served when none is requested.
    pub fn default_language() -> Language {
        let config = LanguageRegistry::get().default_language();
        Language { code: config.code }
    }

    /// The other supported locale, consulted when content is missing in this one.
    pub fn alternate(&self) -> Option<Language> {
        LanguageRegistry::get()
            .alternate(self.code)
            .map(|config| Language { code: config.code })
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the code is missing from the registry, which cannot happen
    /// for a Language built through `from_code` or the constants.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    pub fn name(&self) -> &'static str {
        self.config().name
    }

    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    pub fn is_default(&self) -> bool {
        self.config().is_default
    }

    /// UI strings for this locale.
    pub fn strings(&self) -> &'static LanguageStrings {
        LanguageStrings::for_language(*self)
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::default_language()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code)
    }
}
