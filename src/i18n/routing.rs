//! Locale-prefixed URL paths (`/en/...`, `/es/...`).

use crate::i18n::{Language, LanguageRegistry};

/// Locale named by the first path segment, if it is a supported one.
pub fn locale_from_path(path: &str) -> Option<Language> {
    let first = path.trim_start_matches('/').split('/').next()?;
    Language::from_code(first).ok()
}

/// Path of the same page in the other locale.
///
/// `/es/...` becomes `/en/...` and vice versa. A path without a locale
/// prefix is served in the default locale, so it switches to Spanish.
pub fn switch_locale_path(path: &str) -> String {
    let trimmed = path.trim_start_matches('/');

    let (target, rest) = match locale_from_path(path) {
        Some(current) => (
            current.alternate().unwrap_or_else(Language::default_language),
            trimmed.split_once('/').map(|(_, rest)| rest).unwrap_or(""),
        ),
        None => (non_default_language(), trimmed),
    };

    if rest.is_empty() {
        format!("/{}", target.code())
    } else {
        format!("/{}/{}", target.code(), rest)
    }
}

fn non_default_language() -> Language {
    LanguageRegistry::get()
        .list_enabled()
        .into_iter()
        .find(|lang| !lang.is_default)
        .and_then(|lang| Language::from_code(lang.code).ok())
        .unwrap_or_else(Language::default_language)
}
