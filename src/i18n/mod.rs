//! Internationalization (i18n) for the English and Spanish site.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for the supported locales
//! - `language`: Validated `Language` type
//! - `strings`: Localized UI strings
//! - `catalog`: Per-project translations and the fallback resolver
//! - `routing`: Locale-prefixed paths and the language switcher
//!
//! # Example
//!
//! ```rust,ignore
//! use portfolio::i18n::{Language, TranslationCatalog};
//!
//! let spanish = Language::from_code("es")?;
//! let text = TranslationCatalog::get().resolve_description("Portafolio-V3", "es", "");
//! ```

mod catalog;
mod language;
mod registry;
mod routing;
mod strings;

pub use catalog::{LocalizedProject, TranslationCatalog};
pub use language::Language;
pub use registry::{LanguageConfig, LanguageRegistry};
pub use routing::{locale_from_path, switch_locale_path};
pub use strings::LanguageStrings;
