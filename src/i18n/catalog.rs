//! Per-project translations and the fallback resolver.
//!
//! Each project name maps to localized `title`, `description` and
//! `additional_info` blocks. Lookups try the requested locale, then the other
//! supported locale, then the caller's fallback. Fields resolve
//! independently, so a project may have an English title and only a Spanish
//! description.

use crate::i18n::Language;
use crate::projects::{AdditionalInfo, InfoSection};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Localized content for one project in one locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalizedProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub additional_info: Option<AdditionalInfo>,
}

impl LocalizedProject {
    pub fn description(text: &str) -> Self {
        Self {
            description: Some(text.to_string()),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn with_additional_info(mut self, info: AdditionalInfo) -> Self {
        self.additional_info = Some(info);
        self
    }
}

/// Project name → locale → localized content.
#[derive(Debug, Clone, Default)]
pub struct TranslationCatalog {
    entries: HashMap<String, HashMap<Language, LocalizedProject>>,
}

static CATALOG: OnceLock<TranslationCatalog> = OnceLock::new();

impl TranslationCatalog {
    /// The built-in catalog used by the site.
    pub fn get() -> &'static TranslationCatalog {
        CATALOG.get_or_init(default_catalog)
    }

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, project: &str, language: Language, content: LocalizedProject) -> Self {
        self.entries
            .entry(project.to_string())
            .or_default()
            .insert(language, content);
        self
    }

    pub fn has_translation(&self, project: &str) -> bool {
        self.entries.contains_key(project)
    }

    pub fn resolve_title(&self, project: &str, locale: &str, fallback: &str) -> String {
        self.resolve(project, locale, |c| c.title.as_ref())
            .unwrap_or_else(|| fallback.to_string())
    }

    pub fn resolve_description(&self, project: &str, locale: &str, fallback: &str) -> String {
        self.resolve(project, locale, |c| c.description.as_ref())
            .unwrap_or_else(|| fallback.to_string())
    }

    pub fn resolve_additional_info(
        &self,
        project: &str,
        locale: &str,
        fallback: Option<&AdditionalInfo>,
    ) -> Option<AdditionalInfo> {
        self.resolve(project, locale, |c| c.additional_info.as_ref())
            .or_else(|| fallback.cloned())
    }

    /// Requested locale, then its alternate. Unsupported locales resolve to
    /// nothing so the caller's fallback is used verbatim.
    fn resolve<T, F>(&self, project: &str, locale: &str, pick: F) -> Option<T>
    where
        T: Clone,
        F: Fn(&LocalizedProject) -> Option<&T>,
    {
        let language = Language::from_code(locale).ok()?;
        let by_language = self.entries.get(project)?;

        by_language
            .get(&language)
            .and_then(&pick)
            .or_else(|| {
                language
                    .alternate()
                    .and_then(|alt| by_language.get(&alt))
                    .and_then(&pick)
            })
            .cloned()
    }
}

fn default_catalog() -> TranslationCatalog {
    TranslationCatalog::new()
        .with_entry(
            "Portafolio-V3",
            Language::SPANISH,
            LocalizedProject::description("Portafolio personal desarrollado con Next.js y React"),
        )
        .with_entry(
            "Portafolio-V3",
            Language::ENGLISH,
            LocalizedProject::description("Personal portfolio developed with Next.js and React"),
        )
        .with_entry(
            "custom-1",
            Language::SPANISH,
            LocalizedProject::description(
                "Conjunto de herramientas que aprovechan el API de Autodesk para la gestión \
                 de proyectos BIM360 y Autodesk Construction Cloud",
            )
            .with_title("Herramientas para Autodesk Construction Cloud")
            .with_additional_info(AdditionalInfo {
                title: Some("Funcionalidades".to_string()),
                sections: vec![
                    InfoSection::Html(
                        "<p>Automatiza tareas repetitivas de administración de proyectos.</p>"
                            .to_string(),
                    ),
                    InfoSection::List(vec![
                        "Alta masiva de usuarios en proyectos".to_string(),
                        "Reportes de incidencias y RFIs".to_string(),
                        "Sincronización de carpetas entre proyectos".to_string(),
                    ]),
                ],
            }),
        )
        .with_entry(
            "custom-1",
            Language::ENGLISH,
            LocalizedProject::description(
                "Toolkit built on the Autodesk API to manage BIM360 and Autodesk \
                 Construction Cloud projects",
            )
            .with_title("Autodesk Construction Cloud Toolkit")
            .with_additional_info(AdditionalInfo {
                title: Some("Features".to_string()),
                sections: vec![
                    InfoSection::Html(
                        "<p>Automates repetitive project administration tasks.</p>".to_string(),
                    ),
                    InfoSection::List(vec![
                        "Bulk user onboarding across projects".to_string(),
                        "Issue and RFI reports".to_string(),
                        "Folder synchronization between projects".to_string(),
                    ]),
                ],
            }),
        )
}
