use crate::i18n::Language;
use serde::Serialize;

/// All localized user-facing strings for a locale.
///
/// Strings are plain text; the page escapes them when rendering.
#[derive(Debug, Clone, Serialize)]
pub struct LanguageStrings {
    // ==================== Hero ====================
    /// Site title shown in the hero and the browser tab
    pub name: &'static str,

    /// One-line tagline under the name
    pub description: &'static str,

    // ==================== Navigation ====================
    pub nav_home: &'static str,
    pub nav_projects: &'static str,
    pub nav_contact: &'static str,

    /// Tooltip on the language switcher, naming the language it switches to
    pub switch_language: &'static str,

    /// Tooltip on the theme toggle
    pub toggle_theme: &'static str,

    // ==================== Sections ====================
    pub projects_title: &'static str,
    pub contact_title: &'static str,
    pub contact_body: &'static str,

    // ==================== Project Detail ====================
    pub label_description: &'static str,
    pub label_stars: &'static str,
    pub label_forks: &'static str,
    pub label_watchers: &'static str,
    pub label_open_issues: &'static str,
    pub label_created: &'static str,
    pub label_updated: &'static str,
    pub label_pushed: &'static str,
    pub label_size: &'static str,
    pub label_branch: &'static str,
    pub label_license: &'static str,
    pub label_topics: &'static str,
    pub view_repository: &'static str,
    pub view_demo: &'static str,
    pub close: &'static str,

    // ==================== Feed Status ====================
    /// Shown when the feed is empty without an error
    pub projects_empty: &'static str,

    /// Shown above the curated projects when GitHub could not be reached
    pub projects_fetch_failed: &'static str,
}

impl LanguageStrings {
    pub fn for_language(language: Language) -> &'static LanguageStrings {
        match language.code() {
            "es" => &SPANISH_STRINGS,
            _ => &ENGLISH_STRINGS,
        }
    }
}

// ==================== English Strings ====================

pub const ENGLISH_STRINGS: LanguageStrings = LanguageStrings {
    name: "My Portfolio",
    description: "Software developer building web tools and automation for the construction industry.",

    nav_home: "Home",
    nav_projects: "Projects",
    nav_contact: "Contact",
    switch_language: "Cambiar a Español",
    toggle_theme: "Toggle theme",

    projects_title: "Featured projects",
    contact_title: "Get in touch",
    contact_body: "Have a project in mind or just want to say hi? My inbox is open.",

    label_description: "Description",
    label_stars: "Stars",
    label_forks: "Forks",
    label_watchers: "Watchers",
    label_open_issues: "Open issues",
    label_created: "Created",
    label_updated: "Updated",
    label_pushed: "Last push",
    label_size: "Size",
    label_branch: "Default branch",
    label_license: "License",
    label_topics: "Topics",
    view_repository: "View on GitHub",
    view_demo: "View demo",
    close: "Close",

    projects_empty: "No projects to show yet.",
    projects_fetch_failed: "Could not load projects from GitHub. Showing featured projects only.",
};

// ==================== Spanish Strings ====================

pub const SPANISH_STRINGS: LanguageStrings = LanguageStrings {
    name: "Mi Portafolio",
    description: "Desarrollador de software que crea herramientas web y automatización para la industria de la construcción.",

    nav_home: "Inicio",
    nav_projects: "Proyectos",
    nav_contact: "Contacto",
    switch_language: "Switch to English",
    toggle_theme: "Cambiar tema",

    projects_title: "Proyectos destacados",
    contact_title: "Contacto",
    contact_body: "¿Tienes un proyecto en mente o solo quieres saludar? Mi bandeja está abierta.",

    label_description: "Descripción",
    label_stars: "Estrellas",
    label_forks: "Forks",
    label_watchers: "Observadores",
    label_open_issues: "Issues abiertos",
    label_created: "Creado",
    label_updated: "Actualizado",
    label_pushed: "Último push",
    label_size: "Tamaño",
    label_branch: "Rama principal",
    label_license: "Licencia",
    label_topics: "Temas",
    view_repository: "Ver en GitHub",
    view_demo: "Ver demo",
    close: "Cerrar",

    projects_empty: "Aún no hay proyectos para mostrar.",
    projects_fetch_failed: "No se pudieron cargar los proyectos de GitHub. Se muestran solo los proyectos destacados.",
};
