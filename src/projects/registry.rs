//! Hand-curated projects that do not live in a public GitHub repository.

use crate::projects::ProjectRecord;
use chrono::{TimeZone, Utc};
use std::sync::OnceLock;

static CUSTOM_PROJECTS: OnceLock<Vec<ProjectRecord>> = OnceLock::new();

/// All curated projects, in authoring order.
pub fn custom_projects() -> &'static [ProjectRecord] {
    CUSTOM_PROJECTS.get_or_init(default_projects)
}

/// Look up a curated project by its local id.
pub fn custom_project_by_id(id: &str) -> Option<&'static ProjectRecord> {
    custom_projects().iter().find(|p| p.id.matches(id))
}

fn default_projects() -> Vec<ProjectRecord> {
    let mut acc_toolkit = ProjectRecord::custom("custom-1", "custom-1");
    acc_toolkit.description = "Conjunto de herramientas que aprovechan el API de Autodesk \
        para la gestion de proyectos BIM360 y Autodesk Construction Cloud"
        .to_string();
    acc_toolkit.language = Some("Python, React, Flask".to_string());
    acc_toolkit.updated_at = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).single();
    acc_toolkit.order = Some(1);

    vec![acc_toolkit]
}
