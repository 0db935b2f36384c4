//! Manual display order for fetched repositories.
//!
//! Repositories pulled from GitHub carry no order of their own; this table
//! assigns one by repository name. Lower values sort first.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Name → order lookup table. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct OrderTable {
    entries: HashMap<String, u32>,
}

static ORDER_TABLE: OnceLock<OrderTable> = OnceLock::new();

impl OrderTable {
    /// The built-in table used by the site.
    pub fn get() -> &'static OrderTable {
        ORDER_TABLE.get_or_init(|| OrderTable::from_entries(default_order()))
    }

    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(name, order)| (name.into(), order))
                .collect(),
        }
    }

    /// Order assigned to `name`, if any. Lookups are case-sensitive, matching
    /// GitHub repository names exactly.
    pub fn order_for(&self, name: &str) -> Option<u32> {
        self.entries.get(name).copied()
    }

    pub fn has_order(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn default_order() -> Vec<(&'static str, u32)> {
    // Order 1 is held by the curated toolkit project in the registry
    vec![
        ("Portafolio-V3", 2),
        ("OpenAI_Prueba_I", 3),
        ("proyecto_redes", 4),
        ("CADHUBEV", 5),
    ]
}
