//! Light/dark theme preference.
//!
//! The browser persists one string (`"light"` or `"dark"`). When nothing
//! valid is stored the OS color-scheme preference decides. `ThemeContext`
//! holds the resolved theme in one place; consumers subscribe to its watch
//! channel instead of each polling the page for a `dark` class.

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::watch;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Parse a stored preference. Only the exact strings `"light"` and
    /// `"dark"` are accepted.
    pub fn parse(value: &str) -> Option<Theme> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored preference first, OS preference otherwise.
pub fn resolve_theme(stored: Option<&str>, system_prefers_dark: bool) -> Theme {
    stored.and_then(Theme::parse).unwrap_or(if system_prefers_dark {
        Theme::Dark
    } else {
        Theme::Light
    })
}

/// Snapshot published to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeState {
    pub theme: Theme,
    /// True once the user picked a theme; the OS preference is then ignored
    pub explicit: bool,
}

/// Process-wide theme state with a single subscription point.
#[derive(Debug)]
pub struct ThemeContext {
    tx: watch::Sender<ThemeState>,
}

impl ThemeContext {
    pub fn new(stored: Option<&str>, system_prefers_dark: bool) -> Self {
        let state = ThemeState {
            theme: resolve_theme(stored, system_prefers_dark),
            explicit: stored.and_then(Theme::parse).is_some(),
        };
        let (tx, _rx) = watch::channel(state);
        Self { tx }
    }

    pub fn current(&self) -> Theme {
        self.tx.borrow().theme
    }

    pub fn is_dark(&self) -> bool {
        self.current().is_dark()
    }

    pub fn subscribe(&self) -> watch::Receiver<ThemeState> {
        self.tx.subscribe()
    }

    /// Value to persist in browser storage, if the user chose one.
    pub fn stored_preference(&self) -> Option<&'static str> {
        let state = *self.tx.borrow();
        state.explicit.then(|| state.theme.as_str())
    }

    /// Explicit user choice.
    pub fn set(&self, theme: Theme) {
        self.publish(ThemeState {
            theme,
            explicit: true,
        });
    }

    /// Flip the theme and remember the choice. Returns the new theme.
    pub fn toggle(&self) -> Theme {
        let theme = self.current().toggled();
        self.set(theme);
        theme
    }

    /// Follow an OS color-scheme change unless the user chose a theme.
    pub fn system_preference_changed(&self, prefers_dark: bool) {
        if self.tx.borrow().explicit {
            debug!("Ignoring system theme change: explicit preference set");
            return;
        }
        self.publish(ThemeState {
            theme: resolve_theme(None, prefers_dark),
            explicit: false,
        });
    }

    /// Forget the user's choice and go back to the OS preference.
    pub fn clear_preference(&self, system_prefers_dark: bool) {
        self.publish(ThemeState {
            theme: resolve_theme(None, system_prefers_dark),
            explicit: false,
        });
    }

    fn publish(&self, next: ThemeState) {
        self.tx.send_if_modified(|state| {
            if *state == next {
                false
            } else {
                *state = next;
                true
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Resolution Tests ====================

    #[test]
    fn test_stored_preference_wins() {
        assert_eq!(resolve_theme(Some("dark"), false), Theme::Dark);
        assert_eq!(resolve_theme(Some("light"), true), Theme::Light);
    }

    #[test]
    fn test_missing_or_invalid_preference_uses_system() {
        assert_eq!(resolve_theme(None, true), Theme::Dark);
        assert_eq!(resolve_theme(None, false), Theme::Light);
        assert_eq!(resolve_theme(Some("Dark"), false), Theme::Light);
        assert_eq!(resolve_theme(Some(""), true), Theme::Dark);
    }

    #[test]
    fn test_theme_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        let parsed: Theme = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(parsed, Theme::Light);
    }

    #[test]
    fn test_toggled() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }

    // ==================== Context Tests ====================

    #[test]
    fn test_context_initial_state() {
        let stored = ThemeContext::new(Some("dark"), false);
        assert!(stored.is_dark());
        assert_eq!(stored.stored_preference(), Some("dark"));

        let system = ThemeContext::new(None, true);
        assert!(system.is_dark());
        assert_eq!(system.stored_preference(), None);
    }

    #[test]
    fn test_system_change_followed_only_without_explicit_choice() {
        let context = ThemeContext::new(None, false);
        context.system_preference_changed(true);
        assert_eq!(context.current(), Theme::Dark);

        context.set(Theme::Light);
        context.system_preference_changed(true);
        assert_eq!(context.current(), Theme::Light);
    }

    #[test]
    fn test_clear_preference_returns_to_system() {
        let context = ThemeContext::new(Some("light"), true);
        context.clear_preference(true);

        assert_eq!(context.current(), Theme::Dark);
        assert_eq!(context.stored_preference(), None);
    }

    #[tokio::test]
    async fn test_subscribers_share_one_source() {
        let context = ThemeContext::new(None, false);
        let mut navbar = context.subscribe();
        let mut card = context.subscribe();

        assert_eq!(context.toggle(), Theme::Dark);

        navbar.changed().await.expect("sender alive");
        card.changed().await.expect("sender alive");
        assert_eq!(navbar.borrow().theme, Theme::Dark);
        assert!(card.borrow().explicit);
    }

    #[tokio::test]
    async fn test_unchanged_value_does_not_notify() {
        let context = ThemeContext::new(Some("dark"), false);
        let rx = context.subscribe();

        context.set(Theme::Dark);

        assert!(!rx.has_changed().expect("sender alive"));
    }
}
