//! In-memory preference store

use async_trait::async_trait;
use mdh_types::{HotkeyPreference, Preferences, HOTKEY_KEY, MAIN_CSS_KEY, SYNTAX_CSS_KEY};
use parking_lot::RwLock;

use crate::error::StoreError;
use crate::ports::OptionsStore;

/// Stylesheet applied to rendered output unless the user overrides it.
pub const DEFAULT_MAIN_CSS: &str = ".markdown-here-wrapper { font-size: 1em; line-height: 1.2; }\n";

/// Syntax highlighting stylesheet used unless the user overrides it.
pub const DEFAULT_SYNTAX_CSS: &str = ".hljs { display: block; overflow-x: auto; padding: 0.5em; }\n";

/// Default preference set.
pub fn default_preferences() -> Preferences {
    Preferences::new()
        .with(MAIN_CSS_KEY, DEFAULT_MAIN_CSS)
        .with(SYNTAX_CSS_KEY, DEFAULT_SYNTAX_CSS)
        .with(
            HOTKEY_KEY,
            HotkeyPreference {
                shift_key: false,
                ctrl_key: true,
                alt_key: true,
                key: "M".into(),
            },
        )
}

/// Defaults plus a user overlay. Removing a key reverts it to its default.
pub struct InMemoryOptionsStore {
    defaults: Preferences,
    overlay: RwLock<Preferences>,
}

impl InMemoryOptionsStore {
    pub fn new() -> Self {
        Self::with_defaults(default_preferences())
    }

    pub fn with_defaults(defaults: Preferences) -> Self {
        Self {
            defaults,
            overlay: RwLock::new(Preferences::new()),
        }
    }

    /// Seed the overlay.
    #[must_use]
    pub fn with_overlay(self, overlay: Preferences) -> Self {
        *self.overlay.write() = overlay;
        self
    }

    fn snapshot(&self) -> Preferences {
        let mut prefs = self.defaults.clone();
        prefs.merge(self.overlay.read().clone());
        prefs
    }
}

impl Default for InMemoryOptionsStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OptionsStore for InMemoryOptionsStore {
    async fn get(&self) -> Result<Preferences, StoreError> {
        Ok(self.snapshot())
    }

    async fn set(&self, options: Preferences) -> Result<(), StoreError> {
        self.overlay.write().merge(options);
        Ok(())
    }

    async fn remove(&self, keys: &[String]) -> Result<(), StoreError> {
        let mut overlay = self.overlay.write();
        for key in keys {
            overlay.remove(key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_defaults_include_hotkey() {
        let store = InMemoryOptionsStore::new();
        let prefs = store.get().await.unwrap();
        let hotkey = prefs.hotkey().unwrap();
        assert!(hotkey.ctrl_key && hotkey.alt_key && !hotkey.shift_key);
        assert_eq!(hotkey.key, "M");
        assert_eq!(prefs.main_css(), DEFAULT_MAIN_CSS);
    }

    #[tokio::test]
    async fn test_set_then_remove_reverts_to_default() {
        let store = InMemoryOptionsStore::new();
        store
            .set(Preferences::new().with(MAIN_CSS_KEY, "A").with("extra", 1))
            .await
            .unwrap();
        let prefs = store.get().await.unwrap();
        assert_eq!(prefs.main_css(), "A");
        assert_eq!(prefs.get("extra"), Some(&json!(1)));

        store
            .remove(&[MAIN_CSS_KEY.to_string(), "extra".to_string()])
            .await
            .unwrap();
        let prefs = store.get().await.unwrap();
        assert_eq!(prefs.main_css(), DEFAULT_MAIN_CSS);
        assert!(prefs.get("extra").is_none());
    }

    #[test]
    fn test_overlay_seed() {
        let store = InMemoryOptionsStore::new().with_overlay(Preferences::new().with(SYNTAX_CSS_KEY, "B"));
        let prefs = tokio_test::block_on(store.get()).unwrap();
        assert_eq!(prefs.syntax_css(), "B");
    }
}
