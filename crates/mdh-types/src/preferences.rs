//! # Preferences
//!
//! The preference store is an external collaborator with opaque values, so
//! preferences travel as a string-keyed JSON object. A few keys are read by
//! the bridge components and get typed accessors.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Preference key for the main stylesheet.
pub const MAIN_CSS_KEY: &str = "main-css";
/// Preference key for the syntax highlighting stylesheet.
pub const SYNTAX_CSS_KEY: &str = "syntax-css";
/// Preference key for the hotkey combination.
pub const HOTKEY_KEY: &str = "hotkey";

/// A bag of user preferences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Preferences(Map<String, Value>);

impl Preferences {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Overwrite every key present in `other`.
    pub fn merge(&mut self, other: Preferences) {
        for (key, value) in other.0 {
            self.0.insert(key, value);
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Main stylesheet, empty when unset or not a string.
    #[must_use]
    pub fn main_css(&self) -> &str {
        self.string(MAIN_CSS_KEY)
    }

    /// Syntax highlighting stylesheet, empty when unset or not a string.
    #[must_use]
    pub fn syntax_css(&self) -> &str {
        self.string(SYNTAX_CSS_KEY)
    }

    /// The configured hotkey, if present and well-formed.
    #[must_use]
    pub fn hotkey(&self) -> Option<HotkeyPreference> {
        self.0
            .get(HOTKEY_KEY)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    fn string(&self, key: &str) -> &str {
        self.0.get(key).and_then(Value::as_str).unwrap_or("")
    }
}

impl From<Map<String, Value>> for Preferences {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Hotkey combination as stored in preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotkeyPreference {
    #[serde(rename = "shiftKey")]
    pub shift_key: bool,
    #[serde(rename = "ctrlKey")]
    pub ctrl_key: bool,
    #[serde(rename = "altKey")]
    pub alt_key: bool,
    pub key: String,
}

impl From<HotkeyPreference> for Value {
    fn from(hotkey: HotkeyPreference) -> Self {
        serde_json::json!({
            "shiftKey": hotkey.shift_key,
            "ctrlKey": hotkey.ctrl_key,
            "altKey": hotkey.alt_key,
            "key": hotkey.key,
        })
    }
}
