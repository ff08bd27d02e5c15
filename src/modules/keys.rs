// Keyboard shortcut table.
// Plain keys come from configuration (digits jump to sections); Escape and
// the Ctrl/Cmd chords are fixed.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::NavigationConfig;
use crate::modules::navigation::NavigationController;

/// A key event as reported by the page (`KeyboardEvent.key` plus modifiers).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KeyPress {
    pub key: String,
    #[serde(default)]
    pub ctrl_key: bool,
    #[serde(default)]
    pub meta_key: bool,
}

impl KeyPress {
    pub fn plain(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ..Self::default()
        }
    }

    pub fn command(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ctrl_key: true,
            meta_key: false,
        }
    }

    fn has_command_modifier(&self) -> bool {
        self.ctrl_key || self.meta_key
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", content = "target", rename_all = "camelCase")]
pub enum KeyAction {
    Activate(String),
    ActivateDefault,
    ToggleSidebar,
    OpenPalette,
}

#[derive(Debug, Clone, Default)]
pub struct KeyMap {
    bindings: BTreeMap<String, String>,
}

impl KeyMap {
    pub fn new(config: &NavigationConfig) -> Self {
        Self {
            bindings: config.shortcuts.clone(),
        }
    }

    pub fn resolve(&self, press: &KeyPress) -> Option<KeyAction> {
        if press.has_command_modifier() {
            return match press.key.to_lowercase().as_str() {
                "b" => Some(KeyAction::ToggleSidebar),
                "p" => Some(KeyAction::OpenPalette),
                _ => None,
            };
        }

        if press.key == "Escape" {
            return Some(KeyAction::ActivateDefault);
        }

        self.bindings
            .get(&press.key)
            .map(|view| KeyAction::Activate(view.clone()))
    }

    /// Resolves a key and performs any navigation it implies. The returned
    /// action tells the caller what happened; sidebar and palette actions
    /// are left to the UI layer.
    pub fn apply(&self, press: &KeyPress, nav: &mut NavigationController) -> Option<KeyAction> {
        let action = self.resolve(press)?;
        debug!("[Keys] {:?} -> {:?}", press.key, action);

        let navigated = match &action {
            KeyAction::Activate(view) => nav.activate(view),
            KeyAction::ActivateDefault => {
                let default_view = nav.default_view().to_string();
                nav.activate(&default_view)
            }
            KeyAction::ToggleSidebar | KeyAction::OpenPalette => Ok(()),
        };

        navigated.ok().map(|_| action)
    }
}
