// Static navigation configuration.
// The page layer hands one of these to the controller at startup; views are
// never created at runtime.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::state::View;

pub const DEFAULT_SCROLL_THRESHOLD: f64 = 150.0;

fn default_scroll_threshold() -> f64 {
    DEFAULT_SCROLL_THRESHOLD
}

/// The page themes that ship with a built-in layout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Terminal,
    #[serde(rename = "vscode")]
    VsCode,
    Space,
    #[default]
    Portfolio,
}

impl std::str::FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "terminal" => Ok(Self::Terminal),
            "vscode" => Ok(Self::VsCode),
            "space" => Ok(Self::Space),
            "portfolio" => Ok(Self::Portfolio),
            other => Err(format!("unknown page variant: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NavigationConfig {
    /// Page theme; decides which page-specific commands and outputs apply.
    #[serde(default)]
    pub variant: Variant,
    pub views: Vec<View>,
    pub default_view: String,
    #[serde(default = "default_scroll_threshold")]
    pub scroll_threshold: f64,
    /// Terminal aliases: normalized command line -> view id.
    #[serde(default)]
    pub commands: BTreeMap<String, String>,
    /// Plain key name -> view id.
    #[serde(default)]
    pub shortcuts: BTreeMap<String, String>,
    /// Side panels (activity bar). Empty when the page has none.
    #[serde(default)]
    pub panels: Vec<View>,
    #[serde(default)]
    pub default_panel: Option<String>,
}

impl NavigationConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn contains(&self, view_id: &str) -> bool {
        self.views.iter().any(|v| v.id == view_id)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_set(&self.views, &self.default_view)?;

        let targets = self
            .commands
            .iter()
            .chain(self.shortcuts.iter());
        for (key, view) in targets {
            if !self.contains(view) {
                return Err(ConfigError::UnknownTarget {
                    source_key: key.clone(),
                    view: view.clone(),
                });
            }
        }

        if !self.panels.is_empty() {
            let default_panel = self
                .default_panel
                .clone()
                .unwrap_or_else(|| self.panels[0].id.clone());
            validate_set(&self.panels, &default_panel)?;
        }

        Ok(())
    }

    /// Side-panel configuration, if the page has an activity bar.
    pub fn panel_config(&self) -> Option<NavigationConfig> {
        let first = self.panels.first()?;
        Some(NavigationConfig {
            variant: self.variant,
            views: self.panels.clone(),
            default_view: self
                .default_panel
                .clone()
                .unwrap_or_else(|| first.id.clone()),
            scroll_threshold: self.scroll_threshold,
            commands: BTreeMap::new(),
            shortcuts: BTreeMap::new(),
            panels: Vec::new(),
            default_panel: None,
        })
    }

    pub fn preset(variant: Variant) -> Self {
        match variant {
            Variant::Terminal => Self {
                variant,
                views: vec![
                    View::new("home", "~/portfolio", "home-section"),
                    View::new("about", "about.txt", "about-section"),
                    View::new("skills", "skills/", "skills-section"),
                    View::new("projects", "projects/", "projects-section"),
                    View::new("contact", "contact", "contact-section"),
                ],
                default_view: "home".to_string(),
                scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
                commands: pairs(&[
                    ("ls", "skills"),
                    ("cat about.txt", "about"),
                    ("cd projects", "projects"),
                    ("ping contact", "contact"),
                ]),
                // The terminal page only listens for Enter in its prompt.
                shortcuts: BTreeMap::new(),
                panels: Vec::new(),
                default_panel: None,
            },
            Variant::VsCode => Self {
                variant,
                views: vec![
                    View::new("readme.md", "README.md", "readme-md-content"),
                    View::new("about.py", "about.py", "about-py-content"),
                    View::new("skills.json", "skills.json", "skills-json-content"),
                    View::new("contact.js", "contact.js", "contact-js-content"),
                ],
                default_view: "readme.md".to_string(),
                scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
                commands: BTreeMap::new(),
                shortcuts: BTreeMap::new(),
                panels: vec![
                    View::new("explorer", "Explorer", "explorer-panel"),
                    View::new("search", "Search", "search-panel"),
                    View::new("git", "Source Control", "git-panel"),
                    View::new("extensions", "Extensions", "extensions-panel"),
                ],
                default_panel: Some("explorer".to_string()),
            },
            Variant::Space => Self {
                variant,
                views: vec![
                    View::new("welcome", "Mission Control", "welcome-screen"),
                    View::new("about", "About", "about-screen"),
                    View::new("skills", "Skills", "skills-screen"),
                    View::new("projects", "Projects", "projects-screen"),
                    View::new("contact", "Contact", "contact-screen"),
                ],
                default_view: "welcome".to_string(),
                scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
                commands: BTreeMap::new(),
                shortcuts: pairs(&[("1", "about"), ("2", "skills"), ("3", "projects"), ("4", "contact")]),
                panels: Vec::new(),
                default_panel: None,
            },
            Variant::Portfolio => Self {
                variant,
                views: vec![
                    View::new("home", "Home", "home"),
                    View::new("about", "About", "about"),
                    View::new("skills", "Skills", "skills"),
                    View::new("projects", "Projects", "projects"),
                    View::new("contact", "Contact", "contact"),
                ],
                default_view: "home".to_string(),
                scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
                commands: BTreeMap::new(),
                shortcuts: BTreeMap::new(),
                panels: Vec::new(),
                default_panel: None,
            },
        }
    }
}

fn validate_set(views: &[View], default_id: &str) -> Result<(), ConfigError> {
    if views.is_empty() {
        return Err(ConfigError::Empty);
    }
    let mut seen = HashSet::new();
    for view in views {
        if !seen.insert(view.id.as_str()) {
            return Err(ConfigError::DuplicateView(view.id.clone()));
        }
    }
    if !seen.contains(default_id) {
        return Err(ConfigError::UnknownDefault(default_id.to_string()));
    }
    Ok(())
}

fn pairs(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
