// Shared state structs to avoid circular dependencies.
// These are used by main.rs and can be tested independently.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, RwLock};
use serde::{Deserialize, Serialize};

use crate::config::{NavigationConfig, Variant};
use crate::error::ConfigError;
use crate::modules::clock::MissionClock;
use crate::modules::forms::ContactForm;
use crate::modules::keys::KeyMap;
use crate::modules::navigation::NavigationController;
use crate::modules::scheduler::ScheduledTask;
use crate::modules::scroll::ScrollSpy;
use crate::modules::terminal::Terminal;
use crate::settings::Preferences;

/// A navigable section of the page.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(from = "RawView")]
pub struct View {
    pub id: String,
    pub title: String,
    /// Element id (or href) the page uses for this view.
    pub anchor: String,
}

#[derive(Deserialize)]
struct RawView {
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    anchor: Option<String>,
}

impl From<RawView> for View {
    fn from(raw: RawView) -> Self {
        View {
            title: raw.title.unwrap_or_else(|| raw.id.clone()),
            anchor: raw.anchor.unwrap_or_else(|| raw.id.clone()),
            id: raw.id,
        }
    }
}

impl View {
    pub fn new(id: &str, title: &str, anchor: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            anchor: anchor.to_string(),
        }
    }
}

/// An open tab. Tabs are unique per view, so the tab id is the view id.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Tab {
    pub id: String,
    pub title: String,
}

impl From<&View> for Tab {
    fn from(view: &View) -> Self {
        Tab {
            id: view.id.clone(),
            title: view.title.clone(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClosedTab {
    pub id: String,
    pub title: String,
    pub closed_at: String,
}

impl From<&Tab> for ClosedTab {
    fn from(tab: &Tab) -> Self {
        ClosedTab {
            id: tab.id.clone(),
            title: tab.title.clone(),
            closed_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Process-wide handle built once at startup and shared with whatever
/// binds the UI (the Tauri shell, or tests).
pub struct AppState {
    pub config: NavigationConfig,
    pub navigation: Arc<Mutex<NavigationController>>,
    pub sidebar: Option<Arc<Mutex<NavigationController>>>,
    pub sidebar_visible: Arc<Mutex<bool>>,
    pub terminal: Arc<Mutex<Terminal>>,
    pub scroll: Arc<Mutex<ScrollSpy>>,
    pub keys: KeyMap,
    pub closed_tabs: Arc<Mutex<VecDeque<ClosedTab>>>,
    pub preferences: Arc<RwLock<Preferences>>,
    pub contact: Arc<Mutex<ContactForm>>,
    pub clock: MissionClock,
    /// Running clock ticker; dropping it stops the tick.
    pub clock_ticker: Arc<Mutex<Option<ScheduledTask>>>,
}

impl AppState {
    pub fn new(config: NavigationConfig, preferences: Preferences) -> Result<Self, ConfigError> {
        let navigation = NavigationController::new(&config)?;
        let contact_view = config
            .views
            .iter()
            .find(|v| v.id.starts_with("contact"))
            .map(|v| v.id.clone());
        let sidebar = match config.panel_config() {
            Some(panels) => Some(Arc::new(Mutex::new(NavigationController::new(&panels)?))),
            None => None,
        };

        Ok(AppState {
            navigation: Arc::new(Mutex::new(navigation)),
            sidebar,
            sidebar_visible: Arc::new(Mutex::new(true)),
            terminal: Arc::new(Mutex::new(Terminal::new(&config))),
            scroll: Arc::new(Mutex::new(ScrollSpy::new(config.scroll_threshold))),
            keys: KeyMap::new(&config),
            closed_tabs: Arc::new(Mutex::new(VecDeque::new())),
            preferences: Arc::new(RwLock::new(preferences)),
            contact: Arc::new(Mutex::new(ContactForm::new(contact_view))),
            clock: MissionClock::start(),
            clock_ticker: Arc::new(Mutex::new(None)),
            config,
        })
    }

    /// The terminal page prints form progress into its own output; other
    /// pages only get the status event.
    pub fn form_status_terminal(&self) -> Option<Arc<Mutex<Terminal>>> {
        (self.config.variant == Variant::Terminal).then(|| self.terminal.clone())
    }

    /// Flips sidebar visibility and returns the new value.
    pub fn toggle_sidebar(&self) -> bool {
        let mut visible = self.sidebar_visible.lock().expect("sidebar lock poisoned");
        *visible = !*visible;
        *visible
    }
}
