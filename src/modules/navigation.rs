// Pure navigation logic - no Tauri imports allowed.
// Owns which view is active and which tabs are open. Rendering lives behind
// NavigationListener so this can be unit tested without a page.

use log::{debug, warn};
use serde::Serialize;

use crate::config::NavigationConfig;
use crate::error::{ConfigError, NavError};
use crate::modules::tabs::reorder_logic;
use crate::state::{Tab, View};

/// Observer for completed transitions.
///
/// Callbacks run after the controller has finished updating its own state,
/// so a listener never sees a half-applied transition.
pub trait NavigationListener: Send {
    /// Called exactly once per completed activation, including when the
    /// view was already active.
    fn on_active_view_changed(&mut self, view_id: &str);

    /// Called whenever the tab order or the active tab changed.
    fn on_tabs_changed(&mut self, _tabs: &[Tab], _active_tab: Option<&str>) {}
}

impl<F> NavigationListener for F
where
    F: FnMut(&str) + Send,
{
    fn on_active_view_changed(&mut self, view_id: &str) {
        self(view_id)
    }
}

/// Serializable projection handed to the UI layer.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NavigationSnapshot {
    pub active_view: String,
    pub tabs: Vec<Tab>,
    pub active_tab: Option<String>,
}

pub struct NavigationController {
    views: Vec<View>,
    default_view: String,
    active_view: String,
    tabs: Vec<Tab>,
    active_tab: Option<String>,
    listeners: Vec<Box<dyn NavigationListener>>,
}

impl NavigationController {
    /// Builds a controller positioned on the config's default view.
    /// Rejects configs that would leave no view active.
    pub fn new(config: &NavigationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            views: config.views.clone(),
            default_view: config.default_view.clone(),
            active_view: config.default_view.clone(),
            tabs: Vec::new(),
            active_tab: None,
            listeners: Vec::new(),
        })
    }

    pub fn add_listener<L>(&mut self, listener: L)
    where
        L: NavigationListener + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn views(&self) -> &[View] {
        &self.views
    }

    pub fn view(&self, view_id: &str) -> Option<&View> {
        self.views.iter().find(|v| v.id == view_id)
    }

    pub fn default_view(&self) -> &str {
        &self.default_view
    }

    pub fn active_view(&self) -> &str {
        &self.active_view
    }

    pub fn is_active(&self, view_id: &str) -> bool {
        self.active_view == view_id
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn active_tab(&self) -> Option<&str> {
        self.active_tab.as_deref()
    }

    pub fn has_tab(&self, tab_id: &str) -> bool {
        self.tabs.iter().any(|t| t.id == tab_id)
    }

    pub fn snapshot(&self) -> NavigationSnapshot {
        NavigationSnapshot {
            active_view: self.active_view.clone(),
            tabs: self.tabs.clone(),
            active_tab: self.active_tab.clone(),
        }
    }

    /// Makes `view_id` the active view. If the view has an open tab that tab
    /// becomes the active tab, otherwise no tab is active.
    pub fn activate(&mut self, view_id: &str) -> Result<(), NavError> {
        if self.view(view_id).is_none() {
            warn!("[Navigation] Ignoring activate of unknown view '{}'", view_id);
            return Err(NavError::UnknownView(view_id.to_string()));
        }

        let previous_tab = self.active_tab.clone();
        self.apply_activation(view_id);

        self.notify_view();
        if previous_tab != self.active_tab {
            self.notify_tabs();
        }
        Ok(())
    }

    /// Opens (or re-focuses) the tab for `view_id` and activates it.
    pub fn open_tab(&mut self, view_id: &str) -> Result<(), NavError> {
        let Some(view) = self.view(view_id) else {
            warn!("[Navigation] Ignoring open of unknown view '{}'", view_id);
            return Err(NavError::UnknownView(view_id.to_string()));
        };

        if !self.has_tab(view_id) {
            let tab = Tab::from(view);
            debug!("[Navigation] Opening tab '{}'", tab.id);
            self.tabs.push(tab);
        }

        self.apply_activation(view_id);
        self.notify_view();
        self.notify_tabs();
        Ok(())
    }

    /// Focuses an existing tab.
    pub fn switch_tab(&mut self, tab_id: &str) -> Result<(), NavError> {
        if !self.has_tab(tab_id) {
            warn!("[Navigation] Ignoring switch to unknown tab '{}'", tab_id);
            return Err(NavError::UnknownTab(tab_id.to_string()));
        }

        self.apply_activation(tab_id);
        self.notify_view();
        self.notify_tabs();
        Ok(())
    }

    /// Closes a tab and returns it. Closing the active tab focuses the tab
    /// now last in the order, or the default view when none remain.
    pub fn close_tab(&mut self, tab_id: &str) -> Result<Tab, NavError> {
        let Some(pos) = self.tabs.iter().position(|t| t.id == tab_id) else {
            warn!("[Navigation] Ignoring close of unknown tab '{}'", tab_id);
            return Err(NavError::UnknownTab(tab_id.to_string()));
        };

        let removed = self.tabs.remove(pos);
        let was_active = self.active_tab.as_deref() == Some(tab_id);
        debug!("[Navigation] Closed tab '{}' (active: {})", removed.id, was_active);

        if was_active {
            let next = self
                .tabs
                .last()
                .map(|t| t.id.clone())
                .unwrap_or_else(|| self.default_view.clone());
            self.apply_activation(&next);
            self.notify_view();
        }
        self.notify_tabs();
        Ok(removed)
    }

    /// Reorders tabs by id. Returns true if the order changed.
    pub fn reorder_tabs(&mut self, new_order: &[String]) -> bool {
        let changed = reorder_logic(&mut self.tabs, new_order);
        if changed {
            self.notify_tabs();
        }
        changed
    }

    // Callers have already checked that `view_id` is configured.
    fn apply_activation(&mut self, view_id: &str) {
        self.active_view = view_id.to_string();
        self.active_tab = if self.has_tab(view_id) {
            Some(view_id.to_string())
        } else {
            None
        };
    }

    fn notify_view(&mut self) {
        let active = self.active_view.clone();
        for listener in self.listeners.iter_mut() {
            listener.on_active_view_changed(&active);
        }
    }

    fn notify_tabs(&mut self) {
        let tabs = self.tabs.clone();
        let active = self.active_tab.clone();
        for listener in self.listeners.iter_mut() {
            listener.on_tabs_changed(&tabs, active.as_deref());
        }
    }
}
