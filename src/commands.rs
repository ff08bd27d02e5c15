// Tauri command layer.
// Thin wrappers that lock AppState, call into the pure modules and push the
// result back to the webview. Unknown ids are logged and absorbed here; the
// page always gets a valid snapshot back.

use log::{info, warn};
use tauri::{AppHandle, Emitter, State};

use crate::error::NavError;
use crate::modules::clock::start_ticker;
use crate::modules::closed_tabs;
use crate::modules::forms::ContactMessage;
use crate::modules::indicators::{IndicatorGroup, IndicatorSync, StatusBar};
use crate::modules::keys::{KeyAction, KeyPress};
use crate::modules::links::resolve_anchor;
use crate::modules::navigation::{NavigationListener, NavigationSnapshot};
use crate::modules::scroll::{ScrollSample, SectionBounds};
use crate::modules::terminal::OutputLine;
use crate::settings::{Preferences, Theme};
use crate::state::{AppState, Tab};

pub const ACTIVE_VIEW_CHANGED: &str = "active-view-changed";
pub const UPDATE_TABS: &str = "update-tabs";
pub const PANEL_CHANGED: &str = "panel-changed";
pub const INDICATORS_CHANGED: &str = "indicators-changed";
pub const TERMINAL_OUTPUT: &str = "terminal-output";
pub const SIDEBAR_TOGGLED: &str = "sidebar-toggled";
pub const OPEN_PALETTE: &str = "open-palette";
pub const THEME_CHANGED: &str = "theme-changed";
pub const CONTACT_STATUS: &str = "contact-status";
pub const CLOCK_TICK: &str = "clock-tick";

/// Forwards controller notifications to the webview.
struct EventBridge {
    app: AppHandle,
    view_event: &'static str,
}

impl NavigationListener for EventBridge {
    fn on_active_view_changed(&mut self, view_id: &str) {
        let _ = self.app.emit(self.view_event, view_id);
    }

    fn on_tabs_changed(&mut self, tabs: &[Tab], active_tab: Option<&str>) {
        let _ = self.app.emit(
            UPDATE_TABS,
            serde_json::json!({
                "tabs": tabs,
                "activeTabId": active_tab
            }),
        );
    }
}

/// Wires listeners and the clock before the state is handed to Tauri.
pub fn bind(app: &AppHandle, state: &AppState) {
    if let Ok(mut nav) = state.navigation.lock() {
        nav.add_listener(EventBridge {
            app: app.clone(),
            view_event: ACTIVE_VIEW_CHANGED,
        });

        let nav_links = IndicatorGroup::new(state.config.views.iter().map(|v| v.id.clone()));
        let handle = app.clone();
        nav.add_listener(IndicatorSync::new(
            &state.config.default_view,
            vec![nav_links],
            move |groups: &[IndicatorGroup], status: &StatusBar| {
                let _ = handle.emit(
                    INDICATORS_CHANGED,
                    serde_json::json!({ "groups": groups, "status": status }),
                );
            },
        ));
    }
    if let Some(sidebar) = &state.sidebar {
        if let Ok(mut panels) = sidebar.lock() {
            panels.add_listener(EventBridge {
                app: app.clone(),
                view_event: PANEL_CHANGED,
            });
        }
    }

    // The ticker has to be created on the runtime; the state keeps it alive.
    let handle = app.clone();
    let clock = state.clock;
    let slot = state.clock_ticker.clone();
    tauri::async_runtime::spawn(async move {
        let ticker = start_ticker(clock, move |reading| {
            let _ = handle.emit(CLOCK_TICK, reading);
        });
        if let Ok(mut slot) = slot.lock() {
            *slot = Some(ticker);
        }
    });
    info!("[Shell] Bound navigation events");
}

fn absorb(result: Result<(), NavError>) {
    if let Err(e) = result {
        warn!("[Shell] {}", e);
    }
}

fn snapshot(state: &AppState) -> Result<NavigationSnapshot, String> {
    let nav = state.navigation.lock().map_err(|e| e.to_string())?;
    Ok(nav.snapshot())
}

#[tauri::command]
pub fn get_navigation(state: State<AppState>) -> Result<NavigationSnapshot, String> {
    snapshot(&state)
}

#[tauri::command]
pub fn activate_view(state: State<AppState>, view_id: String) -> Result<NavigationSnapshot, String> {
    let mut nav = state.navigation.lock().map_err(|e| e.to_string())?;
    absorb(nav.activate(&view_id));
    Ok(nav.snapshot())
}

#[tauri::command]
pub fn open_tab(state: State<AppState>, view_id: String) -> Result<NavigationSnapshot, String> {
    let mut nav = state.navigation.lock().map_err(|e| e.to_string())?;
    absorb(nav.open_tab(&view_id));
    Ok(nav.snapshot())
}

#[tauri::command]
pub fn switch_tab(state: State<AppState>, tab_id: String) -> Result<NavigationSnapshot, String> {
    let mut nav = state.navigation.lock().map_err(|e| e.to_string())?;
    absorb(nav.switch_tab(&tab_id));
    Ok(nav.snapshot())
}

#[tauri::command]
pub fn close_tab(state: State<AppState>, tab_id: String) -> Result<NavigationSnapshot, String> {
    closed_tabs::close_and_archive(&state, &tab_id)?;
    snapshot(&state)
}

#[tauri::command]
pub fn reopen_closed_tab(state: State<AppState>) -> Result<NavigationSnapshot, String> {
    if closed_tabs::reopen_last(&state)?.is_none() {
        info!("[Shell] Nothing to reopen");
    }
    snapshot(&state)
}

#[tauri::command]
pub fn reorder_tabs(state: State<AppState>, new_order: Vec<String>) -> Result<bool, String> {
    let mut nav = state.navigation.lock().map_err(|e| e.to_string())?;
    Ok(nav.reorder_tabs(&new_order))
}

#[tauri::command]
pub fn follow_link(state: State<AppState>, href: String) -> Result<NavigationSnapshot, String> {
    let mut nav = state.navigation.lock().map_err(|e| e.to_string())?;
    match resolve_anchor(&href, nav.views()) {
        Some(view_id) => absorb(nav.activate(&view_id)),
        None => warn!("[Shell] Link '{}' does not point at a view", href),
    }
    Ok(nav.snapshot())
}

#[tauri::command]
pub fn select_panel(state: State<AppState>, panel_id: String) -> Result<Option<String>, String> {
    let Some(sidebar) = &state.sidebar else {
        return Ok(None);
    };
    let mut panels = sidebar.lock().map_err(|e| e.to_string())?;
    absorb(panels.activate(&panel_id));
    Ok(Some(panels.active_view().to_string()))
}

#[tauri::command]
pub fn run_command(
    app: AppHandle,
    state: State<AppState>,
    input: String,
) -> Result<Vec<OutputLine>, String> {
    let output = {
        let mut terminal = state.terminal.lock().map_err(|e| e.to_string())?;
        let mut nav = state.navigation.lock().map_err(|e| e.to_string())?;
        terminal.dispatch(&input, &mut nav);
        terminal.output().to_vec()
    };
    let _ = app.emit(TERMINAL_OUTPUT, &output);
    Ok(output)
}

#[tauri::command]
pub fn set_layout(state: State<AppState>, sections: Vec<SectionBounds>) -> Result<(), String> {
    let mut scroll = state.scroll.lock().map_err(|e| e.to_string())?;
    scroll.set_sections(sections);
    Ok(())
}

#[tauri::command]
pub fn scroll_to(state: State<AppState>, scroll_y: f64) -> Result<ScrollSample, String> {
    let scroll = state.scroll.lock().map_err(|e| e.to_string())?;
    let mut nav = state.navigation.lock().map_err(|e| e.to_string())?;
    Ok(scroll.sample(scroll_y, &mut nav))
}

#[tauri::command]
pub fn key_pressed(
    app: AppHandle,
    state: State<AppState>,
    press: KeyPress,
) -> Result<Option<KeyAction>, String> {
    let action = {
        let mut nav = state.navigation.lock().map_err(|e| e.to_string())?;
        state.keys.apply(&press, &mut nav)
    };

    match action {
        Some(KeyAction::ToggleSidebar) => {
            let visible = state.toggle_sidebar();
            let _ = app.emit(SIDEBAR_TOGGLED, visible);
        }
        Some(KeyAction::OpenPalette) => {
            let _ = app.emit(OPEN_PALETTE, ());
        }
        _ => {}
    }
    Ok(action)
}

#[tauri::command]
pub fn toggle_theme(app: AppHandle, state: State<AppState>) -> Result<Theme, String> {
    let prefs = {
        let mut prefs = state.preferences.write().map_err(|e| e.to_string())?;
        prefs.toggle_theme();
        prefs.clone()
    };

    prefs.save_or_warn(Preferences::get_path(&app));

    let _ = app.emit(
        THEME_CHANGED,
        serde_json::json!({ "theme": prefs.theme, "icon": prefs.theme.icon() }),
    );
    Ok(prefs.theme)
}

#[tauri::command]
pub fn get_preferences(state: State<AppState>) -> Result<Preferences, String> {
    let prefs = state.preferences.read().map_err(|e| e.to_string())?;
    Ok(prefs.clone())
}

#[tauri::command]
pub async fn submit_contact(
    app: AppHandle,
    state: State<'_, AppState>,
    message: ContactMessage,
) -> Result<(), String> {
    let terminal = state.form_status_terminal();
    let mut form = state.contact.lock().map_err(|e| e.to_string())?;
    form.submit(&message, move |status| {
        if let Some(terminal) = &terminal {
            if let Ok(mut term) = terminal.lock() {
                term.print_form_status(&status);
                let _ = app.emit(TERMINAL_OUTPUT, term.output());
            }
        }
        let _ = app.emit(CONTACT_STATUS, status);
    })
    .map_err(|e| e.to_string())
}
