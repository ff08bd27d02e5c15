// Portfolio Shell Library Entry Point
// The navigation core builds without Tauri; the desktop shell is behind the
// `desktop` feature.

pub mod config;
pub mod error;
pub mod settings;

// Shared state
pub mod state;

// Pure logic modules (no Tauri imports)
pub mod modules;

#[cfg(feature = "desktop")]
pub mod commands;

#[cfg(feature = "desktop")]
use std::path::PathBuf;

#[cfg(feature = "desktop")]
use crate::config::{NavigationConfig, Variant};

/// Picks the page layout: a JSON file from `PORTFOLIO_CONFIG`, else the preset
/// named by `PORTFOLIO_VARIANT`, else the plain portfolio.
#[cfg(feature = "desktop")]
fn startup_config() -> NavigationConfig {
    if let Ok(path) = std::env::var("PORTFOLIO_CONFIG") {
        match NavigationConfig::load(&PathBuf::from(&path)) {
            Ok(config) => return config,
            Err(e) => log::error!("[Config] {}: {}, falling back to preset", path, e),
        }
    }

    let variant = std::env::var("PORTFOLIO_VARIANT")
        .ok()
        .and_then(|v| match v.parse::<Variant>() {
            Ok(variant) => Some(variant),
            Err(e) => {
                log::warn!("[Config] {}", e);
                None
            }
        })
        .unwrap_or_default();
    NavigationConfig::preset(variant)
}

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use tauri::Manager;

    use crate::settings::Preferences;
    use crate::state::AppState;

    tauri::Builder::default()
        .setup(|app| {
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }

            let prefs = match Preferences::get_path(app.handle()) {
                Ok(path) => Preferences::load(&path),
                Err(e) => {
                    log::warn!("[Preferences] No app data dir: {}", e);
                    Preferences::default()
                }
            };

            let state = AppState::new(startup_config(), prefs)?;
            commands::bind(app.handle(), &state);
            app.manage(state);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::get_navigation,
            commands::activate_view,
            commands::open_tab,
            commands::close_tab,
            commands::switch_tab,
            commands::reopen_closed_tab,
            commands::reorder_tabs,
            commands::follow_link,
            commands::select_panel,
            commands::run_command,
            commands::set_layout,
            commands::scroll_to,
            commands::key_pressed,
            commands::toggle_theme,
            commands::get_preferences,
            commands::submit_contact,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
