use log::{info, warn};

use crate::state::{AppState, ClosedTab, Tab};

const MAX_CLOSED_TABS: usize = 25;

/// Archives a tab to the closed tabs stack
pub fn archive_tab(state: &AppState, tab: &Tab) {
    let closed_tab = ClosedTab::from(tab);
    let Ok(mut closed) = state.closed_tabs.lock() else {
        warn!("[ClosedTabs] Stack lock poisoned, dropping '{}'", tab.id);
        return;
    };

    closed.push_back(closed_tab);

    // Oldest entries fall off first
    if closed.len() > MAX_CLOSED_TABS {
        closed.pop_front();
    }

    info!("[ClosedTabs] Archived tab '{}'", tab.id);
}

/// Retrieves last closed tab (LIFO)
pub fn pop_closed_tab(state: &AppState) -> Option<ClosedTab> {
    let tab = state.closed_tabs.lock().ok()?.pop_back();

    if let Some(ref t) = tab {
        info!("[ClosedTabs] Restored tab '{}'", t.id);
    }

    tab
}

/// Closes a tab through the controller and archives it.
/// Returns the closed tab, or None when `tab_id` is not open.
pub fn close_and_archive(state: &AppState, tab_id: &str) -> Result<Option<Tab>, String> {
    let closed = {
        let mut nav = state.navigation.lock().map_err(|e| e.to_string())?;
        nav.close_tab(tab_id)
    };
    let tab = match closed {
        Ok(tab) => tab,
        Err(e) => {
            warn!("[ClosedTabs] {}", e);
            return Ok(None);
        }
    };

    if let Ok(mut contact) = state.contact.lock() {
        contact.abandon_if_owned_by(&tab.id);
    }
    archive_tab(state, &tab);
    Ok(Some(tab))
}

/// Pops the most recently closed tab and opens it again.
/// Returns the reopened tab id, or None when the stack is empty.
pub fn reopen_last(state: &AppState) -> Result<Option<String>, String> {
    let Some(closed) = pop_closed_tab(state) else {
        return Ok(None);
    };
    let mut nav = state.navigation.lock().map_err(|e| e.to_string())?;
    match nav.open_tab(&closed.id) {
        Ok(()) => Ok(Some(closed.id)),
        Err(e) => {
            warn!("[ClosedTabs] Could not reopen '{}': {}", closed.id, e);
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{NavigationConfig, Variant};
    use crate::settings::Preferences;

    fn state() -> AppState {
        AppState::new(NavigationConfig::preset(Variant::Portfolio), Preferences::default()).unwrap()
    }

    fn closed_count(state: &AppState) -> usize {
        state.closed_tabs.lock().unwrap().len()
    }

    fn tab(id: &str) -> Tab {
        Tab {
            id: id.to_string(),
            title: id.to_string(),
        }
    }

    #[test]
    fn archive_then_pop_is_lifo() {
        let state = state();
        archive_tab(&state, &tab("about"));
        archive_tab(&state, &tab("skills"));

        assert_eq!(closed_count(&state), 2);
        assert_eq!(pop_closed_tab(&state).unwrap().id, "skills");
        assert_eq!(pop_closed_tab(&state).unwrap().id, "about");
        assert!(pop_closed_tab(&state).is_none());
    }

    #[test]
    fn stack_is_bounded() {
        let state = state();
        for i in 0..(MAX_CLOSED_TABS + 5) {
            archive_tab(&state, &tab(&format!("t{}", i)));
        }
        assert_eq!(closed_count(&state), MAX_CLOSED_TABS);

        // The five oldest were evicted.
        let oldest = state.closed_tabs.lock().unwrap().front().unwrap().id.clone();
        assert_eq!(oldest, "t5");
    }

    #[test]
    fn close_and_reopen_round_trip() {
        let state = state();
        {
            let mut nav = state.navigation.lock().unwrap();
            nav.open_tab("about").unwrap();
            nav.open_tab("projects").unwrap();
        }

        let closed = close_and_archive(&state, "projects").unwrap();
        assert_eq!(closed.map(|t| t.id).as_deref(), Some("projects"));
        assert_eq!(state.navigation.lock().unwrap().active_view(), "about");

        assert_eq!(reopen_last(&state).unwrap().as_deref(), Some("projects"));
        let nav = state.navigation.lock().unwrap();
        assert_eq!(nav.active_tab(), Some("projects"));
        assert_eq!(nav.tabs().len(), 2);
    }

    #[test]
    fn closing_unknown_tab_archives_nothing() {
        let state = state();
        assert_eq!(close_and_archive(&state, "ghost"), Ok(None));
        assert_eq!(closed_count(&state), 0);
        assert_eq!(reopen_last(&state), Ok(None));
    }

    #[test]
    fn poisoned_navigation_lock_is_an_error() {
        let state = state();
        {
            let mut nav = state.navigation.lock().unwrap();
            nav.open_tab("about").unwrap();
        }
        let navigation = state.navigation.clone();
        let _ = std::thread::spawn(move || {
            let _guard = navigation.lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert!(close_and_archive(&state, "about").is_err());
        archive_tab(&state, &tab("about"));
        assert!(reopen_last(&state).is_err());
    }
}
