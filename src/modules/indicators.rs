// Navigation indicators: display-only projections of the active view.
// None of these are a source of truth; they are recomputed from whatever the
// controller reports.

use serde::Serialize;

use crate::modules::navigation::NavigationListener;
use crate::state::Tab;

/// Status bar language label for a view id, keyed by file extension.
pub fn language_for(view_id: &str) -> &'static str {
    let ext = view_id.rsplit_once('.').map(|(_, ext)| ext.to_lowercase());
    match ext.as_deref() {
        Some("md") => "Markdown",
        Some("py") => "Python",
        Some("json") => "JSON",
        Some("js") => "JavaScript",
        _ => "Plain Text",
    }
}

/// Terminal-style working directory for the active view.
pub fn terminal_path(active_view: &str, default_view: &str) -> String {
    if active_view == default_view {
        "~/portfolio".to_string()
    } else {
        format!("~/portfolio/{}", active_view)
    }
}

/// Highlight state for one group of indicators (nav links, planets, sidebar
/// items, control buttons). Every bound element is either highlighted or not.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorGroup {
    bound: Vec<String>,
    highlighted: Option<String>,
}

impl IndicatorGroup {
    pub fn new<I, S>(bound: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            bound: bound.into_iter().map(Into::into).collect(),
            highlighted: None,
        }
    }

    pub fn highlighted(&self) -> Option<&str> {
        self.highlighted.as_deref()
    }

    pub fn is_highlighted(&self, view_id: &str) -> bool {
        self.highlighted.as_deref() == Some(view_id)
    }

    /// Views without a bound element clear the highlight.
    pub fn sync(&mut self, active_view: &str) {
        self.highlighted = self
            .bound
            .iter()
            .find(|id| id.as_str() == active_view)
            .cloned();
    }
}

/// Everything the chrome shows about the current view, rebuilt on each
/// notification.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusBar {
    pub language: &'static str,
    pub encoding: &'static str,
    pub path: String,
    pub open_tabs: usize,
    pub active_tab: Option<String>,
}

impl StatusBar {
    pub fn new(default_view: &str) -> Self {
        Self {
            language: language_for(default_view),
            encoding: "UTF-8",
            path: terminal_path(default_view, default_view),
            open_tabs: 0,
            active_tab: None,
        }
    }
}

/// Listener that keeps indicator groups and the status bar in step with the
/// controller and hands both to `on_render` after every change.
pub struct IndicatorSync {
    default_view: String,
    groups: Vec<IndicatorGroup>,
    status: StatusBar,
    on_render: Box<dyn FnMut(&[IndicatorGroup], &StatusBar) + Send>,
}

impl IndicatorSync {
    pub fn new<F>(default_view: &str, groups: Vec<IndicatorGroup>, on_render: F) -> Self
    where
        F: FnMut(&[IndicatorGroup], &StatusBar) + Send + 'static,
    {
        let mut sync = Self {
            default_view: default_view.to_string(),
            groups,
            status: StatusBar::new(default_view),
            on_render: Box::new(on_render),
        };
        for group in sync.groups.iter_mut() {
            group.sync(default_view);
        }
        sync
    }

    fn render(&mut self) {
        (self.on_render)(&self.groups, &self.status);
    }
}

impl NavigationListener for IndicatorSync {
    fn on_active_view_changed(&mut self, view_id: &str) {
        for group in self.groups.iter_mut() {
            group.sync(view_id);
        }
        self.status.language = language_for(view_id);
        self.status.path = terminal_path(view_id, &self.default_view);
        self.render();
    }

    fn on_tabs_changed(&mut self, tabs: &[Tab], active_tab: Option<&str>) {
        self.status.open_tabs = tabs.len();
        self.status.active_tab = active_tab.map(str::to_string);
        self.render();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{NavigationConfig, Variant};
    use crate::modules::navigation::NavigationController;
    use rstest::rstest;
    use std::sync::{Arc, Mutex};

    #[rstest]
    #[case("readme.md", "Markdown")]
    #[case("about.py", "Python")]
    #[case("skills.json", "JSON")]
    #[case("contact.js", "JavaScript")]
    #[case("NOTES.MD", "Markdown")]
    #[case("home", "Plain Text")]
    #[case("archive.tar", "Plain Text")]
    fn test_language_for(#[case] view: &str, #[case] expected: &str) {
        assert_eq!(language_for(view), expected);
    }

    #[test]
    fn test_terminal_path() {
        assert_eq!(terminal_path("home", "home"), "~/portfolio");
        assert_eq!(terminal_path("skills", "home"), "~/portfolio/skills");
    }

    #[test]
    fn group_highlights_at_most_one() {
        let mut group = IndicatorGroup::new(["home", "about"]);
        group.sync("about");
        assert!(group.is_highlighted("about"));
        assert!(!group.is_highlighted("home"));

        group.sync("contact");
        assert_eq!(group.highlighted(), None);
    }

    #[test]
    fn sync_follows_controller() {
        let config = NavigationConfig::preset(Variant::VsCode);
        let mut nav = NavigationController::new(&config).unwrap();
        let rendered: Arc<Mutex<Vec<(Option<String>, StatusBar)>>> = Arc::default();
        let sink = rendered.clone();

        let explorer = IndicatorGroup::new(config.views.iter().map(|v| v.id.clone()));
        nav.add_listener(IndicatorSync::new(
            &config.default_view,
            vec![explorer],
            move |groups: &[IndicatorGroup], status: &StatusBar| {
                let highlighted = groups[0].highlighted().map(str::to_string);
                sink.lock().unwrap().push((highlighted, status.clone()));
            },
        ));

        nav.open_tab("about.py").unwrap();

        let frames = rendered.lock().unwrap();
        // One render for the activation, one for the tab strip.
        assert_eq!(frames.len(), 2);
        let (highlighted, status) = frames.last().unwrap();
        assert_eq!(highlighted.as_deref(), Some("about.py"));
        assert_eq!(status.language, "Python");
        assert_eq!(status.path, "~/portfolio/about.py");
        assert_eq!(status.open_tabs, 1);
        assert_eq!(status.active_tab.as_deref(), Some("about.py"));
    }
}
