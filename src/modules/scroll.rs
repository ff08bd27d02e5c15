// Scroll-linked activation (scroll spy).
// The page reports section offsets whenever layout changes and the raw
// scroll position on every tick; no debouncing, each sample is O(sections).

use log::debug;
use serde::{Deserialize, Serialize};

use crate::modules::navigation::NavigationController;

/// Past this many pixels the header switches to its sticky style.
pub const STICKY_HEADER_OFFSET: f64 = 100.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SectionBounds {
    pub view_id: String,
    pub top: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScrollSample {
    /// Section under the threshold line, if any.
    pub current: Option<String>,
    /// Whether the sample activated a different view.
    pub changed: bool,
    pub sticky_header: bool,
}

#[derive(Debug, Clone)]
pub struct ScrollSpy {
    threshold: f64,
    sections: Vec<SectionBounds>,
}

impl ScrollSpy {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            sections: Vec::new(),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Replaces the measured layout. Sections are kept in document order.
    pub fn set_sections(&mut self, mut sections: Vec<SectionBounds>) {
        sections.sort_by(|a, b| a.top.total_cmp(&b.top));
        self.sections = sections;
    }

    pub fn sections(&self) -> &[SectionBounds] {
        &self.sections
    }

    /// The last section whose top, raised by the threshold, is at or above
    /// the scroll position.
    pub fn current_section(&self, scroll_y: f64) -> Option<&str> {
        self.sections
            .iter()
            .take_while(|s| s.top - self.threshold <= scroll_y)
            .last()
            .map(|s| s.view_id.as_str())
    }

    /// Samples one scroll position and activates the matching section when
    /// it differs from the active view.
    pub fn sample(&self, scroll_y: f64, nav: &mut NavigationController) -> ScrollSample {
        let current = self.current_section(scroll_y).map(str::to_string);
        let mut changed = false;

        if let Some(id) = current.as_deref() {
            if !nav.is_active(id) && nav.activate(id).is_ok() {
                debug!("[Scroll] y={} -> '{}'", scroll_y, id);
                changed = true;
            }
        }

        ScrollSample {
            current,
            changed,
            sticky_header: scroll_y > STICKY_HEADER_OFFSET,
        }
    }
}
