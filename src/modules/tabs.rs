// Tab reordering module - pure logic.
// The drag-and-drop strip sends the full id order it wants; the controller
// applies it through reorder_logic.

use crate::state::Tab;
use std::collections::HashMap;

/// Pure logic for reordering tabs.
/// Returns true if the order changed, false otherwise.
///
/// Algorithm:
/// 1. Map existing tabs by ID for O(1) lookup
/// 2. Rebuild vector based on new_order (unknown and repeated ids are skipped)
/// 3. Append tabs missing from new_order in their previous relative order
pub fn reorder_logic(tabs: &mut Vec<Tab>, new_order: &[String]) -> bool {
    if tabs.is_empty() || new_order.is_empty() {
        return false;
    }

    let old_order: Vec<String> = tabs.iter().map(|t| t.id.clone()).collect();

    let mut tab_map: HashMap<String, Tab> = tabs.drain(..).map(|t| (t.id.clone(), t)).collect();

    let mut reordered = Vec::with_capacity(old_order.len());
    for id in new_order {
        if let Some(tab) = tab_map.remove(id) {
            reordered.push(tab);
        }
    }

    // Leftovers keep the order they had before, not HashMap order.
    for id in &old_order {
        if let Some(tab) = tab_map.remove(id) {
            reordered.push(tab);
        }
    }

    let changed = reordered.iter().map(|t| &t.id).ne(old_order.iter());

    *tabs = reordered;

    changed
}
