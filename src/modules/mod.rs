// Module exports for pure logic
pub mod navigation;
pub mod tabs;                // Tab reordering logic
pub mod closed_tabs;         // Tab archival / reopen
pub mod links;               // href and element id -> view id
pub mod scroll;              // Scroll spy
pub mod keys;                // Keyboard shortcuts
pub mod indicators;          // Display projections of the active view
pub mod terminal;            // Command dispatcher
pub mod clock;
pub mod scheduler;           // Cancellable delayed tasks
pub mod forms;               // Contact form with simulated send
