//! GUI components

pub mod log_panel;
pub mod progress_bar;
pub mod queue_row;
pub mod url_input;

// Re-export for convenience
pub use log_panel::{log_panel, log_scroll_id};
pub use progress_bar::{overall_caption, progress_bar};
pub use queue_row::{queue_header, queue_row};
pub use url_input::url_input;
