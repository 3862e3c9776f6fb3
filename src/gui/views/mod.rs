//! GUI views

pub mod main_view;
pub mod settings_view;

// Re-export for convenience
pub use main_view::main_view;
pub use settings_view::settings_view;
