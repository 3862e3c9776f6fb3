//! Settings persistence

pub mod operations;
pub mod schema;

pub use operations::{DatabaseManager, APP_SETTINGS_KEY};
pub use schema::initialize_database;
