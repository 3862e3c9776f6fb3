pub mod events;
pub mod manager;

pub use events::QueueEvent;
pub use manager::{validate_url, ItemStatus, QueueItem, QueueManager};
