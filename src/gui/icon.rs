//! Window icon

use iced::window;
use image::GenericImageView;
use tracing::warn;

/// The application icon as embedded PNG bytes (256x256)
const ICON_BYTES: &[u8] = include_bytes!("../../assets/icons/icon_256x256.png");

/// Load the window icon; `None` leaves the platform default in place.
pub fn load_icon() -> Option<window::Icon> {
    let img = match image::load_from_memory(ICON_BYTES) {
        Ok(img) => img,
        Err(e) => {
            warn!("Failed to load application icon: {}", e);
            return None;
        }
    };

    let (width, height) = img.dimensions();
    window::icon::from_rgba(img.to_rgba8().into_raw(), width, height)
        .map_err(|e| warn!("Invalid application icon: {}", e))
        .ok()
}
