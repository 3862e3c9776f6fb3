//! Clipboard access for the URL field

use arboard::Clipboard;

/// Get clipboard content
pub fn get_clipboard_content() -> Result<String, String> {
    let mut clipboard =
        Clipboard::new().map_err(|e| format!("Failed to access clipboard: {}", e))?;

    clipboard
        .get_text()
        .map_err(|e| format!("Failed to read clipboard: {}", e))
}

/// Collapse pasted text to a single line of whitespace separated URLs
pub fn flatten_urls(content: &str) -> String {
    content.split_whitespace().collect::<Vec<_>>().join(" ")
}
