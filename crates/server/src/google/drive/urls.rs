//! Drive URL parsing and normalization.
//!
//! Drive hands out several URL shapes for the same file; only the thumbnail
//! service embeds reliably in `<img>` tags. These helpers extract the file
//! id from any known shape and rewrite Drive URLs to the thumbnail form.
//! Non-Drive URLs pass through untouched - they are treated as external,
//! unmanaged images.

use std::sync::LazyLock;

use regex::Regex;

/// Known Drive URL shapes carrying a file id.
static FILE_ID_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // uc?id=FILE_ID or uc?export=view&id=FILE_ID
        r"[?&]id=([a-zA-Z0-9_-]+)",
        // /d/FILE_ID
        r"/d/([a-zA-Z0-9_-]+)",
        // /file/d/FILE_ID
        r"/file/d/([a-zA-Z0-9_-]+)",
        // thumbnail?id=FILE_ID
        r"/thumbnail\?id=([a-zA-Z0-9_-]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid file id pattern"))
    .collect()
});

/// The thumbnail-service URL for a file id.
#[must_use]
pub fn thumbnail_url(file_id: &str) -> String {
    format!("https://drive.google.com/thumbnail?id={file_id}&sz=w1000")
}

/// Extract the Drive file id from a URL, if it matches a known shape.
#[must_use]
pub fn extract_file_id(url: &str) -> Option<String> {
    if url.is_empty() {
        return None;
    }
    FILE_ID_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Rewrite a Drive URL to the thumbnail form; other URLs pass through.
///
/// Idempotent: thumbnail URLs are returned as-is.
#[must_use]
pub fn normalize_image_url(url: &str) -> String {
    if url.contains("drive.google.com/thumbnail") {
        return url.to_string();
    }
    match extract_file_id(url) {
        Some(file_id) if url.contains("drive.google.com") => thumbnail_url(&file_id),
        _ => url.to_string(),
    }
}
