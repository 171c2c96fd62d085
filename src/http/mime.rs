//! MIME type table
//!
//! Maps file extensions to Content-Type values. The table is built once
//! at startup and passed by reference, so no process-wide registry is
//! mutated.

use std::collections::HashMap;
use std::path::Path;

const FALLBACK: &str = "application/octet-stream";

/// Built-in extension mappings. `.js` and `.mjs` map to
/// `application/javascript` so browsers accept them as ES modules
/// regardless of the platform MIME database.
static BUILTIN: &[(&[&str], &str)] = &[
    // Text
    (&["html", "htm"], "text/html"),
    (&["css"], "text/css"),
    (&["txt", "md"], "text/plain"),
    (&["xml"], "application/xml"),
    // JavaScript/WASM
    (&["js", "mjs"], "application/javascript"),
    (&["json"], "application/json"),
    (&["wasm"], "application/wasm"),
    // Images
    (&["png"], "image/png"),
    (&["jpg", "jpeg"], "image/jpeg"),
    (&["gif"], "image/gif"),
    (&["svg"], "image/svg+xml"),
    (&["ico"], "image/x-icon"),
    (&["webp"], "image/webp"),
    // Video
    (&["mp4"], "video/mp4"),
    (&["webm"], "video/webm"),
    (&["ogg", "ogv"], "video/ogg"),
    (&["mov"], "video/quicktime"),
    (&["avi"], "video/x-msvideo"),
    // Audio
    (&["mp3"], "audio/mpeg"),
    (&["wav"], "audio/wav"),
    (&["flac"], "audio/flac"),
    (&["m4a"], "audio/mp4"),
    // Fonts
    (&["woff"], "font/woff"),
    (&["woff2"], "font/woff2"),
    (&["ttf"], "font/ttf"),
    (&["otf"], "font/otf"),
    (&["eot"], "application/vnd.ms-fontobject"),
    // Documents
    (&["pdf"], "application/pdf"),
    (&["zip"], "application/zip"),
    (&["gz", "gzip"], "application/gzip"),
    (&["tar"], "application/x-tar"),
];

/// Extension to Content-Type lookup table
pub struct MimeTable {
    map: HashMap<&'static str, &'static str>,
}

impl MimeTable {
    /// Build the table with the built-in mappings
    #[must_use]
    pub fn new() -> Self {
        let mut map = HashMap::new();
        for (extensions, content_type) in BUILTIN {
            for ext in *extensions {
                map.insert(*ext, *content_type);
            }
        }
        Self { map }
    }

    /// Get the Content-Type for a file extension
    ///
    /// Lookup is case-insensitive; unknown extensions fall back to
    /// `application/octet-stream`.
    #[must_use]
    pub fn lookup(&self, extension: Option<&str>) -> &'static str {
        extension
            .map(str::to_ascii_lowercase)
            .and_then(|ext| self.map.get(ext.as_str()).copied())
            .unwrap_or(FALLBACK)
    }

    /// Get the Content-Type for a path by its extension
    #[must_use]
    pub fn for_path(&self, path: &Path) -> &'static str {
        self.lookup(path.extension().and_then(|e| e.to_str()))
    }
}

impl Default for MimeTable {
    fn default() -> Self {
        Self::new()
    }
}
