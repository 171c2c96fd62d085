// Application state module
// Immutable per-process state shared with every connection task

use std::io;
use std::path::PathBuf;

use crate::http::mime::MimeTable;

use super::types::Config;

/// Application state: the loaded configuration, the canonical document
/// root, and the MIME table built once at startup and shared by
/// reference instead of a mutable global registry.
pub struct AppState {
    pub config: Config,
    pub root: PathBuf,
    pub mime: MimeTable,
}

impl AppState {
    /// Resolve the document root and build the MIME table.
    ///
    /// Fails if the configured root does not exist or cannot be
    /// canonicalized.
    pub fn new(config: Config) -> io::Result<Self> {
        let root = PathBuf::from(&config.server.root)
            .canonicalize()
            .map_err(|e| {
                io::Error::new(
                    e.kind(),
                    format!("document root '{}': {e}", config.server.root),
                )
            })?;

        Ok(Self {
            config,
            root,
            mime: MimeTable::new(),
        })
    }
}
