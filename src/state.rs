use crate::config::EngineConfig;
use crate::documents::DocumentBundler;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub bundler: DocumentBundler,
}

impl AppState {
    pub fn new(bundler: DocumentBundler) -> Self {
        Self { bundler }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(DocumentBundler::new(config.build_backend()))
    }
}
