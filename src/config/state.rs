// Application state module
// Holds the configuration and resolved serving root shared across connections

use std::path::PathBuf;

use super::types::Config;

/// Application state shared by all connection tasks
pub struct AppState {
    pub config: Config,
    /// Canonicalized serving root, validated at startup
    pub root: PathBuf,
}

impl AppState {
    pub const fn new(config: Config, root: PathBuf) -> Self {
        Self { config, root }
    }
}
