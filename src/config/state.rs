// Application state module
// Immutable per-process state shared by every connection

use std::sync::Arc;

use super::types::Config;
use crate::resolver::{ContentRoot, RootError};

/// Application state
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub root: ContentRoot,
}

impl AppState {
    /// Open the configured content root and bundle it with the config
    pub async fn new(config: Config) -> Result<Self, RootError> {
        let root = ContentRoot::open(&config.content.root).await?;
        Ok(Self { config, root })
    }

    /// Build state around an already prepared root
    pub const fn with_root(config: Config, root: ContentRoot) -> Self {
        Self { config, root }
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}
