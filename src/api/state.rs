use std::sync::Arc;

use crate::config::Config;
use crate::services::{MovieProvider, RapidApiProvider};

/// Shared application state
///
/// Cheap to clone; handed to every handler by axum.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn MovieProvider>,
}

impl AppState {
    /// Creates application state backed by the RapidAPI provider
    pub fn new(config: &Config) -> Self {
        Self {
            provider: Arc::new(RapidApiProvider::new(config)),
        }
    }
}
