use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::Datastore;

/// Shared per-request context: the immutable configuration plus the
/// datastore handle. Cloned cheaply into each handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn Datastore>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn Datastore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }
}
