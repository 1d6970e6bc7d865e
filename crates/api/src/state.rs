use std::sync::Arc;

use dogbreed_core::storage::ImageStore;
use dogbreed_db::DogStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; every field is behind an `Arc`. Handlers hold no
/// other state between requests.
#[derive(Clone)]
pub struct AppState {
    /// Dog record storage.
    pub dogs: Arc<dyn DogStore>,
    /// Uploaded image storage.
    pub images: Arc<dyn ImageStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
