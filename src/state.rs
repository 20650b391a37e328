//! Shared application state.

use std::sync::Arc;

use crate::application::services::UrlService;
use crate::config::ShortenerConfig;
use crate::domain::repositories::UrlRepository;

/// Backend behind the [`UrlRepository`] in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Postgres,
    InMemory,
}

impl StorageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKind::Postgres => "postgres",
            StorageKind::InMemory => "in-memory",
        }
    }
}

/// State injected into every handler.
///
/// Cheap to clone: the service sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService>,
    pub storage: StorageKind,
}

impl AppState {
    /// Wires the service graph on top of `repository`.
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        storage: StorageKind,
        config: &ShortenerConfig,
    ) -> Self {
        Self {
            url_service: Arc::new(UrlService::new(repository, config)),
            storage,
        }
    }
}
