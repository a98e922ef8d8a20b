//! Application state for the product catalog API.
//!
//! This module defines the shared application state that is available to all
//! request handlers.

use std::sync::Arc;

use atlas_persistence::core::ProductStorage;

use crate::config::ServerConfig;

/// Shared application state for the REST API.
///
/// # Type Parameters
///
/// * `S` - The storage backend type (must implement [`ProductStorage`])
///
/// # Example
///
/// ```rust,ignore
/// use atlas_rest::{AppState, ServerConfig};
/// use atlas_persistence::backends::postgres::PostgresBackend;
/// use std::sync::Arc;
///
/// let backend = PostgresBackend::from_env().await?;
/// let state = AppState::new(Arc::new(backend), ServerConfig::default());
/// ```
pub struct AppState<S> {
    /// The storage backend.
    storage: Arc<S>,

    /// Server configuration.
    config: Arc<ServerConfig>,
}

// Manually implement Clone since S is wrapped in Arc and doesn't need to be Clone
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: ProductStorage> AppState<S> {
    /// Creates a new AppState with the given storage and configuration.
    pub fn new(storage: Arc<S>, config: ServerConfig) -> Self {
        Self {
            storage,
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns a clone of the storage Arc.
    pub fn storage_arc(&self) -> Arc<S> {
        Arc::clone(&self.storage)
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use atlas_persistence::error::StorageResult;
    use atlas_persistence::types::{Product, ProductCreate, ProductUpdate, SearchParameter};
    use uuid::Uuid;

    // Mock storage for testing
    struct MockStorage;

    #[async_trait]
    impl ProductStorage for MockStorage {
        fn backend_name(&self) -> &'static str {
            "mock"
        }

        async fn create(&self, _product: ProductCreate) -> StorageResult<Product> {
            unimplemented!()
        }

        async fn read(&self, _id: Uuid) -> StorageResult<Option<Product>> {
            unimplemented!()
        }

        async fn update(&self, _id: Uuid, _changes: ProductUpdate) -> StorageResult<()> {
            unimplemented!()
        }

        async fn delete(&self, _id: Uuid) -> StorageResult<()> {
            unimplemented!()
        }

        async fn search(&self, _params: &SearchParameter) -> StorageResult<Vec<Product>> {
            unimplemented!()
        }
    }

    #[test]
    fn test_app_state_creation() {
        let storage = Arc::new(MockStorage);
        let config = ServerConfig::default();
        let state = AppState::new(storage, config);

        assert_eq!(state.storage().backend_name(), "mock");
        assert_eq!(state.config().port, 8080);
    }

    #[test]
    fn test_app_state_clone_shares_storage() {
        let storage = Arc::new(MockStorage);
        let state = AppState::new(storage, ServerConfig::for_testing());
        let cloned = state.clone();

        assert!(Arc::ptr_eq(&state.storage_arc(), &cloned.storage_arc()));
        assert_eq!(cloned.config().request_timeout, 5);
    }
}
