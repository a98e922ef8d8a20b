//! Shared fixtures for the HTTP API tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use atlas_persistence::core::ProductStorage;
use atlas_persistence::error::{BackendError, ResourceError, StorageError, StorageResult};
use atlas_persistence::types::{
    EqualityValue, Filter, Product, ProductCreate, ProductUpdate, SearchParameter,
};
use axum_test::TestServer;
use serde_json::{Value, json};
use uuid::Uuid;

use atlas_rest::{AppState, ServerConfig};

/// In-memory product storage.
///
/// Search honours equality filters only and records the last parameter it
/// received so tests can check what the HTTP layer parsed.
#[derive(Default)]
pub struct MemoryStorage {
    products: Mutex<HashMap<Uuid, Product>>,
    last_search: Mutex<Option<SearchParameter>>,
}

impl MemoryStorage {
    pub fn last_search(&self) -> Option<SearchParameter> {
        self.last_search.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.products.lock().unwrap().len()
    }

    fn not_found(id: Uuid) -> StorageError {
        StorageError::Resource(ResourceError::NotFound {
            resource_type: "Product".to_string(),
            id: id.to_string(),
        })
    }
}

fn matches(product: &Product, params: &SearchParameter) -> bool {
    params.filters().iter().all(|f| match &f.filter {
        Filter::Equality(EqualityValue::Text(text)) => match f.field.name() {
            "name" => &product.name == text,
            "description" => &product.description == text,
            "consumptionLink" => &product.consumption_link == text,
            _ => true,
        },
        Filter::Equality(EqualityValue::Id(id)) => product.id == *id,
        Filter::Equality(EqualityValue::Type(t)) => product.product_type == *t,
        Filter::Equality(EqualityValue::Protocol(p)) => product.protocol == *p,
        Filter::Numeric(_) | Filter::Spatial(_) => true,
    })
}

#[async_trait]
impl ProductStorage for MemoryStorage {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(&self, product: ProductCreate) -> StorageResult<Product> {
        product.validate()?;
        let product = product.into_product(Uuid::new_v4());
        self.products
            .lock()
            .unwrap()
            .insert(product.id, product.clone());
        Ok(product)
    }

    async fn read(&self, id: Uuid) -> StorageResult<Option<Product>> {
        Ok(self.products.lock().unwrap().get(&id).cloned())
    }

    async fn update(&self, id: Uuid, changes: ProductUpdate) -> StorageResult<()> {
        changes.validate()?;
        let mut products = self.products.lock().unwrap();
        let product = products.get_mut(&id).ok_or_else(|| Self::not_found(id))?;
        changes.apply_to(product);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> StorageResult<()> {
        self.products
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(id))
    }

    async fn search(&self, params: &SearchParameter) -> StorageResult<Vec<Product>> {
        *self.last_search.lock().unwrap() = Some(params.clone());
        Ok(self
            .products
            .lock()
            .unwrap()
            .values()
            .filter(|p| matches(p, params))
            .cloned()
            .collect())
    }
}

/// Storage whose database is never reachable.
pub struct UnavailableStorage;

fn unavailable() -> StorageError {
    StorageError::Backend(BackendError::ConnectionFailed {
        backend_name: "postgres".to_string(),
        message: "connection refused".to_string(),
    })
}

#[async_trait]
impl ProductStorage for UnavailableStorage {
    fn backend_name(&self) -> &'static str {
        "unavailable"
    }

    async fn create(&self, _product: ProductCreate) -> StorageResult<Product> {
        Err(unavailable())
    }

    async fn read(&self, _id: Uuid) -> StorageResult<Option<Product>> {
        Err(unavailable())
    }

    async fn update(&self, _id: Uuid, _changes: ProductUpdate) -> StorageResult<()> {
        Err(unavailable())
    }

    async fn delete(&self, _id: Uuid) -> StorageResult<()> {
        Err(unavailable())
    }

    async fn search(&self, _params: &SearchParameter) -> StorageResult<Vec<Product>> {
        Err(unavailable())
    }

    async fn health_check(&self) -> StorageResult<()> {
        Err(unavailable())
    }
}

/// Builds a test server over shared storage.
pub fn test_server<S>(storage: Arc<S>) -> TestServer
where
    S: ProductStorage + 'static,
{
    test_server_with_config(storage, ServerConfig::for_testing())
}

/// Builds a test server over shared storage with a custom configuration.
pub fn test_server_with_config<S>(storage: Arc<S>, config: ServerConfig) -> TestServer
where
    S: ProductStorage + 'static,
{
    let state = AppState::new(storage, config.clone());
    let app = atlas_rest::routing::create_routes(state)
        .layer(axum::extract::DefaultBodyLimit::max(config.max_body_size));
    TestServer::new(app).expect("Failed to create test server")
}

/// A valid create payload.
pub fn product_payload(name: &str) -> Value {
    json!({
        "name": name,
        "description": "High resolution raster imagery",
        "boundingPolygon": {
            "type": "Polygon",
            "coordinates": [[[30, 10], [40, 40], [20, 40], [10, 20], [30, 10]]]
        },
        "consumptionLink": "https://example.com/wmts",
        "type": "raster",
        "protocol": "WMTS",
        "resolutionBest": 0.5,
        "minZoom": 5,
        "maxZoom": 15
    })
}
