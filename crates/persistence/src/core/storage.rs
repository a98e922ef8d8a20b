//! Core product storage trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StorageResult;
use crate::types::{Product, ProductCreate, ProductUpdate, SearchParameter};

/// Core storage trait for product CRUD and search.
///
/// All backends implement this trait. Implementations must be safe to share
/// across request handlers; each call is an independent round trip and no
/// call holds state between invocations.
///
/// # Example
///
/// ```ignore
/// use atlas_persistence::core::ProductStorage;
/// use atlas_persistence::types::{ProductField, SearchParameter};
///
/// async fn example<S: ProductStorage>(storage: &S) -> Result<(), atlas_persistence::StorageError> {
///     let params = SearchParameter::new().with_text(ProductField::Name, "Coastline");
///     let products = storage.search(&params).await?;
///     println!("found {} products", products.len());
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait ProductStorage: Send + Sync {
    /// Returns a human-readable name for this storage backend.
    fn backend_name(&self) -> &'static str;

    /// Creates a new product and returns it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// * `StorageError::Backend` - if the insert fails
    async fn create(&self, product: ProductCreate) -> StorageResult<Product>;

    /// Reads a product by identifier.
    ///
    /// Returns `Ok(None)` if no product has the identifier.
    async fn read(&self, id: Uuid) -> StorageResult<Option<Product>>;

    /// Applies a partial update.
    ///
    /// Only the fields present in `changes` are written; all others keep
    /// their stored values. An empty update still verifies the product exists.
    ///
    /// # Errors
    ///
    /// * `StorageError::Resource(ResourceError::NotFound)` - if no product has the identifier
    async fn update(&self, id: Uuid, changes: ProductUpdate) -> StorageResult<()>;

    /// Permanently deletes a product.
    ///
    /// # Errors
    ///
    /// * `StorageError::Resource(ResourceError::NotFound)` - if no product has the identifier
    async fn delete(&self, id: Uuid) -> StorageResult<()>;

    /// Returns every product matching all filters of `params`.
    ///
    /// An empty parameter returns every product. Result order is unspecified.
    async fn search(&self, params: &SearchParameter) -> StorageResult<Vec<Product>>;

    /// Verifies that the storage engine is reachable.
    async fn health_check(&self) -> StorageResult<()> {
        Ok(())
    }
}
