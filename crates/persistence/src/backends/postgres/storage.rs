//! ProductStorage implementation for PostgreSQL.

use async_trait::async_trait;
use serde_json::Value;
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;
use uuid::Uuid;

use crate::core::{Backend, ProductStorage};
use crate::error::{BackendError, ResourceError, StorageError, StorageResult};
use crate::types::{Polygon, Product, ProductCreate, ProductField, ProductUpdate, SearchParameter};

use super::PostgresBackend;
use super::search::query_builder::{PostgresQueryBuilder, SqlParam};

/// Columns selected for every product read. The polygon is returned as
/// GeoJSON.
const PRODUCT_COLUMNS: &str = "id, name, description, \
     ST_AsGeoJSON(bounding_polygon)::json AS bounding_polygon, \
     consumption_link, \"type\", protocol, resolution_best, min_zoom, max_zoom";

/// Wraps a bound GeoJSON placeholder into a geometry expression.
fn geometry_from_placeholder(placeholder: &str) -> String {
    format!(
        "ST_SetSRID(ST_GeomFromGeoJSON({}::text), {})",
        placeholder,
        super::search::query_builder::SRID
    )
}

fn internal_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::Internal {
        backend_name: "postgres".to_string(),
        message,
        source: None,
    })
}

fn query_error(context: &str, err: tokio_postgres::Error) -> StorageError {
    if err.is_closed() {
        return StorageError::Backend(BackendError::ConnectionFailed {
            backend_name: "postgres".to_string(),
            message: err.to_string(),
        });
    }
    StorageError::Backend(BackendError::Internal {
        backend_name: "postgres".to_string(),
        message: format!("{}: {}", context, err),
        source: Some(Box::new(err)),
    })
}

fn not_found(id: Uuid) -> StorageError {
    StorageError::Resource(ResourceError::NotFound {
        resource_type: "Product".to_string(),
        id: id.to_string(),
    })
}

/// Converts compiled parameters into driver values.
fn bind_params(params: &[SqlParam]) -> Vec<Box<dyn ToSql + Sync + Send>> {
    params
        .iter()
        .map(|param| -> Box<dyn ToSql + Sync + Send> {
            match param {
                SqlParam::Text(s) => Box::new(s.clone()),
                SqlParam::Float(f) => Box::new(*f),
                SqlParam::Integer(i) => Box::new(*i),
                SqlParam::Uuid(u) => Box::new(*u),
                SqlParam::ProductType(t) => Box::new(*t),
                SqlParam::Protocol(p) => Box::new(*p),
                SqlParam::GeoJson(g) => Box::new(g.clone()),
            }
        })
        .collect()
}

fn param_refs(params: &[Box<dyn ToSql + Sync + Send>]) -> Vec<&(dyn ToSql + Sync)> {
    params
        .iter()
        .map(|p| p.as_ref() as &(dyn ToSql + Sync))
        .collect()
}

fn row_to_product(row: &Row) -> StorageResult<Product> {
    let polygon: Value = row
        .try_get("bounding_polygon")
        .map_err(|e| query_error("Failed to read bounding_polygon", e))?;
    let bounding_polygon: Polygon = serde_json::from_value(polygon)
        .map_err(|e| internal_error(format!("Stored polygon is not a GeoJSON Polygon: {}", e)))?;

    Ok(Product {
        id: row.try_get("id").map_err(|e| query_error("Failed to read id", e))?,
        name: row
            .try_get("name")
            .map_err(|e| query_error("Failed to read name", e))?,
        description: row
            .try_get("description")
            .map_err(|e| query_error("Failed to read description", e))?,
        bounding_polygon,
        consumption_link: row
            .try_get("consumption_link")
            .map_err(|e| query_error("Failed to read consumption_link", e))?,
        product_type: row
            .try_get("type")
            .map_err(|e| query_error("Failed to read type", e))?,
        protocol: row
            .try_get("protocol")
            .map_err(|e| query_error("Failed to read protocol", e))?,
        resolution_best: row
            .try_get("resolution_best")
            .map_err(|e| query_error("Failed to read resolution_best", e))?,
        min_zoom: row
            .try_get("min_zoom")
            .map_err(|e| query_error("Failed to read min_zoom", e))?,
        max_zoom: row
            .try_get("max_zoom")
            .map_err(|e| query_error("Failed to read max_zoom", e))?,
    })
}

/// Builds the SET assignments of a partial update. Parameters start at `$2`;
/// `$1` is the product id.
fn update_assignments(changes: &ProductUpdate) -> StorageResult<(Vec<String>, Vec<SqlParam>)> {
    let mut assignments = Vec::new();
    let mut params = Vec::new();

    let mut assign = |field: ProductField, param: SqlParam| {
        params.push(param);
        let placeholder = format!("${}", params.len() + 1);
        let value = if field.is_spatial() {
            geometry_from_placeholder(&placeholder)
        } else {
            placeholder
        };
        assignments.push(format!("{} = {}", field.column(), value));
    };

    if let Some(name) = &changes.name {
        assign(ProductField::Name, SqlParam::text(name));
    }
    if let Some(description) = &changes.description {
        assign(ProductField::Description, SqlParam::text(description));
    }
    if let Some(polygon) = &changes.bounding_polygon {
        assign(ProductField::BoundingPolygon, SqlParam::geojson(polygon)?);
    }
    if let Some(link) = &changes.consumption_link {
        assign(ProductField::ConsumptionLink, SqlParam::text(link));
    }
    if let Some(product_type) = changes.product_type {
        assign(ProductField::Type, SqlParam::ProductType(product_type));
    }
    if let Some(protocol) = changes.protocol {
        assign(ProductField::Protocol, SqlParam::Protocol(protocol));
    }
    if let Some(resolution) = changes.resolution_best {
        assign(ProductField::ResolutionBest, SqlParam::Float(resolution));
    }
    if let Some(min_zoom) = changes.min_zoom {
        assign(ProductField::MinZoom, SqlParam::Integer(min_zoom));
    }
    if let Some(max_zoom) = changes.max_zoom {
        assign(ProductField::MaxZoom, SqlParam::Integer(max_zoom));
    }

    Ok((assignments, params))
}

#[async_trait]
impl ProductStorage for PostgresBackend {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn create(&self, product: ProductCreate) -> StorageResult<Product> {
        product.validate()?;

        let client = self.get_client().await?;
        let product = product.into_product(Uuid::new_v4());
        let polygon = product.bounding_polygon.to_geojson()?;

        let sql = format!(
            "INSERT INTO product (id, name, description, bounding_polygon, consumption_link, \
             \"type\", protocol, resolution_best, min_zoom, max_zoom) \
             VALUES ($1, $2, $3, {}, $5, $6, $7, $8, $9, $10)",
            geometry_from_placeholder("$4")
        );

        client
            .execute(
                &sql,
                &[
                    &product.id,
                    &product.name,
                    &product.description,
                    &polygon,
                    &product.consumption_link,
                    &product.product_type,
                    &product.protocol,
                    &product.resolution_best,
                    &product.min_zoom,
                    &product.max_zoom,
                ],
            )
            .await
            .map_err(|e| query_error("Failed to insert product", e))?;

        tracing::debug!(id = %product.id, "Inserted product");
        Ok(product)
    }

    async fn read(&self, id: Uuid) -> StorageResult<Option<Product>> {
        let client = self.get_client().await?;
        let sql = format!("SELECT {} FROM product WHERE id = $1", PRODUCT_COLUMNS);

        let row = client
            .query_opt(&sql, &[&id])
            .await
            .map_err(|e| query_error("Failed to read product", e))?;

        row.as_ref().map(row_to_product).transpose()
    }

    async fn update(&self, id: Uuid, changes: ProductUpdate) -> StorageResult<()> {
        changes.validate()?;

        let client = self.get_client().await?;

        if changes.is_empty() {
            let exists = client
                .query_opt("SELECT 1 FROM product WHERE id = $1", &[&id])
                .await
                .map_err(|e| query_error("Failed to check existence", e))?;
            return exists.map(|_| ()).ok_or_else(|| not_found(id));
        }

        let (assignments, params) = update_assignments(&changes)?;
        let sql = format!(
            "UPDATE product SET {} WHERE id = $1",
            assignments.join(", ")
        );

        let mut values: Vec<Box<dyn ToSql + Sync + Send>> = vec![Box::new(id)];
        values.extend(bind_params(&params));

        let updated = client
            .execute(&sql, &param_refs(&values))
            .await
            .map_err(|e| query_error("Failed to update product", e))?;

        if updated == 0 {
            return Err(not_found(id));
        }

        tracing::debug!(id = %id, columns = assignments.len(), "Updated product");
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> StorageResult<()> {
        let client = self.get_client().await?;

        let deleted = client
            .execute("DELETE FROM product WHERE id = $1", &[&id])
            .await
            .map_err(|e| query_error("Failed to delete product", e))?;

        if deleted == 0 {
            return Err(not_found(id));
        }

        tracing::debug!(id = %id, "Deleted product");
        Ok(())
    }

    async fn search(&self, params: &SearchParameter) -> StorageResult<Vec<Product>> {
        let client = self.get_client().await?;

        let filter = PostgresQueryBuilder::build_search_query(params, 0)?;
        let (sql, values) = match filter {
            Some(fragment) => (
                format!(
                    "SELECT {} FROM product WHERE {}",
                    PRODUCT_COLUMNS, fragment.sql
                ),
                bind_params(&fragment.params),
            ),
            None => (format!("SELECT {} FROM product", PRODUCT_COLUMNS), Vec::new()),
        };

        tracing::debug!(sql = %sql, params = values.len(), "Executing product search");

        let rows = client
            .query(&sql, &param_refs(&values))
            .await
            .map_err(|e| query_error("Failed to execute search", e))?;

        rows.iter().map(row_to_product).collect()
    }

    async fn health_check(&self) -> StorageResult<()> {
        Backend::health_check(self).await.map_err(StorageError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ConsumptionProtocol, ProductType};

    #[test]
    fn test_update_assignments_follow_field_order() {
        let changes = ProductUpdate {
            max_zoom: Some(12),
            name: Some("Renamed".to_string()),
            product_type: Some(ProductType::QMesh),
            ..Default::default()
        };
        let (assignments, params) = update_assignments(&changes).unwrap();
        assert_eq!(
            assignments,
            vec!["name = $2", "\"type\" = $3", "max_zoom = $4"]
        );
        assert_eq!(
            params,
            vec![
                SqlParam::text("Renamed"),
                SqlParam::ProductType(ProductType::QMesh),
                SqlParam::Integer(12),
            ]
        );
    }

    #[test]
    fn test_update_assignments_wrap_polygon() {
        let polygon = Polygon::from_ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        let changes = ProductUpdate {
            bounding_polygon: Some(polygon.clone()),
            protocol: Some(ConsumptionProtocol::Xyz),
            ..Default::default()
        };
        let (assignments, params) = update_assignments(&changes).unwrap();
        assert_eq!(
            assignments[0],
            "bounding_polygon = ST_SetSRID(ST_GeomFromGeoJSON($2::text), 4326)"
        );
        assert_eq!(assignments[1], "protocol = $3");
        assert_eq!(params[0], SqlParam::GeoJson(polygon.to_geojson().unwrap()));
    }

    #[test]
    fn test_bind_params_preserves_count() {
        let params = vec![
            SqlParam::Float(1.5),
            SqlParam::Uuid(Uuid::nil()),
            SqlParam::GeoJson("{}".to_string()),
        ];
        let bound = bind_params(&params);
        assert_eq!(bound.len(), 3);
        assert_eq!(param_refs(&bound).len(), 3);
    }
}
