//! Product records and the values they are built from.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Category of a published map layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(
    feature = "postgres",
    derive(postgres_types::ToSql, postgres_types::FromSql)
)]
#[cfg_attr(feature = "postgres", postgres(name = "product_type"))]
pub enum ProductType {
    /// Tiled raster imagery.
    #[serde(rename = "raster")]
    #[cfg_attr(feature = "postgres", postgres(name = "raster"))]
    Raster,
    /// Vector data rendered to raster tiles.
    #[serde(rename = "rasterized vector")]
    #[cfg_attr(feature = "postgres", postgres(name = "rasterized vector"))]
    RasterizedVector,
    /// OGC 3D Tiles.
    #[serde(rename = "3d tiles")]
    #[cfg_attr(feature = "postgres", postgres(name = "3d tiles"))]
    ThreeDTiles,
    /// Quantized mesh terrain.
    #[serde(rename = "QMesh")]
    #[cfg_attr(feature = "postgres", postgres(name = "QMesh"))]
    QMesh,
}

impl ProductType {
    /// All product types, in declaration order.
    pub const ALL: [ProductType; 4] = [
        ProductType::Raster,
        ProductType::RasterizedVector,
        ProductType::ThreeDTiles,
        ProductType::QMesh,
    ];

    /// Returns the wire and database literal for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Raster => "raster",
            ProductType::RasterizedVector => "rasterized vector",
            ProductType::ThreeDTiles => "3d tiles",
            ProductType::QMesh => "QMesh",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProductType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidProduct {
                message: format!("unknown product type '{}'", s),
            })
    }
}

/// Protocol a client uses to consume a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(
    feature = "postgres",
    derive(postgres_types::ToSql, postgres_types::FromSql)
)]
#[cfg_attr(feature = "postgres", postgres(name = "consumption_protocol"))]
pub enum ConsumptionProtocol {
    /// OGC Web Map Service.
    #[serde(rename = "WMS")]
    #[cfg_attr(feature = "postgres", postgres(name = "WMS"))]
    Wms,
    /// OGC Web Map Tile Service.
    #[serde(rename = "WMTS")]
    #[cfg_attr(feature = "postgres", postgres(name = "WMTS"))]
    Wmts,
    /// Slippy-map XYZ tiles.
    #[serde(rename = "XYZ")]
    #[cfg_attr(feature = "postgres", postgres(name = "XYZ"))]
    Xyz,
    /// OGC 3D Tiles tileset.
    #[serde(rename = "3D Tiles")]
    #[cfg_attr(feature = "postgres", postgres(name = "3D Tiles"))]
    ThreeDTiles,
}

impl ConsumptionProtocol {
    /// All protocols, in declaration order.
    pub const ALL: [ConsumptionProtocol; 4] = [
        ConsumptionProtocol::Wms,
        ConsumptionProtocol::Wmts,
        ConsumptionProtocol::Xyz,
        ConsumptionProtocol::ThreeDTiles,
    ];

    /// Returns the wire and database literal for this protocol.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsumptionProtocol::Wms => "WMS",
            ConsumptionProtocol::Wmts => "WMTS",
            ConsumptionProtocol::Xyz => "XYZ",
            ConsumptionProtocol::ThreeDTiles => "3D Tiles",
        }
    }
}

impl fmt::Display for ConsumptionProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConsumptionProtocol {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidProduct {
                message: format!("unknown consumption protocol '{}'", s),
            })
    }
}

/// GeoJSON geometry type tag. Only polygons are stored or queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GeometryType {
    /// A GeoJSON `Polygon`.
    #[default]
    Polygon,
}

/// A GeoJSON polygon in WGS84 longitude/latitude (SRID 4326).
///
/// `coordinates` holds the exterior ring followed by any holes; each ring is a
/// closed list of `[x, y]` (or `[x, y, z]`) positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    /// Always `"Polygon"`.
    #[serde(rename = "type")]
    pub geometry_type: GeometryType,

    /// Linear rings.
    pub coordinates: Vec<Vec<Vec<f64>>>,

    /// Optional GeoJSON bounding box.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Vec<f64>>,
}

impl Polygon {
    /// Creates a polygon from its rings.
    pub fn new(coordinates: Vec<Vec<Vec<f64>>>) -> Self {
        Self {
            geometry_type: GeometryType::Polygon,
            coordinates,
            bbox: None,
        }
    }

    /// Creates a single-ring polygon from `(x, y)` positions.
    pub fn from_ring(ring: &[(f64, f64)]) -> Self {
        Self::new(vec![ring.iter().map(|&(x, y)| vec![x, y]).collect()])
    }

    /// Serializes the polygon to GeoJSON text for binding as a query parameter.
    pub fn to_geojson(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Checks the GeoJSON ring rules: at least one ring, each ring closed
    /// with four or more positions, each position exactly two finite numbers.
    ///
    /// The stored column is a 2D `geometry(Polygon, 4326)`, so positions with
    /// an elevation are rejected.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let invalid = |message: String| ValidationError::InvalidProduct { message };

        if self.coordinates.is_empty() {
            return Err(invalid("polygon has no rings".to_string()));
        }
        for (i, ring) in self.coordinates.iter().enumerate() {
            if ring.len() < 4 {
                return Err(invalid(format!(
                    "polygon ring {} has {} positions, at least 4 required",
                    i,
                    ring.len()
                )));
            }
            if let Some(position) = ring
                .iter()
                .find(|p| p.len() != 2 || p.iter().any(|c| !c.is_finite()))
            {
                return Err(invalid(format!(
                    "polygon ring {} has invalid position {:?}",
                    i, position
                )));
            }
            if ring.first() != ring.last() {
                return Err(invalid(format!("polygon ring {} is not closed", i)));
            }
        }
        Ok(())
    }
}

/// A persisted product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Server-assigned identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Footprint of the layer.
    pub bounding_polygon: Polygon,
    /// Where clients fetch the layer from.
    #[serde(alias = "consumtionLink")]
    pub consumption_link: String,
    /// Layer category.
    #[serde(rename = "type")]
    pub product_type: ProductType,
    /// Serving protocol.
    pub protocol: ConsumptionProtocol,
    /// Best available resolution.
    pub resolution_best: f64,
    /// Lowest zoom level served.
    pub min_zoom: i32,
    /// Highest zoom level served.
    pub max_zoom: i32,
}

/// Payload for creating a product. Every field is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Footprint of the layer.
    pub bounding_polygon: Polygon,
    /// Where clients fetch the layer from.
    #[serde(alias = "consumtionLink")]
    pub consumption_link: String,
    /// Layer category.
    #[serde(rename = "type")]
    pub product_type: ProductType,
    /// Serving protocol.
    pub protocol: ConsumptionProtocol,
    /// Best available resolution.
    pub resolution_best: f64,
    /// Lowest zoom level served.
    pub min_zoom: i32,
    /// Highest zoom level served.
    pub max_zoom: i32,
}

impl ProductCreate {
    /// Validates the footprint geometry.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.bounding_polygon.validate()
    }

    /// Attaches an identifier, producing the stored form.
    pub fn into_product(self, id: Uuid) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            bounding_polygon: self.bounding_polygon,
            consumption_link: self.consumption_link,
            product_type: self.product_type,
            protocol: self.protocol,
            resolution_best: self.resolution_best,
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
        }
    }
}

/// Partial update. Absent fields keep their stored values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New footprint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_polygon: Option<Polygon>,
    /// New consumption link.
    #[serde(
        default,
        alias = "consumtionLink",
        skip_serializing_if = "Option::is_none"
    )]
    pub consumption_link: Option<String>,
    /// New category.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub product_type: Option<ProductType>,
    /// New protocol.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<ConsumptionProtocol>,
    /// New best resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution_best: Option<f64>,
    /// New minimum zoom.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_zoom: Option<i32>,
    /// New maximum zoom.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_zoom: Option<i32>,
}

impl ProductUpdate {
    /// Validates the footprint geometry, if one is supplied.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.bounding_polygon
            .as_ref()
            .map_or(Ok(()), Polygon::validate)
    }

    /// Returns true if no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.bounding_polygon.is_none()
            && self.consumption_link.is_none()
            && self.product_type.is_none()
            && self.protocol.is_none()
            && self.resolution_best.is_none()
            && self.min_zoom.is_none()
            && self.max_zoom.is_none()
    }

    /// Applies the update to a product in place.
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(description) = &self.description {
            product.description = description.clone();
        }
        if let Some(polygon) = &self.bounding_polygon {
            product.bounding_polygon = polygon.clone();
        }
        if let Some(link) = &self.consumption_link {
            product.consumption_link = link.clone();
        }
        if let Some(product_type) = self.product_type {
            product.product_type = product_type;
        }
        if let Some(protocol) = self.protocol {
            product.protocol = protocol;
        }
        if let Some(resolution) = self.resolution_best {
            product.resolution_best = resolution;
        }
        if let Some(min_zoom) = self.min_zoom {
            product.min_zoom = min_zoom;
        }
        if let Some(max_zoom) = self.max_zoom {
            product.max_zoom = max_zoom;
        }
    }
}
