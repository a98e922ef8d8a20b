//! Domain and request types for the product catalog.

mod product;
mod search_params;

pub use product::{
    ConsumptionProtocol, GeometryType, Polygon, Product, ProductCreate, ProductType, ProductUpdate,
};

pub use search_params::{
    BoundingPolygon, ComparableNumber, EqualityValue, FieldFilter, Filter, NumericComparison,
    ProductField, SearchParameter, SpatialRelation, classify, is_comparable_number,
};
