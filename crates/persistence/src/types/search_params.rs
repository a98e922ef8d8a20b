//! Search parameter types.
//!
//! A search request is a JSON object mapping product fields to filter values.
//! Each entry is classified into exactly one [`Filter`] variant when the
//! request is deserialized, so downstream query builders only pattern-match:
//!
//! | JSON value | Field kind | Variant |
//! |------------|------------|---------|
//! | object with a comparison key (`equal`, `greater`, ...) | numeric | [`Filter::Numeric`] |
//! | string | text, identifier or enum | [`Filter::Equality`] |
//! | object | `boundingPolygon` | [`Filter::Spatial`] |
//!
//! A string or object that does not fit its field (comparison bounds on a
//! text or spatial field, a string on a numeric field, an object on a text
//! field) is rejected, as are unknown field names, unparseable enum literals
//! or identifiers, non-numeric bounds and malformed polygons. Numbers,
//! booleans, arrays and `null` are skipped and contribute no predicate.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::error::ValidationError;

use super::product::{ConsumptionProtocol, Polygon, ProductType};

/// A searchable product field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductField {
    /// `id`
    Id,
    /// `name`
    Name,
    /// `description`
    Description,
    /// `consumptionLink`
    ConsumptionLink,
    /// `type`
    Type,
    /// `protocol`
    Protocol,
    /// `resolutionBest`
    ResolutionBest,
    /// `minZoom`
    MinZoom,
    /// `maxZoom`
    MaxZoom,
    /// `boundingPolygon`
    BoundingPolygon,
}

impl ProductField {
    /// Every searchable field.
    pub const ALL: [ProductField; 10] = [
        ProductField::Id,
        ProductField::Name,
        ProductField::Description,
        ProductField::ConsumptionLink,
        ProductField::Type,
        ProductField::Protocol,
        ProductField::ResolutionBest,
        ProductField::MinZoom,
        ProductField::MaxZoom,
        ProductField::BoundingPolygon,
    ];

    /// Resolves a request key. Accepts the legacy `consumtionLink` spelling.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "consumtionLink" => Some(ProductField::ConsumptionLink),
            _ => Self::ALL.into_iter().find(|f| f.name() == name),
        }
    }

    /// Returns the JSON name of the field.
    pub fn name(&self) -> &'static str {
        match self {
            ProductField::Id => "id",
            ProductField::Name => "name",
            ProductField::Description => "description",
            ProductField::ConsumptionLink => "consumptionLink",
            ProductField::Type => "type",
            ProductField::Protocol => "protocol",
            ProductField::ResolutionBest => "resolutionBest",
            ProductField::MinZoom => "minZoom",
            ProductField::MaxZoom => "maxZoom",
            ProductField::BoundingPolygon => "boundingPolygon",
        }
    }

    /// Returns the column holding the field in the `product` table.
    pub fn column(&self) -> &'static str {
        match self {
            ProductField::Id => "id",
            ProductField::Name => "name",
            ProductField::Description => "description",
            ProductField::ConsumptionLink => "consumption_link",
            ProductField::Type => "\"type\"",
            ProductField::Protocol => "protocol",
            ProductField::ResolutionBest => "resolution_best",
            ProductField::MinZoom => "min_zoom",
            ProductField::MaxZoom => "max_zoom",
            ProductField::BoundingPolygon => "bounding_polygon",
        }
    }

    /// Returns true for fields compared with numeric bounds.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ProductField::ResolutionBest | ProductField::MinZoom | ProductField::MaxZoom
        )
    }

    /// Returns true for the polygon field.
    pub fn is_spatial(&self) -> bool {
        matches!(self, ProductField::BoundingPolygon)
    }

    /// Returns true for fields matched by exact equality.
    pub fn is_equality(&self) -> bool {
        !self.is_numeric() && !self.is_spatial()
    }
}

impl fmt::Display for ProductField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A literal compared for exact equality.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EqualityValue {
    /// Free text.
    Text(String),
    /// Product identifier.
    Id(Uuid),
    /// Product category.
    Type(ProductType),
    /// Consumption protocol.
    Protocol(ConsumptionProtocol),
}

/// Numeric comparison keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericComparison {
    /// `equal`
    Equal,
    /// `greater`
    Greater,
    /// `greaterEqual`
    GreaterEqual,
    /// `less`
    Less,
    /// `lessEqual`
    LessEqual,
}

impl NumericComparison {
    /// Canonical emission order.
    pub const ALL: [NumericComparison; 5] = [
        NumericComparison::Equal,
        NumericComparison::Greater,
        NumericComparison::GreaterEqual,
        NumericComparison::Less,
        NumericComparison::LessEqual,
    ];

    /// Returns the JSON key.
    pub fn key(&self) -> &'static str {
        match self {
            NumericComparison::Equal => "equal",
            NumericComparison::Greater => "greater",
            NumericComparison::GreaterEqual => "greaterEqual",
            NumericComparison::Less => "less",
            NumericComparison::LessEqual => "lessEqual",
        }
    }

    /// Returns the SQL comparison operator.
    pub fn operator(&self) -> &'static str {
        match self {
            NumericComparison::Equal => "=",
            NumericComparison::Greater => ">",
            NumericComparison::GreaterEqual => ">=",
            NumericComparison::Less => "<",
            NumericComparison::LessEqual => "<=",
        }
    }
}

/// A conjunctive set of numeric bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparableNumber {
    /// Value must equal this.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equal: Option<f64>,
    /// Value must be strictly greater.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greater: Option<f64>,
    /// Value must be greater or equal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greater_equal: Option<f64>,
    /// Value must be strictly less.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub less: Option<f64>,
    /// Value must be less or equal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub less_equal: Option<f64>,
}

impl ComparableNumber {
    /// Returns the bound for a comparison key.
    pub fn get(&self, comparison: NumericComparison) -> Option<f64> {
        match comparison {
            NumericComparison::Equal => self.equal,
            NumericComparison::Greater => self.greater,
            NumericComparison::GreaterEqual => self.greater_equal,
            NumericComparison::Less => self.less,
            NumericComparison::LessEqual => self.less_equal,
        }
    }

    /// Present bounds in canonical order.
    pub fn bounds(&self) -> impl Iterator<Item = (NumericComparison, f64)> + '_ {
        NumericComparison::ALL
            .into_iter()
            .filter_map(|c| self.get(c).map(|v| (c, v)))
    }
}

/// Spatial relationships between the stored polygon and a query polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpatialRelation {
    /// The stored polygon contains the query polygon.
    Contains,
    /// The stored polygon lies within the query polygon.
    Within,
    /// The polygons share at least one point.
    Intersects,
}

impl SpatialRelation {
    /// Canonical emission order.
    pub const ALL: [SpatialRelation; 3] = [
        SpatialRelation::Contains,
        SpatialRelation::Within,
        SpatialRelation::Intersects,
    ];

    /// Returns the JSON key.
    pub fn key(&self) -> &'static str {
        match self {
            SpatialRelation::Contains => "contains",
            SpatialRelation::Within => "within",
            SpatialRelation::Intersects => "intersects",
        }
    }

    /// Returns the PostGIS predicate function.
    pub fn function(&self) -> &'static str {
        match self {
            SpatialRelation::Contains => "ST_Contains",
            SpatialRelation::Within => "ST_Within",
            SpatialRelation::Intersects => "ST_Intersects",
        }
    }
}

/// A conjunctive set of spatial relationship filters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoundingPolygon {
    /// Stored polygon must contain this one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains: Option<Polygon>,
    /// Stored polygon must lie within this one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub within: Option<Polygon>,
    /// Stored polygon must intersect this one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intersects: Option<Polygon>,
}

impl BoundingPolygon {
    /// Returns the polygon for a relation.
    pub fn get(&self, relation: SpatialRelation) -> Option<&Polygon> {
        match relation {
            SpatialRelation::Contains => self.contains.as_ref(),
            SpatialRelation::Within => self.within.as_ref(),
            SpatialRelation::Intersects => self.intersects.as_ref(),
        }
    }

    /// Present relations in canonical order.
    pub fn relations(&self) -> impl Iterator<Item = (SpatialRelation, &Polygon)> + '_ {
        SpatialRelation::ALL
            .into_iter()
            .filter_map(|r| self.get(r).map(|p| (r, p)))
    }
}

/// A classified filter on one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Filter {
    /// Exact match against a literal.
    Equality(EqualityValue),
    /// Numeric bounds.
    Numeric(ComparableNumber),
    /// Spatial relationships with the stored polygon.
    Spatial(BoundingPolygon),
}

/// A filter bound to the field it applies to.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    /// The filtered field.
    pub field: ProductField,
    /// The classified filter.
    pub filter: Filter,
}

/// Returns true if `value` is an object carrying at least one numeric
/// comparison key.
///
/// Primitives, `null`, arrays and objects without any of the five keys are
/// not comparable numbers.
pub fn is_comparable_number(value: &Value) -> bool {
    value.as_object().is_some_and(|map| {
        NumericComparison::ALL
            .iter()
            .any(|c| map.contains_key(c.key()))
    })
}

/// A search request: zero or more field filters in request order.
///
/// An empty parameter matches every product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchParameter {
    filters: Vec<FieldFilter>,
}

impl SearchParameter {
    /// Creates an empty search parameter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a filter, replacing any existing filter on the same field.
    pub fn with_filter(mut self, field: ProductField, filter: Filter) -> Self {
        self.filters.retain(|f| f.field != field);
        self.filters.push(FieldFilter { field, filter });
        self
    }

    /// Adds an exact-match text filter.
    pub fn with_text(self, field: ProductField, value: impl Into<String>) -> Self {
        self.with_filter(field, Filter::Equality(EqualityValue::Text(value.into())))
    }

    /// Adds numeric bounds.
    pub fn with_numeric(self, field: ProductField, bounds: ComparableNumber) -> Self {
        self.with_filter(field, Filter::Numeric(bounds))
    }

    /// Adds spatial relationships on `boundingPolygon`.
    pub fn with_spatial(self, bounds: BoundingPolygon) -> Self {
        self.with_filter(ProductField::BoundingPolygon, Filter::Spatial(bounds))
    }

    /// Returns the filters in request order.
    pub fn filters(&self) -> &[FieldFilter] {
        &self.filters
    }

    /// Returns the filter on a field, if any.
    pub fn get(&self, field: ProductField) -> Option<&Filter> {
        self.filters
            .iter()
            .find(|f| f.field == field)
            .map(|f| &f.filter)
    }

    /// Returns true if there are no filters.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Returns the number of filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Builds a search parameter from request entries in document order.
    pub fn from_entries<I>(entries: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let mut seen = Vec::new();
        let mut filters = Vec::new();

        for (name, value) in entries {
            let field = ProductField::from_name(&name)
                .ok_or_else(|| invalid(&name, "unknown search field"))?;
            if seen.contains(&field) {
                return Err(invalid(&name, "field given more than once"));
            }
            seen.push(field);

            match classify(field, value)? {
                Some(filter) => filters.push(FieldFilter { field, filter }),
                None => debug!(field = %field, "Skipping filter with unrecognized shape"),
            }
        }

        Ok(Self { filters })
    }
}

fn invalid(parameter: &str, message: impl Into<String>) -> ValidationError {
    ValidationError::InvalidSearchParameter {
        parameter: parameter.to_string(),
        message: message.into(),
    }
}

/// Classifies one request value for a field.
///
/// Returns `Ok(None)` for values that are neither strings nor objects. A
/// string or object whose shape disagrees with the field kind is an error.
pub fn classify(field: ProductField, value: Value) -> Result<Option<Filter>, ValidationError> {
    if is_comparable_number(&value) {
        if !field.is_numeric() {
            return Err(invalid(
                field.name(),
                "numeric bounds are only allowed on numeric fields",
            ));
        }
        let bounds: ComparableNumber = serde_json::from_value(value)
            .map_err(|e| invalid(field.name(), format!("invalid numeric bounds: {}", e)))?;
        return Ok(Some(Filter::Numeric(bounds)));
    }

    match value {
        Value::String(literal) => {
            if !field.is_equality() {
                return Err(invalid(
                    field.name(),
                    "string values are only allowed on text, id and enum fields",
                ));
            }
            let equality = match field {
                ProductField::Id => Uuid::parse_str(&literal)
                    .map(EqualityValue::Id)
                    .map_err(|_| invalid(field.name(), "must be a UUID"))?,
                ProductField::Type => ProductType::from_str(&literal)
                    .map(EqualityValue::Type)
                    .map_err(|_| {
                        invalid(field.name(), format!("unknown product type '{}'", literal))
                    })?,
                ProductField::Protocol => ConsumptionProtocol::from_str(&literal)
                    .map(EqualityValue::Protocol)
                    .map_err(|_| {
                        invalid(field.name(), format!("unknown protocol '{}'", literal))
                    })?,
                _ => EqualityValue::Text(literal),
            };
            Ok(Some(Filter::Equality(equality)))
        }
        value @ Value::Object(_) => {
            if !field.is_spatial() {
                return Err(invalid(
                    field.name(),
                    "expected a string or numeric bounds",
                ));
            }
            let bounds: BoundingPolygon = serde_json::from_value(value)
                .map_err(|e| invalid(field.name(), format!("invalid polygon filter: {}", e)))?;
            for (relation, polygon) in bounds.relations() {
                polygon.validate().map_err(|e| {
                    invalid(field.name(), format!("invalid '{}' polygon: {}", relation.key(), e))
                })?;
            }
            Ok(Some(Filter::Spatial(bounds)))
        }
        _ => Ok(None),
    }
}

impl<'de> Deserialize<'de> for SearchParameter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SearchParameterVisitor;

        impl<'de> Visitor<'de> for SearchParameterVisitor {
            type Value = SearchParameter;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of product fields to filter values")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, Value>()? {
                    entries.push(entry);
                }
                SearchParameter::from_entries(entries).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_map(SearchParameterVisitor)
    }
}

impl Serialize for SearchParameter {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.filters.len()))?;
        for f in &self.filters {
            map.serialize_entry(f.field.name(), &f.filter)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> Result<SearchParameter, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn test_is_comparable_number() {
        assert!(is_comparable_number(&json!({"greater": 1})));
        assert!(is_comparable_number(&json!({"lessEqual": 3, "other": true})));
        assert!(!is_comparable_number(&json!({"other": 1})));
        assert!(!is_comparable_number(&json!({})));
        assert!(!is_comparable_number(&json!(5)));
        assert!(!is_comparable_number(&json!("greater")));
        assert!(!is_comparable_number(&Value::Null));
        assert!(!is_comparable_number(&json!([{"greater": 1}])));
    }

    #[test]
    fn test_empty_object_has_no_filters() {
        let params = parse(json!({})).unwrap();
        assert!(params.is_empty());
    }

    #[test]
    fn test_classifies_each_variant() {
        let params = parse(json!({
            "name": "Searchable Raster Layer",
            "resolutionBest": {"greater": 0.1, "lessEqual": 1},
            "boundingPolygon": {
                "intersects": {"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]]}
            }
        }))
        .unwrap();

        assert_eq!(params.len(), 3);
        assert_eq!(
            params.get(ProductField::Name),
            Some(&Filter::Equality(EqualityValue::Text(
                "Searchable Raster Layer".to_string()
            )))
        );
        match params.get(ProductField::ResolutionBest) {
            Some(Filter::Numeric(bounds)) => {
                assert_eq!(bounds.greater, Some(0.1));
                assert_eq!(bounds.less_equal, Some(1.0));
                assert_eq!(bounds.equal, None);
            }
            other => panic!("Expected numeric filter, got {:?}", other),
        }
        match params.get(ProductField::BoundingPolygon) {
            Some(Filter::Spatial(bounds)) => {
                assert!(bounds.intersects.is_some());
                assert!(bounds.contains.is_none());
            }
            other => panic!("Expected spatial filter, got {:?}", other),
        }
    }

    #[test]
    fn test_preserves_document_order() {
        let params: SearchParameter = serde_json::from_str(
            r#"{"protocol": "WMTS", "minZoom": {"lessEqual": 10}, "type": "raster"}"#,
        )
        .unwrap();
        let fields: Vec<_> = params.filters().iter().map(|f| f.field).collect();
        assert_eq!(
            fields,
            vec![ProductField::Protocol, ProductField::MinZoom, ProductField::Type]
        );
    }

    #[test]
    fn test_enum_and_id_literals_are_typed() {
        let id = Uuid::new_v4();
        let params = parse(json!({
            "id": id.to_string(),
            "type": "3d tiles",
            "protocol": "XYZ"
        }))
        .unwrap();
        assert_eq!(
            params.get(ProductField::Id),
            Some(&Filter::Equality(EqualityValue::Id(id)))
        );
        assert_eq!(
            params.get(ProductField::Type),
            Some(&Filter::Equality(EqualityValue::Type(
                ProductType::ThreeDTiles
            )))
        );
        assert_eq!(
            params.get(ProductField::Protocol),
            Some(&Filter::Equality(EqualityValue::Protocol(
                ConsumptionProtocol::Xyz
            )))
        );
    }

    #[test]
    fn test_legacy_link_name_maps_to_field() {
        let params = parse(json!({"consumtionLink": "https://example.com"})).unwrap();
        assert!(params.get(ProductField::ConsumptionLink).is_some());
    }

    #[test]
    fn test_non_string_non_object_values_are_skipped() {
        let params = parse(json!({
            "name": 42,
            "minZoom": 5,
            "maxZoom": null,
            "consumptionLink": ["a"],
            "resolutionBest": true
        }))
        .unwrap();
        assert!(params.is_empty());
    }

    #[test]
    fn test_numeric_key_inside_polygon_filter_is_rejected() {
        let err = parse(json!({
            "boundingPolygon": {
                "intersects": {"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]]},
                "equal": 1
            }
        }))
        .unwrap_err();
        assert!(err.to_string().contains("boundingPolygon"));
        assert!(err.to_string().contains("numeric bounds"));
    }

    #[test]
    fn test_numeric_bounds_on_text_field_are_rejected() {
        assert!(parse(json!({"protocol": {"greater": 1}})).is_err());
        assert!(parse(json!({"name": {"lessEqual": 3}})).is_err());
    }

    #[test]
    fn test_string_on_numeric_field_is_rejected() {
        let err = parse(json!({"minZoom": "5"})).unwrap_err();
        assert!(err.to_string().contains("minZoom"));
        assert!(parse(json!({"resolutionBest": "0.5"})).is_err());
    }

    #[test]
    fn test_string_on_polygon_field_is_rejected() {
        assert!(parse(json!({"boundingPolygon": "POLYGON((0 0, 1 0, 1 1, 0 0))"})).is_err());
    }

    #[test]
    fn test_object_on_text_field_is_rejected() {
        assert!(parse(json!({"description": {"other": 1}})).is_err());
    }

    #[test]
    fn test_unknown_polygon_relation_is_rejected() {
        let err = parse(json!({
            "boundingPolygon": {"overlaps": {"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]]}}
        }))
        .unwrap_err();
        assert!(err.to_string().contains("invalid polygon filter"));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = parse(json!({"colour": "red"})).unwrap_err();
        assert!(err.to_string().contains("unknown search field"));
    }

    #[test]
    fn test_invalid_literals_are_rejected() {
        assert!(parse(json!({"type": "vector"})).is_err());
        assert!(parse(json!({"protocol": "wms"})).is_err());
        assert!(parse(json!({"id": "not-a-uuid"})).is_err());
    }

    #[test]
    fn test_non_numeric_bound_is_rejected() {
        let err = parse(json!({"resolutionBest": {"greater": "0.1"}})).unwrap_err();
        assert!(err.to_string().contains("invalid numeric bounds"));
    }

    #[test]
    fn test_malformed_polygon_is_rejected() {
        let err = parse(json!({
            "boundingPolygon": {"within": {"type": "Point", "coordinates": [1, 2]}}
        }))
        .unwrap_err();
        assert!(err.to_string().contains("invalid polygon filter"));
    }

    #[test]
    fn test_open_ring_is_rejected() {
        let err = parse(json!({
            "boundingPolygon": {
                "contains": {"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 1]]]}
            }
        }))
        .unwrap_err();
        assert!(err.to_string().contains("invalid 'contains' polygon"));
    }

    #[test]
    fn test_duplicate_field_is_rejected() {
        let result: Result<SearchParameter, _> =
            serde_json::from_str(r#"{"name": "a", "name": "b"}"#);
        assert!(result.is_err());

        let aliased = parse(json!({"consumtionLink": "a", "consumptionLink": "b"}));
        assert!(aliased.is_err());
    }

    #[test]
    fn test_bounds_iterate_in_canonical_order() {
        let bounds = ComparableNumber {
            less_equal: Some(4.0),
            greater: Some(1.0),
            equal: Some(2.0),
            ..Default::default()
        };
        let keys: Vec<_> = bounds.bounds().map(|(c, _)| c.key()).collect();
        assert_eq!(keys, vec!["equal", "greater", "lessEqual"]);
    }

    #[test]
    fn test_with_filter_replaces_same_field() {
        let params = SearchParameter::new()
            .with_text(ProductField::Name, "a")
            .with_text(ProductField::Name, "b");
        assert_eq!(params.len(), 1);
        assert_eq!(
            params.get(ProductField::Name),
            Some(&Filter::Equality(EqualityValue::Text("b".to_string())))
        );
    }

    #[test]
    fn test_serialize_round_trips_request_shape() {
        let input = json!({"name": "x", "minZoom": {"lessEqual": 10.0}});
        let params = parse(input.clone()).unwrap();
        assert_eq!(serde_json::to_value(&params).unwrap(), input);
    }
}
