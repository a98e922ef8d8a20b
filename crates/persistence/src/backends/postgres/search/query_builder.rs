//! PostgreSQL search query builder.
//!
//! Compiles a [`SearchParameter`] into PostGIS predicates over the `product`
//! table. Compilation produces a [`CompiledFilter`]: an ordered list of
//! structured [`Predicate`]s and the parameter values they bind. Each
//! predicate refers to its value by [`ParamId`]; `$N` placeholders are only
//! rendered by [`CompiledFilter::to_sql`].
//!
//! Field values are never interpolated into SQL text, and column names come
//! from the closed [`ProductField`] set.

use uuid::Uuid;

use crate::types::{
    BoundingPolygon, ComparableNumber, ConsumptionProtocol, EqualityValue, Filter,
    NumericComparison, Polygon, ProductField, ProductType, SearchParameter, SpatialRelation,
};

/// Spatial reference system of stored and queried geometries (WGS84).
pub const SRID: i32 = 4326;

/// A SQL fragment with associated parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlFragment {
    /// The SQL string with $N placeholders.
    pub sql: String,
    /// The parameter values.
    pub params: Vec<SqlParam>,
}

/// A SQL parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    /// Text parameter.
    Text(String),
    /// Double precision parameter.
    Float(f64),
    /// Integer parameter.
    Integer(i32),
    /// UUID parameter.
    Uuid(Uuid),
    /// `product_type` enum parameter.
    ProductType(ProductType),
    /// `consumption_protocol` enum parameter.
    Protocol(ConsumptionProtocol),
    /// Polygon serialized as GeoJSON text.
    GeoJson(String),
}

impl SqlParam {
    /// Creates a text parameter.
    pub fn text(s: &str) -> Self {
        SqlParam::Text(s.to_string())
    }

    /// Creates a GeoJSON parameter from a polygon.
    pub fn geojson(polygon: &Polygon) -> Result<Self, serde_json::Error> {
        Ok(SqlParam::GeoJson(polygon.to_geojson()?))
    }
}

impl From<&EqualityValue> for SqlParam {
    fn from(value: &EqualityValue) -> Self {
        match value {
            EqualityValue::Text(s) => SqlParam::text(s),
            EqualityValue::Id(id) => SqlParam::Uuid(*id),
            EqualityValue::Type(t) => SqlParam::ProductType(*t),
            EqualityValue::Protocol(p) => SqlParam::Protocol(*p),
        }
    }
}

impl SqlFragment {
    /// Creates a new fragment with no parameters.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Creates a fragment with parameters.
    pub fn with_params(sql: impl Into<String>, params: Vec<SqlParam>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Combines two fragments with AND.
    pub fn and(self, other: SqlFragment) -> SqlFragment {
        SqlFragment {
            sql: format!("({}) AND ({})", self.sql, other.sql),
            params: [self.params, other.params].concat(),
        }
    }
}

/// Identity of a bound parameter within one [`CompiledFilter`].
///
/// Identities are assigned sequentially from zero in binding order and are
/// independent of field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamId(usize);

impl ParamId {
    /// Returns the zero-based binding position.
    pub fn index(self) -> usize {
        self.0
    }

    /// Renders the `$N` placeholder when `offset` parameters precede this
    /// filter in the final statement.
    pub fn placeholder(self, offset: usize) -> String {
        format!("${}", offset + self.0 + 1)
    }
}

/// A single compiled condition on a product row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// `column = value`
    Equals {
        /// Compared field.
        field: ProductField,
        /// Bound literal.
        param: ParamId,
    },
    /// `column <op> value`, compared as double precision.
    Compare {
        /// Compared field.
        field: ProductField,
        /// Comparison key.
        comparison: NumericComparison,
        /// Bound bound.
        param: ParamId,
    },
    /// `ST_<relation>(stored polygon, query polygon)`.
    Spatial {
        /// Relationship tested.
        relation: SpatialRelation,
        /// Bound GeoJSON polygon.
        param: ParamId,
    },
}

impl Predicate {
    /// Returns the parameter this predicate binds.
    pub fn param(&self) -> ParamId {
        match self {
            Predicate::Equals { param, .. }
            | Predicate::Compare { param, .. }
            | Predicate::Spatial { param, .. } => *param,
        }
    }

    /// Renders the predicate as SQL.
    pub fn to_sql(&self, offset: usize) -> String {
        match self {
            Predicate::Equals { field, param } => {
                format!("{} = {}", field.column(), param.placeholder(offset))
            }
            Predicate::Compare {
                field,
                comparison,
                param,
            } => format!(
                "{} {} {}::double precision",
                field.column(),
                comparison.operator(),
                param.placeholder(offset)
            ),
            Predicate::Spatial { relation, param } => format!(
                "{}({}, ST_SetSRID(ST_GeomFromGeoJSON({}::text), {}))",
                relation.function(),
                ProductField::BoundingPolygon.column(),
                param.placeholder(offset),
                SRID
            ),
        }
    }
}

/// The result of compiling a search parameter.
///
/// Values are immutable: every builder step consumes a filter and returns an
/// extended one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledFilter {
    predicates: Vec<Predicate>,
    params: Vec<SqlParam>,
}

impl CompiledFilter {
    /// Creates an empty filter (matches everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the predicates in emission order.
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Returns the bound values, indexed by [`ParamId::index`].
    pub fn params(&self) -> &[SqlParam] {
        &self.params
    }

    /// Returns the value bound to `id`.
    pub fn param(&self, id: ParamId) -> Option<&SqlParam> {
        self.params.get(id.index())
    }

    /// Returns true if the filter has no predicates.
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Binds a value and adds the predicate built from its identity.
    fn push(mut self, value: SqlParam, predicate: impl FnOnce(ParamId) -> Predicate) -> Self {
        let id = ParamId(self.params.len());
        self.params.push(value);
        self.predicates.push(predicate(id));
        self
    }

    /// Renders the predicates joined with AND.
    ///
    /// `param_offset` is the number of parameters that precede this filter
    /// in the final statement. Returns `None` if there are no predicates.
    pub fn to_sql(&self, param_offset: usize) -> Option<SqlFragment> {
        let mut conditions = self.predicates.iter().map(|p| {
            let value = self.params[p.param().index()].clone();
            SqlFragment::with_params(p.to_sql(param_offset), vec![value])
        });

        let first = conditions.next()?;
        Some(conditions.fold(first, SqlFragment::and))
    }
}

/// PostgreSQL search query builder.
pub struct PostgresQueryBuilder;

impl PostgresQueryBuilder {
    /// Compiles a search parameter into predicates and bindings.
    ///
    /// Filters are visited in request order; each variant is routed to its
    /// builder. The same input always yields an identical result. Fails only
    /// if a polygon cannot be serialized to GeoJSON.
    pub fn compile(params: &SearchParameter) -> Result<CompiledFilter, serde_json::Error> {
        params
            .filters()
            .iter()
            .try_fold(CompiledFilter::new(), |compiled, f| match &f.filter {
                Filter::Numeric(bounds) => {
                    Ok(Self::build_numeric_filter(compiled, f.field, bounds))
                }
                Filter::Equality(value) => {
                    Ok(Self::build_equality_filter(compiled, f.field, value))
                }
                Filter::Spatial(bounds) => Self::build_spatial_filter(compiled, bounds),
            })
    }

    /// Builds the WHERE condition for a search.
    ///
    /// Returns `Ok(None)` when the search has no filters.
    pub fn build_search_query(
        params: &SearchParameter,
        param_offset: usize,
    ) -> Result<Option<SqlFragment>, serde_json::Error> {
        Ok(Self::compile(params)?.to_sql(param_offset))
    }

    fn build_equality_filter(
        compiled: CompiledFilter,
        field: ProductField,
        value: &EqualityValue,
    ) -> CompiledFilter {
        compiled.push(value.into(), |param| Predicate::Equals { field, param })
    }

    fn build_numeric_filter(
        compiled: CompiledFilter,
        field: ProductField,
        bounds: &ComparableNumber,
    ) -> CompiledFilter {
        bounds
            .bounds()
            .fold(compiled, |compiled, (comparison, value)| {
                compiled.push(SqlParam::Float(value), |param| Predicate::Compare {
                    field,
                    comparison,
                    param,
                })
            })
    }

    fn build_spatial_filter(
        compiled: CompiledFilter,
        bounds: &BoundingPolygon,
    ) -> Result<CompiledFilter, serde_json::Error> {
        bounds
            .relations()
            .try_fold(compiled, |compiled, (relation, polygon)| {
                Ok(compiled.push(SqlParam::geojson(polygon)?, |param| {
                    Predicate::Spatial { relation, param }
                }))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(min: f64, max: f64) -> Polygon {
        Polygon::from_ring(&[(min, min), (max, min), (max, max), (min, max), (min, min)])
    }

    #[test]
    fn test_param_placeholder_respects_offset() {
        assert_eq!(ParamId(0).placeholder(0), "$1");
        assert_eq!(ParamId(2).placeholder(3), "$6");
    }

    #[test]
    fn test_push_assigns_sequential_ids() {
        let compiled = CompiledFilter::new()
            .push(SqlParam::text("a"), |param| Predicate::Equals {
                field: ProductField::Name,
                param,
            })
            .push(SqlParam::Float(1.0), |param| Predicate::Compare {
                field: ProductField::MinZoom,
                comparison: NumericComparison::Less,
                param,
            });
        let ids: Vec<_> = compiled
            .predicates()
            .iter()
            .map(|p| p.param().index())
            .collect();
        assert_eq!(ids, vec![0, 1]);
        assert_eq!(compiled.param(ParamId(1)), Some(&SqlParam::Float(1.0)));
    }

    #[test]
    fn test_spatial_predicate_puts_stored_column_first() {
        let predicate = Predicate::Spatial {
            relation: SpatialRelation::Within,
            param: ParamId(0),
        };
        assert_eq!(
            predicate.to_sql(0),
            "ST_Within(bounding_polygon, ST_SetSRID(ST_GeomFromGeoJSON($1::text), 4326))"
        );
    }

    #[test]
    fn test_type_column_is_quoted() {
        let predicate = Predicate::Equals {
            field: ProductField::Type,
            param: ParamId(0),
        };
        assert_eq!(predicate.to_sql(0), "\"type\" = $1");
    }

    #[test]
    fn test_spatial_binding_is_geojson_text() {
        let params = SearchParameter::new().with_spatial(BoundingPolygon {
            intersects: Some(square(0.0, 1.0)),
            ..Default::default()
        });
        let compiled = PostgresQueryBuilder::compile(&params).unwrap();
        match &compiled.params()[0] {
            SqlParam::GeoJson(text) => {
                let value: serde_json::Value = serde_json::from_str(text).unwrap();
                assert_eq!(value["type"], "Polygon");
                assert_eq!(value["coordinates"][0][1][0], 1.0);
            }
            other => panic!("Expected GeoJson param, got {:?}", other),
        }
    }

    #[test]
    fn test_geojson_param_carries_serialized_polygon() {
        let polygon = square(0.0, 2.0);
        let param = SqlParam::geojson(&polygon).unwrap();
        assert_eq!(param, SqlParam::GeoJson(polygon.to_geojson().unwrap()));
        match param {
            SqlParam::GeoJson(text) => assert!(!text.is_empty()),
            other => panic!("Expected GeoJson param, got {:?}", other),
        }
    }

    #[test]
    fn test_compile_empty_parameter() {
        let compiled = PostgresQueryBuilder::compile(&SearchParameter::new()).unwrap();
        assert!(compiled.is_empty());
        assert!(compiled.params().is_empty());
        assert!(compiled.to_sql(0).is_none());
    }
}
