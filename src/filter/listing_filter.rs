use rust_decimal::Decimal;

use super::error::FilterError;
use super::types::{PriceRange, SqlParam, SqlResult};
use crate::database::models::listing::PropertyType;

/// Request-scoped listing search predicate. Fields are present iff the
/// corresponding query parameter was supplied; never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilter {
    pub city: Option<String>,
    pub price: Option<PriceRange>,
    pub property_type: Option<PropertyType>,
}

impl ListingFilter {
    /// Build a filter from raw query-string values.
    ///
    /// Empty strings count as absent, matching the behavior clients expect
    /// from `?city=&price=`. Prices must parse as decimal numbers and
    /// `property_type` must name a known variant.
    pub fn from_query(
        city: Option<&str>,
        min_price: Option<&str>,
        max_price: Option<&str>,
        property_type: Option<&str>,
    ) -> Result<Self, FilterError> {
        let mut filter = ListingFilter::default();

        if let Some(city) = non_empty(city) {
            filter.city = Some(city.to_string());
        }

        let gte = non_empty(min_price).map(parse_price).transpose()?;
        let lte = non_empty(max_price).map(parse_price).transpose()?;
        if gte.is_some() || lte.is_some() {
            filter.price = Some(PriceRange { gte, lte });
        }

        if let Some(raw) = non_empty(property_type) {
            let parsed = raw
                .parse::<PropertyType>()
                .map_err(|_| FilterError::UnknownPropertyType(raw.to_string()))?;
            filter.property_type = Some(parsed);
        }

        Ok(filter)
    }

    pub fn is_empty(&self) -> bool {
        self.city.is_none() && self.price.is_none() && self.property_type.is_none()
    }

    /// Compile to a parameterized `WHERE` fragment. Parameters are numbered
    /// from `starting_param_index + 1`; the clause is empty when the filter
    /// is unconstrained.
    pub fn to_where_sql(&self, starting_param_index: usize) -> SqlResult {
        let mut conditions: Vec<String> = Vec::new();
        let mut params: Vec<SqlParam> = Vec::new();
        let mut index = starting_param_index;

        if let Some(city) = &self.city {
            index += 1;
            conditions.push(format!("\"city\" = ${}", index));
            params.push(SqlParam::Text(city.clone()));
        }

        if let Some(range) = &self.price {
            if let Some(gte) = range.gte {
                index += 1;
                conditions.push(format!("\"price\" >= ${}", index));
                params.push(SqlParam::Number(gte));
            }
            if let Some(lte) = range.lte {
                index += 1;
                conditions.push(format!("\"price\" <= ${}", index));
                params.push(SqlParam::Number(lte));
            }
        }

        if let Some(property_type) = self.property_type {
            index += 1;
            conditions.push(format!("\"property_type\" = ${}", index));
            params.push(SqlParam::PropertyType(property_type));
        }

        SqlResult {
            clause: conditions.join(" AND "),
            params,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn parse_price(raw: &str) -> Result<Decimal, FilterError> {
    raw.parse::<Decimal>()
        .map_err(|_| FilterError::InvalidPrice(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_key_present_iff_supplied() {
        let with_city = ListingFilter::from_query(Some("Curitiba"), None, None, None).unwrap();
        assert_eq!(with_city.city.as_deref(), Some("Curitiba"));
        assert!(with_city.price.is_none());
        assert!(with_city.property_type.is_none());

        let without = ListingFilter::from_query(None, None, None, None).unwrap();
        assert!(without.city.is_none());
        assert!(without.is_empty());
    }

    #[test]
    fn min_price_becomes_gte_range() {
        let filter = ListingFilter::from_query(None, Some("1000000"), None, None).unwrap();
        let range = filter.price.expect("price range");
        assert_eq!(range.gte, Some("1000000".parse().unwrap()));
        assert_eq!(range.lte, None);
    }

    #[test]
    fn max_price_becomes_lte_range() {
        let filter = ListingFilter::from_query(None, Some("1000000"), Some("1500000"), None).unwrap();
        let range = filter.price.expect("price range");
        assert_eq!(range.gte, Some("1000000".parse().unwrap()));
        assert_eq!(range.lte, Some("1500000".parse().unwrap()));
    }

    #[test]
    fn empty_strings_count_as_absent() {
        let filter = ListingFilter::from_query(Some(""), Some(""), Some(""), Some("")).unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn unparseable_price_is_rejected() {
        let err = ListingFilter::from_query(None, Some("cheap"), None, None).unwrap_err();
        assert_eq!(err, FilterError::InvalidPrice("cheap".to_string()));
    }

    #[test]
    fn unknown_property_type_is_rejected() {
        let err = ListingFilter::from_query(None, None, None, Some("CASTLE")).unwrap_err();
        assert_eq!(err, FilterError::UnknownPropertyType("CASTLE".to_string()));
    }

    #[test]
    fn property_type_parses_known_variants() {
        let filter = ListingFilter::from_query(None, None, None, Some("CONDO")).unwrap();
        assert_eq!(filter.property_type, Some(PropertyType::Condo));
    }

    #[test]
    fn empty_filter_compiles_to_empty_clause() {
        let sql = ListingFilter::default().to_where_sql(0);
        assert!(sql.clause.is_empty());
        assert!(sql.params.is_empty());
    }

    #[test]
    fn city_only_compiles_to_single_equality() {
        // The example scenario: city="Curitiba", no price
        let filter = ListingFilter::from_query(Some("Curitiba"), None, None, None).unwrap();
        let sql = filter.to_where_sql(0);
        assert_eq!(sql.clause, "\"city\" = $1");
        assert_eq!(sql.params, vec![SqlParam::Text("Curitiba".to_string())]);
    }

    #[test]
    fn predicates_appear_iff_fields_are_set() {
        let filter =
            ListingFilter::from_query(Some("Toronto"), Some("1000000"), None, Some("RESIDENTIAL"))
                .unwrap();
        let sql = filter.to_where_sql(0);
        assert_eq!(
            sql.clause,
            "\"city\" = $1 AND \"price\" >= $2 AND \"property_type\" = $3"
        );
        assert_eq!(sql.params.len(), 3);

        let no_city = ListingFilter::from_query(None, Some("500"), None, None).unwrap();
        let sql = no_city.to_where_sql(0);
        assert!(!sql.clause.contains("\"city\""));
        assert_eq!(sql.clause, "\"price\" >= $1");
    }

    #[test]
    fn param_numbering_respects_starting_index() {
        let filter = ListingFilter::from_query(Some("Toronto"), Some("100"), None, None).unwrap();
        let sql = filter.to_where_sql(2);
        assert_eq!(sql.clause, "\"city\" = $3 AND \"price\" >= $4");
    }
}
