use rust_decimal::Decimal;
use uuid::Uuid;

use crate::database::models::listing::PropertyType;

/// Inclusive price bounds; either end may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PriceRange {
    pub gte: Option<Decimal>,
    pub lte: Option<Decimal>,
}

/// A positional bind parameter for a generated SQL fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Text(String),
    Int(i32),
    Number(Decimal),
    PropertyType(PropertyType),
    Uuid(Uuid),
}

/// A SQL fragment plus the parameters it binds, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlResult {
    pub clause: String,
    pub params: Vec<SqlParam>,
}
