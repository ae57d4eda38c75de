use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Full `listings` row, storage shape.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Listing {
    pub id: Uuid,
    pub address: String,
    pub city: String,
    pub price: Decimal,
    pub property_type: PropertyType,
    pub number_of_bedrooms: i32,
    pub number_of_bathrooms: i32,
    pub land_size: Decimal,
    pub realtor_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Search projection: listing columns plus the first image URL, if any.
#[derive(Debug, Clone, FromRow)]
pub struct ListingSummary {
    pub id: Uuid,
    pub address: String,
    pub city: String,
    pub price: Decimal,
    pub property_type: PropertyType,
    pub number_of_bedrooms: i32,
    pub number_of_bathrooms: i32,
    pub img: Option<String>,
}

/// Insert payload for `listings`, storage shape.
#[derive(Debug, Clone, PartialEq)]
pub struct NewListing {
    pub address: String,
    pub city: String,
    pub price: Decimal,
    pub property_type: PropertyType,
    pub number_of_bedrooms: i32,
    pub number_of_bathrooms: i32,
    pub land_size: Decimal,
    pub realtor_id: Uuid,
}

/// Partial update for `listings`; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingChanges {
    pub address: Option<String>,
    pub city: Option<String>,
    pub price: Option<Decimal>,
    pub property_type: Option<PropertyType>,
    pub number_of_bedrooms: Option<i32>,
    pub number_of_bathrooms: Option<i32>,
    pub land_size: Option<Decimal>,
}

impl ListingChanges {
    pub fn is_empty(&self) -> bool {
        self.address.is_none()
            && self.city.is_none()
            && self.price.is_none()
            && self.property_type.is_none()
            && self.number_of_bedrooms.is_none()
            && self.number_of_bathrooms.is_none()
            && self.land_size.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "property_type", rename_all = "UPPERCASE")]
pub enum PropertyType {
    Residential,
    Condo,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Residential => "RESIDENTIAL",
            PropertyType::Condo => "CONDO",
        }
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RESIDENTIAL" => Ok(PropertyType::Residential),
            "CONDO" => Ok(PropertyType::Condo),
            other => Err(format!("unknown property type: {}", other)),
        }
    }
}
