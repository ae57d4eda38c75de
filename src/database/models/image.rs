use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// `images` row; lifecycle is tied to the parent listing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ListingImage {
    pub id: Uuid,
    pub url: String,
    pub listing_id: Uuid,
    pub created_at: DateTime<Utc>,
}
