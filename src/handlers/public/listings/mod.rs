// Public listing endpoints: filtered search and single-listing fetch

use axum::extract::{Path, Query};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::filter::ListingFilter;
use crate::services::listing_service::ListingService;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub city: Option<String>,
    /// Minimum price, inclusive
    pub price: Option<String>,
    /// Maximum price, inclusive
    pub max_price: Option<String>,
    pub property_type: Option<String>,
}

/// GET /home - filtered listing search projected to the public view.
/// No filters means all listings; zero matches is a 404.
pub async fn search_get(Query(query): Query<SearchQuery>) -> Result<Json<Value>, ApiError> {
    let filter = ListingFilter::from_query(
        query.city.as_deref(),
        query.price.as_deref(),
        query.max_price.as_deref(),
        query.property_type.as_deref(),
    )?;

    let service = ListingService::from_env().await?;
    let listings = service.search(&filter).await?;

    Ok(Json(json!({ "success": true, "data": listings })))
}

/// GET /home/:id - one listing with its full image URL list
pub async fn show_get(Path(id): Path<Uuid>) -> Result<Json<Value>, ApiError> {
    let service = ListingService::from_env().await?;
    let listing = service.get(id).await?;

    Ok(Json(json!({ "success": true, "data": listing })))
}
