// Protected listing endpoints: creation and ownership-gated update

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::services::listing_service::{
    CreateListingRequest, ListingService, UpdateListingRequest,
};

/// POST /home - create a listing with its image batch.
/// Restricted to roles that may list properties; the role check runs before
/// any persistence work.
pub async fn create_post(
    Extension(user): Extension<AuthUser>,
    Json(request): Json<CreateListingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if !user.role.may_list_properties() {
        return Err(ApiError::forbidden("Only realtors may create listings"));
    }

    let service = ListingService::from_env().await?;
    let listing = service.create(request, user.user_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": listing })),
    ))
}

/// PATCH /home/:id - partial update, allowed only for the owning realtor
pub async fn update_patch(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateListingRequest>,
) -> Result<Json<Value>, ApiError> {
    let service = ListingService::from_env().await?;
    let listing = service.update(id, user.user_id, request).await?;

    Ok(Json(json!({ "success": true, "data": listing })))
}
