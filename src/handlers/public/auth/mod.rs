// Public auth endpoints: signup, signin, product key generation

use axum::{extract::Path, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::product_key;
use crate::database::models::user::{SignupPolicy, UserRole};
use crate::error::ApiError;
use crate::services::auth_service::{AuthService, SignInRequest, SignUpRequest};

/// POST /auth/signup/:user_type - role-gated account creation
///
/// BUYER signup is open. Any other role must present a product key that
/// verifies against the recomputed (email, role, secret) signature; the gate
/// runs before any persistence work, so a rejected request creates nothing.
pub async fn signup_post(
    Path(user_type): Path<UserRole>,
    Json(request): Json<SignUpRequest>,
) -> Result<impl IntoResponse, ApiError> {
    match user_type.signup_policy() {
        SignupPolicy::Open => {}
        SignupPolicy::RequiresProductKey => {
            let key = request
                .product_key
                .as_deref()
                .ok_or_else(|| ApiError::unauthorized("A product key is required for this role"))?;

            if !product_key::verify(&request.email, user_type, key)? {
                return Err(ApiError::unauthorized("Invalid product key"));
            }
        }
    }

    let service = AuthService::from_env().await?;
    let session = service.sign_up(request, user_type).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": session })),
    ))
}

/// POST /auth/signin - credential check and session issuance
pub async fn signin_post(Json(request): Json<SignInRequest>) -> Result<Json<Value>, ApiError> {
    let service = AuthService::from_env().await?;
    let session = service.sign_in(request).await?;

    Ok(Json(json!({ "success": true, "data": session })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateKeyRequest {
    pub email: String,
    pub user_type: UserRole,
}

/// POST /auth/key - signed product key for out-of-band provisioning of
/// realtor and admin accounts
pub async fn key_post(Json(request): Json<GenerateKeyRequest>) -> Result<Json<Value>, ApiError> {
    let key = product_key::generate(&request.email, request.user_type)?;

    Ok(Json(json!({ "success": true, "data": { "productKey": key } })))
}
