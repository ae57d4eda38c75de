// Protected auth endpoints

use axum::{Extension, Json};
use serde_json::{json, Value};

use crate::middleware::auth::AuthUser;

/// GET /auth/me - the caller's identity claims, straight from the validated
/// token; no storage access
pub async fn me_get(Extension(user): Extension<AuthUser>) -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "id": user.user_id,
            "name": user.name,
            "email": user.email,
            "role": user.role,
        }
    }))
}
