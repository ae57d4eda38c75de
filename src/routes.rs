use axum::middleware::from_fn;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{protected, public};
use crate::middleware::auth::jwt_auth_middleware;

pub fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Listing routes
        .merge(listing_routes())
        // Auth routes
        .merge(auth_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn listing_routes() -> Router {
    Router::new()
        .route("/home", get(public::listings::search_get))
        .route(
            "/home",
            post(protected::listings::create_post).route_layer(from_fn(jwt_auth_middleware)),
        )
        .route("/home/:id", get(public::listings::show_get))
        .route(
            "/home/:id",
            patch(protected::listings::update_patch).route_layer(from_fn(jwt_auth_middleware)),
        )
}

fn auth_routes() -> Router {
    Router::new()
        .route("/auth/signup/:user_type", post(public::auth::signup_post))
        .route("/auth/signin", post(public::auth::signin_post))
        .route("/auth/key", post(public::auth::key_post))
        .route(
            "/auth/me",
            get(protected::auth::me_get).route_layer(from_fn(jwt_auth_middleware)),
        )
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Estate API (Rust)",
            "version": version,
            "description": "Real estate listing backend built with Rust (Axum)",
            "endpoints": {
                "home": "GET /home?city=&price=&maxPrice=&propertyType= (public), GET /home/:id (public)",
                "listings": "POST /home, PATCH /home/:id (protected, realtor)",
                "auth": "POST /auth/signup/:userType, /auth/signin, /auth/key (public)",
                "me": "GET /auth/me (protected)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::manager::DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
