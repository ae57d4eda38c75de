use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use std::sync::Once;

/// Build the application router with deterministic test secrets.
///
/// These tests exercise the HTTP surface that does not require a live
/// database: authorization gates, input validation, and token handling all
/// run before any pool is created.
pub fn app() -> Router {
    static ENV: Once = Once::new();
    ENV.call_once(|| {
        std::env::set_var("JWT_SECRET", "integration-test-jwt-secret");
        std::env::set_var("PRODUCT_KEY_SECRET", "integration-test-product-secret");
        std::env::set_var("BCRYPT_COST", "4");
    });

    estate_api_rust::routes::app()
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn response_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
