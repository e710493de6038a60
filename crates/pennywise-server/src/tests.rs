//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

const TEST_KEY: &str = "test-key-123";

fn setup_test_app() -> Router {
    let config = ServerConfig {
        require_auth: false,
        allowed_origins: vec![],
        ..Default::default()
    };
    create_router(config, InsightsConfig::default())
}

fn setup_auth_app() -> Router {
    let config = ServerConfig {
        require_auth: true,
        api_keys: vec![TEST_KEY.to_string()],
        ..Default::default()
    };
    create_router(config, InsightsConfig::default())
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn overspending_body() -> serde_json::Value {
    serde_json::json!({
        "expenses": [
            {"id": "1", "description": "Groceries", "amount": 20.0,
             "category": "Food", "occurred_at": "2026-03-01T10:00:00Z"},
            {"id": "2", "description": "Lunch", "amount": 30.0,
             "category": "Food", "occurred_at": "2026-03-01T13:00:00Z"},
            {"id": "3", "description": "Dinner", "amount": 50.0,
             "category": "Food", "occurred_at": "2026-03-02T19:00:00Z"}
        ],
        "monthly_income": 1000.0,
        "today": "2026-04-01",
        "seed": 7
    })
}

// ========== Health API Tests ==========

#[tokio::test]
async fn test_health_check() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

// ========== Insights API Tests ==========

#[tokio::test]
async fn test_generate_insights() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json("/api/insights", &overspending_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["stats"]["total"], 100.0);
    assert_eq!(json["stats"]["active_days"], 2);
    assert_eq!(json["stats"]["monthly_expenses"], 1500.0);
    assert_eq!(json["alerts"][0]["type"], "overspending");
    assert_eq!(json["alerts"][0]["severity"], "critical");
    assert_eq!(json["financial_health"]["score"], 40.0);
    assert_eq!(json["budget_recommendations"]["basis"], "income");
    assert!(json["predictions"].is_object());
    assert_eq!(json["personalized_tips"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_generate_insights_is_deterministic_with_seed() {
    let first = setup_test_app()
        .oneshot(post_json("/api/insights", &overspending_body()))
        .await
        .unwrap();
    let second = setup_test_app()
        .oneshot(post_json("/api/insights", &overspending_body()))
        .await
        .unwrap();

    assert_eq!(get_body_json(first).await, get_body_json(second).await);
}

#[tokio::test]
async fn test_generate_insights_without_income() {
    let app = setup_test_app();
    let body = serde_json::json!({
        "expenses": [
            {"id": "1", "description": "Bus", "amount": 3.0,
             "category": "Transport", "occurred_at": "2026-03-01T08:00:00Z"}
        ]
    });

    let response = app.oneshot(post_json("/api/insights", &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["financial_health"]["grade"], "Unknown");
    assert_eq!(json["financial_health"]["color"], "gray");
    assert!(json["predictions"].is_null());
}

#[tokio::test]
async fn test_generate_stats() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json("/api/insights/stats", &overspending_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["total"], 100.0);
    assert_eq!(json["expense_ratio"], 150.0);
    assert_eq!(json["savings_rate"], -50.0);
    assert_eq!(json["highest_category"], "Food");
    assert!(json.get("alerts").is_none());
}

#[tokio::test]
async fn test_timezone_changes_active_days() {
    let app = setup_test_app();
    let body = serde_json::json!({
        "expenses": [
            {"id": "a", "description": "Snack", "amount": 5.0,
             "category": "Food", "occurred_at": "2026-03-02T03:00:00Z"},
            {"id": "b", "description": "Coffee", "amount": 4.0,
             "category": "Food", "occurred_at": "2026-03-01T15:00:00Z"}
        ],
        "timezone": "America/Los_Angeles"
    });

    let response = app
        .oneshot(post_json("/api/insights/stats", &body))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["active_days"], 1);
}

#[tokio::test]
async fn test_unknown_timezone_is_bad_request() {
    let app = setup_test_app();
    let mut body = overspending_body();
    body["timezone"] = serde_json::json!("Atlantis/Lost_City");

    let response = app.oneshot(post_json("/api/insights", &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("timezone"));
}

#[tokio::test]
async fn test_negative_amount_is_bad_request() {
    let app = setup_test_app();
    let body = serde_json::json!({
        "expenses": [
            {"id": "neg", "description": "Refund", "amount": -10.0,
             "category": "Shopping", "occurred_at": "2026-03-01T08:00:00Z"}
        ]
    });

    let response = app.oneshot(post_json("/api/insights", &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("neg"));
}

#[tokio::test]
async fn test_unknown_category_is_bad_request() {
    let app = setup_test_app();
    let body = serde_json::json!({
        "expenses": [
            {"id": "x", "description": "Mystery", "amount": 10.0,
             "category": "Groceries", "occurred_at": "2026-03-01T08:00:00Z"}
        ]
    });

    let response = app.oneshot(post_json("/api/insights", &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/insights")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_get_config() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/insights/config")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["patterns"]["high_avg_transaction"], 50.0);
    assert_eq!(json["forecast"]["window_size"], 7);
    assert_eq!(json["budget"]["allocation"].as_array().unwrap().len(), 7);
}

// ========== Auth Tests ==========

#[tokio::test]
async fn test_auth_required_without_key() {
    let app = setup_auth_app();

    let response = app
        .oneshot(post_json("/api/insights", &overspending_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Authentication required");
}

#[tokio::test]
async fn test_auth_with_valid_key() {
    let app = setup_auth_app();
    let mut request = post_json("/api/insights", &overspending_body());
    request.headers_mut().insert(
        "authorization",
        format!("Bearer {}", TEST_KEY).parse().unwrap(),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_auth_with_wrong_key() {
    let app = setup_auth_app();
    let mut request = post_json("/api/insights", &overspending_body());
    request
        .headers_mut()
        .insert("authorization", "Bearer test-key-124".parse().unwrap());

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_is_public() {
    let app = setup_auth_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_security_headers() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert_eq!(
        headers.get("content-security-policy").unwrap(),
        "default-src 'none'; frame-ancestors 'none'"
    );
}

#[tokio::test]
async fn test_auth_rejects_non_bearer_scheme() {
    let app = setup_auth_app();
    let mut request = post_json("/api/insights", &overspending_body());
    request
        .headers_mut()
        .insert("authorization", format!("Basic {}", TEST_KEY).parse().unwrap());

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_core_errors_map_to_status() {
    let invalid = AppError::from_core(pennywise_core::Error::InvalidData("bad amount".into()));
    let response = invalid.into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(get_body_json(response).await["error"], "bad amount");

    let config = AppError::from_core(pennywise_core::Error::Config("secret path".into()));
    let response = config.into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Failed to process insights request");
}

#[test]
fn test_validate_api_key() {
    let keys = vec!["alpha".to_string(), "bravo-key".to_string()];
    assert!(validate_api_key("alpha", &keys));
    assert!(validate_api_key("bravo-key", &keys));
    assert!(!validate_api_key("alph", &keys));
    assert!(!validate_api_key("", &keys));
    assert!(!validate_api_key("alpha", &[]));
    // A match after a same-length miss still counts
    let keys = vec!["aaaaa".to_string(), "alpha".to_string()];
    assert!(validate_api_key("alpha", &keys));
}

#[test]
fn test_parse_api_keys() {
    assert_eq!(parse_api_keys("a, b,,c "), vec!["a", "b", "c"]);
    assert!(parse_api_keys("").is_empty());
}
