//! Pennywise Web Server
//!
//! Stateless JSON API over the insights engine. Callers post their expense
//! and income records and get the analysis back; nothing is kept between
//! requests.
//!
//! Routes (under `/api`):
//! - `GET  /health` - liveness, no key needed
//! - `POST /insights` - full report
//! - `POST /insights/stats` - aggregated stats only
//! - `GET  /insights/config` - thresholds in effect
//!
//! Insight routes need `Authorization: Bearer <key>` with a key from
//! `PENNYWISE_API_KEYS` unless the server runs with `--no-auth`.

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Request, State},
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use subtle::{Choice, ConstantTimeEq};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use pennywise_core::{InsightEngine, InsightsConfig};

mod handlers;

/// Maximum request body size (2 MB)
pub const MAX_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Environment variable with comma-separated API keys
pub const API_KEYS_ENV: &str = "PENNYWISE_API_KEYS";

/// Authorization header for API key auth
const AUTHORIZATION_HEADER: &str = "authorization";

/// Paths reachable without credentials
const PUBLIC_PATHS: &[&str] = &["/api/health"];

/// Listener-independent server settings
#[derive(Clone)]
pub struct ServerConfig {
    /// Insight routes need an API key (default true)
    pub require_auth: bool,
    /// Browser origins allowed to call the API; empty means same-origin
    pub allowed_origins: Vec<String>,
    /// Keys accepted as `Bearer <key>`
    pub api_keys: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            require_auth: true,
            allowed_origins: vec![],
            api_keys: vec![],
        }
    }
}

/// Split a comma-separated key list, dropping blanks
pub fn parse_api_keys(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// State shared by every handler
pub struct AppState {
    pub config: ServerConfig,
    pub engine: InsightEngine,
}

fn bearer_key(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION_HEADER)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Reject calls to the insight routes that lack a configured API key
async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let authorized = !state.config.require_auth
        || PUBLIC_PATHS.contains(&request.uri().path())
        || bearer_key(&request).is_some_and(|key| validate_api_key(key, &state.config.api_keys));
    if authorized {
        return next.run(request).await;
    }

    warn!(
        path = %request.uri().path(),
        key_presented = bearer_key(&request).is_some(),
        "Rejected insights request"
    );
    AppError::unauthorized().into_response()
}

/// True if `provided` equals one of `valid_keys`
///
/// Every same-length key is compared in constant time and the results are
/// OR-ed, so there is no early exit on the first match.
fn validate_api_key(provided: &str, valid_keys: &[String]) -> bool {
    let provided = provided.as_bytes();
    let matched = valid_keys
        .iter()
        .map(String::as_bytes)
        .filter(|key| key.len() == provided.len())
        .fold(Choice::from(0), |found, key| found | key.ct_eq(provided));
    matched.into()
}

/// Same-origin only unless origins are configured; the API is GET and POST
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    if origins.is_empty() {
        layer
    } else {
        layer.allow_origin(origins)
    }
}

fn response_header(name: HeaderName, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(name, HeaderValue::from_static(value))
}

/// Build the `/api` router around one engine instance
pub fn create_router(config: ServerConfig, insights: InsightsConfig) -> Router {
    let cors = cors_layer(&config.allowed_origins);
    let state = Arc::new(AppState {
        config,
        engine: InsightEngine::with_config(insights),
    });

    let api_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/insights", post(handlers::generate_insights))
        .route("/insights/stats", post(handlers::generate_stats))
        .route("/insights/config", get(handlers::get_config));

    // Responses are JSON only: no sniffing, framing or subresources
    let json_only_headers = ServiceBuilder::new()
        .layer(response_header(header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
        .layer(response_header(header::X_FRAME_OPTIONS, "DENY"))
        .layer(response_header(
            header::CONTENT_SECURITY_POLICY,
            "default-src 'none'; frame-ancestors 'none'",
        ));

    Router::new()
        .nest("/api", api_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(json_only_headers)
}

/// Bind `host:port` and serve until the process stops
pub async fn serve_with_config(
    host: &str,
    port: u16,
    config: ServerConfig,
    insights: InsightsConfig,
) -> anyhow::Result<()> {
    if !config.require_auth {
        warn!("⚠️  Running without API keys; keep this server on localhost");
    } else if config.api_keys.is_empty() {
        warn!(
            "⚠️  No API keys in {}; every insights request will be rejected",
            API_KEYS_ENV
        );
    }

    let app = create_router(config, insights);
    let addr = format!("{}:{}", host, port);

    info!("Pennywise API listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Handler error rendered as `{"error": "..."}`
///
/// Bad records and parameters become 400 with the engine's message. Other
/// failures are logged here and reported as a bare 500.
pub struct AppError {
    status: StatusCode,
    message: String,
    source: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
            source: None,
        }
    }

    pub fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: "Authentication required".to_string(),
            source: None,
        }
    }

    /// Map an engine-side error: invalid input is the caller's, the rest is ours
    pub fn from_core(err: pennywise_core::Error) -> Self {
        match err {
            pennywise_core::Error::InvalidData(msg) => Self::bad_request(msg),
            other => Self::from(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(err) = &self.source {
            error!(status = %self.status, error = %err, "Insights request failed");
        }

        (self.status, Json(serde_json::json!({ "error": self.message }))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Failed to process insights request".to_string(),
            source: Some(err.into()),
        }
    }
}

#[cfg(test)]
mod tests;
