use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;
use service::Store;

use crate::errors::JsonApiError;
use crate::metrics;
use crate::openapi::ApiDoc;

pub mod complaints;
pub mod users;

/// Shared handler state. The store is the only state the HTTP layer touches.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
}

impl AppState {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK")))]
pub async fn health(State(state): State<AppState>) -> Result<Json<Health>, JsonApiError> {
    let stats = state.store.stats()?;
    Ok(Json(Health::ok(stats.users, stats.complaints, stats.resolved)))
}

pub async fn metrics_text(State(state): State<AppState>) -> (StatusCode, String) {
    if let Ok(stats) = state.store.stats() {
        metrics::OPEN_COMPLAINTS.set(stats.open() as i64);
    }
    metrics::encode_metrics()
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: user routes, admin routes, and ops endpoints.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    metrics::register_all();

    // 运维端点：健康检查、指标、接口文档
    let ops = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_text))
        .route("/api-docs/openapi.json", get(openapi_json));

    // 用户侧：注册、登录（凭 secret_code）、提交与查看自己的投诉
    let user_routes = Router::new()
        .route("/register", post(users::register))
        .route("/login", get(users::login))
        .route("/submitComplaint", post(complaints::submit))
        .route("/getAllComplaintsForUser", get(complaints::list_for_user));

    // 管理侧：目前不做鉴权
    let admin_routes = Router::new()
        .route("/getAllComplaintsForAdmin", get(complaints::list_for_admin))
        .route("/viewComplaint", get(complaints::view))
        .route("/resolveComplaint", post(complaints::resolve));

    ops
        .merge(user_routes)
        .merge(admin_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
