use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use credit_risk::{credit_router, CreditContext};
use serde::Serialize;
use std::sync::Arc;

/// Body of the health and readiness endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) struct ServiceStatus {
    pub(crate) status: &'static str,
}

impl ServiceStatus {
    fn new(status: &'static str) -> Json<Self> {
        Json(Self { status })
    }
}

/// Credit API plus the operational endpoints. Expects an `Extension<AppState>` layer.
pub(crate) fn with_service_routes(context: Arc<CreditContext>) -> Router {
    credit_router(context)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<ServiceStatus> {
    ServiceStatus::new("ok")
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    if state.is_ready() {
        (StatusCode::OK, ServiceStatus::new("ready"))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            ServiceStatus::new("initializing"),
        )
    }
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
