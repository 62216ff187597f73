//! HTTP handlers.
//!
//! ```text
//! GET  /api/?latitude=..&longitude=..&distances=2,5,7[&hex_size&resolution&deintersect&profile&provider]
//! POST /api/   (JSON request body, same shape as the CLI's stdin)
//! ```
//!
//! Both answer with a GeoJSON FeatureCollection.  Failures answer with
//! `{"code": 400|500, "status": "...", "message": "..."}`: 400 for request
//! problems (bad parameters, validation, untraceable shapes), 500 for
//! internal faults.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tokio::runtime::Handle;
use tokio::task;
use tower_http::cors::{Any, CorsLayer};

use iso_core::{IsoConfig, ProviderConfig, ProviderKind, RequestBody};
use iso_output::FeatureCollection;
use iso_pipeline::{Isodist, PipelineError, TracingObserver};
use iso_route::{AnyRouter, RouteResult};

use crate::params::{self, parse_query};

// ── State ─────────────────────────────────────────────────────────────────────

/// One router per available provider, built at startup.
pub struct AppState {
    routers: HashMap<ProviderKind, AnyRouter>,
}

impl AppState {
    /// HTTP providers are always available; the embedded one only when a
    /// network path is configured.
    pub fn from_config(config: &ProviderConfig) -> RouteResult<Self> {
        let mut routers = HashMap::new();
        for kind in [ProviderKind::Osrm, ProviderKind::Valhalla] {
            routers.insert(kind, AnyRouter::from_config(kind, config, None)?);
        }
        if config.network_path.is_some() {
            let embedded = AnyRouter::load_embedded(config)?;
            routers.insert(
                ProviderKind::Embedded,
                AnyRouter::from_config(ProviderKind::Embedded, config, Some(embedded))?,
            );
        }
        Ok(Self { routers })
    }

    fn router(&self, kind: ProviderKind) -> Result<&AnyRouter, ApiError> {
        self.routers
            .get(&kind)
            .ok_or_else(|| ApiError::bad_request(format!("Provider {kind} is not available on this server.")))
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/", get(get_isodist).post(post_isodist))
        .layer(cors)
        .with_state(state)
}

// ── Handlers ──────────────────────────────────────────────────────────────────

async fn get_isodist(
    State(state): State<Arc<AppState>>,
    Query(query): Query<params::Query>,
) -> Result<Json<FeatureCollection>, ApiError> {
    let body = parse_query(&query).map_err(ApiError::bad_request)?;
    run(state, body).await
}

async fn post_isodist(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RequestBody>, JsonRejection>,
) -> Result<Json<FeatureCollection>, ApiError> {
    let Json(body) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    run(state, body).await
}

/// Hull construction, boolean ops and embedded Dijkstra are CPU-bound, so
/// the whole computation runs on the blocking pool and drives its router
/// futures there with the runtime handle.
pub async fn run(state: Arc<AppState>, body: RequestBody) -> Result<Json<FeatureCollection>, ApiError> {
    let origin = body
        .origin()
        .ok_or_else(|| ApiError::bad_request("Missing required parameter \"origin\"."))?;
    let distances = body.distances();
    let metadata = body.metadata();

    let mut config = IsoConfig::default();
    body.apply_to(&mut config);
    // Fail fast on a missing provider before taking a blocking thread.
    state.router(config.provider)?;

    let handle = Handle::current();
    let rings = task::spawn_blocking(move || {
        let router = state.router(config.provider)?;
        handle
            .block_on(Isodist::new(config, router).compute(origin, &distances, &metadata, &mut TracingObserver))
            .map_err(ApiError::from)
    })
    .await
    .map_err(|e| ApiError::internal(format!("isodistance task failed: {e}")))??;

    Ok(Json(FeatureCollection::from(&rings)))
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct ApiError {
    pub status:  StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code:    u16,
    status:  &'a str,
    message: &'a str,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::warn!(%message, "bad request");
        Self { status: StatusCode::BAD_REQUEST, message }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::error!(%message, "internal error");
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, message }
    }
}

impl From<PipelineError> for ApiError {
    fn from(e: PipelineError) -> Self {
        if e.is_known() {
            return ApiError::bad_request(e.to_string());
        }
        tracing::error!(error = ?e, "isodistance computation failed");
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, message: e.to_string() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            code:    self.status.as_u16(),
            status:  self.status.canonical_reason().unwrap_or("Error"),
            message: &self.message,
        };
        (self.status, Json(body)).into_response()
    }
}
