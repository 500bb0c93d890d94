use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use plum_core::services::NoteService;
use plum_core::sync::{decode_batch, SYNC_PATH};
use plum_core::TransferNote;
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    notes: NoteService,
}

impl AppState {
    pub fn from_config(config: Arc<AppConfig>) -> Self {
        Self {
            notes: NoteService::open_path(config.notes_path.clone(), config.author.clone())
                .with_max_payload_bytes(config.max_payload_bytes),
            config,
        }
    }

    pub const fn notes(&self) -> &NoteService {
        &self.notes
    }
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(SYNC_PATH, post(sync_exchange).fallback(method_not_allowed))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: i64,
}

async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().timestamp(),
    })
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

async fn sync_exchange(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Body,
) -> Result<Json<Vec<TransferNote>>, AppError> {
    let limit = state.config.max_payload_bytes;
    let declared = declared_length(&headers).inspect_err(|error| {
        tracing::warn!(endpoint = "sync", %error, "Rejected sync request");
    })?;
    if declared > limit {
        tracing::warn!(endpoint = "sync", declared, limit, "Rejected oversized sync payload");
        return Err(AppError::bad_request(format!(
            "payload of {declared} bytes exceeds the {limit} byte limit"
        )));
    }

    let payload = axum::body::to_bytes(body, limit)
        .await
        .map_err(|error| AppError::bad_request(format!("cannot read request body: {error}")))?;
    let incoming = decode_batch(&payload, limit).inspect_err(|error| {
        tracing::warn!(endpoint = "sync", %error, "Rejected sync payload");
    })?;

    let received = incoming.len();
    let outgoing = state
        .notes
        .respond_to_exchange(incoming)
        .await
        .inspect_err(|error| {
            tracing::error!(endpoint = "sync", %error, "Sync exchange failed");
        })?;

    tracing::info!(
        endpoint = "sync",
        received,
        sent = outgoing.len(),
        "notes synced!"
    );
    Ok(Json(outgoing))
}

/// Content-Length of the request; unknown lengths are refused
fn declared_length(headers: &HeaderMap) -> Result<usize, AppError> {
    let value = headers
        .get(header::CONTENT_LENGTH)
        .ok_or_else(|| AppError::bad_request("missing Content-Length"))?;
    value
        .to_str()
        .ok()
        .and_then(|raw| raw.trim().parse::<usize>().ok())
        .ok_or_else(|| AppError::bad_request("invalid Content-Length"))
}
