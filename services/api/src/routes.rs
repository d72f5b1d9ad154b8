use crate::assets::{content_type, resolve_asset_path};
use crate::infra::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::DefaultBodyLimit;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde_json::{json, Value};
use std::io::ErrorKind;
use story_eval::enrichment::enrich;
use story_eval::error::AppError;
use story_eval::evaluation::{evaluate, EvaluationResult, PayloadError, StoryPayload};
use tower_http::cors::CorsLayer;
use tracing::warn;

/// Largest JSON body accepted by the evaluation endpoint.
pub(crate) const EVALUATION_BODY_LIMIT: usize = 1024 * 1024;

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/ai/eval", post(evaluate_endpoint))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .fallback(static_asset)
        .layer(DefaultBodyLimit::max(EVALUATION_BODY_LIMIT))
        .layer(CorsLayer::permissive())
        .layer(Extension(state))
}

pub(crate) async fn evaluate_endpoint(
    Extension(state): Extension<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<EvaluationResult>, AppError> {
    let Json(document) = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            PayloadError::TooLarge {
                limit: EVALUATION_BODY_LIMIT,
            }
        } else {
            PayloadError::Body(rejection.body_text())
        }
    })?;
    let payload = StoryPayload::from_value(document)?;

    let base = evaluate(&payload);
    let result = enrich(base, &payload, state.summarizer.clone()).await;
    Ok(Json(result))
}

pub(crate) async fn healthcheck() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn static_asset(
    Extension(state): Extension<AppState>,
    method: Method,
    uri: Uri,
) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return not_found();
    }
    let Some(mut path) = resolve_asset_path(&state.static_dir, uri.path()) else {
        return not_found();
    };
    if let Ok(metadata) = tokio::fs::metadata(&path).await {
        if metadata.is_dir() {
            path.push("index.html");
        }
    }

    match tokio::fs::read(&path).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, content_type(&path))], bytes).into_response(),
        Err(err) if err.kind() == ErrorKind::NotFound => not_found(),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "static asset unreadable");
            AppError::from(err).into_response()
        }
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" }))).into_response()
}
