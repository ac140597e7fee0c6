use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use blurcheck::BlurReport;

use crate::app::AppState;
use crate::error::ApiError;

#[derive(Debug, Default, serde::Deserialize)]
pub(crate) struct CheckBlurParams {
    /// Overrides the server's default threshold for this request only
    threshold: Option<f64>,
}

/// `POST /check-blur`: score the raw request body
#[tracing::instrument(skip_all, fields(bytes = tracing::field::Empty))]
pub(crate) async fn check_blur(
    State(state): State<Arc<AppState>>,
    params: Result<Query<CheckBlurParams>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<BlurReport>, ApiError> {
    let Query(params) = params?;
    let body = body?;
    tracing::Span::current().record("bytes", body.len());

    if body.is_empty() {
        return Err(ApiError::missing_data());
    }

    let config = state.blur.with_threshold(params.threshold)?;

    // decoding and filtering are CPU-bound, keep them off the executor
    let report = tokio::task::spawn_blocking(move || blurcheck::check_blur(&body, &config))
        .await??;

    tracing::debug!(is_blurry = report.is_blurry, score = report.score, "Scored image");
    Ok(Json(report))
}

/// `GET /health`: liveness probe
pub(crate) async fn health() -> &'static str {
    "ok"
}
