//! Prometheus Metrics Route

use axum::{extract::State, http::StatusCode, response::IntoResponse};

use crate::AppState;

/// Render metrics in Prometheus text format
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (
            StatusCode::NOT_FOUND,
            "metrics recorder not installed".to_string(),
        ),
    }
}
