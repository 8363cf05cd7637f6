use crate::AppState;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use serde_json::json;

/// GET / - Service banner
pub async fn root() -> Response {
    Json(json!({ "message": "EventEase backend is running!" })).into_response()
}

/// GET /health - Component status; 503 when the database is unreachable
pub async fn health(State(state): State<AppState>) -> Response {
    let database_ok = match ee_db::ping(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            log::error!("Health check database ping failed: {}", e);
            false
        }
    };

    let provider = if state.verifier.is_configured() {
        "configured"
    } else if state.dev_fallback {
        "development_fallback"
    } else {
        "unavailable"
    };

    let (status_text, database) = if database_ok {
        ("healthy", "operational")
    } else {
        ("unhealthy", "unreachable")
    };

    let health = json!({
        "status": status_text,
        "version": env!("CARGO_PKG_VERSION"),
        "components": {
            "database": database,
            "identity_provider": provider,
        },
        "provider_configured": state.verifier.is_configured(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    let status = if database_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(health)).into_response()
}

/// GET /live - Liveness probe (is the process alive?)
pub async fn liveness() -> Response {
    (StatusCode::OK, "OK").into_response()
}

/// GET /ready - Readiness probe; ready once the database answers
pub async fn readiness(State(state): State<AppState>) -> Response {
    match ee_db::ping(&state.pool).await {
        Ok(()) => (StatusCode::OK, "Ready").into_response(),
        Err(e) => {
            log::warn!("Readiness check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "Not ready").into_response()
        }
    }
}
