use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use catalog_infra::{ConfigError, RefreshError, SyncError};

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn refresh_error_to_response(err: RefreshError) -> axum::response::Response {
    match err {
        RefreshError::Fetch(e) => json_error(StatusCode::BAD_GATEWAY, "feed_unavailable", e.to_string()),
        RefreshError::Parse(e) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "feed_malformed", e.to_string())
        }
    }
}

pub fn sync_error_to_response(err: SyncError) -> axum::response::Response {
    match err {
        SyncError::Config(ConfigError::Missing(keys)) => (
            StatusCode::BAD_REQUEST,
            axum::Json(json!({
                "error": "missing_configuration",
                "message": format!("missing configuration: {}", keys.join(", ")),
                "missing": keys,
            })),
        )
            .into_response(),
        SyncError::Config(e) => json_error(StatusCode::BAD_REQUEST, "invalid_configuration", e.to_string()),
        SyncError::Auth(e) => json_error(StatusCode::BAD_GATEWAY, "visma_auth_failed", e.to_string()),
    }
}
