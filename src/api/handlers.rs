// ============================================================================
// HTTP Handlers
// ============================================================================

use super::response::{self, ApiError};
use super::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use serde_json::Value;
use std::any::Any;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// `GET /`
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// `POST /api/calculate`
///
/// The body is decoded as JSON whatever the `Content-Type` says, so plain
/// `fetch` calls and form-less clients behave the same.
pub async fn calculate(State(state): State<AppState>, body: Bytes) -> Response {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(error) => {
            tracing::warn!(%error, "Invalid JSON payload");
            return ApiError::invalid_json().into_response();
        }
    };

    match state.calculator.calculate(&payload) {
        Ok(result) => response::success(&result),
        Err(error) => ApiError::from(error).into_response(),
    }
}

/// Converts a panic inside a handler into the generic 500 envelope.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(text) = panic.downcast_ref::<String>() {
        text.as_str()
    } else if let Some(text) = panic.downcast_ref::<&str>() {
        text
    } else {
        "unknown panic payload"
    };

    tracing::error!(detail, "Unexpected server error");
    ApiError::server_error().into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_panic_response_is_server_error() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = panic_response(Box::new(42_u8));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_index_is_html() {
        let Html(page) = index().await;
        assert!(page.contains("/api/calculate"));
    }
}
