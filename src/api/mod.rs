// ============================================================================
// HTTP API Module
// Routes, handlers and response envelopes for the web front end
// ============================================================================

mod handlers;
pub mod response;

use crate::engine::Calculator;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

pub use handlers::panic_response;
pub use response::{ApiError, CalculationData, Envelope, ErrorBody, ErrorCode};

/// Shared state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub calculator: Arc<Calculator>,
}

impl AppState {
    pub fn new(calculator: Calculator) -> Self {
        Self {
            calculator: Arc::new(calculator),
        }
    }
}

/// Build the application router.
///
/// - `GET /` serves the calculator page
/// - `POST /api/calculate` runs one calculation
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/calculate", post(handlers::calculate))
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
}
