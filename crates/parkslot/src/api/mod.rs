//! HTTP API.
//!
//! Routes:
//! - `GET /health`
//! - `GET /api/slots`
//! - `POST /api/slots/toggle`
//! - `POST /api/slots/initialize`
//!
//! Every response, including errors, unknown routes and unsupported
//! methods, uses the [`ApiResponse`] envelope.

mod handlers;
mod response;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::service::SlotService;

pub use handlers::{InitializeRequest, ToggleRequest};
pub use response::{ApiError, ApiResponse, ApiResult};

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The slot operations.
    pub service: SlotService,
}

impl AppState {
    /// Create state around a service handle.
    #[must_use]
    pub fn new(service: SlotService) -> Self {
        Self { service }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/slots", get(handlers::list_slots))
        .route("/api/slots/toggle", post(handlers::toggle_slot))
        .route("/api/slots/initialize", post(handlers::initialize_slots))
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .with_state(state)
        .layer(CatchPanicLayer::custom(response::handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
