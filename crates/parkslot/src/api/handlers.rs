//! Slot API handlers.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use super::response::{ok, ok_with_message, ApiError, ApiResponse, ApiResult};
use super::AppState;
use crate::service::InitializeSummary;
use crate::slot::ParkingSlot;

/// Body of `POST /api/slots/toggle`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleRequest {
    /// Slot number, or the text scanned from an issued code.
    pub slot_number: Option<String>,
}

/// Body of `POST /api/slots/initialize`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeRequest {
    /// How many slots to create.
    pub number_of_slots: Option<i64>,
}

/// Liveness payload.
#[derive(Debug, Serialize)]
pub struct Health {
    status: &'static str,
}

/// GET /health
pub async fn health() -> Json<ApiResponse<Health>> {
    ok(Health { status: "ok" })
}

/// GET /api/slots
pub async fn list_slots(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<ParkingSlot>>>> {
    let slots = state.service.run(|service| service.list_slots()).await?;
    Ok(ok(slots))
}

/// POST /api/slots/toggle
pub async fn toggle_slot(
    State(state): State<AppState>,
    payload: Result<Json<ToggleRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<ParkingSlot>>> {
    let Json(request) = payload?;
    let slot_ref = request
        .slot_number
        .ok_or_else(|| ApiError::bad_request("slotNumber is required"))?;

    let slot = state
        .service
        .run(move |service| service.toggle_slot(&slot_ref))
        .await?;
    Ok(ok(slot))
}

/// POST /api/slots/initialize
pub async fn initialize_slots(
    State(state): State<AppState>,
    payload: Result<Json<InitializeRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<InitializeSummary>>> {
    let Json(request) = payload?;
    let count = request
        .number_of_slots
        .ok_or_else(|| ApiError::bad_request("numberOfSlots is required"))?;

    let summary = state
        .service
        .run(move |service| service.initialize_slots(count))
        .await?;
    let message = summary.message.clone();
    Ok(ok_with_message(summary, message))
}

/// Fallback for unknown routes.
pub async fn not_found() -> ApiError {
    ApiError::not_found("route not found")
}

/// Fallback for known routes called with an unsupported method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}
