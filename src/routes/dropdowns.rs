use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::dropdown_dto::{CreateDropdownPayload, UpdateDropdownPayload},
    error::Result,
    AppState,
};

/// Field-name → option-list map consumed by every candidate form render.
#[axum::debug_handler]
pub async fn get_dropdowns(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let dropdowns = state.dropdown_service.get_all().await?;
    Ok(Json(dropdowns))
}

#[axum::debug_handler]
pub async fn get_dropdown(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let dropdown = state.dropdown_service.get(id).await?;
    Ok(Json(dropdown))
}

#[utoipa::path(
    post,
    path = "/api/dropdowns",
    request_body = CreateDropdownPayload,
    responses(
        (status = 201, description = "Dropdown created"),
        (status = 400, description = "Duplicate field name")
    )
)]
#[axum::debug_handler]
pub async fn create_dropdown(
    State(state): State<AppState>,
    Json(payload): Json<CreateDropdownPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let dropdown = state.dropdown_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(dropdown)))
}

#[axum::debug_handler]
pub async fn update_dropdown(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDropdownPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let dropdown = state.dropdown_service.update(id, payload).await?;
    Ok(Json(dropdown))
}

#[axum::debug_handler]
pub async fn delete_dropdown(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.dropdown_service.delete(id).await?;
    Ok(Json(json!({ "message": "Dropdown deleted successfully" })))
}
