use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::candidate_dto::{
        CoolingPeriodQuery, CreateCandidatePayload, RecentQuery, UpdateCandidatePayload,
    },
    error::Result,
    middleware::auth::Claims,
    services::scope::CandidateScope,
    AppState,
};

const DEFAULT_RECENT_LIMIT: i64 = 5;

async fn resolve_scope(state: &AppState, claims: &Claims) -> Result<CandidateScope> {
    CandidateScope::resolve(&state.pool, claims.sub, claims.role()).await
}

#[utoipa::path(
    get,
    path = "/api/candidates",
    responses(
        (status = 200, description = "Candidates visible to the caller"),
        (status = 401, description = "Missing or invalid token")
    )
)]
#[axum::debug_handler]
pub async fn list_candidates(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let scope = resolve_scope(&state, &claims).await?;
    let candidates = state.candidate_service.list(&scope).await?;
    Ok(Json(candidates))
}

#[utoipa::path(
    get,
    path = "/api/candidates/{id}",
    params(("id" = Uuid, Path, description = "Candidate ID")),
    responses(
        (status = 200, description = "Candidate found"),
        (status = 404, description = "Candidate not found or outside the caller's scope")
    )
)]
#[axum::debug_handler]
pub async fn get_candidate(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let scope = resolve_scope(&state, &claims).await?;
    let candidate = state.candidate_service.get(&scope, id).await?;
    Ok(Json(candidate))
}

#[utoipa::path(
    post,
    path = "/api/candidates",
    request_body = CreateCandidatePayload,
    responses(
        (status = 201, description = "Candidate created, owned by the caller"),
        (status = 400, description = "Missing required field")
    )
)]
#[axum::debug_handler]
pub async fn create_candidate(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateCandidatePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let candidate = state.candidate_service.create(payload, claims.sub).await?;
    Ok((StatusCode::CREATED, Json(candidate)))
}

#[utoipa::path(
    put,
    path = "/api/candidates/{id}",
    params(("id" = Uuid, Path, description = "Candidate ID")),
    request_body = UpdateCandidatePayload,
    responses(
        (status = 200, description = "Candidate updated"),
        (status = 404, description = "Candidate not found or outside the caller's scope")
    )
)]
#[axum::debug_handler]
pub async fn update_candidate(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCandidatePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let scope = resolve_scope(&state, &claims).await?;
    let candidate = state.candidate_service.update(&scope, id, payload).await?;
    Ok(Json(candidate))
}

#[utoipa::path(
    delete,
    path = "/api/candidates/{id}",
    params(("id" = Uuid, Path, description = "Candidate ID")),
    responses(
        (status = 200, description = "Candidate deleted"),
        (status = 404, description = "Candidate not found or outside the caller's scope")
    )
)]
#[axum::debug_handler]
pub async fn delete_candidate(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let scope = resolve_scope(&state, &claims).await?;
    state.candidate_service.delete(&scope, id).await?;
    Ok(Json(
        serde_json::json!({ "message": "Candidate deleted successfully" }),
    ))
}

#[axum::debug_handler]
pub async fn recent_candidates(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<RecentQuery>,
) -> Result<impl IntoResponse> {
    let scope = resolve_scope(&state, &claims).await?;
    let limit = query.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    let candidates = state.candidate_service.recent(&scope, limit).await?;
    Ok(Json(candidates))
}

#[utoipa::path(
    get,
    path = "/api/candidates/statistics/st",
    responses(
        (status = 200, description = "Scoped KPI counts and the calendar-year monthly series"),
        (status = 401, description = "Missing or invalid token")
    )
)]
#[axum::debug_handler]
pub async fn statistics(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let scope = resolve_scope(&state, &claims).await?;
    let stats = state.stats_service.statistics(&scope).await?;
    Ok(Json(stats))
}

/// Lookup backing the client-side 30-day resubmission rule. Returns the
/// matching submission dates only; the window comparison stays with the
/// caller.
#[axum::debug_handler]
pub async fn cooling_period_check(
    State(state): State<AppState>,
    Query(query): Query<CoolingPeriodQuery>,
) -> Result<impl IntoResponse> {
    query.validate()?;
    let dates = state
        .candidate_service
        .cooling_period_check(&query.phone_number, &query.email, &query.client)
        .await?;
    Ok(Json(dates))
}
