use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    response::{IntoResponse, Response},
};
use storage::dto::{
    athlete::{AthleteListQuery, AthleteResponse, AthleteView},
    common::{PaginatedResponse, PaginationParams},
};

use crate::error::{WebError, WebResult};
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/athletes/",
    params(AthleteListQuery),
    responses(
        (status = 200, description = "Athletes matching the filters", body = Vec<AthleteResponse>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "athletes"
)]
pub async fn list_athletes(
    State(state): State<AppState>,
    query: Result<Query<AthleteListQuery>, QueryRejection>,
) -> WebResult<Response> {
    let Query(query) = query.map_err(|e| WebError::BadRequest(e.body_text()))?;
    let (filter, page) = query.into_parts();

    let athletes = services::list_athletes(state.athletes(), &filter, page).await?;

    let response: Vec<AthleteResponse> = athletes.into_iter().map(AthleteResponse::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/athletes/all",
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of athlete views", body = PaginatedResponse<AthleteView>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "athletes"
)]
pub async fn list_all_athletes(
    State(state): State<AppState>,
    query: Result<Query<PaginationParams>, QueryRejection>,
) -> WebResult<Response> {
    let Query(page) = query.map_err(|e| WebError::BadRequest(e.body_text()))?;

    let (views, total_items) =
        services::list_athlete_views(state.athletes(), state.enrichment(), page).await?;

    Ok(Json(PaginatedResponse::new(views, page, total_items)).into_response())
}
