use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::common::{PaginatedResponse, PaginationParams},
    dto::player::{PlayerDetailResponse, PlayerResponse},
};
use uuid::Uuid;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/players",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated list of players", body = PaginatedResponse<PlayerResponse>),
        (status = 400, description = "Invalid pagination parameters")
    ),
    tag = "players"
)]
pub async fn list_players(
    State(db): State<Database>,
    Query(params): Query<PaginationParams>,
) -> Result<Response, WebError> {
    params.validate().map_err(WebError::BadRequest)?;

    let (players, total) =
        services::list_players(db.pool(), params.limit(), params.offset()).await?;

    let data: Vec<PlayerResponse> = players.into_iter().map(PlayerResponse::from).collect();
    let response = PaginatedResponse::new(data, params.page, params.page_size, total);

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/players/{player_id}",
    params(
        ("player_id" = Uuid, Path, description = "Player ID")
    ),
    responses(
        (status = 200, description = "Player with geography, documents and consents", body = PlayerDetailResponse),
        (status = 404, description = "Player not found")
    ),
    tag = "players"
)]
pub async fn get_player(
    State(db): State<Database>,
    Path(player_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let player = services::get_player_detail(db.pool(), player_id).await?;

    Ok(Json(player).into_response())
}

#[utoipa::path(
    get,
    path = "/api/players/upid/{upid}",
    params(
        ("upid" = String, Path, description = "Unique player identifier")
    ),
    responses(
        (status = 200, description = "Player found", body = PlayerResponse),
        (status = 404, description = "Player not found")
    ),
    tag = "players"
)]
pub async fn get_player_by_upid(
    State(db): State<Database>,
    Path(upid): Path<String>,
) -> Result<Response, WebError> {
    let player = services::get_player_by_upid(db.pool(), &upid).await?;

    Ok(Json(PlayerResponse::from(player)).into_response())
}
