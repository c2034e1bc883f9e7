use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::eligibility::{EligibilityCheckResult, LegacyEligibilityResult},
};
use uuid::Uuid;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/tournaments/{tournament_id}/players/{player_id}/eligibility",
    params(
        ("tournament_id" = Uuid, Path, description = "Tournament ID"),
        ("player_id" = Uuid, Path, description = "Player ID")
    ),
    responses(
        (status = 200, description = "Eligibility verdict with violations, warnings and next steps", body = EligibilityCheckResult)
    ),
    tag = "eligibility"
)]
pub async fn check_eligibility(
    State(db): State<Database>,
    Path((tournament_id, player_id)): Path<(Uuid, Uuid)>,
) -> Result<Response, WebError> {
    let result = services::check_eligibility(db.pool(), player_id, tournament_id).await?;

    Ok(Json(result).into_response())
}

#[utoipa::path(
    get,
    path = "/api/players/{player_id}/eligibility",
    params(
        ("player_id" = Uuid, Path, description = "Player ID")
    ),
    responses(
        (status = 200, description = "Baseline eligibility check (legacy shape)", body = LegacyEligibilityResult)
    ),
    tag = "eligibility"
)]
pub async fn check_player_eligibility(
    State(db): State<Database>,
    Path(player_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let result = services::check_player_eligibility(db.pool(), player_id).await?;

    Ok(Json(result).into_response())
}
