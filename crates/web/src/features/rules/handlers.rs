use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::rule::{
        CreateEligibilityRuleRequest, EligibilityRuleResponse, UpdateEligibilityRuleRequest,
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/tournaments/{tournament_id}/rules",
    params(
        ("tournament_id" = Uuid, Path, description = "Tournament ID")
    ),
    responses(
        (status = 200, description = "Eligibility rules configured for the tournament", body = Vec<EligibilityRuleResponse>)
    ),
    tag = "rules"
)]
pub async fn list_tournament_rules(
    State(db): State<Database>,
    Path(tournament_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let rules = services::list_tournament_rules(db.pool(), tournament_id).await?;

    Ok(Json(rules).into_response())
}

#[utoipa::path(
    post,
    path = "/api/rules",
    request_body = CreateEligibilityRuleRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Rule created", body = EligibilityRuleResponse),
        (status = 400, description = "Validation error or malformed rule config"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Tournament does not exist")
    ),
    tag = "rules"
)]
pub async fn create_rule(
    State(db): State<Database>,
    Json(req): Json<CreateEligibilityRuleRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let rule = services::create_rule(db.pool(), &req).await?;

    Ok((
        StatusCode::CREATED,
        Json(EligibilityRuleResponse::from(rule)),
    )
        .into_response())
}

#[utoipa::path(
    put,
    path = "/api/rules/{rule_id}",
    params(
        ("rule_id" = Uuid, Path, description = "Rule ID")
    ),
    request_body = UpdateEligibilityRuleRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Rule updated", body = EligibilityRuleResponse),
        (status = 400, description = "Validation error or malformed rule config"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Rule not found")
    ),
    tag = "rules"
)]
pub async fn update_rule(
    State(db): State<Database>,
    Path(rule_id): Path<Uuid>,
    Json(req): Json<UpdateEligibilityRuleRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let rule = services::update_rule(db.pool(), rule_id, &req).await?;

    Ok(Json(EligibilityRuleResponse::from(rule)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/rules/{rule_id}",
    params(
        ("rule_id" = Uuid, Path, description = "Rule ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Rule deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Rule not found")
    ),
    tag = "rules"
)]
pub async fn delete_rule(
    State(db): State<Database>,
    Path(rule_id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_rule(db.pool(), rule_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
