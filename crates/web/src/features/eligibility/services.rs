use sqlx::PgPool;
use storage::{
    dto::eligibility::{EligibilityCheckResult, LegacyEligibilityResult},
    error::Result,
    services::eligibility,
};
use uuid::Uuid;

/// Full eligibility verdict for a player in a tournament
pub async fn check_eligibility(
    pool: &PgPool,
    player_id: Uuid,
    tournament_id: Uuid,
) -> Result<EligibilityCheckResult> {
    eligibility::check_eligibility(pool, player_id, tournament_id).await
}

/// Baseline-only check kept for callers that predate the rules engine
pub async fn check_player_eligibility(
    pool: &PgPool,
    player_id: Uuid,
) -> Result<LegacyEligibilityResult> {
    eligibility::check_player_eligibility(pool, player_id).await
}
