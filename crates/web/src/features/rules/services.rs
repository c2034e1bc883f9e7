use sqlx::PgPool;
use storage::{
    dto::rule::{
        CreateEligibilityRuleRequest, EligibilityRuleResponse, UpdateEligibilityRuleRequest,
    },
    error::Result,
    models::EligibilityRule,
    repository::eligibility_rule::EligibilityRuleRepository,
};
use uuid::Uuid;

/// All rules configured for a tournament, active and inactive
pub async fn list_tournament_rules(
    pool: &PgPool,
    tournament_id: Uuid,
) -> Result<Vec<EligibilityRuleResponse>> {
    let rules = EligibilityRuleRepository::new(pool)
        .list_for_tournament(tournament_id)
        .await?;

    Ok(rules.into_iter().map(EligibilityRuleResponse::from).collect())
}

/// Create a rule after decoding its config against the declared type.
/// Malformed payloads never reach the table.
pub async fn create_rule(
    pool: &PgPool,
    req: &CreateEligibilityRuleRequest,
) -> Result<EligibilityRule> {
    req.typed_config()?;

    EligibilityRuleRepository::new(pool).create(req).await
}

pub async fn update_rule(
    pool: &PgPool,
    rule_id: Uuid,
    req: &UpdateEligibilityRuleRequest,
) -> Result<EligibilityRule> {
    let repo = EligibilityRuleRepository::new(pool);
    let existing = repo.find_by_id(rule_id).await?;

    req.validate_config_for(&existing.rule_type)?;

    repo.update(rule_id, &existing, req).await
}

pub async fn delete_rule(pool: &PgPool, rule_id: Uuid) -> Result<()> {
    EligibilityRuleRepository::new(pool).delete(rule_id).await
}
