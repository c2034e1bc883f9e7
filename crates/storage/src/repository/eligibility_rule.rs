use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::dto::rule::{CreateEligibilityRuleRequest, UpdateEligibilityRuleRequest};
use crate::error::{Result, StorageError};
use crate::models::EligibilityRule;

pub struct EligibilityRuleRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EligibilityRuleRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Active rules for a tournament, in creation order. This is the set the
    /// eligibility engine evaluates.
    pub async fn list_active_for_tournament(
        &self,
        tournament_id: Uuid,
    ) -> Result<Vec<EligibilityRule>> {
        let rules: Vec<EligibilityRule> = sqlx::query_as(
            r#"
            SELECT * FROM eligibility_rules
            WHERE tournament_id = $1 AND is_active
            ORDER BY created_at
            "#,
        )
        .bind(tournament_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rules)
    }

    /// All rules for a tournament, including inactive ones, for admin views
    pub async fn list_for_tournament(&self, tournament_id: Uuid) -> Result<Vec<EligibilityRule>> {
        let rules: Vec<EligibilityRule> = sqlx::query_as(
            r#"
            SELECT * FROM eligibility_rules
            WHERE tournament_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(tournament_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rules)
    }

    pub async fn find_by_id(&self, rule_id: Uuid) -> Result<EligibilityRule> {
        let rule: Option<EligibilityRule> =
            sqlx::query_as("SELECT * FROM eligibility_rules WHERE rule_id = $1")
                .bind(rule_id)
                .fetch_optional(self.pool)
                .await?;

        rule.ok_or(StorageError::NotFound)
    }

    pub async fn create(&self, req: &CreateEligibilityRuleRequest) -> Result<EligibilityRule> {
        let rule: EligibilityRule = sqlx::query_as(
            r#"
            INSERT INTO eligibility_rules (tournament_id, name, rule_type, config, is_active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(req.tournament_id)
        .bind(&req.name)
        .bind(&req.rule_type)
        .bind(Json(&req.config))
        .bind(req.is_active)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            let err = StorageError::from(e);
            if err.is_foreign_key_violation() {
                StorageError::ConstraintViolation("Tournament does not exist".to_string())
            } else {
                err
            }
        })?;

        Ok(rule)
    }

    pub async fn update(
        &self,
        rule_id: Uuid,
        existing: &EligibilityRule,
        req: &UpdateEligibilityRuleRequest,
    ) -> Result<EligibilityRule> {
        let name = req.name.as_ref().unwrap_or(&existing.name);
        let config = req.config.as_ref().unwrap_or(&existing.config.0);
        let is_active = req.is_active.unwrap_or(existing.is_active);

        let rule: Option<EligibilityRule> = sqlx::query_as(
            r#"
            UPDATE eligibility_rules
            SET name = $2, config = $3, is_active = $4
            WHERE rule_id = $1
            RETURNING *
            "#,
        )
        .bind(rule_id)
        .bind(name)
        .bind(Json(config))
        .bind(is_active)
        .fetch_optional(self.pool)
        .await?;

        rule.ok_or(StorageError::NotFound)
    }

    pub async fn delete(&self, rule_id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM eligibility_rules WHERE rule_id = $1")
            .bind(rule_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
