use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::StorageError;
use crate::models::{EligibilityRule, RuleConfig, RuleType};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EligibilityRuleResponse {
    pub rule_id: Uuid,
    pub tournament_id: Uuid,
    pub name: String,
    pub rule_type: String,
    #[schema(value_type = Object)]
    pub config: serde_json::Value,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

impl From<EligibilityRule> for EligibilityRuleResponse {
    fn from(rule: EligibilityRule) -> Self {
        Self {
            rule_id: rule.rule_id,
            tournament_id: rule.tournament_id,
            name: rule.name,
            rule_type: rule.rule_type,
            config: rule.config.0,
            is_active: rule.is_active,
            created_at: rule.created_at,
        }
    }
}

/// Request payload for creating a tournament eligibility rule. The config
/// payload is decoded against the declared rule type before anything is
/// written, so malformed rules are rejected at the door instead of being
/// silently skipped at evaluation time.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateEligibilityRuleRequest {
    pub tournament_id: Uuid,

    #[validate(length(min = 1, max = 255, message = "Rule name is required"))]
    pub name: String,

    pub rule_type: String,

    #[schema(value_type = Object)]
    pub config: serde_json::Value,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl CreateEligibilityRuleRequest {
    pub fn typed_config(&self) -> crate::error::Result<RuleConfig> {
        decode_config(&self.rule_type, &self.config)
    }
}

/// Request payload for updating a rule. The rule type is immutable; a new
/// config payload is validated against the existing type.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateEligibilityRuleRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[schema(value_type = Object)]
    pub config: Option<serde_json::Value>,

    pub is_active: Option<bool>,
}

impl UpdateEligibilityRuleRequest {
    pub fn validate_config_for(&self, rule_type: &str) -> crate::error::Result<()> {
        if let Some(config) = &self.config {
            decode_config(rule_type, config)?;
        }
        Ok(())
    }
}

fn decode_config(rule_type: &str, config: &serde_json::Value) -> crate::error::Result<RuleConfig> {
    let ty = RuleType::parse(rule_type).ok_or_else(|| {
        StorageError::InvalidRuleConfig(format!("unknown rule type '{rule_type}'"))
    })?;

    RuleConfig::decode(ty, config).map_err(|e| {
        StorageError::InvalidRuleConfig(format!("config does not match rule type {rule_type}: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_request_rejects_unknown_rule_type() {
        let req = CreateEligibilityRuleRequest {
            tournament_id: Uuid::nil(),
            name: "Seniors only".into(),
            rule_type: "SHOE_SIZE".into(),
            config: json!({}),
            is_active: true,
        };

        assert!(matches!(
            req.typed_config(),
            Err(StorageError::InvalidRuleConfig(_))
        ));
    }

    #[test]
    fn create_request_rejects_mismatched_config() {
        let req = CreateEligibilityRuleRequest {
            tournament_id: Uuid::nil(),
            name: "U20".into(),
            rule_type: "AGE_RANGE".into(),
            config: json!({ "allowedGenders": ["FEMALE"] }),
            is_active: true,
        };

        assert!(matches!(
            req.typed_config(),
            Err(StorageError::InvalidRuleConfig(_))
        ));
    }

    #[test]
    fn update_request_without_config_passes() {
        let req = UpdateEligibilityRuleRequest {
            name: Some("Renamed".into()),
            config: None,
            is_active: Some(false),
        };

        assert!(req.validate_config_for("AGE_RANGE").is_ok());
    }
}
