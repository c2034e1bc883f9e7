use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::consent::ConsentType;
use super::document::DocumentType;
use super::player::{Gender, PlayerStatus};

/// Category of a tournament-scoped eligibility constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleType {
    AgeRange,
    Geographic,
    PlayerStatus,
    DocumentRequirement,
    ConsentRequirement,
    GenderRestriction,
    MedicalRequirement,
}

impl RuleType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "AGE_RANGE" => Some(Self::AgeRange),
            "GEOGRAPHIC" => Some(Self::Geographic),
            "PLAYER_STATUS" => Some(Self::PlayerStatus),
            "DOCUMENT_REQUIREMENT" => Some(Self::DocumentRequirement),
            "CONSENT_REQUIREMENT" => Some(Self::ConsentRequirement),
            "GENDER_RESTRICTION" => Some(Self::GenderRestriction),
            "MEDICAL_REQUIREMENT" => Some(Self::MedicalRequirement),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AgeRange => "AGE_RANGE",
            Self::Geographic => "GEOGRAPHIC",
            Self::PlayerStatus => "PLAYER_STATUS",
            Self::DocumentRequirement => "DOCUMENT_REQUIREMENT",
            Self::ConsentRequirement => "CONSENT_REQUIREMENT",
            Self::GenderRestriction => "GENDER_RESTRICTION",
            Self::MedicalRequirement => "MEDICAL_REQUIREMENT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GeographicScope {
    Ward,
    Subcounty,
    County,
}

impl GeographicScope {
    /// Human-readable unit name for violation messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ward => "ward",
            Self::Subcounty => "sub-county",
            Self::County => "county",
        }
    }
}

/// Config payloads are stored as camelCase JSON documents, the shape the
/// admin UI writes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgeRangeConfig {
    pub min_age: Option<u32>,
    pub max_age: Option<u32>,
    pub age_calculation_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeographicConfig {
    pub scope: GeographicScope,
    pub allowed_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatusConfig {
    pub allowed_statuses: Vec<PlayerStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRequirementConfig {
    pub required_documents: Vec<DocumentType>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConsentRequirementConfig {
    pub required_consents: Vec<ConsentType>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenderRestrictionConfig {
    pub allowed_genders: Vec<Gender>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRequirementConfig {
    pub require_valid_medical: bool,
    pub max_medical_age: Option<i64>,
}

/// Typed view of an eligibility rule's config, dispatched by rule type.
/// Exhaustively matched in the evaluator, so adding a rule type is a
/// compile-checked change.
#[derive(Debug, Clone)]
pub enum RuleConfig {
    AgeRange(AgeRangeConfig),
    Geographic(GeographicConfig),
    PlayerStatus(PlayerStatusConfig),
    DocumentRequirement(DocumentRequirementConfig),
    ConsentRequirement(ConsentRequirementConfig),
    GenderRestriction(GenderRestrictionConfig),
    MedicalRequirement(MedicalRequirementConfig),
}

impl RuleConfig {
    pub fn decode(
        rule_type: RuleType,
        config: &serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        Ok(match rule_type {
            RuleType::AgeRange => Self::AgeRange(serde_json::from_value(config.clone())?),
            RuleType::Geographic => Self::Geographic(serde_json::from_value(config.clone())?),
            RuleType::PlayerStatus => Self::PlayerStatus(serde_json::from_value(config.clone())?),
            RuleType::DocumentRequirement => {
                Self::DocumentRequirement(serde_json::from_value(config.clone())?)
            }
            RuleType::ConsentRequirement => {
                Self::ConsentRequirement(serde_json::from_value(config.clone())?)
            }
            RuleType::GenderRestriction => {
                Self::GenderRestriction(serde_json::from_value(config.clone())?)
            }
            RuleType::MedicalRequirement => {
                Self::MedicalRequirement(serde_json::from_value(config.clone())?)
            }
        })
    }
}

/// Admin-configured, tournament-scoped constraint. Evaluated read-only by
/// the eligibility engine when `is_active`.
#[derive(Debug, Clone, FromRow)]
pub struct EligibilityRule {
    pub rule_id: Uuid,
    pub tournament_id: Uuid,
    pub name: String,
    pub rule_type: String,
    pub config: sqlx::types::Json<serde_json::Value>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

impl EligibilityRule {
    /// Decode the JSONB payload against the declared rule type.
    ///
    /// `None` means the rule type itself is unrecognized (written by a newer
    /// schema) and the rule passes through unevaluated; `Some(Err(_))` means
    /// the type is known but the payload does not match its shape.
    pub fn typed_config(&self) -> Option<Result<RuleConfig, serde_json::Error>> {
        RuleType::parse(&self.rule_type).map(|ty| RuleConfig::decode(ty, &self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_age_range_config() {
        let config = json!({
            "minAge": 18,
            "maxAge": 35,
            "ageCalculationDate": "2025-01-01"
        });

        let decoded = RuleConfig::decode(RuleType::AgeRange, &config).unwrap();
        match decoded {
            RuleConfig::AgeRange(c) => {
                assert_eq!(c.min_age, Some(18));
                assert_eq!(c.max_age, Some(35));
                assert_eq!(
                    c.age_calculation_date,
                    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
                );
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn age_bounds_are_optional() {
        let config = json!({ "ageCalculationDate": "2025-01-01" });
        let decoded = RuleConfig::decode(RuleType::AgeRange, &config).unwrap();
        match decoded {
            RuleConfig::AgeRange(c) => {
                assert_eq!(c.min_age, None);
                assert_eq!(c.max_age, None);
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn rejects_payload_not_matching_declared_type() {
        let config = json!({ "scope": "COUNTY", "allowedIds": ["C-NAIROBI"] });
        assert!(RuleConfig::decode(RuleType::AgeRange, &config).is_err());
    }

    #[test]
    fn decodes_geographic_config() {
        let config = json!({ "scope": "SUBCOUNTY", "allowedIds": ["SC-WESTLANDS"] });
        let decoded = RuleConfig::decode(RuleType::Geographic, &config).unwrap();
        match decoded {
            RuleConfig::Geographic(c) => {
                assert_eq!(c.scope, GeographicScope::Subcounty);
                assert_eq!(c.allowed_ids, vec!["SC-WESTLANDS".to_string()]);
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_enum_value_in_config() {
        let config = json!({ "allowedStatuses": ["ACTIVE", "ON_LOAN"] });
        assert!(RuleConfig::decode(RuleType::PlayerStatus, &config).is_err());
    }
}
