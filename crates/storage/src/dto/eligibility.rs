use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Blocking weight of a violation. Only `Critical` and `High` make a player
/// ineligible; the derived ordering follows declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverallStatus {
    Eligible,
    PendingReview,
    NeedsAction,
    Ineligible,
}

/// A hard finding. `can_override` marks violations an administrator may
/// waive manually; the engine only flags overridability, it never applies
/// an override itself.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Violation {
    pub rule_id: String,
    pub rule_name: String,
    pub rule_type: String,
    pub reason: String,
    pub severity: Severity,
    pub can_override: bool,
    pub suggested_action: Option<String>,
}

/// A soft finding surfaced for review. Warnings never block eligibility.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Warning {
    pub rule_id: String,
    pub rule_name: String,
    pub rule_type: String,
    pub message: String,
    pub suggested_action: Option<String>,
}

/// Aggregated status for display and decision support. The boolean flags are
/// recomputed from the raw player data, not derived from the findings list,
/// so they reflect ground truth even when no matching rule is configured.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EligibilitySummary {
    pub overall_status: OverallStatus,
    pub documents_verified: bool,
    pub consents_granted: bool,
    pub medical_clearance_valid: bool,
    pub age_eligible: bool,
    pub geographic_eligible: bool,
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EligibilityCheckResult {
    pub is_eligible: bool,
    pub violations: Vec<Violation>,
    pub warnings: Vec<Warning>,
    pub summary: EligibilitySummary,
}

/// Reduced shape returned by the pre-rules-engine eligibility check.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LegacyEligibilityResult {
    pub eligible: bool,
    pub reasons: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_orders_by_blocking_weight() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
    }

    #[test]
    fn enums_serialize_in_storage_spelling() {
        assert_eq!(
            serde_json::to_string(&Severity::Critical).unwrap(),
            "\"CRITICAL\""
        );
        assert_eq!(
            serde_json::to_string(&OverallStatus::PendingReview).unwrap(),
            "\"PENDING_REVIEW\""
        );
        assert_eq!(
            serde_json::to_string(&OverallStatus::NeedsAction).unwrap(),
            "\"NEEDS_ACTION\""
        );
    }
}
