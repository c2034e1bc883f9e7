//! Player eligibility evaluation.
//!
//! Combines baseline registry checks (registration status, identity
//! documents, consents, medical clearance) with the tournament's configured
//! rules and produces a structured verdict. Ineligibility is always data in
//! the returned result; the only errors this module surfaces are
//! infrastructure failures from the data store.

use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::eligibility::{
    EligibilityCheckResult, EligibilitySummary, LegacyEligibilityResult, OverallStatus, Severity,
    Violation, Warning,
};
use crate::error::Result;
use crate::models::{
    AgeRangeConfig, ConsentRequirementConfig, ConsentType, DocumentRequirementConfig, DocumentType,
    EligibilityRule, Gender, GenderRestrictionConfig, GeographicConfig, MedicalClearanceStatus,
    MedicalRequirementConfig, Player, PlayerConsent, PlayerDocument, PlayerStatus,
    PlayerStatusConfig, PlayerWithGeography, RegistrationStatus, RuleConfig, RuleType,
    VerificationStatus,
};
use crate::repository::consent::ConsentRepository;
use crate::repository::document::DocumentRepository;
use crate::repository::eligibility_rule::EligibilityRuleRepository;
use crate::repository::player::PlayerRepository;

const CHECK_REGISTRATION: &str = "REGISTRATION_STATUS";
const CHECK_DOCUMENTS: &str = "DOCUMENT_VERIFICATION";
const CHECK_CONSENTS: &str = "CONSENT_VERIFICATION";
const CHECK_MEDICAL: &str = "MEDICAL_CLEARANCE";

const STEP_VERIFY_DOCUMENTS: &str = "Complete document verification";
const STEP_GRANT_CONSENTS: &str = "Grant required consents";
const STEP_MEDICAL_CLEARANCE: &str = "Obtain valid medical clearance";
const STEP_REGISTRATION_APPROVAL: &str = "Complete registration approval";
const STEP_READY: &str = "Ready for tournament participation";

/// Check whether a player may participate in a tournament.
///
/// Performs four read-only fetches (player with geography, documents,
/// consents, active tournament rules) and evaluates them in memory. The
/// fetches are not wrapped in a transaction: data changing mid-check is
/// accepted, since it can equally change between check and use.
pub async fn check_eligibility(
    pool: &PgPool,
    player_id: Uuid,
    tournament_id: Uuid,
) -> Result<EligibilityCheckResult> {
    let Some(player) = PlayerRepository::new(pool)
        .find_with_geography(player_id)
        .await?
    else {
        return Ok(player_not_found(player_id));
    };

    let documents = DocumentRepository::new(pool)
        .list_for_player(player_id)
        .await?;
    let consents = ConsentRepository::new(pool)
        .list_for_player(player_id)
        .await?;
    let rules = EligibilityRuleRepository::new(pool)
        .list_active_for_tournament(tournament_id)
        .await?;

    Ok(evaluate(
        &player,
        &documents,
        &consents,
        &rules,
        Utc::now().date_naive(),
    ))
}

/// Pre-rules-engine eligibility check, retained for callers that have not
/// migrated to [`check_eligibility`]. Runs the baseline checks only and
/// reports blocking reasons as plain strings.
pub async fn check_player_eligibility(
    pool: &PgPool,
    player_id: Uuid,
) -> Result<LegacyEligibilityResult> {
    let Some(player) = PlayerRepository::new(pool)
        .find_with_geography(player_id)
        .await?
    else {
        return Ok(LegacyEligibilityResult {
            eligible: false,
            reasons: vec!["Player not found".to_string()],
        });
    };

    let documents = DocumentRepository::new(pool)
        .list_for_player(player_id)
        .await?;
    let consents = ConsentRepository::new(pool)
        .list_for_player(player_id)
        .await?;
    let today = Utc::now().date_naive();

    let reasons: Vec<String> = [
        check_registration_status(&player.player),
        check_documents(&documents),
        check_consents(&consents),
        check_medical_clearance(&player.player, today),
    ]
    .into_iter()
    .flatten()
    .filter_map(|finding| match finding {
        Finding::Violation(v) if v.severity >= Severity::High => Some(v.reason),
        _ => None,
    })
    .collect();

    Ok(LegacyEligibilityResult {
        eligible: reasons.is_empty(),
        reasons,
    })
}

/// Pure evaluation over an already-fetched snapshot. Deterministic for fixed
/// inputs; `today` is injected so callers (and tests) control the clock.
pub fn evaluate(
    player: &PlayerWithGeography,
    documents: &[PlayerDocument],
    consents: &[PlayerConsent],
    rules: &[EligibilityRule],
    today: NaiveDate,
) -> EligibilityCheckResult {
    let mut violations = Vec::new();
    let mut warnings = Vec::new();

    let baseline = [
        check_registration_status(&player.player),
        check_documents(documents),
        check_consents(consents),
        check_medical_clearance(&player.player, today),
    ];

    for finding in baseline.into_iter().flatten() {
        match finding {
            Finding::Violation(v) => violations.push(v),
            Finding::Warning(w) => warnings.push(w),
        }
    }

    for rule in rules {
        if let Some(violation) = evaluate_rule(rule, player, documents, consents, today) {
            violations.push(violation);
        }
    }

    let summary = summarize(player, documents, consents, &violations, &warnings, today);
    let is_eligible = !violations.iter().any(|v| v.severity >= Severity::High);

    EligibilityCheckResult {
        is_eligible,
        violations,
        warnings,
        summary,
    }
}

/// Terminal result for a player id with no matching record.
fn player_not_found(player_id: Uuid) -> EligibilityCheckResult {
    EligibilityCheckResult {
        is_eligible: false,
        violations: vec![Violation {
            rule_id: "PLAYER_NOT_FOUND".to_string(),
            rule_name: "Player Not Found".to_string(),
            rule_type: "PLAYER_LOOKUP".to_string(),
            reason: format!("No player record exists for id {player_id}"),
            severity: Severity::Critical,
            can_override: false,
            suggested_action: None,
        }],
        warnings: Vec::new(),
        summary: EligibilitySummary {
            overall_status: OverallStatus::Ineligible,
            documents_verified: false,
            consents_granted: false,
            medical_clearance_valid: false,
            age_eligible: false,
            geographic_eligible: false,
            next_steps: Vec::new(),
        },
    }
}

enum Finding {
    Violation(Violation),
    Warning(Warning),
}

fn check_registration_status(player: &Player) -> Option<Finding> {
    let Some(status) = RegistrationStatus::parse(&player.registration_status) else {
        // A value this build does not recognize blocks outright rather than
        // slipping through as approved-by-default.
        return Some(Finding::Violation(Violation {
            rule_id: "REG_STATUS_UNKNOWN".to_string(),
            rule_name: "Registration Status".to_string(),
            rule_type: CHECK_REGISTRATION.to_string(),
            reason: format!(
                "Player has unknown registration status '{}'",
                player.registration_status
            ),
            severity: Severity::Critical,
            can_override: false,
            suggested_action: None,
        }));
    };

    match status {
        RegistrationStatus::Approved => None,
        RegistrationStatus::InReview => Some(Finding::Warning(Warning {
            rule_id: "REG_STATUS_IN_REVIEW".to_string(),
            rule_name: "Registration Status".to_string(),
            rule_type: CHECK_REGISTRATION.to_string(),
            message: "Registration is under review; participation is provisional".to_string(),
            suggested_action: Some(STEP_REGISTRATION_APPROVAL.to_string()),
        })),
        RegistrationStatus::Draft
        | RegistrationStatus::Submitted
        | RegistrationStatus::Incomplete => Some(Finding::Violation(Violation {
            rule_id: "REG_STATUS_INCOMPLETE".to_string(),
            rule_name: "Registration Status".to_string(),
            rule_type: CHECK_REGISTRATION.to_string(),
            reason: "Player registration is incomplete and must be approved".to_string(),
            severity: Severity::High,
            can_override: false,
            suggested_action: Some(STEP_REGISTRATION_APPROVAL.to_string()),
        })),
        RegistrationStatus::Rejected => Some(Finding::Violation(Violation {
            rule_id: "REG_STATUS_REJECTED".to_string(),
            rule_name: "Registration Status".to_string(),
            rule_type: CHECK_REGISTRATION.to_string(),
            reason: "Player registration was rejected".to_string(),
            severity: Severity::Critical,
            can_override: false,
            suggested_action: Some(
                "Contact the league office about the rejected registration".to_string(),
            ),
        })),
        RegistrationStatus::Suspended => Some(Finding::Violation(Violation {
            rule_id: "REG_STATUS_SUSPENDED".to_string(),
            rule_name: "Registration Status".to_string(),
            rule_type: CHECK_REGISTRATION.to_string(),
            reason: "Player is suspended".to_string(),
            severity: Severity::Critical,
            can_override: true,
            suggested_action: Some(
                "Request an administrative override for the suspension".to_string(),
            ),
        })),
    }
}

/// Document check, in priority order: missing uploads, then pending
/// verification, then rejected documents. Only the first matching condition
/// fires.
fn check_documents(documents: &[PlayerDocument]) -> Option<Finding> {
    let has_type = |ty: DocumentType| {
        documents
            .iter()
            .any(|d| DocumentType::parse(&d.document_type) == Some(ty))
    };
    let has_verified = |ty: DocumentType| {
        documents.iter().any(|d| {
            DocumentType::parse(&d.document_type) == Some(ty)
                && VerificationStatus::parse(&d.verification_status)
                    == Some(VerificationStatus::Verified)
        })
    };

    let missing: Vec<&str> = DocumentType::REQUIRED_FOR_REGISTRATION
        .iter()
        .filter(|ty| !has_type(**ty))
        .map(|ty| ty.as_str())
        .collect();

    if !missing.is_empty() {
        return Some(Finding::Violation(Violation {
            rule_id: "DOC_MISSING".to_string(),
            rule_name: "Document Verification".to_string(),
            rule_type: CHECK_DOCUMENTS.to_string(),
            reason: format!("Required documents not uploaded: {}", missing.join(", ")),
            severity: Severity::High,
            can_override: false,
            suggested_action: Some("Upload the missing identity documents".to_string()),
        }));
    }

    let pending: Vec<&str> = DocumentType::REQUIRED_FOR_REGISTRATION
        .iter()
        .filter(|ty| !has_verified(**ty))
        .map(|ty| ty.as_str())
        .collect();

    if !pending.is_empty() {
        return Some(Finding::Warning(Warning {
            rule_id: "DOC_PENDING".to_string(),
            rule_name: "Document Verification".to_string(),
            rule_type: CHECK_DOCUMENTS.to_string(),
            message: format!("Documents awaiting verification: {}", pending.join(", ")),
            suggested_action: Some(STEP_VERIFY_DOCUMENTS.to_string()),
        }));
    }

    let mut rejected: Vec<&str> = Vec::new();
    for document in documents {
        if VerificationStatus::parse(&document.verification_status)
            == Some(VerificationStatus::Rejected)
            && !rejected.contains(&document.document_type.as_str())
        {
            rejected.push(&document.document_type);
        }
    }

    if !rejected.is_empty() {
        return Some(Finding::Violation(Violation {
            rule_id: "DOC_REJECTED".to_string(),
            rule_name: "Document Verification".to_string(),
            rule_type: CHECK_DOCUMENTS.to_string(),
            reason: format!(
                "Documents were rejected during review: {}",
                rejected.join(", ")
            ),
            severity: Severity::High,
            can_override: false,
            suggested_action: Some("Re-upload the rejected documents".to_string()),
        }));
    }

    None
}

fn check_consents(consents: &[PlayerConsent]) -> Option<Finding> {
    let missing: Vec<&str> = ConsentType::REQUIRED_FOR_REGISTRATION
        .iter()
        .filter(|ty| {
            !consents
                .iter()
                .any(|c| c.granted && ConsentType::parse(&c.consent_type) == Some(**ty))
        })
        .map(|ty| ty.as_str())
        .collect();

    if missing.is_empty() {
        return None;
    }

    Some(Finding::Violation(Violation {
        rule_id: "CONSENT_MISSING".to_string(),
        rule_name: "Consent Verification".to_string(),
        rule_type: CHECK_CONSENTS.to_string(),
        reason: format!("Required consents not granted: {}", missing.join(", ")),
        severity: Severity::High,
        can_override: false,
        suggested_action: Some(STEP_GRANT_CONSENTS.to_string()),
    }))
}

fn check_medical_clearance(player: &Player, today: NaiveDate) -> Option<Finding> {
    let status = player
        .medical_clearance_status
        .as_deref()
        .and_then(MedicalClearanceStatus::parse);
    let expired_by_date = player.medical_expiry_date.is_some_and(|d| d < today);

    match status {
        Some(MedicalClearanceStatus::Pending) => Some(Finding::Warning(Warning {
            rule_id: "MEDICAL_PENDING".to_string(),
            rule_name: "Medical Clearance".to_string(),
            rule_type: CHECK_MEDICAL.to_string(),
            message: "Medical clearance is awaiting review".to_string(),
            suggested_action: Some(STEP_MEDICAL_CLEARANCE.to_string()),
        })),
        Some(MedicalClearanceStatus::Rejected) => Some(Finding::Violation(Violation {
            rule_id: "MEDICAL_REJECTED".to_string(),
            rule_name: "Medical Clearance".to_string(),
            rule_type: CHECK_MEDICAL.to_string(),
            reason: "Medical clearance was rejected".to_string(),
            severity: Severity::High,
            can_override: true,
            suggested_action: Some("Submit a new medical clearance".to_string()),
        })),
        Some(MedicalClearanceStatus::Expired) => Some(medical_expired_violation()),
        Some(MedicalClearanceStatus::Valid) if expired_by_date => {
            Some(medical_expired_violation())
        }
        // VALID and unexpired, or no clearance recorded at all. The latter
        // is surfaced through the summary flags and any configured
        // MEDICAL_REQUIREMENT rule.
        Some(MedicalClearanceStatus::Valid) | None => None,
    }
}

fn medical_expired_violation() -> Finding {
    Finding::Violation(Violation {
        rule_id: "MEDICAL_EXPIRED".to_string(),
        rule_name: "Medical Clearance".to_string(),
        rule_type: CHECK_MEDICAL.to_string(),
        reason: "Medical clearance has expired".to_string(),
        severity: Severity::High,
        can_override: false,
        suggested_action: Some(STEP_MEDICAL_CLEARANCE.to_string()),
    })
}

/// Dispatch a configured rule to its evaluator. Configurable rules produce
/// violations only, never warnings.
fn evaluate_rule(
    rule: &EligibilityRule,
    player: &PlayerWithGeography,
    documents: &[PlayerDocument],
    consents: &[PlayerConsent],
    today: NaiveDate,
) -> Option<Violation> {
    let config = match rule.typed_config() {
        Some(Ok(config)) => config,
        Some(Err(err)) => {
            // Write-time validation should make this unreachable; a rule
            // that slips through is skipped rather than failing the check.
            tracing::warn!(rule_id = %rule.rule_id, error = %err, "skipping rule with malformed config");
            return None;
        }
        // Rule types written by a newer schema pass through unevaluated.
        None => return None,
    };

    match config {
        RuleConfig::AgeRange(config) => evaluate_age_range(rule, &config, &player.player),
        RuleConfig::Geographic(config) => evaluate_geographic(rule, &config, player),
        RuleConfig::PlayerStatus(config) => evaluate_player_status(rule, &config, &player.player),
        RuleConfig::DocumentRequirement(config) => {
            evaluate_document_requirement(rule, &config, documents)
        }
        RuleConfig::ConsentRequirement(config) => {
            evaluate_consent_requirement(rule, &config, consents)
        }
        RuleConfig::GenderRestriction(config) => {
            evaluate_gender_restriction(rule, &config, &player.player)
        }
        RuleConfig::MedicalRequirement(config) => {
            evaluate_medical_requirement(rule, &config, &player.player, today)
        }
    }
}

fn rule_violation(
    rule: &EligibilityRule,
    reason: String,
    severity: Severity,
    can_override: bool,
    suggested_action: Option<&str>,
) -> Violation {
    Violation {
        rule_id: rule.rule_id.to_string(),
        rule_name: rule.name.clone(),
        rule_type: rule.rule_type.clone(),
        reason,
        severity,
        can_override,
        suggested_action: suggested_action.map(String::from),
    }
}

/// Age in whole years at `at`, using the 365.25-day year the registry has
/// always used.
fn age_in_years(date_of_birth: NaiveDate, at: NaiveDate) -> i64 {
    let days = (at - date_of_birth).num_days();
    (days as f64 / 365.25).floor() as i64
}

fn evaluate_age_range(
    rule: &EligibilityRule,
    config: &AgeRangeConfig,
    player: &Player,
) -> Option<Violation> {
    let Some(date_of_birth) = player.date_of_birth else {
        return Some(rule_violation(
            rule,
            "Player date of birth is not set".to_string(),
            Severity::High,
            false,
            Some("Record the player's date of birth"),
        ));
    };

    let age = age_in_years(date_of_birth, config.age_calculation_date);

    if let Some(min_age) = config.min_age {
        if age < i64::from(min_age) {
            return Some(rule_violation(
                rule,
                format!("Player is {age} years old, minimum age is {min_age}"),
                Severity::High,
                true,
                Some("Request an age exemption from the tournament administrator"),
            ));
        }
    }

    if let Some(max_age) = config.max_age {
        if age > i64::from(max_age) {
            return Some(rule_violation(
                rule,
                format!("Player is {age} years old, maximum age is {max_age}"),
                Severity::High,
                true,
                Some("Request an age exemption from the tournament administrator"),
            ));
        }
    }

    None
}

fn evaluate_geographic(
    rule: &EligibilityRule,
    config: &GeographicConfig,
    player: &PlayerWithGeography,
) -> Option<Violation> {
    let label = config.scope.label();

    let Some(code) = player.geographic_code(config.scope) else {
        return Some(rule_violation(
            rule,
            format!("Player has no {label} assignment"),
            Severity::High,
            false,
            Some("Assign the player to a ward"),
        ));
    };

    if config.allowed_ids.iter().any(|id| id == code) {
        return None;
    }

    Some(rule_violation(
        rule,
        format!("Player's {label} '{code}' is not allowed for this tournament"),
        Severity::High,
        true,
        Some("Request a geographic exemption from the tournament administrator"),
    ))
}

fn evaluate_player_status(
    rule: &EligibilityRule,
    config: &PlayerStatusConfig,
    player: &Player,
) -> Option<Violation> {
    let status = PlayerStatus::parse(&player.player_status);
    if status.is_some_and(|s| config.allowed_statuses.contains(&s)) {
        return None;
    }

    Some(rule_violation(
        rule,
        format!(
            "Player status '{}' is not permitted for this tournament",
            player.player_status
        ),
        Severity::Medium,
        true,
        Some("Update the player's status"),
    ))
}

fn evaluate_document_requirement(
    rule: &EligibilityRule,
    config: &DocumentRequirementConfig,
    documents: &[PlayerDocument],
) -> Option<Violation> {
    let missing: Vec<&str> = config
        .required_documents
        .iter()
        .filter(|ty| {
            !documents.iter().any(|d| {
                DocumentType::parse(&d.document_type) == Some(**ty)
                    && VerificationStatus::parse(&d.verification_status)
                        == Some(VerificationStatus::Verified)
            })
        })
        .map(|ty| ty.as_str())
        .collect();

    if missing.is_empty() {
        return None;
    }

    Some(rule_violation(
        rule,
        format!("Verified documents required: {}", missing.join(", ")),
        Severity::High,
        false,
        Some("Upload and verify the required documents"),
    ))
}

fn evaluate_consent_requirement(
    rule: &EligibilityRule,
    config: &ConsentRequirementConfig,
    consents: &[PlayerConsent],
) -> Option<Violation> {
    let missing: Vec<&str> = config
        .required_consents
        .iter()
        .filter(|ty| {
            !consents
                .iter()
                .any(|c| c.granted && ConsentType::parse(&c.consent_type) == Some(**ty))
        })
        .map(|ty| ty.as_str())
        .collect();

    if missing.is_empty() {
        return None;
    }

    Some(rule_violation(
        rule,
        format!("Required consents not granted: {}", missing.join(", ")),
        Severity::High,
        false,
        Some(STEP_GRANT_CONSENTS),
    ))
}

fn evaluate_gender_restriction(
    rule: &EligibilityRule,
    config: &GenderRestrictionConfig,
    player: &Player,
) -> Option<Violation> {
    let gender = Gender::parse(&player.gender);
    if gender.is_some_and(|g| config.allowed_genders.contains(&g)) {
        return None;
    }

    Some(rule_violation(
        rule,
        format!(
            "Player gender '{}' is not permitted by this tournament",
            player.gender
        ),
        Severity::High,
        false,
        None,
    ))
}

fn evaluate_medical_requirement(
    rule: &EligibilityRule,
    config: &MedicalRequirementConfig,
    player: &Player,
    today: NaiveDate,
) -> Option<Violation> {
    if !config.require_valid_medical {
        return None;
    }

    let status = player
        .medical_clearance_status
        .as_deref()
        .and_then(MedicalClearanceStatus::parse);

    if status != Some(MedicalClearanceStatus::Valid) {
        return Some(rule_violation(
            rule,
            "Tournament requires a valid medical clearance".to_string(),
            Severity::High,
            false,
            Some(STEP_MEDICAL_CLEARANCE),
        ));
    }

    // The freshness limit only applies once the clearance itself is VALID.
    if let (Some(max_age), Some(cleared_on)) = (config.max_medical_age, player.medical_clearance_date)
    {
        let age_days = (today - cleared_on).num_days();
        if age_days > max_age {
            return Some(rule_violation(
                rule,
                format!("Medical clearance is {age_days} days old, tournament limit is {max_age} days"),
                Severity::Medium,
                true,
                Some("Renew the medical clearance"),
            ));
        }
    }

    None
}

fn summarize(
    player: &PlayerWithGeography,
    documents: &[PlayerDocument],
    consents: &[PlayerConsent],
    violations: &[Violation],
    warnings: &[Warning],
    today: NaiveDate,
) -> EligibilitySummary {
    let overall_status = if violations.iter().any(|v| v.severity == Severity::Critical) {
        OverallStatus::Ineligible
    } else if violations.iter().any(|v| v.severity == Severity::High) {
        OverallStatus::NeedsAction
    } else if !warnings.is_empty() {
        OverallStatus::PendingReview
    } else {
        OverallStatus::Eligible
    };

    let documents_verified = DocumentType::REQUIRED_FOR_REGISTRATION.iter().all(|ty| {
        documents.iter().any(|d| {
            DocumentType::parse(&d.document_type) == Some(*ty)
                && VerificationStatus::parse(&d.verification_status)
                    == Some(VerificationStatus::Verified)
        })
    });

    let consents_granted = ConsentType::REQUIRED_FOR_REGISTRATION.iter().all(|ty| {
        consents
            .iter()
            .any(|c| c.granted && ConsentType::parse(&c.consent_type) == Some(*ty))
    });

    let medical_clearance_valid = player
        .player
        .medical_clearance_status
        .as_deref()
        .and_then(MedicalClearanceStatus::parse)
        == Some(MedicalClearanceStatus::Valid)
        && player.player.medical_expiry_date.is_none_or(|d| d >= today);

    let age_eligible = !violations
        .iter()
        .any(|v| v.rule_type == RuleType::AgeRange.as_str());
    let geographic_eligible = !violations
        .iter()
        .any(|v| v.rule_type == RuleType::Geographic.as_str());

    let registration_approved =
        RegistrationStatus::parse(&player.player.registration_status)
            == Some(RegistrationStatus::Approved);

    let mut next_steps: Vec<String> = Vec::new();
    if !documents_verified {
        next_steps.push(STEP_VERIFY_DOCUMENTS.to_string());
    }
    if !consents_granted {
        next_steps.push(STEP_GRANT_CONSENTS.to_string());
    }
    if !medical_clearance_valid {
        next_steps.push(STEP_MEDICAL_CLEARANCE.to_string());
    }
    if !registration_approved {
        next_steps.push(STEP_REGISTRATION_APPROVAL.to_string());
    }
    for violation in violations {
        if let Some(action) = &violation.suggested_action {
            if !next_steps.contains(action) {
                next_steps.push(action.clone());
            }
        }
    }
    if next_steps.is_empty() {
        next_steps.push(STEP_READY.to_string());
    }

    EligibilitySummary {
        overall_status,
        documents_verified,
        consents_granted,
        medical_clearance_valid,
        age_eligible,
        geographic_eligible,
        next_steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use serde_json::json;
    use sqlx::types::Json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn timestamp() -> NaiveDateTime {
        date(2025, 1, 1).and_hms_opt(12, 0, 0).unwrap()
    }

    /// Approved player with valid medical clearance, assigned to a Nairobi
    /// ward. Pair with `verified_documents()` and `granted_consents()` for a
    /// fully clean snapshot.
    fn clean_player() -> PlayerWithGeography {
        PlayerWithGeography {
            player: Player {
                player_id: Uuid::new_v4(),
                upid: "UPID-0001".to_string(),
                first_name: "Wanjiku".to_string(),
                last_name: "Kamau".to_string(),
                date_of_birth: Some(date(2000, 3, 15)),
                gender: "FEMALE".to_string(),
                nationality: Some("Kenyan".to_string()),
                phone: None,
                email: None,
                registration_status: "APPROVED".to_string(),
                player_status: "ACTIVE".to_string(),
                is_active: true,
                medical_clearance_status: Some("VALID".to_string()),
                medical_clearance_date: Some(date(2025, 3, 1)),
                medical_expiry_date: Some(date(2026, 3, 1)),
                guardian_name: None,
                guardian_phone: None,
                ward_id: Some(Uuid::new_v4()),
                created_at: timestamp(),
            },
            ward_code: Some("W-KILIMANI".to_string()),
            ward_name: Some("Kilimani".to_string()),
            sub_county_code: Some("SC-DAGORETTI".to_string()),
            sub_county_name: Some("Dagoretti North".to_string()),
            county_code: Some("C-NAIROBI".to_string()),
            county_name: Some("Nairobi".to_string()),
        }
    }

    fn document(ty: &str, status: &str) -> PlayerDocument {
        PlayerDocument {
            document_id: Uuid::new_v4(),
            player_id: Uuid::new_v4(),
            document_type: ty.to_string(),
            verification_status: status.to_string(),
            file_url: None,
            uploaded_at: timestamp(),
        }
    }

    fn verified_documents() -> Vec<PlayerDocument> {
        vec![
            document("NATIONAL_ID", "VERIFIED"),
            document("SELFIE", "VERIFIED"),
        ]
    }

    fn consent(ty: &str, granted: bool) -> PlayerConsent {
        PlayerConsent {
            consent_id: Uuid::new_v4(),
            player_id: Uuid::new_v4(),
            consent_type: ty.to_string(),
            granted,
            granted_at: granted.then(timestamp),
        }
    }

    fn granted_consents() -> Vec<PlayerConsent> {
        vec![
            consent("TERMS_CONDITIONS", true),
            consent("DATA_PROCESSING", true),
        ]
    }

    fn rule(rule_type: &str, config: serde_json::Value) -> EligibilityRule {
        EligibilityRule {
            rule_id: Uuid::new_v4(),
            tournament_id: Uuid::new_v4(),
            name: format!("{rule_type} rule"),
            rule_type: rule_type.to_string(),
            config: Json(config),
            is_active: true,
            created_at: timestamp(),
        }
    }

    fn evaluate_clean_with_rules(rules: &[EligibilityRule]) -> EligibilityCheckResult {
        evaluate(
            &clean_player(),
            &verified_documents(),
            &granted_consents(),
            rules,
            today(),
        )
    }

    #[test]
    fn clean_player_is_eligible() {
        let result = evaluate_clean_with_rules(&[]);

        assert!(result.is_eligible);
        assert!(result.violations.is_empty());
        assert!(result.warnings.is_empty());
        assert_eq!(result.summary.overall_status, OverallStatus::Eligible);
        assert!(result.summary.documents_verified);
        assert!(result.summary.consents_granted);
        assert!(result.summary.medical_clearance_valid);
        assert_eq!(result.summary.next_steps, vec![STEP_READY.to_string()]);
    }

    #[test]
    fn evaluation_is_deterministic() {
        let player = clean_player();
        let documents = vec![document("NATIONAL_ID", "PENDING")];
        let consents = granted_consents();
        let rules = vec![rule(
            "AGE_RANGE",
            json!({ "minAge": 18, "ageCalculationDate": "2025-01-01" }),
        )];

        let first = evaluate(&player, &documents, &consents, &rules, today());
        let second = evaluate(&player, &documents, &consents, &rules, today());

        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::to_value(&second).unwrap()
        );
    }

    #[test]
    fn in_review_is_provisional() {
        let mut player = clean_player();
        player.player.registration_status = "IN_REVIEW".to_string();

        let result = evaluate(
            &player,
            &verified_documents(),
            &granted_consents(),
            &[],
            today(),
        );

        assert!(result.is_eligible);
        assert!(result.violations.is_empty());
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].rule_id, "REG_STATUS_IN_REVIEW");
        assert_eq!(result.summary.overall_status, OverallStatus::PendingReview);
    }

    #[test]
    fn suspended_is_critical_but_overridable() {
        let mut player = clean_player();
        player.player.registration_status = "SUSPENDED".to_string();

        let result = evaluate(
            &player,
            &verified_documents(),
            &granted_consents(),
            &[],
            today(),
        );

        assert!(!result.is_eligible);
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].severity, Severity::Critical);
        assert!(result.violations[0].can_override);
        assert_eq!(result.summary.overall_status, OverallStatus::Ineligible);
    }

    #[test]
    fn unknown_registration_status_blocks() {
        let mut player = clean_player();
        player.player.registration_status = "ARCHIVED".to_string();

        let result = evaluate(
            &player,
            &verified_documents(),
            &granted_consents(),
            &[],
            today(),
        );

        assert!(!result.is_eligible);
        assert_eq!(result.violations[0].rule_id, "REG_STATUS_UNKNOWN");
        assert_eq!(result.violations[0].severity, Severity::Critical);
        assert!(!result.violations[0].can_override);
    }

    #[test]
    fn player_not_found_is_terminal() {
        let result = player_not_found(Uuid::nil());

        assert!(!result.is_eligible);
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].rule_id, "PLAYER_NOT_FOUND");
        assert_eq!(result.violations[0].severity, Severity::Critical);
        assert!(!result.violations[0].can_override);
        assert!(result.warnings.is_empty());
        assert_eq!(result.summary.overall_status, OverallStatus::Ineligible);
        assert!(!result.summary.documents_verified);
        assert!(!result.summary.consents_granted);
        assert!(!result.summary.medical_clearance_valid);
        assert!(!result.summary.age_eligible);
        assert!(!result.summary.geographic_eligible);
    }

    #[test]
    fn uploaded_but_unverified_documents_warn() {
        let documents = vec![
            document("NATIONAL_ID", "PENDING"),
            document("SELFIE", "PENDING"),
        ];

        let result = evaluate(
            &clean_player(),
            &documents,
            &granted_consents(),
            &[],
            today(),
        );

        assert!(result.is_eligible);
        assert!(result.violations.is_empty());
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].rule_id, "DOC_PENDING");
        assert!(!result.summary.documents_verified);
    }

    #[test]
    fn missing_required_document_violates() {
        let documents = vec![document("NATIONAL_ID", "VERIFIED")];

        let result = evaluate(
            &clean_player(),
            &documents,
            &granted_consents(),
            &[],
            today(),
        );

        assert!(!result.is_eligible);
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].rule_id, "DOC_MISSING");
        assert!(result.violations[0].reason.contains("SELFIE"));
        assert_eq!(result.summary.overall_status, OverallStatus::NeedsAction);
    }

    #[test]
    fn rejected_document_violates_after_required_verified() {
        let mut documents = verified_documents();
        documents.push(document("BIRTH_CERTIFICATE", "REJECTED"));

        let result = evaluate(
            &clean_player(),
            &documents,
            &granted_consents(),
            &[],
            today(),
        );

        assert!(!result.is_eligible);
        assert_eq!(result.violations[0].rule_id, "DOC_REJECTED");
        assert!(result.violations[0].reason.contains("BIRTH_CERTIFICATE"));
    }

    #[test]
    fn missing_consent_violates() {
        let consents = vec![consent("TERMS_CONDITIONS", true)];

        let result = evaluate(
            &clean_player(),
            &verified_documents(),
            &consents,
            &[],
            today(),
        );

        assert!(!result.is_eligible);
        assert_eq!(result.violations[0].rule_id, "CONSENT_MISSING");
        assert!(result.violations[0].reason.contains("DATA_PROCESSING"));
    }

    #[test]
    fn ungranted_consent_counts_as_missing() {
        let consents = vec![
            consent("TERMS_CONDITIONS", true),
            consent("DATA_PROCESSING", false),
        ];

        let result = evaluate(
            &clean_player(),
            &verified_documents(),
            &consents,
            &[],
            today(),
        );

        assert_eq!(result.violations[0].rule_id, "CONSENT_MISSING");
    }

    #[test]
    fn pending_medical_warns() {
        let mut player = clean_player();
        player.player.medical_clearance_status = Some("PENDING".to_string());

        let result = evaluate(
            &player,
            &verified_documents(),
            &granted_consents(),
            &[],
            today(),
        );

        assert!(result.is_eligible);
        assert_eq!(result.warnings[0].rule_id, "MEDICAL_PENDING");
        assert!(!result.summary.medical_clearance_valid);
    }

    #[test]
    fn valid_medical_with_past_expiry_violates() {
        let mut player = clean_player();
        player.player.medical_expiry_date = Some(date(2025, 5, 31));

        let result = evaluate(
            &player,
            &verified_documents(),
            &granted_consents(),
            &[],
            today(),
        );

        assert!(!result.is_eligible);
        assert_eq!(result.violations[0].rule_id, "MEDICAL_EXPIRED");
        assert!(!result.violations[0].can_override);
        assert!(!result.summary.medical_clearance_valid);
    }

    #[test]
    fn medical_expiring_today_still_valid() {
        let mut player = clean_player();
        player.player.medical_expiry_date = Some(today());

        let result = evaluate(
            &player,
            &verified_documents(),
            &granted_consents(),
            &[],
            today(),
        );

        assert!(result.is_eligible);
        assert!(result.summary.medical_clearance_valid);
    }

    #[test]
    fn age_below_minimum_violates() {
        let mut player = clean_player();
        player.player.date_of_birth = Some(date(2007, 6, 1));
        let rules = vec![rule(
            "AGE_RANGE",
            json!({ "minAge": 18, "maxAge": 35, "ageCalculationDate": "2025-01-01" }),
        )];

        let result = evaluate(
            &player,
            &verified_documents(),
            &granted_consents(),
            &rules,
            today(),
        );

        assert!(!result.is_eligible);
        assert_eq!(result.violations.len(), 1);
        let violation = &result.violations[0];
        assert_eq!(violation.rule_type, "AGE_RANGE");
        assert_eq!(violation.severity, Severity::High);
        assert!(violation.can_override);
        assert_eq!(
            violation.reason,
            "Player is 17 years old, minimum age is 18"
        );
        assert_eq!(result.summary.overall_status, OverallStatus::NeedsAction);
        assert!(!result.summary.age_eligible);
    }

    #[test]
    fn age_bounds_are_inclusive() {
        // Born 2007-01-01, measured 2025-01-01: exactly 18.
        let mut player = clean_player();
        player.player.date_of_birth = Some(date(2007, 1, 1));
        let rules = vec![rule(
            "AGE_RANGE",
            json!({ "minAge": 18, "maxAge": 18, "ageCalculationDate": "2025-01-01" }),
        )];

        let result = evaluate(
            &player,
            &verified_documents(),
            &granted_consents(),
            &rules,
            today(),
        );

        assert!(result.is_eligible, "exact bound must not violate");
        assert!(result.summary.age_eligible);
    }

    #[test]
    fn age_above_maximum_violates() {
        let mut player = clean_player();
        player.player.date_of_birth = Some(date(1985, 1, 1));
        let rules = vec![rule(
            "AGE_RANGE",
            json!({ "maxAge": 35, "ageCalculationDate": "2025-01-01" }),
        )];

        let result = evaluate(
            &player,
            &verified_documents(),
            &granted_consents(),
            &rules,
            today(),
        );

        assert!(!result.is_eligible);
        assert!(result.violations[0].reason.contains("maximum age is 35"));
    }

    #[test]
    fn missing_dob_fails_age_rule_without_override() {
        let mut player = clean_player();
        player.player.date_of_birth = None;
        let rules = vec![rule(
            "AGE_RANGE",
            json!({ "minAge": 18, "ageCalculationDate": "2025-01-01" }),
        )];

        let result = evaluate(
            &player,
            &verified_documents(),
            &granted_consents(),
            &rules,
            today(),
        );

        assert!(!result.is_eligible);
        assert!(!result.violations[0].can_override);
        assert_eq!(result.violations[0].reason, "Player date of birth is not set");
    }

    #[test]
    fn geographic_mismatch_violates() {
        let mut player = clean_player();
        player.county_code = Some("C-KIAMBU".to_string());
        let rules = vec![rule(
            "GEOGRAPHIC",
            json!({ "scope": "COUNTY", "allowedIds": ["C-NAIROBI"] }),
        )];

        let result = evaluate(
            &player,
            &verified_documents(),
            &granted_consents(),
            &rules,
            today(),
        );

        assert!(!result.is_eligible);
        let violation = &result.violations[0];
        assert_eq!(violation.severity, Severity::High);
        assert!(violation.can_override);
        assert!(violation.reason.contains("C-KIAMBU"));
        assert!(!result.summary.geographic_eligible);
    }

    #[test]
    fn geographic_match_passes() {
        let rules = vec![rule(
            "GEOGRAPHIC",
            json!({ "scope": "COUNTY", "allowedIds": ["C-NAIROBI", "C-KIAMBU"] }),
        )];

        let result = evaluate_clean_with_rules(&rules);

        assert!(result.is_eligible);
        assert!(result.summary.geographic_eligible);
    }

    #[test]
    fn unassigned_geography_is_not_overridable() {
        let mut player = clean_player();
        player.ward_code = None;
        let rules = vec![rule(
            "GEOGRAPHIC",
            json!({ "scope": "WARD", "allowedIds": ["W-KILIMANI"] }),
        )];

        let result = evaluate(
            &player,
            &verified_documents(),
            &granted_consents(),
            &rules,
            today(),
        );

        assert!(!result.is_eligible);
        assert!(!result.violations[0].can_override);
        assert_eq!(result.violations[0].reason, "Player has no ward assignment");
    }

    #[test]
    fn medium_violations_do_not_block() {
        let mut player = clean_player();
        player.player.player_status = "TRANSFERRED".to_string();
        let rules = vec![rule(
            "PLAYER_STATUS",
            json!({ "allowedStatuses": ["ACTIVE"] }),
        )];

        let result = evaluate(
            &player,
            &verified_documents(),
            &granted_consents(),
            &rules,
            today(),
        );

        assert!(result.is_eligible, "MEDIUM violations never block");
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].severity, Severity::Medium);
        assert_eq!(result.summary.overall_status, OverallStatus::Eligible);
    }

    #[test]
    fn critical_dominates_overall_status() {
        let mut player = clean_player();
        player.player.registration_status = "REJECTED".to_string();
        player.player.medical_clearance_status = Some("PENDING".to_string());
        let rules = vec![rule(
            "PLAYER_STATUS",
            json!({ "allowedStatuses": ["INACTIVE"] }),
        )];

        let result = evaluate(
            &player,
            &verified_documents(),
            &granted_consents(),
            &rules,
            today(),
        );

        // One CRITICAL, one MEDIUM, one warning: CRITICAL wins.
        assert_eq!(result.summary.overall_status, OverallStatus::Ineligible);
        assert!(!result.is_eligible);
    }

    #[test]
    fn document_requirement_rule_checks_verified_state() {
        let rules = vec![rule(
            "DOCUMENT_REQUIREMENT",
            json!({ "requiredDocuments": ["BIRTH_CERTIFICATE"] }),
        )];

        let result = evaluate_clean_with_rules(&rules);

        assert!(!result.is_eligible);
        assert!(result.violations[0].reason.contains("BIRTH_CERTIFICATE"));
        assert!(!result.violations[0].can_override);
    }

    #[test]
    fn consent_requirement_rule_flags_missing_grant() {
        let rules = vec![rule(
            "CONSENT_REQUIREMENT",
            json!({ "requiredConsents": ["MEDIA_RELEASE"] }),
        )];

        let result = evaluate_clean_with_rules(&rules);

        assert!(!result.is_eligible);
        assert!(result.violations[0].reason.contains("MEDIA_RELEASE"));
    }

    #[test]
    fn gender_restriction_violates_when_not_allowed() {
        let rules = vec![rule(
            "GENDER_RESTRICTION",
            json!({ "allowedGenders": ["MALE"] }),
        )];

        let result = evaluate_clean_with_rules(&rules);

        assert!(!result.is_eligible);
        assert!(result.violations[0].reason.contains("FEMALE"));
    }

    #[test]
    fn medical_requirement_disabled_is_noop() {
        let mut player = clean_player();
        player.player.medical_clearance_status = None;
        let rules = vec![rule(
            "MEDICAL_REQUIREMENT",
            json!({ "requireValidMedical": false }),
        )];

        let result = evaluate(
            &player,
            &verified_documents(),
            &granted_consents(),
            &rules,
            today(),
        );

        assert!(result.is_eligible);
    }

    #[test]
    fn medical_requirement_demands_valid_status() {
        let mut player = clean_player();
        player.player.medical_clearance_status = Some("PENDING".to_string());
        let rules = vec![rule(
            "MEDICAL_REQUIREMENT",
            json!({ "requireValidMedical": true }),
        )];

        let result = evaluate(
            &player,
            &verified_documents(),
            &granted_consents(),
            &rules,
            today(),
        );

        // The PENDING baseline warning and the rule violation both fire.
        assert!(!result.is_eligible);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.violations.len(), 1);
        assert!(!result.violations[0].can_override);
    }

    #[test]
    fn stale_medical_clearance_is_medium_and_overridable() {
        let mut player = clean_player();
        player.player.medical_clearance_date = Some(date(2024, 6, 1));
        let rules = vec![rule(
            "MEDICAL_REQUIREMENT",
            json!({ "requireValidMedical": true, "maxMedicalAge": 180 }),
        )];

        let result = evaluate(
            &player,
            &verified_documents(),
            &granted_consents(),
            &rules,
            today(),
        );

        assert!(result.is_eligible, "MEDIUM staleness does not block");
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].severity, Severity::Medium);
        assert!(result.violations[0].can_override);
    }

    #[test]
    fn unknown_rule_type_is_skipped() {
        let rules = vec![rule("CURFEW", json!({ "hour": 22 }))];

        let result = evaluate_clean_with_rules(&rules);

        assert!(result.is_eligible);
        assert!(result.violations.is_empty());
    }

    #[test]
    fn malformed_config_is_skipped() {
        let rules = vec![rule("AGE_RANGE", json!({ "minAge": "eighteen" }))];

        let result = evaluate_clean_with_rules(&rules);

        assert!(result.is_eligible);
        assert!(result.violations.is_empty());
    }

    #[test]
    fn next_steps_are_ordered_and_deduplicated() {
        let mut player = clean_player();
        player.player.registration_status = "DRAFT".to_string();
        player.player.medical_clearance_status = Some("EXPIRED".to_string());
        let documents = vec![document("NATIONAL_ID", "PENDING")];
        let consents: Vec<PlayerConsent> = Vec::new();

        let result = evaluate(&player, &documents, &consents, &[], today());

        let steps = &result.summary.next_steps;
        let unique: std::collections::HashSet<&String> = steps.iter().collect();
        assert_eq!(unique.len(), steps.len(), "no duplicate steps");

        // The four fixed items come first, in fixed order, before any
        // violation-derived suggestions.
        assert_eq!(steps[0], STEP_VERIFY_DOCUMENTS);
        assert_eq!(steps[1], STEP_GRANT_CONSENTS);
        assert_eq!(steps[2], STEP_MEDICAL_CLEARANCE);
        assert_eq!(steps[3], STEP_REGISTRATION_APPROVAL);
        assert!(steps.len() > 4, "violation suggestions follow");
        assert!(steps.contains(&"Upload the missing identity documents".to_string()));
    }

    #[test]
    fn flags_reflect_ground_truth_without_rules() {
        // No tournament rules at all: the medical/document/consent flags
        // still report the raw data.
        let mut player = clean_player();
        player.player.medical_clearance_status = None;
        let documents = vec![document("NATIONAL_ID", "VERIFIED")];

        let result = evaluate(&player, &documents, &granted_consents(), &[], today());

        assert!(!result.summary.documents_verified);
        assert!(result.summary.consents_granted);
        assert!(!result.summary.medical_clearance_valid);
        assert!(result.summary.age_eligible);
        assert!(result.summary.geographic_eligible);
    }
}
