use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::eligibility_rule::GeographicScope;

/// Administrative approval state of a player's registration.
///
/// Distinct from tournament eligibility: a player can be APPROVED in the
/// registry and still fail a tournament's configured rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationStatus {
    Draft,
    Submitted,
    InReview,
    Approved,
    Rejected,
    Suspended,
    Incomplete,
}

impl RegistrationStatus {
    /// Decode a persisted status value. Returns `None` for values written by
    /// a schema this build does not know about; the eligibility engine turns
    /// that into a blocking finding rather than an error.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "DRAFT" => Some(Self::Draft),
            "SUBMITTED" => Some(Self::Submitted),
            "IN_REVIEW" => Some(Self::InReview),
            "APPROVED" => Some(Self::Approved),
            "REJECTED" => Some(Self::Rejected),
            "SUSPENDED" => Some(Self::Suspended),
            "INCOMPLETE" => Some(Self::Incomplete),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Submitted => "SUBMITTED",
            Self::InReview => "IN_REVIEW",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Suspended => "SUSPENDED",
            Self::Incomplete => "INCOMPLETE",
        }
    }
}

/// Sporting status of a player, separate from the registration workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerStatus {
    Active,
    Inactive,
    Transferred,
    Retired,
}

impl PlayerStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ACTIVE" => Some(Self::Active),
            "INACTIVE" => Some(Self::Inactive),
            "TRANSFERRED" => Some(Self::Transferred),
            "RETIRED" => Some(Self::Retired),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Transferred => "TRANSFERRED",
            Self::Retired => "RETIRED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "MALE" => Some(Self::Male),
            "FEMALE" => Some(Self::Female),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MedicalClearanceStatus {
    Valid,
    Pending,
    Rejected,
    Expired,
}

impl MedicalClearanceStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "VALID" => Some(Self::Valid),
            "PENDING" => Some(Self::Pending),
            "REJECTED" => Some(Self::Rejected),
            "EXPIRED" => Some(Self::Expired),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "VALID",
            Self::Pending => "PENDING",
            Self::Rejected => "REJECTED",
            Self::Expired => "EXPIRED",
        }
    }
}

/// A registered player. Enum-valued columns are kept as raw TEXT here and
/// decoded where they are consumed, so a row written by a newer schema still
/// loads instead of failing the whole fetch.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Player {
    pub player_id: Uuid,
    pub upid: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: String,
    pub nationality: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub registration_status: String,
    pub player_status: String,
    pub is_active: bool,
    pub medical_clearance_status: Option<String>,
    pub medical_clearance_date: Option<NaiveDate>,
    pub medical_expiry_date: Option<NaiveDate>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub ward_id: Option<Uuid>,
    pub created_at: NaiveDateTime,
}

/// Player row joined transitively through ward -> sub-county -> county, so a
/// single fetch gives the evaluator every geographic identifier it needs.
#[derive(Debug, Clone, FromRow)]
pub struct PlayerWithGeography {
    #[sqlx(flatten)]
    pub player: Player,
    pub ward_code: Option<String>,
    pub ward_name: Option<String>,
    pub sub_county_code: Option<String>,
    pub sub_county_name: Option<String>,
    pub county_code: Option<String>,
    pub county_name: Option<String>,
}

impl PlayerWithGeography {
    pub fn geographic_code(&self, scope: GeographicScope) -> Option<&str> {
        match scope {
            GeographicScope::Ward => self.ward_code.as_deref(),
            GeographicScope::Subcounty => self.sub_county_code.as_deref(),
            GeographicScope::County => self.county_code.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_status_round_trips() {
        for status in [
            RegistrationStatus::Draft,
            RegistrationStatus::Submitted,
            RegistrationStatus::InReview,
            RegistrationStatus::Approved,
            RegistrationStatus::Rejected,
            RegistrationStatus::Suspended,
            RegistrationStatus::Incomplete,
        ] {
            assert_eq!(RegistrationStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn unrecognized_status_is_none() {
        assert_eq!(RegistrationStatus::parse("ARCHIVED"), None);
        assert_eq!(PlayerStatus::parse(""), None);
        assert_eq!(MedicalClearanceStatus::parse("valid"), None);
    }
}
