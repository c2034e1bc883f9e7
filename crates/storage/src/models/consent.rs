use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsentType {
    TermsConditions,
    DataProcessing,
    MediaRelease,
    MedicalData,
}

impl ConsentType {
    /// Consents every player must grant before baseline eligibility passes.
    pub const REQUIRED_FOR_REGISTRATION: [ConsentType; 2] =
        [Self::TermsConditions, Self::DataProcessing];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "TERMS_CONDITIONS" => Some(Self::TermsConditions),
            "DATA_PROCESSING" => Some(Self::DataProcessing),
            "MEDIA_RELEASE" => Some(Self::MediaRelease),
            "MEDICAL_DATA" => Some(Self::MedicalData),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TermsConditions => "TERMS_CONDITIONS",
            Self::DataProcessing => "DATA_PROCESSING",
            Self::MediaRelease => "MEDIA_RELEASE",
            Self::MedicalData => "MEDICAL_DATA",
        }
    }
}

/// A named consent grant. One row per (player, consent type); re-submission
/// updates the existing row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PlayerConsent {
    pub consent_id: Uuid,
    pub player_id: Uuid,
    pub consent_type: String,
    pub granted: bool,
    pub granted_at: Option<NaiveDateTime>,
}
