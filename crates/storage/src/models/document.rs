use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    NationalId,
    Selfie,
    BirthCertificate,
    MedicalCertificate,
    PassportPhoto,
}

impl DocumentType {
    /// Document types every player must have verified before baseline
    /// eligibility passes, regardless of tournament configuration.
    pub const REQUIRED_FOR_REGISTRATION: [DocumentType; 2] = [Self::NationalId, Self::Selfie];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "NATIONAL_ID" => Some(Self::NationalId),
            "SELFIE" => Some(Self::Selfie),
            "BIRTH_CERTIFICATE" => Some(Self::BirthCertificate),
            "MEDICAL_CERTIFICATE" => Some(Self::MedicalCertificate),
            "PASSPORT_PHOTO" => Some(Self::PassportPhoto),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NationalId => "NATIONAL_ID",
            Self::Selfie => "SELFIE",
            Self::BirthCertificate => "BIRTH_CERTIFICATE",
            Self::MedicalCertificate => "MEDICAL_CERTIFICATE",
            Self::PassportPhoto => "PASSPORT_PHOTO",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Rejected,
}

impl VerificationStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PENDING" => Some(Self::Pending),
            "VERIFIED" => Some(Self::Verified),
            "REJECTED" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Verified => "VERIFIED",
            Self::Rejected => "REJECTED",
        }
    }
}

/// An uploaded identity/medical artifact. Uploads are append-style; the
/// review workflow mutates `verification_status` only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PlayerDocument {
    pub document_id: Uuid,
    pub player_id: Uuid,
    pub document_type: String,
    pub verification_status: String,
    pub file_url: Option<String>,
    pub uploaded_at: NaiveDateTime,
}
