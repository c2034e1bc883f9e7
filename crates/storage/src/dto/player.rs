use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Player, PlayerConsent, PlayerDocument, PlayerWithGeography};

/// Response containing basic player information
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlayerResponse {
    pub player_id: Uuid,
    pub upid: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: String,
    pub nationality: Option<String>,
    pub registration_status: String,
    pub player_status: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

impl From<Player> for PlayerResponse {
    fn from(player: Player) -> Self {
        Self {
            player_id: player.player_id,
            upid: player.upid,
            first_name: player.first_name,
            last_name: player.last_name,
            date_of_birth: player.date_of_birth,
            gender: player.gender,
            nationality: player.nationality,
            registration_status: player.registration_status,
            player_status: player.player_status,
            is_active: player.is_active,
            created_at: player.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DocumentInfo {
    pub document_type: String,
    pub verification_status: String,
    pub uploaded_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConsentInfo {
    pub consent_type: String,
    pub granted: bool,
    pub granted_at: Option<NaiveDateTime>,
}

/// Detailed player response with geography, documents and consents
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlayerDetailResponse {
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
    pub ward_code: Option<String>,
    pub ward_name: Option<String>,
    pub sub_county_code: Option<String>,
    pub sub_county_name: Option<String>,
    pub county_code: Option<String>,
    pub county_name: Option<String>,
    pub created_at: NaiveDateTime,
    pub documents: Vec<DocumentInfo>,
    pub consents: Vec<ConsentInfo>,
}

impl PlayerDetailResponse {
    pub fn assemble(
        player: PlayerWithGeography,
        documents: Vec<PlayerDocument>,
        consents: Vec<PlayerConsent>,
    ) -> Self {
        Self {
            player_id: player.player.player_id,
            upid: player.player.upid,
            first_name: player.player.first_name,
            last_name: player.player.last_name,
            date_of_birth: player.player.date_of_birth,
            gender: player.player.gender,
            nationality: player.player.nationality,
            phone: player.player.phone,
            email: player.player.email,
            registration_status: player.player.registration_status,
            player_status: player.player.player_status,
            is_active: player.player.is_active,
            medical_clearance_status: player.player.medical_clearance_status,
            medical_clearance_date: player.player.medical_clearance_date,
            medical_expiry_date: player.player.medical_expiry_date,
            guardian_name: player.player.guardian_name,
            guardian_phone: player.player.guardian_phone,
            ward_code: player.ward_code,
            ward_name: player.ward_name,
            sub_county_code: player.sub_county_code,
            sub_county_name: player.sub_county_name,
            county_code: player.county_code,
            county_name: player.county_name,
            created_at: player.player.created_at,
            documents: documents
                .into_iter()
                .map(|d| DocumentInfo {
                    document_type: d.document_type,
                    verification_status: d.verification_status,
                    uploaded_at: d.uploaded_at,
                })
                .collect(),
            consents: consents
                .into_iter()
                .map(|c| ConsentInfo {
                    consent_type: c.consent_type,
                    granted: c.granted,
                    granted_at: c.granted_at,
                })
                .collect(),
        }
    }
}
