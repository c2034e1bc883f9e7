use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::PlayerConsent;

pub struct ConsentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ConsentRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All consent records for a player, one row per consent type
    pub async fn list_for_player(&self, player_id: Uuid) -> Result<Vec<PlayerConsent>> {
        let consents: Vec<PlayerConsent> = sqlx::query_as(
            r#"
            SELECT * FROM player_consents
            WHERE player_id = $1
            ORDER BY consent_type
            "#,
        )
        .bind(player_id)
        .fetch_all(self.pool)
        .await?;

        Ok(consents)
    }
}
