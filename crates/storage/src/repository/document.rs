use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::PlayerDocument;

pub struct DocumentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DocumentRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All documents uploaded for a player, newest first
    pub async fn list_for_player(&self, player_id: Uuid) -> Result<Vec<PlayerDocument>> {
        let documents: Vec<PlayerDocument> = sqlx::query_as(
            r#"
            SELECT * FROM player_documents
            WHERE player_id = $1
            ORDER BY uploaded_at DESC
            "#,
        )
        .bind(player_id)
        .fetch_all(self.pool)
        .await?;

        Ok(documents)
    }
}
