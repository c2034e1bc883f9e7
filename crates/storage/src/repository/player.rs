use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Player, PlayerWithGeography};

const PLAYER_WITH_GEOGRAPHY: &str = r#"
    SELECT p.*,
           w.code AS ward_code, w.name AS ward_name,
           sc.code AS sub_county_code, sc.name AS sub_county_name,
           c.code AS county_code, c.name AS county_name
    FROM players p
    LEFT JOIN wards w ON p.ward_id = w.ward_id
    LEFT JOIN sub_counties sc ON w.sub_county_id = sc.sub_county_id
    LEFT JOIN counties c ON sc.county_id = c.county_id
"#;

pub struct PlayerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PlayerRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List players, most recently registered first
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Player>> {
        let players: Vec<Player> = sqlx::query_as(
            r#"
            SELECT * FROM players
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        Ok(players)
    }

    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM players")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Find player by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Player> {
        let player: Option<Player> = sqlx::query_as("SELECT * FROM players WHERE player_id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        player.ok_or(StorageError::NotFound)
    }

    /// Find player by their unique player identifier (UPID)
    pub async fn find_by_upid(&self, upid: &str) -> Result<Player> {
        let player: Option<Player> = sqlx::query_as("SELECT * FROM players WHERE upid = $1")
            .bind(upid)
            .fetch_optional(self.pool)
            .await?;

        player.ok_or(StorageError::NotFound)
    }

    /// Fetch a player joined through ward -> sub-county -> county.
    ///
    /// Returns `Ok(None)` for a missing player: the eligibility engine
    /// represents that as a verdict, not an error.
    pub async fn find_with_geography(&self, id: Uuid) -> Result<Option<PlayerWithGeography>> {
        let query = format!("{PLAYER_WITH_GEOGRAPHY} WHERE p.player_id = $1");

        let player: Option<PlayerWithGeography> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(player)
    }
}
