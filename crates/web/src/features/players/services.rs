use sqlx::PgPool;
use storage::{
    dto::player::PlayerDetailResponse,
    error::{Result, StorageError},
    models::Player,
    repository::{
        consent::ConsentRepository, document::DocumentRepository, player::PlayerRepository,
    },
};
use uuid::Uuid;

/// List players with a total count for pagination
pub async fn list_players(pool: &PgPool, limit: i64, offset: i64) -> Result<(Vec<Player>, i64)> {
    let repo = PlayerRepository::new(pool);
    let players = repo.list(limit, offset).await?;
    let total = repo.count().await?;

    Ok((players, total))
}

pub async fn get_player_by_upid(pool: &PgPool, upid: &str) -> Result<Player> {
    PlayerRepository::new(pool).find_by_upid(upid).await
}

/// Full player view: geography, uploaded documents and consent state
pub async fn get_player_detail(pool: &PgPool, player_id: Uuid) -> Result<PlayerDetailResponse> {
    let player = PlayerRepository::new(pool)
        .find_with_geography(player_id)
        .await?
        .ok_or(StorageError::NotFound)?;

    let documents = DocumentRepository::new(pool)
        .list_for_player(player_id)
        .await?;
    let consents = ConsentRepository::new(pool)
        .list_for_player(player_id)
        .await?;

    Ok(PlayerDetailResponse::assemble(player, documents, consents))
}
