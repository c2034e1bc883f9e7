use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{get_player, get_player_by_upid, list_players};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_players))
        .route("/:player_id", get(get_player))
        .route("/upid/:upid", get(get_player_by_upid))
}
