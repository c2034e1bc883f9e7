use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{check_eligibility, check_player_eligibility};

pub fn tournament_routes() -> Router<Database> {
    Router::new().route(
        "/:tournament_id/players/:player_id/eligibility",
        get(check_eligibility),
    )
}

pub fn player_routes() -> Router<Database> {
    Router::new().route("/:player_id/eligibility", get(check_player_eligibility))
}
