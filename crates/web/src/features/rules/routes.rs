use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};
use storage::Database;

use super::handlers::{create_rule, delete_rule, list_tournament_rules, update_rule};
use crate::middleware::auth::{ApiKeys, require_api_key};

pub fn tournament_routes() -> Router<Database> {
    Router::new().route("/:tournament_id/rules", get(list_tournament_rules))
}

/// Mutating rule endpoints, behind the API-key gate
pub fn admin_routes(api_keys: ApiKeys) -> Router<Database> {
    Router::new()
        .route("/", post(create_rule))
        .route("/:rule_id", put(update_rule).delete(delete_rule))
        .layer(from_fn_with_state(api_keys, require_api_key))
}
