use anyhow::Context;
use axum::Router;
use storage::Database;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;

use config::Config;
use middleware::auth::ApiKeys;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::players::handlers::list_players,
        features::players::handlers::get_player,
        features::players::handlers::get_player_by_upid,
        features::rules::handlers::list_tournament_rules,
        features::rules::handlers::create_rule,
        features::rules::handlers::update_rule,
        features::rules::handlers::delete_rule,
        features::eligibility::handlers::check_eligibility,
        features::eligibility::handlers::check_player_eligibility,
    ),
    components(
        schemas(
            storage::dto::common::PaginationMeta,
            storage::dto::player::PlayerResponse,
            storage::dto::player::PlayerDetailResponse,
            storage::dto::player::DocumentInfo,
            storage::dto::player::ConsentInfo,
            storage::dto::rule::CreateEligibilityRuleRequest,
            storage::dto::rule::UpdateEligibilityRuleRequest,
            storage::dto::rule::EligibilityRuleResponse,
            storage::dto::eligibility::EligibilityCheckResult,
            storage::dto::eligibility::EligibilitySummary,
            storage::dto::eligibility::Violation,
            storage::dto::eligibility::Warning,
            storage::dto::eligibility::Severity,
            storage::dto::eligibility::OverallStatus,
            storage::dto::eligibility::LegacyEligibilityResult,
            storage::models::RegistrationStatus,
            storage::models::PlayerStatus,
            storage::models::Gender,
            storage::models::MedicalClearanceStatus,
            storage::models::DocumentType,
            storage::models::VerificationStatus,
            storage::models::ConsentType,
            storage::models::RuleType,
            storage::models::GeographicScope,
            storage::models::AgeRangeConfig,
            storage::models::GeographicConfig,
            storage::models::PlayerStatusConfig,
            storage::models::DocumentRequirementConfig,
            storage::models::ConsentRequirementConfig,
            storage::models::GenderRestrictionConfig,
            storage::models::MedicalRequirementConfig,
        )
    ),
    tags(
        (name = "players", description = "Public player registry endpoints"),
        (name = "rules", description = "Tournament eligibility rule administration"),
        (name = "eligibility", description = "Player eligibility checks"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

fn api_router(api_keys: ApiKeys) -> Router<Database> {
    Router::new()
        .nest(
            "/api/players",
            features::players::routes::routes()
                .merge(features::eligibility::routes::player_routes()),
        )
        .nest(
            "/api/tournaments",
            features::rules::routes::tournament_routes()
                .merge(features::eligibility::routes::tournament_routes()),
        )
        .nest("/api/rules", features::rules::routes::admin_routes(api_keys))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting league API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = api_router(api_keys)
        .with_state(db)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors);

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", bind_address);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .context("Failed to bind server address")?;
    axum::serve(listener, app).await?;

    Ok(())
}
