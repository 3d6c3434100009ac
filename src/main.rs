//! Mantenimiento Server - equipment maintenance tracker
//!
//! JSON API, HTML dashboard and PDF reports over PostgreSQL.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mantenimiento_server::{
    api,
    config::AppConfig,
    repository::Repository,
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("mantenimiento_server={},tower_http=debug", config.logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Mantenimiento Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await?;

    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    tracing::info!("Database migrations completed");

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, &config)?;

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    let app = create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let routes = Router::new()
        // Views and session
        .route("/", get(api::views::dashboard))
        .route("/login", get(api::views::login_form))
        .route("/login", post(api::auth::login))
        .route("/login-invitado", get(api::auth::guest_login))
        .route("/logout", get(api::auth::logout))
        .route("/setup-fase2", get(api::setup::setup))
        .route("/exportar-pdf", get(api::reports::export_pdf))
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Clients
        .route("/api/clientes", get(api::clients::list_clients))
        .route("/api/clientes", post(api::clients::create_client))
        .route("/api/clientes/:id", delete(api::clients::delete_client))
        // Equipment
        .route("/api/equipos", get(api::equipment::list_equipment))
        .route("/api/equipos", post(api::equipment::create_equipment))
        .route("/api/equipos/:id", get(api::equipment::get_equipment))
        .route("/api/equipos/:id", put(api::equipment::update_equipment))
        .route("/api/equipos/:id", delete(api::equipment::delete_equipment))
        // Maintenance
        .route("/api/mantenimientos", post(api::maintenance::create_maintenance))
        .route("/api/mantenimientos/:equipo_id", get(api::maintenance::list_maintenance))
        // Users
        .route("/api/usuarios", get(api::users::list_users))
        .route("/api/usuarios", post(api::users::create_user))
        .route("/api/usuarios/:id", delete(api::users::delete_user))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .merge(routes)
        .merge(openapi)
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
