use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, HeaderName, Method};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use cms_api::state::AppState;
use cms_core::repositories::{
    ActorRepository, GrantRepository, InMemoryActorRepository, InMemoryGrantRepository,
    InMemoryMenuRepository, MenuRepository,
};
use cms_core::RouteMatcher;
use cms_infrastructure::database::connection;
use cms_infrastructure::{PgActorRepository, PgGrantRepository, PgMenuRepository};
use cms_shared::config::{AppConfig, StorageBackend};
use cms_shared::constants::ACTOR_ID_HEADER;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize telemetry; the guard flushes the file writer on exit
    let _log_guard = cms_shared::telemetry::init_telemetry(&config.logging)?;

    info!("{} starting ({})...", config.app.name, config.app.env);

    let (menus, grants, actors): (
        Arc<dyn MenuRepository>,
        Arc<dyn GrantRepository>,
        Arc<dyn ActorRepository>,
    ) = match config.storage.backend {
        StorageBackend::Postgres => {
            info!("Connecting to database...");
            let pool = match connection::create_pool(&config.database).await {
                Ok(pool) => pool,
                Err(e) => {
                    error!("Failed to connect to database: {}", e);
                    return Err(e.into());
                }
            };
            connection::run_migrations(&pool).await?;
            info!("Database connection established.");
            (
                Arc::new(PgMenuRepository::new(pool.clone())),
                Arc::new(PgGrantRepository::new(pool.clone())),
                Arc::new(PgActorRepository::new(pool)),
            )
        }
        StorageBackend::Memory => {
            info!("Using in-memory storage; data is lost on shutdown");
            (
                Arc::new(InMemoryMenuRepository::new()),
                Arc::new(InMemoryGrantRepository::new()),
                Arc::new(InMemoryActorRepository::new()),
            )
        }
    };

    let state = AppState::new(menus, grants, actors, RouteMatcher::from(&config.navigation));

    let app = cms_api::router(state).layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(ACTOR_ID_HEADER)]),
    );

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
