use anyhow::Result;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::fmt::format::FmtSpan;

use techtrove_rewards::{
    api::{create_catalog_router, create_rewards_router, CatalogApiState, RewardsApiState},
    config::RewardsConfig,
    AccountStore, DatabasePool, RewardCatalog, RewardsLedger,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first - this validates program amounts and bindings
    let config = RewardsConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        e
    })?;

    init_logging(&config)?;

    info!("Starting TechTrove Rewards server");

    // Pick the account store backend
    let store = if config.database.postgres_enabled {
        let db = DatabasePool::new(&config.database.postgres_url)
            .await
            .map_err(|e| anyhow::anyhow!("Database connection failed: {}", e))?;
        db.init_schema()
            .await
            .map_err(|e| anyhow::anyhow!("Schema initialization failed: {}", e))?;
        AccountStore::postgres(Arc::new(db))
    } else {
        info!("PostgreSQL disabled, using in-memory account store");
        AccountStore::memory()
    };

    // Initialize the ledger core shared by every surface
    let rules = config.program.to_rules();
    info!(
        welcome_bonus = rules.welcome_bonus_points,
        referral_bonus = rules.referral_bonus_points,
        "Rewards program initialized"
    );
    let ledger = Arc::new(RewardsLedger::new(store, rules));
    let catalog = Arc::new(RewardCatalog::default());

    // Build the application with routes
    let app = Router::new()
        // Account-facing rewards routes (reads, earn, redeem, referral)
        .nest(
            "/rewards",
            create_rewards_router(RewardsApiState {
                ledger: ledger.clone(),
                catalog: catalog.clone(),
            }),
        )
        // Static reference data for the storefront surfaces
        .nest(
            "/catalog",
            create_catalog_router(CatalogApiState { catalog }),
        )
        // Health check
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http());

    // Start the server on configured host/port
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", bind_addr, e))?;

    info!("Rewards server listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize logging from configuration
fn init_logging(config: &RewardsConfig) -> Result<()> {
    let log_level = match config.logging.level.to_lowercase().as_str() {
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        "info" => Level::INFO,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_span_events(if config.logging.log_requests {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        })
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set logging subscriber: {}", e))?;

    Ok(())
}
