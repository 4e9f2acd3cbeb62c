//! Server: reads config from env, opens the configured store, mounts common and customer routes.

use customer_api::{
    build_router, ensure_database_exists, AppState, CustomerStore, MemoryCustomerStore, PgCustomerStore, ServerConfig,
    StoreBackend,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("customer_api=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let store = open_store(&config).await?;
    let app = build_router(AppState::new(store), config.body_limit);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(backend = ?config.backend, "listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn open_store(config: &ServerConfig) -> Result<Arc<dyn CustomerStore>, Box<dyn std::error::Error>> {
    match config.backend {
        StoreBackend::Memory => {
            tracing::warn!("using in-memory store; records are lost on exit");
            Ok(Arc::new(MemoryCustomerStore::new()))
        }
        StoreBackend::Postgres => {
            ensure_database_exists(&config.database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.database_url)
                .await?;
            let store = PgCustomerStore::new(pool, &config.schema);
            store.ensure_table(&config.schema).await?;
            Ok(Arc::new(store))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
