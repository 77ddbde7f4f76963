//! GridMuse Server entry point.

use gridmuse_server::config::Config;
use gridmuse_server::ordering::OrderingEngine;
use gridmuse_server::service::CollectionService;
use gridmuse_server::source::{DirectorySource, GraphApiSource, LocalSource, RemoteSource};
use gridmuse_server::{app, store, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gridmuse_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing::info!("Starting GridMuse Server on {}:{}", config.host, config.port);

    let store = store::open_store(&config.store).await?;
    let engine = OrderingEngine::new(store);

    let mut local = DirectorySource::new(&config.photo_dir);
    if let Some(prefix) = &config.path_prefix {
        local = local.with_prefix(prefix.as_str());
    }
    let local: Arc<dyn LocalSource> = Arc::new(local);

    let remote = config.remote.clone().map(|remote| {
        tracing::info!(user_id = %remote.user_id, "Remote source enabled");
        Arc::new(GraphApiSource::new(remote)) as Arc<dyn RemoteSource>
    });

    let service = Arc::new(CollectionService::new(engine, local, remote));

    // A failed first refresh leaves an empty list; clients can retry.
    if let Err(e) = service.refresh(true).await {
        tracing::error!("Initial refresh failed: {}", e);
    }

    let app = app(AppState { service });

    // Start server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
