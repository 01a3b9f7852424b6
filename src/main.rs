use catalog_filter::{
    api::{create_router, AppState},
    config::Config,
    services::{load_catalog, CatalogSource, JsonFileSource, StaticSource},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;

    let source: Box<dyn CatalogSource> = match &config.catalog_path {
        Some(path) => Box::new(JsonFileSource::new(path)),
        None => Box::new(StaticSource::default()),
    };
    let snapshot = load_catalog(source.as_ref()).await?;

    // Initialize application state
    let state = AppState::with_catalog(snapshot);

    // Create the router with all routes
    let app = create_router(state);

    // Start the server
    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!(address = %config.bind_address(), "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
