use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use cinegraph_api::{
    api::{create_router, AppState},
    config::Config,
    db::Neo4jStore,
    services::providers::tmdb::TmdbProvider,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let store = Neo4jStore::connect(
        &config.neo4j_uri,
        &config.neo4j_username,
        &config.neo4j_password,
    )
    .await?;

    let provider = TmdbProvider::new(&config);

    let state = AppState::new(
        Arc::new(provider),
        Arc::new(store),
        config.enrichment_mode,
    );
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
