use std::sync::Arc;

use anyhow::Context;
use reelgate_metadata::tmdb::TmdbClient;
use reelgate_player::PlayerConfig;
use reelgate_server::config::ServerConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; real deployments set the environment directly.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ServerConfig::from_env().context("failed to load configuration")?;

    let mut builder = TmdbClient::builder()
        .api_token(config.tmdb_token.clone())
        .timeout(config.upstream_timeout);
    if let Some(url) = config.tmdb_base_url.clone() {
        builder = builder.base_url(url);
    }
    let tmdb = builder.build().context("failed to build TMDB client")?;
    info!(base_url = %tmdb.base_url(), "upstream configured");

    let app_state = reelgate_server::state::AppState {
        provider: Arc::new(tmdb),
        player: PlayerConfig {
            embed_host: config.embed_host.clone(),
            ..Default::default()
        },
    };

    let app = reelgate_server::routes::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .context("failed to bind")?;
    info!(addr = %config.bind_addr, "server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
