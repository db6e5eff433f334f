use tracing_subscriber::{EnvFilter, fmt};

use cms_backend::shell::config::AppConfig;
use cms_backend::shell::http::router;
use cms_backend::shell::seed::seed_sample_data;
use cms_backend::shell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = AppConfig::from_env()?;
    if config.api_tokens.is_empty() {
        tracing::warn!("CMS_API_TOKENS is empty; every request will be anonymous");
    }

    let state = AppState::in_memory(&config);
    if config.seed_sample_data {
        seed_sample_data(&state).await?;
    }

    let app = router(state);

    tracing::info!("HTTP API: http://{}/api", config.bind_addr);
    tracing::info!("GraphQL endpoint: http://{}/gql", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
