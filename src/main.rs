use maridaje_api::{config::Config, routes::create_router, state::AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "maridaje_api=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;
    let state = AppState::from_config(&config)?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(host = %config.host, port = config.port, "maridaje-api listening");
    axum::serve(listener, app).await?;

    Ok(())
}
