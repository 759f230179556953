use server::{app, AppState, ServerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ServerConfig::from_env()?;
    match &config.classifier_url {
        Some(url) => info!("relaying /predict to {url}"),
        None => info!("CLASSIFIER_URL unset; /predict will answer 503"),
    }

    let router = app(AppState::from_config(&config));
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!("brain-data server listening on http://{}", config.addr);
    axum::serve(listener, router).await?;
    Ok(())
}
