//! Void Wallet API server

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use void_wallet_api::{app, ApiConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env();
    let addr = config.socket_addr();

    tracing::info!(
        %addr,
        wif_checksum = ?config.wif_checksum,
        cors_permissive = config.cors_permissive,
        "Starting Void Wallet API"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(&config)).await?;

    Ok(())
}
