use dotenvy::dotenv;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use common::{config::Settings, logger};
use exchange::BinanceClient;

use crate::server::{AppState, create_router};
use crate::services::SignalDispatcher;

mod server;
mod services;
#[cfg(test)]
mod testing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    logger::setup_logger();
    info!("System starting up...");

    let settings = Arc::new(Settings::from_env()?);
    let client = BinanceClient::new(&settings.exchange)?;
    info!("Binance futures endpoint: {}", client.base_url());

    let dispatcher = Arc::new(SignalDispatcher::new(Arc::new(client)));
    let app = create_router(AppState::new(settings.clone(), dispatcher));

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    let listener = TcpListener::bind(addr).await?;

    info!("Webhook server started");
    info!("Port: {}", settings.port);
    info!("Environment: {}", settings.environment);

    axum::serve(listener, app).await?;
    Ok(())
}
