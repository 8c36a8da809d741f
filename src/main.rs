use clap::Parser;
use showtrack::{api, Config, Server, ShowStore};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), showtrack::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::parse();

    let store = if config.empty { ShowStore::default() } else { ShowStore::seeded() };
    tracing::info!(shows = store.len(), "store ready");

    Server::bind(&config.socket_addr())
        .await?
        .serve(api::router(store))
        .await
}
