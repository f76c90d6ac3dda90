use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tokio::net::TcpStream;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod network;
mod player;
mod replay;

use config::Args;
use player::Player;
use replay::ReplayQueue;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Args::parse().resolve()?;

    let replay = match &config.replay {
        Some(path) => {
            let queue = ReplayQueue::load(path, config.side).await?;
            if queue.is_empty() {
                warn!(log = %path.display(), side = %config.side, "no recorded moves for this side");
            } else {
                info!(count = queue.total(), side = %config.side, "loaded recorded moves");
            }
            Some(queue)
        }
        None => None,
    };

    info!(
        host = %config.host,
        port = config.port,
        side = %config.side,
        depth = config.engine.depth,
        time_limit_ms = config.engine.time_limit_ms,
        "connecting"
    );
    let stream = TcpStream::connect((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("connecting to {}:{}", config.host, config.port))?;
    stream.set_nodelay(true)?;

    let mut player = Player::new(config.side, Arc::new(config.engine.clone()), replay);
    match player.play(stream, &config.name).await? {
        Some(result) => info!(%result, "match finished"),
        None => info!("server closed the connection"),
    }
    Ok(())
}
