//! Shader Dev Tools - Test Server
//!
//! Serves the current directory on http://localhost:9914/ until interrupted.

use anyhow::{Context, Result};
use clap::Parser;
use std::{env, net::SocketAddr};

mod app;
mod listing;

// ── Configuration ──────────────────────────────────────────────────────────────

const HOST: [u8; 4] = [127, 0, 0, 1];
const PORT: u16 = 9914;

// ── CLI Arguments ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "test-server",
    version,
    about = "Serve the current directory on localhost:9914"
)]
struct Args {}

// ── Main ───────────────────────────────────────────────────────────────────────

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    log::debug!("Interrupted, shutting down");
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    Args::parse();
    let root = env::current_dir().context("failed to resolve the current directory")?;

    let addr = SocketAddr::from((HOST, PORT));
    let listener = app::bind(addr).await?;
    log::info!("Serving {} on http://localhost:{}/", root.display(), PORT);

    app::serve(listener, root, shutdown_signal()).await?;

    Ok(())
}
