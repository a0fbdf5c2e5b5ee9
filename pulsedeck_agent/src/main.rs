//! Entry point for the pulsedeck agent: broadcast hub + stream endpoint.

use std::net::SocketAddr;

use axum::{routing::get, Router};
use tracing::info;
use tracing_subscriber::EnvFilter;

use pulsedeck_agent::{cli, sampler::spawn_sampler, state::AppState, ws::stream_handler};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let port = cli::resolve_port(std::env::args());
    let state = AppState::new(8);
    let sampler = spawn_sampler(state.clone());

    let app = Router::new()
        .route("/api/stream", get(stream_handler))
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("pulsedeck agent listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    sampler.abort();
    info!("agent stopped");
    Ok(())
}
