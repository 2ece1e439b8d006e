use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rendezvous_core::{GeoJsonSurface, Session};
use rendezvous_server::{AppState, ServerConfig, ServerError, SolverClient, router};
use tracing_subscriber::EnvFilter;

/// Step-wise playback of routes toward a computed meeting point
#[derive(Debug, Parser)]
#[command(name = "rendezvous-server", version)]
struct Cli {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Address to listen on
    #[arg(long)]
    listen: Option<SocketAddr>,
    /// Base URL of the meeting-point solver
    #[arg(long)]
    solver_url: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), ServerError> {
    let mut config = match &cli.config {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };
    if let Some(listen) = cli.listen {
        config.listen = listen;
    }
    if let Some(url) = cli.solver_url {
        config.solver.base_url = url;
    }

    let solver = SolverClient::new(&config.solver)?;
    let graph = solver.fetch_graph().await?;
    let surface = GeoJsonSurface::new(&graph);
    let session = Session::new(graph, surface);

    let state = AppState::new(
        session,
        solver,
        config.notice_timeout(),
        config.initial_zoom,
    );
    let app = router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.listen).await?;
    tracing::info!("Listening on {}", config.listen);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
    }
    tracing::info!("Shutting down");
}
