//! Castboard Server - REST API for sharing image boards on Farcaster
//!
//! Exposes the board, upload, and sign-in endpoints over HTTP:
//! - POST /verify - verify a Farcaster sign-in proof
//! - GET|POST /presigned_url - mint a short-lived signed upload URL
//! - POST /boards - create a board with its images
//! - GET /board/{slug} - fetch a board
//! - GET /embed/{slug} - social preview HTML

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use castboard_server::{create_router_with_config, AppState, Config};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("castboard_server=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env();

    let state = match AppState::from_config(&config).await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize services");
            std::process::exit(1);
        }
    };

    let app = create_router_with_config(state, &config);

    let addr = config.socket_addr();
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %addr, "Failed to bind listener");
            std::process::exit(1);
        }
    };

    tracing::info!(%addr, "castboard-server listening");

    let serve = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal());

    if let Err(e) = serve.await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => tracing::error!(error = %e, "Failed to listen for shutdown signal"),
    }
}
