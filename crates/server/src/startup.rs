use std::{net::SocketAddr, path::PathBuf};

use axum::Router;
use common::env::check_static_dir;
use configs::ServerConfig;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{
    errors::StartupError,
    records::RecordSource,
    routes,
    state::{JsonState, ServerState},
};

fn bind_addr(cfg: &ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.host, cfg.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad bind address {}:{}: {e}", cfg.host, cfg.port)))
}

/// Build the HTML server's router from its config section.
pub async fn html_app(cfg: &ServerConfig) -> Router {
    let static_dir = PathBuf::from(&cfg.static_dir);
    check_static_dir(&static_dir).await;
    routes::build_html_router(ServerState::new(cfg.public_origin()), static_dir)
}

/// Build the JSON server's router. An unreadable or malformed records file
/// fails startup instead of individual requests.
pub async fn json_app(cfg: &ServerConfig) -> Result<Router, StartupError> {
    let records = RecordSource::new(&cfg.users_file);
    let count = records.preflight().await?;
    info!(users_file = %records.path().display(), count, "records file loaded");
    let state = JsonState {
        server: ServerState::new(cfg.public_origin()),
        records,
    };
    Ok(routes::build_json_router(state))
}

pub async fn run_html(cfg: ServerConfig) -> Result<(), StartupError> {
    let app = html_app(&cfg).await;
    serve("html", bind_addr(&cfg)?, app).await
}

pub async fn run_json(cfg: ServerConfig) -> Result<(), StartupError> {
    let app = json_app(&cfg).await?;
    serve("json", bind_addr(&cfg)?, app).await
}

async fn serve(name: &'static str, addr: SocketAddr, app: Router) -> Result<(), StartupError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.to_string(), source })?;
    info!(server = name, %addr, "starting server");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(name))
        .await
        .map_err(|e| StartupError::Any(e.into()))?;
    info!(server = name, "server stopped");
    Ok(())
}

async fn shutdown_signal(name: &'static str) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!(server = name, event = "shutdown_signal", "received Ctrl+C, shutting down"),
        Err(e) => {
            warn!(server = name, error = %e, "cannot listen for Ctrl+C; running until killed");
            std::future::pending::<()>().await
        }
    }
}
