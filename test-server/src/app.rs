use crate::listing;
use anyhow::Context;
use axum::{
    extract::Request, middleware, middleware::Next, response::Response, routing::get, Router,
};
use std::{future::Future, net::SocketAddr, path::PathBuf, sync::Arc};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

// ── Routing ────────────────────────────────────────────────────────────────────

/// Files under `root`, with a generated listing for directories that have no
/// `index.html`. Everything else is a 404.
pub fn router(root: PathBuf) -> Router {
    let listing = Router::new()
        .route("/", get(listing::list_root))
        .route("/{*path}", get(listing::list_path))
        .with_state(Arc::new(root.clone()));

    Router::new()
        .fallback_service(ServeDir::new(root).fallback(listing))
        .layer(middleware::from_fn(log_request))
}

// ── Server ─────────────────────────────────────────────────────────────────────

pub async fn bind(addr: SocketAddr) -> anyhow::Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to listen on http://{addr}"))
}

pub async fn serve(
    listener: TcpListener,
    root: PathBuf,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    axum::serve(listener, router(root))
        .with_graceful_shutdown(shutdown)
        .await
}

// ── Middleware ─────────────────────────────────────────────────────────────────

async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let response = next.run(req).await;
    log::info!("{} {} -> {}", method, path, response.status().as_u16());
    response
}
