mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{any, get},
    Router,
};

use crate::api::{DynAPI, API};
use crate::server::handlers::{health, quotes};

pub fn router<T: API + Sync + Send + 'static>(api: T) -> Router {
    let api = Arc::new(api) as DynAPI;

    Router::new()
        .route("/calculate-quote", any(quotes::create))
        .route("/health", get(health::check))
        .layer(Extension(api))
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T, addr: SocketAddr) {
    let app = router(api);

    let server = match axum::Server::try_bind(&addr) {
        Ok(builder) => builder,
        Err(err) => {
            tracing::error!(%addr, %err, "failed to bind");
            return;
        }
    };

    tracing::info!("listening on {}", addr);

    if let Err(err) = server
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(%err, "server error");
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutting down");
    }
}
