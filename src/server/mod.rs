//! HTTP surface of the relay.
//!
//! - `POST /gitea/webhook` - Gitea issue deliveries
//! - `GET /health` - liveness probe

use std::net::SocketAddr;

use axum::Router;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tracing::info;

use crate::context::AppContext;
use crate::error::{AppError, AppResult};

pub mod health;
pub mod response;
pub mod webhook;

pub use health::health_handler;
pub use webhook::webhook_handler;

pub fn build_router(ctx: AppContext) -> Router {
    Router::new()
        .route("/gitea/webhook", post(webhook_handler))
        .route("/health", get(health_handler))
        .with_state(ctx)
}

pub async fn serve(ctx: AppContext) -> AppResult<()> {
    let listen = ctx.config.server.url.clone();
    let listener = TcpListener::bind(listen.as_str()).await?;
    let addr: SocketAddr = listener.local_addr()?;
    info!(%addr, "listening for webhooks");

    axum::serve(listener, build_router(ctx))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Io)
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}
