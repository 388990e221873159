//! Mock data API
//!
//! `GET /api/data` and `POST /api/data` answer with fixed envelopes; nothing
//! is stored or looked up. Run it headless with [`serve`] or next to the TUI
//! through [`ApiBridge`].

pub mod bridge;
pub mod error;
pub mod handlers;
pub mod router;

use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

pub use bridge::{ApiBridge, ApiEvent};
pub use error::ApiError;
pub use router::build_router;

pub async fn bind(addr: SocketAddr) -> anyhow::Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))
}

/// Serve on an already bound listener until `shutdown` resolves.
pub async fn run<F>(listener: TcpListener, shutdown: F) -> anyhow::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    info!("API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, build_router())
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("API stopped");
    Ok(())
}

/// Serve until Ctrl-C.
pub async fn serve(addr: SocketAddr) -> anyhow::Result<()> {
    let listener = bind(addr).await?;
    run(listener, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}
