//! API bridge - runs the mock API next to the synchronous TUI
//!
//! The server gets its own thread and Tokio runtime. Lifecycle events come
//! back over a std channel that the UI loop drains once per frame.

use std::net::SocketAddr;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use tokio::runtime::Runtime;
use tokio::sync::oneshot;

/// Events sent from the server thread to the TUI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiEvent {
    Listening { addr: SocketAddr },
    Stopped,
    Error { message: String },
}

pub struct ApiBridge {
    shutdown_tx: Option<oneshot::Sender<()>>,
    evt_rx: Receiver<ApiEvent>,
}

impl ApiBridge {
    /// Spawn the server thread; bind errors arrive later as `ApiEvent::Error`
    pub fn start(addr: SocketAddr) -> anyhow::Result<Self> {
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let (evt_tx, evt_rx) = mpsc::channel::<ApiEvent>();
        let rt = Runtime::new()?;

        thread::Builder::new()
            .name("sales-intel-api".to_string())
            .spawn(move || {
                rt.block_on(async {
                    let result = async {
                        let listener = super::bind(addr).await?;
                        let _ = evt_tx.send(ApiEvent::Listening {
                            addr: listener.local_addr()?,
                        });
                        super::run(listener, async move {
                            let _ = shutdown_rx.await;
                        })
                        .await?;
                        Ok::<(), anyhow::Error>(())
                    }
                    .await;

                    match result {
                        Ok(()) => {
                            let _ = evt_tx.send(ApiEvent::Stopped);
                        }
                        Err(err) => {
                            let message = format!("{err:#}");
                            tracing::error!(error = %message, "API server exited");
                            let _ = evt_tx.send(ApiEvent::Error { message });
                        }
                    }
                });
            })?;

        Ok(Self {
            shutdown_tx: Some(shutdown_tx),
            evt_rx,
        })
    }

    /// Poll for events (non-blocking)
    pub fn poll_events(&self) -> Vec<ApiEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.evt_rx.try_recv() {
            events.push(evt);
        }
        events
    }

    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for ApiBridge {
    fn drop(&mut self) {
        self.shutdown();
    }
}
