use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, info, warn};

use crate::command::CommandParser;
use crate::config::ListenConfig;
use crate::delivery::CommandSender;
use crate::http::connection::Connection;

/// Pause after a failed accept so a persistent error does not spin.
const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(10);

#[derive(Debug, Error)]
pub enum ListenError {
    #[error("port not available: {port}")]
    PortUnavailable {
        port: u16,
        #[source]
        source: io::Error,
    },

    /// The socket was bound but its local address could not be read.
    #[error("listener address unavailable")]
    LocalAddr {
        #[source]
        source: io::Error,
    },
}

/// A running accept loop.
///
/// Dropping the handle closes the listening socket as well.
pub struct ListenerHandle {
    local_addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl ListenerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Closes the listener and waits for the accept loop to exit.
    ///
    /// Connections already accepted keep running until they finish.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Err(e) = (&mut self.task).await {
            warn!(error = %e, "accept loop ended abnormally");
        }
    }
}

/// Binds the configured address and starts accepting.
///
/// Returns `Ok(None)` without touching the network when the port is 0.
pub async fn start<P>(
    cfg: &ListenConfig,
    parser: Arc<P>,
    sender: CommandSender<P::Command>,
) -> Result<Option<ListenerHandle>, ListenError>
where
    P: CommandParser,
{
    if cfg.port == 0 {
        debug!("remote control disabled");
        return Ok(None);
    }

    let listener = TcpListener::bind((cfg.host.as_str(), cfg.port))
        .await
        .map_err(|source| ListenError::PortUnavailable {
            port: cfg.port,
            source,
        })?;

    spawn_accept_loop(listener, parser, sender)
        .map(Some)
        .map_err(|source| ListenError::LocalAddr { source })
}

/// Runs the accept loop on an already bound listener.
pub fn spawn_accept_loop<P>(
    listener: TcpListener,
    parser: Arc<P>,
    sender: CommandSender<P::Command>,
) -> io::Result<ListenerHandle>
where
    P: CommandParser,
{
    let local_addr = listener.local_addr()?;
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    info!("Listening on {}", local_addr);

    let task = tokio::spawn(accept_loop(listener, parser, sender, shutdown_rx));

    Ok(ListenerHandle {
        local_addr,
        shutdown: Some(shutdown_tx),
        task,
    })
}

async fn accept_loop<P>(
    listener: TcpListener,
    parser: Arc<P>,
    sender: CommandSender<P::Command>,
    mut shutdown: oneshot::Receiver<()>,
) where
    P: CommandParser,
{
    let local_addr = listener.local_addr().ok();
    let mut connections = JoinSet::new();

    loop {
        tokio::select! {
            _ = &mut shutdown => break,

            accepted = listener.accept() => {
                match accepted {
                    Ok((socket, peer)) => {
                        debug!("Accepted connection from {}", peer);

                        let conn = Connection::new(socket, parser.clone(), sender.clone());
                        connections.spawn(async move {
                            if let Err(e) = conn.run().await {
                                tracing::error!("Connection error from {}: {}", peer, e);
                            }
                        });
                    }
                    Err(e) => {
                        warn!(error = %e, "accept failed, continuing");
                        tokio::time::sleep(ACCEPT_RETRY_DELAY).await;
                    }
                }
            }

            Some(joined) = connections.join_next(), if !connections.is_empty() => {
                if let Err(e) = joined {
                    tracing::error!(error = %e, "connection task failed");
                }
            }
        }
    }

    drop(listener);
    connections.detach_all();
    info!(addr = ?local_addr, "Listener closed");
}
