use std::future::Future;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::task::JoinSet;
use tracing::{Instrument, error, info, info_span};

use crate::config::Config;
use crate::http::connection::{Connection, SharedHandler};

/// Binds `cfg.listen_addr` and serves until `shutdown` resolves.
pub async fn run<F>(cfg: &Config, handler: SharedHandler, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()>,
{
    let listener = TcpListener::bind(&cfg.listen_addr)
        .await
        .with_context(|| format!("binding {}", cfg.listen_addr))?;
    info!("Listening on {}", listener.local_addr()?);

    serve(listener, handler, cfg.read_buffer_size, shutdown).await
}

/// Accepts connections and runs each one on its own task.
///
/// Once `shutdown` resolves the listener is closed; connections already
/// accepted run to completion before this returns.
pub async fn serve<F>(
    listener: TcpListener,
    handler: SharedHandler,
    read_buffer_size: usize,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()>,
{
    let mut connections = JoinSet::new();
    let mut outcome = Ok(());
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Shutdown signal received");
                break;
            }

            accepted = listener.accept() => {
                let (socket, peer) = match accepted {
                    Ok(conn) => conn,
                    Err(e) => {
                        outcome = Err(e).context("accepting connection");
                        break;
                    }
                };
                info!("Accepted connection from {}", peer);

                let handler = Arc::clone(&handler);
                connections.spawn(
                    async move {
                        let mut conn = Connection::new(socket, read_buffer_size);
                        if let Err(e) = conn.run(handler.as_ref()).await {
                            error!("Connection error from {}: {}", peer, e);
                        }
                    }
                    .instrument(info_span!("conn", %peer)),
                );
            }

            Some(joined) = connections.join_next(), if !connections.is_empty() => {
                if let Err(e) = joined {
                    error!(error = %e, "Connection task failed");
                }
            }
        }
    }

    drop(listener);

    if !connections.is_empty() {
        info!(in_flight = connections.len(), "Waiting for open connections");
    }
    while let Some(joined) = connections.join_next().await {
        if let Err(e) = joined {
            error!(error = %e, "Connection task failed");
        }
    }

    outcome
}
