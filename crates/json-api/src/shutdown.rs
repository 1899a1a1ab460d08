//! Graceful shutdown signal handling

use std::{io, time::Duration};

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::{signal, task::JoinHandle, time};
use tracing::{error, info, warn};

/// Upper bound on how long shutdown waits for queued order confirmations.
pub(crate) const NOTIFICATION_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to install Ctrl+C handler: {0}")]
    CtrlC(#[source] io::Error),

    #[cfg(unix)]
    #[error("failed to install SIGTERM handler: {0}")]
    SigTerm(#[source] io::Error),
}

/// Wait for Ctrl+C or SIGTERM, then stop accepting connections and let
/// in-flight requests finish.
pub(crate) async fn listen(handle: ServerHandle) -> Result<(), ShutdownSignalError> {
    let signal_name = wait_for_signal().await?;

    info!(signal = signal_name, "shutdown signal received");

    handle.stop_graceful(None);

    Ok(())
}

/// Wait for the notification worker to deliver what is still queued.
///
/// The worker only finishes once every notifier handle is gone, so call this
/// after the server, and with it the app state, has been dropped. Returns
/// whether the queue drained within `timeout`.
pub(crate) async fn drain_notifications(worker: JoinHandle<()>, timeout: Duration) -> bool {
    match time::timeout(timeout, worker).await {
        Ok(Ok(())) => {
            info!("order confirmations drained");

            true
        }
        Ok(Err(source)) => {
            error!("notification worker failed: {source}");

            false
        }
        Err(_elapsed) => {
            warn!(?timeout, "gave up waiting for order confirmations to drain");

            false
        }
    }
}

#[cfg(unix)]
async fn wait_for_signal() -> Result<&'static str, ShutdownSignalError> {
    let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())
        .map_err(ShutdownSignalError::SigTerm)?;

    tokio::select! {
        result = signal::ctrl_c() => {
            result.map_err(ShutdownSignalError::CtrlC)?;

            Ok("ctrl_c")
        }
        _ = terminate.recv() => Ok("sigterm"),
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> Result<&'static str, ShutdownSignalError> {
    signal::ctrl_c().await.map_err(ShutdownSignalError::CtrlC)?;

    Ok("ctrl_c")
}
