pub mod dns;

pub use dns::start_dns_server;

use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Cancels `shutdown` on Ctrl-C, or SIGTERM on Unix.
pub async fn cancel_on_signal(shutdown: CancellationToken) {
    tokio::select! {
        result = signal::ctrl_c() => match result {
            Ok(()) => info!("Received SIGINT, initiating shutdown"),
            Err(e) => warn!(error = %e, "Failed to listen for Ctrl-C, shutting down"),
        },
        _ = wait_for_sigterm() => info!("Received SIGTERM, initiating shutdown"),
    }
    shutdown.cancel();
}

#[cfg(unix)]
async fn wait_for_sigterm() {
    use tokio::signal::unix::{signal, SignalKind};
    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            warn!(error = %e, "Failed to register SIGTERM handler");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_sigterm() {
    std::future::pending::<()>().await;
}
