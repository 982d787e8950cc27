// Shutdown signal handling
//
// - SIGTERM: graceful stop
// - SIGINT:  graceful stop (Ctrl+C)
// Other platforms only get Ctrl+C.

use crate::logger;

/// Resolve once a shutdown signal arrives.
///
/// If handlers can't be registered the server keeps running and is left to
/// be stopped externally.
#[cfg(unix)]
pub async fn wait_for_shutdown() {
    use tokio::signal::unix::{signal, SignalKind};

    let (mut sigterm, mut sigint) =
        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(term), Ok(int)) => (term, int),
            (Err(e), _) | (_, Err(e)) => {
                logger::log_error(&format!("Failed to register signal handlers: {e}"));
                return std::future::pending().await;
            }
        };

    tokio::select! {
        _ = sigterm.recv() => logger::log_info("SIGTERM received, shutting down"),
        _ = sigint.recv() => logger::log_info("SIGINT received, shutting down"),
    }
}

#[cfg(not(unix))]
pub async fn wait_for_shutdown() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => logger::log_info("Ctrl+C received, shutting down"),
        Err(e) => {
            logger::log_error(&format!("Failed to listen for Ctrl+C: {e}"));
            std::future::pending::<()>().await;
        }
    }
}
