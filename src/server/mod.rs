// Server module entry point
// Binds the listener, accepts connections and stops on shutdown signals

pub mod connection;
pub mod listener;
pub mod signal;

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use crate::config::AppState;
use crate::logger;

pub use listener::create_reusable_listener;

/// Serve until SIGINT/SIGTERM (Ctrl+C off Unix)
///
/// Connections already accepted keep running on their own tasks; only the
/// accept loop stops.
pub async fn run(state: Arc<AppState>) -> Result<(), Box<dyn std::error::Error>> {
    let addr = state.config.get_socket_addr()?;
    let listener = create_reusable_listener(addr)?;
    let active_connections = Arc::new(AtomicUsize::new(0));

    logger::log_server_start(&addr, &state.config, state.root.path());

    let shutdown = signal::wait_for_shutdown();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        connection::accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }

            () = &mut shutdown => break,
        }
    }

    drop(listener);
    logger::log_server_stop();
    Ok(())
}
