// Server module entry point
// Provides listener creation and the blocking serve loop

pub mod connection;
pub mod listener;

use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::AppState;
use crate::logger;

pub use listener::create_listener;

/// Blocking serve loop: accept connections until the process exits.
///
/// Accept errors are logged and the loop continues; there is no state to
/// unwind, so the only way out is process termination.
pub async fn run(
    listener: TcpListener,
    state: Arc<AppState>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                connection::accept_connection(stream, peer_addr, &state);
            }
            Err(e) => {
                logger::log_error(&format!("Failed to accept connection: {e}"));
            }
        }
    }
}
