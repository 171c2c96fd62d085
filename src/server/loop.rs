// Server loop module
// Accepts connections until the shutdown signal fires

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::Notify;

use crate::config::AppState;
use crate::logger;

use super::connection::accept_connection;

/// Accept connections until `shutdown` is notified.
///
/// Accept errors are logged and the loop continues; each request is
/// handled independently with no state shared across requests beyond
/// the read-only `AppState`.
pub async fn run(listener: TcpListener, state: Arc<AppState>, shutdown: Arc<Notify>) {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.notified() => {
                break;
            }
        }
    }
}
