// Signal handling module
//
// SIGINT (Ctrl+C) and SIGTERM both stop the server; there is no
// in-flight request draining.

use std::sync::Arc;

use tokio::sync::Notify;

/// Spawn the signal listener task, returning the shutdown notifier
#[cfg(unix)]
pub fn spawn_signal_handler() -> Arc<Notify> {
    use tokio::signal::unix::{signal, SignalKind};

    use crate::logger;

    let shutdown = Arc::new(Notify::new());
    let notify = Arc::clone(&shutdown);

    tokio::spawn(async move {
        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(s) => s,
            Err(e) => {
                logger::log_error(&format!("Failed to register SIGTERM handler: {e}"));
                return;
            }
        };

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }

        notify.notify_waiters();
    });

    shutdown
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn spawn_signal_handler() -> Arc<Notify> {
    let shutdown = Arc::new(Notify::new());
    let notify = Arc::clone(&shutdown);

    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            notify.notify_waiters();
        }
    });

    shutdown
}
