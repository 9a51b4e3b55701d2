// Signal handling module
//
// SIGTERM and SIGINT (Ctrl+C) trigger a graceful stop of the accept
// loop; in-flight connections finish naturally.

use std::sync::Arc;
use tokio::sync::Notify;

/// Start the shutdown signal listener (Unix)
#[cfg(unix)]
pub fn start_signal_handler(shutdown: Arc<Notify>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let mut sigterm =
            signal(SignalKind::terminate()).expect("Failed to register SIGTERM handler");
        let mut sigint =
            signal(SignalKind::interrupt()).expect("Failed to register SIGINT handler");

        tokio::select! {
            _ = sigterm.recv() => println!("\n[SIGNAL] SIGTERM received, shutting down"),
            _ = sigint.recv() => println!("\n[SIGNAL] SIGINT received, shutting down"),
        }
        shutdown.notify_waiters();
    });
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(shutdown: Arc<Notify>) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!("\n[SIGNAL] Ctrl+C received, shutting down");
            shutdown.notify_waiters();
        }
    });
}
