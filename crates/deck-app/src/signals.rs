//! OS signals and the recorded reason the viewer stopped

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::message::Message;
use deck_core::prelude::*;

/// Why the viewer shut down, reported with the final `shutdown` event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShutdownCause {
    /// `q`, Esc, Ctrl+C as a key, or the headless `quit` command
    UserQuit,
    /// SIGINT, or Ctrl+C on Windows
    Interrupt,
    /// SIGTERM
    Terminate,
    /// The runner tore the engine down without a quit request
    Teardown,
}

impl ShutdownCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShutdownCause::UserQuit => "user_quit",
            ShutdownCause::Interrupt => "interrupt",
            ShutdownCause::Terminate => "terminate",
            ShutdownCause::Teardown => "teardown",
        }
    }
}

/// Spawn the task that turns the first termination signal into
/// `Message::Signal`. The engine aborts the returned handle on shutdown.
pub fn spawn_signal_handler(tx: mpsc::Sender<Message>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let cause = match wait_for_signal().await {
            Ok(cause) => cause,
            Err(e) => {
                error!("Signal handler unavailable: {}", e);
                return;
            }
        };

        info!("Received {} signal", cause.as_str());
        let _ = tx.send(Message::Signal(cause)).await;
    })
}

#[cfg(unix)]
async fn wait_for_signal() -> Result<ShutdownCause> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt()).context("Failed to install SIGINT handler")?;
    let mut sigterm =
        signal(SignalKind::terminate()).context("Failed to install SIGTERM handler")?;

    let cause = tokio::select! {
        _ = sigint.recv() => ShutdownCause::Interrupt,
        _ = sigterm.recv() => ShutdownCause::Terminate,
    };
    Ok(cause)
}

#[cfg(not(unix))]
async fn wait_for_signal() -> Result<ShutdownCause> {
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl+C")?;
    Ok(ShutdownCause::Interrupt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_handler_waits_quietly_until_aborted() {
        let (tx, mut rx) = mpsc::channel::<Message>(1);

        let handle = spawn_signal_handler(tx);
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());

        handle.abort();
        let joined = handle.await;
        assert!(joined.is_err_and(|e| e.is_cancelled()));

        // The sender died with the task
        assert!(rx.recv().await.is_none());
    }

    #[test]
    fn test_cause_labels() {
        assert_eq!(ShutdownCause::UserQuit.as_str(), "user_quit");
        assert_eq!(ShutdownCause::Terminate.as_str(), "terminate");
    }
}
