//! Deck file watcher
//!
//! Watches the directory holding the deck and reports changes to the deck
//! file itself. The directory is watched rather than the file so editors
//! that save by replacing the file are still seen.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::RecursiveMode;
use notify_debouncer_full::{new_debouncer, DebounceEventResult};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::message::Message;

/// Default debounce duration in milliseconds
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Configuration for the deck watcher
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    /// Debounce duration
    pub debounce: Duration,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }
}

impl WatcherConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set debounce duration in milliseconds
    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce = Duration::from_millis(ms);
        self
    }
}

/// Watches one deck file for changes
pub struct DeckWatcher {
    /// Deck file
    deck_path: PathBuf,
    config: WatcherConfig,
    /// Handle to stop the watcher
    stop_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl DeckWatcher {
    pub fn new(deck_path: PathBuf, config: WatcherConfig) -> Self {
        Self {
            deck_path,
            config,
            stop_tx: None,
        }
    }

    /// Start watching
    ///
    /// Sends `Message::DocumentChanged` when the deck changes on disk
    pub fn start(&mut self, message_tx: mpsc::Sender<Message>) -> Result<(), String> {
        if self.is_running() {
            return Err("Watcher is already running".to_string());
        }

        let deck_path = self.deck_path.clone();
        let config = self.config.clone();
        let (stop_tx, stop_rx) = tokio::sync::oneshot::channel();

        self.stop_tx = Some(stop_tx);

        tokio::task::spawn_blocking(move || {
            Self::run_watcher(deck_path, config, message_tx, stop_rx);
        });

        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
    }

    pub fn is_running(&self) -> bool {
        self.stop_tx.is_some()
    }

    fn run_watcher(
        deck_path: PathBuf,
        config: WatcherConfig,
        message_tx: mpsc::Sender<Message>,
        mut stop_rx: tokio::sync::oneshot::Receiver<()>,
    ) {
        let tx_clone = message_tx.clone();
        let file_name = deck_path.file_name().map(|name| name.to_os_string());

        let debouncer_result = new_debouncer(
            config.debounce,
            None,
            move |result: DebounceEventResult| match result {
                Ok(events) => {
                    let touched = events.iter().any(|event| {
                        event
                            .paths
                            .iter()
                            .any(|path| is_deck_path(path, file_name.as_deref()))
                    });
                    if touched {
                        debug!("Deck file changed on disk");
                        let _ = tx_clone.blocking_send(Message::DocumentChanged);
                    }
                }
                Err(errors) => {
                    for error in errors {
                        warn!("Deck watcher error: {:?}", error);
                        let _ = tx_clone.blocking_send(Message::WatcherError {
                            message: error.to_string(),
                        });
                    }
                }
            },
        );

        let mut debouncer = match debouncer_result {
            Ok(d) => d,
            Err(e) => {
                error!("Failed to create deck watcher: {}", e);
                let _ = message_tx.blocking_send(Message::WatcherError {
                    message: format!("Failed to create watcher: {}", e),
                });
                return;
            }
        };

        let dir = watch_dir(&deck_path);
        if let Err(e) = debouncer.watch(&dir, RecursiveMode::NonRecursive) {
            warn!("Failed to watch {}: {}", dir.display(), e);
            return;
        }
        info!("Watching: {}", deck_path.display());

        // Keep running until stop signal
        loop {
            match stop_rx.try_recv() {
                Ok(()) | Err(tokio::sync::oneshot::error::TryRecvError::Closed) => {
                    info!("Deck watcher stopping");
                    break;
                }
                Err(tokio::sync::oneshot::error::TryRecvError::Empty) => {
                    std::thread::sleep(Duration::from_millis(100));
                }
            }
        }
    }
}

impl Drop for DeckWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Directory to hand to the OS watcher
fn watch_dir(deck_path: &Path) -> PathBuf {
    match deck_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn is_deck_path(path: &Path, file_name: Option<&std::ffi::OsStr>) -> bool {
    match file_name {
        Some(name) => path.file_name() == Some(name),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watcher_config_default() {
        let config = WatcherConfig::default();
        assert_eq!(config.debounce, Duration::from_millis(500));
    }

    #[test]
    fn test_watcher_config_builder() {
        let config = WatcherConfig::new().with_debounce_ms(1000);
        assert_eq!(config.debounce, Duration::from_millis(1000));
    }

    #[test]
    fn test_watch_dir_for_bare_file_name() {
        assert_eq!(watch_dir(Path::new("deck.txt")), PathBuf::from("."));
        assert_eq!(
            watch_dir(Path::new("/decks/deck.txt")),
            PathBuf::from("/decks")
        );
    }

    #[test]
    fn test_only_deck_file_counts() {
        let name = std::ffi::OsStr::new("deck.txt");
        assert!(is_deck_path(Path::new("/decks/deck.txt"), Some(name)));
        assert!(!is_deck_path(Path::new("/decks/notes.txt"), Some(name)));
        assert!(!is_deck_path(Path::new("/decks/deck.txt"), None));
    }

    #[tokio::test]
    async fn test_stop_when_not_started() {
        let mut watcher = DeckWatcher::new(PathBuf::from("/tmp/deck.txt"), WatcherConfig::new());
        watcher.stop();
        assert!(!watcher.is_running());
    }

    #[tokio::test]
    async fn test_double_start_error() {
        let dir = tempfile::tempdir().unwrap();
        let deck = dir.path().join("deck.txt");
        std::fs::write(&deck, "one").unwrap();

        let mut watcher = DeckWatcher::new(deck, WatcherConfig::new());
        let (tx, _rx) = mpsc::channel(32);

        assert!(watcher.start(tx.clone()).is_ok());
        assert!(watcher.is_running());

        let second = watcher.start(tx);
        assert!(second.unwrap_err().contains("already running"));

        watcher.stop();
    }
}
