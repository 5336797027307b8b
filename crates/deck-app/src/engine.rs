//! Engine - shared orchestration state for TUI and headless runners
//!
//! The Engine owns the viewer state, the message channel, the presentation
//! shell, every background task and the deck watcher. Runners feed it
//! messages and render from `engine.state`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use deck_core::{CapsuleStage, TransitionPhase};

use crate::actions::TaskSet;
use crate::config::{self, Settings};
use crate::engine_event::EngineEvent;
use crate::message::Message;
use crate::process;
use crate::shell::PresentationShell;
use crate::signals::{self, ShutdownCause};
use crate::state::{DonateLabel, ViewerState};
use crate::watcher::{DeckWatcher, WatcherConfig};

/// Lightweight snapshot of state for change detection.
///
/// Captured before message processing, compared after to detect
/// what changed and emit appropriate EngineEvents.
#[derive(Debug, Clone, PartialEq)]
struct StateSnapshot {
    generation: u64,
    loaded: bool,
    failed: bool,
    loading_settled: bool,
    loaded_pages: u32,
    position: u32,
    total: u32,
    phase: TransitionPhase,
    label: String,
    stage: CapsuleStage,
    donate_visible: bool,
    form_visible: bool,
    donate_label: DonateLabel,
    links_opened: u32,
    notice: Option<String>,
}

impl StateSnapshot {
    fn capture(state: &ViewerState) -> Self {
        let latch = state.capsules.latch;
        Self {
            generation: state.generation,
            loaded: state.load.is_loaded(),
            failed: state.load.failure().is_some(),
            loading_settled: state.loading_settled,
            loaded_pages: state.cache.loaded_count(),
            position: state.position(),
            total: state.total(),
            phase: state.navigation.transition.phase,
            label: state.indicator_label(),
            stage: latch.stage(),
            donate_visible: latch.donate_visible(),
            form_visible: latch.form_visible(),
            donate_label: state.capsules.donate_label,
            links_opened: state.links_opened,
            notice: state.notice.clone(),
        }
    }
}

/// Orchestration engine for deckview.
///
/// Generic over the presentation shell so the terminal, headless and test
/// runners share one event loop implementation.
pub struct Engine<S> {
    /// TEA viewer state (the Model)
    pub state: ViewerState,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources (signal handler, watcher, stdin).
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    pub msg_rx: mpsc::Receiver<Message>,

    /// Sender for the shutdown signal. Send `true` to initiate shutdown.
    pub shutdown_tx: watch::Sender<bool>,

    /// Receiver for the shutdown signal. Clone for background tasks.
    pub shutdown_rx: watch::Receiver<bool>,

    /// Rendering surface
    shell: Arc<S>,

    /// Timers and in-flight shell calls
    tasks: TaskSet,

    /// Deck watcher. None if disabled or failed to start.
    deck_watcher: Option<DeckWatcher>,

    signal_task: Option<JoinHandle<()>>,

    /// Event broadcaster for external consumers
    event_tx: broadcast::Sender<EngineEvent>,

    shut_down: bool,
}

impl<S> Engine<S>
where
    S: PresentationShell + Sync + 'static,
{
    /// Create an Engine for a deck file.
    ///
    /// Loads settings and insertions from the `.deckview/` directory next to
    /// the deck, spawns the signal handler and starts the deck watcher.
    pub fn new(deck_path: PathBuf, shell: S) -> Self {
        Self::with_shell_factory(deck_path, |_| shell)
    }

    /// Like [`Engine::new`], building the shell from the loaded settings
    pub fn with_shell_factory(deck_path: PathBuf, make_shell: impl FnOnce(&Settings) -> S) -> Self {
        let deck_dir = deck_dir(&deck_path);
        let settings = config::load_settings(&deck_dir);
        let insertions = config::load_insertions(&deck_dir);
        let shell = make_shell(&settings);

        let mut engine = Self::with_settings(deck_path, settings, insertions.accepted, shell);
        engine.signal_task = Some(signals::spawn_signal_handler(engine.msg_tx.clone()));
        engine.deck_watcher = engine.start_deck_watcher();
        engine
    }

    /// Create an Engine from explicit settings, without signal handling or
    /// file watching
    pub fn with_settings(
        deck_path: PathBuf,
        settings: Settings,
        insertions: Vec<deck_core::Insertion>,
        shell: S,
    ) -> Self {
        let state = ViewerState::new(deck_path, settings, insertions);
        let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (event_tx, _) = broadcast::channel(256);

        Self {
            state,
            msg_tx,
            msg_rx,
            shutdown_tx,
            shutdown_rx,
            shell: Arc::new(shell),
            tasks: TaskSet::new(),
            deck_watcher: None,
            signal_task: None,
            event_tx,
            shut_down: false,
        }
    }

    /// Subscribe to engine events.
    ///
    /// If the subscriber falls behind (buffer full), older events are
    /// dropped. Use `broadcast::error::RecvError::Lagged` to detect this.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    pub fn shell(&self) -> &Arc<S> {
        &self.shell
    }

    /// Kick off renderer initialization and the document load
    pub fn start(&mut self) {
        self.process_message(Message::Start);
    }

    /// Process a single message through the TEA update cycle.
    ///
    /// Emits EngineEvents based on state changes detected by comparing
    /// before/after snapshots. Ignored after shutdown.
    pub fn process_message(&mut self, msg: Message) {
        if self.shut_down {
            return;
        }

        let pre = StateSnapshot::capture(&self.state);

        process::process_message(
            &mut self.state,
            msg,
            &self.msg_tx,
            &self.shell,
            &mut self.tasks,
        );

        let post = StateSnapshot::capture(&self.state);
        if pre != post {
            self.emit_events(&pre, &post);
        }
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Wait for the next message and process it.
    ///
    /// Returns false once the channel closed.
    pub async fn step(&mut self) -> bool {
        match self.msg_rx.recv().await {
            Some(msg) => {
                self.process_message(msg);
                true
            }
            None => false,
        }
    }

    /// Get a clone of the message sender for spawning input sources.
    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// Timers currently waiting to fire
    pub fn pending_timers(&self) -> usize {
        self.tasks.pending_timers()
    }

    /// Tear down: abort timers and in-flight work, stop the watcher and
    /// signal background tasks. No message is processed afterwards.
    pub async fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;

        let cause = self
            .state
            .shutdown_cause()
            .unwrap_or(ShutdownCause::Teardown);
        self.emit(EngineEvent::Shutdown { cause });

        if let Some(ref mut watcher) = self.deck_watcher {
            watcher.stop();
        }
        if let Some(handle) = self.signal_task.take() {
            handle.abort();
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    warn!("Signal handler ended abnormally: {}", e);
                }
            }
        }

        self.tasks.abort_all();
        let _ = self.shutdown_tx.send(true);

        // Drop anything that was already queued
        while self.msg_rx.try_recv().is_ok() {}

        info!("Engine shut down");
    }

    /// Emit EngineEvents based on state changes after processing.
    fn emit_events(&self, pre: &StateSnapshot, post: &StateSnapshot) {
        let state = &self.state;

        if let Some(failure) = state.load.failure() {
            if !pre.failed || pre.generation != post.generation {
                self.emit(EngineEvent::LoadFailed {
                    stage: failure.stage,
                    message: failure.message.clone(),
                });
            }
        }

        if post.loaded && (!pre.loaded || pre.generation != post.generation) {
            self.emit(EngineEvent::DocumentLoaded {
                page_count: state.cache.page_count(),
                total: post.total,
            });
        }

        if post.loaded_pages != pre.loaded_pages && post.loaded {
            self.emit(EngineEvent::LoadingProgress {
                loaded: post.loaded_pages,
                page_count: state.cache.page_count(),
                progress: state.cache.progress(),
            });
        }

        if post.loading_settled && !pre.loading_settled {
            self.emit(EngineEvent::Ready);
        }

        if post.phase != pre.phase {
            self.emit(EngineEvent::TransitionChanged {
                phase: post.phase,
                direction: state.navigation.transition.direction,
            });
        }

        if post.position != pre.position || post.total != pre.total {
            self.emit(EngineEvent::PositionChanged {
                position: post.position,
                total: post.total,
                page: state.current_page(),
                insertion: state.current_insertion().map(|i| i.url.clone()),
            });
        }

        if post.label != pre.label {
            self.emit(EngineEvent::IndicatorChanged {
                label: post.label.clone(),
            });
        }

        if post.stage != pre.stage
            || post.donate_visible != pre.donate_visible
            || post.form_visible != pre.form_visible
        {
            self.emit(EngineEvent::CapsulesChanged {
                stage: post.stage,
                donate_visible: post.donate_visible,
                form_visible: post.form_visible,
            });
        }

        if post.donate_label != pre.donate_label {
            self.emit(EngineEvent::DonateLabelChanged {
                label: post.donate_label.as_str().to_string(),
            });
        }

        if post.links_opened > pre.links_opened {
            if let Some(url) = &state.last_link {
                self.emit(EngineEvent::LinkOpened { url: url.clone() });
            }
        }

        if post.notice != pre.notice {
            if let Some(message) = &post.notice {
                self.emit(EngineEvent::NoticeShown {
                    message: message.clone(),
                });
            }
        }
    }

    /// Emit a single EngineEvent to all subscribers.
    ///
    /// send() returns Err only if there are no receivers.
    fn emit(&self, event: EngineEvent) {
        let _ = self.event_tx.send(event);
    }

    /// Create and start the deck watcher
    fn start_deck_watcher(&self) -> Option<DeckWatcher> {
        let settings = &self.state.settings.watcher;
        if !settings.enabled {
            info!("Deck watcher disabled");
            return None;
        }

        let mut watcher = DeckWatcher::new(
            self.state.source().to_path_buf(),
            WatcherConfig::new().with_debounce_ms(settings.debounce_ms),
        );

        if let Err(e) = watcher.start(self.msg_tx.clone()) {
            warn!("Failed to start deck watcher: {}", e);
            return None;
        }
        Some(watcher)
    }
}

/// Directory holding the deck (and its `.deckview/` config)
pub fn deck_dir(deck_path: &Path) -> PathBuf {
    match deck_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
