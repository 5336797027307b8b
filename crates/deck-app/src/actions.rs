//! Action handlers: UpdateAction dispatch and background task spawning
//!
//! Every asynchronous boundary (renderer, document, page renders, clipboard,
//! links and timers) runs as a tokio task that reports back only by sending
//! a `Message`.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use deck_core::prelude::*;

use crate::message::Message;
use crate::shell::PresentationShell;
use crate::timer::{Timer, TimerSlot};
use crate::UpdateAction;

/// Handles of the engine's background work
///
/// Holds at most one pending timer per [`TimerSlot`]; scheduling into an
/// occupied slot aborts the previous timer.
#[derive(Debug, Default)]
pub struct TaskSet {
    timers: HashMap<TimerSlot, JoinHandle<()>>,
    work: Vec<JoinHandle<()>>,
}

impl TaskSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `Message::TimerFired(timer)` after `after`
    pub fn schedule(&mut self, timer: Timer, after: Duration, msg_tx: mpsc::Sender<Message>) {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            let _ = msg_tx.send(Message::TimerFired(timer)).await;
        });

        if let Some(previous) = self.timers.insert(timer.slot(), handle) {
            previous.abort();
        }
    }

    pub fn cancel(&mut self, slots: &[TimerSlot]) {
        for slot in slots {
            if let Some(handle) = self.timers.remove(slot) {
                handle.abort();
            }
        }
    }

    /// Track a one-shot task so shutdown can abort it
    pub fn track(&mut self, handle: JoinHandle<()>) {
        self.work.retain(|h| !h.is_finished());
        self.work.push(handle);
    }

    /// Timers scheduled and not yet fired
    pub fn pending_timers(&self) -> usize {
        self.timers.values().filter(|h| !h.is_finished()).count()
    }

    pub fn is_pending(&self, slot: TimerSlot) -> bool {
        self.timers.get(&slot).is_some_and(|h| !h.is_finished())
    }

    /// Abort every timer and task
    pub fn abort_all(&mut self) {
        for (_, handle) in self.timers.drain() {
            handle.abort();
        }
        for handle in self.work.drain(..) {
            handle.abort();
        }
    }
}

/// Execute an action, spawning background work where needed
pub fn handle_action<S>(
    action: UpdateAction,
    msg_tx: &mpsc::Sender<Message>,
    shell: &Arc<S>,
    source: &Path,
    tasks: &mut TaskSet,
) where
    S: PresentationShell + Sync + 'static,
{
    match action {
        UpdateAction::InitializeRenderer { generation } => {
            let shell = shell.clone();
            let tx = msg_tx.clone();
            tasks.track(tokio::spawn(async move {
                let msg = match shell.initialize().await {
                    Ok(()) => Message::RendererReady { generation },
                    Err(e) => {
                        log_shell_failure("Renderer initialization", &e);
                        Message::RendererFailed {
                            generation,
                            message: e.to_string(),
                        }
                    }
                };
                let _ = tx.send(msg).await;
            }));
        }

        UpdateAction::LoadDocument { generation } => {
            let shell = shell.clone();
            let tx = msg_tx.clone();
            let source = source.to_path_buf();
            tasks.track(tokio::spawn(async move {
                let msg = match shell.load_document(&source).await {
                    Ok(info) => Message::DocumentLoaded { generation, info },
                    Err(e) => {
                        log_shell_failure("Document load", &e);
                        Message::DocumentFailed {
                            generation,
                            message: e.to_string(),
                        }
                    }
                };
                let _ = tx.send(msg).await;
            }));
        }

        UpdateAction::RenderPage {
            generation,
            page,
            options,
            purpose,
        } => {
            trace!("Rendering page {} ({:?})", page, purpose);
            let shell = shell.clone();
            let tx = msg_tx.clone();
            tasks.track(tokio::spawn(async move {
                let msg = match shell.render_page(page, options).await {
                    Ok(rendered) => Message::PageRendered {
                        generation,
                        purpose,
                        page: rendered,
                    },
                    Err(e) => {
                        log_shell_failure("Page render", &e);
                        Message::PageRenderFailed {
                            generation,
                            purpose,
                            page,
                            message: e.to_string(),
                        }
                    }
                };
                let _ = tx.send(msg).await;
            }));
        }

        UpdateAction::ScheduleTimer { timer, after } => {
            trace!("Scheduling {:?} in {:?}", timer, after);
            tasks.schedule(timer, after, msg_tx.clone());
        }

        UpdateAction::CancelTimers(slots) => {
            tasks.cancel(&slots);
        }

        UpdateAction::CopyText { text } => {
            let shell = shell.clone();
            let tx = msg_tx.clone();
            tasks.track(tokio::spawn(async move {
                let result = shell.copy_text(&text).await.map_err(|e| {
                    log_shell_failure("Copy", &e);
                    e.to_string()
                });
                let _ = tx.send(Message::CopyFinished { result }).await;
            }));
        }

        UpdateAction::OpenLink { url } => {
            debug!("Opening link {}", url);
            let shell = shell.clone();
            let tx = msg_tx.clone();
            tasks.track(tokio::spawn(async move {
                let result = shell.open_link(&url).await.map_err(|e| {
                    log_shell_failure("Open link", &e);
                    e.to_string()
                });
                let _ = tx.send(Message::LinkOpened { url, result }).await;
            }));
        }
    }
}

/// Log a failed shell call at a level matching its severity
fn log_shell_failure(operation: &str, error: &Error) {
    if error.is_fatal() {
        error!("{} failed: {}", operation, error);
    } else if error.is_recoverable() {
        debug!("{} failed: {}", operation, error);
    } else {
        warn!("{} failed: {}", operation, error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_timer_fires_after_delay() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut tasks = TaskSet::new();

        tasks.schedule(
            Timer::CarouselTick { epoch: 1 },
            Duration::from_millis(300),
            tx,
        );
        assert!(tasks.is_pending(TimerSlot::CarouselTick));

        tokio::time::sleep(Duration::from_millis(301)).await;
        match rx.try_recv() {
            Ok(Message::TimerFired(Timer::CarouselTick { epoch: 1 })) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_rescheduling_replaces_pending_timer() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut tasks = TaskSet::new();

        tasks.schedule(
            Timer::ExitElapsed { navigation: 1 },
            Duration::from_millis(200),
            tx.clone(),
        );
        tasks.schedule(
            Timer::ExitElapsed { navigation: 2 },
            Duration::from_millis(200),
            tx,
        );

        tokio::time::sleep(Duration::from_millis(500)).await;
        let mut fired = Vec::new();
        while let Ok(msg) = rx.try_recv() {
            fired.push(msg);
        }
        assert_eq!(fired.len(), 1);
        assert!(matches!(
            fired[0],
            Message::TimerFired(Timer::ExitElapsed { navigation: 2 })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_and_abort_all_drop_timers() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut tasks = TaskSet::new();

        tasks.schedule(
            Timer::CarouselTick { epoch: 1 },
            Duration::from_millis(100),
            tx.clone(),
        );
        tasks.schedule(
            Timer::LoadingSettled { generation: 1 },
            Duration::from_millis(100),
            tx,
        );
        tasks.cancel(&[TimerSlot::CarouselTick]);
        assert!(!tasks.is_pending(TimerSlot::CarouselTick));

        tasks.abort_all();
        assert_eq!(tasks.pending_timers(), 0);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(rx.try_recv().is_err());
    }
}
