//! Message types for the viewer (TEA pattern)

use crate::gesture::PointerEvent;
use crate::input_key::InputKey;
use crate::shell::{DocumentInfo, RenderPurpose, RenderedPage};
use crate::signals::ShutdownCause;
use crate::timer::Timer;
use deck_core::NavigationIntent;

/// All possible messages/actions in the viewer
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal or stdin
    Key(InputKey),

    /// Pointer (touch or mouse drag) sample
    Pointer(PointerEvent),

    /// Wheel tick; positive values scroll down
    Wheel { delta_y: f32 },

    /// Tap on the primary indicator
    IndicatorTap,

    /// Navigation intent from any adapter
    Navigate(NavigationIntent),

    /// Viewport size changed, in shell units
    Resize { width: f32, height: f32 },

    /// User asked to leave (`q`, Esc, Ctrl+C key, headless `quit`)
    Quit,

    /// Termination signal from the OS
    Signal(ShutdownCause),

    // ─────────────────────────────────────────────────────────
    // Document Lifecycle
    // ─────────────────────────────────────────────────────────
    /// Initialize the renderer and load the document
    Start,

    /// Renderer initialization finished
    RendererReady { generation: u64 },

    /// Renderer initialization failed
    RendererFailed { generation: u64, message: String },

    /// Document opened
    DocumentLoaded { generation: u64, info: DocumentInfo },

    /// Document failed to open
    DocumentFailed { generation: u64, message: String },

    /// A page render completed
    PageRendered {
        generation: u64,
        purpose: RenderPurpose,
        page: RenderedPage,
    },

    /// A page render failed
    PageRenderFailed {
        generation: u64,
        purpose: RenderPurpose,
        page: u32,
        message: String,
    },

    /// Retry from the error screen
    RetryLoad,

    // ─────────────────────────────────────────────────────────
    // File Watcher
    // ─────────────────────────────────────────────────────────
    /// The deck file changed on disk
    DocumentChanged,

    /// The watcher reported an error
    WatcherError { message: String },

    // ─────────────────────────────────────────────────────────
    // Call To Action
    // ─────────────────────────────────────────────────────────
    /// Donate capsule pressed
    DonatePressed,

    /// Form capsule pressed
    FormPressed,

    /// Open the current insertion outside the viewer
    OpenInsertion,

    /// Clipboard write finished
    CopyFinished { result: Result<(), String> },

    /// External link launched (or failed to)
    LinkOpened { url: String, result: Result<(), String> },

    /// Dismiss the notice overlay
    DismissNotice,

    // ─────────────────────────────────────────────────────────
    // Timers
    // ─────────────────────────────────────────────────────────
    /// A scheduled timer elapsed
    TimerFired(Timer),
}
