//! Presentation shell abstraction
//!
//! The shell owns the document handle and does the actual rendering. The
//! viewer state only ever refers to pages by number and talks to the shell
//! through `UpdateAction`s executed by the engine.

pub mod text;

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;

use deck_core::prelude::*;
use deck_core::{preload_width, PageSize};
use serde::Serialize;

pub use text::TextDeckShell;

/// Result of a successful document load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DocumentInfo {
    pub page_count: u32,
}

/// How a page should be rendered
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderOptions {
    pub width: f32,
    pub height: f32,
    /// Produce the selectable text overlay
    pub text_layer: bool,
    /// Produce link/annotation overlays
    pub annotations: bool,
}

impl RenderOptions {
    /// Full render for the page on screen
    pub fn visible(size: PageSize) -> Self {
        Self {
            width: size.width,
            height: size.height,
            text_layer: true,
            annotations: true,
        }
    }

    /// Minimal-footprint render used to warm the cache off-screen
    pub fn preload(size: PageSize) -> Self {
        let width = preload_width(size.width);
        let height = if size.is_empty() {
            0.0
        } else {
            width * size.height / size.width
        };
        Self {
            width,
            height,
            text_layer: false,
            annotations: false,
        }
    }
}

/// Why a page render was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderPurpose {
    /// The page on screen
    Visible,
    /// Off-screen cache warming
    Preload,
}

/// Output of a page render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedPage {
    pub page: u32,
    pub width: f32,
    pub height: f32,
    /// Text overlay, one entry per row; empty without a text layer
    pub lines: Vec<String>,
}

/// Rendering surface the viewer drives
///
/// Implementations must tolerate concurrent `render_page` calls for
/// different pages.
#[trait_variant::make(PresentationShell: Send)]
pub trait LocalPresentationShell {
    /// Prepare the rendering engine
    async fn initialize(&self) -> Result<()>;

    /// Open the document and report its page count
    async fn load_document(&self, source: &Path) -> Result<DocumentInfo>;

    /// Render one page of the loaded document
    async fn render_page(&self, page: u32, options: RenderOptions) -> Result<RenderedPage>;

    /// Put text on the clipboard
    async fn copy_text(&self, text: &str) -> Result<()>;

    /// Open an external link outside the viewer
    async fn open_link(&self, url: &str) -> Result<()>;
}

/// Open a URL in the system browser.
///
/// If `browser` is non-empty, uses it as the browser command. Otherwise uses
/// the platform-default opener. The opener runs detached from the viewer; a
/// background task waits on it so no zombie process is left behind.
pub fn open_url_in_browser(url: &str, browser: &str) -> std::io::Result<()> {
    let mut child = browser_command(url, browser)?
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    tokio::spawn(async move {
        match child.wait().await {
            Ok(status) if !status.success() => debug!("Browser opener exited with {}", status),
            Ok(_) => {}
            Err(e) => warn!("Failed to wait for browser opener: {}", e),
        }
    });
    Ok(())
}

fn browser_command(url: &str, browser: &str) -> std::io::Result<Command> {
    if !browser.is_empty() {
        let mut command = Command::new(browser);
        command.arg(url);
        return Ok(command);
    }

    #[cfg(target_os = "macos")]
    {
        let mut command = Command::new("open");
        command.arg(url);
        Ok(command)
    }

    #[cfg(target_os = "linux")]
    {
        let mut command = Command::new("xdg-open");
        command.arg(url);
        Ok(command)
    }

    #[cfg(target_os = "windows")]
    {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", "", url]);
        Ok(command)
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "no browser opener available for this platform",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preload_options_are_minimal() {
        let options = RenderOptions::preload(PageSize::new(77.0, 100.0));
        assert!(!options.text_layer);
        assert!(!options.annotations);
        assert_eq!(options.width, 10.0);
        assert!((options.height - 12.987).abs() < 0.01);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_custom_browser_command_is_spawned() {
        assert!(open_url_in_browser("https://example.com", "true").is_ok());
        assert!(open_url_in_browser("https://example.com", "/nonexistent/browser").is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_browser_command_passes_url() {
        let output = browser_command("https://example.com/a", "echo")
            .unwrap()
            .output()
            .await
            .unwrap();
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "https://example.com/a");
    }

    #[test]
    fn test_visible_options_keep_layers() {
        let options = RenderOptions::visible(PageSize::new(40.0, 52.0));
        assert!(options.text_layer);
        assert!(options.annotations);
        assert_eq!(options.width, 40.0);
    }
}
