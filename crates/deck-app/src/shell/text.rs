//! Plain-text deck shell
//!
//! A text deck is a UTF-8 file whose pages are separated by form feed
//! characters (`\x0C`). Rendering word-wraps a page to the requested size,
//! measured in terminal cells.

use std::path::Path;

use tokio::sync::RwLock;

use deck_core::prelude::*;

use super::{open_url_in_browser, DocumentInfo, PresentationShell, RenderOptions, RenderedPage};

/// Page separator in text decks
pub const PAGE_SEPARATOR: char = '\x0C';

/// Shell backed by a form-feed separated text file
#[derive(Debug, Default)]
pub struct TextDeckShell {
    pages: RwLock<Vec<String>>,
    /// Browser command for links (empty = system default)
    browser: String,
    /// Whether links may be opened outside the viewer
    links_enabled: bool,
}

impl TextDeckShell {
    pub fn new(browser: impl Into<String>) -> Self {
        Self {
            pages: RwLock::new(Vec::new()),
            browser: browser.into(),
            links_enabled: true,
        }
    }

    /// A shell that never launches external programs
    pub fn without_links() -> Self {
        Self {
            links_enabled: false,
            ..Self::default()
        }
    }
}

/// Split a text deck into pages.
///
/// A trailing separator does not start an extra page; an empty file has no
/// pages.
pub fn split_pages(content: &str) -> Vec<String> {
    let mut pages: Vec<String> = content
        .split(PAGE_SEPARATOR)
        .map(|page| page.trim_matches(|c| c == '\n' || c == '\r').to_string())
        .collect();

    if pages.last().is_some_and(|page| page.trim().is_empty()) {
        pages.pop();
    }
    pages
}

/// Word-wrap `text` to `width` columns, keeping at most `height` rows
pub fn wrap_text(text: &str, width: usize, height: usize) -> Vec<String> {
    let mut rows = Vec::new();
    if width == 0 || height == 0 {
        return rows;
    }

    for paragraph in text.lines() {
        let mut row = String::new();
        for word in paragraph.split_whitespace() {
            let mut word = word.to_string();
            // Hard-split words longer than a row
            while word.chars().count() > width {
                if !row.is_empty() {
                    rows.push(std::mem::take(&mut row));
                }
                let head: String = word.chars().take(width).collect();
                word = word.chars().skip(width).collect();
                rows.push(head);
            }

            let needed = if row.is_empty() {
                word.chars().count()
            } else {
                row.chars().count() + 1 + word.chars().count()
            };
            if needed > width && !row.is_empty() {
                rows.push(std::mem::take(&mut row));
            }
            if !row.is_empty() {
                row.push(' ');
            }
            row.push_str(&word);
        }
        rows.push(row);
    }

    rows.truncate(height);
    rows
}

impl PresentationShell for TextDeckShell {
    async fn initialize(&self) -> Result<()> {
        debug!("Text deck renderer ready");
        Ok(())
    }

    async fn load_document(&self, source: &Path) -> Result<DocumentInfo> {
        let content = tokio::fs::read_to_string(source)
            .await
            .map_err(|e| Error::document_load(source.display().to_string(), e.to_string()))?;

        let pages = split_pages(&content);
        let page_count = pages.len() as u32;
        *self.pages.write().await = pages;

        info!("Loaded {} ({} pages)", source.display(), page_count);
        Ok(DocumentInfo { page_count })
    }

    async fn render_page(&self, page: u32, options: RenderOptions) -> Result<RenderedPage> {
        let pages = self.pages.read().await;
        let text = page
            .checked_sub(1)
            .and_then(|index| pages.get(index as usize))
            .ok_or_else(|| Error::page_render(page, "invalid page request"))?;

        let lines = if options.text_layer {
            wrap_text(
                text,
                options.width.max(0.0) as usize,
                options.height.max(0.0) as usize,
            )
        } else {
            Vec::new()
        };

        Ok(RenderedPage {
            page,
            width: options.width,
            height: options.height,
            lines,
        })
    }

    async fn copy_text(&self, _text: &str) -> Result<()> {
        Err(Error::unsupported("clipboard"))
    }

    async fn open_link(&self, url: &str) -> Result<()> {
        if !self.links_enabled {
            return Err(Error::unsupported("open_link"));
        }
        open_url_in_browser(url, &self.browser)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_pages() {
        assert_eq!(split_pages("one\x0Ctwo\x0C"), vec!["one", "two"]);
        assert_eq!(split_pages("one\n\x0C\ntwo"), vec!["one", "two"]);
        assert!(split_pages("").is_empty());
    }

    #[test]
    fn test_wrap_text_breaks_on_words() {
        let rows = wrap_text("the quick brown fox", 10, 10);
        assert_eq!(rows, vec!["the quick", "brown fox"]);
    }

    #[test]
    fn test_wrap_text_splits_long_words_and_truncates() {
        let rows = wrap_text("abcdefghijkl", 5, 2);
        assert_eq!(rows, vec!["abcde", "fghij"]);
    }

    #[test]
    fn test_wrap_text_keeps_blank_lines() {
        let rows = wrap_text("title\n\nbody", 20, 10);
        assert_eq!(rows, vec!["title", "", "body"]);
    }

    #[tokio::test]
    async fn test_load_and_render() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.txt");
        std::fs::write(&path, "Welcome to the deck\x0CSecond page").unwrap();

        let shell = TextDeckShell::without_links();
        shell.initialize().await.unwrap();
        let info = shell.load_document(&path).await.unwrap();
        assert_eq!(info.page_count, 2);

        let options = RenderOptions {
            width: 12.0,
            height: 5.0,
            text_layer: true,
            annotations: true,
        };
        let page = shell.render_page(1, options).await.unwrap();
        assert_eq!(page.lines, vec!["Welcome to", "the deck"]);

        let err = shell.render_page(3, options).await.unwrap_err();
        assert!(matches!(err, Error::PageRender { page: 3, .. }));
    }

    #[tokio::test]
    async fn test_missing_document_is_load_error() {
        let shell = TextDeckShell::default();
        let err = shell
            .load_document(Path::new("/nonexistent/deck.txt"))
            .await
            .unwrap_err();
        assert!(err.is_fatal());
    }

    #[tokio::test]
    async fn test_clipboard_unsupported_and_links_disabled() {
        let shell = TextDeckShell::without_links();
        assert!(matches!(
            shell.copy_text("x").await,
            Err(Error::Unsupported { .. })
        ));
        assert!(matches!(
            shell.open_link("https://example.com").await,
            Err(Error::Unsupported { .. })
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_open_link_runs_configured_browser() {
        let shell = TextDeckShell::new("true");
        assert!(shell.open_link("https://example.com").await.is_ok());

        let shell = TextDeckShell::new("/nonexistent/browser");
        assert!(matches!(
            shell.open_link("https://example.com").await,
            Err(Error::Io(_))
        ));
    }
}
