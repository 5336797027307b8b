//! Application error types with rich context

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    // ─────────────────────────────────────────────────────────────
    // Renderer/Document Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Renderer failed to initialize: {message}")]
    RendererInit { message: String },

    #[error("Failed to load document {source_name}: {message}")]
    DocumentLoad {
        source_name: String,
        message: String,
    },

    #[error("Page {page} failed to render: {message}")]
    PageRender { page: u32, message: String },

    #[error("Capability not supported by this shell: {capability}")]
    Unsupported { capability: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn renderer_init(message: impl Into<String>) -> Self {
        Self::RendererInit {
            message: message.into(),
        }
    }

    pub fn document_load(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DocumentLoad {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    pub fn page_render(page: u32, message: impl Into<String>) -> Self {
        Self::PageRender {
            page,
            message: message.into(),
        }
    }

    pub fn unsupported(capability: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: capability.into(),
        }
    }

    /// Check if this is a recoverable error
    ///
    /// A single page failing to render or a shell without clipboard support
    /// never takes the viewer down.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::PageRender { .. } | Error::Unsupported { .. })
    }

    /// Check if this error should surface the full-viewport error state
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::RendererInit { .. } | Error::DocumentLoad { .. })
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions (for use with color-eyre)
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = Error::document_load("deck.txt", "no such file");
        assert_eq!(
            err.to_string(),
            "Failed to load document deck.txt: no such file"
        );

        let err = Error::page_render(4, "invalid page request");
        assert!(err.to_string().contains("Page 4"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_from_toml() {
        let toml_err = toml::from_str::<toml::Value>("not valid {{").unwrap_err();
        let err: Error = toml_err.into();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn test_error_is_fatal() {
        assert!(Error::renderer_init("worker missing").is_fatal());
        assert!(Error::document_load("deck.txt", "boom").is_fatal());
        assert!(!Error::page_render(1, "boom").is_fatal());
    }

    #[test]
    fn test_error_is_recoverable() {
        assert!(Error::page_render(2, "transient").is_recoverable());
        assert!(Error::unsupported("clipboard").is_recoverable());
        assert!(!Error::renderer_init("boom").is_recoverable());
    }

    #[test]
    fn test_context_converts_and_keeps_source() {
        let io: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only",
        ));
        let err = io.context("Failed to write config").unwrap_err();
        assert!(matches!(err, Error::Io(_)));

        let parsed: std::result::Result<toml::Value, _> = toml::from_str("= nope");
        let err = parsed
            .with_context(|| "Failed to parse insertions".to_string())
            .unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }
}
