//! Error types for ctxmenu.
//!
//! The composer itself never surfaces errors to the user. These variants are
//! returned by host collaborators and by settings loading, and are logged and
//! absorbed wherever they cross an event handler boundary.

use thiserror::Error;

/// Main error type for ctxmenu.
#[derive(Debug, Error)]
pub enum CtxMenuError {
    /// The native menu could not be built or shown.
    #[error("Render error: {message}")]
    Render {
        /// Human-readable error message.
        message: String,
        /// Optional underlying error source.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An external URL handler refused or failed to open a URL.
    #[error("Open URL error: {message}")]
    OpenUrl {
        /// Human-readable error message.
        message: String,
        /// The URL that failed to open.
        url: String,
        /// Optional underlying error source.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Writing to the clipboard failed.
    #[error("Clipboard error: {message}")]
    Clipboard {
        /// Human-readable error message.
        message: String,
        /// Optional underlying error source.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A resource download failed.
    #[error("Download error: {message}")]
    Download {
        /// Human-readable error message.
        message: String,
        /// The resource locator being downloaded.
        url: String,
        /// Optional underlying error source.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Window lookup or subscription error.
    #[error("Window error: {message}")]
    Window {
        /// Human-readable error message.
        message: String,
    },

    /// Settings could not be parsed or are invalid.
    #[error("Config error: {message}")]
    Config {
        /// Human-readable error message.
        message: String,
    },

    /// Local file access error.
    #[error("Storage error: {message}")]
    Storage {
        /// Human-readable error message.
        message: String,
        /// Actionable hint for the user.
        hint: Option<String>,
        /// Optional underlying error source.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Unexpected internal error.
    #[error("Internal error: {message}")]
    Internal {
        /// Human-readable error message.
        message: String,
    },
}

impl CtxMenuError {
    // ========== Constructors ==========

    /// Create a new render error.
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render { message: message.into(), source: None }
    }

    /// Create a new render error with source.
    pub fn render_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Render { message: message.into(), source: Some(Box::new(source)) }
    }

    /// Create a new open-URL error.
    pub fn open_url(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::OpenUrl { message: message.into(), url: url.into(), source: None }
    }

    /// Create a new open-URL error with source.
    pub fn open_url_with_source(
        url: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::OpenUrl {
            message: source.to_string(),
            url: url.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new clipboard error.
    pub fn clipboard(message: impl Into<String>) -> Self {
        Self::Clipboard { message: message.into(), source: None }
    }

    /// Create a new clipboard error with source.
    pub fn clipboard_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Clipboard { message: message.into(), source: Some(Box::new(source)) }
    }

    /// Create a new download error.
    pub fn download(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Download { message: message.into(), url: url.into(), source: None }
    }

    /// Create a new download error with source.
    pub fn download_with_source(
        message: impl Into<String>,
        url: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Download { message: message.into(), url: url.into(), source: Some(Box::new(source)) }
    }

    /// Create a new window error.
    pub fn window(message: impl Into<String>) -> Self {
        Self::Window { message: message.into() }
    }

    /// Create a new config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }

    /// Create a new storage error.
    pub fn storage(message: impl Into<String>, hint: Option<&str>) -> Self {
        Self::Storage { message: message.into(), hint: hint.map(String::from), source: None }
    }

    /// Create a new internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }

    // ========== Methods ==========

    /// Get the error category name.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Render { .. } => "Render",
            Self::OpenUrl { .. } => "Open URL",
            Self::Clipboard { .. } => "Clipboard",
            Self::Download { .. } => "Download",
            Self::Window { .. } => "Window",
            Self::Config { .. } => "Config",
            Self::Storage { .. } => "Storage",
            Self::Internal { .. } => "Internal",
        }
    }

    /// Get actionable hint for the user.
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Render { .. } => None,
            Self::OpenUrl { .. } => Some("Check that a default browser is configured"),
            Self::Clipboard { .. } => Some("Another application may be holding the clipboard"),
            Self::Download { .. } => Some("Check the network connection and download folder"),
            Self::Window { .. } => None,
            Self::Config { .. } => Some("Check the settings file for typos"),
            Self::Storage { hint, .. } => hint.as_deref(),
            Self::Internal { .. } => Some("Please report this issue"),
        }
    }

    /// Get the URL involved in the failure (if applicable).
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::OpenUrl { url, .. } | Self::Download { url, .. } => Some(url),
            _ => None,
        }
    }
}

// ========== Error Conversions ==========

/// Convert from std::io::Error to CtxMenuError.
impl From<std::io::Error> for CtxMenuError {
    fn from(err: std::io::Error) -> Self {
        CtxMenuError::Storage {
            message: err.to_string(),
            hint: Some("Check file permissions and disk space".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

/// Convert from serde_json::Error to CtxMenuError.
impl From<serde_json::Error> for CtxMenuError {
    fn from(err: serde_json::Error) -> Self {
        CtxMenuError::Config { message: format!("JSON error: {err}") }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_and_hint() {
        let err = CtxMenuError::open_url("no handler", "https://example.com/");
        assert_eq!(err.category(), "Open URL");
        assert_eq!(err.url(), Some("https://example.com/"));
        assert!(err.hint().is_some());

        let err = CtxMenuError::storage("disk full", Some("Free some space"));
        assert_eq!(err.hint(), Some("Free some space"));
        assert_eq!(err.url(), None);
    }

    #[test]
    fn test_json_error_becomes_config() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json");
        let err: CtxMenuError = parse.unwrap_err().into();
        assert_eq!(err.category(), "Config");
        assert!(err.to_string().starts_with("Config error: JSON error"));
    }

    #[test]
    fn test_io_error_becomes_storage() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CtxMenuError = io.into();
        assert_eq!(err.category(), "Storage");
        assert_eq!(err.hint(), Some("Check file permissions and disk space"));
    }
}
