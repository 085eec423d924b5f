//! Contracts for the host-provided collaborators.
//!
//! The composer never touches a toolkit directly. A host supplies:
//!
//! - [`HostWindow`] and [`WindowRegistry`] for signal subscription
//! - [`MenuRenderer`] / [`NativeMenu`] for building and showing the popup
//! - [`UrlOpener`], [`Clipboard`] and [`Downloader`] for entry side effects
//! - [`ModeProbe`] for the development-mode check

use std::fmt;
use std::sync::Arc;

use crate::error::CtxMenuError;
use crate::models::{ContextEvent, ContextPayload, MenuEntry};

/// Environment variable overriding development-mode detection.
pub const DEV_MODE_ENV: &str = "CTXMENU_IS_DEV";

/// Opaque host identifier for a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window-{}", self.0)
    }
}

/// Callback invoked on every context-request signal.
pub type ContextHandler = Arc<dyn Fn(ContextEvent, ContextPayload) + Send + Sync + 'static>;

/// Callback invoked when a new top-level window is created.
pub type WindowCreatedHandler = Arc<dyn Fn(Arc<dyn HostWindow>) + Send + Sync + 'static>;

/// One-shot callback for the content-ready signal.
pub type ReadyCallback = Box<dyn FnOnce() + Send + 'static>;

// ============================================================================
// Subscription
// ============================================================================

/// Handle to a signal registration.
///
/// Dropping a subscription leaves the registration in place for the rest of
/// the process; call [`Subscription::unsubscribe`] to tear it down.
#[must_use = "call unsubscribe() to tear down, or detach() to keep the registration"]
pub struct Subscription {
    teardown: Option<Box<dyn FnOnce() + Send + 'static>>,
}

impl Subscription {
    /// Create a subscription that runs `teardown` when unsubscribed.
    pub fn new(teardown: impl FnOnce() + Send + 'static) -> Self {
        Self { teardown: Some(Box::new(teardown)) }
    }

    /// A subscription with nothing to tear down.
    pub fn empty() -> Self {
        Self { teardown: None }
    }

    /// Combine several subscriptions into one, torn down in order.
    pub fn all(subscriptions: Vec<Subscription>) -> Self {
        Self::new(move || {
            for subscription in subscriptions {
                subscription.unsubscribe();
            }
        })
    }

    /// Remove the registration.
    pub fn unsubscribe(mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }

    /// Keep the registration for the process lifetime.
    pub fn detach(self) {}
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("active", &self.teardown.is_some()).finish()
    }
}

// ============================================================================
// Window contracts
// ============================================================================

/// A host window with a content surface that raises context requests.
pub trait HostWindow: Send + Sync {
    fn id(&self) -> WindowId;

    /// Whether the content surface exists yet (embedded views load lazily).
    fn is_content_ready(&self) -> bool;

    /// Register a one-time callback for when the content surface becomes ready.
    fn on_content_ready(&self, callback: ReadyCallback) -> Subscription;

    /// Subscribe to the "context requested" signal.
    fn on_context_requested(&self, handler: ContextHandler) -> Subscription;

    /// Open or focus the element inspector at the given coordinates.
    fn inspect_element(&self, x: i32, y: i32);

    fn is_devtools_open(&self) -> bool;

    fn focus_devtools(&self);

    /// The top-level window hosting this surface, when it differs.
    ///
    /// Embedded views cannot anchor popups themselves.
    fn top_level(&self) -> Option<Arc<dyn HostWindow>> {
        None
    }
}

/// Registry of top-level windows.
pub trait WindowRegistry: Send + Sync {
    /// All currently open top-level windows.
    fn windows(&self) -> Vec<Arc<dyn HostWindow>>;

    /// Subscribe to window creation.
    fn on_window_created(&self, handler: WindowCreatedHandler) -> Subscription;
}

// ============================================================================
// Menu rendering
// ============================================================================

/// Builds native menus from a normalized description.
pub trait MenuRenderer: Send + Sync {
    fn build(&self, entries: Vec<MenuEntry>) -> Result<Box<dyn NativeMenu>, CtxMenuError>;
}

/// A built native menu ready to show.
pub trait NativeMenu {
    fn popup(&self, anchor: &dyn HostWindow) -> Result<(), CtxMenuError>;
}

// ============================================================================
// Side-effect collaborators
// ============================================================================

/// Opens URLs in the default external handler.
pub trait UrlOpener: Send + Sync {
    fn open_external(&self, url: &str) -> Result<(), CtxMenuError>;
}

/// Clipboard writer.
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), CtxMenuError>;

    /// Whether the platform has a rich bookmark clipboard format.
    fn supports_bookmarks(&self) -> bool {
        false
    }

    fn write_bookmark(&self, _title: &str, url: &str) -> Result<(), CtxMenuError> {
        self.write_text(url)
    }
}

/// Downloads a resource to disk in the context of a window.
pub trait Downloader: Send + Sync {
    fn download(&self, window: &dyn HostWindow, url: &str) -> Result<(), CtxMenuError>;
}

/// Development vs production mode.
pub trait ModeProbe: Send + Sync {
    fn is_development(&self) -> bool;
}

/// Mode probe backed by `CTXMENU_IS_DEV`, falling back to the build profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildModeProbe;

impl ModeProbe for BuildModeProbe {
    fn is_development(&self) -> bool {
        std::env::var(DEV_MODE_ENV)
            .ok()
            .and_then(|value| parse_flag(&value))
            .unwrap_or(cfg!(debug_assertions))
    }
}

/// Mode probe with a fixed answer.
#[derive(Debug, Clone, Copy)]
pub struct FixedMode(pub bool);

impl ModeProbe for FixedMode {
    fn is_development(&self) -> bool {
        self.0
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// ============================================================================
// Collaborators
// ============================================================================

/// The side-effect collaborators a composer needs, bundled for sharing.
#[derive(Clone)]
pub struct Collaborators {
    pub renderer: Arc<dyn MenuRenderer>,
    pub opener: Arc<dyn UrlOpener>,
    pub clipboard: Arc<dyn Clipboard>,
    pub downloader: Arc<dyn Downloader>,
    pub mode: Arc<dyn ModeProbe>,
}

impl Collaborators {
    /// Bundle collaborators using [`BuildModeProbe`] for mode detection.
    pub fn new(
        renderer: Arc<dyn MenuRenderer>,
        opener: Arc<dyn UrlOpener>,
        clipboard: Arc<dyn Clipboard>,
        downloader: Arc<dyn Downloader>,
    ) -> Self {
        Self { renderer, opener, clipboard, downloader, mode: Arc::new(BuildModeProbe) }
    }

    /// Builder: replace the mode probe.
    pub fn with_mode(mut self, mode: Arc<dyn ModeProbe>) -> Self {
        self.mode = mode;
        self
    }
}
