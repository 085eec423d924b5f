//! In-memory host collaborators for tests.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::CtxMenuError;
use crate::host::{
    Clipboard, Collaborators, ContextHandler, Downloader, FixedMode, HostWindow, MenuRenderer,
    NativeMenu, ReadyCallback, Subscription, UrlOpener, WindowCreatedHandler, WindowId,
    WindowRegistry,
};
use crate::models::{ContextEvent, ContextPayload, MenuEntry};

type Slots<T> = Arc<Mutex<Vec<(u64, T)>>>;

static NEXT_SLOT: AtomicU64 = AtomicU64::new(1);

fn subscribe<T: Send + 'static>(slots: &Slots<T>, value: T) -> Subscription {
    let key = NEXT_SLOT.fetch_add(1, Ordering::Relaxed);
    slots.lock().push((key, value));
    let slots = slots.clone();
    Subscription::new(move || slots.lock().retain(|(k, _)| *k != key))
}

// ============================================================================
// FakeWindow
// ============================================================================

pub(crate) struct FakeWindow {
    id: WindowId,
    ready: AtomicBool,
    ready_callbacks: Slots<ReadyCallback>,
    handlers: Slots<ContextHandler>,
    parent: Mutex<Option<Arc<FakeWindow>>>,
    opens_devtools: AtomicBool,
    devtools_open: AtomicBool,
    devtools_focus: AtomicUsize,
    inspected: Mutex<Vec<(i32, i32)>>,
}

impl FakeWindow {
    fn build(id: u64, ready: bool) -> Arc<Self> {
        Arc::new(Self {
            id: WindowId(id),
            ready: AtomicBool::new(ready),
            ready_callbacks: Arc::default(),
            handlers: Arc::default(),
            parent: Mutex::new(None),
            opens_devtools: AtomicBool::new(false),
            devtools_open: AtomicBool::new(false),
            devtools_focus: AtomicUsize::new(0),
            inspected: Mutex::new(Vec::new()),
        })
    }

    /// A window whose content surface is ready.
    pub fn new(id: u64) -> Arc<Self> {
        Self::build(id, true)
    }

    /// A window whose content surface is still loading.
    pub fn loading(id: u64) -> Arc<Self> {
        Self::build(id, false)
    }

    pub fn with_parent(self: Arc<Self>, parent: Arc<FakeWindow>) -> Arc<Self> {
        *self.parent.lock() = Some(parent);
        self
    }

    /// Inspecting an element opens the devtools surface.
    pub fn opens_devtools_on_inspect(self: Arc<Self>) -> Arc<Self> {
        self.opens_devtools.store(true, Ordering::SeqCst);
        self
    }

    /// Fire the one-time ready signal.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::SeqCst);
        let callbacks = std::mem::take(&mut *self.ready_callbacks.lock());
        for (_, callback) in callbacks {
            callback();
        }
    }

    /// Deliver a context request to every registered handler.
    pub fn emit_context(&self, payload: ContextPayload) {
        for handler in self.handlers() {
            handler(ContextEvent::new(self.id), payload.clone());
        }
    }

    pub fn handlers(&self) -> Vec<ContextHandler> {
        self.handlers.lock().iter().map(|(_, h)| h.clone()).collect()
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.lock().len()
    }

    pub fn inspected(&self) -> Vec<(i32, i32)> {
        self.inspected.lock().clone()
    }

    pub fn devtools_focus_count(&self) -> usize {
        self.devtools_focus.load(Ordering::SeqCst)
    }
}

impl HostWindow for FakeWindow {
    fn id(&self) -> WindowId {
        self.id
    }

    fn is_content_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    fn on_content_ready(&self, callback: ReadyCallback) -> Subscription {
        subscribe(&self.ready_callbacks, callback)
    }

    fn on_context_requested(&self, handler: ContextHandler) -> Subscription {
        subscribe(&self.handlers, handler)
    }

    fn inspect_element(&self, x: i32, y: i32) {
        self.inspected.lock().push((x, y));
        if self.opens_devtools.load(Ordering::SeqCst) {
            self.devtools_open.store(true, Ordering::SeqCst);
        }
    }

    fn is_devtools_open(&self) -> bool {
        self.devtools_open.load(Ordering::SeqCst)
    }

    fn focus_devtools(&self) {
        self.devtools_focus.fetch_add(1, Ordering::SeqCst);
    }

    fn top_level(&self) -> Option<Arc<dyn HostWindow>> {
        self.parent.lock().clone().map(|parent| parent as Arc<dyn HostWindow>)
    }
}

// ============================================================================
// FakeRegistry
// ============================================================================

#[derive(Default)]
pub(crate) struct FakeRegistry {
    windows: Mutex<Vec<Arc<FakeWindow>>>,
    created: Slots<WindowCreatedHandler>,
}

impl FakeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a ready window and fire the window-created signal.
    pub fn open_window(&self, id: u64) -> Arc<FakeWindow> {
        let window = FakeWindow::new(id);
        self.windows.lock().push(window.clone());

        let handlers: Vec<WindowCreatedHandler> =
            self.created.lock().iter().map(|(_, h)| h.clone()).collect();
        for handler in handlers {
            handler(window.clone());
        }
        window
    }

    /// Forget a window; it is freed once the caller drops its handle.
    pub fn close_window(&self, id: u64) {
        self.windows.lock().retain(|w| w.id() != WindowId(id));
    }

    pub fn created_handler_count(&self) -> usize {
        self.created.lock().len()
    }
}

impl WindowRegistry for FakeRegistry {
    fn windows(&self) -> Vec<Arc<dyn HostWindow>> {
        self.windows.lock().iter().map(|w| w.clone() as Arc<dyn HostWindow>).collect()
    }

    fn on_window_created(&self, handler: WindowCreatedHandler) -> Subscription {
        subscribe(&self.created, handler)
    }
}

// ============================================================================
// Recording collaborators
// ============================================================================

#[derive(Default)]
pub(crate) struct RecordingRenderer {
    fail: AtomicBool,
    builds: AtomicUsize,
    popups: Arc<Mutex<Vec<(WindowId, Vec<MenuEntry>)>>>,
}

struct RecordedMenu {
    entries: Vec<MenuEntry>,
    popups: Arc<Mutex<Vec<(WindowId, Vec<MenuEntry>)>>>,
}

impl NativeMenu for RecordedMenu {
    fn popup(&self, anchor: &dyn HostWindow) -> Result<(), CtxMenuError> {
        self.popups.lock().push((anchor.id(), self.entries.clone()));
        Ok(())
    }
}

impl MenuRenderer for RecordingRenderer {
    fn build(&self, entries: Vec<MenuEntry>) -> Result<Box<dyn NativeMenu>, CtxMenuError> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(CtxMenuError::render("menu widget unavailable"));
        }
        Ok(Box::new(RecordedMenu { entries, popups: self.popups.clone() }))
    }
}

impl RecordingRenderer {
    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }

    pub fn popup_count(&self) -> usize {
        self.popups.lock().len()
    }

    pub fn anchors(&self) -> Vec<WindowId> {
        self.popups.lock().iter().map(|(id, _)| *id).collect()
    }

    /// Entries of the most recent popup.
    pub fn last_menu(&self) -> Option<Vec<MenuEntry>> {
        self.popups.lock().last().map(|(_, entries)| entries.clone())
    }
}

#[derive(Default)]
pub(crate) struct RecordingOpener {
    urls: Mutex<Vec<String>>,
}

impl UrlOpener for RecordingOpener {
    fn open_external(&self, url: &str) -> Result<(), CtxMenuError> {
        self.urls.lock().push(url.to_string());
        Ok(())
    }
}

impl RecordingOpener {
    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().clone()
    }
}

#[derive(Default)]
pub(crate) struct RecordingClipboard {
    bookmarks_supported: AtomicBool,
    texts: Mutex<Vec<String>>,
    bookmarks: Mutex<Vec<(String, String)>>,
}

impl Clipboard for RecordingClipboard {
    fn write_text(&self, text: &str) -> Result<(), CtxMenuError> {
        self.texts.lock().push(text.to_string());
        Ok(())
    }

    fn supports_bookmarks(&self) -> bool {
        self.bookmarks_supported.load(Ordering::SeqCst)
    }

    fn write_bookmark(&self, title: &str, url: &str) -> Result<(), CtxMenuError> {
        self.bookmarks.lock().push((title.to_string(), url.to_string()));
        Ok(())
    }
}

impl RecordingClipboard {
    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().clone()
    }

    pub fn bookmarks(&self) -> Vec<(String, String)> {
        self.bookmarks.lock().clone()
    }
}

#[derive(Default)]
pub(crate) struct RecordingDownloader {
    downloads: Mutex<Vec<(WindowId, String)>>,
}

impl Downloader for RecordingDownloader {
    fn download(&self, window: &dyn HostWindow, url: &str) -> Result<(), CtxMenuError> {
        self.downloads.lock().push((window.id(), url.to_string()));
        Ok(())
    }
}

impl RecordingDownloader {
    pub fn urls(&self) -> Vec<String> {
        self.downloads.lock().iter().map(|(_, url)| url.clone()).collect()
    }
}

// ============================================================================
// Harness
// ============================================================================

/// Recording collaborators plus a way to bundle them.
pub(crate) struct Harness {
    pub renderer: Arc<RecordingRenderer>,
    pub opener: Arc<RecordingOpener>,
    pub clipboard: Arc<RecordingClipboard>,
    pub downloader: Arc<RecordingDownloader>,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            renderer: Arc::default(),
            opener: Arc::default(),
            clipboard: Arc::default(),
            downloader: Arc::default(),
        }
    }

    /// Clipboard reports rich bookmark support.
    pub fn with_bookmarks(self) -> Self {
        self.clipboard.bookmarks_supported.store(true, Ordering::SeqCst);
        self
    }

    /// Renderer fails every build.
    pub fn failing_renderer(self) -> Self {
        self.renderer.fail.store(true, Ordering::SeqCst);
        self
    }

    pub fn collaborators(&self, development: bool) -> Collaborators {
        Collaborators::new(
            self.renderer.clone(),
            self.opener.clone(),
            self.clipboard.clone(),
            self.downloader.clone(),
        )
        .with_mode(Arc::new(FixedMode(development)))
    }
}
