//! Headless host: a window that never leaves memory and a renderer that
//! prints menus as text.

use std::fmt::Write as _;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use ctxmenu_core::host::{
    ContextHandler, HostWindow, MenuRenderer, NativeMenu, ReadyCallback, Subscription, WindowId,
};
use ctxmenu_core::models::{ContextEvent, ContextPayload, MenuEntry};
use ctxmenu_core::CtxMenuError;

type Handlers = Arc<Mutex<Vec<(u64, ContextHandler)>>>;

static NEXT_HANDLER: AtomicU64 = AtomicU64::new(1);

/// A window whose content surface is always ready.
pub struct HeadlessWindow {
    id: WindowId,
    handlers: Handlers,
}

impl HeadlessWindow {
    pub fn new(id: u64) -> Arc<Self> {
        Arc::new(Self { id: WindowId(id), handlers: Arc::default() })
    }

    /// Raise a context request as the host would on right-click.
    pub fn request_context(&self, payload: ContextPayload) {
        let handlers: Vec<ContextHandler> =
            self.handlers.lock().iter().map(|(_, h)| h.clone()).collect();
        for handler in handlers {
            handler(ContextEvent::new(self.id), payload.clone());
        }
    }
}

impl HostWindow for HeadlessWindow {
    fn id(&self) -> WindowId {
        self.id
    }

    fn is_content_ready(&self) -> bool {
        true
    }

    fn on_content_ready(&self, callback: ReadyCallback) -> Subscription {
        callback();
        Subscription::empty()
    }

    fn on_context_requested(&self, handler: ContextHandler) -> Subscription {
        let key = NEXT_HANDLER.fetch_add(1, Ordering::Relaxed);
        self.handlers.lock().push((key, handler));
        let handlers = self.handlers.clone();
        Subscription::new(move || handlers.lock().retain(|(k, _)| *k != key))
    }

    fn inspect_element(&self, x: i32, y: i32) {
        tracing::info!(window = %self.id, x, y, "No inspector in headless mode");
    }

    fn is_devtools_open(&self) -> bool {
        false
    }

    fn focus_devtools(&self) {}
}

/// Renders menus to stdout and remembers the last one shown.
#[derive(Default)]
pub struct TextRenderer {
    shown: Arc<Mutex<Option<Vec<MenuEntry>>>>,
}

impl TextRenderer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// The last menu popped up, if any.
    pub fn last_menu(&self) -> Option<Vec<MenuEntry>> {
        self.shown.lock().clone()
    }
}

struct TextMenu {
    entries: Vec<MenuEntry>,
    shown: Arc<Mutex<Option<Vec<MenuEntry>>>>,
}

impl MenuRenderer for TextRenderer {
    fn build(&self, entries: Vec<MenuEntry>) -> Result<Box<dyn NativeMenu>, CtxMenuError> {
        Ok(Box::new(TextMenu { entries, shown: self.shown.clone() }))
    }
}

impl NativeMenu for TextMenu {
    fn popup(&self, anchor: &dyn HostWindow) -> Result<(), CtxMenuError> {
        tracing::debug!(window = %anchor.id(), entries = self.entries.len(), "Popup");
        print!("{}", render_tree(&self.entries));
        *self.shown.lock() = Some(self.entries.clone());
        Ok(())
    }
}

/// Text form of a menu. Hidden submenu children are skipped.
pub fn render_tree(entries: &[MenuEntry]) -> String {
    let mut out = String::new();
    write_entries(&mut out, entries, 0);
    out
}

fn write_entries(out: &mut String, entries: &[MenuEntry], depth: usize) {
    let indent = "  ".repeat(depth);
    for entry in entries {
        match entry {
            MenuEntry::Separator => {
                let _ = writeln!(out, "{indent}---");
            }
            MenuEntry::Action(action) if action.visible => {
                let _ = write!(out, "{indent}{} [{}]", action.label, action.id);
                if let Some(role) = action.role {
                    let _ = write!(out, " <{}>", role.as_str());
                }
                if !action.enabled {
                    out.push_str(" (disabled)");
                }
                if let Some(children) = &action.submenu {
                    out.push_str(" >");
                    out.push('\n');
                    write_entries(out, children, depth + 1);
                } else {
                    out.push('\n');
                }
            }
            MenuEntry::Action(_) => {}
        }
    }
}
