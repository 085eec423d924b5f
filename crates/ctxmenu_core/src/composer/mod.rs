//! Menu composer: turns context-request signals into native popups.
//!
//! One [`ContextMenu`] holds the caller options and collaborators. It can be
//! attached to a single window ([`ContextMenu::attach`]) or to every current
//! and future window of a registry ([`ContextMenu::attach_all`]). Each signal
//! is handled synchronously: veto, template, hooks, debug entries, labels,
//! normalization, popup.

pub mod normalize;
pub mod template;

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::host::{
    Collaborators, ContextHandler, HostWindow, Subscription, WindowCreatedHandler, WindowRegistry,
};
use crate::models::{ContextEvent, ContextPayload, MenuEntry};
use crate::options::ContextMenuOptions;

pub use normalize::{apply_labels, normalize};
pub use template::{base_template, default_template};

/// A window attached through `attach_all`, held weakly.
type Attached = (Weak<dyn HostWindow>, Subscription);

/// State of an attachment waiting for the content surface.
enum DeferredAttach {
    Pending,
    Attached(Subscription),
    Cancelled,
}

/// Context menu composer bound to one set of options.
#[derive(Clone)]
pub struct ContextMenu {
    options: Arc<ContextMenuOptions>,
    collaborators: Collaborators,
}

impl ContextMenu {
    pub fn new(options: ContextMenuOptions, collaborators: Collaborators) -> Self {
        Self { options: Arc::new(options), collaborators }
    }

    pub fn options(&self) -> &ContextMenuOptions {
        &self.options
    }

    // ========== Attachment ==========

    /// Attach to one window, deferring until its content surface is ready.
    pub fn attach(&self, window: Arc<dyn HostWindow>) -> Subscription {
        if window.is_content_ready() {
            return self.register(window);
        }

        tracing::debug!(window = %window.id(), "Content surface not ready, deferring attach");

        let slot = Arc::new(Mutex::new(DeferredAttach::Pending));

        let menu = self.clone();
        let ready_slot = slot.clone();
        let pending = Arc::downgrade(&window);
        let ready = window.on_content_ready(Box::new(move || {
            let Some(window) = pending.upgrade() else {
                return;
            };
            let mut state = ready_slot.lock();
            if matches!(*state, DeferredAttach::Pending) {
                *state = DeferredAttach::Attached(menu.register(window));
            }
        }));

        Subscription::new(move || {
            ready.unsubscribe();
            let previous = std::mem::replace(&mut *slot.lock(), DeferredAttach::Cancelled);
            if let DeferredAttach::Attached(subscription) = previous {
                subscription.unsubscribe();
            }
        })
    }

    /// Attach to every open window and to every window created afterwards.
    ///
    /// Unsubscribing stops watching for new windows and detaches from every
    /// window attached through this call. Registrations for windows that have
    /// closed are released whenever a new window is attached.
    pub fn attach_all(&self, registry: &dyn WindowRegistry) -> Subscription {
        let attached: Arc<Mutex<Vec<Attached>>> = Arc::new(Mutex::new(Vec::new()));

        let existing: Vec<Attached> = registry
            .windows()
            .into_iter()
            .map(|window| (Arc::downgrade(&window), self.attach(window)))
            .collect();
        tracing::debug!(count = existing.len(), "Attached context menu to open windows");
        attached.lock().extend(existing);

        let menu = self.clone();
        let created_slot = attached.clone();
        let on_created: WindowCreatedHandler = Arc::new(move |window: Arc<dyn HostWindow>| {
            tracing::debug!(window = %window.id(), "Window created, attaching context menu");
            let entry = (Arc::downgrade(&window), menu.attach(window));

            let closed: Vec<Attached> = {
                let mut attached = created_slot.lock();
                let (open, closed): (Vec<Attached>, Vec<Attached>) =
                    std::mem::take(&mut *attached)
                        .into_iter()
                        .partition(|(window, _)| window.strong_count() > 0);
                *attached = open;
                attached.push(entry);
                closed
            };

            if !closed.is_empty() {
                tracing::trace!(count = closed.len(), "Releasing closed windows");
            }
            for (_, subscription) in closed {
                subscription.unsubscribe();
            }
        });
        let created = registry.on_window_created(on_created);

        Subscription::new(move || {
            created.unsubscribe();
            let subscriptions = std::mem::take(&mut *attached.lock());
            for (_, subscription) in subscriptions {
                subscription.unsubscribe();
            }
        })
    }

    fn register(&self, window: Arc<dyn HostWindow>) -> Subscription {
        let menu = self.clone();
        let target = Arc::downgrade(&window);
        let handler: ContextHandler =
            Arc::new(move |event: ContextEvent, payload: ContextPayload| {
                if let Some(window) = target.upgrade() {
                    menu.handle(&window, event, payload);
                }
            });

        tracing::debug!(window = %window.id(), "Context menu attached");
        window.on_context_requested(handler)
    }

    // ========== Handling ==========

    /// Handle one context request: compose, normalize, and pop up.
    ///
    /// Returns true when a popup was shown.
    pub fn handle(
        &self,
        window: &Arc<dyn HostWindow>,
        event: ContextEvent,
        payload: ContextPayload,
    ) -> bool {
        let Some(entries) = self.compose(window, &event, payload) else {
            return false;
        };

        if entries.is_empty() {
            tracing::debug!(window = %window.id(), "Nothing left to show after normalization");
            return false;
        }

        let anchor = window.top_level().unwrap_or_else(|| window.clone());
        let shown = self
            .collaborators
            .renderer
            .build(entries)
            .and_then(|menu| menu.popup(anchor.as_ref()));

        match shown {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(window = %window.id(), error = %e, "Failed to show context menu");
                false
            }
        }
    }

    /// The normalized menu for a request, or `None` if the veto hook refused.
    pub fn compose(
        &self,
        window: &Arc<dyn HostWindow>,
        event: &ContextEvent,
        payload: ContextPayload,
    ) -> Option<Vec<MenuEntry>> {
        let entries = self.assemble(window, event, payload)?;
        let normalized = normalize(entries);
        tracing::debug!(
            window = %window.id(),
            entries = normalized.len(),
            "Composed context menu"
        );
        Some(normalized)
    }

    /// The menu before normalization: template, hooks, debug entries, labels.
    pub fn assemble(
        &self,
        window: &Arc<dyn HostWindow>,
        event: &ContextEvent,
        payload: ContextPayload,
    ) -> Option<Vec<MenuEntry>> {
        if let Some(should_show) = &self.options.should_show_menu {
            if !should_show(event, &payload) {
                tracing::trace!(window = %window.id(), "Context menu vetoed");
                return None;
            }
        }

        let payload = Arc::new(payload);
        let mut entries =
            base_template(&payload, window, &self.options.roster, &self.collaborators);

        if let Some(prepend) = &self.options.prepend {
            let extra = prepend(&payload, window.as_ref()).into_entries("prepend");
            entries.splice(0..0, extra);
        }

        if let Some(append) = &self.options.append {
            entries.extend(append(&payload, window.as_ref()).into_entries("append"));
        }

        if self.options.inspect_enabled(self.collaborators.mode.as_ref()) {
            entries.extend(template::inspect_entries(&payload, window));
        }

        apply_labels(&mut entries, &self.options.labels);
        Some(entries)
    }
}
