//! Caller configuration bound at attach time.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::host::{HostWindow, ModeProbe};
use crate::models::{ContextEvent, ContextPayload, MenuEntry, Roster};

/// Veto hook: returning false suppresses the menu for this event.
pub type ShowPredicate =
    Arc<dyn Fn(&ContextEvent, &ContextPayload) -> bool + Send + Sync + 'static>;

/// Prepend/append hook producing extra entries.
pub type EntryHook =
    Arc<dyn Fn(&ContextPayload, &dyn HostWindow) -> HookOutput + Send + Sync + 'static>;

/// What a prepend/append hook handed back.
///
/// Hooks are allowed to be sloppy: only `Entries` inserts anything, every
/// other shape is read as "nothing to insert" rather than an error.
#[derive(Debug, Clone)]
pub enum HookOutput {
    Entries(Vec<MenuEntry>),
    Nothing,
    /// A value of the wrong shape, e.g. from a scripting bridge.
    Unrecognized(String),
}

impl HookOutput {
    /// Validate the hook result into the entries to insert.
    pub fn into_entries(self, hook: &str) -> Vec<MenuEntry> {
        match self {
            Self::Entries(entries) => entries,
            Self::Nothing => Vec::new(),
            Self::Unrecognized(shape) => {
                tracing::debug!(hook, shape = %shape, "Ignoring non-entry hook result");
                Vec::new()
            }
        }
    }
}

impl From<Vec<MenuEntry>> for HookOutput {
    fn from(entries: Vec<MenuEntry>) -> Self {
        Self::Entries(entries)
    }
}

impl From<Option<Vec<MenuEntry>>> for HookOutput {
    fn from(entries: Option<Vec<MenuEntry>>) -> Self {
        entries.map_or(Self::Nothing, Self::Entries)
    }
}

impl From<()> for HookOutput {
    fn from(_: ()) -> Self {
        Self::Nothing
    }
}

/// Configuration for a context menu attachment.
#[derive(Clone)]
pub struct ContextMenuOptions {
    pub should_show_menu: Option<ShowPredicate>,
    pub prepend: Option<EntryHook>,
    pub append: Option<EntryHook>,
    /// Entry id to replacement label, applied to top-level entries.
    pub labels: HashMap<String, String>,
    /// `None` shows "Inspect Element" only in development mode.
    pub show_inspect_element: Option<bool>,
    pub roster: Roster,
}

impl Default for ContextMenuOptions {
    fn default() -> Self {
        Self {
            should_show_menu: None,
            prepend: None,
            append: None,
            labels: HashMap::new(),
            show_inspect_element: None,
            roster: Roster::flat(),
        }
    }
}

impl ContextMenuOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the veto hook.
    pub fn should_show_menu(
        mut self,
        predicate: impl Fn(&ContextEvent, &ContextPayload) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.should_show_menu = Some(Arc::new(predicate));
        self
    }

    /// Builder: entries inserted before the defaults.
    pub fn prepend<R>(
        mut self,
        hook: impl Fn(&ContextPayload, &dyn HostWindow) -> R + Send + Sync + 'static,
    ) -> Self
    where
        R: Into<HookOutput>,
    {
        self.prepend = Some(Arc::new(
            move |payload: &ContextPayload, window: &dyn HostWindow| -> HookOutput {
                hook(payload, window).into()
            },
        ));
        self
    }

    /// Builder: entries inserted after the defaults.
    pub fn append<R>(
        mut self,
        hook: impl Fn(&ContextPayload, &dyn HostWindow) -> R + Send + Sync + 'static,
    ) -> Self
    where
        R: Into<HookOutput>,
    {
        self.append = Some(Arc::new(
            move |payload: &ContextPayload, window: &dyn HostWindow| -> HookOutput {
                hook(payload, window).into()
            },
        ));
        self
    }

    /// Builder: override one entry label.
    pub fn label(mut self, id: impl Into<String>, label: impl Into<String>) -> Self {
        self.labels.insert(id.into(), label.into());
        self
    }

    /// Builder: override several entry labels.
    pub fn labels<I, K, V>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.labels.extend(labels.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Builder: force the "Inspect Element" entry on or off.
    pub fn show_inspect_element(mut self, show: bool) -> Self {
        self.show_inspect_element = Some(show);
        self
    }

    /// Builder: replace the search roster.
    pub fn roster(mut self, roster: Roster) -> Self {
        self.roster = roster;
        self
    }

    /// Whether the debug inspection entries are appended.
    pub fn inspect_enabled(&self, mode: &dyn ModeProbe) -> bool {
        self.show_inspect_element.unwrap_or_else(|| mode.is_development())
    }
}

impl fmt::Debug for ContextMenuOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextMenuOptions")
            .field("should_show_menu", &self.should_show_menu.is_some())
            .field("prepend", &self.prepend.is_some())
            .field("append", &self.append.is_some())
            .field("labels", &self.labels)
            .field("show_inspect_element", &self.show_inspect_element)
            .field("roster_items", &self.roster.items.len())
            .finish()
    }
}
