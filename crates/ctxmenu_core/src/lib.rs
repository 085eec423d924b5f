//! Core of the ctxmenu context-menu composer.
//!
//! This crate turns context-request signals from a host window into native
//! popup menus:
//!
//! - **composer**: Attachment, menu assembly, and normalization
//! - **models**: Context payloads, menu entries, and search rosters
//! - **options**: Caller hooks, label overrides, and debug entry toggles
//! - **host**: Traits for the window system and side-effect collaborators
//! - **settings**: JSON settings file
//! - **error**: Error handling with categories and hints

pub mod composer;
pub mod error;
pub mod host;
pub mod models;
pub mod options;
pub mod settings;

#[cfg(test)]
mod test_support;

pub use composer::ContextMenu;
pub use error::CtxMenuError;
pub use host::{
    BuildModeProbe, Clipboard, Collaborators, Downloader, FixedMode, HostWindow, MenuRenderer,
    ModeProbe, NativeMenu, Subscription, UrlOpener, WindowId, WindowRegistry,
};
pub use models::{
    find_action, ContextEvent, ContextPayload, EditFlags, EditRole, MediaType, MenuAction,
    MenuEntry, Roster, RosterItem, SearchService,
};
pub use options::{ContextMenuOptions, HookOutput};
pub use settings::MenuSettings;
