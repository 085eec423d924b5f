//! Data models for ctxmenu.
//!
//! - `context` - ContextPayload, EditFlags, MediaType, ContextEvent
//! - `entry` - MenuEntry, MenuAction, EditRole
//! - `roster` - Roster, SearchService, BookmarkLink, presets

pub mod context;
pub mod entry;
pub mod roster;

pub use context::{ContextEvent, ContextPayload, EditFlags, EditKind, MediaType};
pub use entry::{find_action, ActivateHandler, EditRole, MenuAction, MenuEntry};
pub use roster::{BookmarkLink, Roster, RosterGroup, RosterItem, SearchService};
