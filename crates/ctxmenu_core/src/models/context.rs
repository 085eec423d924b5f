//! Context payload delivered with a context-request signal.

use serde::{Deserialize, Serialize};

use crate::host::WindowId;

/// Edit capabilities reported by the content surface for the click target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditFlags {
    pub can_undo: bool,
    pub can_redo: bool,
    pub can_cut: bool,
    pub can_copy: bool,
    pub can_paste: bool,
    pub can_delete: bool,
    pub can_select_all: bool,
}

/// Clipboard edit operations gated by `ContextPayload::can`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKind {
    Cut,
    Copy,
    Paste,
}

impl EditFlags {
    /// Whether the host reports the given operation as available.
    pub fn allows(&self, kind: EditKind) -> bool {
        match kind {
            EditKind::Cut => self.can_cut,
            EditKind::Copy => self.can_copy,
            EditKind::Paste => self.can_paste,
        }
    }
}

/// Kind of element under the pointer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    None,
    Image,
    Audio,
    Video,
    Canvas,
    File,
    Plugin,
}

/// Read-only snapshot of click and selection state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContextPayload {
    /// Selected text, untrimmed as reported by the host.
    pub selection_text: String,
    pub edit_flags: EditFlags,
    /// Whether the click target is an editable field.
    pub is_editable: bool,
    pub media_type: MediaType,
    #[serde(rename = "linkURL")]
    pub link_url: Option<String>,
    pub link_text: Option<String>,
    /// Source URL of the media under the pointer.
    #[serde(rename = "srcURL")]
    pub src_url: Option<String>,
    pub x: i32,
    pub y: i32,
}

impl ContextPayload {
    /// Selection text with surrounding whitespace removed.
    pub fn trimmed_selection(&self) -> &str {
        self.selection_text.trim()
    }

    /// True when the trimmed selection is non-empty.
    pub fn has_text(&self) -> bool {
        !self.trimmed_selection().is_empty()
    }

    /// True when the edit flag for `kind` is set and there is selected text.
    pub fn can(&self, kind: EditKind) -> bool {
        self.edit_flags.allows(kind) && self.has_text()
    }

    /// The link target, if one is present and non-empty.
    pub fn link(&self) -> Option<&str> {
        self.link_url.as_deref().filter(|url| !url.is_empty())
    }

    // ========== Builders ==========

    /// Create a payload with the given selection text.
    pub fn with_selection(text: impl Into<String>) -> Self {
        Self { selection_text: text.into(), ..Self::default() }
    }

    /// Builder: mark the target as editable.
    pub fn editable(mut self, is_editable: bool) -> Self {
        self.is_editable = is_editable;
        self
    }

    /// Builder: set the edit flags.
    pub fn flags(mut self, flags: EditFlags) -> Self {
        self.edit_flags = flags;
        self
    }

    /// Builder: set the media type.
    pub fn media(mut self, media_type: MediaType) -> Self {
        self.media_type = media_type;
        self
    }

    /// Builder: set the link target and text.
    pub fn link_to(mut self, url: impl Into<String>, text: impl Into<String>) -> Self {
        self.link_url = Some(url.into());
        self.link_text = Some(text.into());
        self
    }

    /// Builder: set the media source URL.
    pub fn source(mut self, url: impl Into<String>) -> Self {
        self.src_url = Some(url.into());
        self
    }

    /// Builder: set the click coordinates.
    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }
}

/// The native event accompanying a context request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextEvent {
    /// Window whose content surface raised the signal.
    pub window_id: WindowId,
}

impl ContextEvent {
    pub fn new(window_id: WindowId) -> Self {
        Self { window_id }
    }
}
