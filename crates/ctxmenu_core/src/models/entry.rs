//! Menu description entries.

use std::fmt;
use std::sync::Arc;

/// Handler type for menu entry activation.
pub type ActivateHandler = Arc<dyn Fn() + Send + Sync + 'static>;

/// Native edit role a renderer may map onto the platform's own handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditRole {
    Cut,
    Copy,
    Paste,
}

impl EditRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cut => "cut",
            Self::Copy => "copy",
            Self::Paste => "paste",
        }
    }
}

/// A clickable entry, optionally carrying a submenu.
#[derive(Clone)]
pub struct MenuAction {
    /// Stable identifier used for label overrides.
    pub id: String,
    pub label: String,
    pub enabled: bool,
    pub visible: bool,
    pub role: Option<EditRole>,
    pub submenu: Option<Vec<MenuEntry>>,
    pub on_activate: Option<ActivateHandler>,
}

impl MenuAction {
    /// Create an enabled, visible action with no handler.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            enabled: true,
            visible: true,
            role: None,
            submenu: None,
            on_activate: None,
        }
    }

    /// Run the activation handler if the action is enabled.
    ///
    /// Returns true if a handler ran.
    pub fn activate(&self) -> bool {
        match (&self.on_activate, self.enabled) {
            (Some(handler), true) => {
                handler();
                true
            }
            _ => false,
        }
    }

    pub fn has_submenu(&self) -> bool {
        self.submenu.is_some()
    }
}

impl fmt::Debug for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuAction")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("enabled", &self.enabled)
            .field("visible", &self.visible)
            .field("role", &self.role)
            .field("submenu", &self.submenu)
            .field("on_activate", &self.on_activate.as_ref().map(|_| "<handler>"))
            .finish()
    }
}

/// One node of a menu description.
#[derive(Debug, Clone)]
pub enum MenuEntry {
    /// A visual separator line.
    Separator,
    /// A clickable action, possibly opening a submenu.
    Action(MenuAction),
}

impl MenuEntry {
    /// Create a separator entry.
    pub fn separator() -> Self {
        Self::Separator
    }

    /// Create an action entry without a handler.
    pub fn action(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::Action(MenuAction::new(id, label))
    }

    /// Create a submenu entry.
    pub fn submenu(id: impl Into<String>, label: impl Into<String>, items: Vec<MenuEntry>) -> Self {
        let mut action = MenuAction::new(id, label);
        action.submenu = Some(items);
        Self::Action(action)
    }

    /// Builder: set enabled state.
    pub fn enabled(mut self, enabled: bool) -> Self {
        if let Self::Action(action) = &mut self {
            action.enabled = enabled;
        }
        self
    }

    /// Builder: set visible state.
    pub fn visible(mut self, visible: bool) -> Self {
        if let Self::Action(action) = &mut self {
            action.visible = visible;
        }
        self
    }

    /// Builder: set the native edit role.
    pub fn role(mut self, role: Option<EditRole>) -> Self {
        if let Self::Action(action) = &mut self {
            action.role = role;
        }
        self
    }

    /// Builder: attach an activation handler.
    pub fn on_activate(mut self, handler: impl Fn() + Send + Sync + 'static) -> Self {
        if let Self::Action(action) = &mut self {
            action.on_activate = Some(Arc::new(handler));
        }
        self
    }

    /// Check if this entry is a separator.
    pub fn is_separator(&self) -> bool {
        matches!(self, Self::Separator)
    }

    /// Separators are always visible; actions report their flag.
    pub fn is_visible(&self) -> bool {
        match self {
            Self::Separator => true,
            Self::Action(action) => action.visible,
        }
    }

    /// Get the ID of an action entry.
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Action(action) => Some(&action.id),
            Self::Separator => None,
        }
    }

    /// Get the label of an action entry.
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Action(action) => Some(&action.label),
            Self::Separator => None,
        }
    }

    pub fn as_action(&self) -> Option<&MenuAction> {
        match self {
            Self::Action(action) => Some(action),
            Self::Separator => None,
        }
    }

    pub fn as_action_mut(&mut self) -> Option<&mut MenuAction> {
        match self {
            Self::Action(action) => Some(action),
            Self::Separator => None,
        }
    }

    /// Get submenu entries if this is a submenu.
    pub fn submenu_items(&self) -> Option<&[MenuEntry]> {
        self.as_action().and_then(|action| action.submenu.as_deref())
    }
}

/// Find an action by identifier, searching submenus depth-first.
pub fn find_action<'a>(entries: &'a [MenuEntry], id: &str) -> Option<&'a MenuAction> {
    entries.iter().filter_map(MenuEntry::as_action).find_map(|action| {
        if action.id == id {
            Some(action)
        } else {
            action.submenu.as_deref().and_then(|items| find_action(items, id))
        }
    })
}
