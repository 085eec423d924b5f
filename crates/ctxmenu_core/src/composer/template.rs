//! Menu templates built from a context payload.

use std::sync::Arc;

use crate::host::{Collaborators, HostWindow, UrlOpener};
use crate::models::{
    BookmarkLink, ContextPayload, EditKind, EditRole, MediaType, MenuEntry, Roster, RosterGroup,
    RosterItem, SearchService,
};

/// The template for a payload before hooks run.
///
/// An image target yields only "Save Image"; a plain link yields only
/// "Copy Link"; anything else gets the clipboard entries plus the roster.
pub fn base_template(
    payload: &Arc<ContextPayload>,
    window: &Arc<dyn HostWindow>,
    roster: &Roster,
    collaborators: &Collaborators,
) -> Vec<MenuEntry> {
    if payload.media_type == MediaType::Image {
        return save_image_template(payload, window, collaborators);
    }
    if payload.link().is_some() && payload.media_type == MediaType::None {
        return copy_link_template(payload, collaborators);
    }
    default_template(payload, roster, &collaborators.opener)
}

/// Clipboard entries followed by the roster.
pub fn default_template(
    payload: &Arc<ContextPayload>,
    roster: &Roster,
    opener: &Arc<dyn UrlOpener>,
) -> Vec<MenuEntry> {
    let has_text = payload.has_text();
    let editable = payload.is_editable;

    let can_cut = payload.can(EditKind::Cut);
    let can_copy = payload.can(EditKind::Copy);
    let can_paste = payload.edit_flags.can_paste;

    let mut entries = vec![
        MenuEntry::Separator,
        MenuEntry::action("cut", "Cut")
            .role(can_cut.then_some(EditRole::Cut))
            .enabled(can_cut)
            .visible(editable),
        MenuEntry::action("copy", "Copy")
            .role(can_copy.then_some(EditRole::Copy))
            .enabled(can_copy)
            .visible(editable || has_text),
        MenuEntry::action("paste", "Paste")
            .role(can_paste.then_some(EditRole::Paste))
            .enabled(can_paste)
            .visible(editable),
    ];
    entries.extend(roster_entries(&roster.items, payload, opener));
    entries
}

fn roster_entries(
    items: &[RosterItem],
    payload: &Arc<ContextPayload>,
    opener: &Arc<dyn UrlOpener>,
) -> Vec<MenuEntry> {
    let mut entries = Vec::with_capacity(items.len());
    for item in items {
        match item {
            RosterItem::Search(service) => entries.push(search_entry(service, payload, opener)),
            RosterItem::Link(link) => entries.push(link_entry(link, opener)),
            RosterItem::Separator => entries.push(MenuEntry::Separator),
            RosterItem::Group(group) => entries.extend(group_entries(group, payload, opener)),
        }
    }
    entries
}

fn group_entries(
    group: &RosterGroup,
    payload: &Arc<ContextPayload>,
    opener: &Arc<dyn UrlOpener>,
) -> Vec<MenuEntry> {
    let children = roster_entries(&group.items, payload, opener);

    if !group.submenu {
        let mut entries = Vec::with_capacity(children.len() + 2);
        entries.push(MenuEntry::Separator);
        entries.extend(children);
        entries.push(MenuEntry::Separator);
        return entries;
    }

    // A submenu whose children are all hidden would open onto nothing.
    let any_visible = children.iter().any(|c| !c.is_separator() && c.is_visible());
    vec![MenuEntry::submenu(group.id.clone(), group.label.clone(), children).visible(any_visible)]
}

fn search_entry(
    service: &SearchService,
    payload: &Arc<ContextPayload>,
    opener: &Arc<dyn UrlOpener>,
) -> MenuEntry {
    let has_text = payload.has_text();
    let opener = opener.clone();
    let target_payload = payload.clone();
    let target_service = service.clone();

    MenuEntry::action(service.id.clone(), service.label_for(has_text))
        .enabled(payload.can(EditKind::Copy))
        .visible(payload.is_editable || has_text)
        .on_activate(move || {
            let url = target_service.target(target_payload.trimmed_selection());
            open_logged(opener.as_ref(), &url);
        })
}

fn link_entry(link: &BookmarkLink, opener: &Arc<dyn UrlOpener>) -> MenuEntry {
    let opener = opener.clone();
    let url = link.url.clone();
    MenuEntry::action(link.id.clone(), link.label.clone())
        .on_activate(move || open_logged(opener.as_ref(), &url))
}

fn open_logged(opener: &dyn UrlOpener, url: &str) {
    tracing::debug!(url, "Opening external URL");
    if let Err(e) = opener.open_external(url) {
        tracing::warn!(url, error = %e, "Failed to open URL");
    }
}

/// `[Separator, Save Image, Separator]`.
pub fn save_image_template(
    payload: &Arc<ContextPayload>,
    window: &Arc<dyn HostWindow>,
    collaborators: &Collaborators,
) -> Vec<MenuEntry> {
    let downloader = collaborators.downloader.clone();
    let payload = payload.clone();
    // Entries hold the window weakly; it may close while the menu is open.
    let window = Arc::downgrade(window);

    let save = MenuEntry::action("save", "Save Image").on_activate(move || {
        let (Some(window), Some(url)) = (window.upgrade(), payload.src_url.as_deref()) else {
            tracing::debug!("Save Image activated without a window or source URL");
            return;
        };
        if let Err(e) = downloader.download(window.as_ref(), url) {
            tracing::warn!(url, error = %e, "Failed to download image");
        }
    });

    vec![MenuEntry::Separator, save, MenuEntry::Separator]
}

/// `[Separator, Copy Link, Separator]`.
pub fn copy_link_template(
    payload: &Arc<ContextPayload>,
    collaborators: &Collaborators,
) -> Vec<MenuEntry> {
    let clipboard = collaborators.clipboard.clone();
    let payload = payload.clone();

    let copy_link = MenuEntry::action("copyLink", "Copy Link").on_activate(move || {
        let Some(url) = payload.link() else {
            return;
        };
        let result = if clipboard.supports_bookmarks() {
            clipboard.write_bookmark(payload.link_text.as_deref().unwrap_or_default(), url)
        } else {
            clipboard.write_text(url)
        };
        if let Err(e) = result {
            tracing::warn!(url, error = %e, "Failed to copy link");
        }
    });

    vec![MenuEntry::Separator, copy_link, MenuEntry::Separator]
}

/// `[Separator, Inspect Element, Separator]` for development builds.
pub fn inspect_entries(
    payload: &Arc<ContextPayload>,
    window: &Arc<dyn HostWindow>,
) -> Vec<MenuEntry> {
    let (x, y) = (payload.x, payload.y);
    let window = Arc::downgrade(window);

    let inspect = MenuEntry::action("inspect", "Inspect Element").on_activate(move || {
        let Some(window) = window.upgrade() else {
            return;
        };
        window.inspect_element(x, y);
        if window.is_devtools_open() {
            window.focus_devtools();
        }
    });

    vec![MenuEntry::Separator, inspect, MenuEntry::Separator]
}
