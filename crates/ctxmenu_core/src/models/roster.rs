//! Search shortcut and bookmark roster used by the default template.
//!
//! A roster is plain data. The two presets below mirror the menus that
//! shipped with the desktop app; hosts can also load one from settings.

use serde::{Deserialize, Serialize};

/// Placeholder replaced by the URL-encoded selection in `search_url`.
pub const QUERY_PLACEHOLDER: &str = "{query}";

/// A web search shortcut whose label and target depend on the selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchService {
    pub id: String,
    /// Label shown when text is selected.
    pub label: String,
    /// Label shown when nothing is selected. Falls back to `label`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idle_label: Option<String>,
    /// Search URL containing `{query}`.
    pub search_url: String,
    /// Page opened when nothing is selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_url: Option<String>,
}

impl SearchService {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        search_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            idle_label: None,
            search_url: search_url.into(),
            home_url: None,
        }
    }

    /// Builder: label used without a selection.
    pub fn idle_label(mut self, label: impl Into<String>) -> Self {
        self.idle_label = Some(label.into());
        self
    }

    /// Builder: page opened without a selection.
    pub fn home(mut self, url: impl Into<String>) -> Self {
        self.home_url = Some(url.into());
        self
    }

    /// Label for the current selection state.
    pub fn label_for(&self, has_text: bool) -> &str {
        if has_text {
            &self.label
        } else {
            self.idle_label.as_deref().unwrap_or(&self.label)
        }
    }

    /// URL to open for the given trimmed selection.
    ///
    /// An empty query opens the home page, or the search URL with an empty
    /// query when no home page is configured.
    pub fn target(&self, query: &str) -> String {
        if query.is_empty() {
            if let Some(home) = &self.home_url {
                return home.clone();
            }
        }
        self.search_url.replace(QUERY_PLACEHOLDER, &urlencoding::encode(query))
    }
}

/// A fixed link that does not depend on the selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkLink {
    pub id: String,
    pub label: String,
    pub url: String,
}

impl BookmarkLink {
    pub fn new(id: impl Into<String>, label: impl Into<String>, url: impl Into<String>) -> Self {
        Self { id: id.into(), label: label.into(), url: url.into() }
    }
}

/// A named block of roster items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterGroup {
    pub id: String,
    pub label: String,
    pub items: Vec<RosterItem>,
    /// Render as a nested submenu instead of an inline separated block.
    #[serde(default)]
    pub submenu: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RosterItem {
    Search(SearchService),
    Link(BookmarkLink),
    Group(RosterGroup),
    Separator,
}

impl RosterItem {
    /// Inline group delimited by separators.
    pub fn section(id: impl Into<String>, items: Vec<RosterItem>) -> Self {
        let id = id.into();
        Self::Group(RosterGroup { label: id.clone(), id, items, submenu: false })
    }

    /// Nested submenu group.
    pub fn submenu(
        id: impl Into<String>,
        label: impl Into<String>,
        items: Vec<RosterItem>,
    ) -> Self {
        Self::Group(RosterGroup { id: id.into(), label: label.into(), items, submenu: true })
    }
}

/// Ordered roster of search shortcuts, links and groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    pub items: Vec<RosterItem>,
}

impl Roster {
    pub fn new(items: Vec<RosterItem>) -> Self {
        Self { items }
    }

    /// Roster with no entries: the default template keeps only clipboard items.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up a preset by name (`flat` or `grouped`).
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "flat" => Some(Self::flat()),
            "grouped" => Some(Self::grouped()),
            "empty" | "none" => Some(Self::empty()),
            _ => None,
        }
    }

    /// Every service in a single level, sections split by separators.
    pub fn flat() -> Self {
        use RosterItem::*;
        Self::new(vec![
            Search(google()),
            Separator,
            Search(skell()),
            Search(do_people_say_it()),
            Separator,
            Search(keep()),
            Search(vocabulary()),
            Search(twitter()),
            Search(ruigo()),
            Separator,
            Search(wikipedia()),
            Search(imdb()),
            Separator,
            tools(),
        ])
    }

    /// Services grouped into submenus by purpose.
    pub fn grouped() -> Self {
        use RosterItem::*;
        Self::new(vec![
            Search(google()),
            Separator,
            RosterItem::submenu(
                "examples",
                "Examples",
                vec![Search(skell()), Search(do_people_say_it())],
            ),
            RosterItem::submenu(
                "dictionaries",
                "Dictionaries",
                vec![Search(vocabulary()), Search(ruigo()), Search(wikipedia())],
            ),
            RosterItem::submenu(
                "search",
                "Search",
                vec![Search(keep()), Search(twitter()), Search(imdb())],
            ),
            Separator,
            tools(),
        ])
    }
}

// ========== Preset data ==========

fn google() -> SearchService {
    SearchService::new("google", "Google検索", "https://www.google.com/search?q={query}")
        .idle_label("open Google")
        .home("https://www.google.com/")
}

fn skell() -> SearchService {
    SearchService::new(
        "skellcc",
        "SKELL例文検索",
        "https://skell.sketchengine.co.uk/run.cgi/concordance?lpos=&query={query}",
    )
    .idle_label("SKELL(例文)")
    .home("https://skell.sketchengine.co.uk/run.cgi/skell")
}

fn do_people_say_it() -> SearchService {
    SearchService::new("dopeoplesayit", "Do People Say It例文検索", "https://dopeoplesay.com/q/{query}")
        .idle_label("Do People Say It")
}

fn keep() -> SearchService {
    SearchService::new("keep", "Keepで検索", "https://keep.google.com/#search/text={query}")
        .idle_label("open Keep")
        .home("https://keep.google.com/")
}

fn vocabulary() -> SearchService {
    SearchService::new(
        "vocabulary",
        "Vocabulary.comで検索",
        "https://www.vocabulary.com/dictionary/{query}",
    )
    .idle_label("Vocabulary.com")
}

fn twitter() -> SearchService {
    SearchService::new("Twitter", "Twitter検索", "https://twitter.com/search?q={query}&src=typd")
}

fn ruigo() -> SearchService {
    SearchService::new("ruigo", "連想類語辞典で検索", "https://renso-ruigo.com/word/{query}")
        .idle_label("連想類語辞典")
}

fn wikipedia() -> SearchService {
    SearchService::new(
        "wikijp",
        "Wikipediaで検索",
        "https://ja.wikipedia.org/wiki/Special:Search?search={query}",
    )
    .idle_label("Wikipedia")
}

fn imdb() -> SearchService {
    SearchService::new("imdb", "IMDBで検索", "https://www.imdb.com/find?ref_=nv_sr_fn&q={query}")
        .idle_label("IMDB")
        .home("https://www.imdb.com/")
}

fn tools() -> RosterItem {
    use RosterItem::Link;
    RosterItem::submenu(
        "tools",
        "Tools",
        vec![
            Link(BookmarkLink::new("simplenote", "Simplenote", "https://app.simplenote.com/")),
            Link(BookmarkLink::new("iosnote", "iOS note", "https://www.icloud.com/#notes2/")),
            Link(BookmarkLink::new("writebox", "Writebox", "https://write-box.appspot.com/")),
            Link(BookmarkLink::new("scrapbox", "Scrapbox", "https://scrapbox.io/")),
            Link(BookmarkLink::new("workflowy", "Workflowy", "https://workflowy.com/")),
        ],
    )
}
