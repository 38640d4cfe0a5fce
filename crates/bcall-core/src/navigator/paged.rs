//! Paged grid navigator.
//!
//! A layer is cut into pages as long as the shortcut alphabet; the n-th glyph
//! opens the n-th row of the visible page. Descending into a group records the
//! parent's page and focus so going back lands on the same row.

use super::{FocusDirection, Legend, NavOutcome, PageDirection, wrap_step};
use crate::config::{CallerConfig, ShortcutAlphabet};
use crate::dispatch::{OpenAllOptions, OpenOutcome, OpenService};
use crate::input::{Key, KeyInput};
use crate::listener::{KeyListener, Subscription};
use bcall_types::BookmarkItem;
use std::sync::Arc;
use tracing::debug;

/// Saved position in one layer of the path from root to the current layer.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub items: Arc<[BookmarkItem]>,
    pub page: usize,
    pub focus: usize,
}

impl HistoryEntry {
    fn new(items: Arc<[BookmarkItem]>) -> Self {
        Self {
            items,
            page: 0,
            focus: 0,
        }
    }
}

/// One row of the visible page.
#[derive(Debug, Clone, Copy)]
pub struct ViewSlot<'a> {
    pub glyph: char,
    /// `None` for the placeholder rows padding a short last page.
    pub item: Option<&'a BookmarkItem>,
    pub focused: bool,
    pub read_only: bool,
}

pub struct PagedNavigator {
    alphabet: ShortcutAlphabet,
    back_key: Key,
    open_all_key: Key,
    recursive_open_all: bool,
    service: OpenService,
    layer: Arc<[BookmarkItem]>,
    page: usize,
    focus: usize,
    groups: Vec<String>,
    history: Vec<HistoryEntry>,
    subscription: Option<Subscription>,
}

impl PagedNavigator {
    #[must_use]
    pub fn new(
        root: impl Into<Arc<[BookmarkItem]>>,
        config: &CallerConfig,
        service: OpenService,
    ) -> Self {
        let layer = root.into();
        Self {
            alphabet: config.shortcut_alphabet().clone(),
            back_key: config.back_key(),
            open_all_key: config.open_all_key(),
            recursive_open_all: config.recursive_open_all,
            service,
            history: vec![HistoryEntry::new(Arc::clone(&layer))],
            layer,
            page: 0,
            focus: 0,
            groups: vec![".".to_string()],
            subscription: None,
        }
    }

    /// Take the key listener slot for this navigator.
    pub fn attach(&mut self, listener: &KeyListener) {
        self.subscription = Some(listener.subscribe());
    }

    /// Whether key events are currently routed here.
    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.subscription.as_ref().is_some_and(Subscription::is_active)
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.alphabet.len()
    }

    #[must_use]
    pub fn alphabet(&self) -> &ShortcutAlphabet {
        &self.alphabet
    }

    #[must_use]
    pub fn service(&self) -> &OpenService {
        &self.service
    }

    /// Items of the layer being browsed.
    #[must_use]
    pub fn layer(&self) -> &Arc<[BookmarkItem]> {
        &self.layer
    }

    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    /// Focused row within the visible page.
    #[must_use]
    pub fn focus(&self) -> usize {
        self.focus
    }

    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Number of pages; zero for an empty layer.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.layer.len().div_ceil(self.page_size())
    }

    /// Visible slice of the layer.
    #[must_use]
    pub fn view_items(&self) -> &[BookmarkItem] {
        let start = (self.page * self.page_size()).min(self.layer.len());
        let end = (start + self.page_size()).min(self.layer.len());
        &self.layer[start..end]
    }

    /// Visible page padded with placeholder rows up to the page size.
    /// Empty when the layer has no items.
    #[must_use]
    pub fn view_slots(&self) -> Vec<ViewSlot<'_>> {
        let view = self.view_items();
        if view.is_empty() {
            return Vec::new();
        }
        self.alphabet
            .glyphs()
            .iter()
            .enumerate()
            .map(|(idx, &glyph)| {
                let item = view.get(idx);
                ViewSlot {
                    glyph,
                    item,
                    focused: item.is_some() && idx == self.focus,
                    read_only: item.is_some_and(|i| !self.service.is_activatable(i)),
                }
            })
            .collect()
    }

    #[must_use]
    pub fn focused_item(&self) -> Option<&BookmarkItem> {
        self.view_items().get(self.focus)
    }

    /// `./` at the root, `.../<group>/` below it.
    #[must_use]
    pub fn breadcrumb(&self) -> String {
        match self.groups.as_slice() {
            [only] => format!("{only}/"),
            [.., last] => format!(".../{last}/"),
            [] => "./".to_string(),
        }
    }

    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.history.len() > 1
    }

    #[must_use]
    pub fn shows_pagination(&self) -> bool {
        self.layer.len() > self.page_size()
    }

    #[must_use]
    pub fn shows_open_all(&self) -> bool {
        !self.layer.is_empty()
    }

    /// Compressed alphabet such as `a | s | ... | l | ;`.
    #[must_use]
    pub fn legend_keys(&self) -> String {
        self.alphabet.legend()
    }

    /// Footer legend with the configured keys filled in.
    #[must_use]
    pub fn legends(&self) -> Vec<Legend> {
        vec![
            Legend::new("↑ | ↓", "Move focus"),
            Legend::new("← | →", "Switch pages"),
            Legend::new(self.back_key.to_string(), "Back to parent group"),
            Legend::new("Enter | Space", "Open focused item"),
            Legend::new(self.legend_keys(), "Quickly open item"),
            Legend::new(self.open_all_key.to_string(), "Open all files in current group"),
        ]
    }

    pub fn move_focus(&mut self, direction: FocusDirection) {
        let len = self.view_items().len();
        if len == 0 {
            return;
        }
        self.focus = wrap_step(self.focus, len, direction);
    }

    /// Switch page with wrap-around. Focus moves to the first row.
    pub fn change_page(&mut self, direction: PageDirection) {
        let count = self.page_count();
        if count <= 1 {
            return;
        }
        let last = count - 1;
        self.page = match direction {
            PageDirection::Left if self.page == 0 => last,
            PageDirection::Left => self.page - 1,
            PageDirection::Right if self.page >= last => 0,
            PageDirection::Right => self.page + 1,
        };
        self.focus = 0;
    }

    /// Return to the parent layer at the page and row it was left from.
    /// Returns false at the root.
    pub fn back_to_parent(&mut self) -> bool {
        if self.history.len() <= 1 {
            return false;
        }
        self.history.pop();
        self.groups.pop();

        if let Some(entry) = self.history.last() {
            self.layer = Arc::clone(&entry.items);
            self.page = entry.page;
            self.focus = entry.focus;
        }
        self.clamp_focus();
        true
    }

    /// Activate the `index`-th row of the visible page.
    pub async fn open(&mut self, index: usize) -> NavOutcome {
        let Some(item) = self.view_items().get(index).cloned() else {
            return NavOutcome::Stay;
        };

        match self.service.open_bookmark(&item).await {
            OpenOutcome::EnterGroup => {
                self.descend(index, &item);
                NavOutcome::Stay
            }
            OpenOutcome::Close => NavOutcome::Close,
            OpenOutcome::Rejected => {
                self.focus = index;
                NavOutcome::Stay
            }
        }
    }

    /// Pointer activation of a row.
    pub async fn click(&mut self, index: usize) -> NavOutcome {
        self.open(index).await
    }

    /// Shortcut glyph activation; same path as a click on the bound row.
    pub async fn shortcut_key(&mut self, glyph: char) -> NavOutcome {
        match self.alphabet.index_of(glyph) {
            Some(index) => self.click(index).await,
            None => NavOutcome::Stay,
        }
    }

    /// Open every file of the current layer. No-op on an empty layer.
    pub async fn open_all(&mut self) -> NavOutcome {
        if self.layer.is_empty() {
            return NavOutcome::Stay;
        }
        let layer = Arc::clone(&self.layer);
        self.service
            .open_all(&layer, OpenAllOptions::top_level(self.recursive_open_all))
            .await;
        NavOutcome::Close
    }

    /// Route a key press. `None` if the key means nothing here.
    pub async fn handle_key(&mut self, input: KeyInput) -> Option<NavOutcome> {
        let key = input.key;

        if let Key::Char(glyph) = key
            && self.alphabet.contains(glyph)
        {
            return Some(self.shortcut_key(glyph).await);
        }

        match key {
            Key::Up => self.move_focus(FocusDirection::Up),
            Key::Down => self.move_focus(FocusDirection::Down),
            Key::Left => self.change_page(PageDirection::Left),
            Key::Right => self.change_page(PageDirection::Right),
            Key::Enter | Key::Char(' ') => return Some(self.open(self.focus).await),
            _ if key == self.back_key => {
                self.back_to_parent();
            }
            _ if key == self.open_all_key => return Some(self.open_all().await),
            _ => return None,
        }
        Some(NavOutcome::Stay)
    }

    fn descend(&mut self, index: usize, group: &BookmarkItem) {
        if let Some(entry) = self.history.last_mut() {
            entry.page = self.page;
            entry.focus = index;
        }

        let children: Arc<[BookmarkItem]> = group.children().into();
        debug!(
            "Entering group {} ({} items)",
            group.identity_key(),
            children.len()
        );

        self.groups
            .push(group.title().unwrap_or_default().to_string());
        self.history.push(HistoryEntry::new(Arc::clone(&children)));
        self.layer = children;
        self.page = 0;
        self.focus = 0;
    }

    fn clamp_focus(&mut self) {
        let len = self.view_items().len();
        if self.focus >= len {
            self.focus = len.saturating_sub(1);
        }
    }
}
