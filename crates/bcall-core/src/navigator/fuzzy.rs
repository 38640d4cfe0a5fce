//! Fuzzy-filtered list navigator.
//!
//! Each instance browses exactly one layer. Entering a group or going back
//! builds a fresh instance over the new top of its [`LayerStack`]; the caller
//! swaps it in for the old one.

use super::{FocusDirection, Legend, LayerStack, wrap_step};
use crate::config::{SearchBookmarksConfig, SortMode, StructureMode};
use crate::display::display_name;
use crate::dispatch::{OpenAllOptions, OpenOutcome, OpenService};
use crate::input::{Key, KeyInput};
use crate::listener::{KeyListener, Subscription};
use crate::search::{FuzzyScorer, NucleoScorer};
use bcall_types::{BookmarkItem, BookmarkKind};
use std::ops::Range;
use std::sync::Arc;
use tracing::debug;

/// Layer preparation and open-all behavior, fixed for a whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuzzySettings {
    pub structure: StructureMode,
    pub sort: SortMode,
    pub recursive_open_all: bool,
}

impl From<&SearchBookmarksConfig> for FuzzySettings {
    fn from(config: &SearchBookmarksConfig) -> Self {
        Self {
            structure: config.structure_mode,
            sort: config.sort_mode,
            recursive_open_all: config.recursive_open_all,
        }
    }
}

impl FuzzySettings {
    /// Groups are only worth descending into when they are not already inlined.
    #[must_use]
    pub fn recursive_open_all(&self) -> bool {
        self.recursive_open_all && self.structure == StructureMode::Original
    }
}

/// A row that survived filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyRow {
    /// Position in the prepared layer.
    pub index: usize,
    pub score: u32,
    /// Matched character ranges of the display name.
    pub highlights: Vec<Range<usize>>,
}

/// What the front end should do after a fuzzy navigator handled input.
pub enum FuzzyOutcome<S: FuzzyScorer = NucleoScorer> {
    Stay,
    Close,
    /// Replace the current navigator with this one (entered or left a group).
    Replace(Box<FuzzyNavigator<S>>),
}

/// Pre-order linearization: every node, then its descendants, then its next sibling.
#[must_use]
pub fn flatten(items: &[BookmarkItem]) -> Vec<BookmarkItem> {
    let mut flat = Vec::with_capacity(items.len());
    let mut stack = vec![items.iter()];

    while let Some(level) = stack.last_mut() {
        let Some(item) = level.next() else {
            stack.pop();
            continue;
        };
        flat.push(item.clone());
        if let BookmarkKind::Group { items } = &item.kind {
            stack.push(items.iter());
        }
    }

    flat
}

/// Apply structure and sort modes to a raw layer. Returns the same allocation
/// when neither changes anything.
#[must_use]
pub fn prepare_layer(
    layer: &Arc<[BookmarkItem]>,
    structure: StructureMode,
    sort: SortMode,
) -> Arc<[BookmarkItem]> {
    if structure == StructureMode::Original && sort == SortMode::Original {
        return Arc::clone(layer);
    }

    let mut items = match structure {
        StructureMode::Flat => flatten(layer),
        StructureMode::Original => layer.to_vec(),
    };

    // Stable, so equal creation times keep tree order.
    match sort {
        SortMode::Original => {}
        SortMode::Newer => items.sort_by(|a, b| b.ctime.cmp(&a.ctime)),
        SortMode::Older => items.sort_by_key(|item| item.ctime),
    }

    items.into()
}

pub struct FuzzyNavigator<S: FuzzyScorer = NucleoScorer> {
    settings: FuzzySettings,
    service: OpenService,
    layers: LayerStack,
    items: Arc<[BookmarkItem]>,
    names: Vec<String>,
    query: String,
    rows: Vec<FuzzyRow>,
    selected: usize,
    scorer: S,
    subscription: Option<Subscription>,
}

impl FuzzyNavigator<NucleoScorer> {
    /// Start a session at the root layer.
    #[must_use]
    pub fn new(
        root: impl Into<Arc<[BookmarkItem]>>,
        config: &SearchBookmarksConfig,
        service: OpenService,
    ) -> Self {
        Self::with_layers(LayerStack::root(root.into()), config.into(), service)
    }

    /// Footer legend. Back and open-all need Shift because plain keys edit the query.
    #[must_use]
    pub fn legends() -> Vec<Legend> {
        let modifier = if cfg!(target_os = "macos") {
            "⇧"
        } else {
            "Shift + "
        };
        vec![
            Legend::new("↑ | ↓", "Move focus"),
            Legend::new(format!("{modifier}Backspace"), "Back to parent group"),
            Legend::new("Enter", "Open focused item"),
            Legend::new(format!("{modifier}Enter"), "Open all files in current group"),
        ]
    }
}

impl<S: FuzzyScorer + Default> FuzzyNavigator<S> {
    /// Navigator over the top layer of `layers`.
    #[must_use]
    pub fn with_layers(layers: LayerStack, settings: FuzzySettings, service: OpenService) -> Self {
        let items = prepare_layer(layers.top(), settings.structure, settings.sort);
        let names = items
            .iter()
            .map(|item| display_name(item, service.capabilities()))
            .collect();

        let mut nav = Self {
            settings,
            service,
            layers,
            items,
            names,
            query: String::new(),
            rows: Vec::new(),
            selected: 0,
            scorer: S::default(),
            subscription: None,
        };
        nav.refilter();
        nav
    }

    /// Take the key listener slot for this navigator.
    pub fn attach(&mut self, listener: &KeyListener) {
        self.subscription = Some(listener.subscribe());
    }

    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.subscription.as_ref().is_some_and(Subscription::is_active)
    }

    #[must_use]
    pub fn settings(&self) -> FuzzySettings {
        self.settings
    }

    #[must_use]
    pub fn service(&self) -> &OpenService {
        &self.service
    }

    #[must_use]
    pub fn layers(&self) -> &LayerStack {
        &self.layers
    }

    /// Prepared (flattened/sorted) items of this layer.
    #[must_use]
    pub fn items(&self) -> &Arc<[BookmarkItem]> {
        &self.items
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn matches(&self) -> &[FuzzyRow] {
        &self.rows
    }

    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn item(&self, row: &FuzzyRow) -> &BookmarkItem {
        &self.items[row.index]
    }

    #[must_use]
    pub fn name(&self, row: &FuzzyRow) -> &str {
        &self.names[row.index]
    }

    #[must_use]
    pub fn selected_item(&self) -> Option<&BookmarkItem> {
        self.rows.get(self.selected).map(|row| self.item(row))
    }

    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.layers.can_pop()
    }

    pub fn set_query(&mut self, query: &str) {
        if self.query == query {
            return;
        }
        query.clone_into(&mut self.query);
        self.refilter();
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.refilter();
    }

    pub fn pop_char(&mut self) {
        if self.query.pop().is_some() {
            self.refilter();
        }
    }

    /// Move the selection with wrap-around. No-op without matches.
    pub fn move_selection(&mut self, direction: FocusDirection) {
        if self.rows.is_empty() {
            return;
        }
        self.selected = wrap_step(self.selected, self.rows.len(), direction);
    }

    /// Activate the `row`-th match.
    pub async fn choose(&self, row: usize) -> FuzzyOutcome<S> {
        let Some(item) = self.rows.get(row).map(|r| self.items[r.index].clone()) else {
            return FuzzyOutcome::Stay;
        };

        match self.service.open_bookmark(&item).await {
            OpenOutcome::EnterGroup => FuzzyOutcome::Replace(Box::new(self.descend(&item))),
            OpenOutcome::Close => FuzzyOutcome::Close,
            OpenOutcome::Rejected => FuzzyOutcome::Stay,
        }
    }

    /// Navigator for the parent layer, or `None` at the root.
    #[must_use]
    pub fn ascend(&self) -> Option<Self> {
        let layers = self.layers.popped()?;
        debug!("Fuzzy navigator back to depth {}", layers.depth());
        Some(self.spawn(layers))
    }

    /// Open every file in this layer. Recursion only applies to unflattened layers.
    pub async fn open_all(&self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        self.service
            .open_all(
                &self.items,
                OpenAllOptions::top_level(self.settings.recursive_open_all()),
            )
            .await;
        true
    }

    /// Route a key press. `None` if the key means nothing here.
    pub async fn handle_key(&mut self, input: KeyInput) -> Option<FuzzyOutcome<S>> {
        let outcome = match (input.key, input.shift) {
            (Key::Backspace, true) => match self.ascend() {
                Some(parent) => FuzzyOutcome::Replace(Box::new(parent)),
                None => FuzzyOutcome::Stay,
            },
            (Key::Enter, true) => {
                if self.open_all().await {
                    FuzzyOutcome::Close
                } else {
                    FuzzyOutcome::Stay
                }
            }
            (Key::Enter, false) => self.choose(self.selected).await,
            (Key::Up, _) => {
                self.move_selection(FocusDirection::Up);
                FuzzyOutcome::Stay
            }
            (Key::Down, _) => {
                self.move_selection(FocusDirection::Down);
                FuzzyOutcome::Stay
            }
            (Key::Backspace, false) => {
                self.pop_char();
                FuzzyOutcome::Stay
            }
            (Key::Char(c), _) => {
                self.push_char(c);
                FuzzyOutcome::Stay
            }
            _ => return None,
        };
        Some(outcome)
    }

    fn descend(&self, group: &BookmarkItem) -> Self {
        let children: Arc<[BookmarkItem]> = group.children().into();
        debug!(
            "Fuzzy navigator entering {} ({} items)",
            group.identity_key(),
            children.len()
        );
        self.spawn(self.layers.pushed(children))
    }

    /// New instance over `layers`, inheriting settings and the listener slot.
    fn spawn(&self, layers: LayerStack) -> Self {
        let mut next = Self::with_layers(layers, self.settings, self.service.clone());
        if let Some(sub) = &self.subscription {
            next.attach(&sub.listener());
        }
        next
    }

    fn refilter(&mut self) {
        self.selected = 0;

        if self.query.is_empty() {
            self.rows = (0..self.items.len())
                .map(|index| FuzzyRow {
                    index,
                    score: 0,
                    highlights: Vec::new(),
                })
                .collect();
            return;
        }

        let mut rows: Vec<FuzzyRow> = self
            .names
            .iter()
            .enumerate()
            .filter_map(|(index, name)| {
                self.scorer.score(&self.query, name).map(|m| FuzzyRow {
                    index,
                    score: m.score,
                    highlights: m.highlight_ranges(),
                })
            })
            .collect();
        rows.sort_by(|a, b| b.score.cmp(&a.score));
        self.rows = rows;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Vec<BookmarkItem> {
        vec![
            BookmarkItem::file(3, "a.md").with_title("Alpha"),
            BookmarkItem::group(
                1,
                "Beta",
                vec![
                    BookmarkItem::file(5, "c.md").with_title("Gamma"),
                    BookmarkItem::file(2, "d.md").with_title("Delta"),
                ],
            ),
            BookmarkItem::file(4, "e.md").with_title("Epsilon"),
        ]
    }

    fn titles(items: &[BookmarkItem]) -> Vec<&str> {
        items.iter().map(|i| i.title().unwrap_or_default()).collect()
    }

    #[test]
    fn test_flatten_pre_order() {
        let flat = flatten(&tree());
        assert_eq!(titles(&flat), vec!["Alpha", "Beta", "Gamma", "Delta", "Epsilon"]);
        assert_eq!(flat[1].children().len(), 2);
    }

    #[test]
    fn test_prepare_original_keeps_allocation() {
        let layer: Arc<[BookmarkItem]> = tree().into();
        let prepared = prepare_layer(&layer, StructureMode::Original, SortMode::Original);
        assert!(Arc::ptr_eq(&layer, &prepared));
    }

    #[test]
    fn test_prepare_sorts() {
        let layer: Arc<[BookmarkItem]> = tree().into();
        let newer = prepare_layer(&layer, StructureMode::Flat, SortMode::Newer);
        assert_eq!(titles(&newer), vec!["Gamma", "Epsilon", "Alpha", "Delta", "Beta"]);
        let older = prepare_layer(&layer, StructureMode::Original, SortMode::Older);
        assert_eq!(titles(&older), vec!["Beta", "Alpha", "Epsilon"]);
    }

    #[test]
    fn test_empty_query_lists_all() {
        let nav = FuzzyNavigator::new(tree(), &SearchBookmarksConfig::default(), OpenService::default());
        assert_eq!(nav.matches().len(), 5);
        assert_eq!(nav.name(&nav.matches()[0]), "Alpha");
    }

    #[test]
    fn test_query_filters() {
        let mut nav =
            FuzzyNavigator::new(tree(), &SearchBookmarksConfig::default(), OpenService::default());
        nav.set_query("lta");
        let names: Vec<&str> = nav.matches().iter().map(|r| nav.name(r)).collect();
        assert_eq!(names, vec!["Delta"]);
        assert!(!nav.matches()[0].highlights.is_empty());

        nav.set_query("");
        assert_eq!(nav.matches().len(), 5);
    }

    #[test]
    fn test_selection_wraps() {
        let mut nav =
            FuzzyNavigator::new(tree(), &SearchBookmarksConfig::default(), OpenService::default());
        nav.move_selection(FocusDirection::Up);
        assert_eq!(nav.selected(), 4);
        nav.move_selection(FocusDirection::Down);
        assert_eq!(nav.selected(), 0);
    }

    #[test]
    fn test_recursive_open_all_requires_original_structure() {
        let mut config = SearchBookmarksConfig::default();
        assert!(!FuzzySettings::from(&config).recursive_open_all());
        config.structure_mode = StructureMode::Original;
        assert!(FuzzySettings::from(&config).recursive_open_all());
        config.recursive_open_all = false;
        assert!(!FuzzySettings::from(&config).recursive_open_all());
    }

    #[test]
    fn test_root_cannot_go_back() {
        let nav = FuzzyNavigator::new(tree(), &SearchBookmarksConfig::default(), OpenService::default());
        assert!(!nav.can_go_back());
        assert!(nav.ascend().is_none());
    }
}
