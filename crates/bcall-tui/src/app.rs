//! Application state and input handling for the TUI.

use crate::colors;
use crate::host::{DesktopHost, OpeningOverlay};
use crate::keys;
use bcall_core::config::{CallerConfig, Config, SearchBookmarksConfig};
use bcall_core::input::{Key, KeyInput};
use bcall_core::navigator::PageDirection;
use bcall_core::{
    BookmarkItem, BookmarkStore, Error, FuzzyNavigator, FuzzyOutcome, KeyListener, NavOutcome,
    OpenService, PagedNavigator,
};
use crossterm::event::KeyEvent;
use ratatui::layout::{Position, Rect};
use ratatui::style::Color;
use std::io::Write;
use std::process::{Command, Stdio};
use std::sync::Arc;
use tracing::{debug, warn};

/// Pipe `text` into `program`.
fn pipe_to(program: &str, args: &[&str], text: &str) -> std::io::Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    if let Some(stdin) = child.stdin.as_mut() {
        stdin.write_all(text.as_bytes())?;
    }
    drop(child.stdin.take());
    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(std::io::Error::other(format!("{program} exited with {status}")))
    }
}

/// Copy text to clipboard using wl-copy or xclip fallback
///
/// # Errors
///
/// Returns the xclip error when neither program copied the text.
pub fn copy_to_clipboard(text: &str) -> std::io::Result<()> {
    pipe_to("wl-copy", &[], text).or_else(|_| pipe_to("xclip", &["-selection", "clipboard"], text))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerKind {
    Caller,
    Search,
}

/// Load the bookmarks named by `config` and start a picker over them. Sources
/// that cannot be read become a message screen.
pub fn open_session(config: &Config, kind: PickerKind) -> App {
    let Some(path) = config.bookmarks_path() else {
        return App::message(
            "No vault configured",
            "Pass --vault or run `bcall-tui config set vault <dir>`.",
        );
    };

    let store = match BookmarkStore::load(&path) {
        Ok(store) => store,
        Err(Error::BookmarksUnavailable(path)) => {
            return App::message(
                "Bookmarks unavailable",
                format!(
                    "No bookmarks file at {}. Is the Bookmarks core plugin enabled?",
                    path.display()
                ),
            );
        }
        Err(e) => {
            warn!("Failed to load bookmarks: {}", e);
            return App::message("Bookmarks unreadable", e.to_string());
        }
    };

    let host = DesktopHost::new(config.apps.clone(), config.vault.as_deref());
    let service = OpenService::new(host.capabilities(&store));
    let app = match kind {
        PickerKind::Caller => App::caller(store.root(), &config.caller, service),
        PickerKind::Search => App::search(store.root(), &config.search, service),
    };
    app.with_overlay(host.overlay().clone())
}

/// The active navigator.
pub enum Picker {
    Caller(PagedNavigator),
    Search(FuzzyNavigator),
}

impl Picker {
    pub fn is_listening(&self) -> bool {
        match self {
            Picker::Caller(nav) => nav.is_listening(),
            Picker::Search(nav) => nav.is_listening(),
        }
    }
}

pub enum Screen {
    Picker(Picker),
    /// Informational view with nothing to navigate.
    Message { title: String, body: String },
}

/// Clickable regions recorded by the last render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// Visible row (paged) or match row (fuzzy).
    Row(usize),
    Back,
    OpenAll,
    PrevPage,
    NextPage,
}

/// Footer and focus presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    pub show_footer_buttons: bool,
    pub show_legends: bool,
    pub focus: Color,
}

impl From<&CallerConfig> for ViewOptions {
    fn from(config: &CallerConfig) -> Self {
        Self {
            show_footer_buttons: config.show_footer_buttons,
            show_legends: config.show_legends,
            focus: colors::focus_color(&config.focus_color),
        }
    }
}

impl From<&SearchBookmarksConfig> for ViewOptions {
    fn from(config: &SearchBookmarksConfig) -> Self {
        Self {
            show_footer_buttons: config.show_footer_buttons,
            show_legends: config.show_legends,
            focus: colors::focus_color(&config.focus_color),
        }
    }
}

/// Main application state
pub struct App {
    pub screen: Screen,
    pub view: ViewOptions,
    pub listener: KeyListener,
    /// One-line message cleared by the next key press.
    pub notice: Option<String>,
    pub overlay: OpeningOverlay,
    pub hits: Vec<(Rect, HitTarget)>,
    pub should_quit: bool,
}

impl App {
    fn with_screen(screen: Screen, view: ViewOptions, listener: KeyListener) -> Self {
        Self {
            screen,
            view,
            listener,
            notice: None,
            overlay: OpeningOverlay::default(),
            hits: Vec::new(),
            should_quit: false,
        }
    }

    /// Paged picker over `root`.
    pub fn caller(
        root: impl Into<Arc<[BookmarkItem]>>,
        config: &CallerConfig,
        service: OpenService,
    ) -> Self {
        let listener = KeyListener::new();
        let mut nav = PagedNavigator::new(root, config, service);
        nav.attach(&listener);
        Self::with_screen(Screen::Picker(Picker::Caller(nav)), config.into(), listener)
    }

    /// Fuzzy picker over `root`.
    pub fn search(
        root: impl Into<Arc<[BookmarkItem]>>,
        config: &SearchBookmarksConfig,
        service: OpenService,
    ) -> Self {
        let listener = KeyListener::new();
        let mut nav = FuzzyNavigator::new(root, config, service);
        nav.attach(&listener);
        Self::with_screen(Screen::Picker(Picker::Search(nav)), config.into(), listener)
    }

    pub fn message(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::with_screen(
            Screen::Message {
                title: title.into(),
                body: body.into(),
            },
            ViewOptions::from(&CallerConfig::default()),
            KeyListener::new(),
        )
    }

    #[must_use]
    pub fn with_overlay(mut self, overlay: OpeningOverlay) -> Self {
        self.overlay = overlay;
        self
    }

    pub async fn handle_key(&mut self, event: KeyEvent) {
        if keys::is_interrupt(&event) {
            self.should_quit = true;
            return;
        }
        let Some(input) = keys::to_key_input(&event) else {
            return;
        };
        self.notice = None;

        let Screen::Picker(picker) = &mut self.screen else {
            if matches!(input.key, Key::Escape | Key::Enter) {
                self.should_quit = true;
            }
            return;
        };

        if !picker.is_listening() {
            debug!("Dropping key {:?}: picker not subscribed", input.key);
            return;
        }

        let target = activation_target(picker, input);
        let consumed = match picker {
            Picker::Caller(nav) => match nav.handle_key(input).await {
                Some(outcome) => {
                    self.should_quit = outcome == NavOutcome::Close;
                    true
                }
                None => false,
            },
            Picker::Search(nav) => match nav.handle_key(input).await {
                Some(outcome) => {
                    self.should_quit = apply_fuzzy(nav, outcome);
                    true
                }
                None => false,
            },
        };

        if !consumed && input.key == Key::Escape {
            self.should_quit = true;
        } else if !self.should_quit {
            self.notice = target.and_then(|item| rejected_notice(picker, &item));
        }
    }

    /// Left click at a terminal cell.
    pub async fn handle_click(&mut self, column: u16, row: u16) {
        let position = Position::new(column, row);
        let Some(target) = self
            .hits
            .iter()
            .find(|(area, _)| area.contains(position))
            .map(|(_, target)| *target)
        else {
            return;
        };
        let Screen::Picker(picker) = &mut self.screen else {
            return;
        };
        debug!("Click on {:?}", target);
        self.notice = None;

        match picker {
            Picker::Caller(nav) => {
                let clicked = match target {
                    HitTarget::Row(index) => nav.view_items().get(index).cloned(),
                    _ => None,
                };
                let outcome = match target {
                    HitTarget::Row(index) => nav.click(index).await,
                    HitTarget::Back => {
                        nav.back_to_parent();
                        NavOutcome::Stay
                    }
                    HitTarget::OpenAll => nav.open_all().await,
                    HitTarget::PrevPage => {
                        nav.change_page(PageDirection::Left);
                        NavOutcome::Stay
                    }
                    HitTarget::NextPage => {
                        nav.change_page(PageDirection::Right);
                        NavOutcome::Stay
                    }
                };
                self.should_quit = outcome == NavOutcome::Close;
                if !self.should_quit {
                    self.notice = clicked.and_then(|item| rejected_notice(picker, &item));
                }
            }
            Picker::Search(nav) => {
                let outcome = match target {
                    HitTarget::Row(row) => nav.choose(row).await,
                    HitTarget::Back => match nav.ascend() {
                        Some(parent) => FuzzyOutcome::Replace(Box::new(parent)),
                        None => FuzzyOutcome::Stay,
                    },
                    HitTarget::OpenAll if nav.open_all().await => FuzzyOutcome::Close,
                    HitTarget::OpenAll | HitTarget::PrevPage | HitTarget::NextPage => {
                        FuzzyOutcome::Stay
                    }
                };
                self.should_quit = apply_fuzzy(nav, outcome);
            }
        }
    }
}

/// Swap in a replacement navigator. Returns true when the picker should close.
fn apply_fuzzy(nav: &mut FuzzyNavigator, outcome: FuzzyOutcome) -> bool {
    match outcome {
        FuzzyOutcome::Replace(next) => {
            *nav = *next;
            false
        }
        FuzzyOutcome::Close => true,
        FuzzyOutcome::Stay => false,
    }
}

/// Item a key press would activate, looked up before the navigator moves.
fn activation_target(picker: &Picker, input: KeyInput) -> Option<BookmarkItem> {
    match picker {
        Picker::Caller(nav) => {
            let index = match input.key {
                Key::Char(glyph) if nav.alphabet().contains(glyph) => nav.alphabet().index_of(glyph),
                Key::Enter | Key::Char(' ') => Some(nav.focus()),
                _ => None,
            }?;
            nav.view_items().get(index).cloned()
        }
        Picker::Search(nav) if input.key == Key::Enter && !input.shift => {
            nav.selected_item().cloned()
        }
        Picker::Search(_) => None,
    }
}

fn rejected_notice(picker: &Picker, item: &BookmarkItem) -> Option<String> {
    let service = match picker {
        Picker::Caller(nav) => nav.service(),
        Picker::Search(nav) => nav.service(),
    };
    (!item.is_group() && !service.is_activatable(item)).then(|| {
        format!(
            "{} bookmarks can't be opened here",
            item.item_type().as_str()
        )
    })
}
