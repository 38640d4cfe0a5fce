//! Host capabilities the navigators call into.
//!
//! Every capability is optional. A session resolves them once into a
//! [`Capabilities`] registry; a missing entry turns the matching action into a
//! no-op instead of an error.

use bcall_types::BookmarkItem;
use futures_util::future::BoxFuture;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Failure reported by a host capability. Call sites log it and move on.
#[derive(Error, Debug)]
pub enum CapabilityError {
    #[error("Failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}")]
    Exit { program: String, status: String },

    #[error("Target not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Host(String),
}

pub type CapabilityResult<T = ()> = std::result::Result<T, CapabilityError>;

/// Opens a vault file in a new pane, optionally scrolled to a heading or block.
pub trait FileOpener: Send + Sync {
    fn open_file<'a>(
        &'a self,
        path: &'a str,
        subpath: Option<&'a str>,
    ) -> BoxFuture<'a, CapabilityResult>;
}

/// Reveals a folder in the host's file tree.
pub trait FolderRevealer: Send + Sync {
    /// # Errors
    ///
    /// Host-specific; the caller only logs it.
    fn reveal_folder(&self, path: &str) -> CapabilityResult;
}

/// Runs a saved search query.
pub trait SearchRunner: Send + Sync {
    /// # Errors
    ///
    /// Host-specific; the caller only logs it.
    fn run_search(&self, query: &str) -> CapabilityResult;
}

/// Activates a graph view scoped to one bookmark.
pub trait GraphActivator: Send + Sync {
    fn activate_scoped_graph<'a>(&'a self, bookmark_id: &'a str)
    -> BoxFuture<'a, CapabilityResult>;
}

/// Source of the bookmark tree and of the ids the host knows bookmarks by.
pub trait BookmarkRegistry: Send + Sync {
    /// Root items of the current bookmark tree.
    fn items(&self) -> Vec<BookmarkItem>;

    /// Id the host uses for `item`, if it still knows about it.
    fn bookmark_id(&self, item: &BookmarkItem) -> Option<String>;
}

/// Opens a URL, either in an in-app viewer or the platform's default handler.
pub trait UrlOpener: Send + Sync {
    /// # Errors
    ///
    /// Host-specific; the caller only logs it.
    fn open_url(&self, url: &str, prefer_in_app: bool) -> CapabilityResult;
}

/// Icon found for a website.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favicon {
    pub domain: String,
    /// Host-specific reference to the image (file path, cache key, glyph).
    pub source: String,
}

/// Looks up cached favicons. Lookups may race each other; results are decorative.
pub trait FaviconLoader: Send + Sync {
    fn load_icon<'a>(&'a self, domain: &'a str, url: &'a str) -> BoxFuture<'a, Option<Favicon>>;
}

/// Resolves a vault path to the file it names.
pub trait PathResolver: Send + Sync {
    /// File base name (no directory, no extension), or `None` if the path
    /// no longer points at a file.
    fn resolve_basename(&self, path: &str) -> Option<String>;
}

/// Disposable pane shown while a burst of files is being opened.
pub trait PlaceholderPane: Send + Sync {
    fn show(&self) -> BoxFuture<'_, CapabilityResult>;
    fn dismiss(&self);
}

/// Injected capability registry, resolved once per session.
#[derive(Clone, Default)]
pub struct Capabilities {
    pub file_opener: Option<Arc<dyn FileOpener>>,
    pub folder_revealer: Option<Arc<dyn FolderRevealer>>,
    pub search_runner: Option<Arc<dyn SearchRunner>>,
    pub graph_activator: Option<Arc<dyn GraphActivator>>,
    pub registry: Option<Arc<dyn BookmarkRegistry>>,
    pub url_opener: Option<Arc<dyn UrlOpener>>,
    pub favicon_loader: Option<Arc<dyn FaviconLoader>>,
    pub path_resolver: Option<Arc<dyn PathResolver>>,
    pub placeholder: Option<Arc<dyn PlaceholderPane>>,

    /// Ask the URL opener for its in-app viewer (host allows external URLs there).
    pub prefer_in_app_urls: bool,
}

impl Capabilities {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_file_opener(mut self, cap: Arc<dyn FileOpener>) -> Self {
        self.file_opener = Some(cap);
        self
    }

    #[must_use]
    pub fn with_folder_revealer(mut self, cap: Arc<dyn FolderRevealer>) -> Self {
        self.folder_revealer = Some(cap);
        self
    }

    #[must_use]
    pub fn with_search_runner(mut self, cap: Arc<dyn SearchRunner>) -> Self {
        self.search_runner = Some(cap);
        self
    }

    #[must_use]
    pub fn with_graph_activator(mut self, cap: Arc<dyn GraphActivator>) -> Self {
        self.graph_activator = Some(cap);
        self
    }

    #[must_use]
    pub fn with_registry(mut self, cap: Arc<dyn BookmarkRegistry>) -> Self {
        self.registry = Some(cap);
        self
    }

    #[must_use]
    pub fn with_url_opener(mut self, cap: Arc<dyn UrlOpener>) -> Self {
        self.url_opener = Some(cap);
        self
    }

    #[must_use]
    pub fn with_favicon_loader(mut self, cap: Arc<dyn FaviconLoader>) -> Self {
        self.favicon_loader = Some(cap);
        self
    }

    #[must_use]
    pub fn with_path_resolver(mut self, cap: Arc<dyn PathResolver>) -> Self {
        self.path_resolver = Some(cap);
        self
    }

    #[must_use]
    pub fn with_placeholder(mut self, cap: Arc<dyn PlaceholderPane>) -> Self {
        self.placeholder = Some(cap);
        self
    }

    #[must_use]
    pub fn prefer_in_app_urls(mut self, prefer: bool) -> Self {
        self.prefer_in_app_urls = prefer;
        self
    }

    /// Names of the capabilities present, for logging.
    #[must_use]
    pub fn present(&self) -> Vec<&'static str> {
        [
            ("file", self.file_opener.is_some()),
            ("folder", self.folder_revealer.is_some()),
            ("search", self.search_runner.is_some()),
            ("graph", self.graph_activator.is_some()),
            ("registry", self.registry.is_some()),
            ("url", self.url_opener.is_some()),
            ("favicon", self.favicon_loader.is_some()),
            ("resolver", self.path_resolver.is_some()),
            ("placeholder", self.placeholder.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
        .collect()
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capabilities")
            .field("present", &self.present())
            .field("prefer_in_app_urls", &self.prefer_in_app_urls)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoopSearch;

    impl SearchRunner for NoopSearch {
        fn run_search(&self, _query: &str) -> CapabilityResult {
            Ok(())
        }
    }

    #[test]
    fn test_default_is_empty() {
        let caps = Capabilities::new();
        assert!(caps.present().is_empty());
        assert!(!caps.prefer_in_app_urls);
    }

    #[test]
    fn test_builder_registers() {
        let caps = Capabilities::new()
            .with_search_runner(Arc::new(NoopSearch))
            .prefer_in_app_urls(true);
        assert_eq!(caps.present(), vec!["search"]);
        assert!(caps.prefer_in_app_urls);
    }

    #[test]
    fn test_debug_lists_present() {
        let caps = Capabilities::new().with_search_runner(Arc::new(NoopSearch));
        let debug = format!("{caps:?}");
        assert!(debug.contains("search"));
        assert!(!debug.contains("folder"));
    }

    #[test]
    fn test_error_display() {
        let err = CapabilityError::Exit {
            program: "xdg-open".into(),
            status: "exit status: 4".into(),
        };
        assert_eq!(err.to_string(), "xdg-open exited with exit status: 4");
    }
}
