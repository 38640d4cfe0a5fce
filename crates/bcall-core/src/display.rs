//! Labels and icons for bookmark rows.

use crate::capability::{Capabilities, Favicon};
use bcall_types::{BLOCK_REF_PREFIX, BookmarkItem, BookmarkKind};

/// Symbolic icon of a row. Front ends map [`Icon::key`] to whatever glyph set they draw with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Icon {
    Expand,
    FolderClosed,
    Block,
    Heading,
    File,
    Search,
    Graph,
    Globe,
    Favicon(Favicon),
    /// Bookmark types this version cannot render.
    Blank,
}

impl Icon {
    /// Icon name in the host's icon set (lucide names).
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Icon::Expand => "chevron-right",
            Icon::FolderClosed => "folder-closed",
            Icon::Block => "toy-brick",
            Icon::Heading => "heading",
            Icon::File => "file",
            Icon::Search => "search",
            Icon::Graph => "git-fork",
            Icon::Globe => "globe",
            Icon::Favicon(favicon) => &favicon.source,
            Icon::Blank => "",
        }
    }
}

/// Icon from the bookmark's type alone. URLs get the generic globe.
#[must_use]
pub fn type_icon(item: &BookmarkItem) -> Icon {
    match &item.kind {
        BookmarkKind::Group { .. } => Icon::Expand,
        BookmarkKind::Folder { .. } => Icon::FolderClosed,
        BookmarkKind::File { subpath, .. } => match subpath.as_deref() {
            Some(anchor) if anchor.starts_with(BLOCK_REF_PREFIX) => Icon::Block,
            Some(anchor) if !anchor.is_empty() => Icon::Heading,
            _ => Icon::File,
        },
        BookmarkKind::Search { .. } => Icon::Search,
        BookmarkKind::Graph => Icon::Graph,
        BookmarkKind::Url { .. } => Icon::Globe,
        BookmarkKind::Unknown => Icon::Blank,
    }
}

/// Like [`type_icon`], but asks the favicon cache for URL bookmarks.
pub async fn resolve_icon(item: &BookmarkItem, caps: &Capabilities) -> Icon {
    let BookmarkKind::Url { url } = &item.kind else {
        return type_icon(item);
    };

    let (Some(loader), Some(domain)) = (caps.favicon_loader.as_ref(), url_domain(url)) else {
        return Icon::Globe;
    };

    match loader.load_icon(&domain, url).await {
        Some(favicon) => Icon::Favicon(favicon),
        None => Icon::Globe,
    }
}

/// Host part of a URL, if it parses and has one.
#[must_use]
pub fn url_domain(url: &str) -> Option<String> {
    url::Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
}

/// Label shown for an item. May be empty; callers skip the label then.
#[must_use]
pub fn display_name(item: &BookmarkItem, caps: &Capabilities) -> String {
    if let Some(title) = item.title() {
        return title.to_string();
    }

    match &item.kind {
        BookmarkKind::Folder { path } => path.clone(),
        BookmarkKind::File { path, .. } => caps
            .path_resolver
            .as_ref()
            .and_then(|resolver| resolver.resolve_basename(path))
            .unwrap_or_default(),
        BookmarkKind::Search { query } => query.clone(),
        BookmarkKind::Group { .. }
        | BookmarkKind::Graph
        | BookmarkKind::Url { .. }
        | BookmarkKind::Unknown => String::new(),
    }
}
