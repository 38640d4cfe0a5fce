//! Open dispatch: one action per bookmark variant, plus bulk "open all".

use crate::capability::Capabilities;
use bcall_types::{BookmarkItem, BookmarkKind};
use tracing::{debug, info, warn};

/// What the navigator should do after an item was activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// The item is a group; the navigator descends into it.
    EnterGroup,
    /// The item was handed to the host; the picker closes.
    Close,
    /// The item is read-only here. Nothing happened and the picker stays.
    Rejected,
}

/// Parameters of an open-all traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenAllOptions {
    /// Descend into groups. Without it only the layer's own files are opened.
    pub recursive: bool,
    /// Outermost call: bracket the burst with the placeholder pane.
    pub top_level: bool,
}

impl OpenAllOptions {
    #[must_use]
    pub fn top_level(recursive: bool) -> Self {
        Self {
            recursive,
            top_level: true,
        }
    }
}

/// One step of an open-all plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenTarget {
    File {
        path: String,
        subpath: Option<String>,
    },
    Url(String),
}

/// Tally of an open-all run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenAllReport {
    pub files: usize,
    pub urls: usize,
    /// Targets skipped because they no longer resolve or their capability is absent.
    pub skipped: usize,
    /// Targets the host reported an error for.
    pub failed: usize,
}

/// Depth-first, left-to-right list of everything open-all would open.
///
/// Non-recursive plans contain only the files of `items` itself. Recursive
/// plans descend into groups and include URLs.
#[must_use]
pub fn collect_open_targets(items: &[BookmarkItem], recursive: bool) -> Vec<OpenTarget> {
    let mut targets = Vec::new();
    let mut stack = vec![items.iter()];

    while let Some(level) = stack.last_mut() {
        let Some(item) = level.next() else {
            stack.pop();
            continue;
        };

        match &item.kind {
            BookmarkKind::File { path, subpath } => targets.push(OpenTarget::File {
                path: path.clone(),
                subpath: subpath.clone(),
            }),
            BookmarkKind::Group { items } if recursive => stack.push(items.iter()),
            BookmarkKind::Url { url } if recursive => targets.push(OpenTarget::Url(url.clone())),
            _ => {}
        }
    }

    targets
}

/// Dispatches bookmark activations to the injected host capabilities.
#[derive(Debug, Clone, Default)]
pub struct OpenService {
    caps: Capabilities,
}

impl OpenService {
    #[must_use]
    pub fn new(caps: Capabilities) -> Self {
        debug!("Open service capabilities: {:?}", caps.present());
        Self { caps }
    }

    #[must_use]
    pub fn capabilities(&self) -> &Capabilities {
        &self.caps
    }

    /// Whether activating `item` can do anything. Others are shown read-only.
    #[must_use]
    pub fn is_activatable(&self, item: &BookmarkItem) -> bool {
        let caps = &self.caps;
        match item.kind {
            BookmarkKind::Group { .. } => true,
            BookmarkKind::File { .. } => caps.file_opener.is_some(),
            BookmarkKind::Folder { .. } => caps.folder_revealer.is_some(),
            BookmarkKind::Search { .. } => caps.search_runner.is_some(),
            BookmarkKind::Graph => caps.graph_activator.is_some() && caps.registry.is_some(),
            BookmarkKind::Url { .. } => caps.url_opener.is_some(),
            BookmarkKind::Unknown => false,
        }
    }

    /// Activate a single bookmark.
    pub async fn open_bookmark(&self, item: &BookmarkItem) -> OpenOutcome {
        if item.is_group() {
            return OpenOutcome::EnterGroup;
        }
        if !self.is_activatable(item) {
            debug!(
                "Ignoring activation of read-only {} bookmark {}",
                item.item_type(),
                item.identity_key()
            );
            return OpenOutcome::Rejected;
        }

        let caps = &self.caps;
        match &item.kind {
            BookmarkKind::File { path, subpath } => {
                if self.resolves(path) {
                    self.open_file(path, subpath.as_deref()).await;
                } else {
                    warn!("Bookmarked file no longer exists: {path}");
                }
            }
            BookmarkKind::Folder { path } => {
                if let Some(revealer) = &caps.folder_revealer
                    && let Err(e) = revealer.reveal_folder(path)
                {
                    warn!("Failed to reveal folder {path}: {e}");
                }
            }
            BookmarkKind::Search { query } => {
                if let Some(runner) = &caps.search_runner
                    && let Err(e) = runner.run_search(query)
                {
                    warn!("Failed to run search {query:?}: {e}");
                }
            }
            BookmarkKind::Graph => self.open_graph(item).await,
            BookmarkKind::Url { url } => {
                self.open_url(url);
            }
            BookmarkKind::Group { .. } | BookmarkKind::Unknown => {}
        }

        OpenOutcome::Close
    }

    /// Open every file (and, when recursive, every nested file and URL) under `items`.
    ///
    /// Files are opened one after another, each awaited, so panes appear in
    /// tree order. There is no cancellation: once started the plan runs to the end.
    pub async fn open_all(&self, items: &[BookmarkItem], options: OpenAllOptions) -> OpenAllReport {
        let targets = collect_open_targets(items, options.recursive);
        let mut report = OpenAllReport::default();

        let placeholder = if options.top_level {
            self.caps.placeholder.clone()
        } else {
            None
        };
        if let Some(pane) = &placeholder
            && let Err(e) = pane.show().await
        {
            warn!("Failed to show placeholder pane: {e}");
        }

        for target in targets {
            match target {
                OpenTarget::File { path, subpath } => {
                    if self.caps.file_opener.is_none() || !self.resolves(&path) {
                        debug!("Skipping unresolved file {path}");
                        report.skipped += 1;
                    } else if self.open_file(&path, subpath.as_deref()).await {
                        report.files += 1;
                    } else {
                        report.failed += 1;
                    }
                }
                OpenTarget::Url(url) => {
                    if self.caps.url_opener.is_none() {
                        report.skipped += 1;
                    } else if self.open_url(&url) {
                        report.urls += 1;
                    } else {
                        report.failed += 1;
                    }
                }
            }
        }

        if let Some(pane) = placeholder {
            pane.dismiss();
        }

        info!(
            "Open all: {} files, {} urls, {} skipped, {} failed",
            report.files, report.urls, report.skipped, report.failed
        );
        report
    }

    /// A path counts as resolved unless a resolver is present and disagrees.
    fn resolves(&self, path: &str) -> bool {
        self.caps
            .path_resolver
            .as_ref()
            .is_none_or(|resolver| resolver.resolve_basename(path).is_some())
    }

    async fn open_file(&self, path: &str, subpath: Option<&str>) -> bool {
        let Some(opener) = &self.caps.file_opener else {
            return false;
        };
        match opener.open_file(path, subpath).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to open {path}: {e}");
                false
            }
        }
    }

    fn open_url(&self, url: &str) -> bool {
        let Some(opener) = &self.caps.url_opener else {
            return false;
        };
        match opener.open_url(url, self.caps.prefer_in_app_urls) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to open {url}: {e}");
                false
            }
        }
    }

    async fn open_graph(&self, item: &BookmarkItem) {
        let (Some(graph), Some(registry)) = (&self.caps.graph_activator, &self.caps.registry)
        else {
            return;
        };
        let Some(id) = registry.bookmark_id(item) else {
            warn!("Bookmark registry does not know {}", item.identity_key());
            return;
        };
        if let Err(e) = graph.activate_scoped_graph(&id).await {
            warn!("Failed to activate graph view for {id}: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Vec<BookmarkItem> {
        vec![
            BookmarkItem::file(1, "a.md"),
            BookmarkItem::group(
                2,
                "g",
                vec![
                    BookmarkItem::file(3, "b.md").with_subpath("#Top"),
                    BookmarkItem::url(4, None, "https://example.com"),
                    BookmarkItem::group(5, "inner", vec![BookmarkItem::file(6, "c.md")]),
                ],
            ),
            BookmarkItem::folder(7, "dir"),
            BookmarkItem::url(8, None, "https://rust-lang.org"),
            BookmarkItem::file(9, "d.md"),
        ]
    }

    fn file(path: &str, subpath: Option<&str>) -> OpenTarget {
        OpenTarget::File {
            path: path.to_string(),
            subpath: subpath.map(String::from),
        }
    }

    #[test]
    fn test_collect_recursive_order() {
        let targets = collect_open_targets(&tree(), true);
        assert_eq!(
            targets,
            vec![
                file("a.md", None),
                file("b.md", Some("#Top")),
                OpenTarget::Url("https://example.com".into()),
                file("c.md", None),
                OpenTarget::Url("https://rust-lang.org".into()),
                file("d.md", None),
            ]
        );
    }

    #[test]
    fn test_collect_non_recursive_files_only() {
        let targets = collect_open_targets(&tree(), false);
        assert_eq!(targets, vec![file("a.md", None), file("d.md", None)]);
    }

    #[test]
    fn test_collect_empty() {
        assert!(collect_open_targets(&[], true).is_empty());
        let empty_group = vec![BookmarkItem::group(1, "g", vec![])];
        assert!(collect_open_targets(&empty_group, true).is_empty());
    }

    #[test]
    fn test_read_only_without_capabilities() {
        let service = OpenService::default();
        assert!(service.is_activatable(&BookmarkItem::group(1, "g", vec![])));
        assert!(!service.is_activatable(&BookmarkItem::file(1, "a.md")));
        assert!(!service.is_activatable(&BookmarkItem::new(1, None, BookmarkKind::Unknown)));
    }

    #[tokio::test]
    async fn test_group_enters_without_capabilities() {
        let service = OpenService::default();
        let group = BookmarkItem::group(1, "g", vec![]);
        assert_eq!(service.open_bookmark(&group).await, OpenOutcome::EnterGroup);
    }

    #[tokio::test]
    async fn test_absent_capability_rejects() {
        let service = OpenService::default();
        let search = BookmarkItem::search(1, "q");
        assert_eq!(service.open_bookmark(&search).await, OpenOutcome::Rejected);
    }

    #[tokio::test]
    async fn test_open_all_without_capabilities_skips() {
        let report = OpenService::default()
            .open_all(&tree(), OpenAllOptions::top_level(true))
            .await;
        assert_eq!(report.files, 0);
        assert_eq!(report.skipped, 6);
    }
}
