//! Bookmark tree model shared by bcall components.
//!
//! The shapes mirror the host's `bookmarks.json`: a list of items tagged by a
//! `type` field, where groups nest further items. Everything here is plain data
//! and serializes back to the same layout.

use serde::{Deserialize, Deserializer, Serialize};

/// Deserialize a Vec that may be null or missing (both become empty vec)
fn deserialize_null_as_empty_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let opt: Option<Vec<T>> = Option::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

/// Deserialize a string that may be null or missing (both become empty string)
fn deserialize_null_as_empty_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

/// Two-character prefix marking a subpath as a block reference (`#^block-id`).
pub const BLOCK_REF_PREFIX: &str = "#^";

/// Envelope of the host's `bookmarks.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookmarksFile {
    #[serde(default, deserialize_with = "deserialize_null_as_empty_vec")]
    pub items: Vec<BookmarkItem>,
}

/// A node in the bookmark tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmarkItem {
    /// Creation time. Only used for sorting and as an identity disambiguator.
    #[serde(default)]
    pub ctime: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(flatten)]
    pub kind: BookmarkKind,
}

/// Variant payload of a bookmark, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BookmarkKind {
    Group {
        #[serde(default, deserialize_with = "deserialize_null_as_empty_vec")]
        items: Vec<BookmarkItem>,
    },
    Folder {
        #[serde(default, deserialize_with = "deserialize_null_as_empty_string")]
        path: String,
    },
    File {
        #[serde(default, deserialize_with = "deserialize_null_as_empty_string")]
        path: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        subpath: Option<String>,
    },
    Search {
        #[serde(default, deserialize_with = "deserialize_null_as_empty_string")]
        query: String,
    },
    Graph,
    Url {
        #[serde(default, deserialize_with = "deserialize_null_as_empty_string")]
        url: String,
    },
    /// Any `type` this version does not know about. Rendered, never activated.
    #[serde(other)]
    Unknown,
}

/// Discriminant of [`BookmarkKind`], handy for logging and capability checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookmarkType {
    Group,
    Folder,
    File,
    Search,
    Graph,
    Url,
    Unknown,
}

impl BookmarkType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            BookmarkType::Group => "group",
            BookmarkType::Folder => "folder",
            BookmarkType::File => "file",
            BookmarkType::Search => "search",
            BookmarkType::Graph => "graph",
            BookmarkType::Url => "url",
            BookmarkType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for BookmarkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl BookmarkItem {
    #[must_use]
    pub fn new(ctime: i64, title: Option<&str>, kind: BookmarkKind) -> Self {
        Self {
            ctime,
            title: title.map(String::from),
            kind,
        }
    }

    #[must_use]
    pub fn group(ctime: i64, title: &str, items: Vec<BookmarkItem>) -> Self {
        Self::new(ctime, Some(title), BookmarkKind::Group { items })
    }

    #[must_use]
    pub fn file(ctime: i64, path: &str) -> Self {
        Self::new(
            ctime,
            None,
            BookmarkKind::File {
                path: path.to_string(),
                subpath: None,
            },
        )
    }

    #[must_use]
    pub fn folder(ctime: i64, path: &str) -> Self {
        Self::new(
            ctime,
            None,
            BookmarkKind::Folder {
                path: path.to_string(),
            },
        )
    }

    #[must_use]
    pub fn search(ctime: i64, query: &str) -> Self {
        Self::new(
            ctime,
            None,
            BookmarkKind::Search {
                query: query.to_string(),
            },
        )
    }

    #[must_use]
    pub fn url(ctime: i64, title: Option<&str>, url: &str) -> Self {
        Self::new(
            ctime,
            title,
            BookmarkKind::Url {
                url: url.to_string(),
            },
        )
    }

    /// Builder-style title override.
    #[must_use]
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Builder-style subpath for file bookmarks. Other kinds are returned unchanged.
    #[must_use]
    pub fn with_subpath(mut self, anchor: &str) -> Self {
        if let BookmarkKind::File { subpath, .. } = &mut self.kind {
            *subpath = Some(anchor.to_string());
        }
        self
    }

    #[must_use]
    pub fn item_type(&self) -> BookmarkType {
        match self.kind {
            BookmarkKind::Group { .. } => BookmarkType::Group,
            BookmarkKind::Folder { .. } => BookmarkType::Folder,
            BookmarkKind::File { .. } => BookmarkType::File,
            BookmarkKind::Search { .. } => BookmarkType::Search,
            BookmarkKind::Graph => BookmarkType::Graph,
            BookmarkKind::Url { .. } => BookmarkType::Url,
            BookmarkKind::Unknown => BookmarkType::Unknown,
        }
    }

    #[must_use]
    pub fn is_group(&self) -> bool {
        matches!(self.kind, BookmarkKind::Group { .. })
    }

    /// Children of a group; empty for every other kind.
    #[must_use]
    pub fn children(&self) -> &[BookmarkItem] {
        match &self.kind {
            BookmarkKind::Group { items } => items,
            _ => &[],
        }
    }

    /// Vault-relative path of folder and file bookmarks.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match &self.kind {
            BookmarkKind::Folder { path } | BookmarkKind::File { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Title if set and non-empty.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }

    /// Weak identity used for UI bookkeeping: `(title ?? path) + "_" + ctime`.
    ///
    /// Two siblings with the same title/path and creation time collide.
    #[must_use]
    pub fn identity_key(&self) -> String {
        let prefix = self
            .title
            .as_deref()
            .or_else(|| self.path())
            .unwrap_or_default();
        format!("{prefix}_{}", self.ctime)
    }

    /// Number of file bookmarks reachable from this item.
    ///
    /// With `recursive` false only a direct file counts; groups contribute nothing.
    #[must_use]
    pub fn count_files(&self, recursive: bool) -> usize {
        match &self.kind {
            BookmarkKind::File { .. } => 1,
            BookmarkKind::Group { items } if recursive => {
                items.iter().map(|child| child.count_files(true)).sum()
            }
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"{
        "items": [
            {"type": "file", "ctime": 1, "path": "notes/today.md"},
            {"type": "file", "ctime": 2, "path": "notes/today.md", "subpath": "#^abc123", "title": "Block"},
            {"type": "group", "ctime": 3, "title": "Work", "items": [
                {"type": "folder", "ctime": 4, "path": "projects"},
                {"type": "search", "ctime": 5, "query": "tag:#todo"}
            ]},
            {"type": "graph", "ctime": 6, "title": "Local graph"},
            {"type": "url", "ctime": 7, "url": "https://example.com/docs"},
            {"type": "canvas-thing", "ctime": 8, "title": "From the future"}
        ]
    }"##;

    #[test]
    fn test_parse_bookmarks_file() {
        let file: BookmarksFile = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(file.items.len(), 6);
        assert_eq!(file.items[0].item_type(), BookmarkType::File);
        assert_eq!(file.items[2].children().len(), 2);
        assert_eq!(file.items[3].item_type(), BookmarkType::Graph);
        assert_eq!(file.items[4].item_type(), BookmarkType::Url);
        assert_eq!(file.items[5].item_type(), BookmarkType::Unknown);
    }

    #[test]
    fn test_parse_subpath() {
        let file: BookmarksFile = serde_json::from_str(SAMPLE).unwrap();
        match &file.items[1].kind {
            BookmarkKind::File { subpath, .. } => assert_eq!(subpath.as_deref(), Some("#^abc123")),
            other => panic!("expected file, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_fields_are_empty() {
        let item: BookmarkItem = serde_json::from_str(r#"{"type": "group"}"#).unwrap();
        assert_eq!(item.ctime, 0);
        assert!(item.title.is_none());
        assert!(item.children().is_empty());

        let item: BookmarkItem =
            serde_json::from_str(r#"{"type": "file", "ctime": 9, "path": null}"#).unwrap();
        assert_eq!(item.path(), Some(""));
    }

    #[test]
    fn test_null_group_items() {
        let item: BookmarkItem =
            serde_json::from_str(r#"{"type": "group", "ctime": 1, "items": null}"#).unwrap();
        assert!(item.is_group());
        assert!(item.children().is_empty());
    }

    #[test]
    fn test_missing_items_in_envelope() {
        let file: BookmarksFile = serde_json::from_str("{}").unwrap();
        assert!(file.items.is_empty());
    }

    #[test]
    fn test_serialize_keeps_type_tag() {
        let item = BookmarkItem::file(10, "a.md").with_subpath("#Heading");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "file");
        assert_eq!(json["path"], "a.md");
        assert_eq!(json["subpath"], "#Heading");
        assert_eq!(json["ctime"], 10);
        assert!(json.get("title").is_none());
    }

    #[test]
    fn test_identity_key_prefers_title() {
        let item = BookmarkItem::file(42, "a.md").with_title("Alpha");
        assert_eq!(item.identity_key(), "Alpha_42");
    }

    #[test]
    fn test_identity_key_falls_back_to_path() {
        let item = BookmarkItem::folder(7, "projects/rust");
        assert_eq!(item.identity_key(), "projects/rust_7");
    }

    #[test]
    fn test_identity_key_without_title_or_path() {
        let item = BookmarkItem::new(3, None, BookmarkKind::Graph);
        assert_eq!(item.identity_key(), "_3");
    }

    #[test]
    fn test_identity_key_collision_is_possible() {
        let a = BookmarkItem::file(1, "same.md");
        let b = BookmarkItem::file(1, "same.md");
        assert_eq!(a.identity_key(), b.identity_key());
    }

    #[test]
    fn test_empty_title_is_treated_as_none() {
        let item = BookmarkItem::file(1, "a.md").with_title("");
        assert!(item.title().is_none());
    }

    #[test]
    fn test_with_subpath_ignored_for_non_file() {
        let item = BookmarkItem::folder(1, "dir").with_subpath("#x");
        assert_eq!(item.kind, BookmarkKind::Folder { path: "dir".into() });
    }

    #[test]
    fn test_count_files() {
        let tree = BookmarkItem::group(
            1,
            "g",
            vec![
                BookmarkItem::file(2, "a.md"),
                BookmarkItem::group(3, "inner", vec![BookmarkItem::file(4, "b.md")]),
                BookmarkItem::url(5, None, "https://example.com"),
            ],
        );
        assert_eq!(tree.count_files(true), 2);
        assert_eq!(tree.count_files(false), 0);
        assert_eq!(BookmarkItem::file(1, "x.md").count_files(false), 1);
    }

    #[test]
    fn test_type_display() {
        assert_eq!(BookmarkType::Group.to_string(), "group");
        assert_eq!(BookmarkType::Unknown.as_str(), "unknown");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn leaf() -> impl Strategy<Value = BookmarkItem> {
            prop_oneof![
                (any::<i64>(), "[a-z]{1,8}").prop_map(|(t, p)| BookmarkItem::file(t, &p)),
                (any::<i64>(), "[a-z]{1,8}").prop_map(|(t, p)| BookmarkItem::folder(t, &p)),
                (any::<i64>(), "[a-z ]{0,8}").prop_map(|(t, q)| BookmarkItem::search(t, &q)),
            ]
        }

        fn tree() -> impl Strategy<Value = BookmarkItem> {
            leaf().prop_recursive(3, 24, 4, |inner| {
                (any::<i64>(), prop::collection::vec(inner, 0..4))
                    .prop_map(|(t, items)| BookmarkItem::group(t, "g", items))
            })
        }

        proptest! {
            #[test]
            fn serde_preserves_tree(item in tree()) {
                let json = serde_json::to_string(&item).unwrap();
                let back: BookmarkItem = serde_json::from_str(&json).unwrap();
                prop_assert_eq!(back, item);
            }
        }
    }
}
