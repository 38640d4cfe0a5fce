//! Snapshot of the host's bookmarks file.

use crate::capability::BookmarkRegistry;
use crate::{Error, Result};
use bcall_types::{BookmarkItem, BookmarksFile};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Bookmark tree read once at session start.
#[derive(Debug, Clone, Default)]
pub struct BookmarkStore {
    path: Option<PathBuf>,
    root: Arc<[BookmarkItem]>,
    /// `items` exactly as the host wrote them, unknown types and fields included.
    raw_items: Option<Value>,
}

impl BookmarkStore {
    /// Read `bookmarks.json`.
    ///
    /// # Errors
    ///
    /// [`Error::BookmarksUnavailable`] if the file does not exist, otherwise
    /// I/O or JSON errors.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::BookmarksUnavailable(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&content)?;
        let raw_items = value.get("items").cloned().unwrap_or_else(|| json!([]));
        let file: BookmarksFile = serde_json::from_value(value)?;
        info!(
            "Loaded {} bookmarks from {}",
            file.items.len(),
            path.display()
        );

        Ok(Self {
            path: Some(path.to_path_buf()),
            root: file.items.into(),
            raw_items: Some(raw_items),
        })
    }

    /// In-memory store, not backed by a file.
    #[must_use]
    pub fn from_items(items: Vec<BookmarkItem>) -> Self {
        Self {
            path: None,
            root: items.into(),
            raw_items: None,
        }
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Root layer, shared with navigators without copying.
    #[must_use]
    pub fn root(&self) -> Arc<[BookmarkItem]> {
        Arc::clone(&self.root)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// The tree in the host's file layout. A loaded store reproduces the
    /// host's items untouched; an in-memory one serializes the model.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        if let Some(items) = &self.raw_items {
            return Ok(serde_json::to_string_pretty(&json!({ "items": items }))?);
        }
        let file = BookmarksFile {
            items: self.root.to_vec(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    fn contains(&self, target: &BookmarkItem) -> bool {
        let mut stack = vec![self.root.iter()];
        while let Some(level) = stack.last_mut() {
            let Some(item) = level.next() else {
                stack.pop();
                continue;
            };
            if item == target {
                return true;
            }
            stack.push(item.children().iter());
        }
        false
    }
}

impl BookmarkRegistry for BookmarkStore {
    fn items(&self) -> Vec<BookmarkItem> {
        self.root.to_vec()
    }

    fn bookmark_id(&self, item: &BookmarkItem) -> Option<String> {
        if self.contains(item) {
            Some(item.identity_key())
        } else {
            debug!("Bookmark {} not in store", item.identity_key());
            None
        }
    }
}
