use bcall_types::BookmarkItem;
use std::sync::Arc;

#[derive(Debug)]
struct Frame {
    layer: Arc<[BookmarkItem]>,
    parent: Option<Arc<Frame>>,
    depth: usize,
}

/// Stack of layers from the root down to the one being browsed.
///
/// Persistent: `pushed` and `popped` return new stacks that share their
/// common frames, so every navigator instance owns its own value and no
/// instance can change another's view of the path.
#[derive(Debug, Clone)]
pub struct LayerStack {
    top: Arc<Frame>,
}

impl LayerStack {
    #[must_use]
    pub fn root(items: Arc<[BookmarkItem]>) -> Self {
        Self {
            top: Arc::new(Frame {
                layer: items,
                parent: None,
                depth: 1,
            }),
        }
    }

    /// Layer currently browsed.
    #[must_use]
    pub fn top(&self) -> &Arc<[BookmarkItem]> {
        &self.top.layer
    }

    /// Number of layers, root included.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.top.depth
    }

    /// The root layer is never popped.
    #[must_use]
    pub fn can_pop(&self) -> bool {
        self.top.parent.is_some()
    }

    #[must_use]
    pub fn pushed(&self, layer: Arc<[BookmarkItem]>) -> Self {
        Self {
            top: Arc::new(Frame {
                layer,
                parent: Some(Arc::clone(&self.top)),
                depth: self.top.depth + 1,
            }),
        }
    }

    /// Stack without its top layer, or `None` at the root.
    #[must_use]
    pub fn popped(&self) -> Option<Self> {
        self.top
            .parent
            .as_ref()
            .map(|parent| Self {
                top: Arc::clone(parent),
            })
    }
}
