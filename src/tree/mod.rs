//! Content-tree collaborator boundary.
//!
//! Sitemap roots live inside a hierarchically organized content tree that
//! is owned by the embedding application. This crate only ever needs
//! parent/child navigation, a per-node root flag and a subtree query, so
//! that surface is a trait and nothing more.

pub mod memory;

pub use memory::{MemoryNode, MemoryTree};

/// A node handle into the external content tree.
///
/// Handles are expected to be cheap to clone; resolution walks the tree
/// freely and holds several handles at once. Node identity is the path.
pub trait TreeNode: Sized + Clone {
    /// Name of the conventional child node the sitemap-root flag may be
    /// stored on instead of the node itself.
    const CONTENT_NODE: &'static str = "content";

    /// Absolute path of this node, `/`-separated, no trailing slash.
    fn path(&self) -> &str;

    fn parent(&self) -> Option<Self>;

    fn child(&self, name: &str) -> Option<Self>;

    /// Whether the sitemap-root flag is stored on this very node.
    ///
    /// Callers interested in "is this a sitemap root" semantics should
    /// use [`crate::selector::is_sitemap_root`], which also consults the
    /// conventional content child.
    fn is_flagged(&self) -> bool;

    /// All nodes strictly below this one that carry the sitemap-root
    /// flag, in document order. This is the subtree query the embedding
    /// application is expected to answer efficiently.
    fn flagged_descendants(&self) -> Vec<Self>;

    /// Last segment of the path.
    fn name(&self) -> &str {
        self.path().rsplit('/').next().unwrap_or("")
    }
}
