//! In-memory content tree.
//!
//! A minimal [`TreeNode`] implementation backed by a path map. Used by
//! this crate's tests and useful for embedders that do not have a real
//! content repository behind their sitemaps.

use crate::tree::TreeNode;
use std::collections::BTreeMap;

/// An in-memory content tree keyed by absolute path.
#[derive(Debug, Default)]
pub struct MemoryTree {
    // path -> carries the sitemap-root flag
    nodes: BTreeMap<String, bool>,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a plain node, creating missing ancestors.
    pub fn add(&mut self, path: &str) -> &mut Self {
        self.insert(path, false);
        self
    }

    /// Insert a node carrying the sitemap-root flag on itself.
    pub fn add_flagged(&mut self, path: &str) -> &mut Self {
        self.insert(path, true);
        self
    }

    /// Insert a node whose sitemap-root flag lives on its conventional
    /// content child, the way content authoring tools usually store it.
    pub fn add_content_flagged(&mut self, path: &str) -> &mut Self {
        self.insert(path, false);
        self.insert(&format!("{path}/{}", MemoryNode::CONTENT_NODE), true);
        self
    }

    pub fn node(&self, path: &str) -> Option<MemoryNode<'_>> {
        self.nodes.contains_key(path).then(|| MemoryNode {
            tree: self,
            path: path.to_string(),
        })
    }

    fn insert(&mut self, path: &str, flagged: bool) {
        debug_assert!(path.starts_with('/') && !path.ends_with('/'));
        // Create missing ancestors as plain nodes.
        let mut end = 0;
        while let Some(next) = path[end + 1..].find('/') {
            end += next + 1;
            self.nodes.entry(path[..end].to_string()).or_insert(false);
        }
        *self.nodes.entry(path.to_string()).or_insert(false) |= flagged;
    }
}

/// A node handle into a [`MemoryTree`].
#[derive(Debug, Clone)]
pub struct MemoryNode<'t> {
    tree: &'t MemoryTree,
    path: String,
}

impl TreeNode for MemoryNode<'_> {
    fn path(&self) -> &str {
        &self.path
    }

    fn parent(&self) -> Option<Self> {
        let (parent, _) = self.path.rsplit_once('/')?;
        if parent.is_empty() {
            return None;
        }
        self.tree.node(parent)
    }

    fn child(&self, name: &str) -> Option<Self> {
        self.tree.node(&format!("{}/{name}", self.path))
    }

    fn is_flagged(&self) -> bool {
        self.tree.nodes.get(&self.path).copied().unwrap_or(false)
    }

    fn flagged_descendants(&self) -> Vec<Self> {
        let prefix = format!("{}/", self.path);
        self.tree
            .nodes
            .range(prefix.clone()..)
            .take_while(|(path, _)| path.starts_with(&prefix))
            .filter(|(_, flagged)| **flagged)
            .map(|(path, _)| MemoryNode {
                tree: self.tree,
                path: path.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ancestors_created_implicitly() {
        let mut tree = MemoryTree::new();
        tree.add("/site/en/news");
        assert!(tree.node("/site").is_some());
        assert!(tree.node("/site/en").is_some());
        assert!(tree.node("/site/en/news").is_some());
        assert!(tree.node("/other").is_none());
    }

    #[test]
    fn test_navigation() {
        let mut tree = MemoryTree::new();
        tree.add("/site/en/news");
        let news = tree.node("/site/en/news").unwrap();
        assert_eq!(news.name(), "news");
        assert_eq!(news.parent().unwrap().path(), "/site/en");
        assert_eq!(
            tree.node("/site/en").unwrap().child("news").unwrap().path(),
            "/site/en/news"
        );
        assert!(tree.node("/site").unwrap().parent().is_none());
    }

    #[test]
    fn test_flag_on_node_and_content_child() {
        let mut tree = MemoryTree::new();
        tree.add_flagged("/site/en");
        tree.add_content_flagged("/site/de");
        assert!(tree.node("/site/en").unwrap().is_flagged());
        assert!(!tree.node("/site/de").unwrap().is_flagged());
        assert!(tree.node("/site/de/content").unwrap().is_flagged());
    }

    #[test]
    fn test_flagged_descendants_excludes_self() {
        let mut tree = MemoryTree::new();
        tree.add_flagged("/site/en");
        tree.add_flagged("/site/en/news");
        tree.add_flagged("/site/en/products/tops");
        let en = tree.node("/site/en").unwrap();
        let paths: Vec<_> = en
            .flagged_descendants()
            .iter()
            .map(|n| n.path().to_string())
            .collect();
        assert_eq!(paths, vec!["/site/en/news", "/site/en/products/tops"]);
    }
}
