//! Mapping between sitemap roots and request selectors.
//!
//! A sitemap is addressed by a textual selector relative to a *top level*
//! sitemap root. The default sitemap of the root itself is plain
//! `sitemap`; named sitemaps use `<name>-sitemap`; sitemaps of nested
//! roots prefix the dash-joined subpath:
//!
//! ```text
//! /site/en            "default"  ->  sitemap
//! /site/en            "news"     ->  news-sitemap
//! /site/en/products   "default"  ->  products-sitemap
//! /site/en/products   "all"      ->  products-all-sitemap
//! ```
//!
//! The inverse mapping is ambiguous by design: `news-sitemap` can denote
//! both the default sitemap of a child root `news` and a sitemap named
//! `news` on the top level root. [`resolve_sitemap_roots`] returns every
//! candidate, shallowest first.

use crate::tree::TreeNode;

/// The name of the sitemap a root serves when no name is given.
pub const DEFAULT_NAME: &str = "default";

const SELECTOR: &str = "sitemap";

/// Whether the node is a sitemap root: flagged either on itself or on
/// its conventional content child.
pub fn is_sitemap_root<N: TreeNode>(node: &N) -> bool {
    node.is_flagged()
        || node
            .child(N::CONTENT_NODE)
            .is_some_and(|content| content.is_flagged())
}

/// Collapse a flagged content child to its parent "display" node.
///
/// Returns `None` when the node is not a sitemap root at all.
pub fn normalize_root<N: TreeNode>(node: N) -> Option<N> {
    if !is_sitemap_root(&node) {
        return None;
    }
    if node.name() == N::CONTENT_NODE {
        node.parent()
    } else {
        Some(node)
    }
}

/// The sitemap root closest to the tree root, starting from `node`.
///
/// Recomputed on every call; root identity is never cached.
pub fn top_level_root<N: TreeNode>(node: &N) -> N {
    let mut top = node.clone();
    let mut parent = node.parent();
    while let Some(candidate) = parent {
        if is_sitemap_root(&candidate) {
            top = candidate.clone();
        }
        parent = candidate.parent();
    }
    top
}

pub fn is_top_level_root<N: TreeNode>(node: &N) -> bool {
    is_sitemap_root(node) && top_level_root(node).path() == node.path()
}

/// Forward mapping: the selector addressing `name` on `root`, relative
/// to `top_level_root`.
pub fn sitemap_selector<N: TreeNode>(root: &N, top_level_root: &N, name: &str) -> String {
    let base = if name == DEFAULT_NAME {
        SELECTOR.to_string()
    } else {
        format!("{name}-{SELECTOR}")
    };

    if root.path() == top_level_root.path() {
        base
    } else {
        let subpath = &root.path()[top_level_root.path().len() + 1..];
        format!("{}-{base}", subpath.replace('/', "-"))
    }
}

/// Inverse mapping: all sitemap roots within `top_level_root` the given
/// selector may address, each mapped to the name that would reproduce
/// the selector (ignoring any multi-file index part).
///
/// Returns an empty vec when `top_level_root` is not a top level sitemap
/// root or the selector is invalid. The result preserves discovery
/// order, shallowest match first, and contains each root at most once.
pub fn resolve_sitemap_roots<N: TreeNode>(
    top_level_root: &N,
    selector: &str,
) -> Vec<(N, String)> {
    if !is_top_level_root(top_level_root) {
        // selectors are always relative to a top level sitemap root
        return Vec::new();
    }
    if selector == SELECTOR {
        return vec![(top_level_root.clone(), DEFAULT_NAME.to_string())];
    }

    let parts: Vec<&str> = selector.split('-').collect();
    let relevant: &[&str] = if parts.len() == 2 && parts[0] == SELECTOR && is_file_index(parts[1]) {
        // default name with file index
        return vec![(top_level_root.clone(), DEFAULT_NAME.to_string())];
    } else if parts.len() > 1 && parts[parts.len() - 1] == SELECTOR {
        // no file index part
        &parts[..parts.len() - 1]
    } else if parts.len() > 2
        && parts[parts.len() - 2] == SELECTOR
        && is_file_index(parts[parts.len() - 1])
    {
        // with file index part
        &parts[..parts.len() - 2]
    } else {
        return Vec::new();
    };

    let mut roots = Vec::new();
    descend(top_level_root, relevant, &mut roots);
    roots
}

/// All normalized sitemap roots strictly below `scope`.
pub fn find_sitemap_roots<N: TreeNode>(scope: &N) -> impl Iterator<Item = N> {
    let scope_path = scope.path().to_string();
    let mut seen: Vec<String> = Vec::new();
    scope.flagged_descendants().into_iter().filter_map(move |hit| {
        let root = normalize_root(hit)?;
        // skip a hit on the scope itself; its flagged content child is
        // in the result set when scope is a sitemap root
        if root.path() == scope_path || seen.iter().any(|p| p == root.path()) {
            return None;
        }
        seen.push(root.path().to_string());
        Some(root)
    })
}

/// Non-negative integer, digits only.
fn is_file_index(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) && text.parse::<u32>().is_ok()
}

fn descend<N: TreeNode>(node: &N, parts: &[&str], result: &mut Vec<(N, String)>) {
    if is_sitemap_root(node) {
        record(result, node.clone(), parts.join("-"));
    }
    for j in 1..=parts.len() {
        let child_name = parts[..j].join("-");
        let Some(child) = node.child(&child_name) else {
            continue;
        };
        if j == parts.len() {
            if is_sitemap_root(&child) {
                record(result, child, DEFAULT_NAME.to_string());
            }
        } else {
            descend(&child, &parts[j..], result);
        }
    }
}

/// First discovered wins: a root already present keeps its name.
fn record<N: TreeNode>(result: &mut Vec<(N, String)>, node: N, name: String) {
    if !result.iter().any(|(n, _)| n.path() == node.path()) {
        result.push((node, name));
    }
}
