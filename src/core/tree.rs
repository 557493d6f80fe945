//! core::tree
//!
//! The domain taxonomy: root domains plus child lists keyed by parent path.
//!
//! # Representation
//!
//! The tree is flat rather than nested. `items` holds the root domains in
//! insertion order, and `children` maps the [`PathKey`] of a parent path to
//! its children in insertion order. A child list exists only once something
//! has been added under that parent.
//!
//! # Invariants
//!
//! - No duplicate siblings in `items` or in any single child list
//! - Operations here never create a child list under an unreachable parent
//!   when driven through the state machine; keys that are unreachable
//!   (orphans) may still arrive from persisted data and are kept as-is
//!
//! All operations take `self` by value and return the next tree, so a
//! snapshot holding the previous tree is never affected.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::codec::{encode, PathKey};
use crate::core::types::{DomainName, DomainPath};

/// Minimum number of root domains for a meaningful taxonomy.
pub const MIN_ROOT_DOMAINS: usize = 3;

/// Errors from tree operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    /// Fewer than [`MIN_ROOT_DOMAINS`] distinct root domains were supplied.
    #[error("invalid setup: at least {MIN_ROOT_DOMAINS} distinct domains are required, got {0}")]
    InvalidSetup(usize),
}

/// The domain taxonomy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DomainTree {
    /// Root domains in insertion order.
    pub items: Vec<DomainName>,
    /// Child domains keyed by the encoded parent path.
    pub children: BTreeMap<PathKey, Vec<DomainName>>,
}

impl DomainTree {
    /// An empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a root domain. No-op if it is already a root.
    pub fn add_root_domain(mut self, name: DomainName) -> Self {
        if !self.items.contains(&name) {
            self.items.push(name);
        }
        self
    }

    /// Append `name` under `parent`. No-op if it is already a child there.
    ///
    /// Performs no depth or reachability check; the state machine does that
    /// before calling.
    pub fn add_subdomain(mut self, parent: &DomainPath, name: DomainName) -> Self {
        let siblings = self.children.entry(encode(parent)).or_default();
        if !siblings.contains(&name) {
            siblings.push(name);
        }
        self
    }

    /// Domains directly below `path`.
    ///
    /// Returns the root domains for the root path and an empty slice for a
    /// path with no children.
    pub fn children_of(&self, path: &DomainPath) -> &[DomainName] {
        if path.is_root() {
            &self.items
        } else {
            self.children
                .get(&encode(path))
                .map(Vec::as_slice)
                .unwrap_or(&[])
        }
    }

    /// Replace the root domains wholesale.
    ///
    /// Duplicate names collapse to their first occurrence before the count
    /// check. Existing child lists are left alone.
    ///
    /// # Errors
    ///
    /// Returns `TreeError::InvalidSetup` if fewer than
    /// [`MIN_ROOT_DOMAINS`] distinct names remain.
    pub fn replace_roots(mut self, names: Vec<DomainName>) -> Result<Self, TreeError> {
        let names = dedup_preserving_order(names);
        if names.len() < MIN_ROOT_DOMAINS {
            return Err(TreeError::InvalidSetup(names.len()));
        }
        self.items = names;
        Ok(self)
    }

    /// Whether every prefix of `path` is reachable from the root.
    ///
    /// The root path is always reachable.
    pub fn contains_path(&self, path: &DomainPath) -> bool {
        let mut current = DomainPath::root();
        for segment in path.segments() {
            if !self.children_of(&current).contains(segment) {
                return false;
            }
            current = current.child(segment.clone());
        }
        true
    }

    /// Child-list keys whose parent path is not reachable from the root.
    ///
    /// Keys that fail to decode are reported too.
    pub fn orphan_keys(&self) -> Vec<&PathKey> {
        self.children
            .keys()
            .filter(|key| match key.to_path() {
                Ok(path) => path.is_root() || !self.contains_path(&path),
                Err(_) => true,
            })
            .collect()
    }

    /// Number of domains reachable from the root, roots included.
    pub fn reachable_count(&self) -> usize {
        fn walk(tree: &DomainTree, path: &DomainPath) -> usize {
            tree.children_of(path)
                .iter()
                .map(|name| 1 + walk(tree, &path.child(name.clone())))
                .sum()
        }
        walk(self, &DomainPath::root())
    }

    /// Drop duplicate siblings, keeping the first occurrence.
    ///
    /// Used on trees read from persisted data.
    pub fn normalized(self) -> Self {
        Self {
            items: dedup_preserving_order(self.items),
            children: self
                .children
                .into_iter()
                .map(|(key, names)| (key, dedup_preserving_order(names)))
                .collect(),
        }
    }
}

fn dedup_preserving_order(names: Vec<DomainName>) -> Vec<DomainName> {
    let mut out: Vec<DomainName> = Vec::with_capacity(names.len());
    for name in names {
        if !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> DomainName {
        DomainName::new(s).unwrap()
    }

    fn path(segments: &[&str]) -> DomainPath {
        DomainPath::parse_segments(segments.iter().copied()).unwrap()
    }

    fn names(list: &[&str]) -> Vec<DomainName> {
        list.iter().map(|s| name(s)).collect()
    }

    #[test]
    fn add_root_appends_in_order() {
        let tree = DomainTree::new()
            .add_root_domain(name("B"))
            .add_root_domain(name("A"));
        assert_eq!(tree.items, names(&["B", "A"]));
    }

    #[test]
    fn add_root_is_idempotent() {
        let tree = DomainTree::new().add_root_domain(name("A"));
        let again = tree.clone().add_root_domain(name("A"));
        assert_eq!(tree, again);
    }

    #[test]
    fn add_subdomain_creates_list() {
        let tree = DomainTree::new()
            .add_root_domain(name("A"))
            .add_subdomain(&path(&["A"]), name("A1"));
        assert_eq!(tree.children_of(&path(&["A"])), names(&["A1"]).as_slice());
    }

    #[test]
    fn add_subdomain_twice_equals_once() {
        let base = DomainTree::new().add_root_domain(name("A"));
        let once = base.clone().add_subdomain(&path(&["A"]), name("X"));
        let twice = once.clone().add_subdomain(&path(&["A"]), name("X"));
        assert_eq!(once, twice);
    }

    #[test]
    fn same_name_under_different_parents() {
        let tree = DomainTree::new()
            .add_root_domain(name("A"))
            .add_root_domain(name("B"))
            .add_subdomain(&path(&["A"]), name("Shared"))
            .add_subdomain(&path(&["B"]), name("Shared"));
        assert_eq!(tree.children_of(&path(&["A"])), names(&["Shared"]).as_slice());
        assert_eq!(tree.children_of(&path(&["B"])), names(&["Shared"]).as_slice());
    }

    #[test]
    fn children_of_root_is_items() {
        let tree = DomainTree::new().add_root_domain(name("A"));
        assert_eq!(tree.children_of(&DomainPath::root()), names(&["A"]).as_slice());
    }

    #[test]
    fn children_of_unknown_is_empty() {
        let tree = DomainTree::new();
        assert!(tree.children_of(&path(&["nope"])).is_empty());
    }

    #[test]
    fn replace_roots_requires_three() {
        let tree = DomainTree::new();
        assert_eq!(
            tree.clone().replace_roots(names(&["A", "B"])),
            Err(TreeError::InvalidSetup(2))
        );
        let tree = tree.replace_roots(names(&["A", "B", "C"])).unwrap();
        assert_eq!(tree.items, names(&["A", "B", "C"]));
    }

    #[test]
    fn replace_roots_counts_distinct_names() {
        let result = DomainTree::new().replace_roots(names(&["A", "A", "B"]));
        assert_eq!(result, Err(TreeError::InvalidSetup(2)));
    }

    #[test]
    fn replace_roots_keeps_children() {
        let tree = DomainTree::new()
            .add_root_domain(name("A"))
            .add_subdomain(&path(&["A"]), name("A1"))
            .replace_roots(names(&["X", "Y", "Z"]))
            .unwrap();
        assert_eq!(tree.children.len(), 1);
    }

    #[test]
    fn contains_path_walks_every_prefix() {
        let tree = DomainTree::new()
            .add_root_domain(name("A"))
            .add_subdomain(&path(&["A"]), name("B"))
            .add_subdomain(&path(&["A", "B"]), name("C"));
        assert!(tree.contains_path(&DomainPath::root()));
        assert!(tree.contains_path(&path(&["A", "B", "C"])));
        assert!(!tree.contains_path(&path(&["A", "C"])));
        assert!(!tree.contains_path(&path(&["B"])));
    }

    #[test]
    fn orphan_keys_reports_unreachable_parents() {
        let tree = DomainTree::new()
            .add_root_domain(name("A"))
            .add_subdomain(&path(&["A"]), name("A1"))
            .add_subdomain(&path(&["Gone"]), name("G1"));
        let orphans: Vec<&str> = tree.orphan_keys().iter().map(|k| k.as_str()).collect();
        assert_eq!(orphans, vec!["Gone"]);
    }

    #[test]
    fn reachable_count_skips_orphans() {
        let tree = DomainTree::new()
            .add_root_domain(name("A"))
            .add_root_domain(name("B"))
            .add_subdomain(&path(&["A"]), name("A1"))
            .add_subdomain(&path(&["Gone"]), name("G1"));
        assert_eq!(tree.reachable_count(), 3);
    }

    #[test]
    fn normalized_drops_duplicate_siblings() {
        let mut tree = DomainTree::new();
        tree.items = names(&["A", "B", "A"]);
        tree.children
            .insert(encode(&path(&["A"])), names(&["X", "X", "Y"]));
        let tree = tree.normalized();
        assert_eq!(tree.items, names(&["A", "B"]));
        assert_eq!(tree.children_of(&path(&["A"])), names(&["X", "Y"]).as_slice());
    }

    #[test]
    fn serde_shape() {
        let tree = DomainTree::new()
            .add_root_domain(name("A"))
            .add_subdomain(&path(&["A"]), name("a/b"));
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "items": ["A"], "children": { "A": ["a/b"] } })
        );
    }
}
