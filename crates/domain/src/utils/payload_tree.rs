//! Nested request payload built from dotted paths
//!
//! A [`PayloadTree`] is a string-keyed tree whose leaves are scalar strings.
//! Field mappings address locations in it with dot-delimited paths such as
//! `party.name.firstName`; intermediate nodes are created on demand and
//! never pre-populated.
//!
//! # Examples
//!
//! ```
//! use blendfeed_domain::utils::payload_tree::{set_path, PayloadTree};
//!
//! let tree = set_path(PayloadTree::default(), "party.email", "jo@example.com");
//! let tree = set_path(tree, "loanPurposeType", "PURCHASE");
//!
//! assert_eq!(tree.get_str("party.email"), Some("jo@example.com"));
//! assert_eq!(
//!     tree.to_json(),
//!     serde_json::json!({"loanPurposeType": "PURCHASE", "party": {"email": "jo@example.com"}})
//! );
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::PATH_SEPARATOR;

/// A node of the payload tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PayloadNode {
    Leaf(String),
    Branch(PayloadTree),
}

impl PayloadNode {
    /// The scalar value when this node is a leaf.
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Self::Leaf(value) => Some(value),
            Self::Branch(_) => None,
        }
    }
}

/// Ordered string-keyed tree serialised as nested JSON objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PayloadTree {
    nodes: BTreeMap<String, PayloadNode>,
}

/// Set `value` at the dotted `path` of `tree` and return the updated tree.
///
/// Empty segments are ignored; a path with no segments leaves the tree
/// unchanged. A leaf standing where a branch is needed is replaced.
pub fn set_path(mut tree: PayloadTree, path: &str, value: impl Into<String>) -> PayloadTree {
    let segments: Vec<&str> = split_path(path).collect();
    tree.insert_path(&segments, value);
    tree
}

/// Split a dotted path into its non-empty segments.
pub fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split(PATH_SEPARATOR).filter(|segment| !segment.is_empty())
}

impl PayloadTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` under the nested `segments`, overwriting any earlier
    /// value at that location.
    pub fn insert_path<S: AsRef<str>>(&mut self, segments: &[S], value: impl Into<String>) {
        self.insert_segments(segments, value.into());
    }

    fn insert_segments<S: AsRef<str>>(&mut self, segments: &[S], value: String) {
        match segments {
            [] => {}
            [leaf] => {
                self.nodes.insert(leaf.as_ref().to_string(), PayloadNode::Leaf(value));
            }
            [head, rest @ ..] => {
                let node = self
                    .nodes
                    .entry(head.as_ref().to_string())
                    .or_insert_with(|| PayloadNode::Branch(Self::default()));

                if let PayloadNode::Branch(child) = node {
                    child.insert_segments(rest, value);
                } else {
                    let mut child = Self::default();
                    child.insert_segments(rest, value);
                    *node = PayloadNode::Branch(child);
                }
            }
        }
    }

    /// Look up the node at a dotted path.
    pub fn get_path(&self, path: &str) -> Option<&PayloadNode> {
        let mut segments = split_path(path);
        let mut node = self.nodes.get(segments.next()?)?;
        for segment in segments {
            match node {
                PayloadNode::Branch(tree) => node = tree.nodes.get(segment)?,
                PayloadNode::Leaf(_) => return None,
            }
        }
        Some(node)
    }

    /// Look up the leaf value at a dotted path.
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get_path(path).and_then(PayloadNode::as_leaf)
    }

    /// Remove a top-level key.
    pub fn remove(&mut self, key: &str) -> Option<PayloadNode> {
        self.nodes.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of top-level keys.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaves in the whole tree.
    pub fn leaf_count(&self) -> usize {
        self.nodes
            .values()
            .map(|node| match node {
                PayloadNode::Leaf(_) => 1,
                PayloadNode::Branch(tree) => tree.leaf_count(),
            })
            .sum()
    }

    /// Render as a JSON value (objects of strings).
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.nodes
                .iter()
                .map(|(key, node)| {
                    let value = match node {
                        PayloadNode::Leaf(value) => serde_json::Value::String(value.clone()),
                        PayloadNode::Branch(tree) => tree.to_json(),
                    };
                    (key.clone(), value)
                })
                .collect(),
        )
    }
}
