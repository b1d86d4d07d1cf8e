//! Cumulative-prefix key generation and the nested key tree.

use crate::{Error, HashMechanism, Result};
use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::{Deserialize, Serialize};

/// Suffix appended to a path's first key to form the storage address
/// of its serialized [`KeyTree`].
pub const DATA_KEY_SUFFIX: &str = "-data";

/// Derives cache keys from slash-delimited paths.
///
/// Carries the digest mechanism so every key for a given tree is
/// produced the same way. Copyable and stateless beyond that.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyGenerator {
    mechanism: HashMechanism,
}

impl KeyGenerator {
    /// Generator with the default mechanism (SHA-1).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Generator with an explicit digest mechanism.
    #[must_use]
    pub fn with_mechanism(mechanism: HashMechanism) -> Self {
        Self { mechanism }
    }

    /// The digest mechanism in use.
    #[must_use]
    pub fn mechanism(&self) -> HashMechanism {
        self.mechanism
    }

    /// One key per path prefix, shortest first.
    ///
    /// Element `i` is the digest of the first `i + 1` segments joined
    /// with `/`, so `"a/b/c"` yields the keys for `a`, `a/b`, and
    /// `a/b/c` in that order. Splitting is naive: the empty path is
    /// one empty segment and hashes accordingly, and `"a//b"` hashes
    /// an empty middle segment. Use [`validated_keys_from_path`] to
    /// reject such paths instead.
    ///
    /// [`validated_keys_from_path`]: Self::validated_keys_from_path
    #[must_use]
    pub fn keys_from_path(&self, path: &str) -> Vec<String> {
        let segments: Vec<&str> = path.split('/').collect();
        let mut keys = Vec::with_capacity(segments.len());
        let mut prefix = String::with_capacity(path.len());
        for (i, segment) in segments.iter().enumerate() {
            if i > 0 {
                prefix.push('/');
            }
            prefix.push_str(segment);
            keys.push(self.mechanism.digest_hex(&prefix));
        }
        keys
    }

    /// Strict variant of [`keys_from_path`](Self::keys_from_path).
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyPath`] for the empty string and
    /// [`Error::EmptySegment`] when the path has leading, trailing,
    /// or doubled separators. Accepted paths hash identically to the
    /// permissive variant.
    pub fn validated_keys_from_path(&self, path: &str) -> Result<Vec<String>> {
        if path.is_empty() {
            return Err(Error::EmptyPath);
        }
        if let Some(index) = path.split('/').position(str::is_empty) {
            return Err(Error::EmptySegment {
                path: path.to_string(),
                index,
            });
        }
        Ok(self.keys_from_path(path))
    }

    /// Build a fresh tree containing a single path.
    ///
    /// The result is one linear chain: the path's second key at the
    /// top level, each later key nested under the previous one, the
    /// last key an empty leaf. The first key is the root storage
    /// address and never appears in the tree, so single-segment paths
    /// produce an empty tree.
    #[must_use]
    pub fn key_tree_from_path(&self, path: &str) -> KeyTree {
        let mut tree = KeyTree::new();
        tree.add_keys(&self.keys_from_path(path));
        tree
    }

    /// Storage address for a path's serialized tree: the digest of
    /// the path's first segment with [`DATA_KEY_SUFFIX`] appended.
    #[must_use]
    pub fn data_key(&self, path: &str) -> String {
        let root = path.split('/').next().unwrap_or_default();
        format!("{}{DATA_KEY_SUFFIX}", self.mechanism.digest_hex(root))
    }
}

/// Nested mapping from cache key to the keys stored beneath it.
///
/// Mirrors a path hierarchy below its root key: each node's children
/// are the keys one level deeper, and a node with no children is a
/// leaf. Children keep insertion order, so enumeration during
/// cascade removal is stable and reflects the order paths were
/// added.
///
/// Serializes as a plain nested map (`{"<key>": {"<key>": {}}}`),
/// which is the shape a cache backend stores under the root data
/// key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyTree {
    children: IndexMap<String, KeyTree>,
}

impl KeyTree {
    /// An empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the node has no children (a leaf).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of direct children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// True when `key` is a direct child of this node.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.children.contains_key(key)
    }

    /// The subtree under `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.children.get(key)
    }

    /// Direct children in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Self)> {
        self.children.iter().map(|(key, child)| (key.as_str(), child))
    }

    /// Merge a path's key sequence into the tree.
    ///
    /// The first key of the sequence is the root storage address and
    /// is skipped; each remaining key is looked up at the current
    /// level and created as an empty node only when missing, so
    /// existing subtrees are never overwritten and paths sharing a
    /// prefix share the corresponding nodes. Sequences of zero or one
    /// keys have nothing to add and leave the tree untouched.
    ///
    /// Returns `&mut self` for chaining.
    pub fn add_keys(&mut self, keys: &[String]) -> &mut Self {
        if keys.len() < 2 {
            return self;
        }

        let mut created = 0usize;
        let mut node = &mut *self;
        for key in &keys[1..] {
            node = match node.children.entry(key.clone()) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    created += 1;
                    entry.insert(Self::new())
                }
            };
        }
        tracing::trace!(created, depth = keys.len() - 1, "merged keys into tree");

        self
    }

    /// Excise the node addressed by `keys` together with its whole
    /// subtree, returning every removed key, parent before children.
    ///
    /// The first key of the sequence is skipped as in
    /// [`add_keys`](Self::add_keys). The walk follows the remaining
    /// keys down the tree; if any of them is missing nothing is
    /// removed and the result is empty. When the final key is found,
    /// it is recorded, its descendants are recorded depth-first with
    /// siblings in insertion order, and the node is deleted.
    ///
    /// A sequence of exactly one key addresses the root path itself.
    /// Every key in the tree is reported, but the structure is left
    /// in place: the tree's storage slot is about to be dropped
    /// wholesale, so clearing it is the caller's decision.
    pub fn remove_keys(&mut self, keys: &[String]) -> Vec<String> {
        let Some((_, rest)) = keys.split_first() else {
            return Vec::new();
        };

        if rest.is_empty() {
            let mut removed = Vec::new();
            self.collect_keys(&mut removed);
            tracing::debug!(count = removed.len(), "reported all keys for root removal");
            return removed;
        }

        let mut node = &mut *self;
        for (idx, key) in rest.iter().enumerate() {
            if idx == rest.len() - 1 {
                let Some(subtree) = node.children.shift_remove(key) else {
                    return Vec::new();
                };
                let mut removed = vec![key.clone()];
                subtree.collect_keys(&mut removed);
                tracing::debug!(count = removed.len(), "removed key subtree");
                return removed;
            }
            match node.children.get_mut(key) {
                Some(next) => node = next,
                // Missing intermediate key: nothing to remove
                None => return Vec::new(),
            }
        }

        Vec::new()
    }

    /// Append every key in this node's subtree to `out`, each key
    /// before any key beneath it, siblings in insertion order.
    ///
    /// Iterative so pathological path depth cannot exhaust the call
    /// stack.
    fn collect_keys(&self, out: &mut Vec<String>) {
        let mut stack: Vec<(&String, &Self)> = self.children.iter().rev().collect();
        while let Some((key, child)) = stack.pop() {
            out.push(key.clone());
            for entry in child.children.iter().rev() {
                stack.push(entry);
            }
        }
    }
}
