//! Property-based tests for key generation and tree maintenance.
//!
//! These verify the behavioral contracts of the key tree:
//! - Determinism: the same path always produces the same keys
//! - Shape: one key per path prefix, trees mirror path depth
//! - Merge: adding is idempotent and never drops existing branches
//! - Removal: excised keys are exactly the addressed subtree

use keytree::{HashMechanism, KeyGenerator, KeyTree};
use proptest::prelude::*;

/// Generate a single non-empty path segment
fn segment_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_-]{1,8}".prop_map(String::from)
}

/// Generate a clean slash-delimited path with 1..=6 segments
fn path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(segment_strategy(), 1..=6).prop_map(|segments| segments.join("/"))
}

/// Generate a path with at least two segments, so its key sequence
/// has something to add beyond the root key
fn deep_path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(segment_strategy(), 2..=6).prop_map(|segments| segments.join("/"))
}

proptest! {
    /// Contract: same path, same keys, regardless of generator
    /// instance
    #[test]
    fn key_generation_is_deterministic(path in path_strategy()) {
        let a = KeyGenerator::new().keys_from_path(&path);
        let b = KeyGenerator::new().keys_from_path(&path);
        prop_assert_eq!(a, b);
    }

    /// Contract: one key per segment, each key the digest of one
    /// more prefix segment than the previous
    #[test]
    fn one_key_per_prefix(path in path_strategy()) {
        let keys = KeyGenerator::new().keys_from_path(&path);
        let segments: Vec<&str> = path.split('/').collect();
        prop_assert_eq!(keys.len(), segments.len());

        let mech = HashMechanism::Sha1;
        for (i, key) in keys.iter().enumerate() {
            prop_assert_eq!(key, &mech.digest_hex(&segments[..=i].join("/")));
        }
    }

    /// Contract: SHA-1 and SHA-256 generators agree on sequence
    /// length and never on key values
    #[test]
    fn mechanisms_differ_only_in_digest(path in path_strategy()) {
        let sha1 = KeyGenerator::new().keys_from_path(&path);
        let sha256 = KeyGenerator::with_mechanism(HashMechanism::Sha256).keys_from_path(&path);
        prop_assert_eq!(sha1.len(), sha256.len());
        for (a, b) in sha1.iter().zip(&sha256) {
            prop_assert_eq!(a.len(), 40);
            prop_assert_eq!(b.len(), 64);
        }
    }

    /// Contract: a fresh tree from a path equals an empty tree with
    /// that path's keys merged in
    #[test]
    fn tree_from_path_equals_add_into_empty(path in path_strategy()) {
        let keygen = KeyGenerator::new();
        let from_path = keygen.key_tree_from_path(&path);
        let mut merged = KeyTree::new();
        merged.add_keys(&keygen.keys_from_path(&path));
        prop_assert_eq!(from_path, merged);
    }

    /// Contract: adding the same path twice changes nothing
    #[test]
    fn add_is_idempotent(paths in prop::collection::vec(path_strategy(), 1..5)) {
        let keygen = KeyGenerator::new();
        let mut once = KeyTree::new();
        let mut twice = KeyTree::new();
        for path in &paths {
            let keys = keygen.keys_from_path(path);
            once.add_keys(&keys);
            twice.add_keys(&keys).add_keys(&keys);
        }
        prop_assert_eq!(once, twice);
    }

    /// Contract: merging a second path never drops the first path's
    /// leaf
    #[test]
    fn add_preserves_existing_branches(
        first in deep_path_strategy(),
        second in deep_path_strategy(),
    ) {
        let keygen = KeyGenerator::new();
        let first_keys = keygen.keys_from_path(&first);
        let mut tree = keygen.key_tree_from_path(&first);
        tree.add_keys(&keygen.keys_from_path(&second));

        let mut node = Some(&tree);
        for key in &first_keys[1..] {
            node = node.and_then(|n| n.get(key));
        }
        prop_assert!(node.is_some(), "branch for '{}' was dropped by merge", first);
    }

    /// Contract: removing a freshly added path excises exactly its
    /// leaf key, and removing again finds nothing
    #[test]
    fn remove_returns_exactly_the_excised_keys(path in deep_path_strategy()) {
        let keygen = KeyGenerator::new();
        let keys = keygen.keys_from_path(&path);
        let mut tree = keygen.key_tree_from_path(&path);

        let removed = tree.remove_keys(&keys);
        prop_assert_eq!(&removed, &keys[keys.len() - 1..]);

        let removed_again = tree.remove_keys(&keys);
        prop_assert!(removed_again.is_empty());
    }

    /// Contract: removing the root path reports the whole chain in
    /// order without clearing the tree
    #[test]
    fn root_removal_reports_the_full_chain(path in deep_path_strategy()) {
        let keygen = KeyGenerator::new();
        let keys = keygen.keys_from_path(&path);
        let mut tree = keygen.key_tree_from_path(&path);

        let removed = tree.remove_keys(&keys[..1]);
        prop_assert_eq!(&removed, &keys[1..]);
        prop_assert!(!tree.is_empty());
    }

    /// Contract: paths under a shared prefix are all excised when
    /// the prefix is removed
    #[test]
    fn removing_a_shared_prefix_cascades_to_all_leaves(
        prefix in deep_path_strategy(),
        leaf_a in segment_strategy(),
        leaf_b in segment_strategy(),
    ) {
        prop_assume!(leaf_a != leaf_b);
        let keygen = KeyGenerator::new();
        let path_a = format!("{prefix}/{leaf_a}");
        let path_b = format!("{prefix}/{leaf_b}");

        let mut tree = keygen.key_tree_from_path(&path_a);
        tree.add_keys(&keygen.keys_from_path(&path_b));

        let removed = tree.remove_keys(&keygen.keys_from_path(&prefix));
        let prefix_keys = keygen.keys_from_path(&prefix);
        let prefix_key = &prefix_keys[prefix_keys.len() - 1];
        let leaf_key_a = keygen.keys_from_path(&path_a).pop().unwrap_or_default();
        let leaf_key_b = keygen.keys_from_path(&path_b).pop().unwrap_or_default();

        prop_assert_eq!(&removed[0], prefix_key);
        prop_assert!(removed.contains(&leaf_key_a));
        prop_assert!(removed.contains(&leaf_key_b));
    }
}
