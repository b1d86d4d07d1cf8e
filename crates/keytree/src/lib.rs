//! Deterministic hierarchical cache keys with cascade invalidation.
//!
//! This crate derives cache keys from slash-delimited paths and keeps
//! a nested key tree mirroring the path hierarchy:
//! - One digest per path prefix, so `example/path/token` yields keys
//!   for `example`, `example/path`, and `example/path/token`
//! - A [`KeyTree`] that records which keys live beneath which, so
//!   invalidating a path enumerates every descendant key in one batch
//! - No storage: the caller owns the cache backend and issues the
//!   actual writes and deletes
//!
//! # Key layout
//!
//! The first key of a sequence addresses the path's root. It never
//! appears inside the tree; by convention the serialized tree itself
//! is stored under that key with a `-data` suffix (see
//! [`KeyGenerator::data_key`]), and the remaining keys nest beneath
//! it in path order.
//!
//! # Example
//!
//! ```
//! use keytree::KeyGenerator;
//!
//! let keygen = KeyGenerator::new();
//! let mut tree = keygen.key_tree_from_path("posts/2026/drafts");
//! tree.add_keys(&keygen.keys_from_path("posts/2026/published"));
//!
//! // Evicting posts/2026 cascades to both leaves.
//! let evicted = tree.remove_keys(&keygen.keys_from_path("posts/2026"));
//! assert_eq!(evicted.len(), 3);
//! assert!(tree.is_empty());
//! ```

mod error;
mod hash;
mod tree;

// Re-export error types at crate root
pub use error::{Error, Result};

// Re-export main types
pub use hash::HashMechanism;
pub use tree::{DATA_KEY_SUFFIX, KeyGenerator, KeyTree};
