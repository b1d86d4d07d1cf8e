//! Error types for strict path validation.
//!
//! Key generation itself is permissive and infallible; these errors
//! only surface through the opt-in
//! [`validated_keys_from_path`](crate::KeyGenerator::validated_keys_from_path)
//! front door.

use miette::Diagnostic;
use thiserror::Error;

/// Error type for path validation
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// The path is the empty string
    #[error("cache path is empty")]
    #[diagnostic(
        code(keytree::empty_path),
        help("Provide at least one non-empty path segment, e.g. \"example/path\"")
    )]
    EmptyPath,

    /// The path contains an empty segment
    #[error("cache path '{path}' has an empty segment at position {index}")]
    #[diagnostic(
        code(keytree::empty_segment),
        help("Remove leading, trailing, or doubled '/' separators")
    )]
    EmptySegment {
        /// The offending path
        path: String,
        /// Zero-based index of the empty segment
        index: usize,
    },
}

/// Result type for validated key generation
pub type Result<T> = std::result::Result<T, Error>;
