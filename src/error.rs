//! Error types for the strands-mcp-server.
//!
//! Errors are grouped by when they can happen:
//! - [`RegistryError`]: the content bundle is internally inconsistent. Fatal,
//!   the server refuses to start.
//! - [`LookupError`]: a client asked for something invalid or absent.
//!   Recoverable, reported back as a protocol-level error.
//! - [`BundleError`]: topic files could not be read or parsed.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building the topic registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Two sources declared the same canonical key.
    #[error("duplicate topic key: {0}")]
    DuplicateKey(String),

    /// Two different sections claim the same alias after normalization.
    #[error("alias '{alias}' of topic '{key}' is already claimed by topic '{existing}'")]
    DuplicateAlias {
        /// The alias as written on the rejected section.
        alias: String,
        /// The section that tried to claim the alias.
        key: String,
        /// The section that already owns it.
        existing: String,
    },

    /// A section has no body text.
    #[error("topic '{0}' has an empty body")]
    EmptyBody(String),

    /// A key is not lowercase and hyphenated.
    #[error("invalid topic key '{0}': expected lowercase words joined by '-'")]
    InvalidKey(String),
}

/// Errors raised while serving a request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    /// No section has this canonical key.
    #[error("topic not found: {0}")]
    NotFound(String),

    /// The query or limit is unusable.
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

/// Errors raised while reading a content bundle.
#[derive(Debug, Error)]
pub enum BundleError {
    /// A content directory or file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path that failed.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The YAML front matter of a topic file is malformed.
    #[error("invalid front matter in {file}: {message}")]
    Frontmatter {
        /// File name of the topic.
        file: String,
        /// Parser message.
        message: String,
    },
}

/// A unified error type for the entire application.
#[derive(Debug, Error)]
pub enum Error {
    /// Registry construction error.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Request-time lookup error.
    #[error("lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// Content bundle error.
    #[error("bundle error: {0}")]
    Bundle(#[from] BundleError),
}

/// A specialized Result type for strands-mcp-server operations.
pub type Result<T> = std::result::Result<T, Error>;
