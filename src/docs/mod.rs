//! Documentation topics: storage, lookup and content loading.
//!
//! # Architecture
//!
//! The docs module is organized into:
//! - `types`: section records, match results and string normalization
//! - `registry`: the immutable, validated set of sections
//! - `resolver`: tiered matching of free-form queries to sections
//! - `bundle`: markdown topic files with YAML front matter
//!
//! # Usage
//!
//! ```
//! use strands_mcp_server::docs::{ResolverConfig, bundle};
//!
//! let registry = bundle::builtin_registry()?;
//! let matches = registry.resolver(ResolverConfig::default()).resolve("event loop", 5)?;
//! assert_eq!(matches[0].section_key(), "agent-loop");
//! # Ok::<(), strands_mcp_server::Error>(())
//! ```

pub mod bundle;
pub mod registry;
pub mod resolver;
pub mod types;

use crate::error::LookupError;

/// Result type for request-time lookups.
pub type DocsResult<T> = std::result::Result<T, LookupError>;

pub use registry::TopicRegistry;
pub use resolver::{ResolverConfig, TopicResolver};
pub use types::{DocumentationSection, MatchKind, MatchResult, SectionSource};
