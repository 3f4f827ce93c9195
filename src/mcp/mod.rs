//! MCP (Model Context Protocol) server module.
//!
//! This module implements the MCP server that exposes Strands Agents
//! documentation to LLM applications like Claude Code. Protocol handling and
//! the stdio transport come from `rmcp`.
//!
//! # Architecture
//!
//! The MCP module is organized into:
//! - `server`: The `StrandsDocs` handler and its tool implementations
//! - `tools`: Tool parameter and response types
//!
//! # Usage
//!
//! ```ignore
//! use rmcp::{ServiceExt, transport::stdio};
//! use strands_mcp_server::{docs::bundle, mcp::StrandsDocs};
//!
//! let server = StrandsDocs::new(bundle::builtin_registry()?);
//! server.serve(stdio()).await?.waiting().await?;
//! ```

pub mod server;
pub mod tools;

// Re-export the StrandsDocs for convenient access
pub use server::StrandsDocs;
