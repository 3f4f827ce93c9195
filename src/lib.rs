//! Strands Agents MCP Server
//!
//! An MCP (Model Context Protocol) server that gives AI coding assistants
//! on-demand access to curated Strands Agents documentation: the agent loop,
//! tools, model providers, multi-agent patterns, state management, hooks,
//! async programming and structured output.
//!
//! # Overview
//!
//! This library provides:
//! - A validated, immutable registry of documentation topics
//! - A resolver mapping exact, aliased or partial topic names to topics
//! - MCP server implementation with stdio transport
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     stdio      ┌──────────────────────┐
//! │   LLM Client    │◄──────────────►│      MCP Server      │
//! │  (Claude Code)  │     (MCP)      │ (strands-mcp-server) │
//! └─────────────────┘                └──────────┬───────────┘
//!                                               │
//!                                       ┌───────▼────────┐
//!                                       │ Topic Resolver │
//!                                       └───────┬────────┘
//!                                               │
//!                                       ┌───────▼────────┐
//!                                       │ Topic Registry │◄── content/*.md
//!                                       └────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`error`] - Error types for the entire application
//! - [`docs`] - Topic registry, resolver and content bundles
//! - [`mcp`] - MCP server implementation
//! - [`config`] - MCP client configuration helper

// Enforce documentation and other quality attributes
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are too strict
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod config;
pub mod docs;
pub mod error;
pub mod mcp;

// Re-export commonly used types at the crate root
pub use error::{Error, Result};
