//! MCP server implementation for strands-mcp-server.
//!
//! This module contains the `StrandsDocs` struct that implements the MCP
//! server with documentation tools backed by the topic registry.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::wrapper::Parameters,
    model::{
        CallToolResult, Content, ErrorCode, Implementation, ProtocolVersion, ServerCapabilities,
        ServerInfo,
    },
    tool, tool_handler, tool_router,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::docs::types::key_form;
use crate::docs::{ResolverConfig, TopicRegistry};
use crate::error::LookupError;

use super::tools::{
    GetTopicParams, GetTopicResponse, ListTopicsParams, ListTopicsResponse, ReadTopicParams,
    TopicMatch, TopicSummary,
};

/// Name reported to MCP clients.
pub const SERVER_NAME: &str = "strands-agents-mcp-server";

const INSTRUCTIONS: &str = "\
# Strands Agents MCP Server

This server provides tools to access Strands Agents documentation.
Strands Agents is a Python SDK for building AI agents.
It may also be referred to as simply 'Strands'.

Call list_topics to see the available topics, get_topic to look one up by \
key, alias or a few words, and read_topic to fetch a topic by its key.

The full documentation can be found at https://strandsagents.com.";

/// MCP server exposing Strands Agents documentation.
///
/// Cloning is cheap: the registry is shared, never copied.
#[derive(Clone)]
pub struct StrandsDocs {
    /// Immutable topic registry shared by all requests.
    registry: Arc<TopicRegistry>,
    /// Resolver settings applied to `get_topic`.
    resolver_config: ResolverConfig,
    tool_router: ToolRouter<StrandsDocs>,
}

impl StrandsDocs {
    /// Creates a new `StrandsDocs` instance with default resolver settings.
    pub fn new(registry: TopicRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            resolver_config: ResolverConfig::default(),
            tool_router: Self::tool_router(),
        }
    }

    /// Replaces the resolver settings.
    #[must_use]
    pub fn with_resolver_config(mut self, config: ResolverConfig) -> Self {
        self.resolver_config = config;
        self
    }

    /// Returns the topic registry.
    pub fn registry(&self) -> &TopicRegistry {
        &self.registry
    }
}

/// Translates a lookup failure into a protocol error.
fn lookup_error(err: LookupError) -> McpError {
    let code = match err {
        LookupError::InvalidQuery(_) => ErrorCode::INVALID_PARAMS,
        LookupError::NotFound(_) => ErrorCode::RESOURCE_NOT_FOUND,
    };
    McpError::new(code, err.to_string(), None)
}

/// Serializes a tool response as pretty JSON text content.
fn json_content<T: Serialize>(value: &T) -> Result<Content, McpError> {
    serde_json::to_string_pretty(value)
        .map(Content::text)
        .map_err(|e| {
            McpError::new(
                ErrorCode::INTERNAL_ERROR,
                format!("failed to serialize response: {e}"),
                None,
            )
        })
}

/// Tool implementations for `StrandsDocs`.
#[tool_router]
impl StrandsDocs {
    /// List every documentation topic.
    #[tool(
        description = "List the available Strands Agents documentation topics with their keys, titles, descriptions and tags. Optionally filter by tag."
    )]
    pub async fn list_topics(
        &self,
        Parameters(params): Parameters<ListTopicsParams>,
    ) -> Result<CallToolResult, McpError> {
        let tag = params
            .tag
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());

        let topics: Vec<TopicSummary> = match tag {
            Some(tag) => self
                .registry
                .list_by_tag(tag)
                .map(TopicSummary::from)
                .collect(),
            None => self.registry.list().map(TopicSummary::from).collect(),
        };
        debug!(tag, topics = topics.len(), "list_topics");

        let response = ListTopicsResponse {
            topics,
            tags: self.registry.tags(),
        };
        Ok(CallToolResult::success(vec![json_content(&response)?]))
    }

    /// Resolve a query to the best matching topics.
    #[tool(
        description = "Get Strands Agents documentation for a topic. Accepts a topic key, an alias or a few search words and returns the best matching topics with their full content, best match first."
    )]
    pub async fn get_topic(
        &self,
        Parameters(params): Parameters<GetTopicParams>,
    ) -> Result<CallToolResult, McpError> {
        let limit = params.limit.map_or(self.resolver_config.default_limit, |l| {
            usize::try_from(l).unwrap_or(usize::MAX)
        });

        let matches: Vec<TopicMatch> = self
            .registry
            .resolver(self.resolver_config)
            .resolve(&params.query, limit)
            .map_err(lookup_error)?
            .into_iter()
            .map(TopicMatch::from)
            .collect();
        info!(
            query = %params.query,
            limit,
            matches = matches.len(),
            "get_topic"
        );

        let message = matches.is_empty().then(|| {
            format!(
                "No documentation matched '{}'. Call list_topics to see every available topic.",
                params.query
            )
        });
        let response = GetTopicResponse {
            query: params.query,
            matches,
            message,
        };
        Ok(CallToolResult::success(vec![json_content(&response)?]))
    }

    /// Fetch the markdown body of a topic by key.
    #[tool(
        description = "Read the full markdown documentation of one Strands Agents topic by its key (see list_topics)."
    )]
    pub async fn read_topic(
        &self,
        Parameters(params): Parameters<ReadTopicParams>,
    ) -> Result<CallToolResult, McpError> {
        // Accept `agent_loop` or `Agent Loop` for `agent-loop`.
        let key = key_form(&params.key);
        let section = self.registry.get(&key).map_err(|e| {
            debug!(key = %params.key, "read_topic miss");
            lookup_error(e)
        })?;
        info!(key = %key, "read_topic");

        Ok(CallToolResult::success(vec![Content::text(section.body())]))
    }
}

#[tool_handler]
impl ServerHandler for StrandsDocs {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(INSTRUCTIONS.into()),
        }
    }
}
