//! MCP tool definitions for documentation lookup.
//!
//! This module defines the parameter and response types of the tools
//! exposed by the MCP server. Responses are serialized to pretty JSON and
//! returned as text content.
//!
//! # Available Tools
//!
//! - `list_topics` - Enumerate every topic, optionally filtered by tag
//! - `get_topic` - Resolve a free-form query to the best matching topics
//! - `read_topic` - Fetch the full markdown of one topic by key

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::docs::{DocumentationSection, MatchKind, MatchResult};

/// Parameters for the `list_topics` tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListTopicsParams {
    /// Only list topics carrying this tag.
    #[serde(default)]
    #[schemars(description = "Optional tag to filter topics by (e.g. 'core', 'multi-agent')")]
    pub tag: Option<String>,
}

/// Parameters for the `get_topic` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetTopicParams {
    /// Topic key, alias or free-form search text.
    #[schemars(
        description = "Topic to look up: a topic key (e.g. 'agent-loop'), an alias (e.g. 'event loop') or a few search words"
    )]
    pub query: String,
    /// Maximum number of matches to return.
    #[serde(default)]
    #[schemars(description = "Maximum number of matching topics to return (default: 5)")]
    pub limit: Option<u32>,
}

/// Parameters for the `read_topic` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadTopicParams {
    /// Canonical topic key.
    #[schemars(description = "Canonical topic key as returned by list_topics (e.g. 'hooks')")]
    pub key: String,
}

/// One entry of the `list_topics` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicSummary {
    /// Canonical key.
    pub key: String,
    /// Display title.
    pub title: String,
    /// One-line summary.
    pub description: String,
    /// Category labels.
    pub tags: Vec<String>,
}

impl From<&DocumentationSection> for TopicSummary {
    fn from(section: &DocumentationSection) -> Self {
        Self {
            key: section.key().to_string(),
            title: section.title().to_string(),
            description: section.description().to_string(),
            tags: section.tags().to_vec(),
        }
    }
}

/// Response of the `list_topics` tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTopicsResponse {
    /// Topics in registry order.
    pub topics: Vec<TopicSummary>,
    /// Every tag known to the server, for follow-up filtering.
    pub tags: Vec<String>,
}

/// One match in the `get_topic` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicMatch {
    /// Canonical key.
    pub key: String,
    /// Display title.
    pub title: String,
    /// Confidence, rounded to three decimals.
    pub score: f64,
    /// Which resolution tier matched.
    pub match_kind: MatchKind,
    /// Full markdown content.
    pub body: String,
}

impl From<MatchResult<'_>> for TopicMatch {
    fn from(result: MatchResult<'_>) -> Self {
        Self {
            key: result.section.key().to_string(),
            title: result.section.title().to_string(),
            score: (result.score * 1000.0).round() / 1000.0,
            match_kind: result.match_kind,
            body: result.section.body().to_string(),
        }
    }
}

/// Response of the `get_topic` tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTopicResponse {
    /// The query as received.
    pub query: String,
    /// Matches, best first. Empty when nothing is relevant.
    pub matches: Vec<TopicMatch>,
    /// Hint for the client when `matches` is empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_topic_params_deserialization() {
        let params: GetTopicParams = serde_json::from_str(r#"{"query": "hooks"}"#).unwrap();
        assert_eq!(params.query, "hooks");
        assert_eq!(params.limit, None);

        let params: GetTopicParams =
            serde_json::from_str(r#"{"query": "loop", "limit": 2}"#).unwrap();
        assert_eq!(params.limit, Some(2));
    }

    #[test]
    fn test_list_topics_params_accept_empty_object() {
        let params: ListTopicsParams = serde_json::from_str("{}").unwrap();
        assert!(params.tag.is_none());
    }

    #[test]
    fn test_topic_match_serialization() {
        let response = GetTopicResponse {
            query: "loop".to_string(),
            matches: vec![TopicMatch {
                key: "agent-loop".to_string(),
                title: "Agent Loop".to_string(),
                score: 0.4,
                match_kind: MatchKind::Substring,
                body: "text".to_string(),
            }],
            message: None,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""matchKind":"substring""#));
        assert!(!json.contains("message"));
    }
}
