//! Common test helpers and utilities.

#![allow(dead_code)]

use std::path::Path;

use rmcp::model::{CallToolResult, RawContent};
use strands_mcp_server::docs::{SectionSource, TopicRegistry};
use tempfile::TempDir;

/// Sources for a small three-topic registry.
pub fn fixture_sources() -> Vec<SectionSource> {
    vec![
        SectionSource::new(
            "agent-loop",
            "Agent Loop",
            "# Agent Loop\n\nThe agent loop alternates model calls and tool calls.\n",
        )
        .with_aliases(["event loop", "reasoning loop"])
        .with_tags(["core"]),
        SectionSource::new(
            "tools",
            "Tools",
            "# Tools\n\nDecorate a function with @tool to expose it.\n",
        )
        .with_aliases(["tool use"])
        .with_tags(["core", "tools"]),
        SectionSource::new(
            "hooks",
            "Hooks",
            "# Hooks\n\nHook providers observe lifecycle events.\n",
        )
        .with_description("Lifecycle hooks.")
        .with_tags(["extensibility"]),
    ]
}

/// Registry built from [`fixture_sources`].
///
/// ## Panics
/// if the fixture is inconsistent
pub fn fixture_registry() -> TopicRegistry {
    TopicRegistry::load(fixture_sources()).expect("fixture registry should load")
}

/// Extracts the text of the first content item of a tool result.
///
/// ## Panics
/// if the result has no text content
pub fn text(result: &CallToolResult) -> &str {
    // Content is Annotated<RawContent>, need to access the raw field
    match &result.content[0].raw {
        RawContent::Text(text_content) => &text_content.text,
        _ => panic!("Expected Text content, got: {:?}", result.content[0]),
    }
}

/// Writes `files` (name, content) into a fresh temporary directory.
///
/// ## Panics
/// if a file cannot be written
pub fn content_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir failed");
    for (name, content) in files {
        write_file(dir.path(), name, content);
    }
    dir
}

fn write_file(root: &Path, name: &str, content: &str) {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("mkdir failed");
    }
    std::fs::write(&path, content).expect("write failed");
}
