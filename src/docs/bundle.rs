//! Topic content bundles.
//!
//! A bundle is a set of markdown files, one per topic. A file may start with
//! a YAML front matter block:
//!
//! ```markdown
//! ---
//! key: agent-loop
//! title: Agent Loop
//! aliases: [event loop, reasoning loop]
//! tags: [core]
//! ---
//! # The Agent Loop
//! ...
//! ```
//!
//! Every front matter field is optional. A missing `key` is derived from the
//! file stem (`multi_agent.md` → `multi-agent`) and a missing `title` is the
//! stem in title case (`Multi Agent`). A file may also open with a `---`
//! thematic break; the block is only read as front matter when it is a YAML
//! mapping.
//!
//! The default bundle is compiled into the binary from `content/`.

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{BundleError, Result};

use super::registry::TopicRegistry;
use super::types::{SectionSource, key_form, title_from_stem};

/// The built-in topics, in the order they are listed to clients.
static BUILTIN: &[(&str, &str)] = &[
    ("agent_loop.md", include_str!("../../content/agent_loop.md")),
    ("tools.md", include_str!("../../content/tools.md")),
    (
        "model_providers.md",
        include_str!("../../content/model_providers.md"),
    ),
    ("multi_agent.md", include_str!("../../content/multi_agent.md")),
    (
        "state_management.md",
        include_str!("../../content/state_management.md"),
    ),
    ("hooks.md", include_str!("../../content/hooks.md")),
    ("async.md", include_str!("../../content/async.md")),
    (
        "structured_output.md",
        include_str!("../../content/structured_output.md"),
    ),
];

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct Frontmatter {
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    aliases: Vec<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    description: Option<String>,
}

/// Splits a topic file into its front matter and body.
///
/// A leading `---` followed by text that parses as a YAML scalar or list is a
/// thematic break, not front matter, and the whole file is the body.
fn split_frontmatter<'c>(
    file_name: &str,
    content: &'c str,
) -> Result<(Option<&'c str>, &'c str)> {
    let trimmed = content.trim_start();
    let Some(after_open) = trimmed.strip_prefix("---") else {
        return Ok((None, content));
    };

    let close_idx = after_open.find("\n---");
    let yaml = close_idx.map_or(after_open, |idx| &after_open[..idx]);
    if !opens_frontmatter(yaml) {
        return Ok((None, content));
    }

    let Some(close_idx) = close_idx else {
        return Err(BundleError::Frontmatter {
            file: file_name.to_string(),
            message: "front matter is not terminated by '---'".to_string(),
        }
        .into());
    };

    let rest = &after_open[close_idx + 4..];
    // Drop whatever follows the closing delimiter on its line.
    let body = rest.find('\n').map_or("", |nl| &rest[nl + 1..]);
    Ok((Some(yaml), body.trim_start_matches(['\r', '\n'])))
}

/// Whether a block after a leading `---` is meant as front matter.
///
/// Mappings and empty blocks are. Blocks that fail to parse are too, so the
/// YAML error reaches the user instead of the block leaking into the body.
fn opens_frontmatter(block: &str) -> bool {
    block.trim().is_empty()
        || !matches!(
            serde_yaml::from_str::<serde_yaml::Value>(block),
            Ok(value) if !matches!(value, serde_yaml::Value::Mapping(_) | serde_yaml::Value::Null)
        )
}

/// Parses one topic file into a registry source.
///
/// # Errors
///
/// [`BundleError::Frontmatter`] if the front matter is unterminated, is not
/// valid YAML, or has unknown fields.
pub fn parse_topic(file_name: &str, content: &str) -> Result<SectionSource> {
    let (yaml, body) = split_frontmatter(file_name, content)?;

    let frontmatter = match yaml {
        Some(yaml) if !yaml.trim().is_empty() => serde_yaml::from_str::<Frontmatter>(yaml)
            .map_err(|e| BundleError::Frontmatter {
                file: file_name.to_string(),
                message: e.to_string(),
            })?,
        _ => Frontmatter::default(),
    };

    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);

    let source = SectionSource {
        key: frontmatter.key.unwrap_or_else(|| key_form(stem)),
        title: frontmatter.title.unwrap_or_else(|| title_from_stem(stem)),
        aliases: frontmatter.aliases,
        tags: frontmatter.tags,
        description: frontmatter.description,
        body: body.to_string(),
    };
    debug!(file = file_name, key = %source.key, "parsed topic file");
    Ok(source)
}

/// Parses the topics compiled into the binary.
///
/// # Errors
///
/// Fails if a built-in file has malformed front matter.
pub fn builtin_sources() -> Result<Vec<SectionSource>> {
    BUILTIN
        .iter()
        .map(|(name, content)| parse_topic(name, content))
        .collect()
}

/// Parses every `*.md` file in `dir`, ordered by file name.
///
/// # Errors
///
/// [`BundleError::Read`] if the directory or a file cannot be read, and
/// [`BundleError::Frontmatter`] for malformed front matter.
pub fn load_dir(dir: &Path) -> Result<Vec<SectionSource>> {
    let read_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| BundleError::Read { path, source }
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err(dir))? {
        let path = entry.map_err(read_err(dir))?.path();
        if !path.is_file() {
            debug!(path = %path.display(), "skipping non-file entry");
        } else if path.extension().is_some_and(|ext| ext == "md") {
            files.push(path);
        } else {
            warn!(path = %path.display(), "skipping non-markdown file");
        }
    }
    files.sort();

    let mut sources = Vec::with_capacity(files.len());
    for path in files {
        let content = std::fs::read_to_string(&path).map_err(read_err(&path))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        sources.push(parse_topic(&file_name, &content)?);
    }

    info!(dir = %dir.display(), topics = sources.len(), "loaded topic files");
    Ok(sources)
}

/// Builds the registry from the built-in bundle.
///
/// # Errors
///
/// Fails if the built-in bundle is malformed or inconsistent.
pub fn builtin_registry() -> Result<TopicRegistry> {
    Ok(TopicRegistry::load(builtin_sources()?)?)
}

/// Builds the registry from a content directory.
///
/// # Errors
///
/// Fails if the directory cannot be read or its topics are inconsistent.
pub fn registry_from_dir(dir: &Path) -> Result<TopicRegistry> {
    Ok(TopicRegistry::load(load_dir(dir)?)?)
}
