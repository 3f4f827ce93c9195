//! Data model for documentation topics.
//!
//! Also hosts the string normalization shared by the registry and the
//! resolver, so that both sides agree on what "the same key" or "the same
//! alias" means.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Raw input for one registry entry, as read from a content bundle.
///
/// Only `key`, `title` and `body` are required by [`TopicRegistry::load`];
/// everything else defaults to empty.
///
/// [`TopicRegistry::load`]: super::registry::TopicRegistry::load
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSource {
    /// Canonical key, lowercase and hyphenated.
    pub key: String,
    /// Display title.
    pub title: String,
    /// Alternate names for the topic.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Category labels.
    #[serde(default)]
    pub tags: Vec<String>,
    /// One-line summary. Derived from the title when absent.
    #[serde(default)]
    pub description: Option<String>,
    /// Full markdown content.
    #[serde(default)]
    pub body: String,
}

impl SectionSource {
    /// Creates a source with the required fields only.
    pub fn new(
        key: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            body: body.into(),
            ..Self::default()
        }
    }

    /// Adds aliases.
    #[must_use]
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Adds tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// One documentation topic held by the registry.
///
/// Instances are only created by the registry and never change afterwards,
/// hence the accessor-only API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentationSection {
    key: String,
    title: String,
    aliases: Vec<String>,
    tags: Vec<String>,
    description: String,
    body: String,
}

impl DocumentationSection {
    pub(crate) fn from_source(source: SectionSource) -> Self {
        let description = source
            .description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| format!("Documentation on {} in Strands Agents.", source.title));

        let mut aliases: Vec<String> = Vec::with_capacity(source.aliases.len());
        for alias in source.aliases {
            let phrase = phrase_form(&alias);
            if phrase.is_empty() || aliases.iter().any(|a| phrase_form(a) == phrase) {
                continue;
            }
            aliases.push(alias);
        }

        let mut tags: Vec<String> = Vec::with_capacity(source.tags.len());
        for tag in source.tags {
            let tag = tag.trim().to_lowercase();
            if !tag.is_empty() && !tags.contains(&tag) {
                tags.push(tag);
            }
        }

        Self {
            key: source.key,
            title: source.title,
            aliases,
            tags,
            description,
            body: source.body,
        }
    }

    /// Canonical key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Display title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Aliases as written in the source, deduplicated.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Category labels, lowercased and deduplicated.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// One-line summary.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Full markdown content.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Whether the section carries `tag`, ignoring case.
    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = phrase_form(tag);
        self.tags.iter().any(|t| phrase_form(t) == wanted)
    }
}

/// How a query matched a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchKind {
    /// The query is the canonical key.
    ExactKey,
    /// The query is one of the aliases.
    ExactAlias,
    /// The query is contained in the title, key or an alias.
    Substring,
    /// Token overlap above the relevance threshold.
    Fuzzy,
}

impl MatchKind {
    /// Wire name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ExactKey => "exact-key",
            Self::ExactAlias => "exact-alias",
            Self::Substring => "substring",
            Self::Fuzzy => "fuzzy",
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A ranked candidate produced by the resolver.
///
/// Borrows the section from the registry it was resolved against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult<'a> {
    /// The matched section.
    pub section: &'a DocumentationSection,
    /// Confidence in `[0.0, 1.0]`; `1.0` only for exact matches.
    pub score: f64,
    /// Which tier produced the match.
    pub match_kind: MatchKind,
}

impl MatchResult<'_> {
    /// Key of the matched section.
    pub fn section_key(&self) -> &str {
        self.section.key()
    }
}

/// Lowercases `text` and splits it on anything that is not alphanumeric.
pub fn tokens(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Tokens joined by `-`: the shape canonical keys are written in.
pub fn key_form(text: &str) -> String {
    tokens(text).join("-")
}

/// Tokens joined by a single space: the shape aliases are compared in.
pub fn phrase_form(text: &str) -> String {
    tokens(text).join(" ")
}

/// Validates a canonical key: `^[a-z0-9]+(-[a-z0-9]+)*$`.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key.split('-').all(|part| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        })
}

/// Turns a file stem such as `multi_agent` into a title such as `Multi Agent`.
pub fn title_from_stem(stem: &str) -> String {
    stem.split(['_', '-', ' '])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_forms() {
        assert_eq!(tokens("  Agent_Loop!! "), vec!["agent", "loop"]);
        assert_eq!(key_form("Agent Loop"), "agent-loop");
        assert_eq!(key_form("multi_agent"), "multi-agent");
        assert_eq!(phrase_form("Event-Loop"), "event loop");
        assert_eq!(phrase_form("   "), "");
    }

    #[test]
    fn test_is_valid_key() {
        assert!(is_valid_key("agent-loop"));
        assert!(is_valid_key("tools"));
        assert!(is_valid_key("a2a"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("Agent-Loop"));
        assert!(!is_valid_key("agent_loop"));
        assert!(!is_valid_key("agent--loop"));
        assert!(!is_valid_key("-tools"));
        assert!(!is_valid_key("tools-"));
    }

    #[test]
    fn test_title_from_stem() {
        assert_eq!(title_from_stem("agent_loop"), "Agent Loop");
        assert_eq!(title_from_stem("structured-output"), "Structured Output");
        assert_eq!(title_from_stem("HOOKS"), "Hooks");
    }

    #[test]
    fn test_section_defaults_and_alias_dedup() {
        let section = DocumentationSection::from_source(
            SectionSource::new("tools", "Tools", "body")
                .with_aliases(["Tool Use", "tool-use", "  "]),
        );
        assert_eq!(
            section.description(),
            "Documentation on Tools in Strands Agents."
        );
        assert_eq!(section.aliases(), ["Tool Use".to_string()]);
    }

    #[test]
    fn test_tags_lowercased_and_matched_ignoring_case() {
        let section = DocumentationSection::from_source(
            SectionSource::new("swarm", "Swarm", "body")
                .with_tags(["Multi-Agent", " multi-agent ", ""]),
        );
        assert_eq!(section.tags(), ["multi-agent".to_string()]);
        assert!(section.has_tag("multi-agent"));
        assert!(section.has_tag("MULTI AGENT"));
        assert!(!section.has_tag("state"));
    }

    #[test]
    fn test_match_kind_wire_names() {
        assert_eq!(
            serde_json::to_string(&MatchKind::ExactAlias).unwrap(),
            "\"exact-alias\""
        );
        assert_eq!(MatchKind::Fuzzy.to_string(), "fuzzy");
    }
}
