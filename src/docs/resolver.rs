//! Query resolution against the topic registry.
//!
//! [`TopicResolver::resolve`] maps a free-form query to ranked sections in
//! four tiers. A tier only runs when every tier above it came back empty:
//!
//! 1. exact key (`"Agent Loop"` → `agent-loop`), score `1.0`
//! 2. exact alias, score `1.0`
//! 3. substring of a title, key or alias, scored by how much of the field
//!    the query covers
//! 4. fuzzy token overlap against titles, keys, aliases and tags
//!
//! Results are ordered by score, then key, so identical inputs always give
//! identical output.

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::LookupError;

use super::DocsResult;
use super::registry::TopicRegistry;
use super::types::{DocumentationSection, MatchKind, MatchResult, phrase_form, tokens};

/// Number of results returned when the caller does not pass a limit.
pub const DEFAULT_LIMIT: usize = 5;

/// Minimum fuzzy score for a section to be reported.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.3;

/// Upper bound applied to caller-supplied limits.
pub const DEFAULT_MAX_LIMIT: usize = 50;

/// Ceiling for non-exact scores; `1.0` is reserved for exact matches.
pub const PARTIAL_SCORE_CAP: f64 = 0.99;

/// Below this bigram similarity two different tokens count as unrelated.
const TOKEN_SIMILARITY_FLOOR: f64 = 0.5;

/// Tunable resolver settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolverConfig {
    /// Limit used by [`TopicResolver::resolve_default`].
    pub default_limit: usize,
    /// Minimum score for fuzzy matches.
    pub fuzzy_threshold: f64,
    /// Requested limits above this are clamped.
    pub max_limit: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            max_limit: DEFAULT_MAX_LIMIT,
        }
    }
}

/// Resolves queries against a borrowed registry.
///
/// Holds no state besides its configuration; creating one per request is
/// free.
#[derive(Debug, Clone, Copy)]
pub struct TopicResolver<'a> {
    registry: &'a TopicRegistry,
    config: ResolverConfig,
}

impl<'a> TopicResolver<'a> {
    /// Creates a resolver with the default configuration.
    pub fn new(registry: &'a TopicRegistry) -> Self {
        Self {
            registry,
            config: ResolverConfig::default(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolves `query` with the configured default limit.
    ///
    /// # Errors
    ///
    /// See [`TopicResolver::resolve`].
    pub fn resolve_default(&self, query: &str) -> DocsResult<Vec<MatchResult<'a>>> {
        self.resolve(query, self.config.default_limit)
    }

    /// Returns up to `limit` sections matching `query`, best first.
    ///
    /// An empty vector means nothing relevant was found.
    ///
    /// # Errors
    ///
    /// [`LookupError::InvalidQuery`] if `limit` is zero or the query has no
    /// alphanumeric characters.
    pub fn resolve(&self, query: &str, limit: usize) -> DocsResult<Vec<MatchResult<'a>>> {
        if limit == 0 {
            return Err(LookupError::InvalidQuery(
                "limit must be at least 1".to_string(),
            ));
        }
        if query.trim().is_empty() {
            return Err(LookupError::InvalidQuery(
                "query must not be empty".to_string(),
            ));
        }
        let query_tokens = tokens(query);
        if query_tokens.is_empty() {
            return Err(LookupError::InvalidQuery(format!(
                "query '{query}' has no searchable characters"
            )));
        }
        let limit = limit.min(self.config.max_limit.max(1));

        if let Ok(section) = self.registry.get(&query_tokens.join("-")) {
            debug!(query, key = section.key(), "resolved by exact key");
            return Ok(vec![exact(section, MatchKind::ExactKey)]);
        }

        let phrase = query_tokens.join(" ");
        if let Some(section) = self.registry.by_alias_phrase(&phrase) {
            debug!(query, key = section.key(), "resolved by exact alias");
            return Ok(vec![exact(section, MatchKind::ExactAlias)]);
        }

        let mut matches = self.substring_matches(&phrase);
        if matches.is_empty() {
            matches = self.fuzzy_matches(&query_tokens);
        }

        matches.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.section_key().cmp(b.section_key()))
        });
        matches.truncate(limit);

        debug!(
            query,
            results = matches.len(),
            kind = matches.first().map(|m| m.match_kind.as_str()),
            "resolved query"
        );
        Ok(matches)
    }

    fn substring_matches(&self, phrase: &str) -> Vec<MatchResult<'a>> {
        let query_len = phrase.chars().count();

        self.registry
            .list()
            .filter_map(|section| {
                let best = searchable_fields(section)
                    .map(phrase_form)
                    .filter(|field| field.contains(phrase))
                    .map(|field| ratio(query_len, field.chars().count()))
                    .fold(None, |best: Option<f64>, score| {
                        Some(best.map_or(score, |b| b.max(score)))
                    })?;

                Some(MatchResult {
                    section,
                    score: best.min(PARTIAL_SCORE_CAP),
                    match_kind: MatchKind::Substring,
                })
            })
            .collect()
    }

    #[allow(clippy::cast_precision_loss)]
    fn fuzzy_matches(&self, query_tokens: &[String]) -> Vec<MatchResult<'a>> {
        self.registry
            .list()
            .filter_map(|section| {
                let vocabulary: BTreeSet<String> = searchable_fields(section)
                    .chain(section.tags().iter().map(String::as_str))
                    .flat_map(tokens)
                    .collect();

                let total: f64 = query_tokens
                    .iter()
                    .map(|token| best_token_similarity(token, &vocabulary))
                    .sum();
                let score = (total / query_tokens.len() as f64).min(PARTIAL_SCORE_CAP);

                // A section sharing nothing with the query is never relevant,
                // whatever the threshold.
                let relevant = score > 0.0 && score >= self.config.fuzzy_threshold;
                relevant.then_some(MatchResult {
                    section,
                    score,
                    match_kind: MatchKind::Fuzzy,
                })
            })
            .collect()
    }
}

impl TopicRegistry {
    /// Shorthand for [`TopicResolver::new`] with a configuration.
    pub fn resolver(&self, config: ResolverConfig) -> TopicResolver<'_> {
        TopicResolver::new(self).with_config(config)
    }
}

fn exact(section: &DocumentationSection, match_kind: MatchKind) -> MatchResult<'_> {
    MatchResult {
        section,
        score: 1.0,
        match_kind,
    }
}

/// Title, key and aliases: the strings a query may be a substring of.
fn searchable_fields(section: &DocumentationSection) -> impl Iterator<Item = &str> {
    [section.title(), section.key()]
        .into_iter()
        .chain(section.aliases().iter().map(String::as_str))
}

#[allow(clippy::cast_precision_loss)]
fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64
}

fn best_token_similarity(token: &str, vocabulary: &BTreeSet<String>) -> f64 {
    if vocabulary.contains(token) {
        return 1.0;
    }
    vocabulary
        .iter()
        .map(|candidate| bigram_dice(token, candidate))
        .filter(|&similarity| similarity >= TOKEN_SIMILARITY_FLOOR)
        .fold(0.0, f64::max)
}

/// Sørensen–Dice coefficient over character bigrams.
fn bigram_dice(a: &str, b: &str) -> f64 {
    let left = bigrams(a);
    let mut right = bigrams(b);
    if left.is_empty() || right.is_empty() {
        return if a == b { 1.0 } else { 0.0 };
    }

    let total = left.len() + right.len();
    let mut shared = 0;
    for pair in &left {
        if let Some(pos) = right.iter().position(|p| p == pair) {
            right.swap_remove(pos);
            shared += 1;
        }
    }
    ratio(2 * shared, total)
}

fn bigrams(token: &str) -> Vec<(char, char)> {
    let chars: Vec<char> = token.chars().collect();
    chars.windows(2).map(|w| (w[0], w[1])).collect()
}
