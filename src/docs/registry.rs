//! The topic registry.
//!
//! Holds every [`DocumentationSection`] for the lifetime of the process.
//! The registry is validated once in [`TopicRegistry::load`] and offers no
//! way to change it afterwards, so it can be shared between concurrent
//! requests behind a plain `Arc`.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, info};

use crate::error::{LookupError, RegistryError};

use super::DocsResult;
use super::types::{DocumentationSection, SectionSource, is_valid_key, phrase_form};

/// Read-only set of documentation sections, indexed by key and alias.
#[derive(Debug)]
pub struct TopicRegistry {
    sections: Vec<DocumentationSection>,
    by_key: HashMap<String, usize>,
    /// Alias phrase form → owning section.
    by_alias: HashMap<String, usize>,
}

impl TopicRegistry {
    /// Builds a registry from raw sources, keeping their order.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::InvalidKey`] if a key is not lowercase-hyphenated.
    /// - [`RegistryError::DuplicateKey`] if two sources share a key.
    /// - [`RegistryError::EmptyBody`] if a body is empty or whitespace.
    /// - [`RegistryError::DuplicateAlias`] if two sections claim the same
    ///   alias, or an alias names another section's key.
    pub fn load<I>(sources: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = SectionSource>,
    {
        let mut sections: Vec<DocumentationSection> = Vec::new();
        let mut by_key: HashMap<String, usize> = HashMap::new();

        for source in sources {
            if !is_valid_key(&source.key) {
                return Err(RegistryError::InvalidKey(source.key));
            }
            if by_key.contains_key(&source.key) {
                return Err(RegistryError::DuplicateKey(source.key));
            }
            if source.body.trim().is_empty() {
                return Err(RegistryError::EmptyBody(source.key));
            }

            by_key.insert(source.key.clone(), sections.len());
            sections.push(DocumentationSection::from_source(source));
        }

        // Keys are already lowercase-hyphenated, so their phrase form is
        // what an alias would look like if it tried to shadow them.
        let key_phrases: HashMap<String, usize> = sections
            .iter()
            .enumerate()
            .map(|(idx, s)| (phrase_form(s.key()), idx))
            .collect();

        let mut by_alias: HashMap<String, usize> = HashMap::new();
        for (idx, section) in sections.iter().enumerate() {
            for alias in section.aliases() {
                let phrase = phrase_form(alias);

                let owner = by_alias
                    .get(&phrase)
                    .or_else(|| key_phrases.get(&phrase))
                    .copied()
                    .filter(|&owner| owner != idx);
                if let Some(owner) = owner {
                    return Err(RegistryError::DuplicateAlias {
                        alias: alias.clone(),
                        key: section.key().to_string(),
                        existing: sections[owner].key().to_string(),
                    });
                }

                by_alias.insert(phrase, idx);
            }
            debug!(
                key = section.key(),
                aliases = section.aliases().len(),
                tags = section.tags().len(),
                "registered topic"
            );
        }

        info!(
            topics = sections.len(),
            aliases = by_alias.len(),
            "topic registry loaded"
        );

        Ok(Self {
            sections,
            by_key,
            by_alias,
        })
    }

    /// Returns the section with exactly this canonical key.
    ///
    /// # Errors
    ///
    /// [`LookupError::NotFound`] if no section has the key.
    pub fn get(&self, key: &str) -> DocsResult<&DocumentationSection> {
        self.by_key
            .get(key)
            .map(|&idx| &self.sections[idx])
            .ok_or_else(|| LookupError::NotFound(key.to_string()))
    }

    /// Iterates over all sections in load order.
    ///
    /// The iterator borrows the registry; call again to restart.
    pub fn list(&self) -> impl ExactSizeIterator<Item = &DocumentationSection> + Clone + '_ {
        self.sections.iter()
    }

    /// Iterates over the sections carrying `tag` (case-insensitive), in load order.
    pub fn list_by_tag<'a>(
        &'a self,
        tag: &'a str,
    ) -> impl Iterator<Item = &'a DocumentationSection> + Clone + 'a {
        self.sections.iter().filter(move |s| s.has_tag(tag))
    }

    /// All tag labels in use, sorted and deduplicated.
    pub fn tags(&self) -> Vec<String> {
        self.sections
            .iter()
            .flat_map(DocumentationSection::tags)
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the registry holds no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Section owning the alias with this phrase form, if any.
    pub(crate) fn by_alias_phrase(&self, phrase: &str) -> Option<&DocumentationSection> {
        self.by_alias.get(phrase).map(|&idx| &self.sections[idx])
    }
}
