//! Memoized parsing
//!
//! Parsed element sequences are cached per template text and delimiter pair.
//! Section bodies are owned by their parsed parent, so a cached entry always
//! covers the whole template. Entries live until [`ParseCache::clear`]; there is
//! no eviction.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use dashmap::DashMap;

use super::node::Element;
use super::parse::parse;
use super::tokenize::Delimiters;
use crate::template::error::TemplateError;

/// Parsed template shared between renders
pub(crate) type Parsed = Arc<Vec<Element>>;

static GLOBAL: LazyLock<Arc<ParseCache>> = LazyLock::new(|| Arc::new(ParseCache::new()));

/// Thread-safe parse cache
///
/// Concurrent renders may parse the same template twice; the last insert wins,
/// which is harmless since parsing is deterministic.
#[derive(Debug, Default)]
pub struct ParseCache {
    entries: DashMap<Arc<str>, HashMap<Delimiters, Parsed>>,
}

impl ParseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache used unless another one is supplied
    pub fn global() -> Arc<ParseCache> {
        Arc::clone(&GLOBAL)
    }

    /// Parse a whole template, reusing a cached result when available
    pub(crate) fn parse(
        &self,
        template: &str,
        delimiters: &Delimiters,
    ) -> Result<Parsed, TemplateError> {
        if !delimiters.is_valid() {
            return Err(TemplateError::Delimiter {
                tag: format!("{} {}", delimiters.left, delimiters.right),
                line: 1,
                column: 1,
            });
        }

        if let Some(parsed) = self
            .entries
            .get(template)
            .and_then(|parses| parses.get(delimiters).cloned())
        {
            tracing::trace!(len = template.len(), "parse cache hit");
            return Ok(parsed);
        }

        tracing::trace!(len = template.len(), "parse cache miss");
        let parsed = match parse(template, 0, template.len(), delimiters) {
            Ok(elements) => Arc::new(elements),
            Err(err) => {
                tracing::debug!(error = %err, "template failed to parse");
                return Err(err);
            }
        };

        self.entries
            .entry(Arc::from(template))
            .or_default()
            .insert(delimiters.clone(), Arc::clone(&parsed));
        Ok(parsed)
    }

    /// Drop every cached parse
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of cached (template, delimiters) combinations
    pub fn len(&self) -> usize {
        self.entries.iter().map(|parses| parses.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Clear the process-wide parse cache
pub fn cache_clear() {
    GLOBAL.clear();
}
