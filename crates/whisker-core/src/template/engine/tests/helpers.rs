//! Shared test helpers for template engine tests

use std::sync::Arc;

use serde_json::Value as Json;

use crate::template::engine::{ParseCache, Partials, TemplateEngine};
use crate::template::error::TemplateError;
use crate::template::value::Value;

/// Engine with a private cache so tests never observe each other's parses
pub(super) fn engine() -> TemplateEngine {
    TemplateEngine::new().with_cache(Arc::new(ParseCache::new()))
}

/// Build a partials table from `(name, text)` pairs
pub(super) fn partials(entries: &[(&str, &str)]) -> Partials {
    entries
        .iter()
        .map(|(name, text)| (name.to_string(), text.to_string()))
        .collect()
}

/// Render `template` against JSON data
pub(super) fn render_json(template: &str, data: Json) -> String {
    try_render_json(template, data).unwrap()
}

pub(super) fn try_render_json(template: &str, data: Json) -> Result<String, TemplateError> {
    engine().render(template, &Value::from(data))
}

/// Render `template` against JSON data with partials
pub(super) fn render_with_partials(template: &str, data: Json, entries: &[(&str, &str)]) -> String {
    engine()
        .with_partials(partials(entries))
        .render(template, &Value::from(data))
        .unwrap()
}
