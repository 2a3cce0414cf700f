//! Template engine implementation

mod blocks;
mod cache;
mod helpers;
mod node;
mod parse;
mod render;
mod tokenize;

use std::collections::HashMap;
use std::sync::Arc;

use crate::template::context::TemplateContext;
use crate::template::error::TemplateError;
use crate::template::options::Options;
use crate::template::value::Value;

use cache::Parsed;
use render::Renderer;

pub use cache::{ParseCache, cache_clear};
pub use tokenize::Delimiters;

/// Partial templates by name
pub type Partials = HashMap<String, String>;

/// A template parsed once and rendered any number of times
#[derive(Debug, Clone)]
pub struct Template {
    source: Arc<str>,
    delimiters: Delimiters,
    elements: Parsed,
    cache: Arc<ParseCache>,
}

impl Template {
    /// Parse `text` with the default `{{ }}` delimiters
    pub fn new(text: &str) -> Result<Self, TemplateError> {
        Self::with_delimiters(text, Delimiters::default())
    }

    /// Parse `text` with custom initial delimiters
    pub fn with_delimiters(text: &str, delimiters: Delimiters) -> Result<Self, TemplateError> {
        Self::compile(text, delimiters, ParseCache::global())
    }

    /// Parse `text` through `cache`
    ///
    /// Partials and lambda results rendered later by this template go through
    /// the same cache.
    pub fn compile(
        text: &str,
        delimiters: Delimiters,
        cache: Arc<ParseCache>,
    ) -> Result<Self, TemplateError> {
        let elements = cache.parse(text, &delimiters)?;
        Ok(Self {
            source: Arc::from(text),
            delimiters,
            elements,
            cache,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    pub fn render(
        &self,
        data: &Value,
        partials: &Partials,
        options: &Options,
    ) -> Result<String, TemplateError> {
        let mut ctx = TemplateContext::new(data.clone());
        self.render_with_context(&mut ctx, partials, options)
    }

    /// Render against an existing context (e.g. one with extra scopes pushed)
    pub fn render_with_context(
        &self,
        ctx: &mut TemplateContext,
        partials: &Partials,
        options: &Options,
    ) -> Result<String, TemplateError> {
        let renderer = Renderer {
            partials,
            options,
            cache: &self.cache,
        };
        renderer.render_elements(&self.source, &self.elements, ctx)
    }
}

/// Template engine carrying partials, delimiters, options and a parse cache
#[derive(Debug, Clone)]
pub struct TemplateEngine {
    partials: Partials,
    delimiters: Delimiters,
    options: Options,
    cache: Arc<ParseCache>,
}

impl TemplateEngine {
    /// Create a new template engine using the process-wide cache
    pub fn new() -> Self {
        Self {
            partials: Partials::new(),
            delimiters: Delimiters::default(),
            options: Options::default(),
            cache: ParseCache::global(),
        }
    }

    pub fn with_partials(mut self, partials: Partials) -> Self {
        self.partials = partials;
        self
    }

    pub fn with_partial(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.partials.insert(name.into(), text.into());
        self
    }

    pub fn with_delimiters(mut self, delimiters: Delimiters) -> Self {
        self.delimiters = delimiters;
        self
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Use a private cache instead of the process-wide one
    pub fn with_cache(mut self, cache: Arc<ParseCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn partials(&self) -> &Partials {
        &self.partials
    }

    pub fn cache(&self) -> &Arc<ParseCache> {
        &self.cache
    }

    /// Render a template with the given data
    pub fn render(&self, template: &str, data: &Value) -> Result<String, TemplateError> {
        let mut ctx = TemplateContext::new(data.clone());
        self.render_with_context(template, &mut ctx)
    }

    /// Render a template against an existing context
    pub fn render_with_context(
        &self,
        template: &str,
        ctx: &mut TemplateContext,
    ) -> Result<String, TemplateError> {
        let renderer = Renderer {
            partials: &self.partials,
            options: &self.options,
            cache: &self.cache,
        };
        renderer.render_text(template, &self.delimiters, ctx)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to render a template with default settings
pub fn render(template: &str, data: &Value) -> Result<String, TemplateError> {
    TemplateEngine::new().render(template, data)
}

#[cfg(test)]
mod tests;
