//! Rendering of parsed templates

use super::cache::ParseCache;
use super::helpers::{indent_lines, indent_non_empty};
use super::node::{Element, Node};
use super::tokenize::{Delimiters, TagKind};
use super::Partials;
use crate::template::context::TemplateContext;
use crate::template::error::TemplateError;
use crate::template::options::Options;
use crate::template::value::{Invocation, Lambda, LambdaKind, Value};

/// Everything a render needs besides the context
pub(crate) struct Renderer<'a> {
    pub partials: &'a Partials,
    pub options: &'a Options,
    pub cache: &'a ParseCache,
}

impl Renderer<'_> {
    /// Parse (through the cache) and render a template text
    pub fn render_text(
        &self,
        text: &str,
        delimiters: &Delimiters,
        ctx: &mut TemplateContext,
    ) -> Result<String, TemplateError> {
        let elements = self.cache.parse(text, delimiters)?;
        self.render_elements(text, &elements, ctx)
    }

    pub fn render_elements(
        &self,
        source: &str,
        elements: &[Element],
        ctx: &mut TemplateContext,
    ) -> Result<String, TemplateError> {
        let mut output = String::new();
        for element in elements {
            match element {
                Element::Text(range) => output.push_str(&source[range.clone()]),
                Element::Node(node) => output.push_str(&self.render_node(source, node, ctx)?),
            }
        }
        Ok(output)
    }

    fn render_node(
        &self,
        source: &str,
        node: &Node,
        ctx: &mut TemplateContext,
    ) -> Result<String, TemplateError> {
        match node.kind {
            TagKind::Variable => self.interpolate(source, node, ctx, true),
            TagKind::Ampersand | TagKind::Triple => self.interpolate(source, node, ctx, false),
            TagKind::Section => self.section(source, node, ctx),
            TagKind::Inverted => self.inverted(source, node, ctx),
            TagKind::Partial => self.partial(source, node, ctx),
            TagKind::Block => self.block(source, node, ctx),
            TagKind::Parent => self.parent(source, node, ctx),
            TagKind::Comment | TagKind::Delimiter | TagKind::Closing => Ok(String::new()),
        }
    }

    /// `{{name}}`, `{{&name}}` and `{{{name}}}`
    fn interpolate(
        &self,
        source: &str,
        node: &Node,
        ctx: &mut TemplateContext,
        escaped: bool,
    ) -> Result<String, TemplateError> {
        let Some(value) = ctx.get(node.name(source))? else {
            return self.options.on_missing();
        };

        let text = match &value {
            Value::Lambda(lambda) => {
                let result = call(lambda, None, Some(""))?;
                match lambda.kind() {
                    LambdaKind::Template => {
                        let fragment = self.options.stringify(&result)?;
                        self.render_text(&fragment, &Delimiters::default(), ctx)?
                    }
                    LambdaKind::Value => self.options.stringify(&result)?,
                }
            }
            other => self.options.stringify(other)?,
        };

        if escaped {
            self.options.escape(&text)
        } else {
            Ok(text)
        }
    }

    /// `{{#name}}...{{/name}}`
    fn section(
        &self,
        source: &str,
        node: &Node,
        ctx: &mut TemplateContext,
    ) -> Result<String, TemplateError> {
        let Some(value) = ctx.get(node.name(source))? else {
            return self.options.on_missing();
        };
        if !value.is_truthy() {
            return Ok(String::new());
        }

        let value = match value {
            Value::Lambda(lambda) => {
                let result = call(&lambda, Some(&source[node.inner()]), None)?;
                if lambda.kind() == LambdaKind::Template {
                    let fragment = self.options.stringify(&result)?;
                    return self.render_text(&fragment, &node.delimiters, ctx);
                }
                if !result.is_truthy() {
                    return Ok(String::new());
                }
                result
            }
            other => other,
        };

        match value {
            Value::List(items) => {
                let mut output = String::new();
                for item in items.iter() {
                    output.push_str(&self.render_scoped(source, node, item.clone(), ctx)?);
                }
                Ok(output)
            }
            scope => self.render_scoped(source, node, scope, ctx),
        }
    }

    fn render_scoped(
        &self,
        source: &str,
        node: &Node,
        scope: Value,
        ctx: &mut TemplateContext,
    ) -> Result<String, TemplateError> {
        ctx.push(scope);
        let rendered = self.render_elements(source, node.children(), ctx);
        ctx.pop();
        rendered
    }

    /// `{{^name}}...{{/name}}`; a missing name counts as falsy
    fn inverted(
        &self,
        source: &str,
        node: &Node,
        ctx: &mut TemplateContext,
    ) -> Result<String, TemplateError> {
        match ctx.get(node.name(source))? {
            Some(value) if value.is_truthy() => Ok(String::new()),
            _ => self.render_elements(source, node.children(), ctx),
        }
    }

    /// `{{>name}}`, or `{{>*name}}` to take the partial name from the context
    fn partial(
        &self,
        source: &str,
        node: &Node,
        ctx: &mut TemplateContext,
    ) -> Result<String, TemplateError> {
        let name = node.name(source);
        let resolved = match name.strip_prefix('*') {
            Some(dynamic) => ctx
                .get(dynamic.trim())?
                .and_then(|value| value.as_str().map(str::to_string)),
            None => Some(name.to_string()),
        };

        let Some(template) = resolved.as_deref().and_then(|name| self.partials.get(name)) else {
            tracing::debug!(partial = name, "partial not found");
            return self.options.on_missing();
        };

        if node.placement.standalone {
            let indented = indent_non_empty(template, node.placement.before(source));
            self.render_text(&indented, &Delimiters::default(), ctx)
        } else {
            self.render_text(template, &Delimiters::default(), ctx)
        }
    }

    /// `{{$name}}default{{/name}}`
    fn block(
        &self,
        source: &str,
        node: &Node,
        ctx: &mut TemplateContext,
    ) -> Result<String, TemplateError> {
        let name = node.name(source);
        let slot = node.slot();
        let text = match ctx.block(name) {
            Some(text) => text.to_string(),
            None => slot.map(|slot| slot.default.clone()).unwrap_or_default(),
        };

        let text = if node.placement.standalone {
            let prefix = slot
                .and_then(|slot| slot.indent.as_deref())
                .filter(|indent| !indent.is_empty())
                .unwrap_or_else(|| node.placement.before(source));
            indent_lines(&text, prefix)
        } else {
            text
        };

        self.render_text(&text, &Delimiters::default(), ctx)
    }

    /// `{{<name}}{{$block}}override{{/block}}{{/name}}`
    fn parent(
        &self,
        source: &str,
        node: &Node,
        ctx: &mut TemplateContext,
    ) -> Result<String, TemplateError> {
        let name = node.name(source);
        let defaults: Vec<(String, String)> = node
            .children()
            .iter()
            .filter_map(|element| match element {
                Element::Node(child) if child.kind == TagKind::Block => Some((
                    child.name(source).to_string(),
                    child.slot().map(|slot| slot.default.clone()).unwrap_or_default(),
                )),
                _ => None,
            })
            .collect();

        ctx.with_blocks(defaults, |ctx| {
            let Some(template) = self.partials.get(name) else {
                tracing::debug!(parent = name, "parent partial not found");
                return self.options.on_missing();
            };

            if node.placement.standalone {
                let indented = indent_lines(template, node.placement.before(source));
                self.render_text(&indented, &Delimiters::default(), ctx)
            } else {
                self.render_text(template, &Delimiters::default(), ctx)
            }
        })
    }
}

/// Invoke a lambda with `first`, falling back to `second` if the arity does not fit
fn call(
    lambda: &Lambda,
    first: Option<&str>,
    second: Option<&str>,
) -> Result<Value, TemplateError> {
    match lambda.invoke(first)? {
        Invocation::Returned(value) => Ok(value),
        Invocation::Rejected => match lambda.invoke(second)? {
            Invocation::Returned(value) => Ok(value),
            Invocation::Rejected => Ok(Value::Null),
        },
    }
}
