//! Parsed template representation
//!
//! Nodes never copy template text: every string is a byte range into the
//! template the node was parsed from.

use std::ops::Range;

use super::helpers::{dedent, is_whitespace, line_end, line_start, position};
use super::tokenize::{Delimiters, TagKind, Token};
use crate::template::error::TemplateError;

/// One item of a parsed template
#[derive(Debug, Clone)]
pub(crate) enum Element {
    /// Literal text copied to the output
    Text(Range<usize>),
    Node(Node),
}

/// Where a tag sits in the template and how much of it the parser consumes
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Placement {
    pub tag_start: usize,
    pub tag_end: usize,
    pub line_start: usize,
    pub line_end: usize,
    pub standalone: bool,
    /// Consumed range; the whole line for standalone tags
    pub actual_start: usize,
    pub actual_end: usize,
}

impl Placement {
    pub fn new(template: &str, token: &Token) -> Self {
        let line_start = line_start(template, token.start);
        let line_end = line_end(template, token.end);
        let standalone = token.kind.can_stand_alone()
            && is_whitespace(&template[line_start..token.start])
            && is_whitespace(&template[token.end..line_end]);
        let (actual_start, actual_end) = if standalone {
            (line_start, line_end)
        } else {
            (token.start, token.end)
        };
        Self {
            tag_start: token.start,
            tag_end: token.end,
            line_start,
            line_end,
            standalone,
            actual_start,
            actual_end,
        }
    }

    /// Text between the start of the line and the tag
    pub fn before<'t>(&self, template: &'t str) -> &'t str {
        &template[self.line_start..self.tag_start]
    }

    /// Text between the tag and the end of the line
    pub fn after<'t>(&self, template: &'t str) -> &'t str {
        &template[self.tag_end..self.line_end]
    }

    /// Two adjacent tags that together occupy a whitespace-only line
    pub fn pairs_with(&self, next: &Placement, template: &str) -> bool {
        self.tag_end == next.tag_start
            && is_whitespace(self.before(template))
            && is_whitespace(next.after(template))
    }
}

/// Default content of an inheritance block
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Slot {
    pub default: String,
    /// Indentation removed from a standalone block's default
    pub indent: Option<String>,
}

impl Slot {
    pub fn new(text: &str, standalone: bool) -> Self {
        if !standalone {
            return Self {
                default: text.to_string(),
                indent: None,
            };
        }
        let dedented = dedent(text);
        let first_line = text.split('\n').next().unwrap_or_default();
        let first_dedented = dedented.split('\n').next().unwrap_or_default();
        let indent = first_line
            .strip_suffix(first_dedented)
            .unwrap_or(first_line)
            .to_string();
        Self {
            default: dedented,
            indent: Some(indent),
        }
    }
}

/// Body of a section-like tag
#[derive(Debug, Clone)]
pub(crate) struct Body {
    pub closing: Placement,
    pub children: Vec<Element>,
    /// Present on inheritance blocks only
    pub slot: Option<Slot>,
}

/// A parsed tag
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub kind: TagKind,
    /// Trimmed tag content
    pub content: Range<usize>,
    pub placement: Placement,
    /// Delimiters active where the tag was found
    pub delimiters: Delimiters,
    pub body: Option<Body>,
}

impl Node {
    pub fn new(template: &str, token: &Token, delimiters: Delimiters) -> Self {
        Self {
            kind: token.kind,
            content: token.content.clone(),
            placement: Placement::new(template, token),
            delimiters,
            body: None,
        }
    }

    pub fn name<'t>(&self, template: &'t str) -> &'t str {
        &template[self.content.clone()]
    }

    /// Where the enclosing parse continues after this node
    pub fn parse_end(&self) -> usize {
        self.body
            .as_ref()
            .map_or(self.placement.actual_end, |body| body.closing.actual_end)
    }

    /// Raw text between the opening and the closing tag
    pub fn inner(&self) -> Range<usize> {
        let start = self.placement.actual_end;
        match &self.body {
            Some(body) => start..body.closing.actual_start.max(start),
            None => start..start,
        }
    }

    pub fn children(&self) -> &[Element] {
        match &self.body {
            Some(body) => &body.children,
            None => &[],
        }
    }

    pub fn slot(&self) -> Option<&Slot> {
        self.body.as_ref().and_then(|body| body.slot.as_ref())
    }

    /// Recompute the block default after its placement changed
    pub fn refresh_slot(&mut self, template: &str) {
        let inner = self.inner();
        let standalone = self.placement.standalone;
        if let Some(body) = self.body.as_mut() {
            body.slot = Some(Slot::new(&template[inner], standalone));
        }
    }

    /// The tag as written, with normalized spacing: `{{# name }}`
    pub fn tag_string(&self, template: &str) -> String {
        tag_string(self.kind, self.name(template), &self.delimiters)
    }

    pub fn error_position(&self, template: &str) -> (usize, usize) {
        position(template, self.placement.tag_start)
    }

    pub fn missing_closing(&self, template: &str) -> TemplateError {
        let (line, column) = self.error_position(template);
        TemplateError::MissingClosingTag {
            tag: self.tag_string(template),
            line,
            column,
        }
    }
}

pub(crate) fn tag_string(kind: TagKind, content: &str, delimiters: &Delimiters) -> String {
    format!(
        "{}{} {} {}{}",
        delimiters.left,
        kind.sigil(),
        content,
        kind.terminator(),
        delimiters.right
    )
}
