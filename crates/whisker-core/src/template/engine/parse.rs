//! Template parser
//!
//! Turns a span of a template into a sequence of [`Element`]s. Section bodies are
//! parsed recursively and owned by their opening node.

use super::blocks::find_closing;
use super::helpers::position;
use super::node::{Body, Element, Node, Placement, tag_string};
use super::tokenize::{Delimiters, TagKind, Token, TokenStream};
use crate::template::error::TemplateError;

/// Parse `template[start..end]` starting with `delimiters`
pub(crate) fn parse(
    template: &str,
    start: usize,
    end: usize,
    delimiters: &Delimiters,
) -> Result<Vec<Element>, TemplateError> {
    let mut elements = Vec::new();
    let mut tokens = TokenStream::new(template, start, end, delimiters.clone());
    let mut cursor = start;

    while let Some(token) = tokens.next() {
        let active = tokens.delimiters().clone();

        let switch_to = match token.kind {
            TagKind::Closing => return Err(stray_closing(template, &token, &active)),
            TagKind::Delimiter => Some(parse_delimiters(template, &token, &active)?),
            _ => None,
        };

        let mut node = Node::new(template, &token, active);
        if node.kind.opens_section() {
            attach_body(template, &mut node, end)?;
        }

        push_text(&mut elements, cursor, node.placement.actual_start);
        cursor = node.parse_end().max(cursor);
        tokens.seek(cursor);

        if let Some(next) = switch_to {
            tokens.set_delimiters(next);
        }
        if !node.kind.is_ignorable() {
            elements.push(Element::Node(node));
        }
    }

    push_text(&mut elements, cursor, end);
    Ok(elements)
}

fn push_text(elements: &mut Vec<Element>, from: usize, to: usize) {
    if from < to {
        elements.push(Element::Text(from..to));
    }
}

/// Locate the closing tag of a section-like node, parse its body and apply the
/// whitespace rules of inheritance tags
fn attach_body(template: &str, node: &mut Node, end: usize) -> Result<(), TemplateError> {
    let name = node.name(template);
    let closing_token = find_closing(
        template,
        node.placement.actual_end,
        end,
        &node.delimiters,
        node.kind,
        name,
    )
    .ok_or_else(|| node.missing_closing(template))?;

    let closing = Placement::new(template, &closing_token);
    let children = parse(
        template,
        node.placement.actual_end,
        closing.actual_start.max(node.placement.actual_end),
        &node.delimiters,
    )?;
    node.body = Some(Body {
        closing,
        children,
        slot: None,
    });

    match node.kind {
        TagKind::Block => adjust_block(template, node),
        TagKind::Parent => adjust_parent(template, node),
        _ => {}
    }
    Ok(())
}

/// `{{$name}}` and `{{/name}}` on one otherwise blank line
fn adjust_block(template: &str, node: &mut Node) {
    if let Some(body) = node.body.as_mut() {
        if node.placement.pairs_with(&body.closing, template) {
            node.placement.standalone = true;
            node.placement.actual_start = node.placement.line_start;
            body.closing.actual_end = keep_line_break(template, body.closing.line_end);
        }
    }
    node.refresh_slot(template);
}

/// Consume the line up to, but not including, the line break that ends at `line_end`
fn keep_line_break(template: &str, line_end: usize) -> usize {
    let line = &template[..line_end];
    if let Some(rest) = line.strip_suffix("\r\n") {
        rest.len()
    } else if let Some(rest) = line.strip_suffix('\n') {
        rest.len()
    } else {
        line_end
    }
}

fn adjust_parent(template: &str, node: &mut Node) {
    let placement = &mut node.placement;
    let Some(body) = node.body.as_mut() else {
        return;
    };

    if placement.pairs_with(&body.closing, template) {
        placement.standalone = true;
        placement.actual_start = placement.line_start;
        body.closing.actual_end = body.closing.line_end;
    }

    // `{{<parent}}{{$block}}` on one line
    if let Some(first) = first_block(&mut body.children) {
        if placement.pairs_with(&first.placement, template) {
            placement.standalone = true;
            placement.actual_start = placement.line_start;
            first.placement.standalone = true;
            first.placement.actual_end = first.placement.line_end;
            first.refresh_slot(template);
        }
    }

    // `{{/block}}{{/parent}}` on one line
    let parent_closing = &mut body.closing;
    if let Some(last) = last_block(&mut body.children) {
        let paired = last
            .body
            .as_ref()
            .is_some_and(|b| b.closing.pairs_with(parent_closing, template));
        if paired {
            if let Some(last_body) = last.body.as_mut() {
                last_body.closing.actual_start = last_body.closing.line_start;
            }
            parent_closing.actual_end = parent_closing.line_end;
            last.refresh_slot(template);
        }
    }
}

fn first_block(children: &mut [Element]) -> Option<&mut Node> {
    children.iter_mut().find_map(block_node)
}

fn last_block(children: &mut [Element]) -> Option<&mut Node> {
    children.iter_mut().rev().find_map(block_node)
}

fn block_node(element: &mut Element) -> Option<&mut Node> {
    match element {
        Element::Node(node) if node.kind == TagKind::Block => Some(node),
        _ => None,
    }
}

/// Validate a `{{=left right=}}` tag and return the new delimiters
fn parse_delimiters(
    template: &str,
    token: &Token,
    active: &Delimiters,
) -> Result<Delimiters, TemplateError> {
    let content = &template[token.content.clone()];
    let parts: Vec<&str> = content.split_whitespace().collect();
    match parts.as_slice() {
        [left, right] => Ok(Delimiters::new(*left, *right)),
        _ => {
            let (line, column) = position(template, token.start);
            Err(TemplateError::Delimiter {
                tag: tag_string(token.kind, content, active),
                line,
                column,
            })
        }
    }
}

fn stray_closing(template: &str, token: &Token, active: &Delimiters) -> TemplateError {
    let (line, column) = position(template, token.start);
    TemplateError::StrayClosingTag {
        tag: tag_string(token.kind, &template[token.content.clone()], active),
        line,
        column,
    }
}
