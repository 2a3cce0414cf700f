//! Section matching (finding the closing tag of `{{#x}}`, `{{^x}}`, `{{$x}}`, `{{<x}}`)

use super::tokenize::{Delimiters, TagKind, Token, TokenStream};

/// Find the closing tag matching an opening tag of `kind` named `name`
///
/// Scans `template[from..to]` with `delimiters`. Only tags carrying the same name
/// are considered: another opening tag of the same kind nests one level deeper,
/// a closing tag either closes such a nested section or is the match.
///
/// Returns `None` when the span ends (or an unterminated tag is reached) before
/// the match.
pub(crate) fn find_closing(
    template: &str,
    from: usize,
    to: usize,
    delimiters: &Delimiters,
    kind: TagKind,
    name: &str,
) -> Option<Token> {
    let mut depth = 0usize;

    for token in TokenStream::new(template, from, to, delimiters.clone()) {
        if &template[token.content.clone()] != name {
            continue;
        }
        if token.kind == kind {
            depth += 1;
        } else if token.kind == TagKind::Closing {
            if depth == 0 {
                return Some(token);
            }
            depth -= 1;
        }
    }

    None
}
