//! Tag discovery for the template engine
//!
//! Scans a template span for the next tag bounded by the active delimiters.

use std::ops::Range;

/// Tag classification, selected by the sigil following the left delimiter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum TagKind {
    /// `{{! comment }}`
    Comment,
    /// `{{# name }}`
    Section,
    /// `{{^ name }}`
    Inverted,
    /// `{{/ name }}`
    Closing,
    /// `{{& name }}`
    Ampersand,
    /// `{{{ name }}}`
    Triple,
    /// `{{= left right =}}`
    Delimiter,
    /// `{{> name }}`
    Partial,
    /// `{{$ name }}`
    Block,
    /// `{{< name }}`
    Parent,
    /// `{{ name }}`
    Variable,
}

impl TagKind {
    pub(crate) fn from_sigil(byte: u8) -> Self {
        match byte {
            b'!' => TagKind::Comment,
            b'#' => TagKind::Section,
            b'^' => TagKind::Inverted,
            b'/' => TagKind::Closing,
            b'&' => TagKind::Ampersand,
            b'{' => TagKind::Triple,
            b'=' => TagKind::Delimiter,
            b'>' => TagKind::Partial,
            b'$' => TagKind::Block,
            b'<' => TagKind::Parent,
            _ => TagKind::Variable,
        }
    }

    /// The sigil text following the left delimiter
    pub(crate) fn sigil(self) -> &'static str {
        match self {
            TagKind::Comment => "!",
            TagKind::Section => "#",
            TagKind::Inverted => "^",
            TagKind::Closing => "/",
            TagKind::Ampersand => "&",
            TagKind::Triple => "{",
            TagKind::Delimiter => "=",
            TagKind::Partial => ">",
            TagKind::Block => "$",
            TagKind::Parent => "<",
            TagKind::Variable => "",
        }
    }

    /// Text expected right before the right delimiter
    pub(crate) fn terminator(self) -> &'static str {
        match self {
            TagKind::Triple => "}",
            TagKind::Delimiter => "=",
            _ => "",
        }
    }

    /// Interpolations are never standalone
    pub(crate) fn can_stand_alone(self) -> bool {
        !matches!(
            self,
            TagKind::Variable | TagKind::Ampersand | TagKind::Triple
        )
    }

    /// Tags that own a body terminated by a closing tag
    pub(crate) fn opens_section(self) -> bool {
        matches!(
            self,
            TagKind::Section | TagKind::Inverted | TagKind::Block | TagKind::Parent
        )
    }

    /// Tags that never appear in the parsed output
    pub(crate) fn is_ignorable(self) -> bool {
        matches!(
            self,
            TagKind::Comment | TagKind::Delimiter | TagKind::Closing
        )
    }
}

/// The active left/right delimiter pair
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Delimiters {
    pub left: String,
    pub right: String,
}

impl Delimiters {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    /// Both delimiters non-empty and free of whitespace
    pub(crate) fn is_valid(&self) -> bool {
        [&self.left, &self.right]
            .iter()
            .all(|d| !d.is_empty() && !d.contains(char::is_whitespace))
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self::new("{{", "}}")
    }
}

/// A tag located in the template
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    /// Tag classification
    pub kind: TagKind,
    /// Byte range of the trimmed content
    pub content: Range<usize>,
    /// Byte offset of the left delimiter
    pub start: usize,
    /// Byte offset just past the right delimiter
    pub end: usize,
}

/// Locate the first tag in `template[from..to]`
///
/// Returns `None` when there is no left delimiter, or when the first left
/// delimiter is never terminated before `to`.
pub(crate) fn find_tag(
    template: &str,
    from: usize,
    to: usize,
    delimiters: &Delimiters,
) -> Option<Token> {
    if from >= to {
        return None;
    }
    let start = from + template[from..to].find(delimiters.left.as_str())?;
    let after_left = start + delimiters.left.len();

    let kind = template[after_left..to]
        .bytes()
        .next()
        .map_or(TagKind::Variable, TagKind::from_sigil);
    let content_start = after_left + kind.sigil().len();

    let closer = format!("{}{}", kind.terminator(), delimiters.right);
    let content_end = content_start + template[content_start..to].find(&closer)?;

    Some(Token {
        kind,
        content: trim_range(template, content_start..content_end),
        start,
        end: content_end + closer.len(),
    })
}

fn trim_range(template: &str, range: Range<usize>) -> Range<usize> {
    let raw = &template[range.clone()];
    let leading = raw.len() - raw.trim_start().len();
    let trimmed = raw.trim();
    let start = range.start + leading;
    start..start + trimmed.len()
}

/// Iterator over consecutive tags of a span
///
/// The parser moves the cursor past whole sections with [`TokenStream::seek`]
/// and switches delimiters in place with [`TokenStream::set_delimiters`].
pub(crate) struct TokenStream<'a> {
    template: &'a str,
    pos: usize,
    end: usize,
    delimiters: Delimiters,
}

impl<'a> TokenStream<'a> {
    pub fn new(template: &'a str, start: usize, end: usize, delimiters: Delimiters) -> Self {
        Self {
            template,
            pos: start,
            end,
            delimiters,
        }
    }

    pub fn seek(&mut self, pos: usize) {
        self.pos = pos.max(self.pos);
    }

    pub fn set_delimiters(&mut self, delimiters: Delimiters) {
        self.delimiters = delimiters;
    }

    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }
}

impl Iterator for TokenStream<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = find_tag(self.template, self.pos, self.end, &self.delimiters)?;
        self.pos = token.end;
        Some(token)
    }
}
