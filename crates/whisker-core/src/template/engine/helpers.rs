//! Line and indentation helpers shared by the parser and renderer

/// 1-based line and column (in characters) of a byte offset
pub(crate) fn position(template: &str, index: usize) -> (usize, usize) {
    let before = &template[..index];
    let line = before.matches('\n').count() + 1;
    let column = before[line_start(template, index)..].chars().count() + 1;
    (line, column)
}

/// Byte offset of the start of the line containing `index`
pub(crate) fn line_start(template: &str, index: usize) -> usize {
    template[..index].rfind('\n').map_or(0, |i| i + 1)
}

/// Byte offset just past the line break following `index` (or the template end)
pub(crate) fn line_end(template: &str, index: usize) -> usize {
    template[index..]
        .find('\n')
        .map_or(template.len(), |i| index + i + 1)
}

/// Empty or whitespace only
pub(crate) fn is_whitespace(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

/// Remove the common leading indentation of every line
///
/// Lines holding only spaces and tabs are reduced to their line break and do not
/// take part in computing the margin.
pub(crate) fn dedent(text: &str) -> String {
    let lines: Vec<(&str, &str)> = text.split_inclusive('\n').map(split_break).collect();

    let mut margin: Option<&str> = None;
    for (body, _) in &lines {
        if is_blank(body) {
            continue;
        }
        let indent = &body[..body.len() - body.trim_start_matches([' ', '\t']).len()];
        margin = Some(match margin {
            None => indent,
            Some(current) => common_prefix(current, indent),
        });
    }
    let margin = margin.unwrap_or_default();

    let mut out = String::with_capacity(text.len());
    for (body, line_break) in lines {
        if !is_blank(body) {
            out.push_str(&body[margin.len()..]);
        }
        out.push_str(line_break);
    }
    out
}

/// Prefix every line that holds more than whitespace
pub(crate) fn indent_lines(text: &str, prefix: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        if !line.trim().is_empty() {
            out.push_str(prefix);
        }
        out.push_str(line);
    }
    out
}

/// Prefix every non-empty line
pub(crate) fn indent_non_empty(text: &str, prefix: &str) -> String {
    text.split('\n')
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", prefix, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split a line into its body and its line break (`\n`, `\r\n` or nothing)
fn split_break(line: &str) -> (&str, &str) {
    let body = line
        .strip_suffix('\n')
        .map_or(line, |rest| rest.strip_suffix('\r').unwrap_or(rest));
    (body, &line[body.len()..])
}

fn is_blank(body: &str) -> bool {
    body.chars().all(|c| c == ' ' || c == '\t')
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let len = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    &a[..len]
}
