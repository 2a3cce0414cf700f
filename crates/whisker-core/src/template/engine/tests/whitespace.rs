//! Standalone-line elision tests

use super::helpers::render_json;
use serde_json::json;

#[test]
fn test_standalone_section_lines_are_removed() {
    let result = render_json("{{#a}}\n x \n{{/a}}\n", json!({"a": true}));
    assert_eq!(result, " x \n");
}

#[test]
fn test_standalone_comment_line_is_removed() {
    let result = render_json("Begin.\n{{! Comment }}\nEnd.\n", json!({}));
    assert_eq!(result, "Begin.\nEnd.\n");
}

#[test]
fn test_indented_standalone_tags() {
    let result = render_json("  {{#a}}\n  x\n  {{/a}}\n", json!({"a": true}));
    assert_eq!(result, "  x\n");
}

#[test]
fn test_inline_tags_keep_surrounding_whitespace() {
    let result = render_json(" {{#a}}x{{/a}} \n", json!({"a": true}));
    assert_eq!(result, " x \n");
}

#[test]
fn test_interpolation_is_never_standalone() {
    let result = render_json("  {{x}}\n", json!({"x": ""}));
    assert_eq!(result, "  \n");
}

#[test]
fn test_crlf_line_endings() {
    let result = render_json("|\r\n{{#b}}\r\n{{/b}}\r\n|", json!({"b": true}));
    assert_eq!(result, "|\r\n|");
}

#[test]
fn test_standalone_closing_tag_at_end_of_template() {
    let result = render_json("{{#a}}\nX\n{{/a}}", json!({"a": true}));
    assert_eq!(result, "X\n");
}

#[test]
fn test_standalone_delimiter_switch() {
    let result = render_json("{{=| |=}}\n|x|\n", json!({"x": "y"}));
    assert_eq!(result, "y\n");
}

#[test]
fn test_falsy_standalone_section_leaves_no_blank_lines() {
    let template = "start\n{{#show}}\nhidden\n{{/show}}\nend\n";
    let result = render_json(template, json!({"show": false}));
    assert_eq!(result, "start\nend\n");
}

#[test]
fn test_standalone_lines_inside_list_section() {
    let template = "{{#items}}\n- {{.}}\n{{/items}}\n";
    let result = render_json(template, json!({"items": ["a", "b"]}));
    assert_eq!(result, "- a\n- b\n");
}
