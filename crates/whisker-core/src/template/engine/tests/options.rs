//! Render option (stringify / escape / on-missing) tests

use super::helpers::{engine, render_json};
use super::*;
use crate::template::options::stringify_value;
use serde_json::json;

fn render_with(
    template: &str,
    data: serde_json::Value,
    options: Options,
) -> Result<String, TemplateError> {
    engine()
        .with_options(options)
        .render(template, &Value::from(data))
}

#[test]
fn test_default_escaping() {
    let data = json!({"x": r#"& " < > '"#});
    assert_eq!(render_json("{{x}}", data.clone()), "&amp; &quot; &lt; &gt; &#x27;");
    assert_eq!(render_json("{{{x}}}", data.clone()), r#"& " < > '"#);
    assert_eq!(render_json("{{&x}}", data), r#"& " < > '"#);
}

#[test]
fn test_custom_stringify() {
    let options = Options::new().with_stringify(|value| {
        Ok(match value {
            Value::Bool(true) => "yes".to_string(),
            Value::Bool(false) => "no".to_string(),
            other => stringify_value(other),
        })
    });
    let data = json!({"a": true, "b": false, "n": 3});
    let result = render_with("{{a}}/{{b}}/{{n}}", data, options);
    assert_eq!(result.unwrap(), "yes/no/3");
}

#[test]
fn test_custom_escape_only_applies_to_escaped_tags() {
    let options = Options::new().with_escape(|text| Ok(text.to_uppercase()));
    let result = render_with("{{x}} {{{x}}} {{&x}}", json!({"x": "ab"}), options);
    assert_eq!(result.unwrap(), "AB ab ab");
}

#[test]
fn test_without_escape() {
    let result = render_with("{{x}}", json!({"x": "<a>"}), Options::new().without_escape());
    assert_eq!(result.unwrap(), "<a>");
}

#[test]
fn test_on_missing_output_is_inserted_as_is() {
    let options = Options::new().with_on_missing(|| Ok("<MISSING>".to_string()));
    let result = render_with("[{{nope}}] [{{n}}]", json!({"n": null}), options);
    assert_eq!(result.unwrap(), "[<MISSING>] []");
}

#[test]
fn test_compound_values_stringify_as_json() {
    let data = json!({"list": [1, "a"], "map": {"k": true}});
    let result = render_json("{{{list}}} {{{map}}}", data);
    assert_eq!(result, r#"[1,"a"] {"k":true}"#);
}

#[test]
fn test_callback_error_is_not_wrapped() {
    #[derive(Debug)]
    struct Strict(String);

    impl std::fmt::Display for Strict {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "missing value: {}", self.0)
        }
    }

    impl std::error::Error for Strict {}

    let options = Options::new().with_on_missing(|| Err(Strict("x".to_string()).into()));
    match render_with("{{x}}", json!({}), options) {
        Err(TemplateError::Callback(err)) => {
            assert_eq!(err.to_string(), "missing value: x");
            assert!(err.downcast_ref::<Strict>().is_some());
        }
        other => panic!("Expected Callback error, got {:?}", other),
    }
}

#[test]
fn test_escape_error_propagates() {
    let options = Options::new().with_escape(|_| Err("cannot escape".into()));
    let result = render_with("{{x}}", json!({"x": "a"}), options);
    assert!(matches!(result, Err(TemplateError::Callback(_))));
    // Unescaped tags never call the escape callback
    let options = Options::new().with_escape(|_| Err("cannot escape".into()));
    assert_eq!(render_with("{{{x}}}", json!({"x": "a"}), options).unwrap(), "a");
}
