//! Render options: the stringify / escape / on-missing callbacks

use std::fmt;
use std::sync::Arc;

use super::error::{CallbackError, TemplateError};
use super::value::Value;

type StringifyFn = Arc<dyn Fn(&Value) -> Result<String, CallbackError> + Send + Sync>;
type EscapeFn = Arc<dyn Fn(&str) -> Result<String, CallbackError> + Send + Sync>;
type MissingFn = Arc<dyn Fn() -> Result<String, CallbackError> + Send + Sync>;

/// Callbacks threaded through every render call
///
/// Errors returned by a callback abort the render and surface unchanged as
/// [`TemplateError::Callback`].
#[derive(Clone)]
pub struct Options {
    stringify: StringifyFn,
    escape: EscapeFn,
    on_missing: MissingFn,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn a resolved value into text
    pub fn with_stringify<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> Result<String, CallbackError> + Send + Sync + 'static,
    {
        self.stringify = Arc::new(f);
        self
    }

    /// Escape the text of `{{name}}` tags (never applied to `{{{name}}}` / `{{&name}}`)
    pub fn with_escape<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Result<String, CallbackError> + Send + Sync + 'static,
    {
        self.escape = Arc::new(f);
        self
    }

    /// Produce the text emitted in place of a tag whose name does not resolve
    pub fn with_on_missing<F>(mut self, f: F) -> Self
    where
        F: Fn() -> Result<String, CallbackError> + Send + Sync + 'static,
    {
        self.on_missing = Arc::new(f);
        self
    }

    /// Disable escaping altogether
    pub fn without_escape(self) -> Self {
        self.with_escape(|text| Ok(text.to_string()))
    }

    pub(crate) fn stringify(&self, value: &Value) -> Result<String, TemplateError> {
        (self.stringify)(value).map_err(TemplateError::Callback)
    }

    pub(crate) fn escape(&self, text: &str) -> Result<String, TemplateError> {
        (self.escape)(text).map_err(TemplateError::Callback)
    }

    pub(crate) fn on_missing(&self) -> Result<String, TemplateError> {
        (self.on_missing)().map_err(TemplateError::Callback)
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            stringify: Arc::new(|value| Ok(stringify_value(value))),
            escape: Arc::new(|text| Ok(escape_html(text))),
            on_missing: Arc::new(|| Ok(String::new())),
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options").finish_non_exhaustive()
    }
}

/// Default stringification
///
/// `null` (and a bare lambda) is empty, booleans are lowercase `true` / `false`
/// and compound values are compact JSON.
pub fn stringify_value(value: &Value) -> String {
    match value {
        Value::Null | Value::Lambda(_) => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::List(_) | Value::Map(_) => value.to_json().to_string(),
    }
}

/// Default escaping: `&`, `<`, `>`, `"` and `'`
pub fn escape_html(text: &str) -> String {
    html_escape::encode_quoted_attribute(text).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stringify_scalars() {
        assert_eq!(stringify_value(&Value::Null), "");
        assert_eq!(stringify_value(&Value::from(true)), "true");
        assert_eq!(stringify_value(&Value::from(false)), "false");
        assert_eq!(stringify_value(&Value::from(42i64)), "42");
        assert_eq!(stringify_value(&Value::from(1.21f64)), "1.21");
        assert_eq!(stringify_value(&Value::from("text")), "text");
    }

    #[test]
    fn test_stringify_compound_as_json() {
        assert_eq!(stringify_value(&Value::from(json!([1, "a"]))), r#"[1,"a"]"#);
        assert_eq!(stringify_value(&Value::from(json!({"k": null}))), r#"{"k":null}"#);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"& " < > '"#),
            "&amp; &quot; &lt; &gt; &#x27;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_callback_error_is_wrapped() {
        let options = Options::new().with_on_missing(|| Err("boom".into()));
        match options.on_missing() {
            Err(TemplateError::Callback(err)) => assert_eq!(err.to_string(), "boom"),
            other => panic!("Expected Callback error, got {:?}", other),
        }
    }
}
