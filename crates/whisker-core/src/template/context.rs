//! Scope stack used to resolve tag names

use std::collections::HashMap;

use super::error::TemplateError;
use super::value::{Invocation, Value};

/// Stack of data scopes, innermost last
///
/// Also carries the block overrides installed by the enclosing `{{<parent}}`
/// tag while its partial is being rendered.
#[derive(Debug, Clone)]
pub struct TemplateContext {
    scopes: Vec<Value>,
    blocks: HashMap<String, String>,
}

impl TemplateContext {
    /// Create a new context with `data` as the outermost scope
    pub fn new(data: Value) -> Self {
        Self {
            scopes: vec![data],
            blocks: HashMap::new(),
        }
    }

    pub fn push(&mut self, scope: Value) {
        self.scopes.push(scope);
    }

    pub fn pop(&mut self) -> Option<Value> {
        self.scopes.pop()
    }

    /// Resolve a tag name; `Ok(None)` means the name is missing
    ///
    /// `.` is the innermost scope. For `a.b.c` only `a` is searched through the
    /// stack (innermost first); `b` and `c` are resolved strictly inside what `a`
    /// yielded.
    pub fn get(&self, key: &str) -> Result<Option<Value>, TemplateError> {
        if key == "." {
            return Ok(self.scopes.last().cloned());
        }

        let mut parts = key.split('.');
        let first = parts.next().unwrap_or_default();

        let mut found = None;
        for scope in self.scopes.iter().rev() {
            if let Some(value) = lookup(scope, first)? {
                found = Some(value);
                break;
            }
        }

        let Some(mut current) = found else {
            return Ok(None);
        };
        for part in parts {
            match lookup(&current, part)? {
                Some(value) => current = value,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }

    /// Override registered for block `name`, if any
    pub(crate) fn block(&self, name: &str) -> Option<&str> {
        self.blocks.get(name).map(String::as_str)
    }

    /// Run `f` with `defaults` added to the block overrides
    ///
    /// Existing overrides win over `defaults`. The previous table is restored
    /// once `f` returns.
    pub(crate) fn with_blocks<T>(
        &mut self,
        defaults: impl IntoIterator<Item = (String, String)>,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let mut scoped = self.blocks.clone();
        for (name, default) in defaults {
            scoped.entry(name).or_insert(default);
        }
        let saved = std::mem::replace(&mut self.blocks, scoped);
        let result = f(self);
        self.blocks = saved;
        result
    }
}

/// Look up `key` inside a single value, invoking nullary lambdas first
fn lookup(value: &Value, key: &str) -> Result<Option<Value>, TemplateError> {
    if let Value::Lambda(lambda) = value {
        if let Invocation::Returned(result) = lambda.invoke(None)? {
            return Ok(result.member(key));
        }
    }
    Ok(value.member(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::value::Lambda;
    use serde_json::json;

    fn context(data: serde_json::Value) -> TemplateContext {
        TemplateContext::new(Value::from(data))
    }

    #[test]
    fn test_get_dot_is_innermost() {
        let mut ctx = context(json!({"a": 1}));
        ctx.push(Value::from("inner"));
        assert_eq!(ctx.get(".").unwrap().unwrap().as_str(), Some("inner"));
    }

    #[test]
    fn test_get_searches_innermost_first() {
        let mut ctx = context(json!({"name": "outer", "only_outer": "o"}));
        ctx.push(Value::from(json!({"name": "inner"})));
        assert_eq!(ctx.get("name").unwrap().unwrap().as_str(), Some("inner"));
        assert_eq!(ctx.get("only_outer").unwrap().unwrap().as_str(), Some("o"));
        ctx.pop();
        assert_eq!(ctx.get("name").unwrap().unwrap().as_str(), Some("outer"));
    }

    #[test]
    fn test_dotted_path_does_not_fall_back() {
        // `b` is found in the inner scope, so `b.c` must not consult the outer `b`
        let mut ctx = context(json!({"b": {"c": "ERROR"}}));
        ctx.push(Value::from(json!({"b": {}})));
        assert!(ctx.get("b.c").unwrap().is_none());
    }

    #[test]
    fn test_dotted_path_with_index() {
        let ctx = context(json!({"a": {"b": [10, 20]}}));
        assert_eq!(ctx.get("a.b.1").unwrap().unwrap().to_json(), json!(20));
        assert!(ctx.get("a.b.5").unwrap().is_none());
        assert!(ctx.get("missing.b").unwrap().is_none());
    }

    #[test]
    fn test_present_null_is_not_missing() {
        let ctx = context(json!({"x": null, "f": false}));
        assert!(matches!(ctx.get("x").unwrap(), Some(Value::Null)));
        assert!(matches!(ctx.get("f").unwrap(), Some(Value::Bool(false))));
        assert!(ctx.get("y").unwrap().is_none());
    }

    #[test]
    fn test_nullary_lambda_is_invoked_when_descending() {
        let data: Value = [(
            "person",
            Value::from(Lambda::value(|| Ok(Value::from(json!({"name": "Ada"}))))),
        )]
        .into_iter()
        .collect();
        let ctx = TemplateContext::new(data);
        assert_eq!(ctx.get("person.name").unwrap().unwrap().as_str(), Some("Ada"));
        // The lambda itself is returned untouched when it is the final segment
        assert!(matches!(ctx.get("person").unwrap(), Some(Value::Lambda(_))));
    }

    #[test]
    fn test_lambda_error_propagates() {
        let data: Value = [("bad", Value::from(Lambda::value(|| Err::<Value, _>("nope".into()))))]
            .into_iter()
            .collect();
        let ctx = TemplateContext::new(data);
        assert!(matches!(ctx.get("bad.x"), Err(TemplateError::Callback(_))));
    }

    #[test]
    fn test_with_blocks_first_writer_wins_and_restores() {
        let mut ctx = context(json!({}));
        ctx.with_blocks([("a".to_string(), "outer".to_string())], |ctx| {
            ctx.with_blocks(
                [
                    ("a".to_string(), "inner".to_string()),
                    ("b".to_string(), "inner-b".to_string()),
                ],
                |ctx| {
                    assert_eq!(ctx.block("a"), Some("outer"));
                    assert_eq!(ctx.block("b"), Some("inner-b"));
                },
            );
            assert_eq!(ctx.block("a"), Some("outer"));
            assert_eq!(ctx.block("b"), None);
        });
        assert_eq!(ctx.block("a"), None);
    }
}
