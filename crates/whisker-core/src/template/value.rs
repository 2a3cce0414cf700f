//! Data model consumed by the renderer
//!
//! Host data is adapted into [`Value`] once, at the boundary. Compound values are
//! reference-counted so that pushing a scope onto the context stack is cheap.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use super::error::CallbackError;

/// A node of the data tree a template is rendered against
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    List(Arc<Vec<Value>>),
    Map(Arc<BTreeMap<String, Value>>),
    Lambda(Lambda),
}

impl Value {
    /// Adapt any serializable host value (structs become maps keyed by field name)
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(Value::from)
    }

    /// Decode a JSON document
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<serde_json::Value>(text).map(Value::from)
    }

    /// Convert back to JSON. Lambdas become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null | Value::Lambda(_) => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Value::Number(n.clone()),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Map(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_lambda(&self) -> Option<&Lambda> {
        match self {
            Value::Lambda(lambda) => Some(lambda),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Whether a section over this value renders its body
    ///
    /// `null`, `false`, zero, `""`, `[]` and `{}` are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Map(map) => !map.is_empty(),
            Value::Lambda(_) => true,
        }
    }

    /// Look up `key` directly inside this value
    ///
    /// Maps are searched by key, lists by (possibly negative) index. Scalars and
    /// lambdas have no members.
    pub fn member(&self, key: &str) -> Option<Value> {
        match self {
            Value::Map(map) => map.get(key).cloned(),
            Value::List(items) => {
                let index = key.parse::<i64>().ok()?;
                let index = if index < 0 {
                    items.len().checked_sub(index.unsigned_abs() as usize)?
                } else {
                    index as usize
                };
                items.get(index).cloned()
            }
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::String(s) => write!(f, "String({s:?})"),
            Value::List(items) => f.debug_list().entries(items.iter()).finish(),
            Value::Map(map) => f.debug_map().entries(map.iter()).finish(),
            Value::Lambda(lambda) => fmt::Debug::fmt(lambda, f),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => items.into_iter().map(Value::from).collect(),
            serde_json::Value::Object(map) => map.into_iter().collect(),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n.into())
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number((n as u64).into())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        serde_json::Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Lambda> for Value {
    fn from(lambda: Lambda) -> Self {
        Value::Lambda(lambda)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        items.into_iter().map(Into::into).collect()
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::List(Arc::new(iter.into_iter().collect()))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Map(Arc::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ))
    }
}

/// How the result of a lambda is used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LambdaKind {
    /// The result is ordinary data
    Value,
    /// The result is rendered as a template fragment in the current context
    Template,
}

type Nullary = Arc<dyn Fn() -> Result<Value, CallbackError> + Send + Sync>;
type Unary = Arc<dyn Fn(&str) -> Result<Value, CallbackError> + Send + Sync>;

#[derive(Clone)]
enum Callable {
    Nullary(Nullary),
    Unary(Unary),
}

/// Outcome of a single invocation attempt
#[derive(Debug, Clone)]
pub enum Invocation {
    Returned(Value),
    /// The lambda does not take the argument shape it was offered
    Rejected,
}

/// A callable value embedded in the data tree
#[derive(Clone)]
pub struct Lambda {
    kind: LambdaKind,
    callable: Callable,
}

impl Lambda {
    /// Nullary lambda whose result is data
    pub fn value<F, R>(f: F) -> Self
    where
        F: Fn() -> Result<R, CallbackError> + Send + Sync + 'static,
        R: Into<Value>,
    {
        Self {
            kind: LambdaKind::Value,
            callable: Callable::Nullary(Arc::new(move || f().map(Into::into))),
        }
    }

    /// Lambda receiving the raw section text, whose result is data
    pub fn value_with_text<F, R>(f: F) -> Self
    where
        F: Fn(&str) -> Result<R, CallbackError> + Send + Sync + 'static,
        R: Into<Value>,
    {
        Self {
            kind: LambdaKind::Value,
            callable: Callable::Unary(Arc::new(move |text: &str| f(text).map(Into::into))),
        }
    }

    /// Nullary lambda whose result is rendered as a template
    pub fn template<F, R>(f: F) -> Self
    where
        F: Fn() -> Result<R, CallbackError> + Send + Sync + 'static,
        R: Into<Value>,
    {
        Self {
            kind: LambdaKind::Template,
            callable: Callable::Nullary(Arc::new(move || f().map(Into::into))),
        }
    }

    /// Lambda receiving the raw section text, whose result is rendered as a template
    pub fn template_with_text<F, R>(f: F) -> Self
    where
        F: Fn(&str) -> Result<R, CallbackError> + Send + Sync + 'static,
        R: Into<Value>,
    {
        Self {
            kind: LambdaKind::Template,
            callable: Callable::Unary(Arc::new(move |text: &str| f(text).map(Into::into))),
        }
    }

    pub fn kind(&self) -> LambdaKind {
        self.kind
    }

    /// Whether the lambda takes the section text
    pub fn takes_text(&self) -> bool {
        matches!(self.callable, Callable::Unary(_))
    }

    /// Attempt one invocation with (`Some`) or without (`None`) an argument
    pub fn invoke(&self, text: Option<&str>) -> Result<Invocation, CallbackError> {
        match (&self.callable, text) {
            (Callable::Nullary(f), None) => f().map(Invocation::Returned),
            (Callable::Unary(f), Some(text)) => f(text).map(Invocation::Returned),
            _ => Ok(Invocation::Rejected),
        }
    }
}

impl fmt::Debug for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lambda")
            .field("kind", &self.kind)
            .field("takes_text", &self.takes_text())
            .finish()
    }
}
