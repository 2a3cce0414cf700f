//! Template module - logic-less mustache rendering
//!
//! This module turns a template string plus a [`Value`] tree into output text by
//! resolving tags against a stack of scopes.
//!
//! ## Pipeline
//!
//! - **Tag finder** (`engine::tokenize`): locates the next delimiter-bounded tag
//! - **Parser** (`engine::parse`): builds the element tree, elides standalone lines,
//!   tracks delimiter switches and matches section closing tags
//! - **Parse cache** (`engine::cache`): memoizes parsed trees per template span
//! - **Renderer** (`engine::render`): walks the tree against a [`TemplateContext`]
//!
//! ## Syntax
//!
//! - Interpolation: `{{name}}`, `{{a.b.0}}`, `{{.}}` (escaped)
//! - Unescaped: `{{{name}}}` or `{{& name}}`
//! - Sections: `{{#items}}...{{/items}}`, inverted `{{^items}}...{{/items}}`
//! - Partials: `{{> name}}`, dynamic `{{> *var}}`
//! - Inheritance: `{{< parent}}{{$ block}}...{{/ block}}{{/ parent}}`
//! - Comments: `{{! ignored }}`
//! - Delimiter switch: `{{= <% %> =}}`

pub mod context;
pub mod engine;
pub mod error;
pub mod options;
pub mod value;

pub use context::TemplateContext;
pub use engine::{
    Delimiters, ParseCache, Partials, Template, TemplateEngine, cache_clear, render,
};
pub use error::{CallbackError, TemplateError};
pub use options::Options;
pub use value::{Invocation, Lambda, LambdaKind, Value};
