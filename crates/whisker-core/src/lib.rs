//! Logic-light template engine with partials, lambdas and template inheritance

// Core modules
pub mod config;
pub mod error;
pub mod loader;
pub mod template;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, WhiskerError};
pub use loader::{load_partial_files, load_partials};
pub use template::{
    Delimiters, Lambda, LambdaKind, Options, ParseCache, Partials, Template, TemplateContext,
    TemplateEngine, TemplateError, Value, cache_clear, render,
};
