//! `whisker.toml` configuration

pub mod consts;
pub mod model;

pub use model::{
    Config, DelimitersConfig, EscapePolicy, MissingPolicy, PartialsConfig, RenderConfig,
};
