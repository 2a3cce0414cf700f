//! Render command - merge configuration and flags, then render one template

use crate::cli::Cli;
use crate::output;
use anyhow::{Context, Result};
use std::io::Read;
use std::path::{Path, PathBuf};
use whisker_core::config::consts::CONFIG_FILE_NAME;
use whisker_core::{
    Config, Delimiters, Partials, TemplateEngine, Value, WhiskerError, load_partial_files,
    load_partials,
};

pub fn run(cli: Cli) -> Result<()> {
    let (config, config_dir) = load_config(cli.config.as_deref())?;

    let template = match (&cli.template, &cli.template_string) {
        (Some(path), _) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read template {}", path.display()))?,
        (None, Some(text)) => text.clone(),
        (None, None) => anyhow::bail!("either TEMPLATE or --template-string is required"),
    };

    let data = read_data(cli.data.as_deref())?;
    let partials = collect_partials(&cli, &config, &config_dir)?;
    if cli.verbose {
        output::print_step(&format!("Loaded {} partial(s)", partials.len()));
    }

    let delimiters = Delimiters::new(
        cli.left_delimiter
            .clone()
            .unwrap_or_else(|| config.delimiters.left.clone()),
        cli.right_delimiter
            .clone()
            .unwrap_or_else(|| config.delimiters.right.clone()),
    );

    let mut options = config.options();
    if cli.strict {
        options = options.with_on_missing(|| Err("MISSING_VALUE: a tag did not resolve".into()));
    }
    if cli.no_escape {
        options = options.without_escape();
    }

    let engine = TemplateEngine::new()
        .with_partials(partials)
        .with_delimiters(delimiters)
        .with_options(options);
    let rendered = engine
        .render(&template, &data)
        .map_err(WhiskerError::from)?;

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            if cli.verbose {
                output::print_written(path, rendered.len());
            }
        }
        None => output::print_rendered(&rendered)?,
    }

    Ok(())
}

/// Explicit config file, else `whisker.toml` in the working directory, else defaults
///
/// Also returns the directory relative paths in the file are resolved against.
fn load_config(explicit: Option<&Path>) -> Result<(Config, PathBuf)> {
    let cwd = std::env::current_dir()?;
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = cwd.join(CONFIG_FILE_NAME);
            if !candidate.is_file() {
                return Ok((Config::default(), cwd));
            }
            candidate
        }
    };

    tracing::debug!(path = %path.display(), "loading config");
    let config = Config::from_file(&path)?;
    let base = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => cwd,
    };
    Ok((config, base))
}

/// JSON from `path`, or from stdin when absent; blank input is an empty map
fn read_data(path: Option<&Path>) -> Result<Value> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read data {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read data from stdin")?;
            buf
        }
    };

    let text = if text.trim().is_empty() { "{}" } else { text.as_str() };
    Ok(Value::from_json_str(text).map_err(WhiskerError::from)?)
}

/// Directory partials first, then explicit files (config, then flags); later names win
fn collect_partials(cli: &Cli, config: &Config, config_dir: &Path) -> Result<Partials> {
    let extension = cli
        .partial_ext
        .as_deref()
        .unwrap_or(&config.partials.extension);

    let dir = match &cli.partial_dir {
        Some(dir) => Some(dir.clone()),
        None => config.partials.dir.as_ref().map(|dir| config_dir.join(dir)),
    };

    let mut partials = match dir {
        Some(dir) => load_partials(&dir, extension)?,
        None => Partials::new(),
    };

    let files: Vec<PathBuf> = config
        .partials
        .files
        .iter()
        .map(|file| config_dir.join(file))
        .chain(cli.partials.iter().cloned())
        .collect();
    partials.extend(load_partial_files(&files)?);

    Ok(partials)
}
