//! CLI argument structure using clap

use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use whisker_core::config::consts::CONFIG_ENV_VAR;

#[derive(Parser, Debug)]
#[command(name = "whisker")]
#[command(version, about = "Render logic-light templates against JSON data", long_about = None)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(["template", "template_string"]),
))]
pub struct Cli {
    /// Template file to render
    pub template: Option<PathBuf>,

    /// Template text given inline
    #[arg(short = 's', long, value_name = "TEXT")]
    pub template_string: Option<String>,

    /// JSON data file (read from stdin when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Partial file, named by its file stem (repeatable)
    #[arg(short = 'p', long = "partial", value_name = "FILE")]
    pub partials: Vec<PathBuf>,

    /// Directory searched recursively for partials
    #[arg(long, value_name = "DIR")]
    pub partial_dir: Option<PathBuf>,

    /// Extension of partial files in --partial-dir
    #[arg(long, value_name = "EXT")]
    pub partial_ext: Option<String>,

    /// Opening delimiter
    #[arg(short = 'l', long)]
    pub left_delimiter: Option<String>,

    /// Closing delimiter
    #[arg(short = 'r', long)]
    pub right_delimiter: Option<String>,

    /// Fail when a tag does not resolve
    #[arg(long)]
    pub strict: bool,

    /// Disable HTML escaping
    #[arg(long)]
    pub no_escape: bool,

    /// Write the result to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Configuration file (defaults to ./whisker.toml when present)
    #[arg(long, env = CONFIG_ENV_VAR, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(short, long)]
    pub verbose: bool,
}
