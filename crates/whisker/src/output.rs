use colored::Colorize;
use std::io::{self, Write};
use std::path::Path;

/// Write rendered text to stdout exactly as produced
pub fn print_rendered(s: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    out.write_all(s.as_bytes())?;
    out.flush()
}

pub fn print_written(path: &Path, bytes: usize) {
    eprintln!(
        "{} Wrote {} bytes to {}",
        "✓".green().bold(),
        bytes,
        path.display()
    );
}

pub fn print_step(message: &str) {
    eprintln!("{} {}", "→".cyan(), message);
}
