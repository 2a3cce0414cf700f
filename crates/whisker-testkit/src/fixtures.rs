//! Fixture trees for tests
//!
//! The showcase is a small template project (template, JSON data and a partial
//! directory) whose rendered output is known in advance.

use std::path::{Path, PathBuf};

pub const SHOWCASE_TEMPLATE: &str = "\
Hello {{name}}!
{{#items}}
{{>item}}
{{/items}}
{{^items}}
Nothing here.
{{/items}}
";

pub const SHOWCASE_DATA: &str =
    r#"{"name": "<World>", "items": [{"label": "apples", "count": 3}, {"label": "pears", "count": 0}]}"#;

pub const SHOWCASE_ITEM_PARTIAL: &str = "- {{label}} ({{count}})\n";

/// What the showcase renders to with default options
pub const SHOWCASE_OUTPUT: &str = "Hello &lt;World&gt;!\n- apples (3)\n- pears (0)\n";

/// Paths of a showcase written to disk
#[derive(Debug, Clone)]
pub struct Showcase {
    pub template: PathBuf,
    pub data: PathBuf,
    pub partial_dir: PathBuf,
}

/// Write `files` (relative path, content) under `root`, creating parent directories
///
/// # Panics
///
/// Panics if any directory or file cannot be written.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (relative, content) in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create fixture directory");
        }
        std::fs::write(&path, content).expect("Failed to write fixture file");
    }
}

/// Write the showcase project under `root`
pub fn write_showcase(root: &Path) -> Showcase {
    write_tree(
        root,
        &[
            ("page.mustache", SHOWCASE_TEMPLATE),
            ("data.json", SHOWCASE_DATA),
            ("partials/item.mustache", SHOWCASE_ITEM_PARTIAL),
        ],
    );

    Showcase {
        template: root.join("page.mustache"),
        data: root.join("data.json"),
        partial_dir: root.join("partials"),
    }
}
