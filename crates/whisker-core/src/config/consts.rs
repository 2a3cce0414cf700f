//! Defaults shared by the configuration file and the command line

/// Configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "whisker.toml";

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV_VAR: &str = "WHISKER_CONFIG";

pub const DEFAULT_LEFT_DELIMITER: &str = "{{";
pub const DEFAULT_RIGHT_DELIMITER: &str = "}}";

/// Partial file extension, including the leading dot
pub const DEFAULT_PARTIAL_EXTENSION: &str = ".mustache";
