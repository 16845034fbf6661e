//! Common constants used throughout the kiln application.

/// Supported question schema file names, in lookup order
pub const SCHEMA_FILES: [&str; 3] = ["questions.json", "questions.yml", "questions.yaml"];

/// Directory holding the template tree inside a generator
pub const TEMPLATE_DIR: &str = "template";

/// Environment variable pointing at the generator directory
pub const GENERATOR_DIR_ENV: &str = "KILN_GENERATOR_DIR";

/// Reserved flag for the JSON answers file, never derived from a question
pub const CONFIG_FLAG: &str = "config";

/// Header printed before the list of written files
pub const ADDED_FILES_HEADER: &str = "Added files:";

/// Template delimiters. Chosen so that `{{ }}` in generated code passes through untouched.
pub const VARIABLE_DELIMITERS: (&str, &str) = ("{#", "#}");
pub const BLOCK_DELIMITERS: (&str, &str) = ("{%", "%}");
pub const COMMENT_DELIMITERS: (&str, &str) = ("{*", "*}");
