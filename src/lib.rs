//! kiln is a question-driven project scaffolding generator.
//! It reconciles answers from command-line flags, a JSON config file and
//! interactive prompts, then renders a template tree with them.

/// Typed answers and the answer set used as template context
pub mod answers;

/// snake, Pascal and kebab ("param") casing variants of answers
pub mod casing;

/// Command-line flags derived from the question schema
pub mod cli;

/// Question schema handling
/// Supports JSON and YAML formats (questions.json, questions.yml, questions.yaml)
pub mod config;

/// Common constants
pub mod constants;

/// Error types and handling for the kiln application
pub mod error;

/// Logging setup
pub mod logger;

/// Rendering of the template tree into the destination directory
pub mod processor;

/// Interactive prompting
pub mod prompt;

/// Merging of config file, flags and prompt answers
pub mod reconciler;

/// Template engine used for file paths, file contents and `when` expressions
pub mod renderer;
