//! Error handling for the kiln application.
//! Defines custom error types and results used throughout the application.

use std::io;
use thiserror::Error;

/// Custom error types for kiln operations.
///
/// Every variant is fatal for the current run: nothing is retried and no
/// partially generated project is reported as a success.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// The file passed with `--config` could not be read.
    #[error("Cannot read config file '{path}': {source}.")]
    ConfigFileReadError {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The file passed with `--config` is not a valid JSON object.
    #[error("Config file '{path}' is not valid JSON: {source}.")]
    ConfigFileParseError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The generator directory holding questions and template cannot be located.
    #[error("Generator directory error: {0}.")]
    GeneratorDirError(String),

    /// Represents errors in the question schema
    #[error("Schema error: {0}.")]
    SchemaError(String),

    /// Two questions would register the same command-line flag.
    #[error("Questions '{first}' and '{second}' both map to flag '--{flag}'.")]
    FlagConflictError { flag: String, first: String, second: String },

    /// Failure reported by the interactive prompt
    #[error("Prompt error: {0}.")]
    PromptError(String),

    /// Represents errors that occur during template processing
    #[error("Template error: {0}.")]
    TemplateError(String),

    /// A template file could not be read as text.
    #[error("Cannot read template '{path}': {source}.")]
    TemplateReadError {
        path: String,
        #[source]
        source: io::Error,
    },

    /// A template path, template content or `when` expression could not be rendered.
    #[error("Cannot render template '{name}': {message}.")]
    TemplateRenderError { name: String, message: String },

    /// A rendered path would land outside of the destination tree.
    #[error("Template '{template}' renders to invalid path '{rendered}'.")]
    InvalidRenderedPathError { template: String, rendered: String },

    /// A rendered file could not be written.
    #[error("Cannot write '{path}': {source}.")]
    FileWriteError {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Convenience type alias for Results with kiln's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
