//! kiln's main application entry point.
//! Loads the generator's questions, reconciles answers from flags, the config
//! file and prompts, and renders the template into the current directory.

use std::path::{Path, PathBuf};

use kiln::{
    cli::{build_declarations, try_parse_from},
    config::load_questions,
    constants::{GENERATOR_DIR_ENV, TEMPLATE_DIR},
    error::{default_error_handler, Error, Result},
    logger::init_logger,
    processor::render_template,
    prompt::DialoguerPrompter,
    reconciler::reconcile,
    renderer::MiniJinjaRenderer,
};

/// Main application entry point.
fn main() {
    init_logger();

    if let Err(err) = run() {
        default_error_handler(err);
    }
}

/// Directory holding the questions and the template: `KILN_GENERATOR_DIR`, or
/// the directory of the executable.
fn get_generator_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(GENERATOR_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    let executable = std::env::current_exe()?;
    executable.parent().map(Path::to_path_buf).ok_or_else(|| {
        Error::GeneratorDirError(format!(
            "cannot locate the generator directory, set {GENERATOR_DIR_ENV}"
        ))
    })
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads the question schema and derives the command-line flags
/// 2. Parses the command line
/// 3. Reconciles config file, flags and prompts into the answer set
/// 4. Renders the template tree into the current directory
fn run() -> Result<()> {
    let generator_dir = get_generator_dir()?;
    let questions = load_questions(&generator_dir)?;
    let (declarations, kinds) = build_declarations(&questions)?;

    let raw_values = match try_parse_from(&declarations, std::env::args_os()) {
        Ok(values) => values,
        Err(e) => e.exit(),
    };

    let engine = MiniJinjaRenderer::new()?;
    let prompter = DialoguerPrompter::new();
    let answers = reconcile(&questions, &kinds, &raw_values, &prompter, &engine)?;

    let output_root = std::env::current_dir()?;
    render_template(&engine, generator_dir.join(TEMPLATE_DIR), &output_root, &answers)?;
    Ok(())
}
