//! Template tree rendering.
//! Every file under the template root has both its relative path and its content
//! rendered against the answers, then is written below the destination root.
//! Files are independent of each other and are rendered concurrently.

use crate::answers::AnswerSet;
use crate::constants::ADDED_FILES_HEADER;
use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;
use log::debug;
use rayon::prelude::*;
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// A file written to the destination tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    /// Path of the source file, relative to the template root
    pub template_path: String,
    /// Rendered path, relative to the destination root
    pub relative_path: String,
    pub target: PathBuf,
}

/// Lists every file under `template_root`, hidden ones included, as relative paths.
/// Directories are not listed; they are created as needed when writing.
pub fn collect_template_entries<P: AsRef<Path>>(template_root: P) -> Result<Vec<String>> {
    let template_root = template_root.as_ref();
    if !template_root.is_dir() {
        return Err(Error::TemplateError(format!(
            "template directory '{}' does not exist",
            template_root.display()
        )));
    }

    let mut entries = Vec::new();
    for entry in WalkDir::new(template_root).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::TemplateError(e.to_string()))?;
        if entry.file_type().is_dir() {
            continue;
        }
        let relative_path = entry
            .path()
            .strip_prefix(template_root)
            .map_err(|e| Error::TemplateError(e.to_string()))?;
        let relative_path = relative_path.to_str().ok_or_else(|| {
            Error::TemplateError(format!("invalid path: {}", relative_path.display()))
        })?;
        entries.push(relative_path.to_string());
    }
    Ok(entries)
}

/// Normalizes a rendered path relative to the destination root.
///
/// Segments emptied by unset answers are dropped, as are leading `/` and `.`
/// segments: `{# sub #}/x.txt` with `sub` unset becomes `x.txt`. Returns `None`
/// if the path climbs out with `..`, names no file, or has an empty file name.
pub fn normalize_rendered_path(rendered_path: &str) -> Option<String> {
    if rendered_path.trim().is_empty() || rendered_path.ends_with('/') {
        return None;
    }
    let mut segments = Vec::new();
    for component in Path::new(rendered_path).components() {
        match component {
            Component::Normal(segment) => segments.push(segment.to_str()?),
            Component::RootDir | Component::CurDir => {}
            Component::ParentDir | Component::Prefix(_) => return None,
        }
    }
    if segments.is_empty() {
        return None;
    }
    Some(segments.join("/"))
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    let write_error = |source| Error::FileWriteError { path: path.display().to_string(), source };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, content).map_err(write_error)
}

/// Renders a single template file and writes it.
pub fn render_entry(
    engine: &dyn TemplateRenderer,
    template_root: &Path,
    output_root: &Path,
    template_path: &str,
    context: &serde_json::Value,
) -> Result<RenderedFile> {
    debug!("Processing template file: {template_path}");
    let content = fs::read_to_string(template_root.join(template_path))
        .map_err(|source| Error::TemplateReadError { path: template_path.to_string(), source })?;

    let rendered_content = engine.render(template_path, &content, context)?;
    let rendered_path = engine.render(template_path, template_path, context)?;
    let relative_path = normalize_rendered_path(&rendered_path).ok_or_else(|| {
        Error::InvalidRenderedPathError {
            template: template_path.to_string(),
            rendered: rendered_path.clone(),
        }
    })?;

    let target = output_root.join(&relative_path);
    write_file(&target, &rendered_content)?;
    println!("- {relative_path}");

    Ok(RenderedFile { template_path: template_path.to_string(), relative_path, target })
}

/// Renders the whole template tree into `output_root`.
///
/// Files are rendered concurrently and the call returns once all of them are
/// written. The first failure is returned; files already written by other tasks
/// are left in place.
pub fn render_template<P: AsRef<Path>, Q: AsRef<Path>>(
    engine: &dyn TemplateRenderer,
    template_root: P,
    output_root: Q,
    answers: &AnswerSet,
) -> Result<Vec<RenderedFile>> {
    let template_root = template_root.as_ref();
    let output_root = output_root.as_ref();
    let entries = collect_template_entries(template_root)?;
    let context = answers.to_context();

    debug!("Rendering {} template files into {}", entries.len(), output_root.display());
    println!("{ADDED_FILES_HEADER}");

    entries
        .par_iter()
        .map(|template_path| {
            render_entry(engine, template_root, output_root, template_path, &context)
        })
        .collect()
}
