//! Template rendering for kiln.
//! Wraps MiniJinja with kiln's delimiters so that template sources can contain
//! `{{ }}` of the generated code verbatim.
use crate::constants::{BLOCK_DELIMITERS, COMMENT_DELIMITERS, VARIABLE_DELIMITERS};
use crate::error::{Error, Result};
use minijinja::syntax::SyntaxConfig;
use minijinja::Environment;

/// Trait for template rendering engines.
pub trait TemplateRenderer: Sync {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `name` - Name reported in errors, usually the template's relative path
    /// * `template` - Template string to render
    /// * `context` - Context variables for rendering
    fn render(&self, name: &str, template: &str, context: &serde_json::Value) -> Result<String>;

    /// Evaluates a condition expression, such as a question's `when`.
    fn eval_condition(&self, expression: &str, context: &serde_json::Value) -> Result<bool>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates an engine using `{# #}` for variables, `{% %}` for blocks and `{* *}` for comments.
    pub fn new() -> Result<Self> {
        let syntax = SyntaxConfig::builder()
            .block_delimiters(BLOCK_DELIMITERS.0, BLOCK_DELIMITERS.1)
            .variable_delimiters(VARIABLE_DELIMITERS.0, VARIABLE_DELIMITERS.1)
            .comment_delimiters(COMMENT_DELIMITERS.0, COMMENT_DELIMITERS.1)
            .build()
            .map_err(|e| Error::TemplateError(e.to_string()))?;

        let mut env = Environment::new();
        env.set_syntax(syntax);
        env.set_keep_trailing_newline(true);
        Ok(Self { env })
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// # Errors
    /// * `Error::TemplateRenderError` if the template does not parse or fails to render
    fn render(&self, name: &str, template: &str, context: &serde_json::Value) -> Result<String> {
        let render_error = |e: minijinja::Error| Error::TemplateRenderError {
            name: name.to_string(),
            message: e.to_string(),
        };
        self.env.render_named_str(name, template, context).map_err(render_error)
    }

    fn eval_condition(&self, expression: &str, context: &serde_json::Value) -> Result<bool> {
        let (open, close) = BLOCK_DELIMITERS;
        let probe = format!("{open} if {expression} {close}true{open} endif {close}");
        let rendered = self.render(&format!("when: {expression}"), &probe, context)?;
        Ok(rendered == "true")
    }
}
