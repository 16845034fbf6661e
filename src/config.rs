//! Question schema handling for kiln generators.
//! A generator ships an ordered list of questions; the order decides the order of
//! prompting, never the precedence of answers.

use crate::constants::{CONFIG_FLAG, SCHEMA_FILES};
use crate::error::{Error, Result};
use indexmap::IndexSet;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Kind of prompt a question is asked with. Also decides the value shape of
/// its command-line flag and whether casing variants are derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Confirm,
    #[default]
    Input,
    Password,
    Editor,
    Rawlist,
    List,
    Expand,
    Number,
    Checkbox,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Confirm => "confirm",
            QuestionType::Input => "input",
            QuestionType::Password => "password",
            QuestionType::Editor => "editor",
            QuestionType::Rawlist => "rawlist",
            QuestionType::List => "list",
            QuestionType::Expand => "expand",
            QuestionType::Number => "number",
            QuestionType::Checkbox => "checkbox",
        }
    }

    /// Whether `_snake`, `_pascal` and `_param` variants are derived for answers of this kind.
    pub fn derives_variants(&self) -> bool {
        !matches!(self, QuestionType::Number | QuestionType::Confirm)
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the question schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Answer name, also the source of the flag name and of template variables
    pub name: String,
    #[serde(rename = "type", default)]
    pub question_type: QuestionType,
    /// Prompt text, reused as the flag's help text
    #[serde(default)]
    pub message: String,
    /// Expression deciding whether the question applies, evaluated against the answers known so far
    #[serde(default)]
    pub when: Option<String>,
    #[serde(default)]
    pub choices: Vec<String>,
    #[serde(default)]
    pub default: Option<serde_json::Value>,
}

impl Question {
    pub fn new<N: Into<String>, M: Into<String>>(
        name: N,
        question_type: QuestionType,
        message: M,
    ) -> Self {
        Self {
            name: name.into(),
            question_type,
            message: message.into(),
            when: None,
            choices: Vec::new(),
            default: None,
        }
    }

    pub fn with_when<S: Into<String>>(mut self, when: S) -> Self {
        self.when = Some(when.into());
        self
    }

    pub fn with_choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_default(mut self, default: serde_json::Value) -> Self {
        self.default = Some(default);
        self
    }
}

/// Loads the question schema from a generator directory.
/// Supports: questions.json, questions.yml, questions.yaml
///
/// # Errors
/// * `Error::SchemaError` if no schema file exists or it cannot be parsed
pub fn load_questions<P: AsRef<Path>>(generator_dir: P) -> Result<Vec<Question>> {
    let generator_dir = generator_dir.as_ref();
    for file in SCHEMA_FILES {
        let schema_path = generator_dir.join(file);
        if schema_path.exists() {
            debug!("Loading questions from {}", schema_path.display());
            let content = std::fs::read_to_string(&schema_path)?;
            return parse_questions(&content);
        }
    }

    Err(Error::SchemaError(format!(
        "no question schema found in '{}' (tried: {})",
        generator_dir.display(),
        SCHEMA_FILES.join(", ")
    )))
}

/// Parses a question list from JSON, falling back to YAML, and validates it.
pub fn parse_questions(content: &str) -> Result<Vec<Question>> {
    let questions: Vec<Question> = match serde_json::from_str(content) {
        Ok(questions) => questions,
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::SchemaError(format!("invalid question schema: {e}")))?,
    };
    validate_questions(&questions)?;
    Ok(questions)
}

/// Checks that every question name is an identifier, unique and not reserved.
pub fn validate_questions(questions: &[Question]) -> Result<()> {
    let identifier = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$")
        .map_err(|e| Error::SchemaError(e.to_string()))?;
    let mut seen = IndexSet::new();

    for question in questions {
        if !identifier.is_match(&question.name) {
            return Err(Error::SchemaError(format!(
                "question name '{}' is not a valid identifier",
                question.name
            )));
        }
        if question.name == CONFIG_FLAG {
            return Err(Error::SchemaError(format!(
                "question name '{CONFIG_FLAG}' is reserved"
            )));
        }
        if !seen.insert(question.name.as_str()) {
            return Err(Error::SchemaError(format!(
                "question '{}' is declared more than once",
                question.name
            )));
        }
    }
    Ok(())
}
