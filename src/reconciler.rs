//! Answer reconciliation.
//! Merges the `--config` file, command-line flags and interactive prompts into
//! one answer set, then adds the casing variants of every text and list answer.
//!
//! Precedence, highest first: command-line flags, config file, prompt. A value
//! known before prompting is never asked for again.

use crate::answers::{number_from_f64, Answer, AnswerSet};
use crate::casing::derive_answer;
use crate::cli::{AnswerKinds, RawCliValues, RawValue};
use crate::config::{Question, QuestionType};
use crate::constants::CONFIG_FLAG;
use crate::error::{Error, Result};
use crate::prompt::{prompt_questions, PlannedQuestion, Predicate, Prompter};
use crate::renderer::TemplateRenderer;
use log::debug;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

fn raw_to_json(value: &RawValue) -> Value {
    match value {
        RawValue::Flag(flag) => Value::Bool(*flag),
        RawValue::Text(text) => Value::String(text.clone()),
        RawValue::Number(number) => number_from_f64(*number).map_or(Value::Null, Value::Number),
        RawValue::List(items) => Value::Array(items.iter().cloned().map(Value::String).collect()),
        RawValue::Path(path) => Value::String(path.display().to_string()),
    }
}

/// Keeps only command-line values that answer a question.
///
/// Parser keys unknown to the schema (such as `config`) are dropped. So is a bare
/// flag given for a question that expects a value: it carries no answer and
/// counts as absent rather than `true`.
pub fn filter_cli_values(raw: &RawCliValues, kinds: &AnswerKinds) -> AnswerSet {
    let mut answers = AnswerSet::new();
    for (key, value) in raw {
        let Some(kind) = kinds.get(key) else {
            continue;
        };
        if matches!(value, RawValue::Flag(_)) && *kind != QuestionType::Confirm {
            debug!("Ignoring flag '{key}' given without a value");
            continue;
        }
        if let Some(answer) = Answer::from_json(*kind, &raw_to_json(value)) {
            answers.insert(key.clone(), answer);
        }
    }
    answers
}

/// Reads the JSON object passed with `--config`.
///
/// # Errors
/// * `Error::ConfigFileReadError` if the file cannot be read
/// * `Error::ConfigFileParseError` if it is not a JSON object
pub fn load_config_file<P: AsRef<Path>>(path: P) -> Result<Map<String, Value>> {
    let path = path.as_ref();
    debug!("Loading answers from {}", path.display());
    let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigFileReadError {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| Error::ConfigFileParseError {
        path: path.display().to_string(),
        source,
    })
}

/// Answers found in a config file object. Keys that match no question are ignored.
///
/// A key set to `null` is kept without a value: the question counts as supplied
/// and is not asked.
pub fn config_answers(config: &Map<String, Value>, kinds: &AnswerKinds) -> AnswerSet {
    let mut answers = AnswerSet::new();
    for (key, value) in config {
        match kinds.get(key) {
            Some(kind) => match Answer::from_json(*kind, value) {
                Some(answer) => answers.insert(key.clone(), answer),
                None => answers.insert_unset(key.clone()),
            },
            None => debug!("Ignoring config key '{key}' that matches no question"),
        }
    }
    answers
}

/// Location of the config file, if `--config` was given.
fn config_path(raw: &RawCliValues) -> Option<PathBuf> {
    match raw.get(CONFIG_FLAG) {
        Some(RawValue::Path(path)) => Some(path.clone()),
        Some(RawValue::Text(path)) => Some(PathBuf::from(path)),
        _ => None,
    }
}

/// Answers known before prompting: the config file overlaid by command-line values.
pub fn preprompt_answers(raw: &RawCliValues, kinds: &AnswerKinds) -> Result<AnswerSet> {
    let cli = filter_cli_values(raw, kinds);
    let mut answers = match config_path(raw) {
        Some(path) => config_answers(&load_config_file(path)?, kinds),
        None => AnswerSet::new(),
    };
    answers.overlay(&cli);
    Ok(answers)
}

/// Pairs every question with its effective predicate: its own `when` and not supplied yet.
/// A name present without a value, such as a config `null`, counts as supplied.
pub fn plan_questions<'a>(
    questions: &'a [Question],
    preanswered: &AnswerSet,
) -> Vec<PlannedQuestion<'a>> {
    questions
        .iter()
        .map(|question| PlannedQuestion {
            question,
            when: Predicate {
                expression: question.when.clone(),
                preanswered: preanswered.contains_name(&question.name),
            },
        })
        .collect()
}

/// Adds `{name}_snake`, `{name}_pascal` and `{name}_param` for every truthy text or list answer.
pub fn add_derived_variants(answers: &mut AnswerSet, questions: &[Question]) {
    let mut derived = AnswerSet::new();
    for question in questions {
        if !question.question_type.derives_variants() {
            continue;
        }
        let Some(answer) = answers.get(&question.name).filter(|a| a.is_truthy()) else {
            continue;
        };
        if let Some(variants) = derive_answer(answer) {
            for (suffix, value) in variants.into_suffixed() {
                derived.insert(format!("{}{suffix}", question.name), value);
            }
        }
    }
    answers.overlay(&derived);
}

/// Computes the final answer set for a run.
///
/// The config file is loaded before the prompter is invoked. Every question name is present in the result,
/// without a value if it was skipped and never supplied.
///
/// # Errors
/// * `Error::ConfigFileReadError` or `Error::ConfigFileParseError` for a bad `--config`
/// * Prompt and `when` evaluation errors
pub fn reconcile(
    questions: &[Question],
    kinds: &AnswerKinds,
    raw: &RawCliValues,
    prompter: &dyn Prompter,
    engine: &dyn TemplateRenderer,
) -> Result<AnswerSet> {
    let preanswered = preprompt_answers(raw, kinds)?;
    let planned = plan_questions(questions, &preanswered);
    let prompted = prompt_questions(prompter, engine, &planned, &preanswered)?;

    let mut answers = preanswered.merged(&prompted);
    for question in questions {
        answers.insert_unset(question.name.clone());
    }
    add_derived_variants(&mut answers, questions);
    Ok(answers)
}
