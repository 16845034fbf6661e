//! Interactive prompting for kiln.
//! A prompting session walks the questions in schema order and asks only those
//! whose effective predicate holds against the answers known at that point.

use crate::answers::{number_from_f64, Answer, AnswerSet};
use crate::config::{Question, QuestionType};
use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;
use dialoguer::{Confirm, Editor, FuzzySelect, Input, MultiSelect, Password, Select};
use log::debug;

/// Asks a single question and returns the answer.
pub trait Prompter {
    /// # Arguments
    /// * `question` - Question to ask, its type decides the widget
    /// * `message` - Prompt text, already rendered against the answers so far
    fn ask(&self, question: &Question, message: &str) -> Result<Answer>;
}

/// Whether a question is asked during the session.
///
/// Holds the question's own `when` expression and whether its answer was already
/// known before prompting. A pre-answered question is never asked, whatever its
/// own expression says.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub expression: Option<String>,
    pub preanswered: bool,
}

impl Predicate {
    /// Evaluates the predicate against a snapshot of the answers known so far.
    pub fn evaluate(&self, engine: &dyn TemplateRenderer, snapshot: &AnswerSet) -> Result<bool> {
        if self.preanswered {
            return Ok(false);
        }
        match &self.expression {
            None => Ok(true),
            Some(expression) => engine.eval_condition(expression, &snapshot.to_context()),
        }
    }
}

/// A question paired with its effective predicate.
#[derive(Debug, Clone)]
pub struct PlannedQuestion<'a> {
    pub question: &'a Question,
    pub when: Predicate,
}

/// Runs one prompting session and returns answers for the questions actually asked.
///
/// # Arguments
/// * `preanswered` - Answers known before prompting, visible to every predicate
pub fn prompt_questions(
    prompter: &dyn Prompter,
    engine: &dyn TemplateRenderer,
    planned: &[PlannedQuestion<'_>],
    preanswered: &AnswerSet,
) -> Result<AnswerSet> {
    let mut answers = AnswerSet::new();

    for item in planned {
        let name = &item.question.name;
        let snapshot = preanswered.merged(&answers);
        if !item.when.evaluate(engine, &snapshot)? {
            debug!("Skipping question '{name}'");
            continue;
        }

        // The message may refer to earlier answers.
        let message = engine
            .render(name, &item.question.message, &snapshot.to_context())
            .unwrap_or_else(|_| item.question.message.clone());

        let answer = prompter.ask(item.question, &message)?;
        debug!("Answered '{name}': {answer:?}");
        answers.insert(name.clone(), answer);
    }

    Ok(answers)
}

/// Terminal prompter built on dialoguer.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

fn prompt_error(e: dialoguer::Error) -> Error {
    Error::PromptError(e.to_string())
}

fn text_default(question: &Question) -> Option<String> {
    match &question.default {
        Some(serde_json::Value::String(s)) => Some(s.clone()),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Index of the default choice: either the choice itself or its position.
fn single_choice_default(question: &Question) -> usize {
    match &question.default {
        Some(serde_json::Value::String(s)) => {
            question.choices.iter().position(|choice| choice == s).unwrap_or(0)
        }
        Some(serde_json::Value::Number(n)) => n
            .as_u64()
            .and_then(|i| usize::try_from(i).ok())
            .filter(|i| *i < question.choices.len())
            .unwrap_or(0),
        _ => 0,
    }
}

fn multiple_choice_defaults(question: &Question) -> Vec<bool> {
    let selected: Vec<&str> = match &question.default {
        Some(serde_json::Value::Array(items)) => items.iter().filter_map(|v| v.as_str()).collect(),
        _ => Vec::new(),
    };
    question.choices.iter().map(|choice| selected.contains(&choice.as_str())).collect()
}

fn require_choices(question: &Question) -> Result<()> {
    if question.choices.is_empty() {
        return Err(Error::PromptError(format!(
            "question '{}' of type '{}' has no choices",
            question.name, question.question_type
        )));
    }
    Ok(())
}

impl Prompter for DialoguerPrompter {
    fn ask(&self, question: &Question, message: &str) -> Result<Answer> {
        let answer = match question.question_type {
            QuestionType::Confirm => {
                let default = question.default.as_ref().and_then(|v| v.as_bool()).unwrap_or(false);
                let value = Confirm::new()
                    .with_prompt(message)
                    .default(default)
                    .interact()
                    .map_err(prompt_error)?;
                Answer::Bool(value)
            }
            QuestionType::Input => {
                let mut input = Input::<String>::new().with_prompt(message).allow_empty(true);
                if let Some(default) = text_default(question) {
                    input = input.default(default);
                }
                Answer::Text(input.interact_text().map_err(prompt_error)?)
            }
            QuestionType::Password => {
                let value = Password::new()
                    .with_prompt(message)
                    .allow_empty_password(true)
                    .interact()
                    .map_err(prompt_error)?;
                Answer::Text(value)
            }
            QuestionType::Editor => {
                eprintln!("{message}");
                let initial = text_default(question).unwrap_or_default();
                let value = Editor::new()
                    .edit(&initial)
                    .map_err(|e| Error::PromptError(e.to_string()))?;
                Answer::Text(value.unwrap_or(initial))
            }
            QuestionType::List | QuestionType::Rawlist => {
                require_choices(question)?;
                let index = Select::new()
                    .with_prompt(message)
                    .items(&question.choices)
                    .default(single_choice_default(question))
                    .interact()
                    .map_err(prompt_error)?;
                Answer::Text(question.choices[index].clone())
            }
            QuestionType::Expand => {
                require_choices(question)?;
                let index = FuzzySelect::new()
                    .with_prompt(message)
                    .items(&question.choices)
                    .default(single_choice_default(question))
                    .interact()
                    .map_err(prompt_error)?;
                Answer::Text(question.choices[index].clone())
            }
            QuestionType::Number => {
                let mut input = Input::<f64>::new().with_prompt(message);
                if let Some(default) = question.default.as_ref().and_then(|v| v.as_f64()) {
                    input = input.default(default);
                }
                let value = input.interact_text().map_err(prompt_error)?;
                let number = number_from_f64(value)
                    .ok_or_else(|| Error::PromptError(format!("'{value}' is not a number")))?;
                Answer::Number(number)
            }
            QuestionType::Checkbox => {
                require_choices(question)?;
                let indexes = MultiSelect::new()
                    .with_prompt(message)
                    .items(&question.choices)
                    .defaults(&multiple_choice_defaults(question))
                    .interact()
                    .map_err(prompt_error)?;
                Answer::List(indexes.into_iter().map(|i| question.choices[i].clone()).collect())
            }
        };
        Ok(answer)
    }
}
