//! Command-line interface implementation for kiln.
//! Turns the question schema into flag declarations and parses them with an
//! explicitly built clap command, one flag per question plus `--config`.

use crate::casing::to_param_case;
use crate::config::{Question, QuestionType};
use crate::constants::CONFIG_FLAG;
use crate::error::{Error, Result};
use clap::parser::ValueSource;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use indexmap::IndexMap;
use std::convert::Infallible;
use std::ffi::OsString;
use std::path::PathBuf;

/// Flags clap registers on its own.
const BUILTIN_FLAGS: [&str; 1] = ["help"];

/// What a flag accepts after its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    /// Bare presence flag
    None,
    String,
    Number,
    /// Comma separated list of strings
    CommaList,
    /// File system path, only used by `--config`
    Path,
}

impl From<QuestionType> for ValueShape {
    fn from(kind: QuestionType) -> Self {
        match kind {
            QuestionType::Confirm => ValueShape::None,
            QuestionType::Number => ValueShape::Number,
            QuestionType::Checkbox => ValueShape::CommaList,
            QuestionType::Input
            | QuestionType::Password
            | QuestionType::Editor
            | QuestionType::Rawlist
            | QuestionType::List
            | QuestionType::Expand => ValueShape::String,
        }
    }
}

/// A single command-line flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagDeclaration {
    /// Key the parsed value is stored under: the question name, or `config`
    pub id: String,
    /// Long flag name without the leading dashes
    pub flag_name: String,
    pub value_shape: ValueShape,
    pub help: String,
}

/// Question name to question type, built once per run.
pub type AnswerKinds = IndexMap<String, QuestionType>;

/// Raw value of one flag as it appeared on the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// A bare flag, also produced when a value-taking flag is given without a value
    Flag(bool),
    Text(String),
    Number(f64),
    List(Vec<String>),
    Path(PathBuf),
}

/// Values of the flags present on the command line, keyed by declaration id.
pub type RawCliValues = IndexMap<String, RawValue>;

/// Value parser for checkbox flags: `""` is an empty list, `"a,b"` is `["a", "b"]`.
pub fn parse_comma_list(value: &str) -> std::result::Result<Vec<String>, Infallible> {
    Ok(crate::answers::split_comma_list(value))
}

/// Builds flag declarations and the answer type lookup from the question schema.
///
/// # Errors
/// * `Error::FlagConflictError` if two questions, or a question and a reserved
///   flag, end up with the same flag name
pub fn build_declarations(questions: &[Question]) -> Result<(Vec<FlagDeclaration>, AnswerKinds)> {
    let mut declarations = vec![FlagDeclaration {
        id: CONFIG_FLAG.to_string(),
        flag_name: CONFIG_FLAG.to_string(),
        value_shape: ValueShape::Path,
        help: "File with options to process".to_string(),
    }];
    let mut owners: IndexMap<String, String> = BUILTIN_FLAGS
        .iter()
        .chain(std::iter::once(&CONFIG_FLAG))
        .map(|flag| (flag.to_string(), flag.to_string()))
        .collect();
    let mut kinds = AnswerKinds::new();

    for question in questions {
        let flag_name = to_param_case(&question.name);
        if let Some(owner) = owners.get(&flag_name) {
            return Err(Error::FlagConflictError {
                flag: flag_name,
                first: owner.clone(),
                second: question.name.clone(),
            });
        }
        owners.insert(flag_name.clone(), question.name.clone());

        declarations.push(FlagDeclaration {
            id: question.name.clone(),
            flag_name,
            value_shape: question.question_type.into(),
            help: question.message.clone(),
        });
        kinds.insert(question.name.clone(), question.question_type);
    }

    Ok((declarations, kinds))
}

/// Builds a fresh clap command for the given declarations.
pub fn build_command(declarations: &[FlagDeclaration]) -> Command {
    let args = declarations.iter().map(|declaration| {
        let arg = Arg::new(declaration.id.clone())
            .long(declaration.flag_name.clone())
            .help(declaration.help.clone());
        match declaration.value_shape {
            ValueShape::None => arg.action(ArgAction::SetTrue),
            ValueShape::String => arg.value_name("STRING").num_args(0..=1),
            ValueShape::Number => {
                arg.value_name("NUMBER").num_args(0..=1).value_parser(value_parser!(f64))
            }
            ValueShape::CommaList => {
                arg.value_name("LIST").num_args(0..=1).value_parser(parse_comma_list)
            }
            ValueShape::Path => arg.value_name("PATH").value_parser(value_parser!(PathBuf)),
        }
    });

    Command::new(env!("CARGO_PKG_NAME"))
        .about("Generates a project from the bundled template")
        .args(args)
}

/// Collects the values of flags that were given on the command line.
pub fn raw_values(matches: &ArgMatches, declarations: &[FlagDeclaration]) -> RawCliValues {
    let mut values = RawCliValues::new();
    for declaration in declarations {
        let id = declaration.id.as_str();
        if matches.value_source(id) != Some(ValueSource::CommandLine) {
            continue;
        }
        let value = match declaration.value_shape {
            ValueShape::None => Some(RawValue::Flag(matches.get_flag(id))),
            ValueShape::String => {
                Some(matches.get_one::<String>(id).map_or(RawValue::Flag(true), |v| {
                    RawValue::Text(v.clone())
                }))
            }
            ValueShape::Number => Some(
                matches.get_one::<f64>(id).map_or(RawValue::Flag(true), |v| RawValue::Number(*v)),
            ),
            ValueShape::CommaList => {
                Some(matches.get_one::<Vec<String>>(id).map_or(RawValue::Flag(true), |v| {
                    RawValue::List(v.clone())
                }))
            }
            ValueShape::Path => matches.get_one::<PathBuf>(id).cloned().map(RawValue::Path),
        };
        if let Some(value) = value {
            values.insert(declaration.id.clone(), value);
        }
    }
    values
}

/// Parses `args` (including the binary name) against the declarations.
pub fn try_parse_from<I, T>(
    declarations: &[FlagDeclaration],
    args: I,
) -> std::result::Result<RawCliValues, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = build_command(declarations).try_get_matches_from(args)?;
    Ok(raw_values(&matches, declarations))
}
