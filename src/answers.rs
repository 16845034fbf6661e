//! Typed answer values and the answer set handed to the template renderer.

use crate::config::QuestionType;
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Number, Value};

/// A single answer. The variant is decided by the question's type, not by the
/// shape of whatever produced the value.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    Bool(bool),
    Number(Number),
    Text(String),
    List(Vec<String>),
}

impl Answer {
    /// JavaScript-style truthiness: empty text, `false` and zero are falsy, lists never are.
    pub fn is_truthy(&self) -> bool {
        match self {
            Answer::Bool(value) => *value,
            Answer::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
            Answer::Text(text) => !text.is_empty(),
            Answer::List(_) => true,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Answer::Bool(value) => Value::Bool(*value),
            Answer::Number(number) => Value::Number(number.clone()),
            Answer::Text(text) => Value::String(text.clone()),
            Answer::List(items) => Value::Array(items.iter().cloned().map(Value::String).collect()),
        }
    }

    /// Converts a JSON value supplied outside the prompt into an answer for a
    /// question of the given type. `null` yields no answer.
    ///
    /// Values whose shape does not fit the question type are kept as they are,
    /// never rejected: `"yes"` for a confirm question stays text.
    pub fn from_json(kind: QuestionType, value: &Value) -> Option<Answer> {
        let answer = match (kind, value) {
            (_, Value::Null) => return None,
            (QuestionType::Number, Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(number_from_f64)
                .map_or_else(|| Answer::Text(s.clone()), Answer::Number),
            (QuestionType::Checkbox, Value::String(s)) => Answer::List(split_comma_list(s)),
            (QuestionType::Confirm | QuestionType::Number | QuestionType::Checkbox, _) => {
                Answer::from_json_shape(value)
            }
            (_, Value::Number(n)) => Answer::Text(n.to_string()),
            (_, Value::Bool(b)) => Answer::Text(b.to_string()),
            (_, _) => Answer::from_json_shape(value),
        };
        Some(answer)
    }

    /// Answer following the JSON value's own shape.
    fn from_json_shape(value: &Value) -> Answer {
        match value {
            Value::Bool(b) => Answer::Bool(*b),
            Value::Number(n) => Answer::Number(n.clone()),
            Value::String(s) => Answer::Text(s.clone()),
            Value::Array(items) => Answer::List(
                items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect(),
            ),
            Value::Null | Value::Object(_) => Answer::Text(value.to_string()),
        }
    }
}

impl From<&str> for Answer {
    fn from(value: &str) -> Self {
        Answer::Text(value.to_string())
    }
}

impl From<String> for Answer {
    fn from(value: String) -> Self {
        Answer::Text(value)
    }
}

impl From<bool> for Answer {
    fn from(value: bool) -> Self {
        Answer::Bool(value)
    }
}

impl From<Vec<String>> for Answer {
    fn from(value: Vec<String>) -> Self {
        Answer::List(value)
    }
}

impl From<Vec<&str>> for Answer {
    fn from(value: Vec<&str>) -> Self {
        Answer::List(value.into_iter().map(String::from).collect())
    }
}

impl Serialize for Answer {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Answer::Bool(value) => serializer.serialize_bool(*value),
            Answer::Number(number) => number.serialize(serializer),
            Answer::Text(text) => serializer.serialize_str(text),
            Answer::List(items) => items.serialize(serializer),
        }
    }
}

/// Splits a comma separated flag value. An empty string is an empty list.
pub fn split_comma_list(value: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    value.split(',').map(String::from).collect()
}

/// Integral values stay integers so that `8080` renders as `8080`, not `8080.0`.
pub fn number_from_f64(value: f64) -> Option<Number> {
    if value.fract() == 0.0 && value >= i64::MIN as f64 && value <= i64::MAX as f64 {
        Some(Number::from(value as i64))
    } else {
        Number::from_f64(value)
    }
}

/// Ordered mapping from answer name to value.
///
/// A name may be present without a value: the question exists but was skipped
/// and nothing supplied it. Such names are left out of the template context, so
/// they render as empty strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerSet {
    values: IndexMap<String, Option<Answer>>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<S: Into<String>, A: Into<Answer>>(&mut self, name: S, answer: A) {
        self.values.insert(name.into(), Some(answer.into()));
    }

    /// Records a name without a value, keeping any value already present.
    pub fn insert_unset<S: Into<String>>(&mut self, name: S) {
        self.values.entry(name.into()).or_insert(None);
    }

    pub fn get(&self, name: &str) -> Option<&Answer> {
        self.values.get(name).and_then(Option::as_ref)
    }

    /// Whether `name` has a defined value.
    pub fn is_answered(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Whether `name` is present at all, with or without a value.
    pub fn contains_name(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Layers `other` on top of `self`; defined values in `other` win.
    pub fn overlay(&mut self, other: &AnswerSet) {
        for (name, answer) in &other.values {
            match answer {
                Some(answer) => {
                    self.values.insert(name.clone(), Some(answer.clone()));
                }
                None => self.insert_unset(name.clone()),
            }
        }
    }

    /// Returns a new set with `other` layered on top of `self`.
    pub fn merged(&self, other: &AnswerSet) -> AnswerSet {
        let mut merged = self.clone();
        merged.overlay(other);
        merged
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, Option<&Answer>)> {
        self.values.iter().map(|(name, answer)| (name, answer.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// JSON object with every defined answer, used as the template context.
    pub fn to_context(&self) -> Value {
        Value::Object(
            self.values
                .iter()
                .filter_map(|(name, answer)| answer.as_ref().map(|a| (name.clone(), a.to_json())))
                .collect(),
        )
    }
}

impl Serialize for AnswerSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let defined: Vec<_> = self
            .values
            .iter()
            .filter_map(|(name, answer)| answer.as_ref().map(|a| (name, a)))
            .collect();
        let mut map = serializer.serialize_map(Some(defined.len()))?;
        for (name, answer) in defined {
            map.serialize_entry(name, answer)?;
        }
        map.end()
    }
}
