//! String casing variants derived from answers.

use crate::answers::Answer;
use cruet::Inflector;

/// Casing variants of a value. Each field has the shape of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variants<T> {
    pub snake: T,
    pub pascal: T,
    /// kebab-case, named after the `param` case used in flag names
    pub param: T,
}

impl<T> Variants<T> {
    pub fn map<U, F: Fn(T) -> U>(self, f: F) -> Variants<U> {
        Variants { snake: f(self.snake), pascal: f(self.pascal), param: f(self.param) }
    }

    /// `(suffix, value)` pairs, in the order the keys are added to an answer set.
    pub fn into_suffixed(self) -> [(&'static str, T); 3] {
        [("_snake", self.snake), ("_pascal", self.pascal), ("_param", self.param)]
    }
}

pub fn to_param_case(value: &str) -> String {
    value.to_kebab_case()
}

/// Derives the three casing variants of a single string.
pub fn derive(value: &str) -> Variants<String> {
    Variants {
        snake: value.to_snake_case(),
        pascal: value.to_pascal_case(),
        param: to_param_case(value),
    }
}

/// Derives the casing variants of every element, preserving order.
pub fn derive_list<S: AsRef<str>>(values: &[S]) -> Variants<Vec<String>> {
    let derived: Vec<Variants<String>> = values.iter().map(|v| derive(v.as_ref())).collect();
    Variants {
        snake: derived.iter().map(|d| d.snake.clone()).collect(),
        pascal: derived.iter().map(|d| d.pascal.clone()).collect(),
        param: derived.into_iter().map(|d| d.param).collect(),
    }
}

/// Variants of a text or list answer. Booleans and numbers have none.
pub fn derive_answer(answer: &Answer) -> Option<Variants<Answer>> {
    match answer {
        Answer::Text(text) => Some(derive(text).map(Answer::Text)),
        Answer::List(items) => Some(derive_list(items).map(Answer::List)),
        Answer::Bool(_) | Answer::Number(_) => None,
    }
}
