#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use kiln::answers::Answer;
use kiln::config::Question;
use kiln::error::{Error, Result};
use kiln::prompt::Prompter;

/// Prompter answering from a script and recording what it was asked.
#[derive(Default)]
pub struct ScriptedPrompter {
    responses: IndexMap<String, Answer>,
    asked: RefCell<Vec<(String, String)>>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond<A: Into<Answer>>(mut self, name: &str, answer: A) -> Self {
        self.responses.insert(name.to_string(), answer.into());
        self
    }

    /// Names of the questions asked, in order.
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn messages(&self) -> Vec<String> {
        self.asked.borrow().iter().map(|(_, message)| message.clone()).collect()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&self, question: &Question, message: &str) -> Result<Answer> {
        self.asked.borrow_mut().push((question.name.clone(), message.to_string()));
        self.responses
            .get(&question.name)
            .cloned()
            .ok_or_else(|| Error::PromptError(format!("no scripted answer for '{}'", question.name)))
    }
}

pub fn write_file<P: AsRef<Path>>(path: P, content: &str) {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}
