//! Scripted operator answers

use squash_merge::error::{Error, Result};
use squash_merge::prompt::Prompter;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Answers prompts from queues and records every prompt shown
///
/// Running out of answers is an error, so an unexpected prompt fails the test.
pub struct ScriptedPrompter {
    confirms: Mutex<VecDeque<bool>>,
    inputs: Mutex<VecDeque<String>>,
    passwords: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    /// Queue yes/no answers
    pub fn new(confirms: &[bool]) -> Self {
        Self {
            confirms: Mutex::new(confirms.iter().copied().collect()),
            inputs: Mutex::new(VecDeque::new()),
            passwords: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Queue text answers; an empty answer takes the prompt's default
    #[must_use]
    pub fn with_inputs(self, inputs: &[&str]) -> Self {
        *self.inputs.lock().unwrap() = inputs.iter().map(ToString::to_string).collect();
        self
    }

    /// Queue password answers
    #[must_use]
    pub fn with_passwords(self, passwords: &[&str]) -> Self {
        *self.passwords.lock().unwrap() = passwords.iter().map(ToString::to_string).collect();
        self
    }

    /// Every prompt shown so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Whether every queued answer was consumed
    pub fn exhausted(&self) -> bool {
        self.confirms.lock().unwrap().is_empty()
            && self.inputs.lock().unwrap().is_empty()
            && self.passwords.lock().unwrap().is_empty()
    }

    fn record(&self, prompt: &str) {
        self.prompts.lock().unwrap().push(prompt.to_string());
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        self.record(prompt);
        self.confirms
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::Prompt(format!("unexpected confirmation: {prompt}")))
    }

    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        self.record(prompt);
        let answer = self
            .inputs
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::Prompt(format!("unexpected input prompt: {prompt}")))?;
        match default {
            Some(value) if answer.is_empty() => Ok(value.to_string()),
            _ => Ok(answer),
        }
    }

    fn password(&self, prompt: &str) -> Result<String> {
        self.record(prompt);
        self.passwords
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::Prompt(format!("unexpected password prompt: {prompt}")))
    }
}
