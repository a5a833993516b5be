//! Operator interaction
//!
//! Every mutation in a merge run is gated on a blocking prompt. The
//! [`Prompter`] trait keeps the run logic independent from the terminal so
//! it can be driven by scripted answers in tests.

use crate::error::{Error, Result};
use dialoguer::{Confirm, Input, Password};

/// Blocking operator prompts
pub trait Prompter: Send + Sync {
    /// Ask a yes/no question
    fn confirm(&self, prompt: &str) -> Result<bool>;

    /// Ask for a line of text; an empty answer yields `default` when given
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String>;

    /// Ask for a secret without echoing it
    fn password(&self, prompt: &str) -> Result<String>;
}

/// Require a "yes", otherwise abort the run
pub fn continue_maybe(prompter: &dyn Prompter, prompt: &str) -> Result<()> {
    if prompter.confirm(prompt)? {
        Ok(())
    } else {
        Err(Error::Aborted)
    }
}

/// Terminal prompts via dialoguer
#[derive(Debug, Clone, Copy, Default)]
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .wait_for_newline(true)
            .interact()
            .map_err(|e| Error::Prompt(format!("Failed to read confirmation: {e}")))
    }

    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
        if let Some(value) = default {
            input = input.default(value.to_string());
        }
        input
            .interact_text()
            .map(|s| s.trim().to_string())
            .map_err(|e| Error::Prompt(format!("Failed to read input: {e}")))
    }

    fn password(&self, prompt: &str) -> Result<String> {
        Password::new()
            .with_prompt(prompt)
            .interact()
            .map_err(|e| Error::Prompt(format!("Failed to read password: {e}")))
    }
}
