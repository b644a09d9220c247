//! Decision providers: interactive prompts or configuration-driven answers
//!
//! The orchestrator never talks to a terminal directly. Every decision point
//! goes through this trait, so automation mode and tests substitute their
//! own providers.

use crate::core::error::ReleaseResult;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect, Select};

/// Answers the orchestrator's decision points
pub trait DecisionProvider {
  /// Pick one of `items`, or `None` when the operator cancels.
  fn select_one(&self, prompt: &str, items: &[String]) -> ReleaseResult<Option<usize>>;

  /// Pick zero or more of `items`.
  fn select_many(&self, prompt: &str, items: &[String]) -> ReleaseResult<Vec<usize>>;

  /// Yes/no confirmation. Cancelling counts as declining.
  fn confirm(&self, prompt: &str) -> ReleaseResult<bool>;

  /// Free-text input with a pre-filled initial value.
  fn input(&self, prompt: &str, initial: &str) -> ReleaseResult<String>;
}

/// Terminal prompts via dialoguer
pub struct Interactive;

impl DecisionProvider for Interactive {
  fn select_one(&self, prompt: &str, items: &[String]) -> ReleaseResult<Option<usize>> {
    let picked = Select::with_theme(&ColorfulTheme::default())
      .with_prompt(prompt)
      .items(items)
      .default(0)
      .interact_opt()?;
    Ok(picked)
  }

  fn select_many(&self, prompt: &str, items: &[String]) -> ReleaseResult<Vec<usize>> {
    let picked = MultiSelect::with_theme(&ColorfulTheme::default())
      .with_prompt(prompt)
      .items(items)
      .interact_opt()?;
    Ok(picked.unwrap_or_default())
  }

  fn confirm(&self, prompt: &str) -> ReleaseResult<bool> {
    let answer = Confirm::with_theme(&ColorfulTheme::default())
      .with_prompt(prompt)
      .default(false)
      .interact_opt()?;
    Ok(answer.unwrap_or(false))
  }

  fn input(&self, prompt: &str, initial: &str) -> ReleaseResult<String> {
    let text: String = Input::with_theme(&ColorfulTheme::default())
      .with_prompt(prompt)
      .with_initial_text(initial)
      .allow_empty(true)
      .interact_text()?;
    Ok(text.trim().to_string())
  }
}

/// Automation-mode provider: every decision is deterministic, nothing is
/// ever prompted. Confirmations pass, multi-selects take everything,
/// free text echoes its initial value.
pub struct Automated;

impl DecisionProvider for Automated {
  fn select_one(&self, _prompt: &str, items: &[String]) -> ReleaseResult<Option<usize>> {
    Ok(if items.is_empty() { None } else { Some(0) })
  }

  fn select_many(&self, _prompt: &str, items: &[String]) -> ReleaseResult<Vec<usize>> {
    Ok((0..items.len()).collect())
  }

  fn confirm(&self, _prompt: &str) -> ReleaseResult<bool> {
    Ok(true)
  }

  fn input(&self, _prompt: &str, initial: &str) -> ReleaseResult<String> {
    Ok(initial.to_string())
  }
}

/// Scripted provider for tests: answers are consumed in order.
#[cfg(test)]
pub struct Scripted {
  answers: std::cell::RefCell<std::collections::VecDeque<Answer>>,
}

#[cfg(test)]
#[derive(Debug, Clone)]
pub enum Answer {
  Pick(Option<usize>),
  PickMany(Vec<usize>),
  Yes(bool),
  Text(String),
}

#[cfg(test)]
impl Scripted {
  pub fn new(answers: Vec<Answer>) -> Self {
    Self {
      answers: std::cell::RefCell::new(answers.into()),
    }
  }

  fn next(&self, prompt: &str) -> Answer {
    self
      .answers
      .borrow_mut()
      .pop_front()
      .unwrap_or_else(|| panic!("no scripted answer left for prompt: {}", prompt))
  }
}

#[cfg(test)]
impl DecisionProvider for Scripted {
  fn select_one(&self, prompt: &str, _items: &[String]) -> ReleaseResult<Option<usize>> {
    match self.next(prompt) {
      Answer::Pick(idx) => Ok(idx),
      other => panic!("expected Pick for '{}', got {:?}", prompt, other),
    }
  }

  fn select_many(&self, prompt: &str, _items: &[String]) -> ReleaseResult<Vec<usize>> {
    match self.next(prompt) {
      Answer::PickMany(picks) => Ok(picks),
      other => panic!("expected PickMany for '{}', got {:?}", prompt, other),
    }
  }

  fn confirm(&self, prompt: &str) -> ReleaseResult<bool> {
    match self.next(prompt) {
      Answer::Yes(answer) => Ok(answer),
      other => panic!("expected Yes for '{}', got {:?}", prompt, other),
    }
  }

  fn input(&self, prompt: &str, _initial: &str) -> ReleaseResult<String> {
    match self.next(prompt) {
      Answer::Text(text) => Ok(text),
      other => panic!("expected Text for '{}', got {:?}", prompt, other),
    }
  }
}
