//! Compensating-action stack for undoing partially-applied releases
//!
//! Each irreversible local step of a release pushes an undo action right
//! after it succeeds. On failure the stack unwinds in LIFO order, so the tag
//! is deleted before the commit is reset before the staged files are
//! unstaged before the working tree is restored.

use crate::core::error::ReleaseResult;

/// A zero-argument effectful undo operation
pub type CompensatingAction = Box<dyn FnOnce() -> ReleaseResult<()>>;

/// Ordered list of compensating actions, unwound most-recent-first
#[derive(Default)]
pub struct RollbackStack {
  actions: Vec<CompensatingAction>,
}

impl RollbackStack {
  pub fn new() -> Self {
    Self::default()
  }

  /// Push an undo action. Most-recently-added runs first on rollback.
  pub fn add<F>(&mut self, action: F)
  where
    F: FnOnce() -> ReleaseResult<()> + 'static,
  {
    self.actions.push(Box::new(action));
  }

  pub fn is_empty(&self) -> bool {
    self.actions.is_empty()
  }

  /// Unwind the stack: run every stored action once, LIFO, strictly in
  /// sequence. The stack is spent afterwards — a second call is a no-op.
  ///
  /// A failing action is reported and unwinding continues, so no more
  /// partially-applied state than necessary is left behind.
  pub fn rollback(&mut self) {
    if self.actions.is_empty() {
      return;
    }

    println!("⏪ Rolling back...");
    for action in self.actions.drain(..).rev() {
      if let Err(err) = action() {
        eprintln!("⚠️  Rollback step failed (continuing): {}", err);
      }
    }
  }
}
