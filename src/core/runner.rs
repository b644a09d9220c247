//! External process execution with a dry-run mode
//!
//! Every side-effecting command in the release workflow goes through
//! [`CommandRunner::run_if_not_dry`], which logs the command line instead of
//! executing when dry-run is active. Read-only commands use [`CommandRunner::run`]
//! and always execute, so dry-run output reflects real repository state.

use crate::core::error::{ReleaseError, ReleaseResult, ResultExt};
use std::path::Path;
use std::process::Command;

/// Captured output of an executed (or skipped) command
#[derive(Debug, Default)]
pub struct RunOutput {
  pub stdout: String,
  pub stderr: String,
  /// False when the command was skipped by dry-run
  pub executed: bool,
}

/// Runs external processes, honoring dry-run
#[derive(Debug, Clone)]
pub struct CommandRunner {
  dry_run: bool,
}

impl CommandRunner {
  pub fn new(dry_run: bool) -> Self {
    if dry_run {
      println!("🔍 DRY RUN — state-mutating commands will be logged, not executed\n");
    }
    Self { dry_run }
  }

  pub fn is_dry(&self) -> bool {
    self.dry_run
  }

  /// Execute a command unconditionally and capture its output.
  ///
  /// Fails with the command line and stderr if the process exits non-zero.
  pub fn run(&self, program: &str, args: &[&str], cwd: &Path) -> ReleaseResult<RunOutput> {
    let output = Command::new(program)
      .args(args)
      .current_dir(cwd)
      .output()
      .with_context(|| format!("Failed to execute {}", program))?;

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    if !output.status.success() {
      return Err(ReleaseError::Command {
        command: format!("{} {}", program, args.join(" ")),
        stderr,
      });
    }

    Ok(RunOutput {
      stdout,
      stderr,
      executed: true,
    })
  }

  /// Execute a command, or log it when dry-run is active.
  pub fn run_if_not_dry(&self, program: &str, args: &[&str], cwd: &Path) -> ReleaseResult<RunOutput> {
    if self.dry_run {
      println!("[dry-run] {} {}", program, args.join(" "));
      return Ok(RunOutput::default());
    }

    self.run(program, args, cwd)
  }

  /// Run a shell command line through `sh -c`, streaming nothing back but
  /// surfacing stderr on failure. Used for user-supplied hooks.
  pub fn run_shell(&self, command: &str, cwd: &Path) -> ReleaseResult<RunOutput> {
    self.run("sh", &["-c", command], cwd)
  }
}
