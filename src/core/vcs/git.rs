//! Version control backend using system git
//!
//! All operations shell out to `git` through the dry-run-aware
//! [`CommandRunner`]: reads (diffs, branch, tag lookups, logs) always
//! execute, mutations (checkout, stage, commit, tag, reset, push) are
//! replaced by log lines when dry-run is active.

use crate::core::error::{GitError, PushTarget, ReleaseError, ReleaseResult};
use crate::core::runner::{CommandRunner, RunOutput};
use std::path::{Path, PathBuf};

/// Git backend bound to one repository working directory
#[derive(Debug, Clone)]
pub struct Git {
  root: PathBuf,
  runner: CommandRunner,
}

impl Git {
  pub fn new(root: &Path, runner: CommandRunner) -> Self {
    Self {
      root: root.to_path_buf(),
      runner,
    }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Run a read-only git command, always executing.
  fn read(&self, args: &[&str]) -> ReleaseResult<RunOutput> {
    let mut full = vec!["-c", "core.quotePath=false"];
    full.extend_from_slice(args);
    self.runner.run("git", &full, &self.root)
  }

  /// Run a mutating git command through the dry-run gate.
  fn write(&self, args: &[&str]) -> ReleaseResult<RunOutput> {
    self.runner.run_if_not_dry("git", args, &self.root)
  }

  /// True when the working tree has unstaged modifications.
  pub fn has_unstaged_diff(&self) -> ReleaseResult<bool> {
    Ok(!self.read(&["diff"])?.stdout.trim().is_empty())
  }

  /// True when the index has staged modifications.
  pub fn has_staged_diff(&self) -> ReleaseResult<bool> {
    Ok(!self.read(&["diff", "--cached"])?.stdout.trim().is_empty())
  }

  pub fn current_branch(&self) -> ReleaseResult<String> {
    let output = self.read(&["rev-parse", "--abbrev-ref", "HEAD"])?;
    Ok(output.stdout.trim().to_string())
  }

  /// Discard working-tree modifications to tracked files.
  pub fn checkout_tracked(&self) -> ReleaseResult<()> {
    self.write(&["checkout", "."])?;
    Ok(())
  }

  pub fn stage_all(&self) -> ReleaseResult<()> {
    self.write(&["add", "-A"])?;
    Ok(())
  }

  pub fn unstage_all(&self) -> ReleaseResult<()> {
    self.write(&["reset", "HEAD"])?;
    Ok(())
  }

  pub fn commit(&self, message: &str) -> ReleaseResult<()> {
    self.write(&["commit", "-m", message])?;
    Ok(())
  }

  /// Undo the most recent commit, keeping its changes staged.
  pub fn soft_reset_head(&self) -> ReleaseResult<()> {
    self.write(&["reset", "--soft", "HEAD^"])?;
    Ok(())
  }

  pub fn create_tag(&self, tag: &str) -> ReleaseResult<()> {
    self.write(&["tag", tag])?;
    Ok(())
  }

  pub fn delete_tag(&self, tag: &str) -> ReleaseResult<()> {
    self.write(&["tag", "-d", tag])?;
    Ok(())
  }

  /// Push the current branch to its upstream.
  pub fn push(&self) -> ReleaseResult<()> {
    self.write(&["push"]).map_err(push_error(PushTarget::Branch))?;
    Ok(())
  }

  /// Push a single tag ref to origin.
  pub fn push_tag(&self, tag: &str) -> ReleaseResult<()> {
    let tag_ref = format!("refs/tags/{}", tag);
    self
      .write(&["push", "origin", &tag_ref])
      .map_err(push_error(PushTarget::Tag))?;
    Ok(())
  }

  pub fn list_tags(&self) -> ReleaseResult<Vec<String>> {
    let output = self.read(&["tag"])?;
    Ok(output.stdout.lines().map(|l| l.trim().to_string()).filter(|l| !l.is_empty()).collect())
  }

  /// Resolve a tag to the commit it points at.
  pub fn rev_for_tag(&self, tag: &str) -> ReleaseResult<String> {
    let output = self.read(&["rev-list", "-n", "1", tag])?;
    Ok(output.stdout.trim().to_string())
  }

  /// Oneline log of commits after `sha` up to HEAD, scoped to `path`.
  pub fn log_commits_since(&self, sha: &str, path: &Path) -> ReleaseResult<String> {
    let range = format!("{}..HEAD", sha);
    let path = path.to_string_lossy();
    let output = self.read(&["--no-pager", "log", &range, "--oneline", "--", path.as_ref()])?;
    Ok(output.stdout)
  }

  /// Oneline form of the single most recent commit.
  pub fn last_commit(&self) -> ReleaseResult<String> {
    let output = self.read(&["--no-pager", "log", "--oneline", "-1"])?;
    Ok(output.stdout.trim().to_string())
  }
}

fn push_error(target: PushTarget) -> impl FnOnce(ReleaseError) -> ReleaseError {
  move |err| match err {
    ReleaseError::Command { stderr, .. } => ReleaseError::Git(GitError::PushFailed { target, stderr }),
    other => other,
  }
}
