//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A monorepo under test: git history plus a `packages/` directory
pub struct TestWorkspace {
  _root: TempDir,
  // Bare remote lives outside the working tree so `git add -A` never sees it
  _remote: Option<TempDir>,
  pub path: PathBuf,
}

impl TestWorkspace {
  /// Create a new monorepo with one initial commit on `main`
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();

    git(&path, &["init", "--initial-branch=main"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;

    std::fs::create_dir_all(path.join("packages"))?;
    std::fs::write(path.join("README.md"), "# test monorepo\n")?;
    git(&path, &["add", "."])?;
    git(&path, &["commit", "-m", "Initial workspace setup"])?;

    Ok(Self {
      _root: root,
      _remote: None,
      path,
    })
  }

  /// Wire up a bare remote as `origin` and push `main` to it
  pub fn with_remote(mut self) -> Result<Self> {
    let remote = TempDir::new()?;
    git(remote.path(), &["init", "--bare", "--initial-branch=main"])?;

    let url = remote.path().to_string_lossy().to_string();
    git(&self.path, &["remote", "add", "origin", &url])?;
    git(&self.path, &["push", "-u", "origin", "main"])?;

    self._remote = Some(remote);
    Ok(self)
  }

  /// Point `origin` at a path where no repository exists, so pushes fail
  pub fn break_remote(&self) -> Result<()> {
    git(&self.path, &["remote", "set-url", "origin", "/nonexistent/remote.git"])?;
    Ok(())
  }

  /// Add a package under `packages/` with the given manifest version
  pub fn add_package(&self, name: &str, version: &str) -> Result<PathBuf> {
    let pkg_path = self.path.join("packages").join(name);
    std::fs::create_dir_all(pkg_path.join("src"))?;

    std::fs::write(
      pkg_path.join("Cargo.toml"),
      format!(
        r#"[package]
name = "{}"
version = "{}"
edition = "2021"
"#,
        name, version
      ),
    )?;
    std::fs::write(pkg_path.join("src/lib.rs"), "pub fn placeholder() {}\n")?;

    Ok(pkg_path)
  }

  /// Write the mono-release.toml config file
  pub fn write_config(&self, content: &str) -> Result<()> {
    std::fs::write(self.path.join("mono-release.toml"), content)?;
    Ok(())
  }

  /// Commit current changes and return the commit SHA
  pub fn commit(&self, message: &str) -> Result<String> {
    git(&self.path, &["add", "."])?;
    git(&self.path, &["commit", "-m", message])?;

    let output = git(&self.path, &["rev-parse", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Modify a file inside a package without committing
  pub fn modify_file(&self, package: &str, file: &str, content: &str) -> Result<()> {
    let file_path = self.path.join("packages").join(package).join(file);
    std::fs::write(file_path, content)?;
    Ok(())
  }

  /// Read a package's manifest
  pub fn manifest(&self, package: &str) -> Result<String> {
    let path = self.path.join("packages").join(package).join("Cargo.toml");
    Ok(std::fs::read_to_string(path)?)
  }

  /// List local tags
  pub fn tags(&self) -> Result<Vec<String>> {
    let output = git(&self.path, &["tag"])?;
    Ok(
      String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(String::from)
        .collect(),
    )
  }

  /// List tags on the bare remote
  pub fn remote_tags(&self) -> Result<Vec<String>> {
    let remote = self._remote.as_ref().expect("workspace has no remote");
    let output = git(remote.path(), &["tag"])?;
    Ok(
      String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(String::from)
        .collect(),
    )
  }

  /// Get git log
  pub fn git_log(&self, n: usize) -> Result<Vec<String>> {
    let output = git(&self.path, &["log", &format!("-{}", n), "--oneline"])?;
    Ok(
      String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(String::from)
        .collect(),
    )
  }
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run the mono-release CLI, failing the test on a non-zero exit
pub fn run_mono_release(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_mono_release_raw(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "mono-release command failed: mono-release {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

/// Run the mono-release CLI, returning the output whatever the exit status
pub fn run_mono_release_raw(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_mono-release");

  Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run mono-release")
}
