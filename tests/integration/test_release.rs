//! Integration tests for `mono-release release`

use crate::helpers::{run_mono_release, run_mono_release_raw, TestWorkspace};
use anyhow::Result;

#[test]
fn test_ci_release_bumps_commits_tags_and_pushes() -> Result<()> {
  let ws = TestWorkspace::new()?.with_remote()?;
  ws.add_package("foo", "1.0.0")?;
  ws.commit("feat: add foo")?;
  crate::helpers::git(&ws.path, &["push", "origin", "main"])?;

  run_mono_release(&ws.path, &["release", "--ci", "--package", "foo"])?;

  // Patch bump written to the manifest
  assert!(ws.manifest("foo")?.contains("version = \"1.0.1\""));

  // Release commit and tag, both pushed
  let log = ws.git_log(1)?;
  assert!(log[0].contains("release: foo@1.0.1"), "got log: {:?}", log);
  assert_eq!(ws.tags()?, vec!["foo@1.0.1"]);
  assert_eq!(ws.remote_tags()?, vec!["foo@1.0.1"]);

  Ok(())
}

#[test]
fn test_uncommitted_changes_abort_the_release() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_package("foo", "1.0.0")?;
  ws.commit("feat: add foo")?;

  // Unstaged modification to a tracked file
  ws.modify_file("foo", "src/lib.rs", "pub fn changed() {}\n")?;
  let manifest_before = ws.manifest("foo")?;

  let output = run_mono_release_raw(&ws.path, &["release", "--ci", "--package", "foo"])?;
  assert!(!output.status.success(), "release should refuse a dirty tree");

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.to_lowercase().contains("uncommitted"), "got stderr: {}", stderr);

  // Nothing was mutated
  assert_eq!(ws.manifest("foo")?, manifest_before);
  assert!(ws.tags()?.is_empty());

  Ok(())
}

#[test]
fn test_ci_push_failure_rolls_everything_back() -> Result<()> {
  let ws = TestWorkspace::new()?.with_remote()?;
  ws.add_package("foo", "1.0.0")?;
  ws.commit("feat: add foo")?;
  ws.break_remote()?;

  let output = run_mono_release_raw(&ws.path, &["release", "--ci", "--package", "foo"])?;
  assert!(!output.status.success(), "release should fail when the push fails");

  // Rollback removed the tag and the commit and restored the manifest
  assert!(ws.tags()?.is_empty());
  assert!(ws.manifest("foo")?.contains("version = \"1.0.0\""));
  let log = ws.git_log(1)?;
  assert!(!log[0].contains("release:"), "release commit should be gone, got: {:?}", log);

  Ok(())
}

#[test]
fn test_dry_run_leaves_git_untouched_but_shows_the_diff() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_package("foo", "1.0.0")?;
  ws.commit("feat: add foo")?;

  run_mono_release(&ws.path, &["release", "--ci", "--package", "foo", "--dry", "--no-push"])?;

  // No commit or tag, but the manifest diff is left in place for inspection
  assert!(ws.tags()?.is_empty());
  assert!(ws.manifest("foo")?.contains("version = \"1.0.1\""));

  Ok(())
}

#[test]
fn test_branch_restriction_from_config_file() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_package("foo", "1.0.0")?;
  ws.write_config("branch = \"release\"\n")?;
  ws.commit("feat: add foo")?;

  // We are on main, the config demands release
  let output = run_mono_release_raw(&ws.path, &["release", "--ci", "--package", "foo"])?;
  assert!(!output.status.success());

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("release") && stderr.contains("main"), "got stderr: {}", stderr);
  assert!(ws.tags()?.is_empty());

  Ok(())
}

#[test]
fn test_version_type_selector_picks_a_prerelease() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_package("foo", "1.0.0")?;
  ws.commit("feat: add foo")?;

  run_mono_release(
    &ws.path,
    &[
      "release",
      "--ci",
      "--package",
      "foo",
      "--no-push",
      "--version-type",
      "beta-minor",
    ],
  )?;

  assert!(ws.manifest("foo")?.contains("version = \"1.1.0-beta.0\""));
  assert_eq!(ws.tags()?, vec!["foo@1.1.0-beta.0"]);

  Ok(())
}
