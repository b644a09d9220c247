//! Integration tests for `mono-release versions`

use crate::helpers::{run_mono_release, run_mono_release_raw, TestWorkspace};
use anyhow::Result;

#[test]
fn test_versions_lists_candidates_for_a_stable_version() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_package("foo", "1.0.0")?;
  ws.commit("feat: add foo")?;

  let output = run_mono_release(&ws.path, &["versions", "foo"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("next (1.0.1)"), "got stdout: {}", stdout);
  assert!(stdout.contains("beta-minor (1.1.0-beta.0)"));
  assert!(stdout.contains("major (2.0.0)"));
  assert!(stdout.contains("custom"));

  Ok(())
}

#[test]
fn test_versions_json_output() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_package("foo", "1.2.3")?;
  ws.commit("feat: add foo")?;

  let output = run_mono_release(&ws.path, &["versions", "foo", "--json"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  let choices: serde_json::Value = serde_json::from_str(&stdout)?;
  let choices = choices.as_array().expect("output should be a JSON array");

  assert_eq!(choices[0]["label"], "next");
  assert_eq!(choices[0]["version"], "1.2.4");
  // The custom entry carries no concrete version
  assert!(choices.last().unwrap()["version"].is_null());

  Ok(())
}

#[test]
fn test_versions_fails_for_an_unknown_package() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_package("foo", "1.0.0")?;
  ws.commit("feat: add foo")?;

  let output = run_mono_release_raw(&ws.path, &["versions", "ghost"])?;
  assert!(!output.status.success());

  Ok(())
}
