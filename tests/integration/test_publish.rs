//! Integration tests for `mono-release publish`

use crate::helpers::{run_mono_release, run_mono_release_raw, TestWorkspace};
use anyhow::Result;

#[test]
fn test_publish_refuses_a_tag_behind_the_manifest() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_package("pkg", "1.9.9")?;
  ws.commit("feat: add pkg")?;

  let output = run_mono_release_raw(&ws.path, &["publish", "pkg@2.0.0"])?;
  assert!(!output.status.success(), "publish should refuse a mismatched tag");

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(
    stderr.contains("2.0.0") && stderr.contains("1.9.9"),
    "got stderr: {}",
    stderr
  );

  Ok(())
}

#[test]
fn test_publish_rejects_a_malformed_tag() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_package("pkg", "1.0.0")?;
  ws.commit("feat: add pkg")?;

  let output = run_mono_release_raw(&ws.path, &["publish", "not-a-release-tag"])?;
  assert!(!output.status.success());

  Ok(())
}

#[test]
fn test_publish_fails_for_an_unknown_package() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_package("pkg", "1.0.0")?;
  ws.commit("feat: add pkg")?;

  let output = run_mono_release_raw(&ws.path, &["publish", "ghost@1.0.0"])?;
  assert!(!output.status.success());

  Ok(())
}

#[test]
fn test_dry_publish_succeeds_on_a_matching_tag() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_package("pkg", "2.0.0")?;
  ws.commit("feat: add pkg")?;

  // Dry run gates the actual publish command, so this passes without a
  // registry.
  let output = run_mono_release(&ws.path, &["publish", "pkg@2.0.0", "--dry"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("[dry-run]"), "got stdout: {}", stdout);

  Ok(())
}
