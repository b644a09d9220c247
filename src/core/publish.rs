//! Publish a released package to the registry
//!
//! Driven by a release tag (`<pkg>@<version>`): the manifest's current
//! version must match the tag before the package manager's publish command
//! runs. Publishing mutates no local state, so there is no rollback stack
//! here.

use crate::core::config::ReleaseConfig;
use crate::core::error::{CheckError, PublishError, ReleaseError, ReleaseResult};
use crate::core::hooks;
use crate::core::packages;
use crate::core::runner::CommandRunner;
use crate::core::vcs::Git;
use semver::Version;

/// Publish the package identified by `tag`.
pub fn run_publish(tag: &str, config: &ReleaseConfig) -> ReleaseResult<()> {
  let (pkg_name, version) = parse_tag(tag)?;

  let runner = CommandRunner::new(config.dry_run);
  let git = Git::new(&config.cwd, runner.clone());

  if let Some(branch) = &config.branch {
    let current = git.current_branch()?;
    if &current != branch {
      return Err(ReleaseError::Check(CheckError::WrongBranch {
        expected: branch.clone(),
        actual: current,
      }));
    }
  }

  let info = packages::resolve(&pkg_name, &config.packages_path)?;
  if info.current_version != version {
    return Err(ReleaseError::Publish(PublishError::TagMismatch {
      tag_version: version.to_string(),
      current_version: info.current_version.to_string(),
    }));
  }

  if !config.before_publish.is_empty() {
    println!("🪝 [{}] Running before-publish hooks...", info.name);
    hooks::run_hooks(&config.before_publish, &info.name, &version, &info.dir, &runner)?;
  }

  println!("🚀 [{}] Publishing package...", info.name);
  runner.run_if_not_dry(&config.package_manager, &["publish"], &info.dir)?;

  Ok(())
}

/// Parse `<pkg>@<version>`, tolerating a leading `v` on the version part.
fn parse_tag(tag: &str) -> ReleaseResult<(String, Version)> {
  let invalid = || {
    ReleaseError::Publish(PublishError::InvalidTag {
      tag: tag.to_string(),
    })
  };

  let (name, version_str) = tag.split_once('@').ok_or_else(invalid)?;
  if name.is_empty() {
    return Err(invalid());
  }

  let version_str = version_str.strip_prefix('v').unwrap_or(version_str);
  let version: Version = version_str.parse().map_err(|_| invalid())?;

  Ok((name.to_string(), version))
}
