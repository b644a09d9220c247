//! Release command implementation
//!
//! Thin CLI layer: turns flags into the resolved release request and hands it
//! to the orchestrator with the right decision provider.

use crate::core::config::{resolve_config, InlineOptions};
use crate::core::error::ReleaseResult;
use crate::core::prompt::{Automated, Interactive};
use crate::core::release::run_release;
use clap::Args;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ReleaseArgs {
  /// Package to release (skips selection, bypasses include/exclude)
  #[arg(short, long)]
  pub package: Option<String>,

  /// Generate a changelog for the package with git-cliff
  #[arg(long)]
  pub changelog: bool,

  /// Only offer these packages for selection (comma-separated)
  #[arg(long, value_delimiter = ',')]
  pub include: Vec<String>,

  /// Hide these packages from selection (comma-separated)
  #[arg(long, value_delimiter = ',')]
  pub exclude: Vec<String>,

  /// Do not push the release commit and tag to the remote
  #[arg(long)]
  pub no_push: bool,

  /// Skip the uncommitted-changes check
  #[arg(long)]
  pub no_commit_check: bool,

  /// Only allow releases from this branch
  #[arg(long)]
  pub branch: Option<String>,

  /// Do not cascade into dependent packages
  #[arg(long)]
  pub no_relationship: bool,

  /// Pre-filled commit message
  #[arg(long)]
  pub message_placeholder: Option<String>,

  /// Run non-interactively (requires --package)
  #[arg(long)]
  pub ci: bool,

  /// Extra suffix appended to the CI commit message
  #[arg(long)]
  pub ci_msg_suffix: Option<String>,

  /// Version selector (e.g. next, minor, major, beta-minor), skips the
  /// version prompt
  #[arg(long)]
  pub version_type: Option<String>,
}

/// Run the release command
pub fn run_release_cmd(args: ReleaseArgs, config_file: Option<PathBuf>, dry: bool) -> ReleaseResult<()> {
  let cwd = env::current_dir()?;

  let inline = InlineOptions {
    config_file,
    package: args.package,
    include: args.include,
    exclude: args.exclude,
    changelog: args.changelog.then_some(true),
    dry,
    disable_push: args.no_push,
    commit_check: args.no_commit_check.then_some(false),
    branch: args.branch,
    disable_relationship: args.no_relationship,
    commit_message_placeholder: args.message_placeholder,
    ci: args.ci,
    ci_msg_suffix: args.ci_msg_suffix,
    version_type: args.version_type,
  };

  let config = resolve_config(inline, &cwd)?;
  if config.ci {
    run_release(&config, &Automated)
  } else {
    run_release(&config, &Interactive)
  }
}
