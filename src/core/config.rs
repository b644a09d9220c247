//! Configuration resolution for mono-release
//!
//! Configuration comes from `mono-release.toml` in the working directory (or
//! an explicit `--config` path), with inline CLI options layered on top. The
//! resolved [`ReleaseConfig`] is the immutable request one orchestration run
//! works from.

use crate::core::error::{ReleaseResult, ResultExt};
use crate::core::hooks::{Hook, HookSpec};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "mono-release.toml";

/// A base package and the dependent packages releasable after it
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RelationshipEntry {
  pub base: String,
  pub pkgs: Vec<String>,
}

/// Raw file configuration, every field optional
#[derive(Debug, Clone, Default, Deserialize)]
struct FileConfig {
  packages_path: Option<PathBuf>,
  branch: Option<String>,
  include: Option<Vec<String>>,
  exclude: Option<Vec<String>>,
  changelog: Option<bool>,
  push: Option<bool>,
  commit_check: Option<bool>,
  package_manager: Option<String>,
  before_release: Option<Vec<HookSpec>>,
  before_publish: Option<Vec<HookSpec>>,
  relationships: Option<Vec<RelationshipEntry>>,
  disable_relationship: Option<bool>,
  commit_message_placeholder: Option<String>,
  version_type: Option<String>,
  ci_msg_suffix: Option<String>,
}

/// Options supplied on the command line, layered over the file config
#[derive(Debug, Clone, Default)]
pub struct InlineOptions {
  pub config_file: Option<PathBuf>,
  pub package: Option<String>,
  pub include: Vec<String>,
  pub exclude: Vec<String>,
  pub changelog: Option<bool>,
  pub dry: bool,
  pub disable_push: bool,
  pub commit_check: Option<bool>,
  pub branch: Option<String>,
  pub disable_relationship: bool,
  pub commit_message_placeholder: Option<String>,
  pub ci: bool,
  pub ci_msg_suffix: Option<String>,
  pub version_type: Option<String>,
}

/// Fully resolved request for one orchestration run
#[derive(Debug, Clone)]
pub struct ReleaseConfig {
  pub cwd: PathBuf,
  pub packages_path: PathBuf,
  /// Explicit package pick, bypasses selection and both name filters
  pub package: Option<String>,
  pub include: Vec<String>,
  pub exclude: Vec<String>,
  pub changelog: bool,
  pub dry_run: bool,
  pub push: bool,
  pub branch: Option<String>,
  pub commit_check: bool,
  pub package_manager: String,
  pub before_release: Vec<Hook>,
  pub before_publish: Vec<Hook>,
  pub relationships: Vec<RelationshipEntry>,
  pub disable_relationship: bool,
  pub commit_message_placeholder: String,
  pub ci: bool,
  pub ci_msg_suffix: Option<String>,
  pub version_type: Option<String>,
}

impl ReleaseConfig {
  /// Derive the request for a cascaded dependent release: same
  /// configuration, explicit package, further cascading disabled.
  pub fn for_dependent(&self, package: &str) -> Self {
    let mut derived = self.clone();
    derived.package = Some(package.to_string());
    derived.disable_relationship = true;
    derived
  }
}

/// Resolve the effective configuration for `cwd`.
pub fn resolve_config(inline: InlineOptions, cwd: &Path) -> ReleaseResult<ReleaseConfig> {
  let file = load_file_config(&inline, cwd)?;

  let packages_path = match file.packages_path {
    Some(ref p) if p.is_absolute() => p.clone(),
    Some(ref p) => cwd.join(p),
    None => cwd.join("packages"),
  };

  let include = if !inline.include.is_empty() {
    inline.include
  } else {
    file.include.unwrap_or_default()
  };
  let exclude = if !inline.exclude.is_empty() {
    inline.exclude
  } else {
    file.exclude.unwrap_or_default()
  };

  Ok(ReleaseConfig {
    cwd: cwd.to_path_buf(),
    packages_path,
    package: inline.package,
    include,
    exclude,
    changelog: inline.changelog.or(file.changelog).unwrap_or(false),
    dry_run: inline.dry,
    push: if inline.disable_push { false } else { file.push.unwrap_or(true) },
    branch: inline.branch.or(file.branch),
    commit_check: inline.commit_check.or(file.commit_check).unwrap_or(true),
    package_manager: file.package_manager.unwrap_or_else(|| "cargo".to_string()),
    before_release: file.before_release.unwrap_or_default().into_iter().map(Hook::from).collect(),
    before_publish: file.before_publish.unwrap_or_default().into_iter().map(Hook::from).collect(),
    relationships: file.relationships.unwrap_or_default(),
    disable_relationship: inline.disable_relationship || file.disable_relationship.unwrap_or(false),
    commit_message_placeholder: inline
      .commit_message_placeholder
      .or(file.commit_message_placeholder)
      .unwrap_or_default(),
    ci: inline.ci,
    ci_msg_suffix: inline.ci_msg_suffix.or(file.ci_msg_suffix),
    version_type: inline.version_type.or(file.version_type),
  })
}

fn load_file_config(inline: &InlineOptions, cwd: &Path) -> ReleaseResult<FileConfig> {
  let path = match &inline.config_file {
    Some(p) if p.is_absolute() => Some(p.clone()),
    Some(p) => Some(cwd.join(p)),
    None => {
      let default = cwd.join(CONFIG_FILE);
      default.exists().then_some(default)
    }
  };

  match path {
    Some(path) => {
      let content = fs::read_to_string(&path).with_context(|| format!("Failed to read config from {}", path.display()))?;
      let config: FileConfig =
        toml_edit::de::from_str(&content).with_context(|| format!("Failed to parse config from {}", path.display()))?;
      Ok(config)
    }
    None => Ok(FileConfig::default()),
  }
}
