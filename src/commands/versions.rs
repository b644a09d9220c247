//! Versions command implementation
//!
//! Shows the next-version candidates for one package, in the same order the
//! release prompt offers them.

use crate::core::config::{resolve_config, InlineOptions};
use crate::core::error::ReleaseResult;
use crate::core::packages;
use crate::core::versions::version_choices;
use std::env;
use std::path::PathBuf;

/// Run the versions command
pub fn run_versions_cmd(package: &str, json: bool, config_file: Option<PathBuf>) -> ReleaseResult<()> {
  let cwd = env::current_dir()?;

  let inline = InlineOptions {
    config_file,
    ..Default::default()
  };
  let config = resolve_config(inline, &cwd)?;

  let info = packages::resolve(package, &config.packages_path)?;
  let choices = version_choices(&info.current_version);

  if json {
    println!("{}", serde_json::to_string_pretty(&choices)?);
  } else {
    println!("📦 {} is at {}", info.name, info.current_version);
    for choice in &choices {
      println!("  {}", choice.rendered());
    }
  }

  Ok(())
}
