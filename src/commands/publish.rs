//! Publish command implementation

use crate::core::config::{resolve_config, InlineOptions};
use crate::core::error::ReleaseResult;
use crate::core::publish::run_publish;
use std::env;
use std::path::PathBuf;

/// Run the publish command for a `<pkg>@<version>` release tag.
pub fn run_publish_cmd(tag: &str, config_file: Option<PathBuf>, dry: bool) -> ReleaseResult<()> {
  let cwd = env::current_dir()?;

  let inline = InlineOptions {
    config_file,
    dry,
    ..Default::default()
  };
  let config = resolve_config(inline, &cwd)?;

  run_publish(tag, &config)
}
