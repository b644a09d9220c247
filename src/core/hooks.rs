//! Pre-release and pre-publish hooks
//!
//! A hook is a shell command line, an in-process callback, or a structured
//! command record that can be scoped to one package and skipped in dry-run.
//! Config files can declare the two command forms; callbacks only exist when
//! the core is driven programmatically.

use crate::core::error::{HookError, ReleaseError, ReleaseResult};
use crate::core::runner::CommandRunner;
use semver::Version;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// In-process hook: receives the package name and the target version.
pub type HookFn = Arc<dyn Fn(&str, &Version) -> ReleaseResult<()> + Send + Sync>;

/// One hook, dispatched explicitly by variant
#[derive(Clone)]
pub enum Hook {
  /// Shell command line, run in the default working directory
  Shell(String),

  /// In-process callback
  Callback(HookFn),

  /// Structured command, optionally scoped to one package
  Scoped {
    command: String,
    cwd: Option<PathBuf>,
    package: Option<String>,
    skip_in_dry: bool,
  },
}

impl fmt::Debug for Hook {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Hook::Shell(cmd) => f.debug_tuple("Shell").field(cmd).finish(),
      Hook::Callback(_) => f.write_str("Callback(..)"),
      Hook::Scoped {
        command,
        cwd,
        package,
        skip_in_dry,
      } => f
        .debug_struct("Scoped")
        .field("command", command)
        .field("cwd", cwd)
        .field("package", package)
        .field("skip_in_dry", skip_in_dry)
        .finish(),
    }
  }
}

/// Declarative hook form accepted in mono-release.toml
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HookSpec {
  Shell(String),
  Scoped {
    command: String,
    #[serde(default)]
    cwd: Option<PathBuf>,
    #[serde(default)]
    package: Option<String>,
    #[serde(default)]
    skip_in_dry: bool,
  },
}

impl From<HookSpec> for Hook {
  fn from(spec: HookSpec) -> Self {
    match spec {
      HookSpec::Shell(command) => Hook::Shell(command),
      HookSpec::Scoped {
        command,
        cwd,
        package,
        skip_in_dry,
      } => Hook::Scoped {
        command,
        cwd,
        package,
        skip_in_dry,
      },
    }
  }
}

/// Run `hooks` in declared order for `package_name` at `version`.
///
/// Scoped hooks bound to a different package are skipped; hooks marked
/// `skip_in_dry` are skipped when dry-run is active. The first failure
/// aborts the sequence.
pub fn run_hooks(
  hooks: &[Hook],
  package_name: &str,
  version: &Version,
  default_cwd: &Path,
  runner: &CommandRunner,
) -> ReleaseResult<()> {
  for hook in hooks {
    match hook {
      Hook::Shell(command) => {
        let output = runner
          .run_shell(command, default_cwd)
          .map_err(hook_error(package_name, command))?;
        if !output.stdout.trim().is_empty() {
          println!("{}", output.stdout.trim_end());
        }
      }
      Hook::Callback(callback) => {
        callback(package_name, version)?;
      }
      Hook::Scoped {
        command,
        cwd,
        package,
        skip_in_dry,
      } => {
        if package.as_deref().is_some_and(|p| p != package_name) {
          continue;
        }
        if *skip_in_dry && runner.is_dry() {
          continue;
        }

        let cwd = cwd.as_deref().unwrap_or(default_cwd);
        let output = runner.run_shell(command, cwd).map_err(hook_error(package_name, command))?;
        if !output.stdout.trim().is_empty() {
          println!("{}", output.stdout.trim_end());
        }
      }
    }
  }

  Ok(())
}

fn hook_error<'a>(package: &'a str, command: &'a str) -> impl FnOnce(ReleaseError) -> ReleaseError + 'a {
  move |err| match err {
    ReleaseError::Command { stderr, .. } => ReleaseError::Hook(HookError::Failed {
      package: package.to_string(),
      command: command.to_string(),
      stderr,
    }),
    other => other,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::atomic::{AtomicBool, Ordering};
  use tempfile::TempDir;

  fn v(s: &str) -> Version {
    s.parse().unwrap()
  }

  #[test]
  fn test_scoped_hook_for_other_package_is_skipped() {
    let dir = TempDir::new().unwrap();
    let runner = CommandRunner::new(false);
    let hooks = vec![Hook::Scoped {
      command: "exit 1".to_string(),
      cwd: None,
      package: Some("other".to_string()),
      skip_in_dry: false,
    }];

    run_hooks(&hooks, "mine", &v("1.0.0"), dir.path(), &runner).unwrap();
  }

  #[test]
  fn test_skip_in_dry_is_honored() {
    let dir = TempDir::new().unwrap();
    let runner = CommandRunner::new(true);
    let hooks = vec![Hook::Scoped {
      command: "exit 1".to_string(),
      cwd: None,
      package: None,
      skip_in_dry: true,
    }];

    run_hooks(&hooks, "mine", &v("1.0.0"), dir.path(), &runner).unwrap();
  }

  #[test]
  fn test_failing_shell_hook_maps_to_hook_error() {
    let dir = TempDir::new().unwrap();
    let runner = CommandRunner::new(false);
    let hooks = vec![Hook::Shell("echo oops >&2; exit 3".to_string())];

    let err = run_hooks(&hooks, "mine", &v("1.0.0"), dir.path(), &runner).unwrap_err();
    assert!(matches!(err, ReleaseError::Hook(HookError::Failed { .. })));
  }

  #[test]
  fn test_callback_receives_package_and_version() {
    let dir = TempDir::new().unwrap();
    let runner = CommandRunner::new(false);
    static CALLED: AtomicBool = AtomicBool::new(false);

    let hooks = vec![Hook::Callback(Arc::new(|name, version| {
      assert_eq!(name, "mine");
      assert_eq!(version, &"2.0.0".parse::<Version>().unwrap());
      CALLED.store(true, Ordering::SeqCst);
      Ok(())
    }))];

    run_hooks(&hooks, "mine", &v("2.0.0"), dir.path(), &runner).unwrap();
    assert!(CALLED.load(Ordering::SeqCst));
  }

  #[test]
  fn test_hook_spec_deserializes_both_forms() {
    #[derive(Deserialize)]
    struct Wrapper {
      before_release: Vec<HookSpec>,
    }

    let toml = r#"
before_release = [
  "cargo fmt --check",
  { command = "cargo test", package = "foo", skip_in_dry = true },
]
"#;
    let wrapper: Wrapper = toml_edit::de::from_str(toml).unwrap();
    assert_eq!(wrapper.before_release.len(), 2);
    assert!(matches!(wrapper.before_release[0], HookSpec::Shell(_)));
    assert!(matches!(
      wrapper.before_release[1],
      HookSpec::Scoped { skip_in_dry: true, .. }
    ));
  }
}
