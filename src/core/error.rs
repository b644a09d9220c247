//! Error types for mono-release with contextual messages and exit codes
//!
//! Every failure mode of the release workflow maps to a category here so the
//! CLI can exit with a meaningful code and print a suggestion where one
//! exists.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for mono-release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, missing packages)
  User = 1,
  /// System error (git, network, I/O, hooks)
  System = 2,
  /// Validation failure (preflight checks)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for mono-release
#[derive(Debug)]
pub enum ReleaseError {
  /// Preflight check failures
  Check(CheckError),

  /// Package resolution and manifest errors
  Package(PackageError),

  /// Version selection errors
  Version(VersionError),

  /// Git operation errors
  Git(GitError),

  /// Pre-release / pre-publish hook errors
  Hook(HookError),

  /// Publish-time errors
  Publish(PublishError),

  /// An external command exited non-zero
  Command { command: String, stderr: String },

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl ReleaseError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ReleaseError::Message { message, context, help } => ReleaseError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      other => ReleaseError::Message {
        message: other.to_string(),
        context: Some(ctx_str),
        help: other.help_message(),
      },
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ReleaseError::Check(_) => ExitCode::Validation,
      ReleaseError::Package(_) => ExitCode::User,
      ReleaseError::Version(_) => ExitCode::User,
      ReleaseError::Git(_) => ExitCode::System,
      ReleaseError::Hook(_) => ExitCode::System,
      ReleaseError::Publish(_) => ExitCode::User,
      ReleaseError::Command { .. } => ExitCode::System,
      ReleaseError::Io(_) => ExitCode::System,
      ReleaseError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ReleaseError::Check(e) => e.help_message(),
      ReleaseError::Package(e) => e.help_message(),
      ReleaseError::Git(e) => e.help_message(),
      ReleaseError::Publish(e) => e.help_message(),
      ReleaseError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for ReleaseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReleaseError::Check(e) => write!(f, "{}", e),
      ReleaseError::Package(e) => write!(f, "{}", e),
      ReleaseError::Version(e) => write!(f, "{}", e),
      ReleaseError::Git(e) => write!(f, "{}", e),
      ReleaseError::Hook(e) => write!(f, "{}", e),
      ReleaseError::Publish(e) => write!(f, "{}", e),
      ReleaseError::Command { command, stderr } => {
        write!(f, "Command failed: {}\n{}", command, stderr)
      }
      ReleaseError::Io(e) => write!(f, "I/O error: {}", e),
      ReleaseError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ReleaseError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ReleaseError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for ReleaseError {
  fn from(err: io::Error) -> Self {
    ReleaseError::Io(err)
  }
}

impl From<String> for ReleaseError {
  fn from(msg: String) -> Self {
    ReleaseError::message(msg)
  }
}

impl From<&str> for ReleaseError {
  fn from(msg: &str) -> Self {
    ReleaseError::message(msg)
  }
}

impl From<toml_edit::TomlError> for ReleaseError {
  fn from(err: toml_edit::TomlError) -> Self {
    ReleaseError::message(format!("TOML parse error: {}", err))
  }
}

impl From<toml_edit::de::Error> for ReleaseError {
  fn from(err: toml_edit::de::Error) -> Self {
    ReleaseError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<serde_json::Error> for ReleaseError {
  fn from(err: serde_json::Error) -> Self {
    ReleaseError::message(format!("JSON error: {}", err))
  }
}

impl From<std::string::FromUtf8Error> for ReleaseError {
  fn from(err: std::string::FromUtf8Error) -> Self {
    ReleaseError::message(format!("UTF-8 conversion error: {}", err))
  }
}

/// Convert anyhow::Error to ReleaseError (test helpers and prompt backends)
impl From<anyhow::Error> for ReleaseError {
  fn from(err: anyhow::Error) -> Self {
    ReleaseError::message(err.to_string())
  }
}

impl From<dialoguer::Error> for ReleaseError {
  fn from(err: dialoguer::Error) -> Self {
    ReleaseError::message(format!("Prompt error: {}", err))
  }
}

/// Preflight check errors
#[derive(Debug)]
pub enum CheckError {
  /// Working tree or index has uncommitted changes
  UncommittedChanges,

  /// Current branch does not match the configured branch
  WrongBranch { expected: String, actual: String },
}

impl CheckError {
  fn help_message(&self) -> Option<String> {
    match self {
      CheckError::UncommittedChanges => {
        Some("Commit or stash your changes first, or disable the check with commit_check = false.".to_string())
      }
      CheckError::WrongBranch { expected, .. } => Some(format!("Switch branches with `git checkout {}`.", expected)),
    }
  }
}

impl fmt::Display for CheckError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CheckError::UncommittedChanges => {
        write!(f, "You have uncommitted changes. Please commit them first.")
      }
      CheckError::WrongBranch { expected, actual } => {
        write!(f, "You are on branch '{}' but releases require branch '{}'", actual, expected)
      }
    }
  }
}

/// Package resolution and manifest errors
#[derive(Debug)]
pub enum PackageError {
  /// Packages root directory does not exist
  RootNotFound { path: PathBuf },

  /// No releasable packages under the root
  NoPackages { path: PathBuf },

  /// Named package not found under the root
  NotFound { name: String, path: PathBuf },

  /// Package is marked private (publish = false)
  Private { name: String },

  /// Manifest could not be read or parsed
  ManifestRead { path: PathBuf, reason: String },

  /// Manifest could not be written back
  ManifestWrite { path: PathBuf, reason: String },
}

impl PackageError {
  fn help_message(&self) -> Option<String> {
    match self {
      PackageError::RootNotFound { .. } => {
        Some("Set packages_path in mono-release.toml to your packages directory.".to_string())
      }
      PackageError::Private { name } => Some(format!(
        "Remove `publish = false` from the manifest of '{}' if it should be releasable.",
        name
      )),
      _ => None,
    }
  }
}

impl fmt::Display for PackageError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PackageError::RootNotFound { path } => {
        write!(f, "Packages dir {} not found", path.display())
      }
      PackageError::NoPackages { path } => {
        write!(f, "No packages found in {}", path.display())
      }
      PackageError::NotFound { name, path } => {
        write!(f, "Package \"{}\" is not found in {}", name, path.display())
      }
      PackageError::Private { name } => {
        write!(f, "Package {} is private", name)
      }
      PackageError::ManifestRead { path, reason } => {
        write!(f, "Failed to read manifest {}: {}", path.display(), reason)
      }
      PackageError::ManifestWrite { path, reason } => {
        write!(f, "Failed to write manifest {}: {}", path.display(), reason)
      }
    }
  }
}

/// Version selection errors
#[derive(Debug)]
pub enum VersionError {
  /// No target version could be determined
  NoTarget { package: String },

  /// Chosen version is not valid semver
  Invalid { package: String, version: String },
}

impl fmt::Display for VersionError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      VersionError::NoTarget { package } => write!(f, "[{}] No target version", package),
      VersionError::Invalid { package, version } => {
        write!(f, "[{}] Invalid target version: {}", package, version)
      }
    }
  }
}

/// What a failed push was pushing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushTarget {
  Branch,
  Tag,
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Push of the branch or a tag ref failed
  PushFailed { target: PushTarget, stderr: String },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::PushFailed { stderr, .. } => {
        if stderr.contains("non-fast-forward") {
          Some("The remote has commits you don't have. Pull first, then retry the release.".to_string())
        } else {
          None
        }
      }
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::PushFailed { target, stderr } => {
        let what = match target {
          PushTarget::Branch => "branch",
          PushTarget::Tag => "tag",
        };
        write!(f, "Failed to push {}: {}", what, stderr)
      }
    }
  }
}

/// Hook execution errors
#[derive(Debug)]
pub enum HookError {
  /// A configured hook command exited non-zero
  Failed {
    package: String,
    command: String,
    stderr: String,
  },
}

impl fmt::Display for HookError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      HookError::Failed { package, command, stderr } => {
        write!(f, "[{}] Hook \"{}\" failed:\n{}", package, command, stderr)
      }
    }
  }
}

/// Publish-time errors
#[derive(Debug)]
pub enum PublishError {
  /// Tag string was not <pkg>@<version>
  InvalidTag { tag: String },

  /// Tag version does not match the manifest's current version
  TagMismatch { tag_version: String, current_version: String },
}

impl PublishError {
  fn help_message(&self) -> Option<String> {
    match self {
      PublishError::InvalidTag { .. } => Some("Pass the tag as <pkg>@<version>, e.g. foo@1.2.3.".to_string()),
      PublishError::TagMismatch { .. } => {
        Some("Release the package first so the manifest version matches the tag.".to_string())
      }
    }
  }
}

impl fmt::Display for PublishError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PublishError::InvalidTag { tag } => {
        write!(f, "Invalid tag: {}, must be in format <pkg>@<version>", tag)
      }
      PublishError::TagMismatch {
        tag_version,
        current_version,
      } => {
        write!(
          f,
          "Package version from tag \"{}\" mismatches with current version \"{}\"",
          tag_version, current_version
        )
      }
    }
  }
}

/// Result type alias for mono-release
pub type ReleaseResult<T> = Result<T, ReleaseError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ReleaseError>,
{
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &ReleaseError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
