//! Package resolver and manifest store
//!
//! Packages are immediate subdirectories of the configured packages root,
//! each carrying a `Cargo.toml` manifest. The version field is rewritten in
//! place with toml_edit so every other byte of the manifest survives a
//! release untouched.

use crate::core::error::{PackageError, ReleaseError, ReleaseResult};
use semver::Version;
use std::fs;
use std::path::{Path, PathBuf};
use toml_edit::{value, DocumentMut};

/// Resolved metadata for one releasable package
#[derive(Debug, Clone)]
pub struct PackageInfo {
  pub name: String,
  pub dir: PathBuf,
  pub manifest_path: PathBuf,
  pub current_version: Version,
}

/// List the candidate package names under `root`, excluding `exclude`.
pub fn list_packages(root: &Path, exclude: &[String]) -> ReleaseResult<Vec<String>> {
  if !root.exists() {
    return Err(ReleaseError::Package(PackageError::RootNotFound {
      path: root.to_path_buf(),
    }));
  }

  let mut packages: Vec<String> = fs::read_dir(root)?
    .filter_map(|entry| entry.ok())
    .filter(|entry| entry.path().is_dir())
    .map(|entry| entry.file_name().to_string_lossy().to_string())
    .filter(|name| !exclude.contains(name))
    .collect();
  packages.sort();

  if packages.is_empty() {
    return Err(ReleaseError::Package(PackageError::NoPackages {
      path: root.to_path_buf(),
    }));
  }

  Ok(packages)
}

/// Resolve a package by name, reading its manifest.
///
/// Fails with NotFound if the directory or manifest is missing, Private if
/// the manifest opts out of publishing, ManifestRead on parse trouble.
pub fn resolve(name: &str, root: &Path) -> ReleaseResult<PackageInfo> {
  let dir = root.join(name);
  if !dir.is_dir() {
    return Err(ReleaseError::Package(PackageError::NotFound {
      name: name.to_string(),
      path: root.to_path_buf(),
    }));
  }

  let manifest_path = dir.join("Cargo.toml");
  let doc = read_manifest(&manifest_path)?;

  let package = doc.get("package").and_then(|p| p.as_table_like()).ok_or_else(|| {
    ReleaseError::Package(PackageError::ManifestRead {
      path: manifest_path.clone(),
      reason: "missing [package] table".to_string(),
    })
  })?;

  if package.get("publish").and_then(|p| p.as_bool()) == Some(false) {
    return Err(ReleaseError::Package(PackageError::Private {
      name: name.to_string(),
    }));
  }

  let version_str = package.get("version").and_then(|v| v.as_str()).ok_or_else(|| {
    ReleaseError::Package(PackageError::ManifestRead {
      path: manifest_path.clone(),
      reason: "missing package.version".to_string(),
    })
  })?;

  let current_version: Version = version_str.parse().map_err(|e| {
    ReleaseError::Package(PackageError::ManifestRead {
      path: manifest_path.clone(),
      reason: format!("invalid package.version '{}': {}", version_str, e),
    })
  })?;

  let manifest_name = package
    .get("name")
    .and_then(|n| n.as_str())
    .unwrap_or(name)
    .to_string();

  Ok(PackageInfo {
    name: manifest_name,
    dir,
    manifest_path,
    current_version,
  })
}

/// Overwrite the manifest's version field in place, preserving all other
/// structure and formatting.
pub fn write_version(manifest_path: &Path, version: &Version) -> ReleaseResult<()> {
  let mut doc = read_manifest(manifest_path)?;
  doc["package"]["version"] = value(version.to_string());

  fs::write(manifest_path, doc.to_string()).map_err(|e| {
    ReleaseError::Package(PackageError::ManifestWrite {
      path: manifest_path.to_path_buf(),
      reason: e.to_string(),
    })
  })
}

fn read_manifest(manifest_path: &Path) -> ReleaseResult<DocumentMut> {
  let content = fs::read_to_string(manifest_path).map_err(|e| {
    ReleaseError::Package(PackageError::ManifestRead {
      path: manifest_path.to_path_buf(),
      reason: e.to_string(),
    })
  })?;

  content.parse::<DocumentMut>().map_err(|e| {
    ReleaseError::Package(PackageError::ManifestRead {
      path: manifest_path.to_path_buf(),
      reason: e.to_string(),
    })
  })
}
