//! Version advisor: candidate next versions for a package
//!
//! Given the current semver version, enumerates the valid forward bumps with
//! human labels, mirroring the release flow: stable versions can enter
//! prerelease (alpha/beta), alpha can graduate to beta, beta can graduate to
//! stable, and there is always a free-form `custom` escape hatch.

use semver::{Prerelease, Version};
use serde::Serialize;

/// One next-version candidate. `version` is `None` for the `custom` sentinel.
#[derive(Debug, Clone, Serialize)]
pub struct VersionChoice {
  pub label: String,
  pub version: Option<Version>,
}

impl VersionChoice {
  fn new(label: &str, version: Version) -> Self {
    Self {
      label: label.to_string(),
      version: Some(version),
    }
  }

  /// Label rendered together with its resolved version, e.g. `next (1.2.4)`
  pub fn rendered(&self) -> String {
    match &self.version {
      Some(v) => format!("{} ({})", self.label, v),
      None => self.label.clone(),
    }
  }
}

/// Bump to the next patch release: a prerelease version graduates to its
/// own core triple (`1.0.0-beta.0` → `1.0.0`), a stable version increments
/// the patch number.
pub fn patch_release(current: &Version) -> Version {
  let mut next = Version::new(current.major, current.minor, current.patch);
  if current.pre.is_empty() {
    next.patch += 1;
  }
  next
}

/// Bump the prerelease number, keeping (or switching to) `ident`.
///
/// `1.0.0-beta.1` with ident `beta` → `1.0.0-beta.2`; a stable version or a
/// different identifier restarts at `.0` (on stable the patch is bumped
/// first, matching standard semver prerelease increment).
pub fn prerelease_bump(current: &Version, ident: &str) -> Version {
  let mut next = Version::new(current.major, current.minor, current.patch);
  if current.pre.is_empty() {
    next.patch += 1;
  }

  let number = current
    .pre
    .as_str()
    .strip_prefix(ident)
    .and_then(|rest| rest.strip_prefix('.'))
    .and_then(|n| n.parse::<u64>().ok())
    .map(|n| n + 1)
    .unwrap_or(0);

  next.pre = pre_ident(ident, number);
  next
}

/// Minor bump entering prerelease at `<ident>.0`
pub fn preminor(current: &Version, ident: &str) -> Version {
  let mut next = Version::new(current.major, current.minor + 1, 0);
  next.pre = pre_ident(ident, 0);
  next
}

/// Major bump entering prerelease at `<ident>.0`
pub fn premajor(current: &Version, ident: &str) -> Version {
  let mut next = Version::new(current.major + 1, 0, 0);
  next.pre = pre_ident(ident, 0);
  next
}

fn pre_ident(ident: &str, number: u64) -> Prerelease {
  // ident is always "alpha" or "beta" and number is numeric, so this
  // cannot produce an invalid prerelease string.
  Prerelease::new(&format!("{}.{}", ident, number)).unwrap_or_default()
}

/// Enumerate the next-version candidates for `current`, in display order,
/// always ending with the `custom` sentinel.
pub fn version_choices(current: &Version) -> Vec<VersionChoice> {
  let pre = current.pre.as_str();
  let is_beta = pre.contains("beta");
  let is_alpha = pre.contains("alpha");
  let is_stable = !is_beta && !is_alpha;

  let keep_ident = if is_alpha { "alpha" } else { "beta" };

  let mut choices = vec![VersionChoice::new(
    "next",
    if is_stable {
      patch_release(current)
    } else {
      prerelease_bump(current, keep_ident)
    },
  )];

  if is_stable {
    choices.push(VersionChoice::new("beta-minor", preminor(current, "beta")));
    choices.push(VersionChoice::new("beta-major", premajor(current, "beta")));
    choices.push(VersionChoice::new("alpha-minor", preminor(current, "alpha")));
    choices.push(VersionChoice::new("alpha-major", premajor(current, "alpha")));
    choices.push(VersionChoice::new(
      "minor",
      Version::new(current.major, current.minor + 1, 0),
    ));
    choices.push(VersionChoice::new("major", Version::new(current.major + 1, 0, 0)));
  } else if is_alpha {
    let mut beta_entry = patch_release(current);
    beta_entry.pre = pre_ident("beta", 0);
    choices.push(VersionChoice::new("beta", beta_entry));
  } else {
    choices.push(VersionChoice::new("stable", patch_release(current)));
  }

  choices.push(VersionChoice {
    label: "custom".to_string(),
    version: None,
  });

  choices
}

/// Pick the first candidate whose rendered label contains `selector`.
pub fn find_by_selector<'a>(choices: &'a [VersionChoice], selector: &str) -> Option<&'a VersionChoice> {
  choices.iter().find(|c| c.rendered().contains(selector))
}
