//! Release orchestrator
//!
//! Drives one release end to end: preflight checks, package and version
//! selection, hooks, manifest mutation, changelog, commit + tag, push, and
//! the relationship cascade for dependent packages. Every irreversible local
//! step registers its undo on the rollback stack right after it succeeds;
//! any terminal failure unwinds the stack before the error propagates.
//!
//! A cascaded dependent release is a fully independent run with its own
//! stack: its failure rolls back the nested run, then propagates here, where
//! this run's stack unwinds as well.

use crate::core::config::ReleaseConfig;
use crate::core::error::{CheckError, PackageError, ReleaseError, ReleaseResult, VersionError};
use crate::core::hooks;
use crate::core::packages::{self, PackageInfo};
use crate::core::prompt::DecisionProvider;
use crate::core::rollback::RollbackStack;
use crate::core::runner::CommandRunner;
use crate::core::vcs::Git;
use crate::core::versions;
use semver::Version;
use std::path::Path;

/// Run one release request to completion (or rollback).
pub fn run_release(config: &ReleaseConfig, decisions: &dyn DecisionProvider) -> ReleaseResult<()> {
  let runner = CommandRunner::new(config.dry_run);
  let mut rollback = RollbackStack::new();

  match execute(config, decisions, &runner, &mut rollback) {
    Ok(()) => Ok(()),
    Err(err) => {
      rollback.rollback();
      Err(err)
    }
  }
}

fn execute(
  config: &ReleaseConfig,
  decisions: &dyn DecisionProvider,
  runner: &CommandRunner,
  rollback: &mut RollbackStack,
) -> ReleaseResult<()> {
  let git = Git::new(&config.cwd, runner.clone());

  if config.ci {
    println!("🤖 Running in CI mode, all select actions will be skipped");
    if config.package.is_none() {
      return Err(ReleaseError::with_help(
        "You must specify one package when running in CI mode",
        "Pass --package <name>",
      ));
    }
  }

  // PreflightCheck: nothing reversible has happened yet, failures here need
  // no rollback.
  if config.commit_check {
    if git.has_unstaged_diff()? || git.has_staged_diff()? {
      return Err(ReleaseError::Check(CheckError::UncommittedChanges));
    }
  } else {
    println!("⚠️  Commit check is disabled. You may lose uncommitted changes on rollback.\n");
  }

  if let Some(branch) = &config.branch {
    let current = git.current_branch()?;
    if &current != branch {
      return Err(ReleaseError::Check(CheckError::WrongBranch {
        expected: branch.clone(),
        actual: current,
      }));
    }
  }

  // PackageSelect: an explicit pick bypasses both include and exclude
  // filters but must still exist under the packages root.
  let pkg = match &config.package {
    Some(name) => {
      let all = packages::list_packages(&config.packages_path, &[])?;
      if !all.contains(name) {
        return Err(ReleaseError::Package(PackageError::NotFound {
          name: name.clone(),
          path: config.packages_path.clone(),
        }));
      }
      name.clone()
    }
    None => {
      let mut candidates = packages::list_packages(&config.packages_path, &config.exclude)?;
      if !config.include.is_empty() {
        candidates.retain(|p| config.include.contains(p));
      }
      if candidates.is_empty() {
        return Err(ReleaseError::Package(PackageError::NoPackages {
          path: config.packages_path.clone(),
        }));
      }

      match decisions.select_one("Select package", &candidates)? {
        Some(idx) => candidates[idx].clone(),
        // Cancelled selection ends the run cleanly.
        None => return Ok(()),
      }
    }
  };

  log_recent_commits(&git, &pkg, &config.packages_path)?;

  let info = packages::resolve(&pkg, &config.packages_path)?;

  // VersionSelect
  let target = select_version(config, decisions, &info)?;
  println!(
    "📌 [{}] {}Target version: {}",
    info.name,
    if config.ci { "[CI] " } else { "" },
    target
  );

  let tag = format!("{}@{}", info.name, target);

  // ConfirmOrAuto
  let user_commit_msg = if config.ci {
    let mut msg = String::from("[CI release]");
    if !config.commit_message_placeholder.is_empty() {
      msg.push(' ');
      msg.push_str(&config.commit_message_placeholder);
    }
    if let Some(suffix) = &config.ci_msg_suffix {
      msg.push(' ');
      msg.push_str(suffix);
    }
    println!("🤖 [{}] [CI] Commit message: \"{}\"", info.name, msg);
    msg
  } else {
    let msg = decisions.input(
      &format!("[{}] Commit message", info.name),
      config.commit_message_placeholder.trim(),
    )?;

    if !decisions.confirm(&format!("[{}] Releasing {} — confirm?", info.name, tag))? {
      return Ok(());
    }
    msg
  };

  // From here on local state gets mutated. First compensation: restore the
  // working tree (covers the manifest write and the changelog).
  {
    let git = git.clone();
    let name = info.name.clone();
    rollback.add(move || {
      git.checkout_tracked()?;
      println!("⏪ [{}] Rollback: files change", name);
      Ok(())
    });
  }

  // RunPreHooks
  if !config.before_release.is_empty() {
    println!("🪝 [{}] Running before-release hooks...", info.name);
    hooks::run_hooks(&config.before_release, &info.name, &target, &config.cwd, runner)?;
  }

  // MutateVersion: happens in dry-run too, so `git diff` afterwards shows
  // what a real run would commit. The working-tree rollback is dry-gated,
  // leaving the diff in place for inspection.
  println!("✏️  [{}] Updating package version...", info.name);
  packages::write_version(&info.manifest_path, &target)?;

  if config.changelog {
    println!("📝 [{}] Generating changelog...", info.name);
    generate_changelog(&info, config, runner)?;
  }

  // CommitAndTag: only when the previous steps produced an actual diff.
  if git.has_unstaged_diff()? {
    println!("📦 [{}] Committing changes...", info.name);

    git.stage_all()?;
    {
      let git = git.clone();
      let name = info.name.clone();
      rollback.add(move || {
        git.unstage_all()?;
        println!("⏪ [{}] Rollback: cancel git add", name);
        Ok(())
      });
    }

    let commit_msg = if user_commit_msg.is_empty() {
      format!("release: {}", tag)
    } else {
      format!("release: {}\n\n{}", tag, user_commit_msg)
    };
    git.commit(&commit_msg)?;
    {
      let git = git.clone();
      let name = info.name.clone();
      rollback.add(move || {
        git.soft_reset_head()?;
        println!("⏪ [{}] Rollback: cancel git commit", name);
        Ok(())
      });
    }

    git.create_tag(&tag)?;
    {
      let git = git.clone();
      let name = info.name.clone();
      let tag = tag.clone();
      rollback.add(move || {
        git.delete_tag(&tag)?;
        println!("⏪ [{}] Rollback: delete tag {}", name, tag);
        Ok(())
      });
    }
  } else {
    println!("ℹ️  [{}] No changes to commit.", info.name);
    return Ok(());
  }

  // Push
  if !config.push {
    println!(
      "✅ [{}] Release is done. Push the changes to the remote repository by running:\n   git push\n   git push origin refs/tags/{}",
      info.name, tag
    );
    return Ok(());
  }

  println!("📤 [{}] Pushing...", info.name);
  if let Err(err) = git.push() {
    eprintln!("❌ [{}] {}\n", info.name, err);
    if config.ci {
      eprintln!("🤖 [{}] [CI] Push failed, auto rollback", info.name);
      return Err(err);
    }

    if decisions.confirm(&format!("[{}] Push failed. Rollback?", info.name))? {
      rollback.rollback();
      return Ok(());
    }

    println!(
      "ℹ️  [{}] You can manually run:\n   git push\n   git push origin refs/tags/{}",
      info.name, tag
    );
    return Ok(());
  }

  if let Err(err) = git.push_tag(&tag) {
    eprintln!("❌ [{}] {}\n", info.name, err);
    if config.ci {
      eprintln!("🤖 [{}] [CI] Push tag failed, auto rollback", info.name);
      log_last_commit(&git);
      return Err(err);
    }

    if decisions.confirm(&format!("[{}] Push tag failed, rollback?", info.name))? {
      println!(
        "⚠️  [{}] You may need to manually rollback the commit on the remote:",
        info.name
      );
      log_last_commit(&git);
      rollback.rollback();
      return Ok(());
    }

    println!(
      "ℹ️  [{}] You can manually run:\n   git push origin refs/tags/{}",
      info.name, tag
    );
    return Ok(());
  }

  if config.dry_run {
    println!("🔍 [{}] Dry run finished — run `git diff` to see package changes.", info.name);
    return Ok(());
  }

  // RelationshipCascade: only after a fully successful push.
  if config.disable_relationship {
    return Ok(());
  }

  let mut dependents: Vec<String> = Vec::new();
  for entry in config.relationships.iter().filter(|r| r.base == pkg) {
    for dep in &entry.pkgs {
      if !dependents.contains(dep) {
        dependents.push(dep.clone());
      }
    }
  }
  if dependents.is_empty() {
    return Ok(());
  }

  let selected = if config.ci {
    println!("🤖 [CI] Releasing dependent packages automatically");
    dependents
  } else {
    let wanted = decisions.confirm(&format!(
      "Some dependent packages build on [{}], release them too?",
      info.name
    ))?;
    if !wanted {
      return Ok(());
    }

    let picks = decisions.select_many("Select dependent packages", &dependents)?;
    picks.into_iter().map(|i| dependents[i].clone()).collect()
  };

  for dep in selected {
    println!("🔁 Releasing dependent package {}...", dep);
    run_release(&config.for_dependent(&dep), decisions)?;
  }

  Ok(())
}

/// Resolve the target version per the selection policy: explicit selector
/// first, CI defaults to `next`, otherwise the decision provider chooses
/// (with `custom` eliciting free text, validated as semver).
fn select_version(
  config: &ReleaseConfig,
  decisions: &dyn DecisionProvider,
  info: &PackageInfo,
) -> ReleaseResult<Version> {
  let choices = versions::version_choices(&info.current_version);

  if config.ci {
    let selector = config.version_type.as_deref().unwrap_or("next");
    let picked = versions::find_by_selector(&choices, selector)
      .or_else(|| versions::find_by_selector(&choices, "next"))
      .and_then(|c| c.version.clone());
    return picked.ok_or(ReleaseError::Version(VersionError::NoTarget {
      package: info.name.clone(),
    }));
  }

  if let Some(selector) = &config.version_type {
    if let Some(version) = versions::find_by_selector(&choices, selector).and_then(|c| c.version.clone()) {
      return Ok(version);
    }
  }

  let rendered: Vec<String> = choices.iter().map(|c| c.rendered()).collect();
  let idx = decisions
    .select_one(&format!("[{}] Select release type", info.name), &rendered)?
    .ok_or(ReleaseError::Version(VersionError::NoTarget {
      package: info.name.clone(),
    }))?;

  match &choices[idx].version {
    Some(version) => Ok(version.clone()),
    None => {
      let text = decisions.input(
        &format!("[{}] Input custom version", info.name),
        &info.current_version.to_string(),
      )?;
      text.parse().map_err(|_| {
        ReleaseError::Version(VersionError::Invalid {
          package: info.name.clone(),
          version: text,
        })
      })
    }
  }
}

/// Show the commits touching the package since its most recent release tag.
/// Best effort: a package without a previous tag just skips the report.
fn log_recent_commits(git: &Git, pkg: &str, packages_path: &Path) -> ReleaseResult<()> {
  let prefix = format!("{}@", pkg);
  let mut tags: Vec<String> = git.list_tags()?.into_iter().filter(|t| t.starts_with(&prefix)).collect();
  tags.sort();

  let Some(tag) = tags.last() else {
    return Ok(());
  };

  let sha = git.rev_for_tag(tag)?;
  let short = &sha[..sha.len().min(5)];
  println!("\nℹ️  Commits of {} since {} ({})", pkg, tag, short);

  let log = git.log_commits_since(&sha, &packages_path.join(pkg))?;
  if !log.trim().is_empty() {
    println!("{}", log.trim_end());
  }
  println!();
  Ok(())
}

fn log_last_commit(git: &Git) {
  if let Ok(last) = git.last_commit() {
    println!("{}", last);
  }
}

/// Generate the package-scoped changelog with git-cliff. Runs in dry mode
/// too; the resulting file is part of the inspectable diff.
fn generate_changelog(info: &PackageInfo, config: &ReleaseConfig, runner: &CommandRunner) -> ReleaseResult<()> {
  let rel = info.dir.strip_prefix(&config.cwd).unwrap_or(&info.dir);
  let include = format!("{}/**", rel.display());
  runner.run("git-cliff", &["--include-path", &include, "-o", "CHANGELOG.md"], &info.dir)?;
  Ok(())
}
