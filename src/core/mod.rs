//! Core engine for mono-release
//!
//! - **config**: mono-release.toml resolution and the per-run request
//! - **error**: error taxonomy with contextual help messages and exit codes
//! - **hooks**: pre-release / pre-publish hook union and executor
//! - **packages**: package resolver and lossless manifest mutation
//! - **prompt**: decision providers (interactive, automated, scripted)
//! - **publish**: registry publish flow driven by a release tag
//! - **release**: the release orchestrator and its rollback choreography
//! - **rollback**: LIFO compensating-action stack
//! - **runner**: dry-run-aware external process execution
//! - **versions**: next-version candidates and semver increments
//! - **vcs**: git operations through system git

pub mod config;
pub mod error;
pub mod hooks;
pub mod packages;
pub mod prompt;
pub mod publish;
pub mod release;
pub mod rollback;
pub mod runner;
pub mod versions;
pub mod vcs;
