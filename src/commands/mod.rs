//! CLI commands for mono-release
//!
//! - **release**: select a package, bump its version, commit, tag, push
//! - **publish**: publish a released package from its `<pkg>@<version>` tag
//! - **versions**: show the next-version candidates for a package

pub mod publish;
pub mod release;
pub mod versions;

pub use publish::run_publish_cmd;
pub use release::{run_release_cmd, ReleaseArgs};
pub use versions::run_versions_cmd;
