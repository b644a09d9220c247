//! Version control backends

pub mod git;

pub use git::Git;
