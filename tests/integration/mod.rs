//! Integration test harness for the mono-release binary

mod helpers;

mod test_publish;
mod test_release;
mod test_versions;
