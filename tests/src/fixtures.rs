#![cfg(test)]
use std::path::PathBuf;

pub const MINIMAL: &str = "minimal.nessus";
pub const MULTI_HOST: &str = "multi_host.nessus";
pub const TRUNCATED: &str = "truncated.nessus";

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}
