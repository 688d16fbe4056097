//! Test fixture loader and synthetic data builders shared by the freightlens
//! crates' tests and benches.

pub mod synthetic;

use std::path::PathBuf;

/// Root directory of the test-fixtures data folder.
pub fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up until the data folder
    // (not the fixtures crate itself) is found.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").join("snapshot").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Get the absolute path to a fixture file or directory.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// The small CSV snapshot used by loader and end-to-end tests.
pub fn snapshot_dir() -> PathBuf {
    fixture_path("snapshot")
}
