//! Test helpers for unit tests in the CLI crate.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Write `json` to `maze.json` inside a fresh temporary directory.
///
/// The directory is removed when the returned guard drops.
pub fn write_maze(json: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("maze.json");
    fs::write(&path, json).expect("write maze fixture");
    (dir, path)
}
