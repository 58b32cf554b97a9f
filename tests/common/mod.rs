#![allow(dead_code)]

use std::io::Write;
use std::path::Path;

use tempfile::TempDir;

pub use shellstep_test_utils::{init_tracing, sh, with_timeout};

/// Write `contents` as `Changelog.toml` inside a fresh temporary directory.
///
/// The directory is returned so tests can add referenced files next to the
/// changelog; it is removed when dropped.
pub fn changelog_dir(contents: &str) -> TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    write_file(dir.path(), "Changelog.toml", contents);
    dir
}

pub fn write_file(dir: &Path, name: &str, contents: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dir");
    }
    let mut file = std::fs::File::create(&path).expect("create file");
    file.write_all(contents.as_bytes()).expect("write file");
}
