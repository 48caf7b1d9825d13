//! Common test utilities for integration tests.
//!
//! This module provides helpers for building filesystems and fixture trees
//! used across the integration suites.

use modpaths::{
    AbsolutePath, FileSystem, FileSystemRef, InMemoryFileSystem, PathFormat, RealFileSystem,
    RetryPolicy,
};
use tempfile::TempDir;

/// A real filesystem rooted at a fresh temporary directory.
///
/// The directory is removed when the fixture is dropped. Retries are
/// disabled so failing operations report immediately.
#[allow(dead_code)]
pub struct RealFixture {
    pub dir: TempDir,
    pub fs: FileSystemRef,
    pub root: AbsolutePath,
}

#[allow(dead_code)]
impl RealFixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let fs = RealFileSystem::new()
            .unwrap()
            .with_retry_policy(RetryPolicy::immediate())
            .handle();
        let root = fs.from_full_path(dir.path().to_str().unwrap());
        Self { dir, fs, root }
    }

    /// Resolves `relative` (with `/` separators) under the fixture root.
    pub fn path(&self, relative: &str) -> AbsolutePath {
        self.root.combine_unchecked(&relative.into())
    }
}

/// An in-memory Unix filesystem pre-populated with `files`.
#[allow(dead_code)]
pub fn memory_fs_with(files: &[(&str, &str)]) -> InMemoryFileSystem {
    let fs = InMemoryFileSystem::new(PathFormat::Unix);
    for (path, contents) in files {
        fs.add_file(&fs.from_full_path(path), *contents).unwrap();
    }
    fs
}

/// Sorted full-path strings, for order-independent assertions.
#[allow(dead_code)]
pub fn full_paths(paths: &[AbsolutePath]) -> Vec<String> {
    let mut out: Vec<String> = paths.iter().map(AbsolutePath::full_path).collect();
    out.sort();
    out
}
