//! Filesystem abstraction.
//!
//! All I/O performed through an [`AbsolutePath`] is routed to the
//! [`FileSystem`] the path belongs to. Three implementations are provided:
//!
//! - [`RealFileSystem`]: the operating system's filesystem.
//! - [`InMemoryFileSystem`]: a shared in-memory tree, for tests and for
//!   exercising another platform's path format on any host.
//! - [`OverlayFileSystem`]: a decorator that redirects selected paths to
//!   other locations before delegating to a base filesystem.
//!
//! # Examples
//!
//! ```
//! use std::collections::HashMap;
//! use modpaths::{FileSystem, InMemoryFileSystem, PathFormat};
//!
//! let base = InMemoryFileSystem::new(PathFormat::Unix);
//! let real = base.from_full_path("/data/real.txt");
//! base.add_file(&real, "payload").unwrap();
//!
//! let virt = base.from_full_path("/data/virtual.txt");
//! let overlay = base.create_overlay_file_system(HashMap::from([(virt.clone(), real)]));
//!
//! let through_overlay = virt.with_file_system(overlay);
//! assert_eq!(through_overlay.read_all_text().unwrap(), "payload");
//! assert_eq!(through_overlay.to_string(), "/data/virtual.txt");
//! ```

mod memory;
mod overlay;
mod pattern;
mod real;

use std::collections::HashMap;
use std::fmt;
use std::io::{Read, Seek, Write};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use memory::InMemoryFileSystem;
pub use overlay::OverlayFileSystem;
pub use pattern::NamePattern;
pub use real::RealFileSystem;

use crate::error::Result;
use crate::path::{AbsolutePath, PathFormat};
use crate::units::Size;

/// Shared handle to a filesystem.
pub type FileSystemRef = Arc<dyn FileSystem>;

/// A readable, writable and seekable stream over a file's contents.
pub trait FileStream: Read + Write + Seek + Send {}

impl<T: Read + Write + Seek + Send> FileStream for T {}

/// How [`FileSystem::open_file`] treats existing and missing files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileMode {
    /// Open an existing file.
    Open,
    /// Create the file, truncating it if it exists.
    Create,
    /// Create the file, failing if it exists.
    CreateNew,
    /// Open the file, creating it if it is missing.
    OpenOrCreate,
    /// Open an existing file and truncate it.
    Truncate,
    /// Open or create the file and position writes at its end.
    Append,
}

impl FileMode {
    /// Whether the mode may create a missing file.
    #[must_use]
    pub const fn creates(self) -> bool {
        matches!(
            self,
            Self::Create | Self::CreateNew | Self::OpenOrCreate | Self::Append
        )
    }

    /// Whether the mode discards existing contents.
    #[must_use]
    pub const fn truncates(self) -> bool {
        matches!(self, Self::Create | Self::Truncate)
    }
}

/// The kind of access requested from [`FileSystem::open_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileAccess {
    /// Read only.
    Read,
    /// Write only.
    Write,
    /// Read and write.
    ReadWrite,
}

impl FileAccess {
    /// Whether reads are allowed.
    #[must_use]
    pub const fn can_read(self) -> bool {
        matches!(self, Self::Read | Self::ReadWrite)
    }

    /// Whether writes are allowed.
    #[must_use]
    pub const fn can_write(self) -> bool {
        matches!(self, Self::Write | Self::ReadWrite)
    }
}

/// A well-known directory resolved by [`FileSystem::known_path`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KnownPath {
    /// Directory for short-lived files.
    TempDirectory,
    /// The current user's home directory.
    HomeDirectory,
    /// Per-user application data that is not roamed.
    ///
    /// `%LOCALAPPDATA%` on Windows, `$XDG_DATA_HOME` or `~/.local/share`
    /// elsewhere.
    LocalApplicationDataDirectory,
    /// The process working directory.
    CurrentDirectory,
}

impl KnownPath {
    /// Every known path, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::TempDirectory,
        Self::HomeDirectory,
        Self::LocalApplicationDataDirectory,
        Self::CurrentDirectory,
    ];

    /// Kebab-case name used in messages and configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TempDirectory => "temp-directory",
            Self::HomeDirectory => "home-directory",
            Self::LocalApplicationDataDirectory => "local-application-data-directory",
            Self::CurrentDirectory => "current-directory",
        }
    }
}

impl fmt::Display for KnownPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata about a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path of the file.
    pub path: AbsolutePath,
    /// Size of the contents.
    pub size: Size,
    /// Time of the last write.
    pub last_write_time: DateTime<Utc>,
    /// Whether the read-only attribute is set.
    pub is_read_only: bool,
}

/// Bounded retry parameters for operations that race with other processes.
///
/// Moves and recursive directory deletes are retried with a fixed delay when
/// they fail, which tolerates files briefly held open by scanners or
/// indexers. After the last retry the final error is returned unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries of a failed move after the first attempt.
    pub move_retries: u32,
    /// Delay between move attempts.
    pub move_delay: Duration,
    /// Total attempts for a recursive directory delete.
    pub delete_attempts: u32,
    /// Delay between directory delete attempts.
    pub delete_delay: Duration,
}

impl RetryPolicy {
    /// Default number of move retries.
    pub const DEFAULT_MOVE_RETRIES: u32 = 10;
    /// Default delay between move attempts.
    pub const DEFAULT_MOVE_DELAY: Duration = Duration::from_secs(1);
    /// Default number of directory delete attempts.
    pub const DEFAULT_DELETE_ATTEMPTS: u32 = 10;
    /// Default delay between directory delete attempts.
    pub const DEFAULT_DELETE_DELAY: Duration = Duration::from_millis(100);

    /// A policy that never waits and never retries.
    #[must_use]
    pub const fn immediate() -> Self {
        Self {
            move_retries: 0,
            move_delay: Duration::ZERO,
            delete_attempts: 1,
            delete_delay: Duration::ZERO,
        }
    }

    /// Runs `operation` up to `attempts` times, sleeping `delay` between
    /// failures, and returns the last error if every attempt fails.
    pub(crate) fn retry<T>(
        attempts: u32,
        delay: Duration,
        what: &str,
        mut operation: impl FnMut() -> Result<T>,
    ) -> Result<T> {
        let attempts = attempts.max(1);
        let mut attempt = 1;
        loop {
            match operation() {
                Ok(value) => return Ok(value),
                Err(e) if attempt >= attempts => {
                    log::warn!("{what} failed after {attempt} attempts: {e}");
                    return Err(e);
                }
                Err(e) => {
                    log::debug!("{what} failed (attempt {attempt}/{attempts}), retrying: {e}");
                    attempt += 1;
                    if !delay.is_zero() {
                        std::thread::sleep(delay);
                    }
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            move_retries: Self::DEFAULT_MOVE_RETRIES,
            move_delay: Self::DEFAULT_MOVE_DELAY,
            delete_attempts: Self::DEFAULT_DELETE_ATTEMPTS,
            delete_delay: Self::DEFAULT_DELETE_DELAY,
        }
    }
}

/// Storage that [`AbsolutePath`] values are resolved against.
///
/// Implementations are cheap to clone handles over shared state;
/// [`handle`](Self::handle) produces the [`FileSystemRef`] that paths
/// created by this filesystem carry.
///
/// Missing files and directories are reported as `FileNotFound` and
/// `DirectoryNotFound`. Deleting something that does not exist succeeds.
pub trait FileSystem: fmt::Debug + Send + Sync {
    /// The path format used to parse and format paths.
    fn path_format(&self) -> PathFormat;

    /// A shared handle to this filesystem.
    fn handle(&self) -> FileSystemRef;

    /// Retry parameters for moves and recursive deletes.
    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::default()
    }

    /// Builds a filesystem that redirects each key of `mappings` to its
    /// value before performing any I/O.
    ///
    /// Overlays always wrap a non-overlay base; building an overlay from an
    /// overlay wraps the same base with the new table.
    fn create_overlay_file_system(
        &self,
        mappings: HashMap<AbsolutePath, AbsolutePath>,
    ) -> FileSystemRef {
        OverlayFileSystem::new(self.handle(), mappings).handle()
    }

    /// Resolves a well-known directory to a path on this filesystem.
    ///
    /// The directory is not required to exist.
    ///
    /// # Errors
    ///
    /// Returns `KnownPathUnavailable` if the location cannot be determined.
    fn known_path(&self, known: KnownPath) -> Result<AbsolutePath>;

    /// Opens a stream over a file.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if the mode requires an existing file,
    /// `AlreadyExists` for [`FileMode::CreateNew`] on an existing file, and
    /// `DirectoryNotFound` if the parent directory is missing.
    fn open_file(
        &self,
        path: &AbsolutePath,
        mode: FileMode,
        access: FileAccess,
    ) -> Result<Box<dyn FileStream>>;

    /// Whether a file exists at `path`.
    fn file_exists(&self, path: &AbsolutePath) -> bool;

    /// Whether a directory exists at `path`.
    fn directory_exists(&self, path: &AbsolutePath) -> bool;

    /// Creates a directory and any missing ancestors.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    fn create_directory(&self, path: &AbsolutePath) -> Result<()>;

    /// Deletes a file, clearing its read-only attribute if that blocks the
    /// delete. A directory at `path` is deleted recursively.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry exists but cannot be removed.
    fn delete_file(&self, path: &AbsolutePath) -> Result<()>;

    /// Deletes a directory.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryNotEmpty` for a non-recursive delete of a directory
    /// with entries, or the last error of a failed recursive delete.
    fn delete_directory(&self, path: &AbsolutePath, recursive: bool) -> Result<()>;

    /// Moves a file, or a directory together with everything below it.
    ///
    /// `overwrite` only applies to files; a directory is never moved onto an
    /// existing entry.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` for a missing source and `AlreadyExists` if the
    /// destination exists and may not be replaced.
    fn move_file(&self, source: &AbsolutePath, dest: &AbsolutePath, overwrite: bool)
        -> Result<()>;

    /// Reads the metadata of a file.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if no file exists at `path`.
    fn file_entry(&self, path: &AbsolutePath) -> Result<FileEntry>;

    /// Sets or clears the read-only attribute of a file.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if no file exists at `path`.
    fn set_read_only(&self, path: &AbsolutePath, read_only: bool) -> Result<()>;

    /// Lists files under `directory` whose names match `pattern`.
    ///
    /// A missing directory yields no entries.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPattern` for a malformed pattern or an I/O error if a
    /// directory cannot be read.
    fn enumerate_files(
        &self,
        directory: &AbsolutePath,
        pattern: &str,
        recursive: bool,
    ) -> Result<Vec<AbsolutePath>>;

    /// Lists directories under `directory` whose names match `pattern`.
    ///
    /// # Errors
    ///
    /// Same as [`enumerate_files`](Self::enumerate_files).
    fn enumerate_directories(
        &self,
        directory: &AbsolutePath,
        pattern: &str,
        recursive: bool,
    ) -> Result<Vec<AbsolutePath>>;

    /// Names of the entries directly inside `directory`, as stored.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryNotFound` if `directory` does not exist.
    fn read_dir_names(&self, directory: &AbsolutePath) -> Result<Vec<String>>;

    /// Parses `full_path` into a path on this filesystem.
    fn from_full_path(&self, full_path: &str) -> AbsolutePath {
        AbsolutePath::from_full_path(full_path, self.handle())
    }

    /// Builds a path on this filesystem from a directory and file name.
    fn from_directory_and_file_name(&self, directory: &str, file_name: &str) -> AbsolutePath {
        AbsolutePath::from_directory_and_file_name(directory, file_name, self.handle())
    }

    /// Opens an existing file for reading.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if the file does not exist.
    fn read_file(&self, path: &AbsolutePath) -> Result<Box<dyn FileStream>> {
        self.open_file(path, FileMode::Open, FileAccess::Read)
    }

    /// Opens a file for writing, creating it if needed and keeping its
    /// contents.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryNotFound` if the parent directory is missing.
    fn write_file(&self, path: &AbsolutePath) -> Result<Box<dyn FileStream>> {
        self.open_file(path, FileMode::OpenOrCreate, FileAccess::ReadWrite)
    }

    /// Creates or truncates a file for reading and writing.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryNotFound` if the parent directory is missing.
    fn create_file(&self, path: &AbsolutePath) -> Result<Box<dyn FileStream>> {
        self.open_file(path, FileMode::Create, FileAccess::ReadWrite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::cell::Cell;

    #[test]
    fn test_file_mode_flags() {
        assert!(FileMode::Create.creates());
        assert!(FileMode::Create.truncates());
        assert!(!FileMode::Open.creates());
        assert!(FileMode::Truncate.truncates());
        assert!(!FileMode::Append.truncates());
    }

    #[test]
    fn test_file_access_flags() {
        assert!(FileAccess::Read.can_read());
        assert!(!FileAccess::Read.can_write());
        assert!(FileAccess::ReadWrite.can_write());
    }

    #[test]
    fn test_default_retry_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.move_retries, 10);
        assert_eq!(policy.move_delay, Duration::from_secs(1));
        assert_eq!(policy.delete_attempts, 10);
        assert_eq!(policy.delete_delay, Duration::from_millis(100));
    }

    #[test]
    fn test_retry_succeeds_after_failures() {
        let calls = Cell::new(0);
        let result = RetryPolicy::retry(5, Duration::ZERO, "op", || {
            calls.set(calls.get() + 1);
            if calls.get() < 3 {
                Err(Error::path("x", "busy"))
            } else {
                Ok(calls.get())
            }
        });
        assert_eq!(result.unwrap(), 3);
    }

    #[test]
    fn test_retry_returns_last_error() {
        let calls = Cell::new(0);
        let result: Result<()> = RetryPolicy::retry(4, Duration::ZERO, "op", || {
            calls.set(calls.get() + 1);
            Err(Error::path("x", format!("attempt {}", calls.get())))
        });
        assert_eq!(calls.get(), 4);
        assert!(result.unwrap_err().to_string().contains("attempt 4"));
    }

    #[test]
    fn test_retry_zero_attempts_runs_once() {
        let calls = Cell::new(0);
        let _ = RetryPolicy::retry(0, Duration::ZERO, "op", || -> Result<()> {
            calls.set(calls.get() + 1);
            Err(Error::path("x", "no"))
        });
        assert_eq!(calls.get(), 1);
    }
}
