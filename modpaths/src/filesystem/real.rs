//! The operating system's filesystem.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::{
    FileAccess, FileEntry, FileMode, FileStream, FileSystem, FileSystemRef, KnownPath,
    NamePattern, RetryPolicy,
};
use crate::error::{Error, Result};
use crate::path::{AbsolutePath, PathFormat};
use crate::units::Size;

/// Filesystem backed by `std::fs`.
///
/// # Examples
///
/// ```no_run
/// use modpaths::{FileSystem, RealFileSystem};
///
/// let fs = RealFileSystem::new().unwrap();
/// let hosts = fs.from_full_path("/etc/hosts");
/// assert!(hosts.file_exists());
/// ```
#[derive(Debug, Clone)]
pub struct RealFileSystem {
    format: PathFormat,
    retry: RetryPolicy,
}

impl RealFileSystem {
    /// Creates a filesystem for the running platform.
    ///
    /// # Errors
    ///
    /// Returns `PlatformNotSupported` on platforms without known root rules.
    pub fn new() -> Result<Self> {
        Ok(Self {
            format: PathFormat::current()?,
            retry: RetryPolicy::default(),
        })
    }

    /// Replaces the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn native(path: &AbsolutePath) -> PathBuf {
        PathBuf::from(path.full_path())
    }

    fn child(&self, directory: &AbsolutePath, name: &str) -> AbsolutePath {
        AbsolutePath::from_directory_and_file_name(&directory.full_path(), name, self.handle())
    }

    /// Collects entries below `directory` for which `want` holds.
    fn walk(
        &self,
        directory: &AbsolutePath,
        pattern: &NamePattern,
        recursive: bool,
        want_dirs: bool,
        out: &mut Vec<AbsolutePath>,
    ) -> Result<()> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(Self::native(directory))? {
            let entry = entry?;
            let Ok(name) = entry.file_name().into_string() else {
                log::debug!("Skipping non UTF-8 entry in {directory}");
                continue;
            };
            entries.push((name, entry.file_type()?.is_dir()));
        }
        entries.sort();

        for (name, is_dir) in entries {
            let path = self.child(directory, &name);
            if is_dir == want_dirs && pattern.matches(&name) {
                out.push(path.clone());
            }
            if is_dir && recursive {
                self.walk(&path, pattern, recursive, want_dirs, out)?;
            }
        }
        Ok(())
    }

    fn enumerate(
        &self,
        directory: &AbsolutePath,
        pattern: &str,
        recursive: bool,
        want_dirs: bool,
    ) -> Result<Vec<AbsolutePath>> {
        let pattern = NamePattern::new(pattern)?;
        let mut found = Vec::new();
        if self.directory_exists(directory) {
            self.walk(directory, &pattern, recursive, want_dirs, &mut found)?;
        }
        Ok(found)
    }

    fn remove_file_clearing_read_only(path: &AbsolutePath) -> Result<()> {
        let native = Self::native(path);
        match fs::remove_file(&native) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                let mut permissions = fs::metadata(&native)?.permissions();
                if !permissions.readonly() {
                    return Err(e.into());
                }
                log::debug!("Clearing read-only flag to delete {path}");
                #[allow(clippy::permissions_set_readonly_false)]
                permissions.set_readonly(false);
                fs::set_permissions(&native, permissions)?;
                fs::remove_file(&native).map_err(Error::from)
            }
            Err(e) => Err(map_io(e, path)),
        }
    }
}

/// Maps common I/O failures onto the library's error variants.
fn env_dir(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .map(PathBuf::from)
        .filter(|dir| dir.is_absolute())
}

fn local_app_data(format: PathFormat) -> Option<PathBuf> {
    match format {
        PathFormat::Windows => env_dir("LOCALAPPDATA"),
        PathFormat::Unix => env_dir("XDG_DATA_HOME")
            .or_else(|| home::home_dir().map(|home| home.join(".local").join("share"))),
    }
}

fn map_io(error: io::Error, path: &AbsolutePath) -> Error {
    match error.kind() {
        io::ErrorKind::NotFound => Error::FileNotFound {
            path: path.full_path(),
        },
        io::ErrorKind::AlreadyExists => Error::AlreadyExists {
            path: path.full_path(),
        },
        _ => Error::Io(error),
    }
}

impl FileSystem for RealFileSystem {
    fn path_format(&self) -> PathFormat {
        self.format
    }

    fn handle(&self) -> FileSystemRef {
        Arc::new(self.clone())
    }

    fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    fn known_path(&self, known: KnownPath) -> Result<AbsolutePath> {
        let unavailable = |reason: &str| Error::KnownPathUnavailable {
            known: known.to_string(),
            reason: reason.to_string(),
        };
        let native = match known {
            KnownPath::TempDirectory => Some(std::env::temp_dir()),
            KnownPath::HomeDirectory => home::home_dir(),
            KnownPath::LocalApplicationDataDirectory => local_app_data(self.format),
            KnownPath::CurrentDirectory => Some(std::env::current_dir()?),
        }
        .ok_or_else(|| unavailable("not configured for the current user"))?;
        let text = native.to_str().ok_or_else(|| unavailable("not valid UTF-8"))?;
        Ok(self.from_full_path(text))
    }

    fn open_file(
        &self,
        path: &AbsolutePath,
        mode: FileMode,
        access: FileAccess,
    ) -> Result<Box<dyn FileStream>> {
        let parent = path.parent();
        if mode.creates() && parent != *path && !self.directory_exists(&parent) {
            return Err(Error::DirectoryNotFound {
                path: parent.full_path(),
            });
        }

        let mut options = OpenOptions::new();
        options.read(access.can_read()).write(access.can_write());
        match mode {
            FileMode::Open => {}
            FileMode::Create => {
                options.create(true).truncate(true);
            }
            FileMode::CreateNew => {
                options.create_new(true);
            }
            FileMode::OpenOrCreate => {
                options.create(true);
            }
            FileMode::Truncate => {
                options.truncate(true);
            }
            FileMode::Append => {
                options.append(true).create(true);
            }
        }

        let file = options.open(Self::native(path)).map_err(|e| map_io(e, path))?;
        Ok(Box::new(file))
    }

    fn file_exists(&self, path: &AbsolutePath) -> bool {
        Self::native(path).is_file()
    }

    fn directory_exists(&self, path: &AbsolutePath) -> bool {
        Self::native(path).is_dir()
    }

    fn create_directory(&self, path: &AbsolutePath) -> Result<()> {
        fs::create_dir_all(Self::native(path))?;
        Ok(())
    }

    fn delete_file(&self, path: &AbsolutePath) -> Result<()> {
        if self.directory_exists(path) {
            return self.delete_directory(path, true);
        }
        if !self.file_exists(path) {
            return Ok(());
        }
        Self::remove_file_clearing_read_only(path)
    }

    fn delete_directory(&self, path: &AbsolutePath, recursive: bool) -> Result<()> {
        let native = Self::native(path);
        if !native.is_dir() {
            return Ok(());
        }

        if !recursive {
            if fs::read_dir(&native)?.next().is_some() {
                return Err(Error::DirectoryNotEmpty {
                    path: path.full_path(),
                });
            }
            fs::remove_dir(&native)?;
            return Ok(());
        }

        let what = format!("Deleting directory {path}");
        RetryPolicy::retry(self.retry.delete_attempts, self.retry.delete_delay, &what, || {
            match fs::remove_dir_all(&native) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(Error::Io(e)),
            }
        })
    }

    fn move_file(
        &self,
        source: &AbsolutePath,
        dest: &AbsolutePath,
        overwrite: bool,
    ) -> Result<()> {
        let is_directory = self.directory_exists(source);
        if !is_directory && !self.file_exists(source) {
            return Err(Error::FileNotFound {
                path: source.full_path(),
            });
        }
        let dest_exists = self.file_exists(dest) || self.directory_exists(dest);
        if dest_exists && (!overwrite || is_directory) {
            return Err(Error::AlreadyExists {
                path: dest.full_path(),
            });
        }
        fs::rename(Self::native(source), Self::native(dest))?;
        Ok(())
    }

    fn file_entry(&self, path: &AbsolutePath) -> Result<FileEntry> {
        let metadata = fs::metadata(Self::native(path)).map_err(|e| map_io(e, path))?;
        if !metadata.is_file() {
            return Err(Error::FileNotFound {
                path: path.full_path(),
            });
        }
        Ok(FileEntry {
            path: path.clone(),
            size: Size::from_bytes(metadata.len()),
            last_write_time: DateTime::<Utc>::from(metadata.modified()?),
            is_read_only: metadata.permissions().readonly(),
        })
    }

    fn set_read_only(&self, path: &AbsolutePath, read_only: bool) -> Result<()> {
        let native = Self::native(path);
        let mut permissions = fs::metadata(&native)
            .map_err(|e| map_io(e, path))?
            .permissions();
        #[allow(clippy::permissions_set_readonly_false)]
        permissions.set_readonly(read_only);
        fs::set_permissions(&native, permissions)?;
        Ok(())
    }

    fn enumerate_files(
        &self,
        directory: &AbsolutePath,
        pattern: &str,
        recursive: bool,
    ) -> Result<Vec<AbsolutePath>> {
        self.enumerate(directory, pattern, recursive, false)
    }

    fn enumerate_directories(
        &self,
        directory: &AbsolutePath,
        pattern: &str,
        recursive: bool,
    ) -> Result<Vec<AbsolutePath>> {
        self.enumerate(directory, pattern, recursive, true)
    }

    fn read_dir_names(&self, directory: &AbsolutePath) -> Result<Vec<String>> {
        let entries = fs::read_dir(Self::native(directory)).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::DirectoryNotFound {
                path: directory.full_path(),
            },
            _ => Error::Io(e),
        })?;

        let mut names = Vec::new();
        for entry in entries {
            if let Ok(name) = entry?.file_name().into_string() {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }
}
