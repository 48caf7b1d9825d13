//! Scoped temporary files and folders.
//!
//! A [`TemporaryFileManager`] owns a freshly created, uniquely named base
//! directory. Every [`TemporaryPath`] it issues lives inside that directory
//! and deletes itself when dropped unless told otherwise. Disposing the
//! manager removes the whole base directory.
//!
//! # Examples
//!
//! ```
//! use modpaths::{FileSystem, InMemoryFileSystem, PathFormat, TemporaryFileManager};
//!
//! let fs = InMemoryFileSystem::new(PathFormat::Unix);
//! let parent = fs.from_full_path("/tmp");
//!
//! let mut manager = TemporaryFileManager::new(fs.handle(), Some(parent), true).unwrap();
//! let scratch = manager.create_file(None, true).unwrap();
//! scratch.write_all_text("work in progress").unwrap();
//! assert!(scratch.file_exists());
//!
//! let base = manager.base_directory().clone();
//! manager.dispose().unwrap();
//! assert!(!base.directory_exists());
//! ```

use std::ops::Deref;

use uuid::Uuid;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::filesystem::{FileSystemRef, KnownPath};
use crate::path::{AbsolutePath, Extension, RelativePath};

/// Name of the directory created under [`KnownPath::TempDirectory`] when no
/// parent is configured.
pub const DEFAULT_TEMP_SUBDIRECTORY: &str = "modpaths";

fn unique_name() -> String {
    Uuid::new_v4().to_string()
}

/// Issues uniquely named temporary paths under a private base directory.
///
/// The manager is not synchronized; issuing paths concurrently with
/// [`dispose`](Self::dispose) is prevented by requiring `&mut self` for the
/// latter.
#[derive(Debug)]
pub struct TemporaryFileManager {
    fs: FileSystemRef,
    base: AbsolutePath,
    delete_on_dispose: bool,
    disposed: bool,
}

impl TemporaryFileManager {
    /// Creates a manager whose base directory is a new GUID-named folder
    /// under `parent`, or under [`DEFAULT_TEMP_SUBDIRECTORY`] in the
    /// filesystem's temporary directory if `parent` is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base directory cannot be created.
    pub fn new(
        fs: FileSystemRef,
        parent: Option<AbsolutePath>,
        delete_on_dispose: bool,
    ) -> Result<Self> {
        let parent = match parent {
            Some(parent) => parent,
            None => Self::default_parent(&fs)?,
        };
        let base = parent.combine_unchecked(&RelativePath::new(unique_name()));
        fs.create_directory(&base)?;
        log::debug!("Created temporary directory {base}");

        Ok(Self {
            fs,
            base,
            delete_on_dispose,
            disposed: false,
        })
    }

    /// Creates a manager using the temporary-file settings of `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base directory cannot be created.
    pub fn from_config(fs: FileSystemRef, config: &Config) -> Result<Self> {
        let parent = config
            .temp_root
            .as_deref()
            .map(|root| AbsolutePath::from_full_path(root, fs.clone()));
        Self::new(fs, parent, config.delete_temp_on_drop.unwrap_or(true))
    }

    /// `<temp directory>/modpaths` on `fs`.
    fn default_parent(fs: &FileSystemRef) -> Result<AbsolutePath> {
        Ok(fs
            .known_path(KnownPath::TempDirectory)?
            .combine_unchecked(&RelativePath::from(DEFAULT_TEMP_SUBDIRECTORY)))
    }

    /// The directory all temporary paths are issued in.
    #[must_use]
    pub fn base_directory(&self) -> &AbsolutePath {
        &self.base
    }

    /// Whether [`dispose`](Self::dispose) has run.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn ensure_live(&self) -> Result<()> {
        if self.disposed {
            return Err(Error::path(
                self.base.full_path(),
                "temporary file manager has been disposed",
            ));
        }
        Ok(())
    }

    /// Issues a unique file path with the given extension.
    ///
    /// The file itself is not created.
    ///
    /// # Errors
    ///
    /// Returns a `Path` error if the manager has been disposed.
    pub fn create_file(
        &self,
        extension: Option<&Extension>,
        delete_on_drop: bool,
    ) -> Result<TemporaryPath> {
        self.ensure_live()?;
        let mut name = unique_name();
        if let Some(extension) = extension {
            name.push_str(extension.as_str());
        }
        let path = self.base.combine_unchecked(&RelativePath::new(name));
        Ok(TemporaryPath::new(path, delete_on_drop))
    }

    /// Creates a unique folder.
    ///
    /// # Errors
    ///
    /// Returns a `Path` error if the manager has been disposed, or an I/O
    /// error if the folder cannot be created.
    pub fn create_folder(&self, delete_on_drop: bool) -> Result<TemporaryPath> {
        self.ensure_live()?;
        let path = self
            .base
            .combine_unchecked(&RelativePath::new(unique_name()));
        self.fs.create_directory(&path)?;
        Ok(TemporaryPath::new(path, delete_on_drop))
    }

    /// Deletes the base directory tree, unless the manager was told to keep
    /// it. Later calls do nothing.
    ///
    /// # Errors
    ///
    /// Returns the error of the recursive delete.
    pub fn dispose(&mut self) -> Result<()> {
        if self.disposed {
            return Ok(());
        }
        self.disposed = true;
        if self.delete_on_dispose {
            log::debug!("Deleting temporary directory {}", self.base);
            self.fs.delete_directory(&self.base, true)?;
        }
        Ok(())
    }
}

impl Drop for TemporaryFileManager {
    fn drop(&mut self) {
        if let Err(e) = self.dispose() {
            log::warn!("Failed to remove temporary directory {}: {e}", self.base);
        }
    }
}

/// A temporary file or folder that deletes itself when dropped.
#[derive(Debug)]
pub struct TemporaryPath {
    path: AbsolutePath,
    delete_on_drop: bool,
    disposed: bool,
}

impl TemporaryPath {
    fn new(path: AbsolutePath, delete_on_drop: bool) -> Self {
        Self {
            path,
            delete_on_drop,
            disposed: false,
        }
    }

    /// The issued path.
    #[must_use]
    pub fn path(&self) -> &AbsolutePath {
        &self.path
    }

    /// Whether the path is deleted on drop.
    #[must_use]
    pub fn deletes_on_drop(&self) -> bool {
        self.delete_on_drop
    }

    /// Stops tracking the path and returns it; nothing is deleted.
    #[must_use]
    pub fn keep(mut self) -> AbsolutePath {
        self.delete_on_drop = false;
        self.path.clone()
    }

    /// Deletes the file or folder now, if it is set to be deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn dispose(&mut self) -> Result<()> {
        if self.disposed {
            return Ok(());
        }
        self.disposed = true;
        if self.delete_on_drop {
            self.path.delete()?;
        }
        Ok(())
    }
}

impl Deref for TemporaryPath {
    type Target = AbsolutePath;

    fn deref(&self) -> &AbsolutePath {
        &self.path
    }
}

impl AsRef<AbsolutePath> for TemporaryPath {
    fn as_ref(&self) -> &AbsolutePath {
        &self.path
    }
}

impl Drop for TemporaryPath {
    fn drop(&mut self) {
        if let Err(e) = self.dispose() {
            log::warn!("Failed to remove temporary path {}: {e}", self.path);
        }
    }
}
