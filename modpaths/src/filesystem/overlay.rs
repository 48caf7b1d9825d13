//! Path-redirecting filesystem decorator.

use std::collections::HashMap;
use std::sync::Arc;

use super::{
    FileAccess, FileEntry, FileMode, FileStream, FileSystem, FileSystemRef, KnownPath,
    RetryPolicy,
};
use crate::error::Result;
use crate::path::{AbsolutePath, PathFormat};

/// A filesystem that substitutes mapped paths before delegating to a base.
///
/// Each key of the mapping table is replaced by its value on every call
/// that touches storage. Paths held by the caller keep their original text;
/// only the physical operation is redirected. Paths returned from
/// enumeration are bound to the overlay.
#[derive(Debug, Clone)]
pub struct OverlayFileSystem {
    base: FileSystemRef,
    mappings: Arc<HashMap<AbsolutePath, AbsolutePath>>,
}

impl OverlayFileSystem {
    /// Wraps `base` with `mappings`.
    #[must_use]
    pub fn new(base: FileSystemRef, mappings: HashMap<AbsolutePath, AbsolutePath>) -> Self {
        Self {
            base,
            mappings: Arc::new(mappings),
        }
    }

    /// The filesystem physical operations are delegated to.
    #[must_use]
    pub fn base(&self) -> &FileSystemRef {
        &self.base
    }

    /// The redirection table.
    #[must_use]
    pub fn mappings(&self) -> &HashMap<AbsolutePath, AbsolutePath> {
        &self.mappings
    }

    /// The path the base filesystem should operate on for `path`.
    fn resolve<'a>(&'a self, path: &'a AbsolutePath) -> &'a AbsolutePath {
        match self.mappings.get(path) {
            Some(target) => {
                log::trace!("Redirecting {path} to {target}");
                target
            }
            None => path,
        }
    }

    fn rebind(&self, paths: Vec<AbsolutePath>) -> Vec<AbsolutePath> {
        let handle = self.handle();
        paths
            .into_iter()
            .map(|path| path.with_file_system(handle.clone()))
            .collect()
    }
}

impl FileSystem for OverlayFileSystem {
    fn path_format(&self) -> PathFormat {
        self.base.path_format()
    }

    fn handle(&self) -> FileSystemRef {
        Arc::new(self.clone())
    }

    fn retry_policy(&self) -> RetryPolicy {
        self.base.retry_policy()
    }

    fn create_overlay_file_system(
        &self,
        mappings: HashMap<AbsolutePath, AbsolutePath>,
    ) -> FileSystemRef {
        Self::new(self.base.clone(), mappings).handle()
    }

    fn known_path(&self, known: KnownPath) -> Result<AbsolutePath> {
        Ok(self.base.known_path(known)?.with_file_system(self.handle()))
    }

    fn open_file(
        &self,
        path: &AbsolutePath,
        mode: FileMode,
        access: FileAccess,
    ) -> Result<Box<dyn FileStream>> {
        self.base.open_file(self.resolve(path), mode, access)
    }

    fn file_exists(&self, path: &AbsolutePath) -> bool {
        self.base.file_exists(self.resolve(path))
    }

    fn directory_exists(&self, path: &AbsolutePath) -> bool {
        self.base.directory_exists(self.resolve(path))
    }

    fn create_directory(&self, path: &AbsolutePath) -> Result<()> {
        self.base.create_directory(self.resolve(path))
    }

    fn delete_file(&self, path: &AbsolutePath) -> Result<()> {
        self.base.delete_file(self.resolve(path))
    }

    fn delete_directory(&self, path: &AbsolutePath, recursive: bool) -> Result<()> {
        self.base.delete_directory(self.resolve(path), recursive)
    }

    fn move_file(
        &self,
        source: &AbsolutePath,
        dest: &AbsolutePath,
        overwrite: bool,
    ) -> Result<()> {
        self.base
            .move_file(self.resolve(source), self.resolve(dest), overwrite)
    }

    fn file_entry(&self, path: &AbsolutePath) -> Result<FileEntry> {
        let mut entry = self.base.file_entry(self.resolve(path))?;
        entry.path = path.clone();
        Ok(entry)
    }

    fn set_read_only(&self, path: &AbsolutePath, read_only: bool) -> Result<()> {
        self.base.set_read_only(self.resolve(path), read_only)
    }

    fn enumerate_files(
        &self,
        directory: &AbsolutePath,
        pattern: &str,
        recursive: bool,
    ) -> Result<Vec<AbsolutePath>> {
        let found = self
            .base
            .enumerate_files(self.resolve(directory), pattern, recursive)?;
        Ok(self.rebind(found))
    }

    fn enumerate_directories(
        &self,
        directory: &AbsolutePath,
        pattern: &str,
        recursive: bool,
    ) -> Result<Vec<AbsolutePath>> {
        let found = self
            .base
            .enumerate_directories(self.resolve(directory), pattern, recursive)?;
        Ok(self.rebind(found))
    }

    fn read_dir_names(&self, directory: &AbsolutePath) -> Result<Vec<String>> {
        self.base.read_dir_names(self.resolve(directory))
    }
}
