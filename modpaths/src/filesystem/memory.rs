//! In-memory filesystem.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

use super::{
    FileAccess, FileEntry, FileMode, FileStream, FileSystem, FileSystemRef, KnownPath,
    NamePattern, RetryPolicy,
};
use crate::error::{Error, Result};
use crate::path::{AbsolutePath, PathFormat};
use crate::units::Size;

#[derive(Debug, Clone)]
struct MemoryFile {
    contents: Vec<u8>,
    last_write_time: DateTime<Utc>,
    read_only: bool,
}

impl MemoryFile {
    fn new(contents: Vec<u8>) -> Self {
        Self {
            contents,
            last_write_time: Utc::now(),
            read_only: false,
        }
    }
}

/// Entries keyed by their full path text.
#[derive(Debug, Default)]
struct MemoryState {
    files: BTreeMap<String, MemoryFile>,
    directories: BTreeSet<String>,
    known: HashMap<KnownPath, String>,
}

fn default_known_paths(format: PathFormat) -> HashMap<KnownPath, String> {
    let entries = match format {
        PathFormat::Unix => [
            (KnownPath::TempDirectory, "/tmp"),
            (KnownPath::HomeDirectory, "/home/user"),
            (KnownPath::LocalApplicationDataDirectory, "/home/user/.local/share"),
            (KnownPath::CurrentDirectory, "/"),
        ],
        PathFormat::Windows => [
            (KnownPath::TempDirectory, r"C:\Users\user\AppData\Local\Temp"),
            (KnownPath::HomeDirectory, r"C:\Users\user"),
            (KnownPath::LocalApplicationDataDirectory, r"C:\Users\user\AppData\Local"),
            (KnownPath::CurrentDirectory, r"C:\"),
        ],
    };
    entries
        .into_iter()
        .map(|(known, path)| (known, path.to_string()))
        .collect()
}

/// A filesystem held entirely in memory.
///
/// Clones share the same tree. The path format is chosen at construction so
/// Windows paths can be exercised on any host. Root directories always
/// exist; every other directory must be created before files are placed in
/// it, except through [`InMemoryFileSystem::add_file`] which creates missing
/// ancestors.
///
/// Known paths start at fixed per-format locations (`/tmp` and `/home/user`
/// for Unix, `C:\Users\user` and its `AppData` folders for Windows) and
/// can be replaced with [`InMemoryFileSystem::set_known_path`].
///
/// # Examples
///
/// ```
/// use modpaths::{FileSystem, InMemoryFileSystem, PathFormat};
///
/// let fs = InMemoryFileSystem::new(PathFormat::Windows);
/// let save = fs.from_full_path("C:\\Saves\\slot1.ess");
/// fs.add_file(&save, vec![1, 2, 3]).unwrap();
///
/// assert!(save.file_exists());
/// assert!(save.parent().directory_exists());
/// assert_eq!(save.read_all_bytes().unwrap(), vec![1, 2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryFileSystem {
    format: PathFormat,
    retry: RetryPolicy,
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryFileSystem {
    /// Creates an empty filesystem using `format`.
    ///
    /// Retries are disabled since nothing else can contend for entries.
    #[must_use]
    pub fn new(format: PathFormat) -> Self {
        Self {
            format,
            retry: RetryPolicy::immediate(),
            state: Arc::new(RwLock::new(MemoryState {
                known: default_known_paths(format),
                ..MemoryState::default()
            })),
        }
    }

    /// Points `known` at `path` for this filesystem and its clones.
    ///
    /// # Errors
    ///
    /// Returns a `Path` error if `path` is not rooted.
    pub fn set_known_path(&self, known: KnownPath, path: &AbsolutePath) -> Result<()> {
        let key = self.key(path)?;
        self.write().known.insert(known, key);
        Ok(())
    }

    /// Adds a file with `contents`, creating missing parent directories.
    ///
    /// # Errors
    ///
    /// Returns a `Path` error if `path` is not rooted.
    pub fn add_file(&self, path: &AbsolutePath, contents: impl Into<Vec<u8>>) -> Result<()> {
        let key = self.key(path)?;
        let mut state = self.write();
        self.insert_ancestors(&mut state, &key);
        state.files.insert(key, MemoryFile::new(contents.into()));
        Ok(())
    }

    /// Adds a directory and its missing ancestors.
    ///
    /// # Errors
    ///
    /// Returns a `Path` error if `path` is not rooted.
    pub fn add_directory(&self, path: &AbsolutePath) -> Result<()> {
        let key = self.key(path)?;
        let mut state = self.write();
        self.insert_ancestors(&mut state, &key);
        state.directories.insert(key);
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, MemoryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, MemoryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn key(&self, path: &AbsolutePath) -> Result<String> {
        let full = path.full_path();
        if self.format.root_length(&full) == 0 {
            return Err(Error::path(full, "path is not rooted"));
        }
        Ok(full)
    }

    fn parent_key<'a>(&self, key: &'a str) -> Option<&'a str> {
        if self.format.is_root(key) {
            return None;
        }
        self.format.split(key).0
    }

    fn parent_exists(&self, state: &MemoryState, key: &str) -> bool {
        self.parent_key(key).map_or(true, |parent| {
            self.format.is_root(parent) || state.directories.contains(parent)
        })
    }

    fn insert_ancestors(&self, state: &mut MemoryState, key: &str) {
        let mut current = self.parent_key(key);
        while let Some(directory) = current {
            if self.format.is_root(directory) {
                break;
            }
            state.directories.insert(directory.to_string());
            current = self.parent_key(directory);
        }
    }

    fn dir_exists(&self, state: &MemoryState, key: &str) -> bool {
        self.format.is_root(key) || state.directories.contains(key)
    }

    /// Whether `key` lies strictly below `directory`.
    fn is_below(&self, key: &str, directory: &str) -> bool {
        key.len() > directory.len()
            && key.starts_with(directory)
            && (self.format.is_root(directory)
                || key[directory.len()..].starts_with(|c| self.format.is_separator(c)))
    }

    fn is_direct_child(&self, key: &str, directory: &str) -> bool {
        self.parent_key(key) == Some(directory)
    }

    fn enumerate(
        &self,
        directory: &AbsolutePath,
        pattern: &str,
        recursive: bool,
        want_dirs: bool,
    ) -> Result<Vec<AbsolutePath>> {
        let pattern = NamePattern::new(pattern)?;
        let dir = self.key(directory)?;
        let state = self.read();
        if !self.dir_exists(&state, &dir) {
            return Ok(Vec::new());
        }

        let keys: Vec<&String> = if want_dirs {
            state.directories.iter().collect()
        } else {
            state.files.keys().collect()
        };

        let handle = self.handle();
        Ok(keys
            .into_iter()
            .filter(|key| {
                if recursive {
                    self.is_below(key, &dir)
                } else {
                    self.is_direct_child(key, &dir)
                }
            })
            .filter(|key| pattern.matches(self.format.split(key).1))
            .map(|key| AbsolutePath::from_full_path(key, handle.clone()))
            .collect())
    }
}

impl FileSystem for InMemoryFileSystem {
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
        let full = self.read().known.get(&known).cloned().ok_or_else(|| {
            Error::KnownPathUnavailable {
                known: known.to_string(),
                reason: "no location configured".to_string(),
            }
        })?;
        Ok(AbsolutePath::from_full_path(&full, self.handle()))
    }

    fn open_file(
        &self,
        path: &AbsolutePath,
        mode: FileMode,
        access: FileAccess,
    ) -> Result<Box<dyn FileStream>> {
        let key = self.key(path)?;
        let mut state = self.write();

        if state.directories.contains(&key) {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{key} is a directory"),
            )));
        }

        let existing = state.files.get(&key);
        match (existing, mode) {
            (Some(_), FileMode::CreateNew) => {
                return Err(Error::AlreadyExists { path: key });
            }
            (Some(file), _) if file.read_only && access.can_write() => {
                return Err(Error::Io(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    format!("{key} is read-only"),
                )));
            }
            (None, mode) if !mode.creates() => {
                return Err(Error::FileNotFound { path: key });
            }
            (None, _) if !self.parent_exists(&state, &key) => {
                let parent = self.parent_key(&key).unwrap_or_default().to_string();
                return Err(Error::DirectoryNotFound { path: parent });
            }
            _ => {}
        }

        let contents = match state.files.get(&key) {
            Some(file) if !mode.truncates() => file.contents.clone(),
            _ => Vec::new(),
        };
        if access.can_write() && (mode.truncates() || !state.files.contains_key(&key)) {
            state
                .files
                .insert(key.clone(), MemoryFile::new(contents.clone()));
        }
        drop(state);

        let mut cursor = Cursor::new(contents);
        if mode == FileMode::Append {
            cursor.seek(SeekFrom::End(0))?;
        }

        Ok(Box::new(MemoryStream {
            cursor,
            key,
            access,
            dirty: false,
            state: Arc::clone(&self.state),
        }))
    }

    fn file_exists(&self, path: &AbsolutePath) -> bool {
        self.read().files.contains_key(&path.full_path())
    }

    fn directory_exists(&self, path: &AbsolutePath) -> bool {
        let key = path.full_path();
        self.dir_exists(&self.read(), &key)
    }

    fn create_directory(&self, path: &AbsolutePath) -> Result<()> {
        let key = self.key(path)?;
        if self.read().files.contains_key(&key) {
            return Err(Error::AlreadyExists { path: key });
        }
        self.add_directory(path)
    }

    fn delete_file(&self, path: &AbsolutePath) -> Result<()> {
        let key = self.key(path)?;
        if self.dir_exists(&self.read(), &key) {
            return self.delete_directory(path, true);
        }

        let mut state = self.write();
        if let Some(file) = state.files.get_mut(&key) {
            if file.read_only {
                log::debug!("Clearing read-only flag to delete {key}");
                file.read_only = false;
            }
        }
        state.files.remove(&key);
        Ok(())
    }

    fn delete_directory(&self, path: &AbsolutePath, recursive: bool) -> Result<()> {
        let key = self.key(path)?;
        let mut state = self.write();
        if !state.directories.contains(&key) && !self.format.is_root(&key) {
            return Ok(());
        }

        let has_entries = state.files.keys().any(|k| self.is_below(k, &key))
            || state.directories.iter().any(|k| self.is_below(k, &key));
        if has_entries && !recursive {
            return Err(Error::DirectoryNotEmpty { path: key });
        }

        state.files.retain(|k, _| !self.is_below(k, &key));
        state.directories.retain(|k| k != &key && !self.is_below(k, &key));
        Ok(())
    }

    fn move_file(
        &self,
        source: &AbsolutePath,
        dest: &AbsolutePath,
        overwrite: bool,
    ) -> Result<()> {
        let from = self.key(source)?;
        let to = self.key(dest)?;
        let mut state = self.write();

        let is_directory = state.directories.contains(&from);
        if !is_directory && !state.files.contains_key(&from) {
            return Err(Error::FileNotFound { path: from });
        }
        let dest_exists = state.files.contains_key(&to) || self.dir_exists(&state, &to);
        if dest_exists && (!overwrite || is_directory) {
            return Err(Error::AlreadyExists { path: to });
        }
        if !self.parent_exists(&state, &to) {
            let parent = self.parent_key(&to).unwrap_or_default().to_string();
            return Err(Error::DirectoryNotFound { path: parent });
        }

        if !is_directory {
            if let Some(file) = state.files.remove(&from) {
                state.files.insert(to, file);
            }
            return Ok(());
        }

        if self.is_below(&to, &from) {
            return Err(Error::path(to, "cannot move a directory below itself"));
        }
        let rename = |key: &str| format!("{to}{}", &key[from.len()..]);

        let directories: Vec<String> = state
            .directories
            .iter()
            .filter(|key| **key == from || self.is_below(key, &from))
            .cloned()
            .collect();
        for key in directories {
            state.directories.remove(&key);
            state.directories.insert(rename(&key));
        }

        let files: Vec<String> = state
            .files
            .keys()
            .filter(|key| self.is_below(key, &from))
            .cloned()
            .collect();
        for key in files {
            if let Some(file) = state.files.remove(&key) {
                state.files.insert(rename(&key), file);
            }
        }
        log::trace!("Moved directory {from} to {to}");
        Ok(())
    }

    fn file_entry(&self, path: &AbsolutePath) -> Result<FileEntry> {
        let key = path.full_path();
        let state = self.read();
        let file = state
            .files
            .get(&key)
            .ok_or(Error::FileNotFound { path: key.clone() })?;
        Ok(FileEntry {
            path: path.clone(),
            size: Size::from_bytes(file.contents.len() as u64),
            last_write_time: file.last_write_time,
            is_read_only: file.read_only,
        })
    }

    fn set_read_only(&self, path: &AbsolutePath, read_only: bool) -> Result<()> {
        let key = path.full_path();
        let mut state = self.write();
        match state.files.get_mut(&key) {
            Some(file) => {
                file.read_only = read_only;
                Ok(())
            }
            None => Err(Error::FileNotFound { path: key }),
        }
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
        let dir = self.key(directory)?;
        let state = self.read();
        if !self.dir_exists(&state, &dir) {
            return Err(Error::DirectoryNotFound { path: dir });
        }

        let mut names: Vec<String> = state
            .files
            .keys()
            .chain(state.directories.iter())
            .filter(|key| self.is_direct_child(key, &dir))
            .map(|key| self.format.split(key).1.to_string())
            .collect();
        names.sort();
        Ok(names)
    }
}

/// Stream over a snapshot of an in-memory file.
///
/// Writes are buffered and published to the shared tree on flush and on
/// drop.
struct MemoryStream {
    cursor: Cursor<Vec<u8>>,
    key: String,
    access: FileAccess,
    dirty: bool,
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStream {
    fn commit(&mut self) {
        if !self.dirty {
            return;
        }
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let read_only = state.files.get(&self.key).is_some_and(|f| f.read_only);
        let mut file = MemoryFile::new(self.cursor.get_ref().clone());
        file.read_only = read_only;
        state.files.insert(self.key.clone(), file);
        self.dirty = false;
    }
}

impl Read for MemoryStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if !self.access.can_read() {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "stream not opened for reading",
            ));
        }
        self.cursor.read(buf)
    }
}

impl Write for MemoryStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.access.can_write() {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "stream not opened for writing",
            ));
        }
        self.dirty = true;
        self.cursor.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.commit();
        Ok(())
    }
}

impl Seek for MemoryStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.cursor.seek(pos)
    }
}

impl Drop for MemoryStream {
    fn drop(&mut self) {
        self.commit();
    }
}
