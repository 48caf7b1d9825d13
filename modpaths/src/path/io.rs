//! I/O helpers on [`AbsolutePath`].
//!
//! Every helper delegates to the filesystem the path belongs to.

use std::io::{self, Read, Write};

use super::AbsolutePath;
use crate::error::{Error, Result};
use crate::filesystem::{FileAccess, FileEntry, FileMode, FileStream, RetryPolicy};
use crate::units::Size;

impl AbsolutePath {
    /// Opens a stream over this file.
    ///
    /// # Errors
    ///
    /// See [`FileSystem::open_file`](crate::FileSystem::open_file).
    pub fn open(&self, mode: FileMode, access: FileAccess) -> Result<Box<dyn FileStream>> {
        self.file_system().open_file(self, mode, access)
    }

    /// Opens this file for reading.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if the file does not exist.
    pub fn read(&self) -> Result<Box<dyn FileStream>> {
        self.file_system().read_file(self)
    }

    /// Creates or truncates this file.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryNotFound` if the parent directory is missing.
    pub fn create(&self) -> Result<Box<dyn FileStream>> {
        self.file_system().create_file(self)
    }

    /// Reads the whole file.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if the file does not exist.
    pub fn read_all_bytes(&self) -> Result<Vec<u8>> {
        let mut contents = Vec::new();
        self.read()?.read_to_end(&mut contents)?;
        Ok(contents)
    }

    /// Reads the whole file as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if the file does not exist, or an I/O error of
    /// kind `InvalidData` if it is not valid UTF-8.
    pub fn read_all_text(&self) -> Result<String> {
        String::from_utf8(self.read_all_bytes()?)
            .map_err(|e| Error::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }

    /// Replaces the file's contents with `contents`.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryNotFound` if the parent directory is missing.
    pub fn write_all_bytes(&self, contents: &[u8]) -> Result<()> {
        let mut stream = self.create()?;
        stream.write_all(contents)?;
        stream.flush()?;
        Ok(())
    }

    /// Replaces the file's contents with `text`.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryNotFound` if the parent directory is missing.
    pub fn write_all_text(&self, text: &str) -> Result<()> {
        self.write_all_bytes(text.as_bytes())
    }

    /// Writes `lines` to the file, each followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryNotFound` if the parent directory is missing.
    pub fn write_all_lines<I, S>(&self, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut stream = self.create()?;
        for line in lines {
            stream.write_all(line.as_ref().as_bytes())?;
            stream.write_all(b"\n")?;
        }
        stream.flush()?;
        Ok(())
    }

    /// Replaces the file's contents with everything read from `reader`.
    ///
    /// Returns the number of bytes copied.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or `reader` fails.
    pub fn copy_from_reader(&self, reader: &mut dyn Read) -> Result<Size> {
        let mut stream = self.create()?;
        let copied = io::copy(reader, &mut stream)?;
        stream.flush()?;
        Ok(Size::from_bytes(copied))
    }

    /// Whether a file exists at this path.
    #[must_use]
    pub fn file_exists(&self) -> bool {
        self.file_system().file_exists(self)
    }

    /// Whether a directory exists at this path.
    #[must_use]
    pub fn directory_exists(&self) -> bool {
        self.file_system().directory_exists(self)
    }

    /// Creates this directory and any missing ancestors.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn create_directory(&self) -> Result<()> {
        self.file_system().create_directory(self)
    }

    /// Deletes the file or directory tree at this path.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry exists but cannot be removed.
    pub fn delete(&self) -> Result<()> {
        self.file_system().delete_file(self)
    }

    /// Deletes this directory.
    ///
    /// # Errors
    ///
    /// See [`FileSystem::delete_directory`](crate::FileSystem::delete_directory).
    pub fn delete_directory(&self, recursive: bool) -> Result<()> {
        self.file_system().delete_directory(self, recursive)
    }

    /// Reads this file's metadata.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if the file does not exist.
    pub fn file_entry(&self) -> Result<FileEntry> {
        self.file_system().file_entry(self)
    }

    /// The size of this file.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if the file does not exist.
    pub fn size(&self) -> Result<Size> {
        Ok(self.file_entry()?.size)
    }

    /// Sets or clears this file's read-only attribute.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if the file does not exist.
    pub fn set_read_only(&self, read_only: bool) -> Result<()> {
        self.file_system().set_read_only(self, read_only)
    }

    /// Files below this directory whose names match `pattern`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPattern` for a malformed pattern.
    pub fn enumerate_files(&self, pattern: &str, recursive: bool) -> Result<Vec<Self>> {
        self.file_system().enumerate_files(self, pattern, recursive)
    }

    /// Directories below this directory whose names match `pattern`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPattern` for a malformed pattern.
    pub fn enumerate_directories(&self, pattern: &str, recursive: bool) -> Result<Vec<Self>> {
        self.file_system()
            .enumerate_directories(self, pattern, recursive)
    }

    /// Moves this file to `dest`.
    ///
    /// A read-only source is made writable first, as is a read-only
    /// destination that is about to be overwritten. Failed attempts are retried according to the filesystem's
    /// [`RetryPolicy`]; once retries run out the last error is returned.
    ///
    /// # Errors
    ///
    /// Returns the error of the final attempt.
    pub fn move_to(&self, dest: &Self, overwrite: bool) -> Result<()> {
        let fs = self.file_system();
        if fs.file_exists(self) {
            fs.set_read_only(self, false)?;
        }
        if overwrite && fs.file_exists(dest) {
            fs.set_read_only(dest, false)?;
        }

        let policy = fs.retry_policy();
        let what = format!("Moving {self} to {dest}");
        RetryPolicy::retry(
            policy.move_retries.saturating_add(1),
            policy.move_delay,
            &what,
            || fs.move_file(self, dest, overwrite),
        )
    }

    /// Copies this file, or this directory tree, to `dest`.
    ///
    /// The destination may live on another filesystem. Existing destination
    /// files are overwritten.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if nothing exists at this path.
    pub fn copy_to(&self, dest: &Self) -> Result<()> {
        if self.directory_exists() {
            dest.create_directory()?;
            for directory in self.enumerate_directories("*", true)? {
                dest.combine_unchecked(&directory.relative_to(self)?)
                    .create_directory()?;
            }
            for file in self.enumerate_files("*", true)? {
                file.copy_file_to(&dest.combine_unchecked(&file.relative_to(self)?))?;
            }
            return Ok(());
        }
        self.copy_file_to(dest)
    }

    fn copy_file_to(&self, dest: &Self) -> Result<()> {
        let mut source = self.read()?;
        let copied = dest.copy_from_reader(&mut source)?;
        log::trace!("Copied {copied} from {self} to {dest}");
        Ok(())
    }
}
