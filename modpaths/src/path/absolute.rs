//! Rooted paths bound to a filesystem.
//!
//! An [`AbsolutePath`] stores a full path split into its directory and final
//! component, together with the [`FileSystem`](crate::FileSystem) it belongs
//! to. The filesystem decides the [`PathFormat`] used for parsing and for
//! formatting the full path, and services every I/O helper on the path.
//!
//! Three equivalent ways of producing the full path exist so that hot loops
//! can avoid allocating: [`AbsolutePath::full_path`] returns a `String`,
//! [`AbsolutePath::full_path_len`] reports its length, and
//! [`AbsolutePath::write_full_path`] writes it into a caller-supplied buffer.
//! All three produce the same bytes.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::de::DeserializeSeed;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::normalize::{self, is_separator};
use super::{Extension, PathFormat, RelativePath};
use crate::error::{Error, Result};
use crate::filesystem::FileSystemRef;

/// A full, rooted path split into directory and file name.
///
/// Equality and hashing compare the directory and file name ordinally and
/// ignore the owning filesystem, so paths from different filesystems with
/// the same text are equal. Ordering compares full paths ignoring case and
/// separator style.
///
/// # Examples
///
/// ```
/// use modpaths::{FileSystem, InMemoryFileSystem, PathFormat};
///
/// let fs = InMemoryFileSystem::new(PathFormat::Unix);
/// let path = fs.from_full_path("/home/user/file.txt");
/// assert_eq!(path.directory(), Some("/home/user"));
/// assert_eq!(path.file_name(), "file.txt");
/// assert_eq!(path.full_path(), "/home/user/file.txt");
/// ```
#[derive(Clone)]
pub struct AbsolutePath {
    directory: Option<String>,
    file_name: String,
    fs: FileSystemRef,
}

/// The pieces a full path is formatted from.
struct FullPathParts<'a> {
    directory: &'a str,
    separator: Option<char>,
    file_name: &'a str,
}

impl FullPathParts<'_> {
    fn len(&self) -> usize {
        self.directory.len() + self.separator.map_or(0, char::len_utf8) + self.file_name.len()
    }

    fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.directory
            .chars()
            .chain(self.separator)
            .chain(self.file_name.chars())
    }
}

impl AbsolutePath {
    /// Parses a full path using the format of `fs`.
    ///
    /// Trailing separators beyond the root are dropped and separators are
    /// rewritten to the native one, so `C:/a/b` and `C:\a\b` parse to the
    /// same value. Parsing never fails; an unrooted string yields a path
    /// without a directory.
    #[must_use]
    pub fn from_full_path(full_path: &str, fs: FileSystemRef) -> Self {
        let format = fs.path_format();
        let canonical = format.canonical_separators(full_path);
        let (directory, file_name) = format.split(&canonical);
        Self {
            directory: directory.map(str::to_string),
            file_name: file_name.to_string(),
            fs,
        }
    }

    /// Builds a path from a directory and a file name in that directory.
    #[must_use]
    pub fn from_directory_and_file_name(directory: &str, file_name: &str, fs: FileSystemRef) -> Self {
        let format = fs.path_format();
        let directory = format.canonical_separators(directory);
        let root = format.root_length(&directory);
        let directory = format.trim_trailing_separators(&directory, root);
        Self {
            directory: (!directory.is_empty()).then(|| directory.to_string()),
            file_name: file_name.to_string(),
            fs,
        }
    }

    /// The directory part, or `None` for an unrooted single component.
    #[must_use]
    pub fn directory(&self) -> Option<&str> {
        self.directory.as_deref()
    }

    /// The final path component. Empty for a root such as `/`.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The file name with its extension removed.
    #[must_use]
    pub fn file_name_without_extension(&self) -> &str {
        let ext_len = self.extension().as_str().len();
        &self.file_name[..self.file_name.len() - ext_len]
    }

    /// The extension of the file name.
    #[must_use]
    pub fn extension(&self) -> Extension {
        Extension::from_path(&self.file_name)
    }

    /// The filesystem this path belongs to.
    #[must_use]
    pub fn file_system(&self) -> &FileSystemRef {
        &self.fs
    }

    /// The same path bound to another filesystem.
    #[must_use]
    pub fn with_file_system(&self, fs: FileSystemRef) -> Self {
        Self {
            directory: self.directory.clone(),
            file_name: self.file_name.clone(),
            fs,
        }
    }

    /// The path format of the owning filesystem.
    #[must_use]
    pub fn path_format(&self) -> PathFormat {
        self.fs.path_format()
    }

    fn parts(&self) -> FullPathParts<'_> {
        let format = self.path_format();
        match &self.directory {
            None => FullPathParts {
                directory: "",
                separator: None,
                file_name: &self.file_name,
            },
            Some(directory) if self.file_name.is_empty() || format.is_root(directory) => {
                FullPathParts {
                    directory,
                    separator: None,
                    file_name: &self.file_name,
                }
            }
            Some(directory) => FullPathParts {
                directory,
                separator: Some(format.separator()),
                file_name: &self.file_name,
            },
        }
    }

    /// The full path as a string.
    #[must_use]
    pub fn full_path(&self) -> String {
        let parts = self.parts();
        let mut full = String::with_capacity(parts.len());
        full.push_str(parts.directory);
        if let Some(separator) = parts.separator {
            full.push(separator);
        }
        full.push_str(parts.file_name);
        full
    }

    /// The length in bytes of [`full_path`](Self::full_path).
    #[must_use]
    pub fn full_path_len(&self) -> usize {
        self.parts().len()
    }

    /// Writes the full path into `buffer` as UTF-8.
    ///
    /// Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns `BufferTooSmall` without touching `buffer` if it is shorter
    /// than [`full_path_len`](Self::full_path_len).
    ///
    /// # Examples
    ///
    /// ```
    /// use modpaths::{FileSystem, InMemoryFileSystem, PathFormat};
    ///
    /// let fs = InMemoryFileSystem::new(PathFormat::Unix);
    /// let path = fs.from_full_path("/srv/data");
    ///
    /// let mut buffer = [0u8; 64];
    /// let written = path.write_full_path(&mut buffer).unwrap();
    /// assert_eq!(&buffer[..written], b"/srv/data");
    /// ```
    pub fn write_full_path(&self, buffer: &mut [u8]) -> Result<usize> {
        let parts = self.parts();
        let required = parts.len();
        if buffer.len() < required {
            return Err(Error::BufferTooSmall {
                required,
                actual: buffer.len(),
            });
        }

        let mut offset = 0;
        buffer[..parts.directory.len()].copy_from_slice(parts.directory.as_bytes());
        offset += parts.directory.len();
        if let Some(separator) = parts.separator {
            offset += separator.encode_utf8(&mut buffer[offset..]).len();
        }
        buffer[offset..required].copy_from_slice(parts.file_name.as_bytes());
        Ok(required)
    }

    /// The containing directory. A root is its own parent.
    #[must_use]
    pub fn parent(&self) -> Self {
        match &self.directory {
            Some(directory) if !self.file_name.is_empty() => {
                Self::from_full_path(directory, self.fs.clone())
            }
            _ => self.clone(),
        }
    }

    /// The root this path starts from, such as `/` or `C:\`.
    ///
    /// Unrooted paths return themselves.
    #[must_use]
    pub fn top_parent(&self) -> Self {
        let full = self.full_path();
        let root = self.path_format().root_length(&full);
        if root == 0 {
            self.clone()
        } else {
            Self::from_full_path(&full[..root], self.fs.clone())
        }
    }

    /// This path followed by each of its ancestors up to the root.
    #[must_use]
    pub fn this_and_all_parents(&self) -> Vec<Self> {
        let mut paths = vec![self.clone()];
        loop {
            let Some(current) = paths.last() else { break };
            let parent = current.parent();
            if parent == *current {
                break;
            }
            paths.push(parent);
        }
        paths
    }

    /// The number of components below the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        let format = self.path_format();
        let full = self.full_path();
        let root = format.root_length(&full);
        full[root..]
            .split(|c| format.is_separator(c))
            .filter(|part| !part.is_empty())
            .count()
    }

    /// Appends `extension` to the file name.
    #[must_use]
    pub fn with_extension(&self, extension: &Extension) -> Self {
        self.with_file_name(format!("{}{}", self.file_name, extension))
    }

    /// Replaces the extension of the file name.
    #[must_use]
    pub fn replace_extension(&self, extension: &Extension) -> Self {
        self.with_file_name(format!("{}{}", self.file_name_without_extension(), extension))
    }

    /// Inserts `suffix` between the file stem and its extension.
    #[must_use]
    pub fn append_to_name(&self, suffix: &str) -> Self {
        self.with_file_name(format!(
            "{}{}{}",
            self.file_name_without_extension(),
            suffix,
            self.extension()
        ))
    }

    fn with_file_name(&self, file_name: String) -> Self {
        Self {
            directory: self.directory.clone(),
            file_name,
            fs: self.fs.clone(),
        }
    }

    /// Converts separators in `relative` to this path's native separator
    /// and drops one leading separator.
    fn native_relative(&self, relative: &RelativePath) -> String {
        let separator = self.path_format().separator();
        let native: String = relative
            .as_str()
            .chars()
            .map(|c| if is_separator(c) { separator } else { c })
            .collect();
        match native.strip_prefix(separator) {
            Some(stripped) => stripped.to_string(),
            None => native,
        }
    }

    /// Joins `relative` onto this path as written.
    ///
    /// Separators in `relative` are converted to the native separator and a
    /// single leading separator is ignored. No lookups are performed, so the
    /// casing of `relative` is kept verbatim.
    ///
    /// # Examples
    ///
    /// ```
    /// use modpaths::{FileSystem, InMemoryFileSystem, PathFormat, RelativePath};
    ///
    /// let fs = InMemoryFileSystem::new(PathFormat::Windows);
    /// let base = fs.from_full_path("C:\\Games");
    /// let joined = base.combine_unchecked(&RelativePath::from("Skyrim/Data"));
    /// assert_eq!(joined.full_path(), "C:\\Games\\Skyrim\\Data");
    /// ```
    #[must_use]
    pub fn combine_unchecked(&self, relative: &RelativePath) -> Self {
        let tail = self.native_relative(relative);
        if tail.is_empty() {
            return self.clone();
        }

        let format = self.path_format();
        let mut full = self.full_path();
        if !full.is_empty() && !full.ends_with(|c| format.is_separator(c)) {
            full.push(format.separator());
        }
        full.push_str(&tail);
        Self::from_full_path(&full, self.fs.clone())
    }

    /// Joins `relative` onto this path, correcting each segment's case to
    /// match the entries that already exist on the filesystem.
    ///
    /// An entry spelled exactly like the segment wins over entries that only
    /// match ignoring case. Segments that cannot be looked up, because the
    /// directory is missing or unreadable, keep the casing given in
    /// `relative`.
    #[must_use]
    pub fn combine_checked(&self, relative: &RelativePath) -> Self {
        let tail = self.native_relative(relative);
        let separator = self.path_format().separator();
        let mut current = self.clone();

        for segment in tail.split(separator).filter(|s| !s.is_empty()) {
            let name = match self.fs.read_dir_names(&current) {
                Ok(names) if names.iter().any(|name| name == segment) => segment.to_string(),
                Ok(names) => names
                    .into_iter()
                    .find(|name| normalize::eq(name, segment))
                    .unwrap_or_else(|| segment.to_string()),
                Err(e) => {
                    log::debug!("Keeping literal case for '{segment}' under '{current}': {e}");
                    segment.to_string()
                }
            };
            current = Self::from_directory_and_file_name(
                &current.full_path(),
                &name,
                self.fs.clone(),
            );
        }

        current
    }

    /// The path of `self` below `base`, or `None` if it is not inside it.
    fn suffix_after(&self, base: &Self) -> Option<RelativePath> {
        let full = self.full_path();
        let base_full = base.full_path();
        let matched = normalize::strip_prefix_len(&full, &base_full)?;
        let rest = &full[matched..];
        let format = self.path_format();

        if rest.is_empty() || base_full.ends_with(|c| format.is_separator(c)) {
            Some(RelativePath::new(rest))
        } else {
            rest.strip_prefix(|c| format.is_separator(c))
                .map(RelativePath::new)
        }
    }

    /// The relative path leading from `base` to this path.
    ///
    /// # Errors
    ///
    /// Returns a `Path` error if this path is not `base` or inside it.
    pub fn relative_to(&self, base: &Self) -> Result<RelativePath> {
        self.suffix_after(base).ok_or_else(|| {
            Error::path(self.full_path(), format!("path is not relative to '{base}'"))
        })
    }

    /// Whether this path is `parent` or lies beneath it.
    ///
    /// Comparison ignores case and separator style and respects segment
    /// boundaries, so `/foo/barbaz` is not in `/foo/bar`.
    #[must_use]
    pub fn in_folder(&self, parent: &Self) -> bool {
        self.suffix_after(parent).is_some()
    }
}

impl PartialEq for AbsolutePath {
    fn eq(&self, other: &Self) -> bool {
        self.directory == other.directory && self.file_name == other.file_name
    }
}

impl Eq for AbsolutePath {}

impl Hash for AbsolutePath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.directory.hash(state);
        self.file_name.hash(state);
    }
}

impl PartialOrd for AbsolutePath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AbsolutePath {
    fn cmp(&self, other: &Self) -> Ordering {
        let (ours, theirs) = (self.parts(), other.parts());
        ours.chars()
            .map(normalize::fold)
            .cmp(theirs.chars().map(normalize::fold))
            .then_with(|| self.directory.cmp(&other.directory))
            .then_with(|| self.file_name.cmp(&other.file_name))
    }
}

impl fmt::Display for AbsolutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = self.parts();
        f.write_str(parts.directory)?;
        if let Some(separator) = parts.separator {
            fmt::Write::write_char(f, separator)?;
        }
        f.write_str(parts.file_name)
    }
}

impl fmt::Debug for AbsolutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AbsolutePath")
            .field("directory", &self.directory)
            .field("file_name", &self.file_name)
            .field("format", &self.path_format())
            .finish()
    }
}

impl Serialize for AbsolutePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Deserializes an [`AbsolutePath`] from its full path string.
///
/// The filesystem to bind the path to cannot be carried in the serialized
/// form, so it is supplied through this seed.
#[derive(Clone)]
pub struct AbsolutePathSeed(pub FileSystemRef);

impl<'de> DeserializeSeed<'de> for AbsolutePathSeed {
    type Value = AbsolutePath;

    fn deserialize<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> std::result::Result<Self::Value, D::Error> {
        let full_path = String::deserialize(deserializer)?;
        Ok(AbsolutePath::from_full_path(&full_path, self.0))
    }
}
