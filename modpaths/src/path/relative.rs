//! Filesystem-independent partial paths.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::normalize::{self, is_separator};
use super::Extension;
use crate::error::{Error, Result};

/// A sequence of path segments separated by `/` or `\`.
///
/// Both separators are accepted and preserved as written. The text is never
/// validated against illegal characters and is not expected to start with a
/// separator. The empty path is valid and acts as the root of all relative
/// paths.
///
/// Equality, hashing and ordering ignore letter case and treat both
/// separators as the same character.
///
/// # Examples
///
/// ```
/// use modpaths::RelativePath;
///
/// let path = RelativePath::from("Data/Textures/sky.dds");
/// assert_eq!(path.file_name(), "sky.dds");
/// assert_eq!(path.parent(), RelativePath::from("data\\textures"));
/// assert_eq!(path.depth(), 2);
/// assert!(path.in_folder(&RelativePath::from("data")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RelativePath(String);

impl RelativePath {
    /// Creates a relative path from its text.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The empty relative path.
    #[must_use]
    pub const fn empty() -> Self {
        Self(String::new())
    }

    /// The path text as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the path and returns its text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Whether this is the empty path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Text after the last separator, or the whole path if there is none.
    #[must_use]
    pub fn file_name(&self) -> &str {
        match self.0.rfind(is_separator) {
            Some(index) => &self.0[index + 1..],
            None => &self.0,
        }
    }

    /// The file name with its extension removed.
    #[must_use]
    pub fn file_name_without_extension(&self) -> &str {
        let name = self.file_name();
        let ext_len = Extension::from_path(name).as_str().len();
        &name[..name.len() - ext_len]
    }

    /// The extension of the file name.
    #[must_use]
    pub fn extension(&self) -> Extension {
        Extension::from_path(&self.0)
    }

    /// Text before the last separator, or the empty path if there is none.
    #[must_use]
    pub fn parent(&self) -> Self {
        match self.0.rfind(is_separator) {
            Some(index) => Self(self.0[..index].to_string()),
            None => Self::empty(),
        }
    }

    /// The number of separator characters in the path.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.chars().filter(|c| is_separator(*c)).count()
    }

    /// The first segment of the path.
    #[must_use]
    pub fn top_parent(&self) -> Self {
        match self.0.find(is_separator) {
            Some(index) => Self(self.0[..index].to_string()),
            None => self.clone(),
        }
    }

    /// The non-empty segments of the path, in order.
    pub fn parts(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.split(is_separator).filter(|part| !part.is_empty())
    }

    /// Appends `other` using the first separator that occurs in this path.
    ///
    /// The separator is whichever of `/` or `\` is found first scanning this
    /// path from the left, or `\` if it contains neither. Joining with an
    /// empty path on either side returns the other operand unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use modpaths::RelativePath;
    ///
    /// let mixed = RelativePath::from("a/b\\c");
    /// assert_eq!(mixed.join("d").as_str(), "a/b\\c/d");
    ///
    /// let plain = RelativePath::from("a");
    /// assert_eq!(plain.join("b").as_str(), "a\\b");
    /// ```
    #[must_use]
    pub fn join(&self, other: impl AsRef<str>) -> Self {
        let other = other.as_ref();
        if self.is_empty() {
            return Self(other.to_string());
        }
        if other.is_empty() {
            return self.clone();
        }

        let separator = self.0.chars().find(|c| is_separator(*c)).unwrap_or('\\');
        let mut joined = String::with_capacity(self.0.len() + 1 + other.len());
        joined.push_str(&self.0);
        joined.push(separator);
        joined.push_str(other);
        Self(joined)
    }

    /// Whether the path text starts with `prefix`, ignoring case and
    /// separator style. No segment boundary is required.
    #[must_use]
    pub fn starts_with(&self, prefix: &str) -> bool {
        normalize::strip_prefix_len(&self.0, prefix).is_some()
    }

    /// Whether the trailing segments of this path equal `suffix`.
    ///
    /// Matching is whole-segment, so `foobar` does not end with `bar`. Every
    /// path ends with the empty path.
    #[must_use]
    pub fn ends_with(&self, suffix: &Self) -> bool {
        if suffix.is_empty() {
            return true;
        }
        if !normalize::ends_with(&self.0, &suffix.0) {
            return false;
        }
        let suffix_chars = suffix.0.chars().count();
        self.0
            .chars()
            .rev()
            .nth(suffix_chars)
            .map_or(true, is_separator)
    }

    /// Whether the file name starts with `prefix`, ignoring case.
    #[must_use]
    pub fn file_name_starts_with(&self, prefix: &str) -> bool {
        normalize::strip_prefix_len(self.file_name(), prefix).is_some()
    }

    /// Whether the file name ends with `suffix`, ignoring case.
    #[must_use]
    pub fn file_name_ends_with(&self, suffix: &str) -> bool {
        normalize::ends_with(self.file_name(), suffix)
    }

    /// Whether this path is `parent` or lies beneath it.
    ///
    /// Every path is inside the empty path. A longer path must continue with
    /// a separator right after the shared prefix, so `foo/barbaz` is not in
    /// `foo/bar`.
    #[must_use]
    pub fn in_folder(&self, parent: &Self) -> bool {
        self.suffix_after(parent).is_some()
    }

    /// The part of this path below `base`.
    ///
    /// # Errors
    ///
    /// Returns a `Path` error if this path is not inside `base`.
    ///
    /// # Examples
    ///
    /// ```
    /// use modpaths::RelativePath;
    ///
    /// let path = RelativePath::from("Data/Meshes/rock.nif");
    /// let rel = path.relative_to(&RelativePath::from("data")).unwrap();
    /// assert_eq!(rel.as_str(), "Meshes/rock.nif");
    /// ```
    pub fn relative_to(&self, base: &Self) -> Result<Self> {
        self.suffix_after(base)
            .map(|suffix| Self(suffix.to_string()))
            .ok_or_else(|| {
                Error::path(self.0.as_str(), format!("path is not relative to '{base}'"))
            })
    }

    /// Removes the first `count` segments.
    ///
    /// # Errors
    ///
    /// Returns a `Path` error if the path has fewer than `count` segments.
    pub fn drop_first(&self, count: usize) -> Result<Self> {
        if count == 0 {
            return Ok(self.clone());
        }

        let nth_separator = self
            .0
            .char_indices()
            .filter(|(_, c)| is_separator(*c))
            .nth(count - 1);

        match nth_separator {
            Some((index, _)) => Ok(Self(self.0[index + 1..].to_string())),
            None if !self.is_empty() && self.depth() + 1 == count => Ok(Self::empty()),
            None => Err(Error::path(
                self.0.as_str(),
                format!("cannot drop {count} segments"),
            )),
        }
    }

    /// Appends `extension` to the path.
    #[must_use]
    pub fn with_extension(&self, extension: &Extension) -> Self {
        Self(format!("{}{}", self.0, extension))
    }

    /// Replaces the current extension with `extension`.
    #[must_use]
    pub fn replace_extension(&self, extension: &Extension) -> Self {
        let current = self.extension();
        let stem = &self.0[..self.0.len() - current.as_str().len()];
        Self(format!("{stem}{extension}"))
    }

    /// Returns the text of this path below `base`, honoring segment
    /// boundaries.
    fn suffix_after(&self, base: &Self) -> Option<&str> {
        if base.is_empty() {
            return Some(&self.0);
        }

        let matched = normalize::strip_prefix_len(&self.0, &base.0)?;
        let rest = &self.0[matched..];
        if rest.is_empty() || base.0.ends_with(is_separator) {
            Some(rest)
        } else {
            rest.strip_prefix(is_separator)
        }
    }
}

impl PartialEq for RelativePath {
    fn eq(&self, other: &Self) -> bool {
        normalize::eq(&self.0, &other.0)
    }
}

impl Eq for RelativePath {}

impl Hash for RelativePath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        normalize::hash(&self.0, state);
    }
}

impl PartialOrd for RelativePath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RelativePath {
    fn cmp(&self, other: &Self) -> Ordering {
        normalize::cmp(&self.0, &other.0)
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RelativePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RelativePath {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RelativePath {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Serialize for RelativePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RelativePath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self)
    }
}
