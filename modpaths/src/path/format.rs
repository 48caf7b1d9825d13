//! Platform path conventions.
//!
//! A [`PathFormat`] decides how a full path string is rooted and which
//! character joins its components. Every filesystem reports the format it
//! speaks so that Windows semantics can be exercised on any host through
//! an in-memory filesystem.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Root and separator rules for full path strings.
///
/// # Examples
///
/// ```
/// use modpaths::PathFormat;
///
/// assert_eq!(PathFormat::Unix.root_length("/home/user"), 1);
/// assert_eq!(PathFormat::Windows.root_length("C:\\Users"), 3);
/// assert_eq!(PathFormat::Windows.root_length("relative\\path"), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathFormat {
    /// POSIX single-root paths joined with `/`.
    Unix,
    /// Drive-letter rooted paths joined with `\`.
    Windows,
}

impl PathFormat {
    /// The format of the running operating system.
    ///
    /// # Errors
    ///
    /// Returns `PlatformNotSupported` on targets that are neither Windows
    /// nor Unix-like.
    pub fn current() -> Result<Self> {
        if cfg!(windows) {
            Ok(Self::Windows)
        } else if cfg!(unix) {
            Ok(Self::Unix)
        } else {
            Err(Error::PlatformNotSupported {
                os: std::env::consts::OS.to_string(),
            })
        }
    }

    /// The separator written between path components.
    #[must_use]
    pub const fn separator(self) -> char {
        match self {
            Self::Unix => '/',
            Self::Windows => '\\',
        }
    }

    /// Whether `c` separates components in a full path of this format.
    ///
    /// Windows accepts both slashes; Unix only the forward slash.
    #[must_use]
    pub const fn is_separator(self, c: char) -> bool {
        match self {
            Self::Unix => c == '/',
            Self::Windows => c == '\\' || c == '/',
        }
    }

    /// Length in bytes of the root prefix of `path`.
    ///
    /// Unix paths starting with `/` have a one byte root. Windows paths of
    /// the form `X:\` (or `X:/`) with an ASCII drive letter have a three byte
    /// root. Anything else is unrooted and yields `0`.
    #[must_use]
    pub fn root_length(self, path: &str) -> usize {
        match self {
            Self::Unix => usize::from(path.starts_with('/')),
            Self::Windows => {
                let bytes = path.as_bytes();
                if bytes.len() >= 3
                    && bytes[0].is_ascii_alphabetic()
                    && bytes[1] == b':'
                    && self.is_separator(char::from(bytes[2]))
                {
                    3
                } else {
                    0
                }
            }
        }
    }

    /// Whether `path` consists of nothing but a root, such as `/` or `C:\`.
    #[must_use]
    pub fn is_root(self, path: &str) -> bool {
        !path.is_empty() && self.root_length(path) == path.len()
    }

    /// Splits a full path into its directory and final component.
    ///
    /// Trailing separators beyond the root are ignored. A root directory is
    /// kept verbatim; other directories carry no trailing separator.
    ///
    /// # Examples
    ///
    /// ```
    /// use modpaths::PathFormat;
    ///
    /// assert_eq!(
    ///     PathFormat::Unix.split("/home/user/file.txt"),
    ///     (Some("/home/user"), "file.txt")
    /// );
    /// assert_eq!(PathFormat::Unix.split("/"), (Some("/"), ""));
    /// assert_eq!(PathFormat::Windows.split("C:\\foo"), (Some("C:\\"), "foo"));
    /// assert_eq!(PathFormat::Unix.split("relative"), (None, "relative"));
    /// ```
    #[must_use]
    pub fn split(self, full_path: &str) -> (Option<&str>, &str) {
        let root = self.root_length(full_path);
        let trimmed = self.trim_trailing_separators(full_path, root);
        let rest = &trimmed[root..];

        match rest.rfind(|c| self.is_separator(c)) {
            Some(index) => {
                let split_at = root + index;
                let file_name = &trimmed[split_at + 1..];
                let directory = &trimmed[..split_at];
                if directory.is_empty() {
                    (None, file_name)
                } else {
                    (Some(directory), file_name)
                }
            }
            None if root > 0 => (Some(&trimmed[..root]), rest),
            None => (None, trimmed),
        }
    }

    /// Rewrites every separator in `path` to [`PathFormat::separator`].
    ///
    /// Only Windows accepts more than one separator, so Unix paths are
    /// returned unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use modpaths::PathFormat;
    ///
    /// assert_eq!(PathFormat::Windows.canonical_separators("C:/a\\b/c"), "C:\\a\\b\\c");
    /// assert_eq!(PathFormat::Unix.canonical_separators("/a\\b"), "/a\\b");
    /// ```
    #[must_use]
    pub fn canonical_separators(self, path: &str) -> Cow<'_, str> {
        match self {
            Self::Windows if path.contains('/') => Cow::Owned(path.replace('/', "\\")),
            _ => Cow::Borrowed(path),
        }
    }

    /// Removes trailing separators that are not part of the root.
    pub(crate) fn trim_trailing_separators(self, path: &str, root: usize) -> &str {
        let mut end = path.len();
        while end > root && path[..end].ends_with(|c| self.is_separator(c)) {
            end -= 1;
        }
        &path[..end]
    }
}

impl fmt::Display for PathFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unix => write!(f, "unix"),
            Self::Windows => write!(f, "windows"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_matches_target() {
        let format = PathFormat::current().unwrap();
        if cfg!(windows) {
            assert_eq!(format, PathFormat::Windows);
        } else {
            assert_eq!(format, PathFormat::Unix);
        }
    }

    #[test]
    fn test_unix_root_length() {
        assert_eq!(PathFormat::Unix.root_length("/"), 1);
        assert_eq!(PathFormat::Unix.root_length("/foo"), 1);
        assert_eq!(PathFormat::Unix.root_length("foo"), 0);
        assert_eq!(PathFormat::Unix.root_length(""), 0);
        assert_eq!(PathFormat::Unix.root_length("C:\\foo"), 0);
    }

    #[test]
    fn test_windows_root_length() {
        assert_eq!(PathFormat::Windows.root_length("C:\\"), 3);
        assert_eq!(PathFormat::Windows.root_length("d:\\games"), 3);
        assert_eq!(PathFormat::Windows.root_length("C:/games"), 3);
        assert_eq!(PathFormat::Windows.root_length("C:"), 0);
        assert_eq!(PathFormat::Windows.root_length("1:\\foo"), 0);
        assert_eq!(PathFormat::Windows.root_length("/foo"), 0);
        assert_eq!(PathFormat::Windows.root_length("\\\\server\\share"), 0);
    }

    #[test]
    fn test_is_separator() {
        assert!(PathFormat::Unix.is_separator('/'));
        assert!(!PathFormat::Unix.is_separator('\\'));
        assert!(PathFormat::Windows.is_separator('/'));
        assert!(PathFormat::Windows.is_separator('\\'));
    }

    #[test]
    fn test_split_unix() {
        let f = PathFormat::Unix;
        assert_eq!(f.split("/home/user/file.txt"), (Some("/home/user"), "file.txt"));
        assert_eq!(f.split("/home"), (Some("/"), "home"));
        assert_eq!(f.split("/"), (Some("/"), ""));
        assert_eq!(f.split("/home/user/"), (Some("/home"), "user"));
        assert_eq!(f.split("a/b"), (Some("a"), "b"));
        assert_eq!(f.split(""), (None, ""));
    }

    #[test]
    fn test_split_windows() {
        let f = PathFormat::Windows;
        assert_eq!(f.split("C:\\Users\\a\\b.txt"), (Some("C:\\Users\\a"), "b.txt"));
        assert_eq!(f.split("C:\\Users"), (Some("C:\\"), "Users"));
        assert_eq!(f.split("C:\\"), (Some("C:\\"), ""));
        assert_eq!(f.split("C:\\Users\\"), (Some("C:\\"), "Users"));
        assert_eq!(f.split("C:/Users/a"), (Some("C:/Users"), "a"));
    }

    #[test]
    fn test_canonical_separators() {
        assert_eq!(PathFormat::Windows.canonical_separators("C:/a/b"), "C:\\a\\b");
        assert!(matches!(
            PathFormat::Windows.canonical_separators("C:\\a"),
            Cow::Borrowed(_)
        ));
        assert_eq!(PathFormat::Unix.canonical_separators("/a\\b"), "/a\\b");
    }

    #[test]
    fn test_is_root() {
        assert!(PathFormat::Unix.is_root("/"));
        assert!(!PathFormat::Unix.is_root("/a"));
        assert!(!PathFormat::Unix.is_root(""));
        assert!(PathFormat::Windows.is_root("C:\\"));
        assert!(!PathFormat::Windows.is_root("C:\\a"));
    }

    #[test]
    fn test_display() {
        assert_eq!(PathFormat::Unix.to_string(), "unix");
        assert_eq!(PathFormat::Windows.to_string(), "windows");
    }
}
