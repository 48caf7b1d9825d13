//! File-name suffixes.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::normalize;
use crate::error::{Error, Result};

/// The dot-prefixed suffix of a file name, such as `.zip`.
///
/// An extension is either empty ([`Extension::NONE`]) or starts with `.`.
/// Comparison and hashing ignore letter case.
///
/// # Examples
///
/// ```
/// use modpaths::Extension;
///
/// let ext = Extension::from_path("archive.tar.GZ");
/// assert_eq!(ext, Extension::new(".gz").unwrap());
/// assert_eq!(Extension::from_path("README"), Extension::NONE);
/// assert!(Extension::new("gz").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Extension(Cow<'static, str>);

impl Extension {
    /// The absent extension.
    pub const NONE: Self = Self(Cow::Borrowed(""));

    /// Creates an extension from its dot-prefixed text.
    ///
    /// # Errors
    ///
    /// Returns `InvalidExtension` if `value` is non-empty and does not start
    /// with `.`.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.is_empty() || value.starts_with('.') {
            Ok(Self(Cow::Owned(value)))
        } else {
            Err(Error::InvalidExtension { value })
        }
    }

    /// Creates an extension from a static literal.
    ///
    /// Intended for well-known constants; a literal that is neither empty nor
    /// dot-prefixed collapses to [`Extension::NONE`].
    #[must_use]
    pub const fn from_static(value: &'static str) -> Self {
        let bytes = value.as_bytes();
        if bytes.is_empty() || bytes[0] == b'.' {
            Self(Cow::Borrowed(value))
        } else {
            Self::NONE
        }
    }

    /// Extracts the extension of the final segment of `path`.
    ///
    /// Everything from the last `.` of the final segment is the extension.
    /// Segments without a `.` have no extension.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        let segment_start = path
            .rfind(normalize::is_separator)
            .map_or(0, |index| index + 1);
        let segment = &path[segment_start..];
        match segment.rfind('.') {
            Some(dot) => Self(Cow::Owned(segment[dot..].to_string())),
            None => Self::NONE,
        }
    }

    /// The extension text, including the leading dot.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the absent extension.
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Extension {
    fn default() -> Self {
        Self::NONE
    }
}

impl PartialEq for Extension {
    fn eq(&self, other: &Self) -> bool {
        normalize::eq(&self.0, &other.0)
    }
}

impl Eq for Extension {}

impl Hash for Extension {
    fn hash<H: Hasher>(&self, state: &mut H) {
        normalize::hash(&self.0, state);
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Extension {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Extension {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Extension {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl Serialize for Extension {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Extension {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}
