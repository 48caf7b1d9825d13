//! Path value types.
//!
//! This module provides the immutable path values that the rest of the
//! library is built on.
//!
//! # Key Concepts
//!
//! ## Relative paths
//!
//! A [`RelativePath`] is a filesystem-independent run of segments. It accepts
//! both `/` and `\` and compares case-insensitively, which matches how game
//! archives and mod manifests refer to files.
//!
//! ## Absolute paths
//!
//! An [`AbsolutePath`] is rooted and bound to a
//! [`FileSystem`](crate::FileSystem). The filesystem's [`PathFormat`]
//! decides what a root looks like and which separator is written, so the
//! same code handles `/home/user` and `C:\Users` regardless of the host.
//!
//! ## Game paths
//!
//! A [`GamePath`] pairs a relative path with a [`GameFolderType`] such as the
//! install directory or the saves folder. It becomes an absolute path once
//! the folder's location is known.
//!
//! # Examples
//!
//! ```
//! use modpaths::{FileSystem, InMemoryFileSystem, PathFormat, RelativePath};
//!
//! let fs = InMemoryFileSystem::new(PathFormat::Unix);
//! let base = fs.from_full_path("/games/skyrim");
//! let plugin = base.combine_unchecked(&RelativePath::from("Data\\Skyrim.esm"));
//!
//! assert_eq!(plugin.full_path(), "/games/skyrim/Data/Skyrim.esm");
//! assert_eq!(
//!     plugin.relative_to(&base).unwrap(),
//!     RelativePath::from("data/skyrim.esm")
//! );
//! ```

mod absolute;
mod extension;
mod format;
mod game;
mod io;
pub(crate) mod normalize;
mod relative;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use absolute::{AbsolutePath, AbsolutePathSeed};
pub use extension::Extension;
pub use format::PathFormat;
pub use game::{FolderRegistry, GameFolderType, GamePath};
pub use relative::RelativePath;
