#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # modpaths
//!
//! Path value types and a filesystem abstraction for tools that manage game
//! installations and mods.
//!
//! Games and their mods refer to files case-insensitively and with either
//! separator, while the host filesystem may be case-sensitive and use a
//! different convention. This library models those paths as immutable values
//! and routes all I/O through a pluggable [`FileSystem`].
//!
//! ## Core Types
//!
//! - [`RelativePath`], [`AbsolutePath`] and [`GamePath`]: path values with
//!   case-insensitive comparison
//! - [`Extension`]: a validated, case-insensitive file extension
//! - [`FileSystem`] with [`RealFileSystem`], [`InMemoryFileSystem`] and
//!   [`OverlayFileSystem`]
//! - [`TemporaryFileManager`] and [`TemporaryPath`]: scoped scratch files
//! - [`Size`] and [`Bandwidth`]: byte-count and rate wrappers
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use modpaths::{Extension, FileSystem, InMemoryFileSystem, PathFormat, RelativePath};
//!
//! let fs = InMemoryFileSystem::new(PathFormat::Windows);
//! let game = fs.from_full_path("C:\\Games\\Skyrim");
//!
//! let plugin = game.combine_unchecked(&RelativePath::from("data/Skyrim.ESM"));
//! assert_eq!(plugin.full_path(), "C:\\Games\\Skyrim\\data\\Skyrim.ESM");
//! assert_eq!(plugin.extension(), Extension::new(".esm").unwrap());
//! assert!(plugin.in_folder(&game));
//! ```

pub mod config;
pub mod error;
pub mod filesystem;
pub mod logging;
pub mod path;
pub mod temp;
pub mod units;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use filesystem::{
    FileAccess, FileEntry, FileMode, FileStream, FileSystem, FileSystemRef, InMemoryFileSystem,
    KnownPath, NamePattern, OverlayFileSystem, RealFileSystem, RetryPolicy,
};
pub use logging::{init_logger, LogLevel, Logger};
pub use path::{
    AbsolutePath, AbsolutePathSeed, Extension, FolderRegistry, GameFolderType, GamePath,
    PathFormat, RelativePath,
};
pub use temp::{TemporaryFileManager, TemporaryPath};
pub use units::{Bandwidth, Size};
