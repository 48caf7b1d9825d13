//! Paths relative to a game's well-known folders.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{AbsolutePath, Extension, RelativePath};
use crate::error::{Error, Result};

/// The logical root a [`GamePath`] is relative to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GameFolderType {
    /// The game's install directory.
    Game,
    /// Where the game keeps save files.
    Saves,
    /// Where the game keeps configuration.
    Preferences,
    /// The game's per-user application data.
    AppData,
}

impl GameFolderType {
    /// All folder types in declaration order.
    pub const ALL: [Self; 4] = [Self::Game, Self::Saves, Self::Preferences, Self::AppData];

    /// The name used in display and serialized forms.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Game => "Game",
            Self::Saves => "Saves",
            Self::Preferences => "Preferences",
            Self::AppData => "AppData",
        }
    }

    /// Looks up a folder type by name, ignoring case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|folder| folder.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for GameFolderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maps folder types to their location on a filesystem.
pub trait FolderRegistry {
    /// The location of `folder`, if known.
    fn folder_location(&self, folder: GameFolderType) -> Option<&AbsolutePath>;
}

impl FolderRegistry for HashMap<GameFolderType, AbsolutePath> {
    fn folder_location(&self, folder: GameFolderType) -> Option<&AbsolutePath> {
        self.get(&folder)
    }
}

/// A relative path tagged with the game folder it is relative to.
///
/// # Examples
///
/// ```
/// use modpaths::{GameFolderType, GamePath};
///
/// let path = GamePath::new(GameFolderType::Game, "Data/Skyrim.esm");
/// assert_eq!(path.to_string(), "{Game}/Data/Skyrim.esm");
/// assert_eq!(path, GamePath::new(GameFolderType::Game, "data\\skyrim.esm"));
/// assert_ne!(path, GamePath::new(GameFolderType::Saves, "Data/Skyrim.esm"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GamePath {
    folder: GameFolderType,
    path: RelativePath,
}

impl GamePath {
    /// Creates a path below `folder`.
    #[must_use]
    pub fn new(folder: GameFolderType, path: impl Into<RelativePath>) -> Self {
        Self {
            folder,
            path: path.into(),
        }
    }

    /// The folder this path is relative to.
    #[must_use]
    pub const fn folder(&self) -> GameFolderType {
        self.folder
    }

    /// The path below the folder.
    #[must_use]
    pub const fn path(&self) -> &RelativePath {
        &self.path
    }

    /// The final segment of the path.
    #[must_use]
    pub fn name(&self) -> &str {
        self.path.file_name()
    }

    /// The extension of the final segment.
    #[must_use]
    pub fn extension(&self) -> Extension {
        self.path.extension()
    }

    /// The containing path in the same folder.
    #[must_use]
    pub fn parent(&self) -> Self {
        Self::new(self.folder, self.path.parent())
    }

    /// The folder itself, with an empty path.
    #[must_use]
    pub fn root_component(&self) -> Self {
        Self::new(self.folder, RelativePath::empty())
    }

    /// The segments of the path.
    pub fn parts(&self) -> impl Iterator<Item = &str> + '_ {
        self.path.parts()
    }

    /// This path followed by each ancestor down to the folder root.
    #[must_use]
    pub fn all_parents(&self) -> Vec<Self> {
        let mut parents = vec![self.clone()];
        let mut current = self.path.clone();
        while !current.is_empty() {
            current = current.parent();
            parents.push(Self::new(self.folder, current.clone()));
        }
        parents
    }

    /// Whether this path lies in `other`, within the same folder.
    #[must_use]
    pub fn in_folder(&self, other: &Self) -> bool {
        self.folder == other.folder && self.path.in_folder(&other.path)
    }

    /// Whether `prefix` names this path or one of its ancestors.
    #[must_use]
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.in_folder(prefix)
    }

    /// Whether the trailing segments of the path equal `suffix`.
    #[must_use]
    pub fn ends_with(&self, suffix: &RelativePath) -> bool {
        self.path.ends_with(suffix)
    }

    /// Joins the path onto `base`, the location of this path's folder.
    #[must_use]
    pub fn combine(&self, base: &AbsolutePath) -> AbsolutePath {
        base.combine_unchecked(&self.path)
    }

    /// Resolves the path using the folder locations in `registry`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownFolder` if `registry` has no location for the folder.
    pub fn resolve(&self, registry: &dyn FolderRegistry) -> Result<AbsolutePath> {
        registry
            .folder_location(self.folder)
            .map(|base| self.combine(base))
            .ok_or_else(|| Error::UnknownFolder {
                folder: self.folder.to_string(),
            })
    }
}

impl fmt::Display for GamePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}/{}", self.folder, self.path)
    }
}

impl Serialize for GamePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        (self.folder.name(), self.path.as_str()).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GamePath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let (folder, path) = <(String, String)>::deserialize(deserializer)?;
        let folder = GameFolderType::from_name(&folder).ok_or_else(|| {
            serde::de::Error::custom(format!("unknown game folder type '{folder}'"))
        })?;
        Ok(Self::new(folder, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::{FileSystem, InMemoryFileSystem};
    use crate::path::PathFormat;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn game(path: &str) -> GamePath {
        GamePath::new(GameFolderType::Game, path)
    }

    fn hash_of(path: &GamePath) -> u64 {
        let mut hasher = DefaultHasher::new();
        path.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_equality() {
        assert_eq!(game("foo/bar.zip"), game("Foo/bar.zip"));
        assert_eq!(hash_of(&game("foo/bar.zip")), hash_of(&game("FOO\\BAR.zip")));
        assert_ne!(
            game("foo/bar.zip"),
            GamePath::new(GameFolderType::Preferences, "foo/bar.zip")
        );
        assert_ne!(game("foo/bar.zip"), game("foo/bar.pex"));
    }

    #[test]
    fn test_display() {
        assert_eq!(game("foo/bar.zip").to_string(), "{Game}/foo/bar.zip");
        assert_eq!(
            GamePath::new(GameFolderType::Saves, "foo/ba.zip").to_string(),
            "{Saves}/foo/ba.zip"
        );
    }

    #[test]
    fn test_name_parent_and_root() {
        assert_eq!(game("foo/bar").name(), "bar");
        assert_eq!(game("").name(), "");
        assert_eq!(game("foo/bar/baz").parent(), game("foo/bar"));
        assert_eq!(game("foo").parent(), game(""));
        assert_eq!(
            GamePath::new(GameFolderType::AppData, "a/b").root_component(),
            GamePath::new(GameFolderType::AppData, "")
        );
        assert_eq!(game("foo/bar.zip").extension().as_str(), ".zip");
    }

    #[test]
    fn test_parts_and_all_parents() {
        assert_eq!(game("foo/bar/baz").parts().collect::<Vec<_>>(), vec!["foo", "bar", "baz"]);
        assert_eq!(game("").parts().count(), 0);
        assert_eq!(
            game("foo/bar/baz").all_parents(),
            vec![game("foo/bar/baz"), game("foo/bar"), game("foo"), game("")]
        );
        assert_eq!(game("").all_parents(), vec![game("")]);
    }

    #[test]
    fn test_in_folder_and_starts_with() {
        assert!(game("foo/bar").in_folder(&game("foo")));
        assert!(!game("foo").in_folder(&game("bar")));
        assert!(!GamePath::new(GameFolderType::Saves, "foo/bar").in_folder(&game("foo")));
        assert!(game("foo/bar/baz").starts_with(&game("")));
        assert!(!game("foobar").starts_with(&game("foo")));
        assert!(!game("foo/bar/baz").starts_with(&game("foo/baz")));
        assert!(!game("").starts_with(&game("foo")));
    }

    #[test]
    fn test_ends_with() {
        assert!(game("foo/bar/baz").ends_with(&RelativePath::from("bar/baz")));
        assert!(!game("foobar").ends_with(&RelativePath::from("bar")));
        assert!(game("").ends_with(&RelativePath::empty()));
    }

    #[test]
    fn test_combine_and_resolve() {
        let fs = InMemoryFileSystem::new(PathFormat::Unix);
        let install = fs.from_full_path("/games/skyrim");
        let registry = HashMap::from([(GameFolderType::Game, install.clone())]);

        let path = game("Data/Skyrim.esm");
        assert_eq!(path.combine(&install).full_path(), "/games/skyrim/Data/Skyrim.esm");
        assert_eq!(path.resolve(&registry).unwrap(), path.combine(&install));

        let err = GamePath::new(GameFolderType::Saves, "x")
            .resolve(&registry)
            .unwrap_err();
        assert!(matches!(err, Error::UnknownFolder { ref folder } if folder == "Saves"));
    }

    #[test]
    fn test_serde_as_pair() {
        let path = GamePath::new(GameFolderType::Saves, "slot\\1.ess");
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, r#"["Saves","slot\\1.ess"]"#);

        let back: GamePath = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
        assert!(serde_json::from_str::<GamePath>(r#"["Nowhere","x"]"#).is_err());
    }

    #[test]
    fn test_folder_type_names() {
        for folder in GameFolderType::ALL {
            assert_eq!(GameFolderType::from_name(folder.name()), Some(folder));
        }
        assert_eq!(GameFolderType::from_name("appdata"), Some(GameFolderType::AppData));
        assert_eq!(GameFolderType::from_name("bogus"), None);
    }
}
