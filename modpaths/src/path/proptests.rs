//! Property-based tests for path parsing, formatting and comparison.

use super::{AbsolutePath, Extension, PathFormat, RelativePath};
use crate::filesystem::{FileSystem, FileSystemRef, InMemoryFileSystem};
use proptest::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

fn segment_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_. -]{1,16}".prop_filter("segment must not be empty after trim", |s| {
        !s.trim().is_empty()
    })
}

fn segments_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(segment_strategy(), 1..8)
}

fn unix_fs() -> FileSystemRef {
    InMemoryFileSystem::new(PathFormat::Unix).handle()
}

fn windows_fs() -> FileSystemRef {
    InMemoryFileSystem::new(PathFormat::Windows).handle()
}

fn unix_path_strategy() -> impl Strategy<Value = String> {
    segments_strategy().prop_map(|parts| format!("/{}", parts.join("/")))
}

fn windows_path_strategy() -> impl Strategy<Value = String> {
    (prop::char::range('A', 'Z'), segments_strategy())
        .prop_map(|(drive, parts)| format!("{drive}:\\{}", parts.join("\\")))
}

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Randomly flips case and separator style without changing meaning.
fn scramble(parts: &[String], flips: &[bool]) -> String {
    let mut out = String::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            out.push(if flips.get(i).copied().unwrap_or(false) { '\\' } else { '/' });
        }
        if flips.get(i + 1).copied().unwrap_or(false) {
            out.push_str(&part.to_uppercase());
        } else {
            out.push_str(&part.to_lowercase());
        }
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Parsing then formatting a native path returns the input.
    #[test]
    fn unix_full_path_round_trip(raw in unix_path_strategy()) {
        let path = AbsolutePath::from_full_path(&raw, unix_fs());
        prop_assert_eq!(path.full_path(), raw);
    }

    #[test]
    fn windows_full_path_round_trip(raw in windows_path_strategy()) {
        let path = AbsolutePath::from_full_path(&raw, windows_fs());
        prop_assert_eq!(path.full_path(), raw);
    }

    // Forward slashes in Windows input come back as backslashes and parse to
    // the same value as the backslash form.
    #[test]
    fn windows_forward_slashes_are_canonicalized(
        raw in windows_path_strategy(),
        flips in prop::collection::vec(any::<bool>(), 8),
    ) {
        let mut seen = 0;
        let mixed: String = raw
            .chars()
            .map(|c| {
                if c == '\\' {
                    seen += 1;
                    if flips[(seen - 1) % flips.len()] { '/' } else { c }
                } else {
                    c
                }
            })
            .collect();

        let path = AbsolutePath::from_full_path(&mixed, windows_fs());
        prop_assert_eq!(path.full_path(), raw.clone());
        prop_assert_eq!(path, AbsolutePath::from_full_path(&raw, windows_fs()));
    }

    // A single trailing separator is dropped on parse.
    #[test]
    fn trailing_separator_is_stripped(raw in unix_path_strategy()) {
        let with_slash = format!("{raw}/");
        let path = AbsolutePath::from_full_path(&with_slash, unix_fs());
        prop_assert_eq!(path.full_path(), raw);
    }

    // The three ways of producing the full path agree.
    #[test]
    fn full_path_length_is_accurate(raw in unix_path_strategy()) {
        let path = AbsolutePath::from_full_path(&raw, unix_fs());
        let full = path.full_path();
        prop_assert_eq!(path.full_path_len(), full.len());

        let mut buffer = vec![0u8; full.len()];
        let written = path.write_full_path(&mut buffer).unwrap();
        prop_assert_eq!(&buffer[..written], full.as_bytes());
        prop_assert_eq!(path.to_string(), full);
    }

    // Paths differing only in case and separators are equal and hash alike.
    #[test]
    fn relative_equality_and_hash_consistent(
        parts in segments_strategy(),
        flips_a in prop::collection::vec(any::<bool>(), 9),
        flips_b in prop::collection::vec(any::<bool>(), 9),
    ) {
        let a = RelativePath::new(scramble(&parts, &flips_a));
        let b = RelativePath::new(scramble(&parts, &flips_b));
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(hash_of(&a), hash_of(&b));
    }

    // Joining then taking the relative path gives back the joined path.
    #[test]
    fn combine_then_relative_to_is_identity(
        base in unix_path_strategy(),
        rel in segments_strategy(),
    ) {
        let base = AbsolutePath::from_full_path(&base, unix_fs());
        let rel = RelativePath::new(rel.join("/"));
        let joined = base.combine_unchecked(&rel);
        let back = joined.relative_to(&base).unwrap();
        prop_assert_eq!(back.as_str(), rel.as_str());
        prop_assert!(joined.in_folder(&base));
    }

    // Extending the last segment never makes a path a child of the original.
    #[test]
    fn in_folder_respects_segment_boundary(
        parts in segments_strategy(),
        extra in "[a-z]{1,5}",
    ) {
        let parent = RelativePath::new(parts.join("/"));
        let sibling = RelativePath::new(format!("{}{extra}", parts.join("/")));
        prop_assert!(!sibling.in_folder(&parent));
        prop_assert!(!parent.in_folder(&sibling));

        let child = parent.join(&extra);
        prop_assert!(child.in_folder(&parent));
    }

    // Ordering agrees with equality.
    #[test]
    fn relative_ordering_consistent_with_eq(a in "[a-zA-Z/\\\\]{0,12}", b in "[a-zA-Z/\\\\]{0,12}") {
        let a = RelativePath::new(a);
        let b = RelativePath::new(b);
        prop_assert_eq!(a == b, a.cmp(&b) == std::cmp::Ordering::Equal);
    }

    // Dropping all segments of a path leaves it empty.
    #[test]
    fn drop_first_all_segments(parts in segments_strategy()) {
        let path = RelativePath::new(parts.join("/"));
        prop_assert!(path.drop_first(parts.len()).unwrap().is_empty());
        prop_assert!(path.drop_first(parts.len() + 1).is_err());
    }

    // The extension is always empty or dot-prefixed.
    #[test]
    fn extension_is_dot_prefixed(name in "[a-z.]{0,12}") {
        let ext = Extension::from_path(&name);
        prop_assert!(ext.is_none() || ext.as_str().starts_with('.'));
        prop_assert!(name.ends_with(ext.as_str()));
    }
}
