//! Case- and separator-insensitive comparison of path text.
//!
//! Paths compare equal when they differ only in letter case or in the choice
//! between `/` and `\`. Comparison walks both strings char by char through
//! [`fold`] and never allocates, so hashing and ordering stay consistent with
//! equality without building intermediate strings.

use std::cmp::Ordering;
use std::hash::Hasher;

/// Whether `c` is either path separator.
#[must_use]
pub(crate) const fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Folds a single char into its comparison form.
///
/// Separators collapse to `/`. Letters map to their lowercase form when that
/// form is a single char; multi-char lowercase expansions keep the original
/// char so that comparison stays one-to-one.
#[must_use]
pub(crate) fn fold(c: char) -> char {
    if is_separator(c) {
        return '/';
    }
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}

/// Iterates `s` in comparison form.
pub(crate) fn folded(s: &str) -> impl Iterator<Item = char> + Clone + '_ {
    s.chars().map(fold)
}

/// Case- and separator-insensitive equality.
#[must_use]
pub(crate) fn eq(a: &str, b: &str) -> bool {
    folded(a).eq(folded(b))
}

/// Case- and separator-insensitive ordering.
#[must_use]
pub(crate) fn cmp(a: &str, b: &str) -> Ordering {
    folded(a).cmp(folded(b))
}

/// Feeds the comparison form of `s` into `state`.
///
/// The char count is written last so that concatenated fields cannot alias.
pub(crate) fn hash<H: Hasher>(s: &str, state: &mut H) {
    let mut count = 0usize;
    for c in folded(s) {
        state.write_u32(u32::from(c));
        count += 1;
    }
    state.write_usize(count);
}

/// Matches `prefix` against the start of `haystack` in comparison form.
///
/// Returns the byte offset in `haystack` just past the matched prefix, or
/// `None` when `haystack` does not start with `prefix`. The offset always
/// lies on a char boundary.
#[must_use]
pub(crate) fn strip_prefix_len(haystack: &str, prefix: &str) -> Option<usize> {
    let mut hay = haystack.char_indices();
    for p in prefix.chars() {
        let (_, h) = hay.next()?;
        if fold(h) != fold(p) {
            return None;
        }
    }
    Some(hay.next().map_or(haystack.len(), |(index, _)| index))
}

/// Matches `suffix` against the end of `haystack` in comparison form.
#[must_use]
pub(crate) fn ends_with(haystack: &str, suffix: &str) -> bool {
    let mut hay = haystack.chars().rev();
    suffix
        .chars()
        .rev()
        .all(|s| hay.next().is_some_and(|h| fold(h) == fold(s)))
}
