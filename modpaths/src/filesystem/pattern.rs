//! Wildcard matching of directory entry names.

use glob::{MatchOptions, Pattern};

use crate::error::{Error, Result};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// A wildcard pattern matched against single entry names.
///
/// Supports `*`, `?` and `[...]` classes and ignores case. As with Windows
/// directory searches, `*.*` matches every name, including names without a
/// dot.
///
/// # Examples
///
/// ```
/// use modpaths::NamePattern;
///
/// let pattern = NamePattern::new("*.ESP").unwrap();
/// assert!(pattern.matches("Skyrim.esp"));
/// assert!(!pattern.matches("Skyrim.esm"));
/// assert!(NamePattern::new("*.*").unwrap().matches("README"));
/// ```
#[derive(Debug, Clone)]
pub struct NamePattern {
    pattern: Option<Pattern>,
}

impl NamePattern {
    /// Compiles `pattern`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPattern` if the pattern is malformed.
    pub fn new(pattern: &str) -> Result<Self> {
        if pattern.is_empty() || pattern == "*" || pattern == "*.*" {
            return Ok(Self::any());
        }

        let compiled = Pattern::new(pattern).map_err(|e| Error::InvalidPattern {
            pattern: pattern.to_string(),
            reason: format!("{} at position {}", e.msg, e.pos),
        })?;
        Ok(Self {
            pattern: Some(compiled),
        })
    }

    /// A pattern matching every name.
    #[must_use]
    pub const fn any() -> Self {
        Self { pattern: None }
    }

    /// Whether `name` matches.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.pattern
            .as_ref()
            .map_or(true, |pattern| pattern.matches_with(name, MATCH_OPTIONS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_all_forms() {
        for raw in ["", "*", "*.*"] {
            let pattern = NamePattern::new(raw).unwrap();
            assert!(pattern.matches("file.txt"));
            assert!(pattern.matches("noext"));
            assert!(pattern.matches(".hidden"));
        }
    }

    #[test]
    fn test_case_insensitive() {
        let pattern = NamePattern::new("*.dds").unwrap();
        assert!(pattern.matches("Sky.DDS"));
        assert!(!pattern.matches("Sky.png"));
    }

    #[test]
    fn test_question_mark_and_class() {
        let pattern = NamePattern::new("save?.[ef]ss").unwrap();
        assert!(pattern.matches("save1.ess"));
        assert!(pattern.matches("SAVE2.FSS"));
        assert!(!pattern.matches("save10.ess"));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = NamePattern::new("[abc").unwrap_err();
        match err {
            Error::InvalidPattern { pattern, .. } => assert_eq!(pattern, "[abc"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
