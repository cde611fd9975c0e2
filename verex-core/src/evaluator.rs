//! Regex evaluator backends
//!
//! Expressions never match text themselves. They hand their pattern to an
//! [`Evaluator`], which compiles it and answers full-match, search and
//! replace queries. Two backends exist:
//!
//! - [`RegexEvaluator`], built on the `regex` crate (the default)
//! - [`FancyEvaluator`], built on `fancy-regex`, enabled by the `fancy`
//!   feature; it additionally accepts look-around and backreferences
//!
//! [`DefaultEvaluator`] names the backend active in the current build.

use std::sync::OnceLock;

use crate::error::{Result, VerexError};
use tracing::trace;

/// The capability an expression needs from a regex engine
pub trait Evaluator {
    /// A compiled pattern
    type Compiled;

    /// Compile a pattern, optionally ignoring case
    fn compile(pattern: &str, case_insensitive: bool) -> Result<Self::Compiled>;

    /// Check whether the whole text matches the pattern
    fn full_match(compiled: &Self::Compiled, text: &str) -> Result<bool>;

    /// Check whether the pattern matches anywhere in the text
    fn search(compiled: &Self::Compiled, text: &str) -> Result<bool>;

    /// Replace every match in the text
    ///
    /// `$1`, `$name` and `${name}` in the replacement refer to capture groups.
    fn replace_all(compiled: &Self::Compiled, text: &str, replacement: &str) -> Result<String>;
}

/// Build the program that must cover the entire text
///
/// Under `(?x)` a pattern can end inside a `#` comment, which would swallow
/// the closing `)\z`. When the plain wrapper is rejected the group is closed
/// on a fresh line instead; verbose mode ignores that newline.
fn build_anchored<R, E>(
    pattern: &str,
    build: impl Fn(&str) -> std::result::Result<R, E>,
) -> Result<R>
where
    E: std::fmt::Display,
{
    let first = match build(&format!(r"\A(?:{})\z", pattern)) {
        Ok(anchored) => return Ok(anchored),
        Err(e) => e,
    };
    build(&format!("\\A(?:{}\n)\\z", pattern))
        .map_err(|_| VerexError::invalid_pattern(pattern, first))
}

/// Evaluator backed by the `regex` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexEvaluator;

/// A pattern compiled by [`RegexEvaluator`]
///
/// The anchored program used for full matches is built on first use.
#[derive(Debug, Clone)]
pub struct CompiledRegex {
    pattern: String,
    case_insensitive: bool,
    search: regex::Regex,
    anchored: OnceLock<regex::Regex>,
}

impl CompiledRegex {
    /// The unanchored regex, for use with the `regex` API directly
    pub fn as_regex(&self) -> &regex::Regex {
        &self.search
    }

    fn anchored(&self) -> Result<&regex::Regex> {
        if let Some(anchored) = self.anchored.get() {
            return Ok(anchored);
        }
        trace!(pattern = %self.pattern, "building anchored program");
        let anchored = build_anchored(&self.pattern, |p| {
            regex::RegexBuilder::new(p)
                .case_insensitive(self.case_insensitive)
                .build()
        })?;
        Ok(self.anchored.get_or_init(|| anchored))
    }
}

impl Evaluator for RegexEvaluator {
    type Compiled = CompiledRegex;

    fn compile(pattern: &str, case_insensitive: bool) -> Result<CompiledRegex> {
        trace!(pattern, case_insensitive, "compiling with regex");
        let search = regex::RegexBuilder::new(pattern)
            .case_insensitive(case_insensitive)
            .build()
            .map_err(|e| VerexError::invalid_pattern(pattern, e))?;
        Ok(CompiledRegex {
            pattern: pattern.to_string(),
            case_insensitive,
            search,
            anchored: OnceLock::new(),
        })
    }

    fn full_match(compiled: &CompiledRegex, text: &str) -> Result<bool> {
        Ok(compiled.anchored()?.is_match(text))
    }

    fn search(compiled: &CompiledRegex, text: &str) -> Result<bool> {
        Ok(compiled.search.is_match(text))
    }

    fn replace_all(compiled: &CompiledRegex, text: &str, replacement: &str) -> Result<String> {
        Ok(compiled.search.replace_all(text, replacement).into_owned())
    }
}

/// Evaluator backed by `fancy-regex`
#[cfg(feature = "fancy")]
#[derive(Debug, Clone, Copy, Default)]
pub struct FancyEvaluator;

/// A pattern compiled by [`FancyEvaluator`]
#[cfg(feature = "fancy")]
#[derive(Debug, Clone)]
pub struct CompiledFancy {
    pattern: String,
    case_insensitive: bool,
    search: fancy_regex::Regex,
    anchored: OnceLock<fancy_regex::Regex>,
}

#[cfg(feature = "fancy")]
impl CompiledFancy {
    /// The unanchored regex, for use with the `fancy-regex` API directly
    pub fn as_regex(&self) -> &fancy_regex::Regex {
        &self.search
    }

    fn anchored(&self) -> Result<&fancy_regex::Regex> {
        if let Some(anchored) = self.anchored.get() {
            return Ok(anchored);
        }
        trace!(pattern = %self.pattern, "building anchored program");
        let anchored = build_anchored(&self.pattern, |p| {
            fancy_regex::RegexBuilder::new(p)
                .case_insensitive(self.case_insensitive)
                .build()
        })?;
        Ok(self.anchored.get_or_init(|| anchored))
    }
}

#[cfg(feature = "fancy")]
impl Evaluator for FancyEvaluator {
    type Compiled = CompiledFancy;

    fn compile(pattern: &str, case_insensitive: bool) -> Result<CompiledFancy> {
        trace!(pattern, case_insensitive, "compiling with fancy-regex");
        let search = fancy_regex::RegexBuilder::new(pattern)
            .case_insensitive(case_insensitive)
            .build()
            .map_err(|e| VerexError::invalid_pattern(pattern, e))?;
        Ok(CompiledFancy {
            pattern: pattern.to_string(),
            case_insensitive,
            search,
            anchored: OnceLock::new(),
        })
    }

    fn full_match(compiled: &CompiledFancy, text: &str) -> Result<bool> {
        compiled
            .anchored()?
            .is_match(text)
            .map_err(|e| VerexError::Evaluation(e.to_string()))
    }

    fn search(compiled: &CompiledFancy, text: &str) -> Result<bool> {
        compiled
            .search
            .is_match(text)
            .map_err(|e| VerexError::Evaluation(e.to_string()))
    }

    fn replace_all(compiled: &CompiledFancy, text: &str, replacement: &str) -> Result<String> {
        compiled
            .search
            .try_replacen(text, 0, replacement)
            .map(|replaced| replaced.into_owned())
            .map_err(|e| VerexError::Evaluation(e.to_string()))
    }
}

/// The backend used by [`Expression`](crate::Expression) in this build
#[cfg(not(feature = "fancy"))]
pub type DefaultEvaluator = RegexEvaluator;

/// The backend used by [`Expression`](crate::Expression) in this build
#[cfg(feature = "fancy")]
pub type DefaultEvaluator = FancyEvaluator;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_match_requires_whole_text() {
        let compiled = RegexEvaluator::compile("(?:abc)", false).unwrap();
        assert!(RegexEvaluator::full_match(&compiled, "abc").unwrap());
        assert!(!RegexEvaluator::full_match(&compiled, "xabc").unwrap());
        assert!(!RegexEvaluator::full_match(&compiled, "abcx").unwrap());
    }

    #[test]
    fn test_full_match_covers_every_alternative() {
        let compiled = RegexEvaluator::compile("a|ab", false).unwrap();
        assert!(RegexEvaluator::full_match(&compiled, "ab").unwrap());
        assert!(RegexEvaluator::full_match(&compiled, "a").unwrap());
    }

    #[test]
    fn test_search() {
        let compiled = RegexEvaluator::compile("(?:abc)", false).unwrap();
        assert!(RegexEvaluator::search(&compiled, "xxabcxx").unwrap());
        assert!(!RegexEvaluator::search(&compiled, "xxabxx").unwrap());
    }

    #[test]
    fn test_case_insensitive() {
        let compiled = RegexEvaluator::compile("(?:abc)", true).unwrap();
        assert!(RegexEvaluator::full_match(&compiled, "ABC").unwrap());

        let compiled = RegexEvaluator::compile("(?:abc)", false).unwrap();
        assert!(!RegexEvaluator::full_match(&compiled, "ABC").unwrap());
    }

    #[test]
    fn test_replace_all() {
        let compiled = RegexEvaluator::compile("(?:a)", false).unwrap();
        let result = RegexEvaluator::replace_all(&compiled, "banana", "o").unwrap();
        assert_eq!(result, "bonono");
    }

    #[test]
    fn test_replace_with_group_reference() {
        let compiled = RegexEvaluator::compile(r"(\w+)@(\w+)", false).unwrap();
        let result = RegexEvaluator::replace_all(&compiled, "user@host", "$2@$1").unwrap();
        assert_eq!(result, "host@user");
    }

    #[test]
    fn test_invalid_pattern() {
        let err = RegexEvaluator::compile("[a-", false).unwrap_err();
        assert!(err.is_invalid_pattern());
        match err {
            VerexError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "[a-"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unbalanced_group_is_rejected() {
        // Wrapping would balance this one; the plain compile must catch it.
        assert!(RegexEvaluator::compile("a)(b", false).is_err());
    }

    #[test]
    fn test_verbose_trailing_comment() {
        let compiled = RegexEvaluator::compile("(?x)a # note", false).unwrap();
        assert!(RegexEvaluator::full_match(&compiled, "a").unwrap());
        assert!(!RegexEvaluator::full_match(&compiled, "ab").unwrap());
        assert!(RegexEvaluator::search(&compiled, "bab").unwrap());
        let result = RegexEvaluator::replace_all(&compiled, "aXa", "b").unwrap();
        assert_eq!(result, "bXb");
    }

    #[test]
    fn test_anchored_program_built_on_full_match_only() {
        let compiled = RegexEvaluator::compile("(?:bird)", false).unwrap();
        RegexEvaluator::search(&compiled, "a bird").unwrap();
        RegexEvaluator::replace_all(&compiled, "a bird", "duck").unwrap();
        assert!(compiled.anchored.get().is_none());

        assert!(RegexEvaluator::full_match(&compiled, "bird").unwrap());
        assert!(compiled.anchored.get().is_some());
        assert!(!RegexEvaluator::full_match(&compiled, "a bird").unwrap());
    }

    #[cfg(feature = "fancy")]
    #[test]
    fn test_fancy_lookahead() {
        let compiled = FancyEvaluator::compile(r"foo(?=bar)", false).unwrap();
        assert!(FancyEvaluator::search(&compiled, "foobar").unwrap());
        assert!(!FancyEvaluator::search(&compiled, "foobaz").unwrap());
        assert!(!FancyEvaluator::full_match(&compiled, "foobar").unwrap());
    }

    #[cfg(feature = "fancy")]
    #[test]
    fn test_fancy_replace_all() {
        let compiled = FancyEvaluator::compile("(?:bird)", false).unwrap();
        let result = FancyEvaluator::replace_all(&compiled, "bird, bird", "duck").unwrap();
        assert_eq!(result, "duck, duck");
    }
}
