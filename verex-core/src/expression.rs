//! The expression builder
//!
//! An [`Expression`] keeps its pattern as three fragments. Most verbs append
//! a self-contained sub-pattern to the body; the anchor verbs rewrite the
//! prefix and suffix; [`Expression::alt`] restructures both so the whole
//! expression becomes a chain of alternatives. The full pattern is always
//! `prefix + body + suffix`.

use std::fmt;

use tracing::debug;

use crate::error::Result;
use crate::evaluator::{DefaultEvaluator, Evaluator};
use crate::modifier::{Modifier, Modifiers};

/// A regular expression assembled from readable verbs
///
/// Every builder method returns `&mut Self`, so calls can be chained on a
/// binding:
///
/// ```
/// use verex_core::Expression;
///
/// let mut expr = Expression::new();
/// expr.start_of_line().then("http").maybe("s").then("://");
/// assert_eq!(expr.pattern(), "^(?:http)(?:s)?(?:://)");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expression {
    prefix: String,
    body: String,
    suffix: String,
    modifiers: Modifiers,
}

impl Expression {
    /// Create an empty expression with no modifiers set
    pub fn new() -> Self {
        Expression::default()
    }

    /// The assembled pattern
    pub fn pattern(&self) -> String {
        let mut pattern =
            String::with_capacity(self.prefix.len() + self.body.len() + self.suffix.len());
        pattern.push_str(&self.prefix);
        pattern.push_str(&self.body);
        pattern.push_str(&self.suffix);
        pattern
    }

    /// Text placed before the body
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The accumulated fragments
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Text placed after the body
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// The currently set modifiers
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Append a raw fragment to the body, verbatim
    pub fn add(&mut self, value: &str) -> &mut Self {
        self.body.push_str(value);
        self
    }

    /// Anchor the expression to the start of the line
    pub fn start_of_line(&mut self) -> &mut Self {
        self.set_start_of_line(true)
    }

    /// Set or clear the start anchor
    ///
    /// This replaces the whole prefix, including a group opened by `alt`.
    pub fn set_start_of_line(&mut self, enable: bool) -> &mut Self {
        self.prefix = if enable { "^" } else { "" }.to_string();
        self
    }

    /// Anchor the expression to the end of the line
    pub fn end_of_line(&mut self) -> &mut Self {
        self.set_end_of_line(true)
    }

    /// Set or clear the end anchor
    ///
    /// This replaces the whole suffix, including a group closed by `alt`.
    pub fn set_end_of_line(&mut self, enable: bool) -> &mut Self {
        self.suffix = if enable { "$" } else { "" }.to_string();
        self
    }

    /// Match `value` literally, as a non-capturing group
    pub fn then(&mut self, value: &str) -> &mut Self {
        self.add(&format!("(?:{})", value))
    }

    /// Alias for [`then`](Self::then)
    pub fn find(&mut self, value: &str) -> &mut Self {
        self.then(value)
    }

    /// Optionally match `value`
    pub fn maybe(&mut self, value: &str) -> &mut Self {
        self.add(&format!("(?:{})?", value))
    }

    /// Match anything, including nothing
    pub fn anything(&mut self) -> &mut Self {
        self.add("(?:.*)")
    }

    /// Match zero or more characters not in `value`
    pub fn anything_but(&mut self, value: &str) -> &mut Self {
        self.add(&format!("(?:[^{}]*)", value))
    }

    /// Match at least one character
    pub fn something(&mut self) -> &mut Self {
        self.add("(?:.+)")
    }

    /// Match one or more characters not in `value`
    pub fn something_but(&mut self, value: &str) -> &mut Self {
        self.add(&format!("(?:[^{}]+)", value))
    }

    /// Match a Unix or Windows line break
    pub fn linebreak(&mut self) -> &mut Self {
        self.add(r"(?:(?:\n)|(?:\r\n))")
    }

    /// Alias for [`linebreak`](Self::linebreak)
    pub fn br(&mut self) -> &mut Self {
        self.linebreak()
    }

    /// Match a tab character
    pub fn tab(&mut self) -> &mut Self {
        self.add(r"\t")
    }

    /// Match one or more word characters
    pub fn word(&mut self) -> &mut Self {
        self.add(r"\w+")
    }

    /// Match any single character of `value`
    ///
    /// The characters are placed in a class verbatim; nothing is escaped.
    pub fn any_of(&mut self, value: &str) -> &mut Self {
        self.add(&format!("[{}]", value))
    }

    /// Alias for [`any_of`](Self::any_of)
    pub fn any(&mut self, value: &str) -> &mut Self {
        self.any_of(value)
    }

    /// Match one character from any of the given ranges
    ///
    /// `range(&[('a', 'z'), ('0', '9')])` appends `[a-z0-9]`.
    pub fn range(&mut self, pairs: &[(char, char)]) -> &mut Self {
        let mut class = String::from("[");
        for (from, to) in pairs {
            class.push(*from);
            class.push('-');
            class.push(*to);
        }
        class.push(']');
        self.add(&class)
    }

    /// Match one character between `from` and `to`
    pub fn range_between(&mut self, from: char, to: char) -> &mut Self {
        self.range(&[(from, to)])
    }

    /// Repeat the preceding token
    ///
    /// Unless `value` already starts with `*` or `+`, a `+` is appended
    /// first, then `value` verbatim. No group is added, so `multiple("ab")`
    /// yields `+ab`.
    pub fn multiple(&mut self, value: &str) -> &mut Self {
        if !value.is_empty() && !value.starts_with(['*', '+']) {
            self.add("+");
        }
        self.add(value)
    }

    /// Add `value` as another alternative
    ///
    /// The first call wraps everything so far in a group; each call closes
    /// the current alternative and opens the next one. `then("fish")`,
    /// `alt("cat")`, `alt("dog")` yields `((?:fish))|((?:cat))|((?:dog))`.
    pub fn alt(&mut self, value: &str) -> &mut Self {
        if !self.prefix.contains('(') {
            self.prefix.push('(');
        }
        if !self.suffix.contains(')') {
            self.suffix.insert(0, ')');
        }
        self.add(")|(");
        self.then(value)
    }

    /// Set the modifier named by `modifier`
    ///
    /// Unknown letters are ignored.
    pub fn add_modifier(&mut self, modifier: char) -> &mut Self {
        if let Some(m) = Modifier::from_char(modifier) {
            self.modifiers.insert(m);
        }
        self
    }

    /// Clear the modifier named by `modifier`
    ///
    /// Unknown letters are ignored. Clearing an unset modifier does nothing.
    pub fn remove_modifier(&mut self, modifier: char) -> &mut Self {
        if let Some(m) = Modifier::from_char(modifier) {
            self.modifiers.remove(m);
        }
        self
    }

    /// Ignore case when matching
    pub fn with_any_case(&mut self) -> &mut Self {
        self.set_any_case(true)
    }

    /// Set or clear case-insensitive matching
    pub fn set_any_case(&mut self, enable: bool) -> &mut Self {
        self.modifiers.set(Modifier::CaseInsensitive, enable);
        self
    }

    /// Only test the first line of the input (the default)
    pub fn search_one_line(&mut self) -> &mut Self {
        self.set_search_one_line(true)
    }

    /// Choose between testing the first line only and the whole input
    ///
    /// Passing `false` sets the multiline modifier.
    pub fn set_search_one_line(&mut self, enable: bool) -> &mut Self {
        self.modifiers.set(Modifier::Multiline, !enable);
        self
    }

    /// Let `test` match anywhere instead of requiring a full match
    pub fn search_global(&mut self) -> &mut Self {
        self.set_search_global(true)
    }

    /// Set or clear the global modifier
    pub fn set_search_global(&mut self, enable: bool) -> &mut Self {
        self.modifiers.set(Modifier::Global, enable);
        self
    }

    /// Compile the pattern with the active backend
    pub fn compile(&self) -> Result<<DefaultEvaluator as Evaluator>::Compiled> {
        self.compile_with::<DefaultEvaluator>()
    }

    /// Compile the pattern with a specific backend
    pub fn compile_with<E: Evaluator>(&self) -> Result<E::Compiled> {
        E::compile(
            &self.pattern(),
            self.modifiers.contains(Modifier::CaseInsensitive),
        )
    }

    /// Test `input` against the expression
    ///
    /// Without the multiline modifier only the text before the first `\n`
    /// is examined. Without the global modifier that text must match the
    /// pattern in full; with it, a match anywhere is enough.
    pub fn test(&self, input: &str) -> Result<bool> {
        self.test_with::<DefaultEvaluator>(input)
    }

    /// [`test`](Self::test) using a specific backend
    pub fn test_with<E: Evaluator>(&self, input: &str) -> Result<bool> {
        let to_test = if self.modifiers.contains(Modifier::Multiline) {
            input
        } else {
            reduce_lines(input)
        };

        let compiled = self.compile_with::<E>()?;
        let matched = if self.modifiers.contains(Modifier::Global) {
            E::search(&compiled, to_test)?
        } else {
            E::full_match(&compiled, to_test)?
        };

        debug!(
            pattern = %self,
            modifiers = %self.modifiers,
            matched,
            "tested expression"
        );
        Ok(matched)
    }

    /// Replace every match in `source` with `replacement`
    ///
    /// Unlike [`test`](Self::test), the whole source is searched regardless
    /// of the global and multiline modifiers.
    pub fn replace(&self, source: &str, replacement: &str) -> Result<String> {
        self.replace_with::<DefaultEvaluator>(source, replacement)
    }

    /// [`replace`](Self::replace) using a specific backend
    pub fn replace_with<E: Evaluator>(&self, source: &str, replacement: &str) -> Result<String> {
        let compiled = self.compile_with::<E>()?;
        let result = E::replace_all(&compiled, source, replacement)?;
        debug!(pattern = %self, replacement, "replaced matches");
        Ok(result)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.prefix, self.body, self.suffix)
    }
}

/// Everything before the first newline
fn reduce_lines(value: &str) -> &str {
    match value.find('\n') {
        Some(pos) => &value[..pos],
        None => value,
    }
}
