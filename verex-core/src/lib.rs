//! Verex Core Library
//!
//! Verbal expressions: assemble a regular expression by chaining readable
//! verbs, then test or transform strings with it. Matching is delegated to
//! an existing regex engine (see [`evaluator`]).
//!
//! ```
//! use verex_core::Expression;
//!
//! let mut url = Expression::new();
//! url.search_one_line()
//!     .start_of_line()
//!     .then("http")
//!     .maybe("s")
//!     .then("://")
//!     .maybe("www.")
//!     .anything_but(" ")
//!     .end_of_line();
//!
//! assert!(url.test("https://www.google.com").unwrap());
//! assert_eq!(url.to_string(), "^(?:http)(?:s)?(?:://)(?:www.)?(?:[^ ]*)$");
//! ```

pub mod error;
pub mod evaluator;
pub mod expression;
pub mod modifier;

pub use error::{Result, VerexError};
#[cfg(feature = "fancy")]
pub use evaluator::{CompiledFancy, FancyEvaluator};
pub use evaluator::{CompiledRegex, DefaultEvaluator, Evaluator, RegexEvaluator};
pub use expression::Expression;
pub use modifier::{Modifier, Modifiers};

/// Create an empty expression
///
/// Shorthand for [`Expression::new`].
pub fn verex() -> Expression {
    Expression::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_to_end() {
        let mut expr = verex();
        expr.find("red");
        let result = expr.replace("We have a red house", "blue").unwrap();
        assert_eq!(result, "We have a blue house");
    }
}
