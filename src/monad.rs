//! Monadic composition
//!
//! An alternative to list-based [`sequence`](crate::combinators::sequence):
//! `bind_p` hands the first parser's match to a continuation that picks the
//! next parser. The continuation's parser determines the final match; to keep
//! earlier values, close over them and [`return_p`] a combined match.
//!
//! ```rust,ignore
//! // key = value, producing Labeled(key, value)
//! let assignment = bind_p(word(), |key| {
//!     bind_p(symbol("="), move |_| {
//!         let key = key.text();
//!         bind_p(natural(), move |value| return_p(MatchValue::labeled(key.clone(), value)))
//!     })
//! });
//! ```

use crate::matching::MatchValue;
use crate::parser::{ParseResult, Parser};

/// Run `parser`, feed its match to `continuation`, and run the resulting
/// parser on the remainder.
///
/// Fails with the original input as remaining if either step fails.
pub fn bind_p<F>(parser: Parser, continuation: F) -> Parser
where
    F: Fn(MatchValue) -> Parser + Send + Sync + 'static,
{
    Parser::from_fn(move |input| {
        let first = parser.parse(input);
        if !first.success {
            return ParseResult::failure(input);
        }
        let next = continuation(first.matched);
        let second = next.parse(first.remaining);
        if second.success {
            second
        } else {
            ParseResult::failure(input)
        }
    })
}

/// Always succeeds without consuming input, yielding `value`
pub fn return_p(value: MatchValue) -> Parser {
    Parser::from_fn(move |input| ParseResult::success(input, value.clone()))
}
