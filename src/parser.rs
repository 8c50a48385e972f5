//! Parser abstraction
//!
//! This module provides the single contract every primitive and combinator
//! satisfies: a parser is invoked with the remaining input and reports whether
//! it matched, what is left, and what it matched.
//!
//! # Architecture Overview
//!
//! ## 1. The `Parse` Trait
//!
//! The fundamental interface. Anything implementing `Parse` can be turned into a
//! [`Parser`]:
//!
//! ```rust,ignore
//! pub trait Parse: Send + Sync {
//!     fn parse<'a>(&self, input: &'a str) -> ParseResult<'a>;
//! }
//! ```
//!
//! Closures of the right shape implement it directly, as do the deferred
//! handles in [`crate::recursive`].
//!
//! ## 2. The `Parser` Type
//!
//! A cheap, clonable, thread-safe handle around a `Parse` implementation. All
//! combinators take and return `Parser` values, so grammars are assembled by
//! plain function calls and fluent methods:
//!
//! ```rust,ignore
//! let decl = symbol("var")
//!     .then(word().label("Name"))
//!     .then(semi());
//! let result = decl.parse("var x;");
//! ```
//!
//! ## 3. Position Model
//!
//! There is no cursor. A parser receives the unconsumed suffix and returns the
//! suffix left after it. Backtracking is therefore just reusing the original
//! `&str`; nothing has to be rewound.
//!
//! # Invariants
//!
//! - A successful result's `remaining` is a suffix of the input.
//! - A failed result's `remaining` is the input itself and its match is empty.

use std::fmt;
use std::sync::Arc;

use crate::combinators;
use crate::matching::MatchValue;
use crate::primitives;

/// Outcome of invoking a parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult<'a> {
    pub success: bool,
    pub remaining: &'a str,
    pub matched: MatchValue,
}

impl<'a> ParseResult<'a> {
    pub fn success(remaining: &'a str, matched: MatchValue) -> Self {
        ParseResult {
            success: true,
            remaining,
            matched,
        }
    }

    /// A failure that leaves `input` untouched
    pub fn failure(input: &'a str) -> Self {
        ParseResult {
            success: false,
            remaining: input,
            matched: MatchValue::empty(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Number of bytes consumed from `input`, which must be the string this
    /// result was produced from.
    pub fn consumed(&self, input: &str) -> usize {
        input.len() - self.remaining.len()
    }

    /// Convert into `Some((remaining, matched))` on success
    pub fn into_option(self) -> Option<(&'a str, MatchValue)> {
        if self.success {
            Some((self.remaining, self.matched))
        } else {
            None
        }
    }
}

/// Trait for anything that can be invoked on remaining input
///
/// Implementations must not keep state between invocations.
pub trait Parse: Send + Sync {
    fn parse<'a>(&self, input: &'a str) -> ParseResult<'a>;
}

// Allow closures to be parsers
impl<F> Parse for F
where
    F: for<'a> Fn(&'a str) -> ParseResult<'a> + Send + Sync,
{
    fn parse<'a>(&self, input: &'a str) -> ParseResult<'a> {
        self(input)
    }
}

type ParserFn = Arc<dyn Parse>;

/// A composable parser handle
///
/// Cloning shares the underlying parser. Since parsers hold no mutable state,
/// one grammar can be used from several threads at once.
#[derive(Clone)]
pub struct Parser {
    run_fn: ParserFn,
}

impl Parser {
    /// Wrap any `Parse` implementation
    pub fn new<P>(parser: P) -> Self
    where
        P: Parse + 'static,
    {
        Parser {
            run_fn: Arc::new(parser),
        }
    }

    /// Create a parser from a function
    pub fn from_fn<F>(f: F) -> Self
    where
        F: for<'a> Fn(&'a str) -> ParseResult<'a> + Send + Sync + 'static,
    {
        Parser::new(f)
    }

    /// Invoke this parser on the given input
    pub fn parse<'a>(&self, input: &'a str) -> ParseResult<'a> {
        self.run_fn.parse(input)
    }

    /// Sequence of `self` then `next`
    pub fn then(self, next: Parser) -> Parser {
        combinators::sequence(vec![self, next])
    }

    /// Ordered choice between `self` and `other`
    pub fn or(self, other: Parser) -> Parser {
        combinators::choice(vec![self, other])
    }

    /// Tag this parser's match with `name`
    pub fn label(self, name: impl Into<String>) -> Parser {
        combinators::label(name, self)
    }

    /// Rewrite a successful match
    pub fn map<F>(self, f: F) -> Parser
    where
        F: Fn(MatchValue) -> MatchValue + Send + Sync + 'static,
    {
        Parser::from_fn(move |input| {
            let result = self.parse(input);
            if result.success {
                ParseResult::success(result.remaining, f(result.matched))
            } else {
                ParseResult::failure(input)
            }
        })
    }

    /// Also consume trailing whitespace on success
    pub fn lexeme(self) -> Parser {
        primitives::lexeme(self)
    }

    pub fn maybe(self) -> Parser {
        combinators::maybe(self)
    }

    pub fn many(self) -> Parser {
        combinators::many(self)
    }

    pub fn attempt(self) -> Parser {
        combinators::attempt(self)
    }
}

impl Parse for Parser {
    fn parse<'a>(&self, input: &'a str) -> ParseResult<'a> {
        Parser::parse(self, input)
    }
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Parser { .. }")
    }
}
