//! Parser combinators
//!
//! Functions that take parsers and return a new parser. The grammar is just
//! the tree of calls that built the root parser; there is no compile step.
//!
//! Every combinator keeps the failure contract of [`crate::parser`]: when the
//! composite fails, it reports the input it was given as remaining, no matter
//! how far its children got. Choice is ordered (PEG style): alternatives are
//! tried in declaration order against the same input and the first success
//! wins.
//!
//! Repetition stops after a child succeeds without consuming anything, so
//! `many(maybe(p))` and friends terminate.

use crate::matching::MatchValue;
use crate::parser::{ParseResult, Parser};
use crate::primitives::{self, symbol};

/// Run `parsers` one after another on the shrinking input.
///
/// Returns the final remainder and every child's match, positionally.
fn run_sequence<'a>(parsers: &[Parser], input: &'a str) -> Option<(&'a str, Vec<MatchValue>)> {
    let mut rest = input;
    let mut matches = Vec::with_capacity(parsers.len());
    for parser in parsers {
        let result = parser.parse(rest);
        if !result.success {
            return None;
        }
        rest = result.remaining;
        matches.push(result.matched);
    }
    Some((rest, matches))
}

/// Match every parser in order; the match is a `Sequence` of their matches.
///
/// Fails atomically: if any child fails, the whole input is reported as
/// remaining.
pub fn sequence(parsers: Vec<Parser>) -> Parser {
    Parser::from_fn(move |input| match run_sequence(&parsers, input) {
        Some((rest, matches)) => ParseResult::success(rest, MatchValue::Sequence(matches)),
        None => ParseResult::failure(input),
    })
}

/// Like [`sequence`], but the children's matches (one per parser, empty
/// matches included) are folded by `reducer` into the sequence's match.
pub fn sequence_with<F>(parsers: Vec<Parser>, reducer: F) -> Parser
where
    F: Fn(Vec<MatchValue>) -> MatchValue + Send + Sync + 'static,
{
    Parser::from_fn(move |input| match run_sequence(&parsers, input) {
        Some((rest, matches)) => ParseResult::success(rest, reducer(matches)),
        None => ParseResult::failure(input),
    })
}

/// Ordered choice: the first alternative that succeeds on the original input
pub fn choice(parsers: Vec<Parser>) -> Parser {
    Parser::from_fn(move |input| {
        parsers
            .iter()
            .map(|parser| parser.parse(input))
            .find(|result| result.success)
            .unwrap_or_else(|| ParseResult::failure(input))
    })
}

/// Backtracking wrapper.
///
/// Identical to `parser` on success. On failure the original input is
/// reported as remaining, whatever the wrapped parser claimed.
pub fn attempt(parser: Parser) -> Parser {
    Parser::from_fn(move |input| {
        let result = parser.parse(input);
        if result.success {
            result
        } else {
            ParseResult::failure(input)
        }
    })
}

/// Zero or one: never fails, an absent match is empty
pub fn maybe(parser: Parser) -> Parser {
    Parser::from_fn(move |input| {
        let result = parser.parse(input);
        if result.success {
            result
        } else {
            ParseResult::success(input, MatchValue::empty())
        }
    })
}

/// `parser` between `(` and `)`, keeping only the inner match
pub fn parens(parser: Parser) -> Parser {
    sequence_with(
        vec![primitives::char('('), parser, primitives::char(')')],
        |mut matches| matches.swap_remove(1),
    )
}

/// Collect repeated matches of `parser` starting at `input`.
///
/// Stops at the first failure or after a success that consumed nothing.
fn repeat<'a>(parser: &Parser, input: &'a str, matches: &mut Vec<MatchValue>) -> &'a str {
    let mut rest = input;
    loop {
        let result = parser.parse(rest);
        if !result.success {
            break;
        }
        let consumed = result.remaining.len() < rest.len();
        rest = result.remaining;
        matches.push(result.matched);
        if !consumed {
            break;
        }
    }
    rest
}

/// Zero or more: never fails
pub fn many(parser: Parser) -> Parser {
    Parser::from_fn(move |input| {
        let mut matches = Vec::new();
        let rest = repeat(&parser, input, &mut matches);
        ParseResult::success(rest, MatchValue::Sequence(matches))
    })
}

/// One or more
pub fn many1(parser: Parser) -> Parser {
    Parser::from_fn(move |input| {
        let first = parser.parse(input);
        if !first.success {
            return ParseResult::failure(input);
        }
        let mut matches = vec![first.matched];
        let rest = if first.remaining.len() < input.len() {
            repeat(&parser, first.remaining, &mut matches)
        } else {
            first.remaining
        };
        ParseResult::success(rest, MatchValue::Sequence(matches))
    })
}

/// Elements after the first: repeated `separator` + `parser` pairs.
///
/// A separator without a following element is left unconsumed.
fn separated_tail<'a>(
    separator: &Parser,
    parser: &Parser,
    input: &'a str,
    matches: &mut Vec<MatchValue>,
) -> &'a str {
    let mut rest = input;
    loop {
        let sep = separator.parse(rest);
        if !sep.success {
            break;
        }
        let element = parser.parse(sep.remaining);
        if !element.success {
            break;
        }
        let consumed = element.remaining.len() < rest.len();
        rest = element.remaining;
        matches.push(element.matched);
        if !consumed {
            break;
        }
    }
    rest
}

fn separated<'a>(
    separator: &Parser,
    parser: &Parser,
    input: &'a str,
) -> Option<(&'a str, Vec<MatchValue>)> {
    let first = parser.parse(input);
    if !first.success {
        return None;
    }
    let mut matches = vec![first.matched];
    let rest = separated_tail(separator, parser, first.remaining, &mut matches);
    Some((rest, matches))
}

/// Zero or more `parser` matches separated by `separator`.
///
/// Never fails. The match holds only the elements, flat and in order;
/// separator matches are dropped.
pub fn sep_by(separator: Parser, parser: Parser) -> Parser {
    Parser::from_fn(move |input| match separated(&separator, &parser, input) {
        Some((rest, matches)) => ParseResult::success(rest, MatchValue::Sequence(matches)),
        None => ParseResult::success(input, MatchValue::empty()),
    })
}

/// One or more `parser` matches separated by `separator`
pub fn sep_by1(separator: Parser, parser: Parser) -> Parser {
    Parser::from_fn(move |input| match separated(&separator, &parser, input) {
        Some((rest, matches)) => ParseResult::success(rest, MatchValue::Sequence(matches)),
        None => ParseResult::failure(input),
    })
}

/// The first of `literals` that matches, as a [`symbol`]
pub fn one_of<S: AsRef<str>>(literals: &[S]) -> Parser {
    choice(literals.iter().map(|lit| symbol(lit.as_ref())).collect())
}

/// Tag `parser`'s match with `name`; failures pass through unchanged
pub fn label(name: impl Into<String>, parser: Parser) -> Parser {
    let name = name.into();
    Parser::from_fn(move |input| {
        let result = parser.parse(input);
        if result.success {
            ParseResult::success(
                result.remaining,
                MatchValue::labeled(name.as_str(), result.matched),
            )
        } else {
            result
        }
    })
}
