//! Primitive parsers
//!
//! Leaf-level parsers built directly on the input prefix. Token primitives
//! (`word`, `natural`, `identifier`, `symbol`) skip leading whitespace before
//! matching, so that a token following an unlexed token still lines up; only
//! `symbol` and explicit [`lexeme`] wrappers eat trailing whitespace.
//!
//! Pattern-based primitives compile their regular expression once, when the
//! parser is constructed.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::PatternError;
use crate::matching::MatchValue;
use crate::parser::{ParseResult, Parser};
use crate::standard;

static WORD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\w+").expect("word regex must compile"));
static NATURAL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+").expect("natural regex must compile"));
static IDENTIFIER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_]\w*").expect("identifier regex must compile"));

/// Drop leading whitespace
pub(crate) fn skip_whitespace(input: &str) -> &str {
    input.trim_start()
}

/// How a [`Pattern`] relates its match to the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PatternKind {
    /// Match must start at the beginning of the input; the match is consumed
    Anchored,
    /// Consume everything before the first occurrence
    Upto,
    /// Consume everything before the last occurrence
    GreedyUpto,
}

/// A compiled regular expression together with its matching mode
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    kind: PatternKind,
    regex: Regex,
}

impl Pattern {
    /// Pattern that must match at the start of the input
    pub fn anchored(pattern: &str) -> Result<Self, PatternError> {
        Self::compile(pattern, PatternKind::Anchored, format!("^(?:{})", pattern))
    }

    /// Pattern whose first occurrence ends the consumed prefix
    pub fn upto(pattern: &str) -> Result<Self, PatternError> {
        Self::compile(pattern, PatternKind::Upto, format!("^((?s:.*?))(?:{})", pattern))
    }

    /// Pattern whose last occurrence ends the consumed prefix
    pub fn greedy_upto(pattern: &str) -> Result<Self, PatternError> {
        Self::compile(
            pattern,
            PatternKind::GreedyUpto,
            format!("^((?s:.*))(?:{})", pattern),
        )
    }

    fn compile(source: &str, kind: PatternKind, full: String) -> Result<Self, PatternError> {
        let regex = Regex::new(&full).map_err(|e| PatternError::Invalid {
            pattern: source.to_string(),
            message: e.to_string(),
        })?;
        Ok(Pattern {
            source: source.to_string(),
            kind,
            regex,
        })
    }

    /// The pattern as written by the caller
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Split `input` into the consumed prefix and the rest, or `None` if the
    /// pattern does not apply.
    pub fn split<'a>(&self, input: &'a str) -> Option<(&'a str, &'a str)> {
        let end = match self.kind {
            PatternKind::Anchored => self.regex.find(input)?.end(),
            PatternKind::Upto | PatternKind::GreedyUpto => {
                self.regex.captures(input)?.get(1)?.end()
            }
        };
        Some(input.split_at(end))
    }

    /// Parser that consumes what [`Pattern::split`] reports as the prefix
    pub fn into_parser(self) -> Parser {
        Parser::from_fn(move |input| match self.split(input) {
            Some((matched, rest)) => ParseResult::success(rest, MatchValue::leaf(matched)),
            None => ParseResult::failure(input),
        })
    }
}

/// Consume zero or more whitespace characters. Never fails; the match is empty.
pub fn white_space() -> Parser {
    standard::WHITE_SPACE.clone()
}

/// Match exactly the character `c`
pub fn char(c: char) -> Parser {
    Parser::from_fn(move |input| match input.strip_prefix(c) {
        Some(rest) => ParseResult::success(rest, MatchValue::leaf(c)),
        None => ParseResult::failure(input),
    })
}

/// Match `pattern` at the start of the input.
///
/// Panics if `pattern` is not a valid regular expression; use [`try_regex`]
/// for patterns that are not known ahead of time.
pub fn regex(pattern: &str) -> Parser {
    Pattern::anchored(pattern)
        .unwrap_or_else(|e| panic!("{}", e))
        .into_parser()
}

/// Consume up to (excluding) the first occurrence of `pattern`.
///
/// Panics on an invalid pattern, see [`try_upto`].
pub fn upto(pattern: &str) -> Parser {
    Pattern::upto(pattern)
        .unwrap_or_else(|e| panic!("{}", e))
        .into_parser()
}

/// Consume up to (excluding) the last occurrence of `pattern`.
///
/// Panics on an invalid pattern, see [`try_greedy_upto`].
pub fn greedy_upto(pattern: &str) -> Parser {
    Pattern::greedy_upto(pattern)
        .unwrap_or_else(|e| panic!("{}", e))
        .into_parser()
}

pub fn try_regex(pattern: &str) -> Result<Parser, PatternError> {
    Ok(Pattern::anchored(pattern)?.into_parser())
}

pub fn try_upto(pattern: &str) -> Result<Parser, PatternError> {
    Ok(Pattern::upto(pattern)?.into_parser())
}

pub fn try_greedy_upto(pattern: &str) -> Result<Parser, PatternError> {
    Ok(Pattern::greedy_upto(pattern)?.into_parser())
}

/// Skip leading whitespace, then match `regex` at the front
pub(crate) fn token(regex: &'static Lazy<Regex>) -> Parser {
    Parser::from_fn(move |input| {
        let start = skip_whitespace(input);
        match regex.find(start) {
            Some(m) => ParseResult::success(&start[m.end()..], MatchValue::leaf(m.as_str())),
            None => ParseResult::failure(input),
        }
    })
}

pub(crate) fn word_token() -> Parser {
    token(&WORD_REGEX)
}

pub(crate) fn natural_token() -> Parser {
    token(&NATURAL_REGEX)
}

pub(crate) fn identifier_token() -> Parser {
    token(&IDENTIFIER_REGEX)
}

/// One or more word characters (letters, digits, underscore)
pub fn word() -> Parser {
    standard::WORD.clone()
}

/// One or more decimal digits, kept as text
pub fn natural() -> Parser {
    standard::NATURAL.clone()
}

/// A letter or underscore followed by word characters
pub fn identifier() -> Parser {
    standard::IDENTIFIER.clone()
}

/// Invoke `parser`, then consume trailing whitespace
pub fn lexeme(parser: Parser) -> Parser {
    Parser::from_fn(move |input| {
        let result = parser.parse(input);
        if result.success {
            ParseResult::success(skip_whitespace(result.remaining), result.matched)
        } else {
            ParseResult::failure(input)
        }
    })
}

/// Match the literal `lit` and the whitespace around it.
///
/// The match is the literal itself.
pub fn symbol(lit: &str) -> Parser {
    let lit = lit.to_string();
    Parser::from_fn(move |input| {
        match skip_whitespace(input).strip_prefix(lit.as_str()) {
            Some(rest) => ParseResult::success(skip_whitespace(rest), MatchValue::leaf(lit.as_str())),
            None => ParseResult::failure(input),
        }
    })
}

pub fn comma() -> Parser {
    standard::COMMA.clone()
}

pub fn semi() -> Parser {
    standard::SEMI.clone()
}

pub fn dot() -> Parser {
    standard::DOT.clone()
}
