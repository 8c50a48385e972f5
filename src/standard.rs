//! Standard parser definitions
//!
//! Primitives that carry no parameters are built once and shared. All of them
//! are defined as static references using `once_cell::sync::Lazy`; the public
//! constructors in [`crate::primitives`] hand out clones, which only bump a
//! reference count.

use once_cell::sync::Lazy;

use crate::matching::MatchValue;
use crate::parser::{ParseResult, Parser};
use crate::primitives::{self, skip_whitespace, symbol};

/// Whitespace skipper: always succeeds with the empty match
pub static WHITE_SPACE: Lazy<Parser> = Lazy::new(|| {
    Parser::from_fn(|input| ParseResult::success(skip_whitespace(input), MatchValue::empty()))
});

/// `\w+` after optional leading whitespace
pub static WORD: Lazy<Parser> = Lazy::new(primitives::word_token);

/// `[0-9]+` after optional leading whitespace
pub static NATURAL: Lazy<Parser> = Lazy::new(primitives::natural_token);

/// `[A-Za-z_]\w*` after optional leading whitespace
pub static IDENTIFIER: Lazy<Parser> = Lazy::new(primitives::identifier_token);

pub static COMMA: Lazy<Parser> = Lazy::new(|| symbol(","));

pub static SEMI: Lazy<Parser> = Lazy::new(|| symbol(";"));

pub static DOT: Lazy<Parser> = Lazy::new(|| symbol("."));
