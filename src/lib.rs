//! # lex-combinators
//!
//! Parser combinators for ad-hoc grammars that produce labeled parse trees.
//!
//! A grammar is assembled from primitive parsers (characters, words, numbers,
//! literal symbols, regular expressions) and combinators (sequence, ordered
//! choice, repetition, optionality, backtracking). The root parser is invoked
//! once on an in-memory string; parts of the grammar tagged with
//! [`label`](combinators::label) come out as keys of the resulting
//! [`ParseTree`].
//!
//! ```rust,ignore
//! use lex_combinators::prelude::*;
//!
//! let decl = sequence(vec![
//!     symbol("var"),
//!     label("Name", word()),
//!     maybe(sequence(vec![symbol("="), label("Value", natural())])),
//!     semi(),
//! ]);
//! let result = decl.parse("var res = 42;");
//! assert_eq!(result.remaining, "");
//! let tree = get_parse_tree(&result.matched); // {"Name": "res", "Value": "42"}
//! ```
//!
//! File Layout
//!
//! - `parser`, `matching`: the parser contract and the raw match tree
//! - `primitives`, `standard`: leaf parsers and their shared instances
//! - `combinators`, `monad`: composition, list style and continuation style
//! - `recursive`: deferred references for self-referential grammars
//! - `tree`: cleanup of raw matches into parse trees
//! - `runner`, `config`: whole-input parsing and its settings
//!
//! Parsing is synchronous and pure. Grammars hold no mutable state, so one
//! grammar may be shared between threads. Left-recursive grammars do not
//! terminate.

pub mod combinators;
pub mod config;
pub mod error;
pub mod matching;
pub mod monad;
pub mod parser;
pub mod primitives;
pub mod recursive;
pub mod runner;
pub mod standard;
pub mod testing;
pub mod tree;

pub use error::{GrammarError, ParseError, PatternError};
pub use matching::MatchValue;
pub use parser::{Parse, ParseResult, Parser};
pub use tree::{get_parse_tree, DuplicateLabels, ParseTree, TreeBuilder};

/// Everything needed to write a grammar
pub mod prelude {
    pub use crate::combinators::{
        attempt, choice, label, many, many1, maybe, one_of, parens, sep_by, sep_by1, sequence,
        sequence_with,
    };
    pub use crate::matching::MatchValue;
    pub use crate::monad::{bind_p, return_p};
    pub use crate::parser::{Parse, ParseResult, Parser};
    pub use crate::primitives::{
        char, comma, dot, greedy_upto, identifier, lexeme, natural, regex, semi, symbol, upto,
        white_space, word,
    };
    pub use crate::recursive::{Forward, Grammar};
    pub use crate::tree::{get_parse_tree, ParseTree};
}
