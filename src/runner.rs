//! Whole-input entry points
//!
//! [`apply`] is a plain invocation of the root parser. [`parse_complete`] and
//! [`parse_tree`] additionally require the grammar to consume the entire input
//! and turn the remaining ways of not getting there into [`ParseError`]s.

use crate::config::CombinatorConfig;
use crate::error::ParseError;
use crate::matching::MatchValue;
use crate::parser::{ParseResult, Parser};
use crate::primitives::skip_whitespace;
use crate::tree::ParseTree;

/// Invoke `parser` on `input`
pub fn apply<'a>(parser: &Parser, input: &'a str) -> ParseResult<'a> {
    tracing::trace!(input_bytes = input.len(), "parse started");
    let result = parser.parse(input);
    tracing::trace!(
        success = result.success,
        consumed = result.consumed(input),
        "parse finished"
    );
    result
}

/// Parse `input` completely and return the raw match.
///
/// Trailing whitespace is accepted when
/// `parsing.allow_trailing_whitespace` is set.
pub fn parse_complete(
    parser: &Parser,
    input: &str,
    config: &CombinatorConfig,
) -> Result<MatchValue, ParseError> {
    if let Some(limit) = config.input_limit() {
        if input.len() > limit {
            tracing::debug!(size = input.len(), limit, "input rejected");
            return Err(ParseError::InputTooLarge {
                size: input.len(),
                limit,
            });
        }
    }

    let result = apply(parser, input);
    if !result.success {
        tracing::debug!("root parser did not match");
        return Err(ParseError::NoMatch);
    }

    let rest = if config.parsing.allow_trailing_whitespace {
        skip_whitespace(result.remaining)
    } else {
        result.remaining
    };
    if !rest.is_empty() {
        tracing::debug!(remaining_bytes = rest.len(), "input left after root parser");
        return Err(ParseError::Incomplete {
            remaining: rest.to_string(),
        });
    }
    Ok(result.matched)
}

/// Parse `input` completely and build its parse tree
pub fn parse_tree(
    parser: &Parser,
    input: &str,
    config: &CombinatorConfig,
) -> Result<ParseTree, ParseError> {
    let matched = parse_complete(parser, input, config)?;
    Ok(config
        .tree_builder()
        .build(&matched)
        .unwrap_or_else(|| ParseTree::List(Vec::new())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::{label, sep_by};
    use crate::config::Loader;
    use crate::primitives::{comma, semi, word};

    fn vars() -> Parser {
        sep_by(comma(), label("Var", word())).then(semi())
    }

    #[test]
    fn test_apply_is_plain_invocation() {
        let parser = vars();
        assert_eq!(apply(&parser, "a, b; x"), parser.parse("a, b; x"));
    }

    #[test]
    fn test_parse_complete() {
        let config = CombinatorConfig::default();
        assert!(parse_complete(&vars(), "a,b;", &config).is_ok());
        assert!(parse_complete(&vars(), "a,b;  \n", &config).is_ok());
    }

    #[test]
    fn test_parse_complete_rejects_residue() {
        let config = CombinatorConfig::default();
        assert_eq!(
            parse_complete(&vars(), "a,b; c", &config),
            Err(ParseError::Incomplete {
                remaining: "c".to_string()
            })
        );
        assert_eq!(
            parse_complete(&vars(), "a,b", &config),
            Err(ParseError::NoMatch)
        );
    }

    #[test]
    fn test_trailing_whitespace_can_be_disallowed() {
        let config = Loader::new()
            .set_override("parsing.allow_trailing_whitespace", false)
            .unwrap()
            .build()
            .unwrap();
        let parser = word();
        assert_eq!(
            parse_complete(&parser, "abc ", &config),
            Err(ParseError::Incomplete {
                remaining: " ".to_string()
            })
        );
    }

    #[test]
    fn test_input_limit() {
        let config = Loader::new()
            .set_override("limits.max_input_bytes", 4_i64)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            parse_complete(&word(), "abcdef", &config),
            Err(ParseError::InputTooLarge { size: 6, limit: 4 })
        );
        assert!(parse_complete(&word(), "abcd", &config).is_ok());
    }

    #[test]
    fn test_parse_tree_uses_configured_policy() {
        let collect = CombinatorConfig::default();
        let tree = parse_tree(&vars(), "u,v,w;", &collect).unwrap();
        assert_eq!(
            tree.get("Var").and_then(ParseTree::as_list).map(|l| l.len()),
            Some(3)
        );

        let overwrite = Loader::new()
            .set_override("tree.duplicate_labels", "overwrite")
            .unwrap()
            .build()
            .unwrap();
        let tree = parse_tree(&vars(), "u,v,w;", &overwrite).unwrap();
        assert_eq!(tree.get("Var").and_then(ParseTree::as_str), Some("w"));
    }
}
