//! Error types
//!
//! Parse failure inside the combinator core is an ordinary value
//! (`ParseResult::success == false`) and never shows up here. These errors
//! cover building patterns and grammars, and the whole-input entry points in
//! [`crate::runner`].

use std::fmt;

/// Error raised while compiling a pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// The pattern is not a valid regular expression
    Invalid { pattern: String, message: String },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::Invalid { pattern, message } => {
                write!(f, "Invalid pattern '{}': {}", pattern, message)
            }
        }
    }
}

impl std::error::Error for PatternError {}

/// Errors from assembling recursive grammars
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// A rule or forward reference was defined more than once
    AlreadyDefined(String),
    /// A rule is referenced but never defined
    UndefinedRule(String),
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::AlreadyDefined(name) => write!(f, "Rule '{}' is already defined", name),
            GrammarError::UndefinedRule(name) => write!(f, "Rule '{}' is not defined", name),
        }
    }
}

impl std::error::Error for GrammarError {}

/// Errors from parsing a complete input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The root parser did not match
    NoMatch,
    /// The root parser matched but left input behind
    Incomplete { remaining: String },
    /// The input exceeds the configured size limit
    InputTooLarge { size: usize, limit: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::NoMatch => write!(f, "Input does not match the grammar"),
            ParseError::Incomplete { remaining } => {
                write!(f, "Unparsed input remains: {:?}", preview(remaining))
            }
            ParseError::InputTooLarge { size, limit } => {
                write!(f, "Input of {} bytes exceeds the limit of {} bytes", size, limit)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// First 40 characters of the residue, for messages
fn preview(text: &str) -> String {
    const MAX_CHARS: usize = 40;
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(MAX_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
