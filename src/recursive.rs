//! Recursive grammars
//!
//! A rule that refers to itself (directly or through other rules) cannot be
//! built bottom-up, because the parser value it needs does not exist yet. Two
//! deferred handles solve this without real cycles between parser values:
//!
//! - [`Forward`]: declare a slot, hand out references to it while building the
//!   grammar, then define it once.
//! - [`Grammar`]: a registry of named rules; `rule(name)` references are
//!   resolved when they are invoked, so rules may be defined in any order.
//!
//! References handed out by [`Forward::reference`] and [`Grammar::rule`] hold
//! the slot weakly. The `Forward` or `Grammar` itself (or a parser obtained
//! from [`Forward::into_parser`] / [`Grammar::get`] while the registry lives)
//! keeps the definitions alive. A reference whose slot is empty or gone fails
//! like any other parser.
//!
//! Left recursion is not supported: a rule that invokes itself before
//! consuming input never terminates.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use once_cell::sync::OnceCell;

use crate::error::GrammarError;
use crate::parser::{Parse, ParseResult, Parser};

type Slot = OnceCell<Parser>;

/// A parser declared now and defined later
#[derive(Clone)]
pub struct Forward {
    name: Arc<str>,
    slot: Arc<Slot>,
}

impl Forward {
    pub fn declare() -> Self {
        Self::named("<forward>")
    }

    /// Declare with a name used in errors and log messages
    pub fn named(name: &str) -> Self {
        Forward {
            name: Arc::from(name),
            slot: Arc::new(OnceCell::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fill the slot. A forward can only be defined once.
    pub fn define(&self, parser: Parser) -> Result<(), GrammarError> {
        self.slot
            .set(parser)
            .map_err(|_| GrammarError::AlreadyDefined(self.name.to_string()))
    }

    pub fn is_defined(&self) -> bool {
        self.slot.get().is_some()
    }

    /// Parser that resolves this forward at invocation time
    pub fn reference(&self) -> Parser {
        let name = Arc::clone(&self.name);
        let slot = Arc::downgrade(&self.slot);
        Parser::from_fn(move |input| resolve(&name, &slot, input))
    }

    /// Owning parser for this forward, suitable as a grammar root
    pub fn into_parser(self) -> Parser {
        Parser::new(self)
    }
}

impl Parse for Forward {
    fn parse<'a>(&self, input: &'a str) -> ParseResult<'a> {
        match self.slot.get() {
            Some(parser) => parser.parse(input),
            None => undefined(&self.name, input),
        }
    }
}

fn resolve<'a>(name: &str, slot: &Weak<Slot>, input: &'a str) -> ParseResult<'a> {
    match slot.upgrade() {
        Some(slot) => match slot.get() {
            Some(parser) => parser.parse(input),
            None => undefined(name, input),
        },
        None => {
            tracing::warn!(rule = name, "parser invoked after its grammar was dropped");
            ParseResult::failure(input)
        }
    }
}

fn undefined<'a>(name: &str, input: &'a str) -> ParseResult<'a> {
    tracing::warn!(rule = name, "parser invoked before its definition");
    ParseResult::failure(input)
}

/// A registry of named rules
#[derive(Default)]
pub struct Grammar {
    rules: HashMap<String, Forward>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, name: &str) -> &Forward {
        self.rules
            .entry(name.to_string())
            .or_insert_with(|| Forward::named(name))
    }

    /// Reference to rule `name`, resolved on each invocation.
    ///
    /// The rule does not have to be defined yet.
    pub fn rule(&mut self, name: &str) -> Parser {
        self.slot(name).reference()
    }

    pub fn define(&mut self, name: &str, parser: Parser) -> Result<(), GrammarError> {
        self.slot(name).define(parser)
    }

    /// The parser defined for `name`
    pub fn get(&self, name: &str) -> Option<Parser> {
        self.rules.get(name)?.slot.get().cloned()
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.rules.get(name).is_some_and(Forward::is_defined)
    }

    /// Invoke rule `name` on `input`; an unknown rule fails
    pub fn parse<'a>(&self, name: &str, input: &'a str) -> ParseResult<'a> {
        match self.rules.get(name) {
            Some(rule) => rule.parse(input),
            None => undefined(name, input),
        }
    }

    /// Verify that every referenced rule has a definition.
    ///
    /// Reports the alphabetically first missing rule.
    pub fn check(&self) -> Result<(), GrammarError> {
        let mut missing: Vec<&str> = self
            .rules
            .iter()
            .filter(|(_, rule)| !rule.is_defined())
            .map(|(name, _)| name.as_str())
            .collect();
        missing.sort_unstable();
        match missing.first() {
            Some(name) => Err(GrammarError::UndefinedRule(name.to_string())),
            None => Ok(()),
        }
    }

    /// Names of all referenced or defined rules, sorted
    pub fn rule_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::{choice, parens, sep_by};
    use crate::matching::MatchValue;
    use crate::primitives::{comma, natural};

    /// list := natural | "(" list ("," list)* ")"
    fn nested_list() -> Forward {
        let list = Forward::named("list");
        let body = sep_by(comma(), list.reference());
        list.define(choice(vec![natural(), parens(body)]))
            .expect("first definition");
        list
    }

    #[test]
    fn test_forward_recursion() {
        let list = nested_list();
        let result = list.parse("(1,(2,3),4)x");
        assert!(result.success);
        assert_eq!(result.remaining, "x");
        assert_eq!(
            result.matched,
            MatchValue::Sequence(vec![
                MatchValue::leaf("1"),
                MatchValue::Sequence(vec![MatchValue::leaf("2"), MatchValue::leaf("3")]),
                MatchValue::leaf("4"),
            ])
        );
    }

    #[test]
    fn test_forward_into_parser_keeps_definition_alive() {
        let root = nested_list().into_parser();
        assert!(root.parse("((7))").success);
    }

    #[test]
    fn test_reference_after_drop_fails() {
        let reference = {
            let list = nested_list();
            list.reference()
        };
        let result = reference.parse("1");
        assert!(!result.success);
        assert_eq!(result.remaining, "1");
    }

    #[test]
    fn test_undefined_forward_fails() {
        let forward = Forward::named("pending");
        let result = forward.reference().parse("abc");
        assert!(!result.success);
        assert_eq!(result.remaining, "abc");
        assert!(!forward.is_defined());
    }

    #[test]
    fn test_forward_defined_once() {
        let forward = Forward::named("x");
        forward.define(natural()).unwrap();
        assert_eq!(
            forward.define(natural()),
            Err(GrammarError::AlreadyDefined("x".to_string()))
        );
    }

    #[test]
    fn test_grammar_rules_resolve_late() {
        let mut grammar = Grammar::new();
        let value = grammar.rule("value");
        grammar
            .define("pair", crate::combinators::sequence(vec![value.clone(), comma(), value]))
            .unwrap();
        assert_eq!(
            grammar.check(),
            Err(GrammarError::UndefinedRule("value".to_string()))
        );
        assert!(!grammar.parse("pair", "1,2").success);

        grammar.define("value", natural()).unwrap();
        assert_eq!(grammar.check(), Ok(()));
        let result = grammar.parse("pair", "1,2");
        assert!(result.success);
        assert_eq!(result.remaining, "");
    }

    #[test]
    fn test_grammar_unknown_rule() {
        let grammar = Grammar::new();
        assert!(!grammar.parse("nothing", "x").success);
        assert!(grammar.get("nothing").is_none());
    }

    #[test]
    fn test_grammar_redefinition() {
        let mut grammar = Grammar::new();
        grammar.define("n", natural()).unwrap();
        assert_eq!(
            grammar.define("n", natural()),
            Err(GrammarError::AlreadyDefined("n".to_string()))
        );
        assert!(grammar.is_defined("n"));
        assert_eq!(grammar.rule_names(), vec!["n"]);
    }
}
