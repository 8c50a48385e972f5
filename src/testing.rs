//! Fluent assertion API for parse trees
//!
//! ```rust,ignore
//! assert_tree(&tree)
//!     .key("Name", |name| {
//!         name.scalar("res");
//!     })
//!     .key("Value", |value| {
//!         value.scalar("42");
//!     })
//!     .key_count(2);
//! ```
//!
//! Failures panic with the path to the offending node, e.g. `tree.Vars[2]`.

use crate::tree::ParseTree;

// ============================================================================
// Entry Point
// ============================================================================

/// Create an assertion builder for a parse tree
pub fn assert_tree(tree: &ParseTree) -> TreeAssertion<'_> {
    TreeAssertion {
        tree,
        context: "tree".to_string(),
    }
}

// ============================================================================
// Node Assertions
// ============================================================================

pub struct TreeAssertion<'a> {
    tree: &'a ParseTree,
    context: String,
}

impl<'a> TreeAssertion<'a> {
    fn kind(&self) -> &'static str {
        match self.tree {
            ParseTree::Scalar(_) => "Scalar",
            ParseTree::List(_) => "List",
            ParseTree::Map(_) => "Map",
        }
    }

    /// Assert this node is the scalar `expected`
    pub fn scalar(self, expected: &str) -> Self {
        match self.tree {
            ParseTree::Scalar(text) => assert_eq!(
                text, expected,
                "{}: Expected scalar {:?}, found {:?}",
                self.context, expected, text
            ),
            _ => panic!("{}: Expected Scalar, found {}", self.context, self.kind()),
        }
        self
    }

    /// Assert this node is a list of exactly these scalars
    pub fn scalars(self, expected: &[&str]) -> Self {
        let items = self.list_items();
        let actual: Vec<Option<&str>> = items.iter().map(ParseTree::as_str).collect();
        let wanted: Vec<Option<&str>> = expected.iter().map(|s| Some(*s)).collect();
        assert_eq!(
            actual, wanted,
            "{}: Expected scalars {:?}, found {:?}",
            self.context, expected, items
        );
        self
    }

    /// Assert this node is a list of `expected` items
    pub fn len(self, expected: usize) -> Self {
        let actual = self.list_items().len();
        assert_eq!(
            actual, expected,
            "{}: Expected {} items, found {}",
            self.context, expected, actual
        );
        self
    }

    pub fn item<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(TreeAssertion<'a>),
    {
        let items = self.list_items();
        assert!(
            index < items.len(),
            "{}: Item index {} out of bounds ({} items)",
            self.context,
            index,
            items.len()
        );
        assertion(TreeAssertion {
            tree: &items[index],
            context: format!("{}[{}]", self.context, index),
        });
        self
    }

    /// Assert this node is a map with `key`, and check its value
    pub fn key<F>(self, key: &str, assertion: F) -> Self
    where
        F: FnOnce(TreeAssertion<'a>),
    {
        let entries = match self.tree {
            ParseTree::Map(entries) => entries,
            _ => panic!("{}: Expected Map, found {}", self.context, self.kind()),
        };
        let value = entries.get(key).unwrap_or_else(|| {
            panic!(
                "{}: Missing key {:?}, keys are {:?}",
                self.context,
                key,
                entries.keys().collect::<Vec<_>>()
            )
        });
        assertion(TreeAssertion {
            tree: value,
            context: format!("{}.{}", self.context, key),
        });
        self
    }

    /// Assert this node is a map without `key`
    pub fn no_key(self, key: &str) -> Self {
        match self.tree {
            ParseTree::Map(entries) => assert!(
                !entries.contains_key(key),
                "{}: Unexpected key {:?}",
                self.context,
                key
            ),
            _ => panic!("{}: Expected Map, found {}", self.context, self.kind()),
        }
        self
    }

    /// Assert this node is a map with exactly `expected` keys
    pub fn key_count(self, expected: usize) -> Self {
        match self.tree {
            ParseTree::Map(entries) => assert_eq!(
                entries.len(),
                expected,
                "{}: Expected {} keys, found {:?}",
                self.context,
                expected,
                entries.keys().collect::<Vec<_>>()
            ),
            _ => panic!("{}: Expected Map, found {}", self.context, self.kind()),
        }
        self
    }

    pub fn empty(self) -> Self {
        assert!(
            self.tree.is_empty(),
            "{}: Expected empty node, found {:?}",
            self.context,
            self.tree
        );
        self
    }

    fn list_items(&self) -> &'a [ParseTree] {
        match self.tree {
            ParseTree::List(items) => items,
            _ => panic!("{}: Expected List, found {}", self.context, self.kind()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ParseTree {
        ParseTree::map([
            ("Name", ParseTree::scalar("res")),
            (
                "Vars",
                ParseTree::List(vec![ParseTree::scalar("u"), ParseTree::scalar("v")]),
            ),
        ])
    }

    #[test]
    fn test_passing_assertions() {
        assert_tree(&sample())
            .key_count(2)
            .key("Name", |n| {
                n.scalar("res");
            })
            .key("Vars", |v| {
                v.len(2).scalars(&["u", "v"]).item(1, |i| {
                    i.scalar("v");
                });
            })
            .no_key("Value");
    }

    #[test]
    #[should_panic(expected = "tree.Vars[1]: Expected scalar \"w\"")]
    fn test_failure_reports_path() {
        assert_tree(&sample()).key("Vars", |v| {
            v.item(1, |i| {
                i.scalar("w");
            });
        });
    }

    #[test]
    #[should_panic(expected = "Missing key \"Value\"")]
    fn test_missing_key() {
        assert_tree(&sample()).key("Value", |_| {});
    }

    #[test]
    fn test_empty() {
        assert_tree(&ParseTree::List(vec![])).empty();
    }
}
