//! Parse-tree builder
//!
//! Turns the raw [`MatchValue`] produced by a parse into a [`ParseTree`]:
//!
//! - `Leaf(text)` becomes a scalar.
//! - `Labeled(name, v)` becomes a single-entry map `{name: build(v)}`.
//! - `Sequence(items)` builds every item and drops the empty ones. If any of
//!   the remaining items is a map, unlabeled items are discarded and the maps
//!   are merged into one; otherwise the items form a list.
//!
//! Empty results (the empty match, sequences of nothing but empties, labels
//! over empty matches) vanish instead of showing up as null entries, so an
//! optional branch that did not match is simply absent.
//!
//! ## Repeated labels
//!
//! When the same label occurs more than once in one merge, the
//! [`DuplicateLabels`] policy decides: `Collect` (the default) gathers the
//! values into an ordered list under the key, `Overwrite` keeps the last one.
//! Collected lists stay open while merging continues through unlabeled
//! nesting, so `u`, then `[v, w]` collected deeper down, yields `[u, v, w]`
//! rather than `[u, [v, w]]`. A label closes its contents: a map under a
//! label is a value like any other.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::matching::MatchValue;

/// Cleaned-up result of a parse
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParseTree {
    Scalar(String),
    List(Vec<ParseTree>),
    Map(BTreeMap<String, ParseTree>),
}

impl ParseTree {
    pub fn scalar(text: impl Into<String>) -> Self {
        ParseTree::Scalar(text.into())
    }

    /// Map from `(key, value)` pairs; later duplicates overwrite earlier ones
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, ParseTree)>,
    {
        ParseTree::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParseTree::Scalar(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ParseTree]> {
        match self {
            ParseTree::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, ParseTree>> {
        match self {
            ParseTree::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Entry `key` of a map
    pub fn get(&self, key: &str) -> Option<&ParseTree> {
        self.as_map()?.get(key)
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ParseTree::Scalar(_) => false,
            ParseTree::List(items) => items.is_empty(),
            ParseTree::Map(entries) => entries.is_empty(),
        }
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            ParseTree::Scalar(text) => serde_json::Value::String(text.clone()),
            ParseTree::List(items) => {
                serde_json::Value::Array(items.iter().map(ParseTree::to_json_value).collect())
            }
            ParseTree::Map(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json_value()))
                    .collect(),
            ),
        }
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

/// What to do when one label occurs several times in the same map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateLabels {
    /// Gather all values, in order, into a list under the label
    #[default]
    Collect,
    /// Keep only the last value
    Overwrite,
}

/// A map entry during merging
#[derive(Debug)]
enum Field {
    Single(ParseTree),
    Collected(Vec<ParseTree>),
}

impl Field {
    fn into_values(self) -> Vec<ParseTree> {
        match self {
            Field::Single(value) => vec![value],
            Field::Collected(values) => values,
        }
    }

    fn finish(self) -> ParseTree {
        match self {
            Field::Single(value) => value,
            Field::Collected(values) => ParseTree::List(values),
        }
    }
}

/// Intermediate result that still knows which keys are collected lists
#[derive(Debug)]
enum Node {
    Scalar(String),
    List(Vec<ParseTree>),
    Map(BTreeMap<String, Field>),
}

impl Node {
    fn finish(self) -> ParseTree {
        match self {
            Node::Scalar(text) => ParseTree::Scalar(text),
            Node::List(items) => ParseTree::List(items),
            Node::Map(fields) => {
                ParseTree::Map(fields.into_iter().map(|(k, f)| (k, f.finish())).collect())
            }
        }
    }
}

/// Builds parse trees under a [`DuplicateLabels`] policy
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeBuilder {
    policy: DuplicateLabels,
}

impl TreeBuilder {
    pub fn new(policy: DuplicateLabels) -> Self {
        TreeBuilder { policy }
    }

    pub fn policy(&self) -> DuplicateLabels {
        self.policy
    }

    /// Build the tree for `value`, or `None` if nothing in it survives cleanup
    pub fn build(&self, value: &MatchValue) -> Option<ParseTree> {
        self.node(value).map(Node::finish)
    }

    fn node(&self, value: &MatchValue) -> Option<Node> {
        match value {
            MatchValue::Leaf(text) => Some(Node::Scalar(text.clone())),
            MatchValue::Labeled(name, inner) => {
                let inner = self.node(inner)?.finish();
                let mut fields = BTreeMap::new();
                fields.insert(name.clone(), Field::Single(inner));
                Some(Node::Map(fields))
            }
            MatchValue::Sequence(items) => {
                let nodes: Vec<Node> = items.iter().filter_map(|item| self.node(item)).collect();
                if nodes.is_empty() {
                    None
                } else if nodes.iter().any(|node| matches!(node, Node::Map(_))) {
                    Some(Node::Map(self.merge(nodes)))
                } else {
                    Some(Node::List(nodes.into_iter().map(Node::finish).collect()))
                }
            }
        }
    }

    /// Merge the map nodes; anything else is unlabeled and dropped
    fn merge(&self, nodes: Vec<Node>) -> BTreeMap<String, Field> {
        let mut merged: BTreeMap<String, Field> = BTreeMap::new();
        for node in nodes {
            let Node::Map(fields) = node else {
                continue;
            };
            for (key, field) in fields {
                match self.policy {
                    DuplicateLabels::Overwrite => {
                        merged.insert(key, field);
                    }
                    DuplicateLabels::Collect => match merged.remove(&key) {
                        None => {
                            merged.insert(key, field);
                        }
                        Some(existing) => {
                            let mut values = existing.into_values();
                            values.extend(field.into_values());
                            merged.insert(key, Field::Collected(values));
                        }
                    },
                }
            }
        }
        merged
    }
}

/// Build the parse tree of `value` with the default policy.
///
/// A match with nothing left after cleanup yields an empty list.
pub fn get_parse_tree(value: &MatchValue) -> ParseTree {
    TreeBuilder::default()
        .build(value)
        .unwrap_or_else(|| ParseTree::List(Vec::new()))
}
