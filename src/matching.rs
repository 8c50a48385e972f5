//! Raw match tree
//!
//! Every parser reports what it consumed as a [`MatchValue`]. The value mirrors
//! the shape of the grammar that produced it: primitives yield leaves, labels
//! wrap their parser's value, and composite parsers collect their children into
//! sequences. Nothing is discarded at this stage; cleanup happens later in
//! [`crate::tree`].

use std::fmt;

/// A node of the raw match tree.
///
/// The empty match (what a failed parser, `white_space` or an absent `maybe`
/// report) is the empty sequence, see [`MatchValue::empty`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchValue {
    /// Text matched by a primitive
    Leaf(String),
    /// A match tagged with a label name
    Labeled(String, Box<MatchValue>),
    /// Matches of composed parsers, in input order
    Sequence(Vec<MatchValue>),
}

impl MatchValue {
    /// The empty match
    pub fn empty() -> Self {
        MatchValue::Sequence(Vec::new())
    }

    pub fn leaf(text: impl Into<String>) -> Self {
        MatchValue::Leaf(text.into())
    }

    pub fn labeled(name: impl Into<String>, value: MatchValue) -> Self {
        MatchValue::Labeled(name.into(), Box::new(value))
    }

    /// True for the empty sequence only.
    ///
    /// A sequence of empty children is not itself empty; the tree builder
    /// handles those when it discards empty results.
    pub fn is_empty(&self) -> bool {
        matches!(self, MatchValue::Sequence(items) if items.is_empty())
    }

    /// Label name if this is a labeled node
    pub fn label(&self) -> Option<&str> {
        match self {
            MatchValue::Labeled(name, _) => Some(name),
            _ => None,
        }
    }

    /// Concatenation of every leaf below this node, in order
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            MatchValue::Leaf(text) => out.push_str(text),
            MatchValue::Labeled(_, value) => value.collect_text(out),
            MatchValue::Sequence(items) => items.iter().for_each(|item| item.collect_text(out)),
        }
    }
}

impl Default for MatchValue {
    fn default() -> Self {
        MatchValue::empty()
    }
}

impl fmt::Display for MatchValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchValue::Leaf(text) => write!(f, "{:?}", text),
            MatchValue::Labeled(name, value) => write!(f, "{}: {}", name, value),
            MatchValue::Sequence(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}
