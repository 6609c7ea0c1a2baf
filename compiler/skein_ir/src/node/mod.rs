//! Parse-tree nodes.
//!
//! A [`Node`] is either a leaf wrapping exactly one token or an internal node
//! wrapping an ordered list of children. `Internal(vec![])` is a valid node
//! (an empty repetition, a skipped optional) and is distinct from a leaf.
//!
//! Trees are as deep as the input is nested. Cloning, comparing, hashing and
//! rendering recurse under [`ensure_sufficient_stack`]; dropping is iterative.


use std::fmt;
use std::hash::{Hash, Hasher};

use skein_stack::ensure_sufficient_stack;

use crate::Token;

/// What a node carries.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Payload {
    Leaf(Token),
    Internal(Vec<Node>),
}

/// A labeled parse-tree element.
///
/// `kind` is the name of the rule that produced the node.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub kind: String,
    pub payload: Payload,
}

impl Node {
    pub fn leaf(kind: impl Into<String>, token: Token) -> Self {
        Node {
            kind: kind.into(),
            payload: Payload::Leaf(token),
        }
    }

    pub fn internal(kind: impl Into<String>, children: Vec<Node>) -> Self {
        Node {
            kind: kind.into(),
            payload: Payload::Internal(children),
        }
    }

    /// Same node under a different label.
    #[must_use]
    pub fn relabeled(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self.payload, Payload::Leaf(_))
    }

    /// The wrapped token, for leaves.
    pub fn token(&self) -> Option<&Token> {
        match &self.payload {
            Payload::Leaf(token) => Some(token),
            Payload::Internal(_) => None,
        }
    }

    /// The children, in order. Leaves have none.
    pub fn children(&self) -> &[Node] {
        match &self.payload {
            Payload::Leaf(_) => &[],
            Payload::Internal(children) => children,
        }
    }

    /// Consume the node, returning its children.
    pub fn into_children(mut self) -> Vec<Node> {
        match &mut self.payload {
            Payload::Leaf(_) => Vec::new(),
            Payload::Internal(children) => std::mem::take(children),
        }
    }

    /// The `index`th child, if any.
    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children().get(index)
    }

    /// Direct children labeled `kind`.
    pub fn nodes_of_kind<'n>(&'n self, kind: &'n str) -> impl Iterator<Item = &'n Node> + 'n {
        self.children().iter().filter(move |child| child.kind == kind)
    }

    /// First direct child labeled `kind`.
    pub fn node_of_kind(&self, kind: &str) -> Option<&Node> {
        self.children().iter().find(|child| child.kind == kind)
    }

    /// Every token under this node, left to right.
    pub fn leaves(&self) -> Vec<&Token> {
        let mut tokens = Vec::new();
        self.collect_leaves(&mut tokens);
        tokens
    }

    fn collect_leaves<'n>(&'n self, out: &mut Vec<&'n Token>) {
        ensure_sufficient_stack(|| match &self.payload {
            Payload::Leaf(token) => out.push(token),
            Payload::Internal(children) => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        });
    }

    /// Concatenated text of every token under this node.
    pub fn text(&self) -> String {
        self.leaves().iter().map(|token| token.text.as_str()).collect()
    }

    /// Render the tree with box-drawing guides, one node per line.
    ///
    /// ```text
    /// Seq
    ///   ├─Int • 1
    ///   └─Keyword • x
    /// ```
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        self.write_pretty(&mut out, "", true, true);
        out
    }

    fn write_pretty(&self, out: &mut String, indent: &str, is_root: bool, is_last: bool) {
        ensure_sufficient_stack(|| self.write_pretty_line(out, indent, is_root, is_last));
    }

    fn write_pretty_line(&self, out: &mut String, indent: &str, is_root: bool, is_last: bool) {
        out.push_str(indent);
        if !is_root {
            out.push_str(if is_last { "└─" } else { "├─" });
        }
        out.push_str(&self.kind);

        match &self.payload {
            Payload::Leaf(token) => {
                out.push_str(" • ");
                out.push_str(&escape_text(&token.text));
                out.push('\n');
            }
            Payload::Internal(children) => {
                out.push('\n');
                let guide = if is_last { "  " } else { "│ " };
                let child_indent = format!("{indent}{guide}");
                for (i, child) in children.iter().enumerate() {
                    child.write_pretty(out, &child_indent, false, i + 1 == children.len());
                }
            }
        }
    }
}

impl Clone for Node {
    fn clone(&self) -> Self {
        ensure_sufficient_stack(|| Node {
            kind: self.kind.clone(),
            payload: self.payload.clone(),
        })
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        let Payload::Internal(children) = &mut self.payload else {
            return;
        };
        // Detach every descendant so each one drops with no children left.
        let mut pending = std::mem::take(children);
        while let Some(mut node) = pending.pop() {
            if let Payload::Internal(grandchildren) = &mut node.payload {
                pending.append(grandchildren);
            }
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        ensure_sufficient_stack(|| self.kind == other.kind && self.payload == other.payload)
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        ensure_sufficient_stack(|| {
            self.kind.hash(state);
            self.payload.hash(state);
        });
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| {
            f.debug_struct("Node")
                .field("kind", &self.kind)
                .field("payload", &self.payload)
                .finish()
        })
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty())
    }
}

fn escape_text(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\n', "\\n")
}
