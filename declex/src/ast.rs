//! Expression parse trees.
//!
//! A [`Node`] is a plain value that owns its children. Leaves carry a
//! literal or identifier lexeme; internal nodes carry one of the binary
//! operators `+ - * /` and have exactly two children, left then right.
//!
//! A long operator chain such as `a + a + ... + a` yields a left spine as
//! deep as the chain, so every traversal here (including `Drop`) walks an
//! explicit stack instead of recursing.
use crate::Span;
use smartstring::alias::String;
use std::fmt::{self, Write};

/// One instance of a grammar production.
///
/// Equality compares labels and shape only; spans are ignored.
///
/// # Example
/// ```rust
/// # use declex::Node;
/// let tree = Node::binary("+", Node::leaf("a"), Node::binary("*", Node::leaf("b"), Node::leaf("c")));
/// assert_eq!(tree.to_string(), "(+ a (* b c))");
/// assert_eq!(tree.leaves(), vec!["a", "b", "c"]);
/// assert_eq!(tree.depth(), 3);
/// ```
#[derive(Debug)]
pub struct Node {
    /// Lexeme for a leaf, operator for an internal node.
    pub label: String,
    /// Empty for a leaf, `[left, right]` for an operator.
    pub children: Vec<Node>,
    /// Source extent of the whole subexpression, when known.
    pub span: Option<Span>,
}

impl Node {
    /// Creates a leaf.
    pub fn leaf(label: impl AsRef<str>) -> Self {
        Self {
            label: String::from(label.as_ref()),
            children: Vec::new(),
            span: None,
        }
    }

    /// Creates an operator node over `left` and `right`, covering both
    /// operand spans.
    pub fn binary(op: impl AsRef<str>, left: Node, right: Node) -> Self {
        let span = merge_spans(left.span, right.span);
        Self {
            label: String::from(op.as_ref()),
            children: vec![left, right],
            span,
        }
    }

    /// Sets the node's source extent.
    #[must_use]
    pub fn with_span(mut self, span: Option<Span>) -> Self {
        self.span = span;
        self
    }

    /// Widens the node's span to also cover `other`.
    pub fn extend_span(&mut self, other: Option<Span>) {
        self.span = merge_spans(self.span, other);
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn left(&self) -> Option<&Node> {
        self.children.first()
    }

    pub fn right(&self) -> Option<&Node> {
        self.children.get(1)
    }

    /// Leaf labels in left-to-right order.
    pub fn leaves(&self) -> Vec<&str> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.is_leaf() {
                out.push(node.label.as_str());
            } else {
                stack.extend(node.children.iter().rev());
            }
        }
        out
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, level)) = stack.pop() {
            max = max.max(level);
            stack.extend(node.children.iter().map(|c| (c, level + 1)));
        }
        max
    }

    /// Renders the tree one node per line, children indented by two spaces
    /// under their parent.
    ///
    /// ```rust
    /// # use declex::Node;
    /// let tree = Node::binary("-", Node::leaf("a"), Node::leaf("1"));
    /// assert_eq!(tree.display_tree(), "-\n  a\n  1\n");
    /// ```
    pub fn display_tree(&self) -> std::string::String {
        let mut out = std::string::String::new();
        // fmt::Write for String never fails
        let _ = self.write_tree(&mut out);
        out
    }

    fn write_tree(&self, out: &mut impl Write) -> fmt::Result {
        let mut stack = vec![(self, 0)];
        while let Some((node, level)) = stack.pop() {
            writeln!(out, "{:indent$}{}", "", node.label, indent = level * 2)?;
            stack.extend(node.children.iter().rev().map(|c| (c, level + 1)));
        }
        Ok(())
    }
}

fn merge_spans(a: Option<Span>, b: Option<Span>) -> Option<Span> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.merge(&b)),
        (a, None) => a,
        (None, b) => b,
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self, other)];
        while let Some((a, b)) = stack.pop() {
            if a.label != b.label || a.children.len() != b.children.len() {
                return false;
            }
            stack.extend(a.children.iter().zip(&b.children));
        }
        true
    }
}

impl Eq for Node {}

impl Clone for Node {
    fn clone(&self) -> Self {
        // Post-order rebuild: a node is assembled once its children sit on
        // top of `built`, left then right.
        let mut work = vec![(self, false)];
        let mut built: Vec<Node> = Vec::new();
        while let Some((node, expanded)) = work.pop() {
            if expanded || node.is_leaf() {
                let at = built.len().saturating_sub(node.children.len());
                let children = built.split_off(at);
                built.push(Node {
                    label: node.label.clone(),
                    children,
                    span: node.span,
                });
            } else {
                work.push((node, true));
                work.extend(node.children.iter().rev().map(|c| (c, false)));
            }
        }
        built.pop().unwrap_or_else(|| Node::leaf(""))
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

enum Step<'a> {
    Open(&'a Node),
    Close,
}

/// S-expression form: a leaf prints its label, an operator prints
/// `(op left right)`.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![Step::Open(self)];
        let mut first = true;
        while let Some(step) = stack.pop() {
            match step {
                Step::Open(node) => {
                    if !first {
                        f.write_char(' ')?;
                    }
                    first = false;
                    if node.is_leaf() {
                        f.write_str(&node.label)?;
                    } else {
                        write!(f, "({}", node.label)?;
                        stack.push(Step::Close);
                        stack.extend(node.children.iter().rev().map(Step::Open));
                    }
                }
                Step::Close => f.write_char(')')?,
            }
        }
        Ok(())
    }
}
