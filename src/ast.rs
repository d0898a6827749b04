//! Syntax tree produced by the parser.
//!
//! Nodes live in an arena owned by [`SyntaxTree`] and refer to each other by
//! [`NodeId`]. A parent owns its children; the parent link is only a lookup
//! index back up the tree.

use crate::lexer::{Token, TokenKind};
use crate::text::{Position, TextEntity};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Program,
    Integer,
    Float,
    String,
    Identifier,
    Type,
    HasType,
    MapTo,
    Add,
    Subtract,
    Multiply,
    Divide,
    Assign,
    Unknown,
}

impl From<TokenKind> for NodeKind {
    fn from(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Integer => Self::Integer,
            TokenKind::Float => Self::Float,
            TokenKind::String => Self::String,
            TokenKind::Identifier => Self::Identifier,
            TokenKind::Type => Self::Type,
            TokenKind::HasType => Self::HasType,
            TokenKind::MapTo => Self::MapTo,
            TokenKind::Add => Self::Add,
            TokenKind::Subtract => Self::Subtract,
            TokenKind::Multiply => Self::Multiply,
            TokenKind::Divide => Self::Divide,
            TokenKind::Assign => Self::Assign,
            TokenKind::LParen | TokenKind::RParen | TokenKind::Semicolon | TokenKind::LineComment => {
                Self::Unknown
            }
        }
    }
}

impl NodeKind {
    #[inline]
    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Self::Add | Self::Subtract | Self::Multiply | Self::Divide
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    kind: NodeKind,
    payload: Option<TextEntity>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl SyntaxNode {
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn payload(&self) -> Option<&TextEntity> {
        self.payload.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    nodes: Vec<SyntaxNode>,
    root: NodeId,
}

impl SyntaxTree {
    /// Creates a tree holding only an empty `Program` root.
    pub fn new() -> Self {
        let root = SyntaxNode {
            kind: NodeKind::Program,
            payload: None,
            children: Vec::new(),
            parent: None,
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeRef<'_> {
        self.get(self.root)
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// Adds a detached node to the arena.
    pub fn add_node(&mut self, kind: NodeKind, payload: Option<TextEntity>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(SyntaxNode {
            kind,
            payload,
            children: Vec::new(),
            parent: None,
        });
        id
    }

    /// Adds a detached node for `token`, keeping its lexeme as payload.
    pub fn add_token(&mut self, token: &Token) -> NodeId {
        self.add_node(NodeKind::from(token.kind()), Some(token.lexeme().clone()))
    }

    /// Attaches `child` as the last child of `parent`.
    ///
    /// # Panics
    /// If `child` already has a parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        assert!(
            self.nodes[child.0].parent.is_none(),
            "node {child:?} already has a parent"
        );
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Detaches the `index`-th child of `parent` and returns it.
    ///
    /// The detached subtree stays in the arena but is no longer reachable
    /// from the root.
    pub fn remove_child(&mut self, parent: NodeId, index: usize) -> Option<NodeId> {
        let children = &mut self.nodes[parent.0].children;
        if index >= children.len() {
            return None;
        }
        let child = children.remove(index);
        self.nodes[child.0].parent = None;
        Some(child)
    }

    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { tree: self, id }
    }

    /// Number of nodes in the arena, detached ones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root().child_count() == 0
    }

    /// Top-level statements.
    pub fn statements(&self) -> impl Iterator<Item = NodeRef<'_>> {
        self.root().children()
    }
}

impl Default for SyntaxTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Borrowed view of one node.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a SyntaxTree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn id(self) -> NodeId {
        self.id
    }

    pub fn kind(self) -> NodeKind {
        self.node().kind
    }

    /// Lexeme the node was built from.
    pub fn value(self) -> Option<&'a str> {
        self.node().payload.as_ref().map(TextEntity::text)
    }

    pub fn position(self) -> Option<&'a Position> {
        self.node().payload.as_ref().map(TextEntity::position)
    }

    pub fn child(self, index: usize) -> Option<NodeRef<'a>> {
        let id = *self.node().children.get(index)?;
        Some(self.tree.get(id))
    }

    pub fn child_count(self) -> usize {
        self.node().children.len()
    }

    pub fn children(self) -> impl Iterator<Item = NodeRef<'a>> {
        let tree = self.tree;
        self.node().children.iter().map(move |&id| tree.get(id))
    }

    pub fn parent(self) -> Option<NodeRef<'a>> {
        self.node().parent.map(|id| self.tree.get(id))
    }

    pub fn is_leaf(self) -> bool {
        self.child_count() == 0
    }

    /// Left and right operand of a binary node.
    pub fn operands(self) -> Option<(NodeRef<'a>, NodeRef<'a>)> {
        if self.child_count() != 2 {
            return None;
        }
        Some((self.child(0)?, self.child(1)?))
    }

    /// Compact one-line rendering, e.g. `Add(1, Multiply(2, 3))`.
    pub fn sexpr(self) -> String {
        let mut out = String::new();
        self.write_sexpr(&mut out);
        out
    }

    fn write_sexpr(self, out: &mut String) {
        if self.is_leaf() {
            out.push_str(&self.label());
            return;
        }
        let head = match self.kind() {
            NodeKind::Identifier => self.label(),
            kind => format!("{kind:?}"),
        };
        out.push_str(&head);
        out.push('(');
        for (i, child) in self.children().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            child.write_sexpr(out);
        }
        out.push(')');
    }

    fn label(self) -> String {
        self.value()
            .map_or_else(|| format!("{:?}", self.kind()), str::to_owned)
    }

    fn node(self) -> &'a SyntaxNode {
        self.tree.node(self.id)
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sexpr())
    }
}

fn write_children(f: &mut fmt::Formatter<'_>, node: NodeRef, prefix: &mut String) -> fmt::Result {
    let count = node.child_count();
    for (i, child) in node.children().enumerate() {
        writeln!(f, "{prefix} |-> [{}]", child.label())?;
        if !child.is_leaf() {
            let len = prefix.len();
            prefix.push_str(if i + 1 < count { " |   " } else { "     " });
            write_children(f, child, prefix)?;
            prefix.truncate(len);
        }
    }
    Ok(())
}

/// Indented diagram of the whole tree.
impl fmt::Display for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let root = self.root();
        writeln!(f, "[{}]", root.label())?;
        write_children(f, root, &mut String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::TokenKind;

    #[test]
    fn token_kinds_map_to_node_kinds() {
        let expected = [
            (TokenKind::Integer, NodeKind::Integer),
            (TokenKind::Float, NodeKind::Float),
            (TokenKind::String, NodeKind::String),
            (TokenKind::Identifier, NodeKind::Identifier),
            (TokenKind::Type, NodeKind::Type),
            (TokenKind::HasType, NodeKind::HasType),
            (TokenKind::MapTo, NodeKind::MapTo),
            (TokenKind::Add, NodeKind::Add),
            (TokenKind::Subtract, NodeKind::Subtract),
            (TokenKind::Multiply, NodeKind::Multiply),
            (TokenKind::Divide, NodeKind::Divide),
            (TokenKind::Assign, NodeKind::Assign),
            (TokenKind::LParen, NodeKind::Unknown),
            (TokenKind::RParen, NodeKind::Unknown),
            (TokenKind::Semicolon, NodeKind::Unknown),
            (TokenKind::LineComment, NodeKind::Unknown),
        ];
        for (token, node) in expected {
            assert_eq!(node, NodeKind::from(token), "{token}");
        }
    }

    #[test]
    fn append_and_remove() {
        let mut tree = SyntaxTree::new();
        let add = tree.add_node(NodeKind::Add, None);
        let one = tree.add_node(NodeKind::Integer, None);
        let two = tree.add_node(NodeKind::Integer, None);
        tree.append_child(add, one);
        tree.append_child(add, two);
        tree.append_child(tree.root_id(), add);

        let node = tree.get(add);
        assert_eq!(2, node.child_count());
        assert_eq!(Some(tree.root_id()), node.parent().map(NodeRef::id));
        assert_eq!(Some(add), tree.get(two).parent().map(NodeRef::id));

        assert_eq!(Some(one), tree.remove_child(add, 0));
        assert_eq!(1, tree.get(add).child_count());
        assert_eq!(Some(two), tree.get(add).child(0).map(NodeRef::id));
        assert!(tree.get(one).parent().is_none());
        assert_eq!(None, tree.remove_child(add, 4));
    }
}
