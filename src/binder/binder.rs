use std::fmt::Display;

use log::debug;
use serde::Serialize;

use crate::{
    ast::{
        ast::NodeKind,
        statements::Program,
        visitor::{walk, NodeRef, Visitor},
    },
    Span,
};

/// Pre-order index of a node within one [`ParentTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeId(pub usize);

impl Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundNode {
    pub kind: NodeKind,
    pub span: Span,
    /// `None` only for the `Program`.
    pub parent: Option<NodeId>,
}

/// The result of [`bind`]: one entry per reachable node, in pre-order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParentTable {
    nodes: Vec<BoundNode>,
}

impl ParentTable {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&BoundNode> {
        self.nodes.get(id.0)
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.parent)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &BoundNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
    }

    /// The chain of parents from `id` up to the `Program`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut ancestors = vec![];
        let mut current = self.parent_of(id);
        while let Some(parent) = current {
            ancestors.push(parent);
            current = self.parent_of(parent);
        }
        ancestors
    }
}

struct Binder {
    nodes: Vec<BoundNode>,
    stack: Vec<NodeId>,
}

impl<'a> Visitor<'a> for Binder {
    fn enter(&mut self, node: NodeRef<'a>) {
        let id = NodeId(self.nodes.len());
        self.nodes.push(BoundNode {
            kind: node.kind(),
            span: *node.span(),
            parent: self.stack.last().copied(),
        });
        self.stack.push(id);
    }

    fn leave(&mut self, _node: NodeRef<'a>) {
        self.stack.pop();
    }
}

/// Records the parent of every node reachable from `program`.
///
/// The tree is only read, so binding the same program again yields an equal
/// table.
pub fn bind(program: &Program) -> ParentTable {
    let mut binder = Binder {
        nodes: vec![],
        stack: vec![],
    };
    walk(NodeRef::Program(program), &mut binder);

    debug!(nodes = binder.nodes.len(); "Bound program");
    ParentTable {
        nodes: binder.nodes,
    }
}
