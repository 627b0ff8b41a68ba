//! Read-only traversal of a node tree.
//!
//! The goal of this module is to provide a single dispatch table for the
//! `Node` enum so that consumers (the validator's reference pass, renderers,
//! linters) can implement [`NodeVisitor`] and reuse the traversal logic
//! without copy-pasting large `match` expressions. Every callback receives the
//! [`NodePath`] of the node being visited.

use crate::ast::{Association, CustomNode, Media, Node, Reference, Resource};
use crate::validate::NodePath;

/// Trait implemented by consumers that want to walk the tree.
pub trait NodeVisitor {
    /// Error type produced during traversal.
    type Error;

    /// Dispatch a single node. Most implementers will not override this and
    /// will instead implement the per-kind methods below.
    fn visit_node(&mut self, node: &Node, path: &mut NodePath) -> Result<(), Self::Error> {
        walk_node(self, node, path)
    }

    /// Visit the children of a node, extending `path` for each of them.
    fn visit_children(&mut self, children: &[Node], path: &mut NodePath) -> Result<(), Self::Error> {
        for (index, child) in children.iter().enumerate() {
            path.push(index);
            let res = self.visit_node(child, path);
            path.pop();
            res?;
        }
        Ok(())
    }

    /// Called for every node before its kind-specific callback.
    fn enter(&mut self, _node: &Node, _path: &NodePath) -> Result<(), Self::Error> {
        Ok(())
    }

    /// A `definition` node.
    fn definition(
        &mut self,
        _association: &Association,
        _resource: &Resource,
        _path: &NodePath,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// A `footnoteDefinition` node. Its children are visited afterwards.
    fn footnote_definition(
        &mut self,
        _association: &Association,
        _path: &NodePath,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// A `linkReference` node. Its children are visited afterwards.
    fn link_reference(&mut self, _reference: &Reference, _path: &NodePath) -> Result<(), Self::Error> {
        Ok(())
    }

    /// A `footnoteReference` node.
    fn footnote_reference(
        &mut self,
        _reference: &Reference,
        _path: &NodePath,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// An `image` or `file` node; `kind` tells which.
    fn media(&mut self, _kind: &str, _media: &Media, _path: &NodePath) -> Result<(), Self::Error> {
        Ok(())
    }

    /// A node contributed by an extension. Its children are visited afterwards.
    fn custom(&mut self, _node: &dyn CustomNode, _path: &NodePath) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Default traversal: [`NodeVisitor::enter`], the kind-specific callback, then
/// the children in document order.
pub fn walk_node<V: NodeVisitor + ?Sized>(
    visitor: &mut V,
    node: &Node,
    path: &mut NodePath,
) -> Result<(), V::Error> {
    visitor.enter(node, path)?;
    match node {
        Node::Definition {
            association,
            resource,
        } => visitor.definition(association, resource, path)?,
        Node::FootnoteDefinition { association, .. } => {
            visitor.footnote_definition(association, path)?
        }
        Node::LinkReference { reference, .. } => visitor.link_reference(reference, path)?,
        Node::FootnoteReference(reference) => visitor.footnote_reference(reference, path)?,
        Node::Image(media) | Node::File(media) => visitor.media(node.kind(), media, path)?,
        Node::Custom(custom) => visitor.custom(&**custom, path)?,
        _ => {}
    }
    visitor.visit_children(node.children(), path)
}

/// Walks the tree rooted at `root`, whose path is `/`.
pub fn walk<V: NodeVisitor + ?Sized>(visitor: &mut V, root: &Node) -> Result<(), V::Error> {
    let mut path = NodePath::root();
    visitor.visit_node(root, &mut path)
}
