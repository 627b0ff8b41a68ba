//! Custom node definitions for the wikitext AST.

use std::any::Any;

use super::attributes::Attributes;
use super::node::Node;
use crate::schema::{Shape, VariantDef};

/// Trait for node kinds contributed by extensions.
///
/// A custom node carries its own tag, shape, children and attributes; the
/// validator treats it exactly like a baseline node once its
/// [`VariantDef`] is registered (see [`NodeExtension`]).
///
/// The recommended way to implement this trait is through the `custom_node`
/// macro, which derives the boilerplate and the matching [`NodeExtension`].
///
/// # Example
///
/// ```rust
/// use wikitext_ast::{custom_node, Node};
///
/// // `<poem>` block holding flow content
/// #[custom_node(kind = "poem", member_of = ["block"], children = "flow")]
/// #[derive(Debug, Clone, PartialEq)]
/// struct Poem {
///     children: Vec<Node>,
/// }
/// ```
pub trait CustomNode: std::fmt::Debug + Send + Sync {
    /// Tag of the node kind. Must match the registered [`VariantDef::kind`].
    fn kind(&self) -> &'static str;

    /// Structural shape of the node.
    fn shape(&self) -> Shape;

    /// Children in document order.
    fn children(&self) -> &[Node] {
        &[]
    }

    /// String payload of a literal node.
    fn value(&self) -> Option<&str> {
        None
    }

    /// Scalar attributes, checked against the registered definition.
    fn attributes(&self) -> Attributes {
        Attributes::new()
    }

    /// Clone the custom node
    fn clone_box(&self) -> Box<dyn CustomNode>;

    /// Check if two custom nodes are equal
    fn eq_box(&self, other: &dyn CustomNode) -> bool;

    /// Convert to Any for type casting
    fn as_any(&self) -> &dyn Any;
}

/// A custom node kind together with the schema it must satisfy.
///
/// Registering an extension (see
/// [`Registry::register_extension`](crate::schema::Registry::register_extension))
/// adds its definition and makes the kind a member of every category listed
/// in [`VariantDef::member_of`].
pub trait NodeExtension: CustomNode + Sized + 'static {
    /// Full variant definition of the kind.
    fn variant_def() -> VariantDef;

    /// Wraps the node into the tree type.
    fn into_node(self) -> Node {
        Node::Custom(Box::new(self))
    }
}

// Implement Clone for Box<dyn CustomNode>
impl Clone for Box<dyn CustomNode> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

// Implement PartialEq for Box<dyn CustomNode>
impl PartialEq for Box<dyn CustomNode> {
    fn eq(&self, other: &Self) -> bool {
        self.eq_box(&**other)
    }
}
