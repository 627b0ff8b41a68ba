use std::fmt;

use ecow::{eco_format, EcoString};
use serde::Serialize;

use super::category::Category;
use super::constraint::{check_attributes, AttributeProblem, AttributeSpec};
use crate::ast::{Attributes, Node};
use crate::error::{SchemaError, SchemaResult};

/// Structural shape of a node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Shape {
    /// Ordered children, no value
    Parent,
    /// A string value, no children
    Literal,
    /// Neither children nor value, only scalar attributes
    Leaf,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Shape::Parent => "parent",
            Shape::Literal => "literal",
            Shape::Leaf => "leaf",
        })
    }
}

/// Everything a node is built from: the input of
/// [`Registry::construct`](super::Registry::construct).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeParts {
    /// Scalar attributes
    pub attributes: Attributes,
    /// Children of a parent node
    pub children: Vec<Node>,
    /// Value of a literal node
    pub value: Option<EcoString>,
}

impl NodeParts {
    /// Parts of a leaf node.
    pub fn leaf(attributes: Attributes) -> Self {
        Self {
            attributes,
            ..Self::default()
        }
    }

    /// Parts of a parent node.
    pub fn parent(attributes: Attributes, children: Vec<Node>) -> Self {
        Self {
            attributes,
            children,
            value: None,
        }
    }

    /// Parts of a literal node.
    pub fn literal(attributes: Attributes, value: impl Into<EcoString>) -> Self {
        Self {
            attributes,
            children: Vec::new(),
            value: Some(value.into()),
        }
    }
}

/// Builds a node from parts that already satisfy its variant definition.
pub type BuildFn = fn(NodeParts) -> SchemaResult<Node>;

/// Schema of one node kind.
#[derive(Debug, Clone)]
pub struct VariantDef {
    /// Tag of the kind
    pub kind: EcoString,
    /// Structural shape
    pub shape: Shape,
    /// Category every child must belong to (parent kinds only)
    pub children: Option<Category>,
    /// Declared attributes
    pub attributes: Vec<AttributeSpec>,
    /// Whether undeclared attributes are accepted as free-form hints
    pub extra_attributes: bool,
    /// Categories the kind is registered into
    pub member_of: Vec<Category>,
    /// Tag-driven constructor
    pub build: Option<BuildFn>,
}

impl VariantDef {
    fn new(kind: impl Into<EcoString>, shape: Shape, children: Option<Category>) -> Self {
        Self {
            kind: kind.into(),
            shape,
            children,
            attributes: Vec::new(),
            extra_attributes: false,
            member_of: Vec::new(),
            build: None,
        }
    }

    /// A kind whose children must belong to `children`.
    pub fn parent(kind: impl Into<EcoString>, children: Category) -> Self {
        Self::new(kind, Shape::Parent, Some(children))
    }

    /// A kind carrying a string value.
    pub fn literal(kind: impl Into<EcoString>) -> Self {
        Self::new(kind, Shape::Literal, None)
    }

    /// A kind carrying only scalar attributes.
    pub fn leaf(kind: impl Into<EcoString>) -> Self {
        Self::new(kind, Shape::Leaf, None)
    }

    /// Declares one attribute.
    pub fn attribute(mut self, spec: AttributeSpec) -> Self {
        self.attributes.push(spec);
        self
    }

    /// Declares several attributes, e.g. a whole bundle.
    pub fn attributes(mut self, specs: impl IntoIterator<Item = AttributeSpec>) -> Self {
        self.attributes.extend(specs);
        self
    }

    /// Accepts attributes beyond the declared ones.
    pub fn open_attributes(mut self) -> Self {
        self.extra_attributes = true;
        self
    }

    /// Registers the kind into `category`.
    pub fn member_of(mut self, category: Category) -> Self {
        if !self.member_of.contains(&category) {
            self.member_of.push(category);
        }
        self
    }

    /// Sets the tag-driven constructor.
    pub fn build(mut self, build: BuildFn) -> Self {
        self.build = Some(build);
        self
    }

    /// Looks up the rule of a declared attribute.
    pub fn attribute_spec(&self, name: &str) -> Option<&AttributeSpec> {
        self.attributes.iter().find(|spec| spec.name == name)
    }

    /// Checks `attrs` against the declared rules.
    pub fn check_attributes(&self, attrs: &Attributes) -> Vec<AttributeProblem> {
        check_attributes(&self.attributes, self.extra_attributes, attrs)
    }

    /// Whether two definitions describe the same kind. Registering the same
    /// definition twice is a no-op; a differing one is a conflict.
    ///
    /// Constructors are compared by presence only, so a re-registration that
    /// swaps the constructor keeps the first one.
    pub(crate) fn same_as(&self, other: &VariantDef) -> bool {
        let same_attributes = self.attributes.len() == other.attributes.len()
            && self.attributes.iter().zip(&other.attributes).all(|(a, b)| {
                a.name == b.name && a.required == b.required && a.constraint.same_as(&b.constraint)
            });

        self.kind == other.kind
            && self.shape == other.shape
            && self.children == other.children
            && self.extra_attributes == other.extra_attributes
            && self.member_of == other.member_of
            && self.build.is_some() == other.build.is_some()
            && same_attributes
    }

    /// Constructs a node of this kind from `parts`.
    ///
    /// Attributes are checked against the declared rules and the parts
    /// against the shape. Children are not checked against their category;
    /// that is the validator's job.
    pub fn construct(&self, parts: NodeParts) -> SchemaResult<Node> {
        let kind = &self.kind;
        match self.shape {
            Shape::Parent if parts.value.is_some() => {
                return Err(self.shape_error("a parent node has no value"));
            }
            Shape::Literal if !parts.children.is_empty() => {
                return Err(self.shape_error("a literal node has no children"));
            }
            Shape::Literal if parts.value.is_none() => {
                return Err(self.shape_error("a literal node requires a value"));
            }
            Shape::Leaf if !parts.children.is_empty() || parts.value.is_some() => {
                return Err(self.shape_error("a leaf node has neither children nor a value"));
            }
            _ => {}
        }

        if let Some(problem) = self.check_attributes(&parts.attributes).into_iter().next() {
            return Err(match problem {
                AttributeProblem::Missing(attribute) => {
                    SchemaError::missing_attribute(kind.clone(), attribute)
                }
                problem => {
                    SchemaError::invalid_attribute(kind.clone(), problem.attribute().clone(), problem.reason())
                }
            });
        }

        let build = self
            .build
            .ok_or_else(|| SchemaError::NotConstructible(kind.clone()))?;
        build(parts)
    }

    fn shape_error(&self, reason: &str) -> SchemaError {
        SchemaError::InvalidShape {
            kind: self.kind.clone(),
            reason: eco_format!("{reason}"),
        }
    }
}
