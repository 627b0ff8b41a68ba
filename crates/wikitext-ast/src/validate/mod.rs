//! Tree validation.
//!
//! [`Validator::validate`] walks a tree depth-first, pre-order, and reports
//! every child that is not a member of its parent's declared content
//! category, every node whose shape contradicts its variant definition and
//! every attribute that breaks its variant's rules. A kind without a
//! definition is never a legal child, even when it was registered into a
//! category, but its content is still walked. A second
//! pass resolves `linkReference` and `footnoteReference` identifiers against
//! the definitions found anywhere in the tree.
//!
//! Problems with the document are [`Finding`]s, never errors: the validator
//! only fails when the registry itself is misconfigured.

mod path;
mod references;
mod sink;

use std::fmt;

use ecow::EcoString;
use serde::Serialize;

pub use self::path::NodePath;
pub use self::sink::{FindingSink, NullSink, VecSink};

use crate::ast::Node;
use crate::error::RegistryResult;
use crate::options::ValidatorOptions;
use crate::schema::{global, Category, Registry, Shape, VariantDef};

/// What is wrong at a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FindingKind {
    /// A child whose kind is not a member of its parent's child category.
    StructuralViolation {
        /// Category the parent requires
        expected: Category,
        /// Kind found instead
        actual: EcoString,
    },
    /// A node whose children or value contradict its kind's shape.
    ShapeViolation {
        /// Shape the definition declares
        expected: Shape,
        /// Shape the node has
        actual: Shape,
    },
    /// An attribute missing, undeclared or breaking its constraint.
    AttributeViolation {
        /// Attribute name
        attribute: EcoString,
        /// Why it was rejected
        reason: EcoString,
    },
    /// A reference without a matching definition.
    UnresolvedReference {
        /// Identifier of the reference
        identifier: EcoString,
    },
    /// A reference matching more than one definition.
    AmbiguousReference {
        /// Identifier of the reference
        identifier: EcoString,
        /// Number of matching definitions
        count: usize,
    },
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FindingKind::StructuralViolation { expected, actual } => {
                write!(f, "`{actual}` is not allowed in {expected} content")
            }
            FindingKind::ShapeViolation { expected, actual } => {
                write!(f, "expected a {expected} node, found a {actual} node")
            }
            FindingKind::AttributeViolation { attribute, reason } => {
                write!(f, "attribute `{attribute}`: {reason}")
            }
            FindingKind::UnresolvedReference { identifier } => {
                write!(f, "reference `{identifier}` has no definition")
            }
            FindingKind::AmbiguousReference { identifier, count } => {
                write!(f, "reference `{identifier}` matches {count} definitions")
            }
        }
    }
}

/// A problem found in a tree, located by its node path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Path of the offending node
    pub path: NodePath,
    /// What is wrong
    #[serde(flatten)]
    pub kind: FindingKind,
}

impl Finding {
    /// Create a finding at `path`.
    pub fn new(path: NodePath, kind: FindingKind) -> Self {
        Self { path, kind }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.kind)
    }
}

/// Outcome of validating a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// Whether no finding was produced
    pub valid: bool,
    /// Findings, structural and attribute ones first, in pre-order
    pub findings: Vec<Finding>,
}

impl ValidationResult {
    fn from_findings(findings: Vec<Finding>) -> Self {
        Self {
            valid: findings.is_empty(),
            findings,
        }
    }

    /// Whether no finding was produced.
    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Collects findings, mirroring each into the caller's sink.
struct Report<'s> {
    findings: Vec<Finding>,
    sink: &'s mut dyn FindingSink,
}

impl Report<'_> {
    fn push(&mut self, path: &NodePath, kind: FindingKind) {
        let finding = Finding::new(path.clone(), kind);
        log::trace!("finding {finding}");
        self.sink.emit(&finding);
        self.findings.push(finding);
    }
}

/// Checks trees against a registry.
#[derive(Debug, Clone)]
pub struct Validator<'r> {
    registry: &'r Registry,
    options: ValidatorOptions,
}

impl<'r> Validator<'r> {
    /// A validator with default options.
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            options: ValidatorOptions::default(),
        }
    }

    /// Replaces the options.
    pub fn with_options(mut self, options: ValidatorOptions) -> Self {
        self.options = options;
        self
    }

    /// Options in use.
    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Validates the tree rooted at `root`.
    ///
    /// `root` itself is not checked against any category. Fails only if a
    /// variant definition refers to an undefined category.
    pub fn validate(&self, root: &Node) -> RegistryResult<ValidationResult> {
        self.validate_with_sink(root, &mut NullSink)
    }

    /// Like [`Validator::validate`], also streaming every finding to `sink`.
    pub fn validate_with_sink(
        &self,
        root: &Node,
        sink: &mut dyn FindingSink,
    ) -> RegistryResult<ValidationResult> {
        log::debug!("validating tree rooted at `{}`", root.kind());

        let mut report = Report {
            findings: Vec::new(),
            sink,
        };
        let mut path = NodePath::root();
        self.check_node(root, &mut path, &mut report)?;
        if self.options.check_references {
            references::check(root, self.options.identifier_matching, &mut report);
        }

        let result = ValidationResult::from_findings(report.findings);
        log::debug!(
            "validated tree rooted at `{}`: {} finding(s)",
            root.kind(),
            result.findings.len()
        );
        Ok(result)
    }

    fn check_node(&self, node: &Node, path: &mut NodePath, report: &mut Report) -> RegistryResult<()> {
        let kind = node.kind();
        let def = self.registry.variant(kind);
        match def {
            Some(def) => self.check_own(def, node, path, report),
            None => log::warn!("no definition for node kind `{kind}` at {path}"),
        }

        let expected = def.and_then(|def| def.children.as_ref());
        for (index, child) in node.children().iter().enumerate() {
            path.push(index);
            let res = self.check_child(expected, child, path, report);
            path.pop();
            res?;
        }
        Ok(())
    }

    fn check_own(&self, def: &VariantDef, node: &Node, path: &NodePath, report: &mut Report) {
        let actual = observed_shape(node);
        if actual != def.shape {
            report.push(
                path,
                FindingKind::ShapeViolation {
                    expected: def.shape,
                    actual,
                },
            );
        }

        if self.options.check_attributes {
            for problem in def.check_attributes(&node.attributes()) {
                report.push(
                    path,
                    FindingKind::AttributeViolation {
                        attribute: problem.attribute().clone(),
                        reason: problem.reason(),
                    },
                );
            }
        }
    }

    fn check_child(
        &self,
        expected: Option<&Category>,
        child: &Node,
        path: &mut NodePath,
        report: &mut Report,
    ) -> RegistryResult<()> {
        if let Some(expected) = expected {
            let kind = child.kind();
            let legal =
                self.registry.contains(expected, kind)? && self.registry.variant(kind).is_some();
            if !legal {
                report.push(
                    path,
                    FindingKind::StructuralViolation {
                        expected: expected.clone(),
                        actual: kind.into(),
                    },
                );
            }
        }
        self.check_node(child, path, report)
    }
}

/// Shape a node actually has: children make it a parent and a value a
/// literal, whatever it declares.
fn observed_shape(node: &Node) -> Shape {
    if !node.children().is_empty() {
        Shape::Parent
    } else if node.value().is_some() {
        Shape::Literal
    } else {
        node.shape()
    }
}

/// Validates `root` against the process-wide registry with default options.
pub fn validate(root: &Node) -> RegistryResult<ValidationResult> {
    Validator::new(&global()).validate(root)
}

#[cfg(test)]
mod tests;
