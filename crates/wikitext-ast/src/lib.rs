#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

// Lets the derive output of `custom_node` name this crate from inside it.
extern crate self as wikitext_ast;

// AST related exports
pub use crate::ast::{AttrValue, Attributes, CustomNode, Node, NodeExtension};

// Error types
pub use crate::error::{RegistryError, RegistryResult, SchemaError, SchemaResult};

// Options
pub use crate::options::{IdentifierMatching, ValidatorOptions, ValidatorOptionsBuilder};

// Schema
pub use crate::schema::{Category, NodeParts, Registry, Shape, VariantDef};

// Validator
pub use crate::validate::{validate, Finding, FindingKind, NodePath, ValidationResult, Validator};

// Export proc-macro attributes
pub use wikitext_ast_macros::custom_node;

pub mod ast;
pub mod error;
pub mod options;
pub mod schema;
pub mod validate;
pub mod visit;
