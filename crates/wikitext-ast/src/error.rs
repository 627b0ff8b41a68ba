//! Error handling for the wikitext AST schema.
//!
//! Two kinds of failure are raised as errors: constructing a node from
//! attributes its variant does not accept ([`SchemaError`]) and a broken
//! schema itself ([`RegistryError`]). Problems with a document are not
//! errors; the validator reports them as
//! [`Finding`](crate::validate::Finding)s.

use std::error::Error;
use std::fmt::{self, Display};

use ecow::EcoString;

use crate::schema::Category;

/// Errors raised while constructing a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A required attribute was not supplied.
    MissingAttribute {
        /// Node kind being constructed
        kind: EcoString,
        /// Attribute name
        attribute: EcoString,
    },
    /// An attribute was supplied that the variant does not accept.
    InvalidAttribute {
        /// Node kind being constructed
        kind: EcoString,
        /// Attribute name
        attribute: EcoString,
        /// Why the value was rejected
        reason: EcoString,
    },
    /// No variant definition is registered for the kind.
    UnknownKind(EcoString),
    /// Children or value supplied that the node's shape cannot carry.
    InvalidShape {
        /// Node kind being constructed
        kind: EcoString,
        /// What was wrong
        reason: EcoString,
    },
    /// The variant is registered without a tag-driven constructor.
    NotConstructible(EcoString),
}

impl SchemaError {
    /// Shorthand for [`SchemaError::MissingAttribute`].
    pub fn missing_attribute(kind: impl Into<EcoString>, attribute: impl Into<EcoString>) -> Self {
        SchemaError::MissingAttribute {
            kind: kind.into(),
            attribute: attribute.into(),
        }
    }

    /// Shorthand for [`SchemaError::InvalidAttribute`].
    pub fn invalid_attribute(
        kind: impl Into<EcoString>,
        attribute: impl Into<EcoString>,
        reason: impl Into<EcoString>,
    ) -> Self {
        SchemaError::InvalidAttribute {
            kind: kind.into(),
            attribute: attribute.into(),
            reason: reason.into(),
        }
    }
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::MissingAttribute { kind, attribute } => {
                write!(f, "`{kind}` requires attribute `{attribute}`")
            }
            SchemaError::InvalidAttribute {
                kind,
                attribute,
                reason,
            } => write!(f, "invalid attribute `{attribute}` on `{kind}`: {reason}"),
            SchemaError::UnknownKind(kind) => write!(f, "unknown node kind `{kind}`"),
            SchemaError::InvalidShape { kind, reason } => {
                write!(f, "invalid shape for `{kind}`: {reason}")
            }
            SchemaError::NotConstructible(kind) => {
                write!(f, "node kind `{kind}` has no tag-driven constructor")
            }
        }
    }
}

impl Error for SchemaError {}

/// Result type alias for node construction.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Schema configuration faults.
///
/// These mean the schema, not a document, is broken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A category was referenced before being defined.
    UnknownCategory {
        /// The missing category
        category: Category,
        /// Node kind or category referring to it
        referenced_by: EcoString,
    },
    /// A second, different definition was registered for a kind.
    ConflictingVariant(EcoString),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::UnknownCategory {
                category,
                referenced_by,
            } => write!(
                f,
                "content category `{category}` referenced by `{referenced_by}` is not defined"
            ),
            RegistryError::ConflictingVariant(kind) => {
                write!(f, "node kind `{kind}` is already defined differently")
            }
        }
    }
}

impl Error for RegistryError {}

/// Result type alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
