//! Attribute bundles shared by otherwise unrelated node kinds.
//!
//! A bundle is embedded by value into each node that carries it. Each bundle
//! knows how to flatten itself into [`Attributes`], how to read itself back,
//! and which [`AttributeSpec`]s its fields must satisfy, so the validator can
//! check bundles independently of the node embedding them.

use ecow::EcoString;

use super::attributes::Attributes;
use super::literal::literal_enum;
use crate::error::{SchemaError, SchemaResult};
use crate::schema::{AttributeSpec, Constraint};

literal_enum! {
    /// How a reference spells out its label, per CommonMark.
    pub enum ReferenceType {
        /// `[foo]`
        Shortcut => "shortcut",
        /// `[foo][]`
        Collapsed => "collapsed",
        /// `[text][foo]`
        Full => "full",
    }
}

/// Reads a required text attribute during construction.
pub(crate) fn required_text(kind: &str, attrs: &Attributes, name: &str) -> SchemaResult<EcoString> {
    attrs
        .text(name)
        .ok_or_else(|| SchemaError::missing_attribute(kind, name))
}

/// Reads a required enumerated literal during construction.
pub(crate) fn required_literal<T>(kind: &str, attrs: &Attributes, name: &str) -> SchemaResult<T>
where
    T: std::str::FromStr<Err = EcoString>,
{
    let text = required_text(kind, attrs, name)?;
    text.parse()
        .map_err(|reason| SchemaError::invalid_attribute(kind, name, reason))
}

/// Reads an optional enumerated literal during construction.
pub(crate) fn optional_literal<T>(kind: &str, attrs: &Attributes, name: &str) -> SchemaResult<Option<T>>
where
    T: std::str::FromStr<Err = EcoString>,
{
    attrs
        .text(name)
        .map(|text| {
            text.parse()
                .map_err(|reason| SchemaError::invalid_attribute(kind, name, reason))
        })
        .transpose()
}

/// A resource locator: links, media and definitions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resource {
    /// Target of the resource
    pub url: EcoString,
    /// Advisory title
    pub title: Option<EcoString>,
}

impl Resource {
    /// Creates a resource without a title.
    pub fn new(url: impl Into<EcoString>) -> Self {
        Self {
            url: url.into(),
            title: None,
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<EcoString>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Attribute rules of the bundle.
    pub fn specs() -> Vec<AttributeSpec> {
        vec![
            AttributeSpec::required("url", Constraint::Url),
            AttributeSpec::optional("title", Constraint::Text),
        ]
    }

    pub(crate) fn write_to(&self, attrs: &mut Attributes) {
        attrs.set("url", &self.url);
        attrs.set_opt("title", self.title.clone());
    }

    pub(crate) fn read_from(kind: &str, attrs: &Attributes) -> SchemaResult<Self> {
        Ok(Self {
            url: required_text(kind, attrs, "url")?,
            title: attrs.text("title"),
        })
    }
}

/// Ties a definition to the references pointing at it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Association {
    /// Normalized identifier used for matching
    pub identifier: EcoString,
    /// Source spelling of the identifier
    pub label: Option<EcoString>,
}

impl Association {
    /// Creates an association without a label.
    pub fn new(identifier: impl Into<EcoString>) -> Self {
        Self {
            identifier: identifier.into(),
            label: None,
        }
    }

    /// Sets the label.
    pub fn with_label(mut self, label: impl Into<EcoString>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Attribute rules of the bundle.
    pub fn specs() -> Vec<AttributeSpec> {
        vec![
            AttributeSpec::required("identifier", Constraint::Text),
            AttributeSpec::optional("label", Constraint::Text),
        ]
    }

    pub(crate) fn write_to(&self, attrs: &mut Attributes) {
        attrs.set("identifier", &self.identifier);
        attrs.set_opt("label", self.label.clone());
    }

    pub(crate) fn read_from(kind: &str, attrs: &Attributes) -> SchemaResult<Self> {
        Ok(Self {
            identifier: required_text(kind, attrs, "identifier")?,
            label: attrs.text("label"),
        })
    }
}

/// An association that is resolved against a definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Identifier and label
    pub association: Association,
    /// How the label is spelled in source
    pub reference_type: ReferenceType,
}

impl Reference {
    /// Creates a reference of the given type.
    pub fn new(identifier: impl Into<EcoString>, reference_type: ReferenceType) -> Self {
        Self {
            association: Association::new(identifier),
            reference_type,
        }
    }

    /// Shorthand for a shortcut reference, the most common form.
    pub fn shortcut(identifier: impl Into<EcoString>) -> Self {
        Self::new(identifier, ReferenceType::Shortcut)
    }

    /// Identifier of the referenced definition.
    pub fn identifier(&self) -> &EcoString {
        &self.association.identifier
    }

    /// Attribute rules of the bundle.
    pub fn specs() -> Vec<AttributeSpec> {
        let mut specs = Association::specs();
        specs.push(AttributeSpec::required(
            "referenceType",
            Constraint::OneOf(ReferenceType::LITERALS),
        ));
        specs
    }

    pub(crate) fn write_to(&self, attrs: &mut Attributes) {
        self.association.write_to(attrs);
        attrs.set("referenceType", self.reference_type);
    }

    pub(crate) fn read_from(kind: &str, attrs: &Attributes) -> SchemaResult<Self> {
        Ok(Self {
            association: Association::read_from(kind, attrs)?,
            reference_type: required_literal(kind, attrs, "referenceType")?,
        })
    }
}

/// Accessible text of media.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Alternative {
    /// Replacement text
    pub alt: Option<EcoString>,
}

impl Alternative {
    /// Attribute rules of the bundle.
    pub fn specs() -> Vec<AttributeSpec> {
        vec![AttributeSpec::optional("alt", Constraint::Text)]
    }

    pub(crate) fn write_to(&self, attrs: &mut Attributes) {
        attrs.set_opt("alt", self.alt.clone());
    }

    pub(crate) fn read_from(attrs: &Attributes) -> Self {
        Self {
            alt: attrs.text("alt"),
        }
    }
}
