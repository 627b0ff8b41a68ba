//! Abstract syntax tree of wikitext-flavored markdown.
//!
//! This module defines the node variants a parser may produce: the baseline
//! markdown kinds (paragraphs, headings, lists, tables, links, ...) plus the
//! dialect kinds (signatures, redirects, galleries, math, ...), the attribute
//! bundles they share, and the extension seam for kinds defined elsewhere.

mod attributes;
mod bundles;
mod custom;
mod literal;
mod media;
mod node;
pub mod tables;

pub use self::attributes::{AttrValue, Attributes};
pub use self::bundles::{Alternative, Association, Reference, ReferenceType, Resource};
pub use self::custom::{CustomNode, NodeExtension};
pub use self::media::{
    is_media_size, Media, MediaOptions, MEDIA_ALIGNMENTS, MEDIA_KINDS, MEDIA_LOCATIONS,
};
pub use self::node::{
    kinds, AlignKind, HighlightOptions, List, MathDisplay, Node, SignatureKind,
};

pub(crate) use self::bundles::{optional_literal, required_literal, required_text};

#[cfg(test)]
mod tests;
