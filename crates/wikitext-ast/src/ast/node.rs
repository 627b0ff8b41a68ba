//! Node definitions for the wikitext AST.

use ecow::EcoString;
use indexmap::IndexMap;

use super::attributes::Attributes;
use super::bundles::{Association, Reference, Resource};
use super::custom::CustomNode;
use super::literal::literal_enum;
use super::media::Media;
use crate::schema::{NodeParts, Shape};

/// Tags of the baseline node kinds.
pub mod kinds {
    #![allow(missing_docs)]

    pub const ROOT: &str = "root";
    pub const PARAGRAPH: &str = "paragraph";
    pub const HEADING: &str = "heading";
    pub const THEMATIC_BREAK: &str = "thematicBreak";
    pub const BLOCKQUOTE: &str = "blockquote";
    pub const LIST: &str = "list";
    pub const LIST_ITEM: &str = "listItem";
    pub const TABLE: &str = "table";
    pub const TABLE_ROW: &str = "tableRow";
    pub const TABLE_CELL: &str = "tableCell";
    pub const HTML: &str = "html";
    pub const CODE: &str = "code";
    pub const TEXT: &str = "text";
    pub const EMPHASIS: &str = "emphasis";
    pub const STRONG: &str = "strong";
    pub const DELETE: &str = "delete";
    pub const INLINE_CODE: &str = "inlineCode";
    pub const BREAK: &str = "break";
    pub const LINK: &str = "link";
    pub const LINK_REFERENCE: &str = "linkReference";
    pub const FOOTNOTE: &str = "footnote";
    pub const FOOTNOTE_REFERENCE: &str = "footnoteReference";
    pub const DEFINITION: &str = "definition";
    pub const FOOTNOTE_DEFINITION: &str = "footnoteDefinition";
    pub const IMAGE: &str = "image";
    pub const FILE: &str = "file";
    pub const GALLERY: &str = "gallery";
    pub const SIGNATURE: &str = "signature";
    pub const REDIRECT: &str = "redirect";
    pub const TOC: &str = "toc";
    pub const NOWIKI: &str = "nowiki";
    pub const REFERENCES: &str = "references";
    pub const MATH: &str = "math";
    pub const SYNTAX_HIGHLIGHT: &str = "syntaxHighlight";
}

literal_enum! {
    /// Column alignment of a table.
    pub enum AlignKind {
        /// Left aligned
        Left => "left",
        /// Right aligned
        Right => "right",
        /// Centered
        Center => "center",
        /// No explicit alignment
        None => "none",
    }
}

literal_enum! {
    /// The three signature forms: `~~~`, `~~~~` and `~~~~~`.
    pub enum SignatureKind {
        /// User name only
        User => "user",
        /// User name and timestamp
        UserAndDate => "userAndDate",
        /// Timestamp only
        Date => "date",
    }
}

literal_enum! {
    /// Display mode of `<math>`.
    pub enum MathDisplay {
        /// Rendered inline with the text
        Inline => "inline",
        /// Rendered as a block
        Block => "block",
    }
}

/// List container.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct List {
    /// Whether items are numbered
    pub ordered: Option<bool>,
    /// Whether items are separated by blank lines
    pub spread: Option<bool>,
    /// Number of the first item of an ordered list
    pub start: Option<u32>,
    /// Whether this is a definition list (`;` term, `:` description)
    pub definition: Option<bool>,
    /// List items
    pub children: Vec<Node>,
}

/// Attributes of `<syntaxhighlight>`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HighlightOptions {
    /// Language of the source
    pub lang: Option<EcoString>,
    /// Whether the source is rendered inline
    pub inline: Option<bool>,
    /// Whether line numbers are shown
    pub line: Option<bool>,
    /// First line number
    pub start: Option<i64>,
    /// Lines to emphasize, e.g. `1,4-6`
    pub highlight: Option<EcoString>,
}

/// Main node type, representing an element of a wikitext document.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Document root
    Root(Vec<Node>),

    // Block content
    /// Paragraph of phrasing content
    Paragraph(Vec<Node>),
    /// Section heading
    Heading {
        /// Rank, 1-6
        depth: u8,
        /// Heading text
        children: Vec<Node>,
    },
    /// Horizontal rule
    ThematicBreak,
    /// Quoted flow content
    Blockquote(Vec<Node>),
    /// Ordered, unordered or definition list
    List(List),
    /// Item of a list
    ListItem {
        /// Whether the item contains blank lines
        spread: Option<bool>,
        /// Task state, if this is a task item
        checked: Option<bool>,
        /// Flow content
        children: Vec<Node>,
    },
    /// Table
    Table {
        /// Per-column alignment
        align: Vec<AlignKind>,
        /// Rows
        children: Vec<Node>,
    },
    /// Table row
    TableRow(Vec<Node>),
    /// Table cell
    TableCell(Vec<Node>),
    /// Raw HTML, valid as block and as static phrasing content
    Html(EcoString),
    /// Fenced or indented code
    Code {
        /// Language of the code
        lang: Option<EcoString>,
        /// Rest of the info string
        meta: Option<EcoString>,
        /// Source
        value: EcoString,
    },

    // Phrasing content
    /// Plain text
    Text(EcoString),
    /// `''emphasis''`
    Emphasis(Vec<Node>),
    /// `'''strong'''`
    Strong(Vec<Node>),
    /// Struck-through text
    Delete(Vec<Node>),
    /// Inline code
    InlineCode(EcoString),
    /// Line break
    Break,
    /// Link to a resource
    Link {
        /// Target
        resource: Resource,
        /// Link text, which cannot contain links
        children: Vec<Node>,
    },
    /// Link resolved through a definition
    LinkReference {
        /// Referenced definition
        reference: Reference,
        /// Link text, which cannot contain links
        children: Vec<Node>,
    },
    /// Inline footnote
    Footnote(Vec<Node>),
    /// Reference to a footnote definition
    FootnoteReference(Reference),

    // Definition content
    /// Link reference definition
    Definition {
        /// Identifier referenced by link references
        association: Association,
        /// Target
        resource: Resource,
    },
    /// Footnote body
    FootnoteDefinition {
        /// Identifier referenced by footnote references
        association: Association,
        /// Flow content
        children: Vec<Node>,
    },

    // Dialect extensions
    /// `[[File:...]]` rendered as an image
    Image(Media),
    /// `[[Media:...]]` or any other file embed
    File(Media),
    /// `<gallery>` of images
    Gallery {
        /// Free-form presentation hints such as `mode`, `perrow` or `widths`
        options: IndexMap<EcoString, EcoString>,
        /// Images
        children: Vec<Node>,
    },
    /// `~~~`, `~~~~` or `~~~~~`
    Signature(SignatureKind),
    /// `#REDIRECT [[target]]`
    Redirect {
        /// Page redirected to
        target: EcoString,
    },
    /// `__TOC__`
    Toc,
    /// `<nowiki>` passthrough
    Nowiki(EcoString),
    /// `<references />`
    References {
        /// Footnote group to list
        group: Option<EcoString>,
    },
    /// `<math>`
    Math {
        /// Display mode
        display: Option<MathDisplay>,
        /// TeX source
        value: EcoString,
    },
    /// `<syntaxhighlight>`
    SyntaxHighlight {
        /// Highlighting options
        options: HighlightOptions,
        /// Source
        value: EcoString,
    },

    /// Node kind contributed by an extension
    Custom(Box<dyn CustomNode>),
}

impl Default for Node {
    fn default() -> Self {
        Node::Root(vec![])
    }
}

impl Node {
    /// Tag of the node kind, e.g. `heading`.
    pub fn kind(&self) -> &str {
        use kinds::*;

        match self {
            Node::Root(_) => ROOT,
            Node::Paragraph(_) => PARAGRAPH,
            Node::Heading { .. } => HEADING,
            Node::ThematicBreak => THEMATIC_BREAK,
            Node::Blockquote(_) => BLOCKQUOTE,
            Node::List(_) => LIST,
            Node::ListItem { .. } => LIST_ITEM,
            Node::Table { .. } => TABLE,
            Node::TableRow(_) => TABLE_ROW,
            Node::TableCell(_) => TABLE_CELL,
            Node::Html(_) => HTML,
            Node::Code { .. } => CODE,
            Node::Text(_) => TEXT,
            Node::Emphasis(_) => EMPHASIS,
            Node::Strong(_) => STRONG,
            Node::Delete(_) => DELETE,
            Node::InlineCode(_) => INLINE_CODE,
            Node::Break => BREAK,
            Node::Link { .. } => LINK,
            Node::LinkReference { .. } => LINK_REFERENCE,
            Node::Footnote(_) => FOOTNOTE,
            Node::FootnoteReference(_) => FOOTNOTE_REFERENCE,
            Node::Definition { .. } => DEFINITION,
            Node::FootnoteDefinition { .. } => FOOTNOTE_DEFINITION,
            Node::Image(_) => IMAGE,
            Node::File(_) => FILE,
            Node::Gallery { .. } => GALLERY,
            Node::Signature(_) => SIGNATURE,
            Node::Redirect { .. } => REDIRECT,
            Node::Toc => TOC,
            Node::Nowiki(_) => NOWIKI,
            Node::References { .. } => REFERENCES,
            Node::Math { .. } => MATH,
            Node::SyntaxHighlight { .. } => SYNTAX_HIGHLIGHT,
            Node::Custom(node) => node.kind(),
        }
    }

    /// Structural shape of the node.
    pub fn shape(&self) -> Shape {
        match self {
            Node::Custom(node) => node.shape(),
            _ if self.value().is_some() => Shape::Literal,
            Node::Root(_)
            | Node::Paragraph(_)
            | Node::Heading { .. }
            | Node::Blockquote(_)
            | Node::List(_)
            | Node::ListItem { .. }
            | Node::Table { .. }
            | Node::TableRow(_)
            | Node::TableCell(_)
            | Node::Emphasis(_)
            | Node::Strong(_)
            | Node::Delete(_)
            | Node::Link { .. }
            | Node::LinkReference { .. }
            | Node::Footnote(_)
            | Node::FootnoteDefinition { .. }
            | Node::Gallery { .. } => Shape::Parent,
            _ => Shape::Leaf,
        }
    }

    /// Children in document order; empty for literal and leaf nodes.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Root(children)
            | Node::Paragraph(children)
            | Node::Heading { children, .. }
            | Node::Blockquote(children)
            | Node::List(List { children, .. })
            | Node::ListItem { children, .. }
            | Node::Table { children, .. }
            | Node::TableRow(children)
            | Node::TableCell(children)
            | Node::Emphasis(children)
            | Node::Strong(children)
            | Node::Delete(children)
            | Node::Link { children, .. }
            | Node::LinkReference { children, .. }
            | Node::Footnote(children)
            | Node::FootnoteDefinition { children, .. }
            | Node::Gallery { children, .. } => children,
            Node::Custom(node) => node.children(),
            _ => &[],
        }
    }

    /// String payload of literal nodes.
    pub fn value(&self) -> Option<&str> {
        match self {
            Node::Html(value)
            | Node::Text(value)
            | Node::InlineCode(value)
            | Node::Nowiki(value)
            | Node::Code { value, .. }
            | Node::Math { value, .. }
            | Node::SyntaxHighlight { value, .. } => Some(value.as_str()),
            Node::Custom(node) => node.value(),
            _ => None,
        }
    }

    /// Flattens the node's scalar attributes, bundles included.
    pub fn attributes(&self) -> Attributes {
        let mut attrs = Attributes::new();
        match self {
            Node::Heading { depth, .. } => attrs.set("depth", *depth),
            Node::List(list) => {
                attrs.set_opt("ordered", list.ordered);
                attrs.set_opt("spread", list.spread);
                attrs.set_opt("start", list.start);
                attrs.set_opt("definition", list.definition);
            }
            Node::ListItem {
                spread, checked, ..
            } => {
                attrs.set_opt("spread", *spread);
                attrs.set_opt("checked", *checked);
            }
            Node::Table { align, .. } if !align.is_empty() => attrs.set("align", align.clone()),
            Node::Code { lang, meta, .. } => {
                attrs.set_opt("lang", lang.clone());
                attrs.set_opt("meta", meta.clone());
            }
            Node::Link { resource, .. } => resource.write_to(&mut attrs),
            Node::LinkReference { reference, .. } | Node::FootnoteReference(reference) => {
                reference.write_to(&mut attrs)
            }
            Node::Definition {
                association,
                resource,
            } => {
                association.write_to(&mut attrs);
                resource.write_to(&mut attrs);
            }
            Node::FootnoteDefinition { association, .. } => association.write_to(&mut attrs),
            Node::Image(media) | Node::File(media) => media.write_to(&mut attrs),
            Node::Gallery { options, .. } => {
                for (name, value) in options {
                    attrs.set(name.clone(), value);
                }
            }
            Node::Signature(kind) => attrs.set("kind", *kind),
            Node::Redirect { target } => attrs.set("target", target),
            Node::References { group } => attrs.set_opt("group", group.clone()),
            Node::Math { display, .. } => attrs.set_opt("display", *display),
            Node::SyntaxHighlight { options, .. } => {
                attrs.set_opt("lang", options.lang.clone());
                attrs.set_opt("inline", options.inline);
                attrs.set_opt("line", options.line);
                attrs.set_opt("start", options.start);
                attrs.set_opt("highlight", options.highlight.clone());
            }
            Node::Custom(node) => return node.attributes(),
            _ => {}
        }
        attrs
    }

    /// Splits the node into the parts accepted by the tag-driven constructor
    /// ([`crate::schema::Registry::construct`]).
    pub fn decompose(&self) -> NodeParts {
        NodeParts {
            attributes: self.attributes(),
            children: self.children().to_vec(),
            value: self.value().map(EcoString::from),
        }
    }

    /// Whether the node carries children.
    pub fn is_parent(&self) -> bool {
        self.shape() == Shape::Parent
    }

    /// Whether the node carries a string payload.
    pub fn is_literal(&self) -> bool {
        self.shape() == Shape::Literal
    }

    /// Create a root node
    pub fn root(children: Vec<Node>) -> Self {
        Node::Root(children)
    }

    /// Create a paragraph node
    pub fn paragraph(children: Vec<Node>) -> Self {
        Node::Paragraph(children)
    }

    /// Create a heading node
    ///
    /// # Arguments
    /// * `depth` - Heading rank (1-6); other values are reported by the validator
    /// * `children` - Heading content
    pub fn heading(depth: u8, children: Vec<Node>) -> Self {
        Node::Heading { depth, children }
    }

    /// Create a text node
    pub fn text(value: impl Into<EcoString>) -> Self {
        Node::Text(value.into())
    }

    /// Create an unordered list
    pub fn unordered_list(items: Vec<Node>) -> Self {
        Node::List(List {
            ordered: Some(false),
            children: items,
            ..List::default()
        })
    }

    /// Create an ordered list starting at `start`
    pub fn ordered_list(start: u32, items: Vec<Node>) -> Self {
        Node::List(List {
            ordered: Some(true),
            start: Some(start),
            children: items,
            ..List::default()
        })
    }

    /// Create a list item
    pub fn list_item(children: Vec<Node>) -> Self {
        Node::ListItem {
            spread: None,
            checked: None,
            children,
        }
    }

    /// Create a link node
    pub fn link(url: impl Into<EcoString>, children: Vec<Node>) -> Self {
        Node::Link {
            resource: Resource::new(url),
            children,
        }
    }

    /// Create a shortcut link reference
    pub fn link_reference(identifier: impl Into<EcoString>, children: Vec<Node>) -> Self {
        Node::LinkReference {
            reference: Reference::shortcut(identifier),
            children,
        }
    }

    /// Create a shortcut footnote reference
    pub fn footnote_reference(identifier: impl Into<EcoString>) -> Self {
        Node::FootnoteReference(Reference::shortcut(identifier))
    }

    /// Create a link definition
    pub fn definition(identifier: impl Into<EcoString>, url: impl Into<EcoString>) -> Self {
        Node::Definition {
            association: Association::new(identifier),
            resource: Resource::new(url),
        }
    }

    /// Create a footnote definition
    pub fn footnote_definition(identifier: impl Into<EcoString>, children: Vec<Node>) -> Self {
        Node::FootnoteDefinition {
            association: Association::new(identifier),
            children,
        }
    }

    /// Create an image embed
    pub fn image(media: Media) -> Self {
        Node::Image(media)
    }

    /// Create a file embed
    pub fn file(media: Media) -> Self {
        Node::File(media)
    }

    /// Create a gallery without options
    pub fn gallery(children: Vec<Node>) -> Self {
        Node::Gallery {
            options: IndexMap::new(),
            children,
        }
    }

    /// Create a math node
    pub fn math(value: impl Into<EcoString>) -> Self {
        Node::Math {
            display: None,
            value: value.into(),
        }
    }

    /// Create a syntax-highlighted source node
    pub fn syntax_highlight(lang: impl Into<EcoString>, value: impl Into<EcoString>) -> Self {
        Node::SyntaxHighlight {
            options: HighlightOptions {
                lang: Some(lang.into()),
                ..HighlightOptions::default()
            },
            value: value.into(),
        }
    }

    /// Check if a custom node is of a specific type, and return a reference to that type
    pub fn as_custom_type<T: CustomNode + 'static>(&self) -> Option<&T> {
        if let Node::Custom(node) = self {
            node.as_any().downcast_ref::<T>()
        } else {
            None
        }
    }

    /// Check if a node is a custom node of a specific type
    pub fn is_custom_type<T: CustomNode + 'static>(&self) -> bool {
        self.as_custom_type::<T>().is_some()
    }
}
