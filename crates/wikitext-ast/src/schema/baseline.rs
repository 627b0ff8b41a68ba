//! Baseline categories and node kinds.

use ecow::EcoString;
use indexmap::IndexMap;

use super::category::Category;
use super::constraint::{AttributeSpec, Constraint};
use super::registry::Registry;
use super::variant::{NodeParts, VariantDef};
use crate::ast::{
    kinds, optional_literal, required_literal, required_text, AlignKind, AttrValue, Association,
    HighlightOptions, List, Media, Node, Reference, Resource,
};
use crate::error::{RegistryResult, SchemaError, SchemaResult};

const GALLERY_MODES: &[&str] = &[
    "traditional",
    "nolines",
    "packed",
    "packed-overlay",
    "packed-hover",
    "slideshow",
];

fn is_positive_integer(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) && value.bytes().any(|b| b != b'0')
}

fn is_pixel_length(value: &str) -> bool {
    is_positive_integer(value.strip_suffix("px").unwrap_or(value))
}

/// Defines the baseline categories, then every baseline kind.
pub(super) fn install(registry: &mut Registry) -> RegistryResult<()> {
    for category in [
        Category::BLOCK,
        Category::DEFINITION,
        Category::STATIC_PHRASING,
        Category::LIST,
        Category::TABLE,
        Category::ROW,
        Category::GALLERY,
    ] {
        registry.define_category(category, &[])?;
    }
    registry.define_category(Category::PHRASING, &[Category::STATIC_PHRASING])?;
    registry.define_category(Category::FLOW, &[Category::BLOCK, Category::DEFINITION])?;

    for def in variants() {
        registry.register_variant(def)?;
    }
    Ok(())
}

fn flag(name: &'static str) -> AttributeSpec {
    AttributeSpec::optional(name, Constraint::Bool)
}

fn text(name: &'static str) -> AttributeSpec {
    AttributeSpec::optional(name, Constraint::Text)
}

/// Kinds legal wherever block content and static phrasing are.
fn dialect(def: VariantDef) -> VariantDef {
    def.member_of(Category::BLOCK)
        .member_of(Category::STATIC_PHRASING)
}

fn variants() -> Vec<VariantDef> {
    use kinds::*;

    vec![
        VariantDef::parent(ROOT, Category::FLOW).build(|parts| Ok(Node::Root(parts.children))),
        // Block content
        VariantDef::parent(PARAGRAPH, Category::PHRASING)
            .member_of(Category::BLOCK)
            .build(|parts| Ok(Node::Paragraph(parts.children))),
        VariantDef::parent(HEADING, Category::PHRASING)
            .attribute(AttributeSpec::required("depth", Constraint::range(1, 6)))
            .member_of(Category::BLOCK)
            .build(build_heading),
        VariantDef::leaf(THEMATIC_BREAK)
            .member_of(Category::BLOCK)
            .build(|_| Ok(Node::ThematicBreak)),
        VariantDef::parent(BLOCKQUOTE, Category::FLOW)
            .member_of(Category::BLOCK)
            .build(|parts| Ok(Node::Blockquote(parts.children))),
        VariantDef::parent(LIST, Category::LIST)
            .attributes([
                flag("ordered"),
                flag("spread"),
                AttributeSpec::optional(
                    "start",
                    Constraint::Integer {
                        min: Some(0),
                        max: Some(u32::MAX.into()),
                    },
                ),
                flag("definition"),
            ])
            .member_of(Category::BLOCK)
            .build(build_list),
        VariantDef::parent(LIST_ITEM, Category::FLOW)
            .attributes([flag("spread"), flag("checked")])
            .member_of(Category::LIST)
            .build(|parts| {
                Ok(Node::ListItem {
                    spread: parts.attributes.flag("spread"),
                    checked: parts.attributes.flag("checked"),
                    children: parts.children,
                })
            }),
        VariantDef::parent(TABLE, Category::TABLE)
            .attribute(AttributeSpec::optional(
                "align",
                Constraint::ListOf(Box::new(Constraint::OneOf(AlignKind::LITERALS))),
            ))
            .member_of(Category::BLOCK)
            .build(build_table),
        VariantDef::parent(TABLE_ROW, Category::ROW)
            .member_of(Category::TABLE)
            .build(|parts| Ok(Node::TableRow(parts.children))),
        VariantDef::parent(TABLE_CELL, Category::PHRASING)
            .member_of(Category::ROW)
            .build(|parts| Ok(Node::TableCell(parts.children))),
        VariantDef::literal(HTML)
            .member_of(Category::BLOCK)
            .member_of(Category::STATIC_PHRASING)
            .build(|parts| Ok(Node::Html(parts.value.unwrap_or_default()))),
        VariantDef::literal(CODE)
            .attributes([text("lang"), text("meta")])
            .member_of(Category::BLOCK)
            .build(|parts| {
                Ok(Node::Code {
                    lang: parts.attributes.text("lang"),
                    meta: parts.attributes.text("meta"),
                    value: parts.value.unwrap_or_default(),
                })
            }),
        // Phrasing content
        VariantDef::literal(TEXT)
            .member_of(Category::STATIC_PHRASING)
            .build(|parts| Ok(Node::Text(parts.value.unwrap_or_default()))),
        VariantDef::parent(EMPHASIS, Category::PHRASING)
            .member_of(Category::STATIC_PHRASING)
            .build(|parts| Ok(Node::Emphasis(parts.children))),
        VariantDef::parent(STRONG, Category::PHRASING)
            .member_of(Category::STATIC_PHRASING)
            .build(|parts| Ok(Node::Strong(parts.children))),
        VariantDef::parent(DELETE, Category::PHRASING)
            .member_of(Category::STATIC_PHRASING)
            .build(|parts| Ok(Node::Delete(parts.children))),
        VariantDef::literal(INLINE_CODE)
            .member_of(Category::STATIC_PHRASING)
            .build(|parts| Ok(Node::InlineCode(parts.value.unwrap_or_default()))),
        VariantDef::leaf(BREAK)
            .member_of(Category::STATIC_PHRASING)
            .build(|_| Ok(Node::Break)),
        // Link content is static phrasing, so links never nest.
        VariantDef::parent(LINK, Category::STATIC_PHRASING)
            .attributes(Resource::specs())
            .member_of(Category::PHRASING)
            .build(|parts| {
                Ok(Node::Link {
                    resource: Resource::read_from(LINK, &parts.attributes)?,
                    children: parts.children,
                })
            }),
        VariantDef::parent(LINK_REFERENCE, Category::STATIC_PHRASING)
            .attributes(Reference::specs())
            .member_of(Category::PHRASING)
            .build(|parts| {
                Ok(Node::LinkReference {
                    reference: Reference::read_from(LINK_REFERENCE, &parts.attributes)?,
                    children: parts.children,
                })
            }),
        VariantDef::parent(FOOTNOTE, Category::PHRASING)
            .member_of(Category::STATIC_PHRASING)
            .build(|parts| Ok(Node::Footnote(parts.children))),
        VariantDef::leaf(FOOTNOTE_REFERENCE)
            .attributes(Reference::specs())
            .member_of(Category::STATIC_PHRASING)
            .build(|parts| {
                Ok(Node::FootnoteReference(Reference::read_from(
                    FOOTNOTE_REFERENCE,
                    &parts.attributes,
                )?))
            }),
        // Definition content
        VariantDef::leaf(DEFINITION)
            .attributes(Association::specs())
            .attributes(Resource::specs())
            .member_of(Category::DEFINITION)
            .build(|parts| {
                Ok(Node::Definition {
                    association: Association::read_from(DEFINITION, &parts.attributes)?,
                    resource: Resource::read_from(DEFINITION, &parts.attributes)?,
                })
            }),
        VariantDef::parent(FOOTNOTE_DEFINITION, Category::FLOW)
            .attributes(Association::specs())
            .member_of(Category::DEFINITION)
            .build(|parts| {
                Ok(Node::FootnoteDefinition {
                    association: Association::read_from(FOOTNOTE_DEFINITION, &parts.attributes)?,
                    children: parts.children,
                })
            }),
        // Dialect extensions
        dialect(VariantDef::leaf(IMAGE).attributes(Media::specs()))
            .member_of(Category::GALLERY)
            .build(|parts| Ok(Node::Image(Media::read_from(IMAGE, &parts.attributes)?))),
        dialect(VariantDef::leaf(FILE).attributes(Media::specs()))
            .build(|parts| Ok(Node::File(Media::read_from(FILE, &parts.attributes)?))),
        dialect(
            VariantDef::parent(GALLERY, Category::GALLERY)
                .attributes([
                    AttributeSpec::optional("mode", Constraint::OneOf(GALLERY_MODES)),
                    AttributeSpec::optional(
                        "perrow",
                        Constraint::Pattern {
                            description: "a positive integer",
                            matches: is_positive_integer,
                        },
                    ),
                    AttributeSpec::optional(
                        "widths",
                        Constraint::Pattern {
                            description: "<n> or <n>px",
                            matches: is_pixel_length,
                        },
                    ),
                    AttributeSpec::optional(
                        "heights",
                        Constraint::Pattern {
                            description: "<n> or <n>px",
                            matches: is_pixel_length,
                        },
                    ),
                    text("caption"),
                ])
                .open_attributes(),
        )
        .build(build_gallery),
        dialect(
            VariantDef::leaf(SIGNATURE).attribute(AttributeSpec::required(
                "kind",
                Constraint::OneOf(crate::ast::SignatureKind::LITERALS),
            )),
        )
        .build(|parts| {
            Ok(Node::Signature(required_literal(
                SIGNATURE,
                &parts.attributes,
                "kind",
            )?))
        }),
        dialect(VariantDef::leaf(REDIRECT).attribute(AttributeSpec::required("target", Constraint::Url)))
            .build(|parts| {
                Ok(Node::Redirect {
                    target: required_text(REDIRECT, &parts.attributes, "target")?,
                })
            }),
        dialect(VariantDef::leaf(TOC)).build(|_| Ok(Node::Toc)),
        dialect(VariantDef::literal(NOWIKI))
            .build(|parts| Ok(Node::Nowiki(parts.value.unwrap_or_default()))),
        dialect(VariantDef::leaf(REFERENCES).attribute(text("group"))).build(|parts| {
            Ok(Node::References {
                group: parts.attributes.text("group"),
            })
        }),
        dialect(VariantDef::literal(MATH).attribute(AttributeSpec::optional(
            "display",
            Constraint::OneOf(crate::ast::MathDisplay::LITERALS),
        )))
        .build(|parts| {
            Ok(Node::Math {
                display: optional_literal(MATH, &parts.attributes, "display")?,
                value: parts.value.unwrap_or_default(),
            })
        }),
        dialect(VariantDef::literal(SYNTAX_HIGHLIGHT).attributes([
            text("lang"),
            flag("inline"),
            flag("line"),
            AttributeSpec::optional(
                "start",
                Constraint::Integer {
                    min: None,
                    max: None,
                },
            ),
            text("highlight"),
        ]))
        .build(|parts| {
            let attrs = &parts.attributes;
            Ok(Node::SyntaxHighlight {
                options: HighlightOptions {
                    lang: attrs.text("lang"),
                    inline: attrs.flag("inline"),
                    line: attrs.flag("line"),
                    start: attrs.int("start"),
                    highlight: attrs.text("highlight"),
                },
                value: parts.value.unwrap_or_default(),
            })
        }),
    ]
}

fn build_heading(parts: NodeParts) -> SchemaResult<Node> {
    let depth = parts
        .attributes
        .int("depth")
        .and_then(|depth| u8::try_from(depth).ok())
        .ok_or_else(|| SchemaError::missing_attribute(kinds::HEADING, "depth"))?;
    Ok(Node::Heading {
        depth,
        children: parts.children,
    })
}

fn build_list(parts: NodeParts) -> SchemaResult<Node> {
    let attrs = &parts.attributes;
    let start = attrs
        .int("start")
        .map(|start| {
            u32::try_from(start).map_err(|_| {
                SchemaError::invalid_attribute(kinds::LIST, "start", "out of range for a list start")
            })
        })
        .transpose()?;
    Ok(Node::List(List {
        ordered: attrs.flag("ordered"),
        spread: attrs.flag("spread"),
        start,
        definition: attrs.flag("definition"),
        children: parts.children,
    }))
}

fn build_table(parts: NodeParts) -> SchemaResult<Node> {
    let align = match parts.attributes.get("align") {
        Some(AttrValue::List(items)) => items
            .iter()
            .map(|item| {
                let text = item.as_text().map(EcoString::as_str).unwrap_or_default();
                text.parse::<AlignKind>()
                    .map_err(|reason| SchemaError::invalid_attribute(kinds::TABLE, "align", reason))
            })
            .collect::<SchemaResult<Vec<_>>>()?,
        _ => Vec::new(),
    };
    Ok(Node::Table {
        align,
        children: parts.children,
    })
}

fn build_gallery(parts: NodeParts) -> SchemaResult<Node> {
    let mut options = IndexMap::new();
    for (name, value) in parts.attributes {
        let AttrValue::Text(value) = value else {
            return Err(SchemaError::invalid_attribute(
                kinds::GALLERY,
                name,
                "gallery options are text",
            ));
        };
        options.insert(name, value);
    }
    Ok(Node::Gallery {
        options,
        children: parts.children,
    })
}
