use ecow::EcoString;
use insta::assert_snapshot;

use super::*;
use crate::ast::{CustomNode, Media, Reference, ReferenceType};
use crate::options::{IdentifierMatching, ValidatorOptionsBuilder};
use crate::schema::VariantDef;

fn check(tree: &Node) -> ValidationResult {
    Validator::new(&Registry::baseline()).validate(tree).unwrap()
}

fn rendered(result: &ValidationResult) -> String {
    result
        .findings
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

fn text(value: &str) -> Node {
    Node::text(value)
}

#[test]
fn node_paths() {
    assert_eq!(NodePath::root().to_string(), "/");
    assert_eq!(NodePath::from(vec![0, 2]).to_string(), "/0/2");
    assert_eq!(NodePath::root().child(4).child(1).indices(), &[4, 1]);
    assert!(NodePath::root().is_root());
    assert!(!NodePath::root().child(0).is_root());
}

#[test]
fn well_formed_document_is_valid() {
    let tree = Node::root(vec![
        Node::heading(2, vec![text("History")]),
        Node::paragraph(vec![
            text("See "),
            Node::Emphasis(vec![Node::link("https://example.org", vec![text("here")])]),
            Node::footnote_reference("n1"),
        ]),
        Node::unordered_list(vec![Node::list_item(vec![Node::paragraph(vec![text("a")])])]),
        Node::Blockquote(vec![Node::ThematicBreak]),
        Node::gallery(vec![Node::image(Media::new("Cat.jpg").with_size("upright=0.6"))]),
        Node::footnote_definition("n1", vec![Node::paragraph(vec![text("Note")])]),
    ]);

    let result = check(&tree);
    assert!(result.is_valid(), "{}", rendered(&result));
    assert!(result.findings.is_empty());
}

#[test]
fn heading_depth_must_be_in_range() {
    for depth in 1..=6 {
        assert!(check(&Node::root(vec![Node::heading(depth, vec![])])).is_valid());
    }

    let result = check(&Node::root(vec![
        Node::heading(0, vec![]),
        Node::heading(7, vec![]),
    ]));
    assert_snapshot!(rendered(&result), @r"
    /0: attribute `depth`: 0 is less than the minimum 1
    /1: attribute `depth`: 7 is greater than the maximum 6
    ");
}

#[test]
fn gallery_rejects_files() {
    let tree = Node::root(vec![Node::gallery(vec![
        Node::image(Media::new("Cat.jpg")),
        Node::file(Media::new("Notes.pdf")),
    ])]);

    let result = check(&tree);
    assert!(!result.valid);
    assert_eq!(
        result.findings,
        [Finding::new(
            NodePath::from(vec![0, 1]),
            FindingKind::StructuralViolation {
                expected: Category::GALLERY,
                actual: "file".into(),
            },
        )]
    );
}

#[test]
fn links_do_not_nest() {
    let tree = Node::root(vec![Node::paragraph(vec![Node::link(
        "https://a.example",
        vec![Node::link("https://b.example", vec![text("inner")])],
    )])]);

    assert_snapshot!(rendered(&check(&tree)), @"/0/0/0: `link` is not allowed in static-phrasing content");
}

#[test]
fn media_is_allowed_inline_and_as_block() {
    let tree = Node::root(vec![
        Node::image(Media::new("Map.png").with_kind("thumb").with_location("right")),
        Node::paragraph(vec![text("Icon "), Node::file(Media::new("Icon.svg"))]),
    ]);
    assert!(check(&tree).is_valid());
}

#[test]
fn media_size_is_checked() {
    let tree = Node::root(vec![Node::image(Media::new("Cat.jpg").with_size("wide"))]);

    assert_snapshot!(
        rendered(&check(&tree)),
        @r#"/0: attribute `size`: "wide" does not match <n>px, x<n>px, <n>x<n>px, upright or upright=<number>"#
    );
}

#[test]
fn table_structure() {
    let valid = crate::ast::tables::simple_table(
        vec![vec![text("A")], vec![text("B")]],
        vec![vec![vec![text("1")], vec![text("2")]]],
    );
    assert!(check(&Node::root(vec![valid])).is_valid());

    let cell_in_table = Node::root(vec![Node::Table {
        align: vec![],
        children: vec![Node::TableCell(vec![text("stray")])],
    }]);
    assert_snapshot!(rendered(&check(&cell_in_table)), @"/0/0: `tableCell` is not allowed in table content");
}

#[test]
fn unknown_kinds_are_reported_at_their_parent() {
    #[derive(Debug, Clone, PartialEq)]
    struct Marquee;

    impl CustomNode for Marquee {
        fn kind(&self) -> &'static str {
            "marquee"
        }

        fn shape(&self) -> crate::schema::Shape {
            crate::schema::Shape::Leaf
        }

        fn attributes(&self) -> crate::ast::Attributes {
            crate::ast::Attributes::new().with("speed", "fast")
        }

        fn clone_box(&self) -> Box<dyn CustomNode> {
            Box::new(self.clone())
        }

        fn eq_box(&self, other: &dyn CustomNode) -> bool {
            other.as_any().downcast_ref::<Self>() == Some(self)
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
    }

    let tree = Node::root(vec![Node::Custom(Box::new(Marquee))]);
    assert_snapshot!(rendered(&check(&tree)), @"/0: `marquee` is not allowed in flow content");
}

/// A custom node that reports whatever children it is given.
#[derive(Debug, Clone, PartialEq)]
struct Wrapper {
    kind: &'static str,
    shape: crate::schema::Shape,
    children: Vec<Node>,
}

impl CustomNode for Wrapper {
    fn kind(&self) -> &'static str {
        self.kind
    }

    fn shape(&self) -> crate::schema::Shape {
        self.shape
    }

    fn children(&self) -> &[Node] {
        &self.children
    }

    fn clone_box(&self) -> Box<dyn CustomNode> {
        Box::new(self.clone())
    }

    fn eq_box(&self, other: &dyn CustomNode) -> bool {
        other.as_any().downcast_ref::<Self>() == Some(self)
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[test]
fn members_without_definition_are_rejected_and_walked() {
    let mut registry = Registry::baseline();
    registry.register(&Category::BLOCK, "poem").unwrap();
    let tree = Node::root(vec![Node::Custom(Box::new(Wrapper {
        kind: "poem",
        shape: crate::schema::Shape::Parent,
        children: vec![
            Node::heading(99, vec![]),
            Node::Blockquote(vec![Node::TableCell(vec![])]),
            Node::footnote_reference("nowhere"),
        ],
    }))]);

    let result = Validator::new(&registry).validate(&tree).unwrap();
    assert_snapshot!(rendered(&result), @r"
    /0: `poem` is not allowed in flow content
    /0/0: attribute `depth`: 99 is greater than the maximum 6
    /0/1/0: `tableCell` is not allowed in flow content
    /0/2: reference `nowhere` has no definition
    ");
}

#[test]
fn children_of_a_leaf_kind_are_a_shape_violation() {
    let mut registry = Registry::baseline();
    registry
        .register_variant(VariantDef::leaf("marquee").member_of(Category::BLOCK))
        .unwrap();
    let tree = Node::root(vec![Node::Custom(Box::new(Wrapper {
        kind: "marquee",
        shape: crate::schema::Shape::Leaf,
        children: vec![
            Node::TableCell(vec![]),
            Node::paragraph(vec![Node::ThematicBreak]),
        ],
    }))]);

    let result = Validator::new(&registry).validate(&tree).unwrap();
    assert_snapshot!(rendered(&result), @r"
    /0: expected a leaf node, found a parent node
    /0/1/0: `thematicBreak` is not allowed in phrasing content
    ");
    assert_eq!(
        result.findings[0].kind,
        FindingKind::ShapeViolation {
            expected: crate::schema::Shape::Leaf,
            actual: crate::schema::Shape::Parent,
        }
    );
}

#[test]
fn declared_shape_must_match_definition() {
    let mut registry = Registry::baseline();
    registry
        .register_variant(VariantDef::parent("poem", Category::PHRASING).member_of(Category::BLOCK))
        .unwrap();
    let tree = Node::root(vec![Node::Custom(Box::new(Wrapper {
        kind: "poem",
        shape: crate::schema::Shape::Leaf,
        children: vec![],
    }))]);

    let result = Validator::new(&registry).validate(&tree).unwrap();
    assert_snapshot!(rendered(&result), @"/0: expected a parent node, found a leaf node");
}

#[test]
fn attribute_checks_can_be_disabled() {
    let tree = Node::root(vec![Node::heading(9, vec![])]);
    let options = ValidatorOptionsBuilder::new().check_attributes(false).build();

    let registry = Registry::baseline();
    let validator = Validator::new(&registry).with_options(options);
    assert!(!validator.options().check_attributes);
    assert!(validator.validate(&tree).unwrap().is_valid());
}

#[test]
fn references_resolve_against_definitions() {
    let tree = Node::root(vec![
        Node::paragraph(vec![
            Node::link_reference("mdn", vec![text("docs")]),
            Node::footnote_reference("n1"),
        ]),
        Node::definition("mdn", "https://developer.mozilla.org"),
        Node::footnote_definition("n1", vec![]),
    ]);
    assert!(check(&tree).is_valid());
}

#[test]
fn definitions_anywhere_in_the_tree_count() {
    let tree = Node::root(vec![
        Node::paragraph(vec![Node::link_reference("later", vec![text("x")])]),
        Node::Blockquote(vec![Node::definition("later", "https://example.org")]),
    ]);
    assert!(check(&tree).is_valid());
}

#[test]
fn unresolved_references() {
    let tree = Node::root(vec![
        Node::paragraph(vec![
            Node::link_reference("missing", vec![text("x")]),
            Node::footnote_reference("mdn"),
        ]),
        // A link definition does not satisfy a footnote reference.
        Node::definition("mdn", "https://developer.mozilla.org"),
    ]);

    assert_snapshot!(rendered(&check(&tree)), @r"
    /0/0: reference `missing` has no definition
    /0/1: reference `mdn` has no definition
    ");
}

#[test]
fn ambiguous_references() {
    let tree = Node::root(vec![
        Node::paragraph(vec![Node::link_reference("dup", vec![text("x")])]),
        Node::definition("dup", "https://a.example"),
        Node::definition("dup", "https://b.example"),
        Node::footnote_definition("unused", vec![]),
        Node::footnote_definition("unused", vec![]),
    ]);

    let result = check(&tree);
    assert_eq!(
        result.findings,
        [Finding::new(
            NodePath::from(vec![0, 0]),
            FindingKind::AmbiguousReference {
                identifier: "dup".into(),
                count: 2,
            },
        )]
    );
}

#[test]
fn identifier_matching() {
    let tree = Node::root(vec![
        Node::paragraph(vec![Node::LinkReference {
            reference: Reference::new("Rust  Book", ReferenceType::Full),
            children: vec![text("book")],
        }]),
        Node::definition("rust book", "https://doc.rust-lang.org/book/"),
    ]);

    assert!(!check(&tree).is_valid());

    let options = ValidatorOptionsBuilder::new()
        .identifier_matching(IdentifierMatching::CaseInsensitive)
        .build();
    let result = Validator::new(&Registry::baseline())
        .with_options(options)
        .validate(&tree)
        .unwrap();
    assert!(result.is_valid());
}

#[test]
fn reference_checks_can_be_disabled() {
    let tree = Node::root(vec![Node::paragraph(vec![Node::footnote_reference("nowhere")])]);
    let options = ValidatorOptionsBuilder::new().check_references(false).build();

    let result = Validator::new(&Registry::baseline())
        .with_options(options)
        .validate(&tree)
        .unwrap();
    assert!(result.is_valid());
}

#[test]
fn findings_are_streamed_to_the_sink() {
    let tree = Node::root(vec![
        Node::paragraph(vec![Node::ThematicBreak]),
        Node::paragraph(vec![Node::footnote_reference("nowhere")]),
    ]);
    let mut sink = VecSink::new();

    let result = Validator::new(&Registry::baseline())
        .validate_with_sink(&tree, &mut sink)
        .unwrap();
    assert_eq!(sink.findings(), result.findings.as_slice());
    assert_eq!(sink.into_inner().len(), 2);
}

#[test]
fn subtree_root_is_not_category_checked() {
    let cell = Node::TableCell(vec![text("alone")]);
    assert!(check(&cell).is_valid());
}

#[test]
fn sparse_registry() {
    let mut registry = Registry::empty();
    registry.define_category(Category::BLOCK, &[]).unwrap();
    registry
        .register_variant(VariantDef::parent("root", Category::BLOCK))
        .unwrap();
    let tree = Node::root(vec![Node::paragraph(vec![text("x")])]);

    let result = Validator::new(&registry).validate(&tree).unwrap();
    assert_snapshot!(rendered(&result), @"/0: `paragraph` is not allowed in block content");

    // Without any definition there is no category to check against.
    assert!(Validator::new(&Registry::empty()).validate(&tree).unwrap().is_valid());
}

#[test]
fn report_serializes_to_json() {
    let tree = Node::root(vec![Node::paragraph(vec![Node::link_reference(
        "missing",
        vec![text("x")],
    )])]);
    let json = serde_json::to_value(check(&tree)).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "valid": false,
            "findings": [{
                "path": [0, 0],
                "type": "unresolvedReference",
                "identifier": "missing",
            }],
        })
    );
}

#[test]
fn identifier_normalization() {
    let normalize = |id: &str| IdentifierMatching::CaseInsensitive.normalize(id);
    assert_eq!(normalize("  Foo\t BAR "), EcoString::from("foo bar"));
    assert_eq!(
        IdentifierMatching::Exact.normalize("  Foo "),
        EcoString::from("  Foo ")
    );
}
