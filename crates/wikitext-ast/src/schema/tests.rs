use ecow::EcoString;

use super::*;
use crate::ast::{kinds, Attributes, Media, Node};
use crate::error::{RegistryError, SchemaError};

fn members(registry: &Registry, category: &Category) -> Vec<EcoString> {
    registry.members_of(category).unwrap().into_iter().collect()
}

#[test]
fn baseline_is_consistent() {
    let registry = Registry::try_baseline().unwrap();
    assert!(registry.check().is_ok());
    assert!(registry.variant(kinds::SYNTAX_HIGHLIGHT).is_some());
}

#[test]
fn phrasing_derives_from_static_phrasing() {
    let registry = Registry::baseline();

    assert!(registry.contains(&Category::PHRASING, kinds::TEXT).unwrap());
    assert!(registry.contains(&Category::PHRASING, kinds::LINK).unwrap());
    assert!(registry.contains(&Category::STATIC_PHRASING, kinds::TEXT).unwrap());
    assert!(!registry.contains(&Category::STATIC_PHRASING, kinds::LINK).unwrap());
    assert!(!registry.contains(&Category::STATIC_PHRASING, kinds::LINK_REFERENCE).unwrap());
}

#[test]
fn flow_derives_from_block_and_definition() {
    let registry = Registry::baseline();
    let flow = members(&registry, &Category::FLOW);

    for kind in [kinds::PARAGRAPH, kinds::HEADING, kinds::DEFINITION, kinds::FOOTNOTE_DEFINITION] {
        assert!(flow.iter().any(|member| member == kind), "{kind} is flow content");
    }
    assert!(!flow.iter().any(|member| member == kinds::TEXT));
}

#[test]
fn gallery_holds_only_images() {
    let registry = Registry::baseline();
    assert_eq!(members(&registry, &Category::GALLERY), [EcoString::from(kinds::IMAGE)]);
}

#[test]
fn media_is_block_and_static_phrasing() {
    let registry = Registry::baseline();
    for kind in [kinds::IMAGE, kinds::FILE] {
        assert!(registry.contains(&Category::BLOCK, kind).unwrap());
        assert!(registry.contains(&Category::STATIC_PHRASING, kind).unwrap());
    }
}

#[test]
fn register_is_idempotent() {
    let mut registry = Registry::baseline();
    let before = members(&registry, &Category::BLOCK).len();

    assert!(registry.register(&Category::BLOCK, "poem").unwrap());
    assert!(!registry.register(&Category::BLOCK, "poem").unwrap());
    assert_eq!(members(&registry, &Category::BLOCK).len(), before + 1);
}

#[test]
fn registering_into_included_category_reaches_includers() {
    let mut registry = Registry::baseline();
    registry.register(&Category::STATIC_PHRASING, "abbr").unwrap();

    assert!(registry.contains(&Category::PHRASING, "abbr").unwrap());
}

#[test]
fn unknown_category_is_a_registry_error() {
    let mut registry = Registry::baseline();
    let sidebar = Category::new("sidebar");

    assert_eq!(
        registry.register(&sidebar, "note"),
        Err(RegistryError::UnknownCategory {
            category: sidebar.clone(),
            referenced_by: "note".into(),
        })
    );
    assert!(registry.members_of(&sidebar).is_err());
    assert!(registry.define_category(Category::new("aside"), &[sidebar]).is_err());
}

#[test]
fn new_categories_can_be_defined() {
    let mut registry = Registry::baseline();
    let sidebar = Category::new("sidebar");
    registry.define_category(sidebar.clone(), &[Category::BLOCK]).unwrap();
    registry.register(&sidebar, "note").unwrap();

    assert!(registry.contains(&sidebar, kinds::PARAGRAPH).unwrap());
    assert!(registry.contains(&sidebar, "note").unwrap());
    assert!(!registry.contains(&Category::BLOCK, "note").unwrap());
}

#[test]
fn variant_needs_defined_categories() {
    let mut registry = Registry::baseline();
    let def = VariantDef::parent("poem", Category::new("verse")).member_of(Category::BLOCK);

    assert!(matches!(
        registry.register_variant(def),
        Err(RegistryError::UnknownCategory { .. })
    ));
    assert!(registry.variant("poem").is_none());
    assert!(!registry.contains(&Category::BLOCK, "poem").unwrap());
}

#[test]
fn conflicting_variants_are_rejected() {
    let mut registry = Registry::baseline();
    let poem = || VariantDef::parent("poem", Category::PHRASING).member_of(Category::BLOCK);

    registry.register_variant(poem()).unwrap();
    registry.register_variant(poem()).unwrap();
    assert_eq!(
        registry.register_variant(VariantDef::leaf("poem")),
        Err(RegistryError::ConflictingVariant("poem".into()))
    );
}

#[test]
fn differing_constraints_conflict() {
    let mut registry = Registry::baseline();
    let score = |langs: &'static [&'static str]| {
        VariantDef::literal("score")
            .member_of(Category::BLOCK)
            .attribute(AttributeSpec::required("lang", Constraint::OneOf(langs)))
    };

    registry.register_variant(score(&["lilypond", "ABC"])).unwrap();
    registry.register_variant(score(&["lilypond", "ABC"])).unwrap();
    assert_eq!(
        registry.register_variant(score(&["midi"])),
        Err(RegistryError::ConflictingVariant("score".into()))
    );
    assert_eq!(
        registry.register_variant(score(&["lilypond", "ABC"]).build(|_| Ok(Node::Toc))),
        Err(RegistryError::ConflictingVariant("score".into()))
    );
}

#[test]
fn construct_heading() {
    let registry = Registry::baseline();
    let parts = NodeParts::parent(
        Attributes::new().with("depth", 2i64),
        vec![Node::text("Overview")],
    );

    assert_eq!(
        registry.construct(kinds::HEADING, parts),
        Ok(Node::heading(2, vec![Node::text("Overview")]))
    );
}

#[test]
fn construct_reports_missing_attribute() {
    let registry = Registry::baseline();
    let parts = NodeParts::parent(Attributes::new(), vec![]);

    assert_eq!(
        registry.construct(kinds::HEADING, parts),
        Err(SchemaError::missing_attribute("heading", "depth"))
    );
}

#[test]
fn construct_reports_invalid_attribute() {
    let registry = Registry::baseline();
    let parts = NodeParts::leaf(Attributes::new().with("url", "Cat.jpg").with("size", "wide"));

    let Err(SchemaError::InvalidAttribute {
        kind,
        attribute,
        reason,
    }) = registry.construct(kinds::IMAGE, parts)
    else {
        panic!("size `wide` must be rejected");
    };
    assert_eq!(kind, "image");
    assert_eq!(attribute, "size");
    assert_eq!(
        reason,
        "\"wide\" does not match <n>px, x<n>px, <n>x<n>px, upright or upright=<number>"
    );
}

#[test]
fn construct_rejects_undeclared_attribute() {
    let registry = Registry::baseline();
    let parts = NodeParts::literal(Attributes::new().with("lang", "en"), "hello");

    assert!(matches!(
        registry.construct(kinds::TEXT, parts),
        Err(SchemaError::InvalidAttribute { attribute, .. }) if attribute == "lang"
    ));
}

#[test]
fn construct_checks_shape() {
    let registry = Registry::baseline();
    let parts = NodeParts {
        attributes: Attributes::new(),
        children: vec![Node::text("nested")],
        value: Some("value".into()),
    };

    assert!(matches!(
        registry.construct(kinds::TEXT, parts),
        Err(SchemaError::InvalidShape { .. })
    ));
}

#[test]
fn construct_unknown_kind() {
    let registry = Registry::baseline();
    assert_eq!(
        registry.construct("poem", NodeParts::default()),
        Err(SchemaError::UnknownKind("poem".into()))
    );
}

#[test]
fn construct_without_constructor() {
    let mut registry = Registry::baseline();
    registry
        .register_variant(VariantDef::leaf("poem").member_of(Category::BLOCK))
        .unwrap();

    assert_eq!(
        registry.construct("poem", NodeParts::default()),
        Err(SchemaError::NotConstructible("poem".into()))
    );
}

#[test]
fn gallery_accepts_free_form_options() {
    let registry = Registry::baseline();
    let parts = NodeParts::parent(
        Attributes::new().with("mode", "packed").with("class", "wide"),
        vec![Node::image(Media::new("A.jpg"))],
    );

    let gallery = registry.construct(kinds::GALLERY, parts).unwrap();
    assert_eq!(
        gallery.attributes(),
        Attributes::new().with("mode", "packed").with("class", "wide")
    );
}

#[test]
fn constraints() {
    let depth = Constraint::range(1, 6);
    assert!(depth.check(&3i64.into()).is_ok());
    assert_eq!(
        depth.check(&0i64.into()),
        Err(EcoString::from("0 is less than the minimum 1"))
    );
    assert_eq!(
        depth.check(&7i64.into()),
        Err(EcoString::from("7 is greater than the maximum 6"))
    );
    assert_eq!(
        depth.check(&"two".into()),
        Err(EcoString::from("expected integer, found text"))
    );

    let align = Constraint::ListOf(Box::new(Constraint::OneOf(&["left", "right"])));
    assert_eq!(
        align.check(&vec!["left", "up"].into()),
        Err(EcoString::from("item 1: \"up\" is not one of: left, right"))
    );

    assert!(Constraint::Url.check(&"a\nb".into()).is_err());
}

#[test]
fn attribute_problems_follow_declaration_order() {
    let def = VariantDef::leaf("probe")
        .attribute(AttributeSpec::required("first", Constraint::Text))
        .attribute(AttributeSpec::optional("second", Constraint::Bool));
    let attrs = Attributes::new().with("extra", 1i64).with("second", "yes");

    assert_eq!(
        def.check_attributes(&attrs),
        [
            AttributeProblem::Missing("first".into()),
            AttributeProblem::Invalid {
                name: "second".into(),
                reason: "expected boolean, found text".into(),
            },
            AttributeProblem::Undeclared("extra".into()),
        ]
    );
}

#[test]
fn round_trip_through_construct() {
    let registry = Registry::baseline();
    let tree = Node::root(vec![
        Node::heading(1, vec![Node::text("Title")]),
        Node::paragraph(vec![
            Node::link("https://example.org", vec![Node::text("site")]),
            Node::footnote_reference("n1"),
        ]),
        Node::footnote_definition("n1", vec![Node::paragraph(vec![Node::text("Note")])]),
        Node::syntax_highlight("rust", "fn main() {}"),
    ]);

    fn rebuild(registry: &Registry, node: &Node) -> Node {
        let mut parts = node.decompose();
        parts.children = parts
            .children
            .iter()
            .map(|child| rebuild(registry, child))
            .collect();
        registry.construct(node.kind(), parts).unwrap()
    }

    assert_eq!(rebuild(&registry, &tree), tree);
}
