use ecow::EcoString;

use super::tables::{simple_table, TableBuilder};
use super::*;
use crate::schema::Shape;

fn text(value: &str) -> Node {
    Node::text(value)
}

#[test]
fn heading_flattens_depth() {
    let heading = Node::heading(3, vec![text("History")]);

    assert_eq!(heading.kind(), "heading");
    assert_eq!(heading.shape(), Shape::Parent);
    assert_eq!(heading.attributes(), Attributes::new().with("depth", 3i64));
    assert_eq!(heading.children(), &[text("History")]);
    assert_eq!(heading.value(), None);
}

#[test]
fn literal_nodes_expose_their_value() {
    for node in [
        Node::text("plain"),
        Node::Html("<br>".into()),
        Node::InlineCode("x + 1".into()),
        Node::Nowiki("''kept''".into()),
        Node::math("E = mc^2"),
        Node::syntax_highlight("rust", "fn main() {}"),
    ] {
        assert!(node.is_literal(), "{} should be literal", node.kind());
        assert!(node.children().is_empty());
        assert!(node.value().is_some());
    }
}

#[test]
fn empty_text_is_still_literal() {
    let node = Node::text("");
    assert_eq!(node.shape(), Shape::Literal);
    assert_eq!(node.value(), Some(""));
}

#[test]
fn leaf_nodes_have_neither_children_nor_value() {
    for node in [
        Node::ThematicBreak,
        Node::Break,
        Node::Toc,
        Node::Signature(SignatureKind::UserAndDate),
        Node::footnote_reference("a"),
    ] {
        assert_eq!(node.shape(), Shape::Leaf, "{}", node.kind());
        assert!(node.children().is_empty());
        assert_eq!(node.value(), None);
    }
}

#[test]
fn reference_bundle_is_flattened() {
    let node = Node::link_reference("source", vec![text("the source")]);
    let attrs = node.attributes();

    assert_eq!(attrs.text("identifier").as_deref(), Some("source"));
    assert_eq!(attrs.text("referenceType").as_deref(), Some("shortcut"));
    assert!(!attrs.contains("label"));
}

#[test]
fn definition_carries_association_and_resource() {
    let node = Node::Definition {
        association: Association::new("mdn").with_label("MDN"),
        resource: Resource::new("https://developer.mozilla.org").with_title("Docs"),
    };
    let attrs = node.attributes();
    let names = attrs.names().map(EcoString::as_str).collect::<Vec<_>>();

    assert_eq!(names, ["identifier", "label", "url", "title"]);
}

#[test]
fn media_options_keep_their_spelling() {
    let media = Media::new("Cat.jpg")
        .with_alt("A cat")
        .with_kind("thumb")
        .with_location("left")
        .with_size("x120px")
        .with_caption("A [[cat]]");
    let attrs = Node::image(media).attributes();

    assert_eq!(attrs.text("url").as_deref(), Some("Cat.jpg"));
    assert_eq!(attrs.text("alt").as_deref(), Some("A cat"));
    assert_eq!(attrs.text("kind").as_deref(), Some("thumb"));
    assert_eq!(attrs.text("location").as_deref(), Some("left"));
    assert_eq!(attrs.text("size").as_deref(), Some("x120px"));
    assert_eq!(attrs.text("caption").as_deref(), Some("A [[cat]]"));
    assert!(!attrs.contains("alignment"));
}

#[test]
fn media_sizes() {
    for size in ["120px", "x120px", "120x80px", "upright", "upright=0.6", "upright=2"] {
        assert!(is_media_size(size), "{size} should be accepted");
    }
    for size in ["wide", "120", "px", "120x80", "upright=", "upright=abc", "-5px"] {
        assert!(!is_media_size(size), "{size} should be rejected");
    }
}

#[test]
fn literal_enums_parse_and_print() {
    assert_eq!("userAndDate".parse::<SignatureKind>(), Ok(SignatureKind::UserAndDate));
    assert_eq!(SignatureKind::Date.to_string(), "date");
    assert_eq!(ReferenceType::Collapsed.as_str(), "collapsed");
    assert_eq!(
        "sideways".parse::<AlignKind>(),
        Err(EcoString::from("`sideways` is not one of: left, right, center, none"))
    );
}

#[test]
fn attribute_values() {
    assert_eq!(AttrValue::from("left").as_text().map(EcoString::as_str), Some("left"));
    assert_eq!(AttrValue::from(true).as_bool(), Some(true));
    assert_eq!(AttrValue::from(7u32).as_int(), Some(7));
    assert_eq!(
        AttrValue::from(vec![AlignKind::Left, AlignKind::None]).to_string(),
        r#"["left", "none"]"#
    );
    assert_eq!(AttrValue::from(1i64).as_text(), None);

    let align = AttrValue::from(vec![AlignKind::Right]);
    assert_eq!(align.as_list(), Some(&[AttrValue::from("right")][..]));
    assert_eq!(AttrValue::from("right").as_list(), None);
}

#[test]
fn attributes_keep_insertion_order() {
    let attrs = Attributes::new()
        .with("url", "a")
        .with("title", "b")
        .with("alt", "c");
    let names = attrs.names().map(EcoString::as_str).collect::<Vec<_>>();

    assert_eq!(names, ["url", "title", "alt"]);
    assert_eq!(attrs.len(), 3);
    assert!(!attrs.is_empty());
    assert!(Node::ThematicBreak.attributes().is_empty());
}

#[test]
fn gallery_options_become_attributes() {
    let mut node = Node::gallery(vec![Node::image(Media::new("A.jpg"))]);
    if let Node::Gallery { options, .. } = &mut node {
        options.insert("mode".into(), "packed".into());
        options.insert("perrow".into(), "4".into());
    }

    assert_eq!(
        node.attributes(),
        Attributes::new().with("mode", "packed").with("perrow", "4")
    );
}

#[test]
fn decompose_splits_node() {
    let node = Node::ordered_list(3, vec![Node::list_item(vec![Node::paragraph(vec![text("a")])])]);
    let parts = node.decompose();

    assert_eq!(parts.attributes.flag("ordered"), Some(true));
    assert_eq!(parts.attributes.int("start"), Some(3));
    assert_eq!(parts.children.len(), 1);
    assert_eq!(parts.value, None);
}

#[test]
fn table_builder_nests_rows_and_cells() {
    let table = TableBuilder::new()
        .headers(vec![vec![text("Name")], vec![text("Born")]])
        .add_row(vec![vec![text("Ada")], vec![text("1815")]])
        .align_column(1, AlignKind::Right)
        .build();

    let Node::Table { align, children } = &table else {
        panic!("expected a table, got {table:?}");
    };
    assert_eq!(align, &[AlignKind::None, AlignKind::Right]);
    assert_eq!(children.len(), 2);
    assert!(children.iter().all(|row| row.kind() == "tableRow"));
    assert_eq!(children[1].children()[0], Node::TableCell(vec![text("Ada")]));
}

#[test]
fn simple_table_has_no_alignment() {
    let table = simple_table(vec![vec![text("A")]], vec![vec![vec![text("1")]]]);

    assert!(!table.attributes().contains("align"));
    assert_eq!(table.children().len(), 2);
}
