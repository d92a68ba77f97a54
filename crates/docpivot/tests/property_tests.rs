//! Property-based round-trip tests
//!
//! Two laws per format: a rendered tree reparses to a semantically equal
//! tree, and rendering is canonically stable (render-parse-render is a
//! fixed point).

use proptest::prelude::*;

use docpivot::{
    from_json_str, from_xml_str, semantic_eq, to_json_string, to_xml_string, reserved, Content,
    Object, Scalar,
};

fn arb_key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}"
}

/// Arbitrary JSON-expressible content (finite floats only; JSON has no
/// encoding for NaN or infinity)
fn arb_json_content() -> impl Strategy<Value = Content> {
    let leaf = prop_oneof![
        Just(Content::null()),
        any::<bool>().prop_map(Content::from),
        any::<i64>().prop_map(Content::from),
        (-1e12f64..1e12f64).prop_map(Content::from),
        // printable ASCII exercises quote and backslash escaping
        "[ -~]{0,20}".prop_map(Content::from),
    ];

    leaf.prop_recursive(6, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Content::from),
            prop::collection::hash_map(arb_key(), inner, 0..6)
                .prop_map(|map| Content::Object(map.into_iter().collect())),
        ]
    })
}

/// Arbitrary content in the shape the XML codec itself produces: objects
/// all the way down, text leaves under `#text` that the coercion pass
/// leaves alone, arrays only with two or more object items
fn arb_xml_content() -> impl Strategy<Value = Content> {
    let text_leaf = "[a-z][a-z ]{0,12}[a-z]"
        .prop_filter("coercible literals change type", |s| {
            s != "true" && s != "false"
        })
        .prop_map(|s| {
            let mut obj = Object::new();
            obj.insert(reserved::TEXT, Content::Primitive(Scalar::Text(s)));
            Content::Object(obj)
        });
    let empty = Just(Content::Object(Object::new()));

    prop_oneof![text_leaf, empty]
        .prop_recursive(5, 32, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 2..5).prop_map(Content::from),
                prop::collection::hash_map(arb_key(), inner, 1..5)
                    .prop_map(|map| Content::Object(map.into_iter().collect())),
            ]
        })
        // an array at the top would render as several root elements
        .prop_filter("document needs a single root element", Content::is_object)
        .prop_filter("element arrays hold objects", xml_renderable)
        .prop_map(|content| {
            let mut root = Object::new();
            root.insert("root", content);
            let mut top = Object::new();
            top.insert(reserved::DECLARATION, root);
            Content::Object(top)
        })
}

/// True if every array in the tree holds only objects (the XML writer's
/// structural requirement)
fn xml_renderable(content: &Content) -> bool {
    match content {
        Content::Primitive(_) => true,
        Content::Array(arr) => arr.iter().all(|item| item.is_object() && xml_renderable(item)),
        Content::Object(obj) => obj.values().all(xml_renderable),
    }
}

proptest! {
    #[test]
    fn prop_json_render_parse_is_semantic_identity(content in arb_json_content()) {
        let rendered = to_json_string(&content);
        let reparsed = from_json_str(&rendered).unwrap();
        prop_assert!(semantic_eq(&content, &reparsed));
    }

    #[test]
    fn prop_json_rendering_is_canonically_stable(content in arb_json_content()) {
        let first = to_json_string(&content);
        let reparsed = from_json_str(&first).unwrap();
        prop_assert_eq!(to_json_string(&reparsed), first);
    }

    #[test]
    fn prop_json_parse_never_panics(input in "[ -~]{0,40}") {
        let _ = from_json_str(&input);
    }

    #[test]
    fn prop_xml_render_parse_is_semantic_identity(content in arb_xml_content()) {
        let rendered = to_xml_string(&content).unwrap();
        let reparsed = from_xml_str(&rendered).unwrap();
        prop_assert!(semantic_eq(&content, &reparsed));
    }

    #[test]
    fn prop_xml_rendered_text_round_trips_exactly(content in arb_xml_content()) {
        let rendered = to_xml_string(&content).unwrap();
        let reparsed = from_xml_str(&rendered).unwrap();
        prop_assert_eq!(to_xml_string(&reparsed).unwrap(), rendered);
    }
}
