use docpivot::{from_json_str, to_json_string, Content, Scalar};

fn roundtrip(input: &str) -> String {
    to_json_string(&from_json_str(input).unwrap())
}

#[test]
fn test_nested_document_roundtrips_exactly() {
    let input = r#"{"test":[1,{"a":[{"b":2}]},3]}"#;
    assert_eq!(roundtrip(input), input);
}

#[test]
fn test_scalar_documents_roundtrip_exactly() {
    for input in ["null", "true", "false", "0", "-42", "2.5", "1.0", r#""""#] {
        assert_eq!(roundtrip(input), input);
    }
}

#[test]
fn test_escaped_quote_and_newline_roundtrip() {
    let input = r#"{"msg":"a \"quoted\" line\nsecond line"}"#;
    assert_eq!(roundtrip(input), input);

    // and the parsed value holds the unescaped characters
    let tree = from_json_str(input).unwrap();
    let msg = tree
        .as_object()
        .and_then(|obj| obj.get("msg"))
        .and_then(Content::as_scalar)
        .and_then(Scalar::as_text)
        .unwrap();
    assert_eq!(msg, "a \"quoted\" line\nsecond line");
}

#[test]
fn test_key_order_is_preserved() {
    let input = r#"{"z":1,"m":2,"a":3}"#;
    assert_eq!(roundtrip(input), input);
}

#[test]
fn test_empty_containers_roundtrip() {
    assert_eq!(roundtrip("{}"), "{}");
    assert_eq!(roundtrip("[]"), "[]");
    assert_eq!(roundtrip(r#"{"a":[],"b":{}}"#), r#"{"a":[],"b":{}}"#);
}

#[test]
fn test_integer_and_float_literals_keep_their_kind() {
    let tree = from_json_str("[1,1.0,-0.5]").unwrap();
    let arr = tree.as_array().unwrap();
    assert_eq!(arr[0], Content::Primitive(Scalar::Int(1)));
    assert_eq!(arr[1], Content::Primitive(Scalar::Float(1.0)));
    assert_eq!(arr[2], Content::Primitive(Scalar::Float(-0.5)));
    assert_eq!(to_json_string(&tree), "[1,1.0,-0.5]");
}

#[test]
fn test_unicode_escapes_parse() {
    let tree = from_json_str(r#""Aé 😀""#).unwrap();
    assert_eq!(tree, Content::from("A\u{e9} \u{1f600}"));
}

#[test]
fn test_truncated_object_is_parse_error() {
    let err = from_json_str(r#"{"a":1"#).unwrap_err();
    assert!(err.is_parse());
    assert!(err.to_string().contains("parse error at"));
}

#[test]
fn test_malformed_inputs_are_parse_errors() {
    for input in [
        "",
        "{",
        "[1,]",
        r#"{"a" 1}"#,
        r#"{"a":1}extra"#,
        "[1 2]",
        "nul",
        "'single'",
    ] {
        let err = from_json_str(input).unwrap_err();
        assert!(err.is_parse(), "{input:?} should fail to parse");
    }
}

#[test]
fn test_error_position_points_at_offending_input() {
    let err = from_json_str("{\n  \"a\": }").unwrap_err();
    assert!(err.is_parse());
    assert_eq!(err.span().start.line, 2);
}
