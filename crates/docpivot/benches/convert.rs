use criterion::{Criterion, black_box, criterion_group, criterion_main};

use docpivot::{Format, Input, convert};

const JSON_INPUT: &str =
    r##"{"#declaration":{"catalog":{"book":[{"#text":"Dune"},{"#text":"Solaris"}]}}}"##;
const XML_INPUT: &str =
    r#"<?xml version="1.0"?><catalog><book id="1">Dune</book><book id="2">Solaris</book></catalog>"#;

fn bench_json_to_xml(c: &mut Criterion) {
    c.bench_function("convert_json_xml", |b| {
        b.iter(|| convert(&Input::from_str(black_box(JSON_INPUT)), Format::Json, Format::Xml))
    });
}

fn bench_xml_to_json(c: &mut Criterion) {
    c.bench_function("convert_xml_json", |b| {
        b.iter(|| convert(&Input::from_str(black_box(XML_INPUT)), Format::Xml, Format::Json))
    });
}

fn bench_json_roundtrip(c: &mut Criterion) {
    c.bench_function("convert_json_json", |b| {
        b.iter(|| convert(&Input::from_str(black_box(JSON_INPUT)), Format::Json, Format::Json))
    });
}

fn bench_xml_roundtrip(c: &mut Criterion) {
    c.bench_function("convert_xml_xml", |b| {
        b.iter(|| convert(&Input::from_str(black_box(XML_INPUT)), Format::Xml, Format::Xml))
    });
}

criterion_group!(
    benches,
    bench_json_to_xml,
    bench_xml_to_json,
    bench_json_roundtrip,
    bench_xml_roundtrip
);
criterion_main!(benches);
