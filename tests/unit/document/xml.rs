use super::*;

const SAMPLE: &str = r##"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<!-- Created with Inkscape -->
<svg xmlns="http://www.w3.org/2000/svg" width="64" height="64" id="svg1">
  <defs id="defs1"/>
  <g id="layer1">
    <title id="t1">icon &amp; badge</title>
    <rect id="r1" style="fill:#000;fill-opacity:1" x="0" y="0" width="10" height="10"/>
    <text id="txt"><![CDATA[a < b]]></text>
  </g>
</svg>
"##;

#[test]
fn parses_elements_attributes_and_text() {
    let doc = parse(SAMPLE).unwrap();
    let svg = doc.root_element().unwrap();
    let el = doc.element(svg).unwrap();
    assert_eq!(el.name, "svg");
    assert_eq!(el.attr("id"), Some("svg1"));

    let (g, _) = doc
        .child_elements(svg)
        .find(|(_, el)| el.name == "g")
        .unwrap();
    assert_eq!(doc.child_text(g, "title").as_deref(), Some("icon & badge"));
    assert_eq!(doc.child_text(g, "text").as_deref(), Some("a < b"));
}

#[test]
fn round_trip_is_structurally_stable() {
    let first = parse(SAMPLE).unwrap();
    let text = serialize(&first).unwrap();
    let second = parse(&text).unwrap();
    assert_eq!(first, second);
}

#[test]
fn serialize_keeps_prolog_and_attribute_order() {
    let doc = parse(SAMPLE).unwrap();
    let text = serialize(&doc).unwrap();
    assert!(text.starts_with(r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#));
    assert!(text.contains("<!-- Created with Inkscape -->"));
    assert!(text.contains(r#"<rect id="r1" style="fill:#000;fill-opacity:1" x="0""#));
    assert!(text.contains("icon &amp; badge"));
}

#[test]
fn attribute_values_are_escaped_on_write() {
    let mut doc = parse(r#"<svg id="a"/>"#).unwrap();
    let svg = doc.root_element().unwrap();
    doc.set_attr(svg, "label", "a<b & \"c\"");
    let text = serialize(&doc).unwrap();
    let back = parse(&text).unwrap();
    assert_eq!(
        back.attr(back.root_element().unwrap(), "label"),
        Some("a<b & \"c\"")
    );
}

#[test]
fn doctype_survives_repeated_round_trips() {
    let src = r#"<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "x.dtd"><svg id="a"/>"#;
    let once = serialize(&parse(src).unwrap()).unwrap();
    let twice = serialize(&parse(&once).unwrap()).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn malformed_input_is_a_parse_error() {
    for bad in [
        "<svg><g></svg>",
        "<svg>",
        "</svg>",
        "",
        "<svg a=\"1\" a=\"2\"/>",
    ] {
        let err = parse(bad).unwrap_err();
        assert!(
            matches!(err, ExportError::Parse(_)),
            "expected parse error for {bad:?}, got {err:?}"
        );
    }
}

#[test]
fn attributes_resolve_entities_declared_in_the_doctype() {
    let src = r#"<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "x.dtd" [
    <!ENTITY ns_svg "http://www.w3.org/2000/svg">
    <!ENTITY % params "ignored">
    <!ENTITY ns_flows 'http://ns.adobe.com/Flows/1.0/'>
]>
<svg xmlns="&ns_svg;" xmlns:x="&ns_flows;" label="&amp;&#65;"><g id="a"/></svg>"#;
    let doc = parse(src).unwrap();
    let svg = doc.root_element().unwrap();
    assert_eq!(doc.attr(svg, "xmlns"), Some("http://www.w3.org/2000/svg"));
    assert_eq!(doc.attr(svg, "xmlns:x"), Some("http://ns.adobe.com/Flows/1.0/"));
    assert_eq!(doc.attr(svg, "label"), Some("&A"));

    let again = parse(&serialize(&doc).unwrap()).unwrap();
    assert_eq!(
        again.attr(again.root_element().unwrap(), "xmlns"),
        Some("http://www.w3.org/2000/svg")
    );
}

#[test]
fn undeclared_entity_in_attribute_is_a_parse_error() {
    let err = parse(r#"<svg xmlns="&nowhere;"/>"#).unwrap_err();
    assert!(matches!(err, ExportError::Parse(_)), "{err:?}");
}
