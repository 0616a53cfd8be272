//! Document model parser tests
//!
//! Tests XML parsing against the shapes the array actually returns,
//! including the tolerances the model guarantees.

use p2000_exporter::error::CollectorError;
use p2000_exporter::p2000::Document;

#[test]
fn login_response_properties_are_findable_document_wide() {
    // Given: A login response with its status object
    let xml = br#"<RESPONSE VERSION="L100">
        <OBJECT basetype="status" name="status" oid="1">
            <PROPERTY name="response-type">Success</PROPERTY>
            <PROPERTY name="response-type-numeric">0</PROPERTY>
            <PROPERTY name="response">c8e2f7b061782e2e0fce7d32950a8b7e</PROPERTY>
        </OBJECT>
    </RESPONSE>"#;

    // When: Parsing and searching anywhere in the document
    let doc = Document::parse(xml).expect("parse failed");

    // Then: The handshake properties resolve
    assert_eq!(doc.find_property("response-type-numeric"), Some("0"));
    assert_eq!(
        doc.find_property("response"),
        Some("c8e2f7b061782e2e0fce7d32950a8b7e")
    );
}

#[test]
fn repeated_object_names_all_appear_in_order() {
    // Given: One enclosure-component per physical unit
    let xml = br#"<RESPONSE>
        <OBJECT name="enclosure-component"><PROPERTY name="type">Temp</PROPERTY></OBJECT>
        <OBJECT name="enclosure-component"><PROPERTY name="type">Fan</PROPERTY></OBJECT>
        <OBJECT name="enclosure-component"><PROPERTY name="type">Voltage</PROPERTY></OBJECT>
    </RESPONSE>"#;

    let doc = Document::parse(xml).unwrap();
    let types: Vec<_> = doc
        .objects_named("enclosure-component")
        .map(|o| o.property("type").unwrap())
        .collect();
    assert_eq!(types, vec!["Temp", "Fan", "Voltage"]);
}

#[test]
fn key_value_composites_stay_raw_text() {
    let xml = br#"<R><OBJECT name="enclosure-component">
        <PROPERTY name="additional-data">Temperature=38 C</PROPERTY>
    </OBJECT></R>"#;

    let doc = Document::parse(xml).unwrap();
    // The parser does not interpret composites; that is classifier work
    assert_eq!(
        doc.objects[0].property("additional-data"),
        Some("Temperature=38 C")
    );
}

#[test]
fn duplicate_property_keys_both_appear() {
    let xml = br#"<R><OBJECT name="o">
        <PROPERTY name="k">first</PROPERTY>
        <PROPERTY name="k">second</PROPERTY>
    </OBJECT></R>"#;

    let doc = Document::parse(xml).unwrap();
    assert_eq!(doc.objects[0].properties.len(), 2);
    // First match wins on lookup
    assert_eq!(doc.objects[0].property("k"), Some("first"));
}

#[test]
fn empty_and_self_closing_properties_have_empty_text() {
    let xml = br#"<R><OBJECT name="o">
        <PROPERTY name="a"></PROPERTY>
        <PROPERTY name="b"/>
    </OBJECT></R>"#;

    let doc = Document::parse(xml).unwrap();
    assert_eq!(doc.objects[0].property("a"), Some(""));
    assert_eq!(doc.objects[0].property("b"), Some(""));
}

#[test]
fn nested_objects_are_flattened_in_document_order() {
    let xml = br#"<R>
        <OBJECT name="outer">
            <PROPERTY name="p1">v1</PROPERTY>
            <OBJECT name="inner"><PROPERTY name="p2">v2</PROPERTY></OBJECT>
            <PROPERTY name="p3">v3</PROPERTY>
        </OBJECT>
    </R>"#;

    let doc = Document::parse(xml).unwrap();
    assert_eq!(doc.objects.len(), 2);
    assert_eq!(doc.objects[0].name, "outer");
    assert_eq!(doc.objects[0].property("p1"), Some("v1"));
    // A property after the inner object still belongs to the outer one
    assert_eq!(doc.objects[0].property("p3"), Some("v3"));
    assert_eq!(doc.objects[1].property("p2"), Some("v2"));
}

#[test]
fn truncated_xml_is_malformed() {
    let xml = br#"<RESPONSE><OBJECT name="disk-statistics"><PROPERTY name="iops">250"#;
    let err = Document::parse(xml).unwrap_err();
    assert!(matches!(err, CollectorError::MalformedResponse(_)));
}

#[test]
fn mismatched_tags_are_malformed() {
    let xml = br#"<RESPONSE><OBJECT name="o"><PROPERTY name="p">1</OBJECT></RESPONSE>"#;
    assert!(Document::parse(xml).is_err());
}

#[test]
fn html_error_page_is_malformed() {
    // Arrays behind a proxy sometimes answer with a plain error page
    let err = Document::parse(b"Service Temporarily Unavailable").unwrap_err();
    assert!(matches!(err, CollectorError::MalformedResponse(_)));
}

#[test]
fn entities_in_property_text_are_unescaped() {
    let xml = br#"<R><OBJECT name="o"><PROPERTY name="p">a &amp; b</PROPERTY></OBJECT></R>"#;
    let doc = Document::parse(xml).unwrap();
    assert_eq!(doc.objects[0].property("p"), Some("a & b"));
}
