//! Tests for loading audit documents from disk

use std::fs;

use specaudit::adapters::xml::{self, ParseError};
use tempfile::TempDir;

use super::fixture;

#[test]
fn test_load_fixture_documents() {
    let cdi = xml::load_file(&fixture("cdi-audit.xml")).unwrap();
    assert_eq!(cdi.section_count(), 4);
    assert_eq!(cdi.assertions("1").len(), 2);

    let interceptors = xml::load_file(&fixture("interceptors-audit.xml")).unwrap();
    assert_eq!(interceptors.spec_id(), "interceptors");
    assert_eq!(interceptors.chapter_ids(), vec!["1", "2"]);
}

#[test]
fn test_load_error_keeps_parse_error_in_chain() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("audit.xml");
    fs::write(
        &path,
        r#"<specification id="s" version="1" generateSectionIds="true"><section id="x"/></specification>"#,
    )
    .unwrap();

    let err = xml::load_file(&path).unwrap_err();
    let parse_error = err.downcast_ref::<ParseError>().unwrap();
    assert!(matches!(parse_error, ParseError::MissingLevel { .. }));
}

#[test]
fn test_utf8_text_survives() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("audit.xml");
    fs::write(
        &path,
        "<specification id=\"s\" version=\"1\"><section id=\"1\" title=\"Übersicht\">\
         <assertion id=\"a\"><text>Größe ≤ 10</text></assertion></section></specification>",
    )
    .unwrap();

    let doc = xml::load_file(&path).unwrap();
    assert_eq!(doc.section_title("1"), Some("Übersicht"));
    assert_eq!(doc.assertion("1", "a").unwrap().text, "Größe ≤ 10");
}

#[test]
fn test_load_document_with_extreme_level() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("audit.xml");
    fs::write(
        &path,
        r#"<specification id="s" version="1" generateSectionIds="true">
             <section id="x" level="4294967295" title="X"><assertion id="a"><text>A</text></assertion></section>
           </specification>"#,
    )
    .unwrap();

    let doc = xml::load_file(&path).unwrap();
    assert_eq!(doc.generated_id_for("x"), Some("1"));
    assert!(doc.has_assertion("x", "a"));
}
