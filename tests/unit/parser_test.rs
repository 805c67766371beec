//! Tests for the audit document parser

use std::io::Cursor;

use specaudit::adapters::xml::{self, ParseError};
use specaudit::core::models::{DocumentError, SectionElement};

use super::common::{Workspace, cdi_document, interceptors_document};

#[test]
fn test_generated_ids_follow_levels() {
    let doc = cdi_document();

    assert!(doc.has_generated_ids());
    assert_eq!(doc.spec_id(), "cdi");
    assert_eq!(doc.version(), "2.0");
    assert_eq!(doc.name(), "Contexts and Dependency Injection");
    assert_eq!(doc.section_ids(), vec!["1", "1.1", "1.2", "2"]);
    assert_eq!(doc.chapter_ids(), vec!["1", "2"]);

    assert_eq!(doc.generated_id_for("capabilities"), Some("1.1"));
    assert_eq!(doc.original_id_for("1.2"), Some("scopes"));
    assert_eq!(doc.section_title("2"), Some("Lifecycle"));
}

#[test]
fn test_every_declared_assertion_is_found_by_original_id() {
    for doc in [cdi_document(), interceptors_document()] {
        for section in doc.sections() {
            for assertion in doc.assertions(&section.id) {
                assert!(
                    doc.has_assertion(&section.original_id, &assertion.id),
                    "{}: {}/{}",
                    doc.spec_id(),
                    section.original_id,
                    assertion.id
                );
            }
        }
    }
}

#[test]
fn test_has_assertion_unknown_ids() {
    let doc = cdi_document();
    assert!(!doc.has_assertion("concepts", "zz"));
    assert!(!doc.has_assertion("nowhere", "a"));
    // generated ids are not accepted as document ids
    assert!(!doc.has_assertion("1", "a"));
}

#[test]
fn test_assertion_attributes() {
    let doc = cdi_document();

    let a = doc.assertion("1", "a").unwrap();
    assert_eq!(a.text, "A bean comprises the following _attributes_.");
    assert!(a.testable);
    assert!(!a.implied);
    assert_eq!(a.note, None);
    assert_eq!(a.status(), None);

    let b = doc.assertion("1", "b").unwrap();
    assert!(!b.testable);
    assert_eq!(b.note.as_deref(), Some("Informational only"));

    assert!(doc.assertion("2", "a").unwrap().implied);
}

#[test]
fn test_group_members_expand_in_place() {
    let doc = cdi_document();

    let elements = doc.elements("1.1");
    assert_eq!(elements.len(), 1);
    let SectionElement::Group(group) = &elements[0] else {
        panic!("expected a group");
    };
    assert_eq!(group.text, "A bean type defines a client-visible type of the bean.");
    assert!(group.assertions.iter().all(|a| a.section_id == "1.1"));

    let ids: Vec<_> = doc.assertions("1.1").iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[test]
fn test_plain_ids_and_inferred_levels() {
    let doc = interceptors_document();

    assert!(!doc.has_generated_ids());
    assert_eq!(doc.section_ids(), vec!["1", "1.1", "2"]);
    assert_eq!(doc.section("1.1").unwrap().level, 2);
    assert_eq!(doc.section("2").unwrap().level, 1);
    assert!(doc.elements("2").is_empty());
    assert_eq!(doc.generated_id_for("1.1"), Some("1.1"));
}

#[test]
fn test_missing_level_is_fatal_with_generation() {
    let err = xml::parse_str(
        r#"<specification id="s" version="1" generateSectionIds="TRUE">
             <section id="intro" title="Intro"/>
           </specification>"#,
    )
    .unwrap_err();
    assert!(matches!(err, ParseError::MissingLevel { section } if section == "intro"));
}

#[test]
fn test_generation_flag_is_case_insensitive() {
    let doc = xml::parse_str(
        r#"<specification id="s" version="1" generateSectionIds="True">
             <section id="intro" level="1" title="Intro"/>
           </specification>"#,
    )
    .unwrap();
    assert_eq!(doc.generated_id_for("intro"), Some("1"));
}

#[test]
fn test_duplicate_section_is_fatal() {
    let err = xml::parse_str(
        r#"<specification id="s" version="1">
             <section id="1" title="A"/>
             <section id="1" title="B"/>
           </specification>"#,
    )
    .unwrap_err();
    assert!(matches!(err, ParseError::Document(DocumentError::DuplicateSection(id)) if id == "1"));
}

#[test]
fn test_duplicate_assertion_is_fatal() {
    let err = xml::parse_str(
        r#"<specification id="s" version="1">
             <section id="1" title="A">
               <assertion id="a"><text>x</text></assertion>
               <group><text>g</text><assertion id="a"><text>y</text></assertion></group>
             </section>
           </specification>"#,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ParseError::Document(DocumentError::DuplicateAssertion { .. })
    ));
}

#[test]
fn test_malformed_and_empty_input() {
    assert!(matches!(
        xml::parse_str("<specification><section></specification>"),
        Err(ParseError::Xml(_))
    ));
    assert!(matches!(xml::parse_str(""), Err(ParseError::MissingRoot)));
    assert!(matches!(
        xml::parse_str("<?xml version=\"1.0\"?>\n<!-- nothing -->"),
        Err(ParseError::MissingRoot)
    ));
}

#[test]
fn test_unknown_elements_are_skipped() {
    let doc = xml::parse_str(
        r#"<specification id="s" version="1">
             <preface><section id="9" title="Hidden"/></preface>
             <section id="1" title="A">
               <figure><assertion id="hidden"><text>no</text></assertion></figure>
               <assertion id="a"><text>yes</text><extra>ignored</extra></assertion>
             </section>
           </specification>"#,
    )
    .unwrap();

    assert_eq!(doc.section_ids(), vec!["1"]);
    let ids: Vec<_> = doc.assertions("1").iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["a"]);
}

#[test]
fn test_text_entities_cdata_and_trimming() {
    let doc = xml::parse_str(
        r#"<specification id="s" version="1">
             <section id="1" title="A &amp; B">
               <assertion id="a">
                 <text>
                   x &lt; y <![CDATA[& z]]>
                 </text>
               </assertion>
             </section>
           </specification>"#,
    )
    .unwrap();

    assert_eq!(doc.section_title("1"), Some("A & B"));
    assert_eq!(doc.assertion("1", "a").unwrap().text, "x < y & z");
}

#[test]
fn test_parse_reader_matches_parse_str() {
    let xml_text = std::fs::read_to_string(super::common::fixture("interceptors-audit.xml")).unwrap();
    let from_reader = xml::parse_reader(Cursor::new(xml_text.as_bytes())).unwrap();
    assert_eq!(from_reader.section_ids(), interceptors_document().section_ids());
}

#[test]
fn test_load_file_reports_path() {
    let ws = Workspace::new();
    let path = ws.write("broken.xml", "<specification>");

    let err = xml::load_file(&path).unwrap_err();
    assert!(format!("{err:#}").contains("broken.xml"));

    let missing = xml::load_file(&ws.path().join("missing.xml")).unwrap_err();
    assert!(format!("{missing:#}").contains("failed to read"));
}
