//! Round-trip validation against rendered documents.

use atf_model::{Document, Line, TextPart, UrnComposer};
use atf_report::render;
use atf_validate::{RoundTripError, validate_round_trip};

fn document(first_line: &str, translations: &[&str]) -> Document {
    let mut doc = Document::new("sux");
    doc.header.code = Some("X000001".to_string());
    doc.header.title = Some("test".to_string());
    let mut edition = TextPart::edition("sux");
    let mut obverse = TextPart::named("obverse");
    obverse.push(Line::new("1", first_line));
    edition.push(obverse);
    doc.parts.push(edition);
    for language in translations {
        let mut part = TextPart::translation(*language);
        part.push(Line::new("1", "son of the king"));
        doc.parts.push(part);
    }
    UrnComposer::new("urn:cts:cdli:test")
        .unwrap()
        .assign(&mut doc)
        .unwrap();
    doc
}

#[test]
fn rendered_document_passes() {
    let doc = document(r#"<hi rend="smallcaps">dumu lugal</hi>"#, &["en", "de"]);
    let xml = render(&doc).unwrap();
    let outline = validate_round_trip(&xml, &doc).unwrap();
    assert_eq!(outline.editions(), 1);
    let languages: Vec<_> = outline
        .translations()
        .map(|part| part.language.as_deref())
        .collect();
    assert_eq!(languages, vec![Some("en"), Some("de")]);
    assert_eq!(
        outline.parts[0].name.as_deref(),
        Some("urn:cts:cdli:test.X000001.cdli-sux")
    );
}

#[test]
fn unbalanced_markup_fails() {
    let doc = document(r#"<hi rend="smallcaps">dumu lugal"#, &[]);
    let xml = render(&doc).unwrap();
    let error = validate_round_trip(&xml, &doc).unwrap_err();
    assert!(matches!(
        error,
        RoundTripError::Xml(_) | RoundTripError::MismatchedEnd { .. }
    ));
}

#[test]
fn stray_closing_markup_fails() {
    let doc = document("dumu lugal</hi>", &[]);
    let xml = render(&doc).unwrap();
    assert!(validate_round_trip(&xml, &doc).is_err());
}

#[test]
fn part_count_must_match_source() {
    let rendered = document("lugal", &["en"]);
    let xml = render(&rendered).unwrap();
    let other = document("lugal", &[]);
    let error = validate_round_trip(&xml, &other).unwrap_err();
    assert!(matches!(
        error,
        RoundTripError::PartCount {
            expected: 1,
            found: 2
        }
    ));
}

#[test]
fn translation_language_must_match_source() {
    let rendered = document("lugal", &["en"]);
    let xml = render(&rendered).unwrap();
    let other = document("lugal", &["fr"]);
    let error = validate_round_trip(&xml, &other).unwrap_err();
    assert!(matches!(
        error,
        RoundTripError::TranslationLanguage { index: 0, .. }
    ));
}

#[test]
fn missing_root_is_reported() {
    let doc = document("lugal", &[]);
    let error = validate_round_trip("<other/>", &doc).unwrap_err();
    assert!(matches!(error, RoundTripError::MissingRoot));
}
