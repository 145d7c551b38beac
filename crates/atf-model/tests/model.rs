use atf_model::{
    Document, Line, Note, TextPart, UrnComposer, Work, WorkPartKind, edition_id, part_file_name,
    translation_id,
};

fn sample_document() -> Document {
    let mut doc = Document::new("akk");
    doc.header.title = Some("Old Babylonian letter".to_string());
    doc.header.code = Some("X001001".to_string());

    let mut tablet = TextPart::named("tablet");
    let mut obverse = TextPart::named("obverse");
    obverse.push(Line::new("1", "a-na"));
    obverse.push(Line::new("2", "qi2-bi2-ma"));
    obverse.push(Note::new("rest broken"));
    tablet.push(obverse);
    let mut edition = TextPart::edition("akk");
    edition.push(tablet);
    doc.parts.push(edition);

    let mut translation = TextPart::translation("en");
    translation.push(Line::new("1", "To"));
    doc.parts.push(translation);
    doc
}

#[test]
fn work_urn_joins_group_and_code() {
    let composer = UrnComposer::new("urn:cts:cdli:test").unwrap();
    let work_urn = composer.work_urn("X001001").unwrap();
    assert_eq!(work_urn, "urn:cts:cdli:test.X001001");
    assert_eq!(
        edition_id(&work_urn, "akk"),
        "urn:cts:cdli:test.X001001.cdli-akk"
    );
    assert_eq!(
        translation_id(&work_urn, "en"),
        "urn:cts:cdli:test.X001001.cdli-en"
    );
}

#[test]
fn assign_names_top_level_parts_only() {
    let mut doc = sample_document();
    let composer = UrnComposer::new("urn:cts:cdli:test").unwrap();
    let work_urn = composer.assign(&mut doc).unwrap();
    assert_eq!(work_urn, "urn:cts:cdli:test.X001001");

    let edition = doc.edition().unwrap();
    assert_eq!(
        edition.name.as_deref(),
        Some("urn:cts:cdli:test.X001001.cdli-akk")
    );
    let translation = doc.translations().next().unwrap();
    assert_eq!(
        translation.name.as_deref(),
        Some("urn:cts:cdli:test.X001001.cdli-en")
    );
    match &edition.children[0] {
        atf_model::Node::Part(tablet) => assert_eq!(tablet.name.as_deref(), Some("tablet")),
        other => panic!("unexpected child {other:?}"),
    }
}

#[test]
fn assign_without_code_fails() {
    let mut doc = sample_document();
    doc.header.code = None;
    let composer = UrnComposer::new("urn:cts:cdli:test").unwrap();
    assert!(composer.assign(&mut doc).is_err());
}

#[test]
fn line_count_is_recursive() {
    let doc = sample_document();
    assert_eq!(doc.edition().unwrap().line_count(), 2);
    let refs: Vec<&str> = doc
        .edition()
        .unwrap()
        .lines()
        .iter()
        .map(|line| line.reference.as_str())
        .collect();
    assert_eq!(refs, vec!["1", "2"]);
}

#[test]
fn single_part_copy_keeps_header() {
    let doc = sample_document();
    let only_translation = doc.with_single_part(1).unwrap();
    assert_eq!(only_translation.parts.len(), 1);
    assert_eq!(only_translation.header, doc.header);
    assert!(only_translation.edition().is_none());
    assert!(doc.with_single_part(5).is_none());
}

#[test]
fn work_lists_edition_then_translations() {
    let doc = sample_document();
    let work = Work::for_document(
        "urn:cts:cdli:test",
        "urn:cts:cdli:test.X001001",
        &doc,
        "converted",
    );
    assert_eq!(work.parts.len(), 2);
    assert_eq!(work.parts[0].kind, WorkPartKind::Edition);
    assert_eq!(work.parts[0].urn, "urn:cts:cdli:test.X001001.cdli-akk");
    assert_eq!(work.parts[1].kind, WorkPartKind::Translation);
    assert_eq!(work.parts[1].language, "en");
    assert_eq!(
        work.label.as_deref(),
        Some("CDLI X001001 Old Babylonian letter")
    );
}

#[test]
fn part_file_name_drops_urn_namespace() {
    assert_eq!(
        part_file_name("urn:cts:cdli:test.X001001.cdli-akk"),
        "test.X001001.cdli-akk.xml"
    );
}
