//! Tests for TEI and CTS rendering and corpus writes.

use atf_model::{
    DEFAULT_WORK_DESCRIPTION, Document, Line, Note, TextGroup, TextPart, UrnComposer, Work,
};
use atf_report::{CorpusLayout, render, render_work, tei_to_atf, write_textgroup_index, write_work};

const GROUP_URN: &str = "urn:cts:cdli:test";

fn sample_document() -> Document {
    let mut doc = Document::new("akk");
    doc.header.title = Some("Letter & list".to_string());
    doc.header.code = Some("X001001".to_string());

    let mut edition = TextPart::edition("akk");
    let mut tablet = TextPart::named("tablet");
    let mut obverse = TextPart::named("obverse");
    obverse.push(Line::new("1", r#"a-na <hi rend="superscript">d</hi>utu"#));
    obverse.push(Line::new("2", "qi2-bi2-ma"));
    obverse.push(Note::new("single ruling"));
    tablet.push(obverse);
    edition.push(tablet);
    doc.parts.push(edition);

    let mut translation = TextPart::translation("en");
    translation.push(Line::new("1", "To Shamash"));
    doc.parts.push(translation);
    doc
}

fn assigned() -> (Document, String) {
    let mut doc = sample_document();
    let composer = UrnComposer::new(GROUP_URN).unwrap();
    let work_urn = composer.assign(&mut doc).unwrap();
    (doc, work_urn)
}

#[test]
fn textgroup_index() {
    let group = TextGroup::new(GROUP_URN, "atf2cts test examples");
    insta::assert_snapshot!(render(&group).unwrap(), @r#"
    <?xml version="1.0" encoding="UTF-8"?>
    <ti:textgroup xmlns:ti="http://chs.harvard.edu/xmlns/cts" urn="urn:cts:cdli:test">
      <ti:groupname xml:lang="eng">atf2cts test examples</ti:groupname>
    </ti:textgroup>
    "#);
}

#[test]
fn document_carries_header_metadata() {
    let (doc, _) = assigned();
    let xml = render(&doc).unwrap();
    assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    assert!(xml.contains(r#"<TEI xmlns="http://www.tei-c.org/ns/1.0">"#));
    assert!(xml.contains("<title>Letter &amp; list</title>"));
    assert!(xml.contains("<p>Converted from ATF by atf2tei.</p>"));
    assert!(xml.contains(r#"<idno type="CDLI">X001001</idno>"#));
    assert!(xml.contains(r#"<refsDecl n="CTS">"#));
    assert!(xml.contains(r#"<cRefPattern n="line" matchPattern="(\w+)\.(\w+)\.(\w+)""#));
    assert!(xml.contains(
        r#"<div type="edition" n="urn:cts:cdli:test.X001001.cdli-akk" xml:lang="akk">"#
    ));
    assert!(xml.contains(
        r#"<div type="translation" n="urn:cts:cdli:test.X001001.cdli-en" xml:lang="en">"#
    ));
    assert!(xml.contains(r#"<l n="1">a-na <hi rend="superscript">d</hi>utu</l>"#));
    assert!(xml.contains("<note>single ruling</note>"));
}

#[test]
fn citation_patterns_are_most_specific_first() {
    let (doc, _) = assigned();
    let xml = render(&doc).unwrap();
    let line = xml.find(r#"cRefPattern n="line""#).unwrap();
    let surface = xml.find(r#"cRefPattern n="surface""#).unwrap();
    let object = xml.find(r#"cRefPattern n="object""#).unwrap();
    assert!(line < surface && surface < object);
}

#[test]
fn work_index_lists_edition_and_translations() {
    let (doc, work_urn) = assigned();
    let work = Work::for_document(GROUP_URN, &work_urn, &doc, DEFAULT_WORK_DESCRIPTION);
    let xml = render(&work).unwrap();
    assert!(xml.contains(r#"groupUrn="urn:cts:cdli:test""#));
    assert!(xml.contains(r#"urn="urn:cts:cdli:test.X001001""#));
    assert!(xml.contains(
        r#"<ti:edition workUrn="urn:cts:cdli:test.X001001" urn="urn:cts:cdli:test.X001001.cdli-akk">"#
    ));
    assert!(xml.contains(r#"urn="urn:cts:cdli:test.X001001.cdli-en" xml:lang="en">"#));
    assert!(xml.contains(r#"<ti:label xml:lang="eng">CDLI X001001 Letter &amp; list</ti:label>"#));
    assert!(xml.contains(
        r#"<ti:description xml:lang="eng">Test doc converted from atf.</ti:description>"#
    ));
}

#[test]
fn writes_one_file_per_part() {
    let dir = tempfile::tempdir().unwrap();
    let layout = CorpusLayout::new(dir.path());
    let (doc, work_urn) = assigned();
    let work = Work::for_document(GROUP_URN, &work_urn, &doc, DEFAULT_WORK_DESCRIPTION);

    let rendered = render_work(&doc, &work).unwrap();
    let written = write_work(&layout, &rendered).unwrap();
    assert_eq!(written.len(), 3);

    let index = dir.path().join("test/X001001/__cts__.xml");
    assert!(index.is_file());
    let edition =
        std::fs::read_to_string(dir.path().join("test/X001001/test.X001001.cdli-akk.xml"))
            .unwrap();
    assert!(edition.contains(r#"type="edition""#));
    assert!(!edition.contains(r#"type="translation""#));
    let translation =
        std::fs::read_to_string(dir.path().join("test/X001001/test.X001001.cdli-en.xml"))
            .unwrap();
    assert!(translation.contains("To Shamash"));
    assert!(translation.contains("<teiHeader>"));

    let group = TextGroup::new(GROUP_URN, "atf2cts test examples");
    let path = write_textgroup_index(&layout, &group).unwrap();
    assert_eq!(path, dir.path().join("__cts__.xml"));
}

#[test]
fn rendered_edition_converts_back_to_atf() {
    let (doc, _) = assigned();
    let xml = render(&doc).unwrap();
    let atf = tei_to_atf(&xml).unwrap();
    assert_eq!(
        atf,
        "&X001001 = Letter & list\n#atf: lang akk\n@tablet\n@obverse\n1. a-na dutu\n2. qi2-bi2-ma\n"
    );
}

#[test]
fn translation_sharing_the_edition_id_is_rejected() {
    let mut doc = sample_document();
    let mut normalization = TextPart::translation("akk");
    normalization.push(Line::new("1", "ana šamaš"));
    doc.parts.push(normalization);
    let composer = UrnComposer::new(GROUP_URN).unwrap();
    let work_urn = composer.assign(&mut doc).unwrap();
    let work = Work::for_document(GROUP_URN, &work_urn, &doc, DEFAULT_WORK_DESCRIPTION);

    let err = render_work(&doc, &work).unwrap_err();
    assert!(err.to_string().contains("urn:cts:cdli:test.X001001.cdli-akk"));
}

#[test]
fn failed_write_leaves_no_work_files() {
    let dir = tempfile::tempdir().unwrap();
    let layout = CorpusLayout::new(dir.path());
    let (doc, work_urn) = assigned();
    let work = Work::for_document(GROUP_URN, &work_urn, &doc, DEFAULT_WORK_DESCRIPTION);
    let rendered = render_work(&doc, &work).unwrap();

    // A directory where the translation file should go makes its rename fail
    // after the edition is already in place.
    let work_dir = dir.path().join("test/X001001");
    let blocker = work_dir.join("test.X001001.cdli-en.xml");
    std::fs::create_dir_all(&blocker).unwrap();
    std::fs::write(blocker.join("keep"), "").unwrap();

    assert!(write_work(&layout, &rendered).is_err());
    let mut left: Vec<_> = std::fs::read_dir(&work_dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    left.sort();
    assert_eq!(left, vec!["test.X001001.cdli-en.xml".to_string()]);
}
