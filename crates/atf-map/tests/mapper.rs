//! Integration tests for record mapping.

use atf_ingest::{AtfLine, AtfNode, AtfObject, CdliParser, ParseTree};
use atf_map::{MapError, PARALLEL_TRANSLATION_LANGUAGE, StructureMapper, map_tree};
use atf_model::{DivisionType, Node, TextPart};

const SAMPLE: &str = "\
&X001001 = Old Babylonian letter
#atf: lang akk
@tablet
@obverse
1. a-na {d}utu-szi-x#
#tr.en: To Shamash-shi
2. qi2-bi2-ma
#tr.en: speak!
#tr.ts: qibima
$ single ruling
@reverse
1. um-ma s,i-li2
$ rest broken
@translation parallel en project
@obverse
1. To   Shamash-shi
2. speak!
";

fn mapper() -> StructureMapper {
    StructureMapper::new(CdliParser)
}

fn tree(objects: Vec<AtfObject>) -> ParseTree {
    ParseTree {
        code: "X000001".to_string(),
        description: "test".to_string(),
        language: "sux".to_string(),
        project: None,
        objects,
    }
}

fn part_names(part: &TextPart) -> Vec<String> {
    part.children
        .iter()
        .filter_map(|child| match child {
            Node::Part(nested) => nested.name.clone(),
            _ => None,
        })
        .collect()
}

#[test]
fn maps_header_and_edition_structure() {
    let doc = mapper().map_record(SAMPLE).unwrap();
    assert_eq!(doc.header.code.as_deref(), Some("X001001"));
    assert_eq!(doc.header.title.as_deref(), Some("Old Babylonian letter"));
    assert_eq!(doc.language, "akk");

    let edition = doc.edition().unwrap();
    assert_eq!(edition.language.as_deref(), Some("akk"));
    assert_eq!(part_names(edition), vec!["tablet"]);
    let Node::Part(tablet) = &edition.children[0] else {
        panic!("expected tablet division");
    };
    assert_eq!(part_names(tablet), vec!["obverse", "reverse"]);
    assert_eq!(edition.line_count(), 3);

    let lines = edition.lines();
    assert_eq!(lines[0].reference, "1");
    assert_eq!(
        lines[0].content,
        r#"a-na <hi rend="superscript">d</hi>utu-ši-⸢x⸣"#
    );
    assert_eq!(lines[2].content, "um-ma ṣi-li2");
}

#[test]
fn states_and_rulings_become_notes() {
    let doc = mapper().map_record(SAMPLE).unwrap();
    let edition = doc.edition().unwrap();
    let Node::Part(tablet) = &edition.children[0] else {
        panic!("expected tablet division");
    };
    let notes: Vec<&str> = tablet
        .children
        .iter()
        .filter_map(|child| match child {
            Node::Part(surface) => Some(surface),
            _ => None,
        })
        .flat_map(|surface| surface.children.iter())
        .filter_map(|child| match child {
            Node::Note(note) => Some(note.text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(notes, vec!["single ruling", "rest broken"]);
}

#[test]
fn collects_all_translation_sources() {
    let doc = mapper().map_record(SAMPLE).unwrap();
    let languages: Vec<&str> = doc
        .translations()
        .filter_map(|part| part.language.as_deref())
        .collect();
    assert_eq!(languages, vec![PARALLEL_TRANSLATION_LANGUAGE, "en", "akk"]);

    let parallel = doc.translations().next().unwrap();
    assert_eq!(part_names(parallel), vec!["tablet"]);
    let lines = parallel.lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].content, "To Shamash-shi");

    let inline = doc.translations().nth(1).unwrap();
    assert!(inline.children.iter().all(|child| matches!(child, Node::Line(_))));
    assert_eq!(inline.line_count(), 2);

    let normalization = doc.translations().nth(2).unwrap();
    assert_eq!(normalization.lines()[0].content, "qibima");
}

#[test]
fn parallel_language_is_merged_with_inline_notes() {
    let text = "\
&X000002 = merged
#atf: lang akk
@tablet
@obverse
1. a-na
#tr.eng: to
@translation parallel en project
@obverse
1. to
";
    let doc = mapper().map_record(text).unwrap();
    let translations: Vec<&TextPart> = doc.translations().collect();
    assert_eq!(translations.len(), 1);
    assert_eq!(translations[0].line_count(), 2);
}

#[test]
fn empty_parallel_translation_is_dropped() {
    let text = "\
&X000003 = empty
#atf: lang akk
@tablet
@obverse
1. a-na
@translation parallel en project
";
    let doc = mapper().map_record(text).unwrap();
    assert_eq!(doc.translations().count(), 0);
    assert_eq!(doc.parts.len(), 1);
}

#[test]
fn record_without_lines_maps_to_empty_edition() {
    let doc = map_tree(&tree(vec![AtfObject::new("tablet")])).unwrap();
    assert_eq!(doc.parts.len(), 1);
    let edition = doc.edition().unwrap();
    assert_eq!(edition.division, DivisionType::Edition);
    assert_eq!(edition.line_count(), 0);
}

#[test]
fn unrecognized_nodes_are_skipped() {
    let mut tablet = AtfObject::new("tablet");
    tablet
        .children
        .push(AtfNode::Line(AtfLine::new("1", vec!["stray".to_string()])));
    let mut obverse = AtfObject::new("obverse");
    obverse.children.push(AtfNode::Comment("aside".to_string()));
    obverse
        .children
        .push(AtfNode::Line(AtfLine::new("1", vec!["lugal".to_string()])));
    tablet.children.push(AtfNode::Object(obverse));

    let doc = map_tree(&tree(vec![tablet])).unwrap();
    let edition = doc.edition().unwrap();
    assert_eq!(edition.line_count(), 1);
    assert_eq!(edition.lines()[0].content, "lugal");
}

#[test]
fn empty_code_is_rejected() {
    let mut parsed = tree(Vec::new());
    parsed.code = String::new();
    assert!(matches!(map_tree(&parsed), Err(MapError::MissingCode)));
}

#[test]
fn parse_errors_are_wrapped() {
    let error = mapper().map_record("no header here\n").unwrap_err();
    assert!(matches!(error, MapError::Parse(_)));
}
