//! Record → [`Document`] mapping.
//!
//! The edition mirrors the parse tree: every top-level object becomes a
//! division named after its type, every surface below it a nested division,
//! lines become `l` elements with normalized text and states/rulings become
//! notes. Translations come from two places and are appended after the
//! edition: the parallel translation block (if it holds any lines) and the
//! interlinear `#tr.<lang>:` notes, one flat part per language.

use atf_ingest::{AtfNode, AtfObject, AtfParser, CdliParser, Dialect, ParseTree};
use atf_model::{Document, Line, Note, TextPart};
use atf_transform::{normalize_translation, normalize_transliteration};
use tracing::{debug, warn};

use crate::error::MapError;
use crate::translations::InlineTranslations;

/// Language of parallel translation blocks; the grammar only produces
/// English ones.
pub const PARALLEL_TRANSLATION_LANGUAGE: &str = "eng";

/// Parses records and maps them onto documents.
#[derive(Debug, Clone, Default)]
pub struct StructureMapper<P = CdliParser> {
    parser: P,
    dialect: Dialect,
}

impl<P: AtfParser> StructureMapper<P> {
    pub fn new(parser: P) -> Self {
        Self {
            parser,
            dialect: Dialect::default(),
        }
    }

    #[must_use]
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Parse one record and map it.
    pub fn map_record(&self, record: &str) -> Result<Document, MapError> {
        let tree = self.parser.parse(record, self.dialect)?;
        map_tree(&tree)
    }
}

/// Map an already parsed record.
pub fn map_tree(tree: &ParseTree) -> Result<Document, MapError> {
    if tree.code.trim().is_empty() {
        return Err(MapError::MissingCode);
    }
    let mut document = Document::new(tree.language.clone());
    document.header.title = Some(tree.description.clone());
    document.header.code = Some(tree.code.clone());

    let mut inline = InlineTranslations::new(tree.language.clone());
    let mut edition = TextPart::edition(tree.language.clone());
    for object in &tree.objects {
        let mut part = TextPart::named(object.kind.clone());
        for section in &object.children {
            match section {
                AtfNode::Object(surface) => {
                    part.push(map_section(surface, &mut inline, &tree.code));
                }
                // Handled by the parallel translation pass.
                AtfNode::Translation(_) => {}
                other => skip(other, &tree.code, &object.kind),
            }
        }
        edition.push(part);
    }
    let edition_lines = edition.line_count();
    document.parts.push(edition);

    if let Some(translation) = map_parallel_translation(tree) {
        document.parts.push(translation);
    }
    inline.append_to(&mut document);

    debug!(
        code = %tree.code,
        lines = edition_lines,
        translations = document.parts.len() - 1,
        "mapped record"
    );
    Ok(document)
}

fn map_section(surface: &AtfObject, inline: &mut InlineTranslations, code: &str) -> TextPart {
    let mut division = TextPart::named(surface.label());
    for child in &surface.children {
        match child {
            AtfNode::Line(line) => {
                let content = normalize_transliteration(&line.words);
                division.push(Line::new(line.label.clone(), content));
                inline.collect(line);
            }
            AtfNode::State(text) | AtfNode::Ruling(text) => {
                division.push(Note::new(strip_marker(text)));
            }
            AtfNode::Object(nested) => division.push(map_section(nested, inline, code)),
            other => skip(other, code, surface.label()),
        }
    }
    division
}

fn map_parallel_translation(tree: &ParseTree) -> Option<TextPart> {
    let mut translation = TextPart::translation(PARALLEL_TRANSLATION_LANGUAGE);
    for object in &tree.objects {
        let mut part = TextPart::named(object.kind.clone());
        for section in &object.children {
            let AtfNode::Translation(block) = section else {
                continue;
            };
            for child in &block.children {
                match child {
                    AtfNode::Object(surface) => {
                        part.push(map_translated_surface(surface, &tree.code));
                    }
                    other => skip(other, &tree.code, "translation"),
                }
            }
        }
        translation.push(part);
    }
    (translation.line_count() > 0).then_some(translation)
}

fn map_translated_surface(surface: &AtfObject, code: &str) -> TextPart {
    let mut division = TextPart::named(surface.label());
    for child in &surface.children {
        match child {
            AtfNode::Line(line) => {
                let text = normalize_translation(&line.words.join(" "));
                division.push(Line::new(line.label.clone(), text));
            }
            AtfNode::Object(nested) => division.push(map_translated_surface(nested, code)),
            other => skip(other, code, surface.label()),
        }
    }
    division
}

/// Drop the leading `$` (or other marker) and surrounding whitespace.
fn strip_marker(text: &str) -> String {
    let mut chars = text.trim().chars();
    chars.next();
    chars.as_str().trim().to_string()
}

fn skip(node: &AtfNode, code: &str, parent: &str) {
    warn!(
        code = %code,
        parent = %parent,
        kind = node.kind_name(),
        "skipping unrecognized node"
    );
}
