//! Interlinear translations carried as `#tr.<lang>:` line notes.

use atf_ingest::AtfLine;
use atf_model::{Document, Line, Node, TextPart};
use atf_transform::normalize_translation;

/// Language code ATF uses for normalizations; remapped to the record's
/// own language.
pub const NORMALIZATION_CODE: &str = "ts";

const TRANSLATION_PREFIX: &str = "tr.";

/// Split a note of the form `tr.<lang>: <text>` into language and text.
pub fn parse_inline_translation(note: &str) -> Option<(&str, &str)> {
    let (language, text) = note.trim().strip_prefix(TRANSLATION_PREFIX)?.split_once(':')?;
    let language = language.trim();
    if language.is_empty() {
        return None;
    }
    Some((language, text.trim()))
}

/// Per-language buffers of translated lines, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct InlineTranslations {
    primary_language: String,
    buffers: Vec<(String, Vec<Line>)>,
}

impl InlineTranslations {
    pub fn new(primary_language: impl Into<String>) -> Self {
        Self {
            primary_language: primary_language.into(),
            buffers: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.buffers.iter().map(|(language, _)| language.as_str())
    }

    /// Record every translation note attached to `line`.
    pub fn collect(&mut self, line: &AtfLine) {
        for note in &line.notes {
            let Some((language, text)) = parse_inline_translation(note) else {
                continue;
            };
            let language = if language == NORMALIZATION_CODE {
                self.primary_language.clone()
            } else {
                language.to_string()
            };
            let translated = Line::new(line.label.clone(), normalize_translation(text));
            self.buffer(language).push(translated);
        }
    }

    fn buffer(&mut self, language: String) -> &mut Vec<Line> {
        let index = match self.buffers.iter().position(|(lang, _)| *lang == language) {
            Some(index) => index,
            None => {
                self.buffers.push((language, Vec::new()));
                self.buffers.len() - 1
            }
        };
        &mut self.buffers[index].1
    }

    /// Add one flat translation part per language to `document`.
    ///
    /// Lines for a language that already has a translation part are appended
    /// to that part so no language appears twice.
    pub fn append_to(self, document: &mut Document) {
        for (language, lines) in self.buffers {
            if let Some(existing) = document.translation_mut(&language) {
                existing.children.extend(lines.into_iter().map(Node::Line));
                continue;
            }
            let mut part = TextPart::translation(language);
            for line in lines {
                part.push(line);
            }
            document.parts.push(part);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_prefix_and_trims() {
        assert_eq!(
            parse_inline_translation("tr.en:  to the king "),
            Some(("en", "to the king"))
        );
        assert_eq!(parse_inline_translation("note: x"), None);
        assert_eq!(parse_inline_translation("tr.: x"), None);
        assert_eq!(parse_inline_translation("tr.en missing colon"), None);
    }

    #[test]
    fn normalization_is_keyed_by_primary_language() {
        let mut buffers = InlineTranslations::new("akk");
        let mut line = AtfLine::new("1", vec!["a-na".to_string()]);
        line.notes.push("tr.ts: ana".to_string());
        line.notes.push("tr.en: to".to_string());
        buffers.collect(&line);
        assert_eq!(buffers.languages().collect::<Vec<_>>(), vec!["akk", "en"]);
    }
}
