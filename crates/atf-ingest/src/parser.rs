//! ATF parsing.
//!
//! [`AtfParser`] is the seam the mapper depends on. [`CdliParser`] is the
//! built-in implementation: a line-oriented reader for the subset of ATF used
//! by CDLI transliterations (objects, surfaces, numbered lines, `$` states and
//! rulings, `#` comments and interlinear `#tr.` translations, and English
//! parallel translations).

use tracing::trace;

use crate::error::{IngestError, Result};
use crate::parse_tree::{AtfLine, AtfNode, AtfObject, AtfTranslation, ParseTree};

/// ATF dialect tag passed to the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// CDLI transliterations; no project declaration needed.
    #[default]
    Cdli,
    /// ORACC project files; `#project:` is required.
    Oracc,
}

/// Turns raw record text into a [`ParseTree`].
pub trait AtfParser: Send + Sync {
    fn parse(&self, text: &str, dialect: Dialect) -> Result<ParseTree>;
}

/// Line-oriented parser for CDLI-style ATF.
#[derive(Debug, Clone, Copy, Default)]
pub struct CdliParser;

impl AtfParser for CdliParser {
    fn parse(&self, text: &str, dialect: Dialect) -> Result<ParseTree> {
        let mut builder = TreeBuilder::default();
        let mut saw_header = false;
        for (index, raw) in text.lines().enumerate() {
            let number = index + 1;
            if raw.trim().is_empty() {
                continue;
            }
            if !saw_header {
                builder.header(raw, number)?;
                saw_header = true;
                continue;
            }
            builder.line(raw, number)?;
        }
        if !saw_header {
            return Err(IngestError::MissingHeader);
        }
        builder.finish(dialect)
    }
}

/// Top-level object directives.
const OBJECT_TYPES: &[&str] = &["tablet", "envelope", "prism", "bulla", "fragment"];

/// Surface directives with no argument.
const SURFACE_TYPES: &[&str] = &["obverse", "reverse", "left", "right", "top", "bottom", "edge"];

/// Surface directives that take an argument.
const NAMED_SURFACE_TYPES: &[&str] = &["face", "surface", "column", "seal"];

const RULINGS: &[&str] = &["single ruling", "double ruling", "triple ruling"];

#[derive(Default)]
struct TreeBuilder {
    tree: ParseTree,
    language: Option<String>,
    in_translation: bool,
}

impl TreeBuilder {
    fn header(&mut self, raw: &str, number: usize) -> Result<()> {
        let Some(body) = raw.strip_prefix('&') else {
            return Err(IngestError::MissingHeader);
        };
        let Some((code, description)) = body.split_once('=') else {
            return Err(IngestError::syntax(number, "header must read '&<code> = <description>'"));
        };
        let code = code.trim();
        if code.is_empty() {
            return Err(IngestError::syntax(number, "header has an empty code"));
        }
        self.tree.code = code.to_string();
        self.tree.description = description.trim().to_string();
        Ok(())
    }

    fn line(&mut self, raw: &str, number: usize) -> Result<()> {
        if raw.starts_with(' ') || raw.starts_with('\t') {
            return self.continuation(raw, number);
        }
        let text = raw.trim_end();
        match text.chars().next() {
            Some('#') => self.comment(&text[1..], number),
            Some('@') => self.directive(&text[1..], number),
            Some('$') => self.state(text, number),
            Some('&') => Err(IngestError::syntax(number, "second record header in one record")),
            _ => self.text_line(text, number),
        }
    }

    fn comment(&mut self, body: &str, number: usize) -> Result<()> {
        let body = body.trim();
        if let Some(protocol) = body.strip_prefix("atf:") {
            let protocol = protocol.trim();
            if let Some(language) = protocol.strip_prefix("lang") {
                let language = language.trim();
                if language.is_empty() {
                    return Err(IngestError::syntax(number, "'#atf: lang' without a language"));
                }
                self.language = Some(language.to_string());
            }
            // `#atf: use ...` toggles parser features we always accept.
            return Ok(());
        }
        if let Some(project) = body.strip_prefix("project:") {
            self.tree.project = Some(project.trim().to_string());
            return Ok(());
        }
        if body.starts_with("link:") {
            return Ok(());
        }
        match self.container() {
            Some(children) => {
                if let Some(AtfNode::Line(line)) = children.last_mut() {
                    line.notes.push(body.to_string());
                } else {
                    children.push(AtfNode::Comment(body.to_string()));
                }
            }
            None => trace!(line = number, "comment before the first object ignored"),
        }
        Ok(())
    }

    fn directive(&mut self, body: &str, number: usize) -> Result<()> {
        let mut tokens = body.split_whitespace();
        let Some(keyword) = tokens.next() else {
            return Err(IngestError::syntax(number, "empty '@' directive"));
        };
        let argument = tokens.collect::<Vec<_>>().join(" ");

        if keyword == "translation" {
            return self.open_translation(&argument, number);
        }
        if OBJECT_TYPES.contains(&keyword) || keyword == "object" {
            if self.in_translation {
                return Err(IngestError::syntax(number, "object directive inside a translation"));
            }
            let mut object = AtfObject::new(keyword);
            if !argument.is_empty() {
                object = object.with_name(argument);
            }
            self.tree.objects.push(object);
            return Ok(());
        }
        if SURFACE_TYPES.contains(&keyword) || NAMED_SURFACE_TYPES.contains(&keyword) {
            let mut surface = AtfObject::new(keyword);
            if !argument.is_empty() {
                surface = surface.with_name(argument);
            } else if NAMED_SURFACE_TYPES.contains(&keyword) {
                return Err(IngestError::syntax(number, format!("'@{keyword}' needs a name")));
            }
            return self.open_surface(surface, number);
        }
        Err(IngestError::syntax(number, format!("unknown directive '@{keyword}'")))
    }

    fn open_translation(&mut self, argument: &str, number: usize) -> Result<()> {
        let tokens: Vec<&str> = argument.split_whitespace().collect();
        match tokens.as_slice() {
            ["parallel", "en", rest @ ..] => {
                let Some(object) = self.tree.objects.last_mut() else {
                    return Err(IngestError::syntax(number, "translation before any object"));
                };
                object.children.push(AtfNode::Translation(AtfTranslation {
                    language: "en".to_string(),
                    project: rest.first().map(|project| (*project).to_string()),
                    children: Vec::new(),
                }));
                self.in_translation = true;
                Ok(())
            }
            _ => Err(IngestError::UnsupportedTranslation {
                line: number,
                argument: argument.to_string(),
            }),
        }
    }

    fn open_surface(&mut self, surface: AtfObject, number: usize) -> Result<()> {
        if self.tree.objects.is_empty() {
            self.tree.objects.push(AtfObject::new("tablet"));
        }
        let Some(object) = self.tree.objects.last_mut() else {
            return Err(IngestError::syntax(number, "surface without an object"));
        };
        if self.in_translation {
            match object.children.last_mut() {
                Some(AtfNode::Translation(translation)) => {
                    translation.children.push(AtfNode::Object(surface));
                }
                _ => return Err(IngestError::syntax(number, "translation block was closed")),
            }
        } else {
            object.children.push(AtfNode::Object(surface));
        }
        Ok(())
    }

    fn state(&mut self, text: &str, number: usize) -> Result<()> {
        let body = text[1..].trim();
        let node = if RULINGS.contains(&body) {
            AtfNode::Ruling(text.to_string())
        } else {
            AtfNode::State(text.to_string())
        };
        let Some(children) = self.container() else {
            return Err(IngestError::syntax(number, "'$' line before any object"));
        };
        children.push(node);
        Ok(())
    }

    fn text_line(&mut self, text: &str, number: usize) -> Result<()> {
        let (label, rest) = match text.split_once(char::is_whitespace) {
            Some((label, rest)) => (label, rest),
            None => (text, ""),
        };
        let Some(label) = label.strip_suffix('.').filter(|label| !label.is_empty()) else {
            return Err(IngestError::syntax(number, format!("unrecognized line {text:?}")));
        };
        let words = rest.split_whitespace().map(str::to_string).collect();
        let line = AtfLine::new(label, words);
        let Some(children) = self.container() else {
            return Err(IngestError::syntax(number, "text line before any object"));
        };
        children.push(AtfNode::Line(line));
        Ok(())
    }

    fn continuation(&mut self, raw: &str, number: usize) -> Result<()> {
        let words = raw.split_whitespace().map(str::to_string);
        match self.container().and_then(|children| children.last_mut()) {
            Some(AtfNode::Line(line)) => {
                line.words.extend(words);
                Ok(())
            }
            _ => Err(IngestError::syntax(number, "continuation without a preceding line")),
        }
    }

    /// Children list that new lines, states and comments belong to: the
    /// current surface if one is open, otherwise the current object (or
    /// translation block).
    fn container(&mut self) -> Option<&mut Vec<AtfNode>> {
        let object = self.tree.objects.last_mut()?;
        let children = if self.in_translation {
            match object.children.last_mut() {
                Some(AtfNode::Translation(translation)) => &mut translation.children,
                _ => return None,
            }
        } else {
            &mut object.children
        };
        if matches!(children.last(), Some(AtfNode::Object(_))) {
            match children.last_mut() {
                Some(AtfNode::Object(surface)) => Some(&mut surface.children),
                _ => None,
            }
        } else {
            Some(children)
        }
    }

    fn finish(self, dialect: Dialect) -> Result<ParseTree> {
        let mut tree = self.tree;
        let Some(language) = self.language else {
            return Err(IngestError::MissingLanguage { code: tree.code });
        };
        if dialect == Dialect::Oracc && tree.project.is_none() {
            return Err(IngestError::MissingProject { code: tree.code });
        }
        tree.language = language;
        Ok(tree)
    }
}
