//! CTS citation patterns for converted cuneiform texts.
//!
//! Every edition nests divisions the same way (object, then surface, then
//! line), so the declaration is static configuration rather than something
//! derived from a particular document.

use serde::{Deserialize, Serialize};

const XPATH_PREFIX: &str = "#xpath(/tei:TEI/tei:text/tei:body/tei:div";

/// One `cRefPattern` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationPattern {
    pub name: String,
    /// Number of dotted segments the pattern matches.
    pub segments: usize,
    pub description: String,
    /// XPath template with `$1..$n` placeholders.
    pub replacement: String,
}

impl CitationPattern {
    fn new(name: &str, segments: usize, description: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            segments,
            description: description.to_string(),
            replacement: format!("{XPATH_PREFIX}{path})"),
        }
    }

    /// Dotted capture pattern, e.g. `(\w+)\.(\w+)` for two segments.
    pub fn match_pattern(&self) -> String {
        vec![r"(\w+)"; self.segments].join(r"\.")
    }
}

/// The `refsDecl n="CTS"` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefsDecl {
    /// Most specific pattern first.
    pub patterns: Vec<CitationPattern>,
}

impl RefsDecl {
    /// Patterns for the object / surface / line nesting.
    pub fn cts() -> Self {
        Self {
            patterns: vec![
                CitationPattern::new(
                    "line",
                    3,
                    "This pattern references a specific line.",
                    "/tei:div[@n='$1']/tei:div[@n='$2']/tei:l[@n='$3']",
                ),
                CitationPattern::new(
                    "surface",
                    2,
                    "This pattern references an inscribed surface.",
                    "/tei:div[@n='$1']/tei:div[@n='$2']",
                ),
                CitationPattern::new(
                    "object",
                    1,
                    "This pattern references a specific artefact, usually a tablet.",
                    "/tei:div[@n='$1']",
                ),
            ],
        }
    }

    pub fn pattern(&self, name: &str) -> Option<&CitationPattern> {
        self.patterns.iter().find(|pattern| pattern.name == name)
    }
}

impl Default for RefsDecl {
    fn default() -> Self {
        Self::cts()
    }
}
