//! Transliteration normalization.
//!
//! Converts ATF word tokens into the text content of a TEI `l` element. Each
//! token goes through four steps in a fixed order:
//!
//! 1. ASCII digraphs become their Unicode letters (`sz` -> `š`).
//! 2. Damaged signs (`du#`) are wrapped in half brackets (`⸢du⸣`).
//! 3. `&`, `<` and `>` are escaped.
//! 4. Inline markup: `{d}` determinatives become superscript `hi` elements
//!    and `_` prefixes/suffixes open/close a small-caps span.
//!
//! The result is an XML fragment. Small-caps spans are opened and closed per
//! token, so a span that is never closed within the line yields unbalanced
//! markup; callers validate the rendered document to catch that.

use std::sync::LazyLock;

use quick_xml::escape::partial_escape;
use regex::Regex;

/// Ordered digraph substitutions. Order matters: `sz` must be replaced
/// before the single-letter `j`.
pub const DIGRAPHS: [(&str, &str); 12] = [
    ("sz", "š"),
    ("SZ", "Š"),
    ("s,", "ṣ"),
    ("S,", "Ṣ"),
    ("t,", "ṭ"),
    ("T,", "Ṭ"),
    ("s'", "ś"),
    ("S'", "Ś"),
    ("h,", "ḫ"),
    ("H,", "Ḫ"),
    ("j", "ŋ"),
    ("J", "Ŋ"),
];

const DAMAGE_MARK: char = '#';
const DAMAGE_OPEN: char = '⸢';
const DAMAGE_CLOSE: char = '⸣';

pub const SMALLCAPS_OPEN: &str = r#"<hi rend="smallcaps">"#;
pub const SMALLCAPS_CLOSE: &str = "</hi>";
const SUPERSCRIPT_REPLACEMENT: &str = r#"<hi rend="superscript">${1}</hi>"#;

/// `{d}` style determinatives.
static DETERMINATIVE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}]*)\}").expect("Invalid determinative regex"));

/// Normalize a sequence of word tokens into one line of TEI text.
pub fn normalize_transliteration<S: AsRef<str>>(words: &[S]) -> String {
    words
        .iter()
        .map(|word| normalize_word(word.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize a single token.
pub fn normalize_word(word: &str) -> String {
    let word = replace_digraphs(word);
    let word = bracket_damage(&word);
    let word = partial_escape(word.as_str()).into_owned();
    apply_markup(&word)
}

/// Collapse whitespace and escape free translation text.
pub fn normalize_translation(text: &str) -> String {
    let joined = text.split_whitespace().collect::<Vec<_>>().join(" ");
    partial_escape(joined.as_str()).into_owned()
}

fn replace_digraphs(word: &str) -> String {
    let mut out = word.to_string();
    for (ascii, unicode) in DIGRAPHS {
        if out.contains(ascii) {
            out = out.replace(ascii, unicode);
        }
    }
    out
}

fn bracket_damage(word: &str) -> String {
    word.split('-')
        .map(|sign| match sign.strip_suffix(DAMAGE_MARK) {
            Some(core) => format!("{DAMAGE_OPEN}{core}{DAMAGE_CLOSE}"),
            None => sign.to_string(),
        })
        .collect::<Vec<_>>()
        .join("-")
}

fn apply_markup(word: &str) -> String {
    let mut out = DETERMINATIVE_REGEX
        .replace_all(word, SUPERSCRIPT_REPLACEMENT)
        .into_owned();
    if let Some(rest) = out.strip_prefix('_') {
        out = format!("{SMALLCAPS_OPEN}{rest}");
    }
    if let Some(rest) = out.strip_suffix('_') {
        out = format!("{rest}{SMALLCAPS_CLOSE}");
    }
    out
}
