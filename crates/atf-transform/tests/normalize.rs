//! Tests for transliteration normalization.

use atf_transform::{normalize_translation, normalize_transliteration, normalize_word};
use proptest::prelude::*;

#[test]
fn converts_digraphs() {
    assert_eq!(normalize_transliteration(&["szu"]), "šu");
    assert_eq!(normalize_transliteration(&["s,a"]), "ṣa");
    assert_eq!(normalize_word("t,e4-h,i"), "ṭe4-ḫi");
    assert_eq!(normalize_word("s'a3"), "śa3");
    assert_eq!(normalize_word("jesz"), "ŋeš");
}

#[test]
fn brackets_damaged_signs() {
    assert_eq!(normalize_transliteration(&["du#"]), "⸢du⸣");
    assert_eq!(normalize_word("a-na#-ku"), "a-⸢na⸣-ku");
}

#[test]
fn escapes_markup_characters() {
    assert_eq!(normalize_word("<x>"), "&lt;x&gt;");
    assert_eq!(normalize_word("a&b"), "a&amp;b");
}

#[test]
fn joins_words_with_single_spaces() {
    let words = vec!["a-na".to_string(), "szar-ri".to_string()];
    assert_eq!(normalize_transliteration(&words), "a-na šar-ri");
    let empty: [&str; 0] = [];
    assert_eq!(normalize_transliteration(&empty), "");
}

#[test]
fn determinatives_become_superscript() {
    insta::assert_snapshot!(
        normalize_transliteration(&["a-na", "{d}utu-szi-x#"]),
        @r#"a-na <hi rend="superscript">d</hi>utu-ši-⸢x⸣"#
    );
}

#[test]
fn smallcaps_spans_follow_tokens() {
    insta::assert_snapshot!(
        normalize_transliteration(&["_dumu", "lugal_"]),
        @r#"<hi rend="smallcaps">dumu lugal</hi>"#
    );
}

#[test]
fn unclosed_smallcaps_is_left_unbalanced() {
    insta::assert_snapshot!(
        normalize_transliteration(&["_dumu", "lugal"]),
        @r#"<hi rend="smallcaps">dumu lugal"#
    );
}

#[test]
fn translation_text_is_collapsed_and_escaped() {
    assert_eq!(normalize_translation("  To  the <king>\t"), "To the &lt;king&gt;");
}

proptest! {
    #[test]
    fn never_panics_on_arbitrary_tokens(words in prop::collection::vec(".{0,12}", 0..8)) {
        let out = normalize_transliteration(&words);
        prop_assert!(!out.contains('#') || words.iter().any(|w| w.contains('#')));
    }

    #[test]
    fn plain_tokens_pass_through(words in prop::collection::vec("[a-gk-rvw0-9]{1,6}", 1..6)) {
        prop_assert_eq!(normalize_transliteration(&words), words.join(" "));
    }
}
