//! Text transforms applied while mapping ATF into TEI.

pub mod normalize;

pub use normalize::{
    DIGRAPHS, SMALLCAPS_CLOSE, SMALLCAPS_OPEN, normalize_translation, normalize_transliteration,
    normalize_word,
};
