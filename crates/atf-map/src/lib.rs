pub mod error;
pub mod mapper;
pub mod translations;

pub use error::MapError;
pub use mapper::{PARALLEL_TRANSLATION_LANGUAGE, StructureMapper, map_tree};
pub use translations::{InlineTranslations, NORMALIZATION_CODE, parse_inline_translation};
