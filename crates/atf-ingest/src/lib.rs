pub mod error;
pub mod parse_tree;
pub mod parser;
pub mod segmenter;

pub use error::IngestError;
pub use parse_tree::{AtfLine, AtfNode, AtfObject, AtfTranslation, ParseTree};
pub use parser::{AtfParser, CdliParser, Dialect};
pub use segmenter::{RECORD_MARKER, Segmenter, open_source, segment_str};
