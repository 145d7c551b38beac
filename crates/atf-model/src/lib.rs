pub mod cts;
pub mod document;
pub mod error;
pub mod refs_decl;
pub mod urn;

pub use cts::{DEFAULT_WORK_DESCRIPTION, TextGroup, Work, WorkPart, WorkPartKind};
pub use document::{
    DEFAULT_PUBLICATION, DivisionType, Document, Header, Line, Node, Note, TextPart,
};
pub use error::{ModelError, Result};
pub use refs_decl::{CitationPattern, RefsDecl};
pub use urn::{
    UrnComposer, edition_id, group_segment, part_file_name, translation_id, urn_tail,
};
