//! XML output for converted ATF records.
//!
//! This crate renders the document model into files:
//!
//! - **TEI**: one Epidoc document per edition or translation
//! - **CTS indexes**: `__cts__.xml` for the textgroup and for each work
//! - **ATF**: reverse conversion of a TEI document back to transliteration

mod common;
mod cts;
mod tei;
mod tei2atf;
mod writer;
mod xml;

pub use common::{CTS_NS, TEI_NS};
pub use tei2atf::tei_to_atf;
pub use writer::{CorpusLayout, RenderedWork, render_work, write_file, write_textgroup_index, write_work};
pub use xml::{ToXml, render};
