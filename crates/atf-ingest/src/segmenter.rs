//! Splitting a multi-record ATF stream into single records.
//!
//! A record starts at every line beginning with [`RECORD_MARKER`] and runs
//! until the next one. Text before the first marker belongs to no record and
//! is dropped with a warning.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{IngestError, Result};

/// First character of an ATF record header (`&P123456 = ...`).
pub const RECORD_MARKER: char = '&';

/// Forward-only iterator over the records of a text stream.
///
/// Each item is the full text of one record, newlines included, in input
/// order. Read errors are yielded once and end the iteration.
pub struct Segmenter<R> {
    reader: R,
    pending: Option<String>,
    line_number: usize,
    discarded: usize,
    finished: bool,
}

impl<R: BufRead> Segmenter<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: None,
            line_number: 0,
            discarded: 0,
            finished: false,
        }
    }

    /// Number of non-blank lines dropped because they preceded the first
    /// record header.
    pub fn discarded_lines(&self) -> usize {
        self.discarded
    }

    fn finish(&mut self) -> Option<Result<String>> {
        self.finished = true;
        if self.discarded > 0 {
            debug!(
                discarded = self.discarded,
                "stream ended; lines before the first record were skipped"
            );
        }
        self.pending.take().map(Ok)
    }
}

impl<R: BufRead> Iterator for Segmenter<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        loop {
            let mut line = String::new();
            match self.reader.read_line(&mut line) {
                Ok(0) => return self.finish(),
                Ok(_) => self.line_number += 1,
                Err(error) => {
                    self.finished = true;
                    return Some(Err(IngestError::Io(error)));
                }
            }

            if line.starts_with(RECORD_MARKER) {
                debug!(line = self.line_number, header = line.trim_end(), "new atf record");
                if let Some(record) = self.pending.replace(line) {
                    return Some(Ok(record));
                }
            } else if let Some(record) = self.pending.as_mut() {
                record.push_str(&line);
            } else if !line.trim().is_empty() {
                self.discarded += 1;
                warn!(
                    line = self.line_number,
                    text = line.trim_end(),
                    "skipping text before the first record header"
                );
            }
        }
    }
}

/// Open a file for segmentation.
pub fn open_source(path: &Path) -> Result<Segmenter<BufReader<File>>> {
    let file = File::open(path)?;
    Ok(Segmenter::new(BufReader::new(file)))
}

/// Segment an in-memory string.
pub fn segment_str(text: &str) -> Vec<String> {
    Segmenter::new(text.as_bytes())
        .filter_map(std::result::Result::ok)
        .collect()
}
