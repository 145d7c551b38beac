use std::ops::Add;
use std::path::PathBuf;
use std::time::Duration;

/// When the textgroup index is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextGroupScope {
    /// Once, before any record is converted.
    #[default]
    Batch,
    /// Again after every successfully written record.
    Record,
}

/// Classification of one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    Success,
    /// The parser rejected the record or its tree could not be mapped.
    ParseFailure,
    /// The mapped document did not render, re-parse or write.
    ExportFailure,
}

/// Outcome counters. Merging is associative and commutative, so per-record
/// counts can be reduced in any order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchCounts {
    pub records: usize,
    pub success: usize,
    pub parse_failures: usize,
    pub export_failures: usize,
}

impl BatchCounts {
    pub fn merge(self, other: Self) -> Self {
        Self {
            records: self.records + other.records,
            success: self.success + other.success,
            parse_failures: self.parse_failures + other.parse_failures,
            export_failures: self.export_failures + other.export_failures,
        }
    }

    pub fn failures(&self) -> usize {
        self.parse_failures + self.export_failures
    }
}

impl From<RecordOutcome> for BatchCounts {
    fn from(outcome: RecordOutcome) -> Self {
        let mut counts = Self {
            records: 1,
            ..Self::default()
        };
        match outcome {
            RecordOutcome::Success => counts.success = 1,
            RecordOutcome::ParseFailure => counts.parse_failures = 1,
            RecordOutcome::ExportFailure => counts.export_failures = 1,
        }
        counts
    }
}

impl Add for BatchCounts {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.merge(other)
    }
}

#[derive(Debug)]
pub struct SourceSummary {
    pub path: PathBuf,
    pub counts: BatchCounts,
    /// Set when the source could not be read; its records were not counted.
    pub error: Option<String>,
}

#[derive(Debug)]
pub struct BatchResult {
    pub output_dir: PathBuf,
    pub sources: Vec<SourceSummary>,
    pub elapsed: Duration,
}

impl BatchResult {
    pub fn totals(&self) -> BatchCounts {
        self.sources
            .iter()
            .map(|source| source.counts)
            .fold(BatchCounts::default(), BatchCounts::merge)
    }

    pub fn source_errors(&self) -> usize {
        self.sources
            .iter()
            .filter(|source| source.error.is_some())
            .count()
    }

    pub fn has_failures(&self) -> bool {
        self.totals().failures() > 0 || self.source_errors() > 0
    }
}
