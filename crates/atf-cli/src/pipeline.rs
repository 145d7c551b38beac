//! Batch conversion pipeline with explicit stages.
//!
//! Every record goes through these stages in order:
//! 1. **Map**: parse the record and build the TEI document
//! 2. **Identify**: compose the work urn and name each edition/translation
//! 3. **Render**: serialize the whole document
//! 4. **Validate**: re-parse the rendered text and compare it with the source
//! 5. **Write**: render the work index and per-part files, then write them
//!
//! A record that fails in stage 1 or 2 is a parse failure; one that fails
//! later is an export failure. Nothing is written for a failed record.
//! Records are independent and run on a rayon pool; the only shared state is
//! the read-only [`BatchContext`].

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, error, info, info_span};

use atf_ingest::{CdliParser, Dialect, open_source};
use atf_map::StructureMapper;
use atf_model::{DEFAULT_WORK_DESCRIPTION, Document, TextGroup, UrnComposer, Work};
use atf_report::{CorpusLayout, render, render_work, write_textgroup_index, write_work};
use atf_validate::validate_round_trip;

use crate::types::{BatchCounts, BatchResult, RecordOutcome, SourceSummary, TextGroupScope};

/// User-facing options for one run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub output_dir: PathBuf,
    pub group_urn: String,
    pub group_name: String,
    pub textgroup_scope: TextGroupScope,
    /// Worker threads; `None` uses rayon's global pool.
    pub jobs: Option<usize>,
    pub dialect: Dialect,
}

/// Read-only state shared by every record of a run.
#[derive(Debug)]
pub struct BatchContext {
    pub group: TextGroup,
    pub composer: UrnComposer,
    pub layout: CorpusLayout,
    pub textgroup_scope: TextGroupScope,
    pub mapper: StructureMapper<CdliParser>,
}

impl BatchContext {
    pub fn new(options: &BatchOptions) -> Result<Self> {
        let composer = UrnComposer::new(options.group_urn.as_str())
            .with_context(|| format!("invalid group urn {:?}", options.group_urn))?;
        Ok(Self {
            group: TextGroup::new(options.group_urn.as_str(), options.group_name.as_str()),
            composer,
            layout: CorpusLayout::new(options.output_dir.clone()),
            textgroup_scope: options.textgroup_scope,
            mapper: StructureMapper::new(CdliParser).with_dialect(options.dialect),
        })
    }
}

/// Convert every record of every source.
///
/// Unreadable sources are reported in their summary and do not stop the
/// run. Errors returned here are fatal for the whole run (bad options, an
/// unwritable textgroup index).
pub fn run_batch(options: &BatchOptions, sources: &[PathBuf]) -> Result<BatchResult> {
    let start = Instant::now();
    let context = BatchContext::new(options)?;
    let pool = build_pool(options.jobs)?;

    if context.textgroup_scope == TextGroupScope::Batch {
        let path = write_textgroup_index(&context.layout, &context.group)?;
        debug!(path = %path.display(), "wrote textgroup index");
    }

    let mut summaries = Vec::with_capacity(sources.len());
    for path in sources {
        let span = info_span!("source", path = %path.display());
        let summary = span.in_scope(|| convert_source(&context, pool.as_ref(), path));
        summaries.push(summary);
    }

    Ok(BatchResult {
        output_dir: options.output_dir.clone(),
        sources: summaries,
        elapsed: start.elapsed(),
    })
}

fn build_pool(jobs: Option<usize>) -> Result<Option<ThreadPool>> {
    let Some(jobs) = jobs else {
        return Ok(None);
    };
    let pool = ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .context("build worker pool")?;
    Ok(Some(pool))
}

/// Segment one source and convert its records in parallel.
pub fn convert_source(
    context: &BatchContext,
    pool: Option<&ThreadPool>,
    path: &Path,
) -> SourceSummary {
    info!("parsing");
    let records = match read_records(path) {
        Ok(records) => records,
        Err(err) => {
            error!(error = %format!("{err:#}"), "source could not be read");
            return SourceSummary {
                path: path.to_path_buf(),
                counts: BatchCounts::default(),
                error: Some(format!("{err:#}")),
            };
        }
    };
    let started = Instant::now();
    let counts = convert_records(context, pool, records);
    info!(
        records = counts.records,
        success = counts.success,
        parse_failures = counts.parse_failures,
        export_failures = counts.export_failures,
        duration_ms = started.elapsed().as_millis(),
        "source complete"
    );
    SourceSummary {
        path: path.to_path_buf(),
        counts,
        error: None,
    }
}

fn read_records(path: &Path) -> Result<Vec<String>> {
    let segmenter = open_source(path).with_context(|| format!("open {}", path.display()))?;
    segmenter
        .collect::<std::result::Result<Vec<_>, _>>()
        .with_context(|| format!("read {}", path.display()))
}

/// Convert records on the pool (or rayon's global pool) and reduce the
/// outcomes.
pub fn convert_records(
    context: &BatchContext,
    pool: Option<&ThreadPool>,
    records: Vec<String>,
) -> BatchCounts {
    let run = move || {
        records
            .into_par_iter()
            .map(|record| BatchCounts::from(convert_record(context, &record)))
            .reduce(BatchCounts::default, BatchCounts::merge)
    };
    match pool {
        Some(pool) => pool.install(run),
        None => run(),
    }
}

// ============================================================================
// Per-record stages
// ============================================================================

/// Run one record through every stage and classify the result.
pub fn convert_record(context: &BatchContext, record: &str) -> RecordOutcome {
    let document = match map_record(context, record) {
        Ok(document) => document,
        Err(err) => {
            error!(error = %format!("{err:#}"), record = %record, "error converting atf");
            return RecordOutcome::ParseFailure;
        }
    };
    let code = document.header.code.clone().unwrap_or_default();
    match export_document(context, &document) {
        Ok(()) => {
            debug!(code = %code, "record converted");
            RecordOutcome::Success
        }
        Err(failure) => {
            error!(
                code = %code,
                error = %format!("{:#}", failure.error),
                rendered = %failure.rendered.as_deref().unwrap_or("-"),
                "error exporting converted document"
            );
            RecordOutcome::ExportFailure
        }
    }
}

/// Stages 1 and 2.
pub fn map_record(context: &BatchContext, record: &str) -> Result<Document> {
    let mut document = context.mapper.map_record(record)?;
    context.composer.assign(&mut document)?;
    Ok(document)
}

struct ExportError {
    error: anyhow::Error,
    /// Rendered text, when rendering got that far.
    rendered: Option<String>,
}

impl From<anyhow::Error> for ExportError {
    fn from(error: anyhow::Error) -> Self {
        Self {
            error,
            rendered: None,
        }
    }
}

/// Stages 3 to 5.
fn export_document(context: &BatchContext, document: &Document) -> Result<(), ExportError> {
    let rendered = render(document)?;
    if let Err(err) = validate_round_trip(&rendered, document) {
        return Err(ExportError {
            error: anyhow::Error::new(err).context("converted xml failed to re-parse"),
            rendered: Some(rendered),
        });
    }

    let group_urn = context.composer.group_urn();
    let code = document.header.code.as_deref().unwrap_or_default();
    let work_urn = context.composer.work_urn(code).map_err(anyhow::Error::new)?;
    let work = Work::for_document(group_urn, &work_urn, document, DEFAULT_WORK_DESCRIPTION);
    let files = render_work(document, &work)?;

    write_work(&context.layout, &files)?;
    if context.textgroup_scope == TextGroupScope::Record {
        write_textgroup_index(&context.layout, &context.group)?;
    }
    Ok(())
}
