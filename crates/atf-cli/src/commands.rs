use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{error, info_span};

use atf_ingest::{CdliParser, Dialect};
use atf_map::StructureMapper;
use atf_report::{render, tei_to_atf};

use crate::cli::Atf2CtsCli;
use crate::pipeline::{BatchOptions, run_batch};
use crate::types::BatchResult;

impl From<&Atf2CtsCli> for BatchOptions {
    fn from(cli: &Atf2CtsCli) -> Self {
        Self {
            output_dir: cli.output_dir.clone(),
            group_urn: cli.group_urn.clone(),
            group_name: cli.group_name.clone(),
            textgroup_scope: cli.textgroup_scope.into(),
            jobs: cli.jobs,
            dialect: Dialect::Cdli,
        }
    }
}

pub fn run_atf2cts(cli: &Atf2CtsCli) -> Result<BatchResult> {
    let options = BatchOptions::from(cli);
    let span = info_span!("batch", output_dir = %options.output_dir.display());
    let _guard = span.enter();
    run_batch(&options, &cli.files)
}

/// Print the TEI document of every file, each read as a single record.
///
/// Returns the number of files that failed.
pub fn run_atf2tei(files: &[PathBuf]) -> usize {
    let mapper = StructureMapper::new(CdliParser);
    let mut failures = 0;
    for path in files {
        let result = fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display()))
            .and_then(|text| mapper.map_record(&text).map_err(anyhow::Error::from))
            .and_then(|document| render(&document));
        match result {
            Ok(xml) => print!("{xml}"),
            Err(err) => {
                error!(path = %path.display(), error = %format!("{err:#}"), "error converting atf");
                failures += 1;
            }
        }
    }
    failures
}

/// Print the ATF of every TEI file. Returns the number of files that failed.
pub fn run_tei2atf(files: &[PathBuf]) -> usize {
    let mut failures = 0;
    for path in files {
        let result = fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display()))
            .and_then(|xml| tei_to_atf(&xml));
        match result {
            Ok(atf) => print!("{atf}"),
            Err(err) => {
                error!(path = %path.display(), error = %format!("{err:#}"), "error converting tei");
                failures += 1;
            }
        }
    }
    failures
}
