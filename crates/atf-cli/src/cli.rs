//! CLI argument definitions for the ATF converters.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{Args, ColorChoice, Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use crate::logging::{LogConfig, LogFormat};
use crate::types::TextGroupScope;

pub const DEFAULT_OUTPUT_DIR: &str = "data/test";
pub const DEFAULT_GROUP_URN: &str = "urn:cts:cdli:test";
pub const DEFAULT_GROUP_NAME: &str = "atf2cts test examples";

#[derive(Parser)]
#[command(
    name = "atf2cts",
    version,
    about = "Convert ATF transliterations into a TEI/CTS corpus",
    long_about = "Convert ATF transliteration files into a CTS corpus.\n\n\
                  Each record becomes a work with one TEI document per edition\n\
                  and translation, plus textgroup and work __cts__.xml indexes."
)]
pub struct Atf2CtsCli {
    /// ATF files to convert. Each may hold any number of records.
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,

    /// Root directory of the generated corpus.
    #[arg(long = "output-dir", value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// CTS urn of the textgroup every work is placed in.
    #[arg(long = "group-urn", value_name = "URN", default_value = DEFAULT_GROUP_URN)]
    pub group_urn: String,

    /// Human-readable textgroup name.
    #[arg(long = "group-name", value_name = "NAME", default_value = DEFAULT_GROUP_NAME)]
    pub group_name: String,

    /// When to write the textgroup index: once per run or with every record.
    #[arg(long = "textgroup-scope", value_enum, default_value = "batch")]
    pub textgroup_scope: TextGroupScopeArg,

    /// Number of worker threads (default: one per core).
    #[arg(short = 'j', long = "jobs", value_name = "N")]
    pub jobs: Option<usize>,

    #[command(flatten)]
    pub logging: LogArgs,
}

#[derive(Parser)]
#[command(
    name = "atf2tei",
    version,
    about = "Print the TEI document for each ATF file (one record per file)"
)]
pub struct Atf2TeiCli {
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub logging: LogArgs,
}

#[derive(Parser)]
#[command(
    name = "tei2atf",
    version,
    about = "Print the ATF transliteration of each TEI file"
)]
pub struct Tei2AtfCli {
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub logging: LogArgs,
}

/// Logging options shared by every binary.
#[derive(Args)]
pub struct LogArgs {
    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stdout.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl LogArgs {
    /// Build logging configuration with consistent precedence: an explicit
    /// `--log-level` beats `-v/-q`, and either disables `RUST_LOG`.
    pub fn log_config(&self) -> LogConfig {
        let mut config = LogConfig {
            level_filter: self.verbosity.tracing_level_filter(),
            ..LogConfig::default()
        };
        config.use_env_filter = !(self.verbosity.is_present() || self.log_level.is_some());
        if let Some(level) = self.log_level {
            config.level_filter = level.into();
        }
        config.format = match self.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        };
        config.log_file = self.log_file.clone();
        config.with_ansi = match self.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.log_file.is_none() && io::stdout().is_terminal(),
        };
        config
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TextGroupScopeArg {
    Batch,
    Record,
}

impl From<TextGroupScopeArg> for TextGroupScope {
    fn from(arg: TextGroupScopeArg) -> Self {
        match arg {
            TextGroupScopeArg::Batch => TextGroupScope::Batch,
            TextGroupScopeArg::Record => TextGroupScope::Record,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
