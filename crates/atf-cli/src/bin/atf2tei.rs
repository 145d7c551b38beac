//! Print the TEI rendering of single-record ATF files.

use clap::Parser;

use atf_cli::cli::Atf2TeiCli;
use atf_cli::commands::run_atf2tei;
use atf_cli::logging::init_logging;

fn main() {
    let cli = Atf2TeiCli::parse();
    cli.logging.color.write_global();
    if let Err(error) = init_logging(&cli.logging.log_config()) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let failures = run_atf2tei(&cli.files);
    std::process::exit(if failures > 0 { 1 } else { 0 });
}
