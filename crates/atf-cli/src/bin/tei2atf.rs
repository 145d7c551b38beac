//! Print the ATF transliteration of TEI files.

use clap::Parser;

use atf_cli::cli::Tei2AtfCli;
use atf_cli::commands::run_tei2atf;
use atf_cli::logging::init_logging;

fn main() {
    let cli = Tei2AtfCli::parse();
    cli.logging.color.write_global();
    if let Err(error) = init_logging(&cli.logging.log_config()) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let failures = run_tei2atf(&cli.files);
    std::process::exit(if failures > 0 { 1 } else { 0 });
}
