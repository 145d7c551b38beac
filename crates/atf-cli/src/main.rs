//! ATF to TEI/CTS corpus converter.

use clap::Parser;

use atf_cli::cli::Atf2CtsCli;
use atf_cli::commands::run_atf2cts;
use atf_cli::logging::init_logging;
use atf_cli::summary::print_summary;

fn main() {
    let cli = Atf2CtsCli::parse();
    cli.logging.color.write_global();
    if let Err(error) = init_logging(&cli.logging.log_config()) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run_atf2cts(&cli) {
        Ok(result) => {
            print_summary(&result);
            if result.has_failures() { 1 } else { 0 }
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}
