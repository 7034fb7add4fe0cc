//! `mercator` CLI entrypoint.

use clap::Parser;
use mercator_cli::{Cli, exit_code_for_run_result, run};

fn main() {
    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();
    let mut stderr = std::io::stderr();
    let exit_code = exit_code_for_run_result(run(&cli, &mut stdout), &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}
