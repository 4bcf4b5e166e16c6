use clap::Parser;
use clean_folder::cli::{Cli, run_cli};
use clean_folder::logging::init_logger;
use std::process::ExitCode;

fn main() -> ExitCode {
    init_logger();

    let code = run_cli(Cli::parse());
    ExitCode::from(code as u8)
}
