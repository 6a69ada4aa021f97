mod args;
mod commands;
mod config;
mod error;
mod logging;

use clap::Parser;
use std::process::ExitCode;

use args::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = config::resolve_config(cli.config.as_deref());

    match commands::run(&cli.command, &config) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::debug!("[markban.cli] command failed: {:?}", e);
            eprintln!("markban: {}", e);
            ExitCode::FAILURE
        }
    }
}
