use clap::Parser;
use listkeeper_cli::cli::Cli;
use listkeeper_cli::commands::run;
use listkeeper_cli::exit_codes::{EXIT_ERROR, EXIT_SUCCESS};
use listkeeper_cli::logging::configure_logging;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    configure_logging(cli.verbose, cli.debug, cli.quiet);

    let exit_code = match run(cli.command).await {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            EXIT_ERROR
        }
    };
    process::exit(exit_code);
}
