use std::process::ExitCode;

use clap::Parser;

use outletkpi_cli::{Cli, Config, run};

fn main() -> ExitCode {
    let cli = Cli::parse();
    outletkpi_observability::init(cli.log_format.into());

    let config = match Config::try_from(cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let stdout = std::io::stdout();
    match run(&config, &mut stdout.lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
