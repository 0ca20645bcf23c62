use clap::error::ErrorKind;
use clap::Parser;
use global_bandwidth::cli::Cli;
use global_bandwidth::error::EXIT_USAGE;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(EXIT_USAGE);
        }
    };

    match global_bandwidth::run(&cli) {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(exit_code = err.exit_code(), "bandwidth test aborted");
            eprintln!("ERROR: {err}");
            for cause in err.causes() {
                eprintln!("ERROR:   caused by: {cause}");
            }
            eprintln!("ERROR: Test failed");
            ExitCode::from(err.exit_code())
        }
    }
}
