mod commands;
mod helpers;

use clap::Parser;
use nessa_core::domain::NessaError;
use std::path::PathBuf;

pub fn run_from_env() -> i32 {
    init_tracing();
    let full_args = std::iter::once("nessa-analyze".to_string())
        .chain(std::env::args().skip(1))
        .collect::<Vec<_>>();

    match parse_and_dispatch(full_args) {
        Ok(code) => code,
        Err(error) => {
            let analysis_error = error.as_nessa_error();
            eprintln!("{}", analysis_error.diagnostic_line());
            if let Some(summary_line) = analysis_error.fatal_exit_line() {
                eprintln!("{}", summary_line);
            }
            analysis_error.exit_code()
        }
    }
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => commands::run_analyze_command(cli),
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Parser)]
#[command(
    name = "nessa-analyze",
    version,
    about = "NESSA Geant4 post-processing: neutron spectra analysis"
)]
pub(crate) struct Cli {
    /// Total number of simulated source events (float-parseable, e.g. 2.5e6)
    #[arg(value_name = "EVENTS")]
    pub(crate) events: Option<String>,

    /// Directory holding the simulation CSV output
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub(crate) work_dir: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Analysis(NessaError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_nessa_error(&self) -> NessaError {
        match self {
            Self::Usage(message) => {
                NessaError::input_validation("INPUT.CLI_USAGE", message.clone())
            }
            Self::Analysis(error) => error.clone(),
            Self::Internal(error) => NessaError::internal("INTERNAL.CLI", format!("{error:#}")),
        }
    }
}
