use clap::Parser;
use clap::error::ErrorKind;
use miette::Diagnostic;
use miette::Result;
use thiserror::Error;

use skirmish::cli::Cli;
use skirmish::config::ConfigError;
use skirmish::config::RunConfig;
use skirmish::outputter::OutPutter;
use skirmish::runner::RunnerError;
use skirmish::runner::StepReport;
use skirmish::runner::run_scenario;
use skirmish::scenario::battle_scenario;

#[derive(Error, Debug, Diagnostic)]
pub enum SmokeError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    ConfigError(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    RunnerError(#[from] RunnerError),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Clap exits with status 2 on a bad argument; the contract here is that
    // every failure, usage errors included, exits 1. So parsing errors are
    // printed and mapped by hand, before any HTTP call is made. --help and
    // --version surface as errors from try_parse but are not failures.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => std::process::exit(0),
                _ => std::process::exit(1),
            }
        }
    };

    let config = RunConfig::from_cli(&cli).map_err(SmokeError::ConfigError)?;

    let steps = battle_scenario();
    let n_steps = steps.len();

    let (tx, rx) = flume::unbounded::<StepReport>();

    // Outputter task: prints progress while the runner works through the
    // scenario. The runner itself stays strictly sequential.
    let base_url = config.base_url.clone();
    let verbose = config.verbose;
    let outputter_handle = tokio::spawn(async move {
        OutPutter::start(rx, &base_url, n_steps, verbose).await;
    });

    let result = run_scenario(&config, steps, tx).await;

    // run_scenario dropped its sender, so the outputter drains what is left
    // and prints the closing banner before the exit code is decided.
    let _ = outputter_handle.await;

    result.map_err(SmokeError::RunnerError)?;

    Ok(())
}
