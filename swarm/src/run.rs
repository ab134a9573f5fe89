use swarm_core::CancellationToken;
use swarm_core::runner::RunConfig;

use crate::cli::Cli;
use crate::exit_codes::ExitCode;
use crate::output;
use crate::run_error::RunError;
use crate::signal;

pub async fn run(args: Cli) -> Result<ExitCode, RunError> {
    let out = output::formatter(args.output, !args.no_progress);
    let cfg = run_config(&args);

    let cancel = CancellationToken::new();
    let listener = signal::spawn_shutdown_listener(cancel.clone());

    let result = swarm_core::runner::run(&cancel, &cfg, out.progress()).await;
    listener.abort();
    let summary = result?;

    out.print_summary(&summary).map_err(RunError::RuntimeError)?;

    Ok(ExitCode::from_summary(&summary))
}

fn run_config(args: &Cli) -> RunConfig {
    RunConfig {
        timeout: args.timeout,
        connect_timeout: Some(args.connect_timeout),
        ..RunConfig::new(args.url.clone(), args.requests, args.concurrency)
    }
}
