use crate::cli::OutputFormat;

mod human;
mod json;

pub(crate) trait OutputFormatter: Send + Sync {
    fn progress(&self) -> Option<swarm_core::runner::ProgressFn>;
    fn print_summary(&self, summary: &swarm_core::runner::RunSummary) -> anyhow::Result<()>;
}

pub(crate) fn formatter(format: OutputFormat, show_progress: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::HumanReadable => Box::new(human::HumanReadableOutput::new(show_progress)),
        OutputFormat::Json => Box::new(json::JsonOutput),
    }
}
