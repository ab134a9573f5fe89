use std::sync::Arc;

mod duration;
mod format;
mod progress;
mod summary;

use progress::HumanProgress;
use summary::render;

use super::OutputFormatter;

pub(crate) struct HumanReadableOutput {
    progress: Option<Arc<HumanProgress>>,
}

impl HumanReadableOutput {
    pub(crate) fn new(show_progress: bool) -> Self {
        Self {
            progress: show_progress.then(|| Arc::new(HumanProgress::new())),
        }
    }
}

impl OutputFormatter for HumanReadableOutput {
    fn progress(&self) -> Option<swarm_core::runner::ProgressFn> {
        let progress = self.progress.clone()?;
        Some(Arc::new(move |u| progress.update(u)))
    }

    fn print_summary(&self, summary: &swarm_core::runner::RunSummary) -> anyhow::Result<()> {
        if let Some(progress) = &self.progress {
            progress.finish();
        }
        print!("{}", render(summary));
        Ok(())
    }
}
