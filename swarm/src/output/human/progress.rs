use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use swarm_core::runner::ProgressUpdate;

/// One bar on stderr tracking completed attempts against the requested total.
pub(crate) struct HumanProgress {
    pb: ProgressBar,
}

impl HumanProgress {
    pub(crate) fn new() -> Self {
        let pb = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr_with_hz(5));
        pb.set_style(bar_style());
        Self { pb }
    }

    pub(crate) fn update(&self, u: ProgressUpdate) {
        if self.pb.length() != Some(u.total) {
            self.pb.set_length(u.total);
        }
        self.pb.set_position(u.completed.min(u.total));
        self.pb.set_message(format!("ok={} failed={}", u.succeeded, u.failed));
    }

    pub(crate) fn finish(&self) {
        self.pb.finish_and_clear();
    }
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("[ {bar:30.cyan/blue} ] {pos}/{len} {percent:>3}% {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█░")
}
