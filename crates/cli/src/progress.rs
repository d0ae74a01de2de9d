//! Terminal progress for bulk exports.

use hausa_scribble_export::{BatchReport, ItemOutcome};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static EXPORT_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Wallpapers: [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// One bar over the whole selection; hidden in JSON mode.
pub struct ExportProgress {
    bar: ProgressBar,
}

impl ExportProgress {
    pub fn new(total: usize, hidden: bool) -> Self {
        let bar = if hidden {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(total as u64)
        };
        bar.set_style(EXPORT_STYLE.clone());
        Self { bar }
    }

    pub fn item_done(&self, outcome: &ItemOutcome) {
        self.bar.inc(1);
        if outcome.is_ok() {
            self.bar.set_message(outcome.file_name.clone());
        } else {
            self.bar.println(format!(
                "✗ #{} {}",
                outcome.id,
                outcome.error.as_deref().unwrap_or_default()
            ));
        }
    }

    pub fn finish(&self, report: &BatchReport) {
        let message = if report.cancelled {
            "cancelled".to_string()
        } else {
            format!("{} ok, {} failed", report.succeeded(), report.failed())
        };
        self.bar.finish_with_message(message);
    }

    #[cfg(test)]
    fn position(&self) -> u64 {
        self.bar.position()
    }
}
