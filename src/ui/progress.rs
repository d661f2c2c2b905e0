//! Progress indicators with CI fallback

use super::context::UiContext;
use crate::download::DownloadProgress;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// A task spinner with CI fallback
pub struct TaskSpinner {
    spinner: Option<cliclack::ProgressBar>,
    interactive: bool,
}

impl TaskSpinner {
    /// Create a new spinner (shows immediately in interactive mode)
    pub fn new(ctx: &UiContext) -> Self {
        Self {
            spinner: None,
            interactive: ctx.use_fancy_output(),
        }
    }

    /// Start the spinner with a message
    pub fn start(&mut self, message: &str) {
        if self.interactive {
            let spinner = cliclack::spinner();
            spinner.start(message);
            self.spinner = Some(spinner);
        } else {
            println!("{} {}", style("...").dim(), message);
        }
    }

    /// Stop with success message
    pub fn stop(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.stop(message);
        } else if self.interactive {
            println!("{} {}", style("✓").green(), message);
        } else {
            println!("{} {}", style("[OK]").green(), message);
        }
    }

    /// Stop with error message
    pub fn stop_error(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.error(message);
        } else if self.interactive {
            println!("{} {}", style("✗").red(), message);
        } else {
            println!("{} {}", style("[FAIL]").red(), message);
        }
    }
}

/// Progress bar for batch tarball downloads.
///
/// Renders an indicatif bar in interactive mode, plain counters in CI.
pub struct BatchProgress {
    bar: Option<ProgressBar>,
    total: u64,
}

impl BatchProgress {
    /// Create a new batch progress indicator for `total` packages.
    pub fn new(ctx: &UiContext, total: usize) -> Self {
        let bar = if ctx.use_fancy_output() {
            let bar = ProgressBar::new(total as u64);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("  {spinner:.cyan} Downloading  {bar:20.cyan/dim} {pos}/{len} {msg:.dim}  {elapsed:.dim}")
                    .unwrap()
                    .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
                    .progress_chars("━╸─"),
            );
            bar.enable_steady_tick(std::time::Duration::from_millis(120));
            Some(bar)
        } else {
            println!("Downloading {} package(s)...", total);
            None
        };
        Self {
            bar,
            total: total as u64,
        }
    }

    /// Apply an orchestrator progress report.
    pub fn on_progress(&self, progress: &DownloadProgress) {
        if let Some(ref bar) = self.bar {
            bar.set_position(progress.completed as u64);
            let remaining = self.total.saturating_sub(progress.completed as u64);
            if progress.cancelled {
                bar.set_message("cancelled");
            } else {
                bar.set_message(format!("{} remaining", remaining));
            }
        } else {
            println!("  {}/{}", progress.completed, progress.total);
        }
    }

    /// Finish and clear the progress bar.
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.disable_steady_tick();
            bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_non_interactive() {
        let ctx = UiContext::non_interactive();
        let mut spinner = TaskSpinner::new(&ctx);
        spinner.start("Resolving...");
        spinner.stop("Done");
        // Should not panic
    }

    #[test]
    fn batch_progress_non_interactive() {
        let ctx = UiContext::non_interactive();
        let progress = BatchProgress::new(&ctx, 3);
        progress.on_progress(&DownloadProgress {
            completed: 1,
            total: 3,
            cancelled: false,
        });
        progress.on_progress(&DownloadProgress {
            completed: 1,
            total: 3,
            cancelled: true,
        });
        progress.finish();
        // Should not panic
    }
}
