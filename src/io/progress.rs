//! Batch progress display for level generation

use std::sync::LazyLock;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::io::configuration::PROGRESS_BAR_WIDTH;

static LEVEL_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "[{{elapsed_precise}}] Levels: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tracks how many levels of a batch are done
pub struct ProgressManager {
    bar: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a manager with no bar yet
    pub const fn new() -> Self {
        Self { bar: None }
    }

    /// Create the bar for `level_count` levels
    pub fn initialize(&mut self, level_count: usize) {
        let bar = ProgressBar::new(level_count as u64);
        bar.set_style(LEVEL_STYLE.clone());
        self.bar = Some(bar);
    }

    /// Show which seed is being generated
    pub fn start_level(&self, seed: u64) {
        if let Some(ref bar) = self.bar {
            bar.set_message(format!("seed {seed}"));
        }
    }

    /// Count a finished level
    pub fn complete_level(&self, seed: u64, attempts: usize, elapsed: Duration) {
        if let Some(ref bar) = self.bar {
            bar.set_message(format!(
                "seed {seed}: {attempts} attempt(s) in {}ms",
                elapsed.as_millis()
            ));
            bar.inc(1);
        }
    }

    /// Close the bar
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_with_message("all levels generated");
        }
    }

    /// Levels counted so far
    pub fn completed(&self) -> u64 {
        self.bar.as_ref().map_or(0, ProgressBar::position)
    }
}
