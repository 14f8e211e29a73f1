//! Per-file fill progress with a file-count bar for large batches

use crate::io::configuration::{MAX_INDIVIDUAL_PROGRESS_BARS, PROGRESS_BAR_WIDTH};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::LazyLock;

/// Progress display for a fill over one or more files
///
/// Every file gets a percent bar when its fill starts. At most
/// `MAX_INDIVIDUAL_PROGRESS_BARS` stay on screen, the oldest making room for
/// the newest, and runs over more files than that add a file-count bar.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    /// On-screen bars keyed by file index, oldest first
    file_bars: VecDeque<(usize, ProgressBar)>,
    file_count: usize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static FILE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{msg:>4}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{prefix}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Files: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a manager with nothing on screen
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            file_bars: VecDeque::new(),
            file_count: 0,
        }
    }

    /// Prepare for a run over `file_count` files
    pub fn initialize(&mut self, file_count: usize) {
        self.file_count = file_count;

        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS && self.batch_bar.is_none() {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }
    }

    /// Number of files the manager was initialized for
    pub const fn file_count(&self) -> usize {
        self.file_count
    }

    /// Whether the bar of a file is still on screen
    pub fn is_visible(&self, index: usize) -> bool {
        self.bar(index).is_some()
    }

    /// Show a bar for a file whose fill is starting
    pub fn start_file(&mut self, index: usize, path: &Path) {
        let overflow = (self.file_bars.len() + 1).saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        for (_, oldest) in self.file_bars.drain(..overflow) {
            self.multi_progress.remove(&oldest);
        }

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let bar = self.multi_progress.add(ProgressBar::new(100));
        bar.set_style(FILE_STYLE.clone());
        bar.set_prefix(name);
        bar.set_message("0%");
        self.file_bars.push_back((index, bar));
    }

    /// Report the fill percentage of a file
    pub fn update_progress(&self, index: usize, percent: u8) {
        if let Some(bar) = self.bar(index) {
            let percent = percent.min(100);
            bar.set_position(u64::from(percent));
            bar.set_message(format!("{percent}%"));
        }
    }

    /// Mark a file as done
    ///
    /// The bar jumps to 100% even though the final pixel of each hole is left
    /// unfilled, since nothing more will happen to the file.
    pub fn complete_file(&self, index: usize) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(bar) = self.bar(index) {
            bar.set_prefix(format!("✓ {}", bar.prefix()));
            bar.set_position(100);
            bar.finish_with_message("100%");
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All files processed");
        }
        let _ = self.multi_progress.clear();
    }

    fn bar(&self, index: usize) -> Option<&ProgressBar> {
        self.file_bars
            .iter()
            .find(|(bar_index, _)| *bar_index == index)
            .map(|(_, bar)| bar)
    }
}
