use indicatif::{ProgressBar, ProgressStyle};

/// Progress over the files of one run; hidden when stdout is not a terminal
pub fn file_progress(total: usize) -> ProgressBar {
    if !console::Term::stdout().is_term() {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::with_template("{spinner} [{pos}/{len}] {wide_msg}") {
        bar.set_style(style);
    }
    bar
}
