pub mod icons;
pub mod output;
pub mod progress;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{error, file_failed, file_processed, header, info, phase, success, summary_row, warn};
pub use progress::file_progress;
pub use table::{render_dump, render_value, stats_table};
pub use theme::{theme, Theme};
