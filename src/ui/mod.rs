//! Terminal presentation: theme, progress bar, table, and report layout.

pub mod colors;
pub mod format;
mod progress;
mod render;
mod table;

pub use progress::ProgressBar;
pub use render::render;
pub use table::render_model_table;
